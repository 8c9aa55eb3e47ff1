//! Publication records as delivered by record retrieval.
//!
//! Records are read-only input. They are persisted as JSON with the author
//! list kept structured, so a reload never re-parses names from text.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Year;

/// One entry of a publication's author list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub lastname: Option<String>,
    pub initials: Option<String>,
    pub affiliation: Option<String>,
}

impl AuthorEntry {
    pub fn new(lastname: &str, initials: &str) -> Self {
        Self {
            lastname: Some(lastname.to_string()),
            initials: Some(initials.to_string()),
            affiliation: None,
        }
    }

    /// Identity key `"<lastname>,<initials>"`, or `None` without a last name.
    ///
    /// No variant folding: "J." and "J" are different authors.
    pub fn author_name(&self) -> Option<String> {
        let last = self.lastname.as_deref().filter(|s| !s.is_empty())?;
        let initials = self.initials.as_deref().unwrap_or("");
        Some(format!("{last},{initials}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub pmid: String,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub journal: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub doi: Option<String>,
    #[serde(default)]
    pub authors: Vec<AuthorEntry>,
    #[serde(default)]
    pub affiliations: Vec<String>,
}

impl PublicationRecord {
    pub fn year(&self) -> Option<Year> {
        self.publication_date.map(|d| d.year())
    }

    /// Author names in list order, entries without a last name dropped.
    pub fn author_names(&self) -> Vec<String> {
        self.authors.iter().filter_map(AuthorEntry::author_name).collect()
    }
}

/// Relative position (index / n, two decimals) of the first author whose
/// name starts with `prefix`.
pub fn author_position(authors: &[String], prefix: &str) -> Option<f64> {
    let idx = authors.iter().position(|name| name.starts_with(prefix))?;
    let ratio = idx as f64 / authors.len() as f64;
    Some((ratio * 100.0).round() / 100.0)
}
