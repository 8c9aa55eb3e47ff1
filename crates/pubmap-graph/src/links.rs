//! Pairwise coauthor links.
//!
//! Each publication contributes one row per unordered pair of distinct
//! authors, canonicalized so that `a < b`. The resulting [`LinkTable`] is
//! built once and never mutated afterwards.

use std::collections::BTreeSet;

use crate::normalize::NormalizedTable;
use crate::window::Window;
use crate::{AuthorName, Year};

/// Unordered author pair plus the year they published together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoauthorLink {
    pub a: AuthorName,
    pub b: AuthorName,
    pub year: Year,
}

impl CoauthorLink {
    /// Canonical link for two names, `None` for a self-pair.
    pub fn new(x: &AuthorName, y: &AuthorName, year: Year) -> Option<Self> {
        match x.cmp(y) {
            std::cmp::Ordering::Less => Some(Self {
                a: x.clone(),
                b: y.clone(),
                year,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                a: y.clone(),
                b: x.clone(),
                year,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// All distinct canonical pairs for one publication.
///
/// Repeated author strings collapse, so n distinct names yield C(n, 2) links.
pub fn publication_links(authors: &[AuthorName], year: Year) -> Vec<CoauthorLink> {
    let mut pairs = BTreeSet::new();
    for (i, x) in authors.iter().enumerate() {
        for y in &authors[i + 1..] {
            if let Some(link) = CoauthorLink::new(x, y, year) {
                pairs.insert(link);
            }
        }
    }
    pairs.into_iter().collect()
}

/// The authoritative link table for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkTable {
    links: Vec<CoauthorLink>,
}

impl LinkTable {
    pub fn new(links: Vec<CoauthorLink>) -> Self {
        Self { links }
    }

    /// Concatenate per-publication links in publication order.
    pub fn from_normalized(table: &NormalizedTable) -> Self {
        let mut links = Vec::new();
        for rows in table.publications() {
            let year = rows[0].year;
            let authors: Vec<AuthorName> = rows.iter().map(|r| r.author.clone()).collect();
            links.extend(publication_links(&authors, year));
        }
        log::info!("Built {} coauthor links", links.len());
        Self { links }
    }

    pub fn links(&self) -> &[CoauthorLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<Year> {
        let years: BTreeSet<Year> = self.links.iter().map(|l| l.year).collect();
        years.into_iter().collect()
    }

    /// `(min, max)` year, `None` when empty.
    pub fn year_range(&self) -> Option<(Year, Year)> {
        let min = self.links.iter().map(|l| l.year).min()?;
        let max = self.links.iter().map(|l| l.year).max()?;
        Some((min, max))
    }

    /// New table holding only links inside `window`.
    pub fn slice(&self, window: &Window) -> Self {
        Self {
            links: self
                .links
                .iter()
                .filter(|l| window.contains(l.year))
                .cloned()
                .collect(),
        }
    }
}
