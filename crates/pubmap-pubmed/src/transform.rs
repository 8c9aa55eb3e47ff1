//! Transform PubmedArticle to PublicationRecord

use chrono::NaiveDate;
use pubmap_graph::{AuthorEntry, PublicationRecord};

use crate::parser::{Author, PubmedArticle};

/// Convert a parsed article into the record shape the graph pipeline reads.
pub fn to_record(article: PubmedArticle) -> PublicationRecord {
    let publication_date = publication_date(&article);

    let mut affiliations: Vec<String> = Vec::new();
    for aff in article.authors.iter().flat_map(|a| &a.affiliations) {
        if !affiliations.contains(aff) {
            affiliations.push(aff.clone());
        }
    }

    PublicationRecord {
        pmid: article.pmid,
        title: article.title,
        abstract_text: article.abstract_text,
        journal: article.journal_title,
        publication_date,
        doi: article.doi,
        authors: article.authors.iter().map(author_entry).collect(),
        affiliations,
    }
}

fn author_entry(author: &Author) -> AuthorEntry {
    AuthorEntry {
        lastname: author.last_name.clone(),
        initials: author.initials.clone(),
        affiliation: author.affiliations.first().cloned(),
    }
}

/// Year/Month/Day when present (missing parts default to 1), otherwise the
/// leading year of a MedlineDate.
fn publication_date(article: &PubmedArticle) -> Option<NaiveDate> {
    let year = article
        .pub_year
        .or_else(|| article.medline_date.as_deref().and_then(leading_year))?;
    let month = article.pub_month.unwrap_or(1);
    let day = article.pub_day.unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
}

fn leading_year(medline_date: &str) -> Option<i32> {
    let digits = medline_date.trim_start().get(..4)?;
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}
