//! Record normalization: one row per named author per dated publication.

use std::sync::Arc;

use crate::error::PipelineError;
use crate::record::PublicationRecord;
use crate::{AuthorName, Year};

/// Why a record was left out of the author table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingDate,
    /// No author entry carried a last name
    NoAuthors,
}

/// A single (publication, author) row.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRow {
    /// Position of the source record in the input slice
    pub publication: usize,
    pub publication_id: Arc<str>,
    pub author: AuthorName,
    pub affiliation: Option<String>,
    pub year: Year,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub records: usize,
    pub kept: usize,
    pub missing_date: usize,
    pub no_authors: usize,
    /// Author entries dropped for lacking a last name
    pub unnamed_authors: usize,
}

impl NormalizeStats {
    pub fn skipped(&self) -> usize {
        self.missing_date + self.no_authors
    }
}

/// Author rows grouped contiguously by publication, in input order.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    rows: Vec<AuthorRow>,
    stats: NormalizeStats,
}

impl NormalizedTable {
    pub fn rows(&self) -> &[AuthorRow] {
        &self.rows
    }

    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }

    /// Per-publication slices of author rows (never empty).
    pub fn publications(&self) -> impl Iterator<Item = &[AuthorRow]> {
        self.rows.chunk_by(|a, b| a.publication == b.publication)
    }
}

/// Build the author table from raw records.
///
/// Records without a date or without any named author are skipped and
/// counted. Fails only when there is nothing to work with at all.
pub fn normalize(records: &[PublicationRecord]) -> Result<NormalizedTable, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut table = NormalizedTable {
        rows: Vec::new(),
        stats: NormalizeStats {
            records: records.len(),
            ..Default::default()
        },
    };

    for (idx, record) in records.iter().enumerate() {
        match normalize_record(idx, record, &mut table) {
            Ok(()) => table.stats.kept += 1,
            Err(reason) => {
                log::debug!("Skipping record {:?}: {:?}", record.pmid, reason);
                match reason {
                    SkipReason::MissingDate => table.stats.missing_date += 1,
                    SkipReason::NoAuthors => table.stats.no_authors += 1,
                }
            }
        }
    }

    if table.stats.kept == 0 {
        return Err(PipelineError::NoUsableRecords {
            skipped: table.stats.skipped(),
        });
    }

    log::info!(
        "Normalized {} records into {} author rows ({} skipped)",
        table.stats.kept,
        table.rows.len(),
        table.stats.skipped()
    );
    Ok(table)
}

fn normalize_record(
    idx: usize,
    record: &PublicationRecord,
    table: &mut NormalizedTable,
) -> Result<(), SkipReason> {
    let year = record.year().ok_or(SkipReason::MissingDate)?;
    let publication_id: Arc<str> = Arc::from(record.pmid.as_str());

    let before = table.rows.len();
    for entry in &record.authors {
        let Some(name) = entry.author_name() else {
            table.stats.unnamed_authors += 1;
            continue;
        };
        table.rows.push(AuthorRow {
            publication: idx,
            publication_id: publication_id.clone(),
            author: Arc::from(name),
            affiliation: entry.affiliation.clone(),
            year,
        });
    }

    if table.rows.len() == before {
        return Err(SkipReason::NoAuthors);
    }
    Ok(())
}
