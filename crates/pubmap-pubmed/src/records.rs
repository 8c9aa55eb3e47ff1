//! Record persistence as a JSON array

use std::path::Path;

use anyhow::{Context, Result};
use pubmap_core::write_json_atomic;
use pubmap_graph::PublicationRecord;

pub fn save_records(path: &Path, records: &[PublicationRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    write_json_atomic(path, &records)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn load_records(path: &Path) -> Result<Vec<PublicationRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let records: Vec<PublicationRecord> = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Malformed records file {}", path.display()))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pubmap_graph::AuthorEntry;

    #[test]
    fn records_survive_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("records.json");
        let mut author = AuthorEntry::new("Smith", "J");
        author.affiliation = Some("Univ A".into());
        let records = vec![PublicationRecord {
            pmid: "1".into(),
            publication_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            authors: vec![author, AuthorEntry::new("Doe", "A")],
            ..Default::default()
        }];

        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn authors_stored_as_structured_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let records = vec![PublicationRecord {
            pmid: "7".into(),
            authors: vec![AuthorEntry::new("Lee", "K")],
            ..Default::default()
        }];
        save_records(&path, &records).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc[0]["authors"][0]["lastname"], "Lee");
        assert_eq!(doc[0]["authors"][0]["initials"], "K");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_records(&dir.path().join("absent.json")).is_err());
    }
}
