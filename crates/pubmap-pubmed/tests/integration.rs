//! Integration tests for pubmap-pubmed
//!
//! These tests require network access and are marked #[ignore] by default.
//! Run with: cargo test -p pubmap-pubmed --test integration -- --ignored

use pubmap_core::ProgressContext;
use pubmap_graph::{Config as GraphConfig, run as build};
use pubmap_pubmed::{Config, eutils, load_records, run, save_records};
use tempfile::TempDir;

/// Search returns at most `max_results` PMIDs
/// Run with: cargo test -p pubmap-pubmed --test integration -- --ignored
#[test]
#[ignore]
fn search_respects_max_results() {
    let config = Config {
        max_results: 15,
        ..Default::default()
    };
    let pmids = eutils::search(&config, "coauthorship network").expect("search should succeed");
    assert!(!pmids.is_empty());
    assert!(pmids.len() <= 15);
    assert!(pmids.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
}

/// Fetch a small query in several batches, persist it, and build a graph
/// Run with: cargo test -p pubmap-pubmed --test integration -- --ignored fetch_and_build
#[test]
#[ignore]
fn fetch_and_build() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        max_results: 30,
        batch_size: 10,
        ..Default::default()
    };
    let progress = ProgressContext::hidden();

    let (records, summary) = run("bibliometrics[tiab]", &config, &progress).expect("fetch");
    assert_eq!(summary.pmids, 30);
    assert!(summary.records >= 25, "got {} records", summary.records);
    assert!(records.iter().any(|r| r.year().is_some()));
    assert!(records.iter().any(|r| !r.authors.is_empty()));

    let path = temp_dir.path().join("records.json");
    save_records(&path, &records).unwrap();
    let reloaded = load_records(&path).unwrap();
    assert_eq!(reloaded, records);

    let graph_config = GraphConfig {
        output_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let built = build(&reloaded, &graph_config, &progress).expect("build");
    assert!(built.nodes > 0);
    assert!(built.snapshot_dir.join("pubmap_info.json").exists());
}
