//! End-to-end tests of the coauthor graph pipeline through the public API

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use indicatif::ProgressBar;
use pubmap_core::ProgressContext;
use pubmap_graph::{
    AuthorEntry, Config, GraphFilters, LinkTable, PublicationRecord, SnapshotParams, WindowMode,
    aggregate, normalize, run, run_snapshots,
};

fn publication(pmid: &str, year: i32, authors: &[&str]) -> PublicationRecord {
    PublicationRecord {
        pmid: pmid.to_string(),
        title: Some(format!("Paper {pmid}")),
        publication_date: NaiveDate::from_ymd_opt(year, 3, 15),
        authors: authors
            .iter()
            .map(|name| {
                let (last, initials) = name.split_once(',').unwrap();
                AuthorEntry::new(last, initials)
            })
            .collect(),
        ..Default::default()
    }
}

fn corpus() -> Vec<PublicationRecord> {
    vec![
        publication("1", 2015, &["Smith,J", "Doe,A", "Lee,K"]),
        publication("2", 2016, &["Smith,J", "Doe,A"]),
        publication("3", 2017, &["Lee,K", "Park,S"]),
        publication("4", 2018, &["Smith,J", "Park,S", "Kim,H", "Doe,A"]),
        publication("5", 2018, &["Kim,H"]),
        publication("6", 2020, &["Novak,P", "Ortiz,R"]),
        publication("7", 2020, &["Smith,J", "Ortiz,R"]),
    ]
}

fn links(records: &[PublicationRecord]) -> LinkTable {
    LinkTable::from_normalized(&normalize(records).unwrap())
}

#[test]
fn shared_publications_scenario() {
    let records = [
        publication("1", 2020, &["Smith,J", "Doe,A"]),
        publication("2", 2021, &["Smith,J", "Doe,A"]),
    ];
    let graph = aggregate(&links(&records));

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].weight, 2);
    let smith = graph.nodes.iter().find(|n| n.name.as_ref() == "Smith,J").unwrap();
    assert_eq!((smith.power, smith.first, smith.last), (2, 2020, 2021));
}

#[test]
fn duplicate_author_publication_scenario() {
    let table = links(&[publication("1", 2020, &["Lee,K", "Lee,K"])]);
    assert!(table.is_empty());
}

#[test]
fn every_snapshot_is_referentially_consistent() {
    let links = links(&corpus());
    let global = aggregate(&links);

    for filters in [
        GraphFilters::default(),
        GraphFilters {
            min_power: 2,
            max_nodes: 3,
            ..Default::default()
        },
        GraphFilters {
            min_weight: 2,
            max_edges: 2,
            remove_stumps: false,
            ..Default::default()
        },
    ] {
        let params = SnapshotParams {
            past_years: 2,
            filters,
            ..Default::default()
        };
        let set = run_snapshots(&links, &global.index, &params, &ProgressBar::hidden());
        for snapshot in set.yearly.iter().chain([&set.global]) {
            let ids: HashSet<usize> = snapshot.nodes.iter().map(|n| n.id).collect();
            for edge in &snapshot.edges {
                assert!(ids.contains(&edge.source) && ids.contains(&edge.target));
            }
            if filters.remove_stumps {
                let endpoints: HashSet<usize> =
                    snapshot.edges.iter().flat_map(|e| [e.source, e.target]).collect();
                assert!(snapshot.nodes.iter().all(|n| endpoints.contains(&n.id)));
            }
        }
    }
}

#[test]
fn cumulative_snapshots_only_grow() {
    let links = links(&corpus());
    let global = aggregate(&links);
    let params = SnapshotParams {
        mode: WindowMode::Cumulative,
        filters: GraphFilters {
            remove_stumps: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let set = run_snapshots(&links, &global.index, &params, &ProgressBar::hidden());

    let mut seen = BTreeSet::new();
    for snapshot in &set.yearly {
        let ids: BTreeSet<usize> = snapshot.nodes.iter().map(|n| n.id).collect();
        assert!(seen.is_subset(&ids));
        seen = ids;
    }
    assert_eq!(seen.len(), global.nodes.len());
}

#[test]
fn full_run_writes_outputs() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        workers: 2,
        ..Default::default()
    };

    let summary = run(&corpus(), &config, &ProgressContext::hidden()).unwrap();

    assert_eq!(summary.records, 7);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.years, Some((2015, 2020)));
    // 2015, 2016, 2017, 2018, 2020 (the 2018 single-author paper adds no year)
    assert_eq!(summary.snapshots, 5);
    assert!(dir.path().join("pubmap_nodes.tsv").exists());
    assert!(dir.path().join("pubmap_edges.tsv").exists());

    let doc: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(summary.snapshot_dir.join("pubmap2018.json")).unwrap(),
    )
    .unwrap();
    assert!(doc["nodes"].as_array().is_some_and(|n| !n.is_empty()));
    assert!(doc["edges"].is_array());
    assert_eq!(doc["info"]["year"], serde_json::json!([2015, 2018]));
}
