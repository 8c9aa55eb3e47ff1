use std::sync::Arc;

use indicatif::ProgressBar;
use pubmap_graph::{AuthorName, CoauthorLink, LinkTable, SnapshotParams, aggregate, run_snapshots};

/// Deterministic synthetic corpus: `n` links over a pool of authors and 30 years.
fn synthetic_links(n: usize) -> LinkTable {
    let authors: Vec<AuthorName> = (0..2_000).map(|i| Arc::from(format!("Author{i},X"))).collect();
    let links = (0..n)
        .filter_map(|i| {
            let x = &authors[(i * 7919) % authors.len()];
            let y = &authors[(i * 104_729 + 13) % authors.len()];
            CoauthorLink::new(x, y, 1995 + (i % 30) as i32)
        })
        .collect();
    LinkTable::new(links)
}

#[divan::bench(args = [10_000, 100_000])]
fn global_aggregate(bencher: divan::Bencher, n: usize) {
    let links = synthetic_links(n);
    bencher.bench(|| aggregate(&links));
}

#[divan::bench]
fn yearly_snapshots(bencher: divan::Bencher) {
    let links = synthetic_links(100_000);
    let global = aggregate(&links);
    let params = SnapshotParams::default();
    bencher.bench(|| run_snapshots(&links, &global.index, &params, &ProgressBar::hidden()));
}

fn main() {
    divan::main();
}
