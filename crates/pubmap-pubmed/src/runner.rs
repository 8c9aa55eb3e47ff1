//! Main runner for PubMed retrieval

use std::time::{Duration, Instant};

use anyhow::Result;
use pubmap_core::{ProgressContext, fmt_num};
use pubmap_graph::PublicationRecord;

use crate::config::Config;
use crate::eutils::{fetch_articles, search};
use crate::transform::to_record;

/// Retrieval summary
#[derive(Debug)]
pub struct Summary {
    pub pmids: usize,
    pub records: usize,
    pub elapsed: Duration,
}

/// Search PubMed for `query` and fetch every hit as a record.
///
/// Zero hits is not an error here; the graph build rejects empty input.
pub fn run(
    query: &str,
    config: &Config,
    progress: &ProgressContext,
) -> Result<(Vec<PublicationRecord>, Summary)> {
    let start = Instant::now();

    let stage = progress.stage_line("fetch");
    stage.set_message(format!("searching {query:?}"));
    let pmids = search(config, query)?;
    stage.finish_with_message(format!("{} PMIDs", fmt_num(pmids.len())));

    let pb = progress.count_bar("efetch", pmids.len() as u64);
    let articles = fetch_articles(config, &pmids, &pb)?;
    pb.finish_and_clear();

    let records: Vec<PublicationRecord> = articles.into_iter().map(to_record).collect();

    let summary = Summary {
        pmids: pmids.len(),
        records: records.len(),
        elapsed: start.elapsed(),
    };

    log::info!("=== PubMed Retrieval Summary ===");
    log::info!("PMIDs: {}", summary.pmids);
    log::info!("Records: {}", summary.records);
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok((records, summary))
}
