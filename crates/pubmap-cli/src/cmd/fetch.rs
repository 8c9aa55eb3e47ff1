//! Fetch subcommand - search PubMed and store the hits as records

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pubmap_core::{SharedProgress, fmt_num};
use pubmap_graph::PublicationRecord;

use crate::config::Config;

pub const RECORDS_FILE: &str = "records.json";

#[derive(Args, Debug, Clone)]
pub struct PubmedArgs {
    /// PubMed search query (E-utilities term syntax)
    pub query: String,

    /// Maximum number of PMIDs to retrieve
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// PMIDs per efetch request
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub pubmed: PubmedArgs,

    /// Records file to write (default: <output dir>/records.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: FetchArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| config.output.default_dir.join(RECORDS_FILE));
    let records = fetch_records(&args.pubmed, config, progress)?;
    pubmap_pubmed::save_records(&output, &records)?;
    Ok(())
}

/// Search and fetch, printing the retrieval summary.
pub fn fetch_records(
    args: &PubmedArgs,
    config: &Config,
    progress: &SharedProgress,
) -> Result<Vec<PublicationRecord>> {
    let mut pm_config = config.pubmed.to_pubmed();
    if let Some(n) = args.max_results {
        pm_config.max_results = n;
    }
    if let Some(n) = args.batch_size {
        pm_config.batch_size = n;
    }

    log::info!("Fetching PubMed records");
    log::info!("  Query: {}", args.query);
    log::info!("  Max results: {}", pm_config.max_results);

    let (records, summary) = pubmap_pubmed::run(&args.query, &pm_config, progress)?;

    super::print_summary(
        "PubMed",
        &[
            ("PMIDs", fmt_num(summary.pmids)),
            ("Records", fmt_num(summary.records)),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    Ok(records)
}
