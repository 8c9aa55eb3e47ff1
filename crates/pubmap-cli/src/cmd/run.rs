//! Run subcommand - fetch then build in one go

use anyhow::{Context, Result};
use clap::Args;
use pubmap_core::SharedProgress;

use super::build::{GraphArgs, OutputArgs, build_graph};
use super::fetch::{PubmedArgs, RECORDS_FILE, fetch_records};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub pubmed: PubmedArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub graph: GraphArgs,
}

pub fn run(args: RunArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let records = fetch_records(&args.pubmed, config, progress)?;

    // Keep the records next to the graph so `build` can redo it offline
    let output_dir = args
        .output
        .output
        .clone()
        .unwrap_or_else(|| config.output.default_dir.clone());
    pubmap_pubmed::save_records(&output_dir.join(RECORDS_FILE), &records)
        .context("Failed to store fetched records")?;

    build_graph(&records, &args.output, &args.graph, config, progress)
}
