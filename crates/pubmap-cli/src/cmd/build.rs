//! Build subcommand - records file in, coauthor graph out

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use pubmap_core::SharedProgress;
use pubmap_graph::{LastMode, PublicationRecord, WindowMode, export::TableFormat};

use crate::config::{Config, GraphConfig};

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum WindowArg {
    Rolling,
    Cumulative,
}

impl From<WindowArg> for WindowMode {
    fn from(w: WindowArg) -> Self {
        match w {
            WindowArg::Rolling => WindowMode::Rolling,
            WindowArg::Cumulative => WindowMode::Cumulative,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum LastArg {
    Year,
    Recency,
}

impl From<LastArg> for LastMode {
    fn from(l: LastArg) -> Self {
        match l {
            LastArg::Year => LastMode::Year,
            LastArg::Recency => LastMode::Recency,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum FormatArg {
    Tsv,
    Parquet,
}

impl From<FormatArg> for TableFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Tsv => TableFormat::Tsv,
            FormatArg::Parquet => TableFormat::Parquet,
        }
    }
}

/// Graph options; each overrides the `[graph]` config value of the same name.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Keep only the N most active authors per window (0 = unlimited)
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Minimum coauthor links per author within a window
    #[arg(long)]
    pub min_power: Option<usize>,

    /// Keep only the N heaviest edges per window (0 = unlimited)
    #[arg(long)]
    pub max_edges: Option<usize>,

    /// Minimum shared publications per edge
    #[arg(long)]
    pub min_weight: Option<usize>,

    /// Rolling window width in years
    #[arg(long)]
    pub past_years: Option<u32>,

    /// Drop authors left without edges
    #[arg(long)]
    pub remove_stumps: Option<bool>,

    /// Window layout
    #[arg(long, value_enum)]
    pub window: Option<WindowArg>,

    /// What `last` reports on snapshot nodes
    #[arg(long, value_enum)]
    pub last: Option<LastArg>,
}

impl GraphArgs {
    pub fn apply(&self, mut graph: GraphConfig) -> GraphConfig {
        if let Some(v) = self.max_nodes {
            graph.max_nodes = v;
        }
        if let Some(v) = self.min_power {
            graph.min_power = v;
        }
        if let Some(v) = self.max_edges {
            graph.max_edges = v;
        }
        if let Some(v) = self.min_weight {
            graph.min_weight = v;
        }
        if let Some(v) = self.past_years {
            graph.past_years = v;
        }
        if let Some(v) = self.remove_stumps {
            graph.remove_stumps = v;
        }
        if let Some(v) = self.window {
            graph.window = v.into();
        }
        if let Some(v) = self.last {
            graph.last = v.into();
        }
        graph
    }
}

/// Output options shared by `build` and `run`
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Global table format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Zstd compression level for parquet tables (1-22)
    #[arg(short, long)]
    pub zstd_level: Option<i32>,

    /// Threads for per-year snapshots
    #[arg(short, long)]
    pub workers: Option<usize>,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Records JSON written by `pubmap fetch`
    pub records: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub graph: GraphArgs,
}

pub fn run(args: BuildArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let records = pubmap_pubmed::load_records(&args.records)?;
    build_graph(&records, &args.output, &args.graph, config, progress)
}

/// Effective graph config: config file values overridden by flags.
pub fn graph_config(
    output: &OutputArgs,
    graph: &GraphArgs,
    config: &Config,
) -> pubmap_graph::Config {
    pubmap_graph::Config {
        output_dir: output
            .output
            .clone()
            .unwrap_or_else(|| config.output.default_dir.clone()),
        table_format: output
            .format
            .map(Into::into)
            .unwrap_or(config.output.table_format),
        zstd_level: output.zstd_level.unwrap_or(config.output.compression_level),
        snapshot: graph.apply(config.graph).snapshot_params(),
        workers: output.workers.unwrap_or(config.workers.default),
    }
}

pub fn build_graph(
    records: &[PublicationRecord],
    output: &OutputArgs,
    graph: &GraphArgs,
    config: &Config,
    progress: &SharedProgress,
) -> Result<()> {
    let graph_config = graph_config(output, graph, config);

    log::info!("Building coauthor graph");
    log::info!("  Output: {}", graph_config.output_dir.display());
    log::info!(
        "  Window: {} ({} years), last = {}",
        graph_config.snapshot.mode,
        graph_config.snapshot.past_years,
        graph_config.snapshot.filters.last
    );

    let summary = pubmap_graph::run(records, &graph_config, progress)?;
    eprintln!("{}", summary.format_table());
    Ok(())
}
