//! pubmap - coauthorship networks from PubMed searches
//!
//! Fetches publication records for a query, aggregates coauthor links into a
//! weighted graph, and writes yearly snapshot JSON for visualization.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pubmap_core::{ProgressContext, Verbosity};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pubmap")]
#[command(about = "Coauthorship networks from PubMed searches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./pubmap.toml or ~/.config/pubmap/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    read_timeout: Option<u64>,

    /// Maximum retry attempts for transient failures
    #[arg(long, global = true)]
    max_retries: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Search PubMed and store the hits as a records file
    Fetch(cmd::fetch::FetchArgs),
    /// Build the coauthor graph and snapshots from a records file
    Build(cmd::build::BuildArgs),
    /// Fetch and build in one step
    Run(cmd::run::RunArgs),
    /// Show relative author-list positions for given authors
    Positions(cmd::positions::PositionsArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug, progress bars show activity
    //   non-TTY: info unless --debug, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    pubmap_core::init_logging(Verbosity::from_flags(cli.debug, is_tty), multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    // Config file defaults, CLI overrides
    pubmap_core::set_http_config(pubmap_core::HttpConfig {
        read_timeout: std::time::Duration::from_secs(
            cli.read_timeout.unwrap_or(config.http.read_timeout),
        ),
        max_retries: cli.max_retries.unwrap_or(config.http.max_retries),
    });

    match cli.command {
        Command::Fetch(args) => cmd::fetch::run(args, &config, &progress),
        Command::Build(args) => cmd::build::run(args, &config, &progress),
        Command::Run(args) => cmd::run::run(args, &config, &progress),
        Command::Positions(args) => cmd::positions::run(args),
        Command::Config => {
            let graph = config.graph;
            let table = cmd::kv_table(
                "Setting",
                &[
                    ("Output directory", config.output.default_dir.display().to_string()),
                    ("Table format", config.output.table_format.to_string()),
                    ("Compression level", config.output.compression_level.to_string()),
                    ("Workers", config.workers.default.to_string()),
                    ("PubMed base URL", config.pubmed.base_url.clone()),
                    ("PubMed tool", config.pubmed.tool.clone()),
                    (
                        "PubMed email",
                        config.pubmed.email.clone().unwrap_or_else(|| "not set".to_string()),
                    ),
                    (
                        "NCBI API key",
                        if config.pubmed.api_key.is_some() {
                            "configured".to_string()
                        } else {
                            "not set".to_string()
                        },
                    ),
                    ("Max results", config.pubmed.max_results.to_string()),
                    ("Batch size", config.pubmed.batch_size.to_string()),
                    ("Window", format!("{} ({} years)", graph.window, graph.past_years)),
                    ("Last", graph.last.to_string()),
                    ("Min power", graph.min_power.to_string()),
                    ("Max nodes", graph.max_nodes.to_string()),
                    ("Min weight", graph.min_weight.to_string()),
                    ("Max edges", graph.max_edges.to_string()),
                    ("Remove stumps", graph.remove_stumps.to_string()),
                    ("Read timeout", format!("{}s", config.http.read_timeout)),
                    ("Max retries", config.http.max_retries.to_string()),
                ],
            );
            eprintln!("\n{table}");
            Ok(())
        }
    }
}
