//! Main runner: records in, tables and snapshots out

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use pubmap_core::{ProgressContext, cleanup_tmp_files, fmt_num};

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::export::{write_global_tables, write_snapshots};
use crate::links::LinkTable;
use crate::normalize::normalize;
use crate::record::PublicationRecord;
use crate::snapshot::run_snapshots;
use crate::Year;

/// Build execution summary
#[derive(Debug)]
pub struct Summary {
    pub records: usize,
    pub skipped: usize,
    pub author_rows: usize,
    pub links: usize,
    pub nodes: usize,
    pub edges: usize,
    pub years: Option<(Year, Year)>,
    pub snapshots: usize,
    pub snapshot_dir: PathBuf,
    pub elapsed: Duration,
}

impl Summary {
    /// Format summary table as a string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Coauthor graph")
                    .fg(Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan),
            ]);

        table.add_row(vec![
            Cell::new("Records"),
            Cell::new(format!(
                "{} ({} skipped)",
                fmt_num(self.records),
                fmt_num(self.skipped)
            )),
        ]);
        table.add_row(vec!["Author rows".to_string(), fmt_num(self.author_rows)]);
        table.add_row(vec!["Coauthor links".to_string(), fmt_num(self.links)]);
        table.add_row(vec![
            Cell::new("Nodes").fg(Color::Green),
            Cell::new(fmt_num(self.nodes)).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("Edges").fg(Color::Green),
            Cell::new(fmt_num(self.edges)).fg(Color::Green),
        ]);
        table.add_row(vec![
            "Years".to_string(),
            match self.years {
                Some((min, max)) => format!("{min}-{max}"),
                None => "-".to_string(),
            },
        ]);
        table.add_row(vec![
            "Snapshots".to_string(),
            format!("{} + global", self.snapshots),
        ]);
        table.add_row(vec![
            "Output".to_string(),
            self.snapshot_dir.display().to_string(),
        ]);
        table.add_row(vec![
            "Time".to_string(),
            format!("{:.1}s", self.elapsed.as_secs_f64()),
        ]);

        format!("\n{table}")
    }
}

/// Run the graph build over already-retrieved records
pub fn run(
    records: &[PublicationRecord],
    config: &Config,
    progress: &ProgressContext,
) -> Result<Summary> {
    let start = Instant::now();

    std::fs::create_dir_all(&config.output_dir).context("Failed to create output directory")?;
    cleanup_tmp_files(&config.output_dir).context("Failed to clean stale tmp files")?;

    let stage = progress.stage_line("aggregate");
    stage.set_message(format!("normalizing {} records", fmt_num(records.len())));
    let table = normalize(records)?;
    let stats = table.stats();

    stage.set_message("building coauthor links");
    let links = LinkTable::from_normalized(&table);

    stage.set_message("aggregating global graph");
    let global = aggregate(&links);
    write_global_tables(
        &global,
        &config.output_dir,
        config.table_format,
        config.zstd_level,
    )?;
    stage.finish_with_message(format!(
        "{} nodes, {} edges",
        fmt_num(global.nodes.len()),
        fmt_num(global.edges.len())
    ));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.max(1))
        .build()
        .context("Failed to create thread pool")?;
    let pb = progress.count_bar("snapshots", 0);
    let set = pool.install(|| run_snapshots(&links, &global.index, &config.snapshot, &pb));
    pb.finish_and_clear();

    let snapshot_dir = write_snapshots(&set, &config.output_dir)?;

    let summary = Summary {
        records: stats.records,
        skipped: stats.skipped(),
        author_rows: table.rows().len(),
        links: links.len(),
        nodes: global.nodes.len(),
        edges: global.edges.len(),
        years: links.year_range(),
        snapshots: set.yearly.len(),
        snapshot_dir,
        elapsed: start.elapsed(),
    };

    log::info!("=== Coauthor Graph Summary ===");
    log::info!(
        "Records: {} ({} skipped)",
        summary.records,
        summary.skipped
    );
    log::info!(
        "Graph: {} nodes, {} edges from {} links",
        summary.nodes,
        summary.edges,
        summary.links
    );
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn empty_records_abort_before_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        let err = run(&[], &config, &ProgressContext::hidden()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::EmptyInput)
        );
        assert!(!dir.path().join("out").join("pubmap").exists());
    }

    #[test]
    fn summary_table_mentions_counts() {
        let summary = Summary {
            records: 1_200,
            skipped: 3,
            author_rows: 5_000,
            links: 10_000,
            nodes: 800,
            edges: 4_000,
            years: Some((1999, 2024)),
            snapshots: 26,
            snapshot_dir: PathBuf::from("data/pubmap"),
            elapsed: Duration::from_secs(2),
        };
        let table = summary.format_table();
        assert!(table.contains("1,200 (3 skipped)"));
        assert!(table.contains("1999-2024"));
        assert!(table.contains("26 + global"));
    }
}
