//! Persist the global tables and the snapshot documents.
//!
//! Layout under the output directory:
//!
//! ```text
//! pubmap_nodes.{tsv,parquet}
//! pubmap_edges.{tsv,parquet}
//! pubmap/pubmap{year}.json
//! pubmap/pubmap_info.json
//! pubmap/pubmap_global.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pubmap_core::{ParquetSink, TsvSink, write_json_atomic};
use serde::{Deserialize, Serialize};

use crate::aggregate::GlobalGraph;
use crate::schema;
use crate::snapshot::SnapshotSet;

pub const NODES_TABLE: &str = "pubmap_nodes";
pub const EDGES_TABLE: &str = "pubmap_edges";
pub const SNAPSHOT_DIR: &str = "pubmap";

/// File format of the global node/edge tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Tsv,
    Parquet,
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tsv => write!(f, "tsv"),
            Self::Parquet => write!(f, "parquet"),
        }
    }
}

#[derive(Serialize)]
struct EdgeRow {
    id: usize,
    source: usize,
    target: usize,
    weight: usize,
}

/// Write the unfiltered global node and edge tables.
pub fn write_global_tables(
    graph: &GlobalGraph,
    output_dir: &Path,
    format: TableFormat,
    zstd_level: i32,
) -> Result<()> {
    match format {
        TableFormat::Tsv => {
            let mut nodes = TsvSink::new(NODES_TABLE, output_dir)
                .context("Failed to create node table")?;
            for node in &graph.nodes {
                nodes.write_row(node)?;
            }
            nodes.finalize().context("Failed to finalize node table")?;

            let mut edges = TsvSink::new(EDGES_TABLE, output_dir)
                .context("Failed to create edge table")?;
            for (idx, edge) in graph.edges.iter().enumerate() {
                edges.write_row(&EdgeRow {
                    id: edge.id.unwrap_or(idx),
                    source: edge.source,
                    target: edge.target,
                    weight: edge.weight,
                })?;
            }
            edges.finalize().context("Failed to finalize edge table")?;
        }
        TableFormat::Parquet => {
            let mut nodes = ParquetSink::new(NODES_TABLE, output_dir, schema::nodes(), zstd_level)
                .context("Failed to create node table")?;
            nodes.write_batch(&schema::nodes_batch(&graph.nodes)?)?;
            nodes.finalize().context("Failed to finalize node table")?;

            let mut edges = ParquetSink::new(EDGES_TABLE, output_dir, schema::edges(), zstd_level)
                .context("Failed to create edge table")?;
            edges.write_batch(&schema::edges_batch(&graph.edges)?)?;
            edges.finalize().context("Failed to finalize edge table")?;
        }
    }

    log::info!(
        "Wrote {} nodes and {} edges ({format}) to {}",
        graph.nodes.len(),
        graph.edges.len(),
        output_dir.display()
    );
    Ok(())
}

/// Write one JSON document per year plus the global info and payload.
///
/// Returns the snapshot directory.
pub fn write_snapshots(set: &SnapshotSet, output_dir: &Path) -> Result<PathBuf> {
    let dir = output_dir.join(SNAPSHOT_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for snapshot in &set.yearly {
        let Some(year) = snapshot.year else { continue };
        let path = dir.join(format!("pubmap{year}.json"));
        write_json_atomic(&path, snapshot)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let info_path = dir.join("pubmap_info.json");
    write_json_atomic(&info_path, &set.global.info)
        .with_context(|| format!("Failed to write {}", info_path.display()))?;

    let global_path = dir.join("pubmap_global.json");
    write_json_atomic(&global_path, &set.global)
        .with_context(|| format!("Failed to write {}", global_path.display()))?;

    log::info!(
        "Wrote {} snapshots to {}",
        set.yearly.len(),
        dir.display()
    );
    Ok(dir)
}
