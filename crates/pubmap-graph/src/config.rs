//! Graph build configuration

use std::path::PathBuf;

use crate::export::TableFormat;
use crate::snapshot::SnapshotParams;

/// Runtime configuration for a graph build
#[derive(Debug, Clone)]
pub struct Config {
    /// Output directory for tables and the snapshot folder
    pub output_dir: PathBuf,
    pub table_format: TableFormat,
    /// Zstd compression level for parquet tables
    pub zstd_level: i32,
    pub snapshot: SnapshotParams,
    /// Threads used for per-year snapshots
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            table_format: TableFormat::Tsv,
            zstd_level: 3,
            snapshot: SnapshotParams::default(),
            workers: 1,
        }
    }
}
