//! Pubmap Graph - coauthorship network from bibliographic records
//!
//! Turns publication records into a weighted author graph and a series of
//! yearly snapshots of it.
//!
//! # Pipeline
//!
//! ```text
//! records → normalize → links → aggregate (global ids) → window → stats → snapshot
//! ```
//!
//! The global aggregation fixes node ids exactly once; every windowed
//! snapshot reuses them, so an author keeps the same id across all years.
//!
//! # Example
//!
//! ```ignore
//! use pubmap_graph::{Config, run};
//!
//! let records: Vec<pubmap_graph::PublicationRecord> = load_somehow();
//! let summary = run(&records, &Config::default(), &progress)?;
//! println!("{} snapshots", summary.snapshots);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod links;
pub mod normalize;
pub mod record;
pub mod runner;
pub mod schema;
pub mod snapshot;
pub mod stats;
pub mod window;

use std::sync::Arc;

/// Calendar year of a publication.
pub type Year = i32;

/// Author identity key, `"<lastname>,<initials>"`.
pub type AuthorName = Arc<str>;

// Re-exports
pub use aggregate::{Edge, GlobalGraph, IdIndex, Node, aggregate};
pub use config::Config;
pub use error::PipelineError;
pub use links::{CoauthorLink, LinkTable};
pub use normalize::{NormalizeStats, NormalizedTable, SkipReason, normalize};
pub use record::{AuthorEntry, PublicationRecord, author_position};
pub use runner::{Summary, run};
pub use snapshot::{Snapshot, SnapshotParams, SnapshotSet, WindowMode, run_snapshots};
pub use stats::{Describe, SnapshotInfo};
pub use window::{GraphFilters, LastMode, Window, WindowGraph, build_window};
