//! Pubmap Core - Shared infrastructure for the coauthorship pipeline
//!
//! HTTP access for record retrieval, retry policy, logging that cooperates
//! with progress bars, and the file sinks used to persist node/edge tables
//! and JSON snapshots.

pub mod http;
pub mod logging;
pub mod progress;
pub mod retry;
pub mod sink;

// Re-exports for convenience
pub use http::{HttpConfig, HttpError, get_text, http_config, set_http_config};
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use retry::retry_with_backoff;
pub use sink::{ParquetSink, TsvSink, cleanup_tmp_files, write_json_atomic};
