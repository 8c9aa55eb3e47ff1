//! Pubmap PubMed - record retrieval from NCBI E-utilities
//!
//! Searches PubMed for a query, fetches the hits as efetch XML in batches
//! and turns each `<PubmedArticle>` into a [`PublicationRecord`].
//!
//! # Example
//!
//! ```ignore
//! use pubmap_pubmed::{Config, run};
//!
//! let (records, summary) = run("crispr[tiab]", &Config::default(), &progress)?;
//! println!("Fetched {} records", summary.records);
//! ```
//!
//! [`PublicationRecord`]: pubmap_graph::PublicationRecord

pub mod config;
pub mod eutils;
pub mod parser;
pub mod records;
pub mod runner;
pub mod transform;

// Re-exports
pub use config::Config;
pub use records::{load_records, save_records};
pub use runner::{Summary, run};
