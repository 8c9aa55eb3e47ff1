//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pubmap_graph::{GraphFilters, LastMode, SnapshotParams, WindowMode, export::TableFormat};
use serde::Deserialize;

/// Global configuration for pubmap
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub pubmed: PubmedConfig,
    pub graph: GraphConfig,
    pub http: HttpConfig,
    pub workers: WorkersConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_dir: PathBuf,
    pub table_format: TableFormat,
    pub compression_level: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("./data"),
            table_format: TableFormat::Tsv,
            compression_level: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PubmedConfig {
    pub base_url: String,
    pub tool: String,
    pub email: Option<String>,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
    pub max_results: usize,
    pub batch_size: usize,
}

impl Default for PubmedConfig {
    fn default() -> Self {
        let defaults = pubmap_pubmed::Config::default();
        Self {
            base_url: defaults.base_url,
            tool: defaults.tool,
            email: None,
            api_key: std::env::var("NCBI_API_KEY").ok(),
            max_results: defaults.max_results,
            batch_size: defaults.batch_size,
        }
    }
}

impl PubmedConfig {
    pub fn to_pubmed(&self) -> pubmap_pubmed::Config {
        pubmap_pubmed::Config {
            base_url: self.base_url.clone(),
            tool: self.tool.clone(),
            email: self.email.clone(),
            api_key: self.api_key.clone(),
            max_results: self.max_results,
            batch_size: self.batch_size,
        }
    }
}

/// `[graph]` section: thresholds plus window layout. `0` disables a cap.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub max_nodes: usize,
    pub min_power: usize,
    pub max_edges: usize,
    pub min_weight: usize,
    pub past_years: u32,
    pub remove_stumps: bool,
    pub window: WindowMode,
    pub last: LastMode,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let params = SnapshotParams::default();
        Self {
            max_nodes: params.filters.max_nodes,
            min_power: params.filters.min_power,
            max_edges: params.filters.max_edges,
            min_weight: params.filters.min_weight,
            past_years: params.past_years,
            remove_stumps: params.filters.remove_stumps,
            window: params.mode,
            last: params.filters.last,
        }
    }
}

impl GraphConfig {
    pub fn snapshot_params(&self) -> SnapshotParams {
        SnapshotParams {
            mode: self.window,
            past_years: self.past_years,
            filters: GraphFilters {
                min_power: self.min_power,
                max_nodes: self.max_nodes,
                min_weight: self.min_weight,
                max_edges: self.max_edges,
                remove_stumps: self.remove_stumps,
                last: self.last,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds before a request is abandoned
    pub read_timeout: u64,
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let defaults = pubmap_core::HttpConfig::default();
        Self {
            read_timeout: defaults.read_timeout.as_secs(),
            max_retries: defaults.max_retries,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
    pub default: usize,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            default: cpus.min(8),
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./pubmap.toml (current directory)
    /// 2. ~/.config/pubmap/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("pubmap.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "pubmap") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.output.default_dir, PathBuf::from("./data"));
        assert_eq!(config.output.table_format, TableFormat::Tsv);
        assert_eq!(config.output.compression_level, 3);
        assert_eq!(config.pubmed.max_results, 2000);
        assert_eq!(config.graph.past_years, 25);
        assert!(config.graph.remove_stumps);
        assert_eq!(config.http.read_timeout, 60);
        assert!(config.workers.default >= 1);
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("PUBMAP_TEST_VAR", "test_value");
        assert_eq!(
            expand_env_var("${PUBMAP_TEST_VAR}"),
            Some("test_value".to_string())
        );
        std::env::remove_var("PUBMAP_TEST_VAR");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[output]
default_dir = "/tmp/data"
table_format = "parquet"
compression_level = 5

[pubmed]
email = "me@example.org"
max_results = 500

[graph]
max_nodes = 300
min_weight = 2
window = "cumulative"
last = "recency"

[http]
max_retries = 5

[workers]
default = 4
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.default_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.output.table_format, TableFormat::Parquet);
        assert_eq!(config.output.compression_level, 5);
        assert_eq!(config.pubmed.email.as_deref(), Some("me@example.org"));
        assert_eq!(config.pubmed.max_results, 500);
        assert_eq!(config.pubmed.batch_size, 200);
        assert_eq!(config.http.max_retries, 5);
        assert_eq!(config.http.read_timeout, 60);
        assert_eq!(config.workers.default, 4);

        let params = config.graph.snapshot_params();
        assert_eq!(params.mode, WindowMode::Cumulative);
        assert_eq!(params.filters.max_nodes, 300);
        assert_eq!(params.filters.min_weight, 2);
        assert_eq!(params.filters.min_power, 1);
        assert_eq!(params.filters.last, LastMode::Recency);
    }

    #[test]
    fn rejects_negative_past_years() {
        let toml = "[graph]\npast_years = -3\n";
        assert!(toml::from_str::<Config>(toml).is_err());

        let config: Config = toml::from_str("[graph]\npast_years = 0\n").unwrap();
        assert_eq!(config.graph.snapshot_params().past_years, 0);
    }

    #[test]
    fn rejects_unknown_table_format() {
        let toml = "[output]\ntable_format = \"csv\"\n";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn rejects_unknown_window() {
        let toml = "[graph]\nwindow = \"sliding\"\n";
        assert!(toml::from_str::<Config>(toml).is_err());
    }
}
