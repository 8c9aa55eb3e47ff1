//! Blocking HTTP access for record retrieval.
//!
//! Uses async reqwest internally with tokio::time::timeout for stall detection,
//! but presents a sync interface so the pipeline stays a plain batch transform.

use std::sync::{LazyLock, OnceLock};
use std::time::Duration;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables shared by every request, set once from config/CLI at startup.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Upper bound for a whole request (send + body)
    pub read_timeout: Duration,
    /// Retry attempts for transient failures
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }
}

static HTTP_CONFIG: OnceLock<HttpConfig> = OnceLock::new();

/// Install the global HTTP config. Later calls are ignored.
pub fn set_http_config(config: HttpConfig) {
    if HTTP_CONFIG.set(config).is_err() {
        log::debug!("HTTP config already set, keeping the first one");
    }
}

/// Current HTTP config (defaults if never set).
pub fn http_config() -> HttpConfig {
    HTTP_CONFIG.get().copied().unwrap_or_default()
}

/// Error types for HTTP operations
#[derive(Debug)]
pub enum HttpError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// I/O error (includes timeouts)
    Io(std::io::Error),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    /// Server errors, rate limiting and transport failures are retried;
    /// other client errors (bad query, bad key) are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http {
                status: Some(s), ..
            } => !(400..500).contains(s) || matches!(s, 408 | 429),
            Self::Http { status: None, .. } => true,
            Self::Io(e) => e.kind() != std::io::ErrorKind::StorageFull,
        }
    }
}

impl From<std::io::Error> for HttpError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("pubmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET with query parameters, returning the body as text.
///
/// The whole request is bounded by `http_config().read_timeout`; a stall
/// surfaces as a retryable `Io(TimedOut)`.
pub fn get_text(url: &str, query: &[(&str, &str)]) -> Result<String, HttpError> {
    let timeout = http_config().read_timeout;

    SHARED_RUNTIME.handle().block_on(async {
        let request = async {
            let response = SHARED_CLIENT
                .get(url)
                .query(query)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| HttpError::from_reqwest(&e))?;
            response
                .text()
                .await
                .map_err(|e| HttpError::from_reqwest(&e))
        };

        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(HttpError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("request timed out after {}s", timeout.as_secs()),
            ))),
        }
    })
}
