//! PubMed retrieval configuration

/// Runtime configuration for E-utilities requests
#[derive(Debug, Clone)]
pub struct Config {
    /// E-utilities base URL (`esearch.fcgi` / `efetch.fcgi` are appended)
    pub base_url: String,
    /// `tool` parameter NCBI asks clients to send
    pub tool: String,
    pub email: Option<String>,
    /// Raises the NCBI rate limit from 3 to 10 requests per second
    pub api_key: Option<String>,
    /// Upper bound on PMIDs returned by a search
    pub max_results: usize,
    /// PMIDs per efetch request
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/".to_string(),
            tool: "pubmap".to_string(),
            email: None,
            api_key: None,
            max_results: 2000,
            batch_size: 200,
        }
    }
}

impl Config {
    /// Full URL of an E-utility endpoint, e.g. `endpoint("esearch")`.
    pub fn endpoint(&self, utility: &str) -> String {
        format!("{}/{utility}.fcgi", self.base_url.trim_end_matches('/'))
    }

    /// Parameters sent with every request.
    pub fn identity_params(&self) -> Vec<(&str, &str)> {
        let mut params = vec![("db", "pubmed"), ("tool", self.tool.as_str())];
        if let Some(email) = self.email.as_deref() {
            params.push(("email", email));
        }
        if let Some(key) = self.api_key.as_deref() {
            params.push(("api_key", key));
        }
        params
    }
}
