//! NCBI E-utilities client: `esearch` for PMIDs, `efetch` for article XML

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use pubmap_core::{get_text, retry_with_backoff};
use serde::Deserialize;

use crate::config::Config;
use crate::parser::{PubmedArticle, parse_pubmed_xml};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
}

/// Search PubMed, returning at most `max_results` PMIDs in relevance order.
pub fn search(config: &Config, query: &str) -> Result<Vec<String>> {
    let url = config.endpoint("esearch");
    let retmax = config.max_results.to_string();
    let mut params = config.identity_params();
    params.extend([("term", query), ("retmax", retmax.as_str()), ("retmode", "json")]);

    let body = retry_with_backoff("esearch", || get_text(&url, &params))
        .with_context(|| format!("esearch failed for query {query:?}"))?;
    let pmids = parse_search_response(&body)?;
    log::info!("esearch: {} PMIDs for {query:?}", pmids.len());
    Ok(pmids)
}

fn parse_search_response(body: &str) -> Result<Vec<String>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Malformed esearch response")?;
    if let Some(count) = &response.esearchresult.count {
        log::debug!("esearch: {count} total hits");
    }
    Ok(response.esearchresult.idlist)
}

/// Fetch and parse articles for `pmids` in batches of `config.batch_size`.
///
/// Any failed batch aborts the whole fetch.
pub fn fetch_articles(
    config: &Config,
    pmids: &[String],
    pb: &ProgressBar,
) -> Result<Vec<PubmedArticle>> {
    let url = config.endpoint("efetch");
    let mut articles = Vec::with_capacity(pmids.len());
    pb.set_length(pmids.len() as u64);

    for (i, batch) in pmids.chunks(config.batch_size.max(1)).enumerate() {
        let ids = batch.join(",");
        let mut params = config.identity_params();
        params.extend([("id", ids.as_str()), ("retmode", "xml")]);

        let label = format!("efetch batch {}", i + 1);
        let xml = retry_with_backoff(&label, || get_text(&url, &params))
            .with_context(|| format!("{label} failed"))?;
        let parsed = parse_pubmed_xml(&xml).with_context(|| format!("{label}: bad XML"))?;
        if parsed.len() != batch.len() {
            log::debug!("{label}: requested {}, parsed {}", batch.len(), parsed.len());
        }

        articles.extend(parsed);
        pb.inc(batch.len() as u64);
    }

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_ids_in_order() {
        let body = r#"{
            "header": {"type": "esearch", "version": "0.3"},
            "esearchresult": {
                "count": "3",
                "retmax": "3",
                "retstart": "0",
                "idlist": ["39000003", "39000001", "39000002"]
            }
        }"#;
        assert_eq!(
            parse_search_response(body).unwrap(),
            ["39000003", "39000001", "39000002"]
        );
    }

    #[test]
    fn parse_search_no_hits() {
        let body = r#"{"esearchresult": {"count": "0", "idlist": []}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn parse_search_rejects_garbage() {
        assert!(parse_search_response("<html>rate limited</html>").is_err());
        assert!(parse_search_response(r#"{"error": "API key invalid"}"#).is_err());
    }
}
