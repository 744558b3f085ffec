//! Web discovery/fetch ports.
//!
//! `SearchPort` abstracts search and page retrieval so the ranker can be
//! tested against scripted results. The default implementation queries the
//! DuckDuckGo HTML endpoint and fetches pages with a short fixed timeout.

use async_trait::async_trait;
use regex::Regex;

use crate::errors::AppError;

/// Fixed per-page fetch timeout.
const FETCH_TIMEOUT_SECS: u64 = 5;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Returns up to `num_results` result URLs for the query.
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, AppError>;

    /// Fetches a page body. Callers treat failures as skippable.
    async fn fetch_page(&self, url: &str) -> Result<String, AppError>;
}

/// DuckDuckGo HTML search + bounded page fetcher.
pub struct DuckDuckGoSearch {
    http: reqwest::Client,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .user_agent("Mozilla/5.0 (compatible; career-guidance-bot)")
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchPort for DuckDuckGoSearch {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, AppError> {
        let body = self
            .http
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("search request failed: {e}")))?
            .text()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("search response failed: {e}")))?;

        Ok(parse_result_links(&body, num_results))
    }

    async fn fetch_page(&self, url: &str) -> Result<String, AppError> {
        self.http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("fetch '{url}' failed: {e}")))?
            .text()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("read '{url}' failed: {e}")))
    }
}

/// Pulls result-link hrefs out of the DuckDuckGo HTML page, unwrapping the
/// `uddg` redirect parameter when present.
fn parse_result_links(body: &str, num_results: usize) -> Vec<String> {
    let link_re = Regex::new(r#"<a[^>]*class="result__a"[^>]*href="([^"]+)""#)
        .expect("hardcoded regex is valid");

    let mut urls = Vec::new();
    for cap in link_re.captures_iter(body) {
        let href = &cap[1];
        let url = unwrap_redirect(href);
        if url.starts_with("http") && !urls.contains(&url) {
            urls.push(url);
        }
        if urls.len() >= num_results {
            break;
        }
    }
    urls
}

/// DuckDuckGo wraps targets as `//duckduckgo.com/l/?uddg=<encoded-url>&...`.
fn unwrap_redirect(href: &str) -> String {
    if let Some(idx) = href.find("uddg=") {
        let encoded = &href[idx + 5..];
        let encoded = encoded.split('&').next().unwrap_or(encoded);
        if let Ok(decoded) = urlencoding::decode(encoded) {
            return decoded.into_owned();
        }
    }
    href.to_string()
}
