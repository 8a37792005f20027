//! Google News RSS search.
//!
//! Search results are requested from
//! `https://news.google.com/rss/search?q=<query>&hl=en-US&gl=US&ceid=US:en`,
//! with the recency window appended to the query as a `when:<days>d` operator.

use super::FeedSource;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, instrument};
use url::form_urlencoded;

/// Google News RSS search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://news.google.com/rss/search";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the search feed URL for a query limited to the last `recency_days` days.
///
/// The query is form-encoded (spaces become `+`) and passed through as-is;
/// malformed search syntax is the endpoint's problem.
pub fn search_url(query: &str, recency_days: u32) -> String {
    let q: String =
        form_urlencoded::byte_serialize(format!("{query} when:{recency_days}d").as_bytes())
            .collect();
    format!("{SEARCH_ENDPOINT}?q={q}&hl=en-US&gl=US&ceid=US:en")
}

/// A [`FeedSource`] that performs HTTP GET requests.
///
/// No timeout is configured; reqwest's default applies.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Downloaded feed");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_simple_query() {
        assert_eq!(
            search_url("ethics", 7),
            "https://news.google.com/rss/search?q=ethics+when%3A7d&hl=en-US&gl=US&ceid=US:en"
        );
    }

    #[test]
    fn test_search_url_encodes_quotes_and_parentheses() {
        let url = search_url(r#""code of conduct" AND (hotline)"#, 7);
        assert!(url.starts_with(
            "https://news.google.com/rss/search?q=%22code+of+conduct%22+AND+%28hotline%29+when%3A7d"
        ));
        assert!(url.ends_with("&hl=en-US&gl=US&ceid=US:en"));
    }

    #[test]
    fn test_search_url_uses_recency_window() {
        assert!(search_url("csr", 30).contains("csr+when%3A30d"));
    }

    #[test]
    fn test_search_url_passes_malformed_query_through() {
        let url = search_url("((( OR", 7);
        assert!(url.contains("q=%28%28%28+OR+when%3A7d"));
    }

    #[test]
    fn test_http_source_builds() {
        assert!(HttpFeedSource::new().is_ok());
    }
}
