//! News feed retrieval for topic queries.
//!
//! This module turns a search query into a list of usable [`FeedItem`]s in
//! three steps:
//!
//! 1. **URL building**: [`google_news::search_url`] adds the recency window and encodes the query
//! 2. **Retrieval**: a [`FeedSource`] downloads the feed body
//! 3. **Parsing**: [`parser::parse_feed`] extracts entries; entries lacking a
//!    title or a link are dropped
//!
//! # Failure Handling
//!
//! A failed request or an unparseable feed is logged and treated as an empty
//! result for that query. It never aborts the run.

pub mod google_news;
pub mod parser;

use crate::models::{FeedEntry, FeedItem};
use crate::utils::truncate_for_log;
use google_news::search_url;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Something that can turn a feed URL into a feed body.
///
/// [`google_news::HttpFeedSource`] is the production implementation.
pub trait FeedSource {
    /// Fetch the raw feed document at `url`.
    async fn get(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Fetch the search feed for one query and keep entries with both a title and a link.
///
/// Failures are logged and produce an empty list.
#[instrument(level = "info", skip_all, fields(%query))]
pub async fn fetch_items<S: FeedSource>(
    source: &S,
    query: &str,
    recency_days: u32,
) -> Vec<FeedItem> {
    let url = search_url(query, recency_days);

    let entries = match fetch_entries(source, &url).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(%url, error = %e, "Feed fetch failed; treating as empty");
            return Vec::new();
        }
    };

    let total = entries.len();
    let items: Vec<FeedItem> = entries
        .into_iter()
        .filter_map(FeedEntry::into_item)
        .collect();
    if items.len() < total {
        debug!(
            dropped = total - items.len(),
            "Skipped entries missing title or link"
        );
    }

    info!(count = items.len(), "Fetched feed items");
    items
}

async fn fetch_entries<S: FeedSource>(
    source: &S,
    url: &str,
) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let body = source.get(url).await?;
    parser::parse_feed(&body).inspect_err(|e| {
        debug!(
            error = %e,
            body_preview = %truncate_for_log(&body, 300),
            "Feed body did not parse"
        );
    })
}
