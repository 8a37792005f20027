//! Data models for topics, feed entries and rendered week pages.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Topic`]: One weekly discussion theme with its search queries
//! - [`FeedEntry`]: A parsed feed entry whose fields may be missing
//! - [`FeedItem`]: An article reference with both a title and a link
//! - [`WeekPage`]: The collected items for one topic, ready to render

use chrono::NaiveDate;

/// A weekly discussion topic.
///
/// Topics are compiled into the binary (see [`crate::config`]) and never
/// change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    /// Week number, `1..=8`.
    pub week: u8,
    /// Human-readable topic title used in the page heading.
    pub title: &'static str,
    /// Search queries, fetched in declared order.
    pub queries: &'static [&'static str],
}

/// A single `<item>` or `<entry>` as it appeared in the feed.
///
/// Either field may be absent; [`FeedEntry::into_item`] decides whether the
/// entry is usable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl FeedEntry {
    /// Convert into a [`FeedItem`] if both title and link are non-empty.
    pub fn into_item(self) -> Option<FeedItem> {
        let title = self.title?.trim().to_string();
        let link = self.link?.trim().to_string();
        if title.is_empty() || link.is_empty() {
            return None;
        }
        Some(FeedItem { title, link })
    }
}

/// An article reference that made it through field filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// The article headline as published in the feed.
    pub title: String,
    /// The article URL.
    pub link: String,
}

/// The collected digest for one topic.
///
/// Built once per run by [`crate::digest::build_week`] and rendered by
/// [`crate::outputs::html::render_week_page`].
#[derive(Debug, Clone)]
pub struct WeekPage {
    pub week: u8,
    pub title: String,
    /// Local date the page was generated on; shown in the timestamp line.
    pub generated_on: NaiveDate,
    /// Accepted items in discovery order.
    pub items: Vec<FeedItem>,
}
