//! Per-topic page building and the run loop.
//!
//! For each topic the queries are fetched in declared order and their items
//! fed into a [`Collector`]. The collector drops items whose normalized title
//! it has already accepted and signals [`ControlFlow::Break`] once the item cap
//! is reached, at which point the remaining queries for that topic are never
//! fetched.

use crate::config::DigestConfig;
use crate::feeds::{FeedSource, fetch_items};
use crate::models::{FeedItem, Topic, WeekPage};
use crate::outputs::html::write_week_page;
use crate::utils::normalize_title;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

/// Accepts items up to a cap, rejecting duplicate normalized titles.
#[derive(Debug)]
pub struct Collector {
    cap: usize,
    seen: HashSet<String>,
    items: Vec<FeedItem>,
}

impl Collector {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            seen: HashSet::new(),
            items: Vec::with_capacity(cap),
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    /// Offer one item. Returns `Break` once the cap has been reached.
    pub fn offer(&mut self, item: FeedItem) -> ControlFlow<()> {
        if self.is_full() {
            return ControlFlow::Break(());
        }
        if self.seen.insert(normalize_title(&item.title)) {
            self.items.push(item);
        }
        if self.is_full() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Offer items in order, stopping at the first `Break`.
    pub fn extend<I>(&mut self, items: I) -> ControlFlow<()>
    where
        I: IntoIterator<Item = FeedItem>,
    {
        items.into_iter().try_for_each(|item| self.offer(item))
    }

    pub fn into_items(self) -> Vec<FeedItem> {
        self.items
    }
}

/// Collect the deduplicated, capped item list for one topic.
#[instrument(level = "info", skip_all, fields(week = topic.week, title = topic.title))]
pub async fn build_week<S: FeedSource>(
    source: &S,
    config: &DigestConfig,
    topic: &Topic,
    generated_on: NaiveDate,
) -> WeekPage {
    let mut collector = Collector::new(config.max_items);

    for (i, query) in topic.queries.iter().enumerate() {
        let items = fetch_items(source, query, config.recency_days).await;
        if collector.extend(items).is_break() {
            debug!(
                skipped_queries = topic.queries.len() - i - 1,
                "Item cap reached"
            );
            break;
        }
    }

    let items = collector.into_items();
    info!(count = items.len(), "Collected week items");
    WeekPage {
        week: topic.week,
        title: topic.title.to_string(),
        generated_on,
        items,
    }
}

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Pages written, in topic order.
    pub written: Vec<PathBuf>,
    /// Weeks whose page could not be written.
    pub failed: Vec<u8>,
}

/// Build and write every selected week page.
///
/// An empty `weeks` slice selects every topic. A write failure is logged and
/// recorded in the summary; the remaining topics are still processed.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn run<S: FeedSource>(
    source: &S,
    config: &DigestConfig,
    weeks: &[u8],
    output_dir: &Path,
) -> RunSummary {
    let generated_on = Local::now().date_naive();
    let mut summary = RunSummary::default();

    for topic in config
        .topics
        .iter()
        .filter(|t| weeks.is_empty() || weeks.contains(&t.week))
    {
        let page = build_week(source, config, topic, generated_on).await;
        match write_week_page(&page, output_dir).await {
            Ok(path) => summary.written.push(path),
            Err(e) => {
                error!(week = topic.week, error = %e, "Failed to write week page");
                summary.failed.push(topic.week);
            }
        }
    }

    info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "Digest run finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DIGEST;
    use crate::feeds::google_news::search_url;
    use crate::feeds::testing::{StubFeedSource, rss, rss_titles};
    use crate::outputs::html::{DISCUSSION_PROMPT, page_path};
    use scraper::{Html, Selector};

    static TWO_QUERY_TOPIC: Topic = Topic {
        week: 1,
        title: "Test Topic",
        queries: &["q1", "q2"],
    };

    fn config(topics: &'static [Topic]) -> DigestConfig {
        DigestConfig {
            recency_days: 7,
            max_items: 7,
            topics,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn item(title: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.len()),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ethics_digest_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn count_list_items(html: &str) -> usize {
        let doc = Html::parse_fragment(html);
        let li = Selector::parse("li").unwrap();
        doc.select(&li).count()
    }

    #[test]
    fn test_collector_rejects_normalized_duplicates() {
        let mut collector = Collector::new(7);
        let flow = collector.extend(vec![
            item("Fraud, Bribery!"),
            item("fraud bribery"),
            item("FRAUD   BRIBERY"),
            item("Another story"),
        ]);
        assert!(flow.is_continue());
        let items = collector.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Fraud, Bribery!");
        assert_eq!(items[1].title, "Another story");
    }

    #[test]
    fn test_collector_breaks_at_cap() {
        let mut collector = Collector::new(2);
        assert!(collector.offer(item("one")).is_continue());
        assert!(collector.offer(item("two")).is_break());
        assert!(collector.offer(item("three")).is_break());
        assert_eq!(collector.into_items().len(), 2);
    }

    #[test]
    fn test_collector_extend_stops_consuming_at_cap() {
        let mut collector = Collector::new(3);
        let mut consumed = 0;
        let flow = collector.extend(
            ["a", "b", "c", "d", "e"]
                .into_iter()
                .inspect(|_| consumed += 1)
                .map(item),
        );
        assert!(flow.is_break());
        assert_eq!(consumed, 3);
    }

    #[tokio::test]
    async fn test_second_query_not_fetched_when_first_fills_cap() {
        let q1 = search_url("q1", 7);
        let source = StubFeedSource::new()
            .with_feed(
                q1.clone(),
                rss_titles(&["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8"]),
            )
            .with_fallback(rss_titles(&["other"]));
        let cfg = config(std::slice::from_ref(&TWO_QUERY_TOPIC));

        let page = build_week(&source, &cfg, &TWO_QUERY_TOPIC, today()).await;

        assert_eq!(page.items.len(), 7);
        assert_eq!(source.requests(), vec![q1]);
    }

    #[tokio::test]
    async fn test_queries_accumulate_in_discovery_order() {
        let source = StubFeedSource::new()
            .with_feed(search_url("q1", 7), rss_titles(&["Alpha", "Beta"]))
            .with_feed(
                search_url("q2", 7),
                rss_titles(&["beta!", "Gamma", "ALPHA", "Delta"]),
            );
        let cfg = config(std::slice::from_ref(&TWO_QUERY_TOPIC));

        let page = build_week(&source, &cfg, &TWO_QUERY_TOPIC, today()).await;

        let titles: Vec<&str> = page.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma", "Delta"]);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_count_is_min_of_cap_and_distinct_entries() {
        let source = StubFeedSource::new()
            .with_feed(
                search_url("q1", 7),
                rss_titles(&["a1", "a2", "a3", "A1", "a4"]),
            )
            .with_feed(
                search_url("q2", 7),
                rss_titles(&["a2.", "a5", "a6", "a7", "a8", "a9"]),
            );
        let cfg = config(std::slice::from_ref(&TWO_QUERY_TOPIC));

        let page = build_week(&source, &cfg, &TWO_QUERY_TOPIC, today()).await;

        let titles: Vec<&str> = page.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
        let keys: HashSet<String> = page.items.iter().map(|i| normalize_title(&i.title)).collect();
        assert_eq!(keys.len(), page.items.len());
    }

    #[tokio::test]
    async fn test_entry_missing_link_excluded_and_does_not_claim_key() {
        let source = StubFeedSource::new()
            .with_feed(
                search_url("q1", 7),
                rss(&[(Some("Shared headline"), None)]),
            )
            .with_feed(
                search_url("q2", 7),
                rss(&[(Some("Shared Headline!"), Some("https://example.com/ok"))]),
            );
        let cfg = config(std::slice::from_ref(&TWO_QUERY_TOPIC));

        let page = build_week(&source, &cfg, &TWO_QUERY_TOPIC, today()).await;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].link, "https://example.com/ok");
    }

    #[tokio::test]
    async fn test_failed_query_does_not_stop_topic() {
        let source = StubFeedSource::new()
            .with_feed(search_url("q2", 7), rss_titles(&["Survivor"]));
        let cfg = config(std::slice::from_ref(&TWO_QUERY_TOPIC));

        let page = build_week(&source, &cfg, &TWO_QUERY_TOPIC, today()).await;

        assert_eq!(page.items.len(), 1);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_run_writes_every_week() {
        let week1 = search_url(DIGEST.topics[0].queries[0], DIGEST.recency_days);
        let source = StubFeedSource::new()
            .with_feed(
                week1,
                rss_titles(&["Ethics story one", "Ethics story two", "Ethics story three"]),
            )
            .with_fallback(rss(&[]));
        let dir = scratch_dir("run_all");

        let summary = run(&source, &DIGEST, &[], &dir).await;

        assert!(summary.failed.is_empty());
        assert_eq!(summary.written.len(), 8);
        for week in 1..=8u8 {
            let html = std::fs::read_to_string(page_path(&dir, week)).unwrap();
            let expected = if week == 1 { 3 } else { 0 };
            assert_eq!(count_list_items(&html), expected, "week {week}");
            assert!(html.contains(DISCUSSION_PROMPT), "week {week}");
            assert!(html.starts_with(&format!("<h2>Week {week}: ")));
        }
        assert_eq!(source.requests().len(), 8);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_only_selected_weeks() {
        let source = StubFeedSource::new().with_fallback(rss(&[]));
        let dir = scratch_dir("run_selected");

        let summary = run(&source, &DIGEST, &[2, 5], &dir).await;

        assert_eq!(
            summary.written,
            vec![page_path(&dir, 2), page_path(&dir, 5)]
        );
        assert!(!page_path(&dir, 1).exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_continues_after_write_failure() {
        let source = StubFeedSource::new().with_fallback(rss(&[]));
        let dir = scratch_dir("run_write_failure");
        // A directory where week1.html should go makes that write fail.
        std::fs::create_dir_all(page_path(&dir, 1)).unwrap();

        let summary = run(&source, &DIGEST, &[], &dir).await;

        assert_eq!(summary.failed, vec![1]);
        assert_eq!(summary.written.len(), 7);
        assert!(page_path(&dir, 8).is_file());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
