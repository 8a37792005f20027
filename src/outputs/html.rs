//! HTML fragment rendering for week pages.
//!
//! Each page is a fragment, not a full document, meant to be pasted or
//! included into a course site:
//!
//! ```text
//! <h2>Week 1: Unethical Behaviors in Organizations</h2>
//! <p><em>Updated automatically – October 17, 2026</em></p>
//! <ul>
//! <li><a href="..." target="_blank" rel="noopener">...</a></li>
//! </ul>
//! <p><strong>Discussion prompt:</strong> ...</p>
//! ```
//!
//! Titles and links are HTML-escaped.

use crate::models::WeekPage;
use chrono::NaiveDate;
use quick_xml::escape::escape;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// The closing paragraph shared by every week page.
pub const DISCUSSION_PROMPT: &str = "<p><strong>Discussion prompt:</strong> \
Select one article and analyze it using an ethical framework \
(utilitarianism, deontology, virtue ethics, or justice).</p>";

/// Format a date like `October 07, 2026`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Render a [`WeekPage`] to its HTML fragment.
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn render_week_page(page: &WeekPage) -> String {
    let mut html = Vec::with_capacity(page.items.len() + 5);
    html.push(format!("<h2>Week {}: {}</h2>", page.week, escape(page.title.as_str())));
    html.push(format!(
        "<p><em>Updated automatically – {}</em></p>",
        display_date(page.generated_on)
    ));
    html.push("<ul>".to_string());
    for item in &page.items {
        html.push(format!(
            r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
            escape(item.link.as_str()),
            escape(item.title.as_str())
        ));
    }
    html.push("</ul>".to_string());
    html.push(DISCUSSION_PROMPT.to_string());
    html.join("\n")
}

/// Path of the page for `week` inside `output_dir`.
pub fn page_path(output_dir: &Path, week: u8) -> PathBuf {
    output_dir.join(format!("week{week}.html"))
}

/// Render and write a page, replacing any previous file.
///
/// # Returns
///
/// The path that was written.
#[instrument(level = "info", skip_all, fields(week = page.week, items = page.items.len()))]
pub async fn write_week_page(page: &WeekPage, output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = page_path(output_dir, page.week);
    fs::write(&path, render_week_page(page)).await?;
    info!(path = %path.display(), "Wrote week page");
    Ok(path)
}
