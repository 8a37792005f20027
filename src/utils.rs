//! Utility functions for title normalization, log truncation and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Title normalization for duplicate detection
//! - String truncation for logging
//! - File system validation for the output directory

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static NON_KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9 ]+").expect("static pattern is valid"));

/// Reduce a headline to the key used for duplicate detection.
///
/// The title is lowercased, every character outside `[a-z0-9 ]` is removed,
/// runs of spaces collapse to one and the edges are trimmed. Two headlines
/// that differ only in case or punctuation map to the same key.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_title("Fraud, Bribery!"), "fraud bribery");
/// assert_eq!(normalize_title("  CEO   Resigns  "), "ceo resigns");
/// ```
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_KEY_CHARS
        .replace_all(&lowered, "")
        .split_whitespace()
        .join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes on a character boundary with
/// an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .unwrap_or(0);
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
