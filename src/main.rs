//! # Ethics Digest
//!
//! Generates static HTML digest pages of recent news for the eight weekly
//! topics of a management-ethics course.
//!
//! ## Usage
//!
//! ```sh
//! ethics_digest -o ./site/weeks
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pass over the topic table:
//! 1. **Fetching**: Query the Google News RSS search feed for each topic query
//! 2. **Collecting**: Drop entries without a title or link, deduplicate by
//!    normalized title and stop at seven items
//! 3. **Output**: Render each topic to `week<N>.html`

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod digest;
mod feeds;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use config::DIGEST;
use feeds::google_news::HttpFeedSource;
use itertools::Itertools;
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ethics_digest starting up");

    let args = Cli::parse();
    debug!(output_dir = %args.output_dir.display(), weeks = ?args.weeks, "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let source = HttpFeedSource::new()?;
    let summary = digest::run(&source, &DIGEST, &args.weeks, &args.output_dir).await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        written = summary.written.len(),
        failed = summary.failed.len(),
        "Execution complete"
    );

    if summary.failed.is_empty() {
        println!("All week pages generated.");
    } else {
        println!(
            "Generated {} week pages; failed weeks: {}.",
            summary.written.len(),
            summary.failed.iter().join(", ")
        );
    }

    Ok(())
}
