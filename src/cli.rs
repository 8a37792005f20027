//! Command-line interface definitions for the ethics digest.
//!
//! Every argument is optional. Running with none writes all eight week pages
//! into the current directory.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the ethics digest.
///
/// # Examples
///
/// ```sh
/// # Write week1.html..week8.html into the current directory
/// ethics_digest
///
/// # Write into a site directory
/// ethics_digest -o ./site/weeks
///
/// # Regenerate only weeks 2 and 5
/// ethics_digest -w 2 -w 5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the week pages are written to
    #[arg(short, long, env = "DIGEST_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Only generate the given week (1-8); may be repeated
    #[arg(short, long = "week", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub weeks: Vec<u8>,
}
