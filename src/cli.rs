//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Resolve sitemap and sitemap index documents into flat URL lists.
///
/// Sitemapper fetches a sitemap (remote URL or local file), follows every
/// nested sitemap index, and prints or writes the flattened URL list.
#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Delay before each network fetch in milliseconds (0 to disable, max 60000) [default: 1000]
    #[arg(short = 'i', long, global = true, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub interval_ms: Option<u64>,

    /// HTTP connect timeout in seconds (1-3600) [default: 30]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP request timeout in seconds (1-3600) [default: 120]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    /// Extra request header as NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

/// Sitemapper subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a sitemap or sitemap index into a flat URL list
    Resolve(ResolveArgs),

    /// Append a local sitemap file's URLs to a remote sitemap and save the result
    Combine(CombineArgs),
}

/// Arguments for `sitemapper resolve`.
#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Sitemap URL (http/https) or local file path
    pub location: String,

    /// Skip child sitemaps that fail instead of aborting
    #[arg(short, long)]
    pub force: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `sitemapper combine`.
#[derive(clap::Args, Debug)]
pub struct CombineArgs {
    /// Local sitemap file whose URLs are appended
    pub local_file: PathBuf,

    /// Remote sitemap URL (sitemap or sitemap index)
    pub remote_url: String,

    /// Destination file for the combined sitemap
    pub dest: PathBuf,
}

/// How resolved URLs are rendered.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One location per line
    Text,
    /// JSON array of URL entries
    Json,
    /// `<urlset>` XML document
    Xml,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let Some((name, value)) = raw.split_once(':') else {
        return Err(format!("expected NAME:VALUE, got '{raw}'"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
