//! Appends a local sitemap file's URLs to a remote sitemap and writes the result.
//!
//! Usage: `add-file-to-url <LOCAL_FILE> <REMOTE_URL> <DEST>`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sitemapper_core::{
    FetchOptions, Fetcher, RateLimiter, SitemapResolver, combine_file_into_url,
};
use tracing::info;

/// Append a local sitemap file to a remote sitemap and save the combined urlset.
#[derive(Parser, Debug)]
#[command(name = "add-file-to-url", author, version, about)]
struct Args {
    /// Local sitemap file whose URLs are appended
    local_file: PathBuf,

    /// Remote sitemap URL (sitemap or sitemap index)
    remote_url: String,

    /// Destination file for the combined sitemap
    dest: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let fetcher = Fetcher::new(Arc::new(RateLimiter::default()))
        .context("failed to build HTTP client")?;
    let resolver = SitemapResolver::new(Arc::new(fetcher));

    let combined = combine_file_into_url(
        &resolver,
        &args.local_file,
        &args.remote_url,
        &args.dest,
        &FetchOptions::default(),
    )
    .await?;

    info!(urls = combined.len(), dest = %args.dest.display(), "combine complete");
    Ok(())
}
