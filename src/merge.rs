//! Combining a local sitemap file into a remote sitemap and persisting it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument};

use crate::document::{ParseError, Sitemap, parse_sitemap, to_urlset_xml};
use crate::fetch::{FetchError, FetchOptions};
use crate::resolve::{ResolveError, SitemapResolver};

/// Errors that can occur while combining and writing sitemaps.
#[derive(Debug, Error)]
pub enum CombineError {
    /// The local file could not be read.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The local file is not a urlset, or the result could not be serialized.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The remote sitemap could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The destination file could not be written.
    #[error("write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Appends the URL entries of a local sitemap file to a remotely resolved
/// sitemap and writes the result to `dest_path` as a `<urlset>`.
///
/// Remote entries come first, then local entries. `remote_url` is resolved
/// with the strict policy, so any failing child aborts the operation. An
/// existing destination file is overwritten.
///
/// Returns the combined sitemap that was written.
///
/// # Errors
///
/// Returns [`CombineError`] if the local file cannot be read or parsed, the
/// remote sitemap cannot be resolved, or the destination cannot be written.
#[instrument(skip(resolver, options), fields(local = %local_path.display(), dest = %dest_path.display()))]
pub async fn combine_file_into_url(
    resolver: &SitemapResolver,
    local_path: &Path,
    remote_url: &str,
    dest_path: &Path,
    options: &FetchOptions,
) -> Result<Sitemap, CombineError> {
    let local_bytes = resolver
        .fetcher()
        .fetch(&local_path.to_string_lossy(), options)
        .await?;
    let local = parse_sitemap(&local_bytes)?;

    let mut combined = resolver.get(remote_url, options).await?;
    let remote_count = combined.len();
    combined.append(local);

    let xml = to_urlset_xml(&combined)?;
    tokio::fs::write(dest_path, xml)
        .await
        .map_err(|source| CombineError::Write {
            path: dest_path.to_path_buf(),
            source,
        })?;

    info!(
        remote = remote_count,
        local = combined.len() - remote_count,
        total = combined.len(),
        "wrote combined sitemap"
    );
    Ok(combined)
}
