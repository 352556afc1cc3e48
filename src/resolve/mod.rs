//! Recursive resolution of sitemap trees into flat URL lists.
//!
//! A location is fetched, classified, and either returned (urlset) or
//! expanded (sitemapindex) by resolving every child in document order and
//! concatenating the results. The traversal is depth-first and sequential:
//! each child finishes, including its own children, before the next sibling
//! is fetched.
//!
//! # Failure policies
//!
//! - [`FailurePolicy::Strict`] - the first failing descendant aborts the whole call
//! - [`FailurePolicy::Force`] - failing descendants are skipped; the call fails only
//!   when the root fails or every child of an index fails
//!
//! A failure at the root location is always returned, whatever the policy.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sitemapper_core::fetch::{FetchOptions, Fetcher, RateLimiter};
//! use sitemapper_core::resolve::{FailurePolicy, SitemapResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(Arc::new(RateLimiter::default()))?;
//! let resolver = SitemapResolver::new(Arc::new(fetcher));
//!
//! let sitemap = resolver
//!     .resolve(
//!         "https://example.com/sitemapindex.xml",
//!         &FetchOptions::default(),
//!         FailurePolicy::Force,
//!     )
//!     .await?;
//! for loc in sitemap.locations() {
//!     println!("{loc}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ResolveError;

use std::path::Path;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, info, instrument, warn};

use crate::document::{Document, Sitemap, SitemapIndex, parse_document, parse_sitemap};
use crate::fetch::{Fetch, FetchOptions};

/// How descendant failures are treated during index traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort on the first failing descendant.
    #[default]
    Strict,
    /// Skip failing descendants and return what succeeded.
    Force,
}

/// Resolves sitemap locations into flattened [`Sitemap`]s.
#[derive(Clone)]
pub struct SitemapResolver {
    fetcher: Arc<dyn Fetch>,
}

impl std::fmt::Debug for SitemapResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitemapResolver").finish_non_exhaustive()
    }
}

impl SitemapResolver {
    /// Creates a resolver that reads documents through `fetcher`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    /// Returns the byte source used by this resolver.
    #[must_use]
    pub fn fetcher(&self) -> &dyn Fetch {
        self.fetcher.as_ref()
    }

    /// Resolves `location` under the strict policy.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn get(
        &self,
        location: &str,
        options: &FetchOptions,
    ) -> Result<Sitemap, ResolveError> {
        self.resolve(location, options, FailurePolicy::Strict).await
    }

    /// Resolves `location` under the force policy.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn force_get(
        &self,
        location: &str,
        options: &FetchOptions,
    ) -> Result<Sitemap, ResolveError> {
        self.resolve(location, options, FailurePolicy::Force).await
    }

    /// Reads a local file and decodes it as a `<urlset>`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Fetch`] if the file cannot be read and
    /// [`ResolveError::Parse`] if it is not a urlset.
    #[instrument(skip(self, options), fields(path = %path.display()))]
    pub async fn get_from_file(
        &self,
        path: &Path,
        options: &FetchOptions,
    ) -> Result<Sitemap, ResolveError> {
        let bytes = self
            .fetcher
            .fetch(&path.to_string_lossy(), options)
            .await?;
        Ok(parse_sitemap(&bytes)?)
    }

    /// Resolves `location` into a flat list of URL entries.
    ///
    /// Entries appear in index order with no deduplication across children.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Fetch`] / [`ResolveError::Parse`] when the root fails
    /// - [`ResolveError::ChildResolution`] when a descendant fails under [`FailurePolicy::Strict`]
    /// - [`ResolveError::AllChildrenFailed`] when every child of an index fails under
    ///   [`FailurePolicy::Force`]
    #[instrument(skip(self, options))]
    pub async fn resolve(
        &self,
        location: &str,
        options: &FetchOptions,
        policy: FailurePolicy,
    ) -> Result<Sitemap, ResolveError> {
        let mut ancestors = Vec::new();
        let sitemap = self
            .resolve_node(location, options, policy, &mut ancestors)
            .await?;
        info!(urls = sitemap.len(), "resolved sitemap");
        Ok(sitemap)
    }

    fn resolve_node<'a>(
        &'a self,
        location: &'a str,
        options: &'a FetchOptions,
        policy: FailurePolicy,
        ancestors: &'a mut Vec<String>,
    ) -> BoxFuture<'a, Result<Sitemap, ResolveError>> {
        async move {
            let bytes = self.fetcher.fetch(location, options).await?;
            let index = match parse_document(&bytes)? {
                Document::Urlset(sitemap) => {
                    debug!(location, urls = sitemap.len(), "resolved urlset");
                    return Ok(sitemap);
                }
                Document::Index(index) => index,
            };

            debug!(
                location,
                children = index.len(),
                depth = ancestors.len(),
                "expanding sitemap index"
            );
            ancestors.push(location.to_string());
            let result = self
                .resolve_children(location, &index, options, policy, ancestors)
                .await;
            ancestors.pop();
            result
        }
        .boxed()
    }

    async fn resolve_children(
        &self,
        parent: &str,
        index: &SitemapIndex,
        options: &FetchOptions,
        policy: FailurePolicy,
        ancestors: &mut Vec<String>,
    ) -> Result<Sitemap, ResolveError> {
        let mut merged = Sitemap::new();
        let mut failed = 0_usize;

        for entry in &index.sitemaps {
            let child = entry.loc.trim();
            let outcome = if ancestors.iter().any(|ancestor| ancestor == child) {
                Err(ResolveError::cycle(child))
            } else {
                self.resolve_node(child, options, policy, ancestors).await
            };

            match (outcome, policy) {
                (Ok(sitemap), _) => merged.append(sitemap),
                (Err(source), FailurePolicy::Strict) => {
                    return Err(ResolveError::child(child, parent, source));
                }
                (Err(source), FailurePolicy::Force) => {
                    failed += 1;
                    warn!(
                        child,
                        parent,
                        error = %source,
                        "skipping sitemap that failed to resolve"
                    );
                }
            }
        }

        if failed > 0 && failed == index.len() {
            return Err(ResolveError::AllChildrenFailed {
                location: parent.to_string(),
                count: failed,
            });
        }

        Ok(merged)
    }
}
