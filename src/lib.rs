//! Sitemapper Core Library
//!
//! Resolves sitemap documents (a `<urlset>` or a `<sitemapindex>` of nested
//! sitemaps) from the network or the local filesystem into one flattened
//! list of URL entries.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`document`] - Classification, decoding and serialization of sitemap XML
//! - [`fetch`] - Remote/local byte retrieval with a fetch-rate limiter
//! - [`resolve`] - Recursive index traversal under strict or force policy
//! - [`merge`] - Combining a local sitemap file into a remote sitemap

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod fetch;
pub mod merge;
pub mod resolve;
mod user_agent;

// Re-export commonly used types
pub use document::{
    ChangeFrequency, Document, DocumentKind, ParseError, Sitemap, SitemapIndex,
    SitemapIndexEntry, UrlEntry, parse_document, parse_sitemap, parse_sitemap_index,
    to_urlset_xml,
};
pub use fetch::{
    DEFAULT_FETCH_INTERVAL, Fetch, FetchError, FetchOptions, Fetcher, Location, RateLimiter,
    TransportSettings,
};
pub use merge::{CombineError, combine_file_into_url};
pub use resolve::{FailurePolicy, ResolveError, SitemapResolver};
