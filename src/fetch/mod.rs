//! Retrieval of raw sitemap bytes from the network or the local filesystem.
//!
//! # Features
//!
//! - Remote/local dispatch based on the location string ([`Location`])
//! - A fetch-rate limiter applied before every network request ([`RateLimiter`])
//! - Per-call transport overrides: custom client and headers ([`FetchOptions`])
//! - Structured error types with full context ([`FetchError`])
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sitemapper_core::fetch::{FetchOptions, Fetcher, RateLimiter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let limiter = Arc::new(RateLimiter::new(Duration::from_millis(500)));
//! let fetcher = Fetcher::new(limiter)?;
//! let bytes = fetcher
//!     .fetch_remote("https://example.com/sitemap.xml", &FetchOptions::default())
//!     .await?;
//! println!("fetched {} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod location;
pub mod rate_limiter;

pub use client::{Fetch, FetchOptions, Fetcher, TransportSettings};
pub use constants::{CONNECT_TIMEOUT_SECS, DEFAULT_FETCH_INTERVAL, READ_TIMEOUT_SECS};
pub use error::FetchError;
pub use location::Location;
pub use rate_limiter::RateLimiter;
