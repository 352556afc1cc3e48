//! HTTP/file fetcher for sitemap documents.
//!
//! This module provides the [`Fetcher`] struct, which reads local files
//! directly and sends network requests through a throttled reqwest client.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Proxy};
use tracing::{debug, instrument, warn};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::FetchError;
use super::location::Location;
use super::rate_limiter::RateLimiter;
use crate::user_agent;

/// Per-call transport configuration, forwarded unchanged through a resolution.
///
/// The default value means "use the fetcher's own client, no extra headers".
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Client used instead of the fetcher's default client.
    pub client: Option<Client>,
    /// Extra headers sent with every network request.
    pub headers: HeaderMap,
}

impl FetchOptions {
    /// Uses `client` for network requests instead of the fetcher's default.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Adds a request header.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidHeader`] if the name or value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, FetchError> {
        let header_name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|error| FetchError::invalid_header(name, error.to_string()))?;
        let header_value = HeaderValue::from_str(value.trim())
            .map_err(|error| FetchError::invalid_header(name, error.to_string()))?;
        self.headers.append(header_name, header_value);
        Ok(self)
    }
}

/// Source of raw sitemap bytes.
///
/// The resolver depends on this trait rather than on [`Fetcher`] directly so
/// traversal can run against any byte source.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Returns the bytes stored at `location` (URL or path).
    async fn fetch(&self, location: &str, options: &FetchOptions) -> Result<Vec<u8>, FetchError>;
}

/// Timeouts and identity for the default HTTP client.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_timeout_secs: u64,
    /// User-Agent override; the project default is used when `None`.
    pub user_agent: Option<String>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Fetcher for remote and local sitemap documents.
///
/// Created once and reused for a whole resolution so the connection pool and
/// the rate limiter are shared by every fetch.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    rate_limiter: Arc<RateLimiter>,
}

impl Fetcher {
    /// Creates a fetcher with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(rate_limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Self::with_settings(rate_limiter, &TransportSettings::default())
    }

    /// Creates a fetcher with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    #[instrument(level = "debug", skip(rate_limiter))]
    pub fn with_settings(
        rate_limiter: Arc<RateLimiter>,
        settings: &TransportSettings,
    ) -> Result<Self, FetchError> {
        let client = build_client(settings)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Creates a fetcher around an existing client.
    #[must_use]
    pub fn with_client(client: Client, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    /// Returns the shared rate limiter.
    #[must_use]
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Fetches `url` over HTTP after waiting for the rate limiter.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if:
    /// - The request fails (network error, timeout)
    /// - The server returns a non-success status
    #[instrument(skip(self, options), fields(url = %url))]
    pub async fn fetch_remote(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<Vec<u8>, FetchError> {
        self.rate_limiter.acquire(url).await;

        let client = options.client.as_ref().unwrap_or(&self.client);
        let response = client
            .get(url)
            .headers(options.headers.clone())
            .send()
            .await
            .map_err(|error| FetchError::network(url, error))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "non-success response");
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| FetchError::network(url, error))?;
        debug!(bytes = body.len(), "fetched remote document");
        Ok(body.to_vec())
    }

    /// Reads a local file. Never rate limited.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] carrying the native IO error.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn fetch_local(&self, path: &Path) -> Result<Vec<u8>, FetchError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|error| FetchError::io("open", path, error))?;
        debug!(bytes = bytes.len(), "read local document");
        Ok(bytes)
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn fetch(&self, location: &str, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
        match Location::parse(location) {
            Location::Remote(_) => self.fetch_remote(location.trim(), options).await,
            Location::Local(path) => self.fetch_local(&path).await,
        }
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn build_client(settings: &TransportSettings) -> Result<Client, FetchError> {
    match try_build_client(settings, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; env-proxy fallback keeps construction panic-free.
            warn!(
                "HTTP client builder panicked while loading system proxy settings; retrying with env-proxy fallback"
            );
            match try_build_client(settings, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Build(error)) => {
                    Err(FetchError::client_build(error.to_string()))
                }
                Err(BuildClientFailure::Panic) => Err(FetchError::client_build(
                    "client builder panicked while applying env-proxy fallback",
                )),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(FetchError::client_build(error.to_string())),
    }
}

fn try_build_client(
    settings: &TransportSettings,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    let settings = settings.clone();
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_client_builder(&settings);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_client_builder(settings: &TransportSettings) -> ClientBuilder {
    let user_agent = settings
        .user_agent
        .clone()
        .unwrap_or_else(user_agent::default_fetch_user_agent);

    Client::builder()
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .timeout(Duration::from_secs(settings.read_timeout_secs))
        .user_agent(user_agent)
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    let names: &[&str] = match scheme {
        "https" => &["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"],
        "http" => &["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"],
        _ => return None,
    };
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
