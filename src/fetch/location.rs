//! Classification of sitemap locations into network URLs and local paths.

use std::fmt;
use std::path::PathBuf;

use url::Url;

/// Where a sitemap document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An `http` or `https` URL.
    Remote(Url),
    /// A filesystem path (plain path or `file://` URL).
    Local(PathBuf),
}

impl Location {
    /// Classifies a location string.
    ///
    /// Only `http`/`https` URLs are fetched over the network; `file://` URLs
    /// and anything that does not parse as a URL are treated as paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitemapper_core::fetch::Location;
    ///
    /// assert!(Location::parse("https://example.com/sitemap.xml").is_remote());
    /// assert!(!Location::parse("./sitemap.xml").is_remote());
    /// assert!(!Location::parse("file:///tmp/sitemap.xml").is_remote());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_or_else(|()| Self::Local(PathBuf::from(raw)), Self::Local),
            _ => Self::Local(PathBuf::from(raw)),
        }
    }

    /// Whether the location requires a network fetch.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
