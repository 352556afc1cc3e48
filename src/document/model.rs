//! Structured sitemap entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One `<url>` record of a urlset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    /// Absolute page URL.
    pub loc: String,
    /// Last modification timestamp, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    /// Change frequency hint, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<String>,
    /// Priority hint, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl UrlEntry {
    /// Creates an entry with only a location.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    /// Interprets `changefreq` as one of the protocol values, if it is one.
    #[must_use]
    pub fn change_frequency(&self) -> Option<ChangeFrequency> {
        self.changefreq.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Protocol values for `<changefreq>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    /// Changes on every access.
    Always,
    /// Changes about once an hour.
    Hourly,
    /// Changes about once a day.
    Daily,
    /// Changes about once a week.
    Weekly,
    /// Changes about once a month.
    Monthly,
    /// Changes about once a year.
    Yearly,
    /// Archived; not expected to change.
    Never,
}

impl ChangeFrequency {
    /// Returns the protocol string for this value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown change frequency: {other}")),
        }
    }
}

/// Ordered list of URL entries, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sitemap {
    #[serde(rename = "url", default)]
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Creates an empty sitemap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URL entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the sitemap holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, UrlEntry> {
        self.urls.iter()
    }

    /// Moves every entry of `other` to the end of this sitemap.
    pub fn append(&mut self, other: Sitemap) {
        self.urls.extend(other.urls);
    }

    /// Page locations in order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(|entry| entry.loc.as_str())
    }
}

impl From<Vec<UrlEntry>> for Sitemap {
    fn from(urls: Vec<UrlEntry>) -> Self {
        Self { urls }
    }
}

impl IntoIterator for Sitemap {
    type Item = UrlEntry;
    type IntoIter = std::vec::IntoIter<UrlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sitemap {
    type Item = &'a UrlEntry;
    type IntoIter = std::slice::Iter<'a, UrlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

/// One `<sitemap>` reference inside a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapIndexEntry {
    /// Location of the child sitemap.
    pub loc: String,
    /// Last modification timestamp, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
}

/// Ordered list of child sitemap references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapIndex {
    #[serde(rename = "sitemap", default)]
    pub sitemaps: Vec<SitemapIndexEntry>,
}

impl SitemapIndex {
    /// Number of child references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sitemaps.len()
    }

    /// Whether the index references no sitemaps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sitemaps.is_empty()
    }
}
