//! Error types for sitemap document parsing.

use std::fmt;

use thiserror::Error;

/// The two document shapes a sitemap location can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `<urlset>` document.
    Urlset,
    /// `<sitemapindex>` document.
    SitemapIndex,
}

impl DocumentKind {
    /// Conventional file name used in user-facing messages.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Urlset => "sitemap.xml",
            Self::SitemapIndex => "sitemapindex.xml",
        }
    }

    /// Root element name for this document shape.
    #[must_use]
    pub fn root_element(self) -> &'static str {
        match self {
            Self::Urlset => "urlset",
            Self::SitemapIndex => "sitemapindex",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Errors that can occur while classifying, decoding or encoding documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input had zero length.
    #[error("{kind} is empty.")]
    EmptyDocument {
        /// Which document shape the caller expected.
        kind: DocumentKind,
    },

    /// The root element is missing, unrecognized, or the XML could not be decoded.
    #[error("URL is not a sitemap or sitemapindex.: {reason}")]
    UnexpectedRoot {
        /// What went wrong (`EOF` when no element was found at all).
        reason: String,
    },

    /// A sitemap could not be encoded as XML.
    #[error("failed to serialize sitemap: {reason}")]
    Serialize {
        /// The underlying serializer message.
        reason: String,
    },
}

impl ParseError {
    /// Creates an empty-document error for the given kind.
    #[must_use]
    pub fn empty(kind: DocumentKind) -> Self {
        Self::EmptyDocument { kind }
    }

    /// Creates an unexpected-root error.
    pub fn unexpected_root(reason: impl Into<String>) -> Self {
        Self::UnexpectedRoot {
            reason: reason.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialize(reason: impl Into<String>) -> Self {
        Self::Serialize {
            reason: reason.into(),
        }
    }
}
