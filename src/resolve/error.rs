//! Error types for the resolve module.

use thiserror::Error;

use crate::document::ParseError;
use crate::fetch::FetchError;

/// Errors that can occur while resolving a sitemap tree.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The document could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document could not be classified or decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A child sitemap failed under the strict policy.
    #[error("failed to parse {child} in {parent}.: {source}")]
    ChildResolution {
        /// Location of the failing child.
        child: String,
        /// Location of the index that referenced it.
        parent: String,
        /// Why the child failed.
        #[source]
        source: Box<ResolveError>,
    },

    /// An index references one of its own ancestors.
    #[error("sitemapindex cycle: {location} is already being resolved")]
    Cycle {
        /// The location that closes the cycle.
        location: String,
    },

    /// Every child of an index failed under the force policy.
    #[error("all {count} sitemaps in {location} failed to resolve")]
    AllChildrenFailed {
        /// Location of the index.
        location: String,
        /// Number of children that failed.
        count: usize,
    },
}

impl ResolveError {
    /// Wraps a child failure with the child and parent locations.
    pub fn child(
        child: impl Into<String>,
        parent: impl Into<String>,
        source: ResolveError,
    ) -> Self {
        Self::ChildResolution {
            child: child.into(),
            parent: parent.into(),
            source: Box::new(source),
        }
    }

    /// Creates a cycle error.
    pub fn cycle(location: impl Into<String>) -> Self {
        Self::Cycle {
            location: location.into(),
        }
    }
}
