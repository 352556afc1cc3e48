//! Error types for the fetch module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while retrieving sitemap bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("GET {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("GET {url}: request timed out")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success HTTP response.
    #[error("GET {url}: HTTP {status}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Local file could not be read.
    #[error("{op} {path}: {source}")]
    Io {
        /// The failed operation (`open`, `read`).
        op: &'static str,
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A configured request header could not be used.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader {
        /// Header name as supplied.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {reason}")]
    ClientBuild {
        /// The underlying builder failure.
        reason: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error, mapping timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout { url: url.into() };
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error for the given operation.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a client construction error.
    pub fn client_build(reason: impl Into<String>) -> Self {
        Self::ClientBuild {
            reason: reason.into(),
        }
    }

    /// Whether this error came from the network transport rather than the filesystem.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_http_status_display() {
        let error = FetchError::http_status("https://example.com/sitemap.xml", 404);
        assert_eq!(error.to_string(), "GET https://example.com/sitemap.xml: HTTP 404");
        assert!(error.is_transport());
    }

    #[test]
    fn test_fetch_error_timeout_display() {
        let error = FetchError::Timeout {
            url: "https://example.com/slow.xml".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("timed out"), "got: {msg}");
        assert!(msg.contains("https://example.com/slow.xml"), "got: {msg}");
        assert!(error.is_transport());
    }

    #[test]
    fn test_fetch_error_io_keeps_native_message() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory");
        let error = FetchError::io("open", "./testdata/notfound.xml", io_error);
        assert_eq!(
            error.to_string(),
            "open ./testdata/notfound.xml: no such file or directory"
        );
        assert!(!error.is_transport());
    }

    #[test]
    fn test_fetch_error_invalid_header_display() {
        let error = FetchError::invalid_header("X Bad", "invalid HTTP header name");
        let msg = error.to_string();
        assert!(msg.contains("X Bad"), "got: {msg}");
        assert!(msg.contains("invalid HTTP header name"), "got: {msg}");
    }
}
