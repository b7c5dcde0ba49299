//! Error types for manifest retrieval.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur while fetching or reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest request failed or returned an unexpected body.
    #[error("failed to fetch manifest for {urn}: {source}")]
    Request {
        /// The document urn whose manifest was requested.
        urn: String,
        #[source]
        source: ApiError,
    },

    /// The manifest lists no derivatives, so there are no viewables to walk.
    #[error("manifest for {urn} has no derivatives")]
    NoDerivatives {
        /// The document urn whose manifest was read.
        urn: String,
    },
}

impl ManifestError {
    pub fn request(urn: impl Into<String>, source: ApiError) -> Self {
        Self::Request {
            urn: urn.into(),
            source,
        }
    }

    pub fn no_derivatives(urn: impl Into<String>) -> Self {
        Self::NoDerivatives { urn: urn.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_derivatives_display() {
        let msg = ManifestError::no_derivatives("dXJuOmRvYw").to_string();
        assert!(msg.contains("dXJuOmRvYw"), "Expected urn in: {msg}");
        assert!(msg.contains("no derivatives"), "got: {msg}");
    }

    #[test]
    fn test_request_display_includes_source() {
        let error = ManifestError::request(
            "dXJuOmRvYw",
            ApiError::http_status("https://example.com/manifest", 404, ""),
        );
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected status in: {msg}");
    }
}
