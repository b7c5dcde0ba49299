//! Error types for the download module.
//!
//! Every variant is recoverable for the run as a whole: the pipeline logs it
//! against the page or thumbnail it belongs to and moves on. Preparing the
//! run directory is the one caller that treats [`DownloadError::Io`] as fatal.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur while downloading one resource.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The page has no resource node with this role.
    #[error("no {role} resource in manifest")]
    MissingResource {
        /// The role that was searched for.
        role: String,
    },

    /// The resource node has no urn to request.
    #[error("resource has no urn")]
    MissingUrn,

    /// The resource urn does not contain the document urn, so no relative
    /// destination can be derived from it.
    #[error("resource urn {resource_urn} is not under document {document_urn}")]
    UrnOutsideDocument {
        /// The document urn used as the split marker.
        document_urn: String,
        /// The resource urn that did not match.
        resource_urn: String,
    },

    /// The derived relative path is empty or escapes the run directory.
    #[error("resource urn {resource_urn} maps to unusable path '{suffix}'")]
    UnsafePath {
        /// The resource urn being mapped.
        resource_urn: String,
        /// The relative suffix derived from it.
        suffix: String,
    },

    /// The document urn is not a single plain directory name, so it cannot
    /// name the run directory.
    #[error("document urn '{document_urn}' cannot be used as a directory name")]
    UnsafeDocumentUrn {
        /// The rejected document urn.
        document_urn: String,
    },

    /// The resource request failed (transport error or non-2xx status).
    #[error("request for {resource_urn} failed: {source}")]
    Request {
        /// The resource urn requested.
        resource_urn: String,
        #[source]
        source: ApiError,
    },

    /// The response body stream failed mid-transfer.
    #[error("network error streaming {resource_urn}: {source}")]
    Stream {
        /// The resource urn being streamed.
        resource_urn: String,
        #[source]
        source: reqwest::Error,
    },

    /// File system error (create directory, create file, write, flush).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub fn urn_outside_document(
        document_urn: impl Into<String>,
        resource_urn: impl Into<String>,
    ) -> Self {
        Self::UrnOutsideDocument {
            document_urn: document_urn.into(),
            resource_urn: resource_urn.into(),
        }
    }

    pub fn missing_resource(role: impl Into<String>) -> Self {
        Self::MissingResource { role: role.into() }
    }

    pub fn unsafe_path(resource_urn: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::UnsafePath {
            resource_urn: resource_urn.into(),
            suffix: suffix.into(),
        }
    }

    pub fn unsafe_document_urn(document_urn: impl Into<String>) -> Self {
        Self::UnsafeDocumentUrn {
            document_urn: document_urn.into(),
        }
    }

    pub fn request(resource_urn: impl Into<String>, source: ApiError) -> Self {
        Self::Request {
            resource_urn: resource_urn.into(),
            source,
        }
    }

    pub fn stream(resource_urn: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Stream {
            resource_urn: resource_urn.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status of a rejected resource request, if that is what failed.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { source, .. } => source.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urn_outside_document_display() {
        let msg = DownloadError::urn_outside_document("dXJuOmRvYw", "other/p1.pdf").to_string();
        assert!(msg.contains("dXJuOmRvYw"), "Expected document urn in: {msg}");
        assert!(msg.contains("other/p1.pdf"), "Expected resource urn in: {msg}");
    }

    #[test]
    fn test_request_error_exposes_status() {
        let error = DownloadError::request(
            "doc/p1.pdf",
            ApiError::http_status("https://example.com/x", 403, ""),
        );
        assert_eq!(error.status(), Some(403));
        assert!(error.to_string().contains("403"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let msg = DownloadError::io(PathBuf::from("/tmp/p1.pdf"), io_error).to_string();
        assert!(msg.contains("/tmp/p1.pdf"), "Expected path in: {msg}");
        assert_eq!(DownloadError::MissingUrn.status(), None);
    }
}
