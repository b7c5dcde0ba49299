//! Run configuration.
//!
//! A [`RunConfig`] is built once by the binary and passed by reference into
//! every step of the pipeline. Nothing in the library reads process-wide state.

use std::path::PathBuf;

use crate::auth::{Credentials, DEFAULT_SCOPES, Scope};

/// Default platform base URL.
pub const DEFAULT_BASE_URL: &str = "https://developer.api.autodesk.com";

/// Default root directory under which per-document run directories are created.
pub const DEFAULT_DOWNLOAD_ROOT: &str = "download";

/// Project holding the default document.
pub const DEFAULT_PROJECT_ID: &str = "b.e3269b73-141a-4e6f-8487-ff5e8f28b9cc";

/// Lineage item of the default document; its tip version is downloaded.
pub const DEFAULT_ITEM_ID: &str = "urn:adsk.wipprod:dm.lineage:FsWJVHw5QuG_VOj5KjTXag";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large resources).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Which document the run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A derivative urn that can be passed straight to the manifest endpoint.
    Urn(String),
    /// A project item whose tip version is resolved to a derivative urn.
    Item {
        /// Project identifier (`b.` prefixed for hub projects).
        project_id: String,
        /// Lineage item identifier.
        item_id: String,
    },
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self::Item {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            item_id: DEFAULT_ITEM_ID.to_string(),
        }
    }
}

/// Transport timeouts applied to every platform request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect_secs: u64,
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: CONNECT_TIMEOUT_SECS,
            read_secs: READ_TIMEOUT_SECS,
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub scopes: Vec<Scope>,
    pub base_url: String,
    pub document: DocumentSource,
    pub download_root: PathBuf,
    pub timeouts: HttpTimeouts,
}

impl RunConfig {
    /// Creates a config targeting the default document with the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            scopes: DEFAULT_SCOPES.to_vec(),
            base_url: DEFAULT_BASE_URL.to_string(),
            document: DocumentSource::default(),
            download_root: PathBuf::from(DEFAULT_DOWNLOAD_ROOT),
            timeouts: HttpTimeouts::default(),
        }
    }

    /// Overrides the platform base URL (used to target mock servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_document(mut self, document: DocumentSource) -> Self {
        self.document = document;
        self
    }

    #[must_use]
    pub fn with_download_root(mut self, download_root: impl Into<PathBuf>) -> Self {
        self.download_root = download_root.into();
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: HttpTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_hardcoded_item() {
        match DocumentSource::default() {
            DocumentSource::Item {
                project_id,
                item_id,
            } => {
                assert_eq!(project_id, DEFAULT_PROJECT_ID);
                assert_eq!(item_id, DEFAULT_ITEM_ID);
            }
            DocumentSource::Urn(urn) => panic!("unexpected urn source: {urn}"),
        }
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new(Credentials::new("id", "secret"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.download_root, PathBuf::from("download"));
        assert_eq!(config.scopes.len(), DEFAULT_SCOPES.len());
        assert_eq!(config.timeouts, HttpTimeouts::default());
    }

    #[test]
    fn test_run_config_builders_override_fields() {
        let config = RunConfig::new(Credentials::default())
            .with_base_url("http://127.0.0.1:9000")
            .with_document(DocumentSource::Urn("dXJu".to_string()))
            .with_download_root("/tmp/out")
            .with_timeouts(HttpTimeouts {
                connect_secs: 1,
                read_secs: 2,
            });
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.document, DocumentSource::Urn("dXJu".to_string()));
        assert_eq!(config.download_root, PathBuf::from("/tmp/out"));
        assert_eq!(config.timeouts.read_secs, 2);
    }
}
