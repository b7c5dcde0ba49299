//! One sequential run.
//!
//! authenticate → resolve document urn → fetch and filter the manifest →
//! recreate the run directory → download every page's PDF, then its
//! thumbnails. Steps before the downloads are fatal on failure; individual
//! downloads are logged and skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::api::ApsClient;
use crate::auth::{self, AuthError, BearerToken};
use crate::config::{DocumentSource, RunConfig};
use crate::download::{self, DownloadError};
use crate::manifest::{self, ManifestError, ManifestNode, PageDescriptor};
use crate::version::{self, VersionError};

/// Conditions that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The manifest produced no page descriptors.
    #[error("No PDF page found for {urn}. Nothing to download, task aborted")]
    NoPages {
        /// The document urn whose manifest was filtered.
        urn: String,
    },

    /// The run directory could not be recreated.
    #[error("cannot prepare download directory: {0}")]
    OutputDir(#[source] DownloadError),
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub document_urn: String,
    pub run_dir: PathBuf,
    pub pages: usize,
    pub downloaded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// True when every attempted item was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Executes one run against the platform described by `config`.
///
/// # Errors
///
/// Returns [`RunError`] for fatal conditions only. Per-item download failures
/// are logged and counted in [`RunSummary::failed`].
#[instrument(skip_all)]
pub async fn run(client: &ApsClient, config: &RunConfig) -> Result<RunSummary, RunError> {
    let token = auth::authenticate(client, &config.credentials, &config.scopes).await?;

    let document_urn = match &config.document {
        DocumentSource::Urn(urn) => urn.clone(),
        DocumentSource::Item {
            project_id,
            item_id,
        } => version::resolve_derivative_urn(client, project_id, item_id, &token).await?,
    };

    let pages = manifest::fetch_pages(client, &document_urn, &token).await?;
    if pages.is_empty() {
        return Err(RunError::NoPages { urn: document_urn });
    }

    let run_dir = download::prepare_run_directory(&config.download_root, &document_urn)
        .await
        .map_err(RunError::OutputDir)?;

    let mut downloader = PageDownloader {
        client,
        token: &token,
        document_urn: &document_urn,
        run_dir: &run_dir,
        downloaded: 0,
        failed: 0,
    };
    for page in &pages {
        downloader.download_page(page).await;
    }

    let summary = RunSummary {
        pages: pages.len(),
        downloaded: downloader.downloaded,
        failed: downloader.failed,
        document_urn,
        run_dir,
    };
    info!(
        pages = summary.pages,
        downloaded = summary.downloaded,
        failed = summary.failed,
        dir = %summary.run_dir.display(),
        "Download complete"
    );
    Ok(summary)
}

struct PageDownloader<'a> {
    client: &'a ApsClient,
    token: &'a BearerToken,
    document_urn: &'a str,
    run_dir: &'a Path,
    downloaded: usize,
    failed: usize,
}

impl PageDownloader<'_> {
    /// PDF first, then every thumbnail; a failed PDF does not skip thumbnails.
    async fn download_page(&mut self, page: &PageDescriptor) {
        let pdf = match &page.file {
            Some(node) => self.download_node(node).await,
            None => {
                self.failed += 1;
                Err(DownloadError::missing_resource(manifest::PDF_PAGE_ROLE))
            }
        };
        if let Err(e) = pdf {
            error!(
                page = %page.name,
                error = %e,
                "Failed to download the PDF file for page `{}`",
                page.name
            );
        }

        for thumbnail in &page.thumbnails {
            if let Err(e) = self.download_node(thumbnail).await {
                error!(
                    page = %page.name,
                    error = %e,
                    "Failed to download the thumbnail `{}` for page `{}`",
                    thumbnail.resolution_label(),
                    page.name
                );
            }
        }
    }

    async fn download_node(&mut self, node: &ManifestNode) -> Result<(), DownloadError> {
        let result = match node.urn.as_deref() {
            Some(urn) => {
                download::download_resource(
                    self.client,
                    self.document_urn,
                    urn,
                    self.token,
                    self.run_dir,
                )
                .await
            }
            None => Err(DownloadError::MissingUrn),
        };

        match result {
            Ok(_) => {
                self.downloaded += 1;
                Ok(())
            }
            Err(e) => {
                self.failed += 1;
                Err(e)
            }
        }
    }
}
