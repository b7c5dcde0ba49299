//! Derivative manifest retrieval and filtering.
//!
//! The manifest is a tree: derivatives contain viewables (one per page), and
//! viewables contain resource nodes. [`fetch_pages`] fetches the manifest for
//! a document urn and reduces the first derivative to a list of
//! [`PageDescriptor`]s, each holding the page's PDF resource and thumbnails.

mod error;
mod filter;
mod model;

use tracing::{debug, info, instrument, warn};

use crate::api::ApsClient;
use crate::auth::BearerToken;

pub use error::ManifestError;
pub use filter::{
    PDF_PAGE_ROLE, RESOURCE_KIND, THUMBNAIL_ROLE, collect_pages, find_resource, find_resources,
    is_eligible,
};
pub use model::{Derivative, Manifest, ManifestNode, PageDescriptor};

/// Manifest endpoint path for a document urn.
#[must_use]
pub fn manifest_path(document_urn: &str) -> String {
    format!(
        "/modelderivative/v2/designdata/{}/manifest",
        urlencoding::encode(document_urn)
    )
}

/// Fetches the derivative manifest for `document_urn`.
///
/// # Errors
///
/// Returns [`ManifestError::Request`] on transport failure, non-2xx status or
/// a body that is not a manifest.
#[instrument(skip(client, token))]
pub async fn fetch_manifest(
    client: &ApsClient,
    document_urn: &str,
    token: &BearerToken,
) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = client
        .get_json(&manifest_path(document_urn), token)
        .await
        .map_err(|e| ManifestError::request(document_urn, e))?;

    let status = manifest.status.as_deref().unwrap_or("unknown");
    if status == "success" {
        debug!(status, derivatives = manifest.derivatives.len(), "Fetched manifest");
    } else {
        warn!(
            status,
            progress = manifest.progress.as_deref().unwrap_or("unknown"),
            "Manifest translation is not complete; resources may be missing"
        );
    }

    Ok(manifest)
}

/// Fetches the manifest and collects one page descriptor per viewable.
///
/// An empty result is not an error here; the pipeline decides what to do.
///
/// # Errors
///
/// Returns [`ManifestError`] when the manifest cannot be fetched or has no
/// derivatives.
pub async fn fetch_pages(
    client: &ApsClient,
    document_urn: &str,
    token: &BearerToken,
) -> Result<Vec<PageDescriptor>, ManifestError> {
    let manifest = fetch_manifest(client, document_urn, token).await?;
    let pages = collect_pages(&manifest, document_urn)?;

    for page in &pages {
        debug!(
            page = %page.name,
            pdf = page.file.as_ref().and_then(|f| f.urn.as_deref()).unwrap_or("-"),
            thumbnails = page.thumbnails.len(),
            "Collected page"
        );
    }
    info!(pages = pages.len(), "Filtered manifest viewables");

    Ok(pages)
}
