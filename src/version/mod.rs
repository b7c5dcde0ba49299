//! Project item to derivative urn resolution.
//!
//! A project item points at its tip version. Most versions carry their
//! derivative urn directly; documents extracted from a multi-page file (those
//! with a `viewableGuid`) reference the source file version instead, and the
//! derivative urn is read from that reference.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::api::{ApiError, ApsClient};
use crate::auth::BearerToken;

/// Extension type of the source file version referenced by an extracted document.
const SOURCE_FILE_EXTENSION: &str = "versions:autodesk.bim360:File";

/// Errors that can occur while resolving a derivative urn.
#[derive(Debug, Error)]
pub enum VersionError {
    /// A data-management request failed.
    #[error("failed to resolve document version: {source}")]
    Request {
        #[source]
        source: ApiError,
    },

    /// The item has no tip version.
    #[error("item {item_id} has no tip version")]
    NoTipVersion {
        /// The item that was looked up.
        item_id: String,
    },

    /// Neither the version nor its references expose a derivative urn.
    #[error("version {version_id} has no derivative urn")]
    NoDerivative {
        /// The version that was looked up.
        version_id: String,
    },
}

impl From<ApiError> for VersionError {
    fn from(source: ApiError) -> Self {
        Self::Request { source }
    }
}

// ==================== Data Management Response Types ====================

#[derive(Debug, Deserialize)]
struct Document<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct Link {
    #[serde(default)]
    data: Option<LinkData>,
}

#[derive(Debug, Deserialize)]
struct LinkData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ItemData {
    #[serde(default)]
    relationships: ItemRelationships,
}

#[derive(Debug, Default, Deserialize)]
struct ItemRelationships {
    #[serde(default)]
    tip: Link,
}

#[derive(Debug, Deserialize)]
struct VersionData {
    #[serde(default)]
    attributes: VersionAttributes,
    #[serde(default)]
    relationships: VersionRelationships,
}

#[derive(Debug, Default, Deserialize)]
struct VersionAttributes {
    #[serde(default)]
    extension: Extension,
}

#[derive(Debug, Default, Deserialize)]
struct Extension {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    data: Option<ExtensionData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionData {
    #[serde(default)]
    viewable_guid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VersionRelationships {
    #[serde(default)]
    derivatives: Link,
}

#[derive(Debug, Deserialize)]
struct RefsResponse {
    #[serde(default)]
    included: Vec<IncludedResource>,
}

#[derive(Debug, Deserialize)]
struct IncludedResource {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    attributes: VersionAttributes,
    #[serde(default)]
    relationships: VersionRelationships,
}

// ==================== Resolution ====================

fn item_path(project_id: &str, item_id: &str) -> String {
    format!(
        "/data/v1/projects/{}/items/{}",
        urlencoding::encode(project_id),
        urlencoding::encode(item_id)
    )
}

fn version_path(project_id: &str, version_id: &str) -> String {
    format!(
        "/data/v1/projects/{}/versions/{}",
        urlencoding::encode(project_id),
        urlencoding::encode(version_id)
    )
}

fn link_id(link: &Link) -> Option<&str> {
    link.data.as_ref().map(|data| data.id.as_str())
}

fn is_extracted_document(version: &VersionData) -> bool {
    version
        .attributes
        .extension
        .data
        .as_ref()
        .and_then(|data| data.viewable_guid.as_deref())
        .is_some_and(|guid| !guid.trim().is_empty())
}

fn source_file_derivative(refs: &RefsResponse) -> Option<&str> {
    refs.included
        .iter()
        .find(|resource| {
            resource.kind.as_deref() == Some("versions")
                && resource.attributes.extension.kind.as_deref() == Some(SOURCE_FILE_EXTENSION)
        })
        .and_then(|resource| link_id(&resource.relationships.derivatives))
}

/// Resolves the derivative urn of an item's tip version.
///
/// # Errors
///
/// Returns [`VersionError::Request`] when any lookup fails,
/// [`VersionError::NoTipVersion`] when the item has no tip, and
/// [`VersionError::NoDerivative`] when no derivative urn can be found.
#[instrument(skip(client, token))]
pub async fn resolve_derivative_urn(
    client: &ApsClient,
    project_id: &str,
    item_id: &str,
    token: &BearerToken,
) -> Result<String, VersionError> {
    let item: Document<ItemData> = client
        .get_json(&item_path(project_id, item_id), token)
        .await?;
    let version_id = link_id(&item.data.relationships.tip)
        .ok_or_else(|| VersionError::NoTipVersion {
            item_id: item_id.to_string(),
        })?
        .to_string();
    debug!(version_id = %version_id, "Resolved tip version");

    let version_base = version_path(project_id, &version_id);
    let version: Document<VersionData> = client.get_json(&version_base, token).await?;

    let derivative_urn = if is_extracted_document(&version.data) {
        debug!("Version is an extracted document; following source file reference");
        let refs: RefsResponse = client
            .get_json(&format!("{version_base}/relationships/refs"), token)
            .await?;
        source_file_derivative(&refs).map(str::to_string)
    } else {
        link_id(&version.data.relationships.derivatives).map(str::to_string)
    };

    let derivative_urn = derivative_urn.ok_or(VersionError::NoDerivative { version_id })?;
    info!(urn = %derivative_urn, "Resolved derivative urn");
    Ok(derivative_urn)
}
