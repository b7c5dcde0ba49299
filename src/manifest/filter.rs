//! Viewable filtering: which resource nodes make up a page.

use super::error::ManifestError;
use super::model::{Manifest, ManifestNode, PageDescriptor};

/// Role of the PDF resource under a viewable.
pub const PDF_PAGE_ROLE: &str = "pdf-page";

/// Role of thumbnail resources under a viewable.
pub const THUMBNAIL_ROLE: &str = "thumbnail";

/// Node kind of downloadable leaves.
pub const RESOURCE_KIND: &str = "resource";

/// True when `node` carries both `role` and `type` and they equal the
/// requested values. Nodes missing either field are never eligible.
#[must_use]
pub fn is_eligible(node: &ManifestNode, role: &str, kind: &str) -> bool {
    match (node.role.as_deref(), node.kind.as_deref()) {
        (Some(node_role), Some(node_kind)) => node_role == role && node_kind == kind,
        _ => false,
    }
}

/// First eligible node in depth-first pre-order.
#[must_use]
pub fn find_resource<'a>(
    nodes: &'a [ManifestNode],
    role: &str,
    kind: &str,
) -> Option<&'a ManifestNode> {
    nodes.iter().find_map(|node| {
        if is_eligible(node, role, kind) {
            Some(node)
        } else {
            find_resource(&node.children, role, kind)
        }
    })
}

/// Every eligible node in depth-first pre-order.
#[must_use]
pub fn find_resources<'a>(
    nodes: &'a [ManifestNode],
    role: &str,
    kind: &str,
) -> Vec<&'a ManifestNode> {
    let mut found = Vec::new();
    collect_eligible(nodes, role, kind, &mut found);
    found
}

fn collect_eligible<'a>(
    nodes: &'a [ManifestNode],
    role: &str,
    kind: &str,
    found: &mut Vec<&'a ManifestNode>,
) {
    for node in nodes {
        if is_eligible(node, role, kind) {
            found.push(node);
        }
        collect_eligible(&node.children, role, kind, found);
    }
}

/// Builds one [`PageDescriptor`] per viewable of the first derivative.
///
/// # Errors
///
/// Returns [`ManifestError::NoDerivatives`] when the manifest has none.
pub fn collect_pages(manifest: &Manifest, urn: &str) -> Result<Vec<PageDescriptor>, ManifestError> {
    let derivative = manifest
        .derivatives
        .first()
        .ok_or_else(|| ManifestError::no_derivatives(urn))?;

    let pages = derivative
        .children
        .iter()
        .enumerate()
        .map(|(index, viewable)| PageDescriptor {
            name: page_name(viewable, index),
            file: find_resource(&viewable.children, PDF_PAGE_ROLE, RESOURCE_KIND).cloned(),
            thumbnails: find_resources(&viewable.children, THUMBNAIL_ROLE, RESOURCE_KIND)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();

    Ok(pages)
}

fn page_name(viewable: &ManifestNode, index: usize) -> String {
    viewable
        .name
        .clone()
        .or_else(|| viewable.guid.clone())
        .unwrap_or_else(|| format!("page {}", index + 1))
}
