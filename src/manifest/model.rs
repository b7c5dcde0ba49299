//! Derivative manifest model.
//!
//! Only the fields the downloader reads are modelled. Everything is optional
//! because the platform omits fields freely; absent `children` arrays
//! deserialize as empty.

use serde::Deserialize;

/// Root of a derivative manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub derivatives: Vec<Derivative>,
}

/// One generated representation of the source design.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derivative {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub output_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
    /// Viewables, one per document page.
    #[serde(default)]
    pub children: Vec<ManifestNode>,
}

/// A viewable or resource node in the manifest tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ManifestNode {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Semantic tag such as `pdf-page` or `thumbnail`.
    #[serde(default)]
    pub role: Option<String>,
    /// Node kind; downloadable nodes are `resource`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
    /// Pixel size of thumbnails.
    #[serde(default)]
    pub resolution: Option<Vec<f64>>,
    #[serde(default)]
    pub children: Vec<ManifestNode>,
}

impl ManifestNode {
    /// Resolution formatted as `WxH`, or `?` when the node has none.
    #[must_use]
    pub fn resolution_label(&self) -> String {
        match &self.resolution {
            Some(values) if !values.is_empty() => values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("x"),
            _ => "?".to_string(),
        }
    }
}

/// In-memory description of one page: its PDF resource and thumbnails.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub name: String,
    pub file: Option<ManifestNode>,
    pub thumbnails: Vec<ManifestNode>,
}
