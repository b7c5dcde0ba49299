//! Streaming download of one derivative resource to disk.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use crate::api::ApsClient;
use crate::auth::BearerToken;

use super::destination::resource_destination;
use super::error::DownloadError;

/// Result of a successful resource download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedResource {
    /// Where the bytes were written.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: u64,
}

/// Resource endpoint path for a resource urn under a document urn.
#[must_use]
pub fn resource_path(document_urn: &str, resource_urn: &str) -> String {
    format!(
        "/modelderivative/v2/designdata/{}/manifest/{}",
        urlencoding::encode(document_urn),
        urlencoding::encode(resource_urn)
    )
}

/// Downloads `resource_urn` into `run_dir`, at the path derived by
/// [`resource_destination`].
///
/// The destination is derived and the response status checked before any
/// file is touched, so a rejected request never creates or truncates a file.
/// The body is written verbatim, replacing any existing file. A failure while
/// streaming removes the partial file.
///
/// # Errors
///
/// Returns [`DownloadError`] when the destination cannot be derived, the
/// request fails or returns non-2xx, or writing fails.
#[instrument(skip(client, token, run_dir), fields(resource = %resource_urn))]
pub async fn download_resource(
    client: &ApsClient,
    document_urn: &str,
    resource_urn: &str,
    token: &BearerToken,
    run_dir: &Path,
) -> Result<DownloadedResource, DownloadError> {
    let file_path = resource_destination(run_dir, document_urn, resource_urn)?;
    debug!(path = %file_path.display(), "resolved output path");

    let response = client
        .get_raw(&resource_path(document_urn, resource_urn), token)
        .await
        .map_err(|e| DownloadError::request(resource_urn, e))?;

    if let Some(parent) = file_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::io(parent, e))?;
    }

    let mut file = File::create(&file_path)
        .await
        .map_err(|e| DownloadError::io(file_path.clone(), e))?;

    let stream_result = stream_to_file(&mut file, response, resource_urn, &file_path).await;
    drop(file);

    if stream_result.is_err() {
        debug!(path = %file_path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(&file_path).await;
    }
    let bytes = stream_result?;

    info!(path = %file_path.display(), bytes, "download complete");
    Ok(DownloadedResource {
        path: file_path,
        bytes,
    })
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    resource_urn: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::stream(resource_urn, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
