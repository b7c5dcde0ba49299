//! Local paths for downloaded resources.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use super::error::DownloadError;

/// Maps a resource urn to its file under `run_dir`.
///
/// The resource urn is split on the first occurrence of `document_urn`; the
/// remainder, without leading slashes, is the path relative to `run_dir`.
/// `"<doc>/output/p1.pdf"` becomes `<run_dir>/output/p1.pdf`.
///
/// # Errors
///
/// Returns [`DownloadError::UrnOutsideDocument`] when the resource urn does
/// not contain the document urn, and [`DownloadError::UnsafePath`] when the
/// remainder is empty or would leave `run_dir`.
pub fn resource_destination(
    run_dir: &Path,
    document_urn: &str,
    resource_urn: &str,
) -> Result<PathBuf, DownloadError> {
    if document_urn.is_empty() {
        return Err(DownloadError::urn_outside_document(document_urn, resource_urn));
    }

    let (_, suffix) = resource_urn
        .split_once(document_urn)
        .ok_or_else(|| DownloadError::urn_outside_document(document_urn, resource_urn))?;
    let relative = Path::new(suffix.trim_start_matches(['/', '\\']));

    let mut has_file = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => has_file = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(DownloadError::unsafe_path(resource_urn, suffix));
            }
        }
    }
    if !has_file {
        return Err(DownloadError::unsafe_path(resource_urn, suffix));
    }

    Ok(run_dir.join(relative))
}

/// `<download_root>/<document_urn>`, provided the urn is one plain path
/// segment. Separators, `.`, `..` and absolute paths are rejected so the
/// run directory is always a direct child of `download_root`.
fn run_directory(download_root: &Path, document_urn: &str) -> Result<PathBuf, DownloadError> {
    if document_urn.contains(['/', '\\']) {
        return Err(DownloadError::unsafe_document_urn(document_urn));
    }

    let mut components = Path::new(document_urn).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == document_urn => {
            Ok(download_root.join(name))
        }
        _ => Err(DownloadError::unsafe_document_urn(document_urn)),
    }
}

/// Recreates `<download_root>/<document_urn>` empty and returns it.
///
/// Any previous contents are removed so a run never mixes with leftovers.
///
/// # Errors
///
/// Returns [`DownloadError::UnsafeDocumentUrn`] before touching the file
/// system when the urn is not a single directory name, and
/// [`DownloadError::Io`] if the directory cannot be removed or created.
pub async fn prepare_run_directory(
    download_root: &Path,
    document_urn: &str,
) -> Result<PathBuf, DownloadError> {
    let run_dir = run_directory(download_root, document_urn)?;

    match tokio::fs::remove_dir_all(&run_dir).await {
        Ok(()) => debug!(dir = %run_dir.display(), "Removed previous download directory"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(DownloadError::io(run_dir, e)),
    }

    tokio::fs::create_dir_all(&run_dir)
        .await
        .map_err(|e| DownloadError::io(run_dir.clone(), e))?;
    info!(dir = %run_dir.display(), "Download directory ready");

    Ok(run_dir)
}
