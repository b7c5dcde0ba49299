//! Resource downloads.
//!
//! Each filtered manifest node is fetched from the platform and written to a
//! file whose path is derived from the node's urn, relative to a per-run
//! directory named after the document urn.
//!
//! # Example
//!
//! ```no_run
//! use derivative_core::{ApsClient, BearerToken, HttpTimeouts};
//! use derivative_core::download::{download_resource, prepare_run_directory};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApsClient::new("https://developer.api.autodesk.com", HttpTimeouts::default())?;
//! let token = BearerToken::new("token");
//! let run_dir = prepare_run_directory(Path::new("download"), "dXJu").await?;
//! let saved = download_resource(&client, "dXJu", "dXJu/p1.pdf", &token, &run_dir).await?;
//! println!("Downloaded: {}", saved.path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod destination;
mod error;

pub use client::{DownloadedResource, download_resource, resource_path};
pub use destination::{prepare_run_directory, resource_destination};
pub use error::DownloadError;
