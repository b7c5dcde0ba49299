//! Derivative Downloader Core Library
//!
//! This library retrieves a document's derivative manifest from the design-data
//! platform and downloads the per-page PDF resources and thumbnail images it
//! references.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Run configuration passed explicitly into every step
//! - [`api`] - Shared platform HTTP client and status mapping
//! - [`auth`] - Two-legged OAuth client-credentials exchange
//! - [`version`] - Project item to derivative urn resolution
//! - [`manifest`] - Manifest model and viewable filtering
//! - [`download`] - Resource destination paths and streaming file writes
//! - [`pipeline`] - One sequential run: authenticate, filter, download

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
pub mod config;
pub mod download;
pub mod manifest;
pub mod pipeline;
pub(crate) mod user_agent;
pub mod version;

// Re-export commonly used types
pub use api::{ApiError, ApsClient};
pub use auth::{AuthError, BearerToken, Credentials, DEFAULT_SCOPES, Scope, authenticate};
pub use config::{DocumentSource, HttpTimeouts, RunConfig};
pub use download::{
    DownloadError, DownloadedResource, download_resource, prepare_run_directory,
    resource_destination,
};
pub use manifest::{
    Derivative, Manifest, ManifestError, ManifestNode, PageDescriptor, collect_pages,
    fetch_manifest, fetch_pages, find_resource, find_resources, is_eligible,
};
pub use pipeline::{RunError, RunSummary, run};
pub use version::{VersionError, resolve_derivative_urn};
