//! CLI argument definitions using clap derive macros.
//!
//! Client credentials are read from `FORGE_CLIENT_ID` / `FORGE_CLIENT_SECRET`
//! only and have no flags.

use std::path::PathBuf;

use clap::Parser;

use derivative_core::config::{
    CONNECT_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_DOWNLOAD_ROOT, DEFAULT_ITEM_ID,
    DEFAULT_PROJECT_ID, READ_TIMEOUT_SECS,
};
use derivative_core::{Credentials, DocumentSource, HttpTimeouts, RunConfig};

/// Download the rendered PDF pages and thumbnails of a design document.
///
/// Fetches the document's derivative manifest, picks every viewable's
/// pdf-page resource and thumbnails, and writes them under
/// <download-root>/<document urn>/.
#[derive(Parser, Debug)]
#[command(name = "derivative-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Derivative urn to download directly (skips item lookup)
    #[arg(short = 'u', long)]
    pub urn: Option<String>,

    /// Project containing the item
    #[arg(long, default_value = DEFAULT_PROJECT_ID)]
    pub project: String,

    /// Lineage item whose tip version is downloaded
    #[arg(long, default_value = DEFAULT_ITEM_ID)]
    pub item: String,

    /// Directory under which the per-document folder is recreated
    #[arg(short = 'o', long, default_value = DEFAULT_DOWNLOAD_ROOT)]
    pub download_root: PathBuf,

    /// Platform base URL
    #[arg(long, env = "APS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP connect timeout in seconds (1-300)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// HTTP read timeout in seconds (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,
}

impl Args {
    /// Default log level from -q / -v flags.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Builds the run configuration with the given credentials.
    pub fn into_run_config(self, credentials: Credentials) -> RunConfig {
        let document = match self.urn {
            Some(urn) => DocumentSource::Urn(urn),
            None => DocumentSource::Item {
                project_id: self.project,
                item_id: self.item,
            },
        };

        RunConfig::new(credentials)
            .with_base_url(self.base_url)
            .with_document(document)
            .with_download_root(self.download_root)
            .with_timeouts(HttpTimeouts {
                connect_secs: self.connect_timeout,
                read_secs: self.read_timeout,
            })
    }
}
