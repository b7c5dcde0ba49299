//! CLI entry point for the derivative downloader.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use derivative_core::{ApsClient, Credentials, pipeline};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

/// Process outcome mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessExit {
    Success,
    Failure,
    Partial,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::from(1),
            ProcessExit::Partial => ExitCode::from(2),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(args.default_log_level());
    debug!(?args, "CLI arguments parsed");

    match run(args).await {
        Ok(exit) => exit.into(),
        Err(e) => {
            error!("{e:#}");
            ProcessExit::Failure.into()
        }
    }
}

/// `RUST_LOG` takes priority over the -q / -v derived level.
fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

async fn run(args: Args) -> Result<ProcessExit> {
    let config = args.into_run_config(Credentials::from_env());
    info!(base_url = %config.base_url, "Derivative downloader starting");

    let client = ApsClient::from_config(&config).context("cannot create platform client")?;
    let summary = pipeline::run(&client, &config)
        .await
        .context("run aborted")?;

    Ok(if summary.is_complete() {
        ProcessExit::Success
    } else {
        ProcessExit::Partial
    })
}
