//! reqwest client construction policy.
//!
//! Both platform clients (JSON API and raw resources) share timeout,
//! user-agent and proxy handling. The raw-resource client disables content
//! decoding so downloaded bytes match what a viewer would fetch.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::config::HttpTimeouts;
use crate::user_agent;

use super::ApiError;

/// Whether response bodies may be transparently decompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentDecoding {
    Gzip,
    Verbatim,
}

/// Builds a platform HTTP client.
///
/// Some restricted sandbox environments panic when querying system proxy
/// settings; the builder is retried with env-proxy lookup only.
///
/// # Errors
///
/// Returns [`ApiError::ClientBuild`] when client construction fails.
pub(crate) fn build_http_client(
    timeouts: HttpTimeouts,
    decoding: ContentDecoding,
) -> Result<Client, ApiError> {
    match try_build_client(timeouts, decoding, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            warn!("HTTP client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(timeouts, decoding, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(ApiError::client_build(
                    "client builder panicked while applying env-proxy fallback",
                )),
                Err(BuildClientFailure::Build(error)) => {
                    Err(ApiError::client_build(error.to_string()))
                }
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(ApiError::client_build(error.to_string())),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    timeouts: HttpTimeouts,
    decoding: ContentDecoding,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeouts, decoding);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeouts: HttpTimeouts, decoding: ContentDecoding) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(user_agent::default_user_agent())
        .gzip(decoding == ContentDecoding::Gzip)
}

/// Proxy variables consulted per scheme when system lookup is disabled,
/// most specific first.
const HTTPS_PROXY_VARS: &[&str] = &["HTTPS_PROXY", "https_proxy"];
const HTTP_PROXY_VARS: &[&str] = &["HTTP_PROXY", "http_proxy"];
const ALL_PROXY_VARS: &[&str] = &["ALL_PROXY", "all_proxy"];

fn apply_env_proxy_fallback(builder: ClientBuilder) -> ClientBuilder {
    let https = proxy_from_env(HTTPS_PROXY_VARS).and_then(|url| Proxy::https(url).ok());
    let http = proxy_from_env(HTTP_PROXY_VARS).and_then(|url| Proxy::http(url).ok());
    [https, http].into_iter().flatten().fold(builder, ClientBuilder::proxy)
}

/// First non-blank value among `vars`, then among the catch-all variables.
fn proxy_from_env(vars: &[&str]) -> Option<String> {
    vars.iter()
        .chain(ALL_PROXY_VARS)
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
}
