//! Shared platform client.
//!
//! [`ApsClient`] owns the base URL and the two reqwest clients used by every
//! other module: a JSON API client with transparent gzip decoding and a raw
//! resource client that leaves bodies untouched. Status checking and error
//! mapping happen here so callers only see [`ApiError`] values.

mod error;
mod http_client;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::auth::BearerToken;
use crate::config::{HttpTimeouts, RunConfig};

pub use error::ApiError;
use http_client::{ContentDecoding, build_http_client};

/// Maximum number of characters of an error body kept for diagnostics.
const ERROR_BODY_PREVIEW_CHARS: usize = 512;

/// HTTP client bound to one platform base URL.
#[derive(Debug, Clone)]
pub struct ApsClient {
    api: Client,
    raw: Client,
    base_url: String,
}

impl ApsClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the URL does not parse as an
    /// http(s) URL, or [`ApiError::ClientBuild`] if reqwest cannot build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|_| ApiError::invalid_base_url(base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::invalid_base_url(base_url));
        }

        Ok(Self {
            api: build_http_client(timeouts, ContentDecoding::Gzip)?,
            raw: build_http_client(timeouts, ContentDecoding::Verbatim)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from a run configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ApsClient::new`].
    pub fn from_config(config: &RunConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path starting with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The JSON API client, for requests that need custom builders.
    pub(crate) fn http(&self) -> &Client {
        &self.api
    }

    /// Sends a prepared request and rejects non-2xx responses.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            debug!(status = status.as_u16(), url, body = %preview, "platform returned error status");
            return Err(ApiError::http_status(url, status.as_u16(), preview));
        }

        Ok(response)
    }

    /// Reads a successful response body as JSON.
    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(url, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(url, e))
    }

    /// GETs an API path with the bearer token and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode into `T`.
    #[instrument(level = "debug", skip(self, token), fields(base_url = %self.base_url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &BearerToken,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let request = self.api.get(&url).bearer_auth(token.secret());
        let response = self.send(request, &url).await?;
        Self::read_json(response, &url).await
    }

    /// GETs a resource path with the bearer token, leaving the body unread
    /// and undecoded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    #[instrument(level = "debug", skip(self, token), fields(base_url = %self.base_url))]
    pub async fn get_raw(&self, path: &str, token: &BearerToken) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        let request = self.raw.get(&url).bearer_auth(token.secret());
        self.send(request, &url).await
    }
}
