//! Error types for the token exchange.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur while obtaining a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Client id or secret was empty, so the exchange cannot succeed.
    #[error(
        "missing client credentials: {missing} is empty\n  Suggestion: export FORGE_CLIENT_ID and FORGE_CLIENT_SECRET"
    )]
    MissingCredentials {
        /// Name of the empty credential field.
        missing: &'static str,
    },

    /// The token endpoint rejected the request or could not be reached.
    #[error("failed to get your token: {source}")]
    Request {
        #[source]
        source: ApiError,
    },

    /// The token endpoint answered 2xx without a usable token.
    #[error("token endpoint returned an empty access token")]
    EmptyToken,
}

impl From<ApiError> for AuthError {
    fn from(source: ApiError) -> Self {
        Self::Request { source }
    }
}
