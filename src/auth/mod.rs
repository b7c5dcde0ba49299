//! Two-legged OAuth authentication.
//!
//! Exchanges a client id and secret for a bearer token with the
//! client-credentials grant. Authentication is a hard prerequisite for a run:
//! any failure is returned to the caller and never retried.

mod credentials;
mod error;

use tracing::{info, instrument};

use crate::api::ApsClient;

pub use credentials::{
    BearerToken, CLIENT_ID_ENV, CLIENT_SECRET_ENV, Credentials, DEFAULT_SCOPES, Scope,
};
pub use error::AuthError;

/// Token endpoint path, relative to the platform base URL.
pub const TOKEN_PATH: &str = "/authentication/v2/token";

const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Obtains a bearer token for `scopes`.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredentials`] without contacting the platform
/// when the id or secret is empty, [`AuthError::Request`] on transport
/// failure, non-2xx status or an undecodable body, and
/// [`AuthError::EmptyToken`] when the response carries no token.
#[instrument(skip(client, credentials), fields(client_id = %credentials.client_id()))]
pub async fn authenticate(
    client: &ApsClient,
    credentials: &Credentials,
    scopes: &[Scope],
) -> Result<BearerToken, AuthError> {
    if credentials.client_id().is_empty() {
        return Err(AuthError::MissingCredentials {
            missing: "client id",
        });
    }
    if credentials.client_secret().is_empty() {
        return Err(AuthError::MissingCredentials {
            missing: "client secret",
        });
    }

    let url = client.endpoint(TOKEN_PATH);
    let scope = Scope::join(scopes);
    let request = client
        .http()
        .post(&url)
        .basic_auth(credentials.client_id(), Some(credentials.client_secret()))
        .form(&[
            ("grant_type", CLIENT_CREDENTIALS_GRANT),
            ("scope", scope.as_str()),
        ]);

    let response = client.send(request, &url).await?;
    let token: BearerToken = ApsClient::read_json(response, &url).await?;
    if token.secret().is_empty() {
        return Err(AuthError::EmptyToken);
    }

    info!(expires_in = ?token.expires_in(), "Obtained access token");
    Ok(token)
}
