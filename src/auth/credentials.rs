//! Client credentials, OAuth scopes and the bearer token they produce.

use std::fmt;

use serde::Deserialize;

/// Environment variable holding the OAuth client id.
pub const CLIENT_ID_ENV: &str = "FORGE_CLIENT_ID";

/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "FORGE_CLIENT_SECRET";

/// OAuth client id and secret for the two-legged grant.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads credentials from [`CLIENT_ID_ENV`] and [`CLIENT_SECRET_ENV`].
    ///
    /// Absent variables become empty strings; the token exchange reports them.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(CLIENT_ID_ENV).unwrap_or_default(),
            std::env::var(CLIENT_SECRET_ENV).unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// OAuth scopes understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    DataRead,
    DataWrite,
    DataCreate,
    DataSearch,
    BucketCreate,
    BucketRead,
    BucketUpdate,
    BucketDelete,
}

impl Scope {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataRead => "data:read",
            Self::DataWrite => "data:write",
            Self::DataCreate => "data:create",
            Self::DataSearch => "data:search",
            Self::BucketCreate => "bucket:create",
            Self::BucketRead => "bucket:read",
            Self::BucketUpdate => "bucket:update",
            Self::BucketDelete => "bucket:delete",
        }
    }

    /// Space-separated scope list as sent in the token request.
    #[must_use]
    pub fn join(scopes: &[Scope]) -> String {
        scopes
            .iter()
            .map(|scope| scope.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scopes requested on every run.
pub const DEFAULT_SCOPES: &[Scope] = &[
    Scope::DataRead,
    Scope::DataWrite,
    Scope::DataCreate,
    Scope::DataSearch,
    Scope::BucketCreate,
    Scope::BucketRead,
    Scope::BucketUpdate,
    Scope::BucketDelete,
];

/// Short-lived bearer token. Expiry is managed by the platform.
#[derive(Clone, Deserialize)]
pub struct BearerToken {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl BearerToken {
    /// Wraps an already issued access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            expires_in: None,
        }
    }

    /// The raw access token for the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as reported by the token endpoint.
    #[must_use]
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
