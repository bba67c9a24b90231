//! Authentication — bearer tokens for API requests.
//!
//! Two ways to authenticate:
//!
//! - **Static token**: a pre-issued access token (`FBN_ACCESS_TOKEN`). Used
//!   as-is until the server rejects it.
//! - **OAuth password grant**: username/password plus client id/secret are
//!   exchanged at the identity provider's token endpoint. The token is cached
//!   and renewed shortly before expiry, via the refresh token when one was
//!   issued.
//!
//! Tokens are never logged and never exposed through the high-level client.

#[cfg(feature = "http")]
pub mod client;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ApiConfiguration;
use crate::error::AuthError;

/// Renew tokens this long before they expire.
pub const EXPIRY_MARGIN_SECS: i64 = 30;

/// Credentials for the OAuth password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub token_url: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("token_url", &self.token_url)
            .field("username", &self.username)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&ApiConfiguration> for OAuthCredentials {
    type Error = AuthError;

    fn try_from(cfg: &ApiConfiguration) -> Result<Self, Self::Error> {
        fn take(v: &Option<String>, name: &'static str) -> Result<String, AuthError> {
            v.clone().ok_or(AuthError::MissingCredential(name))
        }
        Ok(Self {
            token_url: take(&cfg.token_url, "tokenUrl")?,
            username: take(&cfg.username, "username")?,
            password: take(&cfg.password, "password")?,
            client_id: take(&cfg.client_id, "clientId")?,
            client_secret: take(&cfg.client_secret, "clientSecret")?,
        })
    }
}

/// Token endpoint response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// A cached access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub(crate) token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub(crate) refresh_token: Option<String>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_at", &self.expires_at)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}

impl AccessToken {
    pub fn from_response(resp: TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            token: resp.access_token,
            expires_at: resp.expires_in.map(|secs| now + Duration::seconds(secs)),
            refresh_token: resp.refresh_token,
        }
    }

    /// True when the token expires within [`EXPIRY_MARGIN_SECS`] of `now`.
    /// Tokens without an expiry never go stale.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(at) => now + Duration::seconds(EXPIRY_MARGIN_SECS) >= at,
            None => false,
        }
    }
}
