//! Token sources used by the HTTP layer to obtain bearer tokens.

use std::sync::Arc;

use async_lock::Mutex;
use chrono::Utc;
use reqwest::Client;

use crate::auth::{AccessToken, OAuthCredentials, TokenResponse};
use crate::error::AuthError;
use crate::network::TOKEN_SCOPE;

/// Where bearer tokens come from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// A pre-issued token, used verbatim.
    Static(String),
    /// OAuth password grant with caching and refresh.
    OAuth(OAuthTokenSource),
}

impl TokenSource {
    /// The bearer token to attach to the next request.
    pub async fn bearer(&self) -> Result<String, AuthError> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::OAuth(source) => source.token().await,
        }
    }

    /// Drop any cached token so the next request fetches a new one.
    /// A static token cannot be renewed, so this is a no-op for it.
    pub async fn invalidate(&self) {
        if let TokenSource::OAuth(source) = self {
            source.invalidate().await;
        }
    }
}

/// OAuth2 password-grant token source.
#[derive(Clone)]
pub struct OAuthTokenSource {
    credentials: OAuthCredentials,
    client: Client,
    cached: Arc<Mutex<Option<AccessToken>>>,
}

impl std::fmt::Debug for OAuthTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenSource")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl OAuthTokenSource {
    pub fn new(credentials: OAuthCredentials, client: Client) -> Self {
        Self {
            credentials,
            client,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Return a valid access token, fetching or refreshing as needed.
    ///
    /// The cache lock is held across the token request so concurrent callers
    /// wait for a single round trip instead of racing the identity provider.
    pub async fn token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if !token.is_stale(now) {
                return Ok(token.token.clone());
            }
        }

        let refresh = cached.as_ref().and_then(|t| t.refresh_token.clone());
        let fresh = match refresh {
            Some(refresh_token) => match self.refresh(&refresh_token).await {
                Ok(token) => token,
                Err(e) => {
                    tracing::debug!(error = %e, "Token refresh failed, requesting a new token");
                    self.password_grant().await?
                }
            },
            None => self.password_grant().await?,
        };

        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn password_grant(&self) -> Result<AccessToken, AuthError> {
        tracing::debug!(
            token_url = %self.credentials.token_url,
            username = %self.credentials.username,
            "Requesting access token"
        );
        let form = [
            ("grant_type", "password"),
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
            ("scope", TOKEN_SCOPE),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        self.request_token(&form).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
        tracing::debug!(token_url = %self.credentials.token_url, "Refreshing access token");
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("scope", TOKEN_SCOPE),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        self.request_token(&form).await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<AccessToken, AuthError> {
        let resp = self
            .client
            .post(&self.credentials.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::TokenRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = resp.json().await?;
        Ok(AccessToken::from_response(parsed, Utc::now()))
    }
}
