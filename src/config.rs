//! API configuration from a secrets file and `FBN_*` environment variables.
//!
//! The secrets file uses the layout shared by all LUSID SDKs:
//!
//! ```json
//! {
//!   "api": {
//!     "tokenUrl": "https://<id-provider>/oauth2/<id>/v1/token",
//!     "username": "...",
//!     "password": "...",
//!     "clientId": "...",
//!     "clientSecret": "...",
//!     "apiUrl": "https://<domain>.lusid.com/api",
//!     "applicationName": "..."
//!   }
//! }
//! ```
//!
//! Environment variables override values from the file.

use crate::error::ConfigError;
use crate::network::env;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Everything needed to reach and authenticate against the API.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfiguration {
    #[serde(default)]
    pub token_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub application_name: Option<String>,
    /// A pre-issued bearer token. Takes precedence over the OAuth fields.
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Deserialize)]
struct SecretsFile {
    api: ApiConfiguration,
}

// Keep secrets out of logs.
impl std::fmt::Debug for ApiConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ApiConfiguration")
            .field("token_url", &self.token_url)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("api_url", &self.api_url)
            .field("application_name", &self.application_name)
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

impl ApiConfiguration {
    /// Read a `secrets.json` file.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let secrets: SecretsFile = serde_json::from_str(&text).map_err(|source| {
            ConfigError::Parse {
                path: display,
                source,
            }
        })?;
        Ok(secrets.api)
    }

    /// Read the `FBN_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Same as [`from_env`](Self::from_env) but from an explicit map.
    /// Empty values count as unset.
    pub fn from_env_map(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();
        Self {
            token_url: get(env::TOKEN_URL),
            username: get(env::USERNAME),
            password: get(env::PASSWORD),
            client_id: get(env::CLIENT_ID),
            client_secret: get(env::CLIENT_SECRET),
            api_url: get(env::API_URL),
            application_name: get(env::APP_NAME),
            access_token: get(env::ACCESS_TOKEN),
        }
    }

    /// Overlay `other` on top of `self`: values set in `other` win.
    pub fn merge(self, other: ApiConfiguration) -> Self {
        Self {
            token_url: other.token_url.or(self.token_url),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            client_id: other.client_id.or(self.client_id),
            client_secret: other.client_secret.or(self.client_secret),
            api_url: other.api_url.or(self.api_url),
            application_name: other.application_name.or(self.application_name),
            access_token: other.access_token.or(self.access_token),
        }
    }

    /// Secrets file (if given) overlaid with environment variables.
    pub fn load(secrets_path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match secrets_path {
            Some(path) => Self::from_secrets_file(path)?,
            None => Self::default(),
        };
        let config = base.merge(Self::from_env());
        config.validate()?;
        Ok(config)
    }

    /// `api_url` plus either an access token or the full OAuth credential set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_none() {
            return Err(ConfigError::Missing("apiUrl"));
        }
        if self.access_token.is_some() {
            return Ok(());
        }
        let required = [
            ("tokenUrl", &self.token_url),
            ("username", &self.username),
            ("password", &self.password),
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
        ];
        for (name, value) in required {
            if value.is_none() {
                return Err(ConfigError::Missing(name));
            }
        }
        Ok(())
    }

    pub fn has_oauth_credentials(&self) -> bool {
        self.token_url.is_some()
            && self.username.is_some()
            && self.password.is_some()
            && self.client_id.is_some()
            && self.client_secret.is_some()
    }
}
