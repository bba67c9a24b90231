//! High-level client — `LusidClient` with nested sub-client accessors.
//!
//! Each API area has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, configuration resolution and accessor
//! methods.

use crate::auth::client::{OAuthTokenSource, TokenSource};
use crate::auth::OAuthCredentials;
use crate::config::ApiConfiguration;
use crate::domain::aggregation::client::Aggregation;
use crate::domain::corporate_action::client::CorporateActions;
use crate::domain::instrument::client::Instruments;
use crate::domain::metadata::client::Metadata;
use crate::domain::portfolio::client::Portfolios;
use crate::domain::portfolio_group::client::PortfolioGroups;
use crate::domain::property_definition::client::PropertyDefinitions;
use crate::domain::quote::client::Quotes;
use crate::domain::scope::client::Scopes;
use crate::domain::transaction_portfolio::client::TransactionPortfolios;
use crate::error::{ConfigError, SdkError};
use crate::http::{HttpOptions, LusidHttp, RetryConfig};

use std::path::Path;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::aggregation::client::Aggregation as AggregationClient;
pub use crate::domain::corporate_action::client::CorporateActions as CorporateActionsClient;
pub use crate::domain::instrument::client::Instruments as InstrumentsClient;
pub use crate::domain::metadata::client::Metadata as MetadataClient;
pub use crate::domain::portfolio::client::Portfolios as PortfoliosClient;
pub use crate::domain::portfolio_group::client::PortfolioGroups as PortfolioGroupsClient;
pub use crate::domain::property_definition::client::PropertyDefinitions as PropertyDefinitionsClient;
pub use crate::domain::quote::client::Quotes as QuotesClient;
pub use crate::domain::scope::client::Scopes as ScopesClient;
pub use crate::domain::transaction_portfolio::client::TransactionPortfolios as TransactionPortfoliosClient;

/// The primary entry point for the LUSID SDK.
///
/// Provides nested sub-client accessors for each API area:
/// `client.portfolios()`, `client.transaction_portfolios()`, etc.
/// Cloning is cheap; clones share the connection pool and token cache.
#[derive(Debug, Clone)]
pub struct LusidClient {
    pub(crate) http: LusidHttp,
}

impl LusidClient {
    pub fn builder() -> LusidClientBuilder {
        LusidClientBuilder::default()
    }

    /// Build from the `FBN_*` environment variables.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::builder()
            .configuration(ApiConfiguration::from_env())
            .build()
    }

    /// Build from a `secrets.json` file, with environment variables taking
    /// precedence over values in the file.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let config = ApiConfiguration::from_secrets_file(path)?.merge(ApiConfiguration::from_env());
        Self::builder().configuration(config).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn aggregation(&self) -> Aggregation<'_> {
        Aggregation { client: self }
    }

    pub fn portfolios(&self) -> Portfolios<'_> {
        Portfolios { client: self }
    }

    pub fn transaction_portfolios(&self) -> TransactionPortfolios<'_> {
        TransactionPortfolios { client: self }
    }

    pub fn portfolio_groups(&self) -> PortfolioGroups<'_> {
        PortfolioGroups { client: self }
    }

    pub fn property_definitions(&self) -> PropertyDefinitions<'_> {
        PropertyDefinitions { client: self }
    }

    pub fn corporate_actions(&self) -> CorporateActions<'_> {
        CorporateActions { client: self }
    }

    pub fn instruments(&self) -> Instruments<'_> {
        Instruments { client: self }
    }

    pub fn quotes(&self) -> Quotes<'_> {
        Quotes { client: self }
    }

    pub fn scopes(&self) -> Scopes<'_> {
        Scopes { client: self }
    }

    pub fn metadata(&self) -> Metadata<'_> {
        Metadata { client: self }
    }

    /// The underlying HTTP client, for endpoints without a typed wrapper.
    pub fn http(&self) -> &LusidHttp {
        &self.http
    }

    pub fn api_url(&self) -> &str {
        self.http.api_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

/// Builder for [`LusidClient`]. Explicit setters win over values from
/// [`configuration`](Self::configuration).
#[derive(Debug, Default)]
pub struct LusidClientBuilder {
    api_url: Option<String>,
    access_token: Option<String>,
    configuration: Option<ApiConfiguration>,
    application_name: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl LusidClientBuilder {
    /// API root including the `/api` suffix, e.g. `https://acme.lusid.com/api`.
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = Some(url.to_string());
        self
    }

    /// Use a pre-issued bearer token instead of the OAuth flow.
    pub fn access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    pub fn configuration(mut self, configuration: ApiConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Sent as `X-LUSID-Application` on every request.
    pub fn application_name(mut self, name: &str) -> Self {
        self.application_name = Some(name.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retry behaviour for idempotent calls.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn build(self) -> Result<LusidClient, SdkError> {
        let explicit = ApiConfiguration {
            api_url: self.api_url,
            access_token: self.access_token,
            application_name: self.application_name,
            ..Default::default()
        };
        let config = self.configuration.unwrap_or_default().merge(explicit);
        config.validate()?;

        let api_url = config.api_url.clone().ok_or(ConfigError::Missing("apiUrl"))?;
        let mut options = HttpOptions {
            application_name: config.application_name.clone(),
            ..HttpOptions::default()
        };
        if let Some(timeout) = self.timeout {
            options.timeout = timeout;
        }
        let client = LusidHttp::build_client(&options)?;

        // A static token wins over OAuth credentials when both are present.
        let tokens = match &config.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => {
                let credentials = OAuthCredentials::try_from(&config)?;
                TokenSource::OAuth(OAuthTokenSource::new(credentials, client.clone()))
            }
        };
        tracing::debug!(
            api_url = %api_url,
            oauth = matches!(tokens, TokenSource::OAuth(_)),
            "building LUSID client"
        );

        let mut http = LusidHttp::with_client(&api_url, tokens, client);
        if let Some(retry) = self.retry {
            http = http.with_idempotent_retry(retry);
        }
        Ok(LusidClient { http })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_static_token() {
        let client = LusidClient::builder()
            .api_url("https://acme.lusid.com/api/")
            .access_token("tok")
            .build()
            .unwrap();
        assert_eq!(client.api_url(), "https://acme.lusid.com/api");
        assert!(matches!(client.http().tokens(), TokenSource::Static(t) if t == "tok"));
    }

    #[test]
    fn test_build_with_oauth_configuration() {
        let config = ApiConfiguration {
            token_url: Some("https://id.example/oauth2/token".into()),
            username: Some("user".into()),
            password: Some("pw".into()),
            client_id: Some("cid".into()),
            client_secret: Some("secret".into()),
            api_url: Some("https://acme.lusid.com/api".into()),
            ..Default::default()
        };
        let client = LusidClient::builder().configuration(config).build().unwrap();
        assert!(matches!(client.http().tokens(), TokenSource::OAuth(_)));
    }

    #[test]
    fn test_explicit_setters_override_configuration() {
        let config = ApiConfiguration {
            api_url: Some("https://old.lusid.com/api".into()),
            access_token: Some("old".into()),
            ..Default::default()
        };
        let client = LusidClient::builder()
            .configuration(config)
            .api_url("https://new.lusid.com/api")
            .build()
            .unwrap();
        assert_eq!(client.api_url(), "https://new.lusid.com/api");
        assert!(matches!(client.http().tokens(), TokenSource::Static(t) if t == "old"));
    }

    #[test]
    fn test_build_without_api_url_fails() {
        let err = LusidClient::builder().access_token("tok").build().unwrap_err();
        assert!(matches!(err, SdkError::Config(ConfigError::Missing("apiUrl"))));
    }

    #[test]
    fn test_build_with_partial_oauth_fails() {
        let config = ApiConfiguration {
            api_url: Some("https://acme.lusid.com/api".into()),
            token_url: Some("https://id.example/oauth2/token".into()),
            ..Default::default()
        };
        let err = LusidClient::builder().configuration(config).build().unwrap_err();
        assert!(matches!(err, SdkError::Config(ConfigError::Missing(_))));
    }
}
