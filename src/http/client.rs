//! Low-level HTTP client — `LusidHttp`.
//!
//! Verb helpers that take an API path, a query and an optional JSON body,
//! attach the bearer token and SDK headers, apply the retry policy and decode
//! the response. Sub-clients in `domain/<area>/client.rs` build on this.

use crate::auth::client::TokenSource;
use crate::error::{HttpError, LusidProblemDetails, SdkError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::network::{
    APPLICATION_HEADER, DEFAULT_TIMEOUT_SECS, REQUEST_ID_HEADER, SDK_LANGUAGE,
    SDK_LANGUAGE_HEADER, SDK_VERSION, SDK_VERSION_HEADER,
};
use crate::shared::Query;

use chrono::{DateTime, Utc};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Transport options for [`LusidHttp`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub application_name: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            application_name: None,
        }
    }
}

/// Low-level HTTP client for the LUSID REST API.
#[derive(Debug, Clone)]
pub struct LusidHttp {
    api_url: String,
    client: Client,
    tokens: TokenSource,
    /// Config applied for [`RetryPolicy::Idempotent`].
    idempotent_retry: RetryConfig,
}

impl LusidHttp {
    pub fn new(api_url: &str, tokens: TokenSource, options: HttpOptions) -> Result<Self, HttpError> {
        let client = Self::build_client(&options)?;
        Ok(Self::with_client(api_url, tokens, client))
    }

    /// Use an already-configured `reqwest` client, e.g. one shared with the
    /// token source.
    pub fn with_client(api_url: &str, tokens: TokenSource, client: Client) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
            tokens,
            idempotent_retry: RetryConfig::idempotent(),
        }
    }

    /// Override the config behind [`RetryPolicy::Idempotent`].
    pub fn with_idempotent_retry(mut self, config: RetryConfig) -> Self {
        self.idempotent_retry = config;
        self
    }

    pub fn build_client(options: &HttpOptions) -> Result<Client, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(SDK_LANGUAGE_HEADER, HeaderValue::from_static(SDK_LANGUAGE));
        headers.insert(SDK_VERSION_HEADER, HeaderValue::from_static(SDK_VERSION));
        if let Some(app) = &options.application_name {
            let value = HeaderValue::from_str(app).map_err(|e| {
                HttpError::InvalidUrl(format!("Invalid application name '{}': {}", app, e))
            })?;
            headers.insert(APPLICATION_HEADER, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(options.timeout).pool_max_idle_per_host(10);
        }
        Ok(builder.build()?)
    }

    /// Base API URL without a trailing slash, e.g. `https://x.lusid.com/api`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn tokens(&self) -> &TokenSource {
        &self.tokens
    }

    /// Full URL for an API path plus query. Paths are relative to the API
    /// root, e.g. `/portfolios/{scope}`.
    pub fn url(&self, path: &str, query: &Query) -> String {
        if query.is_empty() {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}{}?{}", self.api_url, path, query.encode())
        }
    }

    // ── Verb helpers ─────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        self.request_with_retry(Method::GET, path, query, None::<&()>, retry)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Query,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        self.request_with_retry(Method::POST, path, query, Some(body), retry)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Query,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        self.request_with_retry(Method::PUT, path, query, Some(body), retry)
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Query,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        self.request_with_retry(Method::PATCH, path, query, Some(body), retry)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        self.request_with_retry(Method::DELETE, path, query, None::<&()>, retry)
            .await
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn request_with_retry<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        let url = self.url(path, query);
        let config = match &retry {
            RetryPolicy::None => RetryConfig::idempotent().with_max_retries(0),
            RetryPolicy::Idempotent => self.idempotent_retry.clone(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;
        // A rejected OAuth token gets one immediate retry with a fresh token,
        // regardless of policy: the request never reached the handler.
        let mut reauthenticated = false;
        let mut attempt = 0;

        while attempt <= config.max_retries {
            match self.do_request::<T, B>(&method, &url, body).await {
                Ok(resp) => return Ok(resp),
                Err(SdkError::Http(HttpError::Unauthorized))
                    if !reauthenticated && matches!(self.tokens, TokenSource::OAuth(_)) =>
                {
                    tracing::debug!("Token rejected, re-authenticating for {}", url);
                    self.tokens.invalidate().await;
                    reauthenticated = true;
                }
                Err(SdkError::Http(e)) => {
                    let mut delay = config.delay_for_attempt(attempt);
                    let should_retry = match &e {
                        HttpError::Api { status, .. } | HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            // The server's hint never stretches a wait past `max_delay`.
                            if let Some(ms) = retry_after_ms {
                                let hinted = Duration::from_millis(*ms).min(config.max_delay);
                                delay = delay.max(hinted);
                            }
                            config.retryable_statuses.contains(&429)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if !should_retry || config.max_retries == 0 {
                        return Err(e.into());
                    }
                    if attempt == config.max_retries {
                        last_error = Some(e);
                        break;
                    }

                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying {} {}",
                        method,
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                    attempt += 1;
                }
                Err(other) => return Err(other),
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }
        .into())
    }

    async fn do_request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, SdkError> {
        let token = self.tokens.bearer().await?;
        let mut req = self
            .client
            .request(method.clone(), url)
            .bearer_auth(token);

        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(method = %method, url = %url, "Sending request");
        let resp = req.send().await.map_err(HttpError::from)?;
        let status = resp.status();

        if status.is_success() {
            let text = resp.text().await.map_err(HttpError::from)?;
            // Empty bodies (204, some DELETEs) decode as JSON null so callers
            // can ask for `()` or `serde_json::Value`.
            let json = if text.trim().is_empty() { "null" } else { text.as_str() };
            return Ok(serde_json::from_str(json).map_err(HttpError::from)?);
        }

        Err(Self::error_from_response(resp).await.into())
    }

    async fn error_from_response(resp: Response) -> HttpError {
        let status_code = resp.status().as_u16();
        let request_id = header_str(resp.headers(), REQUEST_ID_HEADER);
        let retry_after_ms = header_str(resp.headers(), RETRY_AFTER.as_str())
            .and_then(|v| parse_retry_after(&v, Utc::now()));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => return HttpError::Unauthorized,
            429 => return HttpError::RateLimited { retry_after_ms },
            _ => {}
        }

        if let Some(problem) = LusidProblemDetails::from_body(&body_text) {
            return HttpError::Api {
                status: status_code,
                problem: Box::new(problem),
                request_id,
            };
        }

        if status_code >= 500 && !body_text.is_empty() {
            tracing::warn!(
                status = status_code,
                request_id = request_id.as_deref().unwrap_or("-"),
                "Server error body is not problem details"
            );
        }

        match status_code {
            404 => HttpError::NotFound(body_text),
            409 => HttpError::Conflict(body_text),
            400..=499 => HttpError::BadRequest(body_text),
            _ => HttpError::ServerError {
                status: status_code,
                body: body_text,
            },
        }
    }
}

/// `Retry-After` in milliseconds. Accepts delta-seconds or an HTTP-date;
/// a date in the past means no wait.
fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<u64> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs.saturating_mul(1000));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?;
    let ms = (at.with_timezone(&Utc) - now).num_milliseconds();
    Some(ms.max(0) as u64)
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn http(url: &str) -> LusidHttp {
        LusidHttp::new(url, TokenSource::Static("t".into()), HttpOptions::default()).unwrap()
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let h = http("https://x.lusid.com/api/");
        assert_eq!(h.api_url(), "https://x.lusid.com/api");
        assert_eq!(
            h.url("/scopes", &Query::new()),
            "https://x.lusid.com/api/scopes"
        );
    }

    #[test]
    fn test_url_appends_query() {
        let h = http("https://x.lusid.com/api");
        let mut q = Query::new();
        q.push("limit", 5);
        assert_eq!(
            h.url("/portfolios", &q),
            "https://x.lusid.com/api/portfolios?limit=5"
        );
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let now = Utc::now();
        assert_eq!(parse_retry_after("3", now), Some(3000));
        assert_eq!(parse_retry_after(" 0 ", now), Some(0));
        assert_eq!(parse_retry_after("18446744073709551615", now), Some(u64::MAX));
        assert_eq!(parse_retry_after("soon", now), None);
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let now = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:28:05 GMT", now),
            Some(5000)
        );
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:27:00 GMT", now), Some(0));
    }

    #[test]
    fn test_invalid_application_name_rejected() {
        let opts = HttpOptions {
            application_name: Some("bad\nname".into()),
            ..Default::default()
        };
        assert!(LusidHttp::new("https://x", TokenSource::Static("t".into()), opts).is_err());
    }
}
