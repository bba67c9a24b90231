//! Unified SDK error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::shared::serde_util::null_as_default;
use crate::shared::ValidationError;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// The LUSID problem-details body, if the server sent one.
    pub fn problem(&self) -> Option<&LusidProblemDetails> {
        match self {
            SdkError::Http(e) => e.problem(),
            _ => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("API error {status}: {problem}")]
    Api {
        status: u16,
        problem: Box<LusidProblemDetails>,
        request_id: Option<String>,
    },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api { status, .. } | HttpError::ServerError { status, .. } => Some(*status),
            HttpError::RateLimited { .. } => Some(429),
            HttpError::Unauthorized => Some(401),
            HttpError::NotFound(_) => Some(404),
            HttpError::BadRequest(_) => Some(400),
            HttpError::Conflict(_) => Some(409),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn problem(&self) -> Option<&LusidProblemDetails> {
        match self {
            HttpError::Api { problem, .. } => Some(problem.as_ref()),
            _ => None,
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Token request failed ({status}): {body}")]
    TokenRequestFailed { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("Token endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
}

// ─── Problem details ─────────────────────────────────────────────────────────

/// Error body returned by the API for failed requests (RFC 7807 style).
///
/// Validation failures arrive with the same shape and a populated `errors`
/// map of field name to messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LusidProblemDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_details: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(rename = "type", default)]
    pub problem_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub errors: HashMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub extensions: HashMap<String, serde_json::Value>,
}

impl LusidProblemDetails {
    /// Best human-readable summary: `title: detail`, falling back to `name`.
    pub fn message(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(t), Some(d)) => format!("{}: {}", t, d),
            (Some(t), None) => t.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => self
                .name
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }

    /// Parse a response body, accepting only bodies that look like problem
    /// details (at least one of `name`, `title`, `type`, `code`).
    pub fn from_body(body: &str) -> Option<Self> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        if parsed.name.is_none()
            && parsed.title.is_none()
            && parsed.problem_type.is_none()
            && parsed.code.is_none()
        {
            return None;
        }
        Some(parsed)
    }
}

impl std::fmt::Display for LusidProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())?;
        if let Some(code) = self.code {
            write!(f, " (code {})", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_parse() {
        let body = r#"{
            "name": "PortfolioNotFound",
            "errorDetails": [],
            "code": 109,
            "type": "https://docs.lusid.com/#section/Error-Codes/109",
            "title": "Could not find a portfolio with id 'a/b'",
            "status": 404,
            "detail": "One or more of the requested portfolios could not be found",
            "instance": "https://api.lusid.com/app/insights/logs/0HL-1"
        }"#;
        let p = LusidProblemDetails::from_body(body).unwrap();
        assert_eq!(p.code, Some(109));
        assert_eq!(p.status, Some(404));
        assert_eq!(p.name.as_deref(), Some("PortfolioNotFound"));
        assert_eq!(
            p.to_string(),
            "Could not find a portfolio with id 'a/b': One or more of the requested portfolios could not be found (code 109)"
        );
    }

    #[test]
    fn test_validation_problem_errors_map() {
        let body = r#"{"name":"ValidationError","code":107,"errors":{"code":["too long"]}}"#;
        let p = LusidProblemDetails::from_body(body).unwrap();
        assert_eq!(p.errors["code"], vec!["too long".to_string()]);
        assert_eq!(p.message(), "ValidationError");
    }

    #[test]
    fn test_non_problem_body_rejected() {
        assert!(LusidProblemDetails::from_body("{}").is_none());
        assert!(LusidProblemDetails::from_body("<html>").is_none());
        assert!(LusidProblemDetails::from_body(r#"{"values":[]}"#).is_none());
    }

    #[test]
    fn test_status_accessors() {
        let e = SdkError::from(HttpError::Api {
            status: 409,
            problem: Box::new(LusidProblemDetails::default()),
            request_id: None,
        });
        assert_eq!(e.status(), Some(409));
        assert!(e.problem().is_some());
        let e = SdkError::from(HttpError::Unauthorized);
        assert_eq!(e.status(), Some(401));
        assert!(e.problem().is_none());
    }
}
