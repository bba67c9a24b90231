//! Client-side checks for the constraints the API declares on path
//! parameters and request bodies. Failing fast here saves a round trip
//! and gives a clearer error than the server's 400.

use thiserror::Error;

pub const MAX_CODE_LENGTH: usize = 64;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 512;
pub const MAX_PAGE_LIMIT: u32 = 5000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is {len} characters long, the maximum is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} '{value}' may only contain letters, digits, '-' and '_'")]
    InvalidCharacters { field: &'static str, value: String },

    #[error("limit must be between 1 and 5000, got {0}")]
    LimitOutOfRange(u32),

    #[error("malformed property key '{0}', expected domain/scope/code")]
    MalformedPropertyKey(String),

    #[error("unknown property domain '{0}'")]
    UnknownDomain(String),

    #[error("{0}")]
    Invalid(String),
}

/// A scope or code path parameter: 1..=64 chars of `[A-Za-z0-9_-]`.
pub fn code(field: &'static str, value: &str) -> Result<(), ValidationError> {
    not_empty(field, value)?;
    max_len(field, value, MAX_CODE_LENGTH)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a scope/code pair in one call.
pub fn scope_and_code(scope: &str, code_value: &str) -> Result<(), ValidationError> {
    code("scope", scope)?;
    code("code", code_value)
}

pub fn display_name(value: &str) -> Result<(), ValidationError> {
    not_empty("displayName", value)?;
    max_len("displayName", value, MAX_DISPLAY_NAME_LENGTH)
}

pub fn not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

pub fn limit(limit: Option<u32>) -> Result<(), ValidationError> {
    match limit {
        Some(l) if l == 0 || l > MAX_PAGE_LIMIT => Err(ValidationError::LimitOutOfRange(l)),
        _ => Ok(()),
    }
}
