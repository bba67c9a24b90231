//! Network constants: header names, environment variable names, defaults.

/// Header carrying the calling application's name.
pub const APPLICATION_HEADER: &str = "x-lusid-application";

/// Headers identifying the SDK to the server.
pub const SDK_LANGUAGE_HEADER: &str = "x-lusid-sdk-language";
pub const SDK_VERSION_HEADER: &str = "x-lusid-sdk-version";

pub const SDK_LANGUAGE: &str = "rust";
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response header with the server-side request id, quoted in support tickets.
pub const REQUEST_ID_HEADER: &str = "lusid-meta-requestid";

/// OAuth scopes requested for API tokens.
pub const TOKEN_SCOPE: &str = "openid client groups offline_access";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables read by `ApiConfiguration::from_env`.
pub mod env {
    pub const TOKEN_URL: &str = "FBN_TOKEN_URL";
    pub const USERNAME: &str = "FBN_USERNAME";
    pub const PASSWORD: &str = "FBN_PASSWORD";
    pub const CLIENT_ID: &str = "FBN_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "FBN_CLIENT_SECRET";
    pub const API_URL: &str = "FBN_LUSID_API_URL";
    pub const APP_NAME: &str = "FBN_APP_NAME";
    pub const ACCESS_TOKEN: &str = "FBN_ACCESS_TOKEN";
}
