//! HTTP client layer — `LusidHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::{HttpOptions, LusidHttp};
pub use retry::{RetryConfig, RetryPolicy};
