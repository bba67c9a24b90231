//! # LUSID SDK
//!
//! A Rust SDK for the LUSID portfolio management and financial data API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared types, request/response models, validation (always available)
//! 2. **Config & Auth** — `secrets.json` / `FBN_*` configuration, static or OAuth bearer tokens
//! 3. **HTTP API** — `LusidHttp` with per-endpoint retry policies
//! 4. **High-Level Client** — `LusidClient` with one sub-client per API area
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lusid_sdk::prelude::*;
//!
//! let client = LusidClient::from_secrets_file("secrets.json")?;
//!
//! let portfolio = client.portfolios().get("finbourne", "UK-Equity", None, None).await?;
//! let holdings = client
//!     .transaction_portfolios()
//!     .get_holdings("finbourne", "UK-Equity", &HoldingsQuery::default())
//!     .await?;
//! let summary = HoldingsSummary::from_holdings(&holdings.values);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, envelopes, query building and validation.
pub mod shared;

/// API areas (vertical slices): models and sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Header names, environment variable names and defaults.
pub mod network;

// ── Layer 2: Config & Auth ───────────────────────────────────────────────────

/// API configuration from `secrets.json` and environment variables.
pub mod config;

/// Bearer tokens: static tokens and the OAuth password grant.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `LusidClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types
    pub use crate::shared::{
        CurrencyAndAmount, DeletedEntityResponse, ListOptions, PropertyDomain, PropertyKey,
        ResourceId, ResourceListOf, Version, VersionedResourceListOf, VersionedResponse,
    };

    // Aggregation
    pub use crate::domain::aggregation::{
        AggregateSpec, AggregationOp, AggregationRequest, FilterOperator, ListAggregationResponse,
        PropertyFilter,
    };

    // Portfolios and groups
    pub use crate::domain::portfolio::{Portfolio, PortfolioType, UpdatePortfolioRequest};
    pub use crate::domain::portfolio_group::{CreatePortfolioGroupRequest, PortfolioGroup};

    // Transactions and holdings
    pub use crate::domain::transaction_portfolio::{
        AdjustHoldingRequest, CreateTransactionPortfolioRequest, HoldingsQuery, HoldingsSummary,
        PortfolioHolding, TargetTaxLotRequest, Transaction, TransactionPrice, TransactionQuery,
        TransactionRequest,
    };

    // Properties
    pub use crate::domain::property_definition::{
        CreatePropertyDefinitionRequest, PerpetualProperty, Property, PropertyDefinition,
        PropertyValue,
    };

    // Reference and market data
    pub use crate::domain::corporate_action::{CorporateAction, UpsertCorporateActionRequest};
    pub use crate::domain::instrument::{Instrument, InstrumentDefinition};
    pub use crate::domain::quote::{QuoteId, QuoteSeriesId, UpsertQuoteRequest};

    // Errors
    pub use crate::error::{HttpError, LusidProblemDetails, SdkError};

    // Config
    pub use crate::config::ApiConfiguration;

    // HTTP client + builder
    #[cfg(feature = "http")]
    pub use crate::client::{LusidClient, LusidClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
