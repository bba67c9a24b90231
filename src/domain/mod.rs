//! API areas organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — request and response models, with client-side validation
//! - `client.rs` — sub-client with one method per endpoint

pub mod aggregation;
pub mod corporate_action;
pub mod instrument;
pub mod metadata;
pub mod portfolio;
pub mod portfolio_group;
pub mod property_definition;
pub mod quote;
pub mod scope;
pub mod transaction_portfolio;
