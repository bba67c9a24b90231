//! Corporate actions: splits, mergers and similar events recorded against a
//! corporate action source and applied to portfolios that reference it.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, ErrorDetail, Link, ValidationError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One leg of a transition: how many units and how much cost of an
/// instrument result per input unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionTransitionComponent {
    pub instrument_uid: String,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub instrument_identifiers: HashMap<String, String>,
    pub units_factor: Decimal,
    pub cost_factor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionTransition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_transition: Option<CorporateActionTransitionComponent>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub output_transitions: Vec<CorporateActionTransitionComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateAction {
    pub corporate_action_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ex_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub transitions: Vec<CorporateActionTransition>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionTransitionComponentRequest {
    pub instrument_identifiers: HashMap<String, String>,
    pub units_factor: Decimal,
    pub cost_factor: Decimal,
}

impl CorporateActionTransitionComponentRequest {
    pub fn new(
        identifier_type: impl Into<String>,
        identifier: impl Into<String>,
        units_factor: Decimal,
        cost_factor: Decimal,
    ) -> Self {
        let mut instrument_identifiers = HashMap::new();
        instrument_identifiers.insert(identifier_type.into(), identifier.into());
        Self {
            instrument_identifiers,
            units_factor,
            cost_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionTransitionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_transition: Option<CorporateActionTransitionComponentRequest>,
    pub output_transitions: Vec<CorporateActionTransitionComponentRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCorporateActionRequest {
    pub corporate_action_code: String,
    pub announcement_date: DateTime<Utc>,
    pub ex_date: DateTime<Utc>,
    pub record_date: DateTime<Utc>,
    pub payment_date: DateTime<Utc>,
    pub transitions: Vec<CorporateActionTransitionRequest>,
}

impl UpsertCorporateActionRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::code("corporateActionCode", &self.corporate_action_code)?;
        for transition in &self.transitions {
            let components = transition
                .input_transition
                .iter()
                .chain(&transition.output_transitions);
            for component in components {
                if component.instrument_identifiers.is_empty() {
                    return Err(ValidationError::Empty {
                        field: "instrumentIdentifiers",
                    });
                }
            }
        }
        Ok(())
    }
}

/// Result of a batch upsert. Actions are keyed by corporate action code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCorporateActionsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, CorporateAction>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub failed: HashMap<String, ErrorDetail>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

impl UpsertCorporateActionsResponse {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
