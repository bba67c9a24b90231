//! Instrument master: instrument definitions and their identifiers.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::property_definition::Property;
use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, ErrorDetail, Link, ResourceId, ValidationError, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Identifier type that addresses instruments by their LUSID id.
pub const LUSID_INSTRUMENT_ID: &str = "LusidInstrumentId";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentState {
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

/// An identifier value, optionally effective from a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentIdValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_at: Option<DateTime<Utc>>,
}

impl InstrumentIdValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            effective_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDefinition {
    pub name: String,
    /// Identifier type (e.g. `Figi`, `ClientInternal`) to value.
    pub identifiers: HashMap<String, InstrumentIdValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_through_portfolio_id: Option<ResourceId>,
    /// Economic definition of an OTC instrument. Its shape depends on the
    /// instrument type, so it is passed through untyped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Value>,
}

impl InstrumentDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifiers: HashMap::new(),
            properties: Vec::new(),
            look_through_portfolio_id: None,
            definition: None,
        }
    }

    pub fn with_identifier(mut self, id_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.identifiers
            .insert(id_type.into(), InstrumentIdValue::new(value));
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::not_empty("name", &self.name)?;
        if self.identifiers.is_empty() {
            return Err(ValidationError::Empty {
                field: "identifiers",
            });
        }
        for property in &self.properties {
            property.value.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub lusid_instrument_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub identifiers: HashMap<String, String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookthrough_portfolio: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_definition: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<InstrumentState>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

impl Instrument {
    pub fn identifier(&self, id_type: &str) -> Option<&str> {
        self.identifiers.get(id_type).map(String::as_str)
    }
}

/// Result of an upsert: instruments keyed by the caller's correlation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInstrumentsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, Instrument>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub failed: HashMap<String, ErrorDetail>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// Result of a batch get: instruments keyed by the requested identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInstrumentsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, Instrument>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub failed: HashMap<String, ErrorDetail>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}
