//! Shared newtypes and envelopes used across all API areas.
//!
//! These types serialize identically to the JSON the LUSID API sends, so they
//! can be used directly inside request and response models.

#[cfg(feature = "http")]
pub mod paging;
pub mod query;
pub mod serde_util;
pub mod validation;

pub use query::Query;
pub use validation::ValidationError;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── ResourceId ──────────────────────────────────────────────────────────────

/// Identifies a scoped entity such as a portfolio or portfolio group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub scope: String,
    pub code: String,
}

impl ResourceId {
    pub fn new(scope: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.scope, self.code)
    }
}

// ─── PropertyDomain ──────────────────────────────────────────────────────────

/// The entity type a property definition attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyDomain {
    Trade,
    Portfolio,
    Security,
    Holding,
    ReferenceHolding,
    TransactionConfiguration,
    Instrument,
    CutLabelDefinition,
    Analytic,
    PortfolioGroup,
    Person,
    AccessMetadata,
    Order,
    UnitResult,
    MarketData,
    ConfigurationRecipe,
    Allocation,
    Calendar,
}

impl PropertyDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "Trade",
            Self::Portfolio => "Portfolio",
            Self::Security => "Security",
            Self::Holding => "Holding",
            Self::ReferenceHolding => "ReferenceHolding",
            Self::TransactionConfiguration => "TransactionConfiguration",
            Self::Instrument => "Instrument",
            Self::CutLabelDefinition => "CutLabelDefinition",
            Self::Analytic => "Analytic",
            Self::PortfolioGroup => "PortfolioGroup",
            Self::Person => "Person",
            Self::AccessMetadata => "AccessMetadata",
            Self::Order => "Order",
            Self::UnitResult => "UnitResult",
            Self::MarketData => "MarketData",
            Self::ConfigurationRecipe => "ConfigurationRecipe",
            Self::Allocation => "Allocation",
            Self::Calendar => "Calendar",
        }
    }
}

impl std::fmt::Display for PropertyDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropertyDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let domain = match s {
            "Trade" => Self::Trade,
            "Portfolio" => Self::Portfolio,
            "Security" => Self::Security,
            "Holding" => Self::Holding,
            "ReferenceHolding" => Self::ReferenceHolding,
            "TransactionConfiguration" => Self::TransactionConfiguration,
            "Instrument" => Self::Instrument,
            "CutLabelDefinition" => Self::CutLabelDefinition,
            "Analytic" => Self::Analytic,
            "PortfolioGroup" => Self::PortfolioGroup,
            "Person" => Self::Person,
            "AccessMetadata" => Self::AccessMetadata,
            "Order" => Self::Order,
            "UnitResult" => Self::UnitResult,
            "MarketData" => Self::MarketData,
            "ConfigurationRecipe" => Self::ConfigurationRecipe,
            "Allocation" => Self::Allocation,
            "Calendar" => Self::Calendar,
            other => return Err(ValidationError::UnknownDomain(other.to_string())),
        };
        Ok(domain)
    }
}

// ─── PropertyKey ─────────────────────────────────────────────────────────────

/// A three-part property key: `{domain}/{scope}/{code}`,
/// e.g. `Instrument/default/Name`.
///
/// Serializes transparently as its string form, so it can be used as a
/// `HashMap` key in property bags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub domain: PropertyDomain,
    pub scope: String,
    pub code: String,
}

impl PropertyKey {
    pub fn new(domain: PropertyDomain, scope: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            domain,
            scope: scope.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.domain, self.scope, self.code)
    }
}

impl FromStr for PropertyKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Codes may themselves contain '/', so only split off domain and scope.
        let mut parts = s.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(domain), Some(scope), Some(code)) if !scope.is_empty() && !code.is_empty() => {
                Ok(Self {
                    domain: domain.parse()?,
                    scope: scope.to_string(),
                    code: code.to_string(),
                })
            }
            _ => Err(ValidationError::MalformedPropertyKey(s.to_string())),
        }
    }
}

impl Serialize for PropertyKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Envelopes ───────────────────────────────────────────────────────────────

/// A hypermedia link attached to most responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub relation: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub method: String,
}

/// Bitemporal version stamp of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub effective_from: DateTime<Utc>,
    pub as_at_date: DateTime<Utc>,
}

/// Generic list envelope. `next_page` is an opaque continuation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListOf<T> {
    pub values: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_util::null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
}

/// List envelope stamped with the version the values were read at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedResourceListOf<T> {
    pub version: Version,
    pub values: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_util::null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// Response for write operations that only report the resulting version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub version: Version,
    #[serde(
        default,
        deserialize_with = "serde_util::null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// Response for delete operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEntityResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub as_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "serde_util::null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// Per-item failure reported by batch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// A monetary amount in a given currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAndAmount {
    pub amount: Decimal,
    pub currency: String,
}

impl CurrencyAndAmount {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// The user that issued a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

// ─── ListOptions ─────────────────────────────────────────────────────────────

/// Query parameters shared by list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub effective_at: Option<DateTime<Utc>>,
    pub as_at: Option<DateTime<Utc>>,
    /// Continuation token from a previous page's `next_page`.
    pub page: Option<String>,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub filter: Option<String>,
    pub sort_by: Vec<String>,
    pub property_keys: Vec<PropertyKey>,
}

impl ListOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_as_at(mut self, as_at: DateTime<Utc>) -> Self {
        self.as_at = Some(as_at);
        self
    }

    pub fn with_effective_at(mut self, effective_at: DateTime<Utc>) -> Self {
        self.effective_at = Some(effective_at);
        self
    }

    pub fn with_property_key(mut self, key: PropertyKey) -> Self {
        self.property_keys.push(key);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::limit(self.limit)
    }

    /// Append these options to a query string.
    pub fn apply(&self, query: &mut Query) {
        query
            .datetime_opt("effectiveAt", self.effective_at.as_ref())
            .datetime_opt("asAt", self.as_at.as_ref())
            .opt("page", self.page.as_deref())
            .opt("start", self.start)
            .opt("limit", self.limit)
            .opt("filter", self.filter.as_deref())
            .all("sortBy", &self.sort_by)
            .all("propertyKeys", &self.property_keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_key_parse_and_display() {
        let key: PropertyKey = "Instrument/default/Name".parse().unwrap();
        assert_eq!(key.domain, PropertyDomain::Instrument);
        assert_eq!(key.scope, "default");
        assert_eq!(key.code, "Name");
        assert_eq!(key.to_string(), "Instrument/default/Name");
    }

    #[test]
    fn test_property_key_code_may_contain_slash() {
        let key: PropertyKey = "Portfolio/ibor/Region/Sub".parse().unwrap();
        assert_eq!(key.scope, "ibor");
        assert_eq!(key.code, "Region/Sub");
    }

    #[test]
    fn test_property_key_rejects_malformed() {
        assert!(matches!(
            "Instrument/default".parse::<PropertyKey>(),
            Err(ValidationError::MalformedPropertyKey(_))
        ));
        assert!(matches!(
            "Widget/default/Name".parse::<PropertyKey>(),
            Err(ValidationError::UnknownDomain(d)) if d == "Widget"
        ));
    }

    #[test]
    fn test_property_key_serde_is_string() {
        let key = PropertyKey::new(PropertyDomain::Holding, "s", "c");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"Holding/s/c\"");
        let back: PropertyKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_resource_list_defaults_missing_fields() {
        let list: ResourceListOf<ResourceId> =
            serde_json::from_str(r#"{"values":[{"scope":"a","code":"b"}]}"#).unwrap();
        assert_eq!(list.values, vec![ResourceId::new("a", "b")]);
        assert!(list.next_page.is_none());
        assert!(list.links.is_empty());
    }

    #[test]
    fn test_list_options_apply_repeats_keys() {
        let opts = ListOptions::default()
            .with_limit(10)
            .with_property_key("Portfolio/s/A".parse().unwrap())
            .with_property_key("Portfolio/s/B".parse().unwrap());
        let mut q = Query::new();
        opts.apply(&mut q);
        assert_eq!(
            q.encode(),
            "limit=10&propertyKeys=Portfolio%2Fs%2FA&propertyKeys=Portfolio%2Fs%2FB"
        );
    }
}
