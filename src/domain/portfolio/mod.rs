//! Portfolio records, properties and command history.
//!
//! Transaction-specific operations (trades, holdings, details) live in
//! [`crate::domain::transaction_portfolio`].

#[cfg(feature = "http")]
pub mod client;

use crate::domain::property_definition::Property;
use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, Link, PropertyKey, ResourceId, User, ValidationError, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortfolioType {
    Transaction,
    Reference,
    DerivedTransaction,
    SimplePosition,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub portfolio_type: PortfolioType,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_portfolio_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(default)]
    pub is_derived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub properties: HashMap<PropertyKey, Property>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

impl Portfolio {
    pub fn property(&self, key: &PropertyKey) -> Option<&Property> {
        self.properties.get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioRequest {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdatePortfolioRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::display_name(&self.display_name)?;
        if let Some(d) = &self.description {
            validation::max_len("description", d, 1024)?;
        }
        Ok(())
    }
}

/// Properties attached to a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_portfolio_id: Option<ResourceId>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub properties: HashMap<PropertyKey, Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// A command the server processed against a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedCommand {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub user_id: User,
    pub processed_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property_definition::PropertyValue;
    use serde_json::json;

    #[test]
    fn test_portfolio_decode() {
        let p: Portfolio = serde_json::from_value(json!({
            "href": "https://x.lusid.com/api/api/portfolios/finbourne/UK-Equity",
            "id": {"scope": "finbourne", "code": "UK-Equity"},
            "type": "Transaction",
            "displayName": "UK Equity",
            "created": "2018-01-01T00:00:00.0000000+00:00",
            "version": {
                "effectiveFrom": "2018-01-01T00:00:00.0000000+00:00",
                "asAtDate": "2019-02-11T09:15:20.1234560+00:00"
            },
            "isDerived": false,
            "baseCurrency": "GBP",
            "properties": {
                "Portfolio/finbourne/Manager": {
                    "key": "Portfolio/finbourne/Manager",
                    "value": {"labelValue": "J. Smith"}
                }
            },
            "links": []
        }))
        .unwrap();

        assert_eq!(p.id, ResourceId::new("finbourne", "UK-Equity"));
        assert_eq!(p.portfolio_type, PortfolioType::Transaction);
        assert_eq!(p.base_currency.as_deref(), Some("GBP"));
        let key: PropertyKey = "Portfolio/finbourne/Manager".parse().unwrap();
        assert_eq!(
            p.property(&key).map(|prop| &prop.value),
            Some(&PropertyValue::label("J. Smith"))
        );
    }

    #[test]
    fn test_portfolio_null_properties() {
        let p: Portfolio = serde_json::from_value(json!({
            "id": {"scope": "s", "code": "c"},
            "type": "Reference",
            "displayName": "Ref",
            "created": "2018-01-01T00:00:00Z",
            "properties": null
        }))
        .unwrap();
        assert!(p.properties.is_empty());
        assert_eq!(p.portfolio_type, PortfolioType::Reference);
    }

    #[test]
    fn test_update_request_validate() {
        let ok = UpdatePortfolioRequest {
            display_name: "New name".into(),
            description: None,
        };
        assert!(ok.validate().is_ok());
        let bad = UpdatePortfolioRequest {
            display_name: "".into(),
            description: None,
        };
        assert!(bad.validate().is_err());
    }
}
