//! Portfolio groups: named collections of portfolios and nested groups.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::property_definition::Property;
use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, Link, PropertyKey, ResourceId, ValidationError, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub id: ResourceId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub portfolios: Vec<ResourceId>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_groups: Vec<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

impl PortfolioGroup {
    pub fn contains_portfolio(&self, id: &ResourceId) -> bool {
        self.portfolios.contains(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioGroupRequest {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ResourceId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<ResourceId>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<PropertyKey, Property>,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePortfolioGroupRequest {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            created: None,
            values: Vec::new(),
            sub_groups: Vec::new(),
            properties: HashMap::new(),
            display_name: display_name.into(),
            description: None,
        }
    }

    pub fn with_portfolio(mut self, id: ResourceId) -> Self {
        self.values.push(id);
        self
    }

    pub fn with_sub_group(mut self, id: ResourceId) -> Self {
        self.sub_groups.push(id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::code("code", &self.code)?;
        validation::display_name(&self.display_name)?;
        for id in self.values.iter().chain(&self.sub_groups) {
            validation::scope_and_code(&id.scope, &id.code)?;
        }
        for (key, property) in &self.properties {
            property.validate_as(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_wire_shape() {
        let req = CreatePortfolioGroupRequest::new("Growth", "Growth funds")
            .with_portfolio(ResourceId::new("finbourne", "UK-Equity"));
        assert!(req.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "code": "Growth",
                "values": [{"scope": "finbourne", "code": "UK-Equity"}],
                "displayName": "Growth funds"
            })
        );
    }

    #[test]
    fn test_create_request_rejects_bad_member() {
        let req = CreatePortfolioGroupRequest::new("Growth", "Growth funds")
            .with_sub_group(ResourceId::new("finbourne", "has space"));
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn test_group_decode_null_members() {
        let g: PortfolioGroup = serde_json::from_value(json!({
            "id": {"scope": "finbourne", "code": "Growth"},
            "displayName": "Growth funds",
            "portfolios": [{"scope": "finbourne", "code": "UK-Equity"}],
            "subGroups": null
        }))
        .unwrap();
        assert!(g.contains_portfolio(&ResourceId::new("finbourne", "UK-Equity")));
        assert!(g.sub_groups.is_empty());
    }
}
