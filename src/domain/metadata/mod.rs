//! Service metadata: API versions and entity schemas.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util::null_as_default;
use crate::shared::Link;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub api_version: String,
    pub build_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_version: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Field names and types of an entity, e.g. `Portfolio` or `Transaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, SchemaField>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_schema_decode() {
        let schema: EntitySchema = serde_json::from_value(json!({
            "entity": "Portfolio",
            "values": {
                "displayName": {"type": "String", "description": "Display name"},
                "created": {"type": "DateTimeOffset"}
            }
        }))
        .unwrap();
        assert_eq!(schema.values.len(), 2);
        assert_eq!(schema.values["created"].data_type.as_deref(), Some("DateTimeOffset"));
        assert!(schema.links.is_empty());
    }
}
