//! Property definitions, plus the property value types
//! attached to portfolios, instruments, transactions and holdings.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, Link, PropertyDomain, PropertyKey, ResourceId, ValidationError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Whether a property holds one value forever or one value per effective date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyLifeTime {
    Perpetual,
    TimeVariant,
    #[serde(other)]
    Unknown,
}

/// Label properties hold text, metric properties hold a number and a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Label,
    Metric,
    Information,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSchema {
    NoUnits,
    Basic,
    Iso4217Currency,
    #[serde(other)]
    Unknown,
}

/// Primitive type underlying a data type. Values this SDK does not know
/// decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    String,
    Int,
    Decimal,
    DateTime,
    Boolean,
    Map,
    List,
    PropertyArray,
    Percentage,
    Code,
    Id,
    Uri,
    CurrencyAndAmount,
    TradePrice,
    Currency,
    MetricValue,
    ResourceId,
    ResultValue,
    CutLocalTime,
    DateOrCutLabel,
    #[serde(other)]
    Unknown,
}

// ─── Property values ─────────────────────────────────────────────────────────

/// A numeric value with an optional unit (e.g. a currency code).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValue {
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// The value of a property: exactly one of `label_value` or `metric_value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<MetricValue>,
}

impl PropertyValue {
    pub fn label(value: impl Into<String>) -> Self {
        Self {
            label_value: Some(value.into()),
            metric_value: None,
        }
    }

    pub fn metric(value: Decimal, unit: Option<&str>) -> Self {
        Self {
            label_value: None,
            metric_value: Some(MetricValue {
                value,
                unit: unit.map(str::to_string),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.label_value, &self.metric_value) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(ValidationError::Invalid(
                "a property value must set exactly one of labelValue or metricValue".into(),
            )),
        }
    }
}

/// A property whose value does not vary over effective time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpetualProperty {
    pub key: PropertyKey,
    pub value: PropertyValue,
}

impl PerpetualProperty {
    pub fn new(key: PropertyKey, value: PropertyValue) -> Self {
        Self { key, value }
    }

    /// Check this property as the entry stored under `map_key` in a property bag.
    pub fn validate_as(&self, map_key: &PropertyKey) -> Result<(), ValidationError> {
        check_entry(map_key, &self.key, &self.value)
    }
}

/// A property value, effective from the given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub key: PropertyKey,
    pub value: PropertyValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<DateTime<Utc>>,
}

impl Property {
    pub fn new(key: PropertyKey, value: PropertyValue) -> Self {
        Self {
            key,
            value,
            effective_from: None,
        }
    }

    pub fn effective_from(mut self, at: DateTime<Utc>) -> Self {
        self.effective_from = Some(at);
        self
    }

    /// Check this property as the entry stored under `map_key` in a property bag.
    pub fn validate_as(&self, map_key: &PropertyKey) -> Result<(), ValidationError> {
        check_entry(map_key, &self.key, &self.value)
    }
}

fn check_entry(
    map_key: &PropertyKey,
    key: &PropertyKey,
    value: &PropertyValue,
) -> Result<(), ValidationError> {
    if map_key != key {
        return Err(ValidationError::Invalid(format!(
            "property stored under '{}' has key '{}'",
            map_key, key
        )));
    }
    value.validate()
}

// ─── Definitions ─────────────────────────────────────────────────────────────

/// A property definition as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub key: PropertyKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default)]
    pub value_required: bool,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_time: Option<PropertyLifeTime>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_schema: Option<UnitSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<PropertyDomain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDefinitionRequest {
    pub domain: PropertyDomain,
    pub scope: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_required: Option<bool>,
    pub display_name: String,
    /// Data type, e.g. `system/string` or `system/number`.
    pub data_type_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_time: Option<PropertyLifeTime>,
}

impl CreatePropertyDefinitionRequest {
    pub fn new(
        domain: PropertyDomain,
        scope: impl Into<String>,
        code: impl Into<String>,
        display_name: impl Into<String>,
        data_type_id: ResourceId,
    ) -> Self {
        Self {
            domain,
            scope: scope.into(),
            code: code.into(),
            value_required: None,
            display_name: display_name.into(),
            data_type_id,
            life_time: None,
        }
    }

    /// Key the created definition will have.
    pub fn key(&self) -> PropertyKey {
        PropertyKey::new(self.domain, self.scope.clone(), self.code.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::scope_and_code(&self.scope, &self.code)?;
        validation::display_name(&self.display_name)?;
        validation::scope_and_code(&self.data_type_id.scope, &self.data_type_id.code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyDefinitionRequest {
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_value_label_wire_shape() {
        let v = serde_json::to_value(PropertyValue::label("UK")).unwrap();
        assert_eq!(v, json!({"labelValue": "UK"}));
    }

    #[test]
    fn test_property_value_metric_wire_shape() {
        let v = serde_json::to_value(PropertyValue::metric(Decimal::new(125, 1), Some("GBP")))
            .unwrap();
        assert_eq!(v, json!({"metricValue": {"value": 12.5, "unit": "GBP"}}));
    }

    #[test]
    fn test_property_value_validate() {
        assert!(PropertyValue::label("x").validate().is_ok());
        assert!(PropertyValue::default().validate().is_err());
        let both = PropertyValue {
            label_value: Some("x".into()),
            metric_value: Some(MetricValue {
                value: Decimal::ONE,
                unit: None,
            }),
        };
        assert!(both.validate().is_err());
    }

    #[test]
    fn test_validate_as_checks_map_key() {
        let key: PropertyKey = "Portfolio/s/Manager".parse().unwrap();
        let other: PropertyKey = "Portfolio/s/Desk".parse().unwrap();
        let prop = Property::new(key.clone(), PropertyValue::label("J. Smith"));
        assert!(prop.validate_as(&key).is_ok());
        assert!(matches!(prop.validate_as(&other), Err(ValidationError::Invalid(_))));
    }

    #[test]
    fn test_definition_decodes_unknown_value_type() {
        let def: PropertyDefinition = serde_json::from_value(json!({
            "key": "Instrument/test/Sector",
            "valueType": "SomethingNew",
            "valueRequired": false,
            "displayName": "Sector",
            "dataTypeId": {"scope": "system", "code": "string"},
            "lifeTime": "Perpetual",
            "type": "Label",
            "unitSchema": "NoUnits",
            "domain": "Instrument",
            "scope": "test",
            "code": "Sector",
            "links": null
        }))
        .unwrap();
        assert_eq!(def.value_type, Some(ValueType::Unknown));
        assert_eq!(def.property_type, Some(PropertyType::Label));
        assert_eq!(def.key.to_string(), "Instrument/test/Sector");
        assert!(def.links.is_empty());
    }

    #[test]
    fn test_definition_decodes_unknown_enum_values() {
        let def: PropertyDefinition = serde_json::from_value(json!({
            "key": "Instrument/test/Sector",
            "valueType": "String",
            "displayName": "Sector",
            "lifeTime": "Eternal",
            "type": "Derived",
            "unitSchema": "SomethingNew",
            "domain": "Instrument",
            "scope": "test",
            "code": "Sector"
        }))
        .unwrap();
        assert_eq!(def.value_type, Some(ValueType::String));
        assert_eq!(def.life_time, Some(PropertyLifeTime::Unknown));
        assert_eq!(def.property_type, Some(PropertyType::Unknown));
        assert_eq!(def.unit_schema, Some(UnitSchema::Unknown));
    }

    #[test]
    fn test_create_request_validate() {
        let req = CreatePropertyDefinitionRequest::new(
            PropertyDomain::Portfolio,
            "finbourne",
            "Strategy",
            "Strategy",
            ResourceId::new("system", "string"),
        );
        assert!(req.validate().is_ok());
        assert_eq!(req.key().to_string(), "Portfolio/finbourne/Strategy");

        let bad = CreatePropertyDefinitionRequest {
            code: "has space".into(),
            ..req
        };
        assert!(bad.validate().is_err());
    }
}
