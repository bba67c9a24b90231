//! Aggregation domain: compute metrics over holdings of a portfolio or a
//! portfolio group, grouped by arbitrary keys.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, Link, ResourceId, ValidationError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationOp {
    Sum,
    Proportion,
    Average,
    Count,
    Min,
    Max,
    Value,
}

/// One metric to compute, e.g. `Holding/default/PV` with `Sum`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSpec {
    pub key: String,
    pub op: AggregationOp,
}

impl AggregateSpec {
    pub fn new(key: impl Into<String>, op: AggregationOp) -> Self {
        Self {
            key: key.into(),
            op,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    In,
}

/// Whether the right-hand side of a filter is a literal or another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandType {
    Absolute,
    Property,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    pub left: String,
    pub operator: FilterOperator,
    pub right: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_operand_type: Option<OperandType>,
}

impl PropertyFilter {
    pub fn new(left: impl Into<String>, operator: FilterOperator, right: impl Into<Value>) -> Self {
        Self {
            left: left.into(),
            operator,
            right: right.into(),
            right_operand_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBySpec {
    pub key: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationRequest {
    /// Configuration recipe to price with. The server default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_at: Option<DateTime<Utc>>,
    pub effective_at: DateTime<Utc>,
    pub metrics: Vec<AggregateSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<PropertyFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<OrderBySpec>,
}

impl AggregationRequest {
    pub fn new(effective_at: DateTime<Utc>) -> Self {
        Self {
            recipe_id: None,
            as_at: None,
            effective_at,
            metrics: Vec::new(),
            group_by: Vec::new(),
            filters: Vec::new(),
            limit: None,
            sort: Vec::new(),
        }
    }

    pub fn metric(mut self, key: impl Into<String>, op: AggregationOp) -> Self {
        self.metrics.push(AggregateSpec::new(key, op));
        self
    }

    pub fn group_by(mut self, key: impl Into<String>) -> Self {
        self.group_by.push(key.into());
        self
    }

    pub fn filter(mut self, filter: PropertyFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn recipe(mut self, recipe_id: ResourceId) -> Self {
        self.recipe_id = Some(recipe_id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.metrics.is_empty() {
            return Err(ValidationError::Empty { field: "metrics" });
        }
        for spec in &self.metrics {
            validation::not_empty("metrics.key", &spec.key)?;
        }
        for key in &self.group_by {
            validation::not_empty("groupBy", key)?;
        }
        validation::limit(self.limit)
    }
}

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Types of the columns in an aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDataSchema {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub property_schema: HashMap<String, FieldSchema>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAggregationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_effective_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_as_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// One map per result row, keyed by metric or group-by key.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub data: Vec<HashMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_schema: Option<ResultDataSchema>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

impl ListAggregationResponse {
    pub fn rows(&self) -> impl Iterator<Item = AggregationRow<'_>> {
        self.data.iter().map(|values| AggregationRow { values })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Declared type of a column, if the server sent a schema.
    pub fn column_type(&self, key: &str) -> Option<&str> {
        self.data_schema
            .as_ref()?
            .property_schema
            .get(key)?
            .data_type
            .as_deref()
    }
}

/// Typed view of one aggregation result row.
#[derive(Debug, Clone, Copy)]
pub struct AggregationRow<'a> {
    values: &'a HashMap<String, Value>,
}

impl<'a> AggregationRow<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.values.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key)?.as_str()
    }

    /// Numeric cell as a decimal. Numbers sent as strings are accepted too.
    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        let text = match self.get(key)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => return None,
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.get(key), None | Some(Value::Null))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let at = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let req = AggregationRequest::new(at)
            .metric("Holding/default/PV", AggregationOp::Sum)
            .group_by("Instrument/default/Name")
            .filter(PropertyFilter::new(
                "Instrument/default/Name",
                FilterOperator::NotEquals,
                "CASH",
            ));
        assert!(req.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "effectiveAt": "2019-01-01T00:00:00Z",
                "metrics": [{"key": "Holding/default/PV", "op": "Sum"}],
                "groupBy": ["Instrument/default/Name"],
                "filters": [{
                    "left": "Instrument/default/Name",
                    "operator": "NotEquals",
                    "right": "CASH"
                }]
            })
        );
    }

    #[test]
    fn test_request_requires_metrics() {
        let at = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            AggregationRequest::new(at).validate(),
            Err(ValidationError::Empty { field: "metrics" })
        );
    }

    #[test]
    fn test_rows_typed_access() {
        let resp: ListAggregationResponse = serde_json::from_value(json!({
            "data": [
                {"Instrument/default/Name": "VOD", "Sum(Holding/default/PV)": 1250.5},
                {"Instrument/default/Name": "BP", "Sum(Holding/default/PV)": "99.25"},
                {"Instrument/default/Name": "CASH", "Sum(Holding/default/PV)": null}
            ],
            "aggregationCurrency": "GBP",
            "dataSchema": {
                "propertySchema": {
                    "Sum(Holding/default/PV)": {"type": "Decimal", "displayName": "PV"}
                }
            }
        }))
        .unwrap();

        assert_eq!(resp.len(), 3);
        assert_eq!(resp.column_type("Sum(Holding/default/PV)"), Some("Decimal"));
        let rows: Vec<_> = resp.rows().collect();
        assert_eq!(rows[0].str("Instrument/default/Name"), Some("VOD"));
        assert_eq!(
            rows[0].decimal("Sum(Holding/default/PV)"),
            Some(Decimal::new(12505, 1))
        );
        assert_eq!(
            rows[1].decimal("Sum(Holding/default/PV)"),
            Some(Decimal::new(9925, 2))
        );
        assert!(rows[2].is_null("Sum(Holding/default/PV)"));
        assert_eq!(rows[2].decimal("Sum(Holding/default/PV)"), None);
    }

    #[test]
    fn test_response_null_data() {
        let resp: ListAggregationResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(resp.is_empty());
        assert_eq!(resp.column_type("x"), None);
    }
}
