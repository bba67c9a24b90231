//! Quotes: market prices and rates stored per scope, addressed by quote
//! series and effective date.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::property_definition::MetricValue;
use crate::shared::serde_util::null_as_default;
use crate::shared::{validation, ErrorDetail, Link, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteType {
    Price,
    Spread,
    Rate,
    LogNormalVol,
    NormalVol,
    ParSpread,
    IsdaSpread,
    Upfront,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteInstrumentIdType {
    LusidInstrumentId,
    Figi,
    RIC,
    QuotePermId,
    Isin,
    CurrencyPair,
    ClientInternal,
    Sedol,
    Cusip,
    #[serde(other)]
    Unknown,
}

/// Identifies a series of quotes for one instrument from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSeriesId {
    /// Data vendor, e.g. `Lusid`, `Refinitiv`, `Bloomberg`.
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_source: Option<String>,
    pub instrument_id: String,
    pub instrument_id_type: QuoteInstrumentIdType,
    pub quote_type: QuoteType,
    /// Field of the quote, e.g. `mid`, `bid`, `ask`.
    pub field: String,
}

impl QuoteSeriesId {
    pub fn new(
        provider: impl Into<String>,
        instrument_id: impl Into<String>,
        instrument_id_type: QuoteInstrumentIdType,
        quote_type: QuoteType,
        field: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            price_source: None,
            instrument_id: instrument_id.into(),
            instrument_id_type,
            quote_type,
            field: field.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::not_empty("provider", &self.provider)?;
        validation::not_empty("instrumentId", &self.instrument_id)?;
        validation::not_empty("field", &self.field)
    }
}

/// One point in a quote series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteId {
    pub quote_series_id: QuoteSeriesId,
    pub effective_at: DateTime<Utc>,
}

impl QuoteId {
    pub fn new(quote_series_id: QuoteSeriesId, effective_at: DateTime<Utc>) -> Self {
        Self {
            quote_series_id,
            effective_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertQuoteRequest {
    pub quote_id: QuoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<MetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage: Option<String>,
}

impl UpsertQuoteRequest {
    pub fn new(quote_id: QuoteId, metric_value: MetricValue) -> Self {
        Self {
            quote_id,
            metric_value: Some(metric_value),
            lineage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: QuoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<MetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertQuotesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, Quote>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub failed: HashMap<String, ErrorDetail>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// Quotes found, keyed like the request. Series without a quote in range
/// land in `not_found` rather than `failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuotesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, Quote>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub not_found: HashMap<String, ErrorDetail>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub failed: HashMap<String, ErrorDetail>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

/// Quotes deleted, keyed like the request, with the as-at of the deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnulQuotesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub values: HashMap<String, DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub failed: HashMap<String, ErrorDetail>,
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
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn series() -> QuoteSeriesId {
        QuoteSeriesId::new(
            "Lusid",
            "BBG000C6K6G9",
            QuoteInstrumentIdType::Figi,
            QuoteType::Price,
            "mid",
        )
    }

    #[test]
    fn test_upsert_request_wire_shape() {
        let at = Utc.with_ymd_and_hms(2019, 4, 15, 0, 0, 0).unwrap();
        let req = UpsertQuoteRequest::new(
            QuoteId::new(series(), at),
            MetricValue {
                value: Decimal::new(10125, 2),
                unit: Some("GBP".into()),
            },
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "quoteId": {
                    "quoteSeriesId": {
                        "provider": "Lusid",
                        "instrumentId": "BBG000C6K6G9",
                        "instrumentIdType": "Figi",
                        "quoteType": "Price",
                        "field": "mid"
                    },
                    "effectiveAt": "2019-04-15T00:00:00Z"
                },
                "metricValue": {"value": 101.25, "unit": "GBP"}
            })
        );
    }

    #[test]
    fn test_series_validate() {
        assert!(series().validate().is_ok());
        let mut bad = series();
        bad.field.clear();
        assert_eq!(bad.validate(), Err(ValidationError::Empty { field: "field" }));
    }

    #[test]
    fn test_series_id_dedupes_in_hash_set() {
        let mut bid = series();
        bid.field = "bid".into();
        let ids: std::collections::HashSet<QuoteSeriesId> =
            [series(), series(), bid].into_iter().collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_get_response_not_found() {
        let resp: GetQuotesResponse = serde_json::from_value(json!({
            "values": {},
            "notFound": {"q1": {"id": "q1", "type": "QuoteNotFound"}},
            "failed": null
        }))
        .unwrap();
        assert!(resp.values.is_empty());
        assert_eq!(resp.not_found["q1"].error_type.as_deref(), Some("QuoteNotFound"));
        assert!(resp.failed.is_empty());
    }
}
