//! Transaction portfolio domain: portfolio creation and details,
//! transactions and holdings.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::property_definition::{PerpetualProperty, Property};
use crate::shared::serde_util::null_as_default;
use crate::shared::{
    validation, CurrencyAndAmount, Link, PropertyKey, ResourceId, ValidationError, Version,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ─── Portfolio creation & details ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountingMethod {
    Default,
    AverageCost,
    FirstInFirstOut,
    LastInFirstOut,
    HighestCostFirst,
    LowestCostFirst,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPortfolioRequest {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// ISO 4217 code, e.g. `GBP`.
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate_action_source_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_method: Option<AccountingMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_holding_keys: Vec<PropertyKey>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<PropertyKey, Property>,
}

impl CreateTransactionPortfolioRequest {
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        base_currency: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            description: None,
            code: code.into(),
            created: None,
            base_currency: base_currency.into(),
            corporate_action_source_id: None,
            accounting_method: None,
            sub_holding_keys: Vec::new(),
            properties: HashMap::new(),
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.insert(property.key.clone(), property);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::code("code", &self.code)?;
        validation::display_name(&self.display_name)?;
        validation::not_empty("baseCurrency", &self.base_currency)?;
        for (key, property) in &self.properties {
            property.validate_as(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub origin_portfolio_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate_action_source_id: Option<ResourceId>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_holding_keys: Vec<PropertyKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_method: Option<AccountingMethod>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioDetails {
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate_action_source_id: Option<ResourceId>,
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPriceType {
    Price,
    Yield,
    Spread,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPrice {
    pub price: Decimal,
    #[serde(rename = "type")]
    pub price_type: TransactionPriceType,
}

impl TransactionPrice {
    pub fn price(price: Decimal) -> Self {
        Self {
            price,
            price_type: TransactionPriceType::Price,
        }
    }
}

/// A transaction to upsert. `transaction_id` is unique within the portfolio;
/// upserting an existing id amends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub transaction_id: String,
    /// Transaction type code, e.g. `Buy`, `Sell`, `FundsIn`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Identifier type to value, e.g. `Instrument/default/Figi` → `BBG000C6K6G9`.
    pub instrument_identifiers: HashMap<String, String>,
    pub transaction_date: DateTime<Utc>,
    pub settlement_date: DateTime<Utc>,
    pub units: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_price: Option<TransactionPrice>,
    pub total_consideration: CurrencyAndAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<PropertyKey, PerpetualProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TransactionRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::not_empty("transactionId", &self.transaction_id)?;
        validation::not_empty("type", &self.transaction_type)?;
        if self.instrument_identifiers.is_empty() {
            return Err(ValidationError::Empty {
                field: "instrumentIdentifiers",
            });
        }
        for (key, property) in &self.properties {
            property.validate_as(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Active,
    Amended,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// A transaction as stored in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub instrument_identifiers: HashMap<String, String>,
    pub instrument_uid: String,
    pub transaction_date: DateTime<Utc>,
    pub settlement_date: DateTime<Utc>,
    pub units: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_price: Option<TransactionPrice>,
    pub total_consideration: CurrencyAndAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub properties: Vec<PerpetualProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealisedGainLoss {
    pub instrument_uid: String,
    pub units: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_trade_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_settlement_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    pub cost_trade_ccy: CurrencyAndAmount,
    pub cost_portfolio_ccy: CurrencyAndAmount,
    pub realised_trade_ccy: CurrencyAndAmount,
    pub realised_total: CurrencyAndAmount,
    pub realised_market: CurrencyAndAmount,
    pub realised_currency: CurrencyAndAmount,
}

/// A transaction as built by `$build`, including derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputTransaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub instrument_identifiers: HashMap<String, String>,
    pub instrument_uid: String,
    pub transaction_date: DateTime<Utc>,
    pub settlement_date: DateTime<Utc>,
    pub units: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_price: Option<TransactionPrice>,
    pub total_consideration: CurrencyAndAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_to_portfolio_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub properties: Vec<PerpetualProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<TransactionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_date_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub realised_gain_loss: Vec<RealisedGainLoss>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionQueryMode {
    TradeDate,
    SettleDate,
}

/// Body of `transactions/$build`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQueryParameters {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_mode: Option<TransactionQueryMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_cancelled_transactions: Option<bool>,
}

impl TransactionQueryParameters {
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            end_date,
            query_mode: None,
            show_cancelled_transactions: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_date < self.start_date {
            return Err(ValidationError::Invalid(
                "endDate must not be before startDate".into(),
            ));
        }
        Ok(())
    }
}

/// Query parameters for `GET .../transactions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub from_transaction_date: Option<DateTime<Utc>>,
    pub to_transaction_date: Option<DateTime<Utc>>,
    pub as_at: Option<DateTime<Utc>>,
    pub filter: Option<String>,
    pub property_keys: Vec<PropertyKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPortfolioTransactionsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub version: Version,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransactionPropertyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub as_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
}

// ─── Holdings ────────────────────────────────────────────────────────────────

/// Holding type code as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldingType {
    #[serde(rename = "P")]
    Position,
    #[serde(rename = "B")]
    Balance,
    #[serde(rename = "C")]
    CashCommitment,
    #[serde(rename = "R")]
    Receivable,
    #[serde(rename = "F")]
    ForwardFx,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    pub instrument_uid: String,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub sub_holding_keys: HashMap<PropertyKey, PerpetualProperty>,
    #[serde(
        default,
        deserialize_with = "null_as_default::deserialize",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub properties: HashMap<PropertyKey, Property>,
    pub holding_type: HoldingType,
    pub units: Decimal,
    pub settled_units: Decimal,
    pub cost: CurrencyAndAmount,
    pub cost_portfolio_ccy: CurrencyAndAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Query parameters for `GET .../holdings`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsQuery {
    pub by_taxlots: Option<bool>,
    pub effective_at: Option<DateTime<Utc>>,
    pub as_at: Option<DateTime<Utc>>,
    pub filter: Option<String>,
    pub property_keys: Vec<PropertyKey>,
}

/// A target tax lot for a holding adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTaxLotRequest {
    pub units: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CurrencyAndAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_date: Option<DateTime<Utc>>,
}

impl TargetTaxLotRequest {
    pub fn units(units: Decimal) -> Self {
        Self {
            units,
            cost: None,
            portfolio_cost: None,
            price: None,
            purchase_date: None,
            settlement_date: None,
        }
    }

    pub fn with_cost(mut self, cost: CurrencyAndAmount) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// Target state of one holding for `set_holdings` / `adjust_holdings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustHoldingRequest {
    pub instrument_identifiers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub sub_holding_keys: HashMap<PropertyKey, PerpetualProperty>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<PropertyKey, PerpetualProperty>,
    pub tax_lots: Vec<TargetTaxLotRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl AdjustHoldingRequest {
    pub fn new(
        identifier_type: impl Into<String>,
        identifier: impl Into<String>,
        tax_lots: Vec<TargetTaxLotRequest>,
    ) -> Self {
        let mut instrument_identifiers = HashMap::new();
        instrument_identifiers.insert(identifier_type.into(), identifier.into());
        Self {
            instrument_identifiers,
            sub_holding_keys: HashMap::new(),
            properties: HashMap::new(),
            tax_lots,
            currency: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.instrument_identifiers.is_empty() {
            return Err(ValidationError::Empty {
                field: "instrumentIdentifiers",
            });
        }
        for (key, property) in self.sub_holding_keys.iter().chain(&self.properties) {
            property.validate_as(key)?;
        }
        Ok(())
    }
}

// ─── Holdings summary ────────────────────────────────────────────────────────

/// Units and cost of one instrument in one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingsSummaryLine {
    pub instrument_uid: String,
    pub currency: String,
    pub units: Decimal,
    pub settled_units: Decimal,
    pub cost: Decimal,
    pub cost_portfolio_ccy: Decimal,
    /// Number of holdings (sub-holdings or tax lots) folded into this line.
    pub holdings: usize,
}

/// Holdings aggregated per instrument and cost currency, sorted by
/// instrument uid then currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsSummary {
    pub lines: Vec<HoldingsSummaryLine>,
}

impl HoldingsSummary {
    pub fn from_holdings<'h>(holdings: impl IntoIterator<Item = &'h PortfolioHolding>) -> Self {
        let mut grouped: BTreeMap<(String, String), HoldingsSummaryLine> = BTreeMap::new();
        for holding in holdings {
            let key = (holding.instrument_uid.clone(), holding.cost.currency.clone());
            let line = grouped
                .entry(key)
                .or_insert_with_key(|(uid, ccy)| HoldingsSummaryLine {
                    instrument_uid: uid.clone(),
                    currency: ccy.clone(),
                    units: Decimal::ZERO,
                    settled_units: Decimal::ZERO,
                    cost: Decimal::ZERO,
                    cost_portfolio_ccy: Decimal::ZERO,
                    holdings: 0,
                });
            line.units += holding.units;
            line.settled_units += holding.settled_units;
            line.cost += holding.cost.amount;
            line.cost_portfolio_ccy += holding.cost_portfolio_ccy.amount;
            line.holdings += 1;
        }
        Self {
            lines: grouped.into_values().collect(),
        }
    }

    pub fn get(&self, instrument_uid: &str, currency: &str) -> Option<&HoldingsSummaryLine> {
        self.lines
            .iter()
            .find(|l| l.instrument_uid == instrument_uid && l.currency == currency)
    }

    /// Total cost in portfolio currency across all lines.
    pub fn total_cost_portfolio_ccy(&self) -> Decimal {
        self.lines.iter().map(|l| l.cost_portfolio_ccy).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property_definition::PropertyValue;
    use chrono::TimeZone;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn holding(uid: &str, ccy: &str, units: &str, cost: &str) -> PortfolioHolding {
        PortfolioHolding {
            instrument_uid: uid.into(),
            sub_holding_keys: HashMap::new(),
            properties: HashMap::new(),
            holding_type: HoldingType::Position,
            units: dec(units),
            settled_units: dec(units),
            cost: CurrencyAndAmount::new(dec(cost), ccy),
            cost_portfolio_ccy: CurrencyAndAmount::new(dec(cost), "GBP"),
            transaction: None,
            currency: Some(ccy.into()),
        }
    }

    #[test]
    fn test_transaction_request_wire_shape() {
        let date = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let mut ids = HashMap::new();
        ids.insert("Instrument/default/Figi".to_string(), "BBG000C6K6G9".to_string());
        let req = TransactionRequest {
            transaction_id: "tx-1".into(),
            transaction_type: "Buy".into(),
            instrument_identifiers: ids,
            transaction_date: date,
            settlement_date: date,
            units: dec("100"),
            transaction_price: Some(TransactionPrice::price(dec("12.5"))),
            total_consideration: CurrencyAndAmount::new(dec("1250"), "GBP"),
            exchange_rate: None,
            transaction_currency: Some("GBP".into()),
            properties: HashMap::new(),
            counterparty_id: None,
            source: None,
        };
        assert!(req.validate().is_ok());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["type"], "Buy");
        assert_eq!(v["transactionPrice"], json!({"price": 12.5, "type": "Price"}));
        assert_eq!(v["totalConsideration"], json!({"amount": 1250.0, "currency": "GBP"}));
        assert_eq!(v["transactionDate"], "2018-01-01T00:00:00Z");
        assert!(v.get("properties").is_none());
        assert!(v.get("exchangeRate").is_none());
    }

    #[test]
    fn test_transaction_request_requires_identifiers() {
        let date = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let req = TransactionRequest {
            transaction_id: "tx-1".into(),
            transaction_type: "Buy".into(),
            instrument_identifiers: HashMap::new(),
            transaction_date: date,
            settlement_date: date,
            units: Decimal::ONE,
            transaction_price: None,
            total_consideration: CurrencyAndAmount::new(Decimal::ONE, "GBP"),
            exchange_rate: None,
            transaction_currency: None,
            properties: HashMap::new(),
            counterparty_id: None,
            source: None,
        };
        assert_eq!(
            req.validate(),
            Err(ValidationError::Empty {
                field: "instrumentIdentifiers"
            })
        );
    }

    #[test]
    fn test_output_transaction_decode() {
        let tx: OutputTransaction = serde_json::from_value(json!({
            "transactionId": "tx-1",
            "type": "Buy",
            "instrumentIdentifiers": null,
            "instrumentUid": "LUID_123",
            "transactionDate": "2018-01-01T00:00:00.0000000+00:00",
            "settlementDate": "2018-01-03T00:00:00.0000000+00:00",
            "units": 100,
            "totalConsideration": {"amount": 1250, "currency": "GBP"},
            "transactionStatus": "Active",
            "realisedGainLoss": []
        }))
        .unwrap();
        assert_eq!(tx.instrument_uid, "LUID_123");
        assert_eq!(tx.units, dec("100"));
        assert_eq!(tx.transaction_status, Some(TransactionStatus::Active));
        assert!(tx.instrument_identifiers.is_empty());
    }

    #[test]
    fn test_holding_type_codes() {
        let h: HoldingType = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(h, HoldingType::Balance);
        let unknown: HoldingType = serde_json::from_str("\"Z\"").unwrap();
        assert_eq!(unknown, HoldingType::Unknown);
        assert_eq!(serde_json::to_string(&HoldingType::Position).unwrap(), "\"P\"");
    }

    #[test]
    fn test_adjust_holding_request_wire_shape() {
        let req = AdjustHoldingRequest::new(
            "Instrument/default/Figi",
            "BBG000C6K6G9",
            vec![TargetTaxLotRequest::units(dec("100"))
                .with_cost(CurrencyAndAmount::new(dec("101"), "GBP"))],
        );
        assert!(req.validate().is_ok());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "instrumentIdentifiers": {"Instrument/default/Figi": "BBG000C6K6G9"},
                "taxLots": [{"units": 100.0, "cost": {"amount": 101.0, "currency": "GBP"}}]
            })
        );
    }

    #[test]
    fn test_adjust_holding_rejects_mismatched_sub_holding_key() {
        let mut req = AdjustHoldingRequest::new("Instrument/default/Figi", "X", vec![]);
        let key: PropertyKey = "Trade/s/Strategy".parse().unwrap();
        let other: PropertyKey = "Trade/s/Desk".parse().unwrap();
        req.sub_holding_keys
            .insert(key, PerpetualProperty::new(other, PropertyValue::label("A")));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_build_parameters_validate_date_order() {
        let start = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        assert!(TransactionQueryParameters::new(start, end).validate().is_err());
        assert!(TransactionQueryParameters::new(end, start).validate().is_ok());
    }

    #[test]
    fn test_holdings_summary_groups_by_instrument_and_currency() {
        let holdings = vec![
            holding("LUID_B", "USD", "10", "100"),
            holding("LUID_A", "GBP", "5", "50.5"),
            holding("LUID_B", "USD", "2.5", "25"),
            holding("LUID_B", "GBP", "1", "9"),
        ];
        let summary = HoldingsSummary::from_holdings(&holdings);

        assert_eq!(summary.lines.len(), 3);
        let order: Vec<_> = summary
            .lines
            .iter()
            .map(|l| (l.instrument_uid.as_str(), l.currency.as_str()))
            .collect();
        assert_eq!(order, vec![("LUID_A", "GBP"), ("LUID_B", "GBP"), ("LUID_B", "USD")]);

        let usd = summary.get("LUID_B", "USD").unwrap();
        assert_eq!(usd.units, dec("12.5"));
        assert_eq!(usd.cost, dec("125"));
        assert_eq!(usd.holdings, 2);
        assert_eq!(summary.total_cost_portfolio_ccy(), dec("184.5"));
    }

    #[test]
    fn test_holdings_summary_empty() {
        let summary = HoldingsSummary::from_holdings(&Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total_cost_portfolio_ccy(), Decimal::ZERO);
    }
}
