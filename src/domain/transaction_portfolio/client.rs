//! Transaction portfolios sub-client.

use crate::client::LusidClient;
use crate::domain::portfolio::Portfolio;
use crate::domain::property_definition::PerpetualProperty;
use crate::domain::transaction_portfolio::{
    AddTransactionPropertyResponse, AdjustHoldingRequest, CreatePortfolioDetails,
    CreateTransactionPortfolioRequest, HoldingsQuery, OutputTransaction, PortfolioDetails,
    PortfolioHolding, Transaction, TransactionQuery, TransactionQueryParameters,
    TransactionRequest, UpsertPortfolioTransactionsResponse,
};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::{format_datetime, path};
use crate::shared::{
    validation, DeletedEntityResponse, PropertyKey, Query, ValidationError, VersionedResourceListOf,
    VersionedResponse,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub struct TransactionPortfolios<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> TransactionPortfolios<'a> {
    pub async fn create(
        &self,
        scope: &str,
        request: &CreateTransactionPortfolioRequest,
    ) -> Result<Portfolio, SdkError> {
        validation::code("scope", scope)?;
        request.validate()?;
        self.client
            .http
            .post(
                &path(&["transactionportfolios", scope]),
                &Query::new(),
                request,
                RetryPolicy::None,
            )
            .await
    }

    pub async fn get_details(
        &self,
        scope: &str,
        code: &str,
        effective_at: Option<DateTime<Utc>>,
        as_at: Option<DateTime<Utc>>,
    ) -> Result<PortfolioDetails, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query
            .datetime_opt("effectiveAt", effective_at.as_ref())
            .datetime_opt("asAt", as_at.as_ref());
        self.client
            .http
            .get(
                &path(&["transactionportfolios", scope, code, "details"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn upsert_details(
        &self,
        scope: &str,
        code: &str,
        details: &CreatePortfolioDetails,
        effective_at: Option<DateTime<Utc>>,
    ) -> Result<PortfolioDetails, SdkError> {
        validation::scope_and_code(scope, code)?;
        validation::not_empty("baseCurrency", &details.base_currency)?;
        let mut query = Query::new();
        query.datetime_opt("effectiveAt", effective_at.as_ref());
        self.client
            .http
            .post(
                &path(&["transactionportfolios", scope, code, "details"]),
                &query,
                details,
                RetryPolicy::None,
            )
            .await
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub async fn upsert_transactions(
        &self,
        scope: &str,
        code: &str,
        transactions: &[TransactionRequest],
    ) -> Result<UpsertPortfolioTransactionsResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        for tx in transactions {
            tx.validate()?;
        }
        self.client
            .http
            .post(
                &path(&["transactionportfolios", scope, code, "transactions"]),
                &Query::new(),
                transactions,
                RetryPolicy::None,
            )
            .await
    }

    pub async fn get_transactions(
        &self,
        scope: &str,
        code: &str,
        q: &TransactionQuery,
    ) -> Result<VersionedResourceListOf<Transaction>, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query
            .datetime_opt("fromTransactionDate", q.from_transaction_date.as_ref())
            .datetime_opt("toTransactionDate", q.to_transaction_date.as_ref())
            .datetime_opt("asAt", q.as_at.as_ref())
            .opt("filter", q.filter.as_deref())
            .all("propertyKeys", &q.property_keys);
        self.client
            .http
            .get(
                &path(&["transactionportfolios", scope, code, "transactions"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    /// Build the output transactions for a date window, with derived fields
    /// such as realised gains and losses.
    pub async fn build_transactions(
        &self,
        scope: &str,
        code: &str,
        parameters: &TransactionQueryParameters,
        as_at: Option<DateTime<Utc>>,
        filter: Option<&str>,
        property_keys: &[PropertyKey],
    ) -> Result<VersionedResourceListOf<OutputTransaction>, SdkError> {
        validation::scope_and_code(scope, code)?;
        parameters.validate()?;
        let mut query = Query::new();
        query
            .datetime_opt("asAt", as_at.as_ref())
            .opt("filter", filter)
            .all("propertyKeys", property_keys);
        self.client
            .http
            .post(
                &format!(
                    "{}/$build",
                    path(&["transactionportfolios", scope, code, "transactions"])
                ),
                &query,
                parameters,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn delete_transactions(
        &self,
        scope: &str,
        code: &str,
        transaction_ids: &[&str],
    ) -> Result<DeletedEntityResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        if transaction_ids.is_empty() {
            return Err(ValidationError::Empty {
                field: "transactionIds",
            }
            .into());
        }
        let mut query = Query::new();
        query.all("transactionIds", transaction_ids);
        self.client
            .http
            .delete(
                &path(&["transactionportfolios", scope, code, "transactions"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn add_transaction_properties(
        &self,
        scope: &str,
        code: &str,
        transaction_id: &str,
        properties: &HashMap<PropertyKey, PerpetualProperty>,
    ) -> Result<AddTransactionPropertyResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        validation::not_empty("transactionId", transaction_id)?;
        for (key, property) in properties {
            property.validate_as(key)?;
        }
        self.client
            .http
            .post(
                &path(&[
                    "transactionportfolios",
                    scope,
                    code,
                    "transactions",
                    transaction_id,
                    "properties",
                ]),
                &Query::new(),
                properties,
                RetryPolicy::None,
            )
            .await
    }

    // ── Holdings ─────────────────────────────────────────────────────────

    pub async fn get_holdings(
        &self,
        scope: &str,
        code: &str,
        q: &HoldingsQuery,
    ) -> Result<VersionedResourceListOf<PortfolioHolding>, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query
            .opt("byTaxlots", q.by_taxlots)
            .datetime_opt("effectiveAt", q.effective_at.as_ref())
            .datetime_opt("asAt", q.as_at.as_ref())
            .opt("filter", q.filter.as_deref())
            .all("propertyKeys", &q.property_keys);
        self.client
            .http
            .get(
                &path(&["transactionportfolios", scope, code, "holdings"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    /// Replace all holdings at `effective_at` with the given targets.
    pub async fn set_holdings(
        &self,
        scope: &str,
        code: &str,
        effective_at: DateTime<Utc>,
        holdings: &[AdjustHoldingRequest],
    ) -> Result<VersionedResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        for h in holdings {
            h.validate()?;
        }
        self.client
            .http
            .put(
                &holdings_path(scope, code, &effective_at),
                &Query::new(),
                holdings,
                RetryPolicy::None,
            )
            .await
    }

    /// Adjust only the named holdings at `effective_at`; others are untouched.
    pub async fn adjust_holdings(
        &self,
        scope: &str,
        code: &str,
        effective_at: DateTime<Utc>,
        holdings: &[AdjustHoldingRequest],
    ) -> Result<VersionedResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        for h in holdings {
            h.validate()?;
        }
        self.client
            .http
            .post(
                &holdings_path(scope, code, &effective_at),
                &Query::new(),
                holdings,
                RetryPolicy::None,
            )
            .await
    }

    pub async fn cancel_adjust_holdings(
        &self,
        scope: &str,
        code: &str,
        effective_at: DateTime<Utc>,
    ) -> Result<DeletedEntityResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        self.client
            .http
            .delete(
                &holdings_path(scope, code, &effective_at),
                &Query::new(),
                RetryPolicy::Idempotent,
            )
            .await
    }
}

fn holdings_path(scope: &str, code: &str, effective_at: &DateTime<Utc>) -> String {
    path(&[
        "transactionportfolios",
        scope,
        code,
        "holdings",
        &format_datetime(effective_at),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_holdings_path_encodes_effective_date() {
        let at = Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            holdings_path("s", "c", &at),
            "/transactionportfolios/s/c/holdings/2019-03-01T00%3A00%3A00Z"
        );
    }
}
