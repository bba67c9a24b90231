//! Quotes sub-client. Requests are maps keyed by a caller-chosen id, which
//! the response maps echo back.

use crate::client::LusidClient;
use crate::domain::quote::{
    AnnulQuotesResponse, GetQuotesResponse, QuoteId, QuoteSeriesId, UpsertQuoteRequest,
    UpsertQuotesResponse,
};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{validation, Query};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub struct Quotes<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> Quotes<'a> {
    pub async fn upsert(
        &self,
        scope: &str,
        quotes: &HashMap<String, UpsertQuoteRequest>,
    ) -> Result<UpsertQuotesResponse, SdkError> {
        validation::code("scope", scope)?;
        for quote in quotes.values() {
            quote.quote_id.quote_series_id.validate()?;
            if let Some(metric) = &quote.metric_value {
                if metric.unit.as_deref().is_some_and(str::is_empty) {
                    return Err(validation::ValidationError::Empty { field: "unit" }.into());
                }
            }
        }
        self.client
            .http
            .post(&path(&["quotes", scope]), &Query::new(), quotes, RetryPolicy::None)
            .await
    }

    /// Latest quote per series at `effective_at`, no older than `max_age`
    /// (an ISO 8601 duration such as `P1D`).
    pub async fn get(
        &self,
        scope: &str,
        series: &HashMap<String, QuoteSeriesId>,
        effective_at: Option<DateTime<Utc>>,
        as_at: Option<DateTime<Utc>>,
        max_age: Option<&str>,
    ) -> Result<GetQuotesResponse, SdkError> {
        validation::code("scope", scope)?;
        for id in series.values() {
            id.validate()?;
        }
        let mut query = Query::new();
        query
            .datetime_opt("effectiveAt", effective_at.as_ref())
            .datetime_opt("asAt", as_at.as_ref())
            .opt("maxAge", max_age);
        self.client
            .http
            .post(
                &format!("{}/$get", path(&["quotes", scope])),
                &query,
                series,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn delete(
        &self,
        scope: &str,
        quotes: &HashMap<String, QuoteId>,
    ) -> Result<AnnulQuotesResponse, SdkError> {
        validation::code("scope", scope)?;
        for id in quotes.values() {
            id.quote_series_id.validate()?;
        }
        self.client
            .http
            .post(
                &format!("{}/$delete", path(&["quotes", scope])),
                &Query::new(),
                quotes,
                RetryPolicy::None,
            )
            .await
    }
}
