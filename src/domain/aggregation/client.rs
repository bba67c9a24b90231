//! Aggregation sub-client.

use crate::client::LusidClient;
use crate::domain::aggregation::{AggregationRequest, ListAggregationResponse};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{validation, Query};

pub struct Aggregation<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> Aggregation<'a> {
    /// Aggregate the holdings of one portfolio.
    pub async fn get_aggregation_by_portfolio(
        &self,
        scope: &str,
        code: &str,
        request: &AggregationRequest,
        sort_by: &[String],
        start: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ListAggregationResponse, SdkError> {
        self.aggregate("portfolios", scope, code, request, sort_by, start, limit)
            .await
    }

    /// Aggregate across every portfolio in a group.
    pub async fn get_aggregation_by_group(
        &self,
        scope: &str,
        code: &str,
        request: &AggregationRequest,
        sort_by: &[String],
        start: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ListAggregationResponse, SdkError> {
        self.aggregate("portfoliogroups", scope, code, request, sort_by, start, limit)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn aggregate(
        &self,
        collection: &str,
        scope: &str,
        code: &str,
        request: &AggregationRequest,
        sort_by: &[String],
        start: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ListAggregationResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        validation::limit(limit)?;
        request.validate()?;
        let mut query = Query::new();
        query
            .all("sortBy", sort_by)
            .opt("start", start)
            .opt("limit", limit);
        tracing::debug!(
            collection,
            scope,
            code,
            metrics = request.metrics.len(),
            "requesting aggregation"
        );
        // Read-only despite the POST.
        self.client
            .http
            .post(
                &format!("{}/$aggregate", path(&[collection, scope, code])),
                &query,
                request,
                RetryPolicy::Idempotent,
            )
            .await
    }
}
