//! Portfolios sub-client: list, fetch, update and delete portfolios and
//! manage their properties.

use crate::client::LusidClient;
use crate::domain::portfolio::{Portfolio, PortfolioProperties, ProcessedCommand, UpdatePortfolioRequest};
use crate::domain::property_definition::Property;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::paging::paginate;
use crate::shared::query::path;
use crate::shared::{
    validation, DeletedEntityResponse, ListOptions, PropertyKey, Query, ResourceListOf,
};
use chrono::{DateTime, Utc};
use futures_util::Stream;
use std::collections::HashMap;

pub struct Portfolios<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> Portfolios<'a> {
    /// List portfolios across all scopes.
    pub async fn list(&self, options: &ListOptions) -> Result<ResourceListOf<Portfolio>, SdkError> {
        options.validate()?;
        let mut query = Query::new();
        options.apply(&mut query);
        self.client
            .http
            .get("/portfolios", &query, RetryPolicy::Idempotent)
            .await
    }

    /// List portfolios in one scope.
    pub async fn list_by_scope(
        &self,
        scope: &str,
        options: &ListOptions,
    ) -> Result<ResourceListOf<Portfolio>, SdkError> {
        validation::code("scope", scope)?;
        options.validate()?;
        let mut query = Query::new();
        options.apply(&mut query);
        self.client
            .http
            .get(&path(&["portfolios", scope]), &query, RetryPolicy::Idempotent)
            .await
    }

    /// Stream every portfolio in a scope, following page tokens.
    pub fn stream_by_scope(
        &self,
        scope: &str,
        options: ListOptions,
    ) -> impl Stream<Item = Result<Portfolio, SdkError>> + 'a {
        let client = self.client;
        let scope = scope.to_string();
        let first_page = options.page.clone();
        paginate(first_page, move |page| {
            let scope = scope.clone();
            let options = ListOptions {
                page,
                ..options.clone()
            };
            async move { client.portfolios().list_by_scope(&scope, &options).await }
        })
    }

    pub async fn get(
        &self,
        scope: &str,
        code: &str,
        effective_at: Option<DateTime<Utc>>,
        as_at: Option<DateTime<Utc>>,
    ) -> Result<Portfolio, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query
            .datetime_opt("effectiveAt", effective_at.as_ref())
            .datetime_opt("asAt", as_at.as_ref());
        self.client
            .http
            .get(&path(&["portfolios", scope, code]), &query, RetryPolicy::Idempotent)
            .await
    }

    pub async fn update(
        &self,
        scope: &str,
        code: &str,
        request: &UpdatePortfolioRequest,
        effective_at: Option<DateTime<Utc>>,
    ) -> Result<Portfolio, SdkError> {
        validation::scope_and_code(scope, code)?;
        request.validate()?;
        let mut query = Query::new();
        query.datetime_opt("effectiveAt", effective_at.as_ref());
        self.client
            .http
            .put(&path(&["portfolios", scope, code]), &query, request, RetryPolicy::None)
            .await
    }

    pub async fn delete(
        &self,
        scope: &str,
        code: &str,
        effective_at: Option<DateTime<Utc>>,
    ) -> Result<DeletedEntityResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query.datetime_opt("effectiveAt", effective_at.as_ref());
        self.client
            .http
            .delete(&path(&["portfolios", scope, code]), &query, RetryPolicy::Idempotent)
            .await
    }

    /// Commands processed against a portfolio between two as-at times.
    pub async fn get_commands(
        &self,
        scope: &str,
        code: &str,
        from_as_at: Option<DateTime<Utc>>,
        to_as_at: Option<DateTime<Utc>>,
        filter: Option<&str>,
    ) -> Result<ResourceListOf<ProcessedCommand>, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query
            .datetime_opt("fromAsAt", from_as_at.as_ref())
            .datetime_opt("toAsAt", to_as_at.as_ref())
            .opt("filter", filter);
        self.client
            .http
            .get(
                &path(&["portfolios", scope, code, "commands"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn get_properties(
        &self,
        scope: &str,
        code: &str,
        effective_at: Option<DateTime<Utc>>,
        as_at: Option<DateTime<Utc>>,
    ) -> Result<PortfolioProperties, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query
            .datetime_opt("effectiveAt", effective_at.as_ref())
            .datetime_opt("asAt", as_at.as_ref());
        self.client
            .http
            .get(
                &path(&["portfolios", scope, code, "properties"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    /// Create or update properties. Keys must be in the `Portfolio` domain.
    pub async fn upsert_properties(
        &self,
        scope: &str,
        code: &str,
        properties: &HashMap<PropertyKey, Property>,
    ) -> Result<PortfolioProperties, SdkError> {
        validation::scope_and_code(scope, code)?;
        for (key, property) in properties {
            property.validate_as(key)?;
        }
        self.client
            .http
            .post(
                &path(&["portfolios", scope, code, "properties"]),
                &Query::new(),
                properties,
                RetryPolicy::None,
            )
            .await
    }

    pub async fn delete_properties(
        &self,
        scope: &str,
        code: &str,
        property_keys: &[PropertyKey],
        effective_at: Option<DateTime<Utc>>,
    ) -> Result<DeletedEntityResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        if property_keys.is_empty() {
            return Err(validation::ValidationError::Empty {
                field: "propertyKeys",
            }
            .into());
        }
        let mut query = Query::new();
        query
            .all("propertyKeys", property_keys)
            .datetime_opt("effectiveAt", effective_at.as_ref());
        self.client
            .http
            .delete(
                &path(&["portfolios", scope, code, "properties"]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }
}
