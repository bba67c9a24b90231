//! Property definitions sub-client.

use crate::client::LusidClient;
use crate::domain::property_definition::{
    CreatePropertyDefinitionRequest, PropertyDefinition, UpdatePropertyDefinitionRequest,
};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{
    validation, DeletedEntityResponse, PropertyDomain, PropertyKey, Query, ResourceListOf,
};
use chrono::{DateTime, Utc};

pub struct PropertyDefinitions<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> PropertyDefinitions<'a> {
    pub async fn create(
        &self,
        request: &CreatePropertyDefinitionRequest,
    ) -> Result<PropertyDefinition, SdkError> {
        request.validate()?;
        self.client
            .http
            .post("/propertydefinitions", &Query::new(), request, RetryPolicy::None)
            .await
    }

    /// Fetch several definitions by key.
    pub async fn list(
        &self,
        property_keys: &[PropertyKey],
        as_at: Option<DateTime<Utc>>,
        filter: Option<&str>,
    ) -> Result<ResourceListOf<PropertyDefinition>, SdkError> {
        let mut query = Query::new();
        query
            .all("propertyKeys", property_keys)
            .datetime_opt("asAt", as_at.as_ref())
            .opt("filter", filter);
        self.client
            .http
            .get("/propertydefinitions", &query, RetryPolicy::Idempotent)
            .await
    }

    pub async fn get(
        &self,
        domain: PropertyDomain,
        scope: &str,
        code: &str,
        as_at: Option<DateTime<Utc>>,
    ) -> Result<PropertyDefinition, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query.datetime_opt("asAt", as_at.as_ref());
        self.client
            .http
            .get(
                &path(&["propertydefinitions", domain.as_str(), scope, code]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    /// Only the display name of a definition can be changed.
    pub async fn update(
        &self,
        domain: PropertyDomain,
        scope: &str,
        code: &str,
        request: &UpdatePropertyDefinitionRequest,
    ) -> Result<PropertyDefinition, SdkError> {
        validation::scope_and_code(scope, code)?;
        validation::display_name(&request.display_name)?;
        self.client
            .http
            .put(
                &path(&["propertydefinitions", domain.as_str(), scope, code]),
                &Query::new(),
                request,
                RetryPolicy::None,
            )
            .await
    }

    pub async fn delete(
        &self,
        domain: PropertyDomain,
        scope: &str,
        code: &str,
    ) -> Result<DeletedEntityResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        self.client
            .http
            .delete(
                &path(&["propertydefinitions", domain.as_str(), scope, code]),
                &Query::new(),
                RetryPolicy::Idempotent,
            )
            .await
    }
}
