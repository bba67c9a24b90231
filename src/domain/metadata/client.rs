use crate::client::LusidClient;
use crate::domain::metadata::{EntitySchema, VersionSummary};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{validation, Query};

pub struct Metadata<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> Metadata<'a> {
    /// Versions of the API and its build.
    pub async fn versions(&self) -> Result<VersionSummary, SdkError> {
        self.client
            .http
            .get("/metadata/versions", &Query::new(), RetryPolicy::Idempotent)
            .await
    }

    pub async fn entity_schema(&self, entity: &str) -> Result<EntitySchema, SdkError> {
        validation::code("entity", entity)?;
        self.client
            .http
            .get(
                &path(&["schemas", "entities", entity]),
                &Query::new(),
                RetryPolicy::Idempotent,
            )
            .await
    }
}
