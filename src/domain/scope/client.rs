use crate::client::LusidClient;
use crate::domain::scope::ScopeDefinition;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::{Query, ResourceListOf};

pub struct Scopes<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> Scopes<'a> {
    pub async fn list(&self, filter: Option<&str>) -> Result<ResourceListOf<ScopeDefinition>, SdkError> {
        let mut query = Query::new();
        query.opt("filter", filter);
        self.client
            .http
            .get("/scopes", &query, RetryPolicy::Idempotent)
            .await
    }
}
