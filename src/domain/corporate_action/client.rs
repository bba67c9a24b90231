//! Corporate actions sub-client.

use crate::client::LusidClient;
use crate::domain::corporate_action::{
    CorporateAction, UpsertCorporateActionRequest, UpsertCorporateActionsResponse,
};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{validation, ListOptions, Query, ResourceListOf};

pub struct CorporateActions<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> CorporateActions<'a> {
    /// Actions recorded against a corporate action source.
    pub async fn list(
        &self,
        scope: &str,
        code: &str,
        options: &ListOptions,
    ) -> Result<ResourceListOf<CorporateAction>, SdkError> {
        validation::scope_and_code(scope, code)?;
        options.validate()?;
        let mut query = Query::new();
        options.apply(&mut query);
        self.client
            .http
            .get(
                &path(&["corporateactions", scope, code]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn batch_upsert(
        &self,
        scope: &str,
        code: &str,
        actions: &[UpsertCorporateActionRequest],
    ) -> Result<UpsertCorporateActionsResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        for action in actions {
            action.validate()?;
        }
        let response: UpsertCorporateActionsResponse = self
            .client
            .http
            .post(
                &path(&["corporateactions", scope, code]),
                &Query::new(),
                actions,
                RetryPolicy::None,
            )
            .await?;
        if !response.is_complete() {
            tracing::warn!(
                scope,
                code,
                failed = response.failed.len(),
                "some corporate actions were rejected"
            );
        }
        Ok(response)
    }
}
