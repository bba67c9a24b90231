//! Portfolio groups sub-client.

use crate::client::LusidClient;
use crate::domain::portfolio_group::{CreatePortfolioGroupRequest, PortfolioGroup};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{
    validation, DeletedEntityResponse, ListOptions, Query, ResourceId, ResourceListOf,
};
use chrono::{DateTime, Utc};

pub struct PortfolioGroups<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> PortfolioGroups<'a> {
    pub async fn create(
        &self,
        scope: &str,
        request: &CreatePortfolioGroupRequest,
    ) -> Result<PortfolioGroup, SdkError> {
        validation::code("scope", scope)?;
        request.validate()?;
        self.client
            .http
            .post(
                &path(&["portfoliogroups", scope]),
                &Query::new(),
                request,
                RetryPolicy::None,
            )
            .await
    }

    pub async fn list(
        &self,
        scope: &str,
        options: &ListOptions,
    ) -> Result<ResourceListOf<PortfolioGroup>, SdkError> {
        validation::code("scope", scope)?;
        options.validate()?;
        let mut query = Query::new();
        options.apply(&mut query);
        self.client
            .http
            .get(&path(&["portfoliogroups", scope]), &query, RetryPolicy::Idempotent)
            .await
    }

    pub async fn get(
        &self,
        scope: &str,
        code: &str,
        as_at: Option<DateTime<Utc>>,
    ) -> Result<PortfolioGroup, SdkError> {
        validation::scope_and_code(scope, code)?;
        let mut query = Query::new();
        query.datetime_opt("asAt", as_at.as_ref());
        self.client
            .http
            .get(
                &path(&["portfoliogroups", scope, code]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn delete(&self, scope: &str, code: &str) -> Result<DeletedEntityResponse, SdkError> {
        validation::scope_and_code(scope, code)?;
        self.client
            .http
            .delete(
                &path(&["portfoliogroups", scope, code]),
                &Query::new(),
                RetryPolicy::Idempotent,
            )
            .await
    }

    pub async fn add_portfolio(
        &self,
        scope: &str,
        code: &str,
        portfolio: &ResourceId,
    ) -> Result<PortfolioGroup, SdkError> {
        self.add_member(scope, code, "portfolios", portfolio).await
    }

    pub async fn remove_portfolio(
        &self,
        scope: &str,
        code: &str,
        portfolio_scope: &str,
        portfolio_code: &str,
    ) -> Result<PortfolioGroup, SdkError> {
        self.remove_member(scope, code, "portfolios", portfolio_scope, portfolio_code)
            .await
    }

    pub async fn add_sub_group(
        &self,
        scope: &str,
        code: &str,
        group: &ResourceId,
    ) -> Result<PortfolioGroup, SdkError> {
        self.add_member(scope, code, "subgroups", group).await
    }

    pub async fn remove_sub_group(
        &self,
        scope: &str,
        code: &str,
        group_scope: &str,
        group_code: &str,
    ) -> Result<PortfolioGroup, SdkError> {
        self.remove_member(scope, code, "subgroups", group_scope, group_code)
            .await
    }

    async fn add_member(
        &self,
        scope: &str,
        code: &str,
        collection: &str,
        member: &ResourceId,
    ) -> Result<PortfolioGroup, SdkError> {
        validation::scope_and_code(scope, code)?;
        validation::scope_and_code(&member.scope, &member.code)?;
        self.client
            .http
            .post(
                &path(&["portfoliogroups", scope, code, collection]),
                &Query::new(),
                member,
                RetryPolicy::None,
            )
            .await
    }

    async fn remove_member(
        &self,
        scope: &str,
        code: &str,
        collection: &str,
        member_scope: &str,
        member_code: &str,
    ) -> Result<PortfolioGroup, SdkError> {
        validation::scope_and_code(scope, code)?;
        validation::scope_and_code(member_scope, member_code)?;
        self.client
            .http
            .delete(
                &path(&["portfoliogroups", scope, code, collection, member_scope, member_code]),
                &Query::new(),
                RetryPolicy::Idempotent,
            )
            .await
    }
}
