//! Instruments sub-client.

use crate::client::LusidClient;
use crate::domain::instrument::{
    GetInstrumentsResponse, Instrument, InstrumentDefinition, UpsertInstrumentsResponse,
};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::query::path;
use crate::shared::{validation, DeletedEntityResponse, PropertyKey, Query, ValidationError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub struct Instruments<'a> {
    pub(crate) client: &'a LusidClient,
}

impl<'a> Instruments<'a> {
    /// Create or update instruments, keyed by a caller-chosen correlation id.
    pub async fn upsert(
        &self,
        definitions: &HashMap<String, InstrumentDefinition>,
    ) -> Result<UpsertInstrumentsResponse, SdkError> {
        for definition in definitions.values() {
            definition.validate()?;
        }
        let response: UpsertInstrumentsResponse = self
            .client
            .http
            .post("/instruments", &Query::new(), definitions, RetryPolicy::None)
            .await?;
        if !response.failed.is_empty() {
            tracing::warn!(
                failed = response.failed.len(),
                "some instruments were not upserted"
            );
        }
        Ok(response)
    }

    pub async fn get(
        &self,
        identifier_type: &str,
        identifier: &str,
        effective_at: Option<DateTime<Utc>>,
        as_at: Option<DateTime<Utc>>,
        property_keys: &[PropertyKey],
    ) -> Result<Instrument, SdkError> {
        validation::not_empty("identifierType", identifier_type)?;
        validation::not_empty("identifier", identifier)?;
        let mut query = Query::new();
        query
            .datetime_opt("effectiveAt", effective_at.as_ref())
            .datetime_opt("asAt", as_at.as_ref())
            .all("propertyKeys", property_keys);
        self.client
            .http
            .get(
                &path(&["instruments", identifier_type, identifier]),
                &query,
                RetryPolicy::Idempotent,
            )
            .await
    }

    /// Fetch several instruments sharing one identifier type.
    pub async fn get_batch(
        &self,
        identifier_type: &str,
        identifiers: &[&str],
        effective_at: Option<DateTime<Utc>>,
        as_at: Option<DateTime<Utc>>,
        property_keys: &[PropertyKey],
    ) -> Result<GetInstrumentsResponse, SdkError> {
        validation::not_empty("identifierType", identifier_type)?;
        if identifiers.is_empty() {
            return Err(ValidationError::Empty {
                field: "identifiers",
            }
            .into());
        }
        let mut query = Query::new();
        query
            .push("identifierType", identifier_type)
            .datetime_opt("effectiveAt", effective_at.as_ref())
            .datetime_opt("asAt", as_at.as_ref())
            .all("propertyKeys", property_keys);
        self.client
            .http
            .post("/instruments/$get", &query, identifiers, RetryPolicy::Idempotent)
            .await
    }

    pub async fn delete(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<DeletedEntityResponse, SdkError> {
        validation::not_empty("identifierType", identifier_type)?;
        validation::not_empty("identifier", identifier)?;
        self.client
            .http
            .delete(
                &path(&["instruments", identifier_type, identifier]),
                &Query::new(),
                RetryPolicy::Idempotent,
            )
            .await
    }
}
