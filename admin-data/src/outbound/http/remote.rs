//! Typed remote collection over the REST transport.
//!
//! Mirrors the local [`crate::outbound::local::Collection`] surface, but
//! forwards the composed criteria to the server and decodes the responses
//! back into stamped records. Filtering, ordering, and pagination are the
//! server's responsibility in this mode.

use std::marker::PhantomData;
use std::sync::Arc;

use pagination::{Page, PageRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::RestBackend;
use crate::domain::{EntityId, EntityKind, ListQuery, Patch, ServiceError, Stamped};

/// Remote repository for one entity collection.
pub struct RemoteCollection<E: EntityKind> {
    backend: Arc<RestBackend>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityKind> RemoteCollection<E> {
    /// Bind an entity's resource to a shared transport.
    #[must_use]
    pub const fn new(backend: Arc<RestBackend>) -> Self {
        Self {
            backend,
            _entity: PhantomData,
        }
    }

    /// `GET <resource>` returning the full filtered collection.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the REST client.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Stamped<E>>, ServiceError> {
        let payload = self
            .backend
            .get_list(E::RESOURCE, &query.to_query_pairs())
            .await?;
        decode(payload)
    }

    /// `GET <resource>?page=&pageSize=` returning one page with totals.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the REST client.
    pub async fn list_page(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Page<Stamped<E>>, ServiceError> {
        let mut pairs = query.to_query_pairs();
        pairs.push(("page".to_owned(), page.page().to_string()));
        pairs.push(("pageSize".to_owned(), page.page_size().to_string()));
        let payload = self.backend.get_list(E::RESOURCE, &pairs).await?;
        decode(payload)
    }

    /// `POST <resource>` with the new record's fields.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the REST client.
    pub async fn create(&self, fields: &E) -> Result<Stamped<E>, ServiceError> {
        let body = serde_json::to_value(fields)
            .map_err(|error| ServiceError::decode(error.to_string()))?;
        let payload = self.backend.post(E::RESOURCE, &body).await?;
        decode(payload)
    }

    /// `PUT <resource>/:id` with the sanitised merge document.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the REST client.
    pub async fn update(&self, id: &EntityId, patch: &Patch) -> Result<Stamped<E>, ServiceError> {
        let payload = self
            .backend
            .put(E::RESOURCE, id.as_str(), &patch.to_body())
            .await?;
        decode(payload)
    }

    /// `DELETE <resource>/:id`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from the REST client.
    pub async fn delete(&self, id: &EntityId) -> Result<(), ServiceError> {
        self.backend.delete(E::RESOURCE, id.as_str()).await
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ServiceError> {
    serde_json::from_value(payload).map_err(|error| ServiceError::decode(error.to_string()))
}
