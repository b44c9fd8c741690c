//! Ports between the domain and its interchangeable adapters.
//!
//! [`CollectionStore`] is the storage seam: mock mode plugs in an in-memory
//! or JSON-file key-value store, and tests plug in doubles. [`EntityService`]
//! is the seam page controllers talk to: the local adapter runs the shared
//! filter/page engine in-process, the remote adapter forwards the criteria
//! over HTTP, and both return identical envelope shapes so callers never
//! learn which mode they are in.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::Value;

use super::entity::{EntityId, EntityKind, Stamped};
use super::envelope::Envelope;
use super::error::{ServiceError, StoreError};
use super::patch::Patch;
use super::query::ListQuery;

/// Key-value document storage for entity collections.
///
/// One key holds one JSON document (an array for collections). Writes are
/// whole-document, last-write-wins; there is no partial update at this
/// layer.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Load the document stored under `key`, or `None` when absent.
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Persist `document` under `key`, replacing any previous value.
    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError>;
}

/// Mode-agnostic data service for one entity collection.
#[async_trait]
pub trait EntityService<E: EntityKind>: Send + Sync {
    /// Full filtered collection, for unpaginated list views.
    async fn list(&self, query: &ListQuery) -> Result<Envelope<Vec<Stamped<E>>>, ServiceError>;

    /// One page of the filtered collection, with post-filter totals.
    async fn list_page(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Envelope<Page<Stamped<E>>>, ServiceError>;

    /// Create a record from pre-validated fields.
    ///
    /// The service assigns the identifier and both stamps and prepends the
    /// record to the collection. It never fails validation; the drawer form
    /// gates required fields before this call.
    async fn create(&self, fields: E) -> Result<Envelope<Stamped<E>>, ServiceError>;

    /// Shallow-merge a patch over a record and refresh its `updatedAt`.
    ///
    /// Resolves to `ok: false` when no record carries `id`.
    async fn update(
        &self,
        id: &EntityId,
        patch: Patch,
    ) -> Result<Envelope<Stamped<E>>, ServiceError>;

    /// Remove a record. Deleting an absent `id` is still `ok: true`.
    async fn delete(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError>;

    /// Apply one patch to every record whose discrete `field` equals
    /// `value`, resolving to the number of records touched.
    ///
    /// This is the named compensating operation used by cross-collection
    /// cleanups (role fallback reassignment, webhook disabling), kept on the
    /// service so the invariant lives at one choke point instead of inline
    /// in a delete handler.
    async fn update_matching(
        &self,
        field: &str,
        value: &str,
        patch: Patch,
    ) -> Result<Envelope<u64>, ServiceError>;
}
