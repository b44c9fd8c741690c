//! Mode-agnostic entity services and their factory.
//!
//! [`LocalService`] and [`RemoteService`] implement the same
//! [`EntityService`] port over the mock repository and the REST client
//! respectively, returning identical envelope shapes so page controllers
//! never branch on mode. [`ServiceFactory`] picks the adapter family once,
//! at construction time, from the [`ServiceConfig`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::config::{ServiceConfig, ServiceMode};
use crate::domain::ports::{CollectionStore, EntityService};
use crate::domain::{EntityId, EntityKind, Envelope, ListQuery, Patch, ServiceError, Stamped};
use crate::outbound::http::{RemoteCollection, RestBackend};
use crate::outbound::local::{Collection, JsonFileStore, MemoryStore};

/// Mock-mode service over the generic local repository.
pub struct LocalService<E: EntityKind> {
    collection: Collection<E>,
}

impl<E: EntityKind> LocalService<E> {
    /// Wrap a collection.
    #[must_use]
    pub const fn new(collection: Collection<E>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl<E: EntityKind> EntityService<E> for LocalService<E> {
    async fn list(&self, query: &ListQuery) -> Result<Envelope<Vec<Stamped<E>>>, ServiceError> {
        Ok(Envelope::hit(self.collection.list(query).await?))
    }

    async fn list_page(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Envelope<Page<Stamped<E>>>, ServiceError> {
        Ok(Envelope::hit(self.collection.list_page(query, page).await?))
    }

    async fn create(&self, fields: E) -> Result<Envelope<Stamped<E>>, ServiceError> {
        Ok(Envelope::hit(self.collection.create(fields).await?))
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: Patch,
    ) -> Result<Envelope<Stamped<E>>, ServiceError> {
        Ok(self
            .collection
            .update(id, &patch)
            .await?
            .map_or_else(Envelope::miss, Envelope::hit))
    }

    async fn delete(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
        self.collection.delete(id).await?;
        Ok(Envelope::hit(()))
    }

    async fn update_matching(
        &self,
        field: &str,
        value: &str,
        patch: Patch,
    ) -> Result<Envelope<u64>, ServiceError> {
        Ok(Envelope::hit(
            self.collection.update_where(field, value, &patch).await?,
        ))
    }
}

/// Real-mode service over the typed remote collection.
///
/// Transport failures propagate as errors rather than envelopes; the
/// not-found envelope is a mock-mode signal only, matching the original
/// panels where real-mode non-2xx responses were thrown.
pub struct RemoteService<E: EntityKind> {
    remote: RemoteCollection<E>,
}

impl<E: EntityKind> RemoteService<E> {
    /// Bind an entity's remote collection.
    #[must_use]
    pub const fn new(remote: RemoteCollection<E>) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl<E: EntityKind> EntityService<E> for RemoteService<E> {
    async fn list(&self, query: &ListQuery) -> Result<Envelope<Vec<Stamped<E>>>, ServiceError> {
        Ok(Envelope::hit(self.remote.list(query).await?))
    }

    async fn list_page(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Envelope<Page<Stamped<E>>>, ServiceError> {
        Ok(Envelope::hit(self.remote.list_page(query, page).await?))
    }

    async fn create(&self, fields: E) -> Result<Envelope<Stamped<E>>, ServiceError> {
        Ok(Envelope::hit(self.remote.create(&fields).await?))
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: Patch,
    ) -> Result<Envelope<Stamped<E>>, ServiceError> {
        Ok(Envelope::hit(self.remote.update(id, &patch).await?))
    }

    async fn delete(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
        self.remote.delete(id).await?;
        Ok(Envelope::hit(()))
    }

    async fn update_matching(
        &self,
        field: &str,
        value: &str,
        patch: Patch,
    ) -> Result<Envelope<u64>, ServiceError> {
        // The admin API has no bulk-update verb, so the compensating update
        // is a filtered list followed by one PUT per matching record.
        let matching = self
            .remote
            .list(&ListQuery::all().with_filter(field, value))
            .await?;
        let mut touched = 0u64;
        for record in &matching {
            self.remote.update(record.id(), &patch).await?;
            touched += 1;
        }
        debug!(
            resource = E::RESOURCE,
            field, value, touched, "remote compensating update applied"
        );
        Ok(Envelope::hit(touched))
    }
}

/// Builds entity services against whichever adapter family is configured.
pub struct ServiceFactory {
    store: Option<Arc<dyn CollectionStore>>,
    backend: Option<Arc<RestBackend>>,
    clock: Arc<dyn Clock>,
    rng_seed: Option<u64>,
}

impl ServiceFactory {
    /// Construct adapters from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the data directory cannot be
    /// opened, or [`ServiceError::Network`] when remote mode is configured
    /// without a base URL.
    pub fn from_config(config: &ServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, ServiceError> {
        match config.mode() {
            ServiceMode::Mock => {
                let store: Arc<dyn CollectionStore> = match config.data_dir() {
                    Some(dir) => Arc::new(JsonFileStore::open(dir)?),
                    None => Arc::new(MemoryStore::new()),
                };
                Ok(Self {
                    store: Some(store),
                    backend: None,
                    clock,
                    rng_seed: config.rng_seed(),
                })
            }
            ServiceMode::Remote => {
                let base = config
                    .base_url()
                    .cloned()
                    .ok_or_else(|| ServiceError::network("remote mode requires a base URL"))?;
                let backend = RestBackend::with_timeout(base, config.request_timeout())?;
                Ok(Self {
                    store: None,
                    backend: Some(Arc::new(backend)),
                    clock,
                    rng_seed: config.rng_seed(),
                })
            }
        }
    }

    /// Mock-mode factory over an injected store (shared across bundles and
    /// test fixtures).
    #[must_use]
    pub fn with_store(
        store: Arc<dyn CollectionStore>,
        clock: Arc<dyn Clock>,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            store: Some(store),
            backend: None,
            clock,
            rng_seed,
        }
    }

    /// Build the service for one entity, seeding mock collections with
    /// `seed` on first access.
    #[must_use]
    pub fn build<E: EntityKind>(&self, seed: Vec<Stamped<E>>) -> Arc<dyn EntityService<E>> {
        if let Some(backend) = &self.backend {
            return Arc::new(RemoteService::new(RemoteCollection::new(backend.clone())));
        }
        let store = self
            .store
            .clone()
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let mut collection = Collection::new(store, self.clock.clone(), seed);
        if let Some(rng_seed) = self.rng_seed {
            collection = collection.with_rng_seed(rng_seed);
        }
        Arc::new(LocalService::new(collection))
    }
}
