//! Generic mock-mode repository over a [`CollectionStore`].
//!
//! One `Collection<E>` owns one entity collection: it seeds the store on
//! first access, runs the shared filter/sort/page engine, and performs the
//! create/update/delete mutations with service-assigned identifiers and
//! stamps. Each operation is a single read-modify-write of the whole
//! document; within one store that makes writes last-write-wins, exactly
//! like the key-value storage it stands in for.

use std::sync::{Arc, Mutex};

use mockable::Clock;
use pagination::{Page, PageRequest};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::domain::ports::CollectionStore;
use crate::domain::{
    EntityId, EntityKind, Patch, ServiceError, StoreError, apply_patch, ListQuery, Stamped,
};

/// Mock-mode repository for one entity collection.
pub struct Collection<E: EntityKind> {
    store: Arc<dyn CollectionStore>,
    clock: Arc<dyn Clock>,
    rng: Mutex<SmallRng>,
    seed: Vec<Stamped<E>>,
}

impl<E: EntityKind> Collection<E> {
    /// Build a collection over `store`, seeding with `seed` on first access.
    #[must_use]
    pub fn new(store: Arc<dyn CollectionStore>, clock: Arc<dyn Clock>, seed: Vec<Stamped<E>>) -> Self {
        Self {
            store,
            clock,
            rng: Mutex::new(SmallRng::from_entropy()),
            seed,
        }
    }

    /// Pin the identifier RNG for deterministic tests.
    #[must_use]
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng = Mutex::new(SmallRng::seed_from_u64(rng_seed));
        self
    }

    /// Full filtered collection in query order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Stamped<E>>, ServiceError> {
        Ok(query.apply(self.rows().await?))
    }

    /// One page of the filtered collection.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails.
    pub async fn list_page(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Page<Stamped<E>>, ServiceError> {
        Ok(Page::slice(self.list(query).await?, &page))
    }

    /// Look up one record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails.
    pub async fn find(&self, id: &EntityId) -> Result<Option<Stamped<E>>, ServiceError> {
        let rows = self.rows().await?;
        Ok(rows.into_iter().find(|record| record.id() == id))
    }

    /// Create a record: assign an identifier, stamp it, prepend, persist.
    ///
    /// Insertion order is therefore reverse-chronological, which is the
    /// default list order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails.
    pub async fn create(&self, fields: E) -> Result<Stamped<E>, ServiceError> {
        let mut rows = self.rows().await?;
        let id = self.fresh_id(&rows);
        let record = Stamped::new(id, self.now_ms(), fields);
        rows.insert(0, record.clone());
        self.persist(&rows).await?;
        Ok(record)
    }

    /// Shallow-merge `patch` over the record with `id`.
    ///
    /// Resolves to `None` when the identifier is absent; the service layer
    /// turns that into `ok: false`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails, or
    /// [`ServiceError::Patch`] when the merged record no longer matches the
    /// entity schema.
    pub async fn update(
        &self,
        id: &EntityId,
        patch: &Patch,
    ) -> Result<Option<Stamped<E>>, ServiceError> {
        let mut rows = self.rows().await?;
        let Some(slot) = rows.iter_mut().find(|record| record.id() == id) else {
            return Ok(None);
        };
        let mut merged = apply_patch(slot, patch)?;
        merged.touch(self.clock.utc().timestamp_millis());
        *slot = merged.clone();
        self.persist(&rows).await?;
        Ok(Some(merged))
    }

    /// Remove the record with `id`. Absent identifiers are a quiet no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails.
    pub async fn delete(&self, id: &EntityId) -> Result<(), ServiceError> {
        let mut rows = self.rows().await?;
        let before = rows.len();
        rows.retain(|record| record.id() != id);
        if rows.len() != before {
            self.persist(&rows).await?;
        }
        Ok(())
    }

    /// Apply `patch` to every record whose discrete `field` equals `value`.
    ///
    /// The named compensating operation: cross-collection cleanups call this
    /// instead of hand-rolling the reassignment inline.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the backing store fails, or
    /// [`ServiceError::Patch`] when a merged record no longer matches the
    /// entity schema.
    pub async fn update_where(
        &self,
        field: &str,
        value: &str,
        patch: &Patch,
    ) -> Result<u64, ServiceError> {
        let mut rows = self.rows().await?;
        let now = self.now_ms();
        let mut touched = 0u64;
        for slot in rows
            .iter_mut()
            .filter(|record| record.fields().discrete_field(field).as_deref() == Some(value))
        {
            let mut merged = apply_patch(slot, patch)?;
            merged.touch(now);
            *slot = merged;
            touched += 1;
        }
        if touched > 0 {
            self.persist(&rows).await?;
        }
        debug!(
            collection = E::STORE_KEY,
            field, value, touched, "compensating update applied"
        );
        Ok(touched)
    }

    /// Load the collection, writing the seed on first access.
    async fn rows(&self) -> Result<Vec<Stamped<E>>, ServiceError> {
        match self.store.load(E::STORE_KEY).await? {
            Some(document) => serde_json::from_value(document)
                .map_err(|error| StoreError::corrupt(E::STORE_KEY, error.to_string()).into()),
            None => {
                debug!(collection = E::STORE_KEY, rows = self.seed.len(), "seeding store");
                self.persist(&self.seed).await?;
                Ok(self.seed.clone())
            }
        }
    }

    async fn persist(&self, rows: &[Stamped<E>]) -> Result<(), ServiceError> {
        let document = serde_json::to_value(rows)
            .map_err(|error| StoreError::write(E::STORE_KEY, error.to_string()))?;
        self.store.save(E::STORE_KEY, &document).await?;
        Ok(())
    }

    /// Draw identifiers until one is free in this collection.
    fn fresh_id(&self, rows: &[Stamped<E>]) -> EntityId {
        // A poisoned RNG is still a usable RNG.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        loop {
            let candidate = EntityId::generate(E::ID_PREFIX, &mut *rng);
            if !rows.iter().any(|record| record.id() == &candidate) {
                return candidate;
            }
        }
    }

    fn now_ms(&self) -> i64 {
        self.clock.utc().timestamp_millis()
    }
}
