//! Entity identity and stamping primitives.
//!
//! Every managed record shares the same shell: an opaque string identifier,
//! service-assigned `createdAt`/`updatedAt` stamps in milliseconds since the
//! epoch, and entity-specific fields flattened alongside them. The
//! [`EntityKind`] trait carries the per-entity constants and field accessors
//! the generic collection engine needs, so the filtering and pagination
//! logic is written once and instantiated per entity.

use std::fmt;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Opaque entity identifier.
///
/// Identifiers are unique within one collection and immutable once created.
/// Mock mode generates them as an entity prefix followed by a random
/// integer; real mode treats them as server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh identifier as `prefix + random-int`.
    ///
    /// Collision handling belongs to the caller, which can see the whole
    /// collection; this function only produces candidates.
    pub fn generate(prefix: &str, rng: &mut impl Rng) -> Self {
        let number: u32 = rng.gen_range(100_000_000..1_000_000_000);
        Self(format!("{prefix}{number}"))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Entity fields wrapped with their service-assigned identity and stamps.
///
/// The wire shape flattens `fields`, so a stamped dish serialises as
/// `{ "id": …, "createdAt": …, "updatedAt": …, "title": … }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamped<T> {
    id: EntityId,
    created_at: i64,
    updated_at: i64,
    #[serde(flatten)]
    fields: T,
}

impl<T> Stamped<T> {
    /// Assemble a stamped record with both stamps set to `timestamp_ms`.
    ///
    /// Stamps are owned by the data service (and by seed data); callers of
    /// the service never supply them.
    #[must_use]
    pub const fn new(id: EntityId, timestamp_ms: i64, fields: T) -> Self {
        Self {
            id,
            created_at: timestamp_ms,
            updated_at: timestamp_ms,
            fields,
        }
    }

    /// The record's identifier.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Creation stamp in milliseconds since the epoch.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Last-mutation stamp in milliseconds since the epoch.
    #[must_use]
    pub const fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Entity-specific fields.
    #[must_use]
    pub const fn fields(&self) -> &T {
        &self.fields
    }

    /// Consume the wrapper, keeping only the entity fields.
    #[must_use]
    pub fn into_fields(self) -> T {
        self.fields
    }

    /// Refresh the mutation stamp after a merge.
    pub(crate) const fn touch(&mut self, timestamp_ms: i64) {
        self.updated_at = timestamp_ms;
    }
}

/// Per-entity descriptor consumed by the generic collection engine.
///
/// Implementations name where a collection lives (versioned store key,
/// REST resource segment), how identifiers are prefixed in mock mode, and
/// which fields participate in filtering.
pub trait EntityKind:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Versioned key the collection persists under (e.g. `admin_dishes_v1`).
    ///
    /// The trailing `_v1` suffix allows schema migration by key rotation: a
    /// breaking change bumps the suffix and the store reseeds.
    const STORE_KEY: &'static str;

    /// Prefix for identifiers generated in mock mode.
    const ID_PREFIX: &'static str;

    /// REST resource segment used by the remote adapter.
    const RESOURCE: &'static str;

    /// Haystacks for free-text matching, already in display form.
    fn search_text(&self) -> Vec<String>;

    /// Wire value of a named discrete filter field, if the entity has it.
    ///
    /// Returning `None` means the entity does not carry the field, so an
    /// active filter on it excludes the record.
    fn discrete_field(&self, field: &str) -> Option<String> {
        let _ = field;
        None
    }
}
