//! Shallow-merge patch documents for update operations.
//!
//! Updates are expressed as a set of top-level field assignments merged over
//! the existing record, reproducing the original panels' object-spread
//! semantics: a patched field replaces the old value wholesale (nested
//! objects are not deep-merged), untouched fields survive. The identity and
//! stamp keys are reserved to the service and stripped from every patch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{EntityKind, Stamped};
use super::error::ServiceError;

/// Wire keys a patch may never set.
const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// A shallow top-level merge document keyed by wire field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// An empty patch. Merging it refreshes `updatedAt` and nothing else.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one field assignment, replacing any earlier assignment of it.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    /// Build a whole-record patch from a drawer draft.
    ///
    /// The draft must serialise to a JSON object; reserved keys, if the
    /// draft happens to carry them, are ignored at merge time.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Patch`] when the draft does not serialise to
    /// an object.
    pub fn from_draft<T: Serialize>(draft: &T) -> Result<Self, ServiceError> {
        match serde_json::to_value(draft) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(ServiceError::patch(format!(
                "draft must serialise to an object, got {other}"
            ))),
            Err(error) => Err(ServiceError::patch(error.to_string())),
        }
    }

    /// Whether the patch assigns any mergeable field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Assignments that will actually merge, with reserved keys stripped.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
    }

    /// The sanitised merge document as a JSON object.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let map: Map<String, Value> = self
            .entries()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Value::Object(map)
    }
}

/// Merge a patch over a stamped record, leaving the stamps untouched.
///
/// The caller refreshes `updatedAt` afterwards; this function only performs
/// the shallow field merge and re-materialises the typed record.
pub(crate) fn apply_patch<E: EntityKind>(
    record: &Stamped<E>,
    patch: &Patch,
) -> Result<Stamped<E>, ServiceError> {
    let serialised =
        serde_json::to_value(record).map_err(|error| ServiceError::patch(error.to_string()))?;
    let Value::Object(mut map) = serialised else {
        return Err(ServiceError::patch("record did not serialise to an object"));
    };
    for (key, value) in patch.entries() {
        map.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(map))
        .map_err(|error| ServiceError::patch(error.to_string()))
}
