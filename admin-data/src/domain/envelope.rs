//! The uniform `{ ok, data }` result wrapper.
//!
//! Every service operation resolves to an envelope regardless of which
//! adapter served it, so page controllers stay mode-agnostic. `ok: false`
//! is reserved for not-found-on-mutate; transport and store failures travel
//! as errors, never as envelopes.

use serde::{Deserialize, Serialize};

/// Uniform service result wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful result carrying a payload.
    #[must_use]
    pub const fn hit(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
        }
    }

    /// The not-found-on-mutate signal: `ok: false`, no payload.
    #[must_use]
    pub const fn miss() -> Self {
        Self {
            ok: false,
            data: None,
        }
    }

    /// Whether the operation took its success path.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.ok
    }

    /// Borrow the payload, when present.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume the envelope, keeping the payload.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn hit_serialises_with_payload() {
        let value = serde_json::to_value(Envelope::hit(vec![1, 2])).expect("serialises");

        assert_eq!(value, json!({ "ok": true, "data": [1, 2] }));
    }

    #[test]
    fn miss_omits_the_data_key() {
        let value = serde_json::to_value(Envelope::<u32>::miss()).expect("serialises");

        assert_eq!(value, json!({ "ok": false }));
    }

    #[test]
    fn miss_round_trips() {
        let envelope: Envelope<u32> =
            serde_json::from_value(json!({ "ok": false })).expect("deserialises");

        assert!(!envelope.ok());
        assert!(envelope.data().is_none());
    }
}
