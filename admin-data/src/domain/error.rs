//! Error types shared by the storage port and the data services.
//!
//! Adapters map their native failures into these variants so callers see a
//! predictable taxonomy: store IO problems, remote transport problems, and
//! payload problems. Not-found-on-mutate is deliberately *not* an error; it
//! travels as `ok: false` inside the envelope.

use serde_json::Value;
use thiserror::Error;

/// Failures raised by [`crate::domain::ports::CollectionStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be read.
    #[error("store read failed for key {key}: {message}")]
    Read {
        /// Collection key being read.
        key: String,
        /// Adapter-reported failure detail.
        message: String,
    },
    /// The backing store could not be written.
    #[error("store write failed for key {key}: {message}")]
    Write {
        /// Collection key being written.
        key: String,
        /// Adapter-reported failure detail.
        message: String,
    },
    /// The stored document is not valid JSON for the collection.
    #[error("store document under key {key} is corrupt: {message}")]
    Corrupt {
        /// Collection key holding the document.
        key: String,
        /// Decode failure detail.
        message: String,
    },
}

impl StoreError {
    /// Helper for read failures.
    pub fn read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Helper for corrupt documents.
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Failures surfaced by data services, across both modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Local store failure (mock mode).
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The remote request never produced a response.
    #[error("transport failure: {message}")]
    Network {
        /// Client-reported failure detail.
        message: String,
    },
    /// The remote answered with a non-2xx status.
    #[error("remote returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Decoded response body, when the remote sent JSON.
        data: Option<Value>,
    },
    /// A response body could not be decoded into the expected shape.
    #[error("payload could not be decoded: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
    /// A patch or draft could not be applied to a record.
    #[error("patch could not be applied: {message}")]
    Patch {
        /// Merge failure detail.
        message: String,
    },
}

impl ServiceError {
    /// Helper for transport-level failures.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Helper for non-2xx responses, keeping the decoded body when present.
    #[must_use]
    pub const fn status(status: u16, data: Option<Value>) -> Self {
        Self::Status { status, data }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Helper for merge failures.
    pub fn patch(message: impl Into<String>) -> Self {
        Self::Patch {
            message: message.into(),
        }
    }
}
