//! # Error Types
//!
//! Defines the failure taxonomy captured into slot state.
//!
//! None of these cross the registry boundary as Rust errors; consumers
//! observe them through the published snapshot's `error` field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures recorded in a chain slot.
///
/// Stored in published state, so this type is `Clone + PartialEq` and
/// serializable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RegistryError {
    /// The connector's `activate()` rejected.
    #[error("activation failed: {0}")]
    Activation(String),

    /// The connector's emitter raised an error event.
    #[error("connector error: {0}")]
    Connector(String),

    /// The connector deactivated on its own.
    #[error("connector deactivated: {reason}")]
    Deactivated {
        /// Connector-supplied reason, surfaced for diagnostics.
        reason: String,
    },
}

/// Opaque failure returned by a connector's `activate()`/`deactivate()`.
///
/// Connectors are external capabilities; the registry never inspects their
/// failures beyond recording the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConnectorFailure(pub String);

impl ConnectorFailure {
    /// Create a failure from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
