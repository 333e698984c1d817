//! # Connector Events
//!
//! Defines the typed events a connector emits toward the registry.
//!
//! Every payload is a tagged variant; the registry dispatches all three
//! kinds through a single match, so no event can arrive untyped or
//! unhandled.

use serde::{Deserialize, Serialize};
use wallet_types::{Account, Network, Provider};

/// Connection details reported by a connector.
///
/// Returned by a successful `activate()` and carried by every
/// [`ConnectorEvent::Update`]; both paths recompute slot status the same
/// way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorUpdate {
    /// Chain-specific provider handle.
    pub provider: Provider,
    /// Connected account, if the connector exposes one.
    pub account: Option<Account>,
    /// Network the connector is currently on.
    pub network: Network,
}

/// All events a connector can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorEvent {
    /// Connection details changed (account switch, network switch,
    /// provider swap). Also emitted by some connectors mid-activation.
    Update(ConnectorUpdate),

    /// The connector hit an error; the connection is no longer usable.
    Error {
        /// Connector-supplied error message.
        message: String,
    },

    /// The connector shut itself down (user disconnect, session expiry).
    Deactivate {
        /// Connector-supplied reason, surfaced for diagnostics.
        reason: String,
    },
}

impl ConnectorEvent {
    /// The kind of this event, for logging and assertions.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Update(_) => EventKind::Update,
            Self::Error { .. } => EventKind::Error,
            Self::Deactivate { .. } => EventKind::Deactivate,
        }
    }
}

/// Event discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// [`ConnectorEvent::Update`].
    Update,
    /// [`ConnectorEvent::Error`].
    Error,
    /// [`ConnectorEvent::Deactivate`].
    Deactivate,
}
