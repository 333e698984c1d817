//! # Connection Status
//!
//! Per-slot connection state machine states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection status of a chain slot.
///
/// `Disconnected` is reachable from every state and re-enterable; there is
/// no separate terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Activation triggered, outcome not yet known.
    #[default]
    Connecting,
    /// Connector reported a network matching the target.
    Connected,
    /// Connector failed, errored, or deactivated.
    Disconnected,
    /// Connector is live but on a network other than the target.
    WrongNetwork,
}

impl ConnectionStatus {
    /// Whether the slot is live from the registry's point of view.
    ///
    /// Live slots make a repeated activation request with the same connector
    /// a no-op; `Disconnected` and `WrongNetwork` slots accept a fresh
    /// attempt.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }

    /// Whether eviction should ask the connector to deactivate.
    #[must_use]
    pub fn needs_deactivation(&self) -> bool {
        !matches!(self, Self::Disconnected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::WrongNetwork => "wrong_network",
        };
        f.write_str(name)
    }
}
