//! # Domain Entities
//!
//! The registry state published to consumers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wallet_types::{Account, ChainKey, ConnectionStatus, Network, Provider, RegistryError};

/// Published per-chain connection record.
///
/// A plain value: the connector itself stays inside the registry, consumers
/// only see its derived state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainSlot {
    /// Current connection status.
    pub status: ConnectionStatus,
    /// Provider handle, set once activation or an update succeeds.
    pub provider: Option<Provider>,
    /// Account handle, set once activation or an update succeeds.
    pub account: Option<Account>,
    /// Last captured failure, if any.
    pub error: Option<RegistryError>,
}

impl ChainSlot {
    /// A fresh slot: activation triggered, outcome unknown.
    #[must_use]
    pub fn connecting() -> Self {
        Self::default()
    }
}

/// Immutable snapshot of the whole registry.
///
/// Republished through a watch channel on every transition; any
/// presentation layer or test harness can poll or subscribe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// One slot per chain with an assigned connector.
    pub enabled_chains: HashMap<ChainKey, ChainSlot>,
    /// Network environment every slot is validated against.
    pub target_network: Network,
}

impl RegistrySnapshot {
    /// An empty snapshot for the given target network.
    #[must_use]
    pub fn empty(target_network: Network) -> Self {
        Self {
            enabled_chains: HashMap::new(),
            target_network,
        }
    }

    /// Slot for a chain, if one exists.
    #[must_use]
    pub fn chain(&self, key: &ChainKey) -> Option<&ChainSlot> {
        self.enabled_chains.get(key)
    }

    /// Status for a chain, if a slot exists.
    #[must_use]
    pub fn status(&self, key: &ChainKey) -> Option<ConnectionStatus> {
        self.enabled_chains.get(key).map(|slot| slot.status)
    }
}
