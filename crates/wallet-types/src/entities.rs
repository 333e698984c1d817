//! # Domain Entities
//!
//! Core value types shared across Wallet-Hub crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-defined identifier for a blockchain family ("ethereum", "bitcoin").
///
/// Distinct from [`Network`]: a chain key names which blockchain a connector
/// serves, while the network names the environment (main/test) the
/// connection is validated against.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainKey(String);

impl ChainKey {
    /// Create a new chain key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The underlying key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChainKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ChainKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Supported network environments.
///
/// The registry holds a single process-wide target network; every slot's
/// connection is validated against it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
    /// Local development network.
    Devnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        };
        f.write_str(name)
    }
}

/// Opaque provider handle reported by a connector.
///
/// Chain-specific (an RPC endpoint, an injected provider id); the registry
/// records and publishes it without interpretation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provider(pub String);

/// Opaque account handle reported by a connector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(pub String);

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
