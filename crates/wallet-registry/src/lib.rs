//! # Wallet Registry
//!
//! Connector-lifecycle state machine for multi-chain wallet connections.
//!
//! ## Purpose
//!
//! Coordinate one wallet connector per chain inside a client application:
//! - Activate, deactivate, and swap connectors without leaking listeners
//! - Detect network mismatches against a process-wide target network
//! - Publish an immutable per-chain state snapshot on every transition
//!
//! ## Module Structure
//!
//! ```text
//! wallet-registry/
//! ├── domain/          # ChainSlot, RegistrySnapshot, status rules
//! ├── ports/           # Connector capability trait, MockConnector
//! └── registry.rs      # WalletRegistry state machine
//! ```
//!
//! ## Guarantees
//!
//! - At most one slot per chain key; a replacement fully detaches the old
//!   connector's subscription before the new slot is installed.
//! - At most one live listener subscription per active connector.
//! - The public surface never returns an error: connector failures are
//!   captured into slot state and observed through the snapshot.
//!
//! ## Runtime requirements
//!
//! The registry runs listener and re-activation tasks on Tokio. Every
//! method that installs or re-drives a connector — including the
//! synchronous [`WalletRegistry::set_target_network`] — must be called
//! from within a Tokio runtime and panics otherwise.
//!
//! ## Limitations
//!
//! There is no explicit chain-removal API. A slot is removed only when a
//! different connector is activated for its chain; a chain that should no
//! longer be used keeps its last slot (typically `disconnected`) in the
//! snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod registry;

// Re-exports
pub use domain::{status_for, ChainSlot, RegistrySnapshot};
pub use ports::{Connector, MockConnector};
pub use registry::WalletRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
