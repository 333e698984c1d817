//! # Wallet Types Crate
//!
//! This crate contains the domain vocabulary shared across Wallet-Hub
//! crates: chain keys, network environments, connection statuses, and the
//! error taxonomy.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Opaque Handles**: `Provider` and `Account` carry chain-specific
//!   values the registry never interprets; it only records and publishes
//!   them.
//! - **Errors Are State**: Connector failures are captured into slot state
//!   as `RegistryError` values, never propagated as Rust errors past the
//!   registry boundary.

pub mod entities;
pub mod errors;
pub mod status;

pub use entities::*;
pub use errors::*;
pub use status::ConnectionStatus;
