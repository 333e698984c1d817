//! # Wallet Bus - Typed Event Channel Between Connectors and the Registry
//!
//! Each connector owns one [`ConnectorEmitter`]; the registry subscribes to
//! it and receives [`ConnectorEvent`]s in emission order.
//!
//! ## Subscription Handles
//!
//! ```text
//! ┌──────────────┐                      ┌──────────────────┐
//! │  Connector   │                      │  Wallet Registry │
//! │              │       emit()         │                  │
//! │  (emitter)   │ ───────┐             │                  │
//! └──────────────┘        │             └──────────────────┘
//!                         ▼                      ↑
//!                  ┌──────────────┐              │
//!                  │ Event Channel│ ─────────────┘
//!                  │              │   subscribe() -> EventSubscription
//!                  └──────────────┘
//! ```
//!
//! A subscription is an explicit handle: dropping it detaches exactly the
//! listener it installed and nothing else. There is no way to clear
//! listeners installed by other parties, so a registry teardown can never
//! disturb a connector's unrelated subscribers.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod emitter;
pub mod events;
pub mod subscription;

// Re-export main types
pub use emitter::ConnectorEmitter;
pub use events::{ConnectorEvent, ConnectorUpdate, EventKind};
pub use subscription::{EventStream, EventSubscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
