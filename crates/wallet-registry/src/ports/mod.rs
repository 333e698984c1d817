//! # Ports Module
//!
//! Hexagonal architecture ports (outbound connector capability).

pub mod outbound;

pub use outbound::*;
