//! # Status Rules
//!
//! Pure rules the state machine applies on every activation result and
//! update event.

use wallet_types::{ConnectionStatus, Network};

/// Status for a live connector given the network it reports.
///
/// A connector on the target network is `Connected`; a live connector on
/// any other network is `WrongNetwork`. Both activation success and update
/// events go through this rule, so the two paths can never disagree.
#[must_use]
pub fn status_for(reported: Network, target: Network) -> ConnectionStatus {
    if reported == target {
        ConnectionStatus::Connected
    } else {
        ConnectionStatus::WrongNetwork
    }
}
