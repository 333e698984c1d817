//! # Outbound Ports
//!
//! Trait for the external connector capability.

use async_trait::async_trait;
use wallet_bus::{ConnectorUpdate, EventSubscription};
use wallet_types::ConnectorFailure;

/// Wallet connector capability - outbound port.
///
/// Supplied by the host application, one per chain. The registry drives its
/// lifecycle but never owns or destroys it; the same instance may be handed
/// back for re-activation after a disconnect.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish the connection.
    ///
    /// Resolves with the provider/account/network triple once the wallet is
    /// reachable. May take arbitrarily long (user interaction); the registry
    /// imposes no timeout.
    async fn activate(&self) -> Result<ConnectorUpdate, ConnectorFailure>;

    /// Tear the connection down.
    async fn deactivate(&self) -> Result<(), ConnectorFailure>;

    /// Subscribe to this connector's events.
    ///
    /// Each call installs one fresh listener; dropping the returned handle
    /// detaches exactly that listener.
    fn subscribe(&self) -> EventSubscription;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use wallet_bus::{ConnectorEmitter, ConnectorEvent};
use wallet_types::{Account, Network, Provider};

/// Mock connector for testing.
///
/// Configurable activation outcome and optional artificial activation delay
/// (for racing a replacement against an in-flight activation).
pub struct MockConnector {
    emitter: ConnectorEmitter,
    outcome: Mutex<Result<ConnectorUpdate, ConnectorFailure>>,
    delay: Mutex<Option<Duration>>,
    fail_deactivate: AtomicBool,
    activate_calls: AtomicUsize,
    deactivate_calls: AtomicUsize,
}

impl MockConnector {
    /// A connector whose activation resolves on the given network.
    #[must_use]
    pub fn on_network(network: Network) -> Self {
        Self::resolving(ConnectorUpdate {
            provider: Provider(format!("mock-provider-{network}")),
            account: Some(Account("0xmock".to_owned())),
            network,
        })
    }

    /// A connector whose activation resolves with the given update.
    #[must_use]
    pub fn resolving(update: ConnectorUpdate) -> Self {
        Self {
            emitter: ConnectorEmitter::new(),
            outcome: Mutex::new(Ok(update)),
            delay: Mutex::new(None),
            fail_deactivate: AtomicBool::new(false),
            activate_calls: AtomicUsize::new(0),
            deactivate_calls: AtomicUsize::new(0),
        }
    }

    /// A connector whose activation rejects.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            emitter: ConnectorEmitter::new(),
            outcome: Mutex::new(Err(ConnectorFailure::new(message))),
            delay: Mutex::new(None),
            fail_deactivate: AtomicBool::new(false),
            activate_calls: AtomicUsize::new(0),
            deactivate_calls: AtomicUsize::new(0),
        }
    }

    /// Replace the activation outcome for subsequent calls.
    pub fn set_outcome(&self, outcome: Result<ConnectorUpdate, ConnectorFailure>) {
        *self.outcome.lock() = outcome;
    }

    /// Delay every activation by the given duration.
    pub fn set_activation_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    /// Make `deactivate()` reject.
    pub fn fail_deactivation(&self) {
        self.fail_deactivate.store(true, Ordering::Relaxed);
    }

    /// Emit an event as this connector.
    pub fn emit(&self, event: ConnectorEvent) -> usize {
        self.emitter.emit(event)
    }

    /// Live listener subscriptions on this connector.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.emitter.listener_count()
    }

    /// Number of `activate()` calls.
    #[must_use]
    pub fn activate_calls(&self) -> usize {
        self.activate_calls.load(Ordering::Relaxed)
    }

    /// Number of `deactivate()` calls.
    #[must_use]
    pub fn deactivate_calls(&self) -> usize {
        self.deactivate_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn activate(&self) -> Result<ConnectorUpdate, ConnectorFailure> {
        self.activate_calls.fetch_add(1, Ordering::Relaxed);

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.lock().clone()
    }

    async fn deactivate(&self) -> Result<(), ConnectorFailure> {
        self.deactivate_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_deactivate.load(Ordering::Relaxed) {
            return Err(ConnectorFailure::new("mock deactivation failure"));
        }
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        self.emitter.subscribe()
    }
}
