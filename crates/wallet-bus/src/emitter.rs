//! # Connector Emitter
//!
//! Defines the emitting side of a connector's event channel.

use crate::events::ConnectorEvent;
use crate::subscription::{EventStream, EventSubscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Event channel owned by a connector.
///
/// Uses `tokio::sync::broadcast` for multi-subscriber semantics. A connector
/// emits; every live [`EventSubscription`] receives the event in emission
/// order.
pub struct ConnectorEmitter {
    /// Broadcast sender for events.
    sender: broadcast::Sender<ConnectorEvent>,

    /// Live subscription handles.
    listeners: Arc<AtomicUsize>,

    /// Total events emitted.
    events_emitted: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl ConnectorEmitter {
    /// Create a new emitter with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new emitter with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            listeners: Arc::new(AtomicUsize::new(0)),
            events_emitted: AtomicU64::new(0),
            capacity,
        }
    }

    /// Emit an event to all subscribers.
    ///
    /// # Returns
    ///
    /// The number of active subscriptions that received the event.
    pub fn emit(&self, event: ConnectorEvent) -> usize {
        let kind = event.kind();

        // Always increment counter (emission was attempted)
        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(kind = ?kind, receivers = receiver_count, "Connector event emitted");
                receiver_count
            }
            Err(e) => {
                // No receivers - event is dropped
                warn!(kind = ?kind, error = %e, "Connector event dropped (no receivers)");
                0
            }
        }
    }

    /// Subscribe to this connector's events.
    ///
    /// Returns an [`EventSubscription`] handle; dropping it detaches exactly
    /// this listener.
    #[must_use]
    pub fn subscribe(&self) -> EventSubscription {
        let receiver = self.sender.subscribe();
        self.listeners.fetch_add(1, Ordering::Relaxed);

        debug!(listeners = self.listener_count(), "New connector subscription");

        EventSubscription::new(receiver, self.listeners.clone())
    }

    /// Get a stream of events from this connector.
    ///
    /// This is a convenience method that returns an `EventStream`.
    #[must_use]
    pub fn event_stream(&self) -> EventStream {
        EventStream::new(self.subscribe())
    }

    /// Number of live subscription handles.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.load(Ordering::Relaxed)
    }

    /// Total events emitted.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConnectorEmitter {
    fn default() -> Self {
        Self::new()
    }
}
