//! # Event Subscription
//!
//! Defines the receiving side of a connector's event channel.

use crate::events::ConnectorEvent;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The emitter was dropped.
    #[error("Connector emitter closed")]
    Closed,
}

/// A subscription handle for receiving connector events.
///
/// When dropped, the listener it installed is detached; listeners installed
/// by other parties are untouched.
pub struct EventSubscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<ConnectorEvent>,

    /// Shared listener count on the emitter (for cleanup).
    listeners: Arc<AtomicUsize>,
}

impl EventSubscription {
    /// Create a new subscription.
    pub(crate) fn new(
        receiver: broadcast::Receiver<ConnectorEvent>,
        listeners: Arc<AtomicUsize>,
    ) -> Self {
        Self { receiver, listeners }
    }

    /// Receive the next event.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next event, in emission order
    /// - `None` - The emitter was dropped
    pub async fn recv(&mut self) -> Option<ConnectorEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The emitter was dropped
    pub fn try_recv(&mut self) -> Result<Option<ConnectorEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Ok(Some(event)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            }
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let remaining = self.listeners.fetch_sub(1, Ordering::Relaxed);
        debug!(listeners = remaining.saturating_sub(1), "Subscription dropped");
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct EventStream {
    subscription: EventSubscription,
}

impl EventStream {
    /// Create a new event stream from a subscription.
    #[must_use]
    pub fn new(subscription: EventSubscription) -> Self {
        Self { subscription }
    }
}

impl Stream for EventStream {
    type Item = ConnectorEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // `recv` is cancel-safe, so a fresh future per poll loses nothing;
        // polling it registers the waker with the broadcast channel.
        let this = self.get_mut();
        let recv = std::pin::pin!(this.subscription.recv());
        recv.poll(cx)
    }
}
