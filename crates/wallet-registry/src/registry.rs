//! # Wallet Registry
//!
//! The connector-lifecycle state machine.
//!
//! One slot per chain key. Installing a connector subscribes to its events,
//! drives `activate()`, and recomputes the slot's status on every activation
//! result and every subsequent event. Every transition republishes the full
//! registry snapshot through a watch channel.
//!
//! ## Stale guards
//!
//! Eviction cannot force-abort an in-flight `activate()`; it only discards
//! its effect. Each slot install gets a unique `generation` and each
//! activation drive a fresh `attempt` number; a result or event is applied
//! only if the slot still carries the same generation (and, for activation
//! results, the same attempt). A connector evicted mid-activation can
//! therefore resolve late without touching its replacement.

use crate::domain::{status_for, ChainSlot, RegistrySnapshot};
use crate::ports::Connector;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wallet_bus::{ConnectorEvent, ConnectorUpdate, EventSubscription};
use wallet_types::{Account, ChainKey, ConnectionStatus, Network, Provider, RegistryError};

/// Identity comparison for connector instances.
///
/// Compares data pointers only; `Arc::ptr_eq` on trait objects also
/// compares vtable pointers, which are not unique across codegen units.
fn same_connector(a: &Arc<dyn Connector>, b: &Arc<dyn Connector>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}

/// Internal per-chain state.
///
/// Holds what the published [`ChainSlot`] does not: the connector itself,
/// the stale-guard tokens, and the listener task.
struct SlotState {
    connector: Arc<dyn Connector>,
    /// Unique per install; the stale-guard token for events and results.
    generation: u64,
    /// Bumped on every activation drive; orders overlapping drives.
    attempt: u64,
    status: ConnectionStatus,
    provider: Option<Provider>,
    account: Option<Account>,
    error: Option<RegistryError>,
    listener: Option<JoinHandle<()>>,
}

impl SlotState {
    fn connecting(connector: Arc<dyn Connector>, generation: u64) -> Self {
        Self {
            connector,
            generation,
            attempt: 0,
            status: ConnectionStatus::Connecting,
            provider: None,
            account: None,
            error: None,
            listener: None,
        }
    }

    fn view(&self) -> ChainSlot {
        ChainSlot {
            status: self.status,
            provider: self.provider.clone(),
            account: self.account.clone(),
            error: self.error.clone(),
        }
    }

    /// Activation-success / update-event transition.
    fn apply_update(&mut self, update: ConnectorUpdate, target: Network) {
        self.status = status_for(update.network, target);
        self.provider = Some(update.provider);
        self.account = update.account;
        self.error = None;
    }

    /// Failure transition: disconnected, failure captured, handles cleared.
    fn apply_failure(&mut self, error: RegistryError) {
        self.status = ConnectionStatus::Disconnected;
        self.provider = None;
        self.account = None;
        self.error = Some(error);
    }

    /// Stop the listener task, dropping its subscription.
    fn detach_listener(&mut self) {
        if let Some(task) = self.listener.take() {
            task.abort();
        }
    }
}

struct RegistryState {
    slots: HashMap<ChainKey, SlotState>,
    target: Network,
    next_generation: u64,
}

impl RegistryState {
    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            enabled_chains: self
                .slots
                .iter()
                .map(|(chain, slot)| (chain.clone(), slot.view()))
                .collect(),
            target_network: self.target,
        }
    }
}

struct RegistryInner {
    state: RwLock<RegistryState>,
    snapshot_tx: watch::Sender<RegistrySnapshot>,
}

impl RegistryInner {
    /// Republish the current snapshot to all subscribers.
    fn publish(&self) {
        let snapshot = self.state.read().snapshot();
        self.snapshot_tx.send_replace(snapshot);
    }

    /// Apply one connector event to its slot.
    ///
    /// The single dispatch point for all event kinds. Returns `true` when
    /// the listener should tear itself down (stale connector, evicted slot,
    /// or a terminal event).
    fn handle_event(&self, chain: &ChainKey, generation: u64, event: ConnectorEvent) -> bool {
        let teardown;
        {
            let mut state = self.state.write();
            let target = state.target;
            let Some(slot) = state.slots.get_mut(chain) else {
                debug!(chain = %chain, "Event for evicted chain ignored");
                return true;
            };
            if slot.generation != generation {
                debug!(chain = %chain, "Stale connector event ignored");
                return true;
            }

            teardown = match event {
                ConnectorEvent::Update(update) => {
                    slot.apply_update(update, target);
                    debug!(chain = %chain, status = %slot.status, "Connector update applied");
                    false
                }
                ConnectorEvent::Error { message } => {
                    warn!(chain = %chain, error = %message, "Connector raised an error");
                    slot.apply_failure(RegistryError::Connector(message));
                    true
                }
                ConnectorEvent::Deactivate { reason } => {
                    info!(chain = %chain, reason = %reason, "Connector deactivated itself");
                    slot.apply_failure(RegistryError::Deactivated { reason });
                    true
                }
            };
            if teardown {
                // The listener task exits after this call; only the handle
                // needs dropping.
                slot.listener = None;
            }
        }
        self.publish();
        teardown
    }

    /// Invoke `activate()` and apply the result, unless it went stale.
    async fn drive_activation(
        self: Arc<Self>,
        chain: ChainKey,
        generation: u64,
        attempt: u64,
        connector: Arc<dyn Connector>,
    ) {
        let result = connector.activate().await;
        {
            let mut state = self.state.write();
            let target = state.target;
            let Some(slot) = state.slots.get_mut(&chain) else {
                debug!(chain = %chain, "Activation result for evicted chain discarded");
                return;
            };
            if slot.generation != generation || slot.attempt != attempt {
                debug!(chain = %chain, "Stale activation result discarded");
                return;
            }

            match result {
                Ok(update) => {
                    slot.apply_update(update, target);
                    info!(chain = %chain, status = %slot.status, "Activation completed");
                }
                Err(failure) => {
                    warn!(chain = %chain, error = %failure, "Activation failed");
                    slot.apply_failure(RegistryError::Activation(failure.to_string()));
                }
            }
        }
        self.publish();
    }

    /// Forward a connector's events into the state machine.
    ///
    /// Holds the subscription for exactly one listener; exits (dropping it)
    /// when the connector closes, the registry is gone, or the slot no
    /// longer wants events.
    fn spawn_listener(
        inner: &Arc<Self>,
        chain: ChainKey,
        generation: u64,
        mut subscription: EventSubscription,
    ) -> JoinHandle<()> {
        let weak: Weak<RegistryInner> = Arc::downgrade(inner);
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                let Some(inner) = weak.upgrade() else { break };
                if inner.handle_event(&chain, generation, event) {
                    break;
                }
            }
        })
    }
}

/// Per-chain wallet connector registry.
///
/// Cheap to clone; all clones share the same state. All connector failures
/// are captured into slot state, so no method returns an error.
#[derive(Clone)]
pub struct WalletRegistry {
    inner: Arc<RegistryInner>,
}

impl WalletRegistry {
    /// Create a registry validating connections against `target`.
    #[must_use]
    pub fn new(target: Network) -> Self {
        let (snapshot_tx, _) = watch::channel(RegistrySnapshot::empty(target));
        Self {
            inner: Arc::new(RegistryInner {
                state: RwLock::new(RegistryState {
                    slots: HashMap::new(),
                    target,
                    next_generation: 0,
                }),
                snapshot_tx,
            }),
        }
    }

    /// Use `connector` for `chain`.
    ///
    /// Evicts any previously assigned connector (detaching its subscription
    /// and awaiting its `deactivate()` first), installs the new slot as
    /// `connecting`, subscribes to the connector's events, and drives
    /// `activate()`. Re-requesting the connector already live on the chain
    /// is a no-op.
    pub async fn activate_connector(
        &self,
        chain: impl Into<ChainKey>,
        connector: Arc<dyn Connector>,
    ) {
        let chain = chain.into();

        // Idempotent re-entry guard: same instance, still live.
        {
            let state = self.inner.state.read();
            if let Some(slot) = state.slots.get(&chain) {
                if same_connector(&slot.connector, &connector) && slot.status.is_live() {
                    debug!(chain = %chain, "Connector already active, ignoring");
                    return;
                }
            }
        }

        // Evict the prior slot. Listeners are detached before anything else
        // so no event from the old connector can land on the new slot.
        let prior = self.inner.state.write().slots.remove(&chain);
        if let Some(mut prior) = prior {
            prior.detach_listener();
            if prior.status.needs_deactivation() {
                // Swallowed: the registry surface never propagates
                // connector failures.
                if let Err(failure) = prior.connector.deactivate().await {
                    warn!(chain = %chain, error = %failure, "Deactivation failed during eviction");
                }
            }
            info!(chain = %chain, "Prior connector evicted");
            self.inner.publish();
        }

        // Install the new slot as connecting.
        let (generation, attempt) = {
            let mut state = self.inner.state.write();
            state.next_generation += 1;
            let generation = state.next_generation;
            let mut slot = SlotState::connecting(connector.clone(), generation);
            slot.attempt = 1;
            // A concurrent activation may have installed a slot between the
            // eviction and here; its listener must not outlive it.
            if let Some(mut displaced) = state.slots.insert(chain.clone(), slot) {
                displaced.detach_listener();
            }
            (generation, 1)
        };
        self.inner.publish();

        // Subscribe before activate(): the connector may emit an update
        // mid-activation and it must not be missed.
        let subscription = connector.subscribe();
        let listener =
            RegistryInner::spawn_listener(&self.inner, chain.clone(), generation, subscription);
        {
            let mut state = self.inner.state.write();
            match state.slots.get_mut(&chain) {
                Some(slot) if slot.generation == generation => slot.listener = Some(listener),
                // The slot was replaced while subscribing; the listener is
                // stale before it started.
                _ => listener.abort(),
            }
        }

        self.inner
            .clone()
            .drive_activation(chain, generation, attempt, connector)
            .await;
    }

    /// Change the target network.
    ///
    /// Republishes the snapshot and re-drives every slot's activation so
    /// `wrong_network` slots can recover and `connected` slots re-validate
    /// against the new target. A no-op when the target is unchanged.
    ///
    /// # Panics
    ///
    /// Listener and re-activation tasks are spawned on Tokio; calling this
    /// outside a runtime panics unless no slot needs re-driving.
    pub fn set_target_network(&self, network: Network) {
        type Drive = (ChainKey, u64, u64, Arc<dyn Connector>);
        let drives: Vec<Drive> = {
            let mut state = self.inner.state.write();
            if state.target == network {
                debug!(network = %network, "Target network unchanged");
                return;
            }
            info!(network = %network, "Target network changed");
            state.target = network;
            let inner = &self.inner;
            state
                .slots
                .iter_mut()
                .map(|(chain, slot)| {
                    slot.attempt += 1;
                    // A slot disconnected by a terminal event has no
                    // listener; the fresh attempt needs one installed
                    // before activate() runs.
                    if slot.listener.is_none() {
                        let subscription = slot.connector.subscribe();
                        slot.listener = Some(RegistryInner::spawn_listener(
                            inner,
                            chain.clone(),
                            slot.generation,
                            subscription,
                        ));
                    }
                    (
                        chain.clone(),
                        slot.generation,
                        slot.attempt,
                        slot.connector.clone(),
                    )
                })
                .collect()
        };
        self.inner.publish();

        for (chain, generation, attempt, connector) in drives {
            let inner = self.inner.clone();
            tokio::spawn(async move {
                inner
                    .drive_activation(chain, generation, attempt, connector)
                    .await;
            });
        }
    }

    /// Current registry snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RegistrySnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Current target network.
    #[must_use]
    pub fn target_network(&self) -> Network {
        self.inner.state.read().target
    }
}
