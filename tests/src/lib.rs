//! # Wallet-Hub Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate registry scenarios
//!     ├── lifecycle.rs  # Activation, eviction, failure capture
//!     ├── listeners.rs  # Subscription hygiene, stale guards
//!     └── network.rs    # Target-network changes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wh-tests
//!
//! # By category
//! cargo test -p wh-tests integration::lifecycle::
//! cargo test -p wh-tests integration::listeners::
//! cargo test -p wh-tests integration::network::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]


use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use wallet_registry::RegistrySnapshot;

/// How long scenario helpers wait before declaring a condition unreachable.
pub const WAIT_BUDGET: Duration = Duration::from_secs(2);

/// Opt-in log output for debugging test runs (`RUST_LOG=debug`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Wait until the published snapshot satisfies `predicate`.
///
/// Checks the current value first, then follows the watch channel.
/// Panics when the budget elapses, so failures surface as test timeouts
/// with a message instead of hangs.
pub async fn wait_for_snapshot(
    rx: &mut watch::Receiver<RegistrySnapshot>,
    predicate: impl Fn(&RegistrySnapshot) -> bool,
) -> RegistrySnapshot {
    timeout(WAIT_BUDGET, async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("registry dropped");
        }
    })
    .await
    .expect("snapshot condition not reached in time")
}

/// Wait until `predicate` holds (for out-of-band state such as listener
/// counts, which settle when a detached task is actually dropped).
pub async fn wait_until(predicate: impl Fn() -> bool) {
    timeout(WAIT_BUDGET, async {
        while !predicate() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Let in-flight listener tasks run.
pub async fn settle() {
    sleep(Duration::from_millis(25)).await;
}
