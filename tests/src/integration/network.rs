//! # Target-Network Changes
//!
//! Changing the process-wide target re-drives every slot's activation:
//! `wrong_network` slots recover, `connected` slots re-validate.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{settle, wait_for_snapshot, wait_until};
    use wallet_bus::{ConnectorEvent, ConnectorUpdate};
    use wallet_registry::{MockConnector, WalletRegistry};
    use wallet_types::{Account, ChainKey, ConnectionStatus, Network, Provider, RegistryError};

    fn update(provider: &str, network: Network) -> ConnectorUpdate {
        ConnectorUpdate {
            provider: Provider(provider.to_owned()),
            account: Some(Account("0xmock".to_owned())),
            network,
        }
    }

    #[tokio::test]
    async fn target_change_revalidates_every_slot() {
        let registry = WalletRegistry::new(Network::Mainnet);
        let eth = Arc::new(MockConnector::on_network(Network::Mainnet));
        let btc = Arc::new(MockConnector::on_network(Network::Mainnet));
        let mut rx = registry.subscribe();

        registry.activate_connector("eth", eth.clone()).await;
        registry.activate_connector("btc", btc.clone()).await;
        assert_eq!(
            registry.snapshot().status(&ChainKey::from("eth")),
            Some(ConnectionStatus::Connected)
        );

        // btc's wallet will follow the new target; eth's stays on mainnet.
        btc.set_outcome(Ok(update("wss://btc-node", Network::Testnet)));
        registry.set_target_network(Network::Testnet);

        let snapshot = wait_for_snapshot(&mut rx, |snap| {
            snap.status(&ChainKey::from("eth")) == Some(ConnectionStatus::WrongNetwork)
                && snap.status(&ChainKey::from("btc")) == Some(ConnectionStatus::Connected)
        })
        .await;

        assert_eq!(snapshot.target_network, Network::Testnet);
        // Both slots were re-driven through a fresh activation attempt.
        assert_eq!(eth.activate_calls(), 2);
        assert_eq!(btc.activate_calls(), 2);
    }

    #[tokio::test]
    async fn wrong_network_slot_recovers_when_target_follows() {
        let registry = WalletRegistry::new(Network::Testnet);
        let connector = Arc::new(MockConnector::on_network(Network::Mainnet));
        let mut rx = registry.subscribe();

        registry.activate_connector("eth", connector.clone()).await;
        assert_eq!(
            registry.snapshot().status(&ChainKey::from("eth")),
            Some(ConnectionStatus::WrongNetwork)
        );

        registry.set_target_network(Network::Mainnet);

        wait_for_snapshot(&mut rx, |snap| {
            snap.status(&ChainKey::from("eth")) == Some(ConnectionStatus::Connected)
        })
        .await;
        assert_eq!(connector.activate_calls(), 2);
        assert_eq!(connector.listener_count(), 1);
    }

    #[tokio::test]
    async fn unchanged_target_drives_nothing() {
        let registry = WalletRegistry::new(Network::Mainnet);
        let connector = Arc::new(MockConnector::on_network(Network::Mainnet));

        registry.activate_connector("eth", connector.clone()).await;
        registry.set_target_network(Network::Mainnet);
        settle().await;

        assert_eq!(connector.activate_calls(), 1);
        assert_eq!(registry.target_network(), Network::Mainnet);
    }

    #[tokio::test]
    async fn torn_down_slot_gets_fresh_listener_on_target_change() {
        let registry = WalletRegistry::new(Network::Mainnet);
        let connector = Arc::new(MockConnector::on_network(Network::Mainnet));
        let mut rx = registry.subscribe();

        registry.activate_connector("eth", connector.clone()).await;

        // A terminal error tears the slot's listener down.
        connector.emit(ConnectorEvent::Error {
            message: "rpc lost".to_owned(),
        });
        wait_for_snapshot(&mut rx, |snap| {
            snap.status(&ChainKey::from("eth")) == Some(ConnectionStatus::Disconnected)
        })
        .await;
        wait_until(|| connector.listener_count() == 0).await;

        // The wallet moved to testnet; following it must reconnect the slot
        // AND resubscribe, or later events land nowhere.
        connector.set_outcome(Ok(update("wss://node", Network::Testnet)));
        registry.set_target_network(Network::Testnet);

        wait_for_snapshot(&mut rx, |snap| {
            snap.status(&ChainKey::from("eth")) == Some(ConnectionStatus::Connected)
        })
        .await;
        assert_eq!(connector.activate_calls(), 2);
        assert_eq!(connector.listener_count(), 1);

        // The reconnected slot still reacts to connector events.
        connector.emit(ConnectorEvent::Error {
            message: "wallet gone".to_owned(),
        });
        let snapshot = wait_for_snapshot(&mut rx, |snap| {
            snap.status(&ChainKey::from("eth")) == Some(ConnectionStatus::Disconnected)
        })
        .await;
        let slot = snapshot.chain(&ChainKey::from("eth")).expect("slot");
        assert_eq!(
            slot.error,
            Some(RegistryError::Connector("wallet gone".to_owned()))
        );
    }

    #[tokio::test]
    async fn target_change_is_published_before_redrives_finish() {
        let registry = WalletRegistry::new(Network::Mainnet);
        let connector = Arc::new(MockConnector::on_network(Network::Mainnet));
        connector.set_activation_delay(std::time::Duration::from_millis(100));

        // Slot still connecting; the target flips mid-flight.
        let in_flight = {
            let registry = registry.clone();
            let connector = connector.clone();
            tokio::spawn(async move {
                registry.activate_connector("eth", connector).await;
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        registry.set_target_network(Network::Devnet);
        assert_eq!(registry.snapshot().target_network, Network::Devnet);

        in_flight.await.expect("activation task");
        let mut rx = registry.subscribe();
        let snapshot = wait_for_snapshot(&mut rx, |snap| {
            snap.status(&ChainKey::from("eth")) == Some(ConnectionStatus::WrongNetwork)
        })
        .await;
        assert_eq!(snapshot.target_network, Network::Devnet);
    }
}
