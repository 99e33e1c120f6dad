//! Integration tests for the transit bridge running under the runtime
//! lifecycle loop, with a mock data source standing in for EFA.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use hivebridge::adapters::transit::TransitBridge;
use hivebridge::domain::{Action, BridgeError, Placeholder, PlaceholderValue};
use hivebridge::ports::{Departure, Station, TransitSource};
use hivebridge::runtime::{Bridge, EventSink};

/// Mock transit data source with a single known stop.
struct MockEfa;

#[async_trait]
impl TransitSource for MockEfa {
    async fn find_station(&self, name: &str) -> Result<Station, BridgeError> {
        match name {
            "CentralStation" => Ok(Station {
                id: "de:09162:1".to_string(),
                name: "CentralStation".to_string(),
            }),
            "Bahnhof" => Err(BridgeError::StopAmbiguous {
                stop: name.to_string(),
                matches: 3,
            }),
            _ => Err(BridgeError::StopNotFound {
                stop: name.to_string(),
            }),
        }
    }

    async fn departures(
        &self,
        _station: &Station,
        limit: usize,
    ) -> Result<Vec<Departure>, BridgeError> {
        let all = vec![
            Departure {
                countdown: 2,
                route: "U6".to_string(),
                destination: "Fröttmaning".to_string(),
            },
            Departure {
                countdown: 9,
                route: "19".to_string(),
                destination: "Pasing".to_string(),
            },
        ];
        Ok(all.into_iter().take(limit).collect())
    }
}

#[tokio::test]
async fn departures_action_through_the_runtime_emits_departure_events() {
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let (actions_tx, actions_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let bridge = Bridge::new(
        Box::new(TransitBridge::new(Arc::new(MockEfa))),
        actions_rx,
        shutdown_rx,
    );
    let task = tokio::spawn(bridge.run(EventSink::new(events_tx)));

    actions_tx
        .send(
            Action::new("transit", "departures")
                .with(Placeholder::string("stop", "CentralStation")),
        )
        .await
        .unwrap();

    let first = tokio::time::timeout(Duration::from_secs(2), events_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.source, "transit");
    assert_eq!(first.kind, "departure");
    assert_eq!(first.placeholders.get("eta"), Some(&PlaceholderValue::Int(2)));
    assert_eq!(
        first.placeholders.get("route"),
        Some(&PlaceholderValue::Str("U6".to_string()))
    );
    assert_eq!(
        first.placeholders.get("destination"),
        Some(&PlaceholderValue::Str("Fröttmaning".to_string()))
    );

    let second = tokio::time::timeout(Duration::from_secs(2), events_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.placeholders.get("eta"), Some(&PlaceholderValue::Int(9)));

    shutdown_tx.send(true).unwrap();
    task.await.unwrap().unwrap();

    // Nothing is written to the channel after shutdown.
    assert!(events_rx.recv().await.is_none());
}

#[tokio::test]
async fn failing_resolutions_emit_nothing_and_leave_the_bridge_running() {
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let (actions_tx, actions_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let bridge = Bridge::new(
        Box::new(TransitBridge::new(Arc::new(MockEfa))),
        actions_rx,
        shutdown_rx,
    );
    let task = tokio::spawn(bridge.run(EventSink::new(events_tx)));

    // Unknown stop, ambiguous stop, empty stop, unsupported kind: all
    // handled locally, none emit events, none kill the loop.
    for action in [
        Action::new("transit", "departures").with(Placeholder::string("stop", "Atlantis")),
        Action::new("transit", "departures").with(Placeholder::string("stop", "Bahnhof")),
        Action::new("transit", "departures").with(Placeholder::string("stop", "")),
        Action::new("transit", "teleport"),
    ] {
        actions_tx.send(action).await.unwrap();
    }

    // The bridge still works afterwards.
    actions_tx
        .send(
            Action::new("transit", "departures")
                .with(Placeholder::string("stop", "CentralStation")),
        )
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(2), events_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.kind, "departure");
    assert_eq!(event.placeholders.get("eta"), Some(&PlaceholderValue::Int(2)));

    shutdown_tx.send(true).unwrap();
    task.await.unwrap().unwrap();
}
