//! Transit bridge - the departure-query adapter.
//!
//! Purely action-triggered: the `departures` action resolves a stop name
//! against the data source and emits one `departure` event per upcoming
//! departure. There is no background polling and no network traffic until
//! the first action.

mod efa;

pub use efa::EfaClient;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::TransitConfig;
use crate::domain::{Action, BridgeError, Event, Placeholder, Placeholders};
use crate::ports::{BridgeAdapter, TransitSource};
use crate::runtime::EventSink;

/// Identity of the transit bridge.
pub const TRANSIT_BRIDGE_NAME: &str = "transit";

/// Upper bound on departures fetched per action.
const DEPARTURE_LIMIT: usize = 3;

/// The transit-departure bridge.
pub struct TransitBridge {
    name: String,
    source: Arc<dyn TransitSource>,
    events: Option<EventSink>,
}

impl TransitBridge {
    /// Creates a transit bridge over any departure data source.
    pub fn new(source: Arc<dyn TransitSource>) -> Self {
        Self {
            name: TRANSIT_BRIDGE_NAME.to_string(),
            source,
            events: None,
        }
    }

    /// Creates a transit bridge backed by the EFA client.
    pub fn from_config(config: &TransitConfig) -> Self {
        Self::new(Arc::new(EfaClient::new(config.base_url.clone())))
    }

    /// The `departures` action: resolve the stop, then one event per
    /// departure in data-source order. Resolution failures abort the
    /// action with no events emitted.
    async fn departures_action(&self, action: &Action) -> Result<Placeholders, BridgeError> {
        let Some(events) = &self.events else {
            return Err(BridgeError::invalid_argument(
                "bridge",
                "transit bridge is not started",
            ));
        };

        let mut stop = String::new();
        if let Err(err) = action.options.bind("stop", &mut stop) {
            warn!(error = %err, "ignoring unusable option");
        }
        // Never query the data source with an empty stop name.
        if stop.trim().is_empty() {
            return Err(BridgeError::invalid_argument("stop", "must not be empty"));
        }

        let station = self.source.find_station(&stop).await?;
        debug!(stop = %stop, station = %station.name, id = %station.id, "resolved stop");

        let departures = self.source.departures(&station, DEPARTURE_LIMIT).await?;
        for departure in departures {
            debug!(
                route = %departure.route,
                eta = departure.countdown,
                destination = %departure.destination,
                "departure"
            );
            events
                .emit(
                    Event::new(&self.name, "departure")
                        .with(Placeholder::int("eta", departure.countdown))
                        .with(Placeholder::string("route", departure.route))
                        .with(Placeholder::string("destination", departure.destination)),
                )
                .await;
        }

        Ok(Placeholders::new())
    }
}

#[async_trait]
impl BridgeAdapter for TransitBridge {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&mut self, events: EventSink) -> Result<(), BridgeError> {
        // The client is already constructed; no network call until the
        // first action.
        self.events = Some(events);
        Ok(())
    }

    async fn handle_action(&self, action: Action) -> Result<Placeholders, BridgeError> {
        match action.kind.as_str() {
            "departures" => self.departures_action(&action).await,
            _ => Err(BridgeError::unsupported_action(&self.name, action.kind)),
        }
    }

    async fn stop(&mut self) {
        self.events = None;
    }
}
