//! TransitSource port - the departure data source behind the transit bridge.

use async_trait::async_trait;

use crate::domain::BridgeError;

/// A stop resolved to a concrete station known to the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Data-source identifier, used for departure queries.
    pub id: String,
    /// Canonical station name.
    pub name: String,
}

/// One upcoming departure at a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Minutes until arrival.
    pub countdown: i64,
    /// Line identifier, e.g. "U6".
    pub route: String,
    /// Direction/destination label.
    pub destination: String,
}

/// Port for querying upcoming departures by stop name.
///
/// Implementations surface resolution failures as
/// [`BridgeError::StopNotFound`] / [`BridgeError::StopAmbiguous`] and
/// transport failures as [`BridgeError::Network`].
#[async_trait]
pub trait TransitSource: Send + Sync {
    /// Resolves a stop name to exactly one station.
    async fn find_station(&self, name: &str) -> Result<Station, BridgeError>;

    /// Fetches up to `limit` upcoming departures, in the order the data
    /// source supplies them.
    async fn departures(
        &self,
        station: &Station,
        limit: usize,
    ) -> Result<Vec<Departure>, BridgeError>;
}
