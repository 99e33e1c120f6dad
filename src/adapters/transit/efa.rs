//! EFA client - production [`TransitSource`] over the EFA HTTP API.
//!
//! EFA (Elektronische Fahrplanauskunft) endpoints answer in JSON when
//! `outputFormat=JSON` is requested. Two requests are used: the stop
//! finder to resolve a stop name and the departure monitor for upcoming
//! departures. EFA serializes numbers inconsistently (sometimes as JSON
//! strings), so the wire structs accept both.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::domain::BridgeError;
use crate::ports::{Departure, Station, TransitSource};

/// HTTP client for one EFA deployment.
pub struct EfaClient {
    base_url: String,
    client: reqwest::Client,
}

impl EfaClient {
    /// Creates a client for the EFA deployment at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<Vec<u8>, BridgeError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| BridgeError::network(context.to_string(), err))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| BridgeError::network(context.to_string(), err))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl TransitSource for EfaClient {
    async fn find_station(&self, name: &str) -> Result<Station, BridgeError> {
        let body = self
            .get_json(
                "XML_STOPFINDER_REQUEST",
                &[
                    ("outputFormat", "JSON"),
                    ("locationServerActive", "1"),
                    ("type_sf", "stop"),
                    ("name_sf", name),
                ],
                "querying stop finder",
            )
            .await?;

        let parsed: StopFinderResponse = serde_json::from_slice(&body)?;
        resolve_stop(name, parsed)
    }

    async fn departures(
        &self,
        station: &Station,
        limit: usize,
    ) -> Result<Vec<Departure>, BridgeError> {
        let limit_param = limit.to_string();
        let body = self
            .get_json(
                "XML_DPT_REQUEST",
                &[
                    ("outputFormat", "JSON"),
                    ("type_dm", "stop"),
                    ("name_dm", &station.id),
                    ("useRealtime", "1"),
                    ("mode", "direct"),
                    ("limit", &limit_param),
                ],
                "querying departure monitor",
            )
            .await?;

        let parsed: DepartureResponse = serde_json::from_slice(&body)?;
        Ok(parsed
            .departure_list
            .into_iter()
            .take(limit)
            .map(|d| Departure {
                countdown: d.countdown,
                route: d.serving_line.number,
                destination: d.serving_line.direction,
            })
            .collect())
    }
}

/// Maps the stop-finder answer onto exactly one station.
fn resolve_stop(name: &str, response: StopFinderResponse) -> Result<Station, BridgeError> {
    let not_found = || BridgeError::StopNotFound {
        stop: name.to_string(),
    };

    match response.stop_finder.points {
        None => Err(not_found()),
        Some(Points::Identified { point }) => Ok(point.into_station()),
        Some(Points::Candidates(mut points)) => match points.len() {
            0 => Err(not_found()),
            1 => Ok(points.remove(0).into_station()),
            matches => Err(BridgeError::StopAmbiguous {
                stop: name.to_string(),
                matches,
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Wire structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StopFinderResponse {
    #[serde(rename = "stopFinder")]
    stop_finder: StopFinderSection,
}

#[derive(Debug, Deserialize)]
struct StopFinderSection {
    #[serde(default)]
    points: Option<Points>,
}

/// EFA answers with a single `point` object when the name is identified
/// and with a bare array when several stops match.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Points {
    Identified { point: EfaPoint },
    Candidates(Vec<EfaPoint>),
}

#[derive(Debug, Deserialize)]
struct EfaPoint {
    name: String,
    stateless: String,
}

impl EfaPoint {
    fn into_station(self) -> Station {
        Station {
            id: self.stateless,
            name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DepartureResponse {
    #[serde(rename = "departureList", default)]
    departure_list: Vec<EfaDeparture>,
}

#[derive(Debug, Deserialize)]
struct EfaDeparture {
    #[serde(deserialize_with = "int_from_string_or_number")]
    countdown: i64,
    #[serde(rename = "servingLine")]
    serving_line: ServingLine,
}

#[derive(Debug, Deserialize)]
struct ServingLine {
    number: String,
    direction: String,
}

fn int_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
