//! Request handlers for the web bridge's single endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::domain::{BridgeError, Event, Placeholder};
use crate::runtime::EventSink;

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct WebState {
    /// Bridge identity, stamped on every emitted event.
    pub source: Arc<str>,
    pub events: EventSink,
}

/// Builds the router serving GET and POST triggers on one path.
pub fn router(path: &str, state: WebState) -> Router {
    Router::new()
        .route(path, get(handle_get).post(handle_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET trigger: one `get` event with the caller's address and every query
/// parameter as a string placeholder.
async fn handle_get(
    State(state): State<WebState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(params): Query<Vec<(String, String)>>,
) -> StatusCode {
    let mut event = Event::new(state.source.as_ref(), "get")
        .with(Placeholder::string("ip", peer.ip().to_string()));

    for (name, value) in params {
        debug!(param = %name, value = %value, "GET query parameter");
        event = event.with(Placeholder::string(name, value));
    }

    state.events.emit(event).await;
    StatusCode::OK
}

/// POST trigger: the whole body must decode as a JSON object; on success
/// one `post` event is emitted, on failure nothing is.
async fn handle_post(
    State(state): State<WebState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> StatusCode {
    match decode_json_event(state.source.as_ref(), &body, &peer.ip().to_string()) {
        Ok(event) => {
            state.events.emit(event).await;
            StatusCode::OK
        }
        Err(err) => {
            error!(error = %err, "rejecting POST body");
            StatusCode::BAD_REQUEST
        }
    }
}

/// Decodes a JSON body into a `post` event.
///
/// Two decode passes: the full parsed structure travels as the single
/// `json` placeholder, and every top-level key becomes its own string
/// placeholder. Either pass failing aborts the whole event - a partial
/// event is never emitted.
pub(crate) fn decode_json_event(
    source: &str,
    body: &[u8],
    ip: &str,
) -> Result<Event, BridgeError> {
    let payload: serde_json::Value = serde_json::from_slice(body)?;
    let flat: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)?;

    let mut event = Event::new(source, "post")
        .with(Placeholder::map("json", payload))
        .with(Placeholder::string("ip", ip));

    for (name, value) in &flat {
        debug!(param = %name, "POST JSON parameter");
        event = event.with(Placeholder::string(name.clone(), flat_value(value)));
    }

    Ok(event)
}

/// Display form of a top-level JSON value: strings unquoted, everything
/// else as JSON text.
fn flat_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
