//! Web bridge - the HTTP trigger adapter.
//!
//! Serves one configured route: GET requests become `get` events carrying
//! the query parameters, POST requests with a JSON body become `post`
//! events. The `post` action performs an outbound HTTP POST and re-emits
//! the response body as another `post` event.

mod handlers;

pub use handlers::WebState;

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::WebConfig;
use crate::domain::{Action, BridgeError, Placeholders};
use crate::ports::BridgeAdapter;
use crate::runtime::EventSink;

/// Identity of the web bridge; events carry it as `source`.
pub const WEB_BRIDGE_NAME: &str = "web";

/// Resources held while the listener is live.
struct Serving {
    bound: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// The HTTP trigger bridge.
///
/// State machine: `Stopped -> Serving` on [`BridgeAdapter::start`],
/// `Serving -> Stopped` on [`BridgeAdapter::stop`]; nothing else.
pub struct WebBridge {
    name: String,
    config: WebConfig,
    client: reqwest::Client,
    serving: Option<Serving>,
    events: Option<EventSink>,
}

impl WebBridge {
    /// Creates a stopped web bridge for the given configuration.
    pub fn new(config: WebConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: WEB_BRIDGE_NAME.to_string(),
            config,
            client,
            serving: None,
            events: None,
        }
    }

    /// The address the listener is bound to while serving. Useful with a
    /// configured port of 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.serving.as_ref().map(|s| s.bound)
    }

    /// Outbound `post` action: bind `url`/`json`, POST the body, and
    /// re-emit the response through the POST decode path.
    async fn post_action(&self, action: &Action) -> Result<Placeholders, BridgeError> {
        let Some(events) = &self.events else {
            return Err(BridgeError::invalid_argument(
                "bridge",
                "web bridge is not started",
            ));
        };

        let mut url = String::new();
        let mut body = String::new();
        // Mismatched option kinds keep the defaults; the action proceeds.
        if let Err(err) = action.options.bind("url", &mut url) {
            warn!(error = %err, "ignoring unusable option");
        }
        if let Err(err) = action.options.bind("json", &mut body) {
            warn!(error = %err, "ignoring unusable option");
        }
        if url.is_empty() {
            return Err(BridgeError::invalid_argument("url", "must not be empty"));
        }

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| BridgeError::network(format!("posting to {}", url), err))?;

        let peer = response
            .remote_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|err| BridgeError::network(format!("reading response from {}", url), err))?;

        let event = handlers::decode_json_event(&self.name, &bytes, &peer)?;
        events.emit(event).await;

        Ok(Placeholders::new())
    }
}

#[async_trait]
impl BridgeAdapter for WebBridge {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&mut self, events: EventSink) -> Result<(), BridgeError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|err| BridgeError::invalid_argument("address", err.to_string()))?;

        // Bind failure is fatal to this adapter.
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| BridgeError::startup(format!("binding {}", addr), err))?;
        let bound = listener
            .local_addr()
            .map_err(|err| BridgeError::startup("reading bound address".to_string(), err))?;

        let state = WebState {
            source: self.name.clone().into(),
            events: events.clone(),
        };
        let app = handlers::router(&self.config.path, state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });

        let task = tokio::spawn(async move {
            if let Err(err) = server.await {
                error!(error = %err, "web bridge server terminated abnormally");
            }
        });

        self.serving = Some(Serving {
            bound,
            shutdown: shutdown_tx,
            task,
        });
        self.events = Some(events);
        info!(address = %bound, path = %self.config.path, "web bridge serving");
        Ok(())
    }

    async fn handle_action(&self, action: Action) -> Result<Placeholders, BridgeError> {
        match action.kind.as_str() {
            "post" => self.post_action(&action).await,
            _ => Err(BridgeError::unsupported_action(&self.name, action.kind)),
        }
    }

    async fn stop(&mut self) {
        // take() makes release idempotent; the listener closes exactly once.
        if let Some(serving) = self.serving.take() {
            let _ = serving.shutdown.send(());
            if let Err(err) = serving.task.await {
                error!(error = %err, "web bridge serve task panicked");
            }
            info!(bridge = %self.name, "web bridge stopped");
        }
        self.events = None;
    }
}
