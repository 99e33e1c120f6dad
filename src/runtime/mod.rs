//! Runtime - the lifecycle loop owning exactly one adapter.
//!
//! A [`Bridge`] starts its adapter, then blocks on two inputs: inbound
//! actions (dispatched to the adapter) and the shutdown signal. On
//! shutdown the adapter is stopped and its resources released; this holds
//! on every exit path, including a failed `start`.

mod sink;

pub use sink::EventSink;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::domain::{Action, BridgeError};
use crate::ports::BridgeAdapter;

/// The lifecycle wrapper around one [`BridgeAdapter`].
pub struct Bridge {
    adapter: Box<dyn BridgeAdapter>,
    actions: mpsc::Receiver<Action>,
    shutdown: watch::Receiver<bool>,
}

impl Bridge {
    /// Wires an adapter to its inbound action channel and the shared
    /// shutdown signal.
    pub fn new(
        adapter: Box<dyn BridgeAdapter>,
        actions: mpsc::Receiver<Action>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            adapter,
            actions,
            shutdown,
        }
    }

    /// Runs the bridge until the shutdown signal fires.
    ///
    /// The wait is a blocking `select!`, never a poll loop. Action
    /// failures are handled here - logged, fatal only to that dispatch.
    /// The sink is dropped together with the loop, so nothing writes the
    /// event channel after shutdown is observed.
    pub async fn run(mut self, events: EventSink) -> Result<(), BridgeError> {
        let name = self.adapter.name().to_string();

        if let Err(err) = self.adapter.start(events).await {
            error!(bridge = %name, error = %err, "bridge failed to start");
            // Release anything a partial start acquired.
            self.adapter.stop().await;
            return Err(err);
        }
        info!(bridge = %name, "bridge started");

        let mut actions_open = true;
        loop {
            tokio::select! {
                changed = self.shutdown.changed() => {
                    match changed {
                        Ok(()) if !*self.shutdown.borrow() => continue,
                        // Signalled, or the signal sender is gone: tear down.
                        _ => break,
                    }
                }
                action = self.actions.recv(), if actions_open => {
                    match action {
                        Some(action) => dispatch(self.adapter.as_ref(), &name, action).await,
                        // Router dropped its handle; keep serving triggers
                        // until shutdown, with this branch disabled.
                        None => actions_open = false,
                    }
                }
            }
        }

        self.adapter.stop().await;
        info!(bridge = %name, "bridge stopped");
        Ok(())
    }
}

async fn dispatch(adapter: &dyn BridgeAdapter, bridge: &str, action: Action) {
    if action.target != bridge {
        warn!(
            bridge = %bridge,
            target = %action.target,
            action = %action.kind,
            "dropping mis-routed action"
        );
        return;
    }

    let kind = action.kind.clone();
    match adapter.handle_action(action).await {
        Ok(results) => {
            debug!(bridge = %bridge, action = %kind, results = results.len(), "action handled");
        }
        Err(err) => {
            error!(bridge = %bridge, action = %kind, error = %err, "action failed");
        }
    }
}
