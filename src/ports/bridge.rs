//! BridgeAdapter port - the capability contract every bridge satisfies.
//!
//! The runtime and the (external) router know adapters only through this
//! trait; which adapter backs a bridge is decided by configuration, not by
//! a type hierarchy.

use async_trait::async_trait;

use crate::domain::{Action, BridgeError, Placeholders};
use crate::runtime::EventSink;

/// One external integration, seen from the bridge runtime.
///
/// Lifecycle: `Stopped -> Serving` on `start`, `Serving -> Stopped` on
/// `stop`; no other states. Implementations must:
/// - produce events only through the sink handed to `start`
/// - return `UnsupportedAction` for unknown action kinds, never panic
/// - make `stop` idempotent and release resources on every exit path
#[async_trait]
pub trait BridgeAdapter: Send + Sync {
    /// The bridge identity; events carry it as `source`, actions address
    /// it as `target`.
    fn name(&self) -> &str;

    /// Acquires the adapter's external resources and begins producing
    /// events onto `events`. A failure here is fatal to this adapter.
    async fn start(&mut self, events: EventSink) -> Result<(), BridgeError>;

    /// Performs the external side effect an action asks for.
    ///
    /// Returns result placeholders for synchronous callers (may be empty),
    /// independent of any events the adapter also emits.
    async fn handle_action(&self, action: Action) -> Result<Placeholders, BridgeError>;

    /// Stops accepting triggers and releases external resources.
    async fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait stays object-safe; the runtime
    // holds adapters as Box<dyn BridgeAdapter>.
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn BridgeAdapter) {}
}
