//! Error types for the bridge domain.

use thiserror::Error;

use super::placeholder::PlaceholderKind;

/// Failures an adapter can encounter while turning triggers into events or
/// executing actions.
///
/// All variants are handled locally by the adapter or the runtime dispatch
/// loop; none of them abort the process. `UnsupportedAction` marks a
/// programming or configuration error and is surfaced loudly rather than
/// swallowed.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Malformed JSON payload; the triggering event is not emitted.
    #[error("failed to decode JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Connect/read/write failure on an outbound or data-source call.
    /// The single action is aborted; there is no retry.
    #[error("network failure while {context}: {source}")]
    Network {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The data source knows no stop by this name.
    #[error("no stop matches '{stop}'")]
    StopNotFound { stop: String },

    /// The stop name resolved to more than one station.
    #[error("stop name '{stop}' is ambiguous ({matches} matches)")]
    StopAmbiguous { stop: String, matches: usize },

    /// An option exists but its value cannot be coerced into the requested
    /// target type. The default posture is log-and-continue with the
    /// caller's pre-initialized default.
    #[error("option '{name}' has kind {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: PlaceholderKind,
    },

    /// An action kind this bridge does not implement was routed to it.
    #[error("unsupported action '{action}' routed to bridge '{bridge}'")]
    UnsupportedAction { bridge: String, action: String },

    /// A required option is absent, empty, or otherwise unusable.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Failure while acquiring a resource during `start`; fatal to the
    /// adapter that encountered it.
    #[error("startup failure while {context}: {source}")]
    Startup {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl BridgeError {
    /// Creates a network error with its call-site context.
    pub fn network(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BridgeError::Network {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a type-mismatch error for an option binding.
    pub fn type_mismatch(
        name: impl Into<String>,
        expected: &'static str,
        actual: PlaceholderKind,
    ) -> Self {
        BridgeError::TypeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Creates an unsupported-action error.
    pub fn unsupported_action(bridge: impl Into<String>, action: impl Into<String>) -> Self {
        BridgeError::UnsupportedAction {
            bridge: bridge.into(),
            action: action.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a startup error with its call-site context.
    pub fn startup(context: impl Into<String>, source: std::io::Error) -> Self {
        BridgeError::Startup {
            context: context.into(),
            source,
        }
    }
}
