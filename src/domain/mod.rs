//! Domain layer - the bridge's data model.
//!
//! # Module Organization
//!
//! - `placeholder` - Named, typed values and the option binder
//! - `event` - Immutable facts pushed outward by adapters
//! - `action` - Immutable effect requests pushed inward to adapters
//! - `error` - The bridge failure taxonomy

mod action;
mod error;
mod event;
mod placeholder;

pub use action::Action;
pub use error::BridgeError;
pub use event::Event;
pub use placeholder::{BindValue, Placeholder, PlaceholderKind, PlaceholderValue, Placeholders};
