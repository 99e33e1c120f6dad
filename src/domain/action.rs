//! Actions - immutable requests pushed inward to an adapter.

use serde::Serialize;

use super::placeholder::{Placeholder, Placeholders};

/// A request for one bridge to perform an external side effect.
///
/// Created by a consumer and routed to the adapter whose identity matches
/// `target`. Read-only from the adapter's perspective; option values are
/// extracted through [`Placeholders::bind`], never by mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    /// Identity of the bridge this action is addressed to.
    pub target: String,
    /// Action kind name, e.g. `post`, `departures`.
    pub kind: String,
    /// Named options for the effect.
    pub options: Placeholders,
}

impl Action {
    /// Creates an action with an empty option sequence.
    pub fn new(target: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: kind.into(),
            options: Placeholders::new(),
        }
    }

    /// Appends an option, builder-style.
    pub fn with(mut self, option: Placeholder) -> Self {
        self.options.push(option);
        self
    }
}
