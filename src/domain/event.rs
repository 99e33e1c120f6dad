//! Events - immutable facts pushed outward by an adapter.

use serde::Serialize;

use super::placeholder::{Placeholder, Placeholders};

/// An immutable record of something that happened at an external system.
///
/// Built exclusively by the adapter that observed it, then pushed onto the
/// shared event channel. Never mutated afterwards; consumers own their
/// clone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Identity of the bridge that produced this event.
    pub source: String,
    /// Event kind name, e.g. `get`, `post`, `departure`.
    pub kind: String,
    /// Ordered, unique-name payload.
    pub placeholders: Placeholders,
}

impl Event {
    /// Creates an event with an empty placeholder sequence.
    pub fn new(source: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: kind.into(),
            placeholders: Placeholders::new(),
        }
    }

    /// Appends a placeholder, builder-style. Duplicate names are dropped
    /// (first occurrence wins).
    pub fn with(mut self, placeholder: Placeholder) -> Self {
        self.placeholders.push(placeholder);
        self
    }
}
