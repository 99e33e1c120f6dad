//! Placeholders - the named, typed values carried by every event and action.
//!
//! A [`Placeholder`] is a single name/value pair; [`Placeholders`] is the
//! ordered, unique-name sequence an [`Event`](super::Event) or
//! [`Action`](super::Action) owns. Values are a closed sum type
//! ([`PlaceholderValue`]) rather than an untyped blob, so construction sites
//! are checked at compile time and only [`Placeholders::bind`] performs a
//! runtime coercion.

use std::fmt;

use serde::Serialize;

use super::error::BridgeError;

/// The kind of a placeholder value, derived from its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    String,
    Int,
    Bool,
    Map,
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaceholderKind::String => "string",
            PlaceholderKind::Int => "int",
            PlaceholderKind::Bool => "bool",
            PlaceholderKind::Map => "map",
        };
        write!(f, "{}", s)
    }
}

/// A dynamically-kinded but statically-enumerated placeholder value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlaceholderValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// An arbitrary parsed JSON structure, e.g. a full request body.
    Map(serde_json::Value),
}

impl PlaceholderValue {
    /// Returns the kind tag for this value.
    pub fn kind(&self) -> PlaceholderKind {
        match self {
            PlaceholderValue::Str(_) => PlaceholderKind::String,
            PlaceholderValue::Int(_) => PlaceholderKind::Int,
            PlaceholderValue::Bool(_) => PlaceholderKind::Bool,
            PlaceholderValue::Map(_) => PlaceholderKind::Map,
        }
    }
}

/// A single named value carried by an event or action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub name: String,
    pub value: PlaceholderValue,
}

impl Placeholder {
    /// Creates a string placeholder.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PlaceholderValue::Str(value.into()),
        }
    }

    /// Creates an integer placeholder.
    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: PlaceholderValue::Int(value),
        }
    }

    /// Creates a boolean placeholder.
    pub fn bool(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value: PlaceholderValue::Bool(value),
        }
    }

    /// Creates a map placeholder from a parsed JSON value.
    pub fn map(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            value: PlaceholderValue::Map(value),
        }
    }

    /// Returns the derived kind of this placeholder's value.
    pub fn kind(&self) -> PlaceholderKind {
        self.value.kind()
    }
}

/// An ordered sequence of placeholders with unique names.
///
/// Insertion order is preserved (it matters for deterministic logging and
/// tests, not for semantics). `push` keeps the first occurrence of a name
/// and drops later duplicates, so a placeholder prepended by an adapter
/// cannot be shadowed by external input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Placeholders(Vec<Placeholder>);

impl Placeholders {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a placeholder, unless one with the same name already exists.
    ///
    /// Returns `true` if the placeholder was appended.
    pub fn push(&mut self, placeholder: Placeholder) -> bool {
        if self.0.iter().any(|p| p.name == placeholder.name) {
            return false;
        }
        self.0.push(placeholder);
        true
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Option<&PlaceholderValue> {
        self.0.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Binds the named option into `target`, coercing into the target type.
    ///
    /// - If no placeholder with `name` exists, `target` keeps its
    ///   caller-supplied default and `Ok(())` is returned.
    /// - If the value cannot be coerced, `Err(TypeMismatch)` is returned
    ///   and `target` is untouched.
    ///
    /// Binding never mutates the sequence.
    pub fn bind<T: BindValue>(&self, name: &str, target: &mut T) -> Result<(), BridgeError> {
        let Some(value) = self.get(name) else {
            return Ok(());
        };
        match T::try_from_value(value) {
            Some(bound) => {
                *target = bound;
                Ok(())
            }
            None => Err(BridgeError::type_mismatch(name, T::EXPECTED, value.kind())),
        }
    }

    /// Iterates over the placeholders in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Placeholder> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Placeholders {
    type Item = &'a Placeholder;
    type IntoIter = std::slice::Iter<'a, Placeholder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Placeholder> for Placeholders {
    fn from_iter<I: IntoIterator<Item = Placeholder>>(iter: I) -> Self {
        let mut placeholders = Placeholders::new();
        for p in iter {
            placeholders.push(p);
        }
        placeholders
    }
}

/// Target types the option binder can coerce a placeholder value into.
pub trait BindValue: Sized {
    /// Human-readable target type name, used in mismatch reports.
    const EXPECTED: &'static str;

    /// Attempts the coercion; `None` means the representation is
    /// incompatible.
    fn try_from_value(value: &PlaceholderValue) -> Option<Self>;
}

impl BindValue for String {
    const EXPECTED: &'static str = "string";

    fn try_from_value(value: &PlaceholderValue) -> Option<Self> {
        match value {
            PlaceholderValue::Str(s) => Some(s.clone()),
            PlaceholderValue::Int(i) => Some(i.to_string()),
            PlaceholderValue::Bool(b) => Some(b.to_string()),
            PlaceholderValue::Map(_) => None,
        }
    }
}

impl BindValue for i64 {
    const EXPECTED: &'static str = "i64";

    fn try_from_value(value: &PlaceholderValue) -> Option<Self> {
        match value {
            PlaceholderValue::Int(i) => Some(*i),
            PlaceholderValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl BindValue for bool {
    const EXPECTED: &'static str = "bool";

    fn try_from_value(value: &PlaceholderValue) -> Option<Self> {
        match value {
            PlaceholderValue::Bool(b) => Some(*b),
            PlaceholderValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl BindValue for serde_json::Value {
    const EXPECTED: &'static str = "map";

    fn try_from_value(value: &PlaceholderValue) -> Option<Self> {
        match value {
            PlaceholderValue::Map(v) => Some(v.clone()),
            _ => None,
        }
    }
}
