#![forbid(unsafe_code)]

//! Declarative option maps for a drag engine.
//!
//! Option keys are free-form engine option names; the five gesture event
//! names (plus the reserved `over`) are recognized specially by the
//! [`ConfigSynchronizer`](crate::sync::ConfigSynchronizer), which routes
//! their handler values through chains instead of handing them to the
//! engine directly.

use std::collections::BTreeMap;

use dragsort_core::EngineOption;

use crate::chain::Handler;

/// A single option value.
///
/// Handlers are only meaningful under event-name keys; other values pass
/// through to the engine untouched.
pub enum OptionValue<T> {
    /// Boolean option.
    Flag(bool),
    /// Numeric option.
    Number(f64),
    /// Textual option.
    Text(String),
    /// A gesture event handler.
    Handler(Handler<T>),
}

impl<T> OptionValue<T> {
    /// The plain value the engine sees for this option.
    #[must_use]
    pub fn engine_value(&self) -> EngineOption {
        match self {
            OptionValue::Flag(v) => EngineOption::Flag(*v),
            OptionValue::Number(v) => EngineOption::Number(*v),
            OptionValue::Text(v) => EngineOption::Text(v.clone()),
            OptionValue::Handler(_) => EngineOption::Callback,
        }
    }
}

impl<T> std::fmt::Debug for OptionValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Flag(v) => f.debug_tuple("Flag").field(v).finish(),
            OptionValue::Number(v) => f.debug_tuple("Number").field(v).finish(),
            OptionValue::Text(v) => f.debug_tuple("Text").field(v).finish(),
            OptionValue::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// An ordered option map.
///
/// `BTreeMap`-backed so application order is deterministic.
pub struct SortOptions<T> {
    entries: BTreeMap<String, OptionValue<T>>,
}

impl<T> Default for SortOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortOptions<T> {
    /// Create an empty option map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Set an option, replacing any previous value under the key.
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue<T>) {
        self.entries.insert(key.into(), value);
    }

    /// Builder-style boolean option.
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.insert(key, OptionValue::Flag(value));
        self
    }

    /// Builder-style numeric option.
    #[must_use]
    pub fn with_number(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, OptionValue::Number(value));
        self
    }

    /// Builder-style textual option.
    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, OptionValue::Text(value.into()));
        self
    }

    /// Builder-style event handler.
    #[must_use]
    pub fn with_handler(mut self, key: impl Into<String>, handler: Handler<T>) -> Self {
        self.insert(key, OptionValue::Handler(handler));
        self
    }

    /// Look up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue<T>> {
        self.entries.get(key)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a process-wide default map with a component-local one.
    ///
    /// Local entries win per key. Both maps are consumed because handler
    /// values cannot be cloned.
    #[must_use]
    pub fn merged(defaults: Self, local: Self) -> Self {
        let mut entries = defaults.entries;
        entries.extend(local.entries);
        Self { entries }
    }

    /// Consume the map, yielding `(key, value)` pairs in key order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, OptionValue<T>)> {
        self.entries.into_iter()
    }
}

impl<T> std::fmt::Debug for SortOptions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
