// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loosely-typed option records shared by managers and recognizers.
//!
//! Options come from three places that all speak the same shape: process-wide
//! defaults, per-type defaults, and expressions evaluated against a host data
//! scope. They are merged key by key, so they are modelled as an ordered
//! string-keyed map of [`OptionValue`]s with typed accessors for the keys this
//! workspace interprets (see [`keys`]). Unknown keys are carried through
//! untouched for the engine.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use alloc::vec::Vec;

/// Well-known option keys.
pub mod keys {
    /// Recognizer type name (`"pan"`, `"tap"`, ...).
    pub const TYPE: &str = "type";
    /// Event name the recognizer emits; also its lookup name on the manager.
    pub const EVENT: &str = "event";
    /// `|`-delimited direction tokens.
    pub const DIRECTIONS: &str = "directions";
    /// Computed direction bitmask; always derived from [`DIRECTIONS`].
    pub const DIRECTION: &str = "direction";
    /// Name of a recognizer this one may succeed alongside.
    pub const RECOGNIZE_WITH: &str = "recognizeWith";
    /// Name of a recognizer to stop succeeding alongside.
    pub const DROP_RECOGNIZE_WITH: &str = "dropRecognizeWith";
    /// Name of a recognizer that must fail before this one may succeed.
    pub const REQUIRE_FAILURE: &str = "requireFailure";
    /// Name of a failure dependency to remove.
    pub const DROP_REQUIRE_FAILURE: &str = "dropRequireFailure";
    /// Suppress synthetic clicks that follow a touch sequence.
    pub const PREVENT_GHOSTS: &str = "preventGhosts";
    /// Prevent the source event's default action when the gesture fires.
    pub const PREVENT_DEFAULT: &str = "preventDefault";
    /// Stop the source event's propagation when the gesture fires.
    pub const STOP_PROPAGATION: &str = "stopPropagation";
    /// Required tap count.
    pub const TAPS: &str = "taps";
    /// Whether the recognizer participates at all.
    pub const ENABLE: &str = "enable";
}

/// A single option value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Any numeric value.
    Number(f64),
    /// String value.
    Str(String),
    /// Ordered list of values.
    List(Vec<Self>),
    /// Nested option record.
    Map(Options),
}

impl OptionValue {
    /// Short name of the value's shape, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a number.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The nested record, if this is a map.
    pub const fn as_map(&self) -> Option<&Options> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Options> for OptionValue {
    fn from(value: Options) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Self>> for OptionValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

/// Ordered option record (`key → value`).
///
/// ```
/// use understory_gesture::{Options, keys};
///
/// let mut base = Options::new().with(keys::TYPE, "tap").with("time", 250.0);
/// base.extend_from(&Options::new().with("time", 400.0).with(keys::TAPS, 2.0));
///
/// assert_eq!(base.type_name(), Some("tap"));
/// assert_eq!(base.get_number("time"), Some(400.0));
/// assert_eq!(base.get_number(keys::TAPS), Some(2.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Create an empty record.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Look up a string value; other shapes yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    /// Look up a boolean value; other shapes yield `None`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    /// Look up a numeric value; other shapes yield `None`.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(OptionValue::as_number)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The `type` entry, when it is a string.
    pub fn type_name(&self) -> Option<&str> {
        self.get_str(keys::TYPE)
    }

    /// The `event` entry, when it is a string.
    pub fn event_name(&self) -> Option<&str> {
        self.get_str(keys::EVENT)
    }

    /// Whether a boolean flag is present and `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.get_bool(key) == Some(true)
    }

    /// Shallow merge: every entry of `other` overwrites the same key here.
    pub fn extend_from(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Shallow merge of `layers` into a new record; later layers win.
    pub fn layered<'a>(layers: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut out = Self::new();
        for layer in layers {
            out.extend_from(layer);
        }
        out
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, OptionValue> {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = btree_map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
