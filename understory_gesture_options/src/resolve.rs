// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read phase: resolve per-element options against frozen defaults.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use understory_gesture::{OptionValue, Options, RecognizerKind, keys};

/// Frozen defaults registry.
///
/// Holds three layers:
///
/// - the untyped **fallback** recognizer options,
/// - **per-type** recognizer options, keyed by type name,
/// - **manager** options.
///
/// Build one with [`GestureDefaultsBuilder`](crate::GestureDefaultsBuilder)
/// during configuration and share it read-only afterwards; resolution is pure,
/// so resolving the same input twice yields identical output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureDefaults {
    fallback: Option<Options>,
    per_type: HashMap<String, Options>,
    manager: Options,
}

impl GestureDefaults {
    pub(crate) fn from_parts(
        fallback: Option<Options>,
        per_type: HashMap<String, Options>,
        manager: Options,
    ) -> Self {
        Self {
            fallback,
            per_type,
            manager,
        }
    }

    /// Untyped fallback recognizer options.
    pub fn fallback(&self) -> Option<&Options> {
        self.fallback.as_ref()
    }

    /// Recognizer options registered for `type_name`.
    pub fn type_defaults(&self, type_name: &str) -> Option<&Options> {
        self.per_type.get(type_name)
    }

    /// Process-wide manager options.
    pub fn manager_options(&self) -> &Options {
        &self.manager
    }

    /// Merge process-wide manager options with per-element `overrides`.
    ///
    /// Shallow merge; an override wins per key.
    pub fn extend_with_default_manager_opts(&self, overrides: Option<&Options>) -> Options {
        let mut out = self.manager.clone();
        if let Some(overrides) = overrides {
            out.extend_from(overrides);
        }
        out
    }

    /// Resolve the recognizer options for `event_name`.
    ///
    /// `overrides` are the per-element records, in declaration order. Records
    /// without a `type` are anonymous defaults: they are folded over the
    /// fallback and then dropped. Precedence for the recognizer matching the
    /// event's type is, lowest first:
    ///
    /// 1. fallback options,
    /// 2. type-less overrides,
    /// 3. per-type defaults,
    /// 4. the matching override itself.
    ///
    /// Records for other types pass through untouched, since they configure
    /// dependencies. When no record names the event's type and none are left
    /// after folding, a single record `{type, ...}` is synthesized. Custom
    /// events return `overrides` unchanged.
    ///
    /// ```
    /// use understory_gesture::{Options, keys};
    /// use understory_gesture_options::GestureDefaultsBuilder;
    ///
    /// let mut builder = GestureDefaultsBuilder::new();
    /// builder
    ///     .add_recognizer_option(Options::new().with("threshold", 1.0))
    ///     .unwrap()
    ///     .add_recognizer_option(Options::new().with(keys::TYPE, "pan").with("threshold", 2.0))
    ///     .unwrap();
    /// let defaults = builder.build();
    ///
    /// let resolved = defaults.extend_with_default_recognizer_opts("panleft", &[]);
    /// assert_eq!(resolved.len(), 1);
    /// assert_eq!(resolved[0].type_name(), Some("pan"));
    /// assert_eq!(resolved[0].get_number("threshold"), Some(2.0));
    ///
    /// let element = [Options::new().with(keys::TYPE, "pan").with("threshold", 3.0)];
    /// let resolved = defaults.extend_with_default_recognizer_opts("panleft", &element);
    /// assert_eq!(resolved[0].get_number("threshold"), Some(3.0));
    /// ```
    pub fn extend_with_default_recognizer_opts(
        &self,
        event_name: &str,
        overrides: &[Options],
    ) -> Vec<Options> {
        let kind = RecognizerKind::from_event_name(event_name);
        if kind.is_custom() {
            return overrides.to_vec();
        }
        let type_name = kind.as_str();
        let type_defaults = self.per_type.get(type_name);

        let mut defaults = self.fallback.clone().unwrap_or_default();
        for anonymous in overrides.iter().filter(|o| declared_type(o).is_none()) {
            defaults.extend_from(anonymous);
        }

        let resolved: Vec<Options> = overrides
            .iter()
            .filter_map(|opts| match declared_type(opts) {
                None => None,
                Some(t) if t == type_name => Some(Options::layered(
                    [&defaults].into_iter().chain(type_defaults).chain([opts]),
                )),
                Some(_) => Some(opts.clone()),
            })
            .collect();

        if !resolved.is_empty() {
            return resolved;
        }

        // Nothing named this type and nothing typed was left after folding.
        let mut synthesized = Options::new().with(keys::TYPE, type_name);
        synthesized.extend_from(&defaults);
        if let Some(type_defaults) = type_defaults {
            synthesized.extend_from(type_defaults);
        }
        vec![synthesized]
    }
}

/// The `type` of a record, treating an empty string as absent.
fn declared_type(options: &Options) -> Option<&str> {
    options.type_name().filter(|t| !t.is_empty())
}

/// Normalize an evaluated recognizer-options expression into records.
///
/// - absent → no records
/// - a map → one record
/// - a list → its map entries, in order
///
/// Other shapes (and non-map list entries) are ignored with a warning.
pub fn normalize_overrides(value: Option<OptionValue>) -> Vec<Options> {
    match value {
        None => Vec::new(),
        Some(OptionValue::Map(options)) => vec![options],
        Some(OptionValue::List(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                OptionValue::Map(options) => Some(options),
                other => {
                    log::warn!(
                        "ignoring {} entry in recognizer options list",
                        other.kind_name()
                    );
                    None
                }
            })
            .collect(),
        Some(other) => {
            log::warn!("ignoring {} recognizer options", other.kind_name());
            Vec::new()
        }
    }
}
