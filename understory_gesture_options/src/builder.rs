// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration phase: collect defaults, then freeze them.

use alloc::string::String;

use hashbrown::HashMap;
use understory_gesture::{OptionValue, Options, keys};

use crate::{GestureDefaults, Preset};

/// Error raised while registering defaults.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Recognizer options must be a map (or a list of maps).
    #[error("recognizer options must be a map, found a {found}")]
    NotAnObject {
        /// Shape of the rejected value.
        found: &'static str,
    },
}

/// Mutable collection of defaults, frozen into [`GestureDefaults`] by [`build`](Self::build).
///
/// ```
/// use understory_gesture::{OptionValue, Options};
/// use understory_gesture_options::GestureDefaultsBuilder;
///
/// let mut builder = GestureDefaultsBuilder::new();
/// builder.add_manager_option("preventGhosts", true);
/// builder
///     .add_recognizer_option(Options::new().with("type", "tap").with("time", 250.0))
///     .unwrap();
/// assert!(builder.add_recognizer_option(OptionValue::from("tap")).is_err());
///
/// let defaults = builder.build();
/// assert_eq!(defaults.type_defaults("tap").unwrap().get_number("time"), Some(250.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct GestureDefaultsBuilder {
    fallback: Option<Options>,
    per_type: HashMap<String, Options>,
    manager: Options,
}

impl GestureDefaultsBuilder {
    /// Start with no defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one manager option.
    pub fn add_manager_option(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> &mut Self {
        self.manager.insert(key, value);
        self
    }

    /// Merge a record into the manager options; its keys win.
    pub fn add_manager_options(&mut self, options: &Options) -> &mut Self {
        self.manager.extend_from(options);
        self
    }

    /// Register recognizer defaults.
    ///
    /// - A map with a `type` replaces the defaults for that type.
    /// - A map without one replaces the untyped fallback.
    /// - A list registers each entry in order.
    ///
    /// Anything else is rejected immediately with [`ConfigError::NotAnObject`].
    /// List entries registered before a rejected entry stay registered.
    pub fn add_recognizer_option(
        &mut self,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, ConfigError> {
        match value.into() {
            OptionValue::List(items) => {
                for item in items {
                    self.add_recognizer_option(item)?;
                }
                Ok(self)
            }
            OptionValue::Map(options) => {
                match options.type_name().filter(|t| !t.is_empty()) {
                    Some(name) => {
                        let name = String::from(name);
                        self.per_type.insert(name, options);
                    }
                    None => self.fallback = Some(options),
                }
                Ok(self)
            }
            other => Err(ConfigError::NotAnObject {
                found: other.kind_name(),
            }),
        }
    }

    /// Register recognizer defaults under an explicit type name.
    ///
    /// The record gets `type = name` unless it already names a type. An empty
    /// name registers the untyped fallback.
    pub fn add_named_recognizer_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, ConfigError> {
        let mut options = match value.into() {
            OptionValue::Map(options) => options,
            other => {
                return Err(ConfigError::NotAnObject {
                    found: other.kind_name(),
                });
            }
        };
        if name.is_empty() {
            self.fallback = Some(options);
        } else {
            if options.type_name().is_none() {
                options.insert(keys::TYPE, name);
            }
            self.per_type.insert(String::from(name), options);
        }
        Ok(self)
    }

    /// Copy the options of each preset into the per-type defaults.
    ///
    /// Presets without options are skipped, as are presets whose options
    /// rename the recognizer through `event` (for example the `doubletap`
    /// tap preset): those describe a derived recognizer, not the defaults of
    /// the type. Later presets for the same type win.
    ///
    /// Preset directions take effect: with [`default_presets`], a plain `pan`
    /// or `swipe` binding listens horizontally instead of in every direction.
    ///
    /// [`default_presets`]: crate::default_presets
    pub fn apply_presets<'a>(&mut self, presets: impl IntoIterator<Item = &'a Preset>) -> &mut Self {
        for preset in presets {
            let Some(options) = &preset.options else {
                continue;
            };
            let name = preset.kind.as_str();
            if options.event_name().is_some_and(|event| event != name) {
                log::debug!("skipping `{name}` preset that renames its recognizer");
                continue;
            }
            let mut options = options.clone();
            options.insert(keys::TYPE, name);
            self.per_type.insert(String::from(name), options);
        }
        self
    }

    /// Freeze the collected defaults.
    pub fn build(&self) -> GestureDefaults {
        GestureDefaults::from_parts(
            self.fallback.clone(),
            self.per_type.clone(),
            self.manager.clone(),
        )
    }
}
