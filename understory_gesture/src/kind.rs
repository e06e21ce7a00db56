// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer kinds and the name classification rules.
//!
//! Event and recognizer names are free-form strings (`panleft`, `pinchout`,
//! `doubletap`, or application-specific names). Classification is a plain
//! substring scan in a fixed priority order:
//!
//! 1. `pan`
//! 2. `pinch`
//! 3. `press`
//! 4. `rotate`
//! 5. `swipe`
//!
//! The first token found wins, and anything else is a tap. Longest match is
//! deliberately not used, so `"swipepan"` classifies as [`RecognizerKind::Pan`].
//!
//! ```
//! use understory_gesture::RecognizerKind;
//!
//! assert_eq!(RecognizerKind::from_event_name("panleft"), RecognizerKind::Pan);
//! assert_eq!(RecognizerKind::from_event_name("pinchout"), RecognizerKind::Pinch);
//! assert_eq!(RecognizerKind::from_event_name("doubletap"), RecognizerKind::Tap);
//! assert_eq!(RecognizerKind::from_event_name("custom"), RecognizerKind::Custom);
//! ```

use core::fmt;

/// Gesture recognizer family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecognizerKind {
    /// Single or multi tap.
    Tap,
    /// Single-pointer drag.
    Pan,
    /// Two-pointer scale.
    Pinch,
    /// Long press.
    Press,
    /// Two-pointer rotation.
    Rotate,
    /// Fast directional flick.
    Swipe,
    /// Host-defined event; bypasses default injection entirely.
    Custom,
}

/// Substring tokens checked by [`RecognizerKind::from_type_name`], in priority order.
const PRIORITY: [(&str, RecognizerKind); 5] = [
    ("pan", RecognizerKind::Pan),
    ("pinch", RecognizerKind::Pinch),
    ("press", RecognizerKind::Press),
    ("rotate", RecognizerKind::Rotate),
    ("swipe", RecognizerKind::Swipe),
];

impl RecognizerKind {
    /// Event name reserved for host-defined gestures.
    pub const CUSTOM_EVENT: &'static str = "custom";

    /// Every kind that maps to a concrete recognizer, in classification order.
    pub const RECOGNIZERS: [Self; 6] = [
        Self::Pan,
        Self::Pinch,
        Self::Press,
        Self::Rotate,
        Self::Swipe,
        Self::Tap,
    ];

    /// Classify a recognizer type name by substring, falling back to [`Tap`](Self::Tap).
    ///
    /// Never returns [`Custom`](Self::Custom).
    pub fn from_type_name(name: &str) -> Self {
        PRIORITY
            .iter()
            .find(|(token, _)| name.contains(token))
            .map_or(Self::Tap, |&(_, kind)| kind)
    }

    /// Classify an event name.
    ///
    /// The exact name `"custom"` is the [`Custom`](Self::Custom) sentinel;
    /// everything else goes through [`from_type_name`](Self::from_type_name).
    pub fn from_event_name(name: &str) -> Self {
        if name == Self::CUSTOM_EVENT {
            Self::Custom
        } else {
            Self::from_type_name(name)
        }
    }

    /// Canonical type name, as used for per-type defaults.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Press => "press",
            Self::Rotate => "rotate",
            Self::Swipe => "swipe",
            Self::Custom => Self::CUSTOM_EVENT,
        }
    }

    /// Whether this is the [`Custom`](Self::Custom) sentinel.
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
