// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use understory_gesture::{Options, RecognizerKind, keys};

/// A built-in recognizer configuration: a type plus optional options.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    /// Recognizer family.
    pub kind: RecognizerKind,
    /// Options for the recognizer, if the preset carries any.
    pub options: Option<Options>,
}

impl Preset {
    /// A preset with options.
    pub fn new(kind: RecognizerKind, options: Options) -> Self {
        Self {
            kind,
            options: Some(options),
        }
    }

    /// A preset with engine defaults only.
    pub fn bare(kind: RecognizerKind) -> Self {
        Self {
            kind,
            options: None,
        }
    }
}

/// The engine's stock recognizer presets, in registration order.
///
/// Rotate and pinch are disabled, swipe and pan are horizontal, and a second
/// tap recognizer fires `doubletap` after two taps.
///
/// Directions are given as `directions` strings, so wiring derives the
/// numeric mask from them and the horizontal restriction holds.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new(RecognizerKind::Rotate, Options::new().with(keys::ENABLE, false)),
        Preset::new(RecognizerKind::Pinch, Options::new().with(keys::ENABLE, false)),
        Preset::new(
            RecognizerKind::Swipe,
            Options::new().with(keys::DIRECTIONS, "DIRECTION_HORIZONTAL"),
        ),
        Preset::new(
            RecognizerKind::Pan,
            Options::new().with(keys::DIRECTIONS, "DIRECTION_HORIZONTAL"),
        ),
        Preset::bare(RecognizerKind::Tap),
        Preset::new(
            RecognizerKind::Tap,
            Options::new()
                .with(keys::EVENT, "doubletap")
                .with(keys::TAPS, 2_u32),
        ),
        Preset::bare(RecognizerKind::Press),
    ]
}
