// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direction bitmask and the `|`-delimited direction codec.

bitflags::bitflags! {
    /// Direction bitmask understood by directional recognizers (pan, swipe).
    ///
    /// Values match the engine constants, so `NONE` is a real bit rather than
    /// the empty set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Direction: u32 {
        /// No movement.
        const NONE = 1;
        /// Leftward movement.
        const LEFT = 2;
        /// Rightward movement.
        const RIGHT = 4;
        /// Upward movement.
        const UP = 8;
        /// Downward movement.
        const DOWN = 16;
        /// Left or right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Up or down.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        /// Any movement.
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

/// Prefix carried by the engine constant names (`DIRECTION_LEFT`).
const TOKEN_PREFIX: &str = "DIRECTION_";

impl Direction {
    /// Resolve a single direction token.
    ///
    /// Accepts the engine constant name (`DIRECTION_LEFT`) or its bare suffix
    /// (`LEFT`). Tokens are case-sensitive; unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let name = token.strip_prefix(TOKEN_PREFIX).unwrap_or(token);
        Self::from_name(name)
    }

    /// Parse a `|`-delimited list of direction tokens into a bitmask.
    ///
    /// Unknown tokens contribute nothing and the empty string yields the empty set.
    ///
    /// ```
    /// use understory_gesture::Direction;
    ///
    /// assert_eq!(Direction::parse(""), Direction::empty());
    /// assert_eq!(Direction::parse("DIRECTION_LEFT|DIRECTION_RIGHT"), Direction::HORIZONTAL);
    /// assert_eq!(Direction::parse("UP|sideways"), Direction::UP);
    /// ```
    pub fn parse(directions: &str) -> Self {
        directions
            .split('|')
            .filter_map(|token| Self::from_token(token.trim()))
            .fold(Self::empty(), |acc, dir| acc | dir)
    }
}

/// Direction string applied when a recognizer's options carry none.
///
/// `pan` and `swipe` (exact type names) listen in every direction; derived
/// names such as `panleft` or `swipeup` listen in the direction they name;
/// anything else gets the empty string.
pub fn default_directions(type_name: &str) -> &'static str {
    if type_name == "pan" || type_name == "swipe" {
        "DIRECTION_ALL"
    } else if type_name.contains("left") {
        "DIRECTION_LEFT"
    } else if type_name.contains("right") {
        "DIRECTION_RIGHT"
    } else if type_name.contains("up") {
        "DIRECTION_UP"
    } else if type_name.contains("down") {
        "DIRECTION_DOWN"
    } else {
        ""
    }
}
