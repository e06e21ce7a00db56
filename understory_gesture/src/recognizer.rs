// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer records owned by a [`Manager`](crate::Manager).

use smallvec::SmallVec;

use crate::options::keys;
use crate::{Direction, Options, RecognizerKind};

/// Handle of a recognizer within its manager.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecognizerId(pub(crate) u32);

impl RecognizerId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Relationship set; recognizers rarely relate to more than a couple of others.
pub(crate) type Relations = SmallVec<[RecognizerId; 2]>;

/// One gesture recognizer as seen by the binding layer.
///
/// The recognizer's name is its `event` option, which defaults to the name
/// it was created under. Everything else about recognition (thresholds,
/// timings) is carried opaquely in [`options`](Self::options) for the engine.
#[derive(Clone, Debug)]
pub struct Recognizer {
    pub(crate) id: RecognizerId,
    kind: RecognizerKind,
    options: Options,
    direction: Direction,
    pub(crate) recognize_with: Relations,
    pub(crate) require_failure: Relations,
}

impl Recognizer {
    pub(crate) fn new(id: RecognizerId, name: &str, kind: RecognizerKind) -> Self {
        Self {
            id,
            kind,
            options: Options::new()
                .with(keys::TYPE, kind.as_str())
                .with(keys::EVENT, name),
            direction: Direction::empty(),
            recognize_with: Relations::new(),
            require_failure: Relations::new(),
        }
    }

    /// Handle of this recognizer.
    pub fn id(&self) -> RecognizerId {
        self.id
    }

    /// Gesture family, fixed at creation.
    pub fn kind(&self) -> RecognizerKind {
        self.kind
    }

    /// Lookup name: the `event` option.
    pub fn name(&self) -> &str {
        self.options.event_name().unwrap_or(self.kind.as_str())
    }

    /// Current option record.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Direction bitmask derived from the last applied `directions` string.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the `enable` option is unset or `true`.
    pub fn is_enabled(&self) -> bool {
        self.options.get_bool(keys::ENABLE).unwrap_or(true)
    }

    /// Merge `options` into this recognizer's record.
    ///
    /// A `directions` entry recomputes the direction bitmask.
    pub fn set(&mut self, options: &Options) {
        self.options.extend_from(options);
        if let Some(directions) = options.get_str(keys::DIRECTIONS) {
            self.direction = Direction::parse(directions);
        }
    }

    /// Recognizers this one may succeed alongside.
    pub fn recognize_with(&self) -> &[RecognizerId] {
        &self.recognize_with
    }

    /// Recognizers that must fail before this one may succeed.
    pub fn require_failure(&self) -> &[RecognizerId] {
        &self.require_failure
    }
}

/// Insert `id` unless already present; `true` if inserted.
pub(crate) fn relate(set: &mut Relations, id: RecognizerId) -> bool {
    if set.contains(&id) {
        false
    } else {
        set.push(id);
        true
    }
}

/// Remove `id` if present; `true` if removed.
pub(crate) fn unrelate(set: &mut Relations, id: RecognizerId) -> bool {
    match set.iter().position(|other| *other == id) {
        Some(pos) => {
            set.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_recognizer_is_named_after_creation_name() {
        let r = Recognizer::new(RecognizerId(0), "panleft", RecognizerKind::Pan);
        assert_eq!(r.kind(), RecognizerKind::Pan);
        assert_eq!(r.name(), "panleft");
        assert_eq!(r.options().type_name(), Some("pan"));
        assert!(r.is_enabled());
        assert_eq!(r.direction(), Direction::empty());
    }

    #[test]
    fn set_merges_and_derives_direction() {
        let mut r = Recognizer::new(RecognizerId(0), "swipe", RecognizerKind::Swipe);
        r.set(
            &Options::new()
                .with(keys::DIRECTIONS, "DIRECTION_UP|DIRECTION_DOWN")
                .with("velocity", 0.5),
        );
        assert_eq!(r.direction(), Direction::VERTICAL);
        assert_eq!(r.options().get_number("velocity"), Some(0.5));

        // Options without `directions` keep the previous mask.
        r.set(&Options::new().with(keys::ENABLE, false));
        assert_eq!(r.direction(), Direction::VERTICAL);
        assert!(!r.is_enabled());
    }

    #[test]
    fn event_option_renames() {
        let mut r = Recognizer::new(RecognizerId(3), "tap", RecognizerKind::Tap);
        r.set(&Options::new().with(keys::EVENT, "doubletap").with(keys::TAPS, 2.0));
        assert_eq!(r.name(), "doubletap");
        assert_eq!(r.kind(), RecognizerKind::Tap);
    }

    #[test]
    fn relation_sets_reject_duplicates() {
        let mut set = Relations::new();
        assert!(relate(&mut set, RecognizerId(1)));
        assert!(!relate(&mut set, RecognizerId(1)));
        assert_eq!(set.len(), 1);
        assert!(unrelate(&mut set, RecognizerId(1)));
        assert!(!unrelate(&mut set, RecognizerId(1)));
        assert!(set.is_empty());
    }
}
