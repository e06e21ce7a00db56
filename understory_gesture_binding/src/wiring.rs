// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Materialize resolved options onto a manager's recognizer graph.

use alloc::string::String;
use core::hash::Hash;

use understory_event_state::ghost_click::GhostClickRegistry;
use understory_gesture::{
    Direction, Manager, Options, RecognizerId, RecognizerKind, default_directions, keys,
};

use crate::Gesture;

/// Error raised by [`setup_recognizer_with_options`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// The options do not name a recognizer type.
    #[error("recognizer options have no `type`")]
    MissingType,
}

/// Apply one resolved options record to `manager`.
///
/// Steps, in order:
///
/// 1. Fetch or create the recognizer named by `event`, else by `type`. New
///    recognizers are classified from `type`.
/// 2. Fill in `directions` when absent or empty (see [`default_directions`]),
///    then overwrite `direction` with the parsed bitmask.
/// 3. Merge every option into the recognizer.
/// 4. Relate it to the recognizers named by `recognizeWith` and
///    `requireFailure`, creating those when missing, and drop the relations
///    named by `dropRecognizeWith` and `dropRequireFailure` when their targets
///    exist.
/// 5. With `preventGhosts: true` and an element, attach a ghost-click filter
///    to the element.
///
/// Calling this again with the same options changes nothing.
///
/// A record without `type` is logged and rejected; nothing is touched.
///
/// ```
/// use understory_event_state::ghost_click::GhostClickRegistry;
/// use understory_gesture::{Direction, Manager, Options, keys};
/// use understory_gesture_binding::setup_recognizer_with_options;
///
/// let mut manager = Manager::new(Options::new());
/// let mut ghosts = GhostClickRegistry::<u32>::new(false);
/// let options = Options::new()
///     .with(keys::TYPE, "swipe")
///     .with(keys::REQUIRE_FAILURE, "pan");
///
/// let id = setup_recognizer_with_options(&mut manager, options, None, &mut ghosts).unwrap();
/// let swipe = manager.recognizer(id).unwrap();
/// assert_eq!(swipe.direction(), Direction::ALL);
/// assert!(manager.requires_failure_of(id, manager.id_of("pan").unwrap()));
/// ```
pub fn setup_recognizer_with_options<E: Copy + Eq + Hash>(
    manager: &mut Manager,
    mut options: Options,
    element: Option<E>,
    ghosts: &mut GhostClickRegistry<E>,
) -> Result<RecognizerId, SetupError> {
    let Some(type_name) = options
        .type_name()
        .filter(|t| !t.is_empty())
        .map(String::from)
    else {
        log::error!("cannot set up a recognizer without a `type`: {options:?}");
        return Err(SetupError::MissingType);
    };
    let name = options
        .event_name()
        .map_or_else(|| type_name.clone(), String::from);
    let id = manager.add_kind(&name, RecognizerKind::from_type_name(&type_name));

    if options.get_str(keys::DIRECTIONS).is_none_or(str::is_empty) {
        options.insert(keys::DIRECTIONS, default_directions(&type_name));
    }
    let direction = Direction::parse(options.get_str(keys::DIRECTIONS).unwrap_or_default());
    options.insert(keys::DIRECTION, direction.bits());
    if let Some(recognizer) = manager.recognizer_mut(id) {
        recognizer.set(&options);
    }

    if let Some(other) = options.get_str(keys::RECOGNIZE_WITH) {
        let other = manager.add(other);
        manager.recognize_with(id, other);
    }
    if let Some(other) = options
        .get_str(keys::DROP_RECOGNIZE_WITH)
        .and_then(|n| manager.id_of(n))
    {
        manager.drop_recognize_with(id, other);
    }
    if let Some(other) = options.get_str(keys::REQUIRE_FAILURE) {
        let other = manager.add(other);
        manager.require_failure(id, other);
    }
    if let Some(other) = options
        .get_str(keys::DROP_REQUIRE_FAILURE)
        .and_then(|n| manager.id_of(n))
    {
        manager.drop_require_failure(id, other);
    }

    if options.flag(keys::PREVENT_GHOSTS)
        && let Some(element) = element
    {
        ghosts.attach(element);
    }
    Ok(id)
}

/// Propagate manager-level flags into a recognizer options record.
///
/// Only `preventGhosts` is propagated. It is copied as-is, and removed from
/// the record when the manager options do not define it.
pub fn apply_manager_options(manager_options: &Options, options: &mut Options) {
    match manager_options.get(keys::PREVENT_GHOSTS) {
        Some(value) => {
            options.insert(keys::PREVENT_GHOSTS, value.clone());
        }
        None => {
            options.remove(keys::PREVENT_GHOSTS);
        }
    }
}

/// Built-in hints that let compound gestures fire.
///
/// The engine's recognizers are mutually exclusive by family; without these a
/// pan never fires once a swipe recognizer wins the arbitration.
///
/// - `doubletap` sets `event` and `taps: 2`, and recognizes with `tap` when a
///   tap recognizer exists.
/// - Pan-family types recognize with `swipe` when one exists.
/// - Pinch-family types recognize with `rotate` when one exists.
///
/// Later rules overwrite the `recognizeWith` of earlier ones.
pub fn apply_gesture_hints(gesture: &Gesture, options: &mut Options, manager: &Manager) {
    if gesture.is_doubletap() {
        options.insert(keys::EVENT, gesture.event);
        options.insert(keys::TAPS, 2_u32);
        if manager.get("tap").is_some() {
            options.insert(keys::RECOGNIZE_WITH, "tap");
        }
    }
    let (pan, pinch) = options
        .type_name()
        .map_or((false, false), |t| (t.contains("pan"), t.contains("pinch")));
    if pan && manager.get("swipe").is_some() {
        options.insert(keys::RECOGNIZE_WITH, "swipe");
    }
    if pinch && manager.get("rotate").is_some() {
        options.insert(keys::RECOGNIZE_WITH, "rotate");
    }
}
