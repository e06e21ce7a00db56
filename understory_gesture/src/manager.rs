// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element recognizer graph and event subscriptions.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::recognizer::{relate, unrelate};
use crate::{GestureEvent, Options, Recognizer, RecognizerId, RecognizerKind};

/// Subscription callback.
///
/// Receives the event and the recognizer that produced it, when one can be
/// found by name (see [`Manager::recognizer_for_event`]).
pub type Handler = Rc<dyn Fn(&mut GestureEvent, Option<&Recognizer>)>;

/// Handle returned by [`Manager::on`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u32);

/// Subscribers of one event, detached from their manager.
///
/// Running a delivery does not borrow the manager, so a handler may reach
/// back into a shared manager to bind more gestures or tear it down.
#[derive(Clone, Default)]
pub struct Delivery {
    recognizer: Option<Recognizer>,
    handlers: Vec<Handler>,
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("recognizer", &self.recognizer.as_ref().map(Recognizer::name))
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Delivery {
    /// Recognizer responsible for the event, as it was when collected.
    pub fn recognizer(&self) -> Option<&Recognizer> {
        self.recognizer.as_ref()
    }

    /// Number of handlers collected.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is subscribed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handlers in subscription order while `live` returns `true`.
    ///
    /// `live` is checked before each handler. Returns the number run.
    pub fn run(&self, event: &mut GestureEvent, mut live: impl FnMut() -> bool) -> usize {
        let mut ran = 0;
        for handler in &self.handlers {
            if !live() {
                break;
            }
            handler(event, self.recognizer.as_ref());
            ran += 1;
        }
        ran
    }
}

struct Subscription {
    id: HandlerId,
    event: String,
    handler: Handler,
}

/// Owns the recognizers attached to one input surface.
///
/// ## Usage
///
/// - Create one manager per element with [`Manager::new`]; share it between
///   every binding on that element.
/// - [`Manager::add`] is fetch-or-create: a manager never holds two
///   recognizers with the same name.
/// - Relate recognizers with [`Manager::recognize_with`] (symmetric) and
///   [`Manager::require_failure`] (one-directional). Both are idempotent.
/// - The engine delivers classified events through [`Manager::emit`], which
///   runs every handler subscribed to the event name.
///
/// ```
/// use std::rc::Rc;
///
/// use kurbo::Point;
/// use understory_gesture::{GestureEvent, Manager, Options};
///
/// let mut manager = Manager::new(Options::new());
/// let pan = manager.add("pan");
/// let swipe = manager.add("swipe");
/// assert!(manager.recognize_with(pan, swipe));
/// assert!(manager.can_recognize_with(swipe, pan));
///
/// manager.on("panleft", Rc::new(|event, recognizer| {
///     assert_eq!(recognizer.map(|r| r.name()), Some("pan"));
///     event.prevent_default();
/// }));
/// let mut event = GestureEvent::new("panleft", Point::new(10.0, 10.0), 0);
/// assert_eq!(manager.emit(&mut event), 1);
/// assert!(event.is_default_prevented());
/// ```
pub struct Manager {
    options: Options,
    recognizers: Vec<Recognizer>,
    subscriptions: Vec<Subscription>,
    next_handler: u32,
    destroyed: bool,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("options", &self.options)
            .field("recognizers", &self.recognizers)
            .field("subscriptions", &self.subscriptions.len())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl Manager {
    /// Create a manager with the given manager options.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            recognizers: Vec::new(),
            subscriptions: Vec::new(),
            next_handler: 0,
            destroyed: false,
        }
    }

    /// Manager options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Merge further manager options.
    pub fn set_options(&mut self, options: &Options) {
        self.options.extend_from(options);
    }

    /// Look up a recognizer by name.
    pub fn get(&self, name: &str) -> Option<&Recognizer> {
        self.recognizers.iter().find(|r| r.name() == name)
    }

    /// Look up a recognizer id by name.
    pub fn id_of(&self, name: &str) -> Option<RecognizerId> {
        self.get(name).map(Recognizer::id)
    }

    /// Look up a recognizer by id.
    pub fn recognizer(&self, id: RecognizerId) -> Option<&Recognizer> {
        self.recognizers.get(id.idx())
    }

    /// Look up a recognizer by id, mutably.
    pub fn recognizer_mut(&mut self, id: RecognizerId) -> Option<&mut Recognizer> {
        self.recognizers.get_mut(id.idx())
    }

    /// Iterate recognizers in creation order.
    pub fn recognizers(&self) -> impl Iterator<Item = &Recognizer> {
        self.recognizers.iter()
    }

    /// Number of recognizers.
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// Whether the manager holds no recognizers.
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Fetch or create the recognizer named `name`.
    ///
    /// New recognizers are classified from the name
    /// ([`RecognizerKind::from_type_name`]).
    pub fn add(&mut self, name: &str) -> RecognizerId {
        self.add_kind(name, RecognizerKind::from_type_name(name))
    }

    /// Fetch or create the recognizer named `name`, creating it as `kind`.
    ///
    /// An existing recognizer keeps the kind it was created with.
    pub fn add_kind(&mut self, name: &str, kind: RecognizerKind) -> RecognizerId {
        if let Some(id) = self.id_of(name) {
            return id;
        }
        let id = RecognizerId(
            u32::try_from(self.recognizers.len()).expect("recognizer count fits in u32"),
        );
        let recognizer = Recognizer::new(id, name, kind);
        log::debug!("adding {} recognizer `{name}`", recognizer.kind());
        self.recognizers.push(recognizer);
        id
    }

    /// Let `a` and `b` succeed on the same input. Symmetric.
    ///
    /// Returns `true` if the relationship is new.
    pub fn recognize_with(&mut self, a: RecognizerId, b: RecognizerId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        let forward = relate(&mut self.recognizers[a.idx()].recognize_with, b);
        let backward = relate(&mut self.recognizers[b.idx()].recognize_with, a);
        forward || backward
    }

    /// Undo [`recognize_with`](Self::recognize_with). Returns `true` if anything was removed.
    pub fn drop_recognize_with(&mut self, a: RecognizerId, b: RecognizerId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let forward = unrelate(&mut self.recognizers[a.idx()].recognize_with, b);
        let backward = unrelate(&mut self.recognizers[b.idx()].recognize_with, a);
        forward || backward
    }

    /// Make `a` wait until `b` fails. One-directional.
    ///
    /// Returns `true` if the dependency is new.
    pub fn require_failure(&mut self, a: RecognizerId, b: RecognizerId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        relate(&mut self.recognizers[a.idx()].require_failure, b)
    }

    /// Undo [`require_failure`](Self::require_failure). Returns `true` if removed.
    pub fn drop_require_failure(&mut self, a: RecognizerId, b: RecognizerId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        unrelate(&mut self.recognizers[a.idx()].require_failure, b)
    }

    /// Whether `a` may succeed alongside `b`.
    pub fn can_recognize_with(&self, a: RecognizerId, b: RecognizerId) -> bool {
        self.recognizer(a)
            .is_some_and(|r| r.recognize_with().contains(&b))
    }

    /// Whether `a` waits for `b` to fail.
    pub fn requires_failure_of(&self, a: RecognizerId, b: RecognizerId) -> bool {
        self.recognizer(a)
            .is_some_and(|r| r.require_failure().contains(&b))
    }

    /// Recognizer responsible for an event name.
    ///
    /// An exact name match wins; otherwise the recognizer with the longest
    /// name that prefixes the event (`pan` for `panleft`).
    pub fn recognizer_for_event(&self, event: &str) -> Option<&Recognizer> {
        Self::find_for_event(&self.recognizers, event)
    }

    fn find_for_event<'a>(recognizers: &'a [Recognizer], event: &str) -> Option<&'a Recognizer> {
        recognizers
            .iter()
            .find(|r| r.name() == event)
            .or_else(|| {
                recognizers
                    .iter()
                    .filter(|r| event.starts_with(r.name()))
                    .max_by_key(|r| r.name().len())
            })
    }

    /// Subscribe `handler` to events named `event`.
    pub fn on(&mut self, event: impl Into<String>, handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.subscriptions.push(Subscription {
            id,
            event: event.into(),
            handler,
        });
        id
    }

    /// Remove a subscription. Returns `true` if it existed.
    pub fn off(&mut self, id: HandlerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of handlers subscribed to `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.subscriptions.iter().filter(|s| s.event == event).count()
    }

    /// Collect the subscribers of `event` together with its recognizer.
    ///
    /// A destroyed manager yields an empty delivery.
    pub fn delivery(&self, event: &str) -> Delivery {
        if self.destroyed {
            return Delivery::default();
        }
        Delivery {
            recognizer: Self::find_for_event(&self.recognizers, event).cloned(),
            handlers: self
                .subscriptions
                .iter()
                .filter(|s| s.event == event)
                .map(|s| Rc::clone(&s.handler))
                .collect(),
        }
    }

    /// Deliver an event to its subscribers in subscription order.
    ///
    /// Returns the number of handlers run. A destroyed manager runs none.
    /// Managers shared behind a `RefCell` should use
    /// [`delivery`](Self::delivery) and release the borrow before running it.
    pub fn emit(&self, event: &mut GestureEvent) -> usize {
        let ran = self.delivery(&event.event_type).run(event, || true);
        log::trace!("emitted `{}` to {ran} handler(s)", event.event_type);
        ran
    }

    /// Drop every recognizer and subscription. Further emits are ignored.
    pub fn destroy(&mut self) {
        log::debug!(
            "destroying manager with {} recognizer(s)",
            self.recognizers.len()
        );
        self.recognizers.clear();
        self.subscriptions.clear();
        self.destroyed = true;
    }

    /// Whether [`destroy`](Self::destroy) was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn contains(&self, id: RecognizerId) -> bool {
        id.idx() < self.recognizers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use kurbo::Point;

    #[test]
    fn add_is_fetch_or_create() {
        let mut m = Manager::new(Options::new());
        let a = m.add("pan");
        let b = m.add("pan");
        assert_eq!(a, b);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("pan").unwrap().kind(), RecognizerKind::Pan);
        assert!(m.get("tap").is_none());
    }

    #[test]
    fn creation_dispatches_on_name() {
        let mut m = Manager::new(Options::new());
        let ids = [
            m.add("panleft"),
            m.add("pinchin"),
            m.add("pressup"),
            m.add("rotatestart"),
            m.add("swipeup"),
            m.add("doubletap"),
        ];
        let kinds: Vec<RecognizerKind> = ids
            .iter()
            .map(|id| m.recognizer(*id).unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            [
                RecognizerKind::Pan,
                RecognizerKind::Pinch,
                RecognizerKind::Press,
                RecognizerKind::Rotate,
                RecognizerKind::Swipe,
                RecognizerKind::Tap,
            ]
        );
    }

    #[test]
    fn explicit_kind_wins_over_name() {
        let mut m = Manager::new(Options::new());
        let flick = m.add_kind("flick", RecognizerKind::Swipe);
        assert_eq!(m.recognizer(flick).unwrap().kind(), RecognizerKind::Swipe);
        assert_eq!(m.add("flick"), flick);
        assert_eq!(m.get("flick").unwrap().kind(), RecognizerKind::Swipe);
    }

    #[test]
    fn recognize_with_is_symmetric_and_idempotent() {
        let mut m = Manager::new(Options::new());
        let pan = m.add("pan");
        let swipe = m.add("swipe");
        assert!(m.recognize_with(pan, swipe));
        assert!(!m.recognize_with(pan, swipe));
        assert!(!m.recognize_with(swipe, pan));
        assert_eq!(m.recognizer(pan).unwrap().recognize_with(), &[swipe]);
        assert_eq!(m.recognizer(swipe).unwrap().recognize_with(), &[pan]);

        assert!(m.drop_recognize_with(swipe, pan));
        assert!(!m.can_recognize_with(pan, swipe));
        assert!(!m.can_recognize_with(swipe, pan));
        assert!(!m.drop_recognize_with(swipe, pan));
    }

    #[test]
    fn require_failure_is_one_directional() {
        let mut m = Manager::new(Options::new());
        let tap = m.add("tap");
        let double = m.add("doubletap");
        assert!(m.require_failure(tap, double));
        assert!(!m.require_failure(tap, double));
        assert!(m.requires_failure_of(tap, double));
        assert!(!m.requires_failure_of(double, tap));
        assert!(m.drop_require_failure(tap, double));
        assert!(!m.requires_failure_of(tap, double));
    }

    #[test]
    fn self_relations_are_ignored() {
        let mut m = Manager::new(Options::new());
        let tap = m.add("tap");
        assert!(!m.recognize_with(tap, tap));
        assert!(!m.require_failure(tap, tap));
        assert!(m.recognizer(tap).unwrap().recognize_with().is_empty());
    }

    #[test]
    fn emit_runs_matching_handlers_with_recognizer() {
        let mut m = Manager::new(Options::new());
        m.add("pan");
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        m.on(
            "panleft",
            Rc::new(move |_, recognizer| {
                assert_eq!(recognizer.map(Recognizer::name), Some("pan"));
                counter.set(counter.get() + 1);
            }),
        );
        m.on("tap", Rc::new(|_, _| panic!("tap handler must not run")));

        let mut event = GestureEvent::new("panleft", Point::new(1.0, 2.0), 10);
        assert_eq!(m.emit(&mut event), 1);
        assert_eq!(seen.get(), 1);
        assert_eq!(m.handler_count("panleft"), 1);
    }

    #[test]
    fn exact_name_beats_prefix() {
        let mut m = Manager::new(Options::new());
        m.add("tap");
        m.add("pan");
        m.add("panleft");
        assert_eq!(m.recognizer_for_event("panleft").unwrap().name(), "panleft");
        assert_eq!(m.recognizer_for_event("panright").unwrap().name(), "pan");
        assert!(m.recognizer_for_event("doubletap").is_none());
    }

    #[test]
    fn off_and_destroy_stop_delivery() {
        let mut m = Manager::new(Options::new());
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        let id = m.on("tap", Rc::new(move |_, _| counter.set(counter.get() + 1)));
        let mut event = GestureEvent::new("tap", Point::ZERO, 0);
        m.emit(&mut event);
        assert!(m.off(id));
        assert!(!m.off(id));
        m.emit(&mut event);
        assert_eq!(seen.get(), 1);

        m.add("tap");
        m.on("tap", Rc::new(|_, _| panic!("destroyed manager must not emit")));
        m.destroy();
        assert!(m.is_destroyed());
        assert!(m.is_empty());
        assert_eq!(m.emit(&mut event), 0);
        assert!(m.delivery("tap").is_empty());
    }

    #[test]
    fn delivery_runs_without_holding_the_manager() {
        let shared = Rc::new(RefCell::new(Manager::new(Options::new())));
        shared.borrow_mut().add("tap");
        let inner = Rc::clone(&shared);
        shared.borrow_mut().on(
            "tap",
            Rc::new(move |_, recognizer| {
                assert_eq!(recognizer.map(Recognizer::name), Some("tap"));
                inner.borrow_mut().add("press");
            }),
        );
        let inner = Rc::clone(&shared);
        shared
            .borrow_mut()
            .on("tap", Rc::new(move |_, _| inner.borrow_mut().destroy()));
        shared
            .borrow_mut()
            .on("tap", Rc::new(|_, _| panic!("runs after the manager is gone")));

        let delivery = shared.borrow().delivery("tap");
        assert_eq!(delivery.len(), 3);
        let mut event = GestureEvent::new("tap", Point::ZERO, 0);
        let ran = delivery.run(&mut event, || !shared.borrow().is_destroyed());
        assert_eq!(ran, 2);
        assert!(shared.borrow().is_destroyed());
    }
}
