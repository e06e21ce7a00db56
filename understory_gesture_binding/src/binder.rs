// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach declarative gesture bindings to elements.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_event_state::ghost_click::{GhostClickRegistry, GhostInput, GhostVerdict};
use understory_gesture::{
    GestureEvent, HandlerId, Manager, OptionValue, Options, Recognizer, keys,
};
use understory_gesture_options::{GestureDefaults, normalize_overrides};

use crate::host::{HandlerContext, Host};
use crate::wiring::{apply_gesture_hints, apply_manager_options, setup_recognizer_with_options};
use crate::{BindingAttributes, Gesture};

/// Error raised by [`GestureBinder::attach`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The host has no gesture engine or event listeners.
    #[error("gesture engine or event listeners unavailable, can't bind `{attribute}`")]
    Environment {
        /// Attribute that failed to bind.
        attribute: &'static str,
    },
}

/// Shared per-element manager.
pub type SharedManager = Rc<RefCell<Manager>>;

/// What one [`GestureBinder::attach`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Whether this attachment created the element's manager.
    pub created_manager: bool,
    /// Number of option records wired onto the manager.
    pub applied: usize,
    /// Event names the handler was subscribed to.
    pub events: SmallVec<[String; 1]>,
    /// Subscriptions made on the manager, parallel to `events`.
    pub handlers: SmallVec<[HandlerId; 1]>,
}

/// Binds gesture attributes on host elements to per-element managers.
///
/// One manager exists per element. It is created by the first binding
/// attached to the element and shared by every later one; the creating
/// binding registers a destroy hook with the host that tears the manager
/// down. Ghost-click filters live in a registry next to the managers.
///
/// Cloning the binder shares its state.
///
/// Handlers run with the manager released, so a callback may bind more
/// gestures on its own element or remove the element outright.
#[derive(Clone, Debug)]
pub struct GestureBinder<E> {
    defaults: Rc<GestureDefaults>,
    managers: Rc<RefCell<HashMap<E, SharedManager>>>,
    ghosts: Rc<RefCell<GhostClickRegistry<E>>>,
}

impl<E: Copy + Eq + Hash + Debug + 'static> GestureBinder<E> {
    /// Create a binder over frozen defaults.
    ///
    /// `touch_capable` decides whether ghost-click filters are ever attached.
    pub fn new(defaults: GestureDefaults, touch_capable: bool) -> Self {
        Self::with_ghost_registry(Rc::new(defaults), GhostClickRegistry::new(touch_capable))
    }

    /// Create a binder with shared defaults and a preconfigured ghost registry.
    pub fn with_ghost_registry(
        defaults: Rc<GestureDefaults>,
        ghosts: GhostClickRegistry<E>,
    ) -> Self {
        Self {
            defaults,
            managers: Rc::new(RefCell::new(HashMap::new())),
            ghosts: Rc::new(RefCell::new(ghosts)),
        }
    }

    /// The defaults every attachment resolves against.
    pub fn defaults(&self) -> &GestureDefaults {
        &self.defaults
    }

    /// Attach `gesture` to `element`.
    ///
    /// Evaluates the option expressions in `attrs` against `scope`, resolves
    /// them against the defaults, wires the resulting records onto the
    /// element's manager and subscribes a handler that evaluates
    /// `attrs.handler`.
    ///
    /// Records that fail to wire are logged and skipped. Only a host without
    /// gesture support fails the attachment.
    pub fn attach<H>(
        &self,
        host: &Rc<H>,
        gesture: &Gesture,
        element: E,
        scope: &H::Scope,
        attrs: &BindingAttributes<'_>,
    ) -> Result<Attachment, BindError>
    where
        H: Host<Element = E> + 'static,
    {
        if !host.supports_gestures() {
            return Err(BindError::Environment {
                attribute: gesture.attribute,
            });
        }

        let manager_overrides = attrs
            .manager_options
            .and_then(|expr| host.evaluate(expr, scope))
            .and_then(|value| match value {
                OptionValue::Map(options) => Some(options),
                other => {
                    log::warn!("ignoring {} manager options", other.kind_name());
                    None
                }
            });
        let manager_options = self
            .defaults
            .extend_with_default_manager_opts(manager_overrides.as_ref());
        let overrides = normalize_overrides(
            attrs
                .recognizer_options
                .and_then(|expr| host.evaluate(expr, scope)),
        );
        let records = self
            .defaults
            .extend_with_default_recognizer_opts(gesture.event, &overrides);

        let (manager, created_manager) =
            self.manager_or_create(host.as_ref(), element, manager_options.clone());
        let mut manager = manager.borrow_mut();
        let mut ghosts = self.ghosts.borrow_mut();

        let mut attachment = Attachment {
            created_manager,
            applied: 0,
            events: SmallVec::new(),
            handlers: SmallVec::new(),
        };
        for mut options in records {
            let event = if gesture.is_custom() {
                let Some(event) = options.event_name() else {
                    log::warn!("skipping custom recognizer options without an `event`");
                    continue;
                };
                String::from(event)
            } else {
                if !gesture.event.contains(options.type_name().unwrap_or_default()) {
                    continue;
                }
                options.remove(keys::EVENT);
                apply_gesture_hints(gesture, &mut options, &manager);
                String::from(gesture.event)
            };
            apply_manager_options(&manager_options, &mut options);
            // Failures are logged by the wiring itself.
            if setup_recognizer_with_options(&mut manager, options, Some(element), &mut ghosts)
                .is_ok()
            {
                attachment.applied += 1;
            }
            if !attachment.events.contains(&event) {
                attachment.events.push(event);
            }
        }

        for event in &attachment.events {
            let handler = bound_handler(Rc::clone(host), scope.clone(), attrs.handler, element);
            attachment.handlers.push(manager.on(event.clone(), handler));
        }
        Ok(attachment)
    }

    fn manager_or_create<H>(
        &self,
        host: &H,
        element: E,
        options: Options,
    ) -> (SharedManager, bool)
    where
        H: Host<Element = E>,
    {
        if let Some(manager) = self.managers.borrow().get(&element) {
            return (Rc::clone(manager), false);
        }
        let manager = Rc::new(RefCell::new(Manager::new(options)));
        self.managers.borrow_mut().insert(element, Rc::clone(&manager));
        log::debug!("created gesture manager for {element:?}");

        let managers = Rc::clone(&self.managers);
        let ghosts = Rc::clone(&self.ghosts);
        let owned = Rc::clone(&manager);
        host.on_destroy(
            element,
            Box::new(move || {
                let mut managers = managers.borrow_mut();
                if managers
                    .get(&element)
                    .is_some_and(|current| Rc::ptr_eq(current, &owned))
                {
                    managers.remove(&element);
                    ghosts.borrow_mut().detach(element);
                }
                drop(managers);
                if !owned.borrow().is_destroyed() {
                    log::debug!("destroying gesture manager for {element:?}");
                    owned.borrow_mut().destroy();
                }
            }),
        );
        (manager, true)
    }

    /// The manager of `element`, if one was created.
    pub fn manager(&self, element: E) -> Option<SharedManager> {
        self.managers.borrow().get(&element).cloned()
    }

    /// Elements that currently have a manager.
    pub fn elements(&self) -> Vec<E> {
        self.managers.borrow().keys().copied().collect()
    }

    /// Deliver a gesture event to the handlers bound on `element`.
    ///
    /// Returns the number of handlers run.
    pub fn emit(&self, element: E, event: &mut GestureEvent) -> usize {
        let Some(manager) = self.manager(element) else {
            return 0;
        };
        let delivery = manager.borrow().delivery(&event.event_type);
        // Stop once a handler has torn the element down.
        delivery.run(event, || !manager.borrow().is_destroyed())
    }

    /// Offer raw input on `element` to its ghost-click filter.
    ///
    /// The host stops propagation and prevents the default action of
    /// suppressed events.
    pub fn handle_input(&self, element: E, input: &GhostInput, now: u64) -> GhostVerdict {
        self.ghosts.borrow_mut().handle(element, input, now)
    }

    /// Expire buffered ghost-click release points; call from a host timer.
    pub fn expire(&self, now: u64) -> usize {
        self.ghosts.borrow_mut().expire(now)
    }

    /// Whether `element` has a ghost-click filter.
    pub fn has_ghost_filter(&self, element: E) -> bool {
        self.ghosts.borrow().is_attached(element)
    }

    /// Tear down `element`'s manager and ghost filter now.
    ///
    /// Returns `true` if a manager existed. The destroy hook registered with
    /// the host becomes a no-op.
    pub fn destroy_element(&self, element: E) -> bool {
        let removed = self.managers.borrow_mut().remove(&element);
        self.ghosts.borrow_mut().detach(element);
        match removed {
            Some(manager) => {
                log::debug!("destroying gesture manager for {element:?}");
                manager.borrow_mut().destroy();
                true
            }
            None => false,
        }
    }
}

/// Build the manager subscription for one binding.
fn bound_handler<H: Host + 'static>(
    host: Rc<H>,
    scope: H::Scope,
    expr: &str,
    element: H::Element,
) -> understory_gesture::Handler {
    let expr = String::from(expr);
    Rc::new(
        move |event: &mut GestureEvent, recognizer: Option<&Recognizer>| {
            if let Some(options) = recognizer.map(Recognizer::options) {
                if options.flag(keys::PREVENT_DEFAULT) {
                    event.prevent_default();
                }
                if options.flag(keys::STOP_PROPAGATION) {
                    event.stop_propagation();
                }
            }
            let event: &GestureEvent = event;
            let mut call = || {
                let context = HandlerContext { event, element };
                if let Some(callback) = host.resolve_handler(&expr, &scope, &context) {
                    callback(event);
                }
            };
            if host.in_update_pass() {
                call();
            } else {
                host.run_in_update_pass(&mut call);
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;
    use kurbo::Point;
    use smallvec::smallvec;
    use understory_gesture::{Direction, RecognizerKind};
    use understory_gesture_options::{GestureDefaultsBuilder, default_presets};

    use crate::host::{Callback, DestroyHook};

    /// Scripted host: expressions are keys into a table of values, and
    /// handler expressions are keys into a table of callbacks.
    #[derive(Default)]
    struct MockHost {
        unsupported: bool,
        values: RefCell<HashMap<&'static str, OptionValue>>,
        callbacks: RefCell<HashMap<&'static str, Callback>>,
        in_pass: Cell<bool>,
        passes: Cell<usize>,
        hooks: RefCell<Vec<(u32, DestroyHook)>>,
        seen_elements: RefCell<Vec<u32>>,
    }

    impl MockHost {
        fn value(&self, expr: &'static str, value: impl Into<OptionValue>) {
            self.values.borrow_mut().insert(expr, value.into());
        }

        fn callback(&self, expr: &'static str, callback: impl Fn(&GestureEvent) + 'static) {
            self.callbacks.borrow_mut().insert(expr, Rc::new(callback));
        }

        fn destroy(&self, element: u32) {
            let hooks: Vec<DestroyHook> = {
                let mut all = self.hooks.borrow_mut();
                let (matching, rest): (Vec<_>, Vec<_>) =
                    all.drain(..).partition(|(e, _)| *e == element);
                *all = rest;
                matching.into_iter().map(|(_, hook)| hook).collect()
            };
            for hook in hooks {
                hook();
            }
        }
    }

    impl Host for MockHost {
        type Element = u32;
        type Scope = ();

        fn supports_gestures(&self) -> bool {
            !self.unsupported
        }

        fn evaluate(&self, expr: &str, _: &()) -> Option<OptionValue> {
            self.values.borrow().get(expr).cloned()
        }

        fn resolve_handler(
            &self,
            expr: &str,
            _: &(),
            context: &HandlerContext<'_, u32>,
        ) -> Option<Callback> {
            self.seen_elements.borrow_mut().push(context.element);
            self.callbacks.borrow().get(expr).cloned()
        }

        fn in_update_pass(&self) -> bool {
            self.in_pass.get()
        }

        fn run_in_update_pass(&self, f: &mut dyn FnMut()) {
            self.passes.set(self.passes.get() + 1);
            self.in_pass.set(true);
            f();
            self.in_pass.set(false);
        }

        fn on_destroy(&self, element: u32, hook: DestroyHook) {
            self.hooks.borrow_mut().push((element, hook));
        }
    }

    fn binder() -> GestureBinder<u32> {
        GestureBinder::new(GestureDefaults::default(), true)
    }

    fn gesture(attribute: &str) -> &'static Gesture {
        Gesture::lookup(attribute).unwrap()
    }

    #[test]
    fn pan_without_overrides_creates_one_recognizer() {
        let host = Rc::new(MockHost::default());
        let binder = binder();
        let attachment = binder
            .attach(&host, gesture("hm-pan"), 1, &(), &BindingAttributes::new("onPan"))
            .unwrap();
        assert!(attachment.created_manager);
        assert_eq!(attachment.applied, 1);
        assert_eq!(attachment.events.as_slice(), ["pan"]);

        assert_eq!(binder.elements(), [1]);
        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        assert_eq!(manager.len(), 1);
        let pan = manager.get("pan").unwrap();
        assert_eq!(pan.kind(), RecognizerKind::Pan);
        assert_eq!(pan.direction(), Direction::ALL);
        assert!(pan.recognize_with().is_empty());
        assert!(pan.require_failure().is_empty());
        assert_eq!(manager.handler_count("pan"), 1);
    }

    #[test]
    fn missing_engine_is_an_environment_error() {
        let host = Rc::new(MockHost {
            unsupported: true,
            ..MockHost::default()
        });
        let err = binder()
            .attach(&host, gesture("hm-tap"), 1, &(), &BindingAttributes::new("onTap"))
            .unwrap_err();
        assert_eq!(err, BindError::Environment { attribute: "hm-tap" });
    }

    #[test]
    fn bindings_share_the_element_manager() {
        let host = Rc::new(MockHost::default());
        let binder = binder();
        let attrs = BindingAttributes::new("handler");
        let first = binder.attach(&host, gesture("hm-tap"), 1, &(), &attrs).unwrap();
        let second = binder
            .attach(&host, gesture("hm-doubletap"), 1, &(), &attrs)
            .unwrap();
        assert!(first.created_manager);
        assert!(!second.created_manager);
        assert_eq!(host.hooks.borrow().len(), 1);

        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        let tap = manager.id_of("tap").unwrap();
        let double = manager.id_of("doubletap").unwrap();
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.recognizer(double).unwrap().kind(), RecognizerKind::Tap);
        assert_eq!(
            manager.recognizer(double).unwrap().options().get_number(keys::TAPS),
            Some(2.0)
        );
        assert!(manager.can_recognize_with(double, tap));
    }

    #[test]
    fn pan_after_swipe_recognizes_with_it() {
        let host = Rc::new(MockHost::default());
        let binder = binder();
        let attrs = BindingAttributes::new("handler");
        binder.attach(&host, gesture("hm-swipe"), 1, &(), &attrs).unwrap();
        binder.attach(&host, gesture("hm-panleft"), 1, &(), &attrs).unwrap();
        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        let pan = manager.id_of("pan").unwrap();
        let swipe = manager.id_of("swipe").unwrap();
        assert!(manager.can_recognize_with(pan, swipe));
    }

    #[test]
    fn handler_applies_flags_and_runs_in_update_pass() {
        let host = Rc::new(MockHost::default());
        host.value(
            "opts",
            Options::new()
                .with(keys::TYPE, "tap")
                .with(keys::PREVENT_DEFAULT, true)
                .with(keys::STOP_PROPAGATION, true),
        );
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        host.callback("onTap", move |event| {
            assert_eq!(event.event_type, "tap");
            counter.set(counter.get() + 1);
        });

        let binder = binder();
        let attrs = BindingAttributes::new("onTap").with_recognizer_options("opts");
        binder.attach(&host, gesture("hm-tap"), 7, &(), &attrs).unwrap();

        let mut event = GestureEvent::new("tap", Point::new(5.0, 5.0), 0);
        assert_eq!(binder.emit(7, &mut event), 1);
        assert_eq!(hits.get(), 1);
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
        assert_eq!(host.passes.get(), 1);
        assert_eq!(*host.seen_elements.borrow(), [7]);

        // Already inside a pass: no new one is started.
        host.in_pass.set(true);
        binder.emit(7, &mut GestureEvent::new("tap", Point::ZERO, 1));
        assert_eq!(host.passes.get(), 1);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn non_callable_handler_expressions_are_evaluated_only() {
        let host = Rc::new(MockHost::default());
        let binder = binder();
        let attrs = BindingAttributes::new("count = count + 1");
        binder
            .attach(&host, gesture("hm-press"), 1, &(), &attrs)
            .unwrap();
        let mut event = GestureEvent::new("press", Point::ZERO, 0);
        assert_eq!(binder.emit(1, &mut event), 1);
        assert_eq!(host.seen_elements.borrow().len(), 1);
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn records_for_other_types_configure_dependencies_only() {
        let host = Rc::new(MockHost::default());
        host.value(
            "opts",
            OptionValue::List(vec![
                Options::new()
                    .with(keys::TYPE, "swipe")
                    .with(keys::REQUIRE_FAILURE, "pan")
                    .into(),
                Options::new()
                    .with(keys::TYPE, "tap")
                    .with(keys::EVENT, "ignored")
                    .into(),
            ]),
        );
        let binder = binder();
        let attrs = BindingAttributes::new("h").with_recognizer_options("opts");
        let attachment = binder.attach(&host, gesture("hm-tap"), 1, &(), &attrs).unwrap();
        // The swipe record does not match `tap`; the tap record loses its event.
        assert_eq!(attachment.applied, 1);
        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get("tap").unwrap().name(), "tap");
        assert!(manager.get("ignored").is_none());
    }

    #[test]
    fn custom_bindings_subscribe_per_event() {
        let host = Rc::new(MockHost::default());
        host.value(
            "opts",
            OptionValue::List(vec![
                Options::new()
                    .with(keys::TYPE, "tap")
                    .with(keys::EVENT, "tripletap")
                    .with(keys::TAPS, 3.0)
                    .into(),
                Options::new()
                    .with(keys::TYPE, "swipe")
                    .with(keys::EVENT, "flick")
                    .into(),
                Options::new().with(keys::TYPE, "press").into(),
            ]),
        );
        let binder = binder();
        let attrs = BindingAttributes::new("h").with_recognizer_options("opts");
        let attachment = binder
            .attach(&host, gesture("hm-custom"), 1, &(), &attrs)
            .unwrap();
        assert_eq!(attachment.events.as_slice(), ["tripletap", "flick"]);
        assert_eq!(attachment.handlers.len(), 2);
        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        assert_eq!(
            manager.get("tripletap").unwrap().options().get_number(keys::TAPS),
            Some(3.0)
        );
        assert_eq!(manager.get("flick").unwrap().kind(), RecognizerKind::Swipe);
        assert!(manager.get("press").is_none());
    }

    #[test]
    fn defaults_and_element_options_layer() {
        let mut builder = GestureDefaultsBuilder::new();
        builder.apply_presets(&default_presets());
        builder.add_manager_option(keys::PREVENT_GHOSTS, true);
        let binder = GestureBinder::new(builder.build(), true);

        let host = Rc::new(MockHost::default());
        host.value("mgr", Options::new().with("touchAction", "pan-y"));
        let attrs = BindingAttributes::new("h").with_manager_options("mgr");
        binder.attach(&host, gesture("hm-swipeleft"), 3, &(), &attrs).unwrap();

        let manager = binder.manager(3).unwrap();
        let manager = manager.borrow();
        assert_eq!(manager.options().get_str("touchAction"), Some("pan-y"));
        assert!(manager.options().flag(keys::PREVENT_GHOSTS));
        // The preset's horizontal directions win over the type default.
        assert_eq!(
            manager.get("swipe").unwrap().direction(),
            Direction::HORIZONTAL
        );
        assert!(binder.has_ghost_filter(3));
    }

    #[test]
    fn preset_directions_restrict_plain_pan() {
        let mut builder = GestureDefaultsBuilder::new();
        builder.apply_presets(&default_presets());
        let binder = GestureBinder::new(builder.build(), false);
        let host = Rc::new(MockHost::default());
        let attrs = BindingAttributes::new("h");
        binder.attach(&host, gesture("hm-pan"), 1, &(), &attrs).unwrap();
        binder.attach(&host, gesture("hm-press"), 1, &(), &attrs).unwrap();

        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        let pan = manager.get("pan").unwrap();
        assert_eq!(pan.direction(), Direction::HORIZONTAL);
        assert_eq!(
            pan.options().get_number(keys::DIRECTION),
            Some(f64::from(Direction::HORIZONTAL.bits()))
        );
        // No preset directions for press: the type default applies.
        assert_eq!(manager.get("press").unwrap().direction(), Direction::empty());
    }

    #[test]
    fn ghost_filter_suppresses_clicks_after_touch() {
        let mut builder = GestureDefaultsBuilder::new();
        builder.add_manager_option(keys::PREVENT_GHOSTS, true);
        let binder = GestureBinder::new(builder.build(), true);
        let host = Rc::new(MockHost::default());
        binder
            .attach(&host, gesture("hm-tap"), 1, &(), &BindingAttributes::new("h"))
            .unwrap();
        binder
            .attach(&host, gesture("hm-press"), 1, &(), &BindingAttributes::new("h"))
            .unwrap();

        let end = GhostInput::TouchEnd {
            touches: 0,
            changed: smallvec![Point::new(100.0, 100.0)],
        };
        binder.handle_input(1, &GhostInput::TouchStart, 0);
        binder.handle_input(1, &end, 0);
        let click = GhostInput::Click(Point::new(110.0, 105.0));
        assert!(binder.handle_input(1, &click, 100).is_suppressed());
        assert!(!binder.handle_input(2, &click, 100).is_suppressed());
        assert_eq!(binder.expire(2500), 1);
        assert!(!binder.handle_input(1, &click, 2600).is_suppressed());
    }

    #[test]
    fn destroy_hook_tears_down_once() {
        let host = Rc::new(MockHost::default());
        let mut builder = GestureDefaultsBuilder::new();
        builder.add_manager_option(keys::PREVENT_GHOSTS, true);
        let binder = GestureBinder::new(builder.build(), true);
        let attrs = BindingAttributes::new("h");
        binder.attach(&host, gesture("hm-tap"), 1, &(), &attrs).unwrap();
        let manager = binder.manager(1).unwrap();
        assert!(binder.has_ghost_filter(1));

        host.destroy(1);
        assert!(manager.borrow().is_destroyed());
        assert!(binder.manager(1).is_none());
        assert!(!binder.has_ghost_filter(1));
        assert_eq!(binder.emit(1, &mut GestureEvent::new("tap", Point::ZERO, 0)), 0);

        // A fresh attachment gets a fresh manager.
        let again = binder.attach(&host, gesture("hm-tap"), 1, &(), &attrs).unwrap();
        assert!(again.created_manager);
        assert!(!binder.manager(1).unwrap().borrow().is_destroyed());
    }

    #[test]
    fn handler_may_remove_its_own_element() {
        let host = Rc::new(MockHost::default());
        let closer = Rc::clone(&host);
        host.callback("close", move |_| closer.destroy(1));
        host.callback("after", |_| panic!("element was removed by an earlier handler"));

        let binder = binder();
        binder
            .attach(&host, gesture("hm-tap"), 1, &(), &BindingAttributes::new("close"))
            .unwrap();
        binder
            .attach(&host, gesture("hm-tap"), 1, &(), &BindingAttributes::new("after"))
            .unwrap();
        let manager = binder.manager(1).unwrap();

        let mut event = GestureEvent::new("tap", Point::ZERO, 0);
        assert_eq!(binder.emit(1, &mut event), 1);
        assert!(manager.borrow().is_destroyed());
        assert!(binder.manager(1).is_none());
        assert!(host.hooks.borrow().is_empty());
    }

    #[test]
    fn handler_may_bind_on_its_own_element() {
        let host = Rc::new(MockHost::default());
        let binder = binder();
        let (inner_host, inner_binder) = (Rc::clone(&host), binder.clone());
        host.callback("arm", move |_| {
            let attachment = inner_binder
                .attach(
                    &inner_host,
                    gesture("hm-press"),
                    1,
                    &(),
                    &BindingAttributes::new("h"),
                )
                .unwrap();
            assert!(!attachment.created_manager);
        });
        binder
            .attach(&host, gesture("hm-tap"), 1, &(), &BindingAttributes::new("arm"))
            .unwrap();

        assert_eq!(binder.emit(1, &mut GestureEvent::new("tap", Point::ZERO, 0)), 1);
        let manager = binder.manager(1).unwrap();
        let manager = manager.borrow();
        assert!(manager.get("press").is_some());
        assert_eq!(manager.handler_count("press"), 1);
    }

    #[test]
    fn explicit_destroy_disarms_the_hook() {
        let host = Rc::new(MockHost::default());
        let binder = binder();
        let attrs = BindingAttributes::new("h");
        binder.attach(&host, gesture("hm-tap"), 1, &(), &attrs).unwrap();
        let old = binder.manager(1).unwrap();
        assert!(binder.destroy_element(1));
        assert!(!binder.destroy_element(1));
        assert!(old.borrow().is_destroyed());

        binder.attach(&host, gesture("hm-tap"), 1, &(), &attrs).unwrap();
        let fresh = binder.manager(1).unwrap();
        // Only the hook of the first manager has run; the new one survives it.
        let first_hook = host.hooks.borrow_mut().remove(0);
        (first_hook.1)();
        assert!(!fresh.borrow().is_destroyed());
        assert!(binder.manager(1).is_some());
    }
}
