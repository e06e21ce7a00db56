// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative gesture bindings on a toy host.
//!
//! This example shows how to combine:
//! - `understory_gesture_options` for process-wide defaults and presets,
//! - `understory_gesture_binding` for attaching `hm-*` attributes to elements,
//! - `understory_event_state` for ghost-click suppression after touch input.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_gesture_demos --example pan_and_ghosts`

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use smallvec::smallvec;
use understory_event_state::ghost_click::GhostInput;
use understory_gesture::{Direction, GestureEvent, OptionValue, Options, keys};
use understory_gesture_binding::{
    BindingAttributes, Callback, DestroyHook, Gesture, GestureBinder, HandlerContext, Host,
};
use understory_gesture_options::{GestureDefaultsBuilder, default_presets};

const CARD: u32 = 1;

/// Data the handler expressions read and write.
#[derive(Debug, Default)]
struct Model {
    offset: Cell<f64>,
    likes: Cell<u32>,
}

/// A host whose "expressions" are keys into lookup tables.
struct Page {
    options: HashMap<&'static str, OptionValue>,
    handlers: HashMap<&'static str, fn(&Model, &GestureEvent)>,
    in_pass: Cell<bool>,
    hooks: RefCell<Vec<(u32, DestroyHook)>>,
}

impl Page {
    fn remove(&self, element: u32) {
        let hooks: Vec<_> = self
            .hooks
            .borrow_mut()
            .extract_if(.., |(e, _)| *e == element)
            .collect();
        for (_, hook) in hooks {
            hook();
        }
    }
}

impl Host for Page {
    type Element = u32;
    type Scope = Rc<Model>;

    fn supports_gestures(&self) -> bool {
        true
    }

    fn evaluate(&self, expr: &str, _: &Rc<Model>) -> Option<OptionValue> {
        self.options.get(expr).cloned()
    }

    fn resolve_handler(
        &self,
        expr: &str,
        scope: &Rc<Model>,
        context: &HandlerContext<'_, u32>,
    ) -> Option<Callback> {
        log::info!(
            "  handler `{expr}` on element {} for `{}`",
            context.element, context.event.event_type
        );
        let handler = *self.handlers.get(expr)?;
        let model = Rc::clone(scope);
        Some(Rc::new(move |event: &GestureEvent| handler(&model, event)))
    }

    fn in_update_pass(&self) -> bool {
        self.in_pass.get()
    }

    fn run_in_update_pass(&self, f: &mut dyn FnMut()) {
        self.in_pass.set(true);
        f();
        self.in_pass.set(false);
        log::debug!("update pass flushed");
    }

    fn on_destroy(&self, element: u32, hook: DestroyHook) {
        self.hooks.borrow_mut().push((element, hook));
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Configuration phase: presets, a global fallback, and manager options.
    let mut builder = GestureDefaultsBuilder::new();
    builder.apply_presets(&default_presets());
    builder
        .add_recognizer_option(Options::new().with("threshold", 5.0))
        .expect("fallback options are a map");
    builder.add_manager_option(keys::PREVENT_GHOSTS, true);
    let binder = GestureBinder::new(builder.build(), true);

    let mut options = HashMap::new();
    options.insert(
        "cardRecognizers",
        OptionValue::List(vec![
            Options::new()
                .with(keys::TYPE, "pan")
                .with(keys::DIRECTIONS, "DIRECTION_LEFT|DIRECTION_RIGHT")
                .with(keys::PREVENT_DEFAULT, true)
                .into(),
            Options::new()
                .with(keys::TYPE, "swipe")
                .with("velocity", 0.4)
                .into(),
            Options::new().with(keys::TYPE, "tap").into(),
            // Type-less: folded into every matching record above.
            Options::new().with("time", 250.0).into(),
        ]),
    );
    let mut handlers: HashMap<&'static str, fn(&Model, &GestureEvent)> = HashMap::new();
    handlers.insert("drag($event)", |model, event| {
        model.offset.set(model.offset.get() + event.delta.x);
    });
    handlers.insert("like()", |model, _| model.likes.set(model.likes.get() + 1));

    let host = Rc::new(Page {
        options,
        handlers,
        in_pass: Cell::new(false),
        hooks: RefCell::new(Vec::new()),
    });
    let model = Rc::new(Model::default());

    // Attach phase: the markup equivalent of
    // <div hm-swipe hm-panleft="drag($event)" hm-doubletap="like()"
    //      hm-recognizer-options="cardRecognizers">
    let bindings = [
        ("hm-swipe", "like()"),
        ("hm-panleft", "drag($event)"),
        ("hm-doubletap", "like()"),
    ];
    for (attribute, handler) in bindings {
        let gesture = Gesture::lookup(attribute).expect("known gesture attribute");
        let attrs = BindingAttributes::new(handler).with_recognizer_options("cardRecognizers");
        let attachment = binder
            .attach(&host, gesture, CARD, &model, &attrs)
            .expect("host supports gestures");
        log::info!(
            "{attribute}: wired {} record(s), listening for {:?}",
            attachment.applied, attachment.events
        );
    }

    {
        let manager = binder.manager(CARD).expect("card has a manager");
        let manager = manager.borrow();
        log::info!("card recognizers:");
        for recognizer in manager.recognizers() {
            let with: Vec<&str> = recognizer
                .recognize_with()
                .iter()
                .filter_map(|id| manager.recognizer(*id).map(|r| r.name()))
                .collect();
            log::info!(
                "  {:<10} {:<6} directions={:?} recognize_with={with:?}",
                recognizer.name(),
                recognizer.kind(),
                recognizer.direction(),
            );
        }
    }

    // The engine recognizes a drag and a double tap.
    log::info!("engine emits panleft");
    let mut pan = GestureEvent::new("panleft", Point::new(120.0, 80.0), 1_000)
        .with_delta(Vec2::new(-42.0, 0.0), Direction::LEFT);
    binder.emit(CARD, &mut pan);
    log::info!(
        "  offset={} default_prevented={}",
        model.offset.get(),
        pan.is_default_prevented()
    );

    log::info!("engine emits doubletap");
    let mut double =
        GestureEvent::new("doubletap", Point::new(120.0, 80.0), 1_400).with_tap_count(2);
    binder.emit(CARD, &mut double);
    log::info!("  likes={}", model.likes.get());

    // The runtime follows the touch sequence with a synthetic click.
    binder.handle_input(CARD, &GhostInput::TouchStart, 1_300);
    let release = GhostInput::TouchEnd {
        touches: 0,
        changed: smallvec![Point::new(120.0, 80.0)],
    };
    binder.handle_input(CARD, &release, 1_450);
    for (at, now) in [(Point::new(124.0, 83.0), 1_500), (Point::new(124.0, 83.0), 4_000)] {
        let verdict = binder.handle_input(CARD, &GhostInput::Click(at), now);
        log::info!("click at ({}, {}) t={now}ms: {verdict:?}", at.x, at.y);
    }

    // Removing the element runs the destroy hook registered by the first binding.
    host.remove(CARD);
    log::info!(
        "card removed: manager={} ghost filter={}",
        binder.manager(CARD).is_some(),
        binder.has_ghost_filter(CARD)
    );
}
