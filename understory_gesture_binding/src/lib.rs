// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_binding --heading-base-level=0

//! Understory Gesture Binding: declarative gesture attributes for reactive UI hosts.
//!
//! ## Overview
//!
//! A host UI framework exposes gestures as attributes on elements
//! (`hm-tap`, `hm-panleft`, ...; see [`GESTURES`]). For each attribute found
//! on an element, the host calls [`GestureBinder::attach`], which:
//!
//! 1. evaluates the companion `hm-manager-options` and
//!    `hm-recognizer-options` expressions through the [`Host`],
//! 2. resolves them against the frozen
//!    [`GestureDefaults`](understory_gesture_options::GestureDefaults),
//! 3. fetches or creates the element's [`Manager`](understory_gesture::Manager),
//! 4. wires each resolved record onto it ([`setup_recognizer_with_options`]),
//! 5. subscribes a handler that runs the bound callback inside the host's
//!    update pass.
//!
//! The host's gesture engine then delivers classified events through
//! [`GestureBinder::emit`], and raw click/touch input through
//! [`GestureBinder::handle_input`] so ghost clicks can be vetoed.
//!
//! ## Layering
//!
//! This crate owns no recognition logic and parses no markup. Both live in
//! the host, behind the [`Host`] trait. Everything here is single-threaded:
//! managers are shared per element as `Rc<RefCell<Manager>>`.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_gesture::{GestureEvent, OptionValue};
//! use understory_gesture_binding::{
//!     BindingAttributes, Callback, DestroyHook, Gesture, GestureBinder, HandlerContext, Host,
//! };
//! use understory_gesture_options::GestureDefaultsBuilder;
//!
//! struct Page;
//!
//! impl Host for Page {
//!     type Element = u32;
//!     type Scope = ();
//!
//!     fn supports_gestures(&self) -> bool { true }
//!     fn evaluate(&self, _: &str, _: &()) -> Option<OptionValue> { None }
//!     fn resolve_handler(
//!         &self,
//!         _: &str,
//!         _: &(),
//!         _: &HandlerContext<'_, u32>,
//!     ) -> Option<Callback> {
//!         Some(Rc::new(|event: &GestureEvent| println!("{}", event.event_type)))
//!     }
//!     fn in_update_pass(&self) -> bool { false }
//!     fn run_in_update_pass(&self, f: &mut dyn FnMut()) { f() }
//!     fn on_destroy(&self, _: u32, _: DestroyHook) {}
//! }
//!
//! let binder = GestureBinder::new(GestureDefaultsBuilder::new().build(), false);
//! let host = Rc::new(Page);
//! let pan = Gesture::lookup("hm-pan").unwrap();
//! binder
//!     .attach(&host, pan, 1, &(), &BindingAttributes::new("onPan($event)"))
//!     .unwrap();
//!
//! let mut event = GestureEvent::new("pan", Point::new(4.0, 2.0), 16);
//! assert_eq!(binder.emit(1, &mut event), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binder;
mod gesture;
pub mod host;
mod wiring;

pub use binder::{Attachment, BindError, GestureBinder, SharedManager};
pub use gesture::{
    BindingAttributes, GESTURES, Gesture, MANAGER_OPTIONS_ATTR, RECOGNIZER_OPTIONS_ATTR,
};
pub use host::{Callback, DestroyHook, HandlerContext, Host};
pub use wiring::{
    SetupError, apply_gesture_hints, apply_manager_options, setup_recognizer_with_options,
};
