// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the binder needs from the host UI framework.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt::Debug;
use core::hash::Hash;

use understory_gesture::{GestureEvent, OptionValue};

/// Resolved gesture callback.
pub type Callback = Rc<dyn Fn(&GestureEvent)>;

/// Hook run once when an element's lifecycle ends.
pub type DestroyHook = Box<dyn FnOnce()>;

/// What a handler expression sees when it is evaluated.
#[derive(Copy, Clone, Debug)]
pub struct HandlerContext<'a, E> {
    /// The event, exposed to the expression as `$event`.
    pub event: &'a GestureEvent,
    /// The element the binding is attached to.
    pub element: E,
}

/// Host UI framework collaborator.
///
/// The binder never parses markup or expressions itself. It asks the host to
/// evaluate attribute values against a data scope, to run callbacks inside
/// the host's update pass, and to report when an element goes away.
pub trait Host {
    /// Element identity. Managers and ghost filters are keyed by it.
    type Element: Copy + Eq + Hash + Debug + 'static;
    /// Data scope expressions are evaluated against.
    type Scope: Clone + 'static;

    /// Whether a gesture engine and event listeners are available.
    fn supports_gestures(&self) -> bool;

    /// Evaluate an options expression.
    fn evaluate(&self, expr: &str, scope: &Self::Scope) -> Option<OptionValue>;

    /// Evaluate a handler expression with the event in scope.
    ///
    /// Return the callback when the expression produces one; it is invoked
    /// with the event. Expressions that only have side effects return `None`.
    fn resolve_handler(
        &self,
        expr: &str,
        scope: &Self::Scope,
        context: &HandlerContext<'_, Self::Element>,
    ) -> Option<Callback>;

    /// Whether an update pass is currently running.
    fn in_update_pass(&self) -> bool;

    /// Run `f` inside a new update pass.
    fn run_in_update_pass(&self, f: &mut dyn FnMut());

    /// Run `hook` once when `element` is destroyed.
    fn on_destroy(&self, element: Self::Element, hook: DestroyHook);
}
