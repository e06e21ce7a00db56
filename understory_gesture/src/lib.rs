// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: the recognizer graph behind declarative gesture bindings.
//!
//! This crate models what a binding layer needs to know about a gesture
//! engine, and nothing about how gestures are recognized:
//!
//! - [`RecognizerKind`]: the six recognizer families plus a `Custom` sentinel,
//!   with the substring classification rules for event and type names.
//! - [`Direction`]: the direction bitmask and the `|`-delimited codec
//!   ([`Direction::parse`], [`default_directions`]).
//! - [`Options`] / [`OptionValue`]: loosely-typed option records merged key by
//!   key, with the interpreted keys listed in [`keys`].
//! - [`Recognizer`]: one recognizer's options, direction, and relationship sets.
//! - [`Manager`]: the per-element recognizer set, the mutual-recognition and
//!   failure-dependency graph, and event subscriptions.
//! - [`GestureEvent`]: the payload the engine delivers through [`Manager::emit`].
//!
//! Touch/pointer normalization and the recognition state machines themselves
//! are owned by the host's engine, which feeds classified events back in
//! through [`Manager::emit`].
//!
//! ## Example
//!
//! ```rust
//! use understory_gesture::{Direction, Manager, Options, RecognizerKind, keys};
//!
//! let mut manager = Manager::new(Options::new());
//! let pan = manager.add("pan");
//! manager
//!     .recognizer_mut(pan)
//!     .unwrap()
//!     .set(&Options::new().with(keys::DIRECTIONS, "DIRECTION_HORIZONTAL"));
//!
//! let recognizer = manager.get("pan").unwrap();
//! assert_eq!(recognizer.kind(), RecognizerKind::Pan);
//! assert_eq!(recognizer.direction(), Direction::LEFT | Direction::RIGHT);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Options`] and [`OptionValue`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod direction;
mod event;
mod kind;
mod manager;
pub mod options;
mod recognizer;

pub use direction::{Direction, default_directions};
pub use event::GestureEvent;
pub use kind::RecognizerKind;
pub use manager::{Delivery, Handler, HandlerId, Manager};
pub use options::{OptionValue, Options, keys};
pub use recognizer::{Recognizer, RecognizerId};
