// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_options --heading-base-level=0

//! Understory Gesture Options: layered defaults for gesture recognizers.
//!
//! ## Overview
//!
//! Applications configure gesture recognizers at three levels:
//!
//! - **Fallback**: options every recognizer starts from.
//! - **Per type**: options for one recognizer family (`tap`, `pan`, ...).
//! - **Per element**: options written on the element itself.
//!
//! plus one set of **manager** options shared by every element's manager.
//!
//! Configuration happens in two phases. During setup a
//! [`GestureDefaultsBuilder`] collects the layers; [`build`](GestureDefaultsBuilder::build)
//! freezes them into a [`GestureDefaults`] registry that is only read afterwards.
//! Resolution against a frozen registry is pure.
//!
//! ## Precedence
//!
//! For the recognizer that serves an event, lowest first:
//!
//! 1. fallback options,
//! 2. type-less per-element records,
//! 3. per-type defaults,
//! 4. the per-element record for that type.
//!
//! Per-type defaults therefore beat anonymous per-element records. Records for
//! other types pass through unchanged; they configure dependencies such as a
//! recognizer that must fail first.
//!
//! ## Example
//!
//! ```rust
//! use understory_gesture::{Options, keys};
//! use understory_gesture_options::{GestureDefaultsBuilder, default_presets};
//!
//! let mut builder = GestureDefaultsBuilder::new();
//! builder.apply_presets(&default_presets());
//! builder.add_manager_option(keys::PREVENT_GHOSTS, true);
//! let defaults = builder.build();
//!
//! let resolved = defaults.extend_with_default_recognizer_opts(
//!     "swipeleft",
//!     &[Options::new().with("velocity", 0.5)],
//! );
//! assert_eq!(resolved.len(), 1);
//! assert_eq!(resolved[0].type_name(), Some("swipe"));
//! assert_eq!(resolved[0].get_str(keys::DIRECTIONS), Some("DIRECTION_HORIZONTAL"));
//! assert_eq!(resolved[0].get_number("velocity"), Some(0.5));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: forwards to `understory_gesture/serde`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod presets;
mod resolve;

pub use builder::{ConfigError, GestureDefaultsBuilder};
pub use presets::{Preset, default_presets};
pub use resolve::{GestureDefaults, normalize_overrides};
