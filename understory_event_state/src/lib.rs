// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small input state machines for UI event handling.
//!
//! These helpers sit between a runtime's raw input and a toolkit's handlers.
//! They keep only the state needed to decide what to do with the next event
//! and take host timestamps (milliseconds) instead of reading a clock.
//!
//! - [`ghost_click`]: suppress synthetic `click`/`mouseup` events that some
//!   runtimes fire after a touch sequence, with a per-element
//!   [`GhostClickRegistry`](ghost_click::GhostClickRegistry) that attaches
//!   each filter at most once.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod ghost_click;
