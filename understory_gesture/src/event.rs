// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture event payload delivered through [`Manager::emit`](crate::Manager::emit).

use alloc::string::String;
use kurbo::{Point, Vec2};

use crate::Direction;

/// A classified gesture event.
///
/// Outcomes such as "default prevented" live on the payload: handlers flip
/// the flags and the host inspects them after [`Manager::emit`](crate::Manager::emit)
/// returns to decide what to do with the underlying source event.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent {
    /// Event name (`"tap"`, `"panleft"`, ...). Handlers subscribe by this name.
    pub event_type: String,
    /// Center of the pointers involved.
    pub center: Point,
    /// Movement since the start of the gesture.
    pub delta: Vec2,
    /// Direction of the movement.
    pub direction: Direction,
    /// Scale relative to the start of a pinch (1.0 when not pinching).
    pub scale: f64,
    /// Rotation in degrees relative to the start of a rotate.
    pub rotation: f64,
    /// Consecutive taps counted by a tap recognizer.
    pub tap_count: u32,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
    /// Whether this is the last event of the gesture.
    pub is_final: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl GestureEvent {
    /// Create an event with neutral motion values.
    pub fn new(event_type: impl Into<String>, center: Point, timestamp: u64) -> Self {
        Self {
            event_type: event_type.into(),
            center,
            delta: Vec2::ZERO,
            direction: Direction::NONE,
            scale: 1.0,
            rotation: 0.0,
            tap_count: 0,
            timestamp,
            is_final: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Builder-style movement.
    #[must_use]
    pub fn with_delta(mut self, delta: Vec2, direction: Direction) -> Self {
        self.delta = delta;
        self.direction = direction;
        self
    }

    /// Builder-style tap count.
    #[must_use]
    pub fn with_tap_count(mut self, taps: u32) -> Self {
        self.tap_count = taps;
        self
    }

    /// Builder-style final marker.
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Ask the host to skip the source event's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Ask the host to stop propagating the source event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
