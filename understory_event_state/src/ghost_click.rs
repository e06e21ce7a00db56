// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ghost-click suppression after touch sequences.
//!
//! Some runtimes synthesize a trailing `click`/`mouseup` at the release point
//! of a touch sequence. When a gesture binding already reacted to the touch,
//! that synthetic event activates the element a second time.
//!
//! [`GhostClickFilter`] buffers the release points of recent touch sequences
//! and vetoes nearby `click`/`mouseup` events within a short window, without
//! disabling native click entirely.
//!
//! ## Rules
//!
//! 1. **Touch start** clears the buffer.
//! 2. **Final touch end** (no fingers left down) records the release point of
//!    the first changed touch with a deadline of `now + timeout`.
//! 3. **Click / mouse up** is suppressed when any buffered point lies within
//!    `threshold` of the event on *both* axes independently (strict `<`). The
//!    first match wins.
//! 4. **Expiry**: entries are dropped in insertion order once their deadline
//!    has passed. Expiry runs before every click check, and hosts may also call
//!    [`GhostClickFilter::expire`] from a timer.
//!
//! Timestamps are host milliseconds, as elsewhere in this crate.
//!
//! ## Usage
//!
//! ```
//! use understory_event_state::ghost_click::{GhostClickFilter, GhostVerdict};
//! use kurbo::Point;
//!
//! let mut filter = GhostClickFilter::new();
//!
//! filter.on_touch_start();
//! filter.on_touch_end(1, &[Point::new(100.0, 100.0)], 1_000);
//!
//! // A synthetic click near the release point is vetoed...
//! assert_eq!(filter.on_click(Point::new(110.0, 105.0), 1_300), GhostVerdict::Suppress);
//! // ...one elsewhere is not.
//! assert_eq!(filter.on_click(Point::new(200.0, 200.0), 1_300), GhostVerdict::Pass);
//! // Once the window has passed, the same click goes through.
//! assert_eq!(filter.on_click(Point::new(110.0, 105.0), 3_500), GhostVerdict::Pass);
//! ```
//!
//! ## Per-element registry
//!
//! [`GhostClickRegistry`] keeps one filter per element and makes attaching
//! idempotent: attaching the same element twice keeps a single filter.

use alloc::collections::VecDeque;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

/// Raw input seen by the filter.
#[derive(Clone, Debug, PartialEq)]
pub enum GhostInput {
    /// A touch sequence started or another finger went down.
    TouchStart,
    /// One or more fingers were lifted.
    TouchEnd {
        /// Touches reported as still down by the runtime.
        ///
        /// Some runtimes still include the lifted touches here, which is why
        /// the final touch end is detected as `touches <= changed.len()`.
        touches: usize,
        /// Release points of the touches that changed.
        changed: SmallVec<[Point; 2]>,
    },
    /// A click at the given client coordinates.
    Click(Point),
    /// A mouse up at the given client coordinates.
    MouseUp(Point),
}

/// Outcome of offering an event to the filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GhostVerdict {
    /// Let the event through.
    Pass,
    /// Stop propagation and prevent the default action.
    Suppress,
}

impl GhostVerdict {
    /// Whether the event should be vetoed.
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppress)
    }
}

#[derive(Copy, Clone, Debug)]
struct Release {
    point: Point,
    deadline: u64,
}

/// Release-point buffer for a single element.
#[derive(Clone, Debug)]
pub struct GhostClickFilter {
    releases: VecDeque<Release>,
    /// Per-axis distance (pixels) under which a click counts as a ghost.
    pub threshold: f64,
    /// How long (milliseconds) a release point stays buffered.
    pub timeout: u64,
}

impl GhostClickFilter {
    /// Default per-axis threshold in pixels.
    pub const DEFAULT_THRESHOLD: f64 = 25.0;
    /// Default buffering window in milliseconds.
    pub const DEFAULT_TIMEOUT: u64 = 2500;

    /// Create a filter with the default 25px / 2500ms window.
    pub fn new() -> Self {
        Self::with_thresholds(Self::DEFAULT_THRESHOLD, Self::DEFAULT_TIMEOUT)
    }

    /// Create a filter with a custom threshold and window.
    pub fn with_thresholds(threshold: f64, timeout: u64) -> Self {
        Self {
            releases: VecDeque::new(),
            threshold,
            timeout,
        }
    }

    /// Forget every buffered release point.
    pub fn on_touch_start(&mut self) {
        self.releases.clear();
    }

    /// Record the release point if this was the final lifted finger.
    ///
    /// Returns `true` if a point was buffered.
    pub fn on_touch_end(&mut self, touches: usize, changed: &[Point], now: u64) -> bool {
        if touches > changed.len() {
            return false;
        }
        let Some(&point) = changed.first() else {
            return false;
        };
        self.releases.push_back(Release {
            point,
            deadline: now.saturating_add(self.timeout),
        });
        true
    }

    /// Check a click or mouse up against the buffered release points.
    pub fn on_click(&mut self, point: Point, now: u64) -> GhostVerdict {
        self.expire(now);
        let threshold = self.threshold;
        let hit = self.releases.iter().any(|r| {
            within(r.point.x, point.x, threshold) && within(r.point.y, point.y, threshold)
        });
        if hit {
            log::trace!("suppressing ghost click at ({}, {})", point.x, point.y);
            GhostVerdict::Suppress
        } else {
            GhostVerdict::Pass
        }
    }

    /// Drop release points whose deadline has passed, oldest first.
    ///
    /// Returns the number of points dropped.
    pub fn expire(&mut self, now: u64) -> usize {
        let mut dropped = 0;
        while self.releases.front().is_some_and(|r| r.deadline <= now) {
            self.releases.pop_front();
            dropped += 1;
        }
        dropped
    }

    /// Dispatch any [`GhostInput`].
    ///
    /// Only clicks and mouse ups can be suppressed; touch input always passes.
    pub fn handle(&mut self, input: &GhostInput, now: u64) -> GhostVerdict {
        match input {
            GhostInput::TouchStart => {
                self.on_touch_start();
                GhostVerdict::Pass
            }
            GhostInput::TouchEnd { touches, changed } => {
                self.on_touch_end(*touches, changed, now);
                GhostVerdict::Pass
            }
            GhostInput::Click(point) | GhostInput::MouseUp(point) => self.on_click(*point, now),
        }
    }

    /// Buffered release points, oldest first.
    pub fn releases(&self) -> impl Iterator<Item = Point> + '_ {
        self.releases.iter().map(|r| r.point)
    }

    /// Number of buffered release points.
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl Default for GhostClickFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn within(a: f64, b: f64, threshold: f64) -> bool {
    let d = a - b;
    -threshold < d && d < threshold
}

/// One [`GhostClickFilter`] per element, attached at most once.
///
/// Filters only exist in touch-capable runtimes; elsewhere [`attach`](Self::attach)
/// is a no-op and every event passes.
#[derive(Clone, Debug)]
pub struct GhostClickRegistry<E> {
    filters: HashMap<E, GhostClickFilter>,
    touch_capable: bool,
    threshold: f64,
    timeout: u64,
}

impl<E: Copy + Eq + Hash> GhostClickRegistry<E> {
    /// Create a registry with the default filter window.
    pub fn new(touch_capable: bool) -> Self {
        Self::with_thresholds(
            touch_capable,
            GhostClickFilter::DEFAULT_THRESHOLD,
            GhostClickFilter::DEFAULT_TIMEOUT,
        )
    }

    /// Create a registry whose filters use a custom threshold and window.
    pub fn with_thresholds(touch_capable: bool, threshold: f64, timeout: u64) -> Self {
        Self {
            filters: HashMap::new(),
            touch_capable,
            threshold,
            timeout,
        }
    }

    /// Whether the runtime delivers touch events.
    pub fn is_touch_capable(&self) -> bool {
        self.touch_capable
    }

    /// Attach a filter to `element`.
    ///
    /// Returns `true` only when a new filter was attached; attaching an
    /// already-filtered element, or any element in a runtime without touch
    /// support, returns `false`.
    pub fn attach(&mut self, element: E) -> bool {
        if !self.touch_capable || self.filters.contains_key(&element) {
            return false;
        }
        self.filters.insert(
            element,
            GhostClickFilter::with_thresholds(self.threshold, self.timeout),
        );
        log::debug!("ghost-click filter attached");
        true
    }

    /// Remove the filter from `element`. Returns `true` if one was attached.
    pub fn detach(&mut self, element: E) -> bool {
        self.filters.remove(&element).is_some()
    }

    /// Whether `element` is filtered.
    pub fn is_attached(&self, element: E) -> bool {
        self.filters.contains_key(&element)
    }

    /// The filter attached to `element`.
    pub fn filter(&self, element: E) -> Option<&GhostClickFilter> {
        self.filters.get(&element)
    }

    /// Offer an event targeted at `element` to its filter.
    ///
    /// Elements without a filter always pass.
    pub fn handle(&mut self, element: E, input: &GhostInput, now: u64) -> GhostVerdict {
        self.filters
            .get_mut(&element)
            .map_or(GhostVerdict::Pass, |filter| filter.handle(input, now))
    }

    /// Run [`GhostClickFilter::expire`] on every filter.
    pub fn expire(&mut self, now: u64) -> usize {
        self.filters.values_mut().map(|f| f.expire(now)).sum()
    }

    /// Number of filtered elements.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no element is filtered.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
