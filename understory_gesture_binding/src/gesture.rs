// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative attribute surface.
//!
//! Each supported gesture is one presence attribute whose value is the
//! handler expression (`hm-panleft="onPan($event)"`). Two companion
//! attributes carry option expressions evaluated once at attach time.

use understory_gesture::RecognizerKind;

/// Companion attribute holding a manager-options expression.
pub const MANAGER_OPTIONS_ATTR: &str = "hm-manager-options";

/// Companion attribute holding a recognizer-options expression (a map or a
/// list of maps).
pub const RECOGNIZER_OPTIONS_ATTR: &str = "hm-recognizer-options";

/// One binding: the attribute it is written as and the event it listens to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gesture {
    /// Attribute name, e.g. `hm-panleft`.
    pub attribute: &'static str,
    /// Event name, e.g. `panleft`.
    pub event: &'static str,
}

impl Gesture {
    const fn new(attribute: &'static str, event: &'static str) -> Self {
        Self { attribute, event }
    }

    /// Find the binding written as `attribute`.
    ///
    /// ```
    /// use understory_gesture_binding::Gesture;
    ///
    /// let gesture = Gesture::lookup("hm-doubletap").unwrap();
    /// assert_eq!(gesture.event, "doubletap");
    /// assert!(Gesture::lookup("hm-flick").is_none());
    /// ```
    pub fn lookup(attribute: &str) -> Option<&'static Self> {
        GESTURES.iter().find(|g| g.attribute == attribute)
    }

    /// Recognizer family serving this binding's event.
    pub fn kind(&self) -> RecognizerKind {
        RecognizerKind::from_event_name(self.event)
    }

    /// Whether this is the `hm-custom` binding, whose event names come from
    /// the recognizer options instead of the table.
    pub fn is_custom(&self) -> bool {
        self.kind().is_custom()
    }

    pub(crate) fn is_doubletap(&self) -> bool {
        self.event == "doubletap"
    }
}

/// Every supported binding.
pub static GESTURES: [Gesture; 31] = [
    Gesture::new("hm-custom", "custom"),
    Gesture::new("hm-swipe", "swipe"),
    Gesture::new("hm-swipeleft", "swipeleft"),
    Gesture::new("hm-swiperight", "swiperight"),
    Gesture::new("hm-swipeup", "swipeup"),
    Gesture::new("hm-swipedown", "swipedown"),
    Gesture::new("hm-pan", "pan"),
    Gesture::new("hm-panstart", "panstart"),
    Gesture::new("hm-panmove", "panmove"),
    Gesture::new("hm-panend", "panend"),
    Gesture::new("hm-pancancel", "pancancel"),
    Gesture::new("hm-panleft", "panleft"),
    Gesture::new("hm-panright", "panright"),
    Gesture::new("hm-panup", "panup"),
    Gesture::new("hm-pandown", "pandown"),
    Gesture::new("hm-press", "press"),
    Gesture::new("hm-pressup", "pressup"),
    Gesture::new("hm-rotate", "rotate"),
    Gesture::new("hm-rotatestart", "rotatestart"),
    Gesture::new("hm-rotatemove", "rotatemove"),
    Gesture::new("hm-rotateend", "rotateend"),
    Gesture::new("hm-rotatecancel", "rotatecancel"),
    Gesture::new("hm-pinch", "pinch"),
    Gesture::new("hm-pinchstart", "pinchstart"),
    Gesture::new("hm-pinchmove", "pinchmove"),
    Gesture::new("hm-pinchend", "pinchend"),
    Gesture::new("hm-pinchcancel", "pinchcancel"),
    Gesture::new("hm-pinchin", "pinchin"),
    Gesture::new("hm-pinchout", "pinchout"),
    Gesture::new("hm-tap", "tap"),
    Gesture::new("hm-doubletap", "doubletap"),
];

/// Attribute values read from one element for one binding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingAttributes<'a> {
    /// Handler expression (the gesture attribute's value).
    pub handler: &'a str,
    /// Manager-options expression, if present.
    pub manager_options: Option<&'a str>,
    /// Recognizer-options expression, if present.
    pub recognizer_options: Option<&'a str>,
}

impl<'a> BindingAttributes<'a> {
    /// Attributes with only a handler expression.
    pub fn new(handler: &'a str) -> Self {
        Self {
            handler,
            manager_options: None,
            recognizer_options: None,
        }
    }

    /// Builder-style manager-options expression.
    #[must_use]
    pub fn with_manager_options(mut self, expr: &'a str) -> Self {
        self.manager_options = Some(expr);
        self
    }

    /// Builder-style recognizer-options expression.
    #[must_use]
    pub fn with_recognizer_options(mut self, expr: &'a str) -> Self {
        self.recognizer_options = Some(expr);
        self
    }

    /// Read the attributes for `gesture` through an attribute getter.
    ///
    /// Returns `None` when the element does not carry the gesture attribute.
    pub fn from_lookup(
        gesture: &Gesture,
        mut attribute: impl FnMut(&str) -> Option<&'a str>,
    ) -> Option<Self> {
        Some(Self {
            handler: attribute(gesture.attribute)?,
            manager_options: attribute(MANAGER_OPTIONS_ATTR),
            recognizer_options: attribute(RECOGNIZER_OPTIONS_ATTR),
        })
    }
}
