// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of hint popups next to the control they explain.
//!
//! A hint is usually shown while a control holds invalid input. This module only
//! computes where the popup goes; showing it is up to the toolkit.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_stage::hint::Hint;
//!
//! let field = Rect::new(20.0, 40.0, 220.0, 64.0);
//! let hint = Hint::below("Required", field, Point::new(0.0, 30.0), Point::new(100.0, 100.0));
//! assert_eq!(hint.anchor, Point::new(120.0, 199.0));
//! ```

use alloc::string::String;

use kurbo::{Point, Rect};

/// Vertical gap between the owner's bottom edge and the popup.
pub const HINT_GAP: f64 = 5.0;

/// A hint message and the screen point its popup's top-left corner goes to.
#[derive(Clone, Debug, PartialEq)]
pub struct Hint {
    /// Message to show.
    pub text: String,
    /// Screen position of the popup's top-left corner.
    pub anchor: Point,
}

impl Hint {
    /// Place `text` just below `owner`.
    ///
    /// `owner` is in scene coordinates; `scene_origin` is the scene's offset
    /// inside the window and `window_origin` is the window's screen position.
    pub fn below(
        text: impl Into<String>,
        owner: Rect,
        scene_origin: Point,
        window_origin: Point,
    ) -> Self {
        Self {
            text: text.into(),
            anchor: anchor_below(owner, scene_origin, window_origin),
        }
    }
}

/// Screen point [`HINT_GAP`] below the bottom-left corner of `owner`.
pub fn anchor_below(owner: Rect, scene_origin: Point, window_origin: Point) -> Point {
    Point::new(owner.x0, owner.y1 + HINT_GAP) + scene_origin.to_vec2() + window_origin.to_vec2()
}
