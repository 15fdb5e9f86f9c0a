// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window primitive consumed by [`StageController`](crate::stage::StageController).

use kurbo::Size;
use understory_presentation::controller::Surface;
use understory_presentation::types::Lifecycle;

/// Window visibility transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WindowEvent {
    /// The window is about to be shown.
    Showing,
    /// The window was shown.
    Shown,
    /// The window is about to be hidden.
    Hiding,
    /// The window was hidden.
    Hidden,
}

impl WindowEvent {
    /// Lifecycle hook the root controller receives for this transition.
    pub const fn lifecycle(self) -> Lifecycle {
        match self {
            Self::Showing => Lifecycle::WillAppear,
            Self::Shown => Lifecycle::DidAppear,
            Self::Hiding => Lifecycle::WillDisappear,
            Self::Hidden => Lifecycle::DidDisappear,
        }
    }
}

/// A top-level toolkit window with a single scene.
///
/// `show` and `hide` report their transitions through `events` as they
/// happen. Toolkits that only learn about transitions later, from their event
/// loop, report nothing here and call
/// [`StageController::handle_window_event`](crate::stage::StageController::handle_window_event)
/// instead.
pub trait Window<V> {
    /// The window's scene; its root content is swapped by the presentation stack.
    type Scene: Surface<V>;

    /// Create the window's scene with `content` as its root and attach it.
    ///
    /// `size` is the requested scene size, or `None` for the toolkit default.
    fn create_scene(&mut self, content: &V, size: Option<Size>) -> Self::Scene;

    /// Show the window.
    fn show(&mut self, events: &mut dyn FnMut(WindowEvent));

    /// Hide the window.
    fn hide(&mut self, events: &mut dyn FnMut(WindowEvent));

    /// Set the title shown in the window's title bar.
    fn set_title(&mut self, title: &str);
}
