// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller behaviour: view loading and lifecycle hooks.
//!
//! ## Overview
//!
//! A [`ViewController`] supplies the behaviour of one navigable unit. State that
//! the presentation stack relies on (the memoized view, title, links and
//! appearance) is kept by the [`Hierarchy`](crate::hierarchy::Hierarchy), so
//! implementations only override the hooks they care about.
//!
//! Views come from one of two places:
//! - Override [`ViewController::load_view`] and build the view directly.
//! - Keep the default, which hands the controller's [`MarkupSource`] to the
//!   installed [`ViewLoader`].
//!
//! ```
//! use understory_presentation::controller::{LoadRequest, ViewController};
//! use understory_presentation::error::ViewLoadError;
//!
//! struct Counter {
//!     loads: u32,
//! }
//!
//! impl ViewController<String> for Counter {
//!     fn load_view(&mut self, _request: LoadRequest<'_, String>) -> Result<String, ViewLoadError> {
//!         Ok("counter".into())
//!     }
//!
//!     fn view_did_load(&mut self, _view: &String) {
//!         self.loads += 1;
//!     }
//! }
//! ```

use crate::error::ViewLoadError;
use crate::types::{ControllerId, Lifecycle, MarkupSource};

/// External markup loader.
///
/// Given a [`MarkupSource`], produce the view it describes. `owner` is the
/// controller requesting the view; loaders that resolve controller references
/// declared in the markup must bind them to `owner`.
pub trait ViewLoader<V> {
    /// Load the view described by `source` on behalf of `owner`.
    fn load(&mut self, source: &MarkupSource, owner: ControllerId) -> Result<V, ViewLoadError>;
}

impl<V, F> ViewLoader<V> for F
where
    F: FnMut(&MarkupSource, ControllerId) -> Result<V, ViewLoadError>,
{
    fn load(&mut self, source: &MarkupSource, owner: ControllerId) -> Result<V, ViewLoadError> {
        self(source, owner)
    }
}

/// Context handed to [`ViewController::load_view`].
pub struct LoadRequest<'a, V> {
    pub(crate) owner: ControllerId,
    pub(crate) source: Option<&'a MarkupSource>,
    pub(crate) loader: Option<&'a mut dyn ViewLoader<V>>,
}

impl<V> core::fmt::Debug for LoadRequest<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoadRequest")
            .field("owner", &self.owner)
            .field("source", &self.source)
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

impl<'a, V> LoadRequest<'a, V> {
    /// Controller the view is loaded for.
    pub fn owner(&self) -> ControllerId {
        self.owner
    }

    /// Markup source configured for the controller, if any.
    pub fn source(&self) -> Option<&'a MarkupSource> {
        self.source
    }

    /// Delegate to the installed loader with the configured markup source.
    pub fn load_markup(self) -> Result<V, ViewLoadError> {
        let source = self.source.ok_or(ViewLoadError::NoLocation)?;
        let Some(loader) = self.loader else {
            return Err(ViewLoadError::NoLoader {
                location: source.location.clone(),
            });
        };
        loader.load(source, self.owner)
    }
}

/// Behaviour of a controller in the presentation hierarchy.
///
/// All hooks default to no-ops; `load_view` defaults to
/// [`LoadRequest::load_markup`].
///
/// Hook order guarantees, per operation:
/// - View access: `load_view` then `view_did_load`, once per controller.
/// - Present: `view_will_disappear` (presenter), `view_will_appear` (target),
///   swap, `view_did_appear` (target), `view_did_disappear` (presenter).
/// - Dismiss: the same four-hook pattern for every unwound level, deepest first.
pub trait ViewController<V> {
    /// Produce this controller's view. Called at most once per controller.
    fn load_view(&mut self, request: LoadRequest<'_, V>) -> Result<V, ViewLoadError> {
        request.load_markup()
    }

    /// Called once, right after the view was produced.
    fn view_did_load(&mut self, _view: &V) {}

    /// Called before the view becomes the displayed content.
    fn view_will_appear(&mut self) {}

    /// Called after the view became the displayed content.
    fn view_did_appear(&mut self) {}

    /// Called before the view stops being the displayed content.
    fn view_will_disappear(&mut self) {}

    /// Called after the view stopped being the displayed content.
    fn view_did_disappear(&mut self) {}
}

/// Dispatch a lifecycle notification to the matching hook.
pub(crate) fn deliver<V>(controller: &mut dyn ViewController<V>, event: Lifecycle) {
    match event {
        Lifecycle::WillAppear => controller.view_will_appear(),
        Lifecycle::DidAppear => controller.view_did_appear(),
        Lifecycle::WillDisappear => controller.view_will_disappear(),
        Lifecycle::DidDisappear => controller.view_did_disappear(),
    }
}

/// A controller with no overrides; its view comes entirely from markup.
#[derive(Copy, Clone, Debug, Default)]
pub struct MarkupViewController;

impl<V> ViewController<V> for MarkupViewController {}

/// Display surface whose root content is swapped as the presentation stack changes.
///
/// Swaps are assumed synchronous and immediate.
pub trait Surface<V> {
    /// Replace the displayed root content with `view`.
    fn set_root(&mut self, view: &V);
}
