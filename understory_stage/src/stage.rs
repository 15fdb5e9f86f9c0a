// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage controller: one window, one scene, one root view controller.
//!
//! ## Overview
//!
//! [`StageController`] owns a [`Window`], the window's scene, and the
//! [`Hierarchy`] of controllers shown in it. Window visibility transitions are
//! forwarded to the root controller's appear/disappear hooks, so window
//! visibility and controller visibility share one lifecycle.
//!
//! ## Root controller
//!
//! - The first [`set_root_view_controller`](StageController::set_root_view_controller)
//!   creates the scene with the root's view; later calls swap the scene's root content.
//! - Swapping the root fires no hooks. Only window transitions drive the root's lifecycle.
//! - The root's title is pushed to the window whenever it changes through
//!   [`set_title`](StageController::set_title). Titles never flow back from the window.
//!
//! ## Presentation
//!
//! [`present`](StageController::present) and [`dismiss`](StageController::dismiss)
//! run the hierarchy's stack engine against this window's scene. Only the displayed
//! top of the root's chain may present, and only members of the root's chain may dismiss.

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::Size;
use tracing::{debug, trace};
use understory_presentation::controller::{Surface, ViewController, ViewLoader};
use understory_presentation::error::InvariantViolation;
use understory_presentation::hierarchy::Hierarchy;
use understory_presentation::types::{ControllerId, Dismissal, MarkupSource};

use crate::error::StageError;
use crate::window::{Window, WindowEvent};

/// Stage configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageConfig {
    /// Initial scene size; `None` lets the toolkit size the scene to its content.
    pub size: Option<Size>,
}

/// Binds a window to the root of a presentation hierarchy.
pub struct StageController<V, W: Window<V>> {
    window: W,
    config: StageConfig,
    hierarchy: Hierarchy<V>,
    scene: Option<W::Scene>,
    root: Option<ControllerId>,
}

impl<V, W: Window<V>> core::fmt::Debug for StageController<V, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StageController")
            .field("config", &self.config)
            .field("hierarchy", &self.hierarchy)
            .field("has_scene", &self.scene.is_some())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<V, W: Window<V>> StageController<V, W> {
    /// Create a stage for `window` with the default configuration.
    pub fn new(window: W) -> Self {
        Self::with_config(window, StageConfig::default())
    }

    /// Create a stage for `window` with an explicit configuration.
    pub fn with_config(window: W, config: StageConfig) -> Self {
        Self {
            window,
            config,
            hierarchy: Hierarchy::new(),
            scene: None,
            root: None,
        }
    }

    /// The controlled window.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The controlled window, mutably.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The configuration this stage was created with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The controllers of this stage.
    pub fn hierarchy(&self) -> &Hierarchy<V> {
        &self.hierarchy
    }

    /// The scene, once a root controller was installed.
    pub fn scene(&self) -> Option<&W::Scene> {
        self.scene.as_ref()
    }

    /// Install the markup loader used by controllers inserted with a [`MarkupSource`].
    pub fn set_loader(&mut self, loader: impl ViewLoader<V> + 'static) {
        self.hierarchy.set_loader(loader);
    }

    /// Insert a controller. See [`Hierarchy::insert`].
    pub fn insert(&mut self, controller: impl ViewController<V> + 'static) -> ControllerId {
        self.hierarchy.insert(controller)
    }

    /// Insert a markup-backed controller. See [`Hierarchy::insert_markup`].
    pub fn insert_markup(
        &mut self,
        controller: impl ViewController<V> + 'static,
        source: MarkupSource,
    ) -> ControllerId {
        self.hierarchy.insert_markup(controller, source)
    }

    /// Remove an unlinked controller that is not the root.
    pub fn remove(&mut self, id: ControllerId) -> Result<Box<dyn ViewController<V>>, StageError> {
        if self.root == Some(id) {
            return Err(StageError::RootInUse(id));
        }
        Ok(self.hierarchy.remove(id)?)
    }

    /// Set a controller's title; the window follows if it is the root.
    pub fn set_title(&mut self, id: ControllerId, title: impl Into<String>) {
        self.hierarchy.set_title(id, title);
        if self.root == Some(id)
            && let Some(title) = self.hierarchy.title(id)
        {
            self.window.set_title(title);
        }
    }

    /// A controller's view, loading it if needed.
    pub fn view(&mut self, id: ControllerId) -> Result<&V, StageError> {
        Ok(self.hierarchy.view(id)?)
    }

    /// Install `id` as the root view controller.
    ///
    /// Loads the view of the top of the root's chain (the root itself unless it
    /// presents something), creates the scene on first use or swaps its root
    /// content otherwise, and binds the window title to the root's title.
    /// A controller currently presented by another cannot become the root.
    pub fn set_root_view_controller(&mut self, id: ControllerId) -> Result<(), StageError> {
        if let Some(presenter) = self.hierarchy.presenting(id) {
            return Err(InvariantViolation::TargetPresented {
                target: id,
                presenter,
            }
            .into());
        }
        // A root that still presents a chain keeps showing that chain's top.
        let shown = self.hierarchy.top(id);
        let view = self.hierarchy.view(shown)?;
        if let Some(scene) = self.scene.as_mut() {
            scene.set_root(view);
        } else {
            self.scene = Some(self.window.create_scene(view, self.config.size));
        }
        debug!(?id, previous = ?self.root, "root view controller installed");
        self.root = Some(id);
        if let Some(title) = self.hierarchy.title(id) {
            self.window.set_title(title);
        }
        Ok(())
    }

    /// The installed root view controller.
    pub fn root_view_controller(&self) -> Option<ControllerId> {
        self.root
    }

    /// The controller whose view is currently displayed: the top of the root's chain.
    pub fn displayed(&self) -> Option<ControllerId> {
        self.root.map(|root| self.hierarchy.top(root))
    }

    /// Show the window.
    pub fn show(&mut self) {
        let Self {
            window,
            hierarchy,
            root,
            ..
        } = self;
        window.show(&mut |event| forward(hierarchy, *root, event));
    }

    /// Close (hide) the window.
    pub fn close(&mut self) {
        let Self {
            window,
            hierarchy,
            root,
            ..
        } = self;
        window.hide(&mut |event| forward(hierarchy, *root, event));
    }

    /// Deliver a window transition reported by the toolkit's event loop.
    pub fn handle_window_event(&mut self, event: WindowEvent) {
        forward(&mut self.hierarchy, self.root, event);
    }

    /// Present `target` above the displayed controller `presenter`.
    pub fn present(
        &mut self,
        presenter: ControllerId,
        target: ControllerId,
    ) -> Result<(), StageError> {
        self.present_then(presenter, target, || {})
    }

    /// Like [`present`](Self::present), then run `completion`.
    pub fn present_then(
        &mut self,
        presenter: ControllerId,
        target: ControllerId,
        completion: impl FnOnce(),
    ) -> Result<(), StageError> {
        let root = self.root.ok_or(StageError::NoRoot)?;
        if self.hierarchy.is_alive(presenter) && self.hierarchy.top(root) != presenter {
            return Err(StageError::NotDisplayed(presenter));
        }
        let scene = self.scene.as_mut().ok_or(StageError::NoRoot)?;
        self.hierarchy
            .present_then(scene, presenter, target, completion)?;
        Ok(())
    }

    /// Dismiss controllers of the root's chain. See [`Hierarchy::dismiss`].
    pub fn dismiss(&mut self, id: ControllerId) -> Result<Option<Dismissal>, StageError> {
        self.dismiss_then(id, || {})
    }

    /// Like [`dismiss`](Self::dismiss), then run `completion` unless nothing was dismissed.
    pub fn dismiss_then(
        &mut self,
        id: ControllerId,
        completion: impl FnOnce(),
    ) -> Result<Option<Dismissal>, StageError> {
        let root = self.root.ok_or(StageError::NoRoot)?;
        let linked =
            self.hierarchy.presenting(id).is_some() || self.hierarchy.presented(id).is_some();
        if linked && self.hierarchy.base(id) != root {
            return Err(StageError::NotDisplayed(id));
        }
        let scene = self.scene.as_mut().ok_or(StageError::NoRoot)?;
        Ok(self.hierarchy.dismiss_then(scene, id, completion)?)
    }
}

fn forward<V>(hierarchy: &mut Hierarchy<V>, root: Option<ControllerId>, event: WindowEvent) {
    let Some(root) = root else {
        trace!(?event, "window event without root view controller");
        return;
    };
    debug!(?event, ?root, "window event");
    hierarchy.notify(root, event.lifecycle());
}
