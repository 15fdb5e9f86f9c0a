// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller arena and presentation stack engine.
//!
//! ## Overview
//!
//! [`Hierarchy`] owns every controller, memoizes their views, and keeps the
//! presentation links. Each controller presents at most one other controller
//! and is presented by at most one, so links always form simple chains.
//!
//! ## Present
//!
//! [`Hierarchy::present`] pushes a target above a presenter. The target's view is
//! loaded first, then the presenter's; then the presenter's `view_will_disappear` and the target's
//! `view_will_appear` fire, the surface swaps to the target's view, the pair is
//! linked, and the target's `view_did_appear` and the presenter's
//! `view_did_disappear` fire.
//!
//! ## Dismiss
//!
//! [`Hierarchy::dismiss`] resolves its target first:
//! - A controller that presents something unwinds everything above itself.
//! - A controller that only is presented forwards to its presenter.
//! - A controller with no links is left alone and nothing fires.
//!
//! The unwind pops one level at a time, deepest first. Each level fires
//! will-disappear/will-appear, unlinks, and fires did-appear/did-disappear.
//! The surface is swapped once, during the last level, back to the resolved
//! controller's view.
//!
//! ## Errors
//!
//! Views needed by an operation are loaded before any hook fires, and link
//! checks run before that, so a failed operation leaves links, hooks and the
//! surface untouched.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::controller::{LoadRequest, Surface, ViewController, ViewLoader, deliver};
use crate::error::{InvariantViolation, PresentationError};
use crate::types::{
    Appearance, ControllerId, ControllerLabel, Dismissal, Lifecycle, MarkupSource,
};

struct Slot<V> {
    generation: u32,
    controller: Box<dyn ViewController<V>>,
    view: Option<V>,
    title: String,
    source: Option<MarkupSource>,
    presenting: Option<ControllerId>,
    presented: Option<ControllerId>,
    appearance: Appearance,
}

impl<V> Slot<V> {
    fn new(
        generation: u32,
        controller: Box<dyn ViewController<V>>,
        source: Option<MarkupSource>,
    ) -> Self {
        Self {
            generation,
            controller,
            view: None,
            title: String::new(),
            source,
            presenting: None,
            presented: None,
            appearance: Appearance::empty(),
        }
    }
}

/// Arena of controllers and their presentation links.
///
/// ## Usage
///
/// - Optionally install a [`ViewLoader`] with [`Hierarchy::with_loader`] for
///   controllers that take their view from markup.
/// - [`insert`](Hierarchy::insert) controllers and keep the returned ids.
/// - Call [`present`](Hierarchy::present) and [`dismiss`](Hierarchy::dismiss)
///   with the display [`Surface`] the chain is shown on.
pub struct Hierarchy<V> {
    slots: Vec<Option<Slot<V>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    loader: Option<Box<dyn ViewLoader<V>>>,
}

impl<V> Default for Hierarchy<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> core::fmt::Debug for Hierarchy<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        let presenting = self
            .slots
            .iter()
            .flatten()
            .filter(|s| s.presented.is_some())
            .count();
        f.debug_struct("Hierarchy")
            .field("slots_total", &self.slots.len())
            .field("controllers_alive", &alive)
            .field("presenting", &presenting)
            .field("free_list", &self.free_list.len())
            .field("has_loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

impl<V> Hierarchy<V> {
    /// Create an empty hierarchy without a markup loader.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            loader: None,
        }
    }

    /// Create an empty hierarchy that loads markup views with `loader`.
    pub fn with_loader(loader: impl ViewLoader<V> + 'static) -> Self {
        let mut h = Self::new();
        h.set_loader(loader);
        h
    }

    /// Install or replace the markup loader. Already loaded views are kept.
    pub fn set_loader(&mut self, loader: impl ViewLoader<V> + 'static) {
        self.loader = Some(Box::new(loader));
    }

    /// Insert a controller that builds its own view (or has no markup).
    pub fn insert(&mut self, controller: impl ViewController<V> + 'static) -> ControllerId {
        self.insert_slot(Box::new(controller), None)
    }

    /// Insert a controller whose default view loading reads `source`.
    pub fn insert_markup(
        &mut self,
        controller: impl ViewController<V> + 'static,
        source: MarkupSource,
    ) -> ControllerId {
        self.insert_slot(Box::new(controller), Some(source))
    }

    fn insert_slot(
        &mut self,
        controller: Box<dyn ViewController<V>>,
        source: Option<MarkupSource>,
    ) -> ControllerId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot::new(generation, controller, source));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot::new(generation, controller, source)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ControllerId uses 32-bit indices by design."
        )]
        let id = ControllerId::new(idx as u32, generation);
        trace!(?id, "controller inserted");
        id
    }

    /// Remove an unlinked controller and hand it back.
    ///
    /// Controllers that present or are presented must be dismissed first.
    pub fn remove(
        &mut self,
        id: ControllerId,
    ) -> Result<Box<dyn ViewController<V>>, InvariantViolation> {
        let slot = self.slot(id)?;
        if slot.presenting.is_some() || slot.presented.is_some() {
            return Err(InvariantViolation::StillLinked(id));
        }
        let slot = self.slots[id.idx()]
            .take()
            .ok_or(InvariantViolation::StaleController(id))?;
        self.free_list.push(id.idx());
        trace!(?id, "controller removed");
        Ok(slot.controller)
    }

    /// Returns true if `id` refers to a live controller.
    pub fn is_alive(&self, id: ControllerId) -> bool {
        self.slot(id).is_ok()
    }

    /// Number of live controllers.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns true if no controller is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a controller's behaviour object.
    pub fn controller(&self, id: ControllerId) -> Option<&dyn ViewController<V>> {
        self.slot(id).ok().map(|s| s.controller.as_ref())
    }

    /// Mutably borrow a controller's behaviour object.
    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut dyn ViewController<V>> {
        self.slot_mut(id)
            .ok()
            .map(|s| s.controller.as_mut() as &mut dyn ViewController<V>)
    }

    /// Title of a controller; empty until set.
    pub fn title(&self, id: ControllerId) -> Option<&str> {
        self.slot(id).ok().map(|s| s.title.as_str())
    }

    /// Set a controller's title. Ignored for stale ids.
    pub fn set_title(&mut self, id: ControllerId, title: impl Into<String>) {
        if let Ok(s) = self.slot_mut(id) {
            s.title = title.into();
        }
    }

    /// A displayable description of a controller, currently its title.
    pub fn describe(&self, id: ControllerId) -> Option<ControllerLabel<'_>> {
        self.slot(id).ok().map(|s| ControllerLabel {
            id,
            title: s.title.as_str(),
        })
    }

    /// Markup source a controller was inserted with.
    pub fn source(&self, id: ControllerId) -> Option<&MarkupSource> {
        self.slot(id).ok().and_then(|s| s.source.as_ref())
    }

    /// The view if it was already loaded. Never triggers a load.
    pub fn view_if_loaded(&self, id: ControllerId) -> Option<&V> {
        self.slot(id).ok().and_then(|s| s.view.as_ref())
    }

    /// Returns true if the view was loaded. Never triggers a load.
    pub fn is_view_loaded(&self, id: ControllerId) -> bool {
        self.view_if_loaded(id).is_some()
    }

    /// The controller's view, loading it first if needed.
    ///
    /// The first call runs `load_view` and then `view_did_load`; later calls
    /// return the memoized view without side effects.
    pub fn view(&mut self, id: ControllerId) -> Result<&V, PresentationError> {
        self.load_view_if_needed(id)?;
        let slot = self.slot(id)?;
        Ok(slot
            .view
            .as_ref()
            .ok_or(InvariantViolation::StaleController(id))?)
    }

    fn load_view_if_needed(&mut self, id: ControllerId) -> Result<(), PresentationError> {
        let Some(Some(slot)) = self.slots.get_mut(id.idx()) else {
            return Err(InvariantViolation::StaleController(id).into());
        };
        if slot.generation != id.generation() {
            return Err(InvariantViolation::StaleController(id).into());
        }
        if slot.view.is_some() {
            return Ok(());
        }
        let request = LoadRequest {
            owner: id,
            source: slot.source.as_ref(),
            loader: self
                .loader
                .as_deref_mut()
                .map(|l| l as &mut dyn ViewLoader<V>),
        };
        let view = slot
            .controller
            .load_view(request)
            .map_err(|source| PresentationError::ViewLoad { id, source })?;
        debug!(?id, "view loaded");
        let view = slot.view.insert(view);
        slot.controller.view_did_load(view);
        Ok(())
    }

    /// The controller that presented `id`, if any.
    pub fn presenting(&self, id: ControllerId) -> Option<ControllerId> {
        self.slot(id).ok().and_then(|s| s.presenting)
    }

    /// The controller `id` currently presents, if any.
    pub fn presented(&self, id: ControllerId) -> Option<ControllerId> {
        self.slot(id).ok().and_then(|s| s.presented)
    }

    /// Deepest controller reachable from `id` through presented links (`id` itself if it presents nothing).
    pub fn top(&self, id: ControllerId) -> ControllerId {
        let mut cur = id;
        while let Some(next) = self.presented(cur) {
            cur = next;
        }
        cur
    }

    /// Base of the chain `id` belongs to, found by following presenting links.
    pub fn base(&self, id: ControllerId) -> ControllerId {
        let mut cur = id;
        while let Some(prev) = self.presenting(cur) {
            cur = prev;
        }
        cur
    }

    /// Every controller of the chain containing `id`, base first.
    pub fn chain(&self, id: ControllerId) -> Vec<ControllerId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut cur = self.base(id);
        out.push(cur);
        while let Some(next) = self.presented(cur) {
            out.push(next);
            cur = next;
        }
        out
    }

    /// Appearance state derived from the hooks delivered so far.
    pub fn appearance(&self, id: ControllerId) -> Option<Appearance> {
        self.slot(id).ok().map(|s| s.appearance)
    }

    /// Deliver one lifecycle hook to `id`. Ignored for stale ids.
    pub fn notify(&mut self, id: ControllerId, event: Lifecycle) {
        let Ok(slot) = self.slot_mut(id) else {
            return;
        };
        trace!(?id, ?event, "lifecycle");
        slot.appearance.apply(event);
        deliver(slot.controller.as_mut(), event);
    }

    /// Present `target` above `presenter`, swapping `surface` to the target's view.
    pub fn present(
        &mut self,
        surface: &mut impl Surface<V>,
        presenter: ControllerId,
        target: ControllerId,
    ) -> Result<(), PresentationError> {
        self.present_then(surface, presenter, target, || {})
    }

    /// Like [`present`](Self::present), then run `completion` once every hook has fired.
    pub fn present_then(
        &mut self,
        surface: &mut impl Surface<V>,
        presenter: ControllerId,
        target: ControllerId,
        completion: impl FnOnce(),
    ) -> Result<(), PresentationError> {
        self.check_present(presenter, target)?;
        self.load_view_if_needed(target)?;
        self.load_view_if_needed(presenter)?;
        debug!(?presenter, ?target, "present");

        self.notify(presenter, Lifecycle::WillDisappear);
        self.notify(target, Lifecycle::WillAppear);
        if let Some(view) = self.view_if_loaded(target) {
            surface.set_root(view);
        }
        self.link(presenter, target);
        self.notify(target, Lifecycle::DidAppear);
        self.notify(presenter, Lifecycle::DidDisappear);

        completion();
        Ok(())
    }

    fn check_present(
        &self,
        presenter: ControllerId,
        target: ControllerId,
    ) -> Result<(), InvariantViolation> {
        let p = self.slot(presenter)?;
        let t = self.slot(target)?;
        if presenter == target {
            return Err(InvariantViolation::PresentSelf(presenter));
        }
        if let Some(presented) = p.presented {
            return Err(InvariantViolation::AlreadyPresenting {
                presenter,
                presented,
            });
        }
        if let Some(presented) = t.presented {
            return Err(InvariantViolation::TargetPresenting { target, presented });
        }
        if let Some(by) = t.presenting {
            return Err(InvariantViolation::TargetPresented {
                target,
                presenter: by,
            });
        }
        Ok(())
    }

    /// Dismiss the controllers presented above `id` (see the [module docs](self)).
    ///
    /// Returns `None` when `id` has no links and nothing happened.
    pub fn dismiss(
        &mut self,
        surface: &mut impl Surface<V>,
        id: ControllerId,
    ) -> Result<Option<Dismissal>, PresentationError> {
        self.dismiss_then(surface, id, || {})
    }

    /// Like [`dismiss`](Self::dismiss), then run `completion` once every hook has fired.
    ///
    /// `completion` is not run when the dismiss is a no-op.
    pub fn dismiss_then(
        &mut self,
        surface: &mut impl Surface<V>,
        id: ControllerId,
        completion: impl FnOnce(),
    ) -> Result<Option<Dismissal>, PresentationError> {
        let slot = self.slot(id)?;
        let restored = match (slot.presented, slot.presenting) {
            (Some(_), _) => id,
            (None, Some(presenter)) => presenter,
            (None, None) => {
                trace!(?id, "dismiss without links");
                return Ok(None);
            }
        };
        self.load_view_if_needed(restored)?;

        // Levels above `restored`, nearest first; popped deepest first.
        let mut pending = Vec::new();
        let mut cur = restored;
        while let Some(next) = self.presented(cur) {
            pending.push(next);
            cur = next;
        }
        debug!(?id, ?restored, levels = pending.len(), "dismiss");

        let mut dismissed = Vec::with_capacity(pending.len());
        while let Some(disappearing) = pending.pop() {
            let appearing = pending.last().copied().unwrap_or(restored);
            self.notify(disappearing, Lifecycle::WillDisappear);
            self.notify(appearing, Lifecycle::WillAppear);
            self.unlink(appearing, disappearing);
            if pending.is_empty()
                && let Some(view) = self.view_if_loaded(restored)
            {
                surface.set_root(view);
            }
            self.notify(appearing, Lifecycle::DidAppear);
            self.notify(disappearing, Lifecycle::DidDisappear);
            dismissed.push(disappearing);
        }

        completion();
        Ok(Some(Dismissal {
            restored,
            dismissed,
        }))
    }

    // --- internals ---

    fn link(&mut self, presenter: ControllerId, target: ControllerId) {
        if let Ok(p) = self.slot_mut(presenter) {
            p.presented = Some(target);
        }
        if let Ok(t) = self.slot_mut(target) {
            t.presenting = Some(presenter);
        }
    }

    fn unlink(&mut self, presenter: ControllerId, target: ControllerId) {
        if let Ok(t) = self.slot_mut(target) {
            t.presenting = None;
        }
        if let Ok(p) = self.slot_mut(presenter) {
            p.presented = None;
        }
    }

    fn slot(&self, id: ControllerId) -> Result<&Slot<V>, InvariantViolation> {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .filter(|s| s.generation == id.generation())
            .ok_or(InvariantViolation::StaleController(id))
    }

    fn slot_mut(&mut self, id: ControllerId) -> Result<&mut Slot<V>, InvariantViolation> {
        self.slots
            .get_mut(id.idx())
            .and_then(|s| s.as_mut())
            .filter(|s| s.generation == id.generation())
            .ok_or(InvariantViolation::StaleController(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewLoadError;
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Colored {
        name: &'static str,
        log: Log,
    }

    impl Colored {
        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl ViewController<String> for Colored {
        fn load_view(&mut self, _request: LoadRequest<'_, String>) -> Result<String, ViewLoadError> {
            Ok(format!("{}-view", self.name))
        }
        fn view_did_load(&mut self, _view: &String) {
            self.record("viewDidLoad");
        }
        fn view_will_appear(&mut self) {
            self.record("viewWillAppear");
        }
        fn view_did_appear(&mut self) {
            self.record("viewDidAppear");
        }
        fn view_will_disappear(&mut self) {
            self.record("viewWillDisappear");
        }
        fn view_did_disappear(&mut self) {
            self.record("viewDidDisappear");
        }
    }

    #[derive(Default)]
    struct Scene {
        root: Option<String>,
        swaps: usize,
    }

    impl Surface<String> for Scene {
        fn set_root(&mut self, view: &String) {
            self.root = Some(view.clone());
            self.swaps += 1;
        }
    }

    struct Fixture {
        h: Hierarchy<String>,
        scene: Scene,
        log: Log,
        green: ControllerId,
        blue: ControllerId,
        yellow: ControllerId,
    }

    impl Fixture {
        fn new() -> Self {
            let log: Log = Rc::default();
            let mut h = Hierarchy::new();
            let green = h.insert(Colored {
                name: "green",
                log: log.clone(),
            });
            let blue = h.insert(Colored {
                name: "blue",
                log: log.clone(),
            });
            let yellow = h.insert(Colored {
                name: "yellow",
                log: log.clone(),
            });
            let mut scene = Scene::default();
            scene.set_root(h.view(green).unwrap());
            Self {
                h,
                scene,
                log,
                green,
                blue,
                yellow,
            }
        }

        fn green_blue_yellow(mut self) -> Self {
            self.h.present(&mut self.scene, self.green, self.blue).unwrap();
            self.h.present(&mut self.scene, self.blue, self.yellow).unwrap();
            self.log.borrow_mut().clear();
            self
        }

        fn events(&self) -> Vec<String> {
            self.log.borrow().clone()
        }

        fn displayed(&self) -> &str {
            self.scene.root.as_deref().unwrap()
        }
    }

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn view_loads_once() {
        let mut f = Fixture::new();
        assert!(f.h.is_view_loaded(f.green));
        assert!(!f.h.is_view_loaded(f.blue));
        assert_eq!(f.h.view_if_loaded(f.blue), None);

        let first = f.h.view(f.blue).unwrap().clone();
        let second = f.h.view(f.blue).unwrap().clone();
        assert_eq!(first, "blue-view");
        assert_eq!(first, second);
        assert_eq!(
            f.events(),
            strs(&["green:viewDidLoad", "blue:viewDidLoad"])
        );
    }

    #[test]
    fn present_links_and_orders_hooks() {
        let mut f = Fixture::new();
        f.log.borrow_mut().clear();
        let log = f.log.clone();
        f.h.present_then(&mut f.scene, f.green, f.blue, || {
            log.borrow_mut().push("green:presentBlueComplete".into());
        })
        .unwrap();

        assert_eq!(
            f.events(),
            strs(&[
                "blue:viewDidLoad",
                "green:viewWillDisappear",
                "blue:viewWillAppear",
                "blue:viewDidAppear",
                "green:viewDidDisappear",
                "green:presentBlueComplete",
            ])
        );
        assert_eq!(f.h.presented(f.green), Some(f.blue));
        assert_eq!(f.h.presenting(f.blue), Some(f.green));
        assert_eq!(f.displayed(), "blue-view");
        assert_eq!(f.h.appearance(f.blue), Some(Appearance::VISIBLE));
        assert_eq!(f.h.appearance(f.green), Some(Appearance::empty()));
    }

    #[test]
    fn present_skips_did_load_for_loaded_target() {
        let mut f = Fixture::new();
        f.h.view(f.blue).unwrap();
        f.log.borrow_mut().clear();
        f.h.present(&mut f.scene, f.green, f.blue).unwrap();
        assert_eq!(
            f.events(),
            strs(&[
                "green:viewWillDisappear",
                "blue:viewWillAppear",
                "blue:viewDidAppear",
                "green:viewDidDisappear",
            ])
        );
    }

    #[test]
    fn present_loads_unloaded_presenter_before_hooks() {
        let log: Log = Rc::default();
        let mut h = Hierarchy::new();
        let a = h.insert(Colored {
            name: "a",
            log: log.clone(),
        });
        let b = h.insert(Colored {
            name: "b",
            log: log.clone(),
        });
        let mut scene = Scene::default();
        h.present(&mut scene, a, b).unwrap();
        assert_eq!(
            *log.borrow(),
            strs(&[
                "b:viewDidLoad",
                "a:viewDidLoad",
                "a:viewWillDisappear",
                "b:viewWillAppear",
                "b:viewDidAppear",
                "a:viewDidDisappear",
            ])
        );

        log.borrow_mut().clear();
        h.dismiss(&mut scene, b).unwrap();
        assert!(!log.borrow().iter().any(|e| e.ends_with("viewDidLoad")));
        assert_eq!(scene.root.as_deref(), Some("a-view"));
    }

    #[test]
    fn chain_of_three() {
        let f = Fixture::new().green_blue_yellow();
        assert_eq!(f.displayed(), "yellow-view");
        assert_eq!(f.h.chain(f.blue), vec![f.green, f.blue, f.yellow]);
        assert_eq!(f.h.top(f.green), f.yellow);
        assert_eq!(f.h.base(f.yellow), f.green);
    }

    #[test]
    fn dismiss_top_from_top() {
        let mut f = Fixture::new().green_blue_yellow();
        let d = f.h.dismiss(&mut f.scene, f.yellow).unwrap().unwrap();
        assert_eq!(d.restored, f.blue);
        assert_eq!(d.dismissed, vec![f.yellow]);
        assert_eq!(f.displayed(), "blue-view");
        assert_eq!(f.h.presented(f.green), Some(f.blue));
        assert_eq!(f.h.presented(f.blue), None);
        assert_eq!(f.h.presenting(f.yellow), None);
    }

    #[test]
    fn dismiss_top_from_presenter() {
        let mut f = Fixture::new().green_blue_yellow();
        let log = f.log.clone();
        f.h.dismiss_then(&mut f.scene, f.blue, || {
            log.borrow_mut().push("yellow:dismissComplete".into());
        })
        .unwrap();
        assert_eq!(
            f.events(),
            strs(&[
                "yellow:viewWillDisappear",
                "blue:viewWillAppear",
                "blue:viewDidAppear",
                "yellow:viewDidDisappear",
                "yellow:dismissComplete",
            ])
        );
        assert_eq!(f.displayed(), "blue-view");
        assert_eq!(f.h.presented(f.green), Some(f.blue));
        assert_eq!(f.h.presented(f.blue), None);
        assert_eq!(f.h.presenting(f.yellow), None);
    }

    #[test]
    fn dismiss_from_root_unwinds_everything() {
        let mut f = Fixture::new().green_blue_yellow();
        let log = f.log.clone();
        let swaps_before = f.scene.swaps;
        let d = f
            .h
            .dismiss_then(&mut f.scene, f.green, || {
                log.borrow_mut().push("green:dismissComplete".into());
            })
            .unwrap()
            .unwrap();
        assert_eq!(
            f.events(),
            strs(&[
                "yellow:viewWillDisappear",
                "blue:viewWillAppear",
                "blue:viewDidAppear",
                "yellow:viewDidDisappear",
                "blue:viewWillDisappear",
                "green:viewWillAppear",
                "green:viewDidAppear",
                "blue:viewDidDisappear",
                "green:dismissComplete",
            ])
        );
        assert_eq!(d.dismissed, vec![f.yellow, f.blue]);
        assert_eq!(d.restored, f.green);
        // One swap for the whole unwind.
        assert_eq!(f.scene.swaps, swaps_before + 1);
        assert_eq!(f.displayed(), "green-view");
        for id in [f.green, f.blue, f.yellow] {
            assert_eq!(f.h.presenting(id), None);
            assert_eq!(f.h.presented(id), None);
        }
        assert_eq!(f.h.appearance(f.green), Some(Appearance::VISIBLE));
        assert_eq!(f.h.appearance(f.blue), Some(Appearance::empty()));
    }

    #[test]
    fn dismiss_unlinked_is_noop() {
        let mut f = Fixture::new();
        f.log.borrow_mut().clear();
        let mut ran = false;
        let out = f.h.dismiss_then(&mut f.scene, f.blue, || ran = true).unwrap();
        assert_eq!(out, None);
        assert!(!ran);
        assert!(f.events().is_empty());
        assert_eq!(f.scene.swaps, 1);
        assert_eq!(f.displayed(), "green-view");
    }

    #[test]
    fn repeated_top_dismiss_returns_to_root() {
        let log: Log = Rc::default();
        let mut h = Hierarchy::new();
        let names = ["a", "b", "c", "d", "e", "f"];
        let ids: Vec<_> = names
            .iter()
            .map(|&name| {
                h.insert(Colored {
                    name,
                    log: log.clone(),
                })
            })
            .collect();
        let mut scene = Scene::default();
        scene.set_root(h.view(ids[0]).unwrap());
        for w in ids.windows(2) {
            h.present(&mut scene, w[0], w[1]).unwrap();
        }
        assert_eq!(scene.root.as_deref(), Some("f-view"));

        for _ in 1..ids.len() {
            let top = h.top(ids[0]);
            h.dismiss(&mut scene, top).unwrap().unwrap();
        }
        assert_eq!(scene.root.as_deref(), Some("a-view"));
        for &id in &ids {
            assert_eq!(h.presenting(id), None);
            assert_eq!(h.presented(id), None);
        }
    }

    #[test]
    fn dismissed_controller_can_be_presented_again() {
        let mut f = Fixture::new();
        f.h.present(&mut f.scene, f.green, f.blue).unwrap();
        f.h.dismiss(&mut f.scene, f.blue).unwrap();
        f.log.borrow_mut().clear();
        f.h.present(&mut f.scene, f.green, f.blue).unwrap();
        assert_eq!(f.events().first().map(String::as_str), Some("green:viewWillDisappear"));
        assert_eq!(f.displayed(), "blue-view");
    }

    #[test]
    fn present_rejects_broken_links() {
        let mut f = Fixture::new();
        assert_eq!(
            f.h.present(&mut f.scene, f.green, f.green),
            Err(InvariantViolation::PresentSelf(f.green).into())
        );
        f.h.present(&mut f.scene, f.green, f.blue).unwrap();
        assert_eq!(
            f.h.present(&mut f.scene, f.green, f.yellow),
            Err(InvariantViolation::AlreadyPresenting {
                presenter: f.green,
                presented: f.blue
            }
            .into())
        );
        assert_eq!(
            f.h.present(&mut f.scene, f.yellow, f.green),
            Err(InvariantViolation::TargetPresenting {
                target: f.green,
                presented: f.blue
            }
            .into())
        );
        assert_eq!(
            f.h.present(&mut f.scene, f.yellow, f.blue),
            Err(InvariantViolation::TargetPresented {
                target: f.blue,
                presenter: f.green
            }
            .into())
        );
        // Nothing fired for rejected calls and yellow never loaded.
        assert!(!f.h.is_view_loaded(f.yellow));
        assert_eq!(f.displayed(), "blue-view");
    }

    #[test]
    fn stale_ids_are_rejected() {
        let mut f = Fixture::new();
        f.h.remove(f.yellow).unwrap();
        assert!(!f.h.is_alive(f.yellow));
        assert_eq!(
            f.h.present(&mut f.scene, f.green, f.yellow),
            Err(InvariantViolation::StaleController(f.yellow).into())
        );
        assert_eq!(
            f.h.dismiss(&mut f.scene, f.yellow),
            Err(InvariantViolation::StaleController(f.yellow).into())
        );

        // Reusing the slot yields a distinct id.
        let again = f.h.insert(Colored {
            name: "again",
            log: f.log.clone(),
        });
        assert_ne!(again, f.yellow);
        assert!(f.h.is_alive(again));
        assert_eq!(f.h.title(f.yellow), None);
    }

    #[test]
    fn remove_requires_unlinked_controller() {
        let mut f = Fixture::new();
        f.h.present(&mut f.scene, f.green, f.blue).unwrap();
        assert!(matches!(
            f.h.remove(f.blue),
            Err(InvariantViolation::StillLinked(id)) if id == f.blue
        ));
        assert_eq!(f.h.len(), 3);
        f.h.dismiss(&mut f.scene, f.blue).unwrap();
        assert!(f.h.remove(f.blue).is_ok());
        assert_eq!(f.h.len(), 2);
    }

    struct Broken;

    impl ViewController<String> for Broken {
        fn load_view(&mut self, _request: LoadRequest<'_, String>) -> Result<String, ViewLoadError> {
            Err(ViewLoadError::MissingResource {
                location: "broken.fxml".into(),
            })
        }
    }

    #[test]
    fn failed_load_aborts_present() {
        let mut f = Fixture::new();
        f.log.borrow_mut().clear();
        let broken = f.h.insert(Broken);
        let err = f.h.present(&mut f.scene, f.green, broken).unwrap_err();
        assert_eq!(
            err,
            PresentationError::ViewLoad {
                id: broken,
                source: ViewLoadError::MissingResource {
                    location: "broken.fxml".into()
                }
            }
        );
        assert!(f.events().is_empty());
        assert_eq!(f.h.presented(f.green), None);
        assert_eq!(f.displayed(), "green-view");
        // Not memoized; a later call tries again.
        assert!(f.h.view(broken).is_err());
    }

    #[test]
    fn markup_controllers_use_installed_loader() {
        let mut h: Hierarchy<String> = Hierarchy::with_loader(
            |source: &MarkupSource, owner: ControllerId| -> Result<String, ViewLoadError> {
                Ok(format!("{}#{}", source.location, owner.idx()))
            },
        );
        let id = h.insert_markup(
            crate::controller::MarkupViewController,
            MarkupSource::by_convention("MainController", "fxml"),
        );
        assert_eq!(h.view(id).unwrap(), "MainView.fxml#0");
        assert_eq!(h.source(id).map(|s| s.location.as_str()), Some("MainView.fxml"));

        let bare = h.insert(crate::controller::MarkupViewController);
        assert!(matches!(
            h.view(bare),
            Err(PresentationError::ViewLoad {
                source: ViewLoadError::NoLocation,
                ..
            })
        ));
    }

    #[test]
    fn titles_default_empty() {
        let mut f = Fixture::new();
        assert_eq!(f.h.title(f.green), Some(""));
        f.h.set_title(f.green, "green");
        assert_eq!(f.h.title(f.green), Some("green"));
    }

    #[test]
    fn describe_follows_title() {
        let mut f = Fixture::new();
        f.h.set_title(f.green, "foo");
        assert_eq!(
            f.h.describe(f.green).map(|l| l.to_string()).as_deref(),
            Some("ViewController{title='foo'}")
        );
        f.h.set_title(f.green, "bar");
        assert_eq!(
            f.h.describe(f.green).map(|l| l.to_string()).as_deref(),
            Some("ViewController{title='bar'}")
        );
        f.h.remove(f.yellow).unwrap();
        assert_eq!(f.h.describe(f.yellow), None);
    }

    #[test]
    fn notify_updates_appearance() {
        let mut f = Fixture::new();
        f.log.borrow_mut().clear();
        f.h.notify(f.green, Lifecycle::WillAppear);
        assert_eq!(f.h.appearance(f.green), Some(Appearance::APPEARING));
        f.h.notify(f.green, Lifecycle::DidAppear);
        assert_eq!(f.h.appearance(f.green), Some(Appearance::VISIBLE));
        assert_eq!(
            f.events(),
            strs(&["green:viewWillAppear", "green:viewDidAppear"])
        );
    }
}
