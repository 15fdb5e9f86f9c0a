// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the presentation stack: controller handles, lifecycle phases,
//! appearance state, markup sources, and dismissal results.
//!
//! ## Overview
//!
//! These types describe the inputs and outputs of the [`Hierarchy`](crate::hierarchy::Hierarchy).
//! They are also consumed by toolkit bindings such as a stage/window controller.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a controller in a [`Hierarchy`](crate::hierarchy::Hierarchy).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ControllerId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct id.
///
/// Presentation links are stored as `ControllerId`s, so a link never keeps a
/// controller alive and a stale link can never alias a newer controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ControllerId(pub(crate) u32, pub(crate) u32);

impl ControllerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// A single appear/disappear notification delivered to a controller.
///
/// Emitted by [`present`](crate::hierarchy::Hierarchy::present) and
/// [`dismiss`](crate::hierarchy::Hierarchy::dismiss), and forwarded from
/// window visibility changes via [`notify`](crate::hierarchy::Hierarchy::notify).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Lifecycle {
    /// The view is about to become the displayed content.
    WillAppear,
    /// The view is now the displayed content.
    DidAppear,
    /// The view is about to stop being the displayed content.
    WillDisappear,
    /// The view is no longer the displayed content.
    DidDisappear,
}

bitflags::bitflags! {
    /// Appearance state of a controller, as reported by the lifecycle hooks fired so far.
    ///
    /// `APPEARING` and `DISAPPEARING` are only observable between a "will" and
    /// its matching "did" notification, which happens when a toolkit delivers
    /// window transitions asynchronously.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Appearance: u8 {
        /// `WillAppear` fired, `DidAppear` not yet.
        const APPEARING    = 0b0000_0001;
        /// `DidAppear` fired and no `DidDisappear` since.
        const VISIBLE      = 0b0000_0010;
        /// `WillDisappear` fired, `DidDisappear` not yet.
        const DISAPPEARING = 0b0000_0100;
    }
}

impl Appearance {
    /// Apply a lifecycle notification to this state.
    pub fn apply(&mut self, event: Lifecycle) {
        match event {
            Lifecycle::WillAppear => self.insert(Self::APPEARING),
            Lifecycle::DidAppear => {
                self.remove(Self::APPEARING);
                self.insert(Self::VISIBLE);
            }
            Lifecycle::WillDisappear => self.insert(Self::DISAPPEARING),
            Lifecycle::DidDisappear => self.remove(Self::DISAPPEARING | Self::VISIBLE),
        }
    }
}

/// Where a controller's view markup lives.
///
/// The location is opaque to this crate; it is handed as-is to the installed
/// [`ViewLoader`](crate::controller::ViewLoader).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MarkupSource {
    /// Location identifier of the markup document.
    pub location: String,
    /// Optional resource bundle used to localize the markup.
    pub resources: Option<String>,
}

impl MarkupSource {
    /// Markup at `location` without a resource bundle.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            resources: None,
        }
    }

    /// Attach a resource bundle name.
    #[must_use]
    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.resources = Some(resources.into());
        self
    }

    /// Derive a location from a controller type name.
    ///
    /// `Controller` is replaced by `View` and `extension` is appended, so
    /// `HelloWorldController` with `"fxml"` becomes `HelloWorldView.fxml`.
    ///
    /// ```
    /// use understory_presentation::types::MarkupSource;
    /// let source = MarkupSource::by_convention("HelloWorldController", "fxml");
    /// assert_eq!(source.location, "HelloWorldView.fxml");
    /// ```
    pub fn by_convention(type_name: &str, extension: &str) -> Self {
        let mut location = type_name.replace("Controller", "View");
        location.push('.');
        location.push_str(extension);
        Self::new(location)
    }
}

/// Result of a [`dismiss`](crate::hierarchy::Hierarchy::dismiss) that unwound at least one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dismissal {
    /// Controller whose view is displayed again.
    pub restored: ControllerId,
    /// Controllers removed from the chain, deepest first.
    pub dismissed: Vec<ControllerId>,
}

/// Borrowed description of a controller, as returned by
/// [`Hierarchy::describe`](crate::hierarchy::Hierarchy::describe).
///
/// Displays as `ViewController{title='…'}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControllerLabel<'a> {
    /// The controller described.
    pub id: ControllerId,
    /// Its current title.
    pub title: &'a str,
}

impl core::fmt::Display for ControllerLabel<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ViewController{{title='{}'}}", self.title)
    }
}
