// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_presentation --heading-base-level=0

//! Understory Presentation: a deterministic, `no_std` presentation stack for view controllers.
//!
//! ## Overview
//!
//! This crate decides *which view is displayed* and *in what order lifecycle hooks fire*
//! as controllers are presented and dismissed.
//! It does not create windows, lay out, or render anything.
//! Views are opaque handles of a toolkit-chosen type `V`, and the displayed content is swapped
//! through a [`Surface`](crate::controller::Surface) you provide.
//!
//! ## Controllers
//!
//! Implement [`ViewController`](crate::controller::ViewController) and override the hooks you need.
//! Insert controllers into a [`Hierarchy`](crate::hierarchy::Hierarchy) to get a
//! [`ControllerId`](crate::types::ControllerId).
//! A controller's view is created lazily on first access, followed by `view_did_load`, and is never recreated.
//!
//! ## Presentation chains
//!
//! Each controller presents at most one controller and is presented by at most one, so the
//! links always form a simple chain from a base controller to its top.
//! - [`present`](crate::hierarchy::Hierarchy::present) pushes a controller on top and swaps the surface to it.
//! - [`dismiss`](crate::hierarchy::Hierarchy::dismiss) unwinds every level above the resolved controller,
//!   deepest first, and swaps the surface back once.
//!
//! ## Hook order
//!
//! For `a` presenting `b`:
//!
//! ```text
//! [b:view_did_load]  [a:view_did_load]  a:view_will_disappear  b:view_will_appear  <swap>  b:view_did_appear  a:view_did_disappear  [completion]
//! ```
//!
//! Dismissing repeats the same pattern per unwound level with the roles reversed.
//!
//! ## Example
//!
//! ```
//! use understory_presentation::controller::{LoadRequest, Surface, ViewController};
//! use understory_presentation::error::ViewLoadError;
//! use understory_presentation::hierarchy::Hierarchy;
//!
//! struct Page(&'static str);
//!
//! impl ViewController<&'static str> for Page {
//!     fn load_view(
//!         &mut self,
//!         _request: LoadRequest<'_, &'static str>,
//!     ) -> Result<&'static str, ViewLoadError> {
//!         Ok(self.0)
//!     }
//! }
//!
//! struct Screen(Option<&'static str>);
//!
//! impl Surface<&'static str> for Screen {
//!     fn set_root(&mut self, view: &&'static str) {
//!         self.0 = Some(*view);
//!     }
//! }
//!
//! let mut h = Hierarchy::new();
//! let home = h.insert(Page("home"));
//! let settings = h.insert(Page("settings"));
//! let about = h.insert(Page("about"));
//!
//! let mut screen = Screen(Some(*h.view(home).unwrap()));
//! h.present(&mut screen, home, settings).unwrap();
//! h.present(&mut screen, settings, about).unwrap();
//! assert_eq!(screen.0, Some("about"));
//!
//! // Dismissing from the base unwinds both levels at once.
//! let d = h.dismiss(&mut screen, home).unwrap().unwrap();
//! assert_eq!(d.dismissed, vec![about, settings]);
//! assert_eq!(screen.0, Some("home"));
//! assert_eq!(h.presented(home), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controller;
pub mod error;
pub mod hierarchy;
pub mod types;
