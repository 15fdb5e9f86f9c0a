// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_stage --heading-base-level=0

//! Understory Stage: bind a toolkit window to the root of a presentation stack.
//!
//! ## Overview
//!
//! A [`StageController`](crate::stage::StageController) owns one [`Window`](crate::window::Window),
//! its scene, and the [`Hierarchy`](understory_presentation::hierarchy::Hierarchy) of controllers
//! shown in it.
//!
//! - Window transitions (showing, shown, hiding, hidden) become the root controller's
//!   `view_will_appear`, `view_did_appear`, `view_will_disappear` and `view_did_disappear`.
//!   Nothing fires while no root is installed.
//! - The root's title is mirrored into the window's title bar.
//! - Presenting and dismissing swap the scene's root content in place; the window is never recreated.
//!
//! The toolkit side is reached only through the [`Window`](crate::window::Window) and
//! [`Surface`](understory_presentation::controller::Surface) traits.
//!
//! ## Example
//!
//! ```
//! use kurbo::Size;
//! use understory_presentation::controller::{LoadRequest, Surface, ViewController};
//! use understory_presentation::error::ViewLoadError;
//! use understory_stage::stage::StageController;
//! use understory_stage::window::{Window, WindowEvent};
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
//! struct Scene(&'static str);
//!
//! impl Surface<&'static str> for Scene {
//!     fn set_root(&mut self, view: &&'static str) {
//!         self.0 = *view;
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Headless {
//!     title: String,
//! }
//!
//! impl Window<&'static str> for Headless {
//!     type Scene = Scene;
//!     fn create_scene(&mut self, content: &&'static str, _size: Option<Size>) -> Scene {
//!         Scene(*content)
//!     }
//!     fn show(&mut self, events: &mut dyn FnMut(WindowEvent)) {
//!         events(WindowEvent::Showing);
//!         events(WindowEvent::Shown);
//!     }
//!     fn hide(&mut self, events: &mut dyn FnMut(WindowEvent)) {
//!         events(WindowEvent::Hiding);
//!         events(WindowEvent::Hidden);
//!     }
//!     fn set_title(&mut self, title: &str) {
//!         self.title = title.to_string();
//!     }
//! }
//!
//! let mut stage: StageController<&'static str, Headless> = StageController::new(Headless::default());
//! let home = stage.insert(Page("home"));
//! let detail = stage.insert(Page("detail"));
//! stage.set_title(home, "Home");
//!
//! stage.set_root_view_controller(home).unwrap();
//! stage.show();
//! assert_eq!(stage.window().title, "Home");
//!
//! stage.present(home, detail).unwrap();
//! assert_eq!(stage.scene().unwrap().0, "detail");
//!
//! stage.dismiss(detail).unwrap();
//! assert_eq!(stage.scene().unwrap().0, "home");
//! stage.close();
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod hint;
pub mod stage;
pub mod window;
