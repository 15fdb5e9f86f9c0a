// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stage driving a console "window".
//!
//! Window transitions become root lifecycle hooks, the root's title is mirrored
//! into the window title, and presenting swaps the scene's content.
//! Set `RUST_LOG=debug` (or `trace`) to see the hierarchy's own logging.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example stage_console`

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use understory_presentation::controller::{LoadRequest, Surface, ViewController};
use understory_presentation::error::ViewLoadError;
use understory_stage::stage::{StageConfig, StageController};
use understory_stage::window::{Window, WindowEvent};

struct Screen {
    name: &'static str,
}

impl ViewController<String> for Screen {
    fn load_view(&mut self, _request: LoadRequest<'_, String>) -> Result<String, ViewLoadError> {
        Ok(format!("<{} screen>", self.name))
    }
    fn view_did_appear(&mut self) {
        println!("  {} is visible", self.name);
    }
    fn view_did_disappear(&mut self) {
        println!("  {} is hidden", self.name);
    }
}

struct ConsoleScene;

impl Surface<String> for ConsoleScene {
    fn set_root(&mut self, view: &String) {
        println!("  scene -> {view}");
    }
}

#[derive(Default)]
struct ConsoleWindow;

impl Window<String> for ConsoleWindow {
    type Scene = ConsoleScene;

    fn create_scene(&mut self, content: &String, size: Option<Size>) -> ConsoleScene {
        println!("  scene created with {content} at {size:?}");
        ConsoleScene
    }

    fn show(&mut self, events: &mut dyn FnMut(WindowEvent)) {
        events(WindowEvent::Showing);
        println!("  window mapped");
        events(WindowEvent::Shown);
    }

    fn hide(&mut self, events: &mut dyn FnMut(WindowEvent)) {
        events(WindowEvent::Hiding);
        println!("  window unmapped");
        events(WindowEvent::Hidden);
    }

    fn set_title(&mut self, title: &str) {
        println!("  title bar: {title:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = StageConfig {
        size: Some(Size::new(800.0, 600.0)),
    };
    let mut stage: StageController<String, ConsoleWindow> =
        StageController::with_config(ConsoleWindow, config);
    let inbox = stage.insert(Screen { name: "inbox" });
    let message = stage.insert(Screen { name: "message" });
    let reply = stage.insert(Screen { name: "reply" });
    stage.set_title(inbox, "Inbox");

    println!("== install root and show ==");
    stage.set_root_view_controller(inbox).unwrap();
    stage.show();

    println!("== open a message, then reply ==");
    stage.present(inbox, message).unwrap();
    stage.present(message, reply).unwrap();
    stage.set_title(inbox, "Inbox (1 draft)");

    println!("== presenting from a hidden controller is rejected ==");
    if let Err(err) = stage.present(inbox, reply) {
        println!("  error: {err}");
    }

    println!("== back to the inbox ==");
    stage.dismiss(inbox).unwrap();

    println!("== close ==");
    stage.close();
}
