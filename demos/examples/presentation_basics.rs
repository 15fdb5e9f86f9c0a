// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation basics.
//!
//! Builds a three-level chain, prints every lifecycle hook as it fires, then
//! dismisses from the base so the whole chain unwinds in one call.
//!
//! Run:
//! - `cargo run -p understory_demos --example presentation_basics`

use understory_presentation::controller::{LoadRequest, Surface, ViewController};
use understory_presentation::error::ViewLoadError;
use understory_presentation::hierarchy::Hierarchy;

struct Page {
    name: &'static str,
}

impl ViewController<String> for Page {
    fn load_view(&mut self, _request: LoadRequest<'_, String>) -> Result<String, ViewLoadError> {
        Ok(format!("[{}]", self.name))
    }
    fn view_did_load(&mut self, view: &String) {
        println!("  {}: view_did_load {view}", self.name);
    }
    fn view_will_appear(&mut self) {
        println!("  {}: view_will_appear", self.name);
    }
    fn view_did_appear(&mut self) {
        println!("  {}: view_did_appear", self.name);
    }
    fn view_will_disappear(&mut self) {
        println!("  {}: view_will_disappear", self.name);
    }
    fn view_did_disappear(&mut self) {
        println!("  {}: view_did_disappear", self.name);
    }
}

struct PrintingSurface;

impl Surface<String> for PrintingSurface {
    fn set_root(&mut self, view: &String) {
        println!("  <surface shows {view}>");
    }
}

fn main() {
    let mut h = Hierarchy::new();
    let green = h.insert(Page { name: "green" });
    let blue = h.insert(Page { name: "blue" });
    let yellow = h.insert(Page { name: "yellow" });
    let mut surface = PrintingSurface;

    println!("== load root ==");
    let root_view = h.view(green).unwrap().clone();
    surface.set_root(&root_view);

    println!("== green presents blue ==");
    h.present_then(&mut surface, green, blue, || println!("  (complete)"))
        .unwrap();

    println!("== blue presents yellow ==");
    h.present(&mut surface, blue, yellow).unwrap();
    println!("chain: {:?}", h.chain(green));

    println!("== green dismisses ==");
    let d = h
        .dismiss_then(&mut surface, green, || println!("  (complete)"))
        .unwrap();
    println!("dismissal: {d:?}");

    println!("== dismiss on an unlinked controller ==");
    println!("result: {:?}", h.dismiss(&mut surface, yellow).unwrap());
}
