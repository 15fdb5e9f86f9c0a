// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup-backed controllers and hint placement.
//!
//! Views are looked up in an in-memory "markup" table by a location derived
//! from the controller type name. A missing document surfaces as an error from
//! the operation that needed the view. Finally a validation hint is placed
//! under a field of the displayed form.
//!
//! Run:
//! - `cargo run -p understory_demos --example markup_views`

use std::collections::HashMap;

use kurbo::{Point, Rect};
use understory_presentation::controller::MarkupViewController;
use understory_presentation::controller::Surface;
use understory_presentation::error::ViewLoadError;
use understory_presentation::hierarchy::Hierarchy;
use understory_presentation::types::{ControllerId, MarkupSource};
use understory_stage::hint::Hint;

struct Print;

impl Surface<String> for Print {
    fn set_root(&mut self, view: &String) {
        println!("surface: {view}");
    }
}

fn main() {
    let documents: HashMap<&'static str, &'static str> = HashMap::from([
        ("LoginView.ui", "<form user password/>"),
        ("WelcomeView.ui", "<label greeting/>"),
    ]);

    let mut h: Hierarchy<String> = Hierarchy::with_loader(
        move |source: &MarkupSource, owner: ControllerId| -> Result<String, ViewLoadError> {
            let doc = documents.get(source.location.as_str()).ok_or_else(|| {
                ViewLoadError::MissingResource {
                    location: source.location.clone(),
                }
            })?;
            Ok(format!("{doc} (owner {owner:?})"))
        },
    );

    let login = h.insert_markup(
        MarkupViewController,
        MarkupSource::by_convention("LoginController", "ui"),
    );
    let welcome = h.insert_markup(
        MarkupViewController,
        MarkupSource::by_convention("WelcomeController", "ui"),
    );
    let broken = h.insert_markup(
        MarkupViewController,
        MarkupSource::by_convention("SettingsController", "ui"),
    );

    let mut surface = Print;
    let view = h.view(login).unwrap().clone();
    surface.set_root(&view);

    let hint = Hint::below(
        "Password is required",
        Rect::new(20.0, 80.0, 260.0, 104.0),
        Point::new(0.0, 28.0),
        Point::new(200.0, 150.0),
    );
    println!("hint {:?} at {:?}", hint.text, hint.anchor);

    h.present(&mut surface, login, welcome).unwrap();
    match h.present(&mut surface, welcome, broken) {
        Ok(()) => println!("unexpected success"),
        Err(err) => println!("present failed: {err} ({:?})", std::error::Error::source(&err)),
    }
    h.dismiss(&mut surface, welcome).unwrap();
}
