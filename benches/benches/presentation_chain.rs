// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_presentation::controller::{LoadRequest, Surface, ViewController};
use understory_presentation::error::ViewLoadError;
use understory_presentation::hierarchy::Hierarchy;
use understory_presentation::types::ControllerId;

struct Counting {
    view: u32,
    hooks: u64,
}

impl ViewController<u32> for Counting {
    fn load_view(&mut self, _request: LoadRequest<'_, u32>) -> Result<u32, ViewLoadError> {
        Ok(self.view)
    }
    fn view_will_appear(&mut self) {
        self.hooks += 1;
    }
    fn view_did_appear(&mut self) {
        self.hooks += 1;
    }
    fn view_will_disappear(&mut self) {
        self.hooks += 1;
    }
    fn view_did_disappear(&mut self) {
        self.hooks += 1;
    }
}

#[derive(Default)]
struct Screen {
    root: u32,
}

impl Surface<u32> for Screen {
    fn set_root(&mut self, view: &u32) {
        self.root = *view;
    }
}

fn build(n: u32) -> (Hierarchy<u32>, Vec<ControllerId>) {
    let mut h = Hierarchy::new();
    let ids = (0..n)
        .map(|view| h.insert(Counting { view, hooks: 0 }))
        .collect();
    (h, ids)
}

fn build_chain(n: u32) -> (Hierarchy<u32>, Vec<ControllerId>, Screen) {
    let (mut h, ids) = build(n);
    let mut screen = Screen::default();
    for w in ids.windows(2) {
        h.present(&mut screen, w[0], w[1]).unwrap();
    }
    (h, ids, screen)
}

fn bench_present_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("present_chain");
    for &n in &[8_u32, 64, 512] {
        group.bench_function(format!("depth_{n}"), |b| {
            b.iter_batched(
                || build(n),
                |(mut h, ids)| {
                    let mut screen = Screen::default();
                    for w in ids.windows(2) {
                        h.present(&mut screen, w[0], w[1]).unwrap();
                    }
                    black_box(screen.root)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_dismiss_from_base(c: &mut Criterion) {
    let mut group = c.benchmark_group("dismiss_from_base");
    for &n in &[8_u32, 64, 512] {
        group.bench_function(format!("depth_{n}"), |b| {
            b.iter_batched(
                || build_chain(n),
                |(mut h, ids, mut screen)| {
                    let d = h.dismiss(&mut screen, ids[0]).unwrap();
                    black_box(d.map(|d| d.dismissed.len()))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_dismiss_top_repeatedly(c: &mut Criterion) {
    c.bench_function("dismiss_top_repeatedly_depth_64", |b| {
        b.iter_batched(
            || build_chain(64),
            |(mut h, ids, mut screen)| {
                loop {
                    let top = h.top(ids[0]);
                    if top == ids[0] {
                        break;
                    }
                    h.dismiss(&mut screen, top).unwrap();
                }
                black_box(screen.root)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_present_chain,
    bench_dismiss_from_base,
    bench_dismiss_top_repeatedly
);
criterion_main!(benches);
