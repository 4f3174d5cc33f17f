// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use scout_plotter::Plotter;
use scout_scene::{PickStrategy, RenderBackend, Scene};
use scout_spline::SplineObject;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Biquadratic patch covering `[x0, x0 + 1] × [y0, y0 + 1]` with a bulge.
fn gen_patch(x0: f64, y0: f64) -> SplineObject {
    let mut cps = Vec::with_capacity(27);
    for j in 0..3 {
        for i in 0..3 {
            let bulge = if i == 1 && j == 1 { 0.3 } else { 0.0 };
            cps.extend([x0 + 0.5 * i as f64, y0 + 0.5 * j as f64, bulge]);
        }
    }
    let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    SplineObject::new(vec![3, 3], vec![knots.clone(), knots], 3, false, cps).unwrap()
}

fn gen_plotter(n: usize) -> Plotter<usize, Scene> {
    let mut plotter = Plotter::new(Scene::default());
    for j in 0..n {
        for i in 0..n {
            let mut patch = gen_patch(i as f64 * 1.1, j as f64 * 1.1);
            plotter
                .tessellate_and_register(i + j * n, &mut patch)
                .unwrap();
        }
    }
    plotter
}

fn gen_clicks(count: usize, scene: &Scene) -> Vec<Point> {
    let size = scene.camera().viewport();
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * size.width, rng.next_f64() * size.height))
        .collect()
}

fn bench_scene_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_pick");
    for &n in &[4usize, 16] {
        let plotter = gen_plotter(n);
        let scene = plotter.backend();
        let clicks = gen_clicks(64, scene);
        group.throughput(Throughput::Elements(clicks.len() as u64));
        for (label, strategy) in [
            ("point", PickStrategy::Point { tolerance: 0.025 }),
            ("primitive", PickStrategy::Primitive),
        ] {
            group.bench_function(format!("{label}_n{n}"), |b| {
                b.iter(|| {
                    let hits = clicks
                        .iter()
                        .filter(|&&at| matches!(scene.pick(&strategy, at), Ok(Some(_))))
                        .count();
                    black_box(hits);
                });
            });
        }
    }
    group.finish();
}

fn bench_click_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("click_select");
    let mut plotter = gen_plotter(8);
    let clicks = gen_clicks(64, plotter.backend());
    group.throughput(Throughput::Elements(clicks.len() as u64));
    for (label, append) in [("plain", false), ("append", true)] {
        group.bench_function(label, |b| {
            b.iter(|| {
                for &at in &clicks {
                    black_box(plotter.handle_pointer_down(at, append).unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scene_pick, bench_click_select);
criterion_main!(benches);
