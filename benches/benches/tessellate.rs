// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scout_spline::{SplineObject, tessellate};

/// Open uniform knot vector with `elements` spans for the given order.
fn open_knots(order: usize, elements: usize) -> Vec<f64> {
    let mut knots = vec![0.0; order];
    knots.extend((1..elements).map(|k| k as f64));
    knots.extend(std::iter::repeat_n(elements as f64, order));
    knots
}

/// A wavy `order × order` surface with `elements²` polynomial pieces.
fn gen_surface(order: usize, elements: usize, rational: bool) -> SplineObject {
    let n = order - 1 + elements;
    let width = if rational { 4 } else { 3 };
    let mut cps = Vec::with_capacity(n * n * width);
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f64, j as f64);
            let z = (x * 0.7).sin() * (y * 0.4).cos();
            if rational {
                let w = 1.0 + 0.25 * ((i + j) % 3) as f64;
                cps.extend([x * w, y * w, z * w, w]);
            } else {
                cps.extend([x, y, z]);
            }
        }
    }
    SplineObject::new(
        vec![order, order],
        vec![open_knots(order, elements); 2],
        3,
        rational,
        cps,
    )
    .unwrap()
}

fn gen_curve(order: usize, elements: usize) -> SplineObject {
    let n = order - 1 + elements;
    let cps = (0..n)
        .flat_map(|i| {
            let t = i as f64;
            [t, t.sin()]
        })
        .collect();
    SplineObject::new(vec![order], vec![open_knots(order, elements)], 2, false, cps).unwrap()
}

fn bench_surfaces(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate_surface");
    for &order in &[2usize, 3, 4] {
        for &elements in &[4usize, 16, 32] {
            let surface = gen_surface(order, elements, false);
            group.throughput(Throughput::Elements((elements * elements) as u64));
            group.bench_function(format!("order{order}_n{elements}"), |b| {
                b.iter_batched(
                    || surface.clone(),
                    |mut s| black_box(tessellate(&mut s)),
                    BatchSize::SmallInput,
                );
            });
        }
    }
    let rational = gen_surface(3, 16, true);
    group.bench_function("rational_order3_n16", |b| {
        b.iter_batched(
            || rational.clone(),
            |mut s| black_box(tessellate(&mut s)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate_curve");
    for &elements in &[16usize, 256] {
        let curve = gen_curve(4, elements);
        group.throughput(Throughput::Elements(elements as u64));
        group.bench_function(format!("cubic_n{elements}"), |b| {
            b.iter_batched(
                || curve.clone(),
                |mut s| black_box(tessellate(&mut s)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_surfaces, bench_curves);
criterion_main!(benches);
