// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessellation basics.
//!
//! Builds a two-element quadratic curve and a rational quarter-cylinder patch,
//! tessellates both and prints the resulting Bézier cells with their VTK
//! point orderings.
//!
//! Run:
//! - `cargo run -p scout_demos --example tessellate_basics`

use env_logger::Env;
use scout_spline::{BezierMesh, SplineObject, tessellate};

fn print_mesh(label: &str, mesh: &BezierMesh) {
    println!("== {label}: {} cells, {} points ==", mesh.cells.len(), mesh.points.len());
    for (index, cell) in mesh.cells.iter().enumerate() {
        println!("  cell {index}: {:?}", cell.kind);
        println!("    connectivity {:?}", cell.connectivity);
        let mid = vec![0.5; cell.kind.pardim()];
        println!("    midpoint     {:?}", mesh.evaluate(index, &mid));
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    // Quadratic curve with an interior knot: two Bézier elements.
    let mut curve = SplineObject::new(
        vec![3],
        vec![vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]],
        2,
        false,
        vec![0.0, 0.0, 1.0, 2.0, 2.0, 0.0, 3.0, 1.0],
    )
    .unwrap();
    if let Some(mesh) = tessellate(&mut curve) {
        print_mesh("curve", &mesh);
    }

    // Quarter cylinder: rational quadratic around, linear along z.
    let w = std::f64::consts::FRAC_1_SQRT_2;
    #[rustfmt::skip]
    let cps = vec![
        1.0, 0.0, 0.0, 1.0,   w, w, 0.0, w,   0.0, 1.0, 0.0, 1.0,
        1.0, 0.0, 2.0, 1.0,   w, w, 2.0 * w, w,   0.0, 1.0, 2.0, 1.0,
    ];
    let mut patch = SplineObject::new(
        vec![3, 2],
        vec![vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]],
        3,
        true,
        cps,
    )
    .unwrap();
    if let Some(mesh) = tessellate(&mut patch) {
        print_mesh("quarter cylinder", &mesh);
        let [x, y, _] = mesh.evaluate(0, &[0.5, 0.0]);
        println!("  radius at 45°: {:.12}", x.hypot(y));
    }
}
