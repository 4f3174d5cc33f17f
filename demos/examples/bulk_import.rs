// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk import in chunks with early abort.
//!
//! Adds a grid of surface patches to the model in fixed-size chunks and
//! syncs the plotter after each chunk, the way a shell keeps its UI
//! responsive during a long import. The import stops after a budget of
//! chunks; everything registered so far stays pickable.
//!
//! Run:
//! - `cargo run -p scout_demos --example bulk_import`

use std::error::Error;
use std::time::Instant;

use env_logger::Env;
use glam::DVec3;
use scout_plotter::{Plotter, PlotterConfig, SplineModel};
use scout_scene::{RenderBackend, Scene};
use scout_spline::SplineObject;

const GRID: usize = 20;
const CHUNK: usize = 25;
const CHUNK_BUDGET: usize = 10;

fn patch(i: usize, j: usize) -> SplineObject {
    let (x0, y0) = (i as f64 * 1.2, j as f64 * 1.2);
    let mut cps = Vec::with_capacity(27);
    for b in 0..3 {
        for a in 0..3 {
            let lift = if a == 1 && b == 1 { 0.4 } else { 0.0 };
            cps.extend([x0 + 0.5 * a as f64, y0 + 0.5 * b as f64, lift]);
        }
    }
    let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    SplineObject::new(vec![3, 3], vec![knots.clone(), knots], 3, false, cps).unwrap()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Fitting the camera once at the end is cheaper than after every node.
    let config = PlotterConfig {
        reset_camera_on_add: false,
        ..PlotterConfig::default()
    };
    let mut plotter = Plotter::with_config(Scene::default(), config);
    let mut model = SplineModel::new();

    let cells: Vec<(usize, usize)> = (0..GRID)
        .flat_map(|j| (0..GRID).map(move |i| (i, j)))
        .collect();
    let start = Instant::now();
    for (chunk_index, chunk) in cells.chunks(CHUNK).enumerate() {
        if chunk_index == CHUNK_BUDGET {
            log::info!("import aborted after {chunk_index} chunks");
            break;
        }
        for &(i, j) in chunk {
            model.add(patch(i, j));
        }
        let drawn = plotter.sync_model(&mut model)?;
        log::info!(
            "chunk {chunk_index}: {} new primitives, {} total",
            drawn.len(),
            plotter.registry().len()
        );
    }
    plotter.backend_mut().reset_camera();
    println!(
        "imported {} of {} patches in {:?}",
        plotter.registry().len(),
        cells.len(),
        start.elapsed()
    );

    // The first patch was registered before the abort and is still pickable.
    let at = plotter
        .backend()
        .camera()
        .project(DVec3::new(0.5, 0.5, 0.2))
        .map(|(p, _)| p);
    if let Some(at) = at {
        let outcome = plotter.handle_pointer_down(at, false)?;
        println!("picked {:?}", outcome.pick.map(|p| p.node.to_string()));
    }
    Ok(())
}
