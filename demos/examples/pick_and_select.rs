// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking and selection against the headless scene.
//!
//! Draws two faces and one edge, then replays a short pointer session:
//! a click, a drag, a modifier click and a click on empty space, printing the
//! selection after every step.
//!
//! The plotter configuration can be overridden with JSON, e.g.
//! `SCOUT_PLOTTER='{"drag_threshold": 4.0}'`.
//!
//! Run:
//! - `cargo run -p scout_demos --example pick_and_select`

use std::error::Error;

use env_logger::Env;
use glam::DVec3;
use kurbo::Point;
use scout_plotter::{NodeKey, Plotter, PlotterConfig, PointerEvent, SplineModel};
use scout_scene::{PrimitiveId, Scene};
use scout_spline::SplineObject;

fn face(x0: f64) -> SplineObject {
    SplineObject::new(
        vec![2, 2],
        vec![vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]],
        2,
        false,
        vec![x0, 0.0, x0 + 1.0, 0.0, x0, 1.0, x0 + 1.0, 1.0],
    )
    .unwrap()
}

fn edge() -> SplineObject {
    SplineObject::new(
        vec![2],
        vec![vec![0.0, 0.0, 1.0, 1.0]],
        2,
        false,
        vec![0.0, -0.5, 3.0, -0.5],
    )
    .unwrap()
}

fn report(step: &str, plotter: &Plotter<NodeKey, Scene>) {
    let nodes: Vec<String> = plotter
        .current_selection()
        .iter()
        .map(ToString::to_string)
        .collect();
    let decorations = plotter
        .backend()
        .iter()
        .filter(|(_, p)| p.name.is_some())
        .count();
    println!(
        "{step:<24} {:?} [{}] decorations={decorations}",
        plotter.selection().state(),
        nodes.join(", ")
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::var("SCOUT_PLOTTER") {
        Ok(json) => serde_json::from_str(&json)?,
        Err(_) => PlotterConfig::default(),
    };
    let mut model = SplineModel::new();
    model.add(face(0.0));
    model.add(face(2.0));
    model.add(edge());

    let mut plotter = Plotter::with_config(Scene::default(), config);
    let drawn: Vec<PrimitiveId> = plotter.sync_model(&mut model)?;
    log::info!("drew {} primitives", drawn.len());

    let screen = |plotter: &Plotter<NodeKey, Scene>, x: f64, y: f64| -> Point {
        plotter
            .backend()
            .camera()
            .project(DVec3::new(x, y, 0.0))
            .map_or(Point::ORIGIN, |(p, _)| p)
    };

    let left = screen(&plotter, 0.5, 0.5);
    let right = screen(&plotter, 2.5, 0.5);
    let line = screen(&plotter, 1.5, -0.5);
    let empty = screen(&plotter, 1.5, 0.5);

    plotter.handle_pointer_event(PointerEvent::Down { at: left, append: false })?;
    plotter.handle_pointer_event(PointerEvent::Up { at: left })?;
    report("click left face", &plotter);

    plotter.handle_pointer_event(PointerEvent::Down { at: right, append: false })?;
    plotter.handle_pointer_event(PointerEvent::Move {
        at: Point::new(right.x + 25.0, right.y),
    })?;
    plotter.handle_pointer_event(PointerEvent::Up { at: right })?;
    report("drag over right face", &plotter);

    plotter.handle_pointer_event(PointerEvent::Down { at: right, append: true })?;
    plotter.handle_pointer_event(PointerEvent::Up { at: right })?;
    report("append right face", &plotter);

    plotter.handle_pointer_down(line, true)?;
    report("append edge (ignored)", &plotter);

    plotter.handle_pointer_down(line, false)?;
    report("click edge", &plotter);

    plotter.handle_pointer_down(empty, false)?;
    report("click empty space", &plotter);

    plotter.teardown()?;
    println!("scene holds {} primitives after teardown", plotter.backend().len());
    Ok(())
}
