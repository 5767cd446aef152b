//! Drives a headless drag-shear session and prints each frame.
//!
//! Usage: `shear-demo [elevation] [zoom]`. Run with `RUST_LOG=trace` to see
//! the per-tick pipeline.

use anyhow::{bail, Context, Result};
use terrashear_geometry::Coordinate;
use terrashear_interaction::{DragShearOptions, MapView, TerrainLayer, TickOutcome};
use terrashear_testing::{HeadlessTerrain, HeadlessView, InteractionRig};

const MAX_FRAMES: usize = 600;

fn parse_arg(args: &[String], index: usize, name: &str, default: f64) -> Result<f64> {
    match args.get(index) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("invalid {name} `{raw}`")),
        None => Ok(default),
    }
}

fn print_frame(rig: &InteractionRig, frame: usize) {
    let center = rig.view.borrow().center();
    let shear = rig.terrain.borrow().shear();
    let outcome = match rig.interaction.last_outcome() {
        Some(TickOutcome::Applied { branch, .. }) => format!("{branch:?}"),
        Some(other) => format!("{other:?}"),
        None => "-".to_string(),
    };
    println!(
        "{frame:>4}  center ({:>9.3}, {:>9.3})  shear ({:>8.5}, {:>8.5})  {outcome}",
        center.x, center.y, shear.x, shear.y
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let elevation = parse_arg(&args, 0, "elevation", 2000.0)?;
    let zoom = parse_arg(&args, 1, "zoom", 6.0)?;

    let options = DragShearOptions::new()
        .threshold(0.01)
        .spring_coefficient(0.08)
        .friction_force(0.2)
        .min_zoom(5.0)
        .spring_length(0.0)
        .hybrid_shearing_radius_px(0.0);
    let mut rig = InteractionRig::new(
        options,
        HeadlessView::new(Coordinate::ORIGIN, zoom, 1.0),
        HeadlessTerrain::flat(elevation),
    )
    .context("building drag-shear interaction")?;

    println!("=== Drag-shear demo ===");
    println!("elevation {elevation} m, zoom {zoom}");

    if !rig.press(400.0, 300.0) {
        bail!("drag was not accepted");
    }
    let path = [(420.0, 310.0), (450.0, 330.0), (480.0, 345.0), (500.0, 360.0)];
    let mut frame = 0;
    for (x, y) in path {
        rig.drag_to(x, y);
        frame += 1;
        rig.advance_frame();
        print_frame(&rig, frame);
    }
    rig.release();
    log::info!("pointer released after {frame} frames");

    while rig.interaction.is_animating() {
        if frame >= MAX_FRAMES {
            bail!("animation still running after {MAX_FRAMES} frames");
        }
        frame += 1;
        rig.advance_frame();
        print_frame(&rig, frame);
    }

    log::info!(
        "settled after {frame} frames, {} redraws",
        rig.terrain.borrow().redraws()
    );
    rig.interaction.dispose();
    Ok(())
}
