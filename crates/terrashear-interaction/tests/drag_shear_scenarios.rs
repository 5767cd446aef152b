use terrashear_geometry::{Coordinate, Offset, Shear};
use terrashear_interaction::input::condition;
use terrashear_interaction::{
    DragShearOptions, ElevationBranch, MapView, Modifiers, TerrainLayer, TickOutcome,
};
use terrashear_testing::{HeadlessTerrain, HeadlessView, InteractionRig};

const EPSILON: f64 = 1e-9;

fn options() -> DragShearOptions {
    DragShearOptions::new()
        .threshold(0.01)
        .spring_coefficient(0.1)
        .friction_force(0.3)
        .min_zoom(5.0)
        .spring_length(0.0)
        .hybrid_shearing_radius_px(0.0)
}

fn rig_with(options: DragShearOptions, zoom: f64, elevation: f64) -> InteractionRig {
    InteractionRig::new(
        options,
        HeadlessView::new(Coordinate::ORIGIN, zoom, 1.0),
        HeadlessTerrain::flat(elevation),
    )
    .expect("valid options")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Press at (100, 100) and drag to (150, 130): a map-space pull of (50, -30).
fn diagonal_drag(rig: &mut InteractionRig) {
    assert!(rig.press(100.0, 100.0));
    assert!(rig.drag_to(150.0, 130.0));
}

const PULL: Offset = Offset { x: 50.0, y: -30.0 };

#[test]
fn high_ground_drag_pans_view_and_shears_with_the_spring() {
    let mut rig = rig_with(options(), 6.0, 2000.0);
    diagonal_drag(&mut rig);
    assert!(rig.interaction.is_animating());

    assert!(rig.advance_frame());
    let first = rig.view.borrow().center();
    assert_close(first.x, -5.0);
    assert_close(first.y, 3.0);
    let shear = rig.terrain.borrow().shear();
    assert_close(shear.x, 45.0 / 2000.0);
    assert_close(shear.y, -27.0 / 2000.0);
    match rig.interaction.last_outcome() {
        Some(TickOutcome::Applied {
            branch,
            distance_xy,
            ..
        }) => {
            assert_eq!(branch, ElevationBranch::High);
            assert_close(distance_xy.x, 45.0);
            assert_close(distance_xy.y, -27.0);
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    let frames = rig.run_until_idle(200).expect("motion settles") + 1;
    assert!((20..=60).contains(&frames), "settled after {frames} frames");

    let view = rig.view.borrow();
    let terrain = rig.terrain.borrow();
    let centers = view.center_history();
    assert_eq!(centers.len(), frames - 1);
    assert_eq!(terrain.shear_history().len(), centers.len());
    assert_eq!(terrain.redraws(), centers.len());

    // The view follows the spring towards the pull before overshooting.
    for pair in centers[..10].windows(2) {
        assert!(pair[1].x < pair[0].x);
    }

    // Above the critical elevation the shear is the spring extension scaled
    // down by the sampled height, every frame.
    for (center, shear) in centers.iter().zip(terrain.shear_history()) {
        let extension = PULL + (*center - Coordinate::ORIGIN);
        assert_close(shear.x, extension.x / 2000.0);
        assert_close(shear.y, extension.y / 2000.0);
    }

    let rest = view.center();
    assert!((rest.x + 50.0).abs() < 1.0 && (rest.y - 30.0).abs() < 1.0);
    assert_eq!(rig.interaction.last_outcome(), Some(TickOutcome::Settled));
    assert_eq!(rig.interaction.physics().current_change, Offset::ZERO);
    assert!(rig.interaction.is_dragging());
}

#[test]
fn low_ground_drag_keeps_grabbed_point_under_cursor() {
    let mut rig = rig_with(options(), 6.0, 800.0);
    diagonal_drag(&mut rig);

    assert!(rig.advance_frame());
    let shear = rig.terrain.borrow().shear();
    assert_close(shear.x, -45.0 / 2200.0);
    assert_close(shear.y, 27.0 / 2200.0);

    rig.run_until_idle(200).expect("motion settles");

    let view = rig.view.borrow();
    assert!(view.center_history().len() > 10);
    for center in view.center_history() {
        assert_close(center.x, -50.0);
        assert_close(center.y, 30.0);
    }
    let spring_center = rig.interaction.session().current_center;
    let extension = PULL + (spring_center - Coordinate::ORIGIN);
    let last = rig.terrain.borrow().shear();
    assert_close(last.x, -extension.x / 2200.0);
    assert_close(last.y, -extension.y / 2200.0);
}

#[test]
fn below_min_zoom_high_ground_pulls_the_view_back() {
    let mut rig = rig_with(options(), 2.5, 2000.0);
    diagonal_drag(&mut rig);

    assert!(rig.advance_frame());

    // Spring center (-5, 3), extension (45, -27), pull-back 3 * (1 - 2.5 / 5).
    let center = rig.view.borrow().center();
    assert_close(center.x, -5.0 - 45.0 * 1.5);
    assert_close(center.y, 3.0 + 27.0 * 1.5);
    assert_close(rig.interaction.session().current_center.x, -5.0);
}

#[test]
fn axis_aligned_drag_stops_once_one_axis_settles() {
    let mut rig = rig_with(options(), 6.0, 2000.0);
    rig.press(100.0, 100.0);
    rig.drag_to(150.0, 100.0);

    assert_eq!(rig.run_until_idle(10), Some(1));

    // Motion along x alone never counts as animating.
    assert!(rig.view.borrow().center_history().is_empty());
    assert_eq!(rig.terrain.borrow().redraws(), 0);
    assert_eq!(rig.interaction.last_outcome(), Some(TickOutcome::Settled));
    let change = rig.interaction.physics().current_change;
    assert_close(change.x, 5.0);
    assert_eq!(change.y, 0.0);
}

#[test]
fn drag_without_displacement_settles_without_output() {
    let mut rig = rig_with(options(), 6.0, 2000.0);
    rig.press(300.0, 200.0);
    rig.drag_to(300.0, 200.0);

    assert!(!rig.advance_frame());

    let physics = rig.interaction.physics();
    assert_eq!(physics.distance, 0.0);
    assert_eq!(physics.spring_length_xy, Offset::ZERO);
    assert_eq!(physics.current_change, Offset::ZERO);
    assert_eq!(rig.terrain.borrow().shear(), Shear::ZERO);
}

#[test]
fn another_interaction_preempts_and_resets_shear() {
    let mut rig = rig_with(options(), 6.0, 2000.0);
    diagonal_drag(&mut rig);
    for _ in 0..3 {
        assert!(rig.advance_frame());
    }
    let spring_center = rig.interaction.session().current_center;
    let before = rig.interaction.physics();
    assert_ne!(before.current_change, Offset::ZERO);
    assert_ne!(rig.terrain.borrow().shear(), Shear::ZERO);

    rig.view.borrow_mut().set_interacting(true);
    assert!(!rig.advance_frame());

    assert_eq!(rig.interaction.last_outcome(), Some(TickOutcome::Preempted));
    assert_eq!(rig.terrain.borrow().shear(), Shear::ZERO);
    assert_eq!(rig.terrain.borrow().redraws(), 4);
    assert_eq!(rig.view.borrow().center_history().len(), 3);
    assert_eq!(rig.interaction.session().current_center, spring_center);
    assert_eq!(rig.interaction.physics(), before);

    // The next drag picks the motion back up.
    rig.view.borrow_mut().set_interacting(false);
    assert!(rig.drag_to(150.0, 130.0));
    assert!(rig.interaction.is_animating());
    assert!(rig.advance_frame());
    assert_eq!(rig.view.borrow().center_history().len(), 4);
}

#[test]
fn hybrid_shearing_holds_the_spring_open_until_release() {
    let view = HeadlessView::new(Coordinate::ORIGIN, 6.0, 2.0);
    let mut rig = InteractionRig::new(
        options().hybrid_shearing_radius_px(50.0),
        view,
        HeadlessTerrain::flat(2000.0),
    )
    .expect("valid options");

    rig.press(100.0, 100.0);
    rig.drag_to(160.0, 180.0);
    // Pull of (120, -160) map units, capped at 50 px * 2.
    assert_close(rig.interaction.spring_length(), 100.0);

    for _ in 0..300 {
        assert!(rig.advance_frame());
    }
    let physics = rig.interaction.physics();
    assert_eq!(physics.current_change, Offset::ZERO);
    assert!((physics.distance - 100.0).abs() < 0.5);
    assert!(matches!(
        rig.interaction.last_outcome(),
        Some(TickOutcome::Applied { .. })
    ));

    assert!(rig.release());
    assert_eq!(rig.interaction.spring_length(), 0.0);
    assert!(!rig.interaction.is_dragging());
    rig.run_until_idle(500).expect("released spring settles");
    assert_eq!(rig.interaction.last_outcome(), Some(TickOutcome::Settled));
}

#[test]
fn repeated_moves_schedule_a_single_tick() {
    let mut rig = rig_with(options(), 6.0, 2000.0);
    rig.press(100.0, 100.0);
    rig.drag_to(120.0, 110.0);
    rig.drag_to(150.0, 130.0);
    rig.drag_to(150.0, 130.0);

    assert_eq!(rig.runtime.handle().pending_frame_callbacks(), 1);
    assert!(rig.advance_frame());
    assert_eq!(rig.interaction.frames_run(), 1);
    assert_eq!(rig.runtime.handle().pending_frame_callbacks(), 1);
}

#[test]
fn disposed_interaction_never_ticks_again() {
    let mut rig = rig_with(options(), 6.0, 2000.0);
    diagonal_drag(&mut rig);
    assert!(rig.advance_frame());

    rig.interaction.dispose();
    assert!(!rig.advance_frame());
    rig.drag_to(180.0, 160.0);
    assert!(!rig.advance_frame());

    assert!(rig.interaction.is_disposed());
    assert_eq!(rig.view.borrow().center_history().len(), 1);
    assert!(!rig.runtime.handle().has_frame_callbacks());
}

#[test]
fn custom_condition_selects_modified_drags() {
    let options = options().condition(condition::shift_key_only());
    let mut rig = rig_with(options, 6.0, 2000.0);

    assert!(!rig.press(100.0, 100.0));
    assert!(!rig.interaction.is_dragging());
    rig.release();

    assert!(rig.press_with_modifiers(100.0, 100.0, Modifiers::shift()));
    assert!(rig.interaction.is_dragging());
}

#[test]
fn elevation_is_sampled_under_the_pointer_at_drag_zoom() {
    let terrain = HeadlessTerrain::with_elevation(|coordinate, _| {
        if coordinate.x < 0.0 {
            2600.0
        } else {
            400.0
        }
    });
    let mut rig = InteractionRig::new(
        options(),
        HeadlessView::new(Coordinate::ORIGIN, 6.0, 1.0),
        terrain,
    )
    .expect("valid options");

    rig.press(100.0, 100.0);
    assert_eq!(
        rig.terrain.borrow().samples(),
        vec![(Coordinate::new(-300.0, 200.0), 6.0)]
    );
    assert_eq!(rig.interaction.session().start_drag_elevation, 2600.0);

    rig.drag_to(150.0, 130.0);
    rig.advance_frame();
    assert!(matches!(
        rig.interaction.last_outcome(),
        Some(TickOutcome::Applied {
            branch: ElevationBranch::High,
            ..
        })
    ));
}
