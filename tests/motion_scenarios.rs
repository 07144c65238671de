//! End-to-end walker scenarios driven through `MotionController::step`.

use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use glam::{DVec2, DVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::{fixture, rstest};
use test_utils::{intent, step_many, FlatGround, Ledge, HELD_FORWARD};
use thicket::{
    Facing, Footing, HeightField, MotionController, MoveIntent, ProximityColliderSet, RollingHills,
};

const FRAME: f64 = 1.0 / 60.0;

#[fixture]
fn controller() -> MotionController {
    MotionController::default()
}

#[fixture]
fn tree_at_five() -> ProximityColliderSet {
    let mut colliders = ProximityColliderSet::new();
    colliders
        .insert(5.0, 0.0, 1.5)
        .unwrap_or_else(|e| panic!("valid collider rejected: {e}"));
    colliders
}

#[rstest]
fn walking_forward_heads_down_negative_z(controller: MotionController) {
    let mut state = controller.spawn(DVec3::new(0.0, 1.0, 0.0));
    let mut last_z = state.position.z;
    for _ in 0..120 {
        controller.step(&mut state, HELD_FORWARD, FRAME, &ProximityColliderSet::new(), &FlatGround(0.0));
        assert!(state.position.z < last_z, "z must fall every frame");
        last_z = state.position.z;
    }
    assert_relative_eq!(state.velocity.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(state.velocity.y, -2.5, epsilon = 1e-6);
    assert_relative_eq!(state.position.y, 1.0);
}

#[rstest]
fn head_on_approach_stalls_outside_the_trunk(
    controller: MotionController,
    tree_at_five: ProximityColliderSet,
) {
    let mut state = controller.spawn(DVec3::new(2.0, 1.0, 0.0));
    let frames = step_many(
        &controller,
        &mut state,
        intent("d"),
        FRAME,
        180,
        &tree_at_five,
        &FlatGround(0.0),
    );
    assert_eq!(frames.len(), 180);
    let gap = state.planar_position().distance(DVec2::new(5.0, 0.0));
    assert!(gap >= 1.9 - 1e-9, "walker entered the trunk: {gap}");
    assert!(gap < 1.9 + 0.1, "walker should end up pressed against the trunk");
    assert_relative_eq!(state.position.z, 0.0);
}

#[rstest]
fn glancing_approach_slides_past(controller: MotionController, tree_at_five: ProximityColliderSet) {
    let mut state = controller.spawn(DVec3::new(2.0, 1.0, -0.3));
    // Strafing right at this yaw heads mostly along +x with a little -z.
    state.facing = Facing::new(0.2, 0.0);
    let mut slid = false;
    for _ in 0..600 {
        let before = state.planar_position();
        controller.step(&mut state, intent("d"), FRAME, &tree_at_five, &FlatGround(0.0));
        let moved = state.planar_position() - before;
        slid |= moved.x == 0.0 && moved.y != 0.0;
        let gap = state.planar_position().distance(DVec2::new(5.0, 0.0));
        assert!(gap >= 1.9 - 1e-9, "walker entered the trunk: {gap}");
    }
    assert!(slid, "walker never slid along the trunk");
    assert!(state.position.x > 7.0, "walker should get past the trunk");
    assert!(state.position.z < -1.5);
}

#[rstest]
fn falling_walker_lands_on_the_ground(controller: MotionController) {
    let mut state = controller.spawn(DVec3::new(0.0, 50.0, 0.0));
    let ground = FlatGround(0.0);
    let idle = MoveIntent::default();

    controller.step(&mut state, idle, FRAME, &ProximityColliderSet::new(), &ground);
    assert_eq!(state.footing, Footing::Airborne);

    let mut last_vertical = state.vertical_velocity;
    let mut landed_after = None;
    for frame in 0..400 {
        controller.step(&mut state, idle, FRAME, &ProximityColliderSet::new(), &ground);
        if state.is_grounded() {
            landed_after = Some(frame);
            break;
        }
        assert!(state.vertical_velocity < last_vertical);
        last_vertical = state.vertical_velocity;
    }

    assert!(landed_after.is_some(), "walker never landed");
    assert_relative_eq!(state.position.y, 1.0);
    assert_eq!(state.vertical_velocity, 0.0);
}

#[rstest]
fn stepping_off_a_ledge_falls_to_the_lower_ground(controller: MotionController) {
    let ledge = Ledge {
        edge_z: 0.0,
        high: 3.0,
        low: 0.0,
    };
    let mut state = controller.spawn(DVec3::new(0.0, 4.0, 0.5));
    let mut went_airborne = false;
    for _ in 0..240 {
        controller.step(&mut state, HELD_FORWARD, FRAME, &ProximityColliderSet::new(), &ledge);
        went_airborne |= !state.is_grounded();
    }
    assert!(went_airborne);
    assert!(state.is_grounded());
    assert_relative_eq!(state.position.y, 1.0);
}

#[rstest]
#[case::seed_1(1)]
#[case::seed_2(2)]
#[case::seed_3(3)]
fn random_play_keeps_every_bound(controller: MotionController, #[case] seed: u64) {
    let hills = RollingHills::default();
    let mut colliders = ProximityColliderSet::new();
    for (x, z) in [(4.0, 0.0), (-3.0, 5.0), (0.0, -6.0)] {
        colliders
            .insert(x, z, 1.5)
            .unwrap_or_else(|e| panic!("valid collider rejected: {e}"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = controller.spawn(DVec3::new(0.0, hills.height(0.0, 0.0) + 1.0, 0.0));
    let max = controller.config().max_stamina;

    for _ in 0..2_000 {
        let intent = MoveIntent {
            forward: rng.gen_bool(0.6),
            back: rng.gen_bool(0.1),
            left: rng.gen_bool(0.2),
            right: rng.gen_bool(0.2),
            jump: rng.gen_bool(0.02),
            sprint: rng.gen_bool(0.5),
        };
        state.facing.apply_mouse_delta(
            rng.gen_range(-400.0..400.0),
            rng.gen_range(-400.0..400.0),
            controller.config().mouse_sensitivity,
        );
        let delta = rng.gen_range(0.0..0.1);
        controller.step(&mut state, intent, delta, &colliders, &hills);

        assert!((0.0..=max).contains(&state.stamina()));
        assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&state.facing.pitch()));
        assert!(!colliders.intersects(state.position.x, state.position.z, 0.4));
        if state.is_grounded() {
            let ground = hills.height(state.position.x, state.position.z) + 1.0;
            assert_relative_eq!(state.position.y, ground, epsilon = 1e-9);
        }
    }
}

#[rstest]
fn identical_inputs_give_identical_states(
    controller: MotionController,
    tree_at_five: ProximityColliderSet,
) {
    let hills = RollingHills::default();
    let run = || {
        let mut state = controller.spawn(DVec3::new(0.0, 1.0, 0.0));
        let frames = step_many(&controller, &mut state, intent("wdr"), FRAME, 300, &tree_at_five, &hills);
        (state, frames)
    };
    assert_eq!(run(), run());
}

#[rstest]
fn sprinting_drains_then_walks(controller: MotionController) {
    let mut state = controller.spawn(DVec3::new(0.0, 1.0, 0.0));
    let frames = step_many(
        &controller,
        &mut state,
        intent("wr"),
        0.1,
        60,
        &ProximityColliderSet::new(),
        &FlatGround(0.0),
    );
    let first_walk = frames.iter().position(|f| !f.sprinted);
    // 100 stamina at 25 per second lasts 40 frames of 0.1 s.
    assert_eq!(first_walk, Some(40));
    assert_eq!(state.stamina(), 0.0);
    assert_relative_eq!(state.velocity.length(), 2.5, epsilon = 1e-3);
}
