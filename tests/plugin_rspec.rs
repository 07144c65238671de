//! Behavioural tests for `ThicketPlugin` using rust-rspec.
//!
//! This file contains a single test so the shared app is driven by one
//! suite from start to finish.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/sim_fixture.rs"]
mod sim_fixture;

use bevy::prelude::*;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use sim_fixture::SimFixture;
use thicket::StaminaTone;

#[test]
fn walker_responds_to_keys_pause_and_stamina() {
    let fixture = SimFixture::bootstrap();

    run_serial(&rspec::given(
        "a walker standing in the forest",
        fixture,
        |scenario: &mut Scenario<SimFixture>| {
            scenario.then("it starts grounded with a full, hidden stamina bar", |state| {
                let player = state.player();
                assert!(player.state.is_grounded());
                let hud = state.hud();
                assert!(!hud.sprinting);
                assert!(!hud.stamina_bar_visible);
                assert_eq!(hud.tone(), StaminaTone::Healthy);
            });

            scenario.when("forward and sprint are held for a second", |ctx| {
                ctx.before_all(|state| {
                    state.hold(&[KeyCode::KeyW, KeyCode::ShiftLeft]);
                    state.tick(60);
                });

                ctx.then("the walker has moved toward negative z", |state| {
                    assert!(state.player().state.position.z < -1.0);
                });

                ctx.then("the HUD shows the sprint label and a draining bar", |state| {
                    let hud = state.hud();
                    assert!(hud.sprinting);
                    assert!(hud.stamina_bar_visible);
                    assert!(hud.stamina_fraction < 1.0);
                });

                ctx.then("the camera follows the walker's eye", |state| {
                    let pose = state.pose();
                    let player = state.player();
                    assert!((pose.position.x - player.state.position.x).abs() < 1e-9);
                    assert!((pose.position.z - player.state.position.z).abs() < 1e-9);
                });
            });

            scenario.when("Escape releases the pointer with keys still held", |ctx| {
                ctx.before_all(|state| {
                    state.press_escape();
                });

                ctx.then("the simulation pauses", |state| {
                    assert!(state.is_paused());
                });

                ctx.then("nothing moves however many frames pass", |state| {
                    let before = state.player();
                    state.tick(30);
                    assert_eq!(state.player(), before);
                });
            });

            scenario.when("a click resumes play and the keys are released", |ctx| {
                ctx.before_all(|state| {
                    state.hold(&[]);
                    state.click();
                    state.tick(120);
                });

                ctx.then("the simulation is running again", |state| {
                    assert!(!state.is_paused());
                });

                ctx.then("the walker coasts to a stop", |state| {
                    assert!(!state.player().state.is_moving());
                });

                ctx.then("stamina recovers and the label drops", |state| {
                    let hud = state.hud();
                    assert!(!hud.sprinting);
                    assert!(hud.stamina_fraction > 0.9);
                });
            });
        },
    ));
}
