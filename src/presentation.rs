//! Presentation-facing outputs of the walker simulation.
//!
//! The simulation hands the presentation layer two things per frame: a
//! camera pose and the HUD's sprint/stamina state. This module defines both
//! and the Bevy system that copies the pose onto the camera entity. It
//! remains a passive observer: nothing here feeds back into the motion
//! state.

use bevy::prelude::*;
use glam::DVec3;
use serde::Serialize;

use crate::constants::LOW_STAMINA_FRACTION;
use crate::motion::{ActorMotionState, Facing, MotionFrame, MoveIntent};
use crate::numeric::expect_f32;

/// Where the camera sits and where it looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PresentationPose {
    /// Eye position including the bob offset.
    pub position: DVec3,
    /// Rotation about the vertical axis, radians.
    pub yaw: f64,
    /// Elevation of the view, radians.
    pub pitch: f64,
    /// Vertical head-bob offset already folded into `position`.
    pub bob_offset: f64,
}

impl PresentationPose {
    /// Pose for a walker at `position` looking along `facing`, raised by
    /// `bob_offset`.
    #[must_use]
    pub fn new(position: DVec3, facing: Facing, bob_offset: f64) -> Self {
        Self {
            position: position + DVec3::Y * bob_offset,
            yaw: facing.yaw(),
            pitch: facing.pitch(),
            bob_offset,
        }
    }

    /// Camera rotation: yaw, then pitch, no roll.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, expect_f32(self.yaw), expect_f32(self.pitch), 0.0)
    }

    /// Single-precision transform for the render world.
    #[must_use]
    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: Vec3::new(
                expect_f32(self.position.x),
                expect_f32(self.position.y),
                expect_f32(self.position.z),
            ),
            rotation: self.rotation(),
            ..Transform::IDENTITY
        }
    }
}

/// Colour band of the stamina bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaminaTone {
    /// Comfortably above the warning level.
    Healthy,
    /// At or below the warning level.
    Low,
}

/// What the heads-up display should show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudState {
    /// The "Sprinting" label is visible.
    pub sprinting: bool,
    /// The stamina bar is drawn.
    pub stamina_bar_visible: bool,
    /// Fill of the stamina bar in `[0, 1]`.
    pub stamina_fraction: f64,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            sprinting: false,
            stamina_bar_visible: false,
            stamina_fraction: 1.0,
        }
    }
}

impl HudState {
    /// Derives the HUD from the state after a step.
    ///
    /// The label follows the held sprint key while the walker moves and has
    /// stamina left, so it drops out the frame the meter empties. The bar
    /// shows whenever the meter is not full or the label is up.
    #[must_use]
    pub fn from_step(
        state: &ActorMotionState,
        intent: MoveIntent,
        frame: &MotionFrame,
        max_stamina: f64,
    ) -> Self {
        let stamina = state.stamina();
        let sprinting = intent.sprint && frame.moving && stamina > 0.0;
        let fraction = if max_stamina > 0.0 {
            (stamina / max_stamina).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            sprinting,
            stamina_bar_visible: stamina < max_stamina || sprinting,
            stamina_fraction: fraction,
        }
    }

    /// Colour band for the current fill.
    #[must_use]
    pub fn tone(&self) -> StaminaTone {
        if self.stamina_fraction > LOW_STAMINA_FRACTION {
            StaminaTone::Healthy
        } else {
            StaminaTone::Low
        }
    }
}

/// Latest camera pose produced by the simulation.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CurrentPose(pub PresentationPose);

/// Latest HUD state produced by the simulation.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Hud(pub HudState);

/// Marker for the camera that follows the walker.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCamera;

/// Copies [`CurrentPose`] onto every [`PlayerCamera`] transform.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn camera_follow_system(
    pose: Res<CurrentPose>,
    mut cameras: Query<&mut Transform, With<PlayerCamera>>,
) {
    let target = pose.0.to_transform();
    for mut transform in &mut cameras {
        transform.translation = target.translation;
        transform.rotation = target.rotation;
    }
}
