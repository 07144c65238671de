//! Walker kinematics.
//!
//! [`MotionController::step`] advances an [`ActorMotionState`] by one frame:
//! it turns held keys into a planar direction, spends or recovers stamina,
//! eases the velocity toward its target, slides the walker around
//! obstacles and finally settles it against the terrain.
//!
//! Planar vectors are `DVec2` with `x` as world x and `y` as world z.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, DVec3};
use log::debug;
use serde::Serialize;

use crate::colliders::ProximityColliderSet;
use crate::config::MotionConfig;
use crate::constants::MOTION_EPSILON_SQ;
use crate::presentation::PresentationPose;
use crate::terrain::HeightField;
use crate::vector_math::{blend_toward, normalize_or_zero, planar_basis};

/// Keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each field mirrors exactly one held key."
)]
pub struct MoveIntent {
    /// Walk toward where the camera looks.
    pub forward: bool,
    /// Walk away from where the camera looks.
    pub back: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Jump if standing on the ground.
    pub jump: bool,
    /// Sprint while stamina lasts.
    pub sprint: bool,
}

impl MoveIntent {
    /// Unit planar direction requested by the directional keys at `yaw`.
    ///
    /// Opposing keys cancel; with nothing left the result is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec2;
    /// use thicket::motion::MoveIntent;
    ///
    /// let intent = MoveIntent { forward: true, back: true, ..Default::default() };
    /// assert_eq!(intent.direction(0.3), DVec2::ZERO);
    /// ```
    #[must_use]
    pub fn direction(self, yaw: f64) -> DVec2 {
        let (forward, right) = planar_basis(yaw);
        let mut direction = DVec2::ZERO;
        if self.forward {
            direction -= forward;
        }
        if self.back {
            direction += forward;
        }
        if self.right {
            direction += right;
        }
        if self.left {
            direction -= right;
        }
        normalize_or_zero(direction)
    }
}

/// Look orientation: yaw about the vertical axis, then pitch, no roll.
///
/// Pitch stays within `[-π/2, π/2]` through every constructor and mutator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Facing {
    yaw: f64,
    pitch: f64,
}

impl Facing {
    /// Creates a facing, clamping `pitch`.
    #[must_use]
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Rotation about the vertical axis, radians.
    #[must_use]
    pub const fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Elevation of the view, radians.
    #[must_use]
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Adds the given angles, clamping the resulting pitch.
    pub fn turn(&mut self, yaw_delta: f64, pitch_delta: f64) {
        self.yaw += yaw_delta;
        self.pitch = clamp_pitch(self.pitch + pitch_delta);
    }

    /// Applies raw mouse motion.
    ///
    /// Moving the mouse right decreases yaw; moving it down decreases pitch.
    pub fn apply_mouse_delta(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.turn(-dx * sensitivity, -dy * sensitivity);
    }
}

fn clamp_pitch(pitch: f64) -> f64 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Whether the walker is supported by the terrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Footing {
    /// Standing on the surface; height follows the terrain.
    #[default]
    Grounded,
    /// Jumping or falling under gravity.
    Airborne,
}

/// Kinematic state of one walker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorMotionState {
    /// Eye position; `y` is elevation.
    pub position: DVec3,
    /// Planar velocity.
    pub velocity: DVec2,
    /// Vertical speed while airborne.
    pub vertical_velocity: f64,
    /// Look orientation.
    pub facing: Facing,
    /// Ground contact.
    pub footing: Footing,
    /// Accumulated head-bob phase, radians.
    pub bob_phase: f64,
    stamina: f64,
}

impl ActorMotionState {
    /// True while standing on the terrain.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.footing == Footing::Grounded
    }

    /// Remaining stamina.
    #[must_use]
    pub const fn stamina(&self) -> f64 {
        self.stamina
    }

    /// Overwrites stamina, clamped to `[0, max_stamina]`.
    pub fn set_stamina(&mut self, stamina: f64, max_stamina: f64) {
        self.stamina = clamp_stamina(stamina, max_stamina);
    }

    /// Position projected onto the ground plane.
    #[must_use]
    pub const fn planar_position(&self) -> DVec2 {
        DVec2::new(self.position.x, self.position.z)
    }

    /// True when planar speed is above the noise floor.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.velocity.length_squared() > MOTION_EPSILON_SQ
    }
}

fn clamp_stamina(stamina: f64, max_stamina: f64) -> f64 {
    if stamina.is_nan() {
        return 0.0;
    }
    stamina.clamp(0.0, max_stamina.max(0.0))
}

/// What a single step produced for the presentation side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionFrame {
    /// Camera pose after the step.
    pub pose: PresentationPose,
    /// The sprint multiplier was applied this step.
    pub sprinted: bool,
    /// Planar speed was above the noise floor.
    pub moving: bool,
}

/// Stateless stepper holding the walker's tuning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionController {
    config: MotionConfig,
}

impl MotionController {
    /// Creates a controller with the given tuning.
    #[must_use]
    pub const fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    /// The tuning in use.
    #[must_use]
    pub const fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// A fresh walker at `position`: at rest, grounded, full stamina.
    #[must_use]
    pub fn spawn(&self, position: DVec3) -> ActorMotionState {
        ActorMotionState {
            position,
            velocity: DVec2::ZERO,
            vertical_velocity: 0.0,
            facing: Facing::default(),
            footing: Footing::Grounded,
            bob_phase: 0.0,
            stamina: clamp_stamina(self.config.max_stamina, self.config.max_stamina),
        }
    }

    /// Advances `state` by `delta` seconds.
    ///
    /// A zero, negative or non-finite `delta` leaves `state` untouched and
    /// only reports its current pose.
    pub fn step<H: HeightField + ?Sized>(
        &self,
        state: &mut ActorMotionState,
        intent: MoveIntent,
        delta: f64,
        colliders: &ProximityColliderSet,
        terrain: &H,
    ) -> MotionFrame {
        if !delta.is_finite() || delta <= 0.0 {
            return self.frame(state, false, state.is_moving());
        }

        let direction = intent.direction(state.facing.yaw());
        let has_input = direction != DVec2::ZERO;
        let sprinted = self.update_stamina(state, intent, has_input, delta);
        self.update_velocity(state, direction, sprinted, delta);

        let moving = state.is_moving();
        if moving {
            self.move_horizontally(state, delta, colliders);
            if state.is_grounded() {
                state.bob_phase += delta * self.config.bob_frequency;
            }
        }

        self.move_vertically(state, intent, delta, terrain);
        self.frame(state, sprinted, moving)
    }

    /// Spends stamina while sprinting and recovers it otherwise. Returns
    /// whether the sprint multiplier applies this step.
    fn update_stamina(
        &self,
        state: &mut ActorMotionState,
        intent: MoveIntent,
        has_input: bool,
        delta: f64,
    ) -> bool {
        let cfg = &self.config;
        let sprinting = intent.sprint && has_input && state.stamina > 0.0;
        if sprinting {
            state.stamina =
                clamp_stamina(state.stamina - cfg.stamina_drain_rate * delta, cfg.max_stamina);
        }
        // Holding sprint while exhausted neither drains nor refills.
        if !intent.sprint || !has_input {
            state.stamina =
                clamp_stamina(state.stamina + cfg.stamina_refill_rate * delta, cfg.max_stamina);
        }
        sprinting
    }

    fn update_velocity(
        &self,
        state: &mut ActorMotionState,
        direction: DVec2,
        sprinted: bool,
        delta: f64,
    ) {
        let cfg = &self.config;
        if direction == DVec2::ZERO {
            state.velocity *= (1.0 - cfg.velocity_damping_rate * delta).max(0.0);
            return;
        }
        let multiplier = if sprinted { cfg.sprint_multiplier } else { 1.0 };
        let target = direction * cfg.max_speed * multiplier;
        state.velocity = blend_toward(state.velocity, target, cfg.velocity_smoothing_rate * delta);
    }

    fn move_horizontally(
        &self,
        state: &mut ActorMotionState,
        delta: f64,
        colliders: &ProximityColliderSet,
    ) {
        let from = state.planar_position();
        let to = from + state.velocity * delta;
        let resolved = colliders.slide(from, to, self.config.player_radius);
        state.position.x = resolved.x;
        state.position.z = resolved.y;
    }

    fn move_vertically<H: HeightField + ?Sized>(
        &self,
        state: &mut ActorMotionState,
        intent: MoveIntent,
        delta: f64,
        terrain: &H,
    ) {
        let cfg = &self.config;
        let ground_y = terrain.height(state.position.x, state.position.z) + cfg.eye_height;

        if intent.jump && state.is_grounded() {
            state.vertical_velocity = cfg.jump_speed;
            state.footing = Footing::Airborne;
            debug!("jump at {}", state.position);
        }

        if !state.is_grounded() {
            state.vertical_velocity += cfg.gravity * delta;
            state.position.y += state.vertical_velocity * delta;
        }

        // The snap band only applies to a walker that is already grounded,
        // so small undulations do not flicker the footing.
        let gap = state.position.y - ground_y;
        let was_grounded = state.is_grounded();
        if state.position.y <= ground_y || (was_grounded && gap.abs() < cfg.ground_snap_threshold)
        {
            if !was_grounded {
                debug!("landed at {}", state.position);
            }
            state.position.y = ground_y;
            state.vertical_velocity = 0.0;
            state.footing = Footing::Grounded;
        } else if gap > cfg.ground_snap_threshold {
            if was_grounded {
                debug!("lost footing {gap:.3} above ground");
            }
            state.footing = Footing::Airborne;
        }
    }

    fn frame(&self, state: &ActorMotionState, sprinted: bool, moving: bool) -> MotionFrame {
        let bob_offset = if state.is_grounded() && moving {
            state.bob_phase.sin() * self.config.bob_amplitude
        } else {
            0.0
        };
        MotionFrame {
            pose: PresentationPose::new(state.position, state.facing, bob_offset),
            sprinted,
            moving,
        }
    }
}
