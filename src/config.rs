//! Tuning loaded from TOML.
//!
//! Every section falls back to the values in [`crate::constants`], so an
//! empty file is a valid configuration:
//!
//! ```
//! use thicket::config::{SceneConfig, ThicketConfig};
//!
//! let config = ThicketConfig::from_toml_str("[motion]\nmax_speed = 4.0\n").unwrap();
//! assert_eq!(config.motion.max_speed, 4.0);
//! assert_eq!(config.scene, SceneConfig::default());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BOB_AMPLITUDE, BOB_FREQUENCY, CLEARING_THRESHOLD, CULL_DISTANCE, CULL_INTERVAL, EYE_HEIGHT,
    GRAVITY, GROUND_SNAP_THRESHOLD, JUMP_SPEED, MAX_FRAME_STEP, MAX_STAMINA, MOUSE_SENSITIVITY,
    PLAYER_RADIUS, PLAYER_SPEED, SCENE_SEED, SPAWN_CLEARANCE, SPRINT_MULTIPLIER,
    STAMINA_DRAIN_RATE, STAMINA_REFILL_RATE, TERRAIN_SEGMENTS, TERRAIN_SIZE, TREE_COUNT,
    TREE_EMBED_DEPTH, TREE_RADIUS, TREE_SPREAD, VELOCITY_DAMPING_RATE, VELOCITY_SMOOTHING_RATE,
    WALKER_EMBED_DEPTH,
};

/// Failure to obtain a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is outside its allowed range.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What the field must satisfy.
        reason: &'static str,
    },
}

/// Per-walker kinematic constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Walking speed in units per second.
    pub max_speed: f64,
    /// Speed factor while sprinting.
    pub sprint_multiplier: f64,
    /// Upward speed at the start of a jump.
    pub jump_speed: f64,
    /// Vertical acceleration while airborne; must be negative.
    pub gravity: f64,
    /// Blend rate toward the target velocity while keys are held.
    pub velocity_smoothing_rate: f64,
    /// Decay rate of velocity once keys are released.
    pub velocity_damping_rate: f64,
    /// Bob phase advance per second of grounded motion.
    pub bob_frequency: f64,
    /// Peak camera bob offset.
    pub bob_amplitude: f64,
    /// Stamina capacity.
    pub max_stamina: f64,
    /// Stamina spent per second of sprinting.
    pub stamina_drain_rate: f64,
    /// Stamina regained per second otherwise.
    pub stamina_refill_rate: f64,
    /// Band within which a grounded walker sticks to the terrain.
    pub ground_snap_threshold: f64,
    /// Eye height above the terrain surface.
    pub eye_height: f64,
    /// Radius of the walker's collision circle.
    pub player_radius: f64,
    /// Look radians per unit of mouse motion.
    pub mouse_sensitivity: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: PLAYER_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            velocity_smoothing_rate: VELOCITY_SMOOTHING_RATE,
            velocity_damping_rate: VELOCITY_DAMPING_RATE,
            bob_frequency: BOB_FREQUENCY,
            bob_amplitude: BOB_AMPLITUDE,
            max_stamina: MAX_STAMINA,
            stamina_drain_rate: STAMINA_DRAIN_RATE,
            stamina_refill_rate: STAMINA_REFILL_RATE,
            ground_snap_threshold: GROUND_SNAP_THRESHOLD,
            eye_height: EYE_HEIGHT,
            player_radius: PLAYER_RADIUS,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }
}

impl MotionConfig {
    /// Checks the ranges the controller relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("motion.max_speed", self.max_speed),
            ("motion.jump_speed", self.jump_speed),
            ("motion.velocity_smoothing_rate", self.velocity_smoothing_rate),
            ("motion.velocity_damping_rate", self.velocity_damping_rate),
            ("motion.bob_frequency", self.bob_frequency),
            ("motion.bob_amplitude", self.bob_amplitude),
            ("motion.stamina_drain_rate", self.stamina_drain_rate),
            ("motion.stamina_refill_rate", self.stamina_refill_rate),
            ("motion.ground_snap_threshold", self.ground_snap_threshold),
            ("motion.player_radius", self.player_radius),
            ("motion.mouse_sensitivity", self.mouse_sensitivity),
        ];
        for (field, value) in non_negative {
            ensure(value.is_finite() && value >= 0.0, field, "must be finite and >= 0")?;
        }
        ensure(
            self.sprint_multiplier.is_finite() && self.sprint_multiplier >= 1.0,
            "motion.sprint_multiplier",
            "must be finite and >= 1",
        )?;
        ensure(
            self.gravity.is_finite() && self.gravity < 0.0,
            "motion.gravity",
            "must be finite and negative",
        )?;
        ensure(
            self.max_stamina.is_finite() && self.max_stamina > 0.0,
            "motion.max_stamina",
            "must be finite and positive",
        )?;
        ensure(self.eye_height.is_finite(), "motion.eye_height", "must be finite")
    }
}

/// Forest layout and terrain sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Seed for tree placement.
    pub seed: u64,
    /// Trees requested.
    pub tree_count: usize,
    /// Half-width of the square trees are scattered over.
    pub tree_spread: f64,
    /// Trunk collision radius.
    pub tree_radius: f64,
    /// Depth tree bases sink below the surface.
    pub tree_embed_depth: f64,
    /// Forest density below which a spot stays clear.
    pub clearing_threshold: f64,
    /// Radius kept free of trees around the spawn point. Must be at least
    /// `motion.player_radius` so the player never spawns inside a trunk.
    pub spawn_clearance: f64,
    /// Planar distance beyond which trees are hidden.
    pub cull_distance: f64,
    /// Edge length of the terrain patch.
    pub terrain_size: f64,
    /// Subdivisions along each terrain edge.
    pub terrain_segments: u32,
    /// Depth walker models sink below the surface.
    pub walker_embed_depth: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: SCENE_SEED,
            tree_count: TREE_COUNT,
            tree_spread: TREE_SPREAD,
            tree_radius: TREE_RADIUS,
            tree_embed_depth: TREE_EMBED_DEPTH,
            clearing_threshold: CLEARING_THRESHOLD,
            spawn_clearance: SPAWN_CLEARANCE,
            cull_distance: CULL_DISTANCE,
            terrain_size: TERRAIN_SIZE,
            terrain_segments: TERRAIN_SEGMENTS,
            walker_embed_depth: WALKER_EMBED_DEPTH,
        }
    }
}

impl SceneConfig {
    /// Checks placement ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.tree_spread.is_finite() && self.tree_spread > 0.0,
            "scene.tree_spread",
            "must be finite and positive",
        )?;
        ensure(
            self.tree_radius.is_finite() && self.tree_radius >= 0.0,
            "scene.tree_radius",
            "must be finite and >= 0",
        )?;
        ensure(
            self.spawn_clearance.is_finite() && self.spawn_clearance >= 0.0,
            "scene.spawn_clearance",
            "must be finite and >= 0",
        )?;
        ensure(
            self.cull_distance.is_finite() && self.cull_distance > 0.0,
            "scene.cull_distance",
            "must be finite and positive",
        )?;
        ensure(
            self.terrain_size.is_finite() && self.terrain_size > 0.0,
            "scene.terrain_size",
            "must be finite and positive",
        )?;
        ensure(
            self.terrain_segments > 0,
            "scene.terrain_segments",
            "must be at least 1",
        )
    }
}

/// Frame-loop guards applied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Longest frame step fed to the controller, in seconds.
    pub max_frame_step: f64,
    /// Frames between culling passes.
    pub cull_interval: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_frame_step: MAX_FRAME_STEP,
            cull_interval: CULL_INTERVAL,
        }
    }
}

impl HostConfig {
    /// Checks the frame guards.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.max_frame_step.is_finite() && self.max_frame_step > 0.0,
            "host.max_frame_step",
            "must be finite and positive",
        )?;
        ensure(self.cull_interval > 0, "host.cull_interval", "must be at least 1")
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThicketConfig {
    /// Walker kinematics.
    pub motion: MotionConfig,
    /// Forest and terrain.
    pub scene: SceneConfig,
    /// Host loop guards.
    pub host: HostConfig,
}

impl ThicketConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion.validate()?;
        self.scene.validate()?;
        self.host.validate()?;
        ensure(
            self.scene.spawn_clearance >= self.motion.player_radius,
            "scene.spawn_clearance",
            "must be >= motion.player_radius",
        )
    }
}

fn ensure(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}
