//! Default tuning values for the walker, the forest scene and the host loop.
//!
//! These seed the `Default` impls in [`crate::config`]; a TOML file can
//! override any of them at start-up.

// Walker kinematics.

/// Walking speed in world units per second.
pub const PLAYER_SPEED: f64 = 2.5;
/// Speed factor applied while sprinting.
pub const SPRINT_MULTIPLIER: f64 = 2.0;
/// Initial upward speed of a jump.
pub const JUMP_SPEED: f64 = 8.0;
/// Vertical acceleration while airborne. Negative pulls down.
pub const GRAVITY: f64 = -25.0;
/// Blend rate toward the target velocity while movement keys are held.
pub const VELOCITY_SMOOTHING_RATE: f64 = 8.0;
/// Exponential decay rate of velocity once movement keys are released.
pub const VELOCITY_DAMPING_RATE: f64 = 6.0;
/// Radians of bob phase advanced per second of grounded motion.
pub const BOB_FREQUENCY: f64 = 10.0;
/// Peak vertical camera bob offset.
pub const BOB_AMPLITUDE: f64 = 0.05;
/// Capacity of the stamina meter.
pub const MAX_STAMINA: f64 = 100.0;
/// Stamina spent per second of sprinting.
pub const STAMINA_DRAIN_RATE: f64 = 25.0;
/// Stamina recovered per second while not sprinting.
pub const STAMINA_REFILL_RATE: f64 = 15.0;
/// Vertical band within which a grounded walker sticks to the terrain.
pub const GROUND_SNAP_THRESHOLD: f64 = 1.0;
/// Height of the eye above the terrain surface.
pub const EYE_HEIGHT: f64 = 1.0;
/// Radius of the walker's collision circle.
pub const PLAYER_RADIUS: f64 = 0.4;
/// Radians of look rotation per unit of mouse motion.
pub const MOUSE_SENSITIVITY: f64 = 0.002;
/// Squared planar speed below which the walker counts as standing still.
pub const MOTION_EPSILON_SQ: f64 = 1e-4;

// Forest scene.

/// Seed for the scene RNG.
pub const SCENE_SEED: u64 = 7;
/// Number of trees the builder tries to place.
pub const TREE_COUNT: usize = 500;
/// Trees are scattered over `[-TREE_SPREAD, TREE_SPREAD)` on both axes.
pub const TREE_SPREAD: f64 = 180.0;
/// Collision radius of a tree trunk.
pub const TREE_RADIUS: f64 = 1.5;
/// How far tree bases sink below the terrain surface.
pub const TREE_EMBED_DEPTH: f64 = 0.8;
/// Placement attempts allowed per requested tree.
pub const TREE_ATTEMPTS_PER_TREE: usize = 3;
/// Smallest tree scale.
pub const TREE_MIN_SCALE: f64 = 0.15;
/// Width of the random tree scale range.
pub const TREE_SCALE_JITTER: f64 = 0.1;
/// Forest density below which a spot is left as a clearing.
pub const CLEARING_THRESHOLD: f64 = -0.7;
/// Radius kept free of trees around the spawn point.
pub const SPAWN_CLEARANCE: f64 = 2.5;
/// Planar distance beyond which trees are hidden.
pub const CULL_DISTANCE: f64 = 80.0;
/// Edge length of the square terrain patch.
pub const TERRAIN_SIZE: f64 = 400.0;
/// Grid subdivisions along each terrain edge.
pub const TERRAIN_SEGMENTS: u32 = 200;
/// How far walker models sink below the terrain surface.
pub const WALKER_EMBED_DEPTH: f64 = 0.3;

// Host loop.

/// Longest frame step the host feeds into the controller.
pub const MAX_FRAME_STEP: f64 = 0.1;
/// Culling runs once every this many frames.
pub const CULL_INTERVAL: u32 = 3;
/// Stamina fraction at or below which the HUD bar turns to its warning tone.
pub const LOW_STAMINA_FRACTION: f64 = 0.3;

// Asset names.

/// Registry name of the tree model.
pub const TREE_MODEL: &str = "pine_tree";
/// Registry name of the walker model.
pub const WALKER_MODEL: &str = "zombie";
