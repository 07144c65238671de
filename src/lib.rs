#![cfg_attr(docsrs, feature(doc_cfg))]
//! First-person walker kinematics over rolling terrain.
//!
//! The core is [`MotionController::step`], which advances an
//! [`ActorMotionState`] by one frame against a [`HeightField`] and a
//! [`ProximityColliderSet`]. [`ThicketPlugin`] hosts it inside a Bevy app.
pub mod colliders;
pub mod config;
pub mod constants;
pub mod logging;
pub mod motion;
pub mod numeric;
pub mod plugin;
pub mod presentation;
pub mod scene;
pub mod terrain;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use colliders::{Collider, ColliderError, ProximityColliderSet};
pub use config::{ConfigError, ThicketConfig};
pub use logging::init as init_logging;
pub use motion::{ActorMotionState, Facing, Footing, MotionController, MotionFrame, MoveIntent};
pub use plugin::{Player, SimulationState, ThicketPlugin};
pub use presentation::{HudState, PresentationPose, StaminaTone};
pub use scene::{AssetRegistry, Scene, SceneBuilder, SceneError, StaticObstacle, Walker};
pub use terrain::{HeightField, RollingHills, TerrainMesh};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use thicket::prelude::*;
    //! ```

    pub use crate::config::MotionConfig;
    pub use crate::HeightField;
    pub use crate::MotionController;
    pub use crate::MoveIntent;
    pub use crate::ProximityColliderSet;
    pub use crate::RollingHills;
    pub use glam::{DVec2, DVec3};
}
