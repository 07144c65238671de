//! Forest scene assembly.
//!
//! Trees are scattered with a seeded RNG, skipping natural clearings and a
//! circle around the spawn point wide enough for the player's collider,
//! and each one contributes a
//! circular collider. Model handles come from an explicit
//! [`AssetRegistry`] so independent scenes (and tests) never share hidden
//! state.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};
use hashbrown::HashMap;
use log::{debug, info, warn};
use rand::Rng;
use thiserror::Error;

use crate::colliders::{Collider, ColliderError, ProximityColliderSet};
use crate::config::SceneConfig;
use crate::constants::{
    TREE_ATTEMPTS_PER_TREE, TREE_MIN_SCALE, TREE_MODEL, TREE_SCALE_JITTER, WALKER_MODEL,
};
use crate::terrain::{HeightField, TerrainMesh};

/// Opaque reference to a loaded model owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(u32);

impl RenderHandle {
    /// Raw handle value.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Name-to-handle table for models the renderer has finished loading.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    models: HashMap<String, RenderHandle>,
    next: u32,
}

impl AssetRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as loaded and returns its handle.
    ///
    /// Registering a name twice returns the first handle.
    pub fn register(&mut self, name: &str) -> RenderHandle {
        if let Some(handle) = self.models.get(name) {
            return *handle;
        }
        let handle = RenderHandle(self.next);
        self.next += 1;
        self.models.insert(name.to_owned(), handle);
        debug!("registered model {name} as {}", handle.id());
        handle
    }

    /// Handle for `name`, if it has been registered.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<RenderHandle> {
        self.models.get(name).copied()
    }

    /// Number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Failure while assembling a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A required model was never registered.
    #[error("model `{0}` is not registered")]
    MissingModel(&'static str),
    /// A collider could not be built from the configured radius.
    #[error(transparent)]
    Collider(#[from] ColliderError),
}

/// A placed, immovable obstacle such as a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticObstacle {
    /// Base of the model in world space.
    pub position: DVec3,
    /// Collision radius on the ground plane.
    pub radius: f64,
    /// Model drawn for this obstacle.
    pub render_handle: RenderHandle,
    /// Rotation about the vertical axis, radians.
    pub yaw: f64,
    /// Uniform model scale.
    pub scale: f64,
    /// Whether the renderer should draw it this frame.
    pub visible: bool,
}

/// An animated character standing on the terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    /// Base of the model in world space.
    pub position: DVec3,
    /// Model drawn for this walker.
    pub render_handle: RenderHandle,
    /// Animation clip to loop.
    pub animation: String,
    /// Seconds the clip has been playing.
    pub animation_time: f64,
}

impl Walker {
    /// Advances the looping clip by `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        if delta.is_finite() && delta > 0.0 {
            self.animation_time += delta;
        }
    }
}

/// Layered noise deciding where the forest thins out.
///
/// Values below [`SceneConfig::clearing_threshold`] are left empty.
#[must_use]
pub fn forest_density(x: f64, z: f64) -> f64 {
    (x * 0.03).sin() * (z * 0.03).cos() + (x * 0.08).sin() * (z * 0.06).cos() * 0.5
}

/// A fully assembled scene.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Placed trees.
    pub obstacles: Vec<StaticObstacle>,
    /// One collider per tree.
    pub colliders: ProximityColliderSet,
    /// Render mesh sampled from the same height field as the colliders.
    pub terrain: TerrainMesh,
}

impl Scene {
    /// Updates obstacle visibility around `viewer`; see [`update_culling`].
    pub fn cull_around(&mut self, viewer: DVec3, cull_distance: f64) -> usize {
        update_culling(&mut self.obstacles, viewer, cull_distance)
    }
}

/// Builds forest scenes from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SceneBuilder<'a, H: HeightField + ?Sized> {
    config: &'a SceneConfig,
    field: &'a H,
    spawn: DVec2,
}

impl<'a, H: HeightField + ?Sized> SceneBuilder<'a, H> {
    /// A builder placing objects on `field`, keeping the origin clear.
    #[must_use]
    pub const fn new(config: &'a SceneConfig, field: &'a H) -> Self {
        Self {
            config,
            field,
            spawn: DVec2::ZERO,
        }
    }

    /// Keeps the area around `spawn` (planar `x`, `z`) free of trees.
    ///
    /// No trunk comes within `spawn_clearance` of the point, so a player
    /// whose collider radius fits inside that circle never starts embedded
    /// in a tree. [`ThicketConfig::validate`](crate::config::ThicketConfig::validate)
    /// enforces that fit.
    #[must_use]
    pub const fn with_spawn(mut self, spawn: DVec2) -> Self {
        self.spawn = spawn;
        self
    }

    /// Places trees and samples the terrain mesh.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingModel`] when the tree model has not been
    /// registered, or [`SceneError::Collider`] for an invalid tree radius.
    pub fn build<R: Rng + ?Sized>(
        &self,
        registry: &AssetRegistry,
        rng: &mut R,
    ) -> Result<Scene, SceneError> {
        let handle = registry
            .handle(TREE_MODEL)
            .ok_or(SceneError::MissingModel(TREE_MODEL))?;
        let cfg = self.config;
        let max_attempts = cfg.tree_count.saturating_mul(TREE_ATTEMPTS_PER_TREE);
        let clearance = cfg.spawn_clearance + cfg.tree_radius;

        let mut obstacles = Vec::with_capacity(cfg.tree_count);
        let mut colliders = ProximityColliderSet::new();
        let mut attempts = 0;
        while obstacles.len() < cfg.tree_count && attempts < max_attempts {
            attempts += 1;
            let x = (rng.gen::<f64>() - 0.5) * cfg.tree_spread * 2.0;
            let z = (rng.gen::<f64>() - 0.5) * cfg.tree_spread * 2.0;

            if forest_density(x, z) < cfg.clearing_threshold {
                continue;
            }
            if DVec2::new(x, z).distance_squared(self.spawn) < clearance * clearance {
                continue;
            }

            colliders.push(Collider::new(x, z, cfg.tree_radius)?);
            obstacles.push(StaticObstacle {
                position: DVec3::new(x, self.field.height(x, z) - cfg.tree_embed_depth, z),
                radius: cfg.tree_radius,
                render_handle: handle,
                yaw: rng.gen::<f64>() * TAU,
                scale: rng.gen::<f64>().mul_add(TREE_SCALE_JITTER, TREE_MIN_SCALE),
                visible: true,
            });
        }

        info!(
            "placed {} of {} trees in {attempts} attempts",
            obstacles.len(),
            cfg.tree_count
        );

        Ok(Scene {
            obstacles,
            colliders,
            terrain: TerrainMesh::generate(cfg.terrain_size, cfg.terrain_segments, self.field),
        })
    }

    /// Stands a walker on the terrain at `(x, z)` playing `animation`.
    ///
    /// Returns `None` when the walker model has not been registered yet.
    #[must_use]
    pub fn place_walker(
        &self,
        registry: &AssetRegistry,
        x: f64,
        z: f64,
        animation: &str,
    ) -> Option<Walker> {
        let Some(render_handle) = registry.handle(WALKER_MODEL) else {
            warn!("walker spawn requested before model `{WALKER_MODEL}` was registered");
            return None;
        };
        let y = self.field.height(x, z) - self.config.walker_embed_depth;
        Some(Walker {
            position: DVec3::new(x, y, z),
            render_handle,
            animation: animation.to_owned(),
            animation_time: 0.0,
        })
    }
}

/// Marks obstacles visible iff their planar distance to `viewer` is below
/// `cull_distance`. Returns how many remain visible.
pub fn update_culling(obstacles: &mut [StaticObstacle], viewer: DVec3, cull_distance: f64) -> usize {
    let limit = cull_distance * cull_distance;
    let mut visible = 0;
    for obstacle in obstacles.iter_mut() {
        let dx = viewer.x - obstacle.position.x;
        let dz = viewer.z - obstacle.position.z;
        obstacle.visible = dx.mul_add(dx, dz * dz) < limit;
        visible += usize::from(obstacle.visible);
    }
    visible
}
