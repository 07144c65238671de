//! Circular obstacle set and the sliding move resolver built on it.

use glam::DVec2;
use log::trace;
use thiserror::Error;

/// Rejected collider construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ColliderError {
    /// Radius was negative, NaN or infinite.
    #[error("collider radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
}

/// A vertical cylinder of infinite height, seen from above as a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    x: f64,
    z: f64,
    radius: f64,
}

impl Collider {
    /// Creates a collider centred on `(x, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`ColliderError::InvalidRadius`] when `radius` is negative or
    /// not finite.
    pub fn new(x: f64, z: f64, radius: f64) -> Result<Self, ColliderError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ColliderError::InvalidRadius(radius));
        }
        Ok(Self { x, z, radius })
    }

    /// Centre x.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Centre z.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Radius, always `>= 0`.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// True when a circle of `query_radius` at `(x, z)` overlaps this one.
    ///
    /// Touching circles do not overlap.
    #[must_use]
    pub fn overlaps(&self, x: f64, z: f64, query_radius: f64) -> bool {
        let dx = x - self.x;
        let dz = z - self.z;
        let reach = query_radius + self.radius;
        dx.mul_add(dx, dz * dz) < reach * reach
    }
}

/// Static obstacles tested by linear scan.
///
/// Built once while the scene is assembled and only read afterwards. A few
/// hundred entries are cheap to scan every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityColliderSet {
    colliders: Vec<Collider>,
}

impl ProximityColliderSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colliders: Vec::new(),
        }
    }

    /// Appends a collider.
    pub fn push(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    /// Validates and appends a collider.
    ///
    /// # Errors
    ///
    /// Propagates [`ColliderError`] from [`Collider::new`].
    pub fn insert(&mut self, x: f64, z: f64, radius: f64) -> Result<(), ColliderError> {
        self.push(Collider::new(x, z, radius)?);
        Ok(())
    }

    /// Number of colliders.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True when no colliders are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Colliders in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }

    /// True when any collider overlaps a circle of `query_radius` at `(x, z)`.
    #[must_use]
    pub fn intersects(&self, x: f64, z: f64, query_radius: f64) -> bool {
        self.colliders
            .iter()
            .any(|c| c.overlaps(x, z, query_radius))
    }

    /// Resolves a planar move from `from` toward `to` for a circle of
    /// `radius`.
    ///
    /// Vectors are `(x, z)`. The full move is taken when clear. Otherwise
    /// the x component alone is tried, then the z component alone, so the
    /// mover slides along obstacle edges. When every option is blocked the
    /// mover stays at `from`.
    #[must_use]
    pub fn slide(&self, from: DVec2, to: DVec2, radius: f64) -> DVec2 {
        if !self.intersects(to.x, to.y, radius) {
            return to;
        }
        if !self.intersects(to.x, from.y, radius) {
            trace!("move blocked, sliding along x");
            return DVec2::new(to.x, from.y);
        }
        if !self.intersects(from.x, to.y, radius) {
            trace!("move blocked, sliding along z");
            return DVec2::new(from.x, to.y);
        }
        trace!("move blocked on both axes at {from}");
        from
    }
}

impl FromIterator<Collider> for ProximityColliderSet {
    fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
        Self {
            colliders: iter.into_iter().collect(),
        }
    }
}

impl Extend<Collider> for ProximityColliderSet {
    fn extend<I: IntoIterator<Item = Collider>>(&mut self, iter: I) {
        self.colliders.extend(iter);
    }
}
