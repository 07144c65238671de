//! Closed-form terrain elevation and the mesh sampled from it.
//!
//! Every consumer of elevation (the walker's ground test, tree and walker
//! placement, the render mesh) goes through a [`HeightField`], so the visible
//! surface and the collision surface never drift apart.

use glam::DVec3;

/// Elevation lookup over the horizontal plane.
///
/// Implementations must be pure: the same `(x, z)` always yields the same
/// height.
pub trait HeightField {
    /// Elevation of the surface at planar coordinates `(x, z)`.
    fn height(&self, x: f64, z: f64) -> f64;
}

impl<H: HeightField + ?Sized> HeightField for &H {
    fn height(&self, x: f64, z: f64) -> f64 {
        (**self).height(x, z)
    }
}

/// A single `sin(x * fx) * cos(z * fz) * amplitude` layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    /// Angular frequency along x.
    pub x_frequency: f64,
    /// Angular frequency along z.
    pub z_frequency: f64,
    /// Peak contribution of the layer.
    pub amplitude: f64,
}

impl Octave {
    /// Creates an octave from its two frequencies and amplitude.
    #[must_use]
    pub const fn new(x_frequency: f64, z_frequency: f64, amplitude: f64) -> Self {
        Self {
            x_frequency,
            z_frequency,
            amplitude,
        }
    }

    /// Evaluates this layer at `(x, z)`.
    #[must_use]
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        (x * self.x_frequency).sin() * (z * self.z_frequency).cos() * self.amplitude
    }
}

/// Layers summed by [`RollingHills::default`].
pub const DEFAULT_OCTAVES: [Octave; 3] = [
    Octave::new(0.1, 0.1, 2.0),
    Octave::new(0.05, 0.08, 3.0),
    Octave::new(0.02, 0.03, 5.0),
];

/// Gently rolling ground built from three sinusoidal octaves.
///
/// # Examples
///
/// ```
/// use thicket::terrain::{HeightField, RollingHills};
///
/// let hills = RollingHills::default();
/// assert_eq!(hills.height(0.0, 0.0), 0.0);
/// assert!(hills.height(12.0, -3.0).abs() <= hills.amplitude_bound());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingHills {
    octaves: [Octave; 3],
}

impl Default for RollingHills {
    fn default() -> Self {
        Self::new(DEFAULT_OCTAVES)
    }
}

impl RollingHills {
    /// Builds a field from explicit octaves.
    #[must_use]
    pub const fn new(octaves: [Octave; 3]) -> Self {
        Self { octaves }
    }

    /// The layers making up this field.
    #[must_use]
    pub const fn octaves(&self) -> &[Octave; 3] {
        &self.octaves
    }

    /// Upper bound on `|height|` anywhere on the plane.
    #[must_use]
    pub fn amplitude_bound(&self) -> f64 {
        self.octaves.iter().map(|o| o.amplitude.abs()).sum()
    }
}

impl HeightField for RollingHills {
    fn height(&self, x: f64, z: f64) -> f64 {
        self.octaves.iter().map(|o| o.sample(x, z)).sum()
    }
}

/// Square grid of terrain vertices sampled from a [`HeightField`].
///
/// Vertices are stored row by row along x, rows advancing along z, covering
/// `[-size / 2, size / 2]` on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    size: f64,
    segments: u32,
    vertices: Vec<DVec3>,
}

impl TerrainMesh {
    /// Samples `field` on a `(segments + 1)²` grid spanning `size` units.
    ///
    /// A zero `segments` count is treated as one so the mesh always has at
    /// least a single quad.
    #[must_use]
    pub fn generate<H: HeightField + ?Sized>(size: f64, segments: u32, field: &H) -> Self {
        let cells = segments.max(1);
        let half = size * 0.5;
        let step = size / f64::from(cells);
        let vertices = (0..=cells)
            .flat_map(|row| {
                let z = f64::from(row).mul_add(step, -half);
                (0..=cells).map(move |col| {
                    let x = f64::from(col).mul_add(step, -half);
                    (x, z)
                })
            })
            .map(|(x, z)| DVec3::new(x, field.height(x, z), z))
            .collect();
        Self {
            size,
            segments: cells,
            vertices,
        }
    }

    /// Edge length of the patch.
    #[must_use]
    pub const fn size(&self) -> f64 {
        self.size
    }

    /// Subdivisions per edge.
    #[must_use]
    pub const fn segments(&self) -> u32 {
        self.segments
    }

    /// All vertices in row-major order.
    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Vertex at grid column `col` and row `row`, if inside the grid.
    #[must_use]
    pub fn vertex(&self, col: u32, row: u32) -> Option<DVec3> {
        if col > self.segments || row > self.segments {
            return None;
        }
        let stride = self.segments as usize + 1;
        self.vertices
            .get(row as usize * stride + col as usize)
            .copied()
    }

    /// Two counter-clockwise triangles per grid cell, as vertex indices.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        let stride = self.segments + 1;
        let mut indices = Vec::with_capacity(self.segments as usize * self.segments as usize * 6);
        for row in 0..self.segments {
            for col in 0..self.segments {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::origin(0.0, 0.0)]
    #[case::positive(15.0, 40.0)]
    #[case::negative(-120.5, -7.25)]
    fn height_matches_octave_sum(#[case] x: f64, #[case] z: f64) {
        let expected = (x * 0.1).sin() * (z * 0.1).cos() * 2.0
            + (x * 0.05).sin() * (z * 0.08).cos() * 3.0
            + (x * 0.02).sin() * (z * 0.03).cos() * 5.0;
        assert_relative_eq!(RollingHills::default().height(x, z), expected, epsilon = 1e-12);
    }

    #[test]
    fn amplitude_bound_sums_layers() {
        assert_relative_eq!(RollingHills::default().amplitude_bound(), 10.0);
    }

    #[test]
    fn mesh_vertices_follow_field() {
        let hills = RollingHills::default();
        let mesh = TerrainMesh::generate(40.0, 8, &hills);
        assert_eq!(mesh.vertices().len(), 81);
        for v in mesh.vertices() {
            assert_eq!(v.y, hills.height(v.x, v.z));
        }
    }

    #[test]
    fn mesh_corners_span_patch() {
        let mesh = TerrainMesh::generate(10.0, 4, &RollingHills::default());
        let first = mesh.vertex(0, 0).map(|v| (v.x, v.z));
        let last = mesh.vertex(4, 4).map(|v| (v.x, v.z));
        assert_eq!(first, Some((-5.0, -5.0)));
        assert_eq!(last, Some((5.0, 5.0)));
        assert!(mesh.vertex(5, 0).is_none());
    }

    #[test]
    fn zero_segments_builds_a_single_quad() {
        let mesh = TerrainMesh::generate(10.0, 0, &RollingHills::default());
        assert_eq!(mesh.segments(), 1);
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.triangle_indices(), vec![0, 2, 1, 1, 2, 3]);
        assert_eq!(mesh.vertex(1, 1).map(|v| (v.x, v.z)), Some((5.0, 5.0)));
    }

    #[test]
    fn triangle_indices_cover_every_cell() {
        let mesh = TerrainMesh::generate(10.0, 3, &RollingHills::default());
        let indices = mesh.triangle_indices();
        assert_eq!(indices.len(), 3 * 3 * 6);
        let max = indices.iter().copied().max().unwrap_or_default();
        assert_eq!(max as usize, mesh.vertices().len() - 1);
    }
}
