//! Height fields with obvious shapes for asserting footing behaviour.

use thicket::HeightField;

/// Level ground at a fixed elevation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatGround(pub f64);

impl HeightField for FlatGround {
    fn height(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }
}

/// A cliff edge: `high` for `z > edge_z`, `low` elsewhere.
///
/// # Examples
/// ```
/// use test_utils::Ledge;
/// use thicket::HeightField;
///
/// let ledge = Ledge { edge_z: 0.0, high: 3.0, low: 0.0 };
/// assert_eq!(ledge.height(0.0, 1.0), 3.0);
/// assert_eq!(ledge.height(0.0, -1.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ledge {
    /// `z` coordinate of the drop.
    pub edge_z: f64,
    /// Elevation on the far side of the edge.
    pub high: f64,
    /// Elevation on the near side.
    pub low: f64,
}

impl HeightField for Ledge {
    fn height(&self, _x: f64, z: f64) -> f64 {
        if z > self.edge_z {
            self.high
        } else {
            self.low
        }
    }
}
