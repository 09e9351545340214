use glam::{I64Vec3, IVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Grid;

/// Axis-aligned integer box in units of some `Grid`.
///
/// The box does not know its grid; callers track which grid the corners are
/// expressed in. A box is valid when `max > min` on every axis. Degenerate
/// (point, line, plane) and inverted boxes are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl TileBox {
    pub fn new(min_x: i32, min_y: i32, min_z: i32, max_x: i32, max_y: i32, max_z: i32) -> Self {
        Self {
            min: IVec3::new(min_x, min_y, min_z),
            max: IVec3::new(max_x, max_y, max_z),
        }
    }

    pub fn from_corners(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// Build from `[minX, minY, minZ, maxX, maxY, maxZ]`.
    pub fn from_array(c: [i32; 6]) -> Self {
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5])
    }

    pub fn to_array(&self) -> [i32; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }

    /// Per-axis extent (`max - min`), widened so extreme corners cannot
    /// overflow. Negative on inverted axes.
    pub fn size(&self) -> I64Vec3 {
        self.max.as_i64vec3() - self.min.as_i64vec3()
    }

    /// Product of the three extents, saturating at the i64 bounds. Only
    /// meaningful when `is_valid()`.
    pub fn volume(&self) -> i64 {
        let size = self.size();
        size.x.saturating_mul(size.y).saturating_mul(size.z)
    }

    pub fn is_valid(&self) -> bool {
        self.max.cmpgt(self.min).all()
    }

    /// Strict overlap test. Boxes that only share a face, edge or corner do
    /// not intersect.
    pub fn intersects(&self, other: &TileBox) -> bool {
        self.max.cmpgt(other.min).all() && self.min.cmplt(other.max).all()
    }

    /// Whether `other` lies entirely inside this box (bounds inclusive).
    pub fn contains(&self, other: &TileBox) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Grow in place to the smallest box enclosing both.
    pub fn union(&mut self, other: &TileBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Overlapping region, or `None` if the boxes do not strictly overlap.
    pub fn intersection(&self, other: &TileBox) -> Option<TileBox> {
        let region = TileBox {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        };
        region.is_valid().then_some(region)
    }

    /// Convert all six coordinates from grid `from` to grid `to`.
    /// `None` when growing pushes a coordinate out of the i32 range.
    pub fn rescale(&self, from: Grid, to: Grid) -> Option<TileBox> {
        let mut c = [0; 6];
        for (out, v) in c.iter_mut().zip(self.to_array()) {
            *out = from.checked_rescale(v, to)?;
        }
        Some(TileBox::from_array(c))
    }
}

impl fmt::Display for TileBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Box[{},{},{} -> {},{},{}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}
