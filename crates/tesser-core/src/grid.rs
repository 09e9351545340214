use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::constants::DEFAULT_GRID_RESOLUTION;
use crate::error::CoreError;

/// Power-of-two subdivision of a unit cube.
///
/// A block is split into `resolution` steps per axis. All conversions between
/// grids are bit shifts, so rescaling between power-of-two resolutions never
/// goes through floating point.
///
/// Serialized as the bare resolution integer; deserializing a value that is
/// not a positive power of two fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Grid {
    resolution: i32,
    /// log2(resolution)
    shift: u32,
}

impl Grid {
    pub const GRID_1: Grid = Grid::from_shift(0);
    pub const GRID_2: Grid = Grid::from_shift(1);
    pub const GRID_4: Grid = Grid::from_shift(2);
    pub const GRID_8: Grid = Grid::from_shift(3);
    pub const GRID_16: Grid = Grid::from_shift(4);
    pub const GRID_32: Grid = Grid::from_shift(5);
    pub const GRID_64: Grid = Grid::from_shift(6);
    pub const GRID_128: Grid = Grid::from_shift(7);
    pub const GRID_256: Grid = Grid::from_shift(8);
    pub const GRID_512: Grid = Grid::from_shift(9);
    pub const GRID_1024: Grid = Grid::from_shift(10);
    pub const GRID_2048: Grid = Grid::from_shift(11);
    pub const GRID_4096: Grid = Grid::from_shift(12);

    /// Canonical resolutions, smallest first.
    pub const CANONICAL: [Grid; 13] = [
        Self::GRID_1,
        Self::GRID_2,
        Self::GRID_4,
        Self::GRID_8,
        Self::GRID_16,
        Self::GRID_32,
        Self::GRID_64,
        Self::GRID_128,
        Self::GRID_256,
        Self::GRID_512,
        Self::GRID_1024,
        Self::GRID_2048,
        Self::GRID_4096,
    ];

    const fn from_shift(shift: u32) -> Self {
        Self {
            resolution: 1 << shift,
            shift,
        }
    }

    /// Create a grid with the given resolution.
    /// Fails unless `resolution` is a positive power of two.
    pub fn new(resolution: i32) -> Result<Self, CoreError> {
        if resolution <= 0 || resolution & (resolution - 1) != 0 {
            return Err(CoreError::InvalidResolution(resolution));
        }
        Ok(Self::from_shift(resolution.trailing_zeros()))
    }

    pub fn resolution(&self) -> i32 {
        self.resolution
    }

    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// Size of one grid step in block units.
    pub fn pixel_size(&self) -> f64 {
        1.0 / self.resolution as f64
    }

    /// Number of grid cells in one full block (resolution³). Saturates at
    /// `i64::MAX` for resolutions above 2^21.
    pub fn cube_volume(&self) -> i64 {
        let r = self.resolution as i64;
        r.saturating_mul(r).saturating_mul(r)
    }

    /// Whether this grid is one of the `CANONICAL` constants.
    pub fn is_canonical(&self) -> bool {
        Self::CANONICAL.contains(self)
    }

    /// Fractional world position to the grid cell containing it.
    pub fn world_to_grid(&self, pos: f64) -> i32 {
        (pos * self.resolution as f64).floor() as i32
    }

    /// Grid coordinate back to a world position.
    pub fn grid_to_world(&self, grid: i32) -> f64 {
        grid as f64 / self.resolution as f64
    }

    /// Block containing a grid coordinate. Floors for negative values.
    pub fn block_index(&self, grid: i32) -> i32 {
        grid >> self.shift
    }

    /// Position of a grid coordinate inside its block, in `[0, resolution)`.
    pub fn offset_within_block(&self, grid: i32) -> i32 {
        grid & (self.resolution - 1)
    }

    /// Convert a coordinate from this grid into `target`.
    ///
    /// Growing is exact while the result fits in i32 and saturates beyond it.
    /// Shrinking drops the low bits, rounding toward negative infinity.
    pub fn rescale(&self, value: i32, target: Grid) -> i32 {
        self.checked_rescale(value, target)
            .unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
    }

    /// Like `rescale`, but `None` when growing would leave the i32 range.
    pub fn checked_rescale(&self, value: i32, target: Grid) -> Option<i32> {
        match self.shift.cmp(&target.shift) {
            Ordering::Equal => Some(value),
            Ordering::Greater => Some(value >> (self.shift - target.shift)),
            // shifts are at most 30, so the factor fits
            Ordering::Less => value.checked_mul(1 << (target.shift - self.shift)),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_shift(DEFAULT_GRID_RESOLUTION.trailing_zeros())
    }
}

impl TryFrom<i32> for Grid {
    type Error = CoreError;

    fn try_from(resolution: i32) -> Result<Self, Self::Error> {
        Self::new(resolution)
    }
}

impl From<Grid> for i32 {
    fn from(grid: Grid) -> Self {
        grid.resolution
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid[{}]", self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_powers_of_two() {
        for shift in 0..31 {
            let grid = Grid::new(1 << shift).expect("power of two should be accepted");
            assert_eq!(grid.shift(), shift);
            assert_eq!(grid.resolution(), 1 << shift);
        }
    }

    #[test]
    fn test_new_rejects_invalid_resolutions() {
        for bad in [0, -1, -16, 3, 12, 15, 17, 100] {
            assert_eq!(Grid::new(bad), Err(CoreError::InvalidResolution(bad)));
        }
    }

    #[test]
    fn test_canonical_constants() {
        assert_eq!(Grid::GRID_16, Grid::new(16).expect("valid"));
        assert_eq!(Grid::GRID_4096.resolution(), 4096);
        assert!(Grid::GRID_64.is_canonical());
        assert!(!Grid::new(8192).expect("valid").is_canonical());
        assert_eq!(Grid::default(), Grid::GRID_16);
    }

    #[test]
    fn test_world_grid_conversion() {
        let grid = Grid::GRID_16;
        assert_eq!(grid.world_to_grid(0.5), 8);
        assert_eq!(grid.world_to_grid(1.0), 16);
        assert_eq!(grid.world_to_grid(-0.01), -1);
        assert_eq!(grid.grid_to_world(8), 0.5);
        assert_eq!(grid.grid_to_world(-16), -1.0);
        assert_eq!(grid.pixel_size(), 0.0625);
    }

    #[test]
    fn test_block_index_floors_negative() {
        let grid = Grid::GRID_16;
        assert_eq!(grid.block_index(0), 0);
        assert_eq!(grid.block_index(15), 0);
        assert_eq!(grid.block_index(16), 1);
        assert_eq!(grid.block_index(-1), -1);
        assert_eq!(grid.block_index(-16), -1);
        assert_eq!(grid.block_index(-17), -2);
    }

    #[test]
    fn test_offset_within_block_always_in_range() {
        let grid = Grid::GRID_16;
        assert_eq!(grid.offset_within_block(5), 5);
        assert_eq!(grid.offset_within_block(16), 0);
        assert_eq!(grid.offset_within_block(-1), 15);
        for v in -100..100 {
            let off = grid.offset_within_block(v);
            assert!((0..16).contains(&off), "offset {off} for {v}");
            assert_eq!(grid.block_index(v) * 16 + off, v);
        }
    }

    #[test]
    fn test_rescale_identity_grow_shrink() {
        assert_eq!(Grid::GRID_16.rescale(7, Grid::GRID_16), 7);
        assert_eq!(Grid::GRID_16.rescale(8, Grid::GRID_32), 16);
        assert_eq!(Grid::GRID_16.rescale(-3, Grid::GRID_64), -12);
        assert_eq!(Grid::GRID_32.rescale(16, Grid::GRID_16), 8);
        // Shrinking rounds toward negative infinity
        assert_eq!(Grid::GRID_32.rescale(15, Grid::GRID_16), 7);
        assert_eq!(Grid::GRID_32.rescale(-1, Grid::GRID_16), -1);
        assert_eq!(Grid::GRID_32.rescale(-3, Grid::GRID_16), -2);
    }

    #[test]
    fn test_rescale_grow_then_shrink_roundtrip() {
        for small in Grid::CANONICAL.iter().take(8) {
            for large in Grid::CANONICAL.iter().filter(|g| g.resolution() >= small.resolution()) {
                for v in [-1000, -17, -1, 0, 1, 5, 16, 999] {
                    let grown = small.rescale(v, *large);
                    assert_eq!(large.rescale(grown, *small), v, "{small} -> {large} for {v}");
                }
            }
        }
    }

    #[test]
    fn test_growing_past_i32_is_detected() {
        let limit = 1 << 30;
        assert_eq!(Grid::GRID_16.checked_rescale(limit, Grid::GRID_32), None);
        assert_eq!(Grid::GRID_16.checked_rescale(-limit - 1, Grid::GRID_32), None);
        assert_eq!(
            Grid::GRID_16.checked_rescale(-limit, Grid::GRID_32),
            Some(i32::MIN)
        );
        assert_eq!(Grid::GRID_1.checked_rescale(3, Grid::new(1 << 30).expect("valid")), None);
        assert_eq!(Grid::GRID_16.rescale(limit, Grid::GRID_32), i32::MAX);
        assert_eq!(Grid::GRID_16.rescale(-limit - 1, Grid::GRID_32), i32::MIN);
        // shrinking never overflows
        assert_eq!(Grid::GRID_32.checked_rescale(i32::MIN, Grid::GRID_16), Some(i32::MIN / 2));
    }

    #[test]
    fn test_cube_volume_saturates() {
        assert_eq!(Grid::GRID_16.cube_volume(), 4096);
        assert_eq!(Grid::new(1 << 30).expect("valid").cube_volume(), i64::MAX);
    }

    #[test]
    fn test_serde_as_resolution() {
        let grid: Grid = ron::from_str("32").expect("should deserialize");
        assert_eq!(grid, Grid::GRID_32);
        assert_eq!(ron::to_string(&Grid::GRID_8).expect("should serialize"), "8");
        assert!(ron::from_str::<Grid>("12").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Grid::GRID_16.to_string(), "Grid[16]");
    }
}
