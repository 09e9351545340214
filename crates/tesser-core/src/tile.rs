use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bounds::TileBox;
use crate::constants::NO_TINT;
use crate::grid::Grid;
use crate::types::MaterialId;

/// A box of a single material with an optional ARGB tint.
///
/// Bounds and material are fixed at construction; only the color can be
/// changed afterwards (recoloring tools).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    bounds: TileBox,
    material: MaterialId,
    /// ARGB. `NO_TINT` when untinted.
    color: u32,
}

impl Tile {
    /// Create an untinted tile.
    pub fn new(bounds: TileBox, material: impl Into<MaterialId>) -> Self {
        Self::with_color(bounds, material, NO_TINT)
    }

    pub fn with_color(bounds: TileBox, material: impl Into<MaterialId>, color: u32) -> Self {
        Self {
            bounds,
            material: material.into(),
            color,
        }
    }

    pub fn bounds(&self) -> &TileBox {
        &self.bounds
    }

    pub fn material(&self) -> &MaterialId {
        &self.material
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn set_color(&mut self, color: u32) {
        self.color = color;
    }

    pub fn has_color(&self) -> bool {
        self.color != NO_TINT
    }

    /// Placeable tiles have a valid box.
    pub fn is_valid(&self) -> bool {
        self.bounds.is_valid()
    }

    /// Volume in grid cells.
    pub fn volume(&self) -> i64 {
        self.bounds.volume()
    }

    /// Fraction of a full block this tile fills, given the grid its
    /// coordinates are expressed in.
    pub fn percent_volume(&self, grid: Grid) -> f64 {
        self.volume() as f64 / grid.cube_volume() as f64
    }

    pub fn intersects(&self, other: &Tile) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    pub fn intersects_box(&self, region: &TileBox) -> bool {
        self.bounds.intersects(region)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tile[{}, {}, color=0x{:08X}]",
            self.bounds, self.material, self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_is_untinted() {
        let tile = Tile::new(TileBox::new(0, 0, 0, 8, 8, 8), "stone");
        assert_eq!(tile.color(), NO_TINT);
        assert!(!tile.has_color());
        assert_eq!(tile.material().as_str(), "stone");
    }

    #[test]
    fn test_set_color() {
        let mut tile = Tile::new(TileBox::new(0, 0, 0, 1, 1, 1), "glass");
        tile.set_color(0xFF00_FFFF);
        assert!(tile.has_color());
        assert_eq!(tile.color(), 0xFF00_FFFF);
        tile.set_color(NO_TINT);
        assert!(!tile.has_color());
    }

    #[test]
    fn test_volume_delegates_to_box() {
        let tile = Tile::new(TileBox::new(0, 0, 0, 2, 3, 4), "wool");
        assert_eq!(tile.volume(), 24);
        assert!(tile.is_valid());
        assert!(!Tile::new(TileBox::new(0, 0, 0, 0, 3, 4), "wool").is_valid());
    }

    #[test]
    fn test_percent_volume() {
        let bit = Tile::new(TileBox::new(0, 0, 0, 1, 1, 1), "stone");
        assert!((bit.percent_volume(Grid::GRID_16) - 1.0 / 4096.0).abs() < 1e-12);

        let full = Tile::new(TileBox::new(0, 0, 0, 16, 16, 16), "stone");
        assert_eq!(full.percent_volume(Grid::GRID_16), 1.0);
    }

    #[test]
    fn test_intersection_delegates_to_box() {
        let a = Tile::new(TileBox::new(0, 0, 0, 4, 4, 4), "stone");
        let b = Tile::new(TileBox::new(4, 4, 4, 8, 8, 8), "dirt");
        let c = Tile::new(TileBox::new(3, 3, 3, 5, 5, 5), "dirt");
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&b));
        assert!(a.intersects_box(&TileBox::new(0, 0, 0, 1, 1, 1)));
    }

    #[test]
    fn test_equality_includes_color() {
        let b = TileBox::new(0, 0, 0, 1, 1, 1);
        assert_eq!(Tile::new(b, "stone"), Tile::with_color(b, "stone", NO_TINT));
        assert_ne!(Tile::new(b, "stone"), Tile::with_color(b, "stone", 0xFF00_0000));
        assert_ne!(Tile::new(b, "stone"), Tile::new(b, "Stone"));
    }

    #[test]
    fn test_display() {
        let tile = Tile::with_color(TileBox::new(0, 0, 0, 8, 8, 8), "stone", 0xFF00_FFFF);
        assert_eq!(tile.to_string(), "Tile[Box[0,0,0 -> 8,8,8], stone, color=0xFF00FFFF]");
    }
}
