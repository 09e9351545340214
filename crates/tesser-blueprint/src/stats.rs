use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tesser_core::Tile;

/// Summary of one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub tile_count: usize,
    /// Distinct materials among the emitted tiles.
    pub material_count: usize,
    pub colored_tiles: usize,
    /// Sum of tile volumes in target-grid cells.
    pub total_volume: i64,
    /// Records that were neither a color marker nor a box.
    pub skipped_records: usize,
    /// Box records that were degenerate, inverted or out of the i32 range
    /// after rescaling.
    pub invalid_boxes: usize,
}

impl ConversionStats {
    /// Tile-derived counters. Record counters stay zero.
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let materials: HashSet<_> = tiles.iter().map(Tile::material).collect();
        Self {
            tile_count: tiles.len(),
            material_count: materials.len(),
            colored_tiles: tiles.iter().filter(|t| t.has_color()).count(),
            total_volume: tiles.iter().map(Tile::volume).fold(0, i64::saturating_add),
            skipped_records: 0,
            invalid_boxes: 0,
        }
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Statistics:")?;
        writeln!(f, "  Tiles: {}", self.tile_count)?;
        writeln!(f, "  Materials: {}", self.material_count)?;
        writeln!(f, "  Total Volume: {}", self.total_volume)?;
        writeln!(f, "  Colored Tiles: {}", self.colored_tiles)?;
        writeln!(f, "  Skipped Records: {}", self.skipped_records)?;
        write!(f, "  Invalid Boxes: {}", self.invalid_boxes)
    }
}
