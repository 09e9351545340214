use serde::Serialize;
use tesser_core::{Grid, Tile, TileBox};

/// Aggregate numbers for display and persistence collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub tile_count: usize,
    pub total_volume: i64,
}

/// Owned tiles of one container, in insertion order.
///
/// Every stored tile has a valid box. Overlapping tiles may coexist: `add`
/// logs the overlap and inserts anyway. All queries are linear scans with
/// strict intersection, so tiles that only touch a region are not matched.
///
/// No internal locking. Callers hold exclusive access while mutating.
#[derive(Debug, Clone)]
pub struct TileStore {
    tiles: Vec<Tile>,
    /// Grid the tile coordinates are expressed in.
    grid: Grid,
    /// Set on creation and by every mutation, cleared by the renderer.
    dirty: bool,
}

impl Default for TileStore {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

impl TileStore {
    /// An empty store that still needs its first render.
    pub fn new(grid: Grid) -> Self {
        Self {
            tiles: Vec::new(),
            grid,
            dirty: true,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Change the grid. Stored coordinates are not rescaled.
    pub fn set_grid(&mut self, grid: Grid) {
        if self.grid != grid {
            self.grid = grid;
            self.dirty = true;
        }
    }

    /// Insert a tile. Returns false, leaving the store unchanged, when the
    /// tile's box is invalid.
    pub fn add(&mut self, tile: Tile) -> bool {
        if !tile.is_valid() {
            log::debug!("Rejected invalid tile {tile}");
            return false;
        }
        if let Some(existing) = self.tiles.iter().find(|t| t.intersects(&tile)) {
            log::warn!("Tile {tile} overlaps existing {existing}");
        }
        self.tiles.push(tile);
        self.dirty = true;
        true
    }

    /// Add every tile, returning how many were accepted.
    pub fn extend(&mut self, tiles: impl IntoIterator<Item = Tile>) -> usize {
        tiles
            .into_iter()
            .fold(0, |accepted, tile| accepted + usize::from(self.add(tile)))
    }

    /// Tiles intersecting `region`, in store order.
    pub fn query(&self, region: &TileBox) -> Vec<&Tile> {
        self.tiles
            .iter()
            .filter(|t| t.intersects_box(region))
            .collect()
    }

    /// Remove and return the tiles intersecting `region`, in store order.
    pub fn remove(&mut self, region: &TileBox) -> Vec<Tile> {
        let (removed, kept): (Vec<Tile>, Vec<Tile>) = std::mem::take(&mut self.tiles)
            .into_iter()
            .partition(|t| t.intersects_box(region));
        self.tiles = kept;
        if !removed.is_empty() {
            self.dirty = true;
        }
        removed
    }

    /// True when no stored tile intersects `region`.
    pub fn is_free(&self, region: &TileBox) -> bool {
        !self.tiles.iter().any(|t| t.intersects_box(region))
    }

    /// Set the color of every tile intersecting `region`. Returns how many
    /// tiles actually changed.
    pub fn recolor(&mut self, region: &TileBox, color: u32) -> usize {
        let mut changed = 0;
        for tile in self.tiles.iter_mut() {
            if tile.intersects_box(region) && tile.color() != color {
                tile.set_color(color);
                changed += 1;
            }
        }
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    /// All tiles in insertion order, for rendering and persistence.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the store holds any tile at all.
    pub fn has_tiles(&self) -> bool {
        !self.tiles.is_empty()
    }

    pub fn total_volume(&self) -> i64 {
        self.tiles.iter().map(Tile::volume).fold(0, i64::saturating_add)
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            tile_count: self.tiles.len(),
            total_volume: self.total_volume(),
        }
    }

    pub fn needs_update(&self) -> bool {
        self.dirty
    }

    pub fn clear_update(&mut self) {
        self.dirty = false;
    }
}
