use tesser_core::Tile;

/// Index pairs `(i, j)` with `i < j` of every two tiles that strictly overlap.
/// Overlap is reported, never resolved.
pub fn find_overlaps(tiles: &[Tile]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in tiles.iter().enumerate() {
        for (j, b) in tiles.iter().enumerate().skip(i + 1) {
            if a.intersects(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
