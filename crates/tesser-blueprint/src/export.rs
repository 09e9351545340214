use std::collections::HashMap;
use tesser_core::constants::NO_TINT;
use tesser_core::{Grid, MaterialId, Tile, TileBox};
use tesser_snbt::{Compound, Number, TypedArray, Value};

/// Build the structure tree for `tiles`, whose coordinates are in `grid`.
///
/// Tiles are grouped by material in first-seen order. A color marker is
/// written only when a tile's color differs from the running color, which
/// starts untinted for every material. `min` and `size` describe the
/// bounding box of all tiles and are omitted for an empty list. `size` is
/// also omitted when an extent does not fit in i32.
pub fn to_value(tiles: &[Tile], grid: Grid) -> Value {
    let mut groups: Vec<(&MaterialId, Vec<Value>, u32)> = Vec::new();
    let mut index: HashMap<&MaterialId, usize> = HashMap::new();

    for tile in tiles {
        let slot = *index.entry(tile.material()).or_insert_with(|| {
            groups.push((tile.material(), Vec::new(), NO_TINT));
            groups.len() - 1
        });
        let (_, records, color) = &mut groups[slot];
        if tile.color() != *color {
            *color = tile.color();
            records.push(int_array(vec![tile.color() as i32]));
        }
        records.push(int_array(tile.bounds().to_array().to_vec()));
    }

    let mut root = Compound::new();
    root.insert("grid", Value::Number(Number::Int(grid.resolution())));

    let mut bounds = tiles.iter().map(|t| *t.bounds());
    if let Some(first) = bounds.next() {
        let extent = bounds.fold(first, |mut acc: TileBox, b| {
            acc.union(&b);
            acc
        });
        root.insert("min", int_array(extent.min.to_array().to_vec()));
        let size: Result<Vec<i32>, _> =
            extent.size().to_array().into_iter().map(i32::try_from).collect();
        match size {
            Ok(size) => {
                root.insert("size", int_array(size));
            }
            Err(_) => log::debug!("Omitting size of {extent}: extent exceeds i32"),
        }
    }

    let tiles_compound: Compound = groups
        .into_iter()
        .map(|(material, records, _)| (material.as_str(), Value::List(records)))
        .collect();
    let mut content = Compound::new();
    content.insert("tiles", Value::Compound(tiles_compound));
    root.insert("content", Value::Compound(content));

    Value::Compound(root)
}

/// Structure text for `tiles`. Converting it back on the same grid yields the
/// same tiles, grouped by material.
pub fn to_snbt(tiles: &[Tile], grid: Grid) -> String {
    to_value(tiles, grid).to_string()
}

fn int_array(values: Vec<i32>) -> Value {
    Value::Array(TypedArray::Int(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert_snbt;
    use crate::options::ConvertOptions;

    fn sample() -> Vec<Tile> {
        vec![
            Tile::new(TileBox::new(0, 0, 0, 16, 2, 16), "minecraft:oak_planks"),
            Tile::with_color(TileBox::new(14, 4, 4, 16, 12, 12), "minecraft:glass", 0xFF00_FFFF),
            Tile::with_color(TileBox::new(0, 4, 4, 2, 12, 12), "minecraft:glass", 0xFF00_FFFF),
            Tile::new(TileBox::new(0, 14, 0, 16, 16, 16), "minecraft:glass"),
        ]
    }

    #[test]
    fn test_exported_text() {
        let text = to_snbt(&sample()[..2], Grid::GRID_16);
        assert_eq!(
            text,
            concat!(
                "{grid:16,min:[I;0,0,0],size:[I;16,12,16],content:{tiles:{",
                r#""minecraft:oak_planks":[[I;0,0,0,16,2,16]],"#,
                r#""minecraft:glass":[[I;-16711681],[I;14,4,4,16,12,12]]}}}"#
            )
        );
    }

    #[test]
    fn test_marker_only_on_color_change() {
        let value = to_value(&sample(), Grid::GRID_16);
        let glass = value
            .get("content")
            .and_then(|c| c.get("tiles"))
            .and_then(|t| t.get("minecraft:glass"))
            .and_then(Value::as_list)
            .expect("glass records present");
        // marker, box, box, reset marker, box
        assert_eq!(glass.len(), 5);
        assert_eq!(glass[3], int_array(vec![-1]));
    }

    #[test]
    fn test_export_then_convert_returns_same_tiles() {
        let tiles = sample();
        let text = to_snbt(&tiles, Grid::GRID_32);
        let back = convert_snbt(&text, Grid::GRID_32, &ConvertOptions::default())
            .expect("exported text converts");
        assert_eq!(back.source_grid, Grid::GRID_32);
        assert_eq!(back.tiles, tiles);
    }

    #[test]
    fn test_export_of_extreme_tile_omits_size() {
        let tiles = vec![Tile::new(TileBox::new(i32::MIN, 0, 0, i32::MAX, 1, 1), "s")];
        let text = to_snbt(&tiles, Grid::GRID_16);
        assert_eq!(
            text,
            "{grid:16,min:[I;-2147483648,0,0],content:{tiles:{s:[[I;-2147483648,0,0,2147483647,1,1]]}}}"
        );
        let back = convert_snbt(&text, Grid::GRID_16, &ConvertOptions::default())
            .expect("exported text converts");
        assert_eq!(back.tiles, tiles);
    }

    #[test]
    fn test_empty_export() {
        let text = to_snbt(&[], Grid::GRID_8);
        assert_eq!(text, "{grid:8,content:{tiles:{}}}");
    }
}
