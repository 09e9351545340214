use tesser_core::constants::NO_TINT;
use tesser_core::{Grid, Tile, TileBox};
use tesser_snbt::Value;

use crate::descriptor::{Blueprint, Record};
use crate::error::BlueprintError;
use crate::options::ConvertOptions;
use crate::stats::ConversionStats;
use crate::validate::find_overlaps;

/// Output of a conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Grid the source records were read in.
    pub source_grid: Grid,
    /// Tiles in target-grid coordinates, grouped by material in encounter order.
    pub tiles: Vec<Tile>,
    pub stats: ConversionStats,
    /// Overlapping tile index pairs. Empty unless `report_overlaps` is set.
    pub overlaps: Vec<(usize, usize)>,
}

impl Blueprint {
    /// Emit tiles rescaled into `target`.
    ///
    /// The running color resets to untinted at the start of every material.
    /// Skipped records and boxes that are invalid or out of the i32 range
    /// after rescaling are counted, not reported as errors.
    pub fn to_tiles(&self, target: Grid) -> (Vec<Tile>, ConversionStats) {
        let mut tiles = Vec::new();
        let mut skipped_records = 0;
        let mut invalid_boxes = 0;

        for entry in &self.materials {
            let mut color = NO_TINT;
            for (index, record) in entry.records.iter().enumerate() {
                match *record {
                    Record::Color(c) => color = c,
                    Record::Box(coords) => {
                        let source = TileBox::from_array(coords);
                        match source.rescale(self.grid, target) {
                            Some(bounds) if bounds.is_valid() => {
                                let material = entry.material.clone();
                                tiles.push(Tile::with_color(bounds, material, color));
                            }
                            Some(bounds) => {
                                log::debug!(
                                    "Dropping invalid box {bounds} for '{}' (record {index})",
                                    entry.material
                                );
                                invalid_boxes += 1;
                            }
                            None => {
                                log::debug!(
                                    "Dropping box {source} for '{}' (record {index}): \
                                     out of range on {target}",
                                    entry.material
                                );
                                invalid_boxes += 1;
                            }
                        }
                    }
                    Record::Skipped => {
                        log::debug!(
                            "Skipping unsupported record {index} for '{}'",
                            entry.material
                        );
                        skipped_records += 1;
                    }
                }
            }
        }

        let stats = ConversionStats {
            skipped_records,
            invalid_boxes,
            ..ConversionStats::from_tiles(&tiles)
        };
        (tiles, stats)
    }
}

/// Convert a parsed tree into tiles on `target` with default options.
pub fn convert(root: &Value, target: Grid) -> Result<Vec<Tile>, BlueprintError> {
    convert_with(root, target, &ConvertOptions::default()).map(|c| c.tiles)
}

pub fn convert_with(
    root: &Value,
    target: Grid,
    options: &ConvertOptions,
) -> Result<Conversion, BlueprintError> {
    let blueprint = Blueprint::from_value(root, options)?;
    Ok(convert_blueprint(&blueprint, target, options))
}

/// Parse structure text and convert it.
pub fn convert_snbt(
    text: &str,
    target: Grid,
    options: &ConvertOptions,
) -> Result<Conversion, BlueprintError> {
    let blueprint = Blueprint::from_snbt(text, options)?;
    Ok(convert_blueprint(&blueprint, target, options))
}

/// Convert an already interpreted structure. Logs a summary, and each
/// overlapping pair when `report_overlaps` is set.
pub fn convert_blueprint(
    blueprint: &Blueprint,
    target: Grid,
    options: &ConvertOptions,
) -> Conversion {
    let (tiles, stats) = blueprint.to_tiles(target);

    log::info!(
        "Converted {} tiles from {} materials ({} -> {}), {} skipped, {} invalid",
        stats.tile_count,
        stats.material_count,
        blueprint.grid,
        target,
        stats.skipped_records,
        stats.invalid_boxes
    );

    let overlaps = if options.report_overlaps {
        let pairs = find_overlaps(&tiles);
        for &(a, b) in &pairs {
            log::warn!("Overlapping tiles: {} and {}", tiles[a], tiles[b]);
        }
        pairs
    } else {
        Vec::new()
    };

    Conversion {
        source_grid: blueprint.grid,
        tiles,
        stats,
        overlaps,
    }
}
