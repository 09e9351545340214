use serde::Serialize;
use std::path::Path;
use tesser_blueprint::{Conversion, ConversionStats};
use tesser_core::{Grid, Tile};
use tesser_store::{StoreStats, TileStore};

/// Per-material totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialSummary {
    pub material: String,
    pub tiles: usize,
    pub colored: usize,
    pub volume: i64,
}

/// Everything the CLI learned about one input file.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub source_grid: Grid,
    pub target_grid: Grid,
    pub conversion: ConversionStats,
    pub store: StoreStats,
    pub materials: Vec<MaterialSummary>,
    pub overlaps: Vec<(usize, usize)>,
}

impl Report {
    pub fn new(source: &str, conversion: &Conversion, store: &TileStore) -> Self {
        Self {
            source: source.to_owned(),
            source_grid: conversion.source_grid,
            target_grid: store.grid(),
            conversion: conversion.stats.clone(),
            store: store.stats(),
            materials: summarize_materials(store.tiles()),
            overlaps: conversion.overlaps.clone(),
        }
    }
}

/// Totals per material in first-seen order.
pub fn summarize_materials(tiles: &[Tile]) -> Vec<MaterialSummary> {
    let mut summaries: Vec<MaterialSummary> = Vec::new();
    for tile in tiles {
        let name = tile.material().as_str();
        let pos = match summaries.iter().position(|s| s.material == name) {
            Some(pos) => pos,
            None => {
                summaries.push(MaterialSummary {
                    material: name.to_owned(),
                    tiles: 0,
                    colored: 0,
                    volume: 0,
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[pos];
        summary.tiles += 1;
        summary.colored += usize::from(tile.has_color());
        summary.volume = summary.volume.saturating_add(tile.volume());
    }
    summaries
}

/// Save a report as pretty JSON, creating parent directories.
pub fn save_report(path: &Path, report: &Report) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Format the per-material table as markdown.
pub fn format_markdown(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "**{}**: {} -> {}, {} tiles, volume {}\n\n",
        report.source,
        report.source_grid,
        report.target_grid,
        report.store.tile_count,
        report.store.total_volume
    ));
    out.push_str("| Material | Tiles | Colored | Volume | Blocks |\n");
    out.push_str("|----------|-------|---------|--------|--------|\n");

    let cube = report.target_grid.cube_volume() as f64;
    for m in &report.materials {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} |\n",
            m.material,
            m.tiles,
            m.colored,
            m.volume,
            m.volume as f64 / cube
        ));
    }

    out
}

/// Format skipped records, invalid boxes and overlaps.
pub fn format_warnings(report: &Report) -> String {
    let stats = &report.conversion;
    if stats.skipped_records == 0 && stats.invalid_boxes == 0 && report.overlaps.is_empty() {
        return "No problems detected.\n".to_owned();
    }

    let mut out = String::new();
    if stats.skipped_records > 0 {
        out.push_str(&format!("  - {} unsupported records skipped\n", stats.skipped_records));
    }
    if stats.invalid_boxes > 0 {
        out.push_str(&format!("  - {} invalid boxes dropped\n", stats.invalid_boxes));
    }
    for (a, b) in &report.overlaps {
        out.push_str(&format!("  - tiles {} and {} overlap\n", a, b));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tesser_blueprint::{convert_snbt, ConvertOptions};
    use tesser_core::TileBox;

    fn house_report() -> Report {
        let conversion = convert_snbt(
            include_str!("../../../data/blueprints/house.snbt"),
            Grid::GRID_16,
            &ConvertOptions::default(),
        )
        .expect("fixture converts");
        let mut store = TileStore::new(Grid::GRID_16);
        store.extend(conversion.tiles.clone());
        Report::new("house.snbt", &conversion, &store)
    }

    #[test]
    fn test_summarize_materials_first_seen_order() {
        let tiles = vec![
            Tile::new(TileBox::new(0, 0, 0, 2, 2, 2), "stone"),
            Tile::with_color(TileBox::new(0, 0, 0, 1, 1, 1), "glass", 0xFF00_FFFF),
            Tile::new(TileBox::new(2, 0, 0, 3, 1, 1), "stone"),
        ];
        let summaries = summarize_materials(&tiles);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].material, "stone");
        assert_eq!(summaries[0].tiles, 2);
        assert_eq!(summaries[0].volume, 9);
        assert_eq!(summaries[1].colored, 1);
    }

    #[test]
    fn test_markdown_table() {
        let text = format_markdown(&house_report());
        assert!(text.contains("Grid[16] -> Grid[16], 4 tiles, volume 1536"), "{text}");
        assert!(text.contains("| minecraft:oak_planks | 2 | 0 | 896 | 0.22 |"), "{text}");
        assert!(text.contains("| minecraft:glass | 1 | 1 | 128 | 0.03 |"), "{text}");
    }

    #[test]
    fn test_json_report_shape() {
        let report = house_report();
        let json = serde_json::to_value(&report).expect("should serialize");
        assert_eq!(json["source_grid"], 16);
        assert_eq!(json["store"]["tile_count"], 4);
        assert_eq!(json["conversion"]["colored_tiles"], 1);
        assert_eq!(json["materials"][2]["material"], "minecraft:stone");
    }

    #[test]
    fn test_warnings() {
        let mut report = house_report();
        assert_eq!(format_warnings(&report), "No problems detected.\n");
        report.conversion.invalid_boxes = 2;
        report.overlaps.push((0, 3));
        let text = format_warnings(&report);
        assert!(text.contains("2 invalid boxes dropped"));
        assert!(text.contains("tiles 0 and 3 overlap"));
    }
}
