use glam::IVec3;
use std::fmt;
use tesser_core::constants::{BOX_RECORD_LEN, COLOR_MARKER_LEN};
use tesser_core::{Grid, MaterialId};
use tesser_snbt::{parse_with, Compound, Number, Value};

use crate::error::BlueprintError;
use crate::options::ConvertOptions;

/// One entry of a material's record list, classified by array length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Length 1: ARGB tint for the records that follow.
    Color(u32),
    /// Length >= 6: `[minX, minY, minZ, maxX, maxY, maxZ]` in source-grid units.
    Box([i32; 6]),
    /// Anything else. Kept so statistics can count it.
    Skipped,
}

impl Record {
    pub fn from_value(value: &Value) -> Record {
        let Some(items) = value.int_items() else {
            return Record::Skipped;
        };
        match items.len() {
            COLOR_MARKER_LEN => Record::Color(items[0] as u32),
            n if n >= BOX_RECORD_LEN => {
                Record::Box([items[0], items[1], items[2], items[3], items[4], items[5]])
            }
            _ => Record::Skipped,
        }
    }
}

/// Records listed under one material, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRecords {
    pub material: MaterialId,
    pub records: Vec<Record>,
}

/// The structure descriptor read out of a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    /// Grid the box records are expressed in.
    pub grid: Grid,
    pub min: Option<IVec3>,
    pub size: Option<IVec3>,
    /// Per-material record lists in encounter order.
    pub materials: Vec<MaterialRecords>,
}

impl Blueprint {
    /// Interpret a parsed tree. Fails only when the root is not a compound.
    /// A content or tiles entry of the wrong type reads as absent.
    pub fn from_value(root: &Value, options: &ConvertOptions) -> Result<Blueprint, BlueprintError> {
        let root = root.as_compound().ok_or_else(|| {
            BlueprintError::MalformedStructure(format!(
                "root must be a compound, found {}",
                root.type_name()
            ))
        })?;

        let grid = read_grid(root, options.default_grid);
        let min = root.get("min").and_then(read_triple);
        let size = root.get("size").and_then(read_triple);

        let mut materials = Vec::new();
        if let Some(tiles) = find_tiles(root, options) {
            for (key, value) in tiles.iter() {
                let Some(list) = value.as_list() else {
                    log::debug!(
                        "Skipping material '{key}': expected a list of arrays, found {}",
                        value.type_name()
                    );
                    continue;
                };
                materials.push(MaterialRecords {
                    material: MaterialId::from(key),
                    records: list.iter().map(Record::from_value).collect(),
                });
            }
        }

        Ok(Blueprint {
            grid,
            min,
            size,
            materials,
        })
    }

    /// Parse structure text and interpret it.
    pub fn from_snbt(text: &str, options: &ConvertOptions) -> Result<Blueprint, BlueprintError> {
        let root = parse_with(text, &options.parse_options())?;
        Blueprint::from_value(&root, options)
    }

    pub fn record_count(&self) -> usize {
        self.materials.iter().map(|m| m.records.len()).sum()
    }
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blueprint[grid={}, materials={}, size=",
            self.grid.resolution(),
            self.materials.len()
        )?;
        match self.size {
            Some(s) => write!(f, "{}x{}x{}]", s.x, s.y, s.z),
            None => f.write_str("unknown]"),
        }
    }
}

/// Only a plain int (no width suffix) is read. Missing, other numbers and
/// non-power-of-two values fall back to `fallback`.
fn read_grid(root: &Compound, fallback: Grid) -> Grid {
    let Some(value) = root.get("grid") else {
        return fallback;
    };
    let parsed = match value {
        Value::Number(Number::Int(v)) => Grid::new(*v).ok(),
        _ => None,
    };
    match parsed {
        Some(grid) => grid,
        None => {
            log::warn!("Invalid grid entry {value}, falling back to {fallback}");
            fallback
        }
    }
}

fn read_triple(value: &Value) -> Option<IVec3> {
    match value.int_items()?.as_slice() {
        [x, y, z, ..] => Some(IVec3::new(*x, *y, *z)),
        _ => None,
    }
}

fn lookup<'a, 'k>(compound: &'a Compound, keys: &'k [String]) -> Option<(&'k str, &'a Value)> {
    keys.iter()
        .find_map(|k| compound.get(k).map(|v| (k.as_str(), v)))
}

/// `None` when either level is absent or not a compound.
fn find_tiles<'a>(root: &'a Compound, options: &ConvertOptions) -> Option<&'a Compound> {
    let content = compound_entry(root, &options.content_keys)?;
    compound_entry(content, &options.tiles_keys)
}

fn compound_entry<'a>(compound: &'a Compound, keys: &[String]) -> Option<&'a Compound> {
    let (key, value) = lookup(compound, keys)?;
    let entry = value.as_compound();
    if entry.is_none() {
        log::warn!(
            "Ignoring '{key}': expected a compound, found {}",
            value.type_name()
        );
    }
    entry
}
