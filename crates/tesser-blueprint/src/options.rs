use serde::{Deserialize, Serialize};
use tesser_core::Grid;
use tesser_snbt::{ParseOptions, DEFAULT_MAX_DEPTH};

use crate::error::BlueprintError;

/// Knobs for reading structure files. Every field is optional in RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Source grid used when the structure's `grid` entry is missing or invalid.
    pub default_grid: Grid,
    /// Keys tried in order for the content compound.
    pub content_keys: Vec<String>,
    /// Keys tried in order for the per-material tile compound inside content.
    pub tiles_keys: Vec<String>,
    pub max_depth: usize,
    /// Check converted tiles for overlapping pairs and log them.
    pub report_overlaps: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_grid: Grid::default(),
            content_keys: vec!["content".into(), "c".into()],
            tiles_keys: vec!["tiles".into(), "t".into()],
            max_depth: DEFAULT_MAX_DEPTH,
            report_overlaps: false,
        }
    }
}

impl ConvertOptions {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }
}

/// Parse convert options from a RON string.
pub fn load_options_from_str(ron_str: &str) -> Result<ConvertOptions, BlueprintError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| BlueprintError::OptionsParseError(e.to_string()))
}
