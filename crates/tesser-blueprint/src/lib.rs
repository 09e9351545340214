//! Reading voxel structure files: the descriptor layout inside a parsed
//! tree, conversion into tiles on a target grid, and export back to text.

pub mod convert;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod options;
pub mod stats;
pub mod validate;

pub use convert::{convert, convert_blueprint, convert_snbt, convert_with, Conversion};
pub use descriptor::{Blueprint, MaterialRecords, Record};
pub use error::BlueprintError;
pub use options::{load_options_from_str, ConvertOptions};
pub use stats::ConversionStats;
