//! Single source of truth for constants shared by the converter, the
//! exporter and the tile store.

/// Resolution assumed when a structure carries no usable `grid` entry.
pub const DEFAULT_GRID_RESOLUTION: i32 = 16;

/// Largest resolution with a canonical `Grid` constant.
pub const MAX_CANONICAL_RESOLUTION: i32 = 4096;

/// ARGB value meaning "no tint". Tiles with this color render untinted.
pub const NO_TINT: u32 = 0xFFFF_FFFF;

/// Length of a color marker array in a structure's tile list.
pub const COLOR_MARKER_LEN: usize = 1;

/// Minimum length of a box record: `[minX, minY, minZ, maxX, maxY, maxZ]`.
pub const BOX_RECORD_LEN: usize = 6;
