pub mod bounds;
pub mod constants;
pub mod error;
pub mod grid;
pub mod tile;
pub mod types;

pub use bounds::TileBox;
pub use error::CoreError;
pub use grid::Grid;
pub use tile::Tile;
pub use types::{GridCoord, MaterialId};
