pub mod store;

pub use store::{StoreStats, TileStore};
