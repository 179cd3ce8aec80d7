//! Read-only view models built from a loaded collection. Nothing here writes.

pub mod format;
pub mod list;
pub mod map;
pub mod stats;

pub use list::{list_rows, ListRow};
pub use map::{build_map, MapFilter, MapView, QualityTier};
pub use stats::{statistics, summary, Statistics, Summary};
