//! Grid-based terrain modules

pub mod layout;
pub mod tile_grid;

// Re-export main types
pub use layout::parse_layout;
pub use tile_grid::*;
