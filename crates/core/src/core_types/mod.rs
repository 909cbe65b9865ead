//! Core types and utilities

pub mod coord;
pub mod environment;
pub mod error;
pub mod tile;
pub mod units;

// Re-export
pub use coord::{GridCoord, Vec2};
pub use environment::*;
pub use error::SimError;
pub use tile::*;
pub use units::*;
