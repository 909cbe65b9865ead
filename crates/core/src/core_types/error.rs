//! Error type shared by the tile, grid and engine APIs.
//!
//! Every condition is local and recoverable. Probabilistic non-ignition is
//! never reported here; it is the expected outcome of a failed draw.

use crate::core_types::coord::GridCoord;
use crate::core_types::tile::{CombustionState, TileType};
use std::fmt;

/// Errors returned by simulation operations
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Operation is not valid for the tile's current combustion state
    InvalidState {
        coord: GridCoord,
        state: CombustionState,
        operation: &'static str,
    },
    /// Coordinate does not exist on the grid
    NotFound { coord: GridCoord },
    /// `start` was called without a designated ignition tile
    NoIgnitionPoint,
    /// `start` was called while the engine is already running
    AlreadyRunning,
    /// `advance_step` was called while the engine is stopped
    NotRunning,
    /// Terrain assignment request that no tile can hold
    InvalidTerrain {
        terrain: TileType,
        reason: String,
    },
    /// Environment parameter outside its accepted range
    InvalidEnvironment {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// Unknown symbol in an ASCII terrain layout
    InvalidLayout {
        line: usize,
        column: usize,
        symbol: char,
    },
    /// Layout row whose length differs from the first row
    RaggedLayout {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Second `F` in an ASCII terrain layout; a grid has one ignition origin
    DuplicateIgnition { line: usize, column: usize },
    /// Grid constructed with zero width or height
    EmptyGrid,
    /// Engine configuration that cannot produce a valid run
    InvalidConfig { reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidState {
                coord,
                state,
                operation,
            } => write!(f, "cannot {operation} tile {coord} while it is {state}"),
            SimError::NotFound { coord } => write!(f, "no tile at {coord}"),
            SimError::NoIgnitionPoint => {
                write!(f, "no ignition point set; place one before starting")
            }
            SimError::AlreadyRunning => write!(f, "simulation is already running"),
            SimError::NotRunning => write!(f, "simulation is not running"),
            SimError::InvalidTerrain { terrain, reason } => {
                write!(f, "invalid terrain {terrain:?}: {reason}")
            }
            SimError::InvalidEnvironment {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is outside [{min}, {max}]"),
            SimError::InvalidLayout {
                line,
                column,
                symbol,
            } => write!(
                f,
                "invalid layout symbol {symbol:?} at line {line}, column {column}"
            ),
            SimError::RaggedLayout {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout line {line} has {found} columns, expected {expected}"
            ),
            SimError::DuplicateIgnition { line, column } => write!(
                f,
                "duplicate ignition point at line {line}, column {column}"
            ),
            SimError::EmptyGrid => write!(f, "grid must have at least one tile"),
            SimError::InvalidConfig { reason } => write!(f, "invalid engine config: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}
