//! Grid Fire Spread Simulation Core Library
//!
//! A discrete-time wildfire spread model on a 2D tile grid. Each tile carries
//! terrain-derived fuel properties and a combustion state. Every step, each
//! burning tile burns down one unit of its duration and tries to ignite its
//! eight neighbors with a probability driven by fuel load, temperature, wind
//! alignment, humidity and distance.
//!
//! ## Usage
//!
//! ```
//! use fire_grid_core::{GridCoord, PropagationEngine, ScenarioConfig, StepOutcome};
//!
//! let config = ScenarioConfig {
//!     width: 9,
//!     height: 9,
//!     seed: 7,
//!     ..ScenarioConfig::default()
//! };
//! let (mut grid, environment, mut rng) = config.build().unwrap();
//!
//! let mut engine = PropagationEngine::new();
//! engine.start(&mut grid, &environment).unwrap();
//! let outcome = engine
//!     .run_until_finished(&mut grid, &environment, &mut rng, None)
//!     .unwrap();
//! assert_eq!(outcome, StepOutcome::Finished);
//!
//! assert!(grid.tile_at(GridCoord::new(4, 4)).unwrap().is_burned());
//! ```
//!
//! The engine owns no timer and runs on the caller's thread; pacing,
//! rendering and input belong to the host.

// Core types and utilities
pub mod core_types;

// Tile grid and terrain layouts
pub mod grid;

// Propagation engine
pub mod simulation;

// Re-export core types
pub use core_types::{CombustionState, Tile, TileType};
pub use core_types::{Environment, WindDirection};
pub use core_types::{Fahrenheit, MilesPerHour, Percent};
pub use core_types::{GridCoord, SimError, Vec2};

// Re-export grid types
pub use grid::{parse_layout, Grid};

// Re-export engine types
pub use simulation::{
    burn_probability, CombustionEvent, ConstantSource, EngineConfig, PropagationEngine,
    ScenarioConfig, ScriptedSource, SimulationStats, StepOutcome, UniformSource,
};
