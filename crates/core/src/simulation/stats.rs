//! Run statistics derived from the grid

use crate::core_types::tile::{CombustionState, TileType};
use crate::grid::Grid;
use rustc_hash::FxHashMap;

/// Snapshot of a run's progress
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    /// Steps advanced since the last `start`
    pub step: u32,
    /// Tiles currently burning
    pub burning: usize,
    /// Tiles burned out
    pub burned: usize,
    /// Flammable tiles that have not caught fire
    pub unburned_flammable: usize,
    /// Burned tiles per terrain type
    pub burned_by_terrain: FxHashMap<TileType, usize>,
}

impl SimulationStats {
    /// Count combustion states across `grid`
    pub fn collect(grid: &Grid, step: u32) -> Self {
        let mut stats = SimulationStats {
            step,
            burning: 0,
            burned: 0,
            unburned_flammable: 0,
            burned_by_terrain: FxHashMap::default(),
        };

        for tile in grid.tiles() {
            match tile.state() {
                CombustionState::Burning { .. } => stats.burning += 1,
                CombustionState::Burned => {
                    stats.burned += 1;
                    *stats.burned_by_terrain.entry(tile.terrain()).or_insert(0) += 1;
                }
                CombustionState::Unburned if tile.fuel_load() > 0.0 => {
                    stats.unburned_flammable += 1;
                }
                CombustionState::Unburned => {}
            }
        }
        stats
    }

    /// Fraction of flammable tiles that burned or are burning (0-1)
    pub fn affected_fraction(&self) -> f32 {
        let affected = self.burning + self.burned;
        let total = affected + self.unburned_flammable;
        if total == 0 {
            0.0
        } else {
            affected as f32 / total as f32
        }
    }
}
