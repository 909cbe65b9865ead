//! Engine and scenario configuration
//!
//! [`ScenarioConfig`] is the serializable description of a whole run: grid
//! size or layout, weather, engine tuning and the seed bed depths are drawn
//! from. Missing fields fall back to their defaults.

use crate::core_types::coord::GridCoord;
use crate::core_types::environment::Environment;
use crate::core_types::error::SimError;
use crate::grid::{parse_layout, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Tuning for the propagation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Burn steps per unit of bed depth
    pub burn_step_multiplier: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            burn_step_multiplier: 2,
        }
    }
}

impl EngineConfig {
    /// Reject settings under which no tile could ever ignite
    ///
    /// # Errors
    /// Returns [`SimError::InvalidConfig`] when `burn_step_multiplier` is zero.
    pub fn validated(self) -> Result<Self, SimError> {
        if self.burn_step_multiplier == 0 {
            return Err(SimError::InvalidConfig {
                reason: "burn_step_multiplier must be at least 1".to_string(),
            });
        }
        Ok(self)
    }

    /// Burn duration for a tile with the given bed depth
    #[inline]
    pub fn burn_steps_for(&self, bed_depth: u32) -> u32 {
        bed_depth.saturating_mul(self.burn_step_multiplier)
    }
}

/// Everything needed to set up a reproducible run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Grid width when no layout is given
    pub width: u32,
    /// Grid height when no layout is given
    pub height: u32,
    /// ASCII rows (see [`crate::grid::layout`]); overrides width/height
    pub layout: Option<Vec<String>>,
    pub environment: Environment,
    pub engine: EngineConfig,
    /// Seed for bed-depth draws and spread draws
    pub seed: u64,
    /// Safety cap for drivers; 0 means unbounded
    pub max_steps: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            width: 20,
            height: 20,
            layout: None,
            environment: Environment::default(),
            engine: EngineConfig::default(),
            seed: 0,
            max_steps: 0,
        }
    }
}

impl ScenarioConfig {
    /// Build the grid and validated environment, returning the seeded RNG
    /// so the caller can keep drawing spread values from the same stream.
    ///
    /// A grid built without a layout has its ignition point at the center.
    ///
    /// # Errors
    /// Propagates layout, grid-size and environment validation errors.
    pub fn build(&self) -> Result<(Grid, Environment, ChaCha8Rng), SimError> {
        let environment = self.environment.validated()?;
        self.engine.validated()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let grid = match &self.layout {
            Some(rows) => parse_layout(rows.as_slice(), &mut rng)?,
            None => {
                let mut grid = Grid::new(self.width, self.height, &mut rng)?;
                let center = GridCoord::new((self.width / 2) as i32, (self.height / 2) as i32);
                grid.set_ignition_tile(center)?;
                grid
            }
        };

        info!(
            "Scenario ready: {}x{} grid, wind {} at {}, {}, humidity {}, seed {}",
            grid.width(),
            grid.height(),
            environment.wind_direction(),
            environment.wind_speed(),
            environment.temperature(),
            environment.humidity(),
            self.seed
        );
        Ok((grid, environment, rng))
    }
}
