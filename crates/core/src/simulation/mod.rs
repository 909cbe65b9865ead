//! Discrete-time fire propagation
//!
//! [`PropagationEngine`] keeps the set of burning tiles and advances them one
//! step at a time. It owns no timer: an external driver calls
//! [`PropagationEngine::advance_step`] once per tick until it reports
//! [`StepOutcome::Finished`].
//!
//! Each step works on a snapshot of the burning set taken at the start of the
//! step. Tiles ignited during a step are neither decremented nor used as
//! spread sources until the next step, so fire moves at most one hop per step.

pub mod config;
pub mod probability;
pub mod random;
pub mod stats;

pub use config::{EngineConfig, ScenarioConfig};
pub use probability::{burn_probability, spread_probability};
pub use random::{ConstantSource, ScriptedSource, UniformSource};
pub use stats::SimulationStats;

use crate::core_types::coord::GridCoord;
use crate::core_types::environment::Environment;
use crate::core_types::error::SimError;
use crate::core_types::tile::CombustionState;
use crate::grid::Grid;
use tracing::{debug, info, trace, warn};

/// Result of one call to [`PropagationEngine::advance_step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Tiles are still burning
    Continuing,
    /// The burning set is empty; the run is over
    Finished,
}

/// A combustion transition, published for view layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombustionEvent {
    /// Step during which the transition happened (0 for the initial ignition)
    pub step: u32,
    pub coord: GridCoord,
    /// State the tile moved into
    pub state: CombustionState,
}

/// Fire propagation engine
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    config: EngineConfig,
    /// Tiles currently burning, in ignition order
    burning: Vec<GridCoord>,
    running: bool,
    step: u32,
    /// Transitions not yet drained by the caller; reset when a fresh run starts
    events: Vec<CombustionEvent>,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        PropagationEngine::new()
    }
}

impl PropagationEngine {
    /// Engine with the default config (burn steps = bed depth * 2)
    pub fn new() -> Self {
        PropagationEngine {
            config: EngineConfig::default(),
            burning: Vec::new(),
            running: false,
            step: 0,
            events: Vec::new(),
        }
    }

    /// Engine with custom tuning
    ///
    /// # Errors
    /// Returns [`SimError::InvalidConfig`] for a zero burn-step multiplier.
    pub fn with_config(config: EngineConfig) -> Result<Self, SimError> {
        Ok(PropagationEngine {
            config: config.validated()?,
            ..PropagationEngine::new()
        })
    }

    /// Ignite the grid's ignition tile and begin a run.
    ///
    /// On a stopped engine that still has burning tiles this resumes the
    /// paused run instead; the ignition tile is not touched again.
    ///
    /// # Errors
    /// - [`SimError::AlreadyRunning`] if the engine is running
    /// - [`SimError::NoIgnitionPoint`] if the grid has no ignition tile
    /// - [`SimError::InvalidState`] if the ignition tile cannot ignite
    ///   (already burning or burned, or non-flammable)
    pub fn start(&mut self, grid: &mut Grid, environment: &Environment) -> Result<(), SimError> {
        if self.running {
            warn!("Start refused: simulation already running");
            return Err(SimError::AlreadyRunning);
        }

        if !self.burning.is_empty() {
            self.running = true;
            info!(
                "Resuming fire simulation at step {} with {} burning tiles",
                self.step,
                self.burning.len()
            );
            return Ok(());
        }

        let Some(origin) = grid.ignition_tile() else {
            warn!("Start refused: no ignition point set");
            return Err(SimError::NoIgnitionPoint);
        };

        let tile = grid.tile_mut(origin)?;
        let burn_steps = self.config.burn_steps_for(tile.bed_depth());
        tile.ignite(burn_steps)?;

        self.step = 0;
        self.events.clear();
        self.burning.push(origin);
        self.events.push(CombustionEvent {
            step: 0,
            coord: origin,
            state: tile.state(),
        });
        self.running = true;

        info!(
            "Starting fire simulation at {} ({:?}, {} burn steps), wind {} at {}, {}, humidity {}",
            origin,
            tile.terrain(),
            burn_steps,
            environment.wind_direction(),
            environment.wind_speed(),
            environment.temperature(),
            environment.humidity()
        );
        Ok(())
    }

    /// Pause the run. Tile states and the burning set are kept, so a later
    /// [`start`](Self::start) resumes where this left off.
    pub fn stop(&mut self) {
        if self.running {
            info!(
                "Fire simulation paused at step {} with {} burning tiles",
                self.step,
                self.burning.len()
            );
        }
        self.running = false;
    }

    /// Advance every burning tile by one step.
    ///
    /// For each tile in the step's snapshot: burn it for one step; if it burned
    /// out, drop it from the burning set, otherwise try to ignite each unburned
    /// neighbor with one draw from `rng` against [`burn_probability`].
    ///
    /// # Errors
    /// Returns [`SimError::NotRunning`] if the engine is stopped, or
    /// [`SimError::NotFound`] if the burning set refers to tiles missing from
    /// `grid` (a different grid than the one the run started on).
    pub fn advance_step<R>(
        &mut self,
        grid: &mut Grid,
        environment: &Environment,
        rng: &mut R,
    ) -> Result<StepOutcome, SimError>
    where
        R: UniformSource + ?Sized,
    {
        if !self.running {
            return Err(SimError::NotRunning);
        }

        let step = self.step + 1;
        let snapshot = self.burning.clone();
        let mut still_burning = Vec::with_capacity(snapshot.len());
        let mut ignited = Vec::new();
        let mut burned_out = 0usize;

        for coord in snapshot {
            let tile = grid.tile_mut(coord)?;
            if tile.process_step() {
                trace!("{} burned out at step {}", coord, step);
                self.events.push(CombustionEvent {
                    step,
                    coord,
                    state: CombustionState::Burned,
                });
                burned_out += 1;
                continue;
            }

            still_burning.push(coord);
            self.spread_from(grid, environment, rng, coord, step, &mut ignited)?;
        }

        let newly_ignited = ignited.len();
        still_burning.extend(ignited);
        self.burning = still_burning;
        self.step = step;

        debug!(
            "Step {}: {} ignited, {} burned out, {} burning",
            step,
            newly_ignited,
            burned_out,
            self.burning.len()
        );

        if self.burning.is_empty() {
            self.running = false;
            info!(
                "Simulation complete after {} steps. All fires burned out.",
                step
            );
            Ok(StepOutcome::Finished)
        } else {
            Ok(StepOutcome::Continuing)
        }
    }

    /// Try to ignite each unburned neighbor of `source`
    fn spread_from<R>(
        &mut self,
        grid: &mut Grid,
        environment: &Environment,
        rng: &mut R,
        source: GridCoord,
        step: u32,
        ignited: &mut Vec<GridCoord>,
    ) -> Result<(), SimError>
    where
        R: UniformSource + ?Sized,
    {
        let neighbors: Vec<GridCoord> = grid.neighbor_coords(source).collect();

        for neighbor in neighbors {
            let (probability, burn_steps) = {
                let source_tile = grid.tile(source)?;
                let target = grid.tile(neighbor)?;
                if target.state() != CombustionState::Unburned {
                    continue;
                }
                (
                    burn_probability(source_tile, target, environment),
                    self.config.burn_steps_for(target.bed_depth()),
                )
            };

            if rng.next_uniform() < probability {
                let target = grid.tile_mut(neighbor)?;
                target.ignite(burn_steps)?;
                debug!(
                    "{} caught fire from {} (p = {:.3})",
                    neighbor, source, probability
                );
                self.events.push(CombustionEvent {
                    step,
                    coord: neighbor,
                    state: target.state(),
                });
                ignited.push(neighbor);
            }
        }
        Ok(())
    }

    /// Call [`advance_step`](Self::advance_step) until the run finishes or
    /// `max_steps` steps have been taken (`None` for no cap).
    ///
    /// # Errors
    /// Same as [`advance_step`](Self::advance_step).
    pub fn run_until_finished<R>(
        &mut self,
        grid: &mut Grid,
        environment: &Environment,
        rng: &mut R,
        max_steps: Option<u32>,
    ) -> Result<StepOutcome, SimError>
    where
        R: UniformSource + ?Sized,
    {
        let mut taken = 0;
        loop {
            if max_steps.is_some_and(|cap| taken >= cap) {
                return Ok(StepOutcome::Continuing);
            }
            if self.advance_step(grid, environment, rng)? == StepOutcome::Finished {
                return Ok(StepOutcome::Finished);
            }
            taken += 1;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Steps advanced since the run started
    #[inline]
    pub fn step_count(&self) -> u32 {
        self.step
    }

    /// Coordinates of the burning tiles, in ignition order
    #[inline]
    pub fn burning_tiles(&self) -> &[GridCoord] {
        &self.burning
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pending transitions of the current run, oldest first.
    ///
    /// Starting a fresh run discards anything left undrained from the last one.
    pub fn events(&self) -> &[CombustionEvent] {
        &self.events
    }

    /// Take all pending transitions
    pub fn drain_events(&mut self) -> Vec<CombustionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Progress counters for `grid`
    pub fn stats(&self, grid: &Grid) -> SimulationStats {
        SimulationStats::collect(grid, self.step)
    }
}
