//! Per-cell terrain and combustion model
//!
//! A [`Tile`] carries static fuel properties derived from its [`TileType`] and a
//! dynamic [`CombustionState`] that only ever advances
//! `Unburned -> Burning -> Burned`.

use crate::core_types::coord::GridCoord;
use crate::core_types::error::SimError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Terrain kinds that can be painted onto the grid
///
/// `FireSpawn` is a placement designator for the ignition origin, not a
/// terrain. It never reaches a tile's combustion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Soil,
    Asphalt,
    Water,
    WoodStruct,
    StoneStruct,
    Grass,
    Shrub,
    Tree,
    FireSpawn,
}

impl TileType {
    /// Every type that can be assigned as terrain
    pub const TERRAIN: [TileType; 8] = [
        TileType::Soil,
        TileType::Asphalt,
        TileType::Water,
        TileType::WoodStruct,
        TileType::StoneStruct,
        TileType::Grass,
        TileType::Shrub,
        TileType::Tree,
    ];

    /// Flammability coefficient (0-1). Zero for anything that cannot burn.
    pub fn fuel_load(self) -> f32 {
        match self {
            TileType::Soil => 0.3,
            TileType::WoodStruct => 0.6,
            TileType::StoneStruct => 0.1,
            TileType::Grass => 0.7,
            TileType::Shrub => 0.5,
            TileType::Tree => 0.4,
            TileType::Asphalt | TileType::Water | TileType::FireSpawn => 0.0,
        }
    }

    /// Inclusive range a fresh bed depth is drawn from, `None` when non-flammable
    pub fn bed_depth_range(self) -> Option<RangeInclusive<u32>> {
        match self {
            TileType::Soil | TileType::Grass | TileType::Shrub => Some(2..=3),
            TileType::Tree => Some(3..=4),
            TileType::WoodStruct => Some(4..=5),
            TileType::StoneStruct => Some(5..=6),
            TileType::Asphalt | TileType::Water | TileType::FireSpawn => None,
        }
    }

    /// Whether a tile of this type can ever enter `Burning`
    #[inline]
    pub fn is_flammable(self) -> bool {
        self.bed_depth_range().is_some()
    }

    /// Whether this type may be assigned as a tile's terrain
    #[inline]
    pub fn is_terrain(self) -> bool {
        self != TileType::FireSpawn
    }

    /// Single-character symbol used by ASCII layouts and frames
    pub fn symbol(self) -> char {
        match self {
            TileType::Soil => '.',
            TileType::Asphalt => '#',
            TileType::Water => '~',
            TileType::WoodStruct => 'W',
            TileType::StoneStruct => 'S',
            TileType::Grass => '"',
            TileType::Shrub => '*',
            TileType::Tree => 'T',
            TileType::FireSpawn => 'F',
        }
    }

    /// Inverse of [`TileType::symbol`]; `,` is accepted as an alias for grass
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(TileType::Soil),
            '#' => Some(TileType::Asphalt),
            '~' => Some(TileType::Water),
            'W' => Some(TileType::WoodStruct),
            'S' => Some(TileType::StoneStruct),
            '"' | ',' => Some(TileType::Grass),
            '*' => Some(TileType::Shrub),
            'T' => Some(TileType::Tree),
            'F' => Some(TileType::FireSpawn),
            _ => None,
        }
    }
}

/// Combustion lifecycle of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CombustionState {
    #[default]
    Unburned,
    Burning {
        steps_remaining: u32,
    },
    Burned,
}

impl CombustionState {
    #[inline]
    pub fn is_burning(self) -> bool {
        matches!(self, CombustionState::Burning { .. })
    }

    #[inline]
    pub fn is_burned(self) -> bool {
        self == CombustionState::Burned
    }
}

impl fmt::Display for CombustionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombustionState::Unburned => write!(f, "unburned"),
            CombustionState::Burning { steps_remaining } => {
                write!(f, "burning ({steps_remaining} steps left)")
            }
            CombustionState::Burned => write!(f, "burned"),
        }
    }
}

/// One grid cell: terrain, fuel properties and combustion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coord: GridCoord,
    terrain: TileType,
    /// 0-1, fixed per terrain type
    fuel_load: f32,
    /// Drives burn duration; 0 for non-flammable terrain
    bed_depth: u32,
    state: CombustionState,
    /// Set while this tile is the grid's designated ignition origin
    ignition_marker: bool,
}

impl Tile {
    /// Create an unburned tile, drawing its bed depth from `rng`
    ///
    /// # Errors
    /// Returns [`SimError::InvalidTerrain`] when `terrain` is `FireSpawn`.
    pub fn new<R: Rng>(
        coord: GridCoord,
        terrain: TileType,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let mut tile = Tile::blank(coord);
        tile.assign_terrain(terrain, rng)?;
        Ok(tile)
    }

    /// Create an unburned tile with an explicit bed depth
    ///
    /// # Errors
    /// See [`Tile::assign_terrain_with_depth`].
    pub fn with_bed_depth(
        coord: GridCoord,
        terrain: TileType,
        bed_depth: u32,
    ) -> Result<Self, SimError> {
        let mut tile = Tile::blank(coord);
        tile.assign_terrain_with_depth(terrain, bed_depth)?;
        Ok(tile)
    }

    fn blank(coord: GridCoord) -> Self {
        Tile {
            coord,
            terrain: TileType::Asphalt,
            fuel_load: 0.0,
            bed_depth: 0,
            state: CombustionState::Unburned,
            ignition_marker: false,
        }
    }

    /// Set the terrain, recompute fuel load and draw a fresh bed depth.
    ///
    /// Combustion state is left untouched, even on a burning or burned tile.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidTerrain`] when `terrain` is `FireSpawn`.
    pub fn assign_terrain<R: Rng>(
        &mut self,
        terrain: TileType,
        rng: &mut R,
    ) -> Result<(), SimError> {
        let bed_depth = match terrain.bed_depth_range() {
            Some(range) => rng.random_range(range),
            None => 0,
        };
        self.assign_terrain_with_depth(terrain, bed_depth)
    }

    /// Set the terrain with a caller-chosen bed depth.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidTerrain`] when `terrain` is `FireSpawn`, or when
    /// `bed_depth` lies outside the terrain's range (non-flammable terrain
    /// only accepts 0).
    pub fn assign_terrain_with_depth(
        &mut self,
        terrain: TileType,
        bed_depth: u32,
    ) -> Result<(), SimError> {
        if !terrain.is_terrain() {
            return Err(SimError::InvalidTerrain {
                terrain,
                reason: "fire spawn is a placement marker, not terrain".to_string(),
            });
        }
        let valid = match terrain.bed_depth_range() {
            Some(range) => range.contains(&bed_depth),
            None => bed_depth == 0,
        };
        if !valid {
            return Err(SimError::InvalidTerrain {
                terrain,
                reason: format!(
                    "bed depth {bed_depth} outside {:?}",
                    terrain.bed_depth_range()
                ),
            });
        }

        self.terrain = terrain;
        self.fuel_load = terrain.fuel_load();
        self.bed_depth = bed_depth;
        Ok(())
    }

    /// Start burning for `burn_steps` steps.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidState`] if the tile is not `Unburned`, if its
    /// terrain carries no fuel, or if `burn_steps` is zero.
    pub fn ignite(&mut self, burn_steps: u32) -> Result<(), SimError> {
        if self.state != CombustionState::Unburned {
            return Err(SimError::InvalidState {
                coord: self.coord,
                state: self.state,
                operation: "ignite",
            });
        }
        if self.fuel_load <= 0.0 || self.bed_depth == 0 {
            return Err(SimError::InvalidState {
                coord: self.coord,
                state: self.state,
                operation: "ignite non-flammable terrain",
            });
        }
        if burn_steps == 0 {
            return Err(SimError::InvalidState {
                coord: self.coord,
                state: self.state,
                operation: "ignite with zero burn duration",
            });
        }
        self.state = CombustionState::Burning {
            steps_remaining: burn_steps,
        };
        Ok(())
    }

    /// Burn for one step. Returns `true` when this call burned the tile out.
    pub fn process_step(&mut self) -> bool {
        let CombustionState::Burning { steps_remaining } = self.state else {
            return false;
        };
        let remaining = steps_remaining.saturating_sub(1);
        if remaining == 0 {
            self.state = CombustionState::Burned;
            true
        } else {
            self.state = CombustionState::Burning {
                steps_remaining: remaining,
            };
            false
        }
    }

    #[inline]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    #[inline]
    pub fn terrain(&self) -> TileType {
        self.terrain
    }

    #[inline]
    pub fn fuel_load(&self) -> f32 {
        self.fuel_load
    }

    #[inline]
    pub fn bed_depth(&self) -> u32 {
        self.bed_depth
    }

    #[inline]
    pub fn state(&self) -> CombustionState {
        self.state
    }

    #[inline]
    pub fn is_burning(&self) -> bool {
        self.state.is_burning()
    }

    #[inline]
    pub fn is_burned(&self) -> bool {
        self.state.is_burned()
    }

    /// Steps left before burn-out; 0 unless burning
    pub fn burn_steps_remaining(&self) -> u32 {
        match self.state {
            CombustionState::Burning { steps_remaining } => steps_remaining,
            _ => 0,
        }
    }

    #[inline]
    pub fn is_ignition_point(&self) -> bool {
        self.ignition_marker
    }

    pub(crate) fn set_ignition_marker(&mut self, marked: bool) {
        self.ignition_marker = marked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn soil(depth: u32) -> Tile {
        Tile::with_bed_depth(GridCoord::new(0, 0), TileType::Soil, depth).unwrap()
    }

    #[test]
    fn test_bed_depth_drawn_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for terrain in TileType::TERRAIN {
            for _ in 0..50 {
                let tile = Tile::new(GridCoord::new(0, 0), terrain, &mut rng).unwrap();
                match terrain.bed_depth_range() {
                    Some(range) => assert!(range.contains(&tile.bed_depth())),
                    None => assert_eq!(tile.bed_depth(), 0),
                }
            }
        }
    }

    #[test]
    fn test_fuel_load_zero_iff_bed_depth_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for terrain in TileType::TERRAIN {
            let tile = Tile::new(GridCoord::new(2, 3), terrain, &mut rng).unwrap();
            assert_eq!(
                tile.fuel_load() == 0.0,
                tile.bed_depth() == 0,
                "{terrain:?}"
            );
            assert_eq!(terrain.is_flammable(), tile.fuel_load() > 0.0);
        }
    }

    #[test]
    fn test_fire_spawn_is_not_terrain() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = Tile::new(GridCoord::new(0, 0), TileType::FireSpawn, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::InvalidTerrain { .. }));
    }

    #[test]
    fn test_explicit_depth_is_validated() {
        let origin = GridCoord::new(0, 0);
        assert!(Tile::with_bed_depth(origin, TileType::Tree, 2).is_err());
        assert!(Tile::with_bed_depth(origin, TileType::Water, 1).is_err());
        assert!(Tile::with_bed_depth(origin, TileType::Water, 0).is_ok());
    }

    #[test]
    fn test_ignite_then_burn_out() {
        let mut tile = soil(2);
        tile.ignite(tile.bed_depth() * 2).unwrap();
        assert!(tile.is_burning());
        assert_eq!(tile.burn_steps_remaining(), 4);

        assert!(!tile.process_step());
        assert!(!tile.process_step());
        assert!(!tile.process_step());
        assert_eq!(tile.burn_steps_remaining(), 1);
        assert!(tile.process_step());
        assert!(tile.is_burned());
        assert_eq!(tile.burn_steps_remaining(), 0);

        // Terminal: further steps are no-ops
        assert!(!tile.process_step());
        assert!(tile.is_burned());
    }

    #[test]
    fn test_ignite_rejects_non_unburned() {
        let mut tile = soil(3);
        tile.ignite(6).unwrap();
        let err = tile.ignite(6).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidState {
                state: CombustionState::Burning { steps_remaining: 6 },
                ..
            }
        ));

        let mut burned = soil(2);
        burned.ignite(1).unwrap();
        assert!(burned.process_step());
        assert!(matches!(
            burned.ignite(4),
            Err(SimError::InvalidState {
                state: CombustionState::Burned,
                ..
            })
        ));
    }

    #[test]
    fn test_ignite_rejects_zero_duration() {
        let mut tile = soil(2);
        let err = tile.ignite(0).unwrap_err();
        assert!(matches!(err, SimError::InvalidState { .. }));
        assert_eq!(tile.state(), CombustionState::Unburned);
    }

    #[test]
    fn test_non_flammable_never_ignites() {
        for terrain in [TileType::Water, TileType::Asphalt] {
            let mut tile = Tile::with_bed_depth(GridCoord::new(1, 1), terrain, 0).unwrap();
            let err = tile.ignite(5).unwrap_err();
            assert!(
                matches!(
                    err,
                    SimError::InvalidState {
                        state: CombustionState::Unburned,
                        ..
                    }
                ),
                "{terrain:?}: {err:?}"
            );
            assert_eq!(tile.state(), CombustionState::Unburned);
            assert_eq!(tile.fuel_load(), 0.0);
        }
    }

    #[test]
    fn test_process_step_noop_when_unburned() {
        let mut tile = soil(2);
        assert!(!tile.process_step());
        assert_eq!(tile.state(), CombustionState::Unburned);
    }

    #[test]
    fn test_reassign_terrain_keeps_combustion_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut tile = soil(2);
        tile.ignite(4).unwrap();
        tile.assign_terrain(TileType::Water, &mut rng).unwrap();

        assert_eq!(tile.terrain(), TileType::Water);
        assert_eq!(tile.fuel_load(), 0.0);
        assert_eq!(
            tile.state(),
            CombustionState::Burning { steps_remaining: 4 }
        );
    }

    #[test]
    fn test_symbols_round_trip() {
        for terrain in TileType::TERRAIN {
            assert_eq!(TileType::from_symbol(terrain.symbol()), Some(terrain));
        }
        assert_eq!(TileType::from_symbol(','), Some(TileType::Grass));
        assert_eq!(TileType::from_symbol('?'), None);
    }
}
