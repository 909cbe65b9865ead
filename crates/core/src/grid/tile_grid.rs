//! 2D tile grid with Moore-neighborhood lookup and a single ignition origin
//!
//! Tiles are stored row-major (`y * width + x`) and each tile carries its own
//! integer coordinate, so nothing ever has to be recovered from a label.

use crate::core_types::coord::GridCoord;
use crate::core_types::error::SimError;
use crate::core_types::tile::{CombustionState, Tile, TileType};
use rand::Rng;
use tracing::debug;

/// Moore-neighborhood offsets in lookup order: N, S, E, W, NE, SE, NW, SW.
///
/// Spread attempts follow this order, which keeps runs reproducible with a
/// scripted random source.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Fixed-size grid of tiles
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major: [y * width + x]
    tiles: Vec<Tile>,
    /// Designated ignition origin, at most one
    ignition: Option<GridCoord>,
}

impl Grid {
    /// Create a grid where every tile is Soil, bed depths drawn from `rng`
    ///
    /// # Errors
    /// Returns [`SimError::EmptyGrid`] if either dimension is zero.
    pub fn new<R: Rng>(width: u32, height: u32, rng: &mut R) -> Result<Self, SimError> {
        Grid::build(width, height, |coord| Tile::new(coord, TileType::Soil, rng))
    }

    /// Create a grid of one terrain with the same bed depth everywhere
    ///
    /// # Errors
    /// Returns [`SimError::EmptyGrid`] for a zero dimension, or
    /// [`SimError::InvalidTerrain`] if `bed_depth` does not fit `terrain`.
    pub fn uniform(
        width: u32,
        height: u32,
        terrain: TileType,
        bed_depth: u32,
    ) -> Result<Self, SimError> {
        Grid::build(width, height, |coord| {
            Tile::with_bed_depth(coord, terrain, bed_depth)
        })
    }

    fn build<F>(width: u32, height: u32, mut make_tile: F) -> Result<Self, SimError>
    where
        F: FnMut(GridCoord) -> Result<Tile, SimError>,
    {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(make_tile(GridCoord::new(x as i32, y as i32))?);
            }
        }

        debug!("Created {}x{} tile grid", width, height);
        Ok(Grid {
            width,
            height,
            tiles,
            ignition: None,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; a grid has at least one tile
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Row-major index of `coord`, `None` when out of bounds
    #[inline]
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        let in_bounds = coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height;
        in_bounds.then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }

    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.index_of(coord).is_some()
    }

    /// Tile at `coord` (bounds-checked)
    pub fn tile_at(&self, coord: GridCoord) -> Option<&Tile> {
        self.index_of(coord).map(|idx| &self.tiles[idx])
    }

    /// Like [`Grid::tile_at`] but reports a missing tile as an error
    ///
    /// # Errors
    /// Returns [`SimError::NotFound`] if `coord` is off the grid.
    pub fn tile(&self, coord: GridCoord) -> Result<&Tile, SimError> {
        self.tile_at(coord).ok_or(SimError::NotFound { coord })
    }

    pub(crate) fn tile_mut(&mut self, coord: GridCoord) -> Result<&mut Tile, SimError> {
        match self.index_of(coord) {
            Some(idx) => Ok(&mut self.tiles[idx]),
            None => Err(SimError::NotFound { coord }),
        }
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// In-bounds Moore neighbors of `coord`, in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbor_coords(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&offset| coord + offset)
            .filter(|&neighbor| self.contains(neighbor))
    }

    /// Neighbor tiles of `coord`, in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbors_of(&self, coord: GridCoord) -> Vec<&Tile> {
        self.neighbor_coords(coord)
            .filter_map(|neighbor| self.tile_at(neighbor))
            .collect()
    }

    /// Move the ignition marker to `coord`.
    ///
    /// The previous ignition tile loses its marker but keeps its combustion
    /// state. Nothing is ignited here.
    ///
    /// # Errors
    /// Returns [`SimError::NotFound`] if `coord` is off the grid.
    pub fn set_ignition_tile(&mut self, coord: GridCoord) -> Result<(), SimError> {
        let idx = self.index_of(coord).ok_or(SimError::NotFound { coord })?;

        if let Some(previous) = self.ignition.take() {
            if let Some(prev_idx) = self.index_of(previous) {
                self.tiles[prev_idx].set_ignition_marker(false);
            }
        }
        self.tiles[idx].set_ignition_marker(true);
        self.ignition = Some(coord);

        debug!("Ignition point set at {}", coord);
        Ok(())
    }

    #[inline]
    pub fn has_ignition_tile(&self) -> bool {
        self.ignition.is_some()
    }

    #[inline]
    pub fn ignition_tile(&self) -> Option<GridCoord> {
        self.ignition
    }

    /// Assign terrain at `coord`, drawing a fresh bed depth
    ///
    /// # Errors
    /// [`SimError::NotFound`] off the grid, [`SimError::InvalidTerrain`] for `FireSpawn`.
    pub fn assign_terrain<R: Rng>(
        &mut self,
        coord: GridCoord,
        terrain: TileType,
        rng: &mut R,
    ) -> Result<(), SimError> {
        self.tile_mut(coord)?.assign_terrain(terrain, rng)
    }

    /// Assign terrain at `coord` with an explicit bed depth
    ///
    /// # Errors
    /// [`SimError::NotFound`] off the grid, [`SimError::InvalidTerrain`] for
    /// `FireSpawn` or an out-of-range depth.
    pub fn assign_terrain_with_depth(
        &mut self,
        coord: GridCoord,
        terrain: TileType,
        bed_depth: u32,
    ) -> Result<(), SimError> {
        self.tile_mut(coord)?
            .assign_terrain_with_depth(terrain, bed_depth)
    }

    /// Apply a brush stroke from an input layer.
    ///
    /// `FireSpawn` moves the ignition marker here. Any other type repaints the
    /// terrain, unless the tile already has that terrain (its bed depth is
    /// then kept rather than redrawn).
    ///
    /// # Errors
    /// Returns [`SimError::NotFound`] if `coord` is off the grid.
    pub fn paint<R: Rng>(
        &mut self,
        coord: GridCoord,
        brush: TileType,
        rng: &mut R,
    ) -> Result<(), SimError> {
        if brush == TileType::FireSpawn {
            return self.set_ignition_tile(coord);
        }
        let tile = self.tile_mut(coord)?;
        if tile.terrain() == brush {
            return Ok(());
        }
        tile.assign_terrain(brush, rng)
    }

    /// Combustion state of every tile, row-major
    pub fn combustion_snapshot(&self) -> Vec<CombustionState> {
        self.tiles.iter().map(Tile::state).collect()
    }

    /// Text frame, north row first: `@` burning, `x` burned, `F` ignition
    /// marker, otherwise the terrain symbol
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height as usize);
        for y in (0..self.height).rev() {
            let row_start = y as usize * self.width as usize;
            for tile in &self.tiles[row_start..row_start + self.width as usize] {
                let symbol = match tile.state() {
                    CombustionState::Burning { .. } => '@',
                    CombustionState::Burned => 'x',
                    CombustionState::Unburned if tile.is_ignition_point() => 'F',
                    CombustionState::Unburned => tile.terrain().symbol(),
                };
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }
}
