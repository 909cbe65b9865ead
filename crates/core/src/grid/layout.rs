//! ASCII terrain layouts
//!
//! Each row of text is one grid row; the first row is the northernmost
//! (highest `y`). Symbols follow [`TileType::symbol`], with `F` placing the
//! ignition marker on a Soil tile.
//!
//! ```text
//! TT""..
//! T"".~~
//! ."F.~~
//! ```

use crate::core_types::coord::GridCoord;
use crate::core_types::error::SimError;
use crate::core_types::tile::TileType;
use crate::grid::tile_grid::Grid;
use rand::Rng;

/// Build a grid from layout rows, drawing bed depths from `rng`
///
/// # Errors
/// [`SimError::EmptyGrid`] for no rows or empty rows, [`SimError::RaggedLayout`]
/// when row lengths differ, [`SimError::InvalidLayout`] for unknown symbols,
/// [`SimError::DuplicateIgnition`] for more than one `F`.
pub fn parse_layout<S, R>(rows: &[S], rng: &mut R) -> Result<Grid, SimError>
where
    S: AsRef<str>,
    R: Rng,
{
    let parsed = parse_symbols(rows)?;
    let height = parsed.len() as u32;
    let width = parsed.first().map_or(0, Vec::len) as u32;

    let mut grid = Grid::new(width, height, rng)?;
    let mut spawn = None;

    for (line, row) in parsed.iter().enumerate() {
        let y = (height as usize - 1 - line) as i32;
        for (x, &tile_type) in row.iter().enumerate() {
            let coord = GridCoord::new(x as i32, y);
            if tile_type == TileType::FireSpawn {
                if spawn.is_some() {
                    return Err(SimError::DuplicateIgnition {
                        line: line + 1,
                        column: x + 1,
                    });
                }
                spawn = Some(coord);
            } else if tile_type != TileType::Soil {
                grid.assign_terrain(coord, tile_type, rng)?;
            }
        }
    }

    if let Some(coord) = spawn {
        grid.set_ignition_tile(coord)?;
    }
    Ok(grid)
}

fn parse_symbols<S: AsRef<str>>(rows: &[S]) -> Result<Vec<Vec<TileType>>, SimError> {
    let mut expected = None;
    let mut parsed = Vec::with_capacity(rows.len());

    for (line, row) in rows.iter().enumerate() {
        let row = row.as_ref().trim_end();
        let mut types = Vec::with_capacity(row.len());
        for (column, symbol) in row.chars().enumerate() {
            let tile_type = TileType::from_symbol(symbol).ok_or(SimError::InvalidLayout {
                line: line + 1,
                column: column + 1,
                symbol,
            })?;
            types.push(tile_type);
        }

        match expected {
            None => expected = Some(types.len()),
            Some(width) if width != types.len() => {
                return Err(SimError::RaggedLayout {
                    line: line + 1,
                    expected: width,
                    found: types.len(),
                });
            }
            Some(_) => {}
        }
        parsed.push(types);
    }

    Ok(parsed)
}
