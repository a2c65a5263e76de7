//! Spawn generation: one new tile in a uniformly random empty cell.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{PuzzleRng, Tile};
use crate::grid::Grid;
use crate::pool::TilePool;

/// A tile placed by [`spawn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawned {
    pub row: usize,
    pub column: usize,
    pub value: u64,
    /// Empty cells left after the placement.
    pub remaining: usize,
}

/// Place one tile with a value drawn from `values`.
///
/// Returns `None` without touching the grid or pool when the board is full,
/// or when `values` is empty.
pub fn spawn(
    grid: &mut Grid,
    pool: &mut TilePool,
    rng: &mut PuzzleRng,
    values: &[u64],
) -> Option<Spawned> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let (row, column) = empty[rng.gen_range_usize(0..empty.len())];
    let value = *rng.choose(values)?;

    let id = pool.acquire();
    if let Some(tile) = pool.get_mut(id) {
        *tile = Tile::new(row, column, value);
    }
    grid.set(row, column, id);

    let remaining = empty.len() - 1;
    trace!("spawned {value} at ({row},{column}), {remaining} empty");
    Some(Spawned {
        row,
        column,
        value,
        remaining,
    })
}
