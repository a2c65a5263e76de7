//! Grid state: the single source of truth for cell occupancy.
//!
//! Storage is always `MAX_RESOLUTION x MAX_RESOLUTION`; only the active
//! `resolution x resolution` window is addressable. Reads outside the window
//! return `None` rather than panicking.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{clamp_resolution, TileId, MAX_RESOLUTION, MIN_RESOLUTION};
use crate::pool::TilePool;

/// Cells of the active window, row-major. Sized for a full 6x6 board.
pub type CellList = SmallVec<[(usize, usize); MAX_RESOLUTION * MAX_RESOLUTION]>;

/// N x N table of optional tile handles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    resolution: usize,
    cells: [[Option<TileId>; MAX_RESOLUTION]; MAX_RESOLUTION],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(MIN_RESOLUTION)
    }
}

impl Grid {
    /// Create an empty grid. `resolution` is clamped.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution: clamp_resolution(resolution),
            cells: [[None; MAX_RESOLUTION]; MAX_RESOLUTION],
        }
    }

    /// Active board edge.
    #[inline]
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Is `(row, column)` inside the active window?
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, row: usize, column: usize) -> bool {
        row < self.resolution && column < self.resolution
    }

    /// Tile at `(row, column)`, or `None` if empty or out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<TileId> {
        if self.in_bounds(row, column) {
            self.cells[row][column]
        } else {
            None
        }
    }

    /// Put `tile` at `(row, column)`, returning whatever was there.
    ///
    /// Out-of-range writes are ignored and return `None`.
    pub fn set(&mut self, row: usize, column: usize, tile: TileId) -> Option<TileId> {
        if !self.in_bounds(row, column) {
            return None;
        }
        self.cells[row][column].replace(tile)
    }

    /// Empty `(row, column)`, returning the tile that was there.
    pub fn clear(&mut self, row: usize, column: usize) -> Option<TileId> {
        if !self.in_bounds(row, column) {
            return None;
        }
        self.cells[row][column].take()
    }

    /// Release every tile to `pool`, empty all cells, and switch to the
    /// clamped `resolution`. Returns the resolution actually applied.
    pub fn reset(&mut self, resolution: usize, pool: &mut TilePool) -> usize {
        pool.release_all();
        self.cells = [[None; MAX_RESOLUTION]; MAX_RESOLUTION];
        self.resolution = clamp_resolution(resolution);
        self.resolution
    }

    /// Empty every cell of the active window without touching the pool.
    pub(crate) fn clear_all(&mut self) {
        for row in self.cells.iter_mut().take(self.resolution) {
            for cell in row.iter_mut().take(self.resolution) {
                *cell = None;
            }
        }
    }

    /// Occupied cells as `(row, column, tile)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, TileId)> + '_ {
        let r = self.resolution;
        (0..r).flat_map(move |row| {
            (0..r).filter_map(move |column| self.cells[row][column].map(|id| (row, column, id)))
        })
    }

    /// Empty cells of the active window, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> CellList {
        let r = self.resolution;
        (0..r)
            .flat_map(|row| (0..r).map(move |column| (row, column)))
            .filter(|&(row, column)| self.cells[row][column].is_none())
            .collect()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.occupied().count()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.resolution * self.resolution - self.tile_count()
    }

    /// No empty cell left?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }
}
