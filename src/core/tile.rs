//! Tile identification and tile records.
//!
//! Every tile on the board lives in a slot of the [`TilePool`](crate::pool::TilePool)
//! arena and is addressed by a `TileId`.
//!
//! ## ID Layout
//!
//! A `TileId` is a slot index plus a generation counter. Releasing a slot bumps
//! its generation, so an id held across a release never aliases whatever tile
//! reuses the slot later.
//!
//! ```
//! use tile_merge::pool::TilePool;
//!
//! let mut pool = TilePool::new();
//! let first = pool.acquire();
//! pool.release(first);
//!
//! let second = pool.acquire();
//! assert_eq!(first.index(), second.index()); // slot reused
//! assert_ne!(first, second);                 // but the old id is stale
//! assert!(pool.get(first).is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Handle to a tile slot in the pool arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    /// Create a tile ID from a slot index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the pool.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this id was handed out.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({}v{})", self.index, self.generation)
    }
}

/// A numbered board occupant with a committed and a pending position/value.
///
/// The committed fields (`row`, `column`, `value`) describe the board as it
/// is. The pending fields (`next_*`) are written by move resolution and
/// describe where the tile is going; a renderer interpolates between the two
/// until the move is committed with [`Puzzle::remap`](crate::engine::Puzzle::remap).
///
/// Hosts only ever see `&Tile`; mutation goes through the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) row: usize,
    pub(crate) column: usize,
    pub(crate) value: u64,
    pub(crate) next_row: usize,
    pub(crate) next_column: usize,
    pub(crate) next_value: u64,
}

impl Tile {
    /// Create a resting tile whose pending fields equal its committed ones.
    #[must_use]
    pub fn new(row: usize, column: usize, value: u64) -> Self {
        Self {
            row,
            column,
            value,
            next_row: row,
            next_column: column,
            next_value: value,
        }
    }

    #[inline]
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn next_row(&self) -> usize {
        self.next_row
    }

    #[inline]
    #[must_use]
    pub fn next_column(&self) -> usize {
        self.next_column
    }

    #[inline]
    #[must_use]
    pub fn next_value(&self) -> u64 {
        self.next_value
    }

    /// Committed `(row, column)`.
    #[inline]
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    /// Pending `(row, column)`.
    #[inline]
    #[must_use]
    pub fn next_position(&self) -> (usize, usize) {
        (self.next_row, self.next_column)
    }

    /// Does the pending position differ from the committed one?
    #[inline]
    #[must_use]
    pub fn moved(&self) -> bool {
        self.row != self.next_row || self.column != self.next_column
    }

    /// Has this tile taken part in a merge during the current resolution?
    #[inline]
    #[must_use]
    pub fn merged(&self) -> bool {
        self.next_value != 0 && self.value != self.next_value
    }

    /// Drop any pending move, pointing the `next_*` fields back at the
    /// committed ones.
    pub(crate) fn settle(&mut self) {
        self.next_row = self.row;
        self.next_column = self.column;
        self.next_value = self.value;
    }

    /// Apply the pending fields.
    pub(crate) fn commit(&mut self) {
        self.row = self.next_row;
        self.column = self.next_column;
        self.value = self.next_value;
    }
}
