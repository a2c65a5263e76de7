//! Directional move resolution.
//!
//! Resolution is the first half of the two-phase move protocol: it writes
//! pending (`next_*`) fields on every tile and reports whether anything
//! changed, but leaves committed fields alone. Committing is
//! [`Puzzle::remap`](crate::engine::Puzzle::remap).
//!
//! ## Example Usage
//!
//! ```
//! use tile_merge::core::{Direction, Tile};
//! use tile_merge::grid::Grid;
//! use tile_merge::moves::resolve;
//! use tile_merge::pool::TilePool;
//!
//! let mut grid = Grid::new(4);
//! let mut pool = TilePool::new();
//! for column in 0..2 {
//!     let id = pool.acquire();
//!     *pool.get_mut(id).unwrap() = Tile::new(0, column, 2);
//!     grid.set(0, column, id);
//! }
//!
//! let outcome = resolve(&mut grid, &mut pool, Direction::Left);
//! assert!(outcome.changed);
//! assert_eq!(outcome.merged_value(), 4);
//! ```

mod resolver;

pub use crate::core::Direction;
pub use resolver::{resolve, MergeRecord, MoveResolution};
