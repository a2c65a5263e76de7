//! Core types: tiles, directions, RNG, configuration, errors.
//!
//! Everything here is plain data with no knowledge of the board or the
//! move protocol; the stateful parts build on top of it.

pub mod tile;
pub mod direction;
pub mod rng;
pub mod config;
pub mod error;

pub use tile::{Tile, TileId};
pub use direction::Direction;
pub use rng::{PuzzleRng, PuzzleRngState};
pub use config::{
    clamp_resolution, PuzzleConfig, DEFAULT_SEED_VALUES, MAX_RESOLUTION, MIN_RESOLUTION,
};
pub use error::{is_tile_value, PuzzleError, Result};
