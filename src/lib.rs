//! # tile-merge
//!
//! A deterministic sliding-tile merge puzzle engine (the 2048 family) built
//! to sit under a rendering host.
//!
//! ## Design Principles
//!
//! 1. **Two-phase moves**: A move is first *resolved* (pending positions and
//!    values written on every tile) and only later *committed* by `remap`,
//!    so a host can animate between the two.
//!
//! 2. **No timing**: The engine owns no clock or timer. Hosts decide when a
//!    move is visually complete.
//!
//! 3. **No failures in play**: Out-of-range reads are empty, resolutions are
//!    clamped, moves during an animation are dropped, a full board is `0`.
//!
//! ## Architecture
//!
//! - **Arena Pool**: Tiles live in a generational arena with a free-list, so
//!   merges and resets recycle slots instead of allocating.
//!
//! - **Instance-owned Events**: Listeners are registered on a `Puzzle`, not on
//!   a global bus.
//!
//! ## Modules
//!
//! - `core`: Tiles, directions, RNG, configuration, errors
//! - `pool`: Tile arena with free-list
//! - `grid`: Cell occupancy table
//! - `moves`: Slide/merge resolution
//! - `spawn`: Random tile placement
//! - `events`: Engine events and listener registry
//! - `engine`: The `Puzzle` state machine and snapshots

pub mod core;
pub mod pool;
pub mod grid;
pub mod moves;
pub mod spawn;
pub mod events;
pub mod engine;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Direction, Tile, TileId,
    PuzzleConfig, PuzzleError, PuzzleRng, PuzzleRngState,
    MIN_RESOLUTION, MAX_RESOLUTION,
};

pub use crate::pool::{PoolStats, TilePool};

pub use crate::grid::Grid;

pub use crate::moves::{resolve, MergeRecord, MoveResolution};

pub use crate::spawn::{spawn, Spawned};

pub use crate::events::{EngineEvent, EventKind, ListenerId, ListenerRegistry};

pub use crate::engine::{Puzzle, PuzzleSnapshot, TransitionState};
