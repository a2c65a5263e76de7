//! The puzzle engine: transition coordination, commit, and snapshots.
//!
//! ## Move Protocol
//!
//! ```text
//!            move_tiles (changed)
//!   Idle ───────────────────────────▶ Resolving
//!    ▲  │                                │  │
//!    │  └─ move_tiles (unchanged)        │  └─ move_tiles: dropped
//!    │                                   │
//!    └───────────── remap ◀──────────────┘
//! ```
//!
//! After `remap` the host calls `generate`; a return of `0` is the only
//! board-full signal the engine gives.
//!
//! The engine never looks at the clock. How long a host waits between
//! `move_tiles` and `remap` is entirely the host's business, and a latched
//! move cannot be cancelled except by `initialize` or `restore`.

mod puzzle;
mod snapshot;

pub use puzzle::{Puzzle, TransitionState};
pub use snapshot::PuzzleSnapshot;
