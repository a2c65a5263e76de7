//! Error types for the fallible edges of the engine.
//!
//! Gameplay itself never fails. Only configuration validation and snapshot
//! encoding/restoring can produce a `PuzzleError`.

/// Errors from configuration and snapshot handling.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    /// No values configured for spawned tiles.
    #[error("seed value set is empty")]
    EmptySeedValues,

    /// A configured spawn value is not a power of two >= 2.
    #[error("invalid seed value {0}: tile values must be powers of two >= 2")]
    InvalidSeedValue(u64),

    /// A snapshot does not describe a valid board.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Binary encoding or decoding failed.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] bincode::Error),
}

/// Shorthand for results carrying a [`PuzzleError`].
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Is `value` a legal tile value (a power of two, at least 2)?
#[inline]
#[must_use]
pub fn is_tile_value(value: u64) -> bool {
    value >= 2 && value.is_power_of_two()
}
