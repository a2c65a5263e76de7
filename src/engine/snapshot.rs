//! Board snapshots for checkpointing and for setting up fixed positions.
//!
//! A snapshot captures the *committed* board only. Taking one while a move
//! is in flight records the board as it was before that move.

use serde::{Deserialize, Serialize};

use crate::core::{is_tile_value, PuzzleError, PuzzleRngState, Result, MAX_RESOLUTION, MIN_RESOLUTION};

/// Serializable committed board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    /// Board edge, in `[MIN_RESOLUTION, MAX_RESOLUTION]`.
    pub resolution: usize,

    /// Row-major tile values, `0` for an empty cell.
    pub cells: Vec<u64>,

    /// Accumulated merge score.
    pub score: u64,

    /// Spawn RNG position. `None` keeps the restoring puzzle's own stream.
    pub rng: Option<PuzzleRngState>,
}

impl PuzzleSnapshot {
    /// Build a snapshot from literal rows.
    ///
    /// ```
    /// use tile_merge::engine::PuzzleSnapshot;
    ///
    /// let snapshot = PuzzleSnapshot::from_rows(&[
    ///     [2, 2, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 4, 0],
    ///     [0, 0, 0, 0],
    /// ])
    /// .unwrap();
    /// assert_eq!(snapshot.value_at(2, 2), 4);
    /// assert_eq!(snapshot.tile_count(), 3);
    /// ```
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> Result<Self> {
        let resolution = rows.len();
        let mut cells = Vec::with_capacity(resolution * resolution);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != resolution {
                return Err(PuzzleError::InvalidSnapshot(format!(
                    "row {index} has {} cells, expected {resolution}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }

        let snapshot = Self {
            resolution,
            cells,
            score: 0,
            rng: None,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Set the score carried by this snapshot.
    #[must_use]
    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    /// Check dimensions and tile values.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(PuzzleError::InvalidSnapshot(format!(
                "resolution {} outside {MIN_RESOLUTION}..={MAX_RESOLUTION}",
                self.resolution
            )));
        }
        let expected = self.resolution * self.resolution;
        if self.cells.len() != expected {
            return Err(PuzzleError::InvalidSnapshot(format!(
                "{} cells for resolution {}, expected {expected}",
                self.cells.len(),
                self.resolution
            )));
        }
        if let Some(&bad) = self.cells.iter().find(|&&v| v != 0 && !is_tile_value(v)) {
            return Err(PuzzleError::InvalidSnapshot(format!(
                "cell value {bad} is not a power of two >= 2"
            )));
        }
        Ok(())
    }

    /// Committed value at `(row, column)`, `0` if empty or out of range.
    #[must_use]
    pub fn value_at(&self, row: usize, column: usize) -> u64 {
        if row >= self.resolution || column >= self.resolution {
            return 0;
        }
        self.cells.get(row * self.resolution + column).copied().unwrap_or(0)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with bincode and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
