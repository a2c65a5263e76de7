//! Puzzle configuration.
//!
//! Hosts configure the engine at startup with a `PuzzleConfig`:
//! - `resolution`: board edge length, clamped into `[MIN_RESOLUTION, MAX_RESOLUTION]`
//! - `seed_values`: values a spawned tile can take, picked uniformly
//! - `seed`: RNG seed for reproducible games

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{is_tile_value, PuzzleError, Result};

/// Smallest supported board edge.
pub const MIN_RESOLUTION: usize = 4;

/// Largest supported board edge.
pub const MAX_RESOLUTION: usize = 6;

/// Default spawn values.
pub const DEFAULT_SEED_VALUES: [u64; 2] = [2, 4];

/// Clamp a requested resolution into the supported range.
///
/// ```
/// use tile_merge::core::clamp_resolution;
///
/// assert_eq!(clamp_resolution(0), 4);
/// assert_eq!(clamp_resolution(5), 5);
/// assert_eq!(clamp_resolution(99), 6);
/// ```
#[inline]
#[must_use]
pub fn clamp_resolution(resolution: usize) -> usize {
    resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION)
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Requested board edge. Out-of-range values are clamped, not rejected.
    pub resolution: usize,

    /// Values for newly spawned tiles.
    pub seed_values: SmallVec<[u64; 4]>,

    /// RNG seed.
    pub seed: u64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            resolution: MIN_RESOLUTION,
            seed_values: SmallVec::from_slice(&DEFAULT_SEED_VALUES),
            seed: 0,
        }
    }
}

impl PuzzleConfig {
    /// Create the default configuration (4x4, spawns of 2 or 4, seed 0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Replace the spawn values.
    #[must_use]
    pub fn with_seed_values(mut self, values: &[u64]) -> Self {
        self.seed_values = SmallVec::from_slice(values);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The resolution the engine will actually use.
    #[must_use]
    pub fn effective_resolution(&self) -> usize {
        clamp_resolution(self.resolution)
    }

    /// Check the spawn values.
    pub fn validate(&self) -> Result<()> {
        if self.seed_values.is_empty() {
            return Err(PuzzleError::EmptySeedValues);
        }
        if let Some(&bad) = self.seed_values.iter().find(|&&v| !is_tile_value(v)) {
            return Err(PuzzleError::InvalidSeedValue(bad));
        }
        Ok(())
    }
}
