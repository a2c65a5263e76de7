//! The puzzle engine and its Idle/Resolving transition latch.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, PuzzleConfig, PuzzleRng, Result, Tile, TileId, MAX_RESOLUTION};
use crate::events::{EngineEvent, EventKind, ListenerId, ListenerRegistry};
use crate::grid::Grid;
use crate::moves::{resolve, MoveResolution};
use crate::pool::{PoolStats, TilePool};
use crate::spawn::spawn;

use super::snapshot::PuzzleSnapshot;

/// State of the two-phase move protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionState {
    /// Accepting moves.
    #[default]
    Idle,
    /// A move is resolved and waiting for [`Puzzle::remap`]; further moves are dropped.
    Resolving,
}

/// Sliding-tile merge puzzle.
///
/// Owns the grid, the tile pool, the spawn RNG and its listeners. Hosts drive
/// it with [`move_tiles`](Self::move_tiles), [`remap`](Self::remap) and
/// [`generate`](Self::generate), and read tiles with [`tile_at`](Self::tile_at).
///
/// ## Example
///
/// ```
/// use tile_merge::core::Direction;
/// use tile_merge::engine::{Puzzle, PuzzleSnapshot};
///
/// let mut puzzle = Puzzle::with_seed(1);
/// puzzle
///     .restore(&PuzzleSnapshot::from_rows(&[
///         [2, 2, 0, 0],
///         [0, 0, 0, 0],
///         [0, 0, 0, 0],
///         [0, 0, 0, 0],
///     ]).unwrap())
///     .unwrap();
///
/// assert!(puzzle.move_tiles(Direction::Left));
/// assert!(puzzle.is_resolving());
///
/// // The host animates from committed to pending fields, then commits.
/// puzzle.remap();
/// assert_eq!(puzzle.tile_at(0, 0).map(|t| t.value()), Some(4));
/// assert_eq!(puzzle.score(), 4);
///
/// let remaining = puzzle.generate();
/// assert_eq!(remaining, 14);
/// ```
#[derive(Debug)]
pub struct Puzzle {
    grid: Grid,
    pool: TilePool,
    rng: PuzzleRng,
    seed_values: SmallVec<[u64; 4]>,
    state: TransitionState,
    /// Resolution of the move in flight; empty while idle.
    pending: MoveResolution,
    score: u64,
    listeners: ListenerRegistry,
}

impl Puzzle {
    /// Create a puzzle from a validated configuration.
    ///
    /// The board starts empty; call [`initialize`](Self::initialize) to start a game.
    pub fn new(config: PuzzleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Create a puzzle with the default configuration and the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(PuzzleConfig::new().with_seed(seed))
    }

    fn from_config(config: PuzzleConfig) -> Self {
        Self {
            grid: Grid::new(config.resolution),
            pool: TilePool::with_capacity(MAX_RESOLUTION * MAX_RESOLUTION),
            rng: PuzzleRng::new(config.seed),
            seed_values: config.seed_values,
            state: TransitionState::Idle,
            pending: MoveResolution::default(),
            score: 0,
            listeners: ListenerRegistry::new(),
        }
    }

    // === Game lifecycle ===

    /// Start a new game: clamp `resolution`, release every tile, reset the
    /// score, return to idle and spawn exactly one tile.
    pub fn initialize(&mut self, resolution: usize) {
        let applied = self.clear(resolution);
        debug!("initialize: requested {resolution}, using {applied}x{applied}");
        self.generate();
    }

    /// Apply a directional command.
    ///
    /// Returns `true` if the move changed the board and the engine latched
    /// into [`TransitionState::Resolving`]. Moves issued while resolving are
    /// dropped and return `false`.
    pub fn move_tiles(&mut self, direction: Direction) -> bool {
        if self.state == TransitionState::Resolving {
            debug!("dropping {direction}: a move is waiting for remap");
            return false;
        }

        let outcome = resolve(&mut self.grid, &mut self.pool, direction);
        if !outcome.changed {
            return false;
        }

        debug!(
            "{direction}: latched with {} merge(s), {} absorbed",
            outcome.merges.len(),
            outcome.absorbed.len()
        );
        self.pending = outcome;
        self.state = TransitionState::Resolving;
        self.listeners.emit(&EngineEvent::MoveStarted);
        true
    }

    /// Commit the move in flight.
    ///
    /// Every tile takes its pending position and value, the cell table is
    /// rebuilt from the new positions, absorbed tiles go back to the pool and
    /// the merged values are added to the score. No-op while idle.
    pub fn remap(&mut self) {
        if self.state == TransitionState::Idle {
            return;
        }

        let live: SmallVec<[TileId; MAX_RESOLUTION * MAX_RESOLUTION]> =
            self.grid.occupied().map(|(_, _, id)| id).collect();
        self.grid.clear_all();

        for id in live {
            let Some(tile) = self.pool.get_mut(id) else {
                continue;
            };
            tile.commit();
            let (row, column) = tile.position();
            let displaced = self.grid.set(row, column, id);
            debug_assert!(displaced.is_none(), "two tiles committed to ({row},{column})");
        }

        let pending = std::mem::take(&mut self.pending);
        for id in &pending.absorbed {
            self.pool.release(*id);
        }

        self.state = TransitionState::Idle;
        for merge in &pending.merges {
            self.score = self.score.saturating_add(merge.value);
            self.listeners.emit(&EngineEvent::Merged {
                row: merge.row,
                column: merge.column,
                value: merge.value,
            });
        }
    }

    /// Spawn one tile in a random empty cell.
    ///
    /// Returns the number of empty cells left after the spawn. `0` means the
    /// board was already full and nothing happened, or the last cell was just
    /// filled. Call only while idle.
    pub fn generate(&mut self) -> usize {
        match spawn(&mut self.grid, &mut self.pool, &mut self.rng, &self.seed_values) {
            Some(spawned) => {
                self.listeners.emit(&EngineEvent::Generated {
                    row: spawned.row,
                    column: spawned.column,
                    value: spawned.value,
                    remaining: spawned.remaining,
                });
                spawned.remaining
            }
            None => {
                debug!("generate: board full");
                0
            }
        }
    }

    // === Reading the board ===

    /// Tile at `(row, column)`; `None` if empty or outside the active board.
    #[must_use]
    pub fn tile_at(&self, row: i32, column: i32) -> Option<&Tile> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        self.grid.get(row, column).and_then(|id| self.pool.get(id))
    }

    /// Tile by handle.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.pool.get(id)
    }

    /// Tiles on the grid, row-major by the cell they occupy.
    ///
    /// This follows grid occupancy: while a move is in flight, tiles already
    /// absorbed by a merge are not included (see
    /// [`absorbed_tiles`](Self::absorbed_tiles)).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.grid.occupied().filter_map(|(_, _, id)| self.pool.get(id))
    }

    /// Tiles merged away by the move in flight. Empty while idle.
    pub fn absorbed_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.pending.absorbed.iter().filter_map(|&id| self.pool.get(id))
    }

    /// Committed values, row-major, `0` for empty cells.
    ///
    /// While a move is in flight this is still the board before the move,
    /// absorbed tiles included.
    #[must_use]
    pub fn values(&self) -> Vec<u64> {
        let r = self.grid.resolution();
        let mut values = vec![0; r * r];
        for tile in self.tiles().chain(self.absorbed_tiles()) {
            values[tile.row() * r + tile.column()] = tile.value();
        }
        values
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.grid.resolution()
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.state == TransitionState::Resolving
    }

    /// Sum of every committed merge since the last initialize/restore.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Unoccupied cells in the grid. Cells vacated by absorbed tiles count
    /// as empty while a move is in flight.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.grid.empty_count()
    }

    /// Values new tiles are drawn from.
    #[must_use]
    pub fn seed_values(&self) -> &[u64] {
        &self.seed_values
    }

    #[must_use]
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    // === Listeners ===

    /// Register a listener for every event.
    pub fn subscribe(&mut self, callback: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Register a listener for one kind of event.
    pub fn subscribe_to(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EngineEvent) + 'static,
    ) -> ListenerId {
        self.listeners.subscribe_to(kind, callback)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // === Snapshots ===

    /// Capture the committed board, score and RNG position.
    #[must_use]
    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            resolution: self.grid.resolution(),
            cells: self.values(),
            score: self.score,
            rng: Some(self.rng.state()),
        }
    }

    /// Replace the board with `snapshot`.
    ///
    /// Any move in flight is discarded. No events are emitted.
    pub fn restore(&mut self, snapshot: &PuzzleSnapshot) -> Result<()> {
        snapshot.validate()?;

        let r = self.clear(snapshot.resolution);

        for row in 0..r {
            for column in 0..r {
                let value = snapshot.value_at(row, column);
                if value == 0 {
                    continue;
                }
                let id = self.pool.acquire();
                if let Some(tile) = self.pool.get_mut(id) {
                    *tile = Tile::new(row, column, value);
                }
                self.grid.set(row, column, id);
            }
        }

        self.score = snapshot.score;
        if let Some(rng) = &snapshot.rng {
            self.rng = PuzzleRng::from_state(rng);
        }
        debug!("restored {r}x{r} board with {} tiles", self.grid.tile_count());
        Ok(())
    }

    /// Release everything and return to an empty idle board.
    fn clear(&mut self, resolution: usize) -> usize {
        self.pending = MoveResolution::default();
        self.state = TransitionState::Idle;
        self.score = 0;
        self.grid.reset(resolution, &mut self.pool)
    }
}

impl std::fmt::Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.grid.resolution();
        let values = self.values();
        for row in 0..r {
            for column in 0..r {
                if column > 0 {
                    f.write_str(" ")?;
                }
                match values[row * r + column] {
                    0 => write!(f, "{:>5}", ".")?,
                    v => write!(f, "{v:>5}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PuzzleError;

    fn puzzle(rows: &[[u64; 4]]) -> Puzzle {
        let mut puzzle = Puzzle::with_seed(7);
        puzzle.restore(&PuzzleSnapshot::from_rows(rows).unwrap()).unwrap();
        puzzle
    }

    #[test]
    fn test_new_starts_empty_and_idle() {
        let puzzle = Puzzle::new(PuzzleConfig::new().with_resolution(5)).unwrap();
        assert_eq!(puzzle.resolution(), 5);
        assert_eq!(puzzle.empty_count(), 25);
        assert_eq!(puzzle.state(), TransitionState::Idle);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = PuzzleConfig::new().with_seed_values(&[3]);
        assert!(matches!(Puzzle::new(config), Err(PuzzleError::InvalidSeedValue(3))));
    }

    #[test]
    fn test_initialize_spawns_one_tile() {
        let mut puzzle = Puzzle::with_seed(1);
        puzzle.initialize(6);
        assert_eq!(puzzle.resolution(), 6);
        assert_eq!(puzzle.tiles().count(), 1);
        assert_eq!(puzzle.empty_count(), 35);
    }

    #[test]
    fn test_initialize_releases_previous_tiles() {
        let mut puzzle = puzzle(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        puzzle.initialize(4);

        let stats = puzzle.pool_stats();
        assert_eq!(stats.active, 1);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn test_move_latches_and_drops_followups() {
        let mut puzzle = puzzle(&[[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);

        assert!(puzzle.move_tiles(Direction::Left));
        assert!(puzzle.is_resolving());
        assert!(!puzzle.move_tiles(Direction::Right));

        // Pending fields still describe the first move.
        let tile = puzzle.tile_at(0, 3).unwrap();
        assert_eq!(tile.next_position(), (0, 0));
    }

    #[test]
    fn test_unchanged_move_stays_idle() {
        let mut puzzle = puzzle(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(!puzzle.move_tiles(Direction::Left));
        assert!(!puzzle.move_tiles(Direction::Up));
        assert_eq!(puzzle.state(), TransitionState::Idle);
    }

    #[test]
    fn test_remap_commits_and_releases() {
        let mut puzzle = puzzle(&[[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
        assert!(puzzle.move_tiles(Direction::Left));
        assert_eq!(puzzle.absorbed_tiles().count(), 2);

        puzzle.remap();

        assert_eq!(&puzzle.values()[..4], &[4, 8, 0, 0]);
        assert_eq!(puzzle.score(), 12);
        assert_eq!(puzzle.absorbed_tiles().count(), 0);
        assert_eq!(puzzle.pool_stats().active, 2);
        assert_eq!(puzzle.pool_stats().inactive, 2);
        assert!(puzzle.tiles().all(|t| !t.moved() && !t.merged()));
    }

    #[test]
    fn test_remap_while_idle_is_noop() {
        let mut puzzle = puzzle(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = puzzle.snapshot();
        puzzle.remap();
        assert_eq!(puzzle.snapshot(), before);
    }

    #[test]
    fn test_tile_at_bounds() {
        let mut puzzle = Puzzle::with_seed(3);
        puzzle.initialize(5);
        assert!(puzzle.tile_at(5, 5).is_none());
        assert!(puzzle.tile_at(-1, 0).is_none());
        assert!(puzzle.tile_at(0, i32::MAX).is_none());
    }

    #[test]
    fn test_restore_discards_move_in_flight() {
        let mut puzzle = puzzle(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let snapshot = puzzle.snapshot();
        assert!(puzzle.move_tiles(Direction::Left));

        puzzle.restore(&snapshot).unwrap();

        assert_eq!(puzzle.state(), TransitionState::Idle);
        assert_eq!(puzzle.absorbed_tiles().count(), 0);
        assert_eq!(&puzzle.values()[..4], &[2, 2, 0, 0]);
    }

    #[test]
    fn test_values_during_resolving_keep_absorbed_tiles() {
        let mut puzzle = puzzle(&[[2, 2, 0, 0], [4, 0, 4, 0], [0; 4], [0; 4]]);
        let before = puzzle.values();
        assert!(puzzle.move_tiles(Direction::Left));

        assert_eq!(puzzle.values(), before);
        assert_eq!(puzzle.tiles().count(), 2);
        assert_eq!(puzzle.empty_count(), 14);

        let mut copy = Puzzle::with_seed(7);
        copy.restore(&puzzle.snapshot()).unwrap();
        assert_eq!(copy.values(), before);
    }

    #[test]
    fn test_score_saturates() {
        let snapshot = PuzzleSnapshot::from_rows(&[[2u64, 2, 0, 0], [0; 4], [0; 4], [0; 4]])
            .unwrap()
            .with_score(u64::MAX - 1);
        let mut puzzle = Puzzle::with_seed(7);
        puzzle.restore(&snapshot).unwrap();

        assert!(puzzle.move_tiles(Direction::Left));
        puzzle.remap();

        assert_eq!(puzzle.score(), u64::MAX);
    }

    #[test]
    fn test_display() {
        let puzzle = puzzle(&[[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]);
        let text = puzzle.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].trim_start().starts_with('2'));
        assert!(lines[3].ends_with("2048"));
    }
}
