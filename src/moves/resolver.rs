//! Move resolution: slide and merge without committing.
//!
//! Each line is scanned starting from the tile nearest the destination edge
//! and moving away from it. A tile walks towards the edge until it meets a
//! blocker:
//!
//! - no blocker: it slides to the edge;
//! - an unmerged blocker of equal value: the moving tile is absorbed. It
//!   leaves the grid at once and shares the blocker's target, and the blocker
//!   takes the doubled value as its `next_value`, which marks it merged;
//! - anything else: it stops one cell short of the blocker's target.
//!
//! Because the blocker is marked merged, a third equal tile stops behind it
//! instead of merging again, so `[2, 2, 2, 2]` left becomes `[4, 4, 0, 0]`.

use log::trace;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, TileId, MAX_RESOLUTION};
use crate::grid::Grid;
use crate::pool::TilePool;

/// One merge produced by a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    /// Tile that stays on the board and carries the doubled value.
    pub survivor: TileId,
    /// Tile removed from the board, released at commit.
    pub absorbed: TileId,
    /// Destination row of both tiles.
    pub row: usize,
    /// Destination column of both tiles.
    pub column: usize,
    /// Value after the merge.
    pub value: u64,
}

/// Outcome of resolving one direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResolution {
    /// Did any tile move or merge?
    pub changed: bool,

    /// Tiles taken off the grid by merges. They stay live in the pool until
    /// the move is committed so a renderer can still animate them.
    pub absorbed: SmallVec<[TileId; 8]>,

    /// Merges in scan order.
    pub merges: SmallVec<[MergeRecord; 8]>,
}

impl MoveResolution {
    /// Sum of the values produced by merges.
    #[must_use]
    pub fn merged_value(&self) -> u64 {
        self.merges.iter().fold(0, |total, m| total.saturating_add(m.value))
    }
}

/// Compute pending positions and values for every tile for `direction`.
///
/// Pending fields of every live tile are first reset to its committed ones,
/// so a resolution never inherits stale state from an earlier one.
pub fn resolve(grid: &mut Grid, pool: &mut TilePool, direction: Direction) -> MoveResolution {
    for (_, _, id) in grid.occupied() {
        if let Some(tile) = pool.get_mut(id) {
            tile.settle();
        }
    }

    let mut outcome = MoveResolution::default();
    for line in 0..grid.resolution() {
        resolve_line(grid, pool, direction, line, &mut outcome);
    }
    outcome
}

fn resolve_line(
    grid: &mut Grid,
    pool: &mut TilePool,
    direction: Direction,
    line: usize,
    outcome: &mut MoveResolution,
) {
    let r = grid.resolution();
    // Resolved offset (from the destination edge) of the tile that started at each offset.
    let mut targets = [0usize; MAX_RESOLUTION];

    for offset in 0..r {
        let (row, column) = direction.cell(line, offset, r);
        let Some(id) = grid.get(row, column) else {
            continue;
        };
        let Some(value) = pool.get(id).map(|t| t.value) else {
            continue;
        };

        let mut target = 0;
        let mut merge = None;
        for k in (0..offset).rev() {
            let (blocker_row, blocker_column) = direction.cell(line, k, r);
            let Some(blocker_id) = grid.get(blocker_row, blocker_column) else {
                continue;
            };
            let Some(blocker) = pool.get(blocker_id) else {
                continue;
            };
            // A sum that does not fit in u64 is not a legal merge.
            match value.checked_add(blocker.value) {
                Some(sum) if !blocker.merged() && blocker.value == value => {
                    target = targets[k];
                    merge = Some((blocker_id, sum));
                }
                _ => target = targets[k] + 1,
            }
            break;
        }
        targets[offset] = target;

        let (next_row, next_column) = direction.cell(line, target, r);
        let mut next_value = value;

        if let Some((survivor, sum)) = merge {
            next_value = sum;
            if let Some(blocker) = pool.get_mut(survivor) {
                blocker.next_value = next_value;
            }
            grid.clear(row, column);
            outcome.absorbed.push(id);
            outcome.merges.push(MergeRecord {
                survivor,
                absorbed: id,
                row: next_row,
                column: next_column,
                value: next_value,
            });
            trace!(
                "{direction}: ({row},{column}) merges into ({next_row},{next_column}) -> {next_value}"
            );
        }

        if let Some(tile) = pool.get_mut(id) {
            tile.next_row = next_row;
            tile.next_column = next_column;
            tile.next_value = next_value;
            outcome.changed |= tile.moved() || tile.merged();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tile;

    fn board(rows: &[[u64; 4]]) -> (Grid, TilePool) {
        let mut grid = Grid::new(rows.len());
        let mut pool = TilePool::new();
        for (row, values) in rows.iter().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                if value != 0 {
                    let id = pool.acquire();
                    *pool.get_mut(id).unwrap() = Tile::new(row, column, value);
                    grid.set(row, column, id);
                }
            }
        }
        (grid, pool)
    }

    /// Pending board: survivors placed at their next position with next value.
    fn pending(grid: &Grid, pool: &TilePool) -> Vec<Vec<u64>> {
        let r = grid.resolution();
        let mut out = vec![vec![0; r]; r];
        for (_, _, id) in grid.occupied() {
            let tile = pool.get(id).unwrap();
            assert_eq!(out[tile.next_row()][tile.next_column()], 0, "two tiles share a target");
            out[tile.next_row()][tile.next_column()] = tile.next_value();
        }
        out
    }

    #[test]
    fn test_slide_left() {
        let (mut grid, mut pool) = board(&[[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);

        assert!(outcome.changed);
        assert!(outcome.merges.is_empty());
        assert_eq!(pending(&grid, &pool)[0], vec![2, 0, 0, 0]);
    }

    #[test]
    fn test_pair_merges() {
        let (mut grid, mut pool) = board(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);

        assert!(outcome.changed);
        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(outcome.merged_value(), 4);
        assert_eq!(pending(&grid, &pool)[0], vec![4, 0, 0, 0]);

        // The moving tile is off the grid but still live until commit.
        let absorbed = outcome.absorbed[0];
        assert_eq!(grid.get(0, 1), None);
        let tile = pool.get(absorbed).unwrap();
        assert_eq!(tile.next_position(), (0, 0));
        assert_eq!(tile.next_value(), 4);
    }

    #[test]
    fn test_four_equal_merge_pairwise() {
        let (mut grid, mut pool) = board(&[[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);

        assert_eq!(outcome.merges.len(), 2);
        assert_eq!(pending(&grid, &pool)[0], vec![4, 4, 0, 0]);
    }

    #[test]
    fn test_three_equal_nearest_pair_merges() {
        let (mut grid, mut pool) = board(&[[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        resolve(&mut grid, &mut pool, Direction::Left);
        assert_eq!(pending(&grid, &pool)[0], vec![4, 2, 0, 0]);

        let (mut grid, mut pool) = board(&[[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        resolve(&mut grid, &mut pool, Direction::Right);
        assert_eq!(pending(&grid, &pool)[0], vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_merged_tile_is_not_merged_again() {
        // 4 2 2 -> the 2s merge into 4, which must not fold into the leading 4.
        let (mut grid, mut pool) = board(&[[4, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        resolve(&mut grid, &mut pool, Direction::Left);
        assert_eq!(pending(&grid, &pool)[0], vec![4, 4, 0, 0]);
    }

    #[test]
    fn test_gap_merge() {
        let (mut grid, mut pool) = board(&[[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        resolve(&mut grid, &mut pool, Direction::Right);
        assert_eq!(pending(&grid, &pool)[0], vec![0, 0, 0, 4]);
    }

    #[test]
    fn test_vertical_moves() {
        let rows = [[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 8]];

        let (mut grid, mut pool) = board(&rows);
        resolve(&mut grid, &mut pool, Direction::Up);
        let up = pending(&grid, &pool);
        assert_eq!(up.iter().map(|r| r[0]).collect::<Vec<_>>(), vec![4, 4, 0, 0]);
        assert_eq!(up[0][3], 8);

        let (mut grid, mut pool) = board(&rows);
        resolve(&mut grid, &mut pool, Direction::Down);
        let down = pending(&grid, &pool);
        assert_eq!(down.iter().map(|r| r[0]).collect::<Vec<_>>(), vec![0, 0, 4, 4]);
        assert_eq!(down[3][3], 8);
    }

    #[test]
    fn test_blocked_line_is_unchanged() {
        let (mut grid, mut pool) = board(&[[2, 4, 2, 4], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);
        assert!(!outcome.changed);
        assert!(outcome.absorbed.is_empty());
    }

    #[test]
    fn test_single_tile_at_edge_is_unchanged() {
        let (mut grid, mut pool) = board(&[[0; 4], [0; 4], [0; 4], [0, 0, 0, 2]]);
        assert!(!resolve(&mut grid, &mut pool, Direction::Right).changed);
        assert!(!resolve(&mut grid, &mut pool, Direction::Down).changed);
        assert!(resolve(&mut grid, &mut pool, Direction::Up).changed);
    }

    #[test]
    fn test_resolve_resets_stale_pending_fields() {
        let (mut grid, mut pool) = board(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(resolve(&mut grid, &mut pool, Direction::Right).changed);
        // Resolving again towards the tile's own edge must not see the old target.
        assert!(!resolve(&mut grid, &mut pool, Direction::Left).changed);
    }

    #[test]
    fn test_values_are_not_capped() {
        let big = 1u64 << 40;
        let (mut grid, mut pool) = board(&[[big, big, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);
        assert_eq!(outcome.merged_value(), big * 2);
    }

    #[test]
    fn test_overflowing_pair_does_not_merge() {
        let top = 1u64 << 63;
        let (mut grid, mut pool) = board(&[[top, top, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);

        assert!(!outcome.changed);
        assert!(outcome.merges.is_empty());
        assert_eq!(pending(&grid, &pool)[0], vec![top, top, 0, 0]);

        // The largest pair that still fits merges normally.
        let half = 1u64 << 62;
        let (mut grid, mut pool) = board(&[[0, half, 0, half], [0; 4], [0; 4], [0; 4]]);
        let outcome = resolve(&mut grid, &mut pool, Direction::Left);
        assert_eq!(outcome.merged_value(), top);
    }
}
