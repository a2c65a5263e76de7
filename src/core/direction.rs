//! Move directions and the line geometry they induce.
//!
//! A move decomposes the board into independent lines: rows for horizontal
//! moves, columns for vertical ones. Within a line, positions are measured as
//! an *offset from the destination edge*, so every direction is resolved by
//! the same code.
//!
//! ```
//! use tile_merge::core::Direction;
//!
//! // Row 1 of a 4x4 board, moving right: offset 0 is the rightmost cell.
//! assert_eq!(Direction::Right.cell(1, 0, 4), (1, 3));
//! assert_eq!(Direction::Right.cell(1, 3, 4), (1, 0));
//!
//! // Column 2 moving up: offset 0 is the top row.
//! assert_eq!(Direction::Up.cell(2, 0, 4), (0, 2));
//! ```

use serde::{Deserialize, Serialize};

/// A directional command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True for `Left` and `Right`, whose lines are rows.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Map `(line, offset)` to a `(row, column)` cell.
    ///
    /// `line` selects the row (horizontal) or column (vertical); `offset` is
    /// the distance from the edge tiles are moving towards.
    #[inline]
    #[must_use]
    pub const fn cell(self, line: usize, offset: usize, resolution: usize) -> (usize, usize) {
        match self {
            Direction::Left => (line, offset),
            Direction::Right => (line, resolution - 1 - offset),
            Direction::Up => (offset, line),
            Direction::Down => (resolution - 1 - offset, line),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}
