//! Python bindings for the tile-merge engine.
//!
//! # Quick Start
//!
//! ```python
//! import tile_merge as tm
//!
//! puzzle = tm.Puzzle(resolution=4, seed=42)
//! puzzle.subscribe(lambda event: print(event["kind"]))
//! puzzle.initialize(4)
//!
//! if puzzle.move("left"):
//!     # animate using tile.row/column -> tile.next_row/next_column
//!     puzzle.remap()
//!     if puzzle.generate() == 0:
//!         print("board full")
//! ```

use pyo3::prelude::*;

mod py_puzzle;

pub use py_puzzle::*;

/// tile_merge: a sliding-tile merge puzzle engine.
#[pymodule]
fn tile_merge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPuzzle>()?;
    m.add_class::<PyTile>()?;
    Ok(())
}
