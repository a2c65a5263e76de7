//! Puzzle bindings for Python.

use log::warn;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use crate::core::{Direction, PuzzleConfig, PuzzleError, Tile};
use crate::engine::{Puzzle, PuzzleSnapshot};
use crate::events::EngineEvent;

fn to_py_err(err: PuzzleError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Read-only copy of a tile.
#[pyclass(name = "Tile")]
#[derive(Clone, Debug)]
pub struct PyTile(pub Tile);

#[pymethods]
impl PyTile {
    #[getter]
    fn row(&self) -> usize {
        self.0.row()
    }

    #[getter]
    fn column(&self) -> usize {
        self.0.column()
    }

    #[getter]
    fn value(&self) -> u64 {
        self.0.value()
    }

    #[getter]
    fn next_row(&self) -> usize {
        self.0.next_row()
    }

    #[getter]
    fn next_column(&self) -> usize {
        self.0.next_column()
    }

    #[getter]
    fn next_value(&self) -> u64 {
        self.0.next_value()
    }

    #[getter]
    fn moved(&self) -> bool {
        self.0.moved()
    }

    #[getter]
    fn merged(&self) -> bool {
        self.0.merged()
    }

    fn __repr__(&self) -> String {
        format!(
            "Tile(({}, {}) {} -> ({}, {}) {})",
            self.0.row(),
            self.0.column(),
            self.0.value(),
            self.0.next_row(),
            self.0.next_column(),
            self.0.next_value()
        )
    }
}

fn event_to_dict<'py>(py: Python<'py>, event: &EngineEvent) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("kind", event.kind().to_string())?;
    match *event {
        EngineEvent::Generated {
            row,
            column,
            value,
            remaining,
        } => {
            dict.set_item("row", row)?;
            dict.set_item("column", column)?;
            dict.set_item("value", value)?;
            dict.set_item("remaining", remaining)?;
        }
        EngineEvent::Merged { row, column, value } => {
            dict.set_item("row", row)?;
            dict.set_item("column", column)?;
            dict.set_item("value", value)?;
        }
        EngineEvent::MoveStarted => {}
    }
    Ok(dict)
}

/// Python wrapper for Puzzle.
///
/// Listeners hold Python callables, so the object stays on the thread that
/// created it.
#[pyclass(name = "Puzzle", unsendable)]
pub struct PyPuzzle {
    puzzle: Puzzle,
}

#[pymethods]
impl PyPuzzle {
    /// Create a new puzzle. The board is empty until `initialize` is called.
    ///
    /// # Arguments
    /// - resolution: Board edge (clamped to 4-6)
    /// - seed: RNG seed for reproducible games
    /// - seed_values: Values for spawned tiles (default [2, 4])
    #[new]
    #[pyo3(signature = (resolution = 4, seed = 0, seed_values = None))]
    fn new(resolution: usize, seed: u64, seed_values: Option<Vec<u64>>) -> PyResult<Self> {
        let mut config = PuzzleConfig::new().with_resolution(resolution).with_seed(seed);
        if let Some(values) = seed_values {
            config = config.with_seed_values(&values);
        }
        let puzzle = Puzzle::new(config).map_err(to_py_err)?;
        Ok(Self { puzzle })
    }

    fn initialize(&mut self, resolution: usize) {
        self.puzzle.initialize(resolution);
    }

    /// Apply a move ("up", "down", "left", "right"). Returns True if it latched.
    #[pyo3(name = "move")]
    fn move_tiles(&mut self, direction: &str) -> PyResult<bool> {
        let direction: Direction = direction.parse().map_err(PyValueError::new_err)?;
        Ok(self.puzzle.move_tiles(direction))
    }

    fn remap(&mut self) {
        self.puzzle.remap();
    }

    fn generate(&mut self) -> usize {
        self.puzzle.generate()
    }

    fn tile_at(&self, row: i32, column: i32) -> Option<PyTile> {
        self.puzzle.tile_at(row, column).cloned().map(PyTile)
    }

    fn tiles(&self) -> Vec<PyTile> {
        self.puzzle.tiles().cloned().map(PyTile).collect()
    }

    /// Tiles merged away by the move in flight, for animating them into
    /// their survivor. Empty while idle.
    fn absorbed_tiles(&self) -> Vec<PyTile> {
        self.puzzle.absorbed_tiles().cloned().map(PyTile).collect()
    }

    /// Committed values, row-major, 0 for empty cells.
    fn values(&self) -> Vec<u64> {
        self.puzzle.values()
    }

    #[getter]
    fn resolution(&self) -> usize {
        self.puzzle.resolution()
    }

    #[getter]
    fn score(&self) -> u64 {
        self.puzzle.score()
    }

    fn is_resolving(&self) -> bool {
        self.puzzle.is_resolving()
    }

    /// Register `callback(event: dict)`. Returns a listener id.
    fn subscribe(&mut self, callback: PyObject) -> u32 {
        let id = self.puzzle.subscribe(move |event| {
            Python::with_gil(|py| {
                let result = event_to_dict(py, event).and_then(|dict| callback.call1(py, (dict,)));
                if let Err(err) = result {
                    warn!("python listener failed: {err}");
                }
            });
        });
        id.raw()
    }

    fn unsubscribe(&mut self, listener_id: u32) -> bool {
        self.puzzle.unsubscribe(crate::events::ListenerId::new(listener_id))
    }

    /// Serialize the committed board to bytes.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.puzzle.snapshot().to_bytes().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Restore a board produced by `snapshot`.
    fn restore(&mut self, data: &[u8]) -> PyResult<()> {
        let snapshot = PuzzleSnapshot::from_bytes(data).map_err(to_py_err)?;
        self.puzzle.restore(&snapshot).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "Puzzle({}x{}, score={})",
            self.puzzle.resolution(),
            self.puzzle.resolution(),
            self.puzzle.score()
        )
    }

    fn __str__(&self) -> String {
        self.puzzle.to_string()
    }
}
