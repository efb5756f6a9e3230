//! Sheet state and edge maintenance.

mod cell;
mod cycle;
mod graph;

pub use cell::Cell;
pub use cycle::Recalc;
pub use graph::Cells;

use cellgraph_engine::engine::{CellRef, Evaluator, RhaiEvaluator};

use crate::config::SheetConfig;
use crate::error::{Result, SheetError};

/// A fixed-size grid of formula cells and the evaluator that computes them.
pub struct Sheet<E = RhaiEvaluator> {
    cells: Cells,
    evaluator: E,
}

impl Sheet<RhaiEvaluator> {
    /// Create a `rows` x `cols` sheet evaluated with Rhai.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_evaluator(rows, cols, RhaiEvaluator::new())
    }
}

impl<E: Evaluator> Sheet<E> {
    pub fn with_evaluator(rows: usize, cols: usize, evaluator: E) -> Result<Self> {
        SheetConfig { rows, cols }.validate()?;
        Ok(Sheet {
            cells: Cells::new(rows, cols),
            evaluator,
        })
    }

    pub fn from_config(config: &SheetConfig, evaluator: E) -> Result<Self> {
        Self::with_evaluator(config.rows, config.cols, evaluator)
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell> {
        self.cell(&CellRef::new(row, col))
    }

    pub fn cell(&self, cell_ref: &CellRef) -> Result<&Cell> {
        self.cells
            .get(cell_ref)
            .ok_or_else(|| self.out_of_range(cell_ref))
    }

    /// Display text of a cell (empty when it has no formula).
    pub fn rendered_text(&self, row: usize, col: usize) -> Result<String> {
        Ok(self.cell_at(row, col)?.rendered_text())
    }

    /// Full diagnostic dump of a cell's node state.
    pub fn dump(&self, row: usize, col: usize) -> Result<String> {
        Ok(self.cell_at(row, col)?.debug_string())
    }

    /// Give the cell at (`row`, `col`) a new formula and rebuild its edges.
    ///
    /// Every referenced cell is checked against the grid before anything is
    /// touched, so an out-of-range reference leaves the cell as it was.
    /// Values are not recomputed here; run
    /// [`detect_cycle_and_recompute`](Self::detect_cycle_and_recompute).
    pub fn update_cell(&mut self, row: usize, col: usize, formula: &str) -> Result<()> {
        let target = CellRef::new(row, col);
        if !self.cells.contains(&target) {
            return Err(self.out_of_range(&target));
        }

        let mut dependencies = Vec::new();
        for dependency in self.evaluator.references(formula) {
            if !self.cells.contains(&dependency) {
                return Err(self.out_of_range(&dependency));
            }
            dependencies.push(dependency);
        }

        self.cells.reset(target);
        if let Some(cell) = self.cells.get_mut(&target) {
            cell.set_formula(formula);
        }
        for dependency in dependencies {
            self.cells.add_edge(target, dependency);
        }

        tracing::debug!(
            cell = %target,
            formula,
            dependencies = self.cells.get(&target).map_or(0, Cell::degree),
            "rebuilt dependency edges"
        );
        Ok(())
    }

    pub fn set_cell(&mut self, cell_ref: &CellRef, formula: &str) -> Result<()> {
        self.update_cell(cell_ref.row, cell_ref.col, formula)
    }

    /// Remove a cell's formula and outgoing edges.
    pub fn clear_cell(&mut self, cell_ref: &CellRef) -> Result<()> {
        self.set_cell(cell_ref, "")
    }

    fn out_of_range(&self, cell_ref: &CellRef) -> SheetError {
        SheetError::OutOfRange {
            row: cell_ref.row,
            col: cell_ref.col,
            rows: self.cells.rows(),
            cols: self.cells.cols(),
        }
    }
}
