//! The node arena and the two-sided edge operations.
//!
//! [`Cells`] is a dense row-major array holding every [`Cell`] of a sheet.
//! Cells refer to each other only by [`CellRef`], so any operation that must
//! touch both ends of an edge goes through the arena.

use cellgraph_engine::engine::{CellRef, CellValues, Evaluator};

use super::cell::Cell;
use crate::error::Result;

/// Fixed-shape storage for all cells of a sheet.
#[derive(Clone, Debug)]
pub struct Cells {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Cells {
    pub(crate) fn new(rows: usize, cols: usize) -> Cells {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(CellRef::new(row, col)));
            }
        }
        Cells { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn index(&self, cell: &CellRef) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }

    pub fn get(&self, cell: &CellRef) -> Option<&Cell> {
        self.index(cell).map(|i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, cell: &CellRef) -> Option<&mut Cell> {
        self.index(cell).map(|i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Install `dependent -> dependency` on both sides.
    pub(crate) fn add_edge(&mut self, dependent: CellRef, dependency: CellRef) {
        if let Some(cell) = self.get_mut(&dependent) {
            cell.add_dependency(dependency);
        }
        self.register_as_dependent_of(dependent, dependency);
    }

    /// Mirror half of an edge: list `dependent` among `dependency`'s dependents.
    pub(crate) fn register_as_dependent_of(&mut self, dependent: CellRef, dependency: CellRef) {
        if let Some(cell) = self.get_mut(&dependency) {
            cell.add_dependent(dependent);
        }
    }

    /// Drop every outgoing edge of `cell` and its mirror on the other end.
    ///
    /// `cell`'s own dependents are left alone; they belong to the cells that
    /// read from it.
    pub(crate) fn clear_all_dependencies(&mut self, cell: CellRef) {
        let Some(node) = self.get_mut(&cell) else {
            return;
        };
        for dependency in node.take_dependencies() {
            if let Some(dep) = self.get_mut(&dependency) {
                dep.remove_dependent(&cell);
            }
        }
    }

    /// Consume `cell` in the topological pass: its own remaining degree and
    /// that of every dependent drop by one.
    pub(crate) fn decrement_dependents_for_sort_step(&mut self, cell: CellRef) {
        let Some(node) = self.get_mut(&cell) else {
            return;
        };
        node.decrement_remaining_degree();
        let dependents: Vec<CellRef> = node.dependents().copied().collect();
        for dependent in dependents {
            if let Some(dep) = self.get_mut(&dependent) {
                dep.decrement_remaining_degree();
            }
        }
    }

    /// Zero the counters and value of `cell` and tear down its outgoing edges.
    pub(crate) fn reset(&mut self, cell: CellRef) {
        let Some(node) = self.get_mut(&cell) else {
            return;
        };
        node.zero_counters();
        if node.dependencies().next().is_some() {
            self.clear_all_dependencies(cell);
        }
    }

    /// Re-evaluate `cell` from the current values of the grid.
    ///
    /// The caller guarantees every dependency already holds its final value.
    pub(crate) fn recompute<E>(&mut self, cell: CellRef, evaluator: &E) -> Result<()>
    where
        E: Evaluator + ?Sized,
    {
        let Some(node) = self.get(&cell) else {
            return Ok(());
        };
        let value = if node.formula().is_empty() {
            0
        } else {
            evaluator.evaluate(node.formula(), &*self)?
        };
        if let Some(node) = self.get_mut(&cell) {
            node.set_value(value);
        }
        Ok(())
    }

    pub(crate) fn restore_remaining_degrees(&mut self) {
        for cell in &mut self.cells {
            cell.restore_remaining_degree();
        }
    }
}

impl CellValues for Cells {
    fn value(&self, cell: &CellRef) -> i64 {
        self.get(cell).map(Cell::value).unwrap_or(0)
    }
}
