//! Cycle detection and recalculation.
//!
//! The whole grid is ordered with Kahn's algorithm. Each round scans the
//! cells in row-major order and queues every cell whose remaining degree is
//! zero; draining the queue consumes those cells (their own counter drops to
//! -1 so they are never queued again), decrements their dependents and
//! recomputes their values. All of a queued cell's dependencies were
//! consumed in an earlier round, so their values are already final.
//!
//! A round that queues nothing while cells are still unprocessed means the
//! rest of the graph sits on or behind a cycle.
//!
//! Remaining degrees are restored to the true degree on every exit, so the
//! check can be repeated after a formula is fixed.

use std::collections::VecDeque;

use cellgraph_engine::engine::{CellRef, Evaluator};

use super::Sheet;
use crate::error::Result;

/// Outcome of [`Sheet::detect_cycle_and_recompute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recalc {
    /// Every cell was ordered and recomputed.
    Acyclic,
    /// Ordering stalled. Holds the cells that could not be ordered, in
    /// row-major order: the members of a cycle and everything downstream.
    Cyclic(Vec<CellRef>),
}

impl Recalc {
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Recalc::Cyclic(_))
    }
}

impl<E: Evaluator> Sheet<E> {
    /// Order the grid topologically, recomputing each cell as it is reached.
    ///
    /// Cells processed before a cycle is found keep their new values; cells
    /// on or behind the cycle keep their old ones. Evaluator errors abort
    /// the pass and are returned as-is.
    pub fn detect_cycle_and_recompute(&mut self) -> Result<Recalc> {
        let outcome = self.topological_pass();
        self.cells.restore_remaining_degrees();

        match &outcome {
            Ok(Recalc::Acyclic) => tracing::debug!(cells = self.cells.len(), "recalculated"),
            Ok(Recalc::Cyclic(blocked)) => {
                tracing::warn!(blocked = ?blocked, "circular dependency detected")
            }
            Err(e) => tracing::debug!(error = %e, "recalculation aborted"),
        }
        outcome
    }

    fn topological_pass(&mut self) -> Result<Recalc> {
        let total = self.cells.len();
        let mut counter = 0usize;
        let mut queue: VecDeque<CellRef> = VecDeque::new();
        let mut round = 0usize;

        while counter != total {
            let before = counter;
            for cell in self.cells.iter() {
                if cell.remaining_degree() == 0 {
                    counter += 1;
                    queue.push_back(cell.address());
                }
            }

            if counter == before {
                let blocked = self
                    .cells
                    .iter()
                    .filter(|cell| cell.remaining_degree() > 0)
                    .map(|cell| cell.address())
                    .collect();
                return Ok(Recalc::Cyclic(blocked));
            }

            round += 1;
            tracing::trace!(round, ready = counter - before, "ordered cells");

            while let Some(cell) = queue.pop_front() {
                self.cells.decrement_dependents_for_sort_step(cell);
                self.cells.recompute(cell, &self.evaluator)?;
            }
        }

        Ok(Recalc::Acyclic)
    }
}
