//! A single node of the dependency graph.
//!
//! A [`Cell`] owns its formula, its last computed value, two in-degree
//! counters and two address-keyed adjacency sets. The sets mirror each other
//! across cells: if `B` is in `A`'s dependencies then `A` is in `B`'s
//! dependents. Keeping both halves in sync needs access to the peer cell, so
//! the two-sided operations live on [`Cells`](super::Cells); this type only
//! exposes the one-sided primitives.

use cellgraph_engine::engine::CellRef;
use indexmap::IndexSet;
use std::fmt;

/// A cell in the grid.
#[derive(Clone, Debug)]
pub struct Cell {
    address: CellRef,
    formula: String,
    value: i64,
    /// Number of distinct cells this one reads from.
    degree: usize,
    /// Working copy of `degree` for the topological pass. Goes to -1 once
    /// the cell has been emitted.
    remaining_degree: isize,
    depends_on: IndexSet<CellRef>,
    depended_on_by: IndexSet<CellRef>,
}

impl Cell {
    /// Create an empty cell: no formula, value 0, no edges.
    pub fn new(address: CellRef) -> Cell {
        Cell {
            address,
            formula: String::new(),
            value: 0,
            degree: 0,
            remaining_degree: 0,
            depends_on: IndexSet::new(),
            depended_on_by: IndexSet::new(),
        }
    }

    pub fn address(&self) -> CellRef {
        self.address
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn remaining_degree(&self) -> isize {
        self.remaining_degree
    }

    /// Cells this cell reads from, in the order the edges were installed.
    pub fn dependencies(&self) -> impl Iterator<Item = &CellRef> {
        self.depends_on.iter()
    }

    /// Cells that read from this cell.
    pub fn dependents(&self) -> impl Iterator<Item = &CellRef> {
        self.depended_on_by.iter()
    }

    pub fn depends_on_contains(&self, cell: &CellRef) -> bool {
        self.depends_on.contains(cell)
    }

    pub fn is_depended_on_by(&self, cell: &CellRef) -> bool {
        self.depended_on_by.contains(cell)
    }

    /// Replace the formula text. Edges are not touched.
    pub(crate) fn set_formula(&mut self, formula: &str) {
        self.formula.clear();
        self.formula.push_str(formula);
    }

    pub(crate) fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// Record that this cell reads from `cell`. Both degree counters move
    /// together; adding an existing dependency is a no-op.
    pub(crate) fn add_dependency(&mut self, cell: CellRef) -> bool {
        if !self.depends_on.insert(cell) {
            return false;
        }
        self.degree += 1;
        self.remaining_degree += 1;
        true
    }

    pub(crate) fn add_dependent(&mut self, cell: CellRef) -> bool {
        self.depended_on_by.insert(cell)
    }

    /// Remove exactly `cell` from the dependents, keeping the others in order.
    pub(crate) fn remove_dependent(&mut self, cell: &CellRef) -> bool {
        self.depended_on_by.shift_remove(cell)
    }

    /// Empty the dependency set, handing back what it held.
    pub(crate) fn take_dependencies(&mut self) -> IndexSet<CellRef> {
        std::mem::take(&mut self.depends_on)
    }

    pub(crate) fn decrement_remaining_degree(&mut self) {
        self.remaining_degree -= 1;
    }

    pub(crate) fn restore_remaining_degree(&mut self) {
        self.remaining_degree = self.degree as isize;
    }

    pub(crate) fn zero_counters(&mut self) {
        self.degree = 0;
        self.remaining_degree = 0;
        self.value = 0;
    }

    /// Display text: empty for a cell without a formula, otherwise the value.
    pub fn rendered_text(&self) -> String {
        if self.formula.is_empty() {
            String::new()
        } else {
            self.value.to_string()
        }
    }

    /// Multi-line dump of the full node state.
    pub fn debug_string(&self) -> String {
        let mut out = format!(
            "Cell {} (row {}, col {})\nFormula: {}\nValue: {}\nDegree: {} (remaining {})\n",
            self.address,
            self.address.row,
            self.address.col,
            self.formula,
            self.value,
            self.degree,
            self.remaining_degree,
        );
        if !self.depends_on.is_empty() {
            out.push_str(&format!("Depends on: {}\n", join_refs(&self.depends_on)));
        }
        if !self.depended_on_by.is_empty() {
            out.push_str(&format!("Depended on by: {}\n", join_refs(&self.depended_on_by)));
        }
        out
    }
}

fn join_refs(refs: &IndexSet<CellRef>) -> String {
    refs.iter()
        .map(|cell_ref| cell_ref.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty() {
        let cell = Cell::new(CellRef::new(2, 3));
        assert_eq!(cell.address(), CellRef::new(2, 3));
        assert_eq!(cell.formula(), "");
        assert_eq!(cell.value(), 0);
        assert_eq!(cell.degree(), 0);
        assert_eq!(cell.remaining_degree(), 0);
        assert_eq!(cell.dependencies().count(), 0);
        assert_eq!(cell.dependents().count(), 0);
    }

    #[test]
    fn add_dependency_is_idempotent() {
        let a1 = CellRef::new(0, 0);
        let mut once = Cell::new(CellRef::new(1, 0));
        let mut twice = Cell::new(CellRef::new(1, 0));

        assert!(once.add_dependency(a1));
        assert!(twice.add_dependency(a1));
        assert!(!twice.add_dependency(a1));

        assert_eq!(once.degree(), twice.degree());
        assert_eq!(once.remaining_degree(), twice.remaining_degree());
        assert_eq!(
            once.dependencies().collect::<Vec<_>>(),
            twice.dependencies().collect::<Vec<_>>()
        );
        assert_eq!(twice.degree(), 1);
        assert!(twice.depends_on_contains(&a1));
    }

    #[test]
    fn remove_dependent_keeps_others() {
        let mut cell = Cell::new(CellRef::new(0, 0));
        let b1 = CellRef::new(0, 1);
        let c1 = CellRef::new(0, 2);
        let d1 = CellRef::new(0, 3);
        cell.add_dependent(b1);
        cell.add_dependent(c1);
        cell.add_dependent(d1);

        assert!(cell.remove_dependent(&c1));
        assert!(!cell.remove_dependent(&c1));
        assert_eq!(cell.dependents().copied().collect::<Vec<_>>(), vec![b1, d1]);
    }

    #[test]
    fn rendered_text_depends_on_formula() {
        let mut cell = Cell::new(CellRef::new(0, 0));
        cell.set_value(12);
        assert_eq!(cell.rendered_text(), "");

        cell.set_formula("12");
        assert_eq!(cell.rendered_text(), "12");
        assert_eq!(cell.to_string(), "12");

        cell.set_value(-3);
        assert_eq!(cell.to_string(), "-3");
    }

    #[test]
    fn debug_string_lists_edges() {
        let mut cell = Cell::new(CellRef::new(1, 1));
        cell.set_formula("A1 + C1");
        cell.add_dependency(CellRef::new(0, 0));
        cell.add_dependency(CellRef::new(0, 2));
        cell.add_dependent(CellRef::new(2, 1));

        let dump = cell.debug_string();
        assert!(dump.starts_with("Cell B2 (row 1, col 1)\n"));
        assert!(dump.contains("Formula: A1 + C1\n"));
        assert!(dump.contains("Degree: 2 (remaining 2)\n"));
        assert!(dump.contains("Depends on: A1, C1\n"));
        assert!(dump.contains("Depended on by: B3\n"));
    }

    #[test]
    fn debug_string_omits_empty_edge_lists() {
        let dump = Cell::new(CellRef::new(0, 0)).debug_string();
        assert!(!dump.contains("Depends on"));
        assert!(!dump.contains("Depended on by"));
    }
}
