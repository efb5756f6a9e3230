//! cellgraph-core - dependency graph of formula cells.
//!
//! A [`Sheet`] owns a fixed grid of [`Cell`]s. Changing a formula rebuilds
//! that cell's edges on both sides; [`Sheet::detect_cycle_and_recompute`]
//! orders the whole grid topologically, recomputing each cell once its
//! dependencies are final, and reports whether a cycle stopped it.

pub mod config;
pub mod error;
pub mod sheet;

pub use config::SheetConfig;
pub use error::{Result, SheetError};
pub use sheet::{Cell, Cells, Recalc, Sheet};

pub use cellgraph_engine::engine::CellRef;
