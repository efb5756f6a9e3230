//! Error types for cellgraph core.

use thiserror::Error;

use cellgraph_engine::EvalError;

/// Errors that can occur while building or recalculating a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Cell (row {row}, col {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Grid must have at least one row and one column")]
    EmptyGrid,

    #[error("Grid of {rows}x{cols} exceeds the {max} cell limit")]
    GridTooLarge { rows: usize, cols: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
