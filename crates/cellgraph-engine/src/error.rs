//! Error types for formula evaluation.

use rhai::{EvalAltResult, ParseError};
use thiserror::Error;

/// Errors raised while compiling or evaluating a formula.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Rhai error: {0}")]
    Rhai(
        #[from]
        #[source]
        Box<EvalAltResult>,
    ),

    #[error("Rhai compile error: {0}")]
    Parse(#[from] ParseError),

    #[error("Formula produced {found}, expected an integer")]
    NotInteger { found: String },
}

pub type Result<T> = std::result::Result<T, EvalError>;
