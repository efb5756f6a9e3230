//! cellgraph_engine - Formula side of cellgraph: A1 references, tokenizer, Rhai evaluator.

pub(crate) mod builtins;
pub mod engine;
pub mod error;

pub use engine::{CellRef, CellValues, Evaluator, RhaiEvaluator};
pub use error::{EvalError, Result};
