//! Formula engine API.
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`tokenize`], [`Token`] - Split a formula into references and text
//! - [`extract_dependencies`] - Lazily list the cells a formula reads
//! - [`preprocess_formula`] - Rewrite references for Rhai evaluation
//! - [`Evaluator`], [`CellValues`] - The capability the dependency graph consumes
//! - [`RhaiEvaluator`] - Rhai-backed evaluator with spreadsheet builtins

mod cell_ref;
mod deps;
mod eval;
mod preprocess;

pub use cell_ref::CellRef;
pub use deps::{Token, Tokens, extract_dependencies, tokenize};
pub use eval::{CellValues, Evaluator, RhaiEvaluator, ValueCache};
pub use preprocess::preprocess_formula;
