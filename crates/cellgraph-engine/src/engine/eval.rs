//! Formula evaluation.
//!
//! [`Evaluator`] is the capability the dependency graph consumes: it lists
//! the cells a formula reads and computes an integer from a formula plus a
//! read-only view of the grid. [`RhaiEvaluator`] implements it on top of a
//! Rhai engine with the spreadsheet builtins registered, optionally with
//! user-defined functions compiled from an external script.

use dashmap::DashMap;
use rhai::{AST, Dynamic, Engine};
use std::collections::HashMap;
use std::sync::Arc;

use super::cell_ref::CellRef;
use super::deps::extract_dependencies;
use super::preprocess::preprocess_formula;
use crate::error::{EvalError, Result};

/// Shared cache of cell values read by the `CELL` builtin.
///
/// Refilled before every evaluation with exactly the formula's references.
pub type ValueCache = Arc<DashMap<CellRef, i64>>;

/// Read-only view of current cell values.
pub trait CellValues {
    /// Value of `cell`; cells that hold nothing read as 0.
    fn value(&self, cell: &CellRef) -> i64;
}

impl CellValues for HashMap<CellRef, i64> {
    fn value(&self, cell: &CellRef) -> i64 {
        self.get(cell).copied().unwrap_or(0)
    }
}

/// Turns formula text into dependencies and values.
pub trait Evaluator {
    /// Cells referenced by `formula`, lazily, in a stable order.
    fn references<'a>(&self, formula: &'a str) -> Box<dyn Iterator<Item = CellRef> + 'a>;

    /// Compute `formula` against `values`. Every referenced cell must
    /// already hold its final value.
    fn evaluate(&self, formula: &str, values: &dyn CellValues) -> Result<i64>;
}

/// Rhai-backed evaluator with spreadsheet builtins registered.
pub struct RhaiEvaluator {
    engine: Engine,
    value_cache: ValueCache,
    custom_ast: Option<AST>,
}

impl RhaiEvaluator {
    pub fn new() -> Self {
        Self::with_cache(ValueCache::default())
    }

    /// Create an evaluator whose `CELL` builtin reads the given cache.
    pub fn with_cache(value_cache: ValueCache) -> Self {
        let mut engine = Engine::new();
        crate::builtins::register_builtins(&mut engine, value_cache.clone());
        RhaiEvaluator {
            engine,
            value_cache,
            custom_ast: None,
        }
    }

    /// Create an evaluator with custom functions compiled from `custom_script`.
    pub fn with_functions(custom_script: &str) -> Result<Self> {
        let mut evaluator = Self::new();
        let ast = evaluator.engine.compile(custom_script)?;
        evaluator.custom_ast = Some(ast);
        Ok(evaluator)
    }

    pub fn value_cache(&self) -> &ValueCache {
        &self.value_cache
    }

    fn eval_script(&self, script: &str) -> Result<Dynamic> {
        match &self.custom_ast {
            Some(custom_ast) => {
                let formula_ast = self.engine.compile(script)?;
                let merged = custom_ast.merge(&formula_ast);
                Ok(self.engine.eval_ast::<Dynamic>(&merged)?)
            }
            None => Ok(self.engine.eval::<Dynamic>(script)?),
        }
    }
}

impl Default for RhaiEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for RhaiEvaluator {
    fn references<'a>(&self, formula: &'a str) -> Box<dyn Iterator<Item = CellRef> + 'a> {
        Box::new(extract_dependencies(formula))
    }

    fn evaluate(&self, formula: &str, values: &dyn CellValues) -> Result<i64> {
        if formula.trim().is_empty() {
            return Ok(0);
        }

        self.value_cache.clear();
        for cell_ref in extract_dependencies(formula) {
            self.value_cache.insert(cell_ref, values.value(&cell_ref));
        }

        let script = preprocess_formula(formula);
        let result = self.eval_script(&script)?;
        result.as_int().map_err(|found| EvalError::NotInteger {
            found: found.to_string(),
        })
    }
}
