//! Builtin functions registered on the formula engine.
//!
//! `CELL(row, col)` reads from the shared [`ValueCache`]; everything else is
//! plain integer arithmetic. The cache only holds the cells the current
//! formula declares, so a `CELL` call with computed indices that land
//! anywhere else is an error rather than a stale read.

use rhai::{Engine, EvalAltResult, INT, Position};

use crate::engine::{CellRef, ValueCache};

/// Register spreadsheet builtins on a Rhai engine.
pub(crate) fn register_builtins(engine: &mut Engine, value_cache: ValueCache) {
    // CELL(row, col): current integer value of a referenced cell
    engine.register_fn(
        "CELL",
        move |row: INT, col: INT| -> Result<INT, Box<EvalAltResult>> {
            let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) else {
                return Err(invalid_arg(&format!("CELL({}, {}): negative index", row, col)));
            };
            value_cache
                .get(&CellRef::new(r, c))
                .map(|v| *v)
                .ok_or_else(|| {
                    invalid_arg(&format!(
                        "CELL({}, {}) is not a reference of this formula",
                        row, col
                    ))
                })
        },
    );

    engine.register_fn("ABS", |x: INT| x.wrapping_abs());
    engine.register_fn("MIN", |a: INT, b: INT| a.min(b));
    engine.register_fn("MAX", |a: INT, b: INT| a.max(b));
    engine.register_fn("CLAMP", |x: INT, lo: INT, hi: INT| x.max(lo).min(hi));
}

fn invalid_arg(message: &str) -> Box<EvalAltResult> {
    EvalAltResult::ErrorRuntime(message.into(), Position::NONE).into()
}
