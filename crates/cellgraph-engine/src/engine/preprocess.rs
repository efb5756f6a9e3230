//! Formula preprocessing.
//!
//! Before a formula can be evaluated by Rhai, cell references like `B3` are
//! rewritten into builtin calls like `CELL(2, 1)` (row, col). References
//! inside string literals are left alone.

use super::deps::{Token, tokenize};

/// Rewrite every cell reference in `formula` into a `CELL(row, col)` call.
pub fn preprocess_formula(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len() + 8);
    for token in tokenize(formula) {
        match token {
            Token::Cell(cell_ref) => {
                out.push_str(&format!("CELL({}, {})", cell_ref.row, cell_ref.col));
            }
            Token::Text(text) => out.push_str(text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_formula_simple() {
        assert_eq!(preprocess_formula("A1"), "CELL(0, 0)");
        assert_eq!(preprocess_formula("B1"), "CELL(0, 1)");
        assert_eq!(preprocess_formula("A2"), "CELL(1, 0)");
    }

    #[test]
    fn test_preprocess_formula_expression() {
        assert_eq!(
            preprocess_formula("MAX(A1, b2) + 1"),
            "MAX(CELL(0, 0), CELL(1, 1)) + 1"
        );
    }

    #[test]
    fn test_preprocess_formula_leaves_strings() {
        assert_eq!(
            preprocess_formula(r#"len("A1") + A1"#),
            r#"len("A1") + CELL(0, 0)"#
        );
    }

    #[test]
    fn test_preprocess_formula_without_references() {
        assert_eq!(preprocess_formula("2 * (3 + 4)"), "2 * (3 + 4)");
        assert_eq!(preprocess_formula(""), "");
    }
}
