//! Formula tokenization and dependency extraction.
//!
//! A formula is split lazily into [`Token`]s: A1-style cell references and
//! the text between them. The dependency graph only ever sees the
//! cell-reference subsequence (see [`extract_dependencies`]); the
//! preprocessor uses the full stream to rewrite references for Rhai.
//!
//! Literal `CELL(row, col)` calls count as references too, so a formula
//! that spells a cell out by index still gets an edge. References inside
//! string and character literals are left as text.

use regex::{Match, Matches, Regex};
use std::sync::OnceLock;

use super::cell_ref::CellRef;

/// One piece of a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A cell reference such as `B2` or `CELL(1, 1)`.
    Cell(CellRef),
    /// Anything else, verbatim.
    Text(&'a str),
}

impl Token<'_> {
    pub fn cell_ref(&self) -> Option<CellRef> {
        match self {
            Token::Cell(cell_ref) => Some(*cell_ref),
            Token::Text(_) => None,
        }
    }
}

/// Split a formula into tokens without allocating.
pub fn tokenize(formula: &str) -> Tokens<'_> {
    Tokens {
        formula,
        matches: cell_ref_re().find_iter(formula),
        pos: 0,
        scanned: 0,
        quote: None,
        escaped: false,
        pending: None,
    }
}

/// Lazily yield every cell reference in a formula, left to right.
///
/// Repeated references are yielded each time they appear; deduplication is
/// the graph's job.
pub fn extract_dependencies(formula: &str) -> impl Iterator<Item = CellRef> + '_ {
    tokenize(formula).filter_map(|token| token.cell_ref())
}

/// Iterator returned by [`tokenize`].
pub struct Tokens<'a> {
    formula: &'a str,
    matches: Matches<'static, 'a>,
    /// End of the last emitted token.
    pos: usize,
    /// How far literal state has been tracked.
    scanned: usize,
    /// Delimiter of the string or character literal being scanned.
    quote: Option<u8>,
    escaped: bool,
    /// A reference found after a text gap, emitted on the next call.
    pending: Option<(usize, CellRef)>,
}

impl Tokens<'_> {
    fn track_strings_until(&mut self, until: usize) {
        let formula = self.formula;
        for &b in &formula.as_bytes()[self.scanned..until] {
            match self.quote {
                Some(_) if self.escaped => self.escaped = false,
                Some(_) if b == b'\\' => self.escaped = true,
                Some(q) if b == q => self.quote = None,
                Some(_) => {}
                None if matches!(b, b'"' | b'\'' | b'`') => self.quote = Some(b),
                None => {}
            }
        }
        self.scanned = until;
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some((end, cell_ref)) = self.pending.take() {
            self.pos = end;
            return Some(Token::Cell(cell_ref));
        }

        while let Some(m) = self.matches.next() {
            self.track_strings_until(m.start());
            let quoted = self.quote.is_some();
            self.track_strings_until(m.end());
            if quoted {
                continue;
            }
            let Some(cell_ref) = parse_match(m) else {
                continue;
            };

            if m.start() > self.pos {
                let text = &self.formula[self.pos..m.start()];
                self.pos = m.start();
                self.pending = Some((m.end(), cell_ref));
                return Some(Token::Text(text));
            }
            self.pos = m.end();
            return Some(Token::Cell(cell_ref));
        }

        if self.pos < self.formula.len() {
            let text = &self.formula[self.pos..];
            self.pos = self.formula.len();
            return Some(Token::Text(text));
        }
        None
    }
}

fn parse_match(m: Match<'_>) -> Option<CellRef> {
    let name = m.as_str();
    if let Some(args) = name.strip_prefix("CELL(") {
        let (row, col) = args.strip_suffix(')')?.split_once(',')?;
        return Some(CellRef::new(row.trim().parse().ok()?, col.trim().parse().ok()?));
    }
    let split = name.find(|c: char| c.is_ascii_digit())?;
    CellRef::from_parts(&name[..split], &name[split..])
}

fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"\bCELL\(\s*[0-9]+\s*,\s*[0-9]+\s*\)|\b[A-Za-z]+[0-9]+\b")
            .expect("dependency cell reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(formula: &str) -> Vec<CellRef> {
        extract_dependencies(formula).collect()
    }

    #[test]
    fn test_extract_dependencies_in_order() {
        assert_eq!(
            refs("A1 + B2 * c3"),
            vec![CellRef::new(0, 0), CellRef::new(1, 1), CellRef::new(2, 2)]
        );
    }

    #[test]
    fn test_extract_dependencies_keeps_repeats() {
        assert_eq!(refs("A1 + A1"), vec![CellRef::new(0, 0), CellRef::new(0, 0)]);
    }

    #[test]
    fn test_extract_dependencies_skips_string_literals() {
        assert_eq!(refs(r#"A1 + "B2 \" C3" + D4"#), vec![
            CellRef::new(0, 0),
            CellRef::new(3, 3)
        ]);
    }

    #[test]
    fn test_extract_dependencies_skips_char_literals() {
        assert_eq!(refs(r#"if '"' == 'x' { 0 } else { A1 + 1 }"#), vec![CellRef::new(0, 0)]);
        assert_eq!(refs(r"'\'' + B1 + `C1` + D1"), vec![CellRef::new(0, 1), CellRef::new(0, 3)]);
    }

    #[test]
    fn test_extract_dependencies_includes_literal_cell_calls() {
        assert_eq!(refs("CELL(0, 0) + CELL( 2,1 ) + B1"), vec![
            CellRef::new(0, 0),
            CellRef::new(2, 1),
            CellRef::new(0, 1)
        ]);
        // computed indices are not static references
        assert!(refs("CELL(0, 1 + 1)").is_empty());
        assert!(refs(r#""CELL(0, 0)""#).is_empty());
    }

    #[test]
    fn test_extract_dependencies_ignores_non_references() {
        assert!(refs("").is_empty());
        assert!(refs("1 + 2 * 3").is_empty());
        assert!(refs("ABS(5) + MAX(1, 2)").is_empty());
        assert!(refs("A0 + A1B2").is_empty());
    }

    #[test]
    fn test_tokenize_splits_text_and_cells() {
        let tokens: Vec<Token<'_>> = tokenize(r#"A1 + "B2" + b3"#).collect();
        assert_eq!(tokens, vec![
            Token::Cell(CellRef::new(0, 0)),
            Token::Text(r#" + "B2" + "#),
            Token::Cell(CellRef::new(2, 1)),
        ]);
    }

    #[test]
    fn test_tokenize_reassembles_formula() {
        let formula = r#"MAX(A1, 3) - "x" + Z9"#;
        let rebuilt: String = tokenize(formula)
            .map(|token| match token {
                Token::Cell(cell_ref) => cell_ref.to_string(),
                Token::Text(text) => text.to_string(),
            })
            .collect();
        assert_eq!(rebuilt, formula);
    }
}
