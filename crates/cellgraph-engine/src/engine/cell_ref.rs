//! Cell reference parsing and formatting.
//!
//! Converts between A1-style references ("A1", "B2", "AA100") and the
//! zero-indexed row/column pair the dependency graph keys its nodes by.
//!
//! # Examples
//!
//! ```
//! use cellgraph_engine::engine::CellRef;
//!
//! let cell = CellRef::from_a1("B3").unwrap();
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a reference in spreadsheet notation (e.g. "A1", "b2", "AA10").
    /// Returns None if the input is not a single well-formed reference.
    pub fn from_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        Self::from_parts(&caps["letters"], &caps["numbers"])
    }

    /// Build a reference from its column letters and 1-based row digits.
    pub(crate) fn from_parts(letters: &str, numbers: &str) -> Option<CellRef> {
        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(row, col))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("A1 reference regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;

    #[test]
    fn test_from_a1_single_and_multi_letter_columns() {
        assert_eq!(CellRef::from_a1("A1"), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::from_a1("Z1"), Some(CellRef::new(0, 25)));
        assert_eq!(CellRef::from_a1("AA1"), Some(CellRef::new(0, 26)));
        assert_eq!(CellRef::from_a1("BA10"), Some(CellRef::new(9, 52)));
    }

    #[test]
    fn test_from_a1_case_insensitive() {
        assert_eq!(CellRef::from_a1("c3"), CellRef::from_a1("C3"));
        assert_eq!(CellRef::from_a1("aA1").map(|c| c.col), Some(26));
    }

    #[test]
    fn test_from_a1_invalid_inputs() {
        assert!(CellRef::from_a1("").is_none());
        assert!(CellRef::from_a1("123").is_none());
        assert!(CellRef::from_a1("ABC").is_none());
        assert!(CellRef::from_a1("A0").is_none());
        assert!(CellRef::from_a1("1A").is_none());
        assert!(CellRef::from_a1("A 1").is_none());
    }

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_a1(&huge).is_none());
    }

    #[test]
    fn test_display_matches_parse() {
        for name in ["A1", "J10", "AZ7", "ZZ99"] {
            let cell: CellRef = name.parse().unwrap();
            assert_eq!(cell.to_string(), name);
        }
    }

    #[test]
    fn test_from_str_error_message() {
        let err = "nope".parse::<CellRef>().unwrap_err();
        assert_eq!(err, "Invalid cell reference: nope");
    }
}
