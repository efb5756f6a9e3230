//! Markdown export of a recalculated sheet.

use cellgraph_core::{CellRef, Sheet};
use cellgraph_engine::Evaluator;
use std::io::Write;

/// Write the populated part of the grid as a markdown table.
pub(crate) fn write_markdown<W: Write, E: Evaluator>(
    w: &mut W,
    sheet: &Sheet<E>,
) -> std::io::Result<()> {
    writeln!(w, "# Sheet")?;
    writeln!(w)?;

    let Some((max_row, max_col)) = find_grid_bounds(sheet) else {
        writeln!(w, "*Empty spreadsheet*")?;
        return Ok(());
    };

    // Header with column letters
    write!(w, "|   |")?;
    for col in 0..=max_col {
        write!(w, " {} |", CellRef::col_to_letters(col))?;
    }
    writeln!(w)?;

    write!(w, "|---|")?;
    for _ in 0..=max_col {
        write!(w, "---|")?;
    }
    writeln!(w)?;

    for row in 0..=max_row {
        write!(w, "| {} |", row + 1)?; // 1-based row numbers
        for col in 0..=max_col {
            let display = sheet
                .cells()
                .get(&CellRef::new(row, col))
                .map(|cell| cell.rendered_text())
                .unwrap_or_default();
            write!(w, " {} |", escape_markdown(&display))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Last row and column holding a formula, if any.
fn find_grid_bounds<E: Evaluator>(sheet: &Sheet<E>) -> Option<(usize, usize)> {
    sheet
        .iter()
        .filter(|cell| !cell.formula().is_empty())
        .map(|cell| cell.address())
        .fold(None, |bounds, cell_ref| match bounds {
            None => Some((cell_ref.row, cell_ref.col)),
            Some((max_row, max_col)) => {
                Some((max_row.max(cell_ref.row), max_col.max(cell_ref.col)))
            }
        })
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sheet: &Sheet) -> String {
        let mut out = Vec::new();
        write_markdown(&mut out, sheet).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Sheet::new(3, 3).unwrap();
        assert_eq!(render(&sheet), "# Sheet\n\n*Empty spreadsheet*\n");
    }

    #[test]
    fn test_table_covers_populated_cells() {
        let mut sheet = Sheet::new(5, 5).unwrap();
        sheet.update_cell(0, 0, "2").unwrap();
        sheet.update_cell(1, 1, "A1 * 3").unwrap();
        sheet.detect_cycle_and_recompute().unwrap();

        assert_eq!(
            render(&sheet),
            "# Sheet\n\n|   | A | B |\n|---|---|---|\n| 1 | 2 |  |\n| 2 |  | 6 |\n"
        );
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("a|b\nc\r"), "a\\|b c");
    }
}
