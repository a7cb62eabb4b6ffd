//! Pipe table layout
//!
//!     Wiki and Markdown tables are written with every column padded to its widest cell:
//!
//!         | Name | Size |
//!         |:-----|-----:|
//!         | a    |   10 |
//!
//!     Each cell is the text plus one space on either side, widened according to the
//!     column alignment. The separator row carries the alignment as colons.

use zim_parser::zim::ast::Alignment;

/// Width in characters of the widest cell in each column.
pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Pad a cell to `width`, including the single space margins.
pub fn align_cell(text: &str, width: usize, align: Alignment) -> String {
    let len = text.chars().count();
    let free = width.saturating_sub(len);
    let (left, right) = match align {
        Alignment::Right => (free + 1, 1),
        Alignment::Center => {
            let left = free / 2 + 1;
            (left, free - (left - 1) + 1)
        }
        Alignment::Left | Alignment::Default => (1, free + 1),
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

pub fn row_line(cells: &[String], widths: &[usize], aligns: &[Alignment]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(aligns))
        .map(|(cell, (width, align))| align_cell(cell, *width, *align))
        .collect();
    format!("|{}|", cells.join("|"))
}

/// The header row, with the last margin of wrapping columns replaced by `<`.
pub fn header_line(
    cells: &[String],
    widths: &[usize],
    aligns: &[Alignment],
    wraps: &[bool],
) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(aligns.iter().zip(wraps)))
        .map(|(cell, (width, (align, wrap)))| {
            let mut padded = align_cell(cell, *width, *align);
            if *wrap {
                padded.pop();
                padded.push('<');
            }
            padded
        })
        .collect();
    format!("|{}|", cells.join("|"))
}

pub fn separator_line(widths: &[usize], aligns: &[Alignment]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .zip(aligns)
        .map(|(width, align)| {
            let dashes = "-".repeat(*width);
            match align {
                Alignment::Left => format!(":{dashes}-"),
                Alignment::Right => format!("-{dashes}:"),
                Alignment::Center => format!(":{dashes}:"),
                Alignment::Default => format!("-{dashes}-"),
            }
        })
        .collect();
    format!("|{}|", cells.join("|"))
}
