//! Table building
//!
//!     The alignment row is read per column: `:--` left, `--:` right, `:-:` center and plain
//!     dashes for the default. A header cell ending in `<` marks its column as wrapping;
//!     the marker is not part of the cell text.

use crate::zim::ast::{Alignment, Column, Table};
use crate::zim::inlines::{parse_inlines, LinkHeuristics};

pub fn parse_alignment(cell: &str) -> Alignment {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) if cell.len() > 1 => Alignment::Center,
        (true, _) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::Default,
    }
}

pub fn build_table(
    header: &[String],
    aligns: &[String],
    rows: &[Vec<String>],
    links: &LinkHeuristics,
) -> Table {
    let (columns, header): (Vec<Column>, Vec<_>) = header
        .iter()
        .zip(aligns)
        .map(|(cell, align)| {
            let (text, wrap) = match cell.strip_suffix('<') {
                Some(text) => (text.trim_end(), true),
                None => (cell.as_str(), false),
            };
            let column = Column {
                align: parse_alignment(align),
                wrap,
            };
            (column, parse_inlines(text, links))
        })
        .unzip();

    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| parse_inlines(cell, links)).collect())
        .collect();

    Table::new(columns, header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zim::ast::Inline;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_alignment_specs() {
        assert_eq!(parse_alignment(":--"), Alignment::Left);
        assert_eq!(parse_alignment("--:"), Alignment::Right);
        assert_eq!(parse_alignment(":-:"), Alignment::Center);
        assert_eq!(parse_alignment("---"), Alignment::Default);
    }

    #[test]
    fn test_wrap_marker_and_padding() {
        let table = build_table(
            &strings(&["Name", "Notes <"]),
            &strings(&[":--", "---"]),
            &[strings(&["zim"])],
            &LinkHeuristics::default(),
        );
        assert_eq!(table.column_count(), 2);
        assert!(table.columns()[1].wrap);
        assert_eq!(table.header()[1], vec![Inline::text("Notes")]);
        assert_eq!(table.rows()[0].len(), 2);
        assert!(table.rows()[0][1].is_empty());
    }
}
