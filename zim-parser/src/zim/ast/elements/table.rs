//! Table element
//!
//!     A table has a header row, one [Column] per header cell and any number of body rows.
//!     Every row holds exactly one cell per column: [Table::new] pads short rows with empty
//!     cells and drops the excess cells of long rows, and the fields are only reachable
//!     through accessors so the shape cannot drift afterwards.

use super::inline::InlineContent;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Default,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Column {
    pub align: Alignment,
    /// Cells may wrap; marked with a trailing `<` on the header cell
    pub wrap: bool,
}

pub type Row = Vec<InlineContent>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    header: Row,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table whose column count is `columns.len()`.
    pub fn new(columns: Vec<Column>, header: Row, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let fit = |mut row: Row| {
            row.resize_with(width, Vec::new);
            row
        };
        Table {
            header: fit(header),
            rows: rows.into_iter().map(fit).collect(),
            columns,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn header(&self) -> &[InlineContent] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zim::ast::Inline;

    fn cell(text: &str) -> InlineContent {
        vec![Inline::text(text)]
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::new(
            vec![Column::default(); 3],
            vec![cell("a"), cell("b"), cell("c")],
            vec![vec![cell("1"), cell("2")]],
        );
        assert_eq!(table.rows()[0].len(), 3);
        assert!(table.rows()[0][2].is_empty());
    }

    #[test]
    fn test_long_rows_are_truncated() {
        let table = Table::new(
            vec![Column::default(); 2],
            vec![cell("a"), cell("b")],
            vec![vec![cell("1"), cell("2"), cell("3")]],
        );
        assert_eq!(table.rows()[0], vec![cell("1"), cell("2")]);
    }
}
