//! Line classification
//!
//!     Each source line is classified on its own, without looking at its neighbours. The
//!     kind decides how [super::line_grouping] treats the line: fences and table rows only
//!     become blocks once their partner lines are found, the rest maps directly to a token.
//!
//!     Indentation is counted in tabs. Four spaces count as one tab, so pages edited with
//!     space indentation still nest correctly.
//!
//!     Classification order matters: a line of dashes is a rule and not text, and `* x` is a
//!     list item even though `*` could start an inline span.

use crate::zim::ast::ItemMarker;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(={2,})[ \t]+(\S.*?)[ \t]+(={2,})[ \t]*$").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{5,}[ \t]*$").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([*\x{2022}]|\[[ x*<>]\]|\d+\.|[a-zA-Z]\.)[ \t]+(.*)$").unwrap()
});
static OBJECT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{\{\s*([^\s:]+):(.*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Heading {
        level: u8,
        text: String,
    },
    HorizontalRule,
    ListItem {
        depth: usize,
        marker: ItemMarker,
        text: String,
    },
    /// `'''` on a line of its own
    VerbatimFence {
        indent: usize,
    },
    /// `{{{type: key="value" ...`
    ObjectOpen {
        indent: usize,
        object_type: String,
        params: String,
    },
    /// `}}}` on a line of its own
    ObjectClose {
        indent: usize,
    },
    /// A line starting and ending with an unescaped `|`, already split into unescaped cells
    TableRow {
        cells: Vec<String>,
    },
    Text {
        indent: usize,
        text: String,
    },
}

/// Count leading indentation in tabs and return the rest of the line.
pub fn measure_indent(line: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = line;
    loop {
        if let Some(stripped) = rest.strip_prefix('\t') {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("    ") {
            rest = stripped;
        } else {
            return (depth, rest);
        }
        depth += 1;
    }
}

/// Remove up to `indent` tabs of indentation from a line.
pub fn strip_indent(line: &str, indent: usize) -> &str {
    let mut rest = line;
    for _ in 0..indent {
        if let Some(stripped) = rest.strip_prefix('\t') {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("    ") {
            rest = stripped;
        } else {
            break;
        }
    }
    rest
}

/// Heading level from the length of its marker run: six or more `=` is level 1, two is 5.
pub fn heading_level(marks: usize) -> u8 {
    (7 - marks.min(6)) as u8
}

pub fn classify_line(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADING.captures(line) {
        if caps[1].len() == caps[3].len() {
            return LineKind::Heading {
                level: heading_level(caps[1].len()),
                text: caps[2].to_string(),
            };
        }
    }
    if HORIZONTAL_RULE.is_match(line) {
        return LineKind::HorizontalRule;
    }
    if let Some(cells) = split_table_row(line) {
        return LineKind::TableRow { cells };
    }

    let (indent, rest) = measure_indent(line);
    let trimmed = rest.trim_end();
    if trimmed == "'''" {
        return LineKind::VerbatimFence { indent };
    }
    if trimmed == "}}}" {
        return LineKind::ObjectClose { indent };
    }
    if let Some(caps) = OBJECT_OPEN.captures(rest) {
        return LineKind::ObjectOpen {
            indent,
            object_type: caps[1].to_lowercase(),
            params: caps[2].trim().to_string(),
        };
    }
    if let Some(caps) = LIST_ITEM.captures(rest) {
        if let Some(marker) = ItemMarker::from_bullet(&caps[1]) {
            return LineKind::ListItem {
                depth: indent,
                marker,
                text: caps[2].to_string(),
            };
        }
    }

    LineKind::Text {
        indent,
        text: rest.to_string(),
    }
}

/// Split `| a | b \| c |` into unescaped, trimmed cells.
///
/// `\|` is a literal pipe, `\n` a line break and `\\` a backslash. Returns `None` unless the
/// line both starts and ends with a delimiter.
pub fn split_table_row(line: &str) -> Option<Vec<String>> {
    let inner = line.trim_end().strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut closed = false;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        closed = false;
        match c {
            '\\' => match chars.next() {
                Some('|') => current.push('|'),
                Some('n') => current.push('\n'),
                Some('\\') => current.push('\\'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
                closed = true;
            }
            other => current.push(other),
        }
    }

    if closed {
        Some(cells)
    } else {
        None
    }
}

/// Whether a row of cells is an alignment row such as `|:---|--:|:-:|`.
pub fn is_alignment_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let core = cell.trim_start_matches(':').trim_end_matches(':');
            !core.is_empty() && core.chars().all(|c| c == '-') && cell.matches(':').count() <= 2
        })
}
