//! Line grouping
//!
//!     Classified lines are turned into [LineToken]s. Most lines map one to one, but fenced
//!     regions and tables need their partner lines:
//!
//!     - A `'''` fence opens a verbatim region only if a fence with the same indent closes
//!       it. The lines in between are taken verbatim with the fence indent removed.
//!     - An object block `{{{type:` runs up to `}}}` at the same indent.
//!     - A table row followed by an alignment row with as many cells starts a table. All
//!       following rows belong to it.
//!
//!     Unterminated fences and lone table rows fall back to text lines. In legacy mode a
//!     paragraph whose every line is indented is read as a verbatim region, which is how
//!     pages written by old versions stored preformatted text.

use super::line_classification::{
    classify_line, is_alignment_row, measure_indent, split_table_row, strip_indent, LineKind,
};
use crate::zim::ast::ItemMarker;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
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
    Text {
        indent: usize,
        text: String,
    },
    Verbatim {
        indent: usize,
        text: String,
    },
    Object {
        indent: usize,
        object_type: String,
        params: String,
        body: String,
    },
    Table {
        header: Vec<String>,
        aligns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl LineToken {
    /// Whether a legacy verbatim paragraph may start right after this token.
    fn ends_paragraph(&self) -> bool {
        !matches!(self, LineToken::Text { .. } | LineToken::ListItem { .. })
    }
}

pub fn tokenize(source: &str, legacy_indented_verbatim: bool) -> Vec<LineToken> {
    let lines: Vec<&str> = source.lines().collect();
    let mut tokens: Vec<LineToken> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if legacy_indented_verbatim
            && starts_indented(line)
            && tokens.last().map_or(true, LineToken::ends_paragraph)
        {
            let end = paragraph_end(&lines, i);
            if lines[i..end].iter().all(|l| starts_indented(l)) {
                tokens.push(LineToken::Verbatim {
                    indent: 0,
                    text: join_lines(&lines[i..end], 0),
                });
                i = end;
                continue;
            }
        }

        match classify_line(line) {
            LineKind::Blank => tokens.push(LineToken::Blank),
            LineKind::Heading { level, text } => tokens.push(LineToken::Heading { level, text }),
            LineKind::HorizontalRule => tokens.push(LineToken::HorizontalRule),
            LineKind::ListItem {
                depth,
                marker,
                text,
            } => tokens.push(LineToken::ListItem {
                depth,
                marker,
                text,
            }),
            LineKind::Text { indent, text } => tokens.push(LineToken::Text { indent, text }),
            LineKind::ObjectClose { .. } => tokens.push(text_token(line)),
            LineKind::VerbatimFence { indent } => {
                match find_closing(&lines, i, indent, "'''") {
                    Some(close) => {
                        tokens.push(LineToken::Verbatim {
                            indent,
                            text: join_lines(&lines[i + 1..close], indent),
                        });
                        i = close;
                    }
                    None => {
                        warn!(line = i + 1, "verbatim block is never closed, reading fence as text");
                        tokens.push(text_token(line));
                    }
                }
            }
            LineKind::ObjectOpen {
                indent,
                object_type,
                params,
            } => match find_closing(&lines, i, indent, "}}}") {
                Some(close) => {
                    let body_lines = &lines[i + 1..close];
                    let token = if object_type == "table" {
                        legacy_table(body_lines)
                    } else {
                        None
                    };
                    tokens.push(token.unwrap_or_else(|| LineToken::Object {
                        indent,
                        object_type,
                        params,
                        body: join_lines(body_lines, indent),
                    }));
                    i = close;
                }
                None => {
                    warn!(line = i + 1, %object_type, "object block is never closed, reading it as text");
                    tokens.push(text_token(line));
                }
            },
            LineKind::TableRow { cells } => {
                let (token, consumed) = table_at(&lines, i, cells);
                tokens.push(token);
                i += consumed - 1;
            }
        }
        i += 1;
    }

    tokens
}

fn starts_indented(line: &str) -> bool {
    line.starts_with([' ', '\t']) && !line.trim().is_empty()
}

/// Index of the first blank line at or after `start`, or the end of input.
fn paragraph_end(lines: &[&str], start: usize) -> usize {
    lines[start..]
        .iter()
        .position(|l| l.trim().is_empty())
        .map_or(lines.len(), |offset| start + offset)
}

fn find_closing(lines: &[&str], open: usize, indent: usize, fence: &str) -> Option<usize> {
    (open + 1..lines.len()).find(|&k| {
        let (depth, rest) = measure_indent(lines[k]);
        depth == indent && rest.trim_end() == fence
    })
}

fn join_lines(lines: &[&str], indent: usize) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(strip_indent(line, indent));
        text.push('\n');
    }
    text
}

fn text_token(line: &str) -> LineToken {
    let (indent, rest) = measure_indent(line);
    LineToken::Text {
        indent,
        text: rest.to_string(),
    }
}

/// Try to read a table starting at `start`. Returns the token and the number of lines used.
fn table_at(lines: &[&str], start: usize, header: Vec<String>) -> (LineToken, usize) {
    let aligns = lines
        .get(start + 1)
        .and_then(|line| split_table_row(line))
        .filter(|cells| is_alignment_row(cells));

    match aligns {
        Some(aligns) if aligns.len() == header.len() => {
            let rows: Vec<Vec<String>> = lines[start + 2..]
                .iter()
                .map_while(|line| split_table_row(line))
                .collect();
            let consumed = 2 + rows.len();
            (
                LineToken::Table {
                    header,
                    aligns,
                    rows,
                },
                consumed,
            )
        }
        Some(aligns) => {
            debug!(
                header = header.len(),
                aligns = aligns.len(),
                "alignment row does not match header, reading table rows as text"
            );
            (text_token(lines[start]), 1)
        }
        None => (text_token(lines[start]), 1),
    }
}

/// Tables used to be stored as `{{{table:` objects holding the plain table rows.
fn legacy_table(body: &[&str]) -> Option<LineToken> {
    let header = split_table_row(body.first()?)?;
    match table_at(body, 0, header) {
        (token @ LineToken::Table { .. }, consumed) if consumed == body.len() => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_region() {
        let tokens = tokenize("'''\n**not bold**\n\n'''\nafter\n", false);
        assert_eq!(
            tokens,
            vec![
                LineToken::Verbatim {
                    indent: 0,
                    text: "**not bold**\n\n".into()
                },
                LineToken::Text {
                    indent: 0,
                    text: "after".into()
                },
            ]
        );
    }

    #[test]
    fn test_indented_verbatim_needs_matching_indent() {
        let tokens = tokenize("\t'''\n\tcode\n'''\n\t'''\n", false);
        assert_eq!(
            tokens,
            vec![LineToken::Verbatim {
                indent: 1,
                text: "code\n'''\n".into()
            }]
        );
    }

    #[test]
    fn test_unclosed_verbatim_is_text() {
        let tokens = tokenize("'''\ncode\n", false);
        assert_eq!(
            tokens[0],
            LineToken::Text {
                indent: 0,
                text: "'''".into()
            }
        );
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_table_region() {
        let source = "| a | b |\n|---|:-:|\n| 1 | 2 |\n| 3 |\ntext\n";
        let tokens = tokenize(source, false);
        assert_eq!(
            tokens[0],
            LineToken::Table {
                header: vec!["a".into(), "b".into()],
                aligns: vec!["---".into(), ":-:".into()],
                rows: vec![vec!["1".into(), "2".into()], vec!["3".into()]],
            }
        );
        assert!(matches!(tokens[1], LineToken::Text { .. }));
    }

    #[test]
    fn test_table_without_alignment_row_is_text() {
        let tokens = tokenize("| a | b |\n| 1 | 2 |\n", false);
        assert!(tokens
            .iter()
            .all(|t| matches!(t, LineToken::Text { indent: 0, .. })));

        let tokens = tokenize("| a | b |\n|---|\n", false);
        assert!(tokens
            .iter()
            .all(|t| matches!(t, LineToken::Text { indent: 0, .. })));
    }

    #[test]
    fn test_object_region() {
        let tokens = tokenize("{{{code: lang=\"python\"\nprint(1)\n}}}\n", false);
        assert_eq!(
            tokens,
            vec![LineToken::Object {
                indent: 0,
                object_type: "code".into(),
                params: "lang=\"python\"".into(),
                body: "print(1)\n".into(),
            }]
        );
    }

    #[test]
    fn test_legacy_table_object() {
        let tokens = tokenize("{{{table:\n| a |\n|---|\n| 1 |\n}}}\n", false);
        assert!(matches!(tokens[0], LineToken::Table { .. }));
    }

    #[test]
    fn test_legacy_indented_paragraph() {
        let source = "intro\n\n\tindented one\n  two\n\nafter\n";
        let legacy = tokenize(source, true);
        assert_eq!(
            legacy[2],
            LineToken::Verbatim {
                indent: 0,
                text: "\tindented one\n  two\n".into()
            }
        );

        let current = tokenize(source, false);
        assert_eq!(
            current[2],
            LineToken::Text {
                indent: 1,
                text: "indented one".into()
            }
        );
    }

    #[test]
    fn test_legacy_mode_leaves_mixed_paragraphs() {
        let tokens = tokenize("intro\n\tnot verbatim\n", true);
        assert_eq!(
            tokens[1],
            LineToken::Text {
                indent: 1,
                text: "not verbatim".into()
            }
        );
    }
}
