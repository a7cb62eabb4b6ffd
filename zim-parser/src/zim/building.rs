//! Block building
//!
//!     Line tokens from [crate::zim::lexing] are grouped into the blocks of the document
//!     tree. Grouping is greedy and never fails:
//!
//!     - Runs of blank lines become one [Block::BlankLines] so the wiki dumper can restore
//!       the spacing between blocks.
//!     - Consecutive text lines with the same indent form one paragraph (indent 0) or one
//!       indented block. Their inline markup is parsed as a whole, line breaks included.
//!     - Consecutive list items form one or more list trees, see [lists].
//!     - Table, verbatim and object tokens map to a single block each.

mod lists;
mod objects;
mod tables;

use crate::zim::ast::{Block, Heading, Indented, Paragraph, Verbatim};
use crate::zim::inlines::{parse_inlines, LinkHeuristics};
use crate::zim::lexing::LineToken;
use lists::ItemLine;

pub use lists::build_lists;
pub use objects::{build_object, parse_object_params};
pub use tables::{build_table, parse_alignment};

pub fn build_blocks(tokens: Vec<LineToken>, links: &LinkHeuristics) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        match token {
            LineToken::Blank => {
                let mut count = 1;
                while tokens.next_if(|t| matches!(t, LineToken::Blank)).is_some() {
                    count += 1;
                }
                blocks.push(Block::BlankLines(count));
            }
            LineToken::Heading { level, text } => blocks.push(Block::Heading(Heading {
                level,
                content: parse_inlines(&text, links),
            })),
            LineToken::HorizontalRule => blocks.push(Block::HorizontalRule),
            LineToken::Text { indent, text } => {
                let mut lines = vec![text];
                while let Some(LineToken::Text { text, .. }) = tokens
                    .next_if(|t| matches!(t, LineToken::Text { indent: next, .. } if *next == indent))
                {
                    lines.push(text);
                }
                let content = parse_inlines(&lines.join("\n"), links);
                blocks.push(if indent == 0 {
                    Block::Paragraph(Paragraph { content })
                } else {
                    Block::Indented(Indented { indent, content })
                });
            }
            LineToken::ListItem {
                depth,
                marker,
                text,
            } => {
                let mut items = vec![ItemLine {
                    depth,
                    marker,
                    text,
                }];
                while let Some(LineToken::ListItem {
                    depth,
                    marker,
                    text,
                }) = tokens.next_if(|t| matches!(t, LineToken::ListItem { .. }))
                {
                    items.push(ItemLine {
                        depth,
                        marker,
                        text,
                    });
                }
                blocks.extend(build_lists(items, links).into_iter().map(Block::List));
            }
            LineToken::Verbatim { indent, text } => {
                blocks.push(Block::Verbatim(Verbatim { indent, text }))
            }
            LineToken::Object {
                indent,
                object_type,
                params,
                body,
            } => blocks.push(Block::Object(build_object(
                indent,
                object_type,
                &params,
                body,
            ))),
            LineToken::Table {
                header,
                aligns,
                rows,
            } => blocks.push(Block::Table(build_table(&header, &aligns, &rows, links))),
        }
    }

    blocks
}
