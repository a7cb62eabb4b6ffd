//! Read-only queries over a parsed document
//!
//!     Collaborators such as an index or an exporter need the links, tags and images of a
//!     page without caring about layout. These are gathered with [Visitor] walks.

use super::elements::{plain_text, Block, Document, Image, Inline, Link};
use super::traits::{Visitor, Walk};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w[\w+\-.]*://").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s/@]+@[^\s/@]+\.\w+$").unwrap());
static FILE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:/|\.\.?[/\\]|~[^/\\]*[/\\]|[A-Za-z]:[\\/])").unwrap());
static INTERWIKI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w[\w+\-.]*\?").unwrap());
static NON_ANCHOR_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\-]").unwrap());

/// What a link target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Url,
    Mailto,
    /// Windows or samba share, `\\host\share` or `smb://host/share`
    Share,
    File,
    /// `shortcut?name`, expanded through an interwiki table
    Interwiki,
    /// `#name`, an anchor on the same page
    Anchor,
    Page,
}

impl LinkKind {
    pub fn classify(target: &str) -> LinkKind {
        if target.starts_with('#') {
            LinkKind::Anchor
        } else if target.starts_with("\\\\") || target.starts_with("smb://") {
            LinkKind::Share
        } else if target.starts_with("file:/") || FILE_PATH.is_match(target) {
            LinkKind::File
        } else if target.starts_with("mailto:") || EMAIL.is_match(target) {
            LinkKind::Mailto
        } else if URL_SCHEME.is_match(target) {
            LinkKind::Url
        } else if INTERWIKI.is_match(target) {
            LinkKind::Interwiki
        } else {
            LinkKind::Page
        }
    }
}

/// Derive an anchor id from heading text: lowercase, whitespace to `-`, and only word
/// characters and `-` kept.
pub fn heading_to_anchor(text: &str) -> String {
    let lowered: String = text
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    NON_ANCHOR_CHARS.replace_all(&lowered, "").into_owned()
}

struct InlineCollector<T> {
    found: Vec<T>,
    pick: fn(&Inline) -> Option<T>,
}

impl<T> Visitor for InlineCollector<T> {
    fn visit_inline(&mut self, inline: &Inline) {
        if let Some(value) = (self.pick)(inline) {
            self.found.push(value);
        }
    }
}

impl Document {
    fn collect<T>(&self, pick: fn(&Inline) -> Option<T>) -> Vec<T> {
        let mut collector = InlineCollector {
            found: Vec::new(),
            pick,
        };
        self.accept(&mut collector);
        collector.found
    }

    /// All links in document order, bracketed and bare.
    pub fn links(&self) -> Vec<Link> {
        self.collect(|inline| match inline {
            Inline::Link(link) => Some(link.clone()),
            _ => None,
        })
    }

    /// Tag names in document order, duplicates removed.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.collect(|inline| match inline {
            Inline::Tag(name) => Some(name.clone()),
            _ => None,
        }) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    pub fn images(&self) -> Vec<Image> {
        self.collect(|inline| match inline {
            Inline::Image(image) => Some(image.clone()),
            _ => None,
        })
    }

    pub fn anchors(&self) -> Vec<String> {
        self.collect(|inline| match inline {
            Inline::Anchor(name) => Some(name.clone()),
            _ => None,
        })
    }

    /// Text of the first heading, if the page has one.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading(heading) => Some(plain_text(&heading.content)),
            _ => None,
        })
    }

    /// Shift every heading level by `offset` and clamp the result to `1..=max`.
    pub fn cleanup_headings(&mut self, offset: i32, max: u8) {
        let max = max.max(1);
        for block in &mut self.blocks {
            if let Block::Heading(heading) = block {
                let level = (i32::from(heading.level) + offset).clamp(1, i32::from(max));
                heading.level = level as u8;
            }
        }
    }
}
