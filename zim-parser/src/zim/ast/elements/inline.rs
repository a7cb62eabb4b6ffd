//! Inline nodes
//!
//!     Inline content is what lives inside a heading, paragraph, list item or table cell:
//!     runs of text, formatting spans, verbatim snippets, links, images, tags and anchors.
//!
//!     Spans nest freely. Verbatim snippets are opaque and keep their raw text.

use serde::Serialize;

pub type InlineContent = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Span(Span),
    Verbatim(InlineVerbatim),
    Link(Link),
    Image(Image),
    /// `@name`, stored without the `@`
    Tag(String),
    /// `##name`, stored without the hashes
    Anchor(String),
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    pub fn span(style: SpanStyle, children: InlineContent) -> Self {
        Inline::Span(Span { style, children })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanStyle {
    Bold,
    Italic,
    Underline,
    Strike,
    Subscript,
    Superscript,
}

impl SpanStyle {
    pub const ALL: [SpanStyle; 6] = [
        SpanStyle::Bold,
        SpanStyle::Italic,
        SpanStyle::Underline,
        SpanStyle::Strike,
        SpanStyle::Subscript,
        SpanStyle::Superscript,
    ];

    /// Opening and closing delimiters in wiki markup.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            SpanStyle::Bold => ("**", "**"),
            SpanStyle::Italic => ("//", "//"),
            SpanStyle::Underline => ("__", "__"),
            SpanStyle::Strike => ("~~", "~~"),
            SpanStyle::Subscript => ("_{", "}"),
            SpanStyle::Superscript => ("^{", "}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub style: SpanStyle,
    pub children: InlineContent,
}

/// Which delimiter pair wrapped an inline verbatim snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbatimMarker {
    /// `''text''`
    Quotes,
    /// `` `text` ``
    Backtick,
}

impl VerbatimMarker {
    pub fn delimiter(self) -> &'static str {
        match self {
            VerbatimMarker::Quotes => "''",
            VerbatimMarker::Backtick => "`",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineVerbatim {
    pub text: String,
    pub marker: VerbatimMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    /// Written as `[[target]]` or `[[target|text]]`
    Bracketed,
    /// Picked up from a bare token by one of the link heuristics
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub target: String,
    pub text: Option<String>,
    pub style: LinkStyle,
}

impl Link {
    pub fn bracketed(target: impl Into<String>, text: Option<String>) -> Self {
        Link {
            target: target.into(),
            text,
            style: LinkStyle::Bracketed,
        }
    }

    pub fn bare(target: impl Into<String>) -> Self {
        Link {
            target: target.into(),
            text: None,
            style: LinkStyle::Bare,
        }
    }

    /// The visible text: the display text when given, the target otherwise.
    pub fn display(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.target)
    }
}

/// An embedded image, `{{src?width=..|alt}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Type hint (the `type` option), e.g. `equation`
    pub kind: Option<String>,
    pub href: Option<String>,
    pub id: Option<String>,
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Image {
            src: src.into(),
            ..Default::default()
        }
    }

    /// Options as `(key, value)` pairs in sorted key order.
    pub fn options(&self) -> Vec<(&'static str, String)> {
        let mut options = Vec::new();
        if let Some(height) = self.height {
            options.push(("height", height.to_string()));
        }
        if let Some(href) = &self.href {
            options.push(("href", href.clone()));
        }
        if let Some(id) = &self.id {
            options.push(("id", id.clone()));
        }
        if let Some(kind) = &self.kind {
            options.push(("type", kind.clone()));
        }
        if let Some(width) = self.width {
            options.push(("width", width.to_string()));
        }
        options
    }
}

/// Flatten inline content to the text a reader would see.
pub fn plain_text(content: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(content, &mut out);
    out
}

fn push_plain_text(content: &[Inline], out: &mut String) {
    for node in content {
        match node {
            Inline::Text(text) => out.push_str(text),
            Inline::Span(span) => push_plain_text(&span.children, out),
            Inline::Verbatim(verbatim) => out.push_str(&verbatim.text),
            Inline::Link(link) => out.push_str(link.display()),
            Inline::Image(image) => {
                if let Some(alt) = &image.alt {
                    out.push_str(alt);
                }
            }
            Inline::Tag(name) => {
                out.push('@');
                out.push_str(name);
            }
            Inline::Anchor(_) => {}
        }
    }
}
