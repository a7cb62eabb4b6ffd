use super::links::{anchor_at, bare_link_at, parse_bracket_link, parse_image, tag_at, LinkHeuristics};
use crate::zim::ast::{Inline, InlineContent, InlineVerbatim, Span, SpanStyle, VerbatimMarker};

/// Parse inline nodes from text that may span several lines.
///
/// Line breaks are kept as `\n` in the text runs. Spans never cross them.
pub fn parse_inlines(text: &str, links: &LinkHeuristics) -> InlineContent {
    let mut root = InlineFrame::new(None);
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            root.push_char('\n');
        }
        for node in parse_line(line, links) {
            root.push_node(node);
        }
    }
    root.flush_buffer();
    root.children
}

/// Parse inline nodes from a single line.
pub fn parse_line(line: &str, links: &LinkHeuristics) -> InlineContent {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let offsets: Vec<usize> = line.char_indices().map(|(i, _)| i).collect();

    let mut stack = vec![InlineFrame::new(None)];
    let mut i = 0;

    while i < chars.len() {
        let prev = if i == 0 { None } else { Some(chars[i - 1]) };
        let rest = &line[offsets[i]..];

        if let Some((node, byte_len)) = atomic_at(&chars, i, rest, prev, links) {
            top(&mut stack).push_node(node);
            i += rest[..byte_len].chars().count();
            continue;
        }

        if let Some(delimiter) = Delimiter::at(&chars, i) {
            let after = chars.get(i + delimiter.len()).copied();
            if try_close(&mut stack, delimiter, prev) || try_open(&mut stack, delimiter, after) {
                i += delimiter.len();
                continue;
            }
            let frame = top(&mut stack);
            for ch in &chars[i..i + delimiter.len()] {
                frame.push_char(*ch);
            }
            i += delimiter.len();
            continue;
        }

        top(&mut stack).push_char(chars[i]);
        i += 1;
    }

    while stack.len() > 1 {
        unwind_top(&mut stack);
    }
    let mut root = stack.pop().unwrap_or_else(|| InlineFrame::new(None));
    root.flush_buffer();
    root.children
}

fn top(stack: &mut [InlineFrame]) -> &mut InlineFrame {
    let last = stack.len() - 1;
    &mut stack[last]
}

/// Constructs recognized as a whole: links, images, verbatim, tags, anchors.
fn atomic_at(
    chars: &[char],
    i: usize,
    rest: &str,
    prev: Option<char>,
    links: &LinkHeuristics,
) -> Option<(Inline, usize)> {
    if rest.starts_with("[[") && !rest.starts_with("[[[") {
        let end = rest[2..].find("]]")?;
        let content = &rest[2..2 + end];
        return parse_bracket_link(content).map(|link| (Inline::Link(link), end + 4));
    }
    if rest.starts_with("{{") && !rest.starts_with("{{{") {
        let end = rest[2..].find("}}")?;
        let content = &rest[2..2 + end];
        return parse_image(content).map(|image| (Inline::Image(image), end + 4));
    }
    if let Some(found) = verbatim_at(chars, i) {
        return Some(found);
    }
    match chars[i] {
        '@' => tag_at(rest, prev),
        '#' if rest.starts_with("##") => anchor_at(rest, prev),
        _ => None,
    }
    .or_else(|| bare_link_at(rest, prev, links))
}

/// `''text''` or `` `text` ``, closed by the nearest delimiter not preceded by whitespace.
fn verbatim_at(chars: &[char], i: usize) -> Option<(Inline, usize)> {
    let (marker, width) = match (chars.get(i), chars.get(i + 1), chars.get(i + 2)) {
        (Some('\''), Some('\''), Some(c)) if *c != '\'' => (VerbatimMarker::Quotes, 2),
        (Some('`'), Some(c), _) if *c != '`' => (VerbatimMarker::Backtick, 1),
        _ => return None,
    };
    let first = *chars.get(i + width)?;
    if first.is_whitespace() {
        return None;
    }

    let closes_at = |j: usize| match marker {
        VerbatimMarker::Quotes => chars[j] == '\'' && chars.get(j + 1) == Some(&'\''),
        VerbatimMarker::Backtick => chars[j] == '`',
    };
    let start = i + width;
    let close = (start + 1..chars.len()).find(|&j| closes_at(j) && !chars[j - 1].is_whitespace())?;

    let text: String = chars[start..close].iter().collect();
    let byte_len: usize = chars[i..close + width].iter().map(|c| c.len_utf8()).sum();
    Some((Inline::Verbatim(InlineVerbatim { text, marker }), byte_len))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    /// Same token opens and closes: `**`, `//`, `__`, `~~`
    Pair(SpanStyle),
    /// `_{` or `^{`
    OpenBrace(SpanStyle),
    /// `}` closing a sub- or superscript
    CloseBrace,
}

impl Delimiter {
    fn at(chars: &[char], i: usize) -> Option<Self> {
        let next = chars.get(i + 1).copied();
        match (chars[i], next) {
            ('*', Some('*')) => Some(Delimiter::Pair(SpanStyle::Bold)),
            ('/', Some('/')) => Some(Delimiter::Pair(SpanStyle::Italic)),
            ('_', Some('_')) => Some(Delimiter::Pair(SpanStyle::Underline)),
            ('~', Some('~')) => Some(Delimiter::Pair(SpanStyle::Strike)),
            ('_', Some('{')) => Some(Delimiter::OpenBrace(SpanStyle::Subscript)),
            ('^', Some('{')) => Some(Delimiter::OpenBrace(SpanStyle::Superscript)),
            ('}', _) => Some(Delimiter::CloseBrace),
            _ => None,
        }
    }

    fn len(self) -> usize {
        match self {
            Delimiter::CloseBrace => 1,
            _ => 2,
        }
    }
}

/// Close the nearest open span this delimiter can end. Spans opened after it are unwound
/// to literal text first.
fn try_close(stack: &mut Vec<InlineFrame>, delimiter: Delimiter, prev: Option<char>) -> bool {
    if !is_valid_end(prev) {
        return false;
    }
    let matches = |frame: &InlineFrame| match (delimiter, frame.style) {
        (Delimiter::Pair(style), Some(open)) => style == open,
        (Delimiter::CloseBrace, Some(open)) => {
            matches!(open, SpanStyle::Subscript | SpanStyle::Superscript)
        }
        _ => false,
    };
    let Some(index) = stack.iter().rposition(matches) else {
        return false;
    };
    if index == 0 || !stack[index].has_content_after_unwind(&stack[index + 1..]) {
        return false;
    }

    while stack.len() > index + 1 {
        unwind_top(stack);
    }
    let Some(mut frame) = stack.pop() else {
        return false;
    };
    frame.flush_buffer();
    let node = frame.into_node();
    top(stack).push_node(node);
    true
}

fn try_open(stack: &mut Vec<InlineFrame>, delimiter: Delimiter, after: Option<char>) -> bool {
    let style = match delimiter {
        Delimiter::Pair(style) | Delimiter::OpenBrace(style) => style,
        Delimiter::CloseBrace => return false,
    };
    if !is_valid_start(delimiter, after) || stack.iter().any(|f| f.style == Some(style)) {
        return false;
    }
    top(stack).flush_buffer();
    stack.push(InlineFrame::new(Some(style)));
    true
}

/// An opener must be followed by something other than whitespace, and a pair delimiter not
/// by a third copy of its own character (`***`, `///`).
fn is_valid_start(delimiter: Delimiter, after: Option<char>) -> bool {
    match (delimiter, after) {
        (_, None) => false,
        (_, Some(c)) if c.is_whitespace() => false,
        (Delimiter::Pair(style), Some(c)) => !style.delimiters().0.starts_with(c),
        _ => true,
    }
}

fn is_valid_end(prev: Option<char>) -> bool {
    matches!(prev, Some(c) if !c.is_whitespace())
}

/// Pop the innermost frame and put its opener and content back into the parent as text.
fn unwind_top(stack: &mut Vec<InlineFrame>) {
    let Some(mut frame) = stack.pop() else {
        return;
    };
    frame.flush_buffer();
    let parent = top(stack);
    parent.push_str(frame.opener());
    for child in frame.children {
        parent.push_node(child);
    }
}

struct InlineFrame {
    style: Option<SpanStyle>,
    buffer: String,
    children: InlineContent,
}

impl InlineFrame {
    fn new(style: Option<SpanStyle>) -> Self {
        Self {
            style,
            buffer: String::new(),
            children: Vec::new(),
        }
    }

    fn opener(&self) -> &'static str {
        self.style.map_or("", |style| style.delimiters().0)
    }

    fn has_content(&self) -> bool {
        !self.buffer.is_empty() || !self.children.is_empty()
    }

    /// Whether the frame holds anything once the frames above it are unwound into it.
    fn has_content_after_unwind(&self, above: &[InlineFrame]) -> bool {
        self.has_content() || !above.is_empty()
    }

    fn push_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        if let Some(Inline::Text(existing)) = self.children.last_mut() {
            existing.push_str(&text);
        } else {
            self.children.push(Inline::Text(text));
        }
    }

    fn push_node(&mut self, node: Inline) {
        match node {
            Inline::Text(text) => self.buffer.push_str(&text),
            other => {
                self.flush_buffer();
                self.children.push(other);
            }
        }
    }

    fn into_node(self) -> Inline {
        Inline::Span(Span {
            style: self.style.unwrap_or(SpanStyle::Bold),
            children: self.children,
        })
    }
}
