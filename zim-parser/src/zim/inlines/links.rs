//! Links, images, tags and anchors
//!
//!     Bracketed links and images are always recognized. Bare tokens only become links
//!     when the matching heuristic is switched on in [LinkHeuristics]; the caller decides
//!     which ones apply to a given parse.

use crate::zim::ast::{Image, Inline, Link};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::form_urlencoded;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:[a-zA-Z][\w+\-.]*://[^\s"<>']*[\w/]|mailto:[^\s"<>']*\w|\w[\w.+\-]*@[\w\-]+(?:\.[\w\-]+)+)"#,
    )
    .unwrap()
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@(\w+)").unwrap());
static ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##([\w\-]+)").unwrap());
static ANCHOR_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#(\w[\w\-]*)").unwrap());
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Lu}\p{Ll}+\p{Lu}\w*$").unwrap());
static PAGE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?::?\p{L}[\w.\-]+(?::[\w.\-]+)+|\+\p{L}[\w.\-]+(?::[\w.\-]+)*)$").unwrap()
});
static INTERWIKI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w[\w+\-.]*\?\S+$").unwrap());
static FILE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:~?/|\.\.?/|[A-Za-z]:\\)\S+$").unwrap());

/// Which bare tokens are turned into links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkHeuristics {
    /// `CamelCase` words link to the page of that name
    pub camel_case: bool,
    /// `Namespace:Page` and `+Child` tokens
    pub page_paths: bool,
    /// `scheme://...`, `mailto:` and e-mail addresses
    pub urls: bool,
    /// `shortcut?name`
    pub interwiki: bool,
    /// `/abs/path`, `./rel`, `../rel`, `~/home` and `C:\win`
    pub file_paths: bool,
    /// `#name` links to an anchor on the same page
    pub anchor_links: bool,
}

impl Default for LinkHeuristics {
    fn default() -> Self {
        LinkHeuristics {
            camel_case: false,
            page_paths: false,
            urls: true,
            interwiki: false,
            file_paths: false,
            anchor_links: false,
        }
    }
}

impl LinkHeuristics {
    pub fn none() -> Self {
        LinkHeuristics {
            urls: false,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        LinkHeuristics {
            camel_case: true,
            page_paths: true,
            urls: true,
            interwiki: true,
            file_paths: true,
            anchor_links: true,
        }
    }
}

/// Parse the inside of `[[...]]`. Stray pipes around the target or text are dropped.
pub fn parse_bracket_link(content: &str) -> Option<Link> {
    let content = content.trim_matches('|');
    let (target, text) = match content.split_once('|') {
        Some((target, text)) => {
            let text = text.trim_matches('|');
            (target, (!text.is_empty()).then(|| text.to_string()))
        }
        None => (content, None),
    };
    if target.trim().is_empty() {
        return None;
    }
    Some(Link::bracketed(target, text))
}

/// Parse the inside of `{{...}}`: a source, optional `?key=value&...` options and an
/// optional `|alt` text.
pub fn parse_image(content: &str) -> Option<Image> {
    let (url, alt) = match content.split_once('|') {
        Some((url, alt)) => (url, (!alt.is_empty()).then(|| alt.to_string())),
        None => (content, None),
    };

    let (src, query) = match url.find('?') {
        Some(i) if i > 0 => (&url[..i], Some(&url[i + 1..])),
        _ => (url, None),
    };
    if src.trim().is_empty() {
        return None;
    }

    let mut image = Image {
        alt,
        ..Image::new(src)
    };
    if let Some(query) = query {
        apply_image_options(&mut image, query, url);
    }
    Some(image)
}

fn apply_image_options(image: &mut Image, query: &str, url: &str) {
    for option in query.split('&') {
        if !option.contains('=') {
            warn!(%url, "malformed image options");
            break;
        }
        let Some((key, value)) = form_urlencoded::parse(option.as_bytes()).next() else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let value = value.into_owned();
        match key.as_ref() {
            "width" | "height" => match value.parse::<u32>() {
                Ok(size) if key == "width" => image.width = Some(size),
                Ok(size) => image.height = Some(size),
                Err(_) => warn!(%url, %key, %value, "ignoring image size that is not a number"),
            },
            "type" => image.kind = Some(value),
            "href" => image.href = Some(value),
            "id" => image.id = Some(value),
            other => warn!(%url, key = other, "unknown image attribute"),
        }
    }
}

/// Encode image options for wiki source, `key=value` pairs joined by `&`.
pub fn encode_image_options(image: &Image) -> String {
    image
        .options()
        .into_iter()
        .map(|(key, value)| {
            let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{key}={encoded}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A token may start here when it follows whitespace, an opening bracket or a quote.
pub fn at_token_start(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '"' | '\''),
    }
}

/// `@tag` right after whitespace or at the start of the line.
pub fn tag_at(rest: &str, prev: Option<char>) -> Option<(Inline, usize)> {
    if !prev.map_or(true, char::is_whitespace) {
        return None;
    }
    let caps = TAG.captures(rest)?;
    Some((Inline::Tag(caps[1].to_string()), caps[0].len()))
}

/// `##name` anchor definition.
pub fn anchor_at(rest: &str, prev: Option<char>) -> Option<(Inline, usize)> {
    if !prev.map_or(true, char::is_whitespace) {
        return None;
    }
    let caps = ANCHOR.captures(rest)?;
    Some((Inline::Anchor(caps[1].to_string()), caps[0].len()))
}

/// Try each enabled bare link heuristic at the start of `rest`.
///
/// Returns the link and the number of bytes it covers.
pub fn bare_link_at(
    rest: &str,
    prev: Option<char>,
    links: &LinkHeuristics,
) -> Option<(Inline, usize)> {
    let word_boundary = !prev.map_or(false, |c| c.is_alphanumeric() || c == '_');

    if links.urls && word_boundary {
        if let Some(found) = URL.find(rest) {
            return Some((bare(found.as_str()), found.end()));
        }
    }

    if !at_token_start(prev) {
        return None;
    }

    if links.anchor_links && !rest.starts_with("##") {
        if let Some(found) = ANCHOR_LINK.find(rest) {
            return Some((bare(found.as_str()), found.end()));
        }
    }

    let token = token_at(rest);
    if !token.is_empty() {
        let matched = (links.interwiki && INTERWIKI.is_match(token))
            || (links.page_paths && PAGE_PATH.is_match(token))
            || (links.file_paths && !token.starts_with("//") && FILE_PATH.is_match(token));
        if matched {
            return Some((bare(token), token.len()));
        }
    }

    if links.camel_case {
        let word_len = rest
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map_or(rest.len(), |(i, _)| i);
        let word = &rest[..word_len];
        if CAMEL_CASE.is_match(word) {
            return Some((bare(word), word_len));
        }
    }

    None
}

fn bare(target: &str) -> Inline {
    Inline::Link(Link::bare(target))
}

/// The run of non-whitespace at the start of `rest`, minus trailing punctuation.
fn token_at(rest: &str) -> &str {
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    rest[..end].trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '"', '\''])
}
