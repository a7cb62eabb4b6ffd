//! Page headers
//!
//!     A page file starts with RFC 822 style header lines, terminated by an empty line:
//!
//!         Content-Type: text/x-zim-wiki
//!         Wiki-Format: zim 0.4
//!         Creation-Date: 2010-12-14T14:15:09.134955
//!
//!     A value may continue on following lines that start with whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

pub const CONTENT_TYPE: &str = "text/x-zim-wiki";
pub const WIKI_FORMAT_VERSION: &str = "zim 0.4";

/// Format versions that already treat indented paragraphs as indented text.
const CURRENT_FORMAT_VERSIONS: [&str; 2] = ["zim 0.26", WIKI_FORMAT_VERSION];

/// Headers that describe the file format and are not kept on the document.
const PARSER_HEADERS: [&str; 3] = ["Content-Type", "Wiki-Format", "Modification-Date"];

static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\w\-]+):\s+(.*?)\s*$").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeaders {
    /// Every header in source order, including the format headers
    pub all: Vec<(String, String)>,
}

impl PageHeaders {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.all
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Headers worth keeping on the document.
    pub fn user_headers(&self) -> Vec<(String, String)> {
        self.all
            .iter()
            .filter(|(key, _)| !PARSER_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(key)))
            .cloned()
            .collect()
    }

    /// Whether the body predates indented text and must be read in legacy mode.
    ///
    /// That is the case for any recognized header block without a current `Wiki-Format`.
    pub fn needs_legacy_mode(&self) -> bool {
        if self.all.is_empty() {
            return false;
        }
        match self.get("Wiki-Format") {
            Some(version) => !CURRENT_FORMAT_VERSIONS.contains(&version),
            None => true,
        }
    }
}

/// Split leading header lines off `source`.
///
/// Returns the headers and the remaining body. When the text does not start with a
/// well-formed header block, no headers are returned and the body is the whole input.
pub fn split_headers(source: &str) -> (PageHeaders, &str) {
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            if headers.is_empty() {
                break;
            }
            offset += line.len();
            return (PageHeaders { all: headers }, &source[offset..]);
        }
        if content.starts_with([' ', '\t']) {
            match headers.last_mut() {
                Some((_, value)) => {
                    value.push('\n');
                    value.push_str(content.trim());
                }
                None => break,
            }
        } else if let Some(caps) = HEADER_LINE.captures(content) {
            headers.push((caps[1].to_string(), caps[2].to_string()));
        } else {
            break;
        }
        offset += line.len();
    }

    if !headers.is_empty() && offset == source.len() {
        return (PageHeaders { all: headers }, "");
    }
    (PageHeaders::default(), source)
}

/// Write the header block for a page file, including the terminating empty line.
pub fn dump_headers(extra: &[(String, String)]) -> String {
    let mut out = format!("Content-Type: {CONTENT_TYPE}\nWiki-Format: {WIKI_FORMAT_VERSION}\n");
    for (key, value) in extra {
        if PARSER_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(key)) {
            continue;
        }
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value.replace('\n', "\n\t"));
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.4\nCreation-Date: 2010-12-14\n\n====== Title ======\n";

    #[test]
    fn test_split_headers() {
        let (headers, body) = split_headers(PAGE);
        assert_eq!(headers.get("wiki-format"), Some("zim 0.4"));
        assert_eq!(
            headers.user_headers(),
            vec![("Creation-Date".to_string(), "2010-12-14".to_string())]
        );
        assert_eq!(body, "====== Title ======\n");
        assert!(!headers.needs_legacy_mode());
    }

    #[test]
    fn test_continuation_lines() {
        let (headers, body) = split_headers("X-Note: first\n  second\n\nbody\n");
        assert_eq!(headers.get("X-Note"), Some("first\nsecond"));
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_plain_text_has_no_headers() {
        let (headers, body) = split_headers("Just some text: not a header\n");
        assert!(headers.all.is_empty());
        assert_eq!(body, "Just some text: not a header\n");

        let (headers, body) = split_headers("Key: value\nno colon here\n\n");
        assert!(headers.all.is_empty());
        assert_eq!(body, "Key: value\nno colon here\n\n");
    }

    #[test]
    fn test_legacy_detection() {
        let (old, _) = split_headers("Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.2\n\n");
        assert!(old.needs_legacy_mode());
        let (missing, _) = split_headers("Content-Type: text/x-zim-wiki\n\n");
        assert!(missing.needs_legacy_mode());
        let (none, _) = split_headers("hello\n");
        assert!(!none.needs_legacy_mode());
    }

    #[test]
    fn test_dump_headers() {
        let dumped = dump_headers(&[("Creation-Date".into(), "2010-12-14".into())]);
        assert_eq!(
            dumped,
            "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.4\nCreation-Date: 2010-12-14\n\n"
        );
    }
}
