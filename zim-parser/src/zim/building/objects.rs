//! Object blocks
//!
//!     The opening line of an object carries its parameters as `key=value` pairs. Values may
//!     be quoted, in which case a doubled quote stands for a literal one:
//!
//!         {{{code: lang="python3" linenumbers=True title="say ""hi"""

use crate::zim::ast::Object;
use once_cell::sync::Lazy;
use regex::Regex;

static PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([\w\-]+)=("(?:[^"]|"")*"|\S*)"#).unwrap());

pub fn parse_object_params(params: &str) -> Vec<(String, String)> {
    PARAM
        .captures_iter(params)
        .map(|caps| {
            let raw = &caps[2];
            let value = match raw.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
                Some(quoted) if raw.len() >= 2 => quoted.replace("\"\"", "\""),
                _ => raw.to_string(),
            };
            (caps[1].to_lowercase(), value)
        })
        .collect()
}

pub fn build_object(indent: usize, object_type: String, params: &str, body: String) -> Object {
    Object {
        indent,
        object_type,
        attributes: parse_object_params(params),
        body,
    }
}
