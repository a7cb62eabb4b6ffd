//! Link resolution
//!
//!     Link targets in the tree are kept as written. A [Linker] turns them into hrefs for
//!     an output format, based on their [LinkKind]:
//!
//!     - URLs and `#anchor` links are used as they are.
//!     - E-mail addresses get a `mailto:` prefix.
//!     - Relative file paths and image sources are resolved against `base_dir` when one
//!       is set.
//!     - Interwiki links are expanded from the shortcut table. `{NAME}` in a template is
//!       replaced with the encoded page name, otherwise the name is appended.
//!     - Page links become relative paths to the exported page file, e.g.
//!       `Projects:Zim#setup` to `Projects/Zim.html#setup`.

use crate::options::DumpOptions;
use std::path::Path;
use tracing::debug;
use url::form_urlencoded;
use zim_parser::zim::ast::LinkKind;

pub struct Linker<'a> {
    options: &'a DumpOptions,
    /// Extension for exported pages, without the dot
    page_extension: &'a str,
}

impl<'a> Linker<'a> {
    pub fn new(options: &'a DumpOptions, page_extension: &'a str) -> Self {
        Linker {
            options,
            page_extension,
        }
    }

    pub fn link(&self, target: &str) -> String {
        match LinkKind::classify(target) {
            LinkKind::Url | LinkKind::Anchor => target.to_string(),
            LinkKind::Mailto if target.starts_with("mailto:") => target.to_string(),
            LinkKind::Mailto => format!("mailto:{target}"),
            LinkKind::Share if target.starts_with("\\\\") => {
                format!("file:{}", target.replace('\\', "/"))
            }
            LinkKind::Share => target.to_string(),
            LinkKind::File => self.file(target),
            LinkKind::Interwiki => self.interwiki(target),
            LinkKind::Page => self.page(target),
        }
    }

    /// Resolve an image source.
    pub fn img(&self, src: &str) -> String {
        match LinkKind::classify(src) {
            LinkKind::Url => src.to_string(),
            _ => self.file(src),
        }
    }

    fn file(&self, path: &str) -> String {
        let Some(base) = &self.options.base_dir else {
            return path.to_string();
        };
        if is_absolute(path) || path.starts_with("file:") || path.starts_with('~') {
            return path.to_string();
        }
        let trimmed = path.strip_prefix("./").unwrap_or(path);
        Path::new(base).join(trimmed).to_string_lossy().into_owned()
    }

    fn interwiki(&self, target: &str) -> String {
        let Some((shortcut, name)) = target.split_once('?') else {
            return target.to_string();
        };
        let template = self
            .options
            .interwiki
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(shortcut))
            .map(|(_, template)| template);
        let Some(template) = template else {
            debug!(%shortcut, "no interwiki template, keeping link as written");
            return target.to_string();
        };
        let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
        if template.contains("{NAME}") {
            template.replace("{NAME}", &encoded)
        } else {
            format!("{template}{encoded}")
        }
    }

    fn page(&self, target: &str) -> String {
        let (page, anchor) = match target.split_once('#') {
            Some((page, anchor)) => (page, Some(anchor)),
            None => (target, None),
        };
        let path = page
            .trim_start_matches([':', '+'])
            .trim_end_matches(':')
            .split(':')
            .map(|part| part.trim().replace(' ', "_"))
            .collect::<Vec<_>>()
            .join("/");
        let mut href = format!("{path}.{}", self.page_extension);
        if page.starts_with('+') {
            href.insert_str(0, "./");
        }
        if let Some(anchor) = anchor {
            href.push('#');
            href.push_str(anchor);
        }
        href
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.as_bytes().get(1..3) == Some(b":\\".as_slice())
}
