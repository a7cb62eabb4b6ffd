//! LaTeX serialization

use crate::common::Linker;
use crate::options::{DocumentType, DumpOptions};
use tracing::debug;
use zim_parser::zim::ast::{
    Alignment, Block, CheckboxState, Document, Image, Inline, ItemMarker, Link, List, ListKind,
    NumberStyle, SpanStyle, Table,
};

/// Screen resolution assumed when converting pixel sizes to inches.
const DPI: f64 = 96.0;

/// Candidates for the `\lstinline` delimiter, tried in order.
const INLINE_DELIMITERS: &str = "+*|$&%!-_";

const PACKAGES: [&str; 8] = [
    "\\usepackage[utf8]{inputenc}",
    "\\usepackage{graphicx}",
    "\\usepackage{hyperref}",
    "\\usepackage{listings}",
    "\\usepackage{enumerate}",
    "\\usepackage{wasysym}",
    "\\usepackage[normalem]{ulem}",
    "\\usepackage{textcomp}",
];

fn sectioning(document_type: DocumentType, level: u8) -> &'static str {
    const REPORT: [&str; 5] = ["chapter", "section", "subsection", "subsubsection", "paragraph"];
    const ARTICLE: [&str; 5] = [
        "section",
        "subsection",
        "subsubsection",
        "paragraph",
        "subparagraph",
    ];
    const BOOK: [&str; 5] = ["part", "chapter", "section", "subsection", "subsubsection"];

    let table = match document_type {
        DocumentType::Report => &REPORT,
        DocumentType::Article => &ARTICLE,
        DocumentType::Book => &BOOK,
    };
    table[usize::from(level.clamp(1, 5)) - 1]
}

/// Escape the characters LaTeX treats specially in running text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '&' => out.push_str("\\&"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '^' => out.push_str("\\^{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '<' => out.push_str("\\textless{}"),
            '>' => out.push_str("\\textgreater{}"),
            other => out.push(other),
        }
    }
    out
}

/// Escape a URL for `\href`, where only `%`, `#` and `\` need care.
fn escape_url(url: &str) -> String {
    url.replace('\\', "/")
        .replace('%', "\\%")
        .replace('#', "\\#")
}

pub fn serialize_latex(doc: &Document, options: &DumpOptions) -> String {
    debug!(document_type = %options.document_type, "writing latex");
    let writer = LatexWriter {
        linker: Linker::new(options, "tex"),
        options,
    };
    let mut body = String::new();
    for block in &doc.blocks {
        writer.block(&mut body, block);
    }

    if options.standalone {
        let mut out = format!("\\documentclass{{{}}}\n", options.document_type);
        for package in PACKAGES {
            out.push_str(package);
            out.push('\n');
        }
        out.push_str("\\begin{document}\n\n");
        out.push_str(&body);
        out.push_str("\n\\end{document}\n");
        out
    } else {
        body
    }
}

struct LatexWriter<'a> {
    linker: Linker<'a>,
    options: &'a DumpOptions,
}

impl LatexWriter<'_> {
    fn block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Heading(heading) => {
                let command = sectioning(self.options.document_type, heading.level);
                out.push_str(&format!(
                    "\\{command}{{{}}}\n",
                    self.inlines(&heading.content, true)
                ));
            }
            Block::Paragraph(paragraph) => {
                out.push_str(&self.inlines(&paragraph.content, false));
                out.push('\n');
            }
            Block::Indented(indented) => {
                let depth = indented.indent.max(1);
                out.push_str(&"\\begin{quote}\n".repeat(depth));
                out.push_str(&self.inlines(&indented.content, false));
                out.push('\n');
                out.push_str(&"\\end{quote}\n".repeat(depth));
            }
            Block::List(list) => self.list(out, list, 0),
            Block::Verbatim(verbatim) => {
                self.listing(out, &verbatim.text, verbatim.indent, None);
            }
            Block::Object(object) => {
                self.listing(out, &object.body, object.indent, object.attribute("lang"));
            }
            Block::Table(table) => self.table(out, table),
            Block::HorizontalRule => out.push_str("\n\\hrule\n"),
            Block::BlankLines(count) => out.push_str(&"\n".repeat(*count)),
        }
    }

    fn listing(&self, out: &mut String, text: &str, indent: usize, language: Option<&str>) {
        let mut options = Vec::new();
        if let Some(language) = language {
            options.push(format!("language={language}"));
        }
        if self.options.line_numbers {
            options.push("numbers=left".to_string());
        }
        out.push_str("\\begin{lstlisting}");
        if !options.is_empty() {
            out.push_str(&format!("[{}]", options.join(", ")));
        }
        out.push('\n');
        let prefix = "    ".repeat(indent);
        for line in text.lines() {
            if !line.is_empty() {
                out.push_str(&prefix);
            }
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("\\end{lstlisting}\n");
    }

    fn list(&self, out: &mut String, list: &List, depth: usize) {
        let environment = match list.kind {
            ListKind::Numbered { style, start } => {
                let label = match style {
                    NumberStyle::Arabic => "1",
                    NumberStyle::LowerAlpha => "a",
                    NumberStyle::UpperAlpha => "A",
                };
                out.push_str(&format!("\\begin{{enumerate}}[{label}]\n"));
                if start > 1 {
                    out.push_str(&format!(
                        "\\setcounter{{{}}}{{{}}}\n",
                        enum_counter(depth),
                        start - 1
                    ));
                }
                "enumerate"
            }
            ListKind::Bullet | ListKind::Checkbox => {
                out.push_str("\\begin{itemize}\n");
                "itemize"
            }
        };
        for item in &list.items {
            let bullet = match &item.marker {
                ItemMarker::Checkbox(state) => checkbox_item(*state),
                _ => "\\item",
            };
            out.push_str(&format!("{bullet} {}\n", self.inlines(&item.content, false)));
            for child in &item.children {
                self.list(out, child, depth + 1);
            }
        }
        out.push_str(&format!("\\end{{{environment}}}\n"));
    }

    fn table(&self, out: &mut String, table: &Table) {
        let aligns: Vec<&str> = table
            .columns()
            .iter()
            .map(|column| match column.align {
                Alignment::Right => "r",
                Alignment::Center => "c",
                Alignment::Left | Alignment::Default => "l",
            })
            .collect();
        let row_line = |cells: &[Vec<Inline>]| {
            let cells: Vec<String> = cells
                .iter()
                .zip(&aligns)
                .map(|(cell, align)| {
                    let text = self.inlines(cell, false);
                    if text.contains("\\\\\n") {
                        let stacked = text.replace("\\\\\n", "\\\\");
                        format!(" \\shortstack[{align}]{{{stacked}}} ")
                    } else {
                        format!(" {text} ")
                    }
                })
                .collect();
            format!("{}\\tabularnewline\n\\hline\n", cells.join("&"))
        };

        out.push_str(&format!("\\begin{{tabular}}{{ |{}| }}\n", aligns.join("|")));
        out.push_str("\\hline\n");
        out.push_str(&row_line(table.header()));
        out.push_str("\\hline\n");
        for row in table.rows() {
            out.push_str(&row_line(row.as_slice()));
        }
        out.push_str("\\end{tabular}\n");
    }

    /// `nested` is set inside command arguments, where `\lstinline` cannot appear.
    fn inlines(&self, content: &[Inline], nested: bool) -> String {
        let mut out = String::new();
        for inline in content {
            match inline {
                Inline::Text(text) => out.push_str(&escape_latex(text).replace('\n', "\\\\\n")),
                Inline::Span(span) => {
                    let command = match span.style {
                        SpanStyle::Bold => "textbf",
                        SpanStyle::Italic => "emph",
                        SpanStyle::Underline => "uline",
                        SpanStyle::Strike => "sout",
                        SpanStyle::Subscript => "textsubscript",
                        SpanStyle::Superscript => "textsuperscript",
                    };
                    let inner = self.inlines(&span.children, true);
                    out.push_str(&format!("\\{command}{{{inner}}}"));
                }
                Inline::Verbatim(verbatim) if nested => out.push_str(&format!(
                    "\\texttt{{{}}}",
                    escape_latex(&verbatim.text)
                )),
                Inline::Verbatim(verbatim) => out.push_str(&inline_code(&verbatim.text)),
                Inline::Link(link) => out.push_str(&self.link(link)),
                Inline::Image(image) => out.push_str(&self.image(image)),
                Inline::Tag(name) => {
                    out.push('@');
                    out.push_str(&escape_latex(name));
                }
                Inline::Anchor(name) => out.push_str(&format!("\\label{{{name}}}")),
            }
        }
        out
    }

    fn link(&self, link: &Link) -> String {
        let href = escape_url(&self.linker.link(&link.target));
        let text = escape_latex(link.display());
        format!("\\href{{{href}}}{{{text}}}")
    }

    fn image(&self, image: &Image) -> String {
        let inches = |pixels: u32| f64::from(pixels) / DPI;
        let options = match (image.width, image.height) {
            (Some(width), None) => format!("width={:.6}in, keepaspectratio=true", inches(width)),
            (None, Some(height)) => {
                format!("height={:.6}in, keepaspectratio=true", inches(height))
            }
            (Some(width), Some(height)) => format!(
                "height={:.6}in, width={:.6}in",
                inches(height),
                inches(width)
            ),
            (None, None) => String::new(),
        };
        let path = self.linker.img(&image.src);
        let path = path.strip_prefix("file://").unwrap_or(&path);
        let graphic = format!("\\includegraphics[{options}]{{{path}}}");
        match &image.href {
            Some(href) => format!("\\href{{{}}}{{{graphic}}}", escape_url(&self.linker.link(href))),
            None => graphic,
        }
    }
}

fn checkbox_item(state: CheckboxState) -> &'static str {
    match state {
        CheckboxState::Unchecked => "\\item[\\Square]",
        CheckboxState::Checked => "\\item[\\CheckedBox]",
        CheckboxState::Crossed => "\\item[\\XBox]",
        CheckboxState::MigratedForward => "\\item[\\RIGHTarrow]",
        CheckboxState::MigratedBack => "\\item[\\LEFTarrow]",
    }
}

/// The enumerate counter for a nesting depth. LaTeX has four.
fn enum_counter(depth: usize) -> &'static str {
    ["enumi", "enumii", "enumiii", "enumiv"][depth.min(3)]
}

/// `\lstinline` with the first delimiter that does not occur in the text.
fn inline_code(text: &str) -> String {
    match INLINE_DELIMITERS.chars().find(|d| !text.contains(*d)) {
        Some(delimiter) => format!("\\lstinline{delimiter}{text}{delimiter}"),
        None => format!("\\texttt{{{}}}", escape_latex(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zim_parser::zim::parsing::{parse_document, ParseOptions};

    fn latex(source: &str) -> String {
        latex_with(source, &DumpOptions::default())
    }

    fn latex_with(source: &str, options: &DumpOptions) -> String {
        serialize_latex(&parse_document(source, &ParseOptions::default()), options)
    }

    #[test]
    fn test_escapes_specials() {
        assert_eq!(
            escape_latex(r"\ { } % $ & # _ ^ ~"),
            r"\textbackslash{} \{ \} \% \$ \& \# \_ \^{} \textasciitilde{}"
        );
    }

    #[test]
    fn test_sectioning_follows_document_type() {
        let source = "====== Top ======\n== Low ==\n";
        assert_eq!(latex(source), "\\chapter{Top}\n\\paragraph{Low}\n");

        let article = DumpOptions {
            document_type: DocumentType::Article,
            ..DumpOptions::default()
        };
        assert_eq!(
            latex_with(source, &article),
            "\\section{Top}\n\\subparagraph{Low}\n"
        );

        let book = DumpOptions {
            document_type: DocumentType::Book,
            ..DumpOptions::default()
        };
        assert_eq!(
            latex_with(source, &book),
            "\\part{Top}\n\\subsubsection{Low}\n"
        );
    }

    #[test]
    fn test_checkbox_list() {
        assert_eq!(
            latex("[ ] a\n[x] b\n[*] c\n[>] d\n"),
            "\\begin{itemize}\n\\item[\\Square] a\n\\item[\\CheckedBox] b\n\\item[\\XBox] c\n\\item[\\RIGHTarrow] d\n\\end{itemize}\n"
        );
    }

    #[test]
    fn test_numbered_list_start() {
        assert_eq!(
            latex("c. three\nd. four\n"),
            "\\begin{enumerate}[a]\n\\setcounter{enumi}{2}\n\\item three\n\\item four\n\\end{enumerate}\n"
        );
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            latex("**b** //i// ''a+b'' 100%\n"),
            "\\textbf{b} \\emph{i} \\lstinline*a+b* 100\\%\n"
        );
    }

    #[test]
    fn test_code_in_command_arguments_uses_texttt() {
        assert_eq!(
            latex("====== Use ''a_b'' ======\n"),
            "\\chapter{Use \\texttt{a\\_b}}\n"
        );
        assert_eq!(latex("**''c''**\n"), "\\textbf{\\texttt{c}}\n");
    }

    #[test]
    fn test_image_size_in_inches() {
        assert_eq!(
            latex("{{./a.png?width=48}}\n"),
            "\\includegraphics[width=0.500000in, keepaspectratio=true]{./a.png}\n"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            latex("[[https://x.org/a#b|see x]]\n"),
            "\\href{https://x.org/a\\#b}{see x}\n"
        );
    }

    #[test]
    fn test_verbatim_listing() {
        assert_eq!(
            latex("'''\n$x_1$\n'''\n"),
            "\\begin{lstlisting}\n$x_1$\n\\end{lstlisting}\n"
        );
    }

    #[test]
    fn test_table() {
        assert_eq!(
            latex("| a | b |\n|---|--:|\n| 1 | 2 |\n"),
            "\\begin{tabular}{ |l|r| }\n\\hline\n a & b \\tabularnewline\n\\hline\n\\hline\n 1 & 2 \\tabularnewline\n\\hline\n\\end{tabular}\n"
        );
    }

    #[test]
    fn test_standalone_preamble() {
        let options = DumpOptions {
            standalone: true,
            document_type: DocumentType::Article,
            ..DumpOptions::default()
        };
        let out = latex_with("text\n", &options);
        assert!(out.starts_with("\\documentclass{article}\n"));
        assert!(out.contains("\\usepackage{wasysym}\n"));
        assert!(out.contains("\\begin{document}\n\ntext\n"));
        assert!(out.ends_with("\\end{document}\n"));
    }
}
