//! Escaped output read back by the standard parser of each format

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document as parse_markdown, Arena, ComrakOptions};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use proptest::prelude::*;
use zim_babel::{dump, Document, DumpOptions};
use zim_parser::zim::ast::{Block, Inline, Paragraph};

fn paragraph(text: &str) -> Document {
    Document::new(vec![Block::Paragraph(Paragraph {
        content: vec![Inline::text(text)],
    })])
}

/// Text content of the first `<p>` element in an HTML document.
fn html_paragraph_text(html: &str) -> Option<String> {
    let dom = html5ever::parse_document(RcDom::default(), Default::default()).one(html);
    find_element(&dom.document, "p").map(|p| {
        let mut text = String::new();
        collect_text(&p, &mut text);
        text
    })
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if name.local.as_ref() == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn collect_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Text content of a Markdown document, line breaks included.
fn markdown_text(markdown: &str) -> String {
    let arena = Arena::new();
    let root = parse_markdown(&arena, markdown, &ComrakOptions::default());
    let mut text = String::new();
    collect_markdown_text(root, &mut text);
    text
}

fn collect_markdown_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::LineBreak | NodeValue::SoftBreak => out.push('\n'),
        _ => {}
    }
    for child in node.children() {
        collect_markdown_text(child, out);
    }
}

#[test]
fn test_html_special_characters() {
    let source = "a < b && c > \"d\" 'e'";
    let html = dump("html", &paragraph(source), &DumpOptions::default())
        .unwrap()
        .output;
    assert_eq!(
        html_paragraph_text(&html).as_deref(),
        Some(format!("\n{source}\n").as_str())
    );
}

#[test]
fn test_markdown_special_characters() {
    let source = "# 1. *not* _emphasis_ [link](x) `code` <tag> &amp; \\";
    let markdown = dump("markdown", &paragraph(source), &DumpOptions::default())
        .unwrap()
        .output;
    assert_eq!(markdown_text(&markdown), source);
}

#[test]
fn test_markdown_line_break_survives() {
    let markdown = dump("markdown", &paragraph("one\ntwo"), &DumpOptions::default())
        .unwrap()
        .output;
    assert_eq!(markdown_text(&markdown), "one\ntwo");
}

proptest! {
    #[test]
    fn html_text_reads_back(text in "[a-zA-Z0-9 <>&\"'*_#%$^~`|{}\\[\\]\\\\.!()+=-]{1,40}") {
        let html = dump("html", &paragraph(&text), &DumpOptions::default()).unwrap().output;
        prop_assert_eq!(html_paragraph_text(&html), Some(format!("\n{text}\n")));
    }

    #[test]
    fn markdown_text_reads_back(text in "[a-zA-Z0-9<>&\"'*_#%$^~`|{}\\[\\]\\\\.!()+=-][a-zA-Z0-9 <>&\"'*_#%$^~`|{}\\[\\]\\\\.!()+=-]{0,38}[a-zA-Z0-9<>&\"'*_#%$^~`|{}\\[\\]\\\\.!()+=-]") {
        let markdown = dump("markdown", &paragraph(&text), &DumpOptions::default()).unwrap().output;
        prop_assert_eq!(markdown_text(&markdown), text);
    }
}
