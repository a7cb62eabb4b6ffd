//! AST traits - tree walking
//!
//! A [Visitor] gets a `visit_*` call when a node is entered and a `leave_*` call once its
//! children have been walked. Every method has an empty default body, so a visitor only
//! implements the hooks it cares about.
//!
//! ```ignore
//! struct TagCounter(usize);
//!
//! impl Visitor for TagCounter {
//!     fn visit_inline(&mut self, inline: &Inline) {
//!         if let Inline::Tag(_) = inline {
//!             self.0 += 1;
//!         }
//!     }
//! }
//! ```

use super::elements::{
    Block, Document, Heading, Indented, Inline, List, ListItem, Object, Paragraph, Table,
    Verbatim,
};

pub trait Visitor {
    fn visit_heading(&mut self, _heading: &Heading) {}
    fn leave_heading(&mut self, _heading: &Heading) {}

    fn visit_paragraph(&mut self, _paragraph: &Paragraph) {}
    fn leave_paragraph(&mut self, _paragraph: &Paragraph) {}

    fn visit_indented(&mut self, _indented: &Indented) {}
    fn leave_indented(&mut self, _indented: &Indented) {}

    fn visit_list(&mut self, _list: &List) {}
    fn leave_list(&mut self, _list: &List) {}

    fn visit_list_item(&mut self, _item: &ListItem) {}
    fn leave_list_item(&mut self, _item: &ListItem) {}

    fn visit_table(&mut self, _table: &Table) {}
    fn leave_table(&mut self, _table: &Table) {}

    fn visit_verbatim(&mut self, _verbatim: &Verbatim) {}
    fn visit_object(&mut self, _object: &Object) {}
    fn visit_horizontal_rule(&mut self) {}
    fn visit_blank_lines(&mut self, _count: usize) {}

    fn visit_inline(&mut self, _inline: &Inline) {}
    fn leave_inline(&mut self, _inline: &Inline) {}
}

/// Nodes that can be walked by a [Visitor].
pub trait Walk {
    fn accept(&self, visitor: &mut dyn Visitor);
}

impl Walk for Document {
    fn accept(&self, visitor: &mut dyn Visitor) {
        for block in &self.blocks {
            block.accept(visitor);
        }
    }
}

impl Walk for Block {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Block::Heading(heading) => {
                visitor.visit_heading(heading);
                walk_inlines(visitor, &heading.content);
                visitor.leave_heading(heading);
            }
            Block::Paragraph(paragraph) => {
                visitor.visit_paragraph(paragraph);
                walk_inlines(visitor, &paragraph.content);
                visitor.leave_paragraph(paragraph);
            }
            Block::Indented(indented) => {
                visitor.visit_indented(indented);
                walk_inlines(visitor, &indented.content);
                visitor.leave_indented(indented);
            }
            Block::List(list) => list.accept(visitor),
            Block::Table(table) => {
                visitor.visit_table(table);
                for cell in table.header() {
                    walk_inlines(visitor, cell);
                }
                for row in table.rows() {
                    for cell in row {
                        walk_inlines(visitor, cell);
                    }
                }
                visitor.leave_table(table);
            }
            Block::Verbatim(verbatim) => visitor.visit_verbatim(verbatim),
            Block::Object(object) => visitor.visit_object(object),
            Block::HorizontalRule => visitor.visit_horizontal_rule(),
            Block::BlankLines(count) => visitor.visit_blank_lines(*count),
        }
    }
}

impl Walk for List {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_list(self);
        for item in &self.items {
            item.accept(visitor);
        }
        visitor.leave_list(self);
    }
}

impl Walk for ListItem {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_list_item(self);
        walk_inlines(visitor, &self.content);
        for child in &self.children {
            child.accept(visitor);
        }
        visitor.leave_list_item(self);
    }
}

impl Walk for Inline {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_inline(self);
        if let Inline::Span(span) = self {
            walk_inlines(visitor, &span.children);
        }
        visitor.leave_inline(self);
    }
}

pub fn walk_inlines(visitor: &mut dyn Visitor, content: &[Inline]) {
    for inline in content {
        inline.accept(visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zim::ast::{ItemMarker, ListKind, SpanStyle};

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        fn visit_paragraph(&mut self, _: &Paragraph) {
            self.0.push("paragraph".into());
        }
        fn visit_list_item(&mut self, _: &ListItem) {
            self.0.push("item".into());
        }
        fn leave_list_item(&mut self, _: &ListItem) {
            self.0.push("/item".into());
        }
        fn visit_inline(&mut self, inline: &Inline) {
            if let Inline::Text(text) = inline {
                self.0.push(text.clone());
            }
        }
    }

    #[test]
    fn test_walk_order() {
        let nested = List {
            kind: ListKind::Bullet,
            indent: 1,
            items: vec![ListItem::new(ItemMarker::Bullet, vec![Inline::text("b")])],
        };
        let mut outer = ListItem::new(ItemMarker::Bullet, vec![Inline::text("a")]);
        outer.children.push(nested);
        let doc = Document::new(vec![
            Block::Paragraph(Paragraph {
                content: vec![Inline::span(SpanStyle::Bold, vec![Inline::text("p")])],
            }),
            Block::List(List {
                kind: ListKind::Bullet,
                indent: 0,
                items: vec![outer],
            }),
        ]);

        let mut recorder = Recorder::default();
        doc.accept(&mut recorder);
        assert_eq!(
            recorder.0,
            vec!["paragraph", "p", "item", "a", "item", "b", "/item", "/item"]
        );
    }
}
