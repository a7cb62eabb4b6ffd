//! List nesting
//!
//!     Items arrive as a flat run of lines with a tab depth each. They are folded into list
//!     trees with a stack of open lists, innermost last:
//!
//!     - An item deeper than the innermost list opens a child list under that list's last
//!       item. A jump of several levels is clamped to one level below the parent, and
//!       later items at the same tab depth join that clamped list.
//!     - A shallower item closes lists until one at its depth (or shallower) is on top.
//!     - An item whose marker does not fit the list at its depth ends that list and starts
//!       a sibling list of its own kind, so `* a` followed by `[ ] b` gives two lists.
//!
//!     When the outermost list closes, a new top-level list starts. A single run of lines
//!     can therefore produce several lists.

use crate::zim::ast::{ItemMarker, List, ListItem};
use crate::zim::inlines::{parse_inlines, LinkHeuristics};

/// One list item line as classified by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLine {
    pub depth: usize,
    pub marker: ItemMarker,
    pub text: String,
}

/// An open list with the tab depth its items were written at. After a clamped jump
/// the source depth is deeper than `List.indent`.
struct OpenList {
    list: List,
    source_depth: usize,
}

struct ListStack {
    open: Vec<OpenList>,
    done: Vec<List>,
}

impl ListStack {
    fn start(&mut self, indent: usize, source_depth: usize, item: ListItem) {
        self.open.push(OpenList {
            list: List {
                kind: item.marker.list_kind(),
                indent,
                items: vec![item],
            },
            source_depth,
        });
    }

    /// Pop the innermost list and attach it where it belongs.
    fn close_top(&mut self) {
        let Some(OpenList { list, .. }) = self.open.pop() else {
            return;
        };
        match self
            .open
            .last_mut()
            .and_then(|parent| parent.list.items.last_mut())
        {
            Some(parent_item) => parent_item.children.push(list),
            None => self.done.push(list),
        }
    }

    fn close_all(&mut self) {
        while !self.open.is_empty() {
            self.close_top();
        }
    }

    fn push(&mut self, depth: usize, item: ListItem) {
        while self.open.len() > 1 && self.open.last().is_some_and(|l| l.source_depth > depth) {
            self.close_top();
        }

        let Some(top) = self.open.last_mut() else {
            self.start(depth, depth, item);
            return;
        };

        if depth > top.source_depth {
            let indent = top.list.indent + 1;
            self.start(indent, depth, item);
        } else if depth < top.source_depth {
            self.close_all();
            self.start(depth, depth, item);
        } else if top.list.items[0].marker.same_kind(&item.marker) {
            top.list.items.push(item);
        } else {
            let (indent, source_depth) = (top.list.indent, top.source_depth);
            self.close_top();
            self.start(indent, source_depth, item);
        }
    }
}

pub fn build_lists(lines: Vec<ItemLine>, links: &LinkHeuristics) -> Vec<List> {
    let mut stack = ListStack {
        open: Vec::new(),
        done: Vec::new(),
    };
    for line in lines {
        let item = ListItem::new(line.marker, parse_inlines(&line.text, links));
        stack.push(line.depth, item);
    }
    stack.close_all();
    stack.done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zim::ast::{CheckboxState, Inline, ListKind, NumberStyle};

    fn line(depth: usize, bullet: &str, text: &str) -> ItemLine {
        ItemLine {
            depth,
            marker: ItemMarker::from_bullet(bullet).unwrap(),
            text: text.to_string(),
        }
    }

    fn build(lines: Vec<ItemLine>) -> Vec<List> {
        build_lists(lines, &LinkHeuristics::default())
    }

    #[test]
    fn test_nested_child_list() {
        let lists = build(vec![
            line(0, "*", "item 1"),
            line(1, "*", "item a"),
            line(0, "*", "item 2"),
        ]);
        assert_eq!(lists.len(), 1);
        let list = &lists[0];
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].children.len(), 1);
        assert_eq!(list.items[0].children[0].indent, 1);
        assert_eq!(
            list.items[0].children[0].items[0].content,
            vec![Inline::text("item a")]
        );
        assert!(list.items[1].children.is_empty());
    }

    #[test]
    fn test_depth_jump_is_clamped() {
        let lists = build(vec![line(0, "*", "a"), line(3, "*", "deep"), line(3, "*", "deep too")]);
        let child = &lists[0].items[0].children[0];
        assert_eq!(child.indent, 1);
        assert_eq!(child.items.len(), 2);
    }

    #[test]
    fn test_shallower_item_after_jump_finds_parent() {
        let lists = build(vec![
            line(0, "*", "a"),
            line(4, "*", "deep"),
            line(2, "*", "middle"),
            line(2, "*", "middle too"),
            line(0, "*", "b"),
        ]);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].items.len(), 2);
        let children = &lists[0].items[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].items.len(), 1);
        assert_eq!(children[1].indent, 1);
        assert_eq!(children[1].items.len(), 2);
    }

    #[test]
    fn test_kind_change_starts_sibling_list() {
        let lists = build(vec![line(0, "*", "a"), line(0, "[ ]", "b"), line(0, "[x]", "c")]);
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].kind, ListKind::Bullet);
        assert_eq!(lists[1].kind, ListKind::Checkbox);
        assert_eq!(
            lists[1].items[1].marker,
            ItemMarker::Checkbox(CheckboxState::Checked)
        );
    }

    #[test]
    fn test_nested_kind_change_stays_under_parent() {
        let lists = build(vec![
            line(0, "*", "parent"),
            line(1, "1.", "first"),
            line(1, "a.", "alpha"),
        ]);
        assert_eq!(lists.len(), 1);
        let children = &lists[0].items[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[1].kind,
            ListKind::Numbered {
                style: NumberStyle::LowerAlpha,
                start: 1
            }
        );
    }

    #[test]
    fn test_numbered_start_from_first_item() {
        let lists = build(vec![line(0, "3.", "three"), line(0, "7.", "seven")]);
        assert_eq!(
            lists[0].kind,
            ListKind::Numbered {
                style: NumberStyle::Arabic,
                start: 3
            }
        );
        assert_eq!(lists[0].items[1].marker, ItemMarker::Number("7".into()));
    }

    #[test]
    fn test_shallower_than_first_item_starts_new_list() {
        let lists = build(vec![line(1, "*", "indented"), line(0, "*", "top")]);
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].indent, 1);
        assert_eq!(lists[1].indent, 0);
    }
}
