//! List element
//!
//!     A list is a run of items sharing one kind: bullets (`*`), checkboxes (`[ ]`, `[x]`, ...)
//!     or numbers (`1.`, `a.`, `B.`). Items nest by indenting one tab deeper than their
//!     parent, and an item can hold several nested lists when the kind changes between
//!     children.
//!
//!     Numbered lists keep the literal label of every item so the wiki dumper can reproduce
//!     source numbering that skips or repeats. Other dumpers number sequentially from
//!     [ListKind::Numbered::start] in the list's [NumberStyle].
//!
//!     Examples:
//!         * Groceries
//!         	[x] Bread
//!         	[ ] Milk
//!         3. starts at three
//!         	a. nested alpha

use super::inline::InlineContent;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub kind: ListKind,
    /// Indent of the list's own items, in tabs
    pub indent: usize,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListKind {
    Bullet,
    Checkbox,
    Numbered { style: NumberStyle, start: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub marker: ItemMarker,
    pub content: InlineContent,
    pub children: Vec<List>,
}

impl ListItem {
    pub fn new(marker: ItemMarker, content: InlineContent) -> Self {
        ListItem {
            marker,
            content,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemMarker {
    Bullet,
    Checkbox(CheckboxState),
    /// Literal label without the trailing period, e.g. `3` or `c`
    Number(String),
}

impl ItemMarker {
    /// Recognize a bullet as written in wiki source.
    pub fn from_bullet(bullet: &str) -> Option<Self> {
        if bullet == "*" || bullet == "\u{2022}" {
            return Some(ItemMarker::Bullet);
        }
        if let Some(state) = CheckboxState::from_glyph(bullet) {
            return Some(ItemMarker::Checkbox(state));
        }
        let label = bullet.strip_suffix('.')?;
        NumberStyle::parse_label(label).map(|_| ItemMarker::Number(label.to_string()))
    }

    /// The kind of list an item with this marker belongs to.
    pub fn list_kind(&self) -> ListKind {
        match self {
            ItemMarker::Bullet => ListKind::Bullet,
            ItemMarker::Checkbox(_) => ListKind::Checkbox,
            ItemMarker::Number(label) => {
                let (style, start) = NumberStyle::parse_label(label).unwrap_or((NumberStyle::Arabic, 1));
                ListKind::Numbered { style, start }
            }
        }
    }

    /// Whether two markers can share a list.
    pub fn same_kind(&self, other: &ItemMarker) -> bool {
        match (self.list_kind(), other.list_kind()) {
            (ListKind::Numbered { style: a, .. }, ListKind::Numbered { style: b, .. }) => a == b,
            (a, b) => a == b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Crossed,
    MigratedForward,
    MigratedBack,
}

impl CheckboxState {
    pub const ALL: [CheckboxState; 5] = [
        CheckboxState::Unchecked,
        CheckboxState::Checked,
        CheckboxState::Crossed,
        CheckboxState::MigratedForward,
        CheckboxState::MigratedBack,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            CheckboxState::Unchecked => "[ ]",
            CheckboxState::Checked => "[x]",
            CheckboxState::Crossed => "[*]",
            CheckboxState::MigratedForward => "[>]",
            CheckboxState::MigratedBack => "[<]",
        }
    }

    pub fn from_glyph(glyph: &str) -> Option<Self> {
        CheckboxState::ALL.into_iter().find(|state| state.glyph() == glyph)
    }

    /// A single display character, for formats without checkbox syntax.
    pub fn symbol(self) -> char {
        match self {
            CheckboxState::Unchecked => '\u{2610}',
            CheckboxState::Checked => '\u{2611}',
            CheckboxState::Crossed => '\u{2612}',
            CheckboxState::MigratedForward => '\u{25B7}',
            CheckboxState::MigratedBack => '\u{25C1}',
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            CheckboxState::Unchecked => "unchecked",
            CheckboxState::Checked => "checked",
            CheckboxState::Crossed => "xchecked",
            CheckboxState::MigratedForward => "migrated",
            CheckboxState::MigratedBack => "transmigrated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    Arabic,
    LowerAlpha,
    UpperAlpha,
}

impl NumberStyle {
    /// Parse a label such as `12`, `c` or `C` into its style and value.
    pub fn parse_label(label: &str) -> Option<(NumberStyle, u32)> {
        if !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()) {
            return label.parse().ok().map(|n| (NumberStyle::Arabic, n));
        }
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => {
                Some((NumberStyle::LowerAlpha, c as u32 - 'a' as u32 + 1))
            }
            (Some(c), None) if c.is_ascii_uppercase() => {
                Some((NumberStyle::UpperAlpha, c as u32 - 'A' as u32 + 1))
            }
            _ => None,
        }
    }

    /// Label for the `n`th item. Letters run out after `z`, beyond that the number is used.
    pub fn label(self, n: u32) -> String {
        let letter = |base: u8| {
            if (1..=26).contains(&n) {
                char::from(base + (n as u8) - 1).to_string()
            } else {
                n.to_string()
            }
        };
        match self {
            NumberStyle::Arabic => n.to_string(),
            NumberStyle::LowerAlpha => letter(b'a'),
            NumberStyle::UpperAlpha => letter(b'A'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_from_bullet() {
        assert_eq!(ItemMarker::from_bullet("*"), Some(ItemMarker::Bullet));
        assert_eq!(ItemMarker::from_bullet("\u{2022}"), Some(ItemMarker::Bullet));
        assert_eq!(
            ItemMarker::from_bullet("[x]"),
            Some(ItemMarker::Checkbox(CheckboxState::Checked))
        );
        assert_eq!(
            ItemMarker::from_bullet("12."),
            Some(ItemMarker::Number("12".into()))
        );
        assert_eq!(ItemMarker::from_bullet("b."), Some(ItemMarker::Number("b".into())));
        assert_eq!(ItemMarker::from_bullet("ab."), None);
        assert_eq!(ItemMarker::from_bullet("[?]"), None);
    }

    #[test]
    fn test_checkbox_glyphs_round_trip() {
        for state in CheckboxState::ALL {
            assert_eq!(CheckboxState::from_glyph(state.glyph()), Some(state));
        }
    }

    #[test]
    fn test_number_labels() {
        assert_eq!(NumberStyle::parse_label("c"), Some((NumberStyle::LowerAlpha, 3)));
        assert_eq!(NumberStyle::parse_label("C"), Some((NumberStyle::UpperAlpha, 3)));
        assert_eq!(NumberStyle::parse_label("07"), Some((NumberStyle::Arabic, 7)));
        assert_eq!(NumberStyle::LowerAlpha.label(2), "b");
        assert_eq!(NumberStyle::UpperAlpha.label(27), "27");
    }

    #[test]
    fn test_number_kinds_share_list_only_with_same_style() {
        let one = ItemMarker::Number("1".into());
        let five = ItemMarker::Number("5".into());
        let alpha = ItemMarker::Number("a".into());
        assert!(one.same_kind(&five));
        assert!(!one.same_kind(&alpha));
        assert!(!ItemMarker::Bullet.same_kind(&ItemMarker::Checkbox(CheckboxState::Checked)));
        assert!(ItemMarker::Checkbox(CheckboxState::Unchecked)
            .same_kind(&ItemMarker::Checkbox(CheckboxState::Checked)));
    }
}
