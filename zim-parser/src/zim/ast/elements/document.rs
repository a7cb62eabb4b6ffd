//! Document root

use super::block::Block;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Page headers other than the ones describing the format itself
    pub headers: Vec<(String, String)>,
    pub blocks: Vec<Block>,
    /// Whether the last line of the source was terminated
    pub ends_with_newline: bool,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document {
            headers: Vec::new(),
            blocks,
            ends_with_newline: true,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks
            .iter()
            .all(|block| matches!(block, Block::BlankLines(_)))
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new(Vec::new())
    }
}
