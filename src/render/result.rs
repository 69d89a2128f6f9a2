//! Content statistics for a converted document.

use crate::model::{Block, Document, InlineSpan};
use serde::{Deserialize, Serialize};

/// Statistics collected from a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of body paragraphs
    pub paragraph_count: u32,

    /// Number of bullet items
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table body rows
    pub table_row_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Number of hyperlinks
    pub link_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            match block {
                Block::Heading { .. } => stats.heading_count += 1,
                Block::Paragraph(_) => stats.paragraph_count += 1,
                Block::ListItem(_) => stats.list_item_count += 1,
                Block::Table(table) => {
                    stats.table_count += 1;
                    stats.table_row_count += table.row_count() as u32;
                }
                Block::Rule => stats.horizontal_rule_count += 1,
                Block::BlankLine => {}
            }
            if let Some(spans) = block.spans() {
                stats.link_count += spans.iter().map(InlineSpan::link_count).sum::<usize>() as u32;
            }
            stats.count_text(&block.plain_text());
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of content blocks.
    pub fn block_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.list_item_count
            + self.table_count
            + self.horizontal_rule_count
    }
}
