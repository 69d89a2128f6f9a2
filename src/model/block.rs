//! Block-level types.

use super::{spans_plain_text, InlineSpan, Table};
use serde::{Deserialize, Serialize};

/// Highest heading level the parser produces.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A top-level structural unit of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-6)
    Heading {
        /// Heading level
        level: u8,
        /// Inline content
        content: Vec<InlineSpan>,
    },

    /// A body paragraph
    Paragraph(Vec<InlineSpan>),

    /// A bulleted list item
    ListItem(Vec<InlineSpan>),

    /// A table with header and body rows
    Table(Table),

    /// A horizontal rule
    Rule,

    /// A collapsed run of blank lines between content blocks
    BlankLine,
}

impl Block {
    /// Create a heading, clamping the level into 1-6.
    pub fn heading(level: u8, content: Vec<InlineSpan>) -> Self {
        Block::Heading {
            level: level.clamp(1, MAX_HEADING_LEVEL),
            content,
        }
    }

    /// Create a paragraph holding plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Block::Paragraph(vec![InlineSpan::text(text)])
    }

    /// The tag of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::ListItem(_) => BlockKind::ListItem,
            Block::Table(_) => BlockKind::Table,
            Block::Rule => BlockKind::Rule,
            Block::BlankLine => BlockKind::BlankLine,
        }
    }

    /// Inline content for text-bearing blocks.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        match self {
            Block::Heading { content, .. } => Some(content),
            Block::Paragraph(spans) | Block::ListItem(spans) => Some(spans),
            Block::Table(_) | Block::Rule | Block::BlankLine => None,
        }
    }

    /// Heading level, or `None` for non-heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Visible text of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Table(table) => table.plain_text(),
            Block::Rule | Block::BlankLine => String::new(),
            _ => self.spans().map(spans_plain_text).unwrap_or_default(),
        }
    }
}

/// The tag of a [`Block`], used to compare block and output element order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Heading block
    Heading,
    /// Paragraph block
    Paragraph,
    /// List item block
    ListItem,
    /// Table block
    Table,
    /// Horizontal rule
    Rule,
    /// Blank line boundary
    BlankLine,
}
