//! Document-level types.

use super::{Block, BlockKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed Markdown document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Blocks in source order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks, deriving the title from the first
    /// level-1 heading.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self {
            metadata: Metadata::default(),
            blocks,
        };
        doc.metadata.title = doc.first_title();
        doc
    }

    /// Add a block to the end of the document.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block tags in order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(Block::kind).collect()
    }

    /// Count blocks of the given kind.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind() == kind).count()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| !matches!(b, Block::Rule | Block::BlankLine))
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn first_title(&self) -> Option<String> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { level: 1, .. } => {
                let text = b.plain_text();
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            _ => None,
        })
    }
}

/// Document metadata, written to the package core properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title (first level-1 heading)
    pub title: Option<String>,

    /// Author written to the core properties
    pub author: Option<String>,

    /// Path of the source Markdown file
    pub source: Option<String>,

    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InlineSpan;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn test_title_from_first_h1() {
        let doc = Document::from_blocks(vec![
            Block::heading(2, vec![InlineSpan::text("Summary")]),
            Block::heading(1, vec![InlineSpan::bold("Jane Doe")]),
            Block::Rule,
        ]);
        assert_eq!(doc.metadata.title.as_deref(), Some("Jane Doe"));
        assert_eq!(
            doc.kinds(),
            vec![BlockKind::Heading, BlockKind::Heading, BlockKind::Rule]
        );
    }

    #[test]
    fn test_count() {
        let doc = Document::from_blocks(vec![Block::Rule, Block::text("a"), Block::Rule]);
        assert_eq!(doc.count(BlockKind::Rule), 2);
        assert_eq!(doc.plain_text(), "a");
    }
}
