//! Markdown parsing module.
//!
//! Parsing runs in three steps: [`preprocess`] normalizes the raw text,
//! the block parser splits it into [`Block`](crate::model::Block) values,
//! and the inline tokenizer turns each block's text into nested spans.

mod block;
mod inline;
mod options;
mod preprocess;

pub use block::parse_blocks;
pub use inline::tokenize;
pub use options::{ParseOptions, RaggedRowPolicy};
pub use preprocess::preprocess;

use crate::error::{Error, Result};
use crate::model::Document;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown document parser.
#[derive(Debug)]
pub struct MarkdownParser {
    source: String,
    path: Option<PathBuf>,
    options: ParseOptions,
}

impl MarkdownParser {
    /// Open a Markdown file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a Markdown file with custom options.
    ///
    /// The file is read completely and closed before parsing starts.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        log::debug!("read {} bytes from {}", source.len(), path.display());
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
            options,
        })
    }

    /// Create a parser over in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_text_with_options(text, ParseOptions::default())
    }

    /// Create a parser over in-memory text with custom options.
    pub fn from_text_with_options(text: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: text.into(),
            path: None,
            options,
        }
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the source into a document.
    pub fn parse(&self) -> Result<Document> {
        let text = preprocess(&self.source, &self.options);
        let blocks = parse_blocks(&text, &self.options)?;
        log::debug!("parsed {} blocks", blocks.len());

        let mut doc = Document::from_blocks(blocks);
        doc.metadata.source = self.path.as_ref().map(|p| p.display().to_string());
        doc.metadata.created = Some(Utc::now());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_parse_text() {
        let doc = MarkdownParser::from_text("# Jane Doe\n---\nSummary").parse().unwrap();
        assert_eq!(
            doc.kinds(),
            vec![BlockKind::Heading, BlockKind::Rule, BlockKind::Paragraph]
        );
        assert_eq!(doc.metadata.title.as_deref(), Some("Jane Doe"));
        assert!(doc.metadata.source.is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = MarkdownParser::open("definitely/not/here.md");
        assert!(matches!(result, Err(Error::InputNotFound(_))));
    }

    #[test]
    fn test_parse_empty() {
        let doc = MarkdownParser::from_text("").parse().unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_fenced_model_output() {
        let doc = MarkdownParser::from_text("```markdown\n## Skills\n- Rust\n```")
            .parse()
            .unwrap();
        assert_eq!(doc.kinds(), vec![BlockKind::Heading, BlockKind::ListItem]);
    }

    #[test]
    fn test_created_timestamp() {
        let before = Utc::now();
        let doc = MarkdownParser::from_text("Body").parse().unwrap();
        let created = doc.metadata.created.unwrap();
        assert!(created >= before && created <= Utc::now());
    }
}
