//! Plain text rendering.

use crate::model::{spans_plain_text, Block, Document};

/// Convert a document to plain text.
///
/// Formatting marks are dropped, bullets are written as `- ` lines, rules as
/// a dashed line and tables as tab-separated rows.
pub fn to_text(doc: &Document) -> String {
    let mut output = String::new();

    for block in &doc.blocks {
        match block {
            Block::Heading { content, .. } | Block::Paragraph(content) => {
                output.push_str(&spans_plain_text(content));
            }
            Block::ListItem(content) => {
                output.push_str("- ");
                output.push_str(&spans_plain_text(content));
            }
            Block::Table(table) => output.push_str(&table.plain_text()),
            Block::Rule => output.push_str("----------"),
            Block::BlankLine => {}
        }
        output.push('\n');
    }

    output.trim().to_string()
}
