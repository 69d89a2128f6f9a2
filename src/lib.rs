//! # mdocx
//!
//! Markdown to Word (`.docx`) conversion for resume-style documents.
//!
//! This library parses a small, line-oriented Markdown dialect (headings,
//! paragraphs, bullets, pipe tables, horizontal rules and `**bold**`,
//! `*italic*`, `[link](url)` inline formatting) and writes it as an Office
//! Open XML word-processing package with a fixed typographic theme.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdocx::{convert_file, ConvertOptions};
//!
//! fn main() -> mdocx::Result<()> {
//!     let written = convert_file("resume.md", "resume.docx", &ConvertOptions::default())?;
//!     println!("Saved formatted resume to {}", written.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block structure**: headings, paragraphs, bullets, tables, rules
//! - **Inline formatting**: nested bold and italic, clickable hyperlinks
//! - **Themes**: fonts, colors and page setup loadable from JSON
//! - **Resume layout**: centered header block, page header line, job
//!   entries kept together across page breaks
//! - **Safe output**: packages are written atomically

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{convert_file, convert_file_with_result, convert_str, ConvertOptions, ConvertResult};
pub use error::{Error, Result};
pub use model::{Block, BlockKind, Document, InlineSpan, Metadata, Table};
pub use parser::{MarkdownParser, ParseOptions, RaggedRowPolicy};
pub use render::{ConversionStats, JsonFormat, RenderOptions, RenderedDocument, StyleTheme};

use std::path::Path;

/// Parse Markdown text into a document.
///
/// # Example
///
/// ```
/// use mdocx::{parse_str, BlockKind};
///
/// let doc = parse_str("# Jane Doe\n---\n- Rust").unwrap();
/// assert_eq!(doc.kinds(), vec![BlockKind::Heading, BlockKind::Rule, BlockKind::ListItem]);
/// ```
pub fn parse_str(markdown: &str) -> Result<Document> {
    MarkdownParser::from_text(markdown).parse()
}

/// Parse Markdown text with custom options.
pub fn parse_str_with_options(markdown: &str, options: ParseOptions) -> Result<Document> {
    MarkdownParser::from_text_with_options(markdown, options).parse()
}

/// Parse a Markdown file into a document.
///
/// # Example
///
/// ```no_run
/// use mdocx::parse_file;
///
/// let doc = parse_file("resume.md").unwrap();
/// println!("Blocks: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    MarkdownParser::open(path)?.parse()
}

/// Parse a Markdown file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    MarkdownParser::open_with_options(path, options)?.parse()
}

/// Render a document to `.docx` package bytes with the default theme.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>> {
    let theme = StyleTheme::default();
    let rendered = render::render(doc, &theme, &RenderOptions::default())?;
    render::to_bytes(&rendered, &theme)
}

/// Render a document and write it to `path`.
///
/// The file is replaced atomically. Unlike [`convert_file`], `path` is used
/// exactly as given.
pub fn write_docx<P: AsRef<Path>>(doc: &Document, path: P, theme: &StyleTheme, options: &RenderOptions) -> Result<u64> {
    let rendered = render::render(doc, theme, options)?;
    convert::write_docx(&rendered, theme, path.as_ref())
}

/// Extract plain text from a Markdown file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_text(&doc))
}

/// Convert a Markdown file to its JSON document tree.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for configuring a conversion.
///
/// # Example
///
/// ```no_run
/// use mdocx::Mdocx;
///
/// let result = Mdocx::new()
///     .with_page_header("Jane Doe | jane@example.com")
///     .strict()
///     .parse("resume.md")
///     .unwrap();
/// result.save("resume.docx").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mdocx {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    theme: StyleTheme,
}

impl Mdocx {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject tables whose rows do not match the header width.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Keep single newlines inside paragraphs as line breaks.
    pub fn with_hard_line_breaks(mut self) -> Self {
        self.parse_options = self.parse_options.with_hard_line_breaks(true);
        self
    }

    /// Set the page header line.
    pub fn with_page_header(mut self, header: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_page_header(header);
        self
    }

    /// Enable inline formatting inside table cells.
    pub fn with_table_formatting(mut self) -> Self {
        self.render_options = self.render_options.with_table_inline_formatting(true);
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_author(author);
        self
    }

    /// Use a custom theme.
    pub fn with_theme(mut self, theme: StyleTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Parse a Markdown file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<MdocxResult> {
        let document = MarkdownParser::open_with_options(path, self.parse_options)?.parse()?;
        Ok(MdocxResult {
            document,
            render_options: self.render_options,
            theme: self.theme,
        })
    }

    /// Parse Markdown text.
    pub fn parse_str(self, markdown: &str) -> Result<MdocxResult> {
        let document = MarkdownParser::from_text_with_options(markdown, self.parse_options).parse()?;
        Ok(MdocxResult {
            document,
            render_options: self.render_options,
            theme: self.theme,
        })
    }
}

/// A parsed document with the settings to render it.
pub struct MdocxResult {
    /// The parsed document
    pub document: Document,
    render_options: RenderOptions,
    theme: StyleTheme,
}

impl MdocxResult {
    /// Build the in-memory rendered document.
    pub fn render(&self) -> Result<RenderedDocument> {
        render::render(&self.document, &self.theme, &self.render_options)
    }

    /// Render to `.docx` package bytes.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>> {
        render::to_bytes(&self.render()?, &self.theme)
    }

    /// Render and write to `path`, replacing it atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        convert::write_docx(&self.render()?, &self.theme, path.as_ref())
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Content statistics.
    pub fn stats(&self) -> ConversionStats {
        ConversionStats::from_document(&self.document)
    }

    /// Get the document reference.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
