//! File-to-file conversion.
//!
//! Ties the parser, renderer and package writer together and decides where
//! the output lands. Output is written to a temporary file in the destination
//! directory and moved into place once complete, so a failed conversion never
//! leaves a truncated document behind.
//!
//! # Example
//!
//! ```no_run
//! use mdocx::convert::{convert_file, ConvertOptions};
//!
//! fn main() -> mdocx::Result<()> {
//!     let options = ConvertOptions::new().with_output_dir("out");
//!     let written = convert_file("resume.md", "resume.docx", &options)?;
//!     println!("{}", written.display());
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::parser::{MarkdownParser, ParseOptions};
use crate::render::{self, ConversionStats, RenderOptions, RenderedDocument, StyleTheme};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Folder used when the output name has no directory component.
pub const DEFAULT_EXPORT_DIR: &str = "exported_resumes";

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Typographic theme
    pub theme: StyleTheme,

    /// Directory that receives the output file, overriding its own directory
    pub output_dir: Option<PathBuf>,

    /// Directory for bare output file names
    pub default_dir: PathBuf,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: StyleTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Write output into this directory, creating it if missing.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the directory for bare output file names.
    pub fn with_default_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_dir = dir.into();
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
            theme: StyleTheme::default(),
            output_dir: None,
            default_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

/// Result of converting a document, including where it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    /// Path of the written package
    pub output: PathBuf,

    /// Package size in bytes
    pub bytes_written: u64,

    /// Source document metadata
    pub metadata: Metadata,

    /// Content statistics
    pub stats: ConversionStats,
}

/// Convert a Markdown file into a `.docx` package.
///
/// Returns the absolute path of the written file.
pub fn convert_file<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    convert_file_with_result(input, output, options).map(|result| result.output)
}

/// Convert a Markdown file and report statistics about the result.
pub fn convert_file_with_result<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<ConvertResult>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let doc = MarkdownParser::open_with_options(input, options.parse.clone())?.parse()?;
    convert_document(&doc, output, options)
}

/// Convert in-memory Markdown into a `.docx` package.
pub fn convert_str<Q: AsRef<Path>>(markdown: &str, output: Q, options: &ConvertOptions) -> Result<ConvertResult> {
    let doc = MarkdownParser::from_text_with_options(markdown, options.parse.clone()).parse()?;
    convert_document(&doc, output, options)
}

/// Render a parsed document and write it to the resolved output path.
pub fn convert_document<Q: AsRef<Path>>(doc: &Document, output: Q, options: &ConvertOptions) -> Result<ConvertResult> {
    let path = resolve_output_path(output.as_ref(), options)?;
    let rendered = render::render(doc, &options.theme, &options.render)?;
    let bytes_written = write_docx(&rendered, &options.theme, &path)?;
    log::info!("saved {} ({} bytes)", path.display(), bytes_written);

    Ok(ConvertResult {
        output: path,
        bytes_written,
        metadata: rendered.metadata,
        stats: ConversionStats::from_document(doc),
    })
}

/// Write a rendered document to `path` atomically.
///
/// The package is written to a temporary file next to `path` and renamed
/// over it on success. Returns the size of the written file.
pub fn write_docx(rendered: &RenderedDocument, theme: &StyleTheme, path: &Path) -> Result<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => env::current_dir()?,
    };
    if !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("output directory does not exist: {}", dir.display()),
        )));
    }

    let tmp = NamedTempFile::new_in(&dir)?;
    let tmp = render::write_package(rendered, theme, tmp)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    Ok(fs::metadata(path)?.len())
}

/// Decide where an output file is written.
///
/// - With an output directory set, the directory is made absolute, created
///   if missing, and joined with the output's file name.
/// - A bare file name goes into the default directory, created if missing.
/// - Any other path is made absolute.
pub fn resolve_output_path(output: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let file_name = output
        .file_name()
        .ok_or_else(|| Error::Other(format!("output path has no file name: {}", output.display())))?;

    if let Some(dir) = &options.output_dir {
        let dir = absolute(dir)?;
        fs::create_dir_all(&dir)?;
        return Ok(dir.join(file_name));
    }

    let has_dir = output.parent().is_some_and(|p| !p.as_os_str().is_empty());
    if !has_dir {
        let dir = absolute(&options.default_dir)?;
        fs::create_dir_all(&dir)?;
        log::debug!("no output directory given, using {}", dir.display());
        return Ok(dir.join(file_name));
    }

    absolute(output)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
