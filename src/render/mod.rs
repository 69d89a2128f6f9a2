//! Rendering module for converting documents to output formats.

pub mod docx;
mod json;
mod options;
mod result;
mod text;
pub mod theme;

pub use docx::{
    render, to_bytes, write_package, Alignment, DocxRenderer, Element, ParagraphStyle, RenderedDocument, Run,
    RunItem, StyledCell, StyledParagraph, StyledRow, StyledTable,
};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, EMPLOYMENT_HISTORY};
pub use result::ConversionStats;
pub use text::to_text;
pub use theme::{BodyStyle, DividerStyle, HeadingStyle, LinkStyle, PageSetup, StyleTheme, TableStyle};
