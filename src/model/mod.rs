//! Document model types for Markdown content representation.
//!
//! This module defines the intermediate representation that bridges
//! Markdown parsing and document rendering: an ordered sequence of
//! [`Block`] values whose text is made of nested [`InlineSpan`] runs.

mod block;
mod document;
mod inline;
mod table;

pub use block::{Block, BlockKind, MAX_HEADING_LEVEL};
pub use document::{Document, Metadata};
pub use inline::{spans_plain_text, InlineSpan};
pub use table::Table;
