//! Inline span types.

use serde::{Deserialize, Serialize};

/// A formatted run of text within a block.
///
/// Spans nest: a link may contain bold text, bold may contain italic, and so
/// on. Adjacent [`InlineSpan::Text`] values are merged by the tokenizer so a
/// line without markup always yields a single text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineSpan {
    /// Unformatted text
    Text(String),

    /// Strong emphasis (`**text**`)
    Bold(Vec<InlineSpan>),

    /// Emphasis (`*text*`)
    Italic(Vec<InlineSpan>),

    /// A hyperlink (`[text](url)`)
    Link {
        /// Display content
        content: Vec<InlineSpan>,
        /// Target URL
        url: String,
    },

    /// A hard line break inside a paragraph
    LineBreak,
}

impl InlineSpan {
    /// Create a plain text span.
    pub fn text(text: impl Into<String>) -> Self {
        InlineSpan::Text(text.into())
    }

    /// Create a bold span around plain text.
    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold(vec![InlineSpan::text(text)])
    }

    /// Create an italic span around plain text.
    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan::Italic(vec![InlineSpan::text(text)])
    }

    /// Create a link whose display content is plain text.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineSpan::Link {
            content: vec![InlineSpan::text(text)],
            url: url.into(),
        }
    }

    /// Visible text of this span with all markup removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            InlineSpan::Text(text) => out.push_str(text),
            InlineSpan::Bold(children) | InlineSpan::Italic(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            InlineSpan::Link { content, .. } => {
                for child in content {
                    child.collect_text(out);
                }
            }
            InlineSpan::LineBreak => out.push('\n'),
        }
    }

    /// Count links in this span, including nested ones.
    pub fn link_count(&self) -> usize {
        match self {
            InlineSpan::Text(_) | InlineSpan::LineBreak => 0,
            InlineSpan::Bold(children) | InlineSpan::Italic(children) => {
                children.iter().map(InlineSpan::link_count).sum()
            }
            InlineSpan::Link { content, .. } => {
                1 + content.iter().map(InlineSpan::link_count).sum::<usize>()
            }
        }
    }
}

/// Concatenate the visible text of a span sequence.
pub fn spans_plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markup() {
        let spans = vec![
            InlineSpan::text("Hello "),
            InlineSpan::Bold(vec![InlineSpan::text("big "), InlineSpan::italic("world")]),
            InlineSpan::text("!"),
        ];
        assert_eq!(spans_plain_text(&spans), "Hello big world!");
    }

    #[test]
    fn test_nested_link_count() {
        let span = InlineSpan::Bold(vec![
            InlineSpan::link("One", "https://example.com/1"),
            InlineSpan::italic("plain"),
            InlineSpan::Italic(vec![InlineSpan::link("Two", "https://example.com/2")]),
        ]);
        assert_eq!(span.link_count(), 2);
        assert_eq!(InlineSpan::text("flat").link_count(), 0);
    }
}
