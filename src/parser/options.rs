//! Parsing options and configuration.

/// Options for parsing Markdown documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How to handle table rows whose cell count differs from the header
    pub ragged_rows: RaggedRowPolicy,

    /// Emit one `BlankLine` block per run of blank lines between blocks
    pub blank_lines: bool,

    /// Keep source line breaks inside paragraphs instead of joining with spaces
    pub hard_line_breaks: bool,

    /// Remove a code fence wrapping the whole document
    pub strip_code_fence: bool,

    /// Normalize Unicode to NFC form before parsing
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ragged row policy.
    pub fn with_ragged_rows(mut self, policy: RaggedRowPolicy) -> Self {
        self.ragged_rows = policy;
        self
    }

    /// Reject ragged table rows instead of padding or truncating them.
    pub fn strict(mut self) -> Self {
        self.ragged_rows = RaggedRowPolicy::Reject;
        self
    }

    /// Enable or disable blank line blocks.
    pub fn with_blank_lines(mut self, emit: bool) -> Self {
        self.blank_lines = emit;
        self
    }

    /// Enable or disable hard line breaks.
    pub fn with_hard_line_breaks(mut self, hard: bool) -> Self {
        self.hard_line_breaks = hard;
        self
    }

    /// Enable or disable code fence stripping.
    pub fn with_code_fence_stripping(mut self, strip: bool) -> Self {
        self.strip_code_fence = strip;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ragged_rows: RaggedRowPolicy::PadOrTruncate,
            blank_lines: true,
            hard_line_breaks: false,
            strip_code_fence: true,
            normalize_unicode: true,
        }
    }
}

/// Policy for table rows whose width differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaggedRowPolicy {
    /// Pad short rows with empty cells and drop extra cells (logged)
    #[default]
    PadOrTruncate,
    /// Fail the parse with `Error::Parse`
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.ragged_rows, RaggedRowPolicy::PadOrTruncate);
        assert!(options.blank_lines);
        assert!(!options.hard_line_breaks);
        assert!(options.strip_code_fence);
        assert!(options.normalize_unicode);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .strict()
            .with_blank_lines(false)
            .with_hard_line_breaks(true);

        assert_eq!(options.ragged_rows, RaggedRowPolicy::Reject);
        assert!(!options.blank_lines);
        assert!(options.hard_line_breaks);
    }
}
