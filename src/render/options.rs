//! Rendering options and configuration.

/// Section heading whose entries are kept together across page breaks.
pub const EMPLOYMENT_HISTORY: &str = "EMPLOYMENT HISTORY";

/// Options for rendering a document into a word-processing package.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Center the blocks that precede the first horizontal rule
    pub center_header_block: bool,

    /// Markdown line shown centered in the page header
    pub page_header: Option<String>,

    /// Level-2 section titles whose entries get keep-with-next
    pub keep_together_sections: Vec<String>,

    /// Apply inline formatting inside table cells
    pub table_inline_formatting: bool,

    /// Document author written to the package properties
    pub author: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable centering of the header block.
    pub fn with_centered_header_block(mut self, center: bool) -> Self {
        self.center_header_block = center;
        self
    }

    /// Set the page header line.
    pub fn with_page_header(mut self, header: impl Into<String>) -> Self {
        let header = header.into();
        self.page_header = if header.trim().is_empty() {
            None
        } else {
            Some(header.trim().to_string())
        };
        self
    }

    /// Replace the list of keep-together section titles.
    pub fn with_keep_together_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_together_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable inline formatting in table cells.
    pub fn with_table_inline_formatting(mut self, enabled: bool) -> Self {
        self.table_inline_formatting = enabled;
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Whether a section title starts a keep-together section.
    pub fn keeps_together(&self, title: &str) -> bool {
        let title = title.trim();
        self.keep_together_sections
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(title))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            center_header_block: true,
            page_header: None,
            keep_together_sections: vec![EMPLOYMENT_HISTORY.to_string()],
            table_inline_formatting: false,
            author: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.center_header_block);
        assert!(options.page_header.is_none());
        assert!(!options.table_inline_formatting);
        assert!(options.keeps_together("EMPLOYMENT HISTORY"));
        assert!(options.keeps_together("Employment History "));
        assert!(!options.keeps_together("EDUCATION"));
    }

    #[test]
    fn test_blank_page_header_is_ignored() {
        let options = RenderOptions::new().with_page_header("   ");
        assert!(options.page_header.is_none());

        let options = RenderOptions::new().with_page_header(" Jane Doe | Resume \n");
        assert_eq!(options.page_header.as_deref(), Some("Jane Doe | Resume"));
    }

    #[test]
    fn test_custom_sections() {
        let options = RenderOptions::new().with_keep_together_sections(["EXPERIENCE", "PROJECTS"]);
        assert!(options.keeps_together("Projects"));
        assert!(!options.keeps_together("EMPLOYMENT HISTORY"));
    }
}
