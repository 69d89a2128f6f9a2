//! Word-processing document rendering.
//!
//! Rendering happens in two stages. [`DocxRenderer`] maps parsed blocks onto
//! a [`RenderedDocument`] of styled paragraphs, tables, dividers and spacers,
//! one element per block and in source order. The [`package`] module then
//! serializes that structure as an Office Open XML package.

pub mod package;
mod xml;

pub use package::{to_bytes, write_package};

use super::theme::{PageSetup, StyleTheme};
use super::RenderOptions;
use crate::error::Result;
use crate::model::{spans_plain_text, Block, BlockKind, Document, InlineSpan, Metadata, Table};
use crate::parser::tokenize;

/// In-memory form of the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Page size and margins
    pub page: PageSetup,

    /// Centered paragraph repeated at the top of every page
    pub header: Option<StyledParagraph>,

    /// Body elements, one per source block
    pub elements: Vec<Element>,

    /// Package properties
    pub metadata: Metadata,
}

impl RenderedDocument {
    /// Number of body elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Block kind each element was produced from.
    pub fn source_kinds(&self) -> Vec<BlockKind> {
        self.elements.iter().map(Element::source_kind).collect()
    }

    /// Distinct hyperlink targets in order of first appearance.
    pub fn hyperlinks(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        let paragraphs = self.elements.iter().flat_map(|e| match e {
            Element::Paragraph(p) => vec![p],
            Element::Table(t) => t.rows.iter().flat_map(|r| r.cells.iter().map(|c| &c.paragraph)).collect(),
            _ => Vec::new(),
        });
        for paragraph in paragraphs {
            for item in &paragraph.items {
                if let RunItem::Hyperlink { url, .. } = item {
                    if !urls.contains(&url.as_str()) {
                        urls.push(url.as_str());
                    }
                }
            }
        }
        urls
    }
}

/// A body element of the rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A styled paragraph (heading, body text or bullet)
    Paragraph(StyledParagraph),

    /// A shaded grid table
    Table(StyledTable),

    /// An empty paragraph with a bottom border
    Divider,

    /// An empty Normal paragraph standing for a blank-line run.
    ///
    /// The parser collapses each run of blank lines between blocks into a
    /// single `BlankLine`, so consecutive blank lines give one spacer, never
    /// several. Leading and trailing blank lines give none. Parsing with
    /// `ParseOptions::with_blank_lines(false)` drops spacers altogether.
    Spacer,
}

impl Element {
    /// Block kind this element was produced from.
    pub fn source_kind(&self) -> BlockKind {
        match self {
            Element::Paragraph(p) => match p.style {
                ParagraphStyle::Heading(_) => BlockKind::Heading,
                ParagraphStyle::ListBullet => BlockKind::ListItem,
                ParagraphStyle::Normal => BlockKind::Paragraph,
            },
            Element::Table(_) => BlockKind::Table,
            Element::Divider => BlockKind::Rule,
            Element::Spacer => BlockKind::BlankLine,
        }
    }

    /// The paragraph, if this element is one.
    pub fn as_paragraph(&self) -> Option<&StyledParagraph> {
        match self {
            Element::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// The table, if this element is one.
    pub fn as_table(&self) -> Option<&StyledTable> {
        match self {
            Element::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Named paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphStyle {
    /// Body text
    Normal,
    /// Heading at a theme-defined level
    Heading(u8),
    /// Bulleted list paragraph
    ListBullet,
}

impl ParagraphStyle {
    /// Style identifier used in the package.
    pub fn style_id(&self) -> String {
        match self {
            ParagraphStyle::Normal => "Normal".to_string(),
            ParagraphStyle::Heading(level) => format!("Heading{}", level),
            ParagraphStyle::ListBullet => "ListBullet".to_string(),
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
}

/// A paragraph with its style and content runs.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledParagraph {
    /// Paragraph style
    pub style: ParagraphStyle,

    /// Alignment
    pub alignment: Alignment,

    /// Keep on the same page as the next paragraph
    pub keep_with_next: bool,

    /// Content runs in order
    pub items: Vec<RunItem>,
}

impl StyledParagraph {
    /// Create an empty paragraph with a style.
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            alignment: Alignment::Left,
            keep_with_next: false,
            items: Vec::new(),
        }
    }

    /// Visible text of the paragraph.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                RunItem::Run(run) => out.push_str(&run.text),
                RunItem::Hyperlink { runs, .. } => {
                    runs.iter().for_each(|r| out.push_str(&r.text));
                }
                RunItem::Break => out.push('\n'),
            }
        }
        out
    }

    /// All text runs, including those inside hyperlinks.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.items.iter().flat_map(RunItem::runs)
    }
}

/// Content of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum RunItem {
    /// A formatted text run
    Run(Run),

    /// A clickable link wrapping its runs
    Hyperlink {
        /// Link target
        url: String,
        /// Runs shown for the link
        runs: Vec<Run>,
    },

    /// A line break inside the paragraph
    Break,
}

impl RunItem {
    /// Text runs held by this item.
    pub fn runs(&self) -> &[Run] {
        match self {
            RunItem::Run(run) => std::slice::from_ref(run),
            RunItem::Hyperlink { runs, .. } => runs,
            RunItem::Break => &[],
        }
    }
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    /// Literal text
    pub text: String,

    /// Bold
    pub bold: bool,

    /// Italic
    pub italic: bool,

    /// Underlined
    pub underline: bool,

    /// Explicit color (hex)
    pub color: Option<String>,

    /// Uses the hyperlink character style
    pub hyperlink: bool,
}

impl Run {
    /// Create a plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledTable {
    /// Number of grid columns
    pub columns: usize,

    /// Width of each column in twips
    pub column_width: u32,

    /// Header row followed by body rows
    pub rows: Vec<StyledRow>,
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRow {
    /// Repeats as a header row
    pub header: bool,

    /// Cells in column order
    pub cells: Vec<StyledCell>,
}

/// A shaded table cell holding one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    /// Background fill (hex)
    pub fill: String,

    /// Cell content
    pub paragraph: StyledParagraph,
}

/// Inherited character formatting while walking nested spans.
#[derive(Debug, Clone, Default)]
struct RunFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    color: Option<String>,
    hyperlink: bool,
}

impl RunFormat {
    fn run(&self, text: &str) -> Run {
        Run {
            text: text.to_string(),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            color: self.color.clone(),
            hyperlink: self.hyperlink,
        }
    }
}

/// Builds a [`RenderedDocument`] from a parsed document.
pub struct DocxRenderer<'a> {
    theme: &'a StyleTheme,
    options: &'a RenderOptions,
}

impl<'a> DocxRenderer<'a> {
    /// Create a renderer for a theme and options.
    pub fn new(theme: &'a StyleTheme, options: &'a RenderOptions) -> Self {
        Self { theme, options }
    }

    /// Render a document.
    pub fn render(&self, doc: &Document) -> Result<RenderedDocument> {
        self.theme.validate()?;

        let mut state = SectionState::new(
            self.options.center_header_block && doc.blocks.iter().any(|b| matches!(b, Block::Rule)),
        );
        let mut elements = Vec::with_capacity(doc.blocks.len());

        for block in &doc.blocks {
            let element = match block {
                Block::Heading { level, content } => {
                    state.finish_group(&mut elements);
                    state.enter_heading(*level, &spans_plain_text(content), self.options);
                    let style = ParagraphStyle::Heading(self.theme.heading_level(*level));
                    self.paragraph(style, content, state.alignment())
                }
                Block::Paragraph(content) => self.paragraph(ParagraphStyle::Normal, content, state.alignment()),
                Block::ListItem(content) => {
                    self.paragraph(ParagraphStyle::ListBullet, content, state.alignment())
                }
                Block::Table(table) => {
                    state.finish_group(&mut elements);
                    Element::Table(self.table(table))
                }
                Block::Rule => {
                    state.finish_group(&mut elements);
                    state.leave_header_block();
                    Element::Divider
                }
                Block::BlankLine => Element::Spacer,
            };

            let opens_section = matches!(block, Block::Heading { level, .. } if *level <= 2);
            if state.in_keep_section && !opens_section && matches!(element, Element::Paragraph(_)) {
                state.group.push(elements.len());
            }
            elements.push(element);
        }
        state.finish_group(&mut elements);

        let header = self.options.page_header.as_deref().map(|text| self.page_header(text));

        let mut metadata = doc.metadata.clone();
        if let Some(author) = &self.options.author {
            metadata = metadata.with_author(author.clone());
        }

        log::debug!("rendered {} elements", elements.len());
        Ok(RenderedDocument {
            page: self.theme.page.clone(),
            header,
            elements,
            metadata,
        })
    }

    /// Centred header paragraph. Each source line is kept as its own line.
    fn page_header(&self, text: &str) -> StyledParagraph {
        let mut paragraph = StyledParagraph::new(ParagraphStyle::Normal);
        paragraph.alignment = Alignment::Center;
        for (n, line) in text.lines().enumerate() {
            if n > 0 {
                paragraph.items.push(RunItem::Break);
            }
            self.push_spans(&tokenize(line.trim()), &RunFormat::default(), &mut paragraph.items);
        }
        paragraph
    }

    fn paragraph(&self, style: ParagraphStyle, content: &[InlineSpan], alignment: Alignment) -> Element {
        let mut paragraph = StyledParagraph::new(style);
        paragraph.alignment = alignment;
        self.push_spans(content, &RunFormat::default(), &mut paragraph.items);
        Element::Paragraph(paragraph)
    }

    fn table(&self, table: &Table) -> StyledTable {
        let style = &self.theme.table;
        let columns = table.column_count().max(1);
        let column_width = self.theme.page.content_width_twips() / columns as u32;

        let header_format = RunFormat {
            bold: style.header_bold,
            color: Some(style.header_color.clone()),
            ..RunFormat::default()
        };
        let body_format = RunFormat {
            color: Some(style.body_color.clone()),
            ..RunFormat::default()
        };

        let mut rows = Vec::with_capacity(table.grid_row_count());
        rows.push(StyledRow {
            header: true,
            cells: table
                .header
                .iter()
                .map(|text| self.cell(text, &style.header_fill, &header_format))
                .collect(),
        });
        for row in &table.rows {
            rows.push(StyledRow {
                header: false,
                cells: row
                    .iter()
                    .map(|text| self.cell(text, &style.body_fill, &body_format))
                    .collect(),
            });
        }

        StyledTable {
            columns,
            column_width,
            rows,
        }
    }

    fn cell(&self, text: &str, fill: &str, format: &RunFormat) -> StyledCell {
        let mut paragraph = StyledParagraph::new(ParagraphStyle::Normal);
        if self.options.table_inline_formatting {
            self.push_spans(&tokenize(text), format, &mut paragraph.items);
        } else if !text.is_empty() {
            paragraph.items.push(RunItem::Run(format.run(text)));
        }
        StyledCell {
            fill: fill.to_string(),
            paragraph,
        }
    }

    fn push_spans(&self, spans: &[InlineSpan], format: &RunFormat, items: &mut Vec<RunItem>) {
        for span in spans {
            match span {
                InlineSpan::Text(text) => items.push(RunItem::Run(format.run(text))),
                InlineSpan::Bold(content) => {
                    let nested = RunFormat {
                        bold: true,
                        ..format.clone()
                    };
                    self.push_spans(content, &nested, items);
                }
                InlineSpan::Italic(content) => {
                    let nested = RunFormat {
                        italic: true,
                        ..format.clone()
                    };
                    self.push_spans(content, &nested, items);
                }
                InlineSpan::LineBreak => items.push(RunItem::Break),
                InlineSpan::Link { content, url } => {
                    let link_format = RunFormat {
                        underline: self.theme.link.underline,
                        color: Some(self.theme.link.color.clone()),
                        hyperlink: true,
                        ..format.clone()
                    };
                    let mut runs = Vec::new();
                    flatten_runs(content, &link_format, &mut runs);
                    items.push(RunItem::Hyperlink {
                        url: url.clone(),
                        runs,
                    });
                }
            }
        }
    }
}

/// Runs of a link body; links cannot nest, so inner links become plain runs.
fn flatten_runs(spans: &[InlineSpan], format: &RunFormat, runs: &mut Vec<Run>) {
    for span in spans {
        match span {
            InlineSpan::Text(text) => runs.push(format.run(text)),
            InlineSpan::Bold(content) => {
                let nested = RunFormat {
                    bold: true,
                    ..format.clone()
                };
                flatten_runs(content, &nested, runs);
            }
            InlineSpan::Italic(content) => {
                let nested = RunFormat {
                    italic: true,
                    ..format.clone()
                };
                flatten_runs(content, &nested, runs);
            }
            InlineSpan::Link { content, .. } => flatten_runs(content, format, runs),
            InlineSpan::LineBreak => runs.push(format.run(" ")),
        }
    }
}

/// Tracks the header block and keep-together sections while rendering.
struct SectionState {
    in_header_block: bool,
    in_keep_section: bool,
    /// Element indices of the current entry in a keep-together section
    group: Vec<usize>,
}

impl SectionState {
    fn new(center_header_block: bool) -> Self {
        Self {
            in_header_block: center_header_block,
            in_keep_section: false,
            group: Vec::new(),
        }
    }

    fn alignment(&self) -> Alignment {
        if self.in_header_block {
            Alignment::Center
        } else {
            Alignment::Left
        }
    }

    fn leave_header_block(&mut self) {
        self.in_header_block = false;
    }

    /// Level-2 headings open or close a section; deeper headings inside a
    /// section start a new entry and stay with its content.
    fn enter_heading(&mut self, level: u8, title: &str, options: &RenderOptions) {
        if level <= 2 {
            self.in_keep_section = level == 2 && options.keeps_together(title);
            if self.in_keep_section {
                log::debug!("keeping entries together under '{}'", title.trim());
            }
        }
    }

    /// Set keep-with-next on every paragraph of the entry but the last.
    fn finish_group(&mut self, elements: &mut [Element]) {
        let group = std::mem::take(&mut self.group);
        if let Some((_, rest)) = group.split_last() {
            for &index in rest {
                if let Some(Element::Paragraph(p)) = elements.get_mut(index) {
                    p.keep_with_next = true;
                }
            }
        }
    }
}

/// Render a parsed document into its in-memory package form.
pub fn render(doc: &Document, theme: &StyleTheme, options: &RenderOptions) -> Result<RenderedDocument> {
    DocxRenderer::new(theme, options).render(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn render_md(md: &str, options: &RenderOptions) -> RenderedDocument {
        let doc = MarkdownParser::from_text(md).parse().unwrap();
        render(&doc, &StyleTheme::default(), options).unwrap()
    }

    fn paragraph(rendered: &RenderedDocument, index: usize) -> &StyledParagraph {
        rendered.elements[index].as_paragraph().unwrap()
    }

    #[test]
    fn test_one_element_per_block() {
        let md = "# Jane Doe\n---\n## Skills\n\n- Rust\n\n| A | B |\n|---|---|\n| 1 | 2 |";
        let doc = MarkdownParser::from_text(md).parse().unwrap();
        let rendered = render(&doc, &StyleTheme::default(), &RenderOptions::default()).unwrap();
        assert_eq!(rendered.source_kinds(), doc.kinds());
    }

    #[test]
    fn test_heading_styles() {
        let rendered = render_md("# Name\n## Section\n###### Tiny", &RenderOptions::default());
        assert_eq!(paragraph(&rendered, 0).style.style_id(), "Heading1");
        assert_eq!(paragraph(&rendered, 1).style.style_id(), "Heading2");
        assert_eq!(paragraph(&rendered, 2).style.style_id(), "Heading6");
    }

    #[test]
    fn test_heading_level_clamped_to_theme() {
        let mut theme = StyleTheme::default();
        theme.headings.truncate(2);
        let doc = MarkdownParser::from_text("#### Deep").parse().unwrap();
        let rendered = render(&doc, &theme, &RenderOptions::default()).unwrap();
        assert_eq!(paragraph(&rendered, 0).style, ParagraphStyle::Heading(2));
    }

    #[test]
    fn test_runs_carry_nested_formatting() {
        let rendered = render_md("*a **b** c*", &RenderOptions::default());
        let runs: Vec<&Run> = paragraph(&rendered, 0).runs().collect();
        assert_eq!(runs.len(), 3);
        assert!(runs.iter().all(|r| r.italic));
        assert!(!runs[0].bold && runs[1].bold && !runs[2].bold);
    }

    #[test]
    fn test_hyperlink_runs() {
        let rendered = render_md("See [Profile](http://example.com/x) now", &RenderOptions::default());
        let p = paragraph(&rendered, 0);
        match &p.items[1] {
            RunItem::Hyperlink { url, runs } => {
                assert_eq!(url, "http://example.com/x");
                assert_eq!(runs[0].text, "Profile");
                assert!(runs[0].underline);
                assert!(runs[0].hyperlink);
                assert_eq!(runs[0].color.as_deref(), Some("0563C1"));
            }
            other => panic!("expected hyperlink, got {:?}", other),
        }
        assert_eq!(rendered.hyperlinks(), vec!["http://example.com/x"]);
    }

    #[test]
    fn test_header_block_centered_until_first_rule() {
        let rendered = render_md("# Jane\njane@x.com\n---\nBody", &RenderOptions::default());
        assert_eq!(paragraph(&rendered, 0).alignment, Alignment::Center);
        assert_eq!(paragraph(&rendered, 1).alignment, Alignment::Center);
        assert_eq!(rendered.elements[2], Element::Divider);
        assert_eq!(paragraph(&rendered, 3).alignment, Alignment::Left);
    }

    #[test]
    fn test_no_centering_without_rule() {
        let rendered = render_md("# Jane\nBody", &RenderOptions::default());
        assert_eq!(paragraph(&rendered, 0).alignment, Alignment::Left);
    }

    #[test]
    fn test_centering_disabled() {
        let options = RenderOptions::new().with_centered_header_block(false);
        let rendered = render_md("# Jane\n---\nBody", &options);
        assert_eq!(paragraph(&rendered, 0).alignment, Alignment::Left);
    }

    #[test]
    fn test_employment_entries_keep_together() {
        let md = "## EMPLOYMENT HISTORY\n**Acme** - Engineer\n- Built things\n- Shipped things\n---\n**Initech** - Intern\n- Filed reports\n## EDUCATION\nState U\nBS CS";
        let rendered = render_md(md, &RenderOptions::default());
        let keeps: Vec<bool> = rendered
            .elements
            .iter()
            .map(|e| e.as_paragraph().is_some_and(|p| p.keep_with_next))
            .collect();
        assert_eq!(
            keeps,
            vec![
                false, // heading
                true, true, false, // first entry
                false, // divider
                true, false, // second entry
                false, false, // education
            ]
        );
    }

    #[test]
    fn test_subheading_stays_with_entry() {
        let md = "## Employment History\n### Acme\nEngineer\n### Initech\nIntern";
        let rendered = render_md(md, &RenderOptions::default());
        assert!(paragraph(&rendered, 1).keep_with_next);
        assert!(!paragraph(&rendered, 2).keep_with_next);
        assert!(paragraph(&rendered, 3).keep_with_next);
        assert!(!paragraph(&rendered, 4).keep_with_next);
    }

    #[test]
    fn test_table_shading_and_literal_cells() {
        let rendered = render_md("| Skill | Level |\n|---|---|\n| **Rust** | 5 |", &RenderOptions::default());
        let table = rendered.elements[0].as_table().unwrap();
        assert_eq!(table.columns, 2);
        assert_eq!(table.column_width, 5400);
        assert!(table.rows[0].header);
        assert_eq!(table.rows[0].cells[0].fill, "C6EFCE");
        let header_run = table.rows[0].cells[0].paragraph.runs().next().unwrap();
        assert!(header_run.bold);
        assert_eq!(header_run.color.as_deref(), Some("006100"));
        assert_eq!(table.rows[1].cells[0].fill, "FFFACD");
        assert_eq!(table.rows[1].cells[0].paragraph.text(), "**Rust**");
    }

    #[test]
    fn test_table_inline_formatting_option() {
        let options = RenderOptions::new().with_table_inline_formatting(true);
        let rendered = render_md("| Skill |\n|---|\n| **Rust** |", &options);
        let table = rendered.elements[0].as_table().unwrap();
        let run = table.rows[1].cells[0].paragraph.runs().next().unwrap();
        assert_eq!(run.text, "Rust");
        assert!(run.bold);
        assert_eq!(run.color.as_deref(), Some("000000"));
    }

    #[test]
    fn test_page_header() {
        let options = RenderOptions::new().with_page_header("**Jane Doe** | Resume");
        let rendered = render_md("Body", &options);
        let header = rendered.header.unwrap();
        assert_eq!(header.alignment, Alignment::Center);
        assert_eq!(header.text(), "Jane Doe | Resume");
    }

    #[test]
    fn test_multiline_page_header_keeps_lines() {
        let options = RenderOptions::new().with_page_header("Jane Doe\njane@example.com | Seattle");
        let header = render_md("Body", &options).header.unwrap();
        assert_eq!(header.items.len(), 3);
        assert_eq!(header.items[1], RunItem::Break);
        assert_eq!(header.text(), "Jane Doe\njane@example.com | Seattle");
    }

    #[test]
    fn test_author_override() {
        let options = RenderOptions::new().with_author("Jane Doe");
        let rendered = render_md("# Resume", &options);
        assert_eq!(rendered.metadata.author.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_blank_line_run_is_one_spacer() {
        let rendered = render_md("\n\nOne\n\n\n\nTwo\n\n", &RenderOptions::default());
        assert_eq!(
            rendered.source_kinds(),
            vec![BlockKind::Paragraph, BlockKind::BlankLine, BlockKind::Paragraph]
        );
        assert_eq!(rendered.elements[1], Element::Spacer);

        let options = crate::parser::ParseOptions::new().with_blank_lines(false);
        let doc = MarkdownParser::from_text_with_options("One\n\n\nTwo", options)
            .parse()
            .unwrap();
        let rendered = render(&doc, &StyleTheme::default(), &RenderOptions::default()).unwrap();
        assert!(!rendered.elements.contains(&Element::Spacer));
    }

    #[test]
    fn test_empty_document() {
        let rendered = render_md("", &RenderOptions::default());
        assert!(rendered.is_empty());
        assert!(rendered.header.is_none());
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let mut theme = StyleTheme::default();
        theme.font.clear();
        let result = render(&Document::new(), &theme, &RenderOptions::default());
        assert!(result.is_err());
    }
}
