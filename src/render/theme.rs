//! Typographic theme applied to the rendered document.
//!
//! A [`StyleTheme`] is loaded once before conversion and passed by reference
//! into the renderer; nothing in the document content mutates it. Themes are
//! plain serde values so they can be stored as JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Twentieths of a point per inch.
const TWIPS_PER_INCH: f32 = 1440.0;

/// Fixed typographic configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTheme {
    /// Typeface used for all text
    pub font: String,

    /// Body text style
    pub body: BodyStyle,

    /// Heading styles, index 0 is level 1
    pub headings: Vec<HeadingStyle>,

    /// Hyperlink run style
    pub link: LinkStyle,

    /// Table cell colors
    pub table: TableStyle,

    /// Horizontal rule border
    pub divider: DividerStyle,

    /// Page size and margins
    pub page: PageSetup,
}

impl StyleTheme {
    /// Load a theme from a JSON string. Missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let theme: StyleTheme =
            serde_json::from_str(json).map_err(|e| Error::Theme(e.to_string()))?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load a theme from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Theme(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Serialize the theme to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the theme can render a document.
    pub fn validate(&self) -> Result<()> {
        if self.font.trim().is_empty() {
            return Err(Error::Theme("font name is empty".into()));
        }
        if self.headings.is_empty() {
            return Err(Error::Theme("no heading styles defined".into()));
        }
        check_size("body", self.body.size_pt)?;
        check_color("body", &self.body.color)?;
        for (i, heading) in self.headings.iter().enumerate() {
            let name = format!("heading {}", i + 1);
            check_size(&name, heading.size_pt)?;
            check_color(&name, &heading.color)?;
        }
        check_color("link", &self.link.color)?;
        check_color("table header fill", &self.table.header_fill)?;
        check_color("table header text", &self.table.header_color)?;
        check_color("table body fill", &self.table.body_fill)?;
        check_color("table body text", &self.table.body_color)?;
        check_color("divider", &self.divider.color)?;
        self.page.validate()
    }

    /// Number of heading levels this theme defines.
    pub fn heading_count(&self) -> u8 {
        self.headings.len().min(u8::MAX as usize) as u8
    }

    /// Clamp a heading level to the nearest level the theme defines.
    pub fn heading_level(&self, level: u8) -> u8 {
        level.clamp(1, self.heading_count().max(1))
    }
}

impl Default for StyleTheme {
    fn default() -> Self {
        Self {
            font: "Aptos".to_string(),
            body: BodyStyle::default(),
            headings: vec![
                HeadingStyle::new(20.0, "0F4761").spacing(12.0, 4.0),
                HeadingStyle::new(16.0, "0F4761").spacing(8.0, 2.0),
                HeadingStyle::new(14.0, "0F4761").spacing(6.0, 2.0),
                HeadingStyle::new(12.0, "0F4761").italic().spacing(4.0, 0.0),
                HeadingStyle::new(11.0, "0F4761").spacing(4.0, 0.0),
                HeadingStyle::new(11.0, "595959").italic().spacing(2.0, 0.0),
            ],
            link: LinkStyle::default(),
            table: TableStyle::default(),
            divider: DividerStyle::default(),
            page: PageSetup::default(),
        }
    }
}

/// Body text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyStyle {
    /// Font size in points
    pub size_pt: f32,

    /// Text color (hex, no `#`)
    pub color: String,

    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: f32,

    /// Space before paragraphs in points
    pub space_before_pt: f32,

    /// Space after paragraphs in points
    pub space_after_pt: f32,
}

impl Default for BodyStyle {
    fn default() -> Self {
        Self {
            size_pt: 11.0,
            color: "000000".to_string(),
            line_spacing: 1.0,
            space_before_pt: 0.0,
            space_after_pt: 0.0,
        }
    }
}

/// Style for one heading level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingStyle {
    /// Font size in points
    pub size_pt: f32,

    /// Text color (hex, no `#`)
    pub color: String,

    /// Bold text
    #[serde(default = "default_true")]
    pub bold: bool,

    /// Italic text
    #[serde(default)]
    pub italic: bool,

    /// Space before in points
    #[serde(default)]
    pub space_before_pt: f32,

    /// Space after in points
    #[serde(default)]
    pub space_after_pt: f32,
}

impl HeadingStyle {
    /// Create a bold heading style.
    pub fn new(size_pt: f32, color: impl Into<String>) -> Self {
        Self {
            size_pt,
            color: color.into(),
            bold: true,
            italic: false,
            space_before_pt: 0.0,
            space_after_pt: 0.0,
        }
    }

    /// Make the heading italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set spacing before and after in points.
    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before_pt = before;
        self.space_after_pt = after;
        self
    }
}

fn default_true() -> bool {
    true
}

/// Hyperlink run style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkStyle {
    /// Link color (hex, no `#`)
    pub color: String,

    /// Underline links
    pub underline: bool,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            color: "0563C1".to_string(),
            underline: true,
        }
    }
}

/// Table cell fills and text colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    /// Header cell background
    pub header_fill: String,

    /// Header cell text color
    pub header_color: String,

    /// Bold header text
    pub header_bold: bool,

    /// Body cell background
    pub body_fill: String,

    /// Body cell text color
    pub body_color: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_fill: "C6EFCE".to_string(),
            header_color: "006100".to_string(),
            header_bold: true,
            body_fill: "FFFACD".to_string(),
            body_color: "000000".to_string(),
        }
    }
}

/// Bottom border drawn for horizontal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerStyle {
    /// Border width in eighths of a point
    pub size: u8,

    /// Gap between paragraph and border in points
    pub space_pt: u8,

    /// Border color (hex or `auto`)
    pub color: String,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            size: 6,
            space_pt: 1,
            color: "auto".to_string(),
        }
    }
}

/// Page size and margins in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Page width
    pub width_in: f32,

    /// Page height
    pub height_in: f32,

    /// Top margin
    pub margin_top_in: f32,

    /// Right margin
    pub margin_right_in: f32,

    /// Bottom margin
    pub margin_bottom_in: f32,

    /// Left margin
    pub margin_left_in: f32,
}

impl PageSetup {
    /// US Letter with half-inch margins.
    pub fn letter() -> Self {
        Self::default()
    }

    /// A4 with half-inch margins.
    pub fn a4() -> Self {
        Self {
            width_in: 8.27,
            height_in: 11.69,
            ..Self::default()
        }
    }

    /// Page width in twips.
    pub fn width_twips(&self) -> u32 {
        twips(self.width_in)
    }

    /// Page height in twips.
    pub fn height_twips(&self) -> u32 {
        twips(self.height_in)
    }

    /// Margins in twips as (top, right, bottom, left).
    pub fn margins_twips(&self) -> (u32, u32, u32, u32) {
        (
            twips(self.margin_top_in),
            twips(self.margin_right_in),
            twips(self.margin_bottom_in),
            twips(self.margin_left_in),
        )
    }

    /// Width between the left and right margins in twips.
    pub fn content_width_twips(&self) -> u32 {
        let (_, right, _, left) = self.margins_twips();
        self.width_twips().saturating_sub(left + right)
    }

    fn validate(&self) -> Result<()> {
        if self.width_in <= 0.0 || self.height_in <= 0.0 {
            return Err(Error::Theme("page dimensions must be positive".into()));
        }
        let margins = [
            self.margin_top_in,
            self.margin_right_in,
            self.margin_bottom_in,
            self.margin_left_in,
        ];
        if margins.iter().any(|m| *m < 0.0) {
            return Err(Error::Theme("page margins must not be negative".into()));
        }
        if self.margin_left_in + self.margin_right_in >= self.width_in {
            return Err(Error::Theme("horizontal margins exceed page width".into()));
        }
        Ok(())
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width_in: 8.5,
            height_in: 11.0,
            margin_top_in: 0.5,
            margin_right_in: 0.5,
            margin_bottom_in: 0.5,
            margin_left_in: 0.5,
        }
    }
}

/// Convert inches to twips.
pub fn twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round().max(0.0) as u32
}

/// Convert points to half-points (run font sizes).
pub fn half_points(points: f32) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}

/// Convert points to twentieths of a point (paragraph spacing).
pub fn point_twips(points: f32) -> u32 {
    (points * 20.0).round().max(0.0) as u32
}

fn check_size(name: &str, size: f32) -> Result<()> {
    if size <= 0.0 || !size.is_finite() {
        return Err(Error::Theme(format!("{} font size must be positive", name)));
    }
    Ok(())
}

fn check_color(name: &str, color: &str) -> Result<()> {
    let valid = color == "auto"
        || (color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(Error::Theme(format!(
            "{} color '{}' is not a 6-digit hex value",
            name, color
        )));
    }
    Ok(())
}
