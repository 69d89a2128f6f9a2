//! Integration tests for themes and the rendered document.

use std::fs;
use std::io::{Cursor, Read};

use mdocx::render::{self, Element, ParagraphStyle, PageSetup};
use mdocx::{Error, RenderOptions, StyleTheme};
use tempfile::TempDir;
use zip::ZipArchive;

#[test]
fn test_theme_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("theme.json");

    let mut theme = StyleTheme::default();
    theme.font = "Calibri".to_string();
    theme.page = PageSetup::a4();
    fs::write(&path, theme.to_json().unwrap()).unwrap();

    let loaded = StyleTheme::from_file(&path).unwrap();
    assert_eq!(loaded, theme);
}

#[test]
fn test_missing_theme_file() {
    let result = StyleTheme::from_file("no/such/theme.json");
    assert!(matches!(result, Err(Error::Theme(_))));
}

#[test]
fn test_custom_theme_reaches_package() {
    let theme = StyleTheme::from_json(
        r#"{
            "font": "Georgia",
            "body": { "size_pt": 10 },
            "table": { "header_fill": "DDEBF7", "header_color": "1F4E78" },
            "page": { "width_in": 8.27, "height_in": 11.69 }
        }"#,
    )
    .unwrap();

    let doc = mdocx::parse_str("| A |\n|---|\n| 1 |").unwrap();
    let rendered = render::render(&doc, &theme, &RenderOptions::default()).unwrap();
    let bytes = render::to_bytes(&rendered, &theme).unwrap();

    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut styles = String::new();
    archive.by_name("word/styles.xml").unwrap().read_to_string(&mut styles).unwrap();
    assert!(styles.contains("w:ascii=\"Georgia\""));
    assert!(styles.contains("<w:sz w:val=\"20\"/>"));

    let mut document = String::new();
    archive.by_name("word/document.xml").unwrap().read_to_string(&mut document).unwrap();
    assert!(document.contains("w:fill=\"DDEBF7\""));
    assert!(document.contains("<w:pgSz w:w=\"11909\" w:h=\"16834\"/>"));
}

#[test]
fn test_deep_headings_clamp_to_theme() {
    let mut theme = StyleTheme::default();
    theme.headings.truncate(3);

    let doc = mdocx::parse_str("# One\n##### Five\n######## Eight").unwrap();
    let rendered = render::render(&doc, &theme, &RenderOptions::default()).unwrap();
    let styles: Vec<ParagraphStyle> = rendered
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Paragraph(p) => Some(p.style),
            _ => None,
        })
        .collect();
    assert_eq!(
        styles,
        vec![
            ParagraphStyle::Heading(1),
            ParagraphStyle::Heading(3),
            ParagraphStyle::Heading(3),
        ]
    );
}

#[test]
fn test_invalid_theme_rejected_before_writing() {
    let tmp = TempDir::new().unwrap();
    let mut theme = StyleTheme::default();
    theme.body.size_pt = 0.0;

    let doc = mdocx::parse_str("Body").unwrap();
    let path = tmp.path().join("out.docx");
    let result = mdocx::write_docx(&doc, &path, &theme, &RenderOptions::default());
    assert!(matches!(result, Err(Error::Theme(_))));
    assert!(!path.exists());
}
