//! Integration tests for file-to-file conversion.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use mdocx::convert::{convert_file, convert_file_with_result, resolve_output_path, ConvertOptions};
use mdocx::{BlockKind, Error, Mdocx, ParseOptions, RenderOptions};
use tempfile::TempDir;
use zip::ZipArchive;

const RESUME: &str = "```markdown
# JANE DOE
Seattle, WA | jane@example.com | [GitHub](https://github.com/jdoe)
---
## SUMMARY
Systems engineer with **ten years** of *Rust* and C++.

## EMPLOYMENT HISTORY
**Acme Corp** - Senior Engineer (2019 - Current)
- Built a *streaming* parser
- Led a team of four
---
**Initech** - Engineer (2015 - 2019)
- Maintained TPS report generator

## CERTIFICATIONS
| Certification | Issuer | Year |
|---|---|---|
| CKA | CNCF | 2022 |
| AWS SA | Amazon |
```";

fn read_part(path: &Path, name: &str) -> String {
    let bytes = fs::read(path).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

fn write_resume(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("resume.md");
    fs::write(&input, RESUME).unwrap();
    input
}

#[test]
fn test_convert_resume() {
    let tmp = TempDir::new().unwrap();
    let input = write_resume(tmp.path());
    let options = ConvertOptions::new().with_output_dir(tmp.path().join("exports"));

    let result = convert_file_with_result(&input, "resume.docx", &options).unwrap();
    assert_eq!(result.output, tmp.path().join("exports").join("resume.docx"));
    assert_eq!(result.metadata.title.as_deref(), Some("JANE DOE"));
    assert_eq!(result.stats.table_count, 1);
    assert_eq!(result.stats.table_row_count, 2);
    assert_eq!(result.stats.link_count, 1);

    let document = read_part(&result.output, "word/document.xml");
    assert!(document.contains("<w:pStyle w:val=\"Heading1\"/>"));
    assert!(document.contains("<w:jc w:val=\"center\"/>"));
    assert!(document.contains("<w:keepNext/>"));
    assert!(document.contains("w:fill=\"C6EFCE\""));
    assert!(document.contains("Maintained TPS report generator"));
    assert!(!document.contains("```"));

    let rels = read_part(&result.output, "word/_rels/document.xml.rels");
    assert!(rels.contains("https://github.com/jdoe"));
}

#[test]
fn test_block_order_preserved() {
    let doc = mdocx::parse_str(RESUME).unwrap();
    let rendered = Mdocx::new().parse_str(RESUME).unwrap().render().unwrap();
    assert_eq!(rendered.source_kinds(), doc.kinds());
    assert_eq!(doc.count(BlockKind::Table), 1);
}

#[test]
fn test_ragged_rows_padded_by_default() {
    let doc = mdocx::parse_str(RESUME).unwrap();
    let table = doc
        .blocks
        .iter()
        .find_map(|b| match b {
            mdocx::Block::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.rows[1], vec!["AWS SA", "Amazon", ""]);
}

#[test]
fn test_ragged_rows_rejected_in_strict_mode() {
    let tmp = TempDir::new().unwrap();
    let input = write_resume(tmp.path());
    let options = ConvertOptions::new()
        .with_parse_options(ParseOptions::new().strict())
        .with_output_dir(tmp.path());

    let result = convert_file(&input, "resume.docx", &options);
    assert!(matches!(result, Err(Error::Parse(_))));
    assert!(!tmp.path().join("resume.docx").exists());
}

#[test]
fn test_missing_input_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let options = ConvertOptions::new().with_output_dir(tmp.path().join("out"));

    let result = convert_file(tmp.path().join("nope.md"), "resume.docx", &options);
    assert!(matches!(result, Err(Error::InputNotFound(_))));
    assert!(!tmp.path().join("out").join("resume.docx").exists());
}

#[test]
fn test_empty_input_gives_valid_package() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("empty.md");
    fs::write(&input, "").unwrap();

    let written = convert_file(&input, tmp.path().join("empty.docx"), &ConvertOptions::new()).unwrap();
    let document = read_part(&written, "word/document.xml");
    assert!(document.contains("<w:body>"));
}

#[test]
fn test_page_header_written() {
    let tmp = TempDir::new().unwrap();
    let input = write_resume(tmp.path());
    let options = ConvertOptions::new()
        .with_render_options(RenderOptions::new().with_page_header("Jane Doe | **Resume**"))
        .with_output_dir(tmp.path());

    let written = convert_file(&input, "resume.docx", &options).unwrap();
    let header = read_part(&written, "word/header1.xml");
    assert!(header.contains("Resume"));
    assert!(header.contains("<w:b/>"));
}

#[test]
fn test_output_path_rules() {
    let tmp = TempDir::new().unwrap();

    let options = ConvertOptions::new().with_default_dir(tmp.path().join("exported_resumes"));
    let bare = resolve_output_path(Path::new("resume.docx"), &options).unwrap();
    assert_eq!(bare, tmp.path().join("exported_resumes").join("resume.docx"));

    let explicit = tmp.path().join("custom").join("resume.docx");
    assert_eq!(resolve_output_path(&explicit, &options).unwrap(), explicit);

    let options = options.with_output_dir(tmp.path().join("override"));
    let overridden = resolve_output_path(&explicit, &options).unwrap();
    assert_eq!(overridden, tmp.path().join("override").join("resume.docx"));
}
