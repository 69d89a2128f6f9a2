//! Office Open XML package writer.
//!
//! Serializes a [`RenderedDocument`] into the zip container Word expects:
//! content types, package relationships, core and app properties, the main
//! document part, styles, bullet numbering, settings and an optional page
//! header. Hyperlinks become external relationships of the document part.

use super::xml::{XmlWriter, NS_R, NS_W};
use super::{Alignment, Element, ParagraphStyle, RenderedDocument, Run, RunItem, StyledParagraph, StyledTable};
use crate::error::Result;
use crate::render::theme::{half_points, point_twips, StyleTheme};
use chrono::{SecondsFormat, Utc};
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_NUMBERING: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
const CT_SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
const CT_HEADER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str = "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_APP: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
const REL_SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
const REL_HEADER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
const REL_HYPERLINK: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Bullet numbering definition referenced by the list style.
const BULLET_NUM_ID: &str = "1";
/// Hanging indent for bullet paragraphs in twips.
const BULLET_INDENT: &str = "360";
const BULLET_CHAR: &str = "\u{2022}";

/// Fixed relationship ids of the document part.
const RID_STYLES: &str = "rId1";
const RID_NUMBERING: &str = "rId2";
const RID_SETTINGS: &str = "rId3";
const RID_HEADER: &str = "rId4";
const FIRST_LINK_RID: usize = 5;

/// Write a rendered document as a package into `writer`.
pub fn write_package<W: Write + Seek>(doc: &RenderedDocument, theme: &StyleTheme, writer: W) -> Result<W> {
    let mut links = LinkTable::default();
    let document = document_xml(doc, theme, &mut links)?;
    let has_header = doc.header.is_some();

    let mut parts: Vec<(&str, Vec<u8>)> = vec![
        ("[Content_Types].xml", content_types_xml(has_header)?),
        ("_rels/.rels", package_rels_xml()?),
        ("docProps/core.xml", core_xml(doc)?),
        ("docProps/app.xml", app_xml()?),
        ("word/document.xml", document),
        ("word/_rels/document.xml.rels", document_rels_xml(has_header, &links)?),
        ("word/styles.xml", styles_xml(theme)?),
        ("word/numbering.xml", numbering_xml()?),
        ("word/settings.xml", settings_xml()?),
    ];
    if let Some(header) = &doc.header {
        parts.push(("word/header1.xml", header_xml(header)?));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }
    let writer = zip.finish()?;
    log::debug!("wrote package with {} hyperlinks", links.urls.len());
    Ok(writer)
}

/// Serialize a rendered document into package bytes.
pub fn to_bytes(doc: &RenderedDocument, theme: &StyleTheme) -> Result<Vec<u8>> {
    let cursor = write_package(doc, theme, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// External hyperlink targets and their relationship ids.
#[derive(Default)]
struct LinkTable {
    urls: Vec<String>,
}

impl LinkTable {
    fn id_for(&mut self, url: &str) -> String {
        let index = match self.urls.iter().position(|u| u == url) {
            Some(index) => index,
            None => {
                self.urls.push(url.to_string());
                self.urls.len() - 1
            }
        };
        rel_id(index)
    }

    fn entries(&self) -> impl Iterator<Item = (String, &str)> {
        self.urls.iter().enumerate().map(|(i, url)| (rel_id(i), url.as_str()))
    }
}

fn rel_id(index: usize) -> String {
    format!("rId{}", FIRST_LINK_RID + index)
}

fn content_types_xml(has_header: bool) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    xml.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

    let mut overrides = vec![
        ("/word/document.xml", CT_DOCUMENT),
        ("/word/styles.xml", CT_STYLES),
        ("/word/numbering.xml", CT_NUMBERING),
        ("/word/settings.xml", CT_SETTINGS),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_APP),
    ];
    if has_header {
        overrides.push(("/word/header1.xml", CT_HEADER));
    }
    for (part, content_type) in overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    xml.end("Types")?;
    Ok(xml.into_bytes())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for (id, kind, target) in [
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_APP, "docProps/app.xml"),
    ] {
        xml.empty("Relationship", &[("Id", id), ("Type", kind), ("Target", target)])?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn document_rels_xml(has_header: bool, links: &LinkTable) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    xml.empty("Relationship", &[("Id", RID_STYLES), ("Type", REL_STYLES), ("Target", "styles.xml")])?;
    xml.empty(
        "Relationship",
        &[("Id", RID_NUMBERING), ("Type", REL_NUMBERING), ("Target", "numbering.xml")],
    )?;
    xml.empty(
        "Relationship",
        &[("Id", RID_SETTINGS), ("Type", REL_SETTINGS), ("Target", "settings.xml")],
    )?;
    if has_header {
        xml.empty("Relationship", &[("Id", RID_HEADER), ("Type", REL_HEADER), ("Target", "header1.xml")])?;
    }
    for (id, url) in links.entries() {
        xml.empty(
            "Relationship",
            &[
                ("Id", id.as_str()),
                ("Type", REL_HYPERLINK),
                ("Target", url),
                ("TargetMode", "External"),
            ],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn core_xml(doc: &RenderedDocument) -> Result<Vec<u8>> {
    let created = doc
        .metadata
        .created
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(title) = &doc.metadata.title {
        xml.text_element("dc:title", &[], title)?;
    }
    if let Some(author) = &doc.metadata.author {
        xml.text_element("dc:creator", &[], author)?;
    }
    xml.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    xml.text_element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

fn app_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Properties",
        &[("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties")],
    )?;
    xml.text_element("Application", &[], concat!("mdocx ", env!("CARGO_PKG_VERSION")))?;
    xml.end("Properties")?;
    Ok(xml.into_bytes())
}

fn document_xml(doc: &RenderedDocument, theme: &StyleTheme, links: &mut LinkTable) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    xml.start("w:body", &[])?;

    for element in &doc.elements {
        match element {
            Element::Paragraph(paragraph) => write_paragraph(&mut xml, paragraph, Some(&mut *links))?,
            Element::Table(table) => write_table(&mut xml, table, links)?,
            Element::Divider => write_divider(&mut xml, theme)?,
            Element::Spacer => xml.empty("w:p", &[])?,
        }
    }
    // A body cannot end with a table.
    if matches!(doc.elements.last(), Some(Element::Table(_))) {
        xml.empty("w:p", &[])?;
    }

    write_section(&mut xml, doc)?;
    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.into_bytes())
}

fn write_section(xml: &mut XmlWriter, doc: &RenderedDocument) -> Result<()> {
    let page = &doc.page;
    let (top, right, bottom, left) = page.margins_twips();
    xml.start("w:sectPr", &[])?;
    if doc.header.is_some() {
        xml.empty("w:headerReference", &[("w:type", "default"), ("r:id", RID_HEADER)])?;
    }
    xml.empty(
        "w:pgSz",
        &[
            ("w:w", &page.width_twips().to_string()),
            ("w:h", &page.height_twips().to_string()),
        ],
    )?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", &top.to_string()),
            ("w:right", &right.to_string()),
            ("w:bottom", &bottom.to_string()),
            ("w:left", &left.to_string()),
            ("w:header", &(top / 2).to_string()),
            ("w:footer", &(bottom / 2).to_string()),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")
}

/// Write a paragraph. Without a link table, hyperlinks are written as their
/// styled runs.
fn write_paragraph(xml: &mut XmlWriter, paragraph: &StyledParagraph, mut links: Option<&mut LinkTable>) -> Result<()> {
    xml.start("w:p", &[])?;

    let style_id = paragraph.style.style_id();
    let has_props =
        paragraph.style != ParagraphStyle::Normal || paragraph.keep_with_next || paragraph.alignment != Alignment::Left;
    if has_props {
        xml.start("w:pPr", &[])?;
        if paragraph.style != ParagraphStyle::Normal {
            xml.empty("w:pStyle", &[("w:val", &style_id)])?;
        }
        if paragraph.keep_with_next {
            xml.empty("w:keepNext", &[])?;
        }
        if paragraph.alignment == Alignment::Center {
            xml.empty("w:jc", &[("w:val", "center")])?;
        }
        xml.end("w:pPr")?;
    }

    for item in &paragraph.items {
        match item {
            RunItem::Run(run) => write_run(xml, run)?,
            RunItem::Break => {
                xml.start("w:r", &[])?;
                xml.empty("w:br", &[])?;
                xml.end("w:r")?;
            }
            RunItem::Hyperlink { url, runs } => match links.as_deref_mut() {
                Some(links) => {
                    let id = links.id_for(url);
                    xml.start("w:hyperlink", &[("r:id", &id), ("w:history", "1")])?;
                    for run in runs {
                        write_run(xml, run)?;
                    }
                    xml.end("w:hyperlink")?;
                }
                None => {
                    for run in runs {
                        write_run(xml, run)?;
                    }
                }
            },
        }
    }

    xml.end("w:p")
}

fn write_run(xml: &mut XmlWriter, run: &Run) -> Result<()> {
    xml.start("w:r", &[])?;
    let has_props = run.hyperlink || run.bold || run.italic || run.underline || run.color.is_some();
    if has_props {
        xml.start("w:rPr", &[])?;
        if run.hyperlink {
            xml.empty("w:rStyle", &[("w:val", "Hyperlink")])?;
        }
        if run.bold {
            xml.empty("w:b", &[])?;
        }
        if run.italic {
            xml.empty("w:i", &[])?;
        }
        if let Some(color) = &run.color {
            xml.empty("w:color", &[("w:val", color)])?;
        }
        if run.underline {
            xml.empty("w:u", &[("w:val", "single")])?;
        }
        xml.end("w:rPr")?;
    }
    xml.text_element("w:t", &[("xml:space", "preserve")], &run.text)?;
    xml.end("w:r")
}

fn write_divider(xml: &mut XmlWriter, theme: &StyleTheme) -> Result<()> {
    let divider = &theme.divider;
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.start("w:pBdr", &[])?;
    xml.empty(
        "w:bottom",
        &[
            ("w:val", "single"),
            ("w:sz", &divider.size.to_string()),
            ("w:space", &divider.space_pt.to_string()),
            ("w:color", &divider.color),
        ],
    )?;
    xml.end("w:pBdr")?;
    xml.end("w:pPr")?;
    xml.end("w:p")
}

fn write_table(xml: &mut XmlWriter, table: &StyledTable, links: &mut LinkTable) -> Result<()> {
    let width = table.column_width.to_string();
    xml.start("w:tbl", &[])?;

    xml.start("w:tblPr", &[])?;
    xml.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
    xml.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    xml.empty(
        "w:tblLook",
        &[
            ("w:val", "04A0"),
            ("w:firstRow", "1"),
            ("w:lastRow", "0"),
            ("w:firstColumn", "1"),
            ("w:lastColumn", "0"),
            ("w:noHBand", "0"),
            ("w:noVBand", "1"),
        ],
    )?;
    xml.end("w:tblPr")?;

    xml.start("w:tblGrid", &[])?;
    for _ in 0..table.columns {
        xml.empty("w:gridCol", &[("w:w", &width)])?;
    }
    xml.end("w:tblGrid")?;

    for row in &table.rows {
        xml.start("w:tr", &[])?;
        if row.header {
            xml.start("w:trPr", &[])?;
            xml.empty("w:tblHeader", &[])?;
            xml.end("w:trPr")?;
        }
        for cell in &row.cells {
            xml.start("w:tc", &[])?;
            xml.start("w:tcPr", &[])?;
            xml.empty("w:tcW", &[("w:w", &width), ("w:type", "dxa")])?;
            xml.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", &cell.fill)])?;
            xml.end("w:tcPr")?;
            write_paragraph(xml, &cell.paragraph, Some(&mut *links))?;
            xml.end("w:tc")?;
        }
        xml.end("w:tr")?;
    }

    xml.end("w:tbl")
}

fn header_xml(header: &StyledParagraph) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:hdr", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    // The header part has no relationships of its own, so links stay plain runs.
    write_paragraph(&mut xml, header, None)?;
    xml.end("w:hdr")?;
    Ok(xml.into_bytes())
}

fn styles_xml(theme: &StyleTheme) -> Result<Vec<u8>> {
    let font = theme.font.as_str();
    let body = &theme.body;
    let body_size = half_points(body.size_pt).to_string();
    let line = ((240.0 * body.line_spacing).round().max(0.0) as u32).to_string();

    let mut xml = XmlWriter::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", font), ("w:hAnsi", font), ("w:eastAsia", font), ("w:cs", font)],
    )?;
    xml.empty("w:sz", &[("w:val", &body_size)])?;
    xml.empty("w:szCs", &[("w:val", &body_size)])?;
    xml.empty("w:lang", &[("w:val", "en-US")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[
            ("w:before", &point_twips(body.space_before_pt).to_string()),
            ("w:after", &point_twips(body.space_after_pt).to_string()),
            ("w:line", &line),
            ("w:lineRule", "auto"),
        ],
    )?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start("w:style", &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")])?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:color", &[("w:val", &body.color)])?;
    xml.end("w:rPr")?;
    xml.end("w:style")?;

    for (i, heading) in theme.headings.iter().enumerate() {
        let level = i + 1;
        let style_id = ParagraphStyle::Heading(level as u8).style_id();
        let size = half_points(heading.size_pt).to_string();
        xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", &style_id)])?;
        xml.empty("w:name", &[("w:val", &format!("heading {}", level))])?;
        xml.empty("w:basedOn", &[("w:val", "Normal")])?;
        xml.empty("w:next", &[("w:val", "Normal")])?;
        xml.empty("w:uiPriority", &[("w:val", "9")])?;
        xml.empty("w:qFormat", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:keepNext", &[])?;
        xml.empty("w:keepLines", &[])?;
        xml.empty(
            "w:spacing",
            &[
                ("w:before", &point_twips(heading.space_before_pt).to_string()),
                ("w:after", &point_twips(heading.space_after_pt).to_string()),
            ],
        )?;
        xml.empty("w:outlineLvl", &[("w:val", &i.to_string())])?;
        xml.end("w:pPr")?;
        xml.start("w:rPr", &[])?;
        if heading.bold {
            xml.empty("w:b", &[])?;
        }
        if heading.italic {
            xml.empty("w:i", &[])?;
        }
        xml.empty("w:color", &[("w:val", &heading.color)])?;
        xml.empty("w:sz", &[("w:val", &size)])?;
        xml.empty("w:szCs", &[("w:val", &size)])?;
        xml.end("w:rPr")?;
        xml.end("w:style")?;
    }

    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", "ListBullet")])?;
    xml.empty("w:name", &[("w:val", "List Bullet")])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.start("w:pPr", &[])?;
    xml.start("w:numPr", &[])?;
    xml.empty("w:numId", &[("w:val", BULLET_NUM_ID)])?;
    xml.end("w:numPr")?;
    xml.empty("w:ind", &[("w:left", BULLET_INDENT), ("w:hanging", BULLET_INDENT)])?;
    xml.end("w:pPr")?;
    xml.end("w:style")?;

    xml.start(
        "w:style",
        &[("w:type", "character"), ("w:default", "1"), ("w:styleId", "DefaultParagraphFont")],
    )?;
    xml.empty("w:name", &[("w:val", "Default Paragraph Font")])?;
    xml.empty("w:uiPriority", &[("w:val", "1")])?;
    xml.empty("w:semiHidden", &[])?;
    xml.end("w:style")?;

    xml.start("w:style", &[("w:type", "character"), ("w:styleId", "Hyperlink")])?;
    xml.empty("w:name", &[("w:val", "Hyperlink")])?;
    xml.empty("w:basedOn", &[("w:val", "DefaultParagraphFont")])?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:color", &[("w:val", &theme.link.color)])?;
    if theme.link.underline {
        xml.empty("w:u", &[("w:val", "single")])?;
    }
    xml.end("w:rPr")?;
    xml.end("w:style")?;

    xml.start("w:style", &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")])?;
    xml.empty("w:name", &[("w:val", "Normal Table")])?;
    xml.empty("w:semiHidden", &[])?;
    xml.start("w:tblPr", &[])?;
    xml.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    xml.start("w:tblCellMar", &[])?;
    for (side, w) in [("w:top", "0"), ("w:left", "108"), ("w:bottom", "0"), ("w:right", "108")] {
        xml.empty(side, &[("w:w", w), ("w:type", "dxa")])?;
    }
    xml.end("w:tblCellMar")?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.start("w:style", &[("w:type", "table"), ("w:styleId", "TableGrid")])?;
    xml.empty("w:name", &[("w:val", "Table Grid")])?;
    xml.empty("w:basedOn", &[("w:val", "TableNormal")])?;
    xml.start("w:tblPr", &[])?;
    xml.start("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            side,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    xml.end("w:tblBorders")?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.into_bytes())
}

fn numbering_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:numbering", &[("xmlns:w", NS_W)])?;
    xml.start("w:abstractNum", &[("w:abstractNumId", "0")])?;
    xml.empty("w:multiLevelType", &[("w:val", "hybridMultilevel")])?;
    xml.start("w:lvl", &[("w:ilvl", "0")])?;
    xml.empty("w:start", &[("w:val", "1")])?;
    xml.empty("w:numFmt", &[("w:val", "bullet")])?;
    xml.empty("w:lvlText", &[("w:val", BULLET_CHAR)])?;
    xml.empty("w:lvlJc", &[("w:val", "left")])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:ind", &[("w:left", BULLET_INDENT), ("w:hanging", BULLET_INDENT)])?;
    xml.end("w:pPr")?;
    xml.end("w:lvl")?;
    xml.end("w:abstractNum")?;
    xml.start("w:num", &[("w:numId", BULLET_NUM_ID)])?;
    xml.empty("w:abstractNumId", &[("w:val", "0")])?;
    xml.end("w:num")?;
    xml.end("w:numbering")?;
    Ok(xml.into_bytes())
}

fn settings_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:settings", &[("xmlns:w", NS_W)])?;
    xml.empty("w:defaultTabStop", &[("w:val", "720")])?;
    xml.empty("w:characterSpacingControl", &[("w:val", "doNotCompress")])?;
    xml.start("w:compat", &[])?;
    xml.empty(
        "w:compatSetting",
        &[
            ("w:name", "compatibilityMode"),
            ("w:uri", "http://schemas.microsoft.com/office/word"),
            ("w:val", "15"),
        ],
    )?;
    xml.end("w:compat")?;
    xml.end("w:settings")?;
    Ok(xml.into_bytes())
}
