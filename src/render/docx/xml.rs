//! Thin wrapper over `quick_xml::Writer` for building package parts.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// WordprocessingML main namespace.
pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace.
pub(crate) const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Start a part with the standard XML declaration.
    pub(crate) fn new() -> Result<Self> {
        let mut writer = Self {
            inner: Writer::new(Vec::new()),
        };
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(writer)
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(elem))
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(elem))
    }

    /// Write `<name attrs>text</name>`.
    pub(crate) fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Write escaped character data. Characters XML 1.0 forbids are dropped.
    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        if text.chars().any(is_forbidden) {
            let cleaned: String = text.chars().filter(|&c| !is_forbidden(c)).collect();
            return self.write(Event::Text(BytesText::new(&cleaned)));
        }
        self.write(Event::Text(BytesText::new(text)))
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::Package(format!("XML write error: {}", e)))
    }
}

/// C0 controls other than tab, newline and carriage return, plus the
/// non-characters U+FFFE and U+FFFF.
fn is_forbidden(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text() {
        let mut xml = XmlWriter::new().unwrap();
        xml.text_element("w:t", &[("xml:space", "preserve")], "R&D <team>").unwrap();
        let out = String::from_utf8(xml.into_bytes()).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(out.ends_with("<w:t xml:space=\"preserve\">R&amp;D &lt;team&gt;</w:t>"));
    }

    #[test]
    fn test_empty_element() {
        let mut xml = XmlWriter::new().unwrap();
        xml.empty("w:b", &[]).unwrap();
        let out = String::from_utf8(xml.into_bytes()).unwrap();
        assert!(out.ends_with("<w:b/>"));
    }

    #[test]
    fn test_drops_control_characters() {
        let mut xml = XmlWriter::new().unwrap();
        xml.text_element("w:t", &[], "Skills\u{000C}Rust \u{0008}Go\tC").unwrap();
        let out = String::from_utf8(xml.into_bytes()).unwrap();
        assert!(out.ends_with("<w:t>SkillsRust Go\tC</w:t>"));
    }
}
