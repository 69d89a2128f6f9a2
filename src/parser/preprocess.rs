//! Source text normalization applied before block parsing.

use super::ParseOptions;
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

const BOM: char = '\u{FEFF}';

fn opening_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"^```\s*(?i:markdown|md)?\s*$").expect("valid fence pattern"))
}

/// Normalize line endings, strip a BOM, apply NFC and remove a wrapping
/// code fence.
pub fn preprocess(text: &str, options: &ParseOptions) -> String {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut text = text.replace("\r\n", "\n").replace('\r', "\n");

    if options.normalize_unicode {
        text = text.nfc().collect();
    }

    if options.strip_code_fence {
        text = strip_code_fence(&text);
    }

    text
}

/// Remove a code fence opening the first line and closing the last line.
///
/// Model output frequently wraps the whole document in a ```` ```markdown ````
/// fence. Each side is removed independently.
fn strip_code_fence(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();

    if lines
        .first()
        .is_some_and(|first| opening_fence().is_match(first.trim()))
    {
        log::debug!("stripping opening code fence");
        lines.remove(0);
    }
    if lines.last().is_some_and(|last| last.trim() == "```") {
        log::debug!("stripping closing code fence");
        lines.pop();
    }

    lines.join("\n")
}
