//! Inline span tokenizer.
//!
//! Recognizes `**bold**`, `*italic*`, `[text](url)` and backslash escapes,
//! scanning left to right. Matching is greedy and non-overlapping: once a
//! delimiter pair is consumed, scanning resumes after the closing delimiter.
//! Bodies of bold, italic and link spans are tokenized recursively, which is
//! how nested emphasis is resolved. Openers without a closing counterpart are
//! kept as literal text.

use crate::model::InlineSpan;

/// Characters that a backslash turns into literals.
const ESCAPABLE: &[u8] = b"\\*[]()|#_`";

/// Tokenize a line or paragraph into inline spans.
pub fn tokenize(text: &str) -> Vec<InlineSpan> {
    Tokenizer::new(text).run()
}

struct Tokenizer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    spans: Vec<InlineSpan>,
    pending: String,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            spans: Vec::new(),
            pending: String::new(),
        }
    }

    fn run(mut self) -> Vec<InlineSpan> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.escape(),
                b'*' => self.emphasis(),
                b'[' => self.link(),
                _ => self.literal_run(),
            }
        }
        self.flush();
        self.spans
    }

    /// Copy text up to the next delimiter candidate.
    fn literal_run(&mut self) {
        let start = self.pos;
        let end = self.bytes[start + 1..]
            .iter()
            .position(|b| matches!(b, b'\\' | b'*' | b'['))
            .map(|offset| start + 1 + offset)
            .unwrap_or(self.bytes.len());
        // Delimiters are ASCII, so `end` is always a char boundary.
        self.pending.push_str(&self.src[start..end]);
        self.pos = end;
    }

    fn escape(&mut self) {
        match self.bytes.get(self.pos + 1) {
            Some(&next) if ESCAPABLE.contains(&next) => {
                self.pending.push(next as char);
                self.pos += 2;
            }
            _ => {
                self.pending.push('\\');
                self.pos += 1;
            }
        }
    }

    fn emphasis(&mut self) {
        if self.bytes.get(self.pos + 1) == Some(&b'*') {
            let body_start = self.pos + 2;
            match self.find_bold_close(body_start) {
                Some(close) => {
                    let body = tokenize(&self.src[body_start..close]);
                    self.push_span(InlineSpan::Bold(body));
                    self.pos = close + 2;
                }
                None => {
                    self.pending.push_str("**");
                    self.pos = body_start;
                }
            }
            return;
        }

        let body_start = self.pos + 1;
        match self.find_italic_close(body_start) {
            Some(close) => {
                let body = tokenize(&self.src[body_start..close]);
                self.push_span(InlineSpan::Italic(body));
                self.pos = close + 1;
            }
            None => {
                self.pending.push('*');
                self.pos = body_start;
            }
        }
    }

    /// First `**` after a non-empty body.
    fn find_bold_close(&self, start: usize) -> Option<usize> {
        let b = self.bytes;
        let mut i = start;
        while i + 1 < b.len() {
            match b[i] {
                b'\\' => i += 2,
                b'*' if b[i + 1] == b'*' && i > start => return Some(i),
                _ => i += 1,
            }
        }
        None
    }

    /// Next single `*` after a non-empty body; `**` pairs are skipped.
    fn find_italic_close(&self, start: usize) -> Option<usize> {
        let b = self.bytes;
        let mut i = start;
        while i < b.len() {
            match b[i] {
                b'\\' => i += 2,
                b'*' if b.get(i + 1) == Some(&b'*') => i += 2,
                b'*' if i > start => return Some(i),
                _ => i += 1,
            }
        }
        None
    }

    fn link(&mut self) {
        match self.match_link() {
            Some((text_end, url_end)) => {
                let content = tokenize(&self.src[self.pos + 1..text_end]);
                let url = self.src[text_end + 2..url_end].trim().to_string();
                self.push_span(InlineSpan::Link { content, url });
                self.pos = url_end + 1;
            }
            None => {
                self.pending.push('[');
                self.pos += 1;
            }
        }
    }

    /// Locate `](` and `)` for a link opening at `self.pos`.
    ///
    /// Returns the index of `]` and of the closing `)`.
    fn match_link(&self) -> Option<(usize, usize)> {
        let b = self.bytes;
        let text_start = self.pos + 1;
        let text_end = text_start + b[text_start..].iter().position(|&c| c == b']')?;
        if text_end == text_start || b.get(text_end + 1) != Some(&b'(') {
            return None;
        }
        let url_start = text_end + 2;
        let url_end = url_start + b[url_start..].iter().position(|&c| c == b')')?;
        if self.src[url_start..url_end].trim().is_empty() {
            return None;
        }
        Some((text_end, url_end))
    }

    fn push_span(&mut self, span: InlineSpan) {
        self.flush();
        self.spans.push(span);
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            // Nested tokenizers may leave text at the edges; keep runs merged.
            if let Some(InlineSpan::Text(last)) = self.spans.last_mut() {
                last.push_str(&text);
            } else {
                self.spans.push(InlineSpan::Text(text));
            }
        }
    }
}

/// Join spans, merging adjacent text runs.
pub(crate) fn append_spans(target: &mut Vec<InlineSpan>, spans: Vec<InlineSpan>) {
    for span in spans {
        match (target.last_mut(), span) {
            (Some(InlineSpan::Text(last)), InlineSpan::Text(text)) => last.push_str(&text),
            (_, span) => target.push(span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::spans_plain_text;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> InlineSpan {
        InlineSpan::text(s)
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(tokenize("Senior Engineer"), vec![text("Senior Engineer")]);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            tokenize("**Acme Corp** - *Remote*"),
            vec![
                InlineSpan::bold("Acme Corp"),
                text(" - "),
                InlineSpan::italic("Remote"),
            ]
        );
    }

    #[test]
    fn test_unmatched_italic_is_literal() {
        assert_eq!(tokenize("Hello *world"), vec![text("Hello *world")]);
    }

    #[test]
    fn test_unmatched_bold_is_literal() {
        assert_eq!(tokenize("**Skills: Rust"), vec![text("**Skills: Rust")]);
        assert_eq!(tokenize("a ** b"), vec![text("a ** b")]);
    }

    #[test]
    fn test_hyperlink() {
        assert_eq!(
            tokenize("[Profile](http://example.com/x)"),
            vec![InlineSpan::link("Profile", "http://example.com/x")]
        );
    }

    #[test]
    fn test_hyperlink_with_surrounding_text() {
        let spans = tokenize("GitHub: [jdoe](https://github.com/jdoe) | Remote");
        assert_eq!(
            spans,
            vec![
                text("GitHub: "),
                InlineSpan::link("jdoe", "https://github.com/jdoe"),
                text(" | Remote"),
            ]
        );
    }

    #[test]
    fn test_incomplete_links_are_literal() {
        assert_eq!(tokenize("[Profile]"), vec![text("[Profile]")]);
        assert_eq!(tokenize("[Profile](no-close"), vec![text("[Profile](no-close")]);
        assert_eq!(tokenize("[](http://x)"), vec![text("[](http://x)")]);
        assert_eq!(tokenize("[x]()"), vec![text("[x]()")]);
    }

    #[test]
    fn test_bold_inside_link() {
        assert_eq!(
            tokenize("[**Portfolio**](https://jane.dev)"),
            vec![InlineSpan::Link {
                content: vec![InlineSpan::bold("Portfolio")],
                url: "https://jane.dev".to_string(),
            }]
        );
    }

    #[test]
    fn test_link_inside_bold() {
        assert_eq!(
            tokenize("**see [site](https://a.b)**"),
            vec![InlineSpan::Bold(vec![
                text("see "),
                InlineSpan::link("site", "https://a.b"),
            ])]
        );
    }

    #[test]
    fn test_bold_inside_italic() {
        assert_eq!(
            tokenize("*a **b** c*"),
            vec![InlineSpan::Italic(vec![
                text("a "),
                InlineSpan::bold("b"),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(
            tokenize("**Lead *and* mentor**"),
            vec![InlineSpan::Bold(vec![
                text("Lead "),
                InlineSpan::italic("and"),
                text(" mentor"),
            ])]
        );
    }

    #[test]
    fn test_triple_star_policy() {
        // The first `**` after the body closes bold; leftovers stay literal.
        assert_eq!(
            tokenize("***x***"),
            vec![InlineSpan::Bold(vec![text("*x")]), text("*")]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(tokenize(r"5 \* 3 \[x\]"), vec![text("5 * 3 [x]")]);
        assert_eq!(tokenize(r"C:\path"), vec![text(r"C:\path")]);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            tokenize("Café **München** – naïve"),
            vec![text("Café "), InlineSpan::bold("München"), text(" – naïve")]
        );
    }

    #[test]
    fn test_round_trip_of_visible_text() {
        let cases = [
            ("Hello *world*", "Hello world"),
            ("**Rust**, *Go* and [Python](https://python.org)", "Rust, Go and Python"),
            ("Unclosed **bold and *italic", "Unclosed **bold and *italic"),
            ("*a **b** c*", "a b c"),
            ("plain text only", "plain text only"),
        ];
        for (input, visible) in cases {
            assert_eq!(spans_plain_text(&tokenize(input)), visible, "input: {input}");
        }
    }

    #[test]
    fn test_append_spans_merges_text() {
        let mut target = vec![text("a")];
        append_spans(&mut target, vec![text(" b"), InlineSpan::bold("c")]);
        assert_eq!(target, vec![text("a b"), InlineSpan::bold("c")]);
    }
}
