//! Structural parser: source lines to the ordered block sequence.

use super::inline::{append_spans, tokenize};
use super::{ParseOptions, RaggedRowPolicy};
use crate::error::{Error, Result};
use crate::model::{Block, InlineSpan, Table, MAX_HEADING_LEVEL};

/// Parse preprocessed Markdown text into blocks.
pub fn parse_blocks(text: &str, options: &ParseOptions) -> Result<Vec<Block>> {
    BlockParser::new(options).parse(text)
}

struct BlockParser<'o, 'a> {
    options: &'o ParseOptions,
    blocks: Vec<Block>,
    paragraph: Vec<&'a str>,
    pending_blank: bool,
}

impl<'o, 'a> BlockParser<'o, 'a> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
            paragraph: Vec::new(),
            pending_blank: false,
        }
    }

    fn parse(mut self, text: &'a str) -> Result<Vec<Block>> {
        let lines: Vec<&str> = text.lines().collect();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            if line.is_empty() {
                self.flush_paragraph();
                self.pending_blank = true;
                i += 1;
                continue;
            }

            if is_rule(line) {
                self.emit(Block::Rule);
                i += 1;
                continue;
            }

            if let Some((level, text)) = parse_heading(line) {
                self.emit(Block::Heading {
                    level,
                    content: tokenize(text),
                });
                i += 1;
                continue;
            }

            if let Some(item) = parse_list_item(line) {
                self.emit(Block::ListItem(tokenize(item)));
                i += 1;
                continue;
            }

            if line.starts_with('|') && lines.get(i + 1).is_some_and(|next| is_separator(next)) {
                let header = split_row(line);
                let mut body = Vec::new();
                let mut j = i + 2;
                while j < lines.len() && lines[j].trim().starts_with('|') {
                    body.push((j + 1, split_row(lines[j].trim())));
                    j += 1;
                }
                let table = build_table(header, body, self.options.ragged_rows)?;
                self.emit(Block::Table(table));
                i = j;
                continue;
            }

            self.paragraph.push(line);
            i += 1;
        }

        self.flush_paragraph();
        Ok(self.blocks)
    }

    fn emit(&mut self, block: Block) {
        self.flush_paragraph();
        self.push_block(block);
    }

    fn push_block(&mut self, block: Block) {
        if self.pending_blank && self.options.blank_lines && !self.blocks.is_empty() {
            self.blocks.push(Block::BlankLine);
        }
        self.pending_blank = false;
        self.blocks.push(block);
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.paragraph);
        let spans = if self.options.hard_line_breaks {
            let mut spans = Vec::new();
            for (n, line) in lines.iter().enumerate() {
                if n > 0 {
                    spans.push(InlineSpan::LineBreak);
                }
                append_spans(&mut spans, tokenize(line));
            }
            spans
        } else {
            tokenize(&lines.join(" "))
        };
        self.push_block(Block::Paragraph(spans));
    }
}

/// A line of three or more identical `-`, `*` or `_` markers (spaces allowed).
fn is_rule(line: &str) -> bool {
    let mut markers = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = markers.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in markers {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Heading marker count and text. Seven or more markers clamp to level 6.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let level = if hashes > MAX_HEADING_LEVEL as usize {
        log::warn!(
            "heading with {} markers clamped to level {}",
            hashes,
            MAX_HEADING_LEVEL
        );
        MAX_HEADING_LEVEL
    } else {
        hashes as u8
    };

    let mut text = rest.trim();
    // Optional closing sequence: "## Title ##"
    let unclosed = text.trim_end_matches('#');
    if unclosed.len() != text.len() && (unclosed.is_empty() || unclosed.ends_with(' ')) {
        text = unclosed.trim_end();
    }

    Some((level, text))
}

fn parse_list_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

/// A `|---|:---:|` separator row.
fn is_separator(line: &str) -> bool {
    let line = line.trim();
    if !line.contains('-') || !line.contains('|') {
        return false;
    }
    split_row(line).iter().all(|cell| {
        let dashes = cell.trim_start_matches(':').trim_end_matches(':');
        !dashes.is_empty() && dashes.chars().all(|c| c == '-')
    })
}

/// Split a pipe-delimited row into trimmed cells. `\|` is a literal pipe.
fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = match line.strip_suffix('|') {
        Some(inner) if !inner.ends_with('\\') => inner,
        _ => line,
    };

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn build_table(
    header: Vec<String>,
    body: Vec<(usize, Vec<String>)>,
    policy: RaggedRowPolicy,
) -> Result<Table> {
    let width = header.len();
    let mut table = Table {
        header,
        rows: Vec::with_capacity(body.len()),
    };

    for (line_no, mut row) in body {
        if row.len() != width {
            match policy {
                RaggedRowPolicy::Reject => {
                    return Err(Error::Parse(format!(
                        "table row on line {} has {} cells, expected {}",
                        line_no,
                        row.len(),
                        width
                    )));
                }
                RaggedRowPolicy::PadOrTruncate => {
                    log::warn!(
                        "table row on line {} has {} cells, adjusting to {}",
                        line_no,
                        row.len(),
                        width
                    );
                    row.resize(width, String::new());
                }
            }
        }
        table.rows.push(row);
    }

    Ok(table)
}
