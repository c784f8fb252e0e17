// Sentence boundaries as a pure function of the text

use codeswitch_core::character::{is_sentence_terminator, is_whitespace};
use codeswitch_core::token::SentenceSpan;

/// Default separator line for [`BoundaryMode::BlankLines`].
pub const DEFAULT_SEPARATOR: &str = "---";

/// How the text is cut into sentences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Every non-empty line is one sentence.
    #[default]
    Lines,
    /// Line breaks, plus `.`, `!`, `?` and `…` followed by whitespace.
    Punctuation,
    /// Blocks of lines separated by blank lines or by a separator line.
    BlankLines { separator: String },
}

/// Split `text` into sentence spans over character offsets. Spans are
/// trimmed of surrounding whitespace, never empty, and numbered from 1.
pub fn split_sentences(text: &str, mode: &BoundaryMode) -> Vec<SentenceSpan> {
    let chars: Vec<char> = text.chars().collect();
    let lines = line_ranges(&chars);
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    match mode {
        BoundaryMode::Lines => {
            ranges.extend(lines.iter().copied());
        }
        BoundaryMode::Punctuation => {
            for &(start, end) in &lines {
                split_on_terminators(&chars, start, end, &mut ranges);
            }
        }
        BoundaryMode::BlankLines { separator } => {
            let separator = separator.trim();
            let mut block: Option<(usize, usize)> = None;
            for &(start, end) in &lines {
                let line: String = chars[start..end].iter().collect();
                let line = line.trim();
                if line.is_empty() || (!separator.is_empty() && line == separator) {
                    ranges.extend(block.take());
                } else {
                    block = Some(match block {
                        Some((block_start, _)) => (block_start, end),
                        None => (start, end),
                    });
                }
            }
            ranges.extend(block);
        }
    }

    ranges
        .into_iter()
        .filter_map(|(start, end)| trim_range(&chars, start, end))
        .enumerate()
        .map(|(i, (start, end))| SentenceSpan::new(i + 1, start, end))
        .collect()
}

/// Character ranges of all lines, without line terminators.
fn line_ranges(chars: &[char]) -> Vec<(usize, usize)> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            let end = if i > start && chars[i - 1] == '\r' { i - 1 } else { i };
            lines.push((start, end));
            start = i + 1;
        }
    }
    if start < chars.len() {
        lines.push((start, chars.len()));
    }
    lines
}

/// Cut one line after terminator runs that are followed by whitespace or the
/// end of the line. Closing quotes and brackets stay with their sentence.
fn split_on_terminators(chars: &[char], start: usize, end: usize, out: &mut Vec<(usize, usize)>) {
    let mut sentence_start = start;
    let mut i = start;
    while i < end {
        if is_sentence_terminator(chars[i]) {
            let mut j = i + 1;
            while j < end && (is_sentence_terminator(chars[j]) || is_closing(chars[j])) {
                j += 1;
            }
            if j == end || is_whitespace(chars[j]) {
                out.push((sentence_start, j));
                sentence_start = j;
            }
            i = j;
        } else {
            i += 1;
        }
    }
    if sentence_start < end {
        out.push((sentence_start, end));
    }
}

fn is_closing(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | ')' | ']' | '}' | '\u{00BB}' | '\u{2019}' | '\u{201D}'
    )
}

/// Shrink a range to exclude surrounding whitespace; `None` when nothing
/// but whitespace remains.
fn trim_range(chars: &[char], start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &chars[start..end];
    let first = slice.iter().position(|&c| !is_whitespace(c))?;
    let last = slice.iter().rposition(|&c| !is_whitespace(c))?;
    Some((start + first, start + last + 1))
}
