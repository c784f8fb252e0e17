// Tokenizer: words, numbers, URLs, e-mail addresses, mentions and punctuation
//
// Positions are character offsets into the text. Whitespace is skipped; every
// other character belongs to exactly one token.

mod sentence;

pub use sentence::{BoundaryMode, DEFAULT_SEPARATOR, split_sentences};

use codeswitch_core::character::{CharType, get_char_type, is_apostrophe, is_emoji};
use codeswitch_core::token::Token;

// ============================================================================
// URL / e-mail detection
// ============================================================================

/// Characters allowed inside e-mail addresses besides letters and digits.
fn is_email_char(c: char) -> bool {
    matches!(
        c,
        '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '=' | '?' | '^' | '_' | '`'
            | '{' | '|' | '}' | '~' | '.'
    )
}

/// Characters that end a URL when they are its last character.
fn is_url_trailer(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']' | '"' | '\'' | '\u{2019}' | '\u{201D}'
    )
}

fn starts_with_ignore_case(text: &[char], prefix: &str) -> bool {
    let mut chars = text.iter();
    prefix
        .chars()
        .all(|p| chars.next().is_some_and(|c| c.to_ascii_lowercase() == p))
}

/// Length of a URL (`http://`, `https://`, `www.`) at the start of `text`,
/// or 0. Trailing sentence punctuation is not part of the URL.
fn find_url(text: &[char]) -> usize {
    let prefix_len = if starts_with_ignore_case(text, "https://") {
        8
    } else if starts_with_ignore_case(text, "http://") {
        7
    } else if starts_with_ignore_case(text, "www.") {
        4
    } else {
        return 0;
    };
    let mut len = text
        .iter()
        .position(|&c| get_char_type(c) == CharType::Whitespace)
        .unwrap_or(text.len());
    while len > prefix_len && is_url_trailer(text[len - 1]) {
        len -= 1;
    }
    if len == prefix_len { 0 } else { len }
}

/// Length of an e-mail address at the start of `text`, or 0.
///
/// Requires one `@` followed by a domain containing a dot that is neither
/// first nor last.
fn find_email(text: &[char]) -> usize {
    let end = text
        .iter()
        .position(|&c| !(c.is_alphanumeric() || c == '@' || is_email_char(c)))
        .unwrap_or(text.len());
    let mut candidate = &text[..end];
    while let Some((&last, rest)) = candidate.split_last() {
        if is_url_trailer(last) {
            candidate = rest;
        } else {
            break;
        }
    }
    let Some(at) = candidate.iter().position(|&c| c == '@') else {
        return 0;
    };
    let domain = &candidate[at + 1..];
    let valid = at > 0
        && !domain.contains(&'@')
        && domain
            .iter()
            .skip(1)
            .take(domain.len().saturating_sub(2))
            .any(|&c| c == '.')
        && domain.iter().all(|&c| c.is_alphanumeric() || c == '.' || c == '-');
    if valid { candidate.len() } else { 0 }
}

// ============================================================================
// Word length detection
// ============================================================================

/// Length of a word or number token starting at the beginning of `text`.
///
/// Apostrophes and hyphens stay inside a word when a letter (or, for
/// hyphens, a digit) follows. `.`, `,`, `:` and `/` stay inside a number
/// when a digit follows.
fn word_length(text: &[char]) -> usize {
    let textlen = text.len();
    let mut wlen = 0;
    let mut processing_number = false;

    while wlen < textlen {
        let c = text[wlen];
        match get_char_type(c) {
            CharType::Letter => {
                processing_number = false;
                wlen += 1;
            }
            CharType::Digit => {
                processing_number = wlen == 0 || processing_number;
                wlen += 1;
            }
            CharType::Whitespace | CharType::Symbol => return wlen,
            CharType::Punctuation => {
                let next = text.get(wlen + 1).map(|&n| get_char_type(n));
                let continues = if is_apostrophe(c) {
                    next == Some(CharType::Letter)
                } else if matches!(c, '-' | '\u{2010}' | '\u{2011}') {
                    matches!(next, Some(CharType::Letter | CharType::Digit))
                } else if matches!(c, '.' | ',' | ':' | '/') {
                    processing_number && next == Some(CharType::Digit)
                } else {
                    false
                };
                if !continues {
                    return wlen;
                }
                wlen += 1;
            }
        }
    }
    textlen
}

// ============================================================================
// Public tokenizer API
// ============================================================================

/// Kind of the raw token found at a position. Only used to skip whitespace;
/// the character class of a kept token is derived from its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawKind {
    Whitespace,
    Text,
}

/// Find the raw token at the beginning of `text`: `(kind, length)`.
fn next_raw_token(text: &[char]) -> (RawKind, usize) {
    let Some(&first) = text.first() else {
        return (RawKind::Whitespace, 0);
    };

    match get_char_type(first) {
        CharType::Whitespace => {
            let len = text
                .iter()
                .position(|&c| get_char_type(c) != CharType::Whitespace)
                .unwrap_or(text.len());
            (RawKind::Whitespace, len)
        }
        CharType::Letter | CharType::Digit => {
            let url = find_url(text);
            if url > 0 {
                return (RawKind::Text, url);
            }
            let email = find_email(text);
            if email > 0 {
                return (RawKind::Text, email);
            }
            (RawKind::Text, word_length(text))
        }
        CharType::Punctuation => {
            // "..." is one token, any other punctuation character stands alone.
            if first == '.' {
                let dots = text.iter().take_while(|&&c| c == '.').count();
                return (RawKind::Text, dots);
            }
            (RawKind::Text, 1)
        }
        CharType::Symbol => {
            if matches!(first, '@' | '#') {
                let body = text[1..]
                    .iter()
                    .take_while(|&&c| c.is_alphanumeric() || c == '_')
                    .count();
                if body > 0 {
                    return (RawKind::Text, 1 + body);
                }
            }
            if is_emoji(first) {
                let len = text
                    .iter()
                    .take_while(|&&c| is_emoji(c) || c == '\u{FE0F}' || c == '\u{200D}')
                    .count();
                return (RawKind::Text, len.max(1));
            }
            let len = text
                .iter()
                .take_while(|&&c| get_char_type(c) == CharType::Symbol && !is_emoji(c))
                .count();
            (RawKind::Text, len.max(1))
        }
    }
}

/// Tokenize `text[start..end]` (character offsets). Token ordinals start at
/// `first_index`, positions are offsets into `text`.
pub fn tokenize_range(text: &[char], start: usize, end: usize, first_index: usize) -> Vec<Token> {
    let end = end.min(text.len());
    let mut tokens = Vec::new();
    let mut pos = start.min(end);
    while pos < end {
        let (kind, len) = next_raw_token(&text[pos..end]);
        let len = len.max(1);
        if kind == RawKind::Text {
            let surface: String = text[pos..pos + len].iter().collect();
            tokens.push(Token::new(first_index + tokens.len(), surface, pos));
        }
        pos += len;
    }
    tokens
}

/// Tokenize a whole text.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    tokenize_range(&chars, 0, chars.len(), 0)
}

// ============================================================================
// Tests
// ============================================================================
