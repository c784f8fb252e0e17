// Character classification, writing-system detection and case folding

use serde::{Deserialize, Serialize};

use crate::token::CharClass;

// ---------------------------------------------------------------------------
// Character type classification
// ---------------------------------------------------------------------------

/// Character type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Letter,
    Digit,
    Whitespace,
    Punctuation,
    Symbol,
}

/// Returns the character type for a given character.
///
/// Letters and digits follow the Unicode alphabetic/numeric properties, so
/// a Cyrillic or Han character is a letter just like a Latin one. Everything
/// that is neither whitespace nor recognized punctuation is a symbol.
pub fn get_char_type(c: char) -> CharType {
    if is_whitespace(c) {
        return CharType::Whitespace;
    }
    if c.is_alphabetic() {
        return CharType::Letter;
    }
    if c.is_numeric() {
        return CharType::Digit;
    }
    if is_punctuation_char(c) {
        return CharType::Punctuation;
    }
    CharType::Symbol
}

/// Check whether a character is punctuation (sentence and phrase marks,
/// brackets, dashes and quotation marks).
pub fn is_punctuation_char(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | ';'
            | ':'
            | '!'
            | '?'
            | '\''
            | '"'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '/'
            | '-'
            | '\u{00A1}' // INVERTED EXCLAMATION MARK
            | '\u{00AB}' // LEFT-POINTING DOUBLE ANGLE QUOTATION MARK
            | '\u{00AD}' // SOFT HYPHEN
            | '\u{00B7}' // MIDDLE DOT
            | '\u{00BB}' // RIGHT-POINTING DOUBLE ANGLE QUOTATION MARK
            | '\u{00BF}' // INVERTED QUESTION MARK
            | '\u{2010}' // HYPHEN
            | '\u{2011}' // NON-BREAKING HYPHEN
            | '\u{2013}' // EN DASH
            | '\u{2014}' // EM DASH
            | '\u{2018}' // LEFT SINGLE QUOTATION MARK
            | '\u{2019}' // RIGHT SINGLE QUOTATION MARK
            | '\u{201C}' // LEFT DOUBLE QUOTATION MARK
            | '\u{201D}' // RIGHT DOUBLE QUOTATION MARK
            | '\u{201E}' // DOUBLE LOW-9 QUOTATION MARK
            | '\u{2026}' // HORIZONTAL ELLIPSIS
    )
}

/// Check whether a character is an apostrophe that may join a stem to a suffix
/// (`scroll'u`, `meeting’e`).
pub fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{02BC}')
}

/// Check whether a character terminates a sentence.
pub fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\u{2026}')
}

/// Check whether a character is a whitespace character.
pub fn is_whitespace(c: char) -> bool {
    let cp = c as u32;
    (0x09..=0x0D).contains(&cp)
        || cp == 0x20
        || cp == 0x85
        || cp == 0xA0
        || cp == 0x1680
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x2028
        || cp == 0x2029
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
}

/// Check whether a character is an emoji, pictograph or emoji modifier.
pub fn is_emoji(c: char) -> bool {
    if c.is_alphabetic() {
        return false;
    }
    let cp = c as u32;
    cp >= 0x1F000
        || (0x2600..=0x27BF).contains(&cp)
        || cp == 0x200D // ZERO WIDTH JOINER
        || cp == 0xFE0F // VARIATION SELECTOR-16
}

// ---------------------------------------------------------------------------
// Writing systems
// ---------------------------------------------------------------------------

/// Writing system of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Arabic,
    Hebrew,
    Devanagari,
    Cjk,
    Hangul,
    Other,
}

/// Returns the writing system of a letter, or `None` for non-letters.
pub fn script_of(c: char) -> Option<Script> {
    if !c.is_alphabetic() {
        return None;
    }
    let cp = c as u32;
    let script = if c.is_ascii_alphabetic()
        || (0x00C0..=0x024F).contains(&cp)
        || (0x1E00..=0x1EFF).contains(&cp)
        || (0x2C60..=0x2C7F).contains(&cp)
        || (0xA720..=0xA7FF).contains(&cp)
        || (0xFB00..=0xFB06).contains(&cp)
        || cp == 0xAA
        || cp == 0xBA
    {
        Script::Latin
    } else if (0x0370..=0x03FF).contains(&cp) || (0x1F00..=0x1FFF).contains(&cp) {
        Script::Greek
    } else if (0x0400..=0x052F).contains(&cp)
        || (0x2DE0..=0x2DFF).contains(&cp)
        || (0xA640..=0xA69F).contains(&cp)
    {
        Script::Cyrillic
    } else if (0x0590..=0x05FF).contains(&cp) || (0xFB1D..=0xFB4F).contains(&cp) {
        Script::Hebrew
    } else if (0x0600..=0x06FF).contains(&cp)
        || (0x0750..=0x077F).contains(&cp)
        || (0x08A0..=0x08FF).contains(&cp)
        || (0xFB50..=0xFDFF).contains(&cp)
        || (0xFE70..=0xFEFF).contains(&cp)
    {
        Script::Arabic
    } else if (0x0900..=0x097F).contains(&cp) {
        Script::Devanagari
    } else if (0x1100..=0x11FF).contains(&cp)
        || (0x3130..=0x318F).contains(&cp)
        || (0xAC00..=0xD7AF).contains(&cp)
    {
        Script::Hangul
    } else if (0x3040..=0x30FF).contains(&cp)
        || (0x3400..=0x4DBF).contains(&cp)
        || (0x4E00..=0x9FFF).contains(&cp)
        || (0xF900..=0xFAFF).contains(&cp)
        || (0x20000..=0x2FA1F).contains(&cp)
    {
        Script::Cjk
    } else {
        Script::Other
    };
    Some(script)
}

/// Distinct writing systems used by the letters of `text`, in order of first
/// appearance.
pub fn scripts_in(text: &str) -> Vec<Script> {
    let mut scripts = Vec::new();
    for script in text.chars().filter_map(script_of) {
        if !scripts.contains(&script) {
            scripts.push(script);
        }
    }
    scripts
}

// ---------------------------------------------------------------------------
// Token surface classification
// ---------------------------------------------------------------------------

/// Check whether a surface looks like a URL.
pub fn is_url(surface: &str) -> bool {
    let lower = surface.to_ascii_lowercase();
    (lower.starts_with("http://") && lower.len() > 7)
        || (lower.starts_with("https://") && lower.len() > 8)
        || (lower.starts_with("www.") && lower.len() > 4)
}

/// Check whether a surface is a social-media `@mention` or `#hashtag`.
pub fn is_mention_or_hashtag(surface: &str) -> bool {
    let mut chars = surface.chars();
    match chars.next() {
        Some('@') | Some('#') => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Check whether a surface is a number: digit groups separated by single
/// `.`, `,`, `:`, `/` or `-` (`2024`, `3.14`, `10:30`, `01/02/2024`).
pub fn is_numeric_token(surface: &str) -> bool {
    let mut saw_digit = false;
    let mut previous_was_separator = true;
    for c in surface.chars() {
        if c.is_numeric() {
            saw_digit = true;
            previous_was_separator = false;
        } else if matches!(c, '.' | ',' | ':' | '/' | '-') {
            if previous_was_separator {
                return false;
            }
            previous_was_separator = true;
        } else {
            return false;
        }
    }
    saw_digit && !previous_was_separator
}

/// Derive the character class of a token surface.
///
/// URLs, mentions, hashtags and anything containing an emoji are symbols.
/// A token with letters from more than one writing system is mixed-script.
pub fn classify_surface(surface: &str) -> CharClass {
    if surface.is_empty() {
        return CharClass::Symbol;
    }
    if is_url(surface) || is_mention_or_hashtag(surface) || surface.chars().any(is_emoji) {
        return CharClass::Symbol;
    }
    if is_numeric_token(surface) {
        return CharClass::Numeric;
    }

    let mut has_letter = false;
    let mut has_digit = false;
    let mut all_punctuation = true;
    for c in surface.chars() {
        match get_char_type(c) {
            CharType::Letter => has_letter = true,
            CharType::Digit => has_digit = true,
            CharType::Punctuation => continue,
            CharType::Whitespace | CharType::Symbol => {}
        }
        all_punctuation = false;
    }

    if !has_letter {
        return if all_punctuation {
            CharClass::Punctuation
        } else if has_digit {
            CharClass::Numeric
        } else {
            CharClass::Symbol
        };
    }
    if scripts_in(surface).len() > 1 {
        CharClass::MixedScript
    } else {
        CharClass::Alphabetic
    }
}

// ---------------------------------------------------------------------------
// Case folding
// ---------------------------------------------------------------------------

/// Convert a character to its simple lowercase equivalent.
///
/// For characters with multi-character lowercase expansions only the first
/// character is kept, so folding never changes the character count.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Fold a single character for lexicon lookup: simple lowercase, with
/// typographic apostrophes mapped to `'`. Diacritics are preserved.
///
/// Folding is language-neutral: `I` folds to `i` so English capitals match,
/// and dotted `İ` folds to `i`. Dotless `ı` is already lowercase and stays.
pub fn fold_char(c: char) -> char {
    match c {
        c if is_apostrophe(c) => '\'',
        '\u{0130}' => 'i',
        c => simple_lower(c),
    }
}

/// Fold a word for lexicon lookup. The result has exactly as many characters
/// as the input.
pub fn fold_case(word: &str) -> String {
    word.chars().map(fold_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_type_letters_in_any_script() {
        assert_eq!(get_char_type('A'), CharType::Letter);
        assert_eq!(get_char_type('\u{0131}'), CharType::Letter); // ı
        assert_eq!(get_char_type('\u{0416}'), CharType::Letter); // Ж
        assert_eq!(get_char_type('\u{4E2D}'), CharType::Letter); // 中
    }

    #[test]
    fn char_type_digits_whitespace_punctuation() {
        assert_eq!(get_char_type('7'), CharType::Digit);
        assert_eq!(get_char_type('\t'), CharType::Whitespace);
        assert_eq!(get_char_type('\u{3000}'), CharType::Whitespace);
        assert_eq!(get_char_type('?'), CharType::Punctuation);
        assert_eq!(get_char_type('\u{2026}'), CharType::Punctuation);
        assert_eq!(get_char_type('\u{00AB}'), CharType::Punctuation);
    }

    #[test]
    fn char_type_symbols() {
        assert_eq!(get_char_type('@'), CharType::Symbol);
        assert_eq!(get_char_type('%'), CharType::Symbol);
        assert_eq!(get_char_type('+'), CharType::Symbol);
    }

    #[test]
    fn apostrophes() {
        assert!(is_apostrophe('\''));
        assert!(is_apostrophe('\u{2019}'));
        assert!(!is_apostrophe('"'));
    }

    #[test]
    fn scripts() {
        assert_eq!(script_of('a'), Some(Script::Latin));
        assert_eq!(script_of('\u{011F}'), Some(Script::Latin)); // ğ
        assert_eq!(script_of('\u{03B1}'), Some(Script::Greek));
        assert_eq!(script_of('\u{0434}'), Some(Script::Cyrillic));
        assert_eq!(script_of('\u{0645}'), Some(Script::Arabic));
        assert_eq!(script_of('\u{AC00}'), Some(Script::Hangul));
        assert_eq!(script_of('1'), None);
    }

    #[test]
    fn scripts_in_keeps_first_appearance_order() {
        assert_eq!(scripts_in("abc"), vec![Script::Latin]);
        assert_eq!(
            scripts_in("\u{0434}a\u{0434}"),
            vec![Script::Cyrillic, Script::Latin]
        );
        assert!(scripts_in("123").is_empty());
    }

    #[test]
    fn numeric_tokens() {
        assert!(is_numeric_token("2024"));
        assert!(is_numeric_token("3.14"));
        assert!(is_numeric_token("10:30"));
        assert!(is_numeric_token("01/02/2024"));
        assert!(!is_numeric_token("3."));
        assert!(!is_numeric_token(".5"));
        assert!(!is_numeric_token("1..2"));
        assert!(!is_numeric_token("12a"));
        assert!(!is_numeric_token(""));
    }

    #[test]
    fn urls_mentions_hashtags() {
        assert!(is_url("https://example.com"));
        assert!(is_url("WWW.example.org"));
        assert!(!is_url("www."));
        assert!(is_mention_or_hashtag("@kullanici"));
        assert!(is_mention_or_hashtag("#toplanti_2024"));
        assert!(!is_mention_or_hashtag("#"));
        assert!(!is_mention_or_hashtag("a#b"));
    }

    #[test]
    fn classify_surfaces() {
        assert_eq!(classify_surface("2024"), CharClass::Numeric);
        assert_eq!(classify_surface("-5"), CharClass::Numeric);
        assert_eq!(classify_surface("..."), CharClass::Punctuation);
        assert_eq!(classify_surface("\u{201C}"), CharClass::Punctuation);
        assert_eq!(classify_surface("%&"), CharClass::Symbol);
        assert_eq!(classify_surface("https://x.io"), CharClass::Symbol);
        assert_eq!(classify_surface("@ali"), CharClass::Symbol);
        assert_eq!(classify_surface("ok\u{1F600}"), CharClass::Symbol);
        assert_eq!(classify_surface("toplant\u{0131}"), CharClass::Alphabetic);
        assert_eq!(classify_surface("scroll'u"), CharClass::Alphabetic);
        assert_eq!(classify_surface("\u{0434}om"), CharClass::MixedScript);
        assert_eq!(classify_surface(""), CharClass::Symbol);
    }

    #[test]
    fn fold_preserves_diacritics_and_length() {
        assert_eq!(fold_case("\u{00C7}ALI\u{015E}MA"), "\u{00E7}ali\u{015F}ma");
        assert_eq!(fold_case("Meeting\u{2019}E"), "meeting'e");
        // U+0130 lowercases to two characters but folds to one.
        let folded = fold_case("\u{0130}stanbul");
        assert_eq!(folded.chars().count(), "\u{0130}stanbul".chars().count());
        assert!(folded.ends_with("stanbul"));
    }

    #[test]
    fn fold_dotted_and_dotless_i() {
        assert_eq!(fold_char('\u{0130}'), 'i');
        assert_eq!(fold_char('I'), 'i');
        assert_eq!(fold_char('\u{0131}'), '\u{0131}');
        assert_eq!(fold_case("\u{0130}stanbul"), "istanbul");
        assert_eq!(fold_case("IT"), "it");
    }

    #[test]
    fn whitespace_chars() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\n'));
        assert!(is_whitespace('\u{00A0}'));
        assert!(!is_whitespace('a'));
    }

    #[test]
    fn emoji() {
        assert!(is_emoji('\u{1F600}'));
        assert!(is_emoji('\u{2764}'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('\u{4E2D}'));
    }
}
