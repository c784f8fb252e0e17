// Token and sentence span types

use serde::{Deserialize, Serialize};

use crate::character::classify_surface;

// ---------------------------------------------------------------------------
// Character class
// ---------------------------------------------------------------------------

/// Character class of a token surface.
///
/// Derived once when the token is created, see
/// [`classify_surface`](crate::character::classify_surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharClass {
    Alphabetic,
    Numeric,
    Punctuation,
    /// URLs, mentions, hashtags, emoji and other symbol runs.
    Symbol,
    /// Letters from more than one writing system.
    MixedScript,
}

impl CharClass {
    /// Whether tokens of this class are labelled OTHER without consulting
    /// any language signal.
    pub fn is_non_linguistic(self) -> bool {
        matches!(
            self,
            CharClass::Numeric | CharClass::Punctuation | CharClass::Symbol
        )
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A token of the annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Ordinal of this token within the document.
    pub index: usize,
    /// Text as it appeared in the input.
    pub surface: String,
    pub char_class: CharClass,
    /// Character offset of the token within the document.
    pub pos: usize,
}

impl Token {
    /// Create a token, deriving its character class from the surface.
    pub fn new(index: usize, surface: impl Into<String>, pos: usize) -> Self {
        let surface = surface.into();
        let char_class = classify_surface(&surface);
        Self {
            index,
            surface,
            char_class,
            pos,
        }
    }

    /// Length of the surface in characters.
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}

// ---------------------------------------------------------------------------
// Sentence span
// ---------------------------------------------------------------------------

/// A sentence as a half-open range of character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentenceSpan {
    /// 1-based sentence number.
    pub id: usize,
    pub start: usize,
    pub end: usize,
}

impl SentenceSpan {
    pub fn new(id: usize, start: usize, end: usize) -> Self {
        Self { id, start, end }
    }

    pub fn char_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the character offset `pos` falls inside this span.
    pub fn contains(&self, pos: usize) -> bool {
        (self.start..self.end).contains(&pos)
    }
}
