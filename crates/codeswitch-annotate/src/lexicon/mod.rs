// Lexicon store: case-folded word sets for L1 and L2 plus the suffix morphology
//
// Lookups are exact matches after simple per-character lowercasing;
// diacritics are preserved. A missing word list never fails: it leaves the
// set empty and every lookup returns false.

use std::path::Path;

use codeswitch_core::character::fold_case;
use codeswitch_core::label::Language;
use codeswitch_morph::{ClassId, Morphology, SuffixEntry};
use hashbrown::HashSet;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Word sets
// ---------------------------------------------------------------------------

/// A set of case-folded word forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for word in words {
            set.insert(word.as_ref());
        }
        set
    }

    /// Insert a word. Blank words are ignored. Returns whether the word was
    /// newly added.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(fold_case(word))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(fold_case(word).as_str())
    }

    /// Lookup for a word that is already case-folded.
    pub fn contains_folded(&self, folded: &str) -> bool {
        self.words.contains(folded)
    }

    /// Add every word of a word list (see [`parse_word_list`]). Returns the
    /// number of new words.
    pub fn extend_from_list(&mut self, text: &str) -> usize {
        parse_word_list(text).filter(|w| self.insert(w)).count()
    }

    /// Add the words of a word-list file. An unreadable file is logged and
    /// contributes nothing.
    pub fn load_file(&mut self, path: &Path) -> usize {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let added = self.extend_from_list(&text);
                debug!(path = %path.display(), added, "word list loaded");
                added
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "word list unavailable, skipping");
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// Number of words present in both sets.
    pub fn overlap(&self, other: &WordSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.words.iter().filter(|w| large.words.contains(*w)).count()
    }
}

/// Words of a word list: the first whitespace-separated field of each line.
/// Blank lines and lines starting with `#` are skipped, so frequency lists
/// (`word count`) load as plain word lists.
pub fn parse_word_list(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
}

// ---------------------------------------------------------------------------
// LexiconStore
// ---------------------------------------------------------------------------

/// Word sets of both languages and the native-language morphology.
///
/// Static after construction.
#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    l1: WordSet,
    l2: WordSet,
    morphology: Morphology,
}

impl LexiconStore {
    pub fn new(l1: WordSet, l2: WordSet, morphology: Morphology) -> Self {
        let overlap = l1.overlap(&l2);
        if overlap > 0 {
            debug!(overlap, "words present in both lexicons");
        }
        Self { l1, l2, morphology }
    }

    /// Case-folded exact membership test.
    pub fn contains(&self, word: &str, language: Language) -> bool {
        self.words(language).contains(word)
    }

    pub fn contains_folded(&self, folded: &str, language: Language) -> bool {
        self.words(language).contains_folded(folded)
    }

    pub fn words(&self, language: Language) -> &WordSet {
        match language {
            Language::L1 => &self.l1,
            Language::L2 => &self.l2,
        }
    }

    /// First declared class of a suffix surface.
    pub fn suffix_class(&self, surface: &str) -> Option<ClassId> {
        self.morphology.inventory().first_class(surface)
    }

    /// Every inventory entry for a suffix surface, in declaration order.
    pub fn suffix_entries<'a>(&'a self, surface: &'a str) -> impl Iterator<Item = &'a SuffixEntry> + 'a {
        self.morphology.inventory().entries_for(surface)
    }

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }
}
