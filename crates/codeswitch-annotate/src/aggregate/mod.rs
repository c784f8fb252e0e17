// Sentence aggregation: matrix and embedded language from strict L1/L2 counts
//
// Only L1 and L2 labels are counted. MIXED, UID, NE, LANG3 and OTHER tokens
// never contribute, not even partially.

use codeswitch_core::label::{Label, Language, MatrixLanguage};
use serde::Serialize;

/// Label counts of one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LanguageCounts {
    pub l1: usize,
    pub l2: usize,
    /// Tokens with any label other than L1 or L2.
    pub excluded: usize,
}

impl LanguageCounts {
    pub fn total(&self) -> usize {
        self.l1 + self.l2 + self.excluded
    }

    pub fn count(&self, language: Language) -> usize {
        match language {
            Language::L1 => self.l1,
            Language::L2 => self.l2,
        }
    }
}

/// Resolved languages of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentenceLanguages {
    pub matrix: MatrixLanguage,
    /// `None` when undefined, including on a tie.
    pub embedded: Option<Language>,
    pub counts: LanguageCounts,
}

impl SentenceLanguages {
    /// Resolve counts into matrix and embedded languages.
    pub fn from_counts(counts: LanguageCounts) -> Self {
        let matrix = match (counts.l1, counts.l2) {
            (0, 0) => MatrixLanguage::Undefined,
            (l1, l2) if l1 == l2 => MatrixLanguage::Tie,
            (l1, l2) if l1 > l2 => MatrixLanguage::Dominant(Language::L1),
            _ => MatrixLanguage::Dominant(Language::L2),
        };
        let embedded = matrix
            .language()
            .map(Language::other)
            .filter(|&other| counts.count(other) > 0);
        Self {
            matrix,
            embedded,
            counts,
        }
    }
}

/// Accumulates the labels of one sentence.
///
/// Pushing is the accumulating state; [`resolve`](Self::resolve) consumes
/// the aggregator, so a resolved sentence cannot take more labels.
#[derive(Debug, Clone, Default)]
pub struct SentenceAggregator {
    counts: LanguageCounts,
}

impl SentenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: Label) {
        match label.language() {
            Some(Language::L1) => self.counts.l1 += 1,
            Some(Language::L2) => self.counts.l2 += 1,
            None => self.counts.excluded += 1,
        }
    }

    pub fn counts(&self) -> LanguageCounts {
        self.counts
    }

    pub fn resolve(self) -> SentenceLanguages {
        SentenceLanguages::from_counts(self.counts)
    }
}

impl Extend<Label> for SentenceAggregator {
    fn extend<T: IntoIterator<Item = Label>>(&mut self, iter: T) {
        for label in iter {
            self.push(label);
        }
    }
}

/// Aggregate the labels of one sentence.
pub fn aggregate<I>(labels: I) -> SentenceLanguages
where
    I: IntoIterator<Item = Label>,
{
    let mut aggregator = SentenceAggregator::new();
    aggregator.extend(labels);
    aggregator.resolve()
}
