// Records persisted by callers: one per token, one per sentence

use serde::{Deserialize, Serialize};

use crate::label::{Label, Language, MatrixLanguage};

/// Annotation of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Ordinal of the token in the document.
    pub ordinal: usize,
    pub surface: String,
    pub label: Label,
    /// Leipzig-style gloss, present only on MIXED tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
}

/// Matrix/embedded language summary of a sentence.
///
/// `matrix_language` is `None` when undefined; `tie` marks sentences where
/// both languages had the same non-zero count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub sentence_id: usize,
    pub matrix_language: Option<Language>,
    pub embedded_language: Option<Language>,
    #[serde(default)]
    pub tie: bool,
}

impl SentenceRecord {
    pub fn new(
        sentence_id: usize,
        matrix: MatrixLanguage,
        embedded_language: Option<Language>,
    ) -> Self {
        Self {
            sentence_id,
            matrix_language: matrix.language(),
            embedded_language,
            tie: matrix.is_tie(),
        }
    }

    /// Rebuild the matrix outcome from the persisted fields.
    pub fn matrix(&self) -> MatrixLanguage {
        match (self.matrix_language, self.tie) {
            (Some(language), _) => MatrixLanguage::Dominant(language),
            (None, true) => MatrixLanguage::Tie,
            (None, false) => MatrixLanguage::Undefined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_record_omits_missing_gloss() {
        let record = TokenRecord {
            ordinal: 3,
            surface: "toplant\u{0131}".to_string(),
            label: Label::L1,
            gloss: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("gloss"));
        assert!(json.contains("\"L1\""));
    }

    #[test]
    fn token_record_with_gloss_deserializes() {
        let json = r#"{"ordinal":1,"surface":"meetingden","label":"MIXED","gloss":"meeting-ABL"}"#;
        let record: TokenRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.label, Label::Mixed);
        assert_eq!(record.gloss.as_deref(), Some("meeting-ABL"));
    }

    #[test]
    fn sentence_record_keeps_tie() {
        let record = SentenceRecord::new(2, MatrixLanguage::Tie, None);
        assert_eq!(record.matrix_language, None);
        assert!(record.tie);
        assert_eq!(record.matrix(), MatrixLanguage::Tie);
    }

    #[test]
    fn sentence_record_dominant() {
        let record = SentenceRecord::new(
            1,
            MatrixLanguage::Dominant(Language::L1),
            Some(Language::L2),
        );
        assert_eq!(record.matrix(), MatrixLanguage::Dominant(Language::L1));
        assert_eq!(record.embedded_language, Some(Language::L2));
        assert_eq!(
            SentenceRecord::new(3, MatrixLanguage::Undefined, None).matrix(),
            MatrixLanguage::Undefined
        );
    }
}
