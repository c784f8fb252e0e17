// Shared enums: Label, Language, MatrixLanguage

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// One of the two languages of a bilingual text.
///
/// `L1` is the native (matrix-candidate) language whose suffixes are licensed
/// by the morphotactics; `L2` is the foreign language whose stems may carry
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    L1,
    L2,
}

impl Language {
    /// The other member of {L1, L2}.
    pub fn other(self) -> Self {
        match self {
            Language::L1 => Language::L2,
            Language::L2 => Language::L1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::L1 => "L1",
            Language::L2 => "L2",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Token label assigned by the decision engine.
///
/// Every token receives exactly one label; `Uid` is the terminal fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    /// Native-language word.
    L1,
    /// Foreign-language word.
    L2,
    /// Foreign stem carrying native suffixes (intra-word code-switch).
    Mixed,
    /// Unidentified.
    Uid,
    /// Named entity.
    Ne,
    /// Word from a third language.
    Lang3,
    /// Number, punctuation or symbol.
    Other,
}

impl Label {
    /// All labels, in decision-priority order of the rules that produce them.
    pub const ALL: [Label; 7] = [
        Label::Other,
        Label::Ne,
        Label::L1,
        Label::L2,
        Label::Mixed,
        Label::Lang3,
        Label::Uid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::L1 => "L1",
            Label::L2 => "L2",
            Label::Mixed => "MIXED",
            Label::Uid => "UID",
            Label::Ne => "NE",
            Label::Lang3 => "LANG3",
            Label::Other => "OTHER",
        }
    }

    /// The language a strict L1/L2 label counts towards, if any.
    pub fn language(self) -> Option<Language> {
        match self {
            Label::L1 => Some(Language::L1),
            Label::L2 => Some(Language::L2),
            Label::Mixed | Label::Uid | Label::Ne | Label::Lang3 | Label::Other => None,
        }
    }
}

impl From<Language> for Label {
    fn from(language: Language) -> Self {
        match language {
            Language::L1 => Label::L1,
            Language::L2 => Label::L2,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the seven label names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L1" => Ok(Label::L1),
            "L2" => Ok(Label::L2),
            "MIXED" => Ok(Label::Mixed),
            "UID" => Ok(Label::Uid),
            "NE" => Ok(Label::Ne),
            "LANG3" => Ok(Label::Lang3),
            "OTHER" => Ok(Label::Other),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Matrix language outcome
// ---------------------------------------------------------------------------

/// Matrix (dominant) language of a sentence.
///
/// `Tie` is a valid linguistic outcome that needs human judgment: both
/// languages have the same non-zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixLanguage {
    Dominant(Language),
    Tie,
    Undefined,
}

impl MatrixLanguage {
    /// The dominant language, if one was found.
    pub fn language(self) -> Option<Language> {
        match self {
            MatrixLanguage::Dominant(language) => Some(language),
            MatrixLanguage::Tie | MatrixLanguage::Undefined => None,
        }
    }

    pub fn is_tie(self) -> bool {
        self == MatrixLanguage::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_other_is_involution() {
        assert_eq!(Language::L1.other(), Language::L2);
        assert_eq!(Language::L2.other(), Language::L1);
        assert_eq!(Language::L1.other().other(), Language::L1);
    }

    #[test]
    fn label_names_round_trip_through_from_str() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>(), Ok(label));
        }
    }

    #[test]
    fn label_from_str_is_case_insensitive() {
        assert_eq!("mixed".parse::<Label>(), Ok(Label::Mixed));
        assert_eq!(" lang3 ".parse::<Label>(), Ok(Label::Lang3));
    }

    #[test]
    fn label_from_str_rejects_unknown() {
        assert_eq!(
            "TR".parse::<Label>(),
            Err(UnknownLabel("TR".to_string()))
        );
    }

    #[test]
    fn only_strict_labels_have_a_language() {
        let with_language: Vec<Label> = Label::ALL
            .into_iter()
            .filter(|l| l.language().is_some())
            .collect();
        assert_eq!(with_language.len(), 2);
        assert_eq!(Label::L1.language(), Some(Language::L1));
        assert_eq!(Label::L2.language(), Some(Language::L2));
        assert_eq!(Label::Mixed.language(), None);
    }

    #[test]
    fn label_serializes_uppercase() {
        let json = serde_json::to_string(&Label::Mixed).unwrap();
        assert_eq!(json, "\"MIXED\"");
        let back: Label = serde_json::from_str("\"LANG3\"").unwrap();
        assert_eq!(back, Label::Lang3);
    }

    #[test]
    fn matrix_language_accessors() {
        assert_eq!(
            MatrixLanguage::Dominant(Language::L2).language(),
            Some(Language::L2)
        );
        assert_eq!(MatrixLanguage::Tie.language(), None);
        assert!(MatrixLanguage::Tie.is_tie());
        assert!(!MatrixLanguage::Undefined.is_tie());
    }
}
