// Declarative morphology shapes, deserialized from configuration files

use serde::{Deserialize, Serialize};

/// A suffix class as declared in configuration.
///
/// ```toml
/// [[classes]]
/// name = "CASE"
/// tag = "CASE"
/// next = []
/// accepting = true
/// ```
///
/// When `next` is omitted the class may be followed by every class declared
/// after it (canonical ordering), plus itself when `repeatable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSource {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub next: Option<Vec<String>>,
    #[serde(default)]
    pub accepting: bool,
    #[serde(default)]
    pub repeatable: bool,
    /// Whether the class may attach directly to the stem.
    #[serde(default = "default_initial")]
    pub initial: bool,
}

fn default_initial() -> bool {
    true
}

impl ClassSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            next: None,
            accepting: false,
            repeatable: false,
            initial: default_initial(),
        }
    }
}

/// A suffix as declared in configuration.
///
/// `alternatives` lists other glosses of an ambiguous suffix, e.g.
/// `gloss = "INS"` with `alternatives = ["COM"]`. The primary gloss is
/// always `gloss`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuffixSource {
    pub surface: String,
    pub class: String,
    #[serde(default)]
    pub gloss: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl SuffixSource {
    pub fn new(surface: impl Into<String>, class: impl Into<String>, gloss: Option<&str>) -> Self {
        Self {
            surface: surface.into(),
            class: class.into(),
            gloss: gloss.map(str::to_string),
            alternatives: Vec::new(),
        }
    }

    pub fn with_alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternatives = alternatives.into_iter().map(Into::into).collect();
        self
    }
}

/// Class and suffix declarations of one morphology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologySource {
    #[serde(default)]
    pub classes: Vec<ClassSource>,
    #[serde(default)]
    pub suffixes: Vec<SuffixSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_defaults() {
        let class: ClassSource = toml::from_str(r#"name = "PLURAL""#).unwrap();
        assert_eq!(class, ClassSource::new("PLURAL"));
        assert!(class.initial);
        assert!(class.next.is_none());
    }

    #[test]
    fn parses_classes_and_suffixes() {
        let src: MorphologySource = toml::from_str(
            r#"
            [[classes]]
            name = "PLURAL"
            accepting = true

            [[classes]]
            name = "CASE"
            tag = "CASE"
            next = []
            accepting = true

            [[suffixes]]
            surface = "lar"
            class = "PLURAL"
            gloss = "PL"

            [[suffixes]]
            surface = "dan"
            class = "CASE"
            "#,
        )
        .unwrap();
        assert_eq!(src.classes.len(), 2);
        assert_eq!(src.classes[1].next, Some(Vec::new()));
        assert_eq!(src.suffixes[0], SuffixSource::new("lar", "PLURAL", Some("PL")));
        assert_eq!(src.suffixes[1].gloss, None);
    }

    #[test]
    fn suffix_alternatives_are_optional() {
        let suffix: SuffixSource = toml::from_str(
            r#"
            surface = "la"
            class = "CASE"
            gloss = "INS"
            alternatives = ["COM"]
            "#,
        )
        .unwrap();
        assert_eq!(
            suffix,
            SuffixSource::new("la", "CASE", Some("INS")).with_alternatives(["COM"])
        );
    }

    #[test]
    fn rejects_unknown_class_field() {
        let result: Result<ClassSource, _> = toml::from_str(
            r#"
            name = "CASE"
            acepting = true
            "#,
        );
        assert!(result.is_err());
    }
}
