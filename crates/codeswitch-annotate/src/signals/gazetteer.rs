// Gazetteer: entity recognition from a list of known names
//
// A token is flagged when it equals one piece of a listed name, so
// "Ahmet" and "Yılmaz" are both flagged for the entry "Ahmet Yılmaz".

use std::path::Path;

use codeswitch_core::token::Token;
use hashbrown::HashSet;

use super::{EntityRecognizer, UpstreamError};
use crate::tokenizer::tokenize;

#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    pieces: HashSet<String>,
}

impl Gazetteer {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut gazetteer = Self::default();
        for name in names {
            gazetteer.add(name.as_ref());
        }
        gazetteer
    }

    /// Add a name; its word pieces become entity tokens.
    pub fn add(&mut self, name: &str) {
        for token in tokenize(name) {
            if !token.char_class.is_non_linguistic() {
                self.pieces.insert(token.surface);
            }
        }
    }

    /// Load names from a file, one per line. Blank lines and `#` comments
    /// are skipped.
    pub fn from_path(path: &Path) -> Result<Self, UpstreamError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    pub fn contains(&self, surface: &str) -> bool {
        self.pieces.contains(surface)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl EntityRecognizer for Gazetteer {
    fn recognize(&self, sentence: &[Token]) -> Result<Vec<bool>, UpstreamError> {
        Ok(sentence.iter().map(|t| self.contains(&t.surface)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_pieces_of_names() {
        let gazetteer = Gazetteer::new(["Ahmet Y\u{0131}lmaz", "New York"]);
        let tokens = tokenize("Ahmet New York'a gitti");
        let flags = gazetteer.recognize(&tokens).unwrap();
        assert_eq!(flags, [true, true, false, false]);
    }

    #[test]
    fn match_is_case_sensitive() {
        let gazetteer = Gazetteer::new(["Ankara"]);
        assert!(gazetteer.contains("Ankara"));
        assert!(!gazetteer.contains("ankara"));
    }

    #[test]
    fn punctuation_in_names_is_not_an_entity() {
        let gazetteer = Gazetteer::new(["Dr. Who"]);
        assert!(gazetteer.contains("Dr"));
        assert!(!gazetteer.contains("."));
        assert_eq!(gazetteer.len(), 2);
    }

    #[test]
    fn loads_names_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# people\nAy\u{015F}e\n\nMehmet Can").unwrap();
        let gazetteer = Gazetteer::from_path(file.path()).unwrap();
        assert_eq!(gazetteer.len(), 3);
        assert!(gazetteer.contains("Can"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            Gazetteer::from_path(Path::new("/nonexistent/names.txt")),
            Err(UpstreamError::Io(_))
        ));
    }
}
