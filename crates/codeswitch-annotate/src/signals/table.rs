// Precomputed per-surface signals loaded from a delimited file
//
//   token   p_l1   [p_l2]   [ne]
//
// Tab-separated when the header line contains a tab, comma-separated
// otherwise. Surfaces are matched case-folded; a missing `p_l2` column means
// `1 - p_l1`, a missing `ne` column means no entities.

use std::io::Read;
use std::path::Path;

use codeswitch_core::character::fold_case;
use codeswitch_core::signal::LidResult;
use codeswitch_core::token::Token;
use csv::StringRecord;
use hashbrown::HashMap;
use tracing::info;

use super::{EntityRecognizer, LanguageIdentifier, UpstreamError};

#[derive(Debug, Clone, Copy)]
struct Entry {
    lid: LidResult,
    ne: bool,
}

/// Lookup table of language probabilities and entity flags.
#[derive(Debug, Clone, Default)]
pub struct SignalTable {
    entries: HashMap<String, Entry>,
}

/// Column positions resolved from the header row.
struct Columns {
    token: usize,
    p_l1: usize,
    p_l2: Option<usize>,
    ne: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, UpstreamError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            position(name).ok_or_else(|| UpstreamError::Row {
                row: 1,
                message: format!("missing column '{name}'"),
            })
        };
        Ok(Self {
            token: required("token")?,
            p_l1: required("p_l1")?,
            p_l2: position("p_l2"),
            ne: position("ne"),
        })
    }
}

fn parse_probability(value: &str, row: usize, column: &str) -> Result<f64, UpstreamError> {
    value.trim().parse().map_err(|_| UpstreamError::Row {
        row,
        message: format!("{column} is not a number: '{value}'"),
    })
}

fn parse_flag(value: &str, row: usize) -> Result<bool, UpstreamError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        other => Err(UpstreamError::Row {
            row,
            message: format!("ne is not a flag: '{other}'"),
        }),
    }
}

impl SignalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signals of a surface, replacing any previous entry.
    pub fn insert(&mut self, surface: &str, lid: LidResult, ne: bool) {
        self.entries.insert(fold_case(surface), Entry { lid, ne });
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, UpstreamError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn from_path(path: &Path) -> Result<Self, UpstreamError> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::parse(&text)?;
        info!(path = %path.display(), entries = table.len(), "loaded signal table");
        Ok(table)
    }

    /// Parse a table from its text.
    pub fn parse(text: &str) -> Result<Self, UpstreamError> {
        let header_line = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .unwrap_or_default();
        let delimiter = if header_line.contains('\t') { b'\t' } else { b',' };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(text.as_bytes());
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut table = Self::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            // Header is row 1.
            let row = i + 2;
            let field = |index: usize| record.get(index).unwrap_or_default();

            let surface = field(columns.token);
            if surface.is_empty() {
                return Err(UpstreamError::Row {
                    row,
                    message: "empty token".to_string(),
                });
            }
            let p_l1 = parse_probability(field(columns.p_l1), row, "p_l1")?;
            let lid = match columns.p_l2 {
                Some(index) => {
                    let p_l2 = parse_probability(field(index), row, "p_l2")?;
                    LidResult::new(p_l1, p_l2)
                }
                None => LidResult::from_l1(p_l1),
            }
            .map_err(|err| UpstreamError::Row {
                row,
                message: err.to_string(),
            })?;
            let ne = match columns.ne {
                Some(index) => parse_flag(field(index), row)?,
                None => false,
            };
            table.insert(surface, lid, ne);
        }
        Ok(table)
    }

    pub fn get(&self, surface: &str) -> Option<LidResult> {
        self.entries.get(&fold_case(surface)).map(|e| e.lid)
    }

    pub fn is_entity(&self, surface: &str) -> bool {
        self.entries.get(&fold_case(surface)).is_some_and(|e| e.ne)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LanguageIdentifier for SignalTable {
    fn identify(&self, token: &Token) -> Result<LidResult, UpstreamError> {
        self.get(&token.surface)
            .ok_or_else(|| UpstreamError::UnknownToken(token.surface.clone()))
    }
}

impl EntityRecognizer for SignalTable {
    fn recognize(&self, sentence: &[Token]) -> Result<Vec<bool>, UpstreamError> {
        Ok(sentence.iter().map(|t| self.is_entity(&t.surface)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use std::io::Write;

    #[test]
    fn parses_tab_separated_table() {
        let table = SignalTable::parse("token\tp_l1\tp_l2\tne\nbug\u{00FC}n\t0.95\t0.05\t0\nAhmet\t0.5\t0.5\t1\n")
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Bug\u{00FC}n").unwrap().p_l1(), 0.95);
        assert!(table.is_entity("ahmet"));
        assert!(!table.is_entity("bug\u{00FC}n"));
    }

    #[test]
    fn comma_separated_without_optional_columns() {
        let table = SignalTable::parse("p_l1,token\n0.1,meeting\n").unwrap();
        let lid = table.get("MEETING").unwrap();
        assert!((lid.p_l2() - 0.9).abs() < 1e-9);
        assert!(!table.is_entity("meeting"));
    }

    #[test]
    fn comments_are_skipped() {
        let table = SignalTable::parse("token,p_l1\n# note\nvar,0.9\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn leading_comment_does_not_hide_tab_header() {
        let table = SignalTable::parse("# lid\n\ntoken\tp_l1\tp_l2\nvar\t0.9\t0.1\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("var").unwrap().p_l1(), 0.9);
    }

    #[test]
    fn invalid_probabilities_name_the_row() {
        let err = SignalTable::parse("token\tp_l1\tp_l2\nx\t0.7\t0.7\n").unwrap_err();
        assert!(matches!(err, UpstreamError::Row { row: 2, .. }));

        let err = SignalTable::parse("token,p_l1\nok,0.5\nx,abc\n").unwrap_err();
        assert!(matches!(err, UpstreamError::Row { row: 3, .. }));

        let err = SignalTable::parse("token,p_l1,ne\nx,0.5,maybe\n").unwrap_err();
        assert!(matches!(err, UpstreamError::Row { row: 2, .. }));
    }

    #[test]
    fn missing_required_column() {
        let err = SignalTable::parse("word,p_l1\nx,0.5\n").unwrap_err();
        assert!(matches!(err, UpstreamError::Row { row: 1, .. }));
    }

    #[test]
    fn unknown_token_is_an_upstream_failure() {
        let table = SignalTable::parse("token,p_l1\nvar,0.9\n").unwrap();
        let tokens = tokenize("var yok");
        assert!(table.identify(&tokens[0]).is_ok());
        assert!(matches!(
            table.identify(&tokens[1]),
            Err(UpstreamError::UnknownToken(t)) if t == "yok"
        ));
        assert_eq!(table.recognize(&tokens).unwrap(), [false, false]);
    }

    #[test]
    fn loads_from_path_and_reader() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token\tp_l1\nscroll\t0.05").unwrap();
        let table = SignalTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);

        let table = SignalTable::from_reader("token,p_l1\na,1.0\n".as_bytes()).unwrap();
        assert_eq!(table.get("a").unwrap().p_l1(), 1.0);
    }
}
