// Export of annotated documents: records, TSV, CSV and JSON
//
// TSV layout, one block per sentence:
//
//   SentenceID  <n>
//   <token>     <LABEL>   [<gloss>]
//   ...
//   MatrixLang  <code | TIE | ->
//   EmbedLang   <code | ->
//   <blank line>

use std::io::Write;

use codeswitch_core::label::{Label, Language, MatrixLanguage};
use codeswitch_core::record::{SentenceRecord, TokenRecord};
use serde::Serialize;

use crate::config::LanguageCodes;
use crate::pipeline::{AnnotatedDocument, TokenAnnotation};

pub const SENTENCE_ID_MARKER: &str = "SentenceID";
pub const MATRIX_MARKER: &str = "MatrixLang";
pub const EMBED_MARKER: &str = "EmbedLang";

/// Rendering of an undefined language.
pub const UNDEFINED: &str = "-";
/// Rendering of a tied matrix language.
pub const TIE: &str = "TIE";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which rows are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub sentence_ids: bool,
    pub matrix: bool,
    pub embedded: bool,
    /// Gloss column on MIXED tokens.
    pub glosses: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sentence_ids: true,
            matrix: true,
            embedded: true,
            glosses: true,
        }
    }
}

/// Spellings of the sentence id marker accepted on input, compared without
/// case.
const SENTENCE_ID_SPELLINGS: [&str; 4] = ["sentenceid", "sentid", "sentence_id", "sent_id"];

/// Whether a row token is one of the sentence metadata markers.
///
/// Matching ignores case and surrounding whitespace, and accepts the short
/// and snake_case spellings of the sentence id marker.
pub fn is_meta_row(token: &str) -> bool {
    let token = token.trim();
    SENTENCE_ID_SPELLINGS
        .into_iter()
        .chain([MATRIX_MARKER, EMBED_MARKER])
        .any(|marker| token.eq_ignore_ascii_case(marker))
}

fn matrix_code(matrix: MatrixLanguage, codes: &LanguageCodes) -> &str {
    match matrix {
        MatrixLanguage::Dominant(language) => codes.code(language),
        MatrixLanguage::Tie => TIE,
        MatrixLanguage::Undefined => UNDEFINED,
    }
}

fn embedded_code(embedded: Option<Language>, codes: &LanguageCodes) -> &str {
    embedded.map_or(UNDEFINED, |language| codes.code(language))
}

/// `stem-TAG-TAG` for MIXED tokens.
fn rendered_gloss(annotation: &TokenAnnotation) -> Option<String> {
    let gloss = annotation.gloss.as_ref()?;
    let stem = annotation
        .segmentation
        .as_ref()
        .map_or(annotation.token.surface.as_str(), |s| s.stem.as_str());
    Some(gloss.render(stem))
}

// ============================================================================
// Records
// ============================================================================

/// Persisted records of a document: one per token, one per sentence.
pub fn to_records(doc: &AnnotatedDocument) -> (Vec<TokenRecord>, Vec<SentenceRecord>) {
    let tokens = doc
        .tokens()
        .map(|annotation| TokenRecord {
            ordinal: annotation.token.index,
            surface: annotation.token.surface.clone(),
            label: annotation.label,
            gloss: rendered_gloss(annotation),
        })
        .collect();
    let sentences = doc
        .sentences
        .iter()
        .map(|s| SentenceRecord::new(s.span.id, s.languages.matrix, s.languages.embedded))
        .collect();
    (tokens, sentences)
}

#[derive(Serialize)]
struct JsonDocument {
    tokens: Vec<TokenRecord>,
    sentences: Vec<SentenceRecord>,
}

/// `{ "tokens": [...], "sentences": [...] }`.
pub fn to_json(doc: &AnnotatedDocument) -> Result<String, ExportError> {
    let (tokens, sentences) = to_records(doc);
    Ok(serde_json::to_string_pretty(&JsonDocument { tokens, sentences })?)
}

// ============================================================================
// TSV
// ============================================================================

pub fn to_tsv(doc: &AnnotatedDocument, codes: &LanguageCodes, options: &ExportOptions) -> String {
    let mut out = String::new();
    for sentence in &doc.sentences {
        if options.sentence_ids {
            out.push_str(&format!("{SENTENCE_ID_MARKER}\t{}\n", sentence.span.id));
        }
        for annotation in &sentence.tokens {
            out.push_str(&annotation.token.surface);
            out.push('\t');
            out.push_str(annotation.label.as_str());
            if options.glosses {
                if let Some(gloss) = rendered_gloss(annotation) {
                    out.push('\t');
                    out.push_str(&gloss);
                }
            }
            out.push('\n');
        }
        if options.matrix {
            out.push_str(&format!(
                "{MATRIX_MARKER}\t{}\n",
                matrix_code(sentence.languages.matrix, codes)
            ));
        }
        if options.embedded {
            out.push_str(&format!(
                "{EMBED_MARKER}\t{}\n",
                embedded_code(sentence.languages.embedded, codes)
            ));
        }
        out.push('\n');
    }
    out
}

// ============================================================================
// CSV
// ============================================================================

/// Write `Item,Token,Label,Gloss` rows. Items are numbered from 1 within
/// each sentence; metadata rows leave Item empty.
pub fn write_csv<W: Write>(
    doc: &AnnotatedDocument,
    codes: &LanguageCodes,
    options: &ExportOptions,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Item", "Token", "Label", "Gloss"])?;
    for sentence in &doc.sentences {
        if options.sentence_ids {
            let id = sentence.span.id.to_string();
            csv.write_record(["", SENTENCE_ID_MARKER, id.as_str(), ""])?;
        }
        for (item, annotation) in sentence.tokens.iter().enumerate() {
            let gloss = if options.glosses {
                rendered_gloss(annotation).unwrap_or_default()
            } else {
                String::new()
            };
            let item = (item + 1).to_string();
            csv.write_record([
                item.as_str(),
                annotation.token.surface.as_str(),
                annotation.label.as_str(),
                gloss.as_str(),
            ])?;
        }
        if options.matrix {
            csv.write_record([
                "",
                MATRIX_MARKER,
                matrix_code(sentence.languages.matrix, codes),
                "",
            ])?;
        }
        if options.embedded {
            csv.write_record([
                "",
                EMBED_MARKER,
                embedded_code(sentence.languages.embedded, codes),
                "",
            ])?;
        }
    }
    csv.flush()?;
    Ok(())
}

// ============================================================================
// MIXED items
// ============================================================================

/// A MIXED token with its sentence, as handed to a glossing tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixedItem {
    pub sentence_id: usize,
    pub ordinal: usize,
    pub surface: String,
    pub gloss: Option<String>,
}

/// Every MIXED token in document order.
pub fn mixed_items(doc: &AnnotatedDocument) -> Vec<MixedItem> {
    doc.sentences
        .iter()
        .flat_map(|sentence| {
            sentence
                .tokens
                .iter()
                .filter(|a| a.label == Label::Mixed)
                .map(move |a| MixedItem {
                    sentence_id: sentence.span.id,
                    ordinal: a.token.index,
                    surface: a.token.surface.clone(),
                    gloss: rendered_gloss(a),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::pipeline::Annotator;
    use crate::signals::SignalTable;

    fn document() -> (AnnotatedDocument, LanguageCodes) {
        let annotator = Annotator::new(EngineConfig::builtin().unwrap());
        let table = SignalTable::parse(
            "token,p_l1\nbug\u{00FC}n,0.95\nscroll,0.05\nscrolllayorum,0.3\nmeeting,0.1\nvar,0.9\n",
        )
        .unwrap();
        let doc = annotator.annotate("Bug\u{00FC}n scrolllayorum\nmeeting var", &table, &table);
        (doc, annotator.config().codes().clone())
    }

    #[test]
    fn tsv_blocks() {
        let (doc, codes) = document();
        let tsv = to_tsv(&doc, &codes, &ExportOptions::default());
        let expected = "SentenceID\t1\n\
                        Bug\u{00FC}n\tL1\n\
                        scrolllayorum\tMIXED\tscroll-VBLZ-PROG-1SG\n\
                        MatrixLang\tTR\n\
                        EmbedLang\t-\n\
                        \n\
                        SentenceID\t2\n\
                        meeting\tL2\n\
                        var\tL1\n\
                        MatrixLang\tTIE\n\
                        EmbedLang\t-\n\
                        \n";
        assert_eq!(tsv, expected);
    }

    #[test]
    fn tsv_options_drop_rows() {
        let (doc, codes) = document();
        let options = ExportOptions {
            sentence_ids: false,
            matrix: false,
            embedded: false,
            glosses: false,
        };
        let tsv = to_tsv(&doc, &codes, &options);
        assert!(!tsv.lines().any(is_meta_row));
        assert!(tsv.contains("scrolllayorum\tMIXED\n"));
    }

    #[test]
    fn csv_rows() {
        let (doc, codes) = document();
        let mut out = Vec::new();
        write_csv(&doc, &codes, &ExportOptions::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Item,Token,Label,Gloss");
        assert_eq!(lines[1], ",SentenceID,1,");
        assert_eq!(lines[3], "2,scrolllayorum,MIXED,scroll-VBLZ-PROG-1SG");
        assert_eq!(lines[4], ",MatrixLang,TR,");
        assert_eq!(lines.len(), 1 + 5 + 5);
    }

    #[test]
    fn records_and_json() {
        let (doc, _) = document();
        let (tokens, sentences) = to_records(&doc);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].gloss.as_deref(), Some("scroll-VBLZ-PROG-1SG"));
        assert_eq!(tokens[3].ordinal, 3);
        assert!(sentences[1].tie);
        assert_eq!(sentences[0].matrix_language, Some(Language::L1));

        let json: serde_json::Value = serde_json::from_str(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(json["tokens"][1]["label"], "MIXED");
        assert_eq!(json["sentences"][1]["tie"], true);
        assert!(json["tokens"][0].get("gloss").is_none());
    }

    #[test]
    fn mixed_items_carry_sentence_ids() {
        let (doc, _) = document();
        let items = mixed_items(&doc);
        assert_eq!(
            items,
            [MixedItem {
                sentence_id: 1,
                ordinal: 1,
                surface: "scrolllayorum".to_string(),
                gloss: Some("scroll-VBLZ-PROG-1SG".to_string()),
            }]
        );
    }

    #[test]
    fn meta_rows() {
        assert!(is_meta_row("SentenceID"));
        assert!(is_meta_row(" MatrixLang "));
        assert!(is_meta_row("EmbedLang"));
        assert!(!is_meta_row("meeting"));
        assert!(!is_meta_row("Sentence"));
    }

    #[test]
    fn sentence_id_spellings() {
        for spelling in ["sentenceid", "SENTENCEID", "SentID", "sentence_id", "Sent_ID"] {
            assert!(is_meta_row(spelling), "{spelling}");
        }
        assert!(is_meta_row("matrixlang"));
        assert!(is_meta_row("EMBEDLANG"));
        assert!(!is_meta_row("sentence id"));
    }
}
