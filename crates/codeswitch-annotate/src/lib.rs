//! Code-switching annotation for bilingual text.
//!
//! Assigns one label from {L1, L2, MIXED, UID, NE, LANG3, OTHER} to each
//! token, detects foreign stems carrying native suffixes, suggests glosses
//! for them, and derives the matrix and embedded language of each sentence.
//!
//! # Architecture
//!
//! - [`lexicon`] -- Case-folded word sets of both languages plus the morphology
//! - [`segmenter`] -- Bounded right-to-left suffix stripping over the automaton
//! - [`decision`] -- Strict-priority label rules
//! - [`aggregate`] -- Per-sentence matrix/embedded language
//! - [`gloss`] -- Leipzig-style glosses for MIXED tokens
//! - [`tokenizer`] -- Tokens and sentence boundaries
//! - [`signals`] -- Language-identification and entity-recognition collaborators
//! - [`config`] -- Engine configuration, loaded from TOML
//! - [`pipeline`] -- Document-level annotation
//! - [`export`] -- Records, TSV, CSV and JSON output

pub mod aggregate;
pub mod config;
pub mod decision;
pub mod export;
pub mod gloss;
pub mod lexicon;
pub mod pipeline;
pub mod segmenter;
pub mod signals;
pub mod tokenizer;

pub use aggregate::{SentenceAggregator, SentenceLanguages, aggregate};
pub use config::{ConfigError, EngineConfig};
pub use decision::{TokenDecision, annotate_token, decide};
pub use gloss::{Gloss, GlossSuggester};
pub use lexicon::{LexiconStore, WordSet};
pub use pipeline::{AnnotatedDocument, AnnotatedSentence, Annotator, TokenAnnotation};
pub use segmenter::{MorphologicalSegmenter, Segmentation, SegmenterOptions};
pub use signals::{EntityRecognizer, LanguageIdentifier, UpstreamError};
