// Upstream collaborators: language identification and entity recognition
//
// Both are black boxes reached through narrow traits. A failing collaborator
// never aborts annotation: its signal is replaced by the neutral default
// (probabilities 0.5/0.5, no entity) and the fallback is recorded.

mod gazetteer;
mod table;

pub use gazetteer::Gazetteer;
pub use table::SignalTable;

use codeswitch_core::signal::{LidResult, SignalError};
use codeswitch_core::token::Token;
use serde::Serialize;
use tracing::debug;

/// Failure of an upstream collaborator.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    #[error("invalid language signal: {0}")]
    InvalidSignal(#[from] SignalError),

    #[error("no signal for token '{0}'")]
    UnknownToken(String),

    #[error("entity recognizer returned {actual} flags for {expected} tokens")]
    Misaligned { expected: usize, actual: usize },

    #[error("failed to read signal table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed signal table: {0}")]
    Csv(#[from] csv::Error),

    #[error("signal table row {row}: {message}")]
    Row { row: usize, message: String },
}

/// Statistical language identification for single tokens.
pub trait LanguageIdentifier: Send + Sync {
    fn identify(&self, token: &Token) -> Result<LidResult, UpstreamError>;
}

/// Named-entity recognition over one sentence; one flag per token.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, sentence: &[Token]) -> Result<Vec<bool>, UpstreamError>;
}

impl<F> LanguageIdentifier for F
where
    F: Fn(&Token) -> Result<LidResult, UpstreamError> + Send + Sync,
{
    fn identify(&self, token: &Token) -> Result<LidResult, UpstreamError> {
        self(token)
    }
}

/// Collaborator that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignals;

impl LanguageIdentifier for NoSignals {
    fn identify(&self, _token: &Token) -> Result<LidResult, UpstreamError> {
        Err(UpstreamError::Unavailable("language identifier"))
    }
}

impl EntityRecognizer for NoSignals {
    fn recognize(&self, _sentence: &[Token]) -> Result<Vec<bool>, UpstreamError> {
        Err(UpstreamError::Unavailable("entity recognizer"))
    }
}

// ---------------------------------------------------------------------------
// Signal resolution
// ---------------------------------------------------------------------------

/// Signals of one token after the fallback policy was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenSignals {
    pub lid: LidResult,
    pub ne: bool,
    /// The identifier failed and `lid` is the neutral default.
    pub lid_fallback: bool,
}

/// What had to be defaulted while resolving the signals of a sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Degradation {
    /// Number of tokens whose probabilities were defaulted.
    pub lid: usize,
    /// The entity recognizer failed for the sentence.
    pub ne: bool,
}

impl Degradation {
    pub fn is_degraded(&self) -> bool {
        self.lid > 0 || self.ne
    }

    pub fn merge(&mut self, other: Degradation) {
        self.lid += other.lid;
        self.ne |= other.ne;
    }
}

/// Query both collaborators for one sentence, replacing failures with the
/// neutral defaults.
pub fn resolve_signals(
    tokens: &[Token],
    lid: &dyn LanguageIdentifier,
    ner: &dyn EntityRecognizer,
) -> (Vec<TokenSignals>, Degradation) {
    let mut degradation = Degradation::default();

    let flags = match ner.recognize(tokens) {
        Ok(flags) if flags.len() == tokens.len() => flags,
        Ok(flags) => {
            let err = UpstreamError::Misaligned {
                expected: tokens.len(),
                actual: flags.len(),
            };
            debug!(error = %err, "entity flags defaulted to false");
            degradation.ne = true;
            vec![false; tokens.len()]
        }
        Err(err) => {
            debug!(error = %err, "entity flags defaulted to false");
            degradation.ne = true;
            vec![false; tokens.len()]
        }
    };

    let signals = tokens
        .iter()
        .zip(flags)
        .map(|(token, ne)| {
            // Labelled OTHER regardless, so the identifier is not asked.
            let identified = if token.char_class.is_non_linguistic() {
                Ok(LidResult::neutral())
            } else {
                lid.identify(token)
            };
            (token, ne, identified)
        })
        .map(|(token, ne, identified)| match identified {
            Ok(result) => TokenSignals {
                lid: result,
                ne,
                lid_fallback: false,
            },
            Err(err) => {
                debug!(token = %token.surface, error = %err, "language signal defaulted to neutral");
                degradation.lid += 1;
                TokenSignals {
                    lid: LidResult::neutral(),
                    ne,
                    lid_fallback: true,
                }
            }
        })
        .collect();

    (signals, degradation)
}
