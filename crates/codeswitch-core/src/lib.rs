//! Shared types for the code-switching annotation engine.
//!
//! - [`label`] -- closed label set, languages and matrix-language outcomes
//! - [`token`] -- tokens, character classes and sentence spans
//! - [`character`] -- character classification, scripts and case folding
//! - [`signal`] -- validated language-identification probabilities
//! - [`record`] -- per-token and per-sentence records persisted by callers

pub mod character;
pub mod label;
pub mod record;
pub mod signal;
pub mod token;
