//! Native-language suffix morphotactics.
//!
//! This crate holds the configuration-driven part of intra-word code-switch
//! detection: which suffixes exist, which class each belongs to, and in what
//! order classes may follow a stem.
//!
//! # Architecture
//!
//! - [`class`] -- Suffix classes and their interned identifiers
//! - [`inventory`] -- Suffix entries keyed by folded surface
//! - [`automaton`] -- Class ordering (START -> classes -> ACCEPT)
//! - [`schema`] -- Serde shapes the morphology is declared in
//! - [`morphology`] -- Validated bundle of the three, built from a schema

pub mod automaton;
pub mod class;
pub mod inventory;
pub mod morphology;
pub mod schema;

pub use automaton::MorphotacticAutomaton;
pub use class::{ClassId, ClassTable, SuffixClass};
pub use inventory::{SuffixEntry, SuffixInventory};
pub use morphology::Morphology;
pub use schema::{ClassSource, MorphologySource, SuffixSource};

/// Error type for morphology declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MorphError {
    #[error("suffix class name is empty")]
    EmptyClassName,
    #[error("duplicate suffix class: {0}")]
    DuplicateClass(String),
    #[error("too many suffix classes: {0}")]
    TooManyClasses(usize),
    #[error("suffix of class {class} has an empty surface")]
    EmptySuffix { class: String },
    #[error("suffix '{surface}' references undefined class {class}")]
    UndefinedClass { surface: String, class: String },
    #[error("class {from} lists undefined successor {to}")]
    UndefinedTransition { from: String, to: String },
    #[error("no accepting suffix class is reachable from the stem")]
    UnreachableAccept,
    #[error("duplicate suffix '{surface}' in class {class}")]
    DuplicateSuffix { surface: String, class: String },
}

/// Maximum number of suffixes stripped from a single token.
pub const MAX_SUFFIX_CHAIN: usize = 12;
