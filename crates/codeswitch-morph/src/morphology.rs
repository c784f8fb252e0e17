// Validated morphology: class table, automaton and suffix inventory

use tracing::{debug, warn};

use crate::MorphError;
use crate::automaton::MorphotacticAutomaton;
use crate::class::{ClassId, ClassTable, SuffixClass};
use crate::inventory::{SuffixEntry, SuffixInventory};
use crate::schema::MorphologySource;

/// Suffix classes, their ordering and the suffix inventory, built together
/// so that every reference between them is resolved.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct Morphology {
    classes: ClassTable,
    automaton: MorphotacticAutomaton,
    inventory: SuffixInventory,
}

impl Morphology {
    /// A morphology with no classes; nothing segments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate a morphology from its declarations.
    ///
    /// Fails on duplicate or empty class names, suffixes or transitions
    /// that name undefined classes, duplicate suffix entries, and when no
    /// accepting class is reachable from the stem.
    pub fn from_source(source: &MorphologySource) -> Result<Self, MorphError> {
        let mut classes = ClassTable::new();
        for decl in &source.classes {
            classes.add(SuffixClass {
                name: decl.name.clone(),
                tag: decl.tag.clone().filter(|t| !t.trim().is_empty()),
                accepting: decl.accepting,
                repeatable: decl.repeatable,
            })?;
        }

        let mut automaton = MorphotacticAutomaton::new(classes.len());
        for (index, decl) in source.classes.iter().enumerate() {
            let from = ClassId::from_index(index);
            if decl.initial {
                automaton.allow_start(from);
            }
            if decl.accepting {
                automaton.set_accepting(from);
            }
            if decl.repeatable {
                automaton.allow(from, from);
            }
            match &decl.next {
                Some(names) => {
                    for name in names {
                        let to = classes.lookup(name).ok_or_else(|| {
                            MorphError::UndefinedTransition {
                                from: decl.name.trim().to_string(),
                                to: name.clone(),
                            }
                        })?;
                        automaton.allow(from, to);
                    }
                }
                None => {
                    for later in index + 1..classes.len() {
                        automaton.allow(from, ClassId::from_index(later));
                    }
                }
            }
        }

        if !classes.is_empty() {
            if !automaton.has_accepting_path() {
                return Err(MorphError::UnreachableAccept);
            }
            for dead in automaton.dead_classes() {
                warn!(
                    class = classes.name(dead),
                    "suffix class lies on no path from stem to word end"
                );
            }
        }

        let mut inventory = SuffixInventory::new();
        for decl in &source.suffixes {
            let class =
                classes
                    .lookup(&decl.class)
                    .ok_or_else(|| MorphError::UndefinedClass {
                        surface: decl.surface.clone(),
                        class: decl.class.clone(),
                    })?;
            let index = inventory.add(&decl.surface, class, decl.gloss.clone(), &classes)?;
            inventory.add_alternatives(index, &decl.alternatives);
        }

        debug!(
            classes = classes.len(),
            suffixes = inventory.len(),
            "morphology built"
        );
        Ok(Self {
            classes,
            automaton,
            inventory,
        })
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    pub fn automaton(&self) -> &MorphotacticAutomaton {
        &self.automaton
    }

    pub fn inventory(&self) -> &SuffixInventory {
        &self.inventory
    }

    /// Gloss tag for a suffix entry: its own tag, else its class tag.
    pub fn tag_for<'a>(&'a self, entry: &'a SuffixEntry) -> Option<&'a str> {
        entry.gloss.as_deref().or_else(|| {
            self.classes
                .get(entry.class)
                .and_then(|c| c.tag.as_deref())
        })
    }
}
