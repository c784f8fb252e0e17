// Leipzig-style gloss suggestions for MIXED tokens

use std::fmt;

use codeswitch_morph::Morphology;
use serde::Serialize;
use tracing::warn;

use crate::segmenter::Segmentation;

/// Leipzig morpheme delimiter.
pub const GLOSS_DELIMITER: char = '-';

/// Tag used for a suffix with no configured gloss.
pub const PLACEHOLDER_TAG: &str = "?";

/// Upper bound on the glosses returned by [`GlossSuggester::candidates`].
pub const MAX_GLOSS_CANDIDATES: usize = 16;

/// Gloss tags aligned 1:1 with the suffixes of a segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gloss {
    pub tags: Vec<String>,
}

impl Gloss {
    /// `stem-TAG-TAG`.
    pub fn render(&self, stem: &str) -> String {
        let mut out = String::from(stem);
        for tag in &self.tags {
            out.push(GLOSS_DELIMITER);
            out.push_str(tag);
        }
        out
    }

    /// Whether any suffix fell back to the placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.tags.iter().any(|t| t == PLACEHOLDER_TAG)
    }
}

impl fmt::Display for Gloss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.tags {
            if !first {
                write!(f, "{GLOSS_DELIMITER}")?;
            }
            f.write_str(tag)?;
            first = false;
        }
        Ok(())
    }
}

/// Maps accepted segmentations to gloss tags using the suffix inventory.
#[derive(Debug, Clone, Copy)]
pub struct GlossSuggester<'a> {
    morphology: &'a Morphology,
}

impl<'a> GlossSuggester<'a> {
    pub fn new(morphology: &'a Morphology) -> Self {
        Self { morphology }
    }

    /// Gloss for an accepted segmentation; `None` when it is not valid or
    /// when `suffixes` and `classes` are not aligned.
    ///
    /// Each suffix takes the tag of its inventory entry in the chosen class,
    /// else the class tag. A suffix with neither is a configuration gap: it
    /// is logged and rendered as `?`.
    pub fn suggest(&self, segmentation: &Segmentation) -> Option<Gloss> {
        let readings = self.readings(segmentation)?;
        let tags = readings
            .into_iter()
            .map(|mut tags| tags.swap_remove(0))
            .collect();
        Some(Gloss { tags })
    }

    /// Every gloss of an accepted segmentation, the primary one first.
    ///
    /// Suffixes declared with alternative tags multiply the readings; the
    /// result holds at most [`MAX_GLOSS_CANDIDATES`] glosses.
    pub fn candidates(&self, segmentation: &Segmentation) -> Vec<Gloss> {
        let Some(readings) = self.readings(segmentation) else {
            return Vec::new();
        };
        let mut glosses = vec![Gloss { tags: Vec::new() }];
        for tags in &readings {
            let mut next = Vec::with_capacity(glosses.len() * tags.len());
            for gloss in &glosses {
                for tag in tags {
                    if next.len() == MAX_GLOSS_CANDIDATES {
                        break;
                    }
                    let mut extended = gloss.clone();
                    extended.tags.push(tag.clone());
                    next.push(extended);
                }
            }
            glosses = next;
        }
        glosses
    }

    /// Possible tags per suffix, primary first; never empty per suffix.
    fn readings(&self, segmentation: &Segmentation) -> Option<Vec<Vec<String>>> {
        if !segmentation.valid {
            return None;
        }
        if segmentation.suffixes.len() != segmentation.classes.len() {
            warn!(
                stem = segmentation.stem.as_str(),
                suffixes = segmentation.suffixes.len(),
                classes = segmentation.classes.len(),
                "segmentation suffixes and classes are not aligned"
            );
            return None;
        }
        let inventory = self.morphology.inventory();
        let readings = segmentation
            .suffixes
            .iter()
            .zip(&segmentation.classes)
            .map(|(suffix, &class)| {
                let body = Segmentation::suffix_body(suffix);
                let entry = inventory.entry_in_class(body, class);
                let tag = match entry {
                    Some(entry) => self.morphology.tag_for(entry),
                    None => self
                        .morphology
                        .classes()
                        .get(class)
                        .and_then(|c| c.tag.as_deref()),
                };
                match tag {
                    Some(tag) => {
                        let mut tags = vec![tag.to_string()];
                        if let Some(entry) = entry {
                            tags.extend(
                                entry.alternatives.iter().filter(|a| *a != tag).cloned(),
                            );
                        }
                        tags
                    }
                    None => {
                        warn!(
                            suffix = body,
                            class = self.morphology.classes().name(class),
                            "no gloss tag configured for suffix"
                        );
                        vec![PLACEHOLDER_TAG.to_string()]
                    }
                }
            })
            .collect();
        Some(readings)
    }
}

/// Gloss for a segmentation under `morphology`.
pub fn gloss(segmentation: &Segmentation, morphology: &Morphology) -> Option<Gloss> {
    GlossSuggester::new(morphology).suggest(segmentation)
}
