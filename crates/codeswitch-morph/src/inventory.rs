// Suffix inventory: entries keyed by case-folded surface

use codeswitch_core::character::{fold_case, is_apostrophe};
use hashbrown::HashMap;

use crate::MorphError;
use crate::class::{ClassId, ClassTable};

/// A native suffix with its class and optional gloss tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixEntry {
    /// Case-folded surface, without a leading apostrophe.
    pub surface: String,
    pub class: ClassId,
    pub gloss: Option<String>,
    /// Other readings of the same suffix (`INS` / `COM`), after the primary.
    pub alternatives: Vec<String>,
}

impl SuffixEntry {
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}

/// All known suffixes in declaration order.
///
/// The same surface may be declared under several classes; lookups return
/// every entry for a surface in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SuffixInventory {
    entries: Vec<SuffixEntry>,
    by_surface: HashMap<String, Vec<usize>>,
    max_chars: usize,
}

impl SuffixInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a declared surface: fold case and drop leading apostrophes.
    pub fn normalize(surface: &str) -> String {
        fold_case(surface.trim())
            .trim_start_matches(is_apostrophe)
            .to_string()
    }

    /// Add an entry; `classes` is used for error messages only.
    pub fn add(
        &mut self,
        surface: &str,
        class: ClassId,
        gloss: Option<String>,
        classes: &ClassTable,
    ) -> Result<usize, MorphError> {
        let surface = Self::normalize(surface);
        if surface.is_empty() {
            return Err(MorphError::EmptySuffix {
                class: classes.name(class).to_string(),
            });
        }
        let indices = self.by_surface.entry(surface.clone()).or_default();
        if indices.iter().any(|&i| self.entries[i].class == class) {
            return Err(MorphError::DuplicateSuffix {
                surface,
                class: classes.name(class).to_string(),
            });
        }
        let index = self.entries.len();
        indices.push(index);
        self.max_chars = self.max_chars.max(surface.chars().count());
        let gloss = gloss
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        self.entries.push(SuffixEntry {
            surface,
            class,
            gloss,
            alternatives: Vec::new(),
        });
        Ok(index)
    }

    /// Attach alternative gloss tags to the entry at `index`. Blank tags and
    /// repeats of the primary gloss or of each other are dropped.
    pub fn add_alternatives(&mut self, index: usize, alternatives: &[String]) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        for tag in alternatives.iter().map(|t| t.trim()) {
            if tag.is_empty()
                || entry.gloss.as_deref() == Some(tag)
                || entry.alternatives.iter().any(|a| a == tag)
            {
                continue;
            }
            entry.alternatives.push(tag.to_string());
        }
    }

    pub fn get(&self, index: usize) -> Option<&SuffixEntry> {
        self.entries.get(index)
    }

    /// Entries declared for `surface` (folded before lookup).
    pub fn entries_for(&self, surface: &str) -> impl Iterator<Item = &SuffixEntry> + '_ {
        let indices = self
            .by_surface
            .get(Self::normalize(surface).as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        indices.iter().map(|&i| &self.entries[i])
    }

    /// First declared class for `surface`.
    pub fn first_class(&self, surface: &str) -> Option<ClassId> {
        self.entries_for(surface).next().map(|e| e.class)
    }

    /// Entry for `surface` under a specific class.
    pub fn entry_in_class(&self, surface: &str, class: ClassId) -> Option<&SuffixEntry> {
        self.entries_for(surface).find(|e| e.class == class)
    }

    /// Indices of entries whose surface is a suffix of `word`, longest
    /// surface first, declaration order among equal lengths.
    ///
    /// `word` must already be case-folded. At least `min_rest` characters
    /// are left in front of every match.
    pub fn matching_suffixes(&self, word: &[char], min_rest: usize) -> Vec<usize> {
        let longest = self.max_chars.min(word.len().saturating_sub(min_rest));
        let mut found = Vec::new();
        let mut key = String::new();
        for len in (1..=longest).rev() {
            key.clear();
            key.extend(&word[word.len() - len..]);
            if let Some(indices) = self.by_surface.get(key.as_str()) {
                found.extend_from_slice(indices);
            }
        }
        found
    }

    /// Length in characters of the longest declared surface.
    pub fn max_surface_chars(&self) -> usize {
        self.max_chars
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuffixEntry> + '_ {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::SuffixClass;

    fn classes() -> (ClassTable, ClassId, ClassId) {
        let mut table = ClassTable::new();
        let poss = table.add(SuffixClass::new("POSSESSIVE")).unwrap();
        let case = table.add(SuffixClass::new("CASE")).unwrap();
        (table, poss, case)
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn shared_surface_keeps_declaration_order() {
        let (table, poss, case) = classes();
        let mut inv = SuffixInventory::new();
        inv.add("\u{0131}n", case, Some("GEN".into()), &table).unwrap();
        inv.add("\u{0131}n", poss, Some("POSS.2SG".into()), &table).unwrap();

        let found: Vec<ClassId> = inv.entries_for("\u{0131}n").map(|e| e.class).collect();
        assert_eq!(found, vec![case, poss]);
        assert_eq!(inv.first_class("\u{0131}n"), Some(case));
        assert_eq!(
            inv.entry_in_class("\u{0131}n", poss).and_then(|e| e.gloss.as_deref()),
            Some("POSS.2SG")
        );
    }

    #[test]
    fn surfaces_are_folded() {
        let (table, _, case) = classes();
        let mut inv = SuffixInventory::new();
        inv.add("DAN", case, None, &table).unwrap();
        assert_eq!(inv.first_class("dan"), Some(case));
        assert_eq!(inv.first_class("Dan"), Some(case));
    }

    #[test]
    fn leading_apostrophe_is_dropped() {
        let (table, _, case) = classes();
        let mut inv = SuffixInventory::new();
        inv.add("'u", case, Some("ACC".into()), &table).unwrap();
        assert_eq!(inv.get(0).map(|e| e.surface.as_str()), Some("u"));
        assert_eq!(inv.first_class("\u{2019}u"), Some(case));
    }

    #[test]
    fn rejects_empty_surface() {
        let (table, _, case) = classes();
        let mut inv = SuffixInventory::new();
        assert_eq!(
            inv.add("  ", case, None, &table),
            Err(MorphError::EmptySuffix {
                class: "CASE".to_string()
            })
        );
        assert!(inv.add("'", case, None, &table).is_err());
    }

    #[test]
    fn rejects_duplicate_in_same_class() {
        let (table, poss, case) = classes();
        let mut inv = SuffixInventory::new();
        inv.add("da", case, None, &table).unwrap();
        assert!(inv.add("da", poss, None, &table).is_ok());
        assert_eq!(
            inv.add("DA", case, None, &table),
            Err(MorphError::DuplicateSuffix {
                surface: "da".to_string(),
                class: "CASE".to_string()
            })
        );
    }

    #[test]
    fn blank_gloss_is_none() {
        let (table, _, case) = classes();
        let mut inv = SuffixInventory::new();
        inv.add("de", case, Some("  ".into()), &table).unwrap();
        assert_eq!(inv.get(0).and_then(|e| e.gloss.clone()), None);
    }

    #[test]
    fn alternatives_skip_blanks_and_repeats() {
        let (table, _, case) = classes();
        let mut inv = SuffixInventory::new();
        let la = inv.add("la", case, Some("INS".into()), &table).unwrap();
        let alternatives = ["COM", " ", "INS", "COM"].map(String::from);
        inv.add_alternatives(la, &alternatives);
        assert_eq!(inv.get(la).unwrap().alternatives, ["COM"]);
        // Out of range is ignored.
        inv.add_alternatives(7, &alternatives);
    }

    #[test]
    fn matching_suffixes_longest_first() {
        let (table, poss, case) = classes();
        let mut inv = SuffixInventory::new();
        let den = inv.add("den", case, None, &table).unwrap();
        let nden = inv.add("nden", case, None, &table).unwrap();
        let n = inv.add("n", poss, None, &table).unwrap();
        inv.add("lar", case, None, &table).unwrap();

        assert_eq!(inv.matching_suffixes(&chars("evinden"), 2), vec![nden, den, n]);
        assert_eq!(inv.max_surface_chars(), 4);
    }

    #[test]
    fn matching_suffixes_respects_min_rest() {
        let (table, _, case) = classes();
        let mut inv = SuffixInventory::new();
        let dan = inv.add("dan", case, None, &table).unwrap();
        assert_eq!(inv.matching_suffixes(&chars("xdan"), 1), vec![dan]);
        assert!(inv.matching_suffixes(&chars("xdan"), 2).is_empty());
        assert!(inv.matching_suffixes(&chars("da"), 0).is_empty());
    }
}
