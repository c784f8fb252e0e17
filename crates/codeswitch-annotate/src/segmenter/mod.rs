// Intra-word code-switch segmentation: L2 stem + licensed L1 suffixes
//
// Suffixes are stripped from the end of the token. At every step the
// candidates are the inventory entries matching the end of the remainder
// whose class may occupy that position (the last suffix must be accepting,
// any other must be allowed to precede the suffix stripped before it).
//
// Candidate order:
//   1. longer surface first
//   2. class with more possible predecessors first (START counts as one)
//   3. inventory declaration order
//
// The search is a depth-first walk in that order. It stops at the first
// point where at least one suffix was stripped and the remainder is an
// accepted stem, and it is bounded in depth and in expanded nodes, so a
// token costs at most a fixed amount of work.

use codeswitch_core::character::{fold_char, is_apostrophe};
use codeswitch_core::label::Language;
use codeswitch_morph::{ClassId, MAX_SUFFIX_CHAIN};
use tracing::debug;

use crate::lexicon::LexiconStore;

/// Apostrophe-separated English endings that are never native suffixes.
const CONTRACTION_TAILS: [&str; 7] = ["s", "re", "ve", "m", "ll", "d", "t"];

/// Upper bound on candidate expansions per token.
pub const MAX_EXPANDED_NODES: usize = 64;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Segmenter options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterOptions {
    /// Minimum stem length in characters (apostrophe excluded).
    pub min_stem_chars: usize,
    /// Maximum number of suffixes stripped from one token.
    pub max_suffixes: usize,
    /// Maximum number of candidate expansions per token.
    pub max_nodes: usize,
    /// Letters that, at the start of the suffix nearest the stem, require the
    /// stem to end in one of `vowels` (Turkish buffer consonants `y`, `n`).
    /// Empty disables the check.
    pub buffer_letters: Vec<char>,
    pub vowels: Vec<char>,
    /// Folded L2 words never accepted as a stem, even when the L2 lexicon
    /// lists them (short function words such as `and` in `anda`).
    pub excluded_stems: Vec<String>,
}

impl SegmenterOptions {
    /// Exclude `words` as stems; they are folded the way tokens are.
    pub fn with_excluded_stems<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let folded: String = word.as_ref().trim().chars().map(fold_char).collect();
            if !folded.is_empty() && !self.excluded_stems.contains(&folded) {
                self.excluded_stems.push(folded);
            }
        }
        self
    }

    fn excludes(&self, stem: &str) -> bool {
        self.excluded_stems.iter().any(|word| word == stem)
    }
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            min_stem_chars: 2,
            max_suffixes: MAX_SUFFIX_CHAIN,
            max_nodes: MAX_EXPANDED_NODES,
            buffer_letters: Vec::new(),
            vowels: Vec::new(),
            excluded_stems: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

/// Result of segmenting one token.
///
/// `suffixes` are ordered from the stem outward and `classes[i]` is the
/// class chosen for `suffixes[i]`. An apostrophe between stem and first
/// suffix is kept as the first character of `suffixes[0]`, so for every
/// result `stem + suffixes.concat() == surface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub stem: String,
    pub suffixes: Vec<String>,
    pub classes: Vec<ClassId>,
    pub valid: bool,
}

impl Segmentation {
    /// The whole surface as stem, no suffixes, not valid.
    pub fn unsegmented(surface: &str) -> Self {
        Self {
            stem: surface.to_string(),
            suffixes: Vec::new(),
            classes: Vec::new(),
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// `stem` followed by every suffix.
    pub fn reconstruct(&self) -> String {
        let mut out = self.stem.clone();
        for suffix in &self.suffixes {
            out.push_str(suffix);
        }
        out
    }

    /// Suffix surface without the joining apostrophe.
    pub fn suffix_body(suffix: &str) -> &str {
        suffix.trim_start_matches(is_apostrophe)
    }
}

// ---------------------------------------------------------------------------
// Segmenter
// ---------------------------------------------------------------------------

/// Segments tokens against one lexicon store.
#[derive(Debug, Clone)]
pub struct MorphologicalSegmenter<'a> {
    store: &'a LexiconStore,
    options: &'a SegmenterOptions,
}

impl<'a> MorphologicalSegmenter<'a> {
    pub fn new(store: &'a LexiconStore, options: &'a SegmenterOptions) -> Self {
        Self { store, options }
    }

    /// Segment a token surface.
    ///
    /// Accepted iff at least one suffix was stripped, the class path runs
    /// START -> ... -> ACCEPT, the stem is an L2 word and not an L1 word, and
    /// the whole token is not an L1 word. Otherwise the result is not valid
    /// and carries the pieces of the first path explored, if any.
    pub fn segment(&self, surface: &str) -> Segmentation {
        let original: Vec<char> = surface.chars().collect();
        let folded: Vec<char> = original.iter().map(|&c| fold_char(c)).collect();

        if is_contraction(&folded) {
            return Segmentation::unsegmented(surface);
        }
        let whole: String = folded.iter().collect();
        if self.store.contains_folded(&whole, Language::L1) {
            return Segmentation::unsegmented(surface);
        }

        let mut search = Search {
            folded: &folded,
            segmenter: self,
            path: Vec::new(),
            expanded: 0,
            first_leaf: None,
        };
        if search.run(folded.len()) {
            let path = std::mem::take(&mut search.path);
            return build(&original, &folded, &path, true);
        }
        if search.expanded >= self.options.max_nodes {
            debug!(surface, nodes = search.expanded, "segmentation search budget exhausted");
        }
        match search.first_leaf.take() {
            Some(path) if !path.is_empty() => build(&original, &folded, &path, false),
            _ => Segmentation::unsegmented(surface),
        }
    }
}

/// Segment `surface` with the given store and options.
pub fn segment(surface: &str, store: &LexiconStore, options: &SegmenterOptions) -> Segmentation {
    MorphologicalSegmenter::new(store, options).segment(surface)
}

/// Apostrophe-separated English contraction (`it's`, `we're`, `don't`).
pub fn is_contraction(folded: &[char]) -> bool {
    let apostrophes = folded.iter().filter(|&&c| c == '\'').count();
    if apostrophes != 1 {
        return false;
    }
    if folded.ends_with(&['n', '\'', 't']) {
        return true;
    }
    let Some(at) = folded.iter().position(|&c| c == '\'') else {
        return false;
    };
    let tail: String = folded[at + 1..].iter().collect();
    CONTRACTION_TAILS.contains(&tail.as_str())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One stripped suffix: where it starts in the token and which entry it is.
#[derive(Debug, Clone, Copy)]
struct Step {
    start: usize,
    entry: usize,
    class: ClassId,
}

struct Search<'s, 'a> {
    folded: &'s [char],
    segmenter: &'s MorphologicalSegmenter<'a>,
    /// Suffixes stripped so far, outermost first.
    path: Vec<Step>,
    expanded: usize,
    first_leaf: Option<Vec<Step>>,
}

impl Search<'_, '_> {
    /// Explore the remainder `folded[..end]`. Returns true when an accepted
    /// segmentation is left in `self.path`.
    fn run(&mut self, end: usize) -> bool {
        if !self.path.is_empty() && self.accepts_stem(end) {
            return true;
        }

        let options = self.segmenter.options;
        let at_stem_boundary = end > 0 && self.folded[end - 1] == '\'';
        if at_stem_boundary || self.path.len() >= options.max_suffixes {
            self.record_leaf();
            return false;
        }

        let candidates = self.candidates(end);
        if candidates.is_empty() {
            self.record_leaf();
            return false;
        }

        for (len, entry, class) in candidates {
            if self.expanded >= options.max_nodes {
                self.record_leaf();
                return false;
            }
            self.expanded += 1;
            self.path.push(Step {
                start: end - len,
                entry,
                class,
            });
            if self.run(end - len) {
                return true;
            }
            self.path.pop();
        }
        false
    }

    /// Ordered candidates `(length, entry, class)` for the remainder.
    fn candidates(&self, end: usize) -> Vec<(usize, usize, ClassId)> {
        let morphology = self.segmenter.store.morphology();
        let automaton = morphology.automaton();
        let inventory = morphology.inventory();
        let following = self.path.last().map(|step| step.class);

        let mut found: Vec<(usize, usize, ClassId)> = inventory
            .matching_suffixes(&self.folded[..end], self.segmenter.options.min_stem_chars)
            .into_iter()
            .filter_map(|index| {
                let entry = inventory.get(index)?;
                let licensed = match following {
                    None => automaton.can_end_with(entry.class),
                    Some(next) => automaton.can_precede(entry.class, next),
                };
                licensed.then(|| (entry.char_len(), index, entry.class))
            })
            .collect();
        // Stable sort keeps declaration order among full ties.
        found.sort_by(|a, b| {
            b.0.cmp(&a.0).then_with(|| {
                automaton
                    .predecessor_count(b.2)
                    .cmp(&automaton.predecessor_count(a.2))
            })
        });
        found
    }

    /// Whether `folded[..end]` is an accepted stem for the current path.
    fn accepts_stem(&self, end: usize) -> bool {
        let Some(first) = self.path.last() else {
            return false;
        };
        let store = self.segmenter.store;
        let options = self.segmenter.options;
        if !store.morphology().automaton().can_start_with(first.class) {
            return false;
        }
        let stem_end = if end > 0 && self.folded[end - 1] == '\'' {
            end - 1
        } else {
            end
        };
        if stem_end < options.min_stem_chars.max(1) {
            return false;
        }
        let stem = &self.folded[..stem_end];
        if !self.buffer_allows(stem, first) {
            return false;
        }
        let stem: String = stem.iter().collect();
        if options.excludes(&stem) {
            return false;
        }
        store.contains_folded(&stem, Language::L2) && !store.contains_folded(&stem, Language::L1)
    }

    /// Buffer-consonant check on the suffix nearest the stem.
    fn buffer_allows(&self, stem: &[char], first: &Step) -> bool {
        let options = self.segmenter.options;
        if options.buffer_letters.is_empty() {
            return true;
        }
        let starts_with_buffer = self
            .folded
            .get(first.start)
            .is_some_and(|c| options.buffer_letters.contains(c));
        if !starts_with_buffer {
            return true;
        }
        stem.last().is_some_and(|c| options.vowels.contains(c))
    }

    fn record_leaf(&mut self) {
        if self.first_leaf.is_none() {
            self.first_leaf = Some(self.path.clone());
        }
    }
}

/// Cut the original surface along a path of steps (outermost first).
fn build(original: &[char], folded: &[char], path: &[Step], valid: bool) -> Segmentation {
    let mut stem_end = path.last().map_or(original.len(), |step| step.start);
    if stem_end > 0 && folded[stem_end - 1] == '\'' {
        stem_end -= 1;
    }

    let mut suffixes = Vec::with_capacity(path.len());
    let mut classes = Vec::with_capacity(path.len());
    let mut start = stem_end;
    for (i, step) in path.iter().enumerate().rev() {
        let end = if i == 0 {
            original.len()
        } else {
            path[i - 1].start
        };
        suffixes.push(original[start..end].iter().collect());
        classes.push(step.class);
        start = end;
    }

    Segmentation {
        stem: original[..stem_end].iter().collect(),
        suffixes,
        classes,
        valid,
    }
}
