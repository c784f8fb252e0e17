// Morphotactic automaton: START -> suffix classes -> ACCEPT
//
// States are the suffix classes plus the implicit START (bare stem) and
// ACCEPT (end of word). The segmenter strips suffixes right to left, so
// besides the forward check the automaton answers the reverse queries
// `can_end_with`, `can_precede` and `can_start_with`.

use crate::class::ClassId;

/// Ordering constraints between suffix classes.
///
/// A path `START -> c1 -> ... -> ck -> ACCEPT` is licensed iff `c1` may
/// start, each `ci -> ci+1` transition is allowed, and `ck` is accepting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphotacticAutomaton {
    /// START -> class transitions.
    initial: Vec<bool>,
    /// Row-major `from * n + to` transition matrix.
    transitions: Vec<bool>,
    /// class -> ACCEPT transitions.
    accepting: Vec<bool>,
}

impl MorphotacticAutomaton {
    /// Automaton over `class_count` classes with no transitions.
    pub fn new(class_count: usize) -> Self {
        Self {
            initial: vec![false; class_count],
            transitions: vec![false; class_count * class_count],
            accepting: vec![false; class_count],
        }
    }

    pub fn class_count(&self) -> usize {
        self.initial.len()
    }

    #[inline]
    fn contains(&self, class: ClassId) -> bool {
        class.index() < self.class_count()
    }

    #[inline]
    fn cell(&self, from: ClassId, to: ClassId) -> usize {
        from.index() * self.class_count() + to.index()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Allow `class` directly after the stem. Ids outside the automaton are
    /// ignored.
    pub fn allow_start(&mut self, class: ClassId) {
        if self.contains(class) {
            self.initial[class.index()] = true;
        }
    }

    /// Allow `to` directly after `from`.
    pub fn allow(&mut self, from: ClassId, to: ClassId) {
        if self.contains(from) && self.contains(to) {
            let cell = self.cell(from, to);
            self.transitions[cell] = true;
        }
    }

    /// Allow words to end with a suffix of `class`.
    pub fn set_accepting(&mut self, class: ClassId) {
        if self.contains(class) {
            self.accepting[class.index()] = true;
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn can_start_with(&self, class: ClassId) -> bool {
        self.contains(class) && self.initial[class.index()]
    }

    pub fn can_precede(&self, prev: ClassId, next: ClassId) -> bool {
        self.contains(prev) && self.contains(next) && self.transitions[self.cell(prev, next)]
    }

    pub fn can_end_with(&self, class: ClassId) -> bool {
        self.contains(class) && self.accepting[class.index()]
    }

    /// Number of states that may directly precede `class`, START counting
    /// as one. Used to rank candidates that keep more paths open.
    pub fn predecessor_count(&self, class: ClassId) -> usize {
        if !self.contains(class) {
            return 0;
        }
        let n = self.class_count();
        let from_classes = (0..n)
            .filter(|&from| self.transitions[from * n + class.index()])
            .count();
        from_classes + usize::from(self.initial[class.index()])
    }

    /// Classes that may directly follow `class`, in declaration order.
    pub fn successors(&self, class: ClassId) -> Vec<ClassId> {
        if !self.contains(class) {
            return Vec::new();
        }
        let n = self.class_count();
        let row = class.index() * n;
        (0..n)
            .filter(|&to| self.transitions[row + to])
            .map(ClassId::from_index)
            .collect()
    }

    /// Forward check of a complete class sequence.
    pub fn accepts(&self, classes: &[ClassId]) -> bool {
        let (Some(&first), Some(&last)) = (classes.first(), classes.last()) else {
            return false;
        };
        self.can_start_with(first)
            && classes.windows(2).all(|w| self.can_precede(w[0], w[1]))
            && self.can_end_with(last)
    }

    /// Classes reachable from START, as a mask indexed by class.
    pub fn reachable_from_start(&self) -> Vec<bool> {
        let n = self.class_count();
        let mut seen = self.initial.clone();
        let mut stack: Vec<usize> = (0..n).filter(|&c| seen[c]).collect();
        while let Some(from) = stack.pop() {
            for to in 0..n {
                if self.transitions[from * n + to] && !seen[to] {
                    seen[to] = true;
                    stack.push(to);
                }
            }
        }
        seen
    }

    /// Classes from which ACCEPT can be reached, as a mask indexed by class.
    pub fn co_reachable(&self) -> Vec<bool> {
        let n = self.class_count();
        let mut seen = self.accepting.clone();
        let mut stack: Vec<usize> = (0..n).filter(|&c| seen[c]).collect();
        while let Some(to) = stack.pop() {
            for from in 0..n {
                if self.transitions[from * n + to] && !seen[from] {
                    seen[from] = true;
                    stack.push(from);
                }
            }
        }
        seen
    }

    /// Whether any path START -> ... -> ACCEPT exists.
    pub fn has_accepting_path(&self) -> bool {
        self.reachable_from_start()
            .iter()
            .zip(&self.accepting)
            .any(|(&reached, &accepting)| reached && accepting)
    }

    /// Classes that lie on no START -> ACCEPT path.
    pub fn dead_classes(&self) -> Vec<ClassId> {
        let forward = self.reachable_from_start();
        let backward = self.co_reachable();
        (0..self.class_count())
            .filter(|&c| !(forward[c] && backward[c]))
            .map(ClassId::from_index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> ClassId {
        ClassId::from_index(i)
    }

    /// PLURAL(0) -> POSS(1) -> CASE(2), all may start, POSS and CASE and
    /// PLURAL accepting.
    fn nominal() -> MorphotacticAutomaton {
        let mut a = MorphotacticAutomaton::new(3);
        for c in 0..3 {
            a.allow_start(id(c));
            a.set_accepting(id(c));
        }
        a.allow(id(0), id(1));
        a.allow(id(0), id(2));
        a.allow(id(1), id(2));
        a
    }

    #[test]
    fn accepts_canonical_order() {
        let a = nominal();
        assert!(a.accepts(&[id(0)]));
        assert!(a.accepts(&[id(0), id(1), id(2)]));
        assert!(a.accepts(&[id(0), id(2)]));
    }

    #[test]
    fn rejects_reversed_order() {
        let a = nominal();
        assert!(!a.accepts(&[id(2), id(0)]));
        assert!(!a.accepts(&[id(1), id(0)]));
        assert!(!a.accepts(&[id(0), id(0)]));
    }

    #[test]
    fn rejects_empty_sequence() {
        assert!(!nominal().accepts(&[]));
    }

    #[test]
    fn rejects_non_accepting_last_class() {
        let mut a = MorphotacticAutomaton::new(2);
        a.allow_start(id(0));
        a.allow(id(0), id(1));
        a.set_accepting(id(1));
        assert!(!a.accepts(&[id(0)]));
        assert!(a.accepts(&[id(0), id(1)]));
        assert!(!a.accepts(&[id(1)]));
    }

    #[test]
    fn reverse_queries() {
        let a = nominal();
        assert!(a.can_end_with(id(2)));
        assert!(a.can_precede(id(1), id(2)));
        assert!(!a.can_precede(id(2), id(1)));
        assert!(a.can_start_with(id(1)));
        assert!(!a.can_start_with(id(7)));
    }

    #[test]
    fn predecessor_count_includes_start() {
        let a = nominal();
        assert_eq!(a.predecessor_count(id(0)), 1);
        assert_eq!(a.predecessor_count(id(1)), 2);
        assert_eq!(a.predecessor_count(id(2)), 3);
        assert_eq!(a.predecessor_count(id(9)), 0);
    }

    #[test]
    fn successors_in_declaration_order() {
        assert_eq!(nominal().successors(id(0)), vec![id(1), id(2)]);
        assert!(nominal().successors(id(2)).is_empty());
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let mut a = MorphotacticAutomaton::new(1);
        a.allow(id(0), id(5));
        a.allow_start(id(3));
        a.set_accepting(id(3));
        assert_eq!(a, MorphotacticAutomaton::new(1));
    }

    #[test]
    fn accepting_path_detection() {
        assert!(nominal().has_accepting_path());

        let mut a = MorphotacticAutomaton::new(2);
        a.allow_start(id(0));
        a.set_accepting(id(1));
        assert!(!a.has_accepting_path());
        a.allow(id(0), id(1));
        assert!(a.has_accepting_path());
    }

    #[test]
    fn dead_classes_lie_on_no_path() {
        let mut a = MorphotacticAutomaton::new(3);
        a.allow_start(id(0));
        a.set_accepting(id(0));
        // 1 is unreachable from START; 2 cannot reach ACCEPT.
        a.allow(id(1), id(0));
        a.allow(id(0), id(2));
        assert_eq!(a.dead_classes(), vec![id(1), id(2)]);
    }
}
