// Label decision: strict-priority rules over token class, signals and lexicons
//
//   1. numeric / punctuation / symbol              -> OTHER
//   2. entity flag                                 -> NE
//   3. p_l1 >= θ and token in L1 lexicon           -> L1
//   4. p_l2 >= θ and token in L2 lexicon           -> L2
//   5. accepted segmentation                       -> MIXED
//   6. in neither lexicon, and both p < θ or
//      letters outside the configured scripts     -> LANG3
//   7. otherwise                                   -> UID
//
// The first rule that matches wins. Rules 1-4 never need the segmenter, so
// it only runs for tokens they leave open.

use codeswitch_core::character::{Script, fold_case, script_of};
use codeswitch_core::label::{Label, Language};
use codeswitch_core::signal::LidResult;
use codeswitch_core::token::Token;

use crate::config::EngineConfig;
use crate::gloss::{Gloss, GlossSuggester};
use crate::segmenter::{MorphologicalSegmenter, Segmentation};

/// Label of one token with the intermediate results that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDecision {
    pub label: Label,
    /// Present when the segmenter ran.
    pub segmentation: Option<Segmentation>,
    /// Present only on MIXED tokens.
    pub gloss: Option<Gloss>,
}

/// Decide the label of a token. Pure and total.
pub fn decide(
    token: &Token,
    lid: &LidResult,
    ne_flag: bool,
    segmentation: &Segmentation,
    config: &EngineConfig,
) -> Label {
    let folded = fold_case(&token.surface);
    strict_rules(token, &folded, lid, ne_flag, config)
        .unwrap_or_else(|| fallback_rules(token, &folded, lid, segmentation, config))
}

/// Decide a token, segmenting it only when rules 1-4 leave it open, and
/// gloss it when it is MIXED.
pub fn annotate_token(
    token: &Token,
    lid: &LidResult,
    ne_flag: bool,
    config: &EngineConfig,
) -> TokenDecision {
    let folded = fold_case(&token.surface);
    if let Some(label) = strict_rules(token, &folded, lid, ne_flag, config) {
        return TokenDecision {
            label,
            segmentation: None,
            gloss: None,
        };
    }

    let segmentation =
        MorphologicalSegmenter::new(config.lexicon(), config.segmenter()).segment(&token.surface);
    let label = fallback_rules(token, &folded, lid, &segmentation, config);
    let gloss = match label {
        Label::Mixed => GlossSuggester::new(config.morphology()).suggest(&segmentation),
        _ => None,
    };
    TokenDecision {
        label,
        segmentation: Some(segmentation),
        gloss,
    }
}

/// Rules 1-4.
fn strict_rules(
    token: &Token,
    folded: &str,
    lid: &LidResult,
    ne_flag: bool,
    config: &EngineConfig,
) -> Option<Label> {
    if token.char_class.is_non_linguistic() {
        return Some(Label::Other);
    }
    if ne_flag {
        return Some(Label::Ne);
    }
    let lexicon = config.lexicon();
    let threshold = config.threshold();
    if lid.p_l1() >= threshold && lexicon.contains_folded(folded, Language::L1) {
        return Some(Label::L1);
    }
    if lid.p_l2() >= threshold && lexicon.contains_folded(folded, Language::L2) {
        return Some(Label::L2);
    }
    None
}

/// Rules 5-7.
fn fallback_rules(
    token: &Token,
    folded: &str,
    lid: &LidResult,
    segmentation: &Segmentation,
    config: &EngineConfig,
) -> Label {
    if segmentation.valid {
        return Label::Mixed;
    }
    let lexicon = config.lexicon();
    let known = lexicon.contains_folded(folded, Language::L1)
        || lexicon.contains_folded(folded, Language::L2);
    let threshold = config.threshold();
    let unconfident = lid.p_l1() < threshold && lid.p_l2() < threshold;
    if !known && (unconfident || uses_foreign_script(&token.surface, config.scripts())) {
        return Label::Lang3;
    }
    Label::Uid
}

/// Whether any letter of `surface` is written in a script outside `scripts`.
pub fn uses_foreign_script(surface: &str, scripts: &[Script]) -> bool {
    surface
        .chars()
        .filter_map(script_of)
        .any(|script| !scripts.contains(&script))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{LexiconStore, WordSet};
    use codeswitch_morph::{ClassId, ClassSource, Morphology, MorphologySource, SuffixSource};

    fn config() -> EngineConfig {
        let source = MorphologySource {
            classes: vec![ClassSource {
                accepting: true,
                ..ClassSource::new("CASE")
            }],
            suffixes: vec![SuffixSource::new("de", "CASE", Some("LOC"))],
        };
        let store = LexiconStore::new(
            WordSet::from_words(["bug\u{00FC}n", "var", "film", "2024"]),
            WordSet::from_words(["car", "meeting", "film"]),
            Morphology::from_source(&source).unwrap(),
        );
        EngineConfig::new(store).with_threshold(0.7).unwrap()
    }

    fn lid(p_l1: f64) -> LidResult {
        LidResult::from_l1(p_l1).unwrap()
    }

    fn accepted(stem: &str, suffix: &str) -> Segmentation {
        Segmentation {
            stem: stem.to_string(),
            suffixes: vec![suffix.to_string()],
            classes: vec![ClassId::from_index(0)],
            valid: true,
        }
    }

    fn label(surface: &str, p_l1: f64, ne: bool, seg: Option<Segmentation>) -> Label {
        let token = Token::new(0, surface, 0);
        let seg = seg.unwrap_or_else(|| Segmentation::unsegmented(surface));
        decide(&token, &lid(p_l1), ne, &seg, &config())
    }

    #[test]
    fn each_rule_alone() {
        assert_eq!(label("2024", 0.5, false, None), Label::Other);
        assert_eq!(label("Ahmet", 0.5, true, None), Label::Ne);
        assert_eq!(label("var", 0.9, false, None), Label::L1);
        assert_eq!(label("car", 0.1, false, None), Label::L2);
        assert_eq!(
            label("meetingde", 0.5, false, Some(accepted("meeting", "de"))),
            Label::Mixed
        );
        assert_eq!(label("xyzzy", 0.5, false, None), Label::Lang3);
        assert_eq!(label("car", 0.5, false, None), Label::Uid);
    }

    #[test]
    fn rule_pair_conflicts() {
        // (higher rule, lower rule, surface, p_l1, ne, segmentation, expected)
        let seg = || Some(accepted("fi", "lm"));
        let cases: Vec<(u8, u8, &str, f64, bool, Option<Segmentation>, Label)> = vec![
            (1, 2, "2024", 0.5, true, None, Label::Other),
            (1, 3, "2024", 0.95, false, None, Label::Other),
            (1, 5, "2024", 0.5, false, seg(), Label::Other),
            (2, 3, "var", 0.95, true, None, Label::Ne),
            (2, 4, "car", 0.05, true, None, Label::Ne),
            (2, 5, "film", 0.5, true, seg(), Label::Ne),
            (2, 6, "xyzzy", 0.5, true, None, Label::Ne),
            (3, 5, "film", 0.9, false, seg(), Label::L1),
            (4, 5, "film", 0.1, false, seg(), Label::L2),
            (5, 6, "xyzzy", 0.5, false, seg(), Label::Mixed),
            (5, 7, "film", 0.5, false, seg(), Label::Mixed),
            (6, 7, "xyzzy", 0.5, false, None, Label::Lang3),
        ];
        for (high, low, surface, p_l1, ne, seg, expected) in cases {
            assert_eq!(
                label(surface, p_l1, ne, seg),
                expected,
                "rule {high} over rule {low} for {surface:?}"
            );
        }
    }

    #[test]
    fn lexicon_hit_below_threshold_is_uid() {
        assert_eq!(label("var", 0.69, false, None), Label::Uid);
        assert_eq!(label("Bug\u{00FC}n", 0.7, false, None), Label::L1);
    }

    #[test]
    fn confident_unknown_word_is_uid() {
        assert_eq!(label("xyzzy", 0.95, false, None), Label::Uid);
    }

    #[test]
    fn foreign_script_is_lang3_even_when_confident() {
        assert_eq!(label("\u{043F}\u{0440}\u{0438}\u{0432}\u{0435}\u{0442}", 0.95, false, None), Label::Lang3);
        assert!(uses_foreign_script("caf\u{00E9}\u{4E2D}", &[Script::Latin]));
        assert!(!uses_foreign_script("\u{00E7}ok-g\u{00FC}zel'di", &[Script::Latin]));
    }

    #[test]
    fn annotate_token_skips_segmenter_when_resolved() {
        let config = config();
        let token = Token::new(0, "meeting", 0);
        let decision = annotate_token(&token, &lid(0.1), false, &config);
        assert_eq!(decision.label, Label::L2);
        assert!(decision.segmentation.is_none());
        assert!(decision.gloss.is_none());
    }

    #[test]
    fn annotate_token_segments_and_glosses_mixed() {
        let config = config();
        let token = Token::new(0, "meetingde", 0);
        let decision = annotate_token(&token, &lid(0.4), false, &config);
        assert_eq!(decision.label, Label::Mixed);
        let segmentation = decision.segmentation.unwrap();
        assert_eq!(segmentation.stem, "meeting");
        assert_eq!(decision.gloss.unwrap().tags, ["LOC"]);
    }

    #[test]
    fn annotate_token_without_accepted_segmentation() {
        let config = config();
        let token = Token::new(0, "qwerty", 0);
        let decision = annotate_token(&token, &LidResult::neutral(), false, &config);
        assert_eq!(decision.label, Label::Lang3);
        assert!(decision.segmentation.is_some_and(|s| !s.valid));
        assert!(decision.gloss.is_none());
    }
}
