// Annotator: document-level integration point
//
// Owns the configuration and runs text -> sentences -> tokens -> signals ->
// decision (+ segmentation, gloss) -> aggregation. Sentences are independent
// once tokenized, so they may be processed concurrently; each sentence's
// aggregator is owned by the worker handling it.

use codeswitch_core::label::Label;
use codeswitch_core::signal::LidResult;
use codeswitch_core::token::{SentenceSpan, Token};

use crate::aggregate::{SentenceAggregator, SentenceLanguages, aggregate};
use crate::config::EngineConfig;
use crate::decision::{annotate_token, decide};
use crate::gloss::{Gloss, GlossSuggester};
use crate::segmenter::{MorphologicalSegmenter, Segmentation};
use crate::signals::{
    Degradation, EntityRecognizer, LanguageIdentifier, TokenSignals, resolve_signals,
};
use crate::tokenizer::{split_sentences, tokenize_range};

/// Annotation of one token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAnnotation {
    pub token: Token,
    pub label: Label,
    pub signals: TokenSignals,
    /// Present when the segmenter ran for this token.
    pub segmentation: Option<Segmentation>,
    /// Present only on MIXED tokens.
    pub gloss: Option<Gloss>,
}

/// Annotation of one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSentence {
    pub span: SentenceSpan,
    pub tokens: Vec<TokenAnnotation>,
    pub languages: SentenceLanguages,
    pub degradation: Degradation,
}

impl AnnotatedSentence {
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.tokens.iter().map(|t| t.label)
    }
}

/// Annotation of a whole text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotatedDocument {
    pub sentences: Vec<AnnotatedSentence>,
    /// Fallbacks summed over all sentences.
    pub degradation: Degradation,
}

impl AnnotatedDocument {
    fn from_sentences(sentences: Vec<AnnotatedSentence>) -> Self {
        let mut degradation = Degradation::default();
        for sentence in &sentences {
            degradation.merge(sentence.degradation);
        }
        Self {
            sentences,
            degradation,
        }
    }

    /// Every token annotation in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenAnnotation> + '_ {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }
}

/// Top-level annotation handle.
#[derive(Debug, Clone)]
pub struct Annotator {
    config: EngineConfig,
}

impl Annotator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sentence spans of `text` with their tokens. Token ordinals run over
    /// the whole document.
    pub fn sentences(&self, text: &str) -> Vec<(SentenceSpan, Vec<Token>)> {
        let chars: Vec<char> = text.chars().collect();
        let mut next_index = 0;
        split_sentences(text, self.config.boundary())
            .into_iter()
            .map(|span| {
                let tokens = tokenize_range(&chars, span.start, span.end, next_index);
                next_index += tokens.len();
                (span, tokens)
            })
            .collect()
    }

    /// Annotate a text sentence by sentence.
    pub fn annotate(
        &self,
        text: &str,
        lid: &dyn LanguageIdentifier,
        ner: &dyn EntityRecognizer,
    ) -> AnnotatedDocument {
        let sentences = self
            .sentences(text)
            .into_iter()
            .map(|(span, tokens)| self.annotate_sentence(span, tokens, lid, ner))
            .collect();
        AnnotatedDocument::from_sentences(sentences)
    }

    /// Annotate a text with sentences processed concurrently. The result is
    /// identical to [`annotate`](Self::annotate).
    #[cfg(feature = "parallel")]
    pub fn annotate_parallel(
        &self,
        text: &str,
        lid: &dyn LanguageIdentifier,
        ner: &dyn EntityRecognizer,
    ) -> AnnotatedDocument {
        use rayon::prelude::*;

        let sentences = self
            .sentences(text)
            .into_par_iter()
            .map(|(span, tokens)| self.annotate_sentence(span, tokens, lid, ner))
            .collect();
        AnnotatedDocument::from_sentences(sentences)
    }

    /// Annotate the tokens of one sentence.
    pub fn annotate_sentence(
        &self,
        span: SentenceSpan,
        tokens: Vec<Token>,
        lid: &dyn LanguageIdentifier,
        ner: &dyn EntityRecognizer,
    ) -> AnnotatedSentence {
        let (signals, degradation) = resolve_signals(&tokens, lid, ner);
        let mut aggregator = SentenceAggregator::new();
        let annotations = tokens
            .into_iter()
            .zip(signals)
            .map(|(token, signals)| {
                let decision = annotate_token(&token, &signals.lid, signals.ne, &self.config);
                aggregator.push(decision.label);
                TokenAnnotation {
                    token,
                    label: decision.label,
                    signals,
                    segmentation: decision.segmentation,
                    gloss: decision.gloss,
                }
            })
            .collect();
        AnnotatedSentence {
            span,
            tokens: annotations,
            languages: aggregator.resolve(),
            degradation,
        }
    }

    pub fn decide(
        &self,
        token: &Token,
        lid: &LidResult,
        ne_flag: bool,
        segmentation: &Segmentation,
    ) -> Label {
        decide(token, lid, ne_flag, segmentation, &self.config)
    }

    pub fn segment(&self, surface: &str) -> Segmentation {
        MorphologicalSegmenter::new(self.config.lexicon(), self.config.segmenter()).segment(surface)
    }

    pub fn gloss(&self, segmentation: &Segmentation) -> Option<Gloss> {
        GlossSuggester::new(self.config.morphology()).suggest(segmentation)
    }

    /// All readings of a segmentation, the primary gloss first.
    pub fn gloss_candidates(&self, segmentation: &Segmentation) -> Vec<Gloss> {
        GlossSuggester::new(self.config.morphology()).candidates(segmentation)
    }

    pub fn aggregate<I>(&self, labels: I) -> SentenceLanguages
    where
        I: IntoIterator<Item = Label>,
    {
        aggregate(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{NoSignals, SignalTable, UpstreamError};
    use crate::tokenizer::BoundaryMode;
    use codeswitch_core::label::{Language, MatrixLanguage};

    fn annotator() -> Annotator {
        Annotator::new(EngineConfig::builtin().unwrap())
    }

    fn table() -> SignalTable {
        SignalTable::parse(
            "token\tp_l1\tne\n\
             bug\u{00FC}n\t0.95\t0\n\
             var\t0.9\t0\n\
             meeting\t0.1\t0\n\
             meetingde\t0.4\t0\n\
             Ahmet\t0.6\t1\n",
        )
        .unwrap()
    }

    #[test]
    fn token_ordinals_are_global() {
        let annotator = annotator();
        let sentences = annotator.sentences("bir iki\n\u{00FC}\u{00E7}\n");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].1[0].index, 2);
        assert_eq!(sentences[1].1[0].pos, 8);
    }

    #[test]
    fn annotates_a_document() {
        let annotator = annotator();
        let table = table();
        let doc = annotator.annotate("Bug\u{00FC}n meeting var.\nAhmet meetingde.", &table, &table);
        assert_eq!(doc.sentences.len(), 2);

        let first: Vec<Label> = doc.sentences[0].labels().collect();
        assert_eq!(first, [Label::L1, Label::L2, Label::L1, Label::Other]);
        assert_eq!(
            doc.sentences[0].languages.matrix,
            MatrixLanguage::Dominant(Language::L1)
        );
        assert_eq!(doc.sentences[0].languages.embedded, Some(Language::L2));

        let second = &doc.sentences[1];
        assert_eq!(second.tokens[0].label, Label::Ne);
        assert_eq!(second.tokens[1].label, Label::Mixed);
        assert_eq!(second.tokens[1].gloss.as_ref().unwrap().to_string(), "LOC");
        assert_eq!(second.languages.matrix, MatrixLanguage::Undefined);

        // "." is missing from the table but never looked up.
        assert_eq!(doc.degradation.lid, 0);
        assert!(!doc.degradation.ne);
        assert_eq!(doc.token_count(), 7);
    }

    #[test]
    fn missing_collaborators_degrade_without_failing() {
        let annotator = annotator();
        let doc = annotator.annotate("meeting var 2024", &NoSignals, &NoSignals);
        let labels: Vec<Label> = doc.tokens().map(|t| t.label).collect();
        // Neutral probabilities resolve no lexicon rule.
        assert_eq!(labels, [Label::Uid, Label::Uid, Label::Other]);
        // The number is labelled without a language signal.
        assert_eq!(doc.degradation, Degradation { lid: 2, ne: true });
    }

    #[test]
    fn closure_identifier() {
        let annotator = annotator();
        let all_l1 = |_: &Token| -> Result<LidResult, UpstreamError> { Ok(LidResult::from_l1(1.0)?) };
        let doc = annotator.annotate("bug\u{00FC}n var", &all_l1, &NoSignals);
        assert!(doc.tokens().all(|t| t.label == Label::L1));
    }

    #[test]
    fn boundary_mode_comes_from_config() {
        let config = EngineConfig::builtin()
            .unwrap()
            .with_boundary(BoundaryMode::Punctuation);
        let annotator = Annotator::new(config);
        let doc = annotator.annotate("Geldim. Sen de gel!", &NoSignals, &NoSignals);
        assert_eq!(doc.sentences.len(), 2);
    }

    #[test]
    fn component_operations() {
        let annotator = annotator();
        let segmentation = annotator.segment("scrolllayorum");
        assert!(segmentation.valid);
        assert_eq!(
            annotator.gloss(&segmentation).unwrap().render(&segmentation.stem),
            "scroll-VBLZ-PROG-1SG"
        );
        let token = Token::new(0, "scrolllayorum", 0);
        assert_eq!(
            annotator.decide(&token, &LidResult::neutral(), false, &segmentation),
            Label::Mixed
        );
        let languages = annotator.aggregate([Label::L2, Label::L2, Label::Mixed]);
        assert_eq!(languages.matrix, MatrixLanguage::Dominant(Language::L2));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let annotator = annotator();
        let table = table();
        let text = "Bug\u{00FC}n meeting var.\nAhmet meetingde.\n\nscrolllayorum 2024\nok";
        assert_eq!(
            annotator.annotate_parallel(text, &table, &table),
            annotator.annotate(text, &table, &table)
        );
    }
}
