// Engine configuration: thresholds, scripts, lexicons and morphology
//
// Built once, validated eagerly, then shared immutably by every engine call.

use std::path::{Path, PathBuf};

use codeswitch_core::character::Script;
use codeswitch_core::label::Language;
use codeswitch_morph::{ClassSource, MorphError, Morphology, MorphologySource, SuffixSource};
use serde::Deserialize;
use tracing::info;

use crate::lexicon::{LexiconStore, WordSet};
use crate::segmenter::SegmenterOptions;
use crate::tokenizer::{BoundaryMode, DEFAULT_SEPARATOR};

/// Built-in Turkish / English configuration.
const BUILTIN_TR_EN: &str = include_str!("../data/tr-en.toml");

/// Default confidence threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("threshold {0} is outside (0.5, 1.0]")]
    Threshold(f64),

    #[error("language code for {0} is empty")]
    EmptyLanguageCode(Language),

    #[error("at least one script must be configured")]
    EmptyScripts,

    #[error("invalid segmentation settings: {0}")]
    InvalidSegmentation(String),

    #[error(transparent)]
    Morph(#[from] MorphError),
}

// ============================================================================
// Language codes
// ============================================================================

/// Display codes of the two languages (`TR`, `EN`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCodes {
    pub l1: String,
    pub l2: String,
}

impl LanguageCodes {
    pub fn code(&self, language: Language) -> &str {
        match language {
            Language::L1 => &self.l1,
            Language::L2 => &self.l2,
        }
    }
}

impl Default for LanguageCodes {
    fn default() -> Self {
        Self {
            l1: Language::L1.as_str().to_string(),
            l2: Language::L2.as_str().to_string(),
        }
    }
}

// ============================================================================
// EngineConfig
// ============================================================================

/// Immutable engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    codes: LanguageCodes,
    threshold: f64,
    scripts: Vec<Script>,
    segmenter: SegmenterOptions,
    boundary: BoundaryMode,
    lexicon: LexiconStore,
}

impl EngineConfig {
    /// Configuration over `lexicon` with default threshold (0.8), Latin
    /// script only, codes `L1`/`L2`, line-based sentences.
    pub fn new(lexicon: LexiconStore) -> Self {
        Self {
            codes: LanguageCodes::default(),
            threshold: DEFAULT_THRESHOLD,
            scripts: vec![Script::Latin],
            segmenter: SegmenterOptions::default(),
            boundary: BoundaryMode::default(),
            lexicon,
        }
    }

    /// Set the confidence threshold θ; must lie in (0.5, 1.0].
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        if !(threshold > 0.5 && threshold <= 1.0) {
            return Err(ConfigError::Threshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Set the scripts the two languages are written in.
    pub fn with_scripts(mut self, scripts: Vec<Script>) -> Result<Self, ConfigError> {
        if scripts.is_empty() {
            return Err(ConfigError::EmptyScripts);
        }
        self.scripts = scripts;
        Ok(self)
    }

    pub fn with_codes(mut self, l1: &str, l2: &str) -> Result<Self, ConfigError> {
        let (l1, l2) = (l1.trim(), l2.trim());
        if l1.is_empty() {
            return Err(ConfigError::EmptyLanguageCode(Language::L1));
        }
        if l2.is_empty() {
            return Err(ConfigError::EmptyLanguageCode(Language::L2));
        }
        self.codes = LanguageCodes {
            l1: l1.to_string(),
            l2: l2.to_string(),
        };
        Ok(self)
    }

    pub fn with_segmenter(mut self, options: SegmenterOptions) -> Result<Self, ConfigError> {
        if options.max_suffixes == 0 {
            return Err(ConfigError::InvalidSegmentation(
                "max_suffixes must be at least 1".to_string(),
            ));
        }
        if options.max_nodes == 0 {
            return Err(ConfigError::InvalidSegmentation(
                "max_nodes must be at least 1".to_string(),
            ));
        }
        if !options.buffer_letters.is_empty() && options.vowels.is_empty() {
            return Err(ConfigError::InvalidSegmentation(
                "buffer_letters requires vowels".to_string(),
            ));
        }
        self.segmenter = options;
        Ok(self)
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// The built-in Turkish / English configuration.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_TR_EN, None)
    }

    /// Load a configuration file. Relative word-list paths resolve against
    /// the file's directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path.parent())
    }

    /// Parse a configuration from TOML text. `base_dir` anchors relative
    /// word-list paths; without it they resolve against the working
    /// directory.
    pub fn from_toml_str(text: &str, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;

        let morphology = Morphology::from_source(&MorphologySource {
            classes: file.classes,
            suffixes: file.suffixes,
        })?;
        let l1 = file.lexicons.l1.load(base_dir);
        let l2 = file.lexicons.l2.load(base_dir);
        info!(
            l1_words = l1.len(),
            l2_words = l2.len(),
            classes = morphology.classes().len(),
            suffixes = morphology.inventory().len(),
            "configuration loaded"
        );

        let boundary = match file.boundary.mode {
            BoundaryKind::Lines => BoundaryMode::Lines,
            BoundaryKind::Punctuation => BoundaryMode::Punctuation,
            BoundaryKind::BlankLines => BoundaryMode::BlankLines {
                separator: file.boundary.separator,
            },
        };
        let segmentation = file.segmentation;

        Self::new(LexiconStore::new(l1, l2, morphology))
            .with_codes(&file.languages.l1, &file.languages.l2)?
            .with_threshold(file.decision.threshold)?
            .with_scripts(file.decision.scripts)?
            .with_segmenter(SegmenterOptions {
                min_stem_chars: segmentation.min_stem_chars,
                max_suffixes: segmentation.max_suffixes,
                max_nodes: segmentation.max_nodes,
                buffer_letters: segmentation.buffer_letters.chars().collect(),
                vowels: segmentation.vowels.chars().collect(),
                excluded_stems: Vec::new(),
            }
            .with_excluded_stems(&segmentation.excluded_stems))
            .map(|config| config.with_boundary(boundary))
    }

    pub fn codes(&self) -> &LanguageCodes {
        &self.codes
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    pub fn segmenter(&self) -> &SegmenterOptions {
        &self.segmenter
    }

    pub fn boundary(&self) -> &BoundaryMode {
        &self.boundary
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn morphology(&self) -> &Morphology {
        self.lexicon.morphology()
    }
}

// ============================================================================
// File format
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    languages: LanguagesSection,
    #[serde(default)]
    decision: DecisionSection,
    #[serde(default)]
    segmentation: SegmentationSection,
    #[serde(default)]
    boundary: BoundarySection,
    #[serde(default)]
    lexicons: LexiconsSection,
    #[serde(default)]
    classes: Vec<ClassSource>,
    #[serde(default)]
    suffixes: Vec<SuffixSource>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LanguagesSection {
    l1: String,
    l2: String,
}

impl Default for LanguagesSection {
    fn default() -> Self {
        let codes = LanguageCodes::default();
        Self {
            l1: codes.l1,
            l2: codes.l2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DecisionSection {
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default = "default_scripts")]
    scripts: Vec<Script>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_scripts() -> Vec<Script> {
    vec![Script::Latin]
}

impl Default for DecisionSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            scripts: default_scripts(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SegmentationSection {
    min_stem_chars: usize,
    max_suffixes: usize,
    max_nodes: usize,
    /// Letters as one string, e.g. `"yn"`.
    buffer_letters: String,
    vowels: String,
    excluded_stems: Vec<String>,
}

impl Default for SegmentationSection {
    fn default() -> Self {
        let options = SegmenterOptions::default();
        Self {
            min_stem_chars: options.min_stem_chars,
            max_suffixes: options.max_suffixes,
            max_nodes: options.max_nodes,
            buffer_letters: String::new(),
            vowels: String::new(),
            excluded_stems: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BoundaryKind {
    #[default]
    Lines,
    Punctuation,
    BlankLines,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BoundarySection {
    mode: BoundaryKind,
    separator: String,
}

impl Default for BoundarySection {
    fn default() -> Self {
        Self {
            mode: BoundaryKind::Lines,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconsSection {
    #[serde(default)]
    l1: WordSource,
    #[serde(default)]
    l2: WordSource,
}

/// Inline words plus word-list files of one language.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WordSource {
    words: Vec<String>,
    paths: Vec<PathBuf>,
}

impl WordSource {
    fn load(&self, base_dir: Option<&Path>) -> WordSet {
        let mut set = WordSet::from_words(&self.words);
        for path in &self.paths {
            let resolved = match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            };
            set.load_file(&resolved);
        }
        set
    }
}
