// Command-line arguments of the cs-* tools

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use codeswitch_annotate::export::ExportOptions;
use codeswitch_annotate::tokenizer::{BoundaryMode, DEFAULT_SEPARATOR};

use crate::CONFIG_ENV;

/// Options shared by every tool.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Engine configuration (TOML)
    #[arg(short, long, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Token, label and gloss columns with sentence meta rows
    #[default]
    Tsv,
    /// Item, Token, Label, Gloss spreadsheet layout
    Csv,
    /// Token and sentence records
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoundaryArg {
    Lines,
    Punctuation,
    BlankLines,
}

impl BoundaryArg {
    pub fn to_mode(self) -> BoundaryMode {
        match self {
            BoundaryArg::Lines => BoundaryMode::Lines,
            BoundaryArg::Punctuation => BoundaryMode::Punctuation,
            BoundaryArg::BlankLines => BoundaryMode::BlankLines {
                separator: DEFAULT_SEPARATOR.to_string(),
            },
        }
    }
}

/// Annotate bilingual text with token labels, glosses and sentence languages.
#[derive(Debug, Clone, Parser)]
#[command(name = "cs-annotate", version)]
pub struct AnnotateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Input text; stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    /// Per-token signal table with `token`, `p_l1` and optional `p_l2`, `ne` columns
    #[arg(short, long, value_name = "PATH")]
    pub signals: Option<PathBuf>,

    /// Named-entity list, one name per line; overrides the `ne` column
    #[arg(short = 'g', long, value_name = "PATH")]
    pub gazetteer: Option<PathBuf>,

    /// Override the configured sentence boundary mode
    #[arg(short, long, value_enum)]
    pub boundary: Option<BoundaryArg>,

    /// Override the configured confidence threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,

    #[arg(long)]
    pub no_sentence_ids: bool,

    #[arg(long)]
    pub no_matrix: bool,

    #[arg(long)]
    pub no_embedded: bool,

    /// Leave the gloss column empty
    #[arg(long)]
    pub no_gloss: bool,

    /// Annotate sentences one after another
    #[arg(long)]
    pub sequential: bool,
}

impl AnnotateArgs {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sentence_ids: !self.no_sentence_ids,
            matrix: !self.no_matrix,
            embedded: !self.no_embedded,
            glosses: !self.no_gloss,
        }
    }
}

/// Segment words into a stem and native suffixes and print their glosses.
#[derive(Debug, Clone, Parser)]
#[command(name = "cs-segment", version)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print rejected words too
    #[arg(short, long)]
    pub all: bool,

    /// Append the alternative glosses of ambiguous suffixes
    #[arg(short, long)]
    pub readings: bool,

    /// Words to segment; stdin (one per line) when absent
    pub words: Vec<String>,
}

/// Validate a configuration and print what it contains.
#[derive(Debug, Clone, Parser)]
#[command(name = "cs-check-config", version)]
pub struct CheckConfigArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Also print every class with its successors
    #[arg(long)]
    pub classes: bool,
}
