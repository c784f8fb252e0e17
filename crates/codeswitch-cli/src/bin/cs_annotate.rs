// cs-annotate: Label every token of a bilingual text.
//
// Reads text from a file or stdin, splits it into sentences and tokens, and
// prints one row per token with its label and, for MIXED tokens, a gloss.
// Each sentence is followed by its id, matrix and embedded language rows.
//
// Usage:
//   cs-annotate [-c CONFIG] [-s SIGNALS] [-g GAZETTEER] [-f tsv|csv|json] [INPUT]
//
// Options:
//   -c, --config PATH       Engine configuration (TOML)
//   -s, --signals PATH      Per-token language probabilities and entity flags
//   -g, --gazetteer PATH    Named-entity list, one name per line
//   -f, --format FORMAT     tsv (default), csv or json
//   -o, --output PATH       Write to a file instead of stdout
//   -h, --help              Print help

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use codeswitch_annotate::export::{self, ExportOptions};
use codeswitch_annotate::signals::{Gazetteer, NoSignals, SignalTable};
use codeswitch_annotate::{AnnotatedDocument, Annotator, EntityRecognizer, LanguageIdentifier};
use codeswitch_cli::args::{AnnotateArgs, OutputFormat};
use codeswitch_core::label::Label;
use tracing::{info, warn};

fn main() -> ExitCode {
    let args = AnnotateArgs::parse();
    codeswitch_cli::init_logging(args.common.verbose);
    codeswitch_cli::exit_code(run(&args))
}

fn run(args: &AnnotateArgs) -> anyhow::Result<()> {
    let (mut config, origin) = codeswitch_cli::load_config(args.common.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold)?;
    }
    if let Some(boundary) = args.boundary {
        config = config.with_boundary(boundary.to_mode());
    }
    info!(config = %origin, threshold = config.threshold(), "engine ready");

    let table = match &args.signals {
        Some(path) => Some(
            SignalTable::from_path(path)
                .with_context(|| format!("failed to load signals {}", path.display()))?,
        ),
        None => None,
    };
    let gazetteer = match &args.gazetteer {
        Some(path) => Some(
            Gazetteer::from_path(path)
                .with_context(|| format!("failed to load gazetteer {}", path.display()))?,
        ),
        None => None,
    };

    let lid: &dyn LanguageIdentifier = match &table {
        Some(table) => table,
        None => &NoSignals,
    };
    let ner: &dyn EntityRecognizer = match (&gazetteer, &table) {
        (Some(gazetteer), _) => gazetteer,
        (None, Some(table)) => table,
        (None, None) => &NoSignals,
    };

    let text = codeswitch_cli::read_input(args.input.as_deref())?;
    let annotator = Annotator::new(config);
    let doc = if args.sequential {
        annotator.annotate(&text, lid, ner)
    } else {
        annotator.annotate_parallel(&text, lid, ner)
    };
    report(&doc);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_document(&doc, &annotator, args.format, &args.export_options(), file)
        }
        None => write_document(
            &doc,
            &annotator,
            args.format,
            &args.export_options(),
            io::stdout().lock(),
        ),
    }
}

fn write_document<W: Write>(
    doc: &AnnotatedDocument,
    annotator: &Annotator,
    format: OutputFormat,
    options: &ExportOptions,
    writer: W,
) -> anyhow::Result<()> {
    let mut out = BufWriter::new(writer);
    let codes = annotator.config().codes();
    match format {
        OutputFormat::Tsv => out.write_all(export::to_tsv(doc, codes, options).as_bytes())?,
        OutputFormat::Csv => export::write_csv(doc, codes, options, &mut out)?,
        OutputFormat::Json => writeln!(out, "{}", export::to_json(doc)?)?,
    }
    out.flush()?;
    Ok(())
}

fn report(doc: &AnnotatedDocument) {
    let mixed = doc.tokens().filter(|t| t.label == Label::Mixed).count();
    info!(
        sentences = doc.sentences.len(),
        tokens = doc.token_count(),
        mixed,
        "annotated"
    );
    if doc.degradation.lid > 0 {
        warn!(
            tokens = doc.degradation.lid,
            "language identifier unavailable, used neutral probabilities"
        );
    }
    if doc.degradation.ne {
        warn!("entity recognizer unavailable, no tokens flagged as entities");
    }
}
