// cs-check-config: Validate an engine configuration.
//
// Loads the configuration along the usual search path, prints a summary of
// its lexicons and suffix morphology, and warns about classes that can never
// take part in an accepted segmentation. Exits with status 1 if loading fails.
//
// Usage:
//   cs-check-config [-c CONFIG] [--classes]
//
// Options:
//   -c, --config PATH   Engine configuration (TOML)
//   --classes           Print every class with its successors
//   -h, --help          Print help

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use codeswitch_annotate::EngineConfig;
use codeswitch_cli::args::CheckConfigArgs;
use codeswitch_core::label::Language;
use tracing::warn;

fn main() -> ExitCode {
    let args = CheckConfigArgs::parse();
    codeswitch_cli::init_logging(args.common.verbose);
    codeswitch_cli::exit_code(run(&args))
}

fn run(args: &CheckConfigArgs) -> anyhow::Result<()> {
    let (config, origin) = codeswitch_cli::load_config(args.common.config.as_deref())?;
    let mut out = BufWriter::new(io::stdout().lock());

    writeln!(out, "configuration: {origin}")?;
    summarize(&config, &mut out)?;
    if args.classes {
        print_classes(&config, &mut out)?;
    }
    out.flush()?;

    let lexicon = config.lexicon();
    let overlap = lexicon
        .words(Language::L1)
        .overlap(lexicon.words(Language::L2));
    if overlap > 0 {
        warn!(words = overlap, "words listed in both lexicons");
    }
    let morphology = config.morphology();
    for class in morphology.automaton().dead_classes() {
        warn!(class = morphology.classes().name(class), "class lies on no accepting path");
    }
    Ok(())
}

fn summarize(config: &EngineConfig, out: &mut impl Write) -> io::Result<()> {
    let codes = config.codes();
    let lexicon = config.lexicon();
    let morphology = config.morphology();
    writeln!(out, "languages: {} / {}", codes.l1, codes.l2)?;
    writeln!(out, "threshold: {}", config.threshold())?;
    writeln!(out, "scripts: {:?}", config.scripts())?;
    writeln!(out, "boundary: {:?}", config.boundary())?;
    writeln!(
        out,
        "{} words: {}",
        codes.l1,
        lexicon.words(Language::L1).len()
    )?;
    writeln!(
        out,
        "{} words: {}",
        codes.l2,
        lexicon.words(Language::L2).len()
    )?;
    writeln!(out, "suffix classes: {}", morphology.classes().len())?;
    writeln!(out, "suffixes: {}", morphology.inventory().len())?;
    let segmenter = config.segmenter();
    writeln!(
        out,
        "segmentation: min stem {} chars, at most {} suffixes, {} nodes",
        segmenter.min_stem_chars, segmenter.max_suffixes, segmenter.max_nodes
    )
}

fn print_classes(config: &EngineConfig, out: &mut impl Write) -> io::Result<()> {
    let morphology = config.morphology();
    let classes = morphology.classes();
    let automaton = morphology.automaton();
    for (id, class) in classes.iter() {
        let next: Vec<&str> = automaton
            .successors(id)
            .into_iter()
            .map(|c| classes.name(c))
            .collect();
        let mut flags = Vec::new();
        if automaton.can_start_with(id) {
            flags.push("initial");
        }
        if class.accepting {
            flags.push("accepting");
        }
        if class.repeatable {
            flags.push("repeatable");
        }
        writeln!(
            out,
            "  {} [{}] tag={} -> {}",
            class.name,
            flags.join(","),
            class.tag.as_deref().unwrap_or("-"),
            if next.is_empty() {
                "-".to_string()
            } else {
                next.join(", ")
            }
        )?;
    }
    Ok(())
}
