// cs-segment: Split foreign stems from native suffixes.
//
// For each word prints the word, its segmentation as `stem+suffix+...` and
// the suggested gloss, tab-separated. Words without a valid segmentation
// are skipped unless --all is given, in which case they print as `-`.
// With --readings a fourth column lists the other glosses, comma-separated.
//
// Usage:
//   cs-segment [-c CONFIG] [--all] [--readings] [WORD...]
//
// Options:
//   -c, --config PATH   Engine configuration (TOML)
//   -a, --all           Also print words that do not segment
//   -r, --readings      Also print alternative glosses
//   -h, --help          Print help

use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use codeswitch_annotate::Annotator;
use codeswitch_cli::args::SegmentArgs;

fn main() -> ExitCode {
    let args = SegmentArgs::parse();
    codeswitch_cli::init_logging(args.common.verbose);
    codeswitch_cli::exit_code(run(&args))
}

fn run(args: &SegmentArgs) -> anyhow::Result<()> {
    let (config, _) = codeswitch_cli::load_config(args.common.config.as_deref())?;
    let annotator = Annotator::new(config);

    let mut out = BufWriter::new(io::stdout().lock());
    if args.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                print_word(&annotator, word, args, &mut out)?;
            }
        }
    } else {
        for word in &args.words {
            print_word(&annotator, word, args, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn print_word(
    annotator: &Annotator,
    word: &str,
    args: &SegmentArgs,
    out: &mut impl Write,
) -> io::Result<()> {
    let segmentation = annotator.segment(word);
    if !segmentation.valid {
        if args.all {
            let rest = if args.readings { "\t-" } else { "" };
            writeln!(out, "{word}\t-\t-{rest}")?;
        }
        return Ok(());
    }
    let pieces: Vec<&str> = std::iter::once(segmentation.stem.as_str())
        .chain(segmentation.suffixes.iter().map(String::as_str))
        .collect();
    let glosses: Vec<String> = annotator
        .gloss_candidates(&segmentation)
        .iter()
        .map(|g| g.render(&segmentation.stem))
        .collect();
    let primary = glosses.first().map_or("-", String::as_str);
    write!(out, "{word}\t{}\t{primary}", pieces.join("+"))?;
    if args.readings {
        let others = glosses.get(1..).unwrap_or_default();
        if others.is_empty() {
            write!(out, "\t-")?;
        } else {
            write!(out, "\t{}", others.join(","))?;
        }
    }
    writeln!(out)
}
