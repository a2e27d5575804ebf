// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `extract`    — one document → JSON result
//   2. `batch`      — a directory of documents → JSON per document
//   3. `heuristics` — write the default heuristics file
//
// JSON goes to stdout (or a file); human-readable summaries go
// to stderr so the two can be piped separately.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{BatchArgs, Commands, ExtractArgs, HeuristicsArgs};

use crate::application::extract_use_case::ExtractConfig;
use crate::infra::skip_log::SkipLog;

#[derive(Parser, Debug)]
#[command(
    name = "exam-pdf-extract",
    version,
    about = "Extract multiple-choice questions from PDF question banks into JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching handler. The CLI layer only routes
    /// and prints, it never parses documents itself.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Extract(args)    => run_extract(args),
            Commands::Batch(args)      => run_batch(args),
            Commands::Heuristics(args) => run_heuristics(args),
        }
    }
}

fn open_skip_log(dir: Option<&std::path::PathBuf>) -> Result<Option<SkipLog>> {
    dir.map(SkipLog::new).transpose()
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    use crate::application::extract_use_case::ExtractUseCase;
    use crate::infra::result_writer;

    let config   = ExtractConfig::try_from(&args.options)?;
    let skip_log = open_skip_log(args.options.skip_log.as_ref())?;
    let use_case = ExtractUseCase::new(config)?;

    let report = use_case
        .execute(&args.input)
        .with_context(|| format!("Extraction failed for '{}'", args.input.display()))?;

    if let Some(log) = &skip_log {
        log.log_all(&report.source, &report.skipped)?;
    }

    match &args.output {
        Some(path) => result_writer::write_json(&report.result, path)?,
        None       => result_writer::write_stdout(&report.result)?,
    }

    eprintln!(
        "{}: {} questions extracted ({} skipped)",
        report.result.metadata.title,
        report.result.questions.len(),
        report.skipped.len()
    );
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    use crate::application::batch_use_case::BatchUseCase;

    tracing::info!("Starting batch extraction in '{}'", args.input_dir.display());

    let config   = ExtractConfig::try_from(&args.options)?;
    let skip_log = open_skip_log(args.options.skip_log.as_ref())?;
    let use_case = BatchUseCase::new(config, &args.output_dir, skip_log)?;
    let summary  = use_case.execute(&args.input_dir)?;

    for (path, error) in &summary.failed {
        eprintln!("failed: {}: {}", path.display(), error);
    }
    eprintln!(
        "{} documents written to '{}': {} questions ({} skipped), {} failed",
        summary.written.len(),
        args.output_dir.display(),
        summary.questions,
        summary.skipped,
        summary.failed.len()
    );
    Ok(())
}

fn run_heuristics(args: HeuristicsArgs) -> Result<()> {
    use crate::data::metadata::MetadataHeuristics;
    use crate::infra::config_store::HeuristicsStore;

    HeuristicsStore::new(&args.output).save(&MetadataHeuristics::default())?;
    eprintln!("Default heuristics written to '{}'", args.output.display());
    Ok(())
}
