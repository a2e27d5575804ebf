// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands: `extract`, `batch` and `heuristics`,
// and all their flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::extract_use_case::ExtractConfig;
use crate::data::metadata::MetadataHeuristics;
use crate::infra::config_store::HeuristicsStore;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract questions from one .pdf or .txt document
    Extract(ExtractArgs),

    /// Extract every .pdf / .txt document in a directory
    Batch(BatchArgs),

    /// Write the default metadata heuristics to a JSON file for editing
    Heuristics(HeuristicsArgs),
}

/// Options shared by every command that parses documents.
#[derive(Args, Debug)]
pub struct ParseOptions {
    /// JSON file with title / version heuristics (defaults when omitted)
    #[arg(long)]
    pub heuristics: Option<PathBuf>,

    /// Directory for skipped_blocks.csv
    #[arg(long)]
    pub skip_log: Option<PathBuf>,

    /// Parse the extracted text as-is, without normalising
    /// line endings and invisible characters
    #[arg(long)]
    pub raw: bool,
}

/// Build the application config from CLI options.
/// The application layer never sees clap types.
impl TryFrom<&ParseOptions> for ExtractConfig {
    type Error = anyhow::Error;

    fn try_from(o: &ParseOptions) -> Result<Self> {
        let heuristics = match &o.heuristics {
            Some(path) => HeuristicsStore::new(path).load()?,
            None       => MetadataHeuristics::default(),
        };

        Ok(ExtractConfig {
            heuristics,
            normalize_text: !o.raw,
        })
    }
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Document to extract (.pdf or .txt)
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the JSON result (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub options: ParseOptions,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing .pdf / .txt documents
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for one <file name>.json per document, e.g. bank.pdf.json
    #[arg(long, default_value = "extracted")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub options: ParseOptions,
}

#[derive(Args, Debug)]
pub struct HeuristicsArgs {
    /// File to write
    #[arg(long, default_value = "heuristics.json")]
    pub output: PathBuf,
}
