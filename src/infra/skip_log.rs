// ============================================================
// Layer 6 — Skipped Block Logger
// ============================================================
// Records every question block that did not become a question,
// one CSV row per block, so a reviewer can find them in the
// source PDF afterwards.
//
// Output file: <dir>/skipped_blocks.csv
//
// Example CSV output:
//   source,sequence_number,source_number,reason
//   bank.pdf,12,12,too few choices (1)
//   bank.pdf,40,,empty stem (4 choices)
//
// The file is appended to across runs; the header is written
// only when the file is first created.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::exam::SkippedBlock;

const HEADER: &str = "source,sequence_number,source_number,reason";

pub struct SkipLog {
    csv_path: PathBuf,
}

impl SkipLog {
    /// Create the log directory and the CSV header if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("skipped_blocks.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created skip log '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one row per skipped block.
    pub fn log_all(&self, source: &str, skipped: &[SkippedBlock]) -> Result<()> {
        if skipped.is_empty() {
            return Ok(());
        }

        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        for skip in skipped {
            writeln!(
                f,
                "{},{},{},{}",
                csv_field(source),
                skip.sequence_number,
                skip.source_number.map(|n| n.to_string()).unwrap_or_default(),
                csv_field(&skip.reason.to_string()),
            )?;
        }

        tracing::debug!("Logged {} skipped blocks from '{}'", skipped.len(), source);
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

/// Quote a field if it contains a comma, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
