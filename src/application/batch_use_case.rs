// ============================================================
// Layer 2 — BatchUseCase
// ============================================================
// Extracts every .pdf / .txt document in a directory:
//
//   Step 1: List documents, sorted by name   (Layer 4 - loader)
//   Step 2: Extract each one                 (ExtractUseCase)
//   Step 3: Write <file name>.json per document (Layer 6 - result_writer)
//   Step 4: Append skipped blocks to the CSV    (Layer 6 - skip_log)
//
// The output name keeps the input's extension, so bank.pdf and
// bank.txt land in bank.pdf.json and bank.txt.json. Names that differ
// only by case are treated as the same file.
//
// One failing file never stops the batch: a read, write or log error
// is logged, recorded in the summary, and the next file is processed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::extract_use_case::{ExtractConfig, ExtractUseCase};
use crate::data::loader::list_documents;
use crate::infra::{result_writer, skip_log::SkipLog};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// JSON files written, one per extracted document
    pub written: Vec<PathBuf>,

    /// Documents that could not be read or written, with the error message
    pub failed: Vec<(PathBuf, String)>,

    /// Questions extracted across all documents
    pub questions: usize,

    /// Blocks skipped across all documents
    pub skipped: usize,
}

pub struct BatchUseCase {
    extractor:  ExtractUseCase,
    output_dir: PathBuf,
    skip_log:   Option<SkipLog>,
}

impl BatchUseCase {
    pub fn new(
        config:     ExtractConfig,
        output_dir: impl Into<PathBuf>,
        skip_log:   Option<SkipLog>,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Cannot create output directory '{}'", output_dir.display()))?;

        Ok(Self {
            extractor: ExtractUseCase::new(config)?,
            output_dir,
            skip_log,
        })
    }

    pub fn execute(&self, input_dir: &Path) -> Result<BatchSummary> {
        // ── Step 1: Find documents ────────────────────────────────────────────
        let documents = list_documents(input_dir)?;
        tracing::info!("Found {} documents in '{}'", documents.len(), input_dir.display());

        let mut summary = BatchSummary::default();
        let mut claimed = HashSet::new();

        for path in documents {
            let name = output_name(&path);
            if !claimed.insert(name.to_lowercase()) {
                tracing::warn!("Skipping '{}': output '{}' already used", path.display(), name);
                summary.failed.push((path, format!("output name '{name}' collides with another document")));
                continue;
            }

            // ── Step 2: Extract, tolerating per-file failures ─────────────────
            let report = match self.extractor.execute(&path) {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", path.display(), e);
                    summary.failed.push((path, e.to_string()));
                    continue;
                }
            };

            // ── Step 3: One JSON file per document ────────────────────────────
            let out = self.output_dir.join(&name);
            if let Err(e) = result_writer::write_json(&report.result, &out) {
                tracing::warn!("Cannot write '{}': {:#}", out.display(), e);
                summary.failed.push((path, format!("{e:#}")));
                continue;
            }

            // ── Step 4: Skipped blocks ────────────────────────────────────────
            if let Some(log) = &self.skip_log {
                if let Err(e) = log.log_all(&report.source, &report.skipped) {
                    tracing::warn!("Cannot log skipped blocks of '{}': {:#}", path.display(), e);
                    summary.failed.push((path, format!("{e:#}")));
                    continue;
                }
            }

            summary.questions += report.result.questions.len();
            summary.skipped   += report.skipped.len();
            summary.written.push(out);
        }

        Ok(summary)
    }
}

/// `<file name>.json`, keeping the input's extension.
fn output_name(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "document".into());
    format!("{file}.json")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exam::ExtractionResult;
    use std::fs;

    const GOOD: &str = "QUESTION NO: 1\nWhich one?\nA. First\nB. Second\nAnswer: A\n\
                        QUESTION NO: 2\nBroken?\nA. Lonely\n";

    #[test]
    fn test_batch_writes_one_json_per_document() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("bank.txt"), GOOD).unwrap();
        fs::write(input.path().join("ignored.md"), GOOD).unwrap();

        let batch   = BatchUseCase::new(ExtractConfig::default(), output.path(), None).unwrap();
        let summary = batch.execute(input.path()).unwrap();

        assert_eq!(summary.written, vec![output.path().join("bank.txt.json")]);
        assert_eq!(summary.questions, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.failed.is_empty());

        let json   = fs::read_to_string(output.path().join("bank.txt.json")).unwrap();
        let result: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.questions[0].answer_label, Some('A'));
    }

    #[test]
    fn test_unreadable_document_does_not_stop_batch() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a_corrupt.pdf"), b"garbage").unwrap();
        fs::write(input.path().join("b_bank.txt"), GOOD).unwrap();

        let log     = SkipLog::new(output.path().join("logs")).unwrap();
        let batch   = BatchUseCase::new(ExtractConfig::default(), output.path(), Some(log)).unwrap();
        let summary = batch.execute(input.path()).unwrap();

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, input.path().join("a_corrupt.pdf"));
        assert_eq!(summary.written.len(), 1);

        let csv = fs::read_to_string(output.path().join("logs").join("skipped_blocks.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_same_stem_documents_get_distinct_outputs() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("bank.txt"), GOOD).unwrap();
        fs::write(input.path().join("bank.pdf"), b"garbage").unwrap();
        fs::write(output.path().join("bank.pdf.json"), "untouched").unwrap();

        let batch   = BatchUseCase::new(ExtractConfig::default(), output.path(), None).unwrap();
        let summary = batch.execute(input.path()).unwrap();

        assert_eq!(summary.written, vec![output.path().join("bank.txt.json")]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(fs::read_to_string(output.path().join("bank.pdf.json")).unwrap(), "untouched");
    }

    #[test]
    fn test_output_name_collision_is_reported() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("bank.TXT"), GOOD).unwrap();
        fs::write(input.path().join("bank.txt"), GOOD).unwrap();

        let batch   = BatchUseCase::new(ExtractConfig::default(), output.path(), None).unwrap();
        let summary = batch.execute(input.path()).unwrap();

        // Sorted byte-wise, so the upper-case name is processed first
        assert_eq!(summary.written, vec![output.path().join("bank.TXT.json")]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, input.path().join("bank.txt"));
        assert!(summary.failed[0].1.contains("collides"));
    }

    #[test]
    fn test_write_failure_does_not_stop_batch() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a_bank.txt"), GOOD).unwrap();
        fs::write(input.path().join("b_bank.txt"), GOOD).unwrap();
        // A directory where the first result should go makes its write fail
        fs::create_dir(output.path().join("a_bank.txt.json")).unwrap();

        let batch   = BatchUseCase::new(ExtractConfig::default(), output.path(), None).unwrap();
        let summary = batch.execute(input.path()).unwrap();

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, input.path().join("a_bank.txt"));
        assert_eq!(summary.written, vec![output.path().join("b_bank.txt.json")]);
        assert_eq!(summary.questions, 1);
    }

    #[test]
    fn test_output_name_keeps_extension() {
        assert_eq!(output_name(Path::new("/in/bank.pdf")), "bank.pdf.json");
        assert_eq!(output_name(Path::new("notes.v2.txt")), "notes.v2.txt.json");
    }
}
