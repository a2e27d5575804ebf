// ============================================================
// Layer 2 — ExtractUseCase
// ============================================================
// Runs the whole extraction for one document:
//
//   Step 1: Load the page texts         (Layer 4 - loader)
//   Step 2: Flatten + normalise         (Layer 4 - preprocessor)
//   Step 3: Resolve exam metadata       (Layer 4 - metadata)
//   Step 4: Segment into blocks         (Layer 4 - segmenter)
//   Step 5: Route + assemble each block (Layer 4 - router/assembler)
//   Step 6: Report skipped blocks and unresolvable answer labels
//
// The use case is synchronous and keeps no state between calls,
// so the same instance can extract any number of documents and
// identical input always gives an identical result.
//
// Reference: Rust Book §13 (Iterators and Closures)

use std::path::Path;

use crate::data::{
    assembler::{parse_block, BlockOutcome},
    loader::open_source,
    metadata::{MetadataExtractor, MetadataHeuristics},
    preprocessor::Preprocessor,
    segmenter::segment,
};
use crate::domain::document::RawDocument;
use crate::domain::error::ExtractError;
use crate::domain::exam::{ExtractionResult, SkippedBlock};

// ─── Extraction Configuration ─────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Title / version literals for the metadata scan
    pub heuristics: MetadataHeuristics,

    /// Run the preprocessor over the flat text before parsing
    pub normalize_text: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            heuristics:     MetadataHeuristics::default(),
            normalize_text: true,
        }
    }
}

/// The result plus the diagnostics gathered while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Where the text came from
    pub source: String,

    /// What gets handed on (and written out)
    pub result: ExtractionResult,

    /// Blocks that did not make a complete question
    pub skipped: Vec<SkippedBlock>,
}

impl ExtractionReport {
    /// Number of delimiter blocks found in the document
    pub fn block_count(&self) -> usize {
        self.result.questions.len() + self.skipped.len()
    }
}

// ─── ExtractUseCase ───────────────────────────────────────────────────────────
pub struct ExtractUseCase {
    metadata:     MetadataExtractor,
    preprocessor: Option<Preprocessor>,
}

impl ExtractUseCase {
    /// Build the use case, compiling the configured heuristics.
    pub fn new(config: ExtractConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            metadata:     MetadataExtractor::new(config.heuristics)?,
            preprocessor: config.normalize_text.then(Preprocessor::new),
        })
    }

    /// Extract a document file (.pdf or .txt).
    ///
    /// The only failure is an unreadable document; malformed
    /// questions are reported in `skipped` instead.
    pub fn execute(&self, path: &Path) -> Result<ExtractionReport, ExtractError> {
        // ── Step 1: Load every page (handle released inside the loader) ───────
        let source = open_source(path)?;
        let raw    = source.load()?;
        tracing::info!("Loaded '{}' ({} pages)", raw.source, raw.page_count());

        Ok(self.extract_document(&raw))
    }

    /// Extract from pages already in memory.
    pub fn extract_document(&self, raw: &RawDocument) -> ExtractionReport {
        self.extract_text(&raw.source, &raw.flatten())
    }

    /// Extract from one flat text string.
    pub fn extract_text(&self, source: &str, text: &str) -> ExtractionReport {
        // ── Step 2: Normalise line endings / invisible characters ─────────────
        let cleaned;
        let text = match &self.preprocessor {
            Some(p) => {
                cleaned = p.clean(text);
                cleaned.as_str()
            }
            None => text,
        };

        // ── Step 3: Exam metadata from the same flat text ─────────────────────
        let metadata = self.metadata.extract(text);

        // ── Step 4 + 5: Segment, then route and assemble each block ───────────
        let mut questions = Vec::new();
        let mut skipped   = Vec::new();

        for block in segment(text) {
            match parse_block(&block) {
                BlockOutcome::Parsed(question) => {
                    tracing::debug!(
                        "Question {}: {} choices, answer {:?}",
                        question.sequence_number,
                        question.choices.len(),
                        question.answer_label
                    );
                    questions.push(question);
                }
                BlockOutcome::Skipped(skip) => {
                    tracing::warn!(
                        "Skipping question {} (source no. {:?}) in '{}': {}",
                        skip.sequence_number,
                        skip.source_number,
                        source,
                        skip.reason
                    );
                    skipped.push(skip);
                }
            }
        }

        // ── Step 6: Labels the storage layer will not be able to link ─────────
        for q in questions.iter().filter(|q| q.has_dangling_answer()) {
            tracing::warn!(
                "Question {} answer {:?} matches none of its choices",
                q.sequence_number,
                q.answer_label
            );
        }

        tracing::info!(
            "Parsed {} questions from '{}' ({} skipped)",
            questions.len(),
            source,
            skipped.len()
        );

        ExtractionReport {
            source: source.to_string(),
            result: ExtractionResult { metadata, questions },
            skipped,
        }
    }
}
