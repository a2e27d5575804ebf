// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a file on disk and a list of structured
// question records:
//
//   .pdf / .txt file
//       │
//       ▼
//   loader            → page texts (RawDocument), flattened
//       │
//       ▼
//   preprocessor      → line endings and invisible characters
//       │
//       ├──────────────────────────────┐
//       ▼                              ▼
//   segmenter         → blocks     metadata → title / version
//       │
//       ▼ (per block)
//   router            → stem / choices / answer / explanation
//       │
//       ▼
//   assembler         → QuestionRecord or SkippedBlock
//
// Each module is one step and is tested on its own.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §13 (Iterators and Closures)

/// Reads PDF (lopdf) and plain-text documents page by page
pub mod loader;

/// Normalises line endings and invisible characters
pub mod preprocessor;

/// Splits flat text into one block per "QUESTION NO:" delimiter
pub mod segmenter;

/// Per-block line state machine and choice continuation merging
pub mod router;

/// Validates routed blocks into question records
pub mod assembler;

/// Title / version / description heuristics
pub mod metadata;
