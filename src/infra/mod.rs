// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns shared by the use cases:
//
//   config_store.rs  — Heuristics persistence
//                      Loads / saves MetadataHeuristics as JSON
//                      so title and version literals can be
//                      tuned for another question bank family.
//
//   result_writer.rs — Output
//                      Serialises an ExtractionResult to pretty
//                      JSON on disk or stdout.
//
//   skip_log.rs      — Diagnostics
//                      Appends one CSV row per skipped question
//                      block for later review.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// Heuristics JSON loading and saving
pub mod config_store;

/// ExtractionResult JSON output
pub mod result_writer;

/// Skipped block CSV logger
pub mod skip_log;
