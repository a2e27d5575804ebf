// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe what an exam question bank IS
// once it has been pulled out of a PDF:
//
//   RawDocument      → page texts, before any parsing
//   ExamMetadata     → title / version / description
//   QuestionRecord   → one stem, its choices, answer and explanation
//   ExtractionResult → metadata + ordered questions (the output)
//
// Rules for this layer:
//   - NO lopdf or regex types here
//   - NO file I/O
//   - Only structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// The page-ordered text of a source document
pub mod document;

// Exam, question and choice records produced by extraction
pub mod exam;

// Typed errors for the extraction core
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
