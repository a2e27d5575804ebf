// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the data pipeline and infrastructure to get one
// job done. No parsing rules live here, and nothing is printed:
// results go back to the CLI layer.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Extract one document into an ExtractionResult
pub mod extract_use_case;

// Extract every document in a directory
pub mod batch_use_case;
