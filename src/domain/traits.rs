// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to these traits, so a PDF
// loader and a plain-text loader are interchangeable.
//
//   - PdfLoader  → pages of a PDF via lopdf
//   - TextLoader → an already extracted .txt file
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::document::RawDocument;
use crate::domain::error::ExtractError;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Anything that can produce the page texts of one document.
///
/// Implementations must release whatever handle they open before
/// returning, on success and on failure alike.
pub trait DocumentSource {
    /// Read every page. Either all pages come back or an error does;
    /// there is no partial result.
    fn load(&self) -> Result<RawDocument, ExtractError>;
}

// ─── PageReader ───────────────────────────────────────────────────────────────
/// An open document handle that yields page text one page at a time.
///
/// The handle is released when the value is dropped.
pub trait PageReader {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Plain text of the page at zero-based `index`
    fn page_text(&self, index: usize) -> Result<String, ExtractError>;
}
