// ============================================================
// Layer 3 — RawDocument Domain Type
// ============================================================
// The text of a source document, one entry per page, in page
// order. A RawDocument only lives for the duration of one
// extraction call: it is flattened into a single string and
// then dropped.
//
// Reference: Rust Book §5 (Structs and Methods)

/// Page-ordered plain text pulled out of a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// The filename or path, kept for log messages and skip reports
    pub source: String,

    /// Plain text of each page, index 0 is page 1
    pub pages: Vec<String>,
}

impl RawDocument {
    /// Create a RawDocument from a source name and its page texts.
    pub fn new(source: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            source: source.into(),
            pages,
        }
    }

    /// Concatenate every page in order.
    ///
    /// No separator is inserted between pages: whatever line breaks
    /// the per-page extraction produced are the only ones present.
    pub fn flatten(&self) -> String {
        self.pages.concat()
    }

    /// Number of pages that were extracted
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
