// ============================================================
// Layer 4 — Document Loader (Text Extractor)
// ============================================================
// Turns a file on disk into a RawDocument: one plain-text string
// per page, in page order.
//
//   .pdf → PdfLoader  (lopdf, page by page)
//   .txt → TextLoader (already extracted text, one "page")
//
// How the PDF side works:
//   lopdf parses the file into an object tree. get_pages() maps
//   1-based page numbers to page objects, and extract_text() walks
//   a page's content stream collecting the text-showing operators.
//
// Handle lifetime:
//   The parsed lopdf::Document lives inside a PdfHandle. The handle
//   is MOVED into read_all_pages(), so it is dropped when that
//   function returns, whether every page succeeded or one failed.
//   Either all pages come back or an error does.
//
// Reference: lopdf crate documentation
//            Rust Book §9 (Error Handling)
//            Rust Book §15 (Drop)

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use lopdf::Document;

use crate::domain::document::RawDocument;
use crate::domain::error::ExtractError;
use crate::domain::traits::{DocumentSource, PageReader};

/// Loads every page of a PDF file.
pub struct PdfLoader {
    path: PathBuf,
}

impl PdfLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for PdfLoader {
    fn load(&self) -> Result<RawDocument, ExtractError> {
        let source = self.path.display().to_string();
        let handle = PdfHandle::open(&self.path)?;

        tracing::debug!("Opened '{}' ({} pages)", source, handle.page_count());
        read_all_pages(handle, source)
    }
}

/// Loads a plain-text file that was extracted ahead of time.
pub struct TextLoader {
    path: PathBuf,
}

impl TextLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for TextLoader {
    fn load(&self) -> Result<RawDocument, ExtractError> {
        let source = self.path.display().to_string();
        let text   = fs::read_to_string(&self.path)
            .map_err(|e| ExtractError::document_read(&source, e))?;

        Ok(RawDocument::new(source, vec![text]))
    }
}

/// Pick a loader from the file extension (case-insensitive).
pub fn open_source(path: &Path) -> Result<Box<dyn DocumentSource>, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => Ok(Box::new(PdfLoader::new(path))),
        Some("txt") => Ok(Box::new(TextLoader::new(path))),
        _ => Err(ExtractError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// List every loadable document in a directory, sorted by file name
/// so batch runs are deterministic.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && open_source(&path).is_ok() {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Drain every page out of an open reader.
///
/// Takes the reader by value: it is dropped (and its handle
/// released) before the result reaches the caller, on every path.
pub(crate) fn read_all_pages<R: PageReader>(
    reader: R,
    source: impl Into<String>,
) -> Result<RawDocument, ExtractError> {
    let mut pages = Vec::with_capacity(reader.page_count());

    for index in 0..reader.page_count() {
        pages.push(reader.page_text(index)?);
    }

    Ok(RawDocument::new(source, pages))
}

// ─── PdfHandle ────────────────────────────────────────────────────────────────
/// A parsed PDF plus its page numbers in document order.
struct PdfHandle {
    path:         String,
    document:     Document,
    page_numbers: Vec<u32>,
}

impl PdfHandle {
    fn open(path: &Path) -> Result<Self, ExtractError> {
        let display = path.display().to_string();

        // The File is moved into lopdf and closed as soon as parsing returns
        let file     = File::open(path).map_err(|e| ExtractError::document_read(&display, e))?;
        let document = Document::load_from(file)
            .map_err(|e| ExtractError::document_read(&display, e))?;

        if document.is_encrypted() {
            return Err(ExtractError::document_read(&display, "document is encrypted"));
        }

        // get_pages() is a BTreeMap keyed by page number, so keys are ordered
        let page_numbers = document.get_pages().keys().copied().collect();

        Ok(Self { path: display, document, page_numbers })
    }
}

impl PageReader for PdfHandle {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractError> {
        let page = *self.page_numbers.get(index).ok_or_else(|| {
            ExtractError::document_read(&self.path, format!("page index {index} out of range"))
        })?;

        self.document
            .extract_text(&[page])
            .map_err(|e| ExtractError::document_read(&self.path, format!("page {page}: {e}")))
    }
}

impl Drop for PdfHandle {
    fn drop(&mut self) {
        tracing::trace!("Released '{}'", self.path);
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;
    use std::{cell::Cell, rc::Rc};

    /// A reader whose drop is observable and which can fail on a chosen page.
    struct FakeReader {
        pages:    Vec<&'static str>,
        fail_on:  Option<usize>,
        released: Rc<Cell<bool>>,
    }

    impl PageReader for FakeReader {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, index: usize) -> Result<String, ExtractError> {
            if self.fail_on == Some(index) {
                return Err(ExtractError::document_read("fake.pdf", "bad content stream"));
            }
            Ok(self.pages[index].to_string())
        }
    }

    impl Drop for FakeReader {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    #[test]
    fn test_read_all_pages_in_order() {
        let released = Rc::new(Cell::new(false));
        let reader   = FakeReader {
            pages:    vec!["page one\n", "page two\n"],
            fail_on:  None,
            released: released.clone(),
        };

        let doc = read_all_pages(reader, "fake.pdf").unwrap();
        assert_eq!(doc.pages, vec!["page one\n", "page two\n"]);
        assert!(released.get());
    }

    #[test]
    fn test_handle_released_when_a_page_fails() {
        let released = Rc::new(Cell::new(false));
        let reader   = FakeReader {
            pages:    vec!["page one\n", "page two\n", "page three\n"],
            fail_on:  Some(1),
            released: released.clone(),
        };

        let err = read_all_pages(reader, "fake.pdf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DocumentRead);
        assert!(released.get(), "reader must be dropped before the error propagates");
    }

    #[test]
    fn test_missing_pdf_is_document_read_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let err = PdfLoader::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DocumentRead);
    }

    #[test]
    fn test_corrupt_pdf_is_document_read_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        fs::write(&path, b"this is not a pdf at all").unwrap();

        let err = PdfLoader::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DocumentRead);

        // Nothing is left holding the file
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_pdf_pages_are_extracted() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.pdf");
        write_test_pdf(&path, &["QUESTION NO: 1", "Which service stores objects?"]);

        let doc = PdfLoader::new(&path).load().unwrap();
        assert_eq!(doc.page_count(), 2);

        let text = doc.flatten();
        assert!(text.contains("QUESTION NO: 1"));
        assert!(text.find("QUESTION NO: 1") < text.find("Which service stores objects?"));
    }

    #[test]
    fn test_text_loader_reads_single_page() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        fs::write(&path, "QUESTION NO: 1\nStem\n").unwrap();

        let doc = TextLoader::new(&path).load().unwrap();
        assert_eq!(doc.pages, vec!["QUESTION NO: 1\nStem\n"]);
    }

    #[test]
    fn test_open_source_dispatches_on_extension() {
        assert!(open_source(Path::new("bank.PDF")).is_ok());
        assert!(open_source(Path::new("bank.txt")).is_ok());

        let err = open_source(Path::new("bank.docx")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_list_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::write(dir.path().join("notes.md"), b"").unwrap();

        let names: Vec<String> = list_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.pdf"]);
    }

    /// Build a minimal PDF with one line of Courier text per page.
    fn write_test_pdf(path: &Path, lines: &[&str]) {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Object, Stream};

        let mut doc   = Document::with_version("1.5");
        let pages_id  = doc.new_object_id();
        let font_id   = doc.add_object(dictionary! {
            "Type"     => "Font",
            "Subtype"  => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id    = doc.add_object(dictionary! {
                "Type"      => "Page",
                "Parent"    => pages_id,
                "Contents"  => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type"      => "Pages",
            "Count"     => lines.len() as i64,
            "Kids"      => kids,
            "MediaBox"  => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type"  => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }
}
