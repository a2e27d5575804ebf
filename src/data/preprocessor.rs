// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Normalises the flat text pulled out of a PDF before it is
// split into question blocks.
//
// PDF text extraction often leaves behind:
//   - Windows line endings (\r\n) or bare \r
//   - Non-breaking spaces (U+00A0) from typeset layouts
//   - Zero-width spaces (U+200B) and byte order marks (U+FEFF)
//   - Tabs and stray control characters
//
// Cleaning is strictly character-level:
//   1. \r\n and lone \r → \n
//   2. Tab, NBSP, zero-width space, BOM → plain space
//   3. Any other control character except \n → plain space
//
// Lines are never joined, dropped, or reordered, and runs of
// spaces are left alone, so choice and stem text keep the exact
// spacing the document had.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Normalise line endings and invisible characters.
    pub fn clean(&self, text: &str) -> String {
        let mut out   = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    // \r\n collapses to one newline, not two
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    out.push('\n');
                }
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => out.push(' '),
                c if c.is_control() && c != '\n' => out.push(' '),
                c => out.push(c),
            }
        }

        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
