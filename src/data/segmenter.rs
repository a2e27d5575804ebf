// ============================================================
// Layer 4 — Document Segmenter
// ============================================================
// Splits the flat document text into one block per question.
//
// A question starts at every "QUESTION NO: <digits>" delimiter
// (case-insensitive, whitespace around the number tolerated):
//
//   Front matter ...            ← discarded
//   QUESTION NO: 1              ← delimiter 1
//   Which service ...           ┐
//   A. S3                       │ block 1
//   B. EC2                      ┘
//   QUESTION NO: 1              ← delimiter 2 (duplicate number!)
//   ...                         ← block 2
//
// Blocks are numbered 1..N in document order. The digits in the
// delimiter are kept for diagnostics only: source numbering is
// often duplicated or out of order, so it never drives
// sequence_number.
//
// Reference: regex crate documentation (captures_iter)

use once_cell::sync::Lazy;
use regex::Regex;

static QUESTION_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)QUESTION NO:\s*(\d+)").unwrap());

/// The raw text of one question, between two delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// 1-based position in document order
    pub sequence_number: usize,

    /// The number printed in the delimiter, if it fits in a u32
    pub source_number: Option<u32>,

    /// Text after this delimiter up to the next one (or end of text)
    pub text: &'a str,
}

/// Split `text` into question blocks.
///
/// Returns exactly one block per delimiter match; zero matches
/// gives zero blocks.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let delimiters: Vec<(usize, usize, Option<u32>)> = QUESTION_DELIMITER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole  = caps.get(0)?;
            let number = caps.get(1).and_then(|m| m.as_str().parse().ok());
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    delimiters
        .iter()
        .enumerate()
        .map(|(i, &(_, end, source_number))| {
            let next_start = delimiters
                .get(i + 1)
                .map(|&(start, _, _)| start)
                .unwrap_or(text.len());

            Block {
                sequence_number: i + 1,
                source_number,
                text: &text[end..next_start],
            }
        })
        .collect()
}
