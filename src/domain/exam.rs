// ============================================================
// Layer 3 — Exam Domain Types
// ============================================================
// The structured records an extraction produces. These are the
// only things handed to whatever stores exams afterwards.
//
//   ExtractionResult
//     ├── metadata: ExamMetadata
//     └── questions: Vec<QuestionRecord>
//                      └── choices: Vec<ChoiceRecord>
//
// All records are built inside a single question block and never
// change once returned. Serde derives give the JSON output shape.
//
// Reference: Rust Book §5 (Structs), §8 (Vectors)

use serde::{Deserialize, Serialize};

/// Title, version and description of the exam as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMetadata {
    pub title:       String,
    pub version:     String,
    pub description: String,
}

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    /// Upper-case letter 'A'..='D'
    pub label: char,

    /// Choice text with soft-wrapped lines joined by single spaces
    pub text: String,

    /// Zero-based position within the question
    pub order_index: usize,
}

/// One parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 1-based position of the source block in document order
    pub sequence_number: usize,

    /// Trimmed, non-empty question prompt
    pub stem_text: String,

    /// At least two choices, in source order
    pub choices: Vec<ChoiceRecord>,

    /// Upper-case letter of the correct choice, when the source states one
    pub answer_label: Option<char>,

    /// Trimmed explanation, possibly empty
    pub explanation_text: String,

    /// Image references. Image extraction is not performed, so this
    /// is always empty.
    pub images: Vec<String>,
}

impl QuestionRecord {
    /// Look up the choice the answer label points at.
    ///
    /// Returns None when there is no answer label, or when no choice
    /// carries that label. The record itself is never altered; linking
    /// the label to a stored choice is the caller's job.
    pub fn answer_choice(&self) -> Option<&ChoiceRecord> {
        let label = self.answer_label?;
        self.choices.iter().find(|c| c.label == label)
    }

    /// True when an answer label is present but matches no choice
    pub fn has_dangling_answer(&self) -> bool {
        self.answer_label.is_some() && self.answer_choice().is_none()
    }
}

/// Everything one extraction produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub metadata:  ExamMetadata,
    pub questions: Vec<QuestionRecord>,
}

/// Why a question block produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The stem was blank after trimming
    EmptyStem { choice_count: usize },

    /// Fewer than two choices were found
    TooFewChoices { found: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyStem { choice_count } => {
                write!(f, "empty stem ({choice_count} choices)")
            }
            SkipReason::TooFewChoices { found } => {
                write!(f, "too few choices ({found})")
            }
        }
    }
}

/// A block that was dropped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBlock {
    /// 1-based block position, the number the question would have had
    pub sequence_number: usize,

    /// The digits printed after "QUESTION NO:" in the source
    pub source_number: Option<u32>,

    pub reason: SkipReason,
}
