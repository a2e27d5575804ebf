// ============================================================
// Layer 4 — Result Assembler
// ============================================================
// Turns one routed block into either a QuestionRecord or a
// typed "skipped" outcome.
//
// A block is only a question if:
//   - its stem is non-empty after trimming, AND
//   - it has at least 2 choices
//
// Anything else is skipped with a reason. Skipping is never an
// error: the rest of the document carries on.
//
// Reference: Rust Book §6 (Enums)

use crate::data::router::{route_block, BlockState};
use crate::data::segmenter::Block;
use crate::domain::exam::{QuestionRecord, SkipReason, SkippedBlock};

/// Fewest choices a block needs to count as a question
pub const MIN_CHOICES: usize = 2;

/// What became of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Parsed(QuestionRecord),
    Skipped(SkippedBlock),
}

/// Route and assemble one block.
pub fn parse_block(block: &Block<'_>) -> BlockOutcome {
    assemble(block, route_block(block.text))
}

/// Validate what the router collected and build the record.
pub fn assemble(block: &Block<'_>, state: BlockState) -> BlockOutcome {
    let stem = state.stem.trim();

    let reason = if stem.is_empty() {
        Some(SkipReason::EmptyStem { choice_count: state.choices.len() })
    } else if state.choices.len() < MIN_CHOICES {
        Some(SkipReason::TooFewChoices { found: state.choices.len() })
    } else {
        None
    };

    if let Some(reason) = reason {
        return BlockOutcome::Skipped(SkippedBlock {
            sequence_number: block.sequence_number,
            source_number:   block.source_number,
            reason,
        });
    }

    BlockOutcome::Parsed(QuestionRecord {
        sequence_number:  block.sequence_number,
        stem_text:        stem.to_string(),
        choices:          state.choices,
        answer_label:     state.answer_label,
        explanation_text: state.explanation.join("\n").trim().to_string(),
        images:           Vec::new(),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> Block<'_> {
        Block { sequence_number: 4, source_number: Some(17), text }
    }

    #[test]
    fn test_two_choices_make_a_question() {
        let outcome = parse_block(&block("\nWhich one?\nA. First\nB. Second\n"));

        let BlockOutcome::Parsed(q) = outcome else {
            panic!("expected a parsed question");
        };
        assert_eq!(q.sequence_number, 4);
        assert_eq!(q.stem_text, "Which one?");
        assert_eq!(q.choices.len(), 2);
        assert_eq!(q.choices[0].order_index, 0);
        assert_eq!(q.choices[1].order_index, 1);
        assert_eq!(q.answer_label, None);
        assert_eq!(q.explanation_text, "");
        assert!(q.images.is_empty());
    }

    #[test]
    fn test_blank_stem_is_skipped() {
        let outcome = parse_block(&block("\n   \nA. First\nB. Second\n"));
        assert_eq!(
            outcome,
            BlockOutcome::Skipped(SkippedBlock {
                sequence_number: 4,
                source_number:   Some(17),
                reason:          SkipReason::EmptyStem { choice_count: 2 },
            })
        );
    }

    #[test]
    fn test_single_choice_is_skipped() {
        let outcome = parse_block(&block("Which one?\nA. Only\n"));
        assert!(matches!(
            outcome,
            BlockOutcome::Skipped(SkippedBlock {
                reason: SkipReason::TooFewChoices { found: 1 },
                ..
            })
        ));
    }

    #[test]
    fn test_no_choices_is_skipped() {
        let outcome = parse_block(&block("Which one?\nNo options here.\n"));
        assert!(matches!(
            outcome,
            BlockOutcome::Skipped(SkippedBlock {
                reason: SkipReason::TooFewChoices { found: 0 },
                ..
            })
        ));
    }

    #[test]
    fn test_explanation_is_newline_joined_and_trimmed() {
        let outcome = parse_block(&block(
            "Why?\nA. x\nB. y\nAnswer: B\nExplanation: Because it scales automatically.\nSee also the docs.\n\n",
        ));

        let BlockOutcome::Parsed(q) = outcome else {
            panic!("expected a parsed question");
        };
        assert_eq!(q.answer_label, Some('B'));
        assert_eq!(
            q.explanation_text,
            "Because it scales automatically.\nSee also the docs."
        );
    }
}
