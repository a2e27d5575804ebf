// ============================================================
// Layer 4 — Line Router and Choice Continuation Merger
// ============================================================
// Routes every line of one question block into one of four
// regions: stem, choice, answer, or explanation.
//
// The router is a small state machine scoped to one block:
//
//   InStem ──► InChoices ──► InAnswer ──► InExplanation
//
// States only move forward. A header for an earlier region
// still does its work (an "Answer:" line after the explanation
// still records the label) but never moves the state back.
//
// Each trimmed, non-empty line is classified by the FIRST rule
// that matches, in this fixed order:
//
//   1. "Answer:" header       → InAnswer, capture the A-D label
//   2. "Explanation:" header  → InExplanation, seed explanation
//   3. "<A-D>. text" choice   → InChoices, new choice + merge wraps
//   4. anything else          → appended to the current region
//
// Headers win over choices so "Answer: A. ..." is never read as a
// choice. Choices are recognised in any state because some
// documents have no clean boundary between stem and choices.
//
// Continuation merging:
//   PDF layout soft-wraps long choices across lines:
//
//     A. Use an Application Load Balancer
//     with auto scaling.
//
//   After a choice line, following lines are appended to it with a
//   single space until a blank line, a choice start, or a header.
//   Merged lines are consumed from the same cursor, so every line
//   is routed exactly once.
//
// Reference: regex crate documentation
//            Rust Book §6 (Enums and Pattern Matching)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::exam::ChoiceRecord;

static ANSWER_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Answer:").unwrap());
static ANSWER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Answer:\s*([A-D])").unwrap());
static EXPLANATION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Explanation:").unwrap());
static EXPLANATION_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Explanation:\s*(.+)").unwrap());
static CHOICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([A-D])[.\s]+(.+)$").unwrap());
// Looser than CHOICE: a bare "B." still ends a continuation run
static CHOICE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-D][.\s]").unwrap());

// ─── Line classification ──────────────────────────────────────────────────────

/// Which region a single line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    AnswerHeader,
    ExplanationHeader,
    Choice,
    Plain,
}

struct Rule {
    kind:    LineKind,
    matches: fn(&str) -> bool,
}

/// Evaluated top to bottom; the first match wins.
static RULES: [Rule; 3] = [
    Rule { kind: LineKind::AnswerHeader,      matches: is_answer_header },
    Rule { kind: LineKind::ExplanationHeader, matches: is_explanation_header },
    Rule { kind: LineKind::Choice,            matches: is_choice },
];

fn is_answer_header(line: &str) -> bool {
    ANSWER_HEADER.is_match(line)
}

fn is_explanation_header(line: &str) -> bool {
    EXPLANATION_HEADER.is_match(line)
}

fn is_choice(line: &str) -> bool {
    CHOICE.is_match(line)
}

/// Classify a trimmed line.
pub fn classify(line: &str) -> LineKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map(|rule| rule.kind)
        .unwrap_or(LineKind::Plain)
}

/// Split a choice line into its upper-cased label and its text.
fn split_choice(line: &str) -> Option<(char, &str)> {
    let caps  = CHOICE.captures(line)?;
    let label = caps.get(1)?.as_str().chars().next()?;
    let text  = caps.get(2)?.as_str();
    Some((label.to_ascii_uppercase(), text))
}

/// True when `line` must not be folded into the preceding choice.
fn ends_continuation(line: &str) -> bool {
    line.is_empty()
        || CHOICE_START.is_match(line)
        || is_answer_header(line)
        || is_explanation_header(line)
}

// ─── Cursor ───────────────────────────────────────────────────────────────────

/// Position-based walk over a block's lines.
///
/// Lines are addressed by index, never looked up by content, so a
/// line whose text repeats elsewhere in the block is still handled
/// at its own position.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos:   usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.trim().lines().collect(),
            pos:   0,
        }
    }

    /// Next line, trimmed, advancing the cursor
    fn next_line(&mut self) -> Option<&'a str> {
        let line: &'a str = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line.trim())
    }

    /// Next line, trimmed, without advancing
    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied().map(str::trim)
    }
}

// ─── State machine ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RouterState {
    InStem,
    InChoices,
    InAnswer,
    InExplanation,
}

/// Everything collected from one block. Lives only as long as the
/// block is being routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockState {
    pub state:        RouterState,
    pub stem:         String,
    pub choices:      Vec<ChoiceRecord>,
    pub answer_label: Option<char>,
    pub explanation:  Vec<String>,
}

impl BlockState {
    fn new() -> Self {
        Self {
            state:        RouterState::InStem,
            stem:         String::new(),
            choices:      Vec::new(),
            answer_label: None,
            explanation:  Vec::new(),
        }
    }

    /// Move forward to `target`; never backwards.
    fn advance_to(&mut self, target: RouterState) {
        self.state = self.state.max(target);
    }

    fn route(&mut self, line: &str, cursor: &mut LineCursor<'_>) {
        match classify(line) {
            LineKind::AnswerHeader      => self.on_answer_header(line),
            LineKind::ExplanationHeader => self.on_explanation_header(line),
            LineKind::Choice => {
                let parts = split_choice(line);
                debug_assert!(parts.is_some(), "classified as a choice but unsplittable: {line:?}");
                if let Some((label, text)) = parts {
                    self.on_choice(label, text, cursor);
                }
            }
            LineKind::Plain => self.on_plain(line),
        }
    }

    fn on_answer_header(&mut self, line: &str) {
        self.advance_to(RouterState::InAnswer);

        if let Some(caps) = ANSWER_LABEL.captures(line) {
            self.answer_label = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .map(|c| c.to_ascii_uppercase());
        }
    }

    fn on_explanation_header(&mut self, line: &str) {
        self.advance_to(RouterState::InExplanation);

        // Header text replaces anything the answer section collected
        if let Some(rest) = EXPLANATION_TEXT.captures(line).and_then(|c| c.get(1)) {
            self.explanation.clear();
            self.explanation.push(rest.as_str().to_string());
        }
    }

    fn on_choice(&mut self, label: char, text: &str, cursor: &mut LineCursor<'_>) {
        let mut text = text.trim().to_string();

        self.advance_to(RouterState::InChoices);

        // ── Fold soft-wrapped continuation lines into this choice ─────────────
        while let Some(next) = cursor.peek() {
            if ends_continuation(next) {
                break;
            }
            text.push(' ');
            text.push_str(next);
            cursor.pos += 1;
        }

        self.choices.push(ChoiceRecord {
            label,
            text,
            order_index: self.choices.len(),
        });
    }

    fn on_plain(&mut self, line: &str) {
        match self.state {
            RouterState::InStem => {
                self.stem.push_str(line);
                self.stem.push('\n');
            }
            RouterState::InAnswer | RouterState::InExplanation => {
                self.explanation.push(line.to_string());
            }
            RouterState::InChoices => {
                tracing::trace!("Dropped stray line between choices: {:?}", line);
            }
        }
    }
}

/// Route every line of one block and return what was collected.
pub fn route_block(text: &str) -> BlockState {
    let mut cursor = LineCursor::new(text);
    let mut state  = BlockState::new();

    while let Some(line) = cursor.next_line() {
        if line.is_empty() {
            continue;
        }
        state.route(line, &mut cursor);
    }

    state
}
