// ============================================================
// Layer 6 — Result Writer
// ============================================================
// Serialises an ExtractionResult to pretty-printed JSON.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use crate::domain::exam::ExtractionResult;

/// Write the result to `path`, creating parent directories.
pub fn write_json(result: &ExtractionResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write result to '{}'", path.display()))?;

    tracing::debug!("Wrote {} questions to '{}'", result.questions.len(), path.display());
    Ok(())
}

/// Write the result to stdout followed by a newline.
pub fn write_stdout(result: &ExtractionResult) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, result)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exam::{ChoiceRecord, ExamMetadata, QuestionRecord};

    #[test]
    fn test_write_json_shape() {
        let result = ExtractionResult {
            metadata: ExamMetadata {
                title:       "AWS SAA Exam".to_string(),
                version:     "V1.0".to_string(),
                description: "AWS SAA exam question bank - V1.0".to_string(),
            },
            questions: vec![QuestionRecord {
                sequence_number: 1,
                stem_text:       "Which?".to_string(),
                choices: vec![
                    ChoiceRecord { label: 'A', text: "x".to_string(), order_index: 0 },
                    ChoiceRecord { label: 'B', text: "y".to_string(), order_index: 1 },
                ],
                answer_label:     None,
                explanation_text: String::new(),
                images:           Vec::new(),
            }],
        };

        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("bank.json");
        write_json(&result, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["version"], "V1.0");
        assert_eq!(value["questions"][0]["stem_text"], "Which?");
        assert!(value["questions"][0]["answer_label"].is_null());
    }
}
