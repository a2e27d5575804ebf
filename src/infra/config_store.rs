// ============================================================
// Layer 6 — Heuristics Store
// ============================================================
// Saves and restores MetadataHeuristics as pretty JSON.
//
// Example file:
//   {
//     "title_scan_lines": 10,
//     "product_markers": ["AWS"],
//     "exam_markers": ["SAA", "Solutions"],
//     ...
//   }
//
// Missing fields fall back to their defaults, so a file only
// needs the values it changes.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::metadata::MetadataHeuristics;

pub struct HeuristicsStore {
    path: PathBuf,
}

impl HeuristicsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write heuristics as pretty JSON, creating parent directories.
    pub fn save(&self, heuristics: &MetadataHeuristics) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(heuristics)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write heuristics to '{}'", self.path.display()))?;

        tracing::debug!("Saved heuristics to '{}'", self.path.display());
        Ok(())
    }

    /// Read heuristics back from JSON.
    pub fn load(&self) -> Result<MetadataHeuristics> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read heuristics from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid heuristics JSON in '{}'", self.path.display()))
    }
}
