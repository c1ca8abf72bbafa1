//! Usage-evidence corpus
//!
//! The whole reference-matching story rests on one big string: the
//! concatenated text of every Kotlin, Java and XML file across all modules.
//! There is no AST and no symbol table. Peak memory is proportional to the
//! total source text, an accepted trade-off for simplicity; invocations
//! rebuild the corpus from scratch so results are always fresh.

use crate::discovery::GradleModule;
use std::path::PathBuf;
use tracing::debug;

/// Extensions whose text counts as reference evidence
const EVIDENCE_EXTENSIONS: [&str; 3] = ["kt", "java", "xml"];

/// The concatenated evidence text
#[derive(Debug, Default)]
pub struct Corpus {
    text: String,
}

impl Corpus {
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[cfg(test)]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Incrementally builds a corpus, one file at a time, so the caller can
/// drive a progress indicator over the file list
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    text: String,
    skipped: usize,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate the evidence files of all modules, sorted for determinism
    pub fn evidence_files(modules: &[GradleModule]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for module in modules {
            for root in module.evidence_dirs() {
                if !root.is_dir() {
                    continue;
                }
                for entry in walkdir::WalkDir::new(&root)
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let is_evidence = entry
                        .path()
                        .extension()
                        .map(|e| {
                            let ext = e.to_string_lossy().to_lowercase();
                            EVIDENCE_EXTENSIONS.contains(&ext.as_str())
                        })
                        .unwrap_or(false);
                    if is_evidence {
                        files.push(entry.path().to_path_buf());
                    }
                }
            }
        }
        files.sort();
        files
    }

    /// Append one file's text. An unreadable file is skipped, never fatal.
    pub fn add_file(&mut self, path: &PathBuf) {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                self.text.push_str(&content);
                self.text.push('\n');
            }
            Err(e) => {
                debug!("Skipping unreadable evidence file {}: {}", path.display(), e);
                self.skipped += 1;
            }
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn build(self) -> Corpus {
        Corpus { text: self.text }
    }

    /// Build a corpus over all modules in one call
    pub fn build_for(modules: &[GradleModule]) -> Corpus {
        let mut builder = Self::new();
        for file in Self::evidence_files(modules) {
            builder.add_file(&file);
        }
        builder.build()
    }
}
