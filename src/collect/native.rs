//! Native library collection
//!
//! Walks each module's jniLibs root and records every shared library it
//! finds. Entries are never deduplicated here: the same base name appearing
//! under several architecture directories yields several entries, and any
//! grouping is a read-time aggregation done by the report.

use crate::discovery::GradleModule;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

/// One .so file found on disk
#[derive(Debug, Clone, Serialize)]
pub struct NativeLibraryEntry {
    /// File name, e.g. libfoo.so
    pub name: String,

    /// Absolute path to the file
    pub path: PathBuf,

    /// Architecture directory the file sits under, e.g. arm64-v8a
    pub arch: Option<String>,

    pub size: u64,
}

impl NativeLibraryEntry {
    fn from_path(path: &Path, size: u64) -> Self {
        Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            arch: path
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned()),
            size,
        }
    }
}

/// Collect all .so files under every module's jniLibs directory,
/// sorted by path for deterministic output
pub fn collect_native_libs(modules: &[GradleModule]) -> Vec<NativeLibraryEntry> {
    let mut entries = Vec::new();

    for module in modules {
        let root = module.jni_libs_dir();
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
            let path = entry.path();
            if path.extension().map(|e| e == "so").unwrap_or(false) {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                trace!("Native lib: {} ({} bytes)", path.display(), size);
                entries.push(NativeLibraryEntry::from_path(path, size));
            }
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}
