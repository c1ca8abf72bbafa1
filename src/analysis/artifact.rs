//! Built-artifact selection
//!
//! Scans build/outputs for .apk/.aab candidates and picks the one most
//! representative of a shippable build. Release-tagged names always outrank
//! debug-tagged ones regardless of size; within a tier the larger file wins,
//! since a bigger build is typically the more complete one.

use std::path::{Path, PathBuf};
use tracing::debug;

const PACKAGE_EXTENSIONS: [&str; 2] = ["apk", "aab"];
const EXCLUDED_NAME_MARKS: [&str; 3] = ["unaligned", "androidtest", "test-"];

const RELEASE_TIER: u8 = 2;
const DEBUG_TIER: u8 = 1;

/// One package file found under build/outputs
#[derive(Debug, Clone)]
pub struct ArtifactCandidate {
    pub path: PathBuf,
    pub size: u64,
    pub tier: u8,
}

impl ArtifactCandidate {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn is_candidate(path: &Path) -> bool {
    let has_package_ext = path
        .extension()
        .map(|e| {
            let ext = e.to_string_lossy().to_lowercase();
            PACKAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false);
    if !has_package_ext {
        return false;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    !EXCLUDED_NAME_MARKS.iter().any(|mark| name.contains(mark))
}

fn tier(path: &Path) -> u8 {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.contains("release") {
        RELEASE_TIER
    } else if name.contains("debug") {
        DEBUG_TIER
    } else {
        0
    }
}

/// Pick the best candidate under `build_outputs`, or None when nothing
/// qualifies (decomposition is then skipped, not an error).
/// Tier always dominates size; within a tier the larger file wins and
/// ties keep the earlier candidate in encounter order.
pub fn select_artifact(build_outputs: &Path) -> Option<ArtifactCandidate> {
    if !build_outputs.is_dir() {
        debug!("No build outputs at {}", build_outputs.display());
        return None;
    }

    let mut best: Option<ArtifactCandidate> = None;

    for entry in walkdir::WalkDir::new(build_outputs)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !is_candidate(entry.path()) {
            continue;
        }
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let candidate = ArtifactCandidate {
            path: entry.path().to_path_buf(),
            size,
            tier: tier(entry.path()),
        };
        debug!(
            "Artifact candidate {} (tier {}, {} bytes)",
            candidate.path.display(),
            candidate.tier,
            candidate.size
        );
        let better = match &best {
            Some(current) => (candidate.tier, candidate.size) > (current.tier, current.size),
            None => true,
        };
        if better {
            best = Some(candidate);
        }
    }

    best
}
