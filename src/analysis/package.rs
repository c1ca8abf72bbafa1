//! Package decomposition
//!
//! Opens the selected .apk/.aab as a zip container and attributes every byte
//! of the file to a structural category. The attributable unit per entry is
//! its compressed size, the space it actually occupies in the container;
//! uncompressed size is the fallback when the compressed figure is not
//! meaningful. Whatever the entries do not explain is container overhead
//! (local headers, central directory, alignment padding) and is computed as
//! the remainder, so the category sum always reconciles with the true
//! on-disk size.

use crate::error::AuditError;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Per-category attribution of container bytes.
/// Invariant: code + resources + native_libs + assets + metadata + other
/// + overhead == total, by construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SizeBreakdown {
    /// .dex bytecode archives
    pub code: u64,
    /// Everything under res/
    pub resources: u64,
    /// Everything under lib/
    pub native_libs: u64,
    /// Everything under assets/
    pub assets: u64,
    /// META-INF/ plus the manifest
    pub metadata: u64,
    /// Entries matching no known prefix
    pub other: u64,
    /// Container bytes not attributable to any entry. Negative means the
    /// size source is inconsistent; that is surfaced, never hidden.
    pub overhead: i64,
    /// True on-disk size of the container file
    pub total: u64,
}

impl SizeBreakdown {
    fn classified_sum(&self) -> u64 {
        self.code + self.resources + self.native_libs + self.assets + self.metadata + self.other
    }

    /// A well-formed container never has negative overhead
    pub fn is_consistent(&self) -> bool {
        self.overhead >= 0
    }

    /// Percent of the true total size, never of the attributed sum
    pub fn percent_of_total(&self, size: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            size as f64 * 100.0 / self.total as f64
        }
    }
}

/// One .so entry inside the container, full path kept so the architecture
/// segment survives for read-time aggregation
#[derive(Debug, Clone, Serialize)]
pub struct NativeApkEntry {
    /// Entry path, e.g. lib/arm64-v8a/libocr.so
    pub path: String,
    pub size: u64,
}

impl NativeApkEntry {
    /// File base name, e.g. libocr.so
    pub fn lib_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Architecture path segment, e.g. arm64-v8a
    pub fn arch(&self) -> Option<&str> {
        let mut segments = self.path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("lib"), Some(arch), Some(_)) => Some(arch),
            _ => None,
        }
    }
}

/// Aggregation of native entries sharing a key (library name or architecture)
#[derive(Debug, Clone, Serialize)]
pub struct NativeGroup {
    pub key: String,
    pub entries: usize,
    pub size: u64,
}

/// Full decomposition of one built artifact
#[derive(Debug, Serialize)]
pub struct PackageBreakdown {
    /// Artifact file name
    pub name: String,
    pub sizes: SizeBreakdown,
    /// Every .so entry with its full in-container path
    pub native_entries: Vec<NativeApkEntry>,
}

impl PackageBreakdown {
    /// Group native entries by library base name, largest first.
    /// `entries` is the number of architecture variants of that name.
    pub fn native_by_lib_name(&self) -> Vec<NativeGroup> {
        group_by(&self.native_entries, |e| e.lib_name().to_string())
    }

    /// Group native entries by architecture segment, largest first
    pub fn native_by_arch(&self) -> Vec<NativeGroup> {
        group_by(&self.native_entries, |e| {
            e.arch().unwrap_or("unknown").to_string()
        })
    }

    pub fn native_total(&self) -> u64 {
        self.native_entries.iter().map(|e| e.size).sum()
    }
}

fn group_by<F>(entries: &[NativeApkEntry], key_of: F) -> Vec<NativeGroup>
where
    F: Fn(&NativeApkEntry) -> String,
{
    let mut groups: Vec<NativeGroup> = Vec::new();
    for entry in entries {
        let key = key_of(entry);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => {
                group.entries += 1;
                group.size += entry.size;
            }
            None => groups.push(NativeGroup {
                key,
                entries: 1,
                size: entry.size,
            }),
        }
    }
    groups.sort_by(|a, b| b.size.cmp(&a.size).then(a.key.cmp(&b.key)));
    groups
}

/// Decompose the artifact at `path`. A container that cannot be opened or
/// walked yields an error the caller degrades to "no built artifact".
pub fn decompose(path: &Path) -> Result<PackageBreakdown, AuditError> {
    let total = std::fs::metadata(path)
        .map_err(|source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let file = File::open(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut archive = ZipArchive::new(file).map_err(|source| AuditError::MalformedArchive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sizes = SizeBreakdown {
        total,
        ..Default::default()
    };
    let mut native_entries = Vec::new();

    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|source| AuditError::MalformedEntry {
                path: path.to_path_buf(),
                index,
                source,
            })?;
        if entry.is_dir() {
            continue;
        }

        // Compressed size is the space the entry occupies in the container;
        // fall back to the uncompressed size when it carries no information.
        let size = if entry.compressed_size() > 0 {
            entry.compressed_size()
        } else {
            entry.size()
        };
        let name = entry.name().to_string();

        if name.ends_with(".dex") {
            sizes.code += size;
        } else if name.starts_with("res/") {
            sizes.resources += size;
        } else if name.starts_with("lib/") {
            sizes.native_libs += size;
            if name.ends_with(".so") {
                native_entries.push(NativeApkEntry { path: name, size });
            }
        } else if name.starts_with("assets/") {
            sizes.assets += size;
        } else if name.starts_with("META-INF/") || name == "AndroidManifest.xml" {
            sizes.metadata += size;
        } else {
            sizes.other += size;
        }
    }

    sizes.overhead = total as i64 - sizes.classified_sum() as i64;
    if !sizes.is_consistent() {
        debug!(
            "Entry sizes exceed container size by {} bytes in {}",
            -sizes.overhead,
            path.display()
        );
    }

    native_entries.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(PackageBreakdown {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        sizes,
        native_entries,
    })
}
