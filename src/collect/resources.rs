//! Resource collection and classification
//!
//! Walks each module's res/ and assets/ roots and classifies every regular
//! file into a semantic category by extension and path heuristics. The walk
//! yields an immutable stream of classified records; `ResourceScan` is the
//! fold over that stream, so no counters are mutated during traversal.

use crate::config::Config;
use crate::discovery::GradleModule;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Semantic category of a resource file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceCategory {
    Png,
    Jpeg,
    Webp,
    /// XML under a drawable directory whose content carries a vector marker
    VectorDrawable,
    Layout,
    /// JSON under raw/ or assets/, conventionally Lottie animations
    Animation,
    Font,
    Other,
}

impl ResourceCategory {
    pub fn is_raster_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg | Self::Webp)
    }

    pub fn is_image(self) -> bool {
        self.is_raster_image() || self == Self::VectorDrawable
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPG",
            Self::Webp => "WebP",
            Self::VectorDrawable => "Vector Drawable",
            Self::Layout => "Layout",
            Self::Animation => "Animation",
            Self::Font => "Font",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Path-encoded resolution tier for image resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DensityBucket {
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
    Nodpi,
    Anydpi,
}

impl DensityBucket {
    pub const ALL: [DensityBucket; 8] = [
        Self::Ldpi,
        Self::Mdpi,
        Self::Hdpi,
        Self::Xhdpi,
        Self::Xxhdpi,
        Self::Xxxhdpi,
        Self::Nodpi,
        Self::Anydpi,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Ldpi => "ldpi",
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
            Self::Nodpi => "nodpi",
            Self::Anydpi => "anydpi",
        }
    }

    /// Parse the bucket from the containing directory name, e.g.
    /// drawable-xxhdpi or drawable-hdpi-v4. The density qualifier can sit
    /// anywhere in the name, so the match is a substring check, longest
    /// density first so "xxhdpi" does not match as "hdpi".
    pub fn from_path(path: &Path) -> Option<Self> {
        let parent = path.parent()?.file_name()?.to_string_lossy();
        let mut ordered = Self::ALL;
        ordered.sort_by_key(|d| std::cmp::Reverse(d.suffix().len()));
        ordered
            .into_iter()
            .find(|d| parent.contains(&format!("-{}", d.suffix())))
    }
}

impl fmt::Display for DensityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One classified resource file. Immutable after the walk; only the cleanup
/// command ever removes the file it points at.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub module: String,
    pub category: ResourceCategory,
    pub size: u64,
    pub density: Option<DensityBucket>,
}

impl ResourceFile {
    /// File name without extension, the identifier resources are referenced by
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Aggregate view over all collected resource files
#[derive(Debug, Default, Serialize)]
pub struct ResourceScan {
    pub files: Vec<ResourceFile>,
    /// Running sum over every regular file seen, regardless of category
    pub total_size: u64,
}

impl ResourceScan {
    /// Reduce a stream of classified records into the final aggregate
    pub fn from_records(mut files: Vec<ResourceFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        let total_size = files.iter().map(|f| f.size).sum();
        Self { files, total_size }
    }

    pub fn in_category(&self, category: ResourceCategory) -> impl Iterator<Item = &ResourceFile> {
        self.files.iter().filter(move |f| f.category == category)
    }

    pub fn category_count(&self, category: ResourceCategory) -> usize {
        self.in_category(category).count()
    }

    pub fn category_size(&self, category: ResourceCategory) -> u64 {
        self.in_category(category).map(|f| f.size).sum()
    }

    /// Image count per density bucket, buckets with zero images omitted
    pub fn density_counts(&self) -> Vec<(DensityBucket, usize)> {
        DensityBucket::ALL
            .iter()
            .filter_map(|&bucket| {
                let count = self
                    .files
                    .iter()
                    .filter(|f| f.category.is_image() && f.density == Some(bucket))
                    .count();
                (count > 0).then_some((bucket, count))
            })
            .collect()
    }
}

/// Walks module resource roots and classifies what it finds
pub struct ResourceCollector<'a> {
    config: &'a Config,
}

impl<'a> ResourceCollector<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Scan res/ and assets/ of every module
    pub fn collect(&self, modules: &[GradleModule]) -> ResourceScan {
        let mut records = Vec::new();

        for module in modules {
            for root in [module.res_dir(), module.assets_dir()] {
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
                    if self.config.should_exclude(path, &module.root) {
                        continue;
                    }
                    let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                    let category = classify(path);
                    trace!("{:?}: {}", category, path.display());
                    records.push(ResourceFile {
                        path: path.to_path_buf(),
                        module: module.name.clone(),
                        category,
                        size,
                        density: DensityBucket::from_path(path),
                    });
                }
            }
        }

        ResourceScan::from_records(records)
    }
}

fn path_has_segment_containing(path: &Path, needle: &str) -> bool {
    path.parent()
        .map(|parent| {
            parent
                .components()
                .any(|c| c.as_os_str().to_string_lossy().contains(needle))
        })
        .unwrap_or(false)
}

/// Classify a single file by extension and path heuristics
pub fn classify(path: &Path) -> ResourceCategory {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => ResourceCategory::Png,
        "jpg" | "jpeg" => ResourceCategory::Jpeg,
        "webp" => ResourceCategory::Webp,
        "ttf" | "otf" => ResourceCategory::Font,
        "xml" if path_has_segment_containing(path, "drawable") => {
            if is_vector_drawable(path) {
                ResourceCategory::VectorDrawable
            } else {
                ResourceCategory::Other
            }
        }
        "xml" if path_has_segment_containing(path, "layout") => ResourceCategory::Layout,
        "json"
            if path_has_segment_containing(path, "raw")
                || path_has_segment_containing(path, "assets") =>
        {
            ResourceCategory::Animation
        }
        _ => ResourceCategory::Other,
    }
}

/// Textual sniff for vector drawables, deliberately not an XML parse.
/// An unreadable file is treated as non-vector; the walk never aborts.
pub fn is_vector_drawable(path: &Path) -> bool {
    match std::fs::read_to_string(path) {
        Ok(content) => content.contains("<vector") || content.contains("android:pathData"),
        Err(_) => false,
    }
}
