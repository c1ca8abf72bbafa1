//! Threshold-driven optimization suggestions
//!
//! Stateless: every line is derived from the report's findings, nothing here
//! mutates or persists.

use crate::collect::ResourceCategory;
use crate::report::{format_size, AuditReport};

const MANY_UNUSED_IMAGES: usize = 5;
const MANY_PNGS: usize = 20;
const MANY_JPEGS: usize = 10;
const LARGE_NATIVE_LIBS: u64 = 5 * 1024 * 1024;
const LARGE_ANIMATION: u64 = 100 * 1024;

pub fn derive(report: &AuditReport) -> Vec<String> {
    let mut suggestions = Vec::new();

    let unused_count = report.unused_resources.len();
    if unused_count > MANY_UNUSED_IMAGES {
        suggestions.push(format!(
            "Remove {} unused images to save {}",
            unused_count,
            format_size(report.unused_resources_size())
        ));
    }

    let pngs = report.resources.category_count(ResourceCategory::Png);
    let webps = report.resources.category_count(ResourceCategory::Webp);
    if pngs > MANY_PNGS && webps < pngs / 2 {
        let estimated = report.resources.category_size(ResourceCategory::Png) as f64 * 0.3;
        suggestions.push(format!(
            "Convert PNGs to WebP to save roughly {}",
            format_size(estimated as u64)
        ));
    }

    if report.resources.category_count(ResourceCategory::Jpeg) > MANY_JPEGS {
        suggestions
            .push("Convert JPEGs to WebP for better compression at the same quality".to_string());
    }

    let native_size = report.native_libs_size();
    if native_size > LARGE_NATIVE_LIBS {
        suggestions.push(format!(
            "Native libs are large ({}); use App Bundles for per-ABI delivery",
            format_size(native_size)
        ));
    }

    let has_large_animation = report
        .resources
        .in_category(ResourceCategory::Animation)
        .any(|f| f.size > LARGE_ANIMATION);
    if has_large_animation {
        suggestions
            .push("Large animation files detected; optimize or reduce complexity".to_string());
    }

    if report.package.is_none() {
        suggestions.push(format!(
            "Build your app for accurate size analysis: ./gradlew {}:assembleRelease",
            report.app_module
        ));
    }

    if let Some(catalog) = &report.catalog {
        if !catalog.unused.is_empty() {
            suggestions.push(format!(
                "Remove {} unused dependencies from libs.versions.toml",
                catalog.unused.len()
            ));
        }
    }

    suggestions
}
