//! Version-catalog usage analysis
//!
//! Parses gradle/libs.versions.toml line by line (only the [libraries]
//! section matters) and cross-references every alias against the text of all
//! build scripts. An alias with no accessor-shaped match anywhere is flagged
//! as an unused declaration.

use crate::discovery::GradleModule;
use crate::error::Facet;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One entry of the [libraries] section
#[derive(Debug, Clone, Serialize)]
pub struct DependencyDeclaration {
    /// Catalog alias, e.g. okhttp-client
    pub alias: String,
    /// Resolved coordinate, e.g. com.squareup.okhttp3:okhttp
    pub coordinate: String,
    /// Catalog file name the alias was declared in
    pub defined_in: String,
}

/// Findings for the whole catalog facet
#[derive(Debug, Default, Serialize)]
pub struct CatalogAnalysis {
    /// Total aliases declared in the catalog
    pub declared: usize,
    /// Declarations with no accessor match in any build script, sorted by alias
    pub unused: Vec<DependencyDeclaration>,
}

/// Analyzer over one project root
pub struct CatalogAnalyzer;

impl CatalogAnalyzer {
    /// Conventional catalog locations, first hit wins
    fn find_catalog(project_root: &Path) -> Option<PathBuf> {
        [
            project_root.join("gradle").join("libs.versions.toml"),
            project_root.join("libs.versions.toml"),
        ]
        .into_iter()
        .find(|p| p.is_file())
    }

    /// Run the analysis. A missing catalog skips the facet with a warning;
    /// it is never an error.
    pub fn analyze(project_root: &Path, modules: &[GradleModule]) -> Facet<CatalogAnalysis> {
        let Some(catalog_path) = Self::find_catalog(project_root) else {
            warn!("libs.versions.toml not found, skipping dependency analysis");
            return Facet::Skipped("libs.versions.toml not found".to_string());
        };

        let catalog_text = match std::fs::read_to_string(&catalog_path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not read {}: {}", catalog_path.display(), e);
                return Facet::Skipped(format!(
                    "could not read {}: {e}",
                    catalog_path.display()
                ));
            }
        };

        let defined_in = catalog_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let libraries = parse_libraries(&catalog_text);
        debug!("Catalog declares {} libraries", libraries.len());

        let build_scripts = concat_build_scripts(modules);

        let mut unused: Vec<DependencyDeclaration> = libraries
            .iter()
            .filter(|(alias, _)| !is_alias_used(alias, &build_scripts))
            .map(|(alias, coordinate)| DependencyDeclaration {
                alias: alias.clone(),
                coordinate: coordinate.clone(),
                defined_in: defined_in.clone(),
            })
            .collect();
        unused.sort_by(|a, b| a.alias.cmp(&b.alias));

        Facet::Ready(CatalogAnalysis {
            declared: libraries.len(),
            unused,
        })
    }
}

/// Concatenate every module's build.gradle / build.gradle.kts text
fn concat_build_scripts(modules: &[GradleModule]) -> String {
    let mut text = String::new();
    for module in modules {
        for script in module.build_scripts() {
            if let Ok(contents) = std::fs::read_to_string(&script) {
                text.push_str(&contents);
                text.push('\n');
            }
        }
    }
    text
}

/// Parse (alias, coordinate) pairs out of the [libraries] section.
///
/// Three definition forms are recognized:
/// - inline map with group/name keys: `a = { group = "g", name = "n", ... }`
/// - quoted coordinate string: `a = "g:n:1.0"`
/// - anything else is an opaque reference and is kept verbatim
pub fn parse_libraries(content: &str) -> Vec<(String, String)> {
    let mut libraries = Vec::new();
    let mut in_libraries = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed == "[libraries]" {
            in_libraries = true;
            continue;
        }
        // Any other section header ends the libraries block
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_libraries = false;
            continue;
        }
        if !in_libraries || trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((alias, definition)) = trimmed.split_once('=') else {
            continue;
        };
        let alias = alias.trim().to_string();
        let definition = definition.trim();

        let coordinate = if definition.contains("group") && definition.contains("name") {
            let group = extract_quoted_value(definition, "group");
            let name = extract_quoted_value(definition, "name");
            format!("{group}:{name}")
        } else if definition.starts_with('"') || definition.starts_with('\'') {
            definition.trim_matches(|c| c == '"' || c == '\'').to_string()
        } else {
            definition.to_string()
        };

        libraries.push((alias, coordinate));
    }

    libraries
}

/// Pull a quoted value like `group = "com.squareup"` out of an inline map
fn extract_quoted_value(definition: &str, key: &str) -> String {
    let pattern = format!(r#"{key}\s*=\s*["']([^"']+)["']"#);
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(definition))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Test whether an alias is referenced from any build script.
///
/// Accessor shapes checked: catalog dot-path (`libs.<alias>` with separators
/// normalized to dots), the alternate `truLibs` accessor, plugin-namespaced
/// variants of both, and a dash-literal form where only dashes become dots.
pub fn is_alias_used(alias: &str, build_scripts: &str) -> bool {
    let normalized = alias.replace(['-', '_'], ".");
    let dashes_only = alias.replace('-', "\\.");

    let patterns = [
        format!(r"libs\.{normalized}"),
        format!(r"truLibs\.{normalized}"),
        format!(r"libs\.plugins\.{normalized}"),
        format!(r"truLibs\.plugins\.{normalized}"),
        format!(r"libs\.{dashes_only}"),
        format!(r"truLibs\.{dashes_only}"),
    ];

    patterns.iter().any(|pattern| {
        Regex::new(pattern)
            .map(|re| re.is_match(build_scripts))
            .unwrap_or(false)
    })
}
