use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an apkaudit run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory names to exclude from module discovery and scans
    pub exclude: Vec<String>,

    /// Resource base names that are never reported as unused
    /// (e.g. resources looked up through dynamically built identifiers)
    pub retain_resources: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,

    /// Cleanup configuration
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// How many native libraries to list by name before folding the rest
    pub top_native_libs: usize,

    /// How many unused files to list before folding the rest
    pub sample_files: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Never delete files whose path contains one of these segments
    pub protected_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: vec![
                "build".to_string(),
                "generated".to_string(),
                ".gradle".to_string(),
                ".idea".to_string(),
            ],
            retain_resources: vec![],
            report: ReportConfig::default(),
            cleanup: CleanupConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            top_native_libs: 15,
            sample_files: 20,
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            protected_paths: vec![],
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".apkaudit.yml",
            ".apkaudit.yaml",
            ".apkaudit.toml",
            "apkaudit.yml",
            "apkaudit.yaml",
            "apkaudit.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check whether a path falls under an excluded or hidden directory.
    /// Only components below `root` are tested; ancestors of the project
    /// root (a hidden home directory, a CI workspace named `build`) must
    /// never exclude the project itself.
    pub fn should_exclude(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            let hidden = name.starts_with('.') && name != "." && name != "..";
            hidden || self.exclude.iter().any(|pattern| name == pattern.as_str())
        })
    }

    /// Check whether a resource base name is pinned as used
    pub fn should_retain(&self, base_name: &str) -> bool {
        self.retain_resources.iter().any(|r| r == base_name)
    }
}
