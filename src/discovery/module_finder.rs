//! Gradle module discovery
//!
//! A "module" is any directory holding a build.gradle or build.gradle.kts.
//! Discovery is purely conventional: no Gradle model is ever evaluated, the
//! audit only looks at the directory layout Android projects share.

use crate::config::Config;
use ignore::WalkBuilder;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const BUILD_SCRIPTS: [&str; 2] = ["build.gradle.kts", "build.gradle"];

/// A discovered Gradle module with its conventional source roots
#[derive(Debug, Clone)]
pub struct GradleModule {
    /// Module name (directory name, or "root" for the project root)
    pub name: String,

    /// Absolute path to the module directory
    pub root: PathBuf,
}

impl GradleModule {
    pub fn new(name: impl Into<String>, root: PathBuf) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// src/main/res
    pub fn res_dir(&self) -> PathBuf {
        self.root.join("src").join("main").join("res")
    }

    /// src/main/assets
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("src").join("main").join("assets")
    }

    /// src/main/jniLibs
    pub fn jni_libs_dir(&self) -> PathBuf {
        self.root.join("src").join("main").join("jniLibs")
    }

    /// Roots holding reference evidence: java and kotlin sources plus res
    pub fn evidence_dirs(&self) -> Vec<PathBuf> {
        let src = self.root.join("src").join("main");
        vec![src.join("java"), src.join("kotlin"), src.join("res")]
    }

    /// build/outputs, where assembled artifacts land
    pub fn build_outputs_dir(&self) -> PathBuf {
        self.root.join("build").join("outputs")
    }

    /// Existing build scripts of this module
    pub fn build_scripts(&self) -> Vec<PathBuf> {
        BUILD_SCRIPTS
            .iter()
            .map(|name| self.root.join(name))
            .filter(|p| p.is_file())
            .collect()
    }

    /// Whether this module's build script declares the Android application plugin
    pub fn is_application(&self) -> bool {
        self.build_scripts().iter().any(|script| {
            std::fs::read_to_string(script)
                .map(|text| text.contains("com.android.application"))
                .unwrap_or(false)
        })
    }
}

/// Finds Gradle modules under a project root
pub struct ModuleFinder<'a> {
    config: &'a Config,
}

impl<'a> ModuleFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Discover all modules, sorted by name for deterministic output
    pub fn find(&self, project_root: &Path) -> Result<Vec<GradleModule>> {
        debug!("Discovering modules in: {}", project_root.display());

        let mut modules = Vec::new();

        let walker = WalkBuilder::new(project_root)
            .hidden(true)
            .git_ignore(true)
            .follow_links(false)
            .max_depth(Some(3))
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            if path != project_root && self.config.should_exclude(path, project_root) {
                trace!("Excluding: {}", path.display());
                continue;
            }
            if !BUILD_SCRIPTS.iter().any(|s| path.join(s).is_file()) {
                continue;
            }

            let name = if path == project_root {
                "root".to_string()
            } else {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "root".to_string())
            };

            trace!("Found module {} at {}", name, path.display());
            modules.push(GradleModule::new(name, path.to_path_buf()));
        }

        modules.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Found {} modules", modules.len());
        Ok(modules)
    }

    /// Pick the module whose built artifacts should be decomposed.
    ///
    /// Fallback order: module declaring the Android application plugin,
    /// then a module literally named "app", then the project root.
    pub fn find_app_module(&self, modules: &[GradleModule], project_root: &Path) -> GradleModule {
        if let Some(app) = modules.iter().find(|m| m.is_application()) {
            return app.clone();
        }
        if let Some(app) = modules.iter().find(|m| m.name == "app") {
            return app.clone();
        }
        GradleModule::new("root", project_root.to_path_buf())
    }
}

/// Convenience wrapper used by the CLI
pub fn find_modules(project_root: &Path, config: &Config) -> Result<Vec<GradleModule>> {
    ModuleFinder::new(config).find(project_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_module(root: &Path, name: &str, script: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("build.gradle.kts"), script).unwrap();
    }

    #[test]
    fn test_finds_modules_sorted() {
        let temp = TempDir::new().unwrap();
        make_module(temp.path(), "feature", "plugins {}");
        make_module(temp.path(), "app", "plugins {}");

        let config = Config::default();
        let modules = find_modules(temp.path(), &config).unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["app", "feature"]);
    }

    #[test]
    fn test_finds_modules_under_hidden_ancestor() {
        let temp = TempDir::new().unwrap();
        // Project roots commonly live under hidden directories (CI
        // workspaces, ~/.local checkouts); those ancestors are not the
        // project's business.
        let root = temp.path().join(".workspaces").join("proj");
        fs::create_dir_all(&root).unwrap();
        make_module(&root, "app", "plugins {}");

        let config = Config::default();
        let modules = find_modules(&root, &config).unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["app"]);
    }

    #[test]
    fn test_app_module_by_plugin() {
        let temp = TempDir::new().unwrap();
        make_module(temp.path(), "mobile", "id(\"com.android.application\")");
        make_module(temp.path(), "core", "id(\"com.android.library\")");

        let config = Config::default();
        let finder = ModuleFinder::new(&config);
        let modules = finder.find(temp.path()).unwrap();
        let app = finder.find_app_module(&modules, temp.path());
        assert_eq!(app.name, "mobile");
    }

    #[test]
    fn test_app_module_fallback_by_name() {
        let temp = TempDir::new().unwrap();
        make_module(temp.path(), "app", "plugins {}");
        make_module(temp.path(), "core", "plugins {}");

        let config = Config::default();
        let finder = ModuleFinder::new(&config);
        let modules = finder.find(temp.path()).unwrap();
        let app = finder.find_app_module(&modules, temp.path());
        assert_eq!(app.name, "app");
    }

    #[test]
    fn test_app_module_fallback_to_root() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let finder = ModuleFinder::new(&config);
        let app = finder.find_app_module(&[], temp.path());
        assert_eq!(app.name, "root");
        assert_eq!(app.root, temp.path());
    }

    #[test]
    fn test_conventional_dirs() {
        let module = GradleModule::new("app", PathBuf::from("/proj/app"));
        assert_eq!(module.res_dir(), PathBuf::from("/proj/app/src/main/res"));
        assert_eq!(
            module.jni_libs_dir(),
            PathBuf::from("/proj/app/src/main/jniLibs")
        );
        assert_eq!(
            module.build_outputs_dir(),
            PathBuf::from("/proj/app/build/outputs")
        );
    }
}
