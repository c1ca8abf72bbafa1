//! Unused-resource cleanup
//!
//! Thin destructive consumer of the unused-resource signal. Without
//! `--confirm` this is always a dry run: candidates are listed with their
//! reclaimable size and nothing is touched. Deletion failures are counted
//! per file and never halt the remaining deletions.

use crate::analysis::ReferenceMatcher;
use crate::collect::{CorpusBuilder, ResourceCategory, ResourceCollector, ResourceFile};
use crate::config::Config;
use crate::discovery::find_modules;
use crate::report::format_size;
use clap::ValueEnum;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Which resource types the cleanup considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CleanupTarget {
    Png,
    Jpg,
    Webp,
    Svg,
    All,
}

impl CleanupTarget {
    fn matches(self, category: ResourceCategory) -> bool {
        match self {
            Self::Png => category == ResourceCategory::Png,
            Self::Jpg => category == ResourceCategory::Jpeg,
            Self::Webp => category == ResourceCategory::Webp,
            Self::Svg => category == ResourceCategory::VectorDrawable,
            Self::All => {
                category.is_raster_image() || category == ResourceCategory::VectorDrawable
            }
        }
    }
}

/// What a cleanup run did (or would have done)
#[derive(Debug, Default)]
pub struct CleanupOutcome {
    pub candidates: Vec<ResourceFile>,
    pub dry_run: bool,
    pub deleted: usize,
    pub failed: usize,
}

impl CleanupOutcome {
    pub fn reclaimable(&self) -> u64 {
        self.candidates.iter().map(|c| c.size).sum()
    }
}

/// Runs the cleanup operation over one project
pub struct CleanupRunner {
    target: CleanupTarget,
    confirm: bool,
    interactive: bool,
}

impl CleanupRunner {
    pub fn new(target: CleanupTarget, confirm: bool, interactive: bool) -> Self {
        Self {
            target,
            confirm,
            interactive,
        }
    }

    /// Collect unused resources matching the target selector
    pub fn find_candidates(&self, project_root: &Path, config: &Config) -> Result<Vec<ResourceFile>> {
        let modules = find_modules(project_root, config)?;
        if modules.is_empty() {
            println!("{}", "No Gradle modules found, nothing to clean.".yellow());
            return Ok(Vec::new());
        }

        info!("Scanning {} modules for unused resources", modules.len());
        let corpus = CorpusBuilder::build_for(&modules);
        let scan = ResourceCollector::new(config).collect(&modules);
        let matcher = ReferenceMatcher::new(&corpus, config);

        let candidates = scan
            .files
            .iter()
            .filter(|f| self.target.matches(f.category))
            .filter(|f| !matcher.is_referenced(f))
            .filter(|f| !self.is_protected(f, config))
            .cloned()
            .collect();
        Ok(candidates)
    }

    fn is_protected(&self, resource: &ResourceFile, config: &Config) -> bool {
        config.cleanup.protected_paths.iter().any(|segment| {
            resource
                .path
                .components()
                .any(|c| c.as_os_str().to_string_lossy() == segment.as_str())
        })
    }

    /// Run the full operation. Always returns Ok: failures are reported
    /// textually and counted in the outcome.
    pub fn run(&self, project_root: &Path, config: &Config) -> Result<CleanupOutcome> {
        let candidates = self.find_candidates(project_root, config)?;

        if candidates.is_empty() {
            println!("{}", "No unused resources found for the selected type.".green());
            return Ok(CleanupOutcome {
                dry_run: !self.confirm,
                ..Default::default()
            });
        }

        self.print_plan(&candidates, config);

        if !self.confirm {
            println!();
            println!("{}", "DRY RUN - no files were deleted".yellow().bold());
            println!("To delete these files, re-run with --confirm");
            return Ok(CleanupOutcome {
                candidates,
                dry_run: true,
                ..Default::default()
            });
        }

        let (deleted, failed) = self.delete(&candidates)?;
        println!();
        if deleted > 0 {
            println!(
                "{}",
                format!("Deleted {} files", deleted).green().bold()
            );
        }
        if failed > 0 {
            println!("{}", format!("Failed to delete {} files", failed).red());
        }

        Ok(CleanupOutcome {
            candidates,
            dry_run: false,
            deleted,
            failed,
        })
    }

    fn print_plan(&self, candidates: &[ResourceFile], config: &Config) {
        let total: u64 = candidates.iter().map(|c| c.size).sum();
        println!();
        println!(
            "Found {} unused resource files ({})",
            candidates.len().to_string().yellow().bold(),
            format_size(total)
        );

        // By-type breakdown, ordered by category name
        let mut by_type: BTreeMap<String, (usize, u64)> = BTreeMap::new();
        for candidate in candidates {
            let entry = by_type.entry(candidate.category.to_string()).or_default();
            entry.0 += 1;
            entry.1 += candidate.size;
        }
        println!();
        println!("By type:");
        for (category, (count, size)) in &by_type {
            println!("   • {}: {} files ({})", category, count, format_size(*size));
        }

        let mut by_module: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
        for candidate in candidates {
            let entry = by_module.entry(candidate.module.as_str()).or_default();
            entry.0 += 1;
            entry.1 += candidate.size;
        }
        println!();
        println!("By module:");
        for (module, (count, size)) in &by_module {
            println!("   {}: {} files ({})", module, count, format_size(*size));
        }

        let sample = config.report.sample_files;
        println!();
        println!("Files (showing first {}):", sample.min(candidates.len()));
        for candidate in candidates.iter().take(sample) {
            println!(
                "   • {} ({})",
                candidate.path.display(),
                format_size(candidate.size)
            );
        }
        if candidates.len() > sample {
            println!("   ... and {} more files", candidates.len() - sample);
        }
    }

    /// Delete candidates, optionally confirming each interactively.
    /// A failed deletion is counted and the loop continues.
    fn delete(&self, candidates: &[ResourceFile]) -> Result<(usize, usize)> {
        println!();
        println!("{}", "Deleting files...".cyan().bold());

        let mut deleted = 0;
        let mut failed = 0;

        for candidate in candidates {
            if self.interactive {
                let prompt = format!("Delete {}?", candidate.path.display());
                let accepted = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(&prompt)
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if !accepted {
                    continue;
                }
            }

            match std::fs::remove_file(&candidate.path) {
                Ok(()) => deleted += 1,
                Err(e) => {
                    failed += 1;
                    println!(
                        "   {} Failed to delete {}: {}",
                        "✗".red(),
                        candidate.path.display(),
                        e
                    );
                }
            }
        }

        Ok((deleted, failed))
    }
}
