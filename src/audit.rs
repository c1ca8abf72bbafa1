//! Full audit pipeline
//!
//! One invocation builds the whole model from scratch: discover modules,
//! collect resources and native libs, build the evidence corpus, decompose
//! the best built artifact and cross-reference the version catalog. No facet
//! failure aborts the run; each skipped facet lands as a warning in the
//! report. Every collection is sorted, so an unchanged tree produces an
//! identical report.

use crate::analysis::{
    decompose, select_artifact, CatalogAnalyzer, ReferenceMatcher,
};
use crate::collect::{collect_native_libs, CorpusBuilder, ResourceCollector};
use crate::config::Config;
use crate::discovery::ModuleFinder;
use crate::error::Facet;
use crate::report::AuditReport;
use indicatif::{ProgressBar, ProgressStyle};
use miette::Result;
use std::path::Path;
use tracing::{info, warn};

/// Run the full audit over `project_root`
pub fn run(project_root: &Path, config: &Config, show_progress: bool) -> Result<AuditReport> {
    let mut report = AuditReport::default();

    // Step 1: discover modules
    let finder = ModuleFinder::new(config);
    let modules = finder.find(project_root)?;
    if modules.is_empty() {
        warn!("No Gradle modules found under {}", project_root.display());
        report
            .warnings
            .push("no Gradle modules found, nothing to audit".to_string());
        report.finalize();
        return Ok(report);
    }
    report.modules = modules.iter().map(|m| m.name.clone()).collect();

    let app_module = finder.find_app_module(&modules, project_root);
    info!("App module: {}", app_module.name);
    report.app_module = app_module.name.clone();

    // Step 2: collect resources and native libraries
    report.resources = ResourceCollector::new(config).collect(&modules);
    report.native_libs = collect_native_libs(&modules);
    info!(
        "Collected {} resource files, {} native libs",
        report.resources.files.len(),
        report.native_libs.len()
    );

    // Step 3: build the evidence corpus
    let evidence_files = CorpusBuilder::evidence_files(&modules);
    let progress = if show_progress {
        let pb = ProgressBar::new(evidence_files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("building corpus");
        Some(pb)
    } else {
        None
    };
    let mut builder = CorpusBuilder::new();
    for file in &evidence_files {
        builder.add_file(file);
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    if builder.skipped() > 0 {
        report
            .warnings
            .push(format!("{} evidence files were unreadable and skipped", builder.skipped()));
    }
    let corpus = builder.build();
    info!("Corpus: {} bytes of evidence", corpus.len());

    // Step 4: flag unused image resources
    let matcher = ReferenceMatcher::new(&corpus, config);
    report.unused_resources = report
        .resources
        .files
        .iter()
        .filter(|f| f.category.is_image())
        .filter(|f| !matcher.is_referenced(f))
        .cloned()
        .collect();

    // Step 5: select and decompose the built artifact
    let package = match select_artifact(&app_module.build_outputs_dir()) {
        Some(candidate) => {
            info!("Selected artifact: {}", candidate.path.display());
            match decompose(&candidate.path) {
                Ok(breakdown) => Facet::Ready(breakdown),
                Err(e) => {
                    warn!("Could not analyze artifact: {e}");
                    Facet::Skipped(format!("could not analyze artifact: {e}"))
                }
            }
        }
        None => Facet::Skipped("no built artifact found under build/outputs".to_string()),
    };
    match package {
        Facet::Ready(breakdown) => {
            if !breakdown.sizes.is_consistent() {
                report.warnings.push(format!(
                    "entry sizes exceed the container size by {} bytes; size source is inconsistent",
                    -breakdown.sizes.overhead
                ));
            }
            report.package = Some(breakdown);
        }
        Facet::Skipped(reason) => report.warnings.push(reason),
    }

    // Step 6: cross-reference the version catalog
    match CatalogAnalyzer::analyze(project_root, &modules) {
        Facet::Ready(catalog) => report.catalog = Some(catalog),
        Facet::Skipped(reason) => report.warnings.push(reason),
    }

    report.finalize();
    Ok(report)
}
