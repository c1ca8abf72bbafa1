mod fmt;
mod json;
mod suggestions;
mod terminal;

pub use fmt::format_size;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::{CatalogAnalysis, PackageBreakdown};
use crate::collect::{NativeLibraryEntry, ResourceFile, ResourceScan};
use crate::config::ReportConfig;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Everything one audit run found, in render-ready form.
/// Built once per invocation; reporters only read it.
#[derive(Debug, Default, Serialize)]
pub struct AuditReport {
    /// Module names, sorted
    pub modules: Vec<String>,
    /// Module whose build outputs were decomposed
    pub app_module: String,
    pub resources: ResourceScan,
    /// Image resources with no textual reference anywhere in the corpus
    pub unused_resources: Vec<ResourceFile>,
    /// On-disk native libraries across all modules
    pub native_libs: Vec<NativeLibraryEntry>,
    /// Decomposition of the selected built artifact, when one was found
    pub package: Option<PackageBreakdown>,
    /// Catalog findings, when a catalog exists
    pub catalog: Option<CatalogAnalysis>,
    /// Per-facet skip reasons and consistency warnings
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AuditReport {
    /// Derive the suggestion lines from the collected findings
    pub fn finalize(&mut self) {
        self.suggestions = suggestions::derive(self);
    }

    pub fn unused_resources_size(&self) -> u64 {
        self.unused_resources.iter().map(|r| r.size).sum()
    }

    pub fn native_libs_size(&self) -> u64 {
        self.native_libs.iter().map(|l| l.size).sum()
    }
}

/// Reporter dispatching on the configured output format
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    config: ReportConfig,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>, config: ReportConfig) -> Self {
        Self {
            format,
            output_path,
            config,
        }
    }

    pub fn report(&self, report: &AuditReport) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new(self.config.clone()).report(report),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(report),
        }
    }
}
