//! apkaudit - Android app size auditing
//!
//! This library answers "where did the bytes go, and what can be removed?"
//! for Android projects, from the source tree and the built package alike.
//!
//! # Architecture
//!
//! The audit pipeline consists of:
//! 1. **Module Discovery** - Find Gradle modules by directory convention
//! 2. **Collection** - Classify resource files and native libraries
//! 3. **Corpus Building** - Concatenate all source/XML text as usage evidence
//! 4. **Reference Matching** - Flag resources with no textual reference
//! 5. **Artifact Decomposition** - Attribute every byte of the built APK/AAB
//! 6. **Catalog Analysis** - Flag version-catalog aliases no build script uses
//! 7. **Reporting** - Render findings as terminal or JSON output

pub mod analysis;
pub mod audit;
pub mod cleanup;
pub mod collect;
pub mod config;
pub mod discovery;
pub mod error;
pub mod report;

pub use analysis::{CatalogAnalyzer, PackageBreakdown, ReferenceMatcher, SizeBreakdown};
pub use cleanup::{CleanupRunner, CleanupTarget};
pub use collect::{Corpus, CorpusBuilder, ResourceCategory, ResourceFile, ResourceScan};
pub use config::Config;
pub use discovery::{find_modules, GradleModule};
pub use error::{AuditError, Facet};
pub use report::{AuditReport, ReportFormat, Reporter};
