mod artifact;
mod catalog;
mod package;
mod references;

pub use artifact::{select_artifact, ArtifactCandidate};
pub use catalog::{CatalogAnalysis, CatalogAnalyzer, DependencyDeclaration};
pub use package::{decompose, NativeApkEntry, PackageBreakdown, SizeBreakdown};
pub use references::ReferenceMatcher;
