mod loader;

pub use loader::{CleanupConfig, Config, ReportConfig};
