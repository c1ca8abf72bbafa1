use crate::report::AuditReport;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

/// JSON reporter, to stdout or a file
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &AuditReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report).into_diagnostic()?;

        match &self.output_path {
            Some(path) => {
                std::fs::write(path, json).into_diagnostic()?;
                eprintln!("Report written to {}", path.display());
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}
