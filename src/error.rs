use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the audit subsystems.
///
/// None of these are ever allowed to abort the process: the inspect pipeline
/// degrades each failing facet to a warning in the final report and keeps
/// going. The variants exist so callers can decide *which* facet to skip.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open {path} as a zip archive: {source}")]
    MalformedArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("malformed entry #{index} in {path}: {source}")]
    MalformedEntry {
        path: PathBuf,
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },
}

/// Outcome of a single analysis facet.
///
/// Collector stages never raise: a facet either produced data or was skipped
/// with a human-readable reason that the report aggregates as a warning.
#[derive(Debug)]
pub enum Facet<T> {
    Ready(T),
    Skipped(String),
}

impl<T> Facet<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Facet::Ready(data) => Some(data),
            Facet::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Facet::Ready(_) => None,
            Facet::Skipped(reason) => Some(reason),
        }
    }
}
