mod runner;

pub use runner::{CleanupOutcome, CleanupRunner, CleanupTarget};
