use thiserror::Error;

/// Errors from the fallible edges around the planner (catalog lookups and
/// schedule document checks). Planning itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("unknown growth program: {0}")]
    UnknownProgram(String),
    #[error("program {program} has no phase {phase}")]
    UnknownPhase { program: String, phase: String },
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("schedule holds {count} entries, device accepts at most {max}")]
    TooManyEntries { count: usize, max: usize },
    #[error("tzOffsetMinutes must be between -720 and 840, got {0}")]
    TzOffsetOutOfRange(i32),
    #[error("entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
