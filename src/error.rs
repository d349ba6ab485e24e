//! Error types for the symbol table and its configuration.

/// Runtime failure of a mutating operation. When one is returned the table
/// is exactly as it was before the call.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SymTableError {
    #[error("out of memory: could not reserve {bytes} bytes")]
    OutOfMemory { bytes: usize },
}

/// Rejected bucket schedule.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("bucket schedule is empty")]
    Empty,

    #[error("bucket schedule contains a zero bucket count")]
    ZeroBuckets,

    #[error("bucket schedule is not strictly ascending at index {index}")]
    NotAscending { index: usize },
}
