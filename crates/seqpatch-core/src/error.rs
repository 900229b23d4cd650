//! Error types for the diff engine and patch applier.

use thiserror::Error;

/// Errors that can occur while computing or applying a patch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The caller handed in something the engine refuses to work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The path search or path walk broke one of its own invariants.
    ///
    /// This points at a defect in the engine, not at bad input.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// A delta does not fit the sequence it is being applied to.
    #[error("patch application failed at position {position}: {reason}")]
    PatchApplication { position: usize, reason: String },

    /// The search was cancelled through its [`CancelFlag`](crate::CancelFlag).
    #[error("diff cancelled after {rounds} edit rounds")]
    Cancelled { rounds: usize },

    /// The search ran past its configured timeout.
    #[error("diff timed out after {rounds} edit rounds")]
    TimedOut { rounds: usize },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
