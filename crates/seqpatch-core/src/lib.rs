//! Sequence diff and patch engine.
//!
//! Computes a shortest edit script between two ordered sequences with
//! Myers' algorithm and replays it to reconstruct one sequence from the
//! other.
//!
//! # Key Types
//!
//! - [`Patch`] -- ordered, non-overlapping deltas plus apply/restore logic
//! - [`Delta`] / [`DeltaKind`] -- one insert, delete, or change
//! - [`Chunk`] -- a positioned slice of one side of the diff
//! - [`Equivalence`] -- element comparison used by the search
//! - [`DiffOptions`] / [`CancelFlag`] -- timeout and cooperative cancellation
//!
//! # Example
//!
//! ```
//! use seqpatch_core::diff;
//!
//! let original = vec!["a", "b", "c", "d"];
//! let revised = vec!["a", "c", "d", "e"];
//!
//! let patch = diff(&original, &revised).unwrap();
//! assert_eq!(patch.apply_to(&original).unwrap(), revised);
//! assert_eq!(patch.restore(&revised).unwrap(), original);
//! ```

mod builder;
pub mod chunk;
pub mod delta;
pub mod diff;
pub mod equivalence;
pub mod error;
mod myers;
pub mod options;
pub mod patch;

pub use chunk::Chunk;
pub use delta::{Delta, DeltaKind};
pub use diff::{diff, diff_with};
pub use equivalence::{DefaultEquivalence, Equivalence, IgnoreWhitespace};
pub use error::{DiffError, DiffResult};
pub use options::{CancelFlag, DiffOptions};
pub use patch::Patch;
