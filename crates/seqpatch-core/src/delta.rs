//! A single classified edit: insert, delete, or change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::error::{DiffError, DiffResult};

/// The three kinds of edit a [`Delta`] can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    /// Elements present only in the revised sequence.
    Insert,
    /// Elements present only in the original sequence.
    Delete,
    /// Elements of the original replaced by different revised elements.
    Change,
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Delete => write!(f, "delete"),
            Self::Change => write!(f, "change"),
        }
    }
}

/// One edit operation, described by the original chunk it replaces and the
/// revised chunk that takes its place.
///
/// Serialized as `{"kind": ..., "original": {...}, "revised": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delta<T> {
    /// `original` is empty, `revised` is not.
    Insert { original: Chunk<T>, revised: Chunk<T> },
    /// `revised` is empty, `original` is not.
    Delete { original: Chunk<T>, revised: Chunk<T> },
    /// Both chunks hold elements.
    Change { original: Chunk<T>, revised: Chunk<T> },
}

impl<T> Delta<T> {
    /// Classify a pair of chunks into the matching variant.
    ///
    /// Two empty chunks describe no edit at all and are rejected.
    pub fn new(original: Chunk<T>, revised: Chunk<T>) -> DiffResult<Self> {
        match (original.is_empty(), revised.is_empty()) {
            (true, false) => Ok(Self::Insert { original, revised }),
            (false, true) => Ok(Self::Delete { original, revised }),
            (false, false) => Ok(Self::Change { original, revised }),
            (true, true) => Err(DiffError::InvalidArgument(format!(
                "delta at original position {} has two empty chunks",
                original.position
            ))),
        }
    }

    /// The kind of edit.
    pub fn kind(&self) -> DeltaKind {
        match self {
            Self::Insert { .. } => DeltaKind::Insert,
            Self::Delete { .. } => DeltaKind::Delete,
            Self::Change { .. } => DeltaKind::Change,
        }
    }

    /// The chunk taken from the original sequence.
    pub fn original(&self) -> &Chunk<T> {
        match self {
            Self::Insert { original, .. }
            | Self::Delete { original, .. }
            | Self::Change { original, .. } => original,
        }
    }

    /// The chunk taken from the revised sequence.
    pub fn revised(&self) -> &Chunk<T> {
        match self {
            Self::Insert { revised, .. }
            | Self::Delete { revised, .. }
            | Self::Change { revised, .. } => revised,
        }
    }

    /// How much the sequence length changes when this delta is applied.
    pub fn size_change(&self) -> isize {
        self.revised().len() as isize - self.original().len() as isize
    }

    /// Returns `true` if the variant tag agrees with the chunk contents.
    ///
    /// Always true for deltas built by the engine or [`Delta::new`]; a
    /// deserialized delta may not be.
    pub fn is_well_formed(&self) -> bool {
        let (o, r) = (self.original().is_empty(), self.revised().is_empty());
        match self {
            Self::Insert { .. } => o && !r,
            Self::Delete { .. } => !o && r,
            Self::Change { .. } => !o && !r,
        }
    }

    /// The same edit seen from the other side: inserts become deletes,
    /// deletes become inserts, and changes swap their chunks.
    pub fn inverted(self) -> Self {
        match self {
            Self::Insert { original, revised } => Self::Delete {
                original: revised,
                revised: original,
            },
            Self::Delete { original, revised } => Self::Insert {
                original: revised,
                revised: original,
            },
            Self::Change { original, revised } => Self::Change {
                original: revised,
                revised: original,
            },
        }
    }

    /// Check that this delta can be applied to a target of `target_len`
    /// elements when earlier deltas have shifted it by `offset`.
    ///
    /// Inserts need a valid insertion point; deletes and changes need the
    /// whole original range to exist.
    pub fn verify(&self, target_len: usize, offset: isize) -> DiffResult<usize> {
        self.original().verify(target_len, offset)
    }
}

impl<T: Clone> Delta<T> {
    /// Apply the delta to `target`, shifted by `offset`.
    ///
    /// The precondition is checked before `target` is touched.
    pub fn apply_to(&self, target: &mut Vec<T>, offset: isize) -> DiffResult<()> {
        let start = self.verify(target.len(), offset)?;
        match self {
            Self::Insert { revised, .. } => {
                splice_in(target, start, &revised.elements);
            }
            Self::Delete { original, .. } => {
                target.drain(start..start + original.len());
            }
            Self::Change { original, revised } => {
                target.drain(start..start + original.len());
                splice_in(target, start, &revised.elements);
            }
        }
        Ok(())
    }

    /// Undo the delta on `target`, a sequence in revised coordinates.
    ///
    /// Offsets here are accumulated from the original side's point of view,
    /// i.e. `original.len - revised.len` of earlier deltas.
    pub fn restore_to(&self, target: &mut Vec<T>, offset: isize) -> DiffResult<()> {
        let start = self.revised().verify(target.len(), offset)?;
        match self {
            Self::Insert { revised, .. } => {
                target.drain(start..start + revised.len());
            }
            Self::Delete { original, .. } => {
                splice_in(target, start, &original.elements);
            }
            Self::Change { original, revised } => {
                target.drain(start..start + revised.len());
                splice_in(target, start, &original.elements);
            }
        }
        Ok(())
    }
}

fn splice_in<T: Clone>(target: &mut Vec<T>, at: usize, elements: &[T]) {
    target.splice(at..at, elements.iter().cloned());
}
