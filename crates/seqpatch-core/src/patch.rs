//! An ordered list of deltas and the logic that replays it.
//!
//! Deltas are applied in ascending original position. Each delta's position
//! refers to the untouched original sequence, so the applier carries a
//! running offset equal to the net growth caused by the deltas before it.

use std::slice;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunk::Chunk;
use crate::delta::Delta;
use crate::error::{DiffError, DiffResult};

/// An ordered, non-overlapping collection of [`Delta`]s that turns one
/// sequence into another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatchRepr<T>")]
pub struct Patch<T> {
    deltas: Vec<Delta<T>>,
}

/// Unchecked wire form, validated on the way into a [`Patch`].
#[derive(Deserialize)]
struct PatchRepr<T> {
    deltas: Vec<Delta<T>>,
}

impl<T> TryFrom<PatchRepr<T>> for Patch<T> {
    type Error = DiffError;

    fn try_from(repr: PatchRepr<T>) -> DiffResult<Self> {
        Self::from_deltas(repr.deltas)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self { deltas: Vec::new() }
    }
}

impl<T> Patch<T> {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a patch from deltas produced elsewhere.
    ///
    /// Every delta must carry the tag that matches its chunks, and both the
    /// original and the revised ranges must be ascending and disjoint.
    pub fn from_deltas(deltas: Vec<Delta<T>>) -> DiffResult<Self> {
        for (index, delta) in deltas.iter().enumerate() {
            if !delta.is_well_formed() {
                return Err(DiffError::InvalidArgument(format!(
                    "delta {index} is labelled {} but its chunks disagree",
                    delta.kind()
                )));
            }
            if delta.original().end().is_none() || delta.revised().end().is_none() {
                return Err(DiffError::InvalidArgument(format!(
                    "delta {index} extends past the largest addressable position"
                )));
            }
        }
        for (index, pair) in deltas.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let overlaps = |a: &Chunk<T>, b: &Chunk<T>| a.end().map_or(true, |end| end > b.position);
            if overlaps(prev.original(), next.original()) || overlaps(prev.revised(), next.revised()) {
                return Err(DiffError::InvalidArgument(format!(
                    "delta {} overlaps or precedes delta {index}",
                    index + 1
                )));
            }
        }
        Ok(Self { deltas })
    }

    /// Wrap deltas that are already known to be ordered and well formed.
    pub(crate) fn from_sorted(deltas: Vec<Delta<T>>) -> Self {
        Self { deltas }
    }

    /// The deltas, in ascending original position.
    pub fn deltas(&self) -> &[Delta<T>] {
        &self.deltas
    }

    /// Consume the patch, returning its deltas.
    pub fn into_deltas(self) -> Vec<Delta<T>> {
        self.deltas
    }

    /// Iterate over the deltas.
    pub fn iter(&self) -> slice::Iter<'_, Delta<T>> {
        self.deltas.iter()
    }

    /// Number of deltas.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns `true` if the two sequences were equivalent.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Total number of elements the patch adds.
    pub fn insertions(&self) -> usize {
        self.deltas.iter().map(|d| d.revised().len()).sum()
    }

    /// Total number of elements the patch removes.
    pub fn deletions(&self) -> usize {
        self.deltas.iter().map(|d| d.original().len()).sum()
    }

    /// The patch that undoes this one.
    pub fn inverted(self) -> Self {
        Self {
            deltas: self.deltas.into_iter().map(Delta::inverted).collect(),
        }
    }

    /// Check every delta against a target of `target_len` elements, tracking
    /// the length changes of the deltas before it.
    pub fn verify(&self, target_len: usize) -> DiffResult<()> {
        let mut len = target_len;
        let mut offset = 0isize;
        for delta in &self.deltas {
            delta.verify(len, offset)?;
            offset += delta.size_change();
            len = len + delta.revised().len() - delta.original().len();
        }
        Ok(())
    }

    /// Check that [`restore`](Self::restore) can run against a target of
    /// `target_len` elements.
    pub fn verify_restore(&self, target_len: usize) -> DiffResult<()> {
        let mut len = target_len;
        let mut offset = 0isize;
        for delta in &self.deltas {
            delta.revised().verify(len, offset)?;
            offset -= delta.size_change();
            len = len + delta.original().len() - delta.revised().len();
        }
        Ok(())
    }
}

impl<T: Clone> Patch<T> {
    /// Apply the patch to `original`, returning the revised sequence.
    pub fn apply_to(&self, original: &[T]) -> DiffResult<Vec<T>> {
        let mut target = original.to_vec();
        self.apply_in_place(&mut target)?;
        Ok(target)
    }

    /// Apply the patch to `target` in place.
    ///
    /// All deltas are verified before the first one is applied, so on error
    /// `target` is left exactly as it was.
    pub fn apply_in_place(&self, target: &mut Vec<T>) -> DiffResult<()> {
        self.verify(target.len())?;
        let mut offset = 0isize;
        for delta in &self.deltas {
            delta.apply_to(target, offset)?;
            offset += delta.size_change();
        }
        debug!(deltas = self.deltas.len(), len = target.len(), "patch applied");
        Ok(())
    }

    /// Reconstruct the original sequence from `revised`.
    pub fn restore(&self, revised: &[T]) -> DiffResult<Vec<T>> {
        let mut target = revised.to_vec();
        self.restore_in_place(&mut target)?;
        Ok(target)
    }

    /// Undo the patch on `target` in place, with the same all-or-nothing
    /// guarantee as [`apply_in_place`](Self::apply_in_place).
    pub fn restore_in_place(&self, target: &mut Vec<T>) -> DiffResult<()> {
        self.verify_restore(target.len())?;
        let mut offset = 0isize;
        for delta in &self.deltas {
            delta.restore_to(target, offset)?;
            offset -= delta.size_change();
        }
        debug!(deltas = self.deltas.len(), len = target.len(), "patch restored");
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a Patch<T> {
    type Item = &'a Delta<T>;
    type IntoIter = slice::Iter<'a, Delta<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

impl<T> IntoIterator for Patch<T> {
    type Item = Delta<T>;
    type IntoIter = std::vec::IntoIter<Delta<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.into_iter()
    }
}
