//! A contiguous slice of one sequence, remembered together with where it
//! came from.

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// A run of elements taken from one side of a diff.
///
/// `position` is the index of the first element in the parent sequence. For an
/// empty chunk it is the point where elements were inserted or removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunk<T> {
    /// Index of the chunk inside its parent sequence.
    pub position: usize,
    /// The elements covered by the chunk.
    pub elements: Vec<T>,
}

impl<T> Chunk<T> {
    /// Create a chunk at `position` holding `elements`.
    pub fn new(position: usize, elements: Vec<T>) -> Self {
        Self { position, elements }
    }

    /// An empty chunk marking an insertion or deletion point.
    pub fn empty(position: usize) -> Self {
        Self {
            position,
            elements: Vec::new(),
        }
    }

    /// Number of elements in the chunk.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the chunk holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// One past the last index covered by the chunk, or `None` if that
    /// index does not fit in a `usize`.
    pub fn end(&self) -> Option<usize> {
        self.position.checked_add(self.elements.len())
    }

    /// Check that this chunk, shifted by `offset`, fits inside a sequence of
    /// `target_len` elements. Returns the shifted start index.
    ///
    /// An empty chunk only needs its position to be a valid insertion point.
    pub fn verify(&self, target_len: usize, offset: isize) -> DiffResult<usize> {
        let shifted = isize::try_from(self.position)
            .ok()
            .and_then(|position| position.checked_add(offset))
            .ok_or_else(|| DiffError::PatchApplication {
                position: self.position,
                reason: format!("position shifted by {offset} is out of range"),
            })?;
        if shifted < 0 {
            return Err(DiffError::PatchApplication {
                position: self.position,
                reason: format!("offset {offset} moves the chunk before the start of the target"),
            });
        }
        let start = shifted as usize;
        let end = start.checked_add(self.elements.len()).unwrap_or(usize::MAX);
        if end > target_len {
            let reason = if self.elements.is_empty() {
                format!("insertion point {start} is past the end of a target of length {target_len}")
            } else {
                format!("range {start}..{end} exceeds a target of length {target_len}")
            };
            return Err(DiffError::PatchApplication {
                position: self.position,
                reason,
            });
        }
        Ok(start)
    }
}

impl<T: Clone> Chunk<T> {
    /// Slice `source[start..end]` into a chunk positioned at `start`.
    pub(crate) fn slice(source: &[T], start: usize, end: usize) -> Self {
        Self {
            position: start,
            elements: source[start..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunk_reports_position() {
        let chunk: Chunk<&str> = Chunk::empty(4);
        assert!(chunk.is_empty());
        assert_eq!(chunk.len(), 0);
        assert_eq!(chunk.end(), Some(4));
    }

    #[test]
    fn verify_accepts_exact_fit() {
        let chunk = Chunk::new(1, vec!["b", "c"]);
        assert_eq!(chunk.verify(3, 0).unwrap(), 1);
    }

    #[test]
    fn verify_rejects_overrun() {
        let chunk = Chunk::new(2, vec!["c", "d"]);
        let err = chunk.verify(3, 0).unwrap_err();
        assert!(matches!(err, DiffError::PatchApplication { position: 2, .. }));
    }

    #[test]
    fn verify_allows_append_point() {
        let chunk: Chunk<u8> = Chunk::empty(3);
        assert_eq!(chunk.verify(3, 0).unwrap(), 3);
        assert!(chunk.verify(2, 0).is_err());
    }

    #[test]
    fn verify_applies_offset() {
        let chunk = Chunk::new(4, vec![1, 2]);
        assert_eq!(chunk.verify(4, -2).unwrap(), 2);
        assert!(chunk.verify(4, 0).is_err());
        assert!(chunk.verify(10, -5).is_err());
    }

    #[test]
    fn end_overflow_is_none() {
        let chunk = Chunk::new(usize::MAX, vec!['x']);
        assert_eq!(chunk.end(), None);
    }

    #[test]
    fn verify_rejects_positions_beyond_isize() {
        let chunk: Chunk<u8> = Chunk::empty(usize::MAX);
        let err = chunk.verify(1, 0).unwrap_err();
        assert!(matches!(err, DiffError::PatchApplication { position: usize::MAX, .. }));
    }

    #[test]
    fn verify_rejects_offset_overflow() {
        let chunk: Chunk<u8> = Chunk::empty(isize::MAX as usize);
        let err = chunk.verify(2, 1).unwrap_err();
        assert!(matches!(err, DiffError::PatchApplication { .. }));
    }

    #[test]
    fn slice_copies_range() {
        let source = ["a", "b", "c", "d"];
        let chunk = Chunk::slice(&source, 1, 3);
        assert_eq!(chunk, Chunk::new(1, vec!["b", "c"]));
    }
}
