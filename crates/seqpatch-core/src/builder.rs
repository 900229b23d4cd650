//! Turns an edit path into deltas.

use tracing::debug;

use crate::chunk::Chunk;
use crate::delta::Delta;
use crate::error::{DiffError, DiffResult};
use crate::myers::EditPath;

/// Walk `path` from its terminal node back to the start, emitting one delta
/// for every stretch between two anchors.
///
/// The walk discovers deltas from the end of the sequences towards the
/// start; the returned list is in ascending original position.
pub(crate) fn build_deltas<T: Clone>(
    path: &EditPath,
    original: &[T],
    revised: &[T],
) -> DiffResult<Vec<Delta<T>>> {
    let arena = &path.arena;
    let mut deltas = Vec::new();

    let mut cursor = Some(path.terminal);
    if let Some(index) = cursor {
        let node = arena.get(index);
        if node.snake {
            cursor = node.prev;
        }
    }

    while let Some(index) = cursor {
        let node = arena.get(index);
        let Some(prev_index) = node.prev else {
            break;
        };
        let anchor = arena.get(prev_index);
        if anchor.rev_pos < 0 {
            break;
        }
        if node.snake {
            return Err(DiffError::InternalInconsistency(format!(
                "found a snake at ({}, {}) where a diff step was expected",
                node.orig_pos, node.rev_pos
            )));
        }

        let (i, j) = (node.orig_pos, node.rev_pos);
        let (ianchor, janchor) = (anchor.orig_pos, anchor.rev_pos);
        if ianchor < 0 || ianchor > i || janchor > j || i as usize > original.len() || j as usize > revised.len() {
            return Err(DiffError::InternalInconsistency(format!(
                "diff step ({ianchor}, {janchor}) -> ({i}, {j}) is out of bounds"
            )));
        }

        let delta = Delta::new(
            Chunk::slice(original, ianchor as usize, i as usize),
            Chunk::slice(revised, janchor as usize, j as usize),
        )
        .map_err(|_| {
            DiffError::InternalInconsistency(format!("empty diff step at ({i}, {j})"))
        })?;
        deltas.push(delta);

        cursor = if anchor.snake {
            anchor.prev
        } else {
            Some(prev_index)
        };
    }

    deltas.reverse();
    debug!(deltas = deltas.len(), "patch built");
    Ok(deltas)
}
