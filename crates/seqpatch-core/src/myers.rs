//! Shortest edit path search over the edit graph (Myers, 1986).
//!
//! The search keeps, for every diagonal `k = i - j`, the furthest-reaching
//! path found so far. Paths are chains of [`PathNode`]s living in a
//! [`PathArena`] that is created for one search and dropped with its result.
//!
//! # Invariants
//!
//! - Every diff node's `prev` is the nearest snake before it, or the first
//!   diff node of the path when no snake precedes it. Consecutive single-step
//!   moves therefore collapse into one anchor.
//! - The synthetic origin `(0, -1)` is never the `prev` of a diff node.
//! - The diagonal array and the arena are allocated per call and never shared.

use std::time::Instant;

use tracing::{debug, warn};

use crate::equivalence::Equivalence;
use crate::error::{DiffError, DiffResult};
use crate::options::DiffOptions;

/// One point on an edit path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PathNode {
    /// Cursor into the original sequence.
    pub orig_pos: isize,
    /// Cursor into the revised sequence.
    pub rev_pos: isize,
    /// `true` if the node ends a run of matching elements.
    pub snake: bool,
    /// Arena index of the previous node on the path.
    pub prev: Option<usize>,
}

impl PathNode {
    fn diff(orig_pos: isize, rev_pos: isize, prev: Option<usize>) -> Self {
        Self {
            orig_pos,
            rev_pos,
            snake: false,
            prev,
        }
    }

    fn snake(orig_pos: isize, rev_pos: isize, prev: Option<usize>) -> Self {
        Self {
            orig_pos,
            rev_pos,
            snake: true,
            prev,
        }
    }

    fn is_bootstrap(&self) -> bool {
        self.orig_pos < 0 || self.rev_pos < 0
    }
}

/// Append-only storage for the nodes of one search.
#[derive(Debug, Default)]
pub(crate) struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: PathNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// The node stored at `index`.
    pub fn get(&self, index: usize) -> &PathNode {
        &self.nodes[index]
    }

    /// Number of nodes allocated by the search.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Follow diff nodes back to the closest snake.
    ///
    /// Returns `None` for the bootstrap origin. A diff node with no
    /// predecessor is its own anchor.
    fn previous_snake(&self, mut index: usize) -> Option<usize> {
        loop {
            let node = self.get(index);
            if node.is_bootstrap() {
                return None;
            }
            match (node.snake, node.prev) {
                (false, Some(prev)) => index = prev,
                _ => return Some(index),
            }
        }
    }
}

/// The result of a successful search: the arena and the node that reached
/// the end of both sequences.
#[derive(Debug)]
pub(crate) struct EditPath {
    pub arena: PathArena,
    pub terminal: usize,
}

/// Find a shortest edit path from `original` to `revised`.
///
/// Ties between moving down (insert) and right (delete) are broken in favour
/// of down unless the diagonal to the left has already reached further into
/// `original`. The result is therefore reproducible for equal inputs.
pub(crate) fn find_path<T, E>(
    original: &[T],
    revised: &[T],
    eq: &E,
    options: &DiffOptions,
) -> DiffResult<EditPath>
where
    E: Equivalence<T> + ?Sized,
{
    let n = original.len() as isize;
    let m = revised.len() as isize;
    let max = n + m + 1;
    let middle = max as usize;

    let mut diagonal: Vec<Option<usize>> = vec![None; 2 * middle + 1];
    let mut arena = PathArena::with_capacity(2 * middle);
    diagonal[middle + 1] = Some(arena.push(PathNode::snake(0, -1, None)));

    let started = Instant::now();
    let timeout = options.timeout();

    for d in 0..max {
        if let Some(flag) = &options.cancel {
            if flag.is_cancelled() {
                warn!(rounds = d, "diff cancelled");
                return Err(DiffError::Cancelled { rounds: d as usize });
            }
        }
        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                warn!(rounds = d, ?limit, "diff timed out");
                return Err(DiffError::TimedOut { rounds: d as usize });
            }
        }

        let mut k = -d;
        while k <= d {
            let kmiddle = (middle as isize + k) as usize;
            let kplus = kmiddle + 1;
            let kminus = kmiddle - 1;

            let go_down = k == -d
                || (k != d && reach(&arena, &diagonal, kminus)? < reach(&arena, &diagonal, kplus)?);
            let (mut i, prev) = if go_down {
                let prev = slot(&diagonal, kplus)?;
                (arena.get(prev).orig_pos, prev)
            } else {
                let prev = slot(&diagonal, kminus)?;
                (arena.get(prev).orig_pos + 1, prev)
            };
            let mut j = i - k;

            let anchor = arena.previous_snake(prev);
            let mut node = arena.push(PathNode::diff(i, j, anchor));

            let snake_start = i;
            while i < n && j < m && eq.equivalent(&original[i as usize], &revised[j as usize]) {
                i += 1;
                j += 1;
            }
            if i > snake_start {
                node = arena.push(PathNode::snake(i, j, Some(node)));
            }

            diagonal[kmiddle] = Some(node);

            if i >= n && j >= m {
                debug!(n, m, d, nodes = arena.len(), "edit path found");
                return Ok(EditPath {
                    arena,
                    terminal: node,
                });
            }
            k += 2;
        }
    }

    Err(DiffError::InternalInconsistency(format!(
        "no edit path found within {max} rounds for sequences of length {n} and {m}"
    )))
}

fn slot(diagonal: &[Option<usize>], index: usize) -> DiffResult<usize> {
    diagonal.get(index).copied().flatten().ok_or_else(|| {
        DiffError::InternalInconsistency(format!("diagonal slot {index} read before it was set"))
    })
}

fn reach(arena: &PathArena, diagonal: &[Option<usize>], index: usize) -> DiffResult<isize> {
    slot(diagonal, index).map(|node| arena.get(node).orig_pos)
}

/// A path whose walk meets a snake where a diff step belongs: two snakes
/// chained directly after each other.
#[cfg(test)]
pub(crate) fn snake_after_snake_path() -> EditPath {
    let mut arena = PathArena::default();
    let start = arena.push(PathNode::diff(0, 0, None));
    let first = arena.push(PathNode::snake(1, 1, Some(start)));
    let terminal = arena.push(PathNode::snake(2, 2, Some(first)));
    EditPath { arena, terminal }
}
