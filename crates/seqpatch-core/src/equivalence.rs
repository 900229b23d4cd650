//! Element equivalence predicates.
//!
//! The engine never looks inside elements; it only asks an [`Equivalence`]
//! whether two of them match. Any `Fn(&T, &T) -> bool` closure qualifies.

/// A pure, side-effect-free comparison between two elements.
///
/// Implementations are called up to `N * M` times per diff and may be shared
/// between concurrent diffs, so they must not carry mutable state.
pub trait Equivalence<T: ?Sized> {
    /// Returns `true` if `a` and `b` should be treated as the same element.
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Equivalence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Structural equality through [`PartialEq`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultEquivalence;

impl<T: PartialEq + ?Sized> Equivalence<T> for DefaultEquivalence {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Compares strings while ignoring leading/trailing whitespace and treating
/// any inner whitespace run as a single separator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IgnoreWhitespace;

impl<S: AsRef<str> + ?Sized> Equivalence<S> for IgnoreWhitespace {
    fn equivalent(&self, a: &S, b: &S) -> bool {
        a.as_ref()
            .split_whitespace()
            .eq(b.as_ref().split_whitespace())
    }
}
