//! Entry points: compute a [`Patch`] between two sequences.

use crate::builder::build_deltas;
use crate::equivalence::{DefaultEquivalence, Equivalence};
use crate::error::DiffResult;
use crate::myers::find_path;
use crate::options::DiffOptions;
use crate::patch::Patch;

/// Compute the patch that turns `original` into `revised`, comparing
/// elements with [`PartialEq`].
///
/// # Examples
///
/// ```
/// use seqpatch_core::{diff, DeltaKind};
///
/// let original = ["a", "b", "c"];
/// let revised = ["a", "x", "c"];
/// let patch = diff(&original, &revised).unwrap();
///
/// assert_eq!(patch.len(), 1);
/// assert_eq!(patch.deltas()[0].kind(), DeltaKind::Change);
/// assert_eq!(patch.apply_to(&original).unwrap(), revised);
/// ```
pub fn diff<T>(original: &[T], revised: &[T]) -> DiffResult<Patch<T>>
where
    T: PartialEq + Clone,
{
    diff_with(original, revised, &DefaultEquivalence, &DiffOptions::default())
}

/// Compute the patch that turns `original` into `revised` using a custom
/// equivalence predicate and options.
///
/// When the predicate treats two different elements as equal, the patch
/// keeps the original's element and [`Patch::apply_to`] reproduces the
/// revised sequence only up to that equivalence.
pub fn diff_with<T, E>(
    original: &[T],
    revised: &[T],
    eq: &E,
    options: &DiffOptions,
) -> DiffResult<Patch<T>>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    options.validate()?;
    let path = find_path(original, revised, eq, options)?;
    let deltas = build_deltas(&path, original, revised)?;
    Ok(Patch::from_sorted(deltas))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use proptest::prelude::*;

    use super::*;
    use crate::chunk::Chunk;
    use crate::delta::{Delta, DeltaKind};
    use crate::equivalence::IgnoreWhitespace;
    use crate::error::DiffError;
    use crate::options::CancelFlag;

    #[test]
    fn insert_into_empty() {
        let original: [&str; 0] = [];
        let patch = diff(&original, &["a", "b"]).unwrap();
        assert_eq!(
            patch.deltas(),
            &[Delta::Insert {
                original: Chunk::empty(0),
                revised: Chunk::new(0, vec!["a", "b"]),
            }]
        );
    }

    #[test]
    fn delete_everything() {
        let revised: [&str; 0] = [];
        let patch = diff(&["a", "b"], &revised).unwrap();
        assert_eq!(
            patch.deltas(),
            &[Delta::Delete {
                original: Chunk::new(0, vec!["a", "b"]),
                revised: Chunk::empty(0),
            }]
        );
    }

    #[test]
    fn single_change() {
        let original = ["a", "b", "c"];
        let revised = ["a", "x", "c"];
        let patch = diff(&original, &revised).unwrap();
        assert_eq!(
            patch.deltas(),
            &[Delta::Change {
                original: Chunk::new(1, vec!["b"]),
                revised: Chunk::new(1, vec!["x"]),
            }]
        );
        assert_eq!(patch.apply_to(&original).unwrap(), revised);
    }

    #[test]
    fn mixed_edit_round_trips() {
        let original = ["a", "b", "c", "d"];
        let revised = ["a", "c", "d", "e"];
        let patch = diff(&original, &revised).unwrap();
        assert_eq!(patch.apply_to(&original).unwrap(), revised);
        assert_eq!(patch.restore(&revised).unwrap(), original);
        assert_eq!(patch.deletions(), 1);
        assert_eq!(patch.insertions(), 1);
    }

    #[test]
    fn identical_sequences_give_empty_patch() {
        let lines = ["x", "y", "z"];
        assert!(diff(&lines, &lines).unwrap().is_empty());
    }

    #[test]
    fn tie_break_is_stable() {
        // Swapping two elements can be described either way round; the
        // search always picks the same description.
        let patch = diff(&["a", "b"], &["b", "a"]).unwrap();
        let kinds: Vec<DeltaKind> = patch.iter().map(Delta::kind).collect();
        assert_eq!(kinds, vec![DeltaKind::Delete, DeltaKind::Insert]);
        assert_eq!(*patch.deltas()[0].original(), Chunk::new(0, vec!["a"]));
        assert_eq!(*patch.deltas()[1].original(), Chunk::empty(2));
        assert_eq!(*patch.deltas()[1].revised(), Chunk::new(1, vec!["a"]));
    }

    #[test]
    fn whitespace_insensitive_diff() {
        let original = ["fn main() {", "    body();", "}"];
        let revised = ["fn main()  {", "\tbody();", "}"];
        let patch = diff_with(&original, &revised, &IgnoreWhitespace, &DiffOptions::default()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn cancelled_diff_reports_error() {
        let flag = CancelFlag::new();
        flag.cancel();
        let opts = DiffOptions::new().with_cancel(flag);
        let err = diff_with(&[1, 2, 3], &[3, 2, 1], &DefaultEquivalence, &opts).unwrap_err();
        assert!(matches!(err, DiffError::Cancelled { .. }));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let opts = DiffOptions::new().with_timeout(Duration::ZERO);
        let err = diff_with(&[1], &[2], &DefaultEquivalence, &opts).unwrap_err();
        assert!(matches!(err, DiffError::InvalidArgument(_)));
    }

    #[test]
    fn slow_predicate_hits_timeout() {
        let slow = |a: &i32, b: &i32| {
            std::thread::sleep(Duration::from_millis(5));
            a == b
        };
        let opts = DiffOptions::new().with_timeout(Duration::from_millis(1));
        let err = diff_with(&[1, 2, 3], &[4, 5, 6], &slow, &opts).unwrap_err();
        assert!(matches!(err, DiffError::TimedOut { rounds } if rounds >= 1));
    }

    #[test]
    fn generous_timeout_still_finishes() {
        let opts = DiffOptions::new().with_timeout(Duration::from_secs(30));
        let original: Vec<u32> = (0..200).collect();
        let revised: Vec<u32> = (0..200).filter(|x| x % 7 != 0).chain(500..520).collect();
        let patch = diff_with(&original, &revised, &DefaultEquivalence, &opts).unwrap();
        assert_eq!(patch.apply_to(&original).unwrap(), revised);
    }

    #[test]
    fn concurrent_diffs_are_independent() {
        let handles: Vec<_> = (0..4u8)
            .map(|seed| {
                std::thread::spawn(move || {
                    let a: Vec<u8> = (0..64).map(|i| i % (seed + 3)).collect();
                    let b: Vec<u8> = (0..64).map(|i| (i / 2) % (seed + 2)).collect();
                    let patch = diff(&a, &b).unwrap();
                    patch.apply_to(&a).unwrap() == b
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    fn small_seq() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..4, 0..24)
    }

    proptest! {
        #[test]
        fn patch_reproduces_revised(a in small_seq(), b in small_seq()) {
            let patch = diff(&a, &b).unwrap();
            prop_assert_eq!(patch.apply_to(&a).unwrap(), b.clone());
            prop_assert_eq!(patch.restore(&b).unwrap(), a.clone());
        }

        #[test]
        fn self_diff_is_empty(a in small_seq()) {
            prop_assert!(diff(&a, &a).unwrap().is_empty());
        }

        #[test]
        fn diff_is_deterministic(a in small_seq(), b in small_seq()) {
            prop_assert_eq!(diff(&a, &b).unwrap(), diff(&a, &b).unwrap());
        }

        #[test]
        fn deltas_are_well_formed_and_ordered(a in small_seq(), b in small_seq()) {
            let patch = diff(&a, &b).unwrap();
            for delta in &patch {
                prop_assert!(delta.is_well_formed());
            }
            prop_assert!(Patch::from_deltas(patch.clone().into_deltas()).is_ok());
        }

        #[test]
        fn inverse_patch_goes_back(a in small_seq(), b in small_seq()) {
            let inverted = diff(&a, &b).unwrap().inverted();
            prop_assert_eq!(inverted.apply_to(&b).unwrap(), a);
        }
    }
}
