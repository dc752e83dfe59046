//! Randomized checks of the tree against a `BTreeSet` model.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rbkit_tree::{RBTree, TreeError};

const MAX_VALUES: usize = 300;
const PROPTEST_CASES: u32 = 256;

#[derive(Debug, Clone)]
enum Op {
    Add(i32),
    Remove(i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..500i32).prop_map(Op::Add),
        (0..500i32).prop_map(Op::Remove),
    ]
}

fn build(values: &[i32]) -> RBTree<i32> {
    let mut tree = RBTree::new();
    for &v in values {
        let _ = tree.add(v);
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn invariants_hold_after_every_operation(
        ops in proptest::collection::vec(op(), 0..MAX_VALUES)
    ) {
        let mut tree = RBTree::new();
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                Op::Add(v) => {
                    let result = tree.add(v);
                    if model.insert(v) {
                        prop_assert_eq!(result, Ok(()));
                    } else {
                        prop_assert_eq!(result, Err(TreeError::TreeHasGivenElement));
                    }
                }
                Op::Remove(v) => {
                    let expected = if model.remove(&v) {
                        Ok(v)
                    } else if model.is_empty() {
                        Err(TreeError::TreeEmpty)
                    } else {
                        Err(TreeError::NoSuchElement)
                    };
                    prop_assert_eq!(tree.remove(&v), expected);
                }
            }
            prop_assert!(tree.check_invariants().is_ok(), "broken tree: {}", tree);
            prop_assert_eq!(tree.size(), model.len());
            prop_assert_eq!(tree.is_empty(), model.is_empty());
        }
        for v in &model {
            prop_assert_eq!(tree.find(v), Ok(v));
        }
    }

    #[test]
    fn dump_round_trips(values in proptest::collection::vec(-1000..1000i32, 0..MAX_VALUES)) {
        let tree = build(&values);
        let mut dump = Vec::new();
        tree.save_in_stream(&mut dump).unwrap();

        let back = RBTree::<i32>::read_from_stream(dump.as_slice()).unwrap();
        prop_assert_eq!(&back, &tree);
        prop_assert_eq!(back.size(), tree.size());
        prop_assert_eq!(back.to_string(), tree.to_string());
    }

    #[test]
    fn find_is_idempotent(
        values in proptest::collection::vec(0..1000i32, 1..MAX_VALUES),
        needle in 0..1000i32,
    ) {
        let tree = build(&values);
        let before = tree.to_string();
        let first = tree.find(&needle).copied();
        let second = tree.find(&needle).copied();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.is_ok(), values.contains(&needle));
        prop_assert_eq!(tree.to_string(), before);
    }

    #[test]
    fn add_then_remove_restores_contents(
        values in proptest::collection::hash_set(0..1000i32, 0..MAX_VALUES),
        extra in 1000..2000i32,
    ) {
        let values: Vec<_> = values.into_iter().collect();
        let mut tree = build(&values);
        let clone = tree.clone();

        tree.add(extra).unwrap();
        prop_assert_eq!(tree.remove(&extra), Ok(extra));
        prop_assert!(tree.check_invariants().is_ok());
        prop_assert_eq!(tree.size(), clone.size());
        for v in &values {
            prop_assert!(tree.contains(v));
        }
        prop_assert!(!tree.contains(&extra));
    }

    #[test]
    fn duplicates_are_rejected(values in proptest::collection::vec(0..100i32, 1..MAX_VALUES)) {
        let mut tree = build(&values);
        let before = tree.clone();
        for v in &values {
            prop_assert_eq!(tree.add(*v), Err(TreeError::TreeHasGivenElement));
        }
        prop_assert_eq!(&tree, &before);
    }

    #[test]
    fn size_matches_distinct_values(values in proptest::collection::vec(0..200i32, 0..MAX_VALUES)) {
        let tree = build(&values);
        let distinct: BTreeSet<_> = values.iter().copied().collect();
        prop_assert_eq!(tree.size(), distinct.len());
    }

    #[test]
    fn removing_everything_empties_the_tree(
        values in proptest::collection::hash_set(0..1000i32, 0..MAX_VALUES)
    ) {
        let values: Vec<_> = values.into_iter().collect();
        let mut tree = build(&values);
        for v in &values {
            prop_assert_eq!(tree.remove(v), Ok(*v));
            prop_assert!(tree.check_invariants().is_ok());
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.to_string(), "N");
    }
}
