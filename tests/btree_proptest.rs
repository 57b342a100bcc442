//! Property tests: random operation sequences cross-checked against
//! `std::collections::BTreeSet`, with full structural validation after
//! every step.

use std::collections::BTreeSet;

use mindex::{BTree, Error};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(u16),
    Delete(u16),
}

// Small key space so deletes hit present keys often.
fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0u16..256).prop_map(Op::Insert),
            2 => (0u16..256).prop_map(Op::Delete),
        ],
        0..600,
    )
}

fn distinct_keys() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(any::<i64>(), 0..400).prop_map(|s| s.into_iter().collect())
}

fn check_against_model(t: usize, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut tree = BTree::new(t).unwrap();
    let mut model = BTreeSet::new();

    for op in ops {
        match op {
            Op::Insert(k) => {
                let expected = if model.insert(k) {
                    Ok(())
                } else {
                    Err(Error::DuplicateKey)
                };
                prop_assert_eq!(tree.insert(k), expected);
            }
            Op::Delete(k) => {
                let expected = if model.is_empty() {
                    Err(Error::EmptyTree)
                } else if model.remove(&k) {
                    Ok(())
                } else {
                    Err(Error::KeyNotFound)
                };
                prop_assert_eq!(tree.delete(&k), expected);
            }
        }

        prop_assert_eq!(tree.validate(), Ok(()));
        prop_assert_eq!(tree.len(), model.len());
    }

    prop_assert!(tree.iter().eq(model.iter()));
    prop_assert_eq!(tree.min(), model.first());
    prop_assert_eq!(tree.max(), model.last());
    Ok(())
}

proptest! {
    #[test]
    fn prop_matches_model_t2(ops in ops()) {
        check_against_model(2, ops)?;
    }

    #[test]
    fn prop_matches_model_t3(ops in ops()) {
        check_against_model(3, ops)?;
    }

    #[test]
    fn prop_matches_model_t5(ops in ops()) {
        check_against_model(5, ops)?;
    }

    #[test]
    fn prop_insert_then_enumerate_is_sorted(keys in distinct_keys(), t in 2usize..8) {
        let mut tree = BTree::new(t).unwrap();
        for &k in &keys {
            tree.insert(k).unwrap();
        }

        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), sorted);
        prop_assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn prop_delete_removes_exactly_one(keys in distinct_keys(), t in 2usize..6, pick in any::<prop::sample::Index>()) {
        prop_assume!(!keys.is_empty());
        let mut tree = BTree::new(t).unwrap();
        for &k in &keys {
            tree.insert(k).unwrap();
        }

        let victim = keys[pick.index(keys.len())];
        tree.delete(&victim).unwrap();

        prop_assert_eq!(tree.len(), keys.len() - 1);
        prop_assert!(!tree.contains(&victim));
        prop_assert!(tree.iter().all(|&k| k != victim));
        prop_assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn prop_failed_delete_changes_nothing(keys in distinct_keys(), t in 2usize..6, probe in any::<i64>()) {
        prop_assume!(!keys.contains(&probe));
        let mut tree = BTree::new(t).unwrap();
        for &k in &keys {
            tree.insert(k).unwrap();
        }

        let before: Vec<Vec<Vec<i64>>> = tree
            .levels()
            .iter()
            .map(|level| level.iter().map(|node| node.to_vec()).collect())
            .collect();

        let expected = if keys.is_empty() { Error::EmptyTree } else { Error::KeyNotFound };
        prop_assert_eq!(tree.delete(&probe), Err(expected));

        let after: Vec<Vec<Vec<i64>>> = tree
            .levels()
            .iter()
            .map(|level| level.iter().map(|node| node.to_vec()).collect())
            .collect();
        prop_assert_eq!(before, after);
    }
}
