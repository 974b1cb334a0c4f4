//! Structural scenarios and randomized checks for the B-tree

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use crate::btree::{BTree, BTreeError, Node};

    fn tree_with(degree: usize, keys: &[i64]) -> BTree<i64> {
        let mut tree = BTree::new(degree).unwrap();
        for &key in keys {
            tree.insert(key).unwrap();
        }
        tree.check_invariants().unwrap();
        tree
    }

    fn in_order(tree: &BTree<i64>) -> Vec<i64> {
        tree.iter().copied().collect()
    }

    fn child_values(node: &Node<i64>) -> Vec<Vec<i64>> {
        node.children().iter().map(|c| c.values().to_vec()).collect()
    }

    #[test]
    fn test_insert_sequence_splits_root() {
        let tree = tree_with(2, &[10, 20, 5, 6, 12, 30, 7, 17]);

        assert_eq!(in_order(&tree), vec![5, 6, 7, 10, 12, 17, 20, 30]);
        assert_eq!(tree.height(), 2);

        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[10, 20]);
        assert_eq!(
            child_values(root),
            vec![vec![5, 6, 7], vec![12, 17], vec![30]]
        );
    }

    #[test]
    fn test_seven_keys_layout() {
        let tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7]);

        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[2, 4]);
        assert_eq!(child_values(root), vec![vec![1], vec![3], vec![5, 6, 7]]);
    }

    #[test]
    fn test_delete_from_leaf_keeps_height() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7]);
        let height = tree.height();

        tree.delete(&6).unwrap();

        tree.check_invariants().unwrap();
        assert_eq!(tree.height(), height);
        assert_eq!(in_order(&tree), vec![1, 2, 3, 4, 5, 7]);
    }

    #[test]
    fn test_delete_borrows_from_right_sibling() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7]);

        // [3] is minimal, [1] cannot lend, [5 6 7] can
        tree.delete(&3).unwrap();

        tree.check_invariants().unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[2, 5]);
        assert_eq!(child_values(root), vec![vec![1], vec![4], vec![6, 7]]);
    }

    #[test]
    fn test_delete_borrows_from_left_sibling() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7, 0]);

        // [3] is minimal and its left sibling [0 1] can lend
        tree.delete(&3).unwrap();

        tree.check_invariants().unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[1, 4]);
        assert_eq!(child_values(root), vec![vec![0], vec![2], vec![5, 6, 7]]);
    }

    #[test]
    fn test_delete_merges_minimal_siblings() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7]);

        // [1] and [3] are both minimal: they merge around 2
        tree.delete(&1).unwrap();

        tree.check_invariants().unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[4]);
        assert_eq!(child_values(root), vec![vec![2, 3], vec![5, 6, 7]]);
    }

    #[test]
    fn test_delete_internal_key_uses_predecessor() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7, 0]);

        tree.delete(&2).unwrap();

        tree.check_invariants().unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[1, 4]);
        assert_eq!(child_values(root), vec![vec![0], vec![3], vec![5, 6, 7]]);
    }

    #[test]
    fn test_delete_internal_key_uses_successor() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7]);

        // Left child [3] is minimal, right child [5 6 7] is not
        tree.delete(&4).unwrap();

        tree.check_invariants().unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.values(), &[2, 5]);
        assert_eq!(child_values(root), vec![vec![1], vec![3], vec![6, 7]]);
    }

    #[test]
    fn test_delete_internal_key_merges_and_shrinks_root() {
        let mut tree = tree_with(2, &[1, 2, 3, 4]);
        tree.delete(&4).unwrap();
        assert_eq!(tree.root().unwrap().values(), &[2]);
        assert_eq!(tree.height(), 2);

        // Both children of the root are minimal
        tree.delete(&2).unwrap();

        tree.check_invariants().unwrap();
        assert_eq!(tree.height(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.values(), &[1, 3]);
    }

    #[test]
    fn test_delete_last_key_empties_tree() {
        let mut tree = tree_with(3, &[42]);

        tree.delete(&42).unwrap();

        assert!(tree.root().is_none());
        assert!(tree.is_empty());
        for key in [0, 41, 42, 43] {
            assert!(tree.search(&key).is_none());
        }
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_absent_delete_leaves_tree_unchanged() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6, 7]);
        let before = tree.clone();

        // 0 would descend into the minimal [1] and force a merge if not rejected first
        assert_eq!(tree.delete(&0), Err(BTreeError::KeyNotFound));
        assert_eq!(tree.delete(&8), Err(BTreeError::KeyNotFound));

        assert_eq!(tree, before);
    }

    #[test]
    fn test_deep_delete_restructures_internal_levels() {
        let keys: Vec<i64> = (0..200).collect();
        let mut tree = tree_with(2, &keys);
        assert!(tree.height() >= 4);

        for key in (0..200).step_by(3) {
            tree.delete(&key).unwrap();
            tree.check_invariants().unwrap();
        }

        for key in 0..200 {
            assert_eq!(tree.contains(&key), key % 3 != 0, "key {}", key);
        }
    }

    #[test]
    fn test_alternating_workload() {
        let mut tree = BTree::new(3).unwrap();

        for key in 0..100 {
            tree.insert(key).unwrap();
        }
        for key in (0..100).step_by(2) {
            tree.delete(&key).unwrap();
        }
        for key in (0..100).step_by(4) {
            tree.insert(key).unwrap();
        }

        tree.check_invariants().unwrap();
        for key in 0..100 {
            let expected = key % 2 == 1 || key % 4 == 0;
            assert_eq!(tree.contains(&key), expected, "key {}", key);
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(i64),
        Delete(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..128).prop_map(Op::Insert),
            (0i64..128).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_ordered_set(
            degree in 2usize..6,
            ops in prop::collection::vec(op_strategy(), 0..300),
        ) {
            let mut tree = BTree::new(degree).unwrap();
            let mut model = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        let fresh = model.insert(key);
                        prop_assert_eq!(tree.insert(key).is_ok(), fresh);
                    }
                    Op::Delete(key) => {
                        let present = model.remove(&key);
                        prop_assert_eq!(tree.delete(&key).is_ok(), present);
                    }
                }
                prop_assert!(tree.check_invariants().is_ok());
            }

            prop_assert_eq!(tree.len(), model.len());
            let keys: Vec<i64> = tree.iter().copied().collect();
            let expected: Vec<i64> = model.iter().copied().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn prop_inserted_then_deleted_keys_disappear(
            degree in 2usize..5,
            keys in prop::collection::btree_set(-500i64..500, 1..150),
            removed in prop::collection::vec(any::<prop::sample::Index>(), 0..60),
        ) {
            let keys: Vec<i64> = keys.into_iter().collect();
            let mut tree = BTree::new(degree).unwrap();
            for &key in &keys {
                tree.insert(key).unwrap();
            }

            let mut gone = BTreeSet::new();
            for index in removed {
                let key = keys[index.index(keys.len())];
                if gone.insert(key) {
                    tree.delete(&key).unwrap();
                }
            }

            prop_assert!(tree.check_invariants().is_ok());
            for key in &keys {
                prop_assert_eq!(tree.contains(key), !gone.contains(key));
            }
            for probe in [-501i64, 500, 1000] {
                prop_assert!(tree.search(&probe).is_none());
            }
        }

        #[test]
        fn prop_rejected_operations_are_no_ops(
            degree in 2usize..5,
            keys in prop::collection::btree_set(0i64..1000, 1..100),
            probe in 1000i64..2000,
        ) {
            let mut tree = BTree::new(degree).unwrap();
            for &key in &keys {
                tree.insert(key).unwrap();
            }
            let before = tree.clone();

            prop_assert_eq!(tree.delete(&probe), Err(BTreeError::KeyNotFound));
            let existing = *keys.iter().next().unwrap();
            prop_assert_eq!(tree.insert(existing), Err(BTreeError::DuplicateKey));

            prop_assert_eq!(tree, before);
        }
    }
}
