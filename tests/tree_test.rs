//! Tests for tree construction and the one-shot attachment invariant.

use bintree::util::testing::init_test_setup;
use bintree::{BinaryTree, TreeError};

// ============================================================
// Construction Tests
// ============================================================

#[test]
fn given_value_when_constructing_tree_then_single_leaf_root() {
    init_test_setup();
    let tree = BinaryTree::new(42);

    let root = tree.root().expect("tree should have a root");
    assert_eq!(tree.value(root), Some(&42));
    assert!(tree.is_leaf(root));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn given_two_subtrees_when_constructing_tree_then_roots_become_children() {
    init_test_setup();
    let left = BinaryTree::new("left");
    let right = BinaryTree::new("right");
    let tree = BinaryTree::with_subtrees("root", Some(left), Some(right));

    assert_eq!(tree.len(), 3);
    let left_idx = tree.root_left().expect("left child should exist");
    let right_idx = tree.root_right().expect("right child should exist");
    assert_eq!(tree.value(left_idx), Some(&"left"));
    assert_eq!(tree.value(right_idx), Some(&"right"));
    assert_eq!(tree.get(left_idx).unwrap().parent(), tree.root());
    assert_eq!(tree.get(right_idx).unwrap().parent(), tree.root());
}

#[test]
fn given_one_subtree_when_constructing_tree_then_other_slot_stays_empty() {
    init_test_setup();
    let tree = BinaryTree::with_subtrees(1, None, Some(BinaryTree::new(2)));

    assert_eq!(tree.root_left(), None);
    assert_eq!(tree.value(tree.root_right().unwrap()), Some(&2));
}

#[test]
fn given_nested_subtrees_when_constructing_tree_then_whole_hierarchy_moves() {
    init_test_setup();
    let subtree = BinaryTree::with_subtrees(
        2,
        Some(BinaryTree::new(4)),
        Some(BinaryTree::new(5)),
    );
    let tree = BinaryTree::with_subtrees(1, Some(subtree), Some(BinaryTree::new(3)));

    assert_eq!(tree.len(), 5);
    assert_eq!(tree.depth(), 3);
    let leaves: Vec<i32> = tree.leaf_values().into_iter().copied().collect();
    assert_eq!(leaves, vec![4, 5, 3]);
}

#[test]
fn given_no_value_when_constructing_empty_tree_then_all_accessors_return_none() {
    init_test_setup();
    let tree: BinaryTree<i32> = BinaryTree::default();

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.root_left(), None);
    assert_eq!(tree.root_right(), None);
    assert_eq!(tree.depth(), 0);
}

// ============================================================
// Attachment Invariant Tests
// ============================================================

#[test]
fn given_detached_node_when_attaching_then_link_visible_via_getters() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let root = tree.root().unwrap();
    let left = tree.insert_detached(2);
    let right = tree.insert_detached(3);

    tree.set_left(root, left).unwrap();
    tree.set_right(root, right).unwrap();

    assert_eq!(tree.root_left(), Some(left));
    assert_eq!(tree.root_right(), Some(right));
    assert_eq!(tree.get(left).unwrap().parent(), Some(root));
    assert_eq!(tree.get(right).unwrap().parent(), Some(root));
}

#[test]
fn given_attached_node_when_attaching_again_then_already_attached_error() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let root = tree.root().unwrap();
    let child = tree.insert_detached(2);
    let other = tree.insert_detached(3);

    tree.set_left(root, child).unwrap();

    // Same slot, the other slot, and a different parent all refuse
    assert_eq!(tree.set_left(root, child), Err(TreeError::AlreadyAttached));
    assert_eq!(tree.set_right(root, child), Err(TreeError::AlreadyAttached));
    assert_eq!(tree.set_left(other, child), Err(TreeError::AlreadyAttached));
    // The original link is untouched
    assert_eq!(tree.root_left(), Some(child));
}

#[test]
fn given_root_when_attaching_under_descendant_then_already_attached_error() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let root = tree.root().unwrap();
    let child = tree.insert_detached(2);
    tree.set_left(root, child).unwrap();

    // Re-rooting the root under its own descendant would close a cycle
    assert_eq!(tree.set_left(child, root), Err(TreeError::AlreadyAttached));
}

#[test]
fn given_node_when_attaching_to_itself_then_self_attachment_error() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let node = tree.insert_detached(2);

    assert_eq!(tree.set_left(node, node), Err(TreeError::SelfAttachment));
    assert_eq!(tree.set_right(node, node), Err(TreeError::SelfAttachment));
}

#[test]
fn given_foreign_index_when_attaching_then_node_not_found_error() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let root = tree.root().unwrap();

    let mut other = BinaryTree::new(9);
    let foreign = other.insert_detached(10);

    assert_eq!(tree.set_left(root, foreign), Err(TreeError::NodeNotFound));
    assert_eq!(tree.set_right(foreign, root), Err(TreeError::NodeNotFound));
    assert_eq!(tree.get(foreign).map(|n| *n.value()), None);
}

#[test]
fn given_attachment_sequence_when_building_manually_then_no_node_has_two_parents() {
    init_test_setup();
    let mut tree = BinaryTree::new(0);
    let root = tree.root().unwrap();
    let mut frontier = vec![root];
    let mut all = vec![root];

    // Two full levels below the root
    for value in 1..=6 {
        let node = tree.insert_detached(value);
        all.push(node);
        let parent = frontier[((value - 1) / 2) as usize];
        if value % 2 == 1 {
            tree.set_left(parent, node).unwrap();
        } else {
            tree.set_right(parent, node).unwrap();
        }
        frontier.push(node);
    }

    // Every node except the root has exactly one parent, and re-attachment
    // is refused everywhere
    for &node in &all {
        if node != root {
            assert!(tree.get(node).unwrap().parent().is_some());
        }
        for &parent in &all {
            if parent != node {
                assert_eq!(tree.set_left(parent, node), Err(TreeError::AlreadyAttached));
            }
        }
    }
}

// ============================================================
// Value Access Tests
// ============================================================

#[test]
fn given_node_when_setting_value_then_new_value_visible() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let root = tree.root().unwrap();

    tree.set_value(root, 99).unwrap();
    assert_eq!(tree.value(root), Some(&99));

    *tree.get_mut(root).unwrap().value_mut() += 1;
    assert_eq!(tree.value(root), Some(&100));
}

#[test]
fn given_stale_index_when_setting_value_then_node_not_found_error() {
    init_test_setup();
    let mut other = BinaryTree::new(1);
    let foreign = other.insert_detached(2);

    let mut tree = BinaryTree::new(3);
    assert_eq!(tree.set_value(foreign, 4), Err(TreeError::NodeNotFound));
}

// ============================================================
// Leaf Tests
// ============================================================

#[test]
fn given_various_nodes_when_checking_is_leaf_then_only_childless_qualify() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    let root = tree.root().unwrap();
    let child = tree.insert_detached(2);
    assert!(tree.is_leaf(root));

    tree.set_left(root, child).unwrap();
    assert!(!tree.is_leaf(root));
    assert!(tree.is_leaf(child));

    // An index that resolves to nothing is not a leaf
    let mut other = BinaryTree::new(9);
    other.insert_detached(10);
    let unresolvable = other.insert_detached(11);
    assert!(!tree.is_leaf(unresolvable));
}

#[test]
fn given_detached_node_when_traversing_then_it_stays_invisible() {
    init_test_setup();
    let mut tree = BinaryTree::new(1);
    tree.insert_detached(99);

    let values: Vec<i32> = tree.values_preorder().into_iter().copied().collect();
    assert_eq!(values, vec![1]);
    assert_eq!(tree.len(), 2);
}
