use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Tree node in the arena-based binary tree.
///
/// The parent link doubles as the attachment marker: a node with
/// `parent == None` that is not the root is detached and may still be
/// claimed as a child. Attachment is one-shot, so the link is never cleared.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    parent: Option<Index>,
    left: Option<Index>,
    right: Option<Index>,
}

impl<T> Node<T> {
    fn detached(value: T) -> Self {
        Self {
            value,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Index of the parent node, None for the root and for detached nodes.
    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn left(&self) -> Option<Index> {
        self.left
    }

    pub fn right(&self) -> Option<Index> {
        self.right
    }
}

enum ChildSlot {
    Left,
    Right,
}

/// Arena-based generic binary tree.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. Each tree owns every node it contains; dropping the tree drops
/// the whole arena. No ordering invariant over values is enforced, this is
/// a plain container rather than a search tree.
#[derive(Debug)]
pub struct BinaryTree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<Node<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> BinaryTree<T> {
    /// Creates a tree with no nodes. Traversals over it yield nothing.
    pub fn empty() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a single-node tree holding `value`.
    #[instrument(level = "trace", skip(value))]
    pub fn new(value: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::detached(value));
        Self {
            arena,
            root: Some(root),
        }
    }

    /// Creates a tree whose root holds `value` and whose children are the
    /// roots of the given subtrees.
    ///
    /// The subtrees are consumed: every node is moved into the new tree's
    /// arena and re-indexed, so indices obtained from a subtree before the
    /// call do not resolve in the combined tree.
    #[instrument(level = "trace", skip(value, left, right))]
    pub fn with_subtrees(value: T, left: Option<Self>, right: Option<Self>) -> Self {
        let mut tree = Self::new(value);
        if let (Some(root), Some(subtree)) = (tree.root, left) {
            let grafted = tree.graft(subtree, root);
            if let Some(node) = tree.arena.get_mut(root) {
                node.left = grafted;
            }
        }
        if let (Some(root), Some(subtree)) = (tree.root, right) {
            let grafted = tree.graft(subtree, root);
            if let Some(node) = tree.arena.get_mut(root) {
                node.right = grafted;
            }
        }
        tree
    }

    /// Moves all nodes of `subtree` into this arena, attaching its root
    /// under `parent`. Returns the re-indexed subtree root.
    fn graft(&mut self, mut subtree: Self, parent: Index) -> Option<Index> {
        let sub_root = subtree.root.take()?;
        self.graft_at(&mut subtree.arena, sub_root, Some(parent))
    }

    fn graft_at(
        &mut self,
        donor: &mut Arena<Node<T>>,
        idx: Index,
        parent: Option<Index>,
    ) -> Option<Index> {
        let node = donor.remove(idx)?;
        let new_idx = self.arena.insert(Node {
            value: node.value,
            parent,
            left: None,
            right: None,
        });
        if let Some(old_left) = node.left {
            let new_left = self.graft_at(donor, old_left, Some(new_idx));
            if let Some(grafted) = self.arena.get_mut(new_idx) {
                grafted.left = new_left;
            }
        }
        if let Some(old_right) = node.right {
            let new_right = self.graft_at(donor, old_right, Some(new_idx));
            if let Some(grafted) = self.arena.get_mut(new_idx) {
                grafted.right = new_right;
            }
        }
        Some(new_idx)
    }

    /// Adds an unattached node holding `value` to the arena.
    ///
    /// The node is invisible to traversals until claimed via [`set_left`]
    /// or [`set_right`].
    ///
    /// [`set_left`]: BinaryTree::set_left
    /// [`set_right`]: BinaryTree::set_right
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_detached(&mut self, value: T) -> Index {
        self.arena.insert(Node::detached(value))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, idx: Index) -> Option<&Node<T>> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_mut(&mut self, idx: Index) -> Option<&mut Node<T>> {
        self.arena.get_mut(idx)
    }

    pub fn value(&self, idx: Index) -> Option<&T> {
        self.get(idx).map(Node::value)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn set_value(&mut self, idx: Index, value: T) -> TreeResult<()> {
        let node = self.arena.get_mut(idx).ok_or(TreeError::NodeNotFound)?;
        node.value = value;
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Left child of the root, None when the tree or the child is absent.
    pub fn root_left(&self) -> Option<Index> {
        self.root.and_then(|root| self.get(root)).and_then(Node::left)
    }

    /// Right child of the root, None when the tree or the child is absent.
    pub fn root_right(&self) -> Option<Index> {
        self.root.and_then(|root| self.get(root)).and_then(Node::right)
    }

    /// Number of nodes in the arena, detached nodes included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Attaches `child` as the left child of `parent`.
    ///
    /// Attachment is a one-way transition: once a node has a parent it can
    /// never be claimed by another slot, which keeps the structure a tree
    /// rather than a DAG. An occupied slot is overwritten; the displaced
    /// child keeps its parent link and becomes unreachable.
    #[instrument(level = "debug", skip(self))]
    pub fn set_left(&mut self, parent: Index, child: Index) -> TreeResult<()> {
        self.attach(parent, child, ChildSlot::Left)
    }

    /// Attaches `child` as the right child of `parent`. See [`set_left`].
    ///
    /// [`set_left`]: BinaryTree::set_left
    #[instrument(level = "debug", skip(self))]
    pub fn set_right(&mut self, parent: Index, child: Index) -> TreeResult<()> {
        self.attach(parent, child, ChildSlot::Right)
    }

    fn attach(&mut self, parent: Index, child: Index, slot: ChildSlot) -> TreeResult<()> {
        if parent == child {
            return Err(TreeError::SelfAttachment);
        }
        if !self.arena.contains(parent) {
            return Err(TreeError::NodeNotFound);
        }
        let child_node = self.arena.get(child).ok_or(TreeError::NodeNotFound)?;
        // The root counts as attached: re-rooting it under another node
        // could close a cycle through its own descendants.
        if child_node.parent.is_some() || self.root == Some(child) {
            return Err(TreeError::AlreadyAttached);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            match slot {
                ChildSlot::Left => node.left = Some(child),
                ChildSlot::Right => node.right = Some(child),
            }
        }
        Ok(())
    }

    /// True iff both children of the given node are absent.
    /// A stale or foreign index is not a leaf.
    #[instrument(level = "trace", skip(self))]
    pub fn is_leaf(&self, idx: Index) -> bool {
        self.get(idx)
            .map_or(false, |node| node.left.is_none() && node.right.is_none())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.get(idx) {
            let left = node.left.map_or(0, |child| self.calculate_depth(child));
            let right = node.right.map_or(0, |child| self.calculate_depth(child));
            1 + left.max(right)
        } else {
            0
        }
    }

    /// Collects the values of all leaf nodes, left to right.
    ///
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves<'a>(&'a self, idx: Index, leaves: &mut Vec<&'a T>) {
        if let Some(node) = self.get(idx) {
            if node.left.is_none() && node.right.is_none() {
                leaves.push(&node.value);
            } else {
                if let Some(child) = node.left {
                    self.collect_leaves(child, leaves);
                }
                if let Some(child) = node.right {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// Depth-first traversal visiting each node before its subtrees
    /// (root, left, right).
    #[instrument(level = "trace", skip(self))]
    pub fn iter_preorder(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self)
    }

    /// Depth-first traversal visiting the left subtree, then the node,
    /// then the right subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_inorder(&self) -> InOrderIter<'_, T> {
        InOrderIter::new(self)
    }

    /// Depth-first traversal visiting both subtrees before the node
    /// (left, right, root).
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIter<'_, T> {
        PostOrderIter::new(self)
    }

    pub fn values_preorder(&self) -> Vec<&T> {
        self.iter_preorder().map(|(_, node)| node.value()).collect()
    }

    pub fn values_inorder(&self) -> Vec<&T> {
        self.iter_inorder().map(|(_, node)| node.value()).collect()
    }

    pub fn values_postorder(&self) -> Vec<&T> {
        self.iter_postorder().map(|(_, node)| node.value()).collect()
    }
}

pub struct PreOrderIter<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(tree: &'a BinaryTree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (Index, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.tree.get(idx)?;
        // Right first so the left subtree is popped before it
        if let Some(child) = node.right {
            self.stack.push(child);
        }
        if let Some(child) = node.left {
            self.stack.push(child);
        }
        Some((idx, node))
    }
}

pub struct InOrderIter<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<Index>,
    /// Next node whose left spine still has to be unwound onto the stack
    descend: Option<Index>,
}

impl<'a, T> InOrderIter<'a, T> {
    fn new(tree: &'a BinaryTree<T>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            descend: tree.root(),
        }
    }
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = (Index, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.descend {
            self.stack.push(idx);
            self.descend = self.tree.get(idx).and_then(Node::left);
        }
        let idx = self.stack.pop()?;
        let node = self.tree.get(idx)?;
        self.descend = node.right;
        Some((idx, node))
    }
}

pub struct PostOrderIter<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIter<'a, T> {
    fn new(tree: &'a BinaryTree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PostOrderIter<'a, T> {
    type Item = (Index, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(idx) {
                if visited {
                    return Some((idx, node));
                }
                self.stack.push((idx, true));
                if let Some(child) = node.right {
                    self.stack.push((child, false));
                }
                if let Some(child) = node.left {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
