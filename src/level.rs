use std::collections::VecDeque;
use std::iter::Sum;

use generational_arena::Index;
use tracing::instrument;

use crate::tree::BinaryTree;

impl<T> BinaryTree<T> {
    /// Groups the tree's values by level using a breadth-first traversal,
    /// root level first.
    ///
    /// A single queue is used; the queue length at the start of each round
    /// is the width of the level about to be drained, so level boundaries
    /// survive without a second queue.
    #[instrument(level = "debug", skip(self))]
    pub fn level_values(&self) -> Vec<Vec<&T>> {
        let mut levels = Vec::new();
        let mut queue = VecDeque::new();
        if let Some(root) = self.root() {
            queue.push_back(root);
        }

        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let idx = match queue.pop_front() {
                    Some(idx) => idx,
                    None => break,
                };
                if let Some(node) = self.get(idx) {
                    level.push(node.value());
                    if let Some(child) = node.left() {
                        queue.push_back(child);
                    }
                    if let Some(child) = node.right() {
                        queue.push_back(child);
                    }
                }
            }
            levels.push(level);
        }

        levels
    }

    /// Breadth-first scan reporting the values of all nodes whose two
    /// children are both leaves.
    ///
    /// Nodes with zero or one child are skipped, they never qualify.
    /// Results come out in level order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_parents(&self) -> Vec<&T> {
        let mut parents = Vec::new();
        let mut queue = VecDeque::new();
        if let Some(root) = self.root() {
            queue.push_back(root);
        }

        while let Some(idx) = queue.pop_front() {
            if let Some(node) = self.get(idx) {
                if let (Some(left), Some(right)) = (node.left(), node.right()) {
                    if self.is_leaf(left) && self.is_leaf(right) {
                        parents.push(node.value());
                    }
                }
                if let Some(child) = node.left() {
                    queue.push_back(child);
                }
                if let Some(child) = node.right() {
                    queue.push_back(child);
                }
            }
        }

        parents
    }

    /// Depth of the tree via breadth-first traversal, as an iterative
    /// alternative to the recursive [`depth`]. Each queue entry pairs a
    /// node with its 1-based level.
    ///
    /// [`depth`]: BinaryTree::depth
    #[instrument(level = "debug", skip(self))]
    pub fn depth_bfs(&self) -> usize {
        let mut max_depth = 0;
        let mut queue: VecDeque<(Index, usize)> = VecDeque::new();
        if let Some(root) = self.root() {
            queue.push_back((root, 1));
        }

        while let Some((idx, depth)) = queue.pop_front() {
            if depth > max_depth {
                max_depth = depth;
            }
            if let Some(node) = self.get(idx) {
                if let Some(child) = node.left() {
                    queue.push_back((child, depth + 1));
                }
                if let Some(child) = node.right() {
                    queue.push_back((child, depth + 1));
                }
            }
        }

        max_depth
    }
}

impl<T: Copy + Sum<T>> BinaryTree<T> {
    /// Sums the values of each level, root level first.
    ///
    /// Restricted to summable value types; the container itself stays
    /// fully generic.
    #[instrument(level = "debug", skip(self))]
    pub fn level_sums(&self) -> Vec<T> {
        self.level_values()
            .into_iter()
            .map(|level| level.into_iter().copied().sum())
            .collect()
    }
}
