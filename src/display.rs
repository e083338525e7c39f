use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::tree::BinaryTree;

/// Conversion into a printable [`termtree::Tree`].
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeNodeConvert for BinaryTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let label = self
                .value(root_idx)
                .map(ToString::to_string)
                .unwrap_or_default();
            let mut tree = Tree::new(label);

            fn build<T: Display>(
                source: &BinaryTree<T>,
                node_idx: Index,
                parent_tree: &mut Tree<String>,
            ) {
                if let Some(node) = source.get(node_idx) {
                    for child_idx in [node.left(), node.right()].into_iter().flatten() {
                        if let Some(child) = source.get(child_idx) {
                            let mut child_tree = Tree::new(child.value().to_string());
                            build(source, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            build(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}
