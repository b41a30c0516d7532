//! Tree node representation.

use serde::Serialize;

/// Unique identifier for a tree within a [`TreeCollection`].
///
/// Ids are dense: the id of a tree is its position in the owning
/// collection.
///
/// [`TreeCollection`]: super::TreeCollection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TreeId(pub u32);

impl TreeId {
    /// Position of this tree in the owning collection.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A node in an ordered, labeled, rooted tree.
///
/// Children are exclusively owned by their parent and kept in insertion
/// order. A tree is immutable once handed to a [`TreeCollection`].
///
/// [`TreeCollection`]: super::TreeCollection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Label of this node.
    label: String,
    /// Child subtrees, left to right.
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Append a child subtree, consuming it.
    ///
    /// The child becomes the rightmost child of this node.
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Label of this node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Child subtrees, left to right.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Number of direct children.
    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the subtree rooted at this node.
    ///
    /// Iterative; safe on deep, degenerate trees.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_node() {
        let node = TreeNode::new("a");
        assert_eq!(node.label(), "a");
        assert_eq!(node.children_count(), 0);
        assert!(node.is_leaf());
        assert_eq!(node.size(), 1);
    }

    #[test]
    fn add_child_consumes_and_appends() {
        let mut root = TreeNode::new("r");
        let mut mid = TreeNode::new("m");
        mid.add_child(TreeNode::new("x"));
        mid.add_child(TreeNode::new("y"));
        root.add_child(mid);
        root.add_child(TreeNode::new("z"));

        assert_eq!(root.children_count(), 2);
        assert_eq!(root.children()[0].label(), "m");
        assert_eq!(root.children()[0].children_count(), 2);
        assert_eq!(root.children()[1].label(), "z");
        assert_eq!(root.size(), 5);
    }

    #[test]
    fn size_on_deep_chain() {
        // A 10_000-deep chain must not overflow the stack.
        let mut node = TreeNode::new("leaf");
        for _ in 0..9_999 {
            let mut parent = TreeNode::new("n");
            parent.add_child(node);
            node = parent;
        }
        assert_eq!(node.size(), 10_000);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut root = TreeNode::new("r");
        for label in ["a", "b", "c"] {
            root.add_child(TreeNode::new(label));
        }
        let labels: Vec<&str> = root.children().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }
}
