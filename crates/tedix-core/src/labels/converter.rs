//! Conversion of trees into weighted label sets.

use super::set::{LabelId, LabelSet, LabelSetCollection, LabelSetElement, SizeEntry};
use crate::tree::{TreeCollection, TreeNode};
use std::collections::HashMap;

/// Converts a tree collection into its label-set representation.
///
/// Labels are interned across the whole collection: the first occurrence of
/// a label string assigns the next [`LabelId`], and the numeric id order is
/// the global label order used for merge scanning. The converter also
/// produces the size-set index, sorted ascending by tree size.
///
/// # Example
///
/// ```rust
/// use tedix_core::labels::LabelSetConverter;
/// use tedix_core::tree::{TreeCollection, TreeNode};
///
/// let mut trees = TreeCollection::new();
/// let mut root = TreeNode::new("a");
/// root.add_child(TreeNode::new("b"));
/// root.add_child(TreeNode::new("b"));
/// trees.push(root);
///
/// let mut converter = LabelSetConverter::new();
/// let (sets, size_index) = converter.convert(&trees);
/// assert_eq!(sets.len(), 1);
/// assert_eq!(size_index[0].size, 3);
/// ```
#[derive(Debug, Default)]
pub struct LabelSetConverter {
    interner: HashMap<String, LabelId>,
}

impl LabelSetConverter {
    /// Create a converter with an empty label table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct labels seen so far.
    pub fn distinct_labels(&self) -> usize {
        self.interner.len()
    }

    /// Intern a label, assigning a fresh id on first sight.
    fn intern(&mut self, label: &str) -> LabelId {
        if let Some(&id) = self.interner.get(label) {
            return id;
        }
        let id = LabelId(self.interner.len() as u32);
        self.interner.insert(label.to_owned(), id);
        id
    }

    /// Convert every tree into its weighted label set and build the
    /// size-set index.
    ///
    /// Set ids coincide with tree positions. The returned index is sorted
    /// ascending by size (ties broken by set id).
    pub fn convert(
        &mut self,
        trees: &TreeCollection,
    ) -> (LabelSetCollection, Vec<SizeEntry>) {
        let mut sets = LabelSetCollection::default();
        let mut size_index = Vec::with_capacity(trees.len());

        for (tree_id, tree) in trees.iter() {
            let mut counts: HashMap<LabelId, u32> = HashMap::new();
            let mut total = 0usize;

            let mut stack: Vec<&TreeNode> = vec![tree];
            while let Some(node) = stack.pop() {
                total += 1;
                *counts.entry(self.intern(node.label())).or_insert(0) += 1;
                stack.extend(node.children().iter());
            }

            let mut elements: Vec<LabelSetElement> = counts
                .into_iter()
                .map(|(label, weight)| LabelSetElement { label, weight })
                .collect();
            elements.sort_unstable_by_key(|e| e.label);

            let set_id = sets.push(LabelSet {
                tree_id,
                elements,
                total,
            });
            size_index.push(SizeEntry {
                size: total,
                set_id,
            });
        }

        size_index.sort_unstable_by_key(|e| (e.size, e.set_id));
        (sets, size_index)
    }
}
