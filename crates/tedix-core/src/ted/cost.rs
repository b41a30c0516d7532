//! Edit-operation cost models.

use crate::tree::TreeNode;

/// Per-operation costs for tree edit distance.
///
/// Costs must be non-negative; rename of two equally-labeled nodes is
/// expected to cost 0.
pub trait CostModel {
    /// Cost of relabeling `from` into `to`.
    fn rename(&self, from: &TreeNode, to: &TreeNode) -> f64;
    /// Cost of deleting `node`.
    fn delete(&self, node: &TreeNode) -> f64;
    /// Cost of inserting `node`.
    fn insert(&self, node: &TreeNode) -> f64;
}

/// Unit costs: every insertion and deletion costs 1, renames cost 1 when
/// the labels differ and 0 otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCostModel;

impl CostModel for UnitCostModel {
    fn rename(&self, from: &TreeNode, to: &TreeNode) -> f64 {
        if from.label() == to.label() {
            0.0
        } else {
            1.0
        }
    }

    fn delete(&self, _node: &TreeNode) -> f64 {
        1.0
    }

    fn insert(&self, _node: &TreeNode) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_rename_matches_on_label() {
        let a = TreeNode::new("abc");
        let b = TreeNode::new("abcd");
        let c = TreeNode::new("abc");
        let costs = UnitCostModel;
        assert_eq!(costs.rename(&a, &b), 1.0);
        assert_eq!(costs.rename(&a, &c), 0.0);
        assert_eq!(costs.rename(&b, &a), 1.0);
    }

    #[test]
    fn unit_insert_delete_are_one() {
        let node = TreeNode::new("x");
        let costs = UnitCostModel;
        assert_eq!(costs.delete(&node), 1.0);
        assert_eq!(costs.insert(&node), 1.0);
    }
}
