//! Aligned-mapping upper bound.

use super::cost::{CostModel, UnitCostModel};
use super::UpperBound;
use crate::error::Result;
use crate::tree::TreeNode;

/// Upper bound from a position-aligned node mapping.
///
/// Pairs the two roots, then recursively pairs the i-th child of a mapped
/// node with the i-th child of its partner. Paired nodes are charged the
/// rename cost; subtrees left without a partner are charged full deletion
/// or insertion cost. The induced mapping preserves ancestry and
/// left-to-right order, so it is a valid edit mapping and its cost can
/// never drop below the true edit distance.
///
/// Runs in time linear in the smaller tree plus the unpaired subtrees,
/// with no dynamic-programming table.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignedMappingBound<C = UnitCostModel> {
    costs: C,
}

impl AlignedMappingBound {
    /// Create a bound with unit costs.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CostModel> AlignedMappingBound<C> {
    /// Create a bound with a custom cost model.
    pub fn with_costs(costs: C) -> Self {
        Self { costs }
    }

    /// Sum a per-node cost over a whole subtree, iteratively.
    fn subtree_cost(&self, root: &TreeNode, cost: impl Fn(&C, &TreeNode) -> f64) -> f64 {
        let mut sum = 0.0;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            sum += cost(&self.costs, node);
            stack.extend(node.children().iter());
        }
        sum
    }
}

impl<C: CostModel> UpperBound for AlignedMappingBound<C> {
    fn compute(&self, left: &TreeNode, right: &TreeNode) -> Result<f64> {
        let mut bound = 0.0;
        let mut pairs = vec![(left, right)];
        while let Some((a, b)) = pairs.pop() {
            bound += self.costs.rename(a, b);
            let paired = a.children_count().min(b.children_count());
            for i in 0..paired {
                pairs.push((&a.children()[i], &b.children()[i]));
            }
            for child in &a.children()[paired..] {
                bound += self.subtree_cost(child, |c, n| c.delete(n));
            }
            for child in &b.children()[paired..] {
                bound += self.subtree_cost(child, |c, n| c.insert(n));
            }
        }
        Ok(bound)
    }
}
