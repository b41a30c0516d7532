//! Zhang-Shasha exact tree edit distance.

use super::cost::{CostModel, UnitCostModel};
use super::{Verified, Verifier};
use crate::error::Result;
use crate::tree::TreeNode;
use std::collections::HashMap;

/// Exact ordered tree edit distance via the Zhang-Shasha dynamic program.
///
/// Decomposes both trees into keyroot-rooted subforests and fills the
/// forest-distance tables bottom-up. Every forest-distance cell counts as
/// one subproblem in the reported [`Verified::subproblems`].
///
/// Postorder numbering and leftmost-leaf computation use explicit stacks,
/// so degenerate (chain-shaped) trees do not grow the call stack.
///
/// # Example
///
/// ```rust
/// use tedix_core::ted::{Verifier, ZhangShashaVerifier};
/// use tedix_core::tree::TreeNode;
///
/// let mut left = TreeNode::new("a");
/// left.add_child(TreeNode::new("b"));
/// let right = TreeNode::new("a");
///
/// let verifier = ZhangShashaVerifier::new();
/// let outcome = verifier.compute(&left, &right).unwrap();
/// assert_eq!(outcome.distance, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhangShashaVerifier<C = UnitCostModel> {
    costs: C,
}

impl ZhangShashaVerifier {
    /// Create a verifier with unit costs.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CostModel> ZhangShashaVerifier<C> {
    /// Create a verifier with a custom cost model.
    pub fn with_costs(costs: C) -> Self {
        Self { costs }
    }
}

/// Postorder view of one tree: node references, leftmost leaf descendants,
/// and keyroots, all in postorder numbering.
struct PostorderView<'a> {
    nodes: Vec<&'a TreeNode>,
    lld: Vec<usize>,
    keyroots: Vec<usize>,
}

impl<'a> PostorderView<'a> {
    fn build(root: &'a TreeNode) -> Self {
        struct Frame<'a> {
            node: &'a TreeNode,
            next_child: usize,
            /// Leftmost leaf of the first child's subtree, once emitted.
            first_lld: Option<usize>,
        }

        let mut nodes: Vec<&'a TreeNode> = Vec::new();
        let mut lld: Vec<usize> = Vec::new();
        let mut frames = vec![Frame {
            node: root,
            next_child: 0,
            first_lld: None,
        }];

        while !frames.is_empty() {
            let top = frames.len() - 1;
            let descend = {
                let frame = &mut frames[top];
                let node = frame.node;
                if frame.next_child < node.children_count() {
                    let child = &node.children()[frame.next_child];
                    frame.next_child += 1;
                    Some(child)
                } else {
                    None
                }
            };
            match descend {
                Some(child) => frames.push(Frame {
                    node: child,
                    next_child: 0,
                    first_lld: None,
                }),
                None => {
                    let frame = frames.pop().expect("frame stack is non-empty");
                    let index = nodes.len();
                    let node_lld = frame.first_lld.unwrap_or(index);
                    nodes.push(frame.node);
                    lld.push(node_lld);
                    if let Some(parent) = frames.last_mut() {
                        if parent.first_lld.is_none() {
                            parent.first_lld = Some(node_lld);
                        }
                    }
                }
            }
        }

        // A keyroot is the largest postorder index among nodes sharing a
        // leftmost leaf; the root is always one of them.
        let mut last: HashMap<usize, usize> = HashMap::new();
        for (i, &leaf) in lld.iter().enumerate() {
            last.insert(leaf, i);
        }
        let mut keyroots: Vec<usize> = last.into_values().collect();
        keyroots.sort_unstable();

        Self {
            nodes,
            lld,
            keyroots,
        }
    }
}

impl<C: CostModel> ZhangShashaVerifier<C> {
    /// Fill the forest-distance table for one keyroot pair, updating the
    /// tree-distance matrix in place.
    fn forest_distance(
        &self,
        left: &PostorderView<'_>,
        right: &PostorderView<'_>,
        k1: usize,
        k2: usize,
        tree_dist: &mut [Vec<f64>],
        subproblems: &mut u64,
    ) {
        let l1 = left.lld[k1];
        let l2 = right.lld[k2];
        let rows = k1 - l1 + 2;
        let cols = k2 - l2 + 2;
        let mut fd = vec![vec![0.0f64; cols]; rows];

        for x in 1..rows {
            fd[x][0] = fd[x - 1][0] + self.costs.delete(left.nodes[l1 + x - 1]);
        }
        for y in 1..cols {
            fd[0][y] = fd[0][y - 1] + self.costs.insert(right.nodes[l2 + y - 1]);
        }

        for x in 1..rows {
            for y in 1..cols {
                let i = l1 + x - 1;
                let j = l2 + y - 1;
                *subproblems += 1;

                let delete = fd[x - 1][y] + self.costs.delete(left.nodes[i]);
                let insert = fd[x][y - 1] + self.costs.insert(right.nodes[j]);

                if left.lld[i] == l1 && right.lld[j] == l2 {
                    // Both prefixes are whole trees; the match case is a
                    // rename, and the cell doubles as a tree distance.
                    let rename =
                        fd[x - 1][y - 1] + self.costs.rename(left.nodes[i], right.nodes[j]);
                    fd[x][y] = delete.min(insert).min(rename);
                    tree_dist[i][j] = fd[x][y];
                } else {
                    let x0 = left.lld[i] - l1;
                    let y0 = right.lld[j] - l2;
                    let matched = fd[x0][y0] + tree_dist[i][j];
                    fd[x][y] = delete.min(insert).min(matched);
                }
            }
        }
    }
}

impl<C: CostModel> Verifier for ZhangShashaVerifier<C> {
    fn compute(&self, left: &TreeNode, right: &TreeNode) -> Result<Verified> {
        let lv = PostorderView::build(left);
        let rv = PostorderView::build(right);
        let n1 = lv.nodes.len();
        let n2 = rv.nodes.len();

        let mut tree_dist = vec![vec![0.0f64; n2]; n1];
        let mut subproblems = 0u64;

        for &k1 in &lv.keyroots {
            for &k2 in &rv.keyroots {
                self.forest_distance(&lv, &rv, k1, k2, &mut tree_dist, &mut subproblems);
            }
        }

        Ok(Verified {
            distance: tree_dist[n1 - 1][n2 - 1],
            subproblems,
        })
    }
}
