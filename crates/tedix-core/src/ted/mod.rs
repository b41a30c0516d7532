//! Tree edit distance strategies.
//!
//! The lookup engines treat distance computation as injected capabilities:
//! an exact algorithm behind [`Verifier`] and a cheap over-approximation
//! behind [`UpperBound`]. Both operate on whole trees and may reject
//! malformed input by returning an error, which the engines propagate
//! unmodified.
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`Verifier`] | Exact TED plus the subproblem count it consumed |
//! | [`UpperBound`] | Sound over-approximation used to skip verification |
//! | [`ZhangShashaVerifier`] | Keyroot/forest-distance dynamic program |
//! | [`AlignedMappingBound`] | Valid-mapping upper bound, linear time |
//! | [`CostModel`] / [`UnitCostModel`] | Per-operation edit costs |
//!
//! # Soundness
//!
//! An [`UpperBound`] implementation must return a value `>=` the true edit
//! distance for every input pair. The shortcut engine accepts a candidate
//! purely on `bound <= threshold`, so a violation would produce false
//! positives.

mod cost;
mod upper_bound;
mod zhang_shasha;

pub use cost::{CostModel, UnitCostModel};
pub use upper_bound::AlignedMappingBound;
pub use zhang_shasha::ZhangShashaVerifier;

use crate::error::Result;
use crate::tree::TreeNode;

/// Outcome of one exact distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verified {
    /// Exact tree edit distance.
    pub distance: f64,
    /// Number of dynamic-programming subproblems the computation consumed.
    pub subproblems: u64,
}

/// Exact tree edit distance computation.
pub trait Verifier {
    /// Compute the exact edit distance between two trees.
    fn compute(&self, left: &TreeNode, right: &TreeNode) -> Result<Verified>;
}

/// Cheap, sound over-approximation of tree edit distance.
pub trait UpperBound {
    /// Compute an upper bound on the edit distance between two trees.
    ///
    /// The returned value must never be below the true distance.
    fn compute(&self, left: &TreeNode, right: &TreeNode) -> Result<f64>;
}
