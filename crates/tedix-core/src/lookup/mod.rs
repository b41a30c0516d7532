//! Index-based threshold lookup.
//!
//! Given a query tree id and a distance threshold, the lookup engines
//! return every tree of the collection whose exact edit distance to the
//! query is within the threshold. Both engines are sound: no true match is
//! ever dropped, and every reported distance is within the threshold.
//!
//! # Architecture
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`node_lower_bound`] | Sound lower bound from partial label overlap |
//! | [`VerificationIndex`] | Size filter, bound filter, exact verification |
//! | [`VerificationUBkIndex`] | Adds an upper-bound shortcut before verification |
//! | [`LookupMatch`] | One `(tree id, distance)` result |
//! | [`LookupStats`] | Accumulated cost counters of one engine instance |
//!
//! # Filtering pipeline
//!
//! 1. The query's label set and size are resolved from the collection.
//! 2. Stage 1 of the index returns all sets whose tree size lies within
//!    the threshold window (pre-candidates).
//! 3. Each pre-candidate runs the incremental overlap scan; the lower
//!    bound is re-evaluated per step and the scan aborts on the first
//!    step that proves rejection. Survivors are candidates.
//! 4. Candidates are verified exactly (the UBk variant first tries the
//!    cheap upper bound and skips verification when it already proves the
//!    match).
//!
//! # Cost counters
//!
//! Every engine instance accumulates four counters across its lifetime:
//! pre-candidates, candidates, verifications, and the summed subproblem
//! count reported by the verification algorithm. The counters are plain
//! fields behind `&mut self`; clone one engine per thread or lock
//! externally for concurrent use.
//!
//! # Example
//!
//! ```rust
//! use tedix_core::index::TwoStageInvertedList;
//! use tedix_core::labels::LabelSetConverter;
//! use tedix_core::lookup::VerificationIndex;
//! use tedix_core::ted::ZhangShashaVerifier;
//! use tedix_core::tree::{TreeCollection, TreeNode};
//!
//! let mut trees = TreeCollection::new();
//! let mut root = TreeNode::new("a");
//! root.add_child(TreeNode::new("b"));
//! let query = trees.push(root);
//! trees.push(TreeNode::new("a"));
//!
//! let (sets, size_index) = LabelSetConverter::new().convert(&trees);
//! let index = TwoStageInvertedList::new(&sets);
//!
//! let mut engine = VerificationIndex::new(ZhangShashaVerifier::new());
//! let matches = engine
//!     .execute_lookup(&trees, &sets, &size_index, &index, query, 1.0)
//!     .unwrap();
//! assert_eq!(matches.len(), 2);
//! ```

mod bounds;
mod ubk;
mod verification;

pub use bounds::node_lower_bound;
pub use ubk::VerificationUBkIndex;
pub use verification::VerificationIndex;

use crate::error::{Result, TedixError};
use crate::index::{SizeWindow, TwoStageInvertedList};
use crate::labels::{LabelSet, LabelSetCollection, SizeEntry};
use crate::tree::{TreeCollection, TreeId};
use serde::Serialize;

/// One lookup result: a tree within the threshold and its distance.
///
/// The distance is the verified exact edit distance, or a sound upper
/// bound that already proved the match (UBk shortcut path).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LookupMatch {
    /// Id of the matching tree.
    pub tree_id: TreeId,
    /// Edit distance to the query; never above the lookup threshold.
    pub distance: f64,
}

/// Cost counters of one engine instance.
///
/// All four counters are monotonically non-decreasing: they accumulate
/// across calls and reset only at construction or via an explicit reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupStats {
    /// Trees admitted by the size-window filter.
    pub pre_candidates: u64,
    /// Trees surviving the overlap lower-bound filter.
    pub candidates: u64,
    /// Exact distance computations performed.
    pub verifications: u64,
    /// Summed subproblem count reported by the verification algorithm.
    pub subproblems: u64,
}

/// Shared filtering front of both engines: validation, size window,
/// incremental overlap scanning with early termination.
///
/// Returns the query's label set and the surviving candidate sets in
/// index traversal order, having updated `pre_candidates` and
/// `candidates`.
fn collect_candidates<'a>(
    trees: &TreeCollection,
    sets: &'a LabelSetCollection,
    size_index: &[SizeEntry],
    index: &TwoStageInvertedList,
    query_tree_id: TreeId,
    threshold: f64,
    stats: &mut LookupStats,
) -> Result<(&'a LabelSet, Vec<&'a LabelSet>)> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(TedixError::InvalidThreshold(threshold));
    }
    if trees.len() != sets.len() || size_index.len() != sets.len() || index.len() != sets.len() {
        return Err(TedixError::CollectionMismatch {
            trees: trees.len(),
            sets: sets.len(),
            size_entries: size_index.len(),
        });
    }

    let (_, query) = sets
        .for_tree(query_tree_id)
        .ok_or(TedixError::InvalidQuery(query_tree_id))?;

    let window = SizeWindow::around(query.total, threshold);
    let pre_candidates = index.trees_with_size_in(window);
    stats.pre_candidates += pre_candidates.len() as u64;

    let mut survivors = Vec::new();
    for entry in pre_candidates {
        let candidate = sets.get(entry.set_id).ok_or(TedixError::CollectionMismatch {
            trees: trees.len(),
            sets: sets.len(),
            size_entries: size_index.len(),
        })?;

        let mut bound = node_lower_bound(
            query.total,
            candidate.total,
            0,
            query.total as u32,
            candidate.total as u32,
        );
        if bound <= threshold {
            for step in index.overlap_scan(query, entry.set_id) {
                bound = node_lower_bound(
                    query.total,
                    candidate.total,
                    step.overlap,
                    step.query_remaining,
                    step.candidate_remaining,
                );
                if bound > threshold {
                    break;
                }
            }
        }
        if bound > threshold {
            continue;
        }

        stats.candidates += 1;
        survivors.push(candidate);
    }

    Ok((query, survivors))
}
