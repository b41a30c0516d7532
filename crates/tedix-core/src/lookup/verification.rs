//! Baseline lookup engine: filter and verify.

use super::{collect_candidates, LookupMatch, LookupStats};
use crate::error::{Result, TedixError};
use crate::index::TwoStageInvertedList;
use crate::labels::{LabelSetCollection, SizeEntry};
use crate::ted::Verifier;
use crate::tree::{TreeCollection, TreeId};

/// Lookup engine that exactly verifies every candidate.
///
/// The verification algorithm is injected at construction and invoked
/// once per candidate that survives the size-window and overlap-bound
/// filters. All cost counters accumulate on this instance.
///
/// # Example
///
/// ```rust
/// use tedix_core::lookup::VerificationIndex;
/// use tedix_core::ted::ZhangShashaVerifier;
///
/// let engine = VerificationIndex::new(ZhangShashaVerifier::new());
/// assert_eq!(engine.verification_count(), 0);
/// ```
#[derive(Debug)]
pub struct VerificationIndex<V> {
    verifier: V,
    stats: LookupStats,
}

impl<V: Verifier> VerificationIndex<V> {
    /// Create an engine around a verification algorithm.
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            stats: LookupStats::default(),
        }
    }

    /// Execute a threshold lookup.
    ///
    /// Returns every tree whose exact edit distance to the query tree is
    /// within `threshold`, in index traversal order (ascending size, then
    /// set id). The query tree must be a member of the indexed
    /// collection.
    ///
    /// # Errors
    ///
    /// [`TedixError::InvalidThreshold`] for a negative (or NaN)
    /// threshold, [`TedixError::InvalidQuery`] when the query id has no
    /// label set, [`TedixError::CollectionMismatch`] when the three
    /// collections disagree in population. Verification failures
    /// propagate unmodified.
    pub fn execute_lookup(
        &mut self,
        trees: &TreeCollection,
        sets: &LabelSetCollection,
        size_index: &[SizeEntry],
        index: &TwoStageInvertedList,
        query_tree_id: TreeId,
        threshold: f64,
    ) -> Result<Vec<LookupMatch>> {
        let (query, candidates) = collect_candidates(
            trees,
            sets,
            size_index,
            index,
            query_tree_id,
            threshold,
            &mut self.stats,
        )?;
        let query_tree = trees
            .get(query.tree_id)
            .ok_or(TedixError::InvalidQuery(query_tree_id))?;

        let mut matches = Vec::new();
        for candidate in candidates {
            let candidate_tree =
                trees
                    .get(candidate.tree_id)
                    .ok_or(TedixError::CollectionMismatch {
                        trees: trees.len(),
                        sets: sets.len(),
                        size_entries: size_index.len(),
                    })?;

            let outcome = self.verifier.compute(query_tree, candidate_tree)?;
            self.stats.verifications += 1;
            self.stats.subproblems += outcome.subproblems;

            if outcome.distance <= threshold {
                matches.push(LookupMatch {
                    tree_id: candidate.tree_id,
                    distance: outcome.distance,
                });
            }
        }
        Ok(matches)
    }

    /// Summed subproblem count of all verification runs.
    pub fn subproblem_count(&self) -> u64 {
        self.stats.subproblems
    }

    /// Number of exact verifications performed.
    pub fn verification_count(&self) -> u64 {
        self.stats.verifications
    }

    /// Number of candidates that survived the overlap-bound filter.
    pub fn candidate_count(&self) -> u64 {
        self.stats.candidates
    }

    /// Number of trees admitted by the size-window filter.
    pub fn pre_candidate_count(&self) -> u64 {
        self.stats.pre_candidates
    }

    /// Snapshot of all four counters.
    pub fn stats(&self) -> LookupStats {
        self.stats
    }

    /// Reset all counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = LookupStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelSetConverter;
    use crate::ted::ZhangShashaVerifier;
    use crate::tree::TreeNode;

    fn star(root: &str, leaves: &[&str]) -> TreeNode {
        let mut node = TreeNode::new(root);
        for leaf in leaves {
            node.add_child(TreeNode::new(*leaf));
        }
        node
    }

    /// Five trees with sizes {3, 4, 4, 5, 6}; id 2 is the query of the
    /// size-window scenario.
    fn scenario() -> TreeCollection {
        let mut trees = TreeCollection::new();
        trees.push(star("a", &["b", "c"]));
        trees.push(star("a", &["b", "c", "x"]));
        trees.push(star("a", &["b", "c", "d"]));
        trees.push(star("a", &["b", "c", "d", "e"]));
        trees.push(star("a", &["b", "c", "d", "e", "f"]));
        trees
    }

    fn prepared(
        trees: &TreeCollection,
    ) -> (
        LabelSetCollection,
        Vec<SizeEntry>,
        TwoStageInvertedList,
    ) {
        let (sets, size_index) = LabelSetConverter::new().convert(trees);
        let index = TwoStageInvertedList::new(&sets);
        (sets, size_index, index)
    }

    fn engine() -> VerificationIndex<ZhangShashaVerifier> {
        VerificationIndex::new(ZhangShashaVerifier::new())
    }

    #[test]
    fn size_window_scenario() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        let matches = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(2), 1.0)
            .unwrap();

        // The size-6 tree lies outside the [3, 5] window.
        assert!(matches.iter().all(|m| m.tree_id != TreeId(4)));
        assert_eq!(engine.pre_candidate_count(), 4);

        // The query matches itself at distance 0.
        assert!(matches.contains(&LookupMatch {
            tree_id: TreeId(2),
            distance: 0.0
        }));

        // Every reported distance is within the threshold.
        assert!(matches.iter().all(|m| m.distance <= 1.0));
        // Tree 1 differs from the query by one relabel, tree 3 by one
        // insertion.
        assert!(matches.iter().any(|m| m.tree_id == TreeId(1)));
        assert!(matches.iter().any(|m| m.tree_id == TreeId(3)));
    }

    #[test]
    fn self_match_at_zero_threshold() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        let matches = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(0), 0.0)
            .unwrap();
        assert_eq!(
            matches,
            vec![LookupMatch {
                tree_id: TreeId(0),
                distance: 0.0
            }]
        );
    }

    #[test]
    fn duplicate_trees_both_match_at_zero() {
        let mut trees = TreeCollection::new();
        trees.push(star("a", &["b"]));
        trees.push(star("a", &["b"]));
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        let matches = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(0), 0.0)
            .unwrap();
        let ids: Vec<TreeId> = matches.iter().map(|m| m.tree_id).collect();
        assert_eq!(ids, vec![TreeId(0), TreeId(1)]);
        assert!(matches.iter().all(|m| m.distance == 0.0));
    }

    #[test]
    fn threshold_results_are_nested() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);

        let mut previous: Option<Vec<TreeId>> = None;
        for threshold in [0.0, 1.0, 2.0, 3.0, 6.0] {
            let mut engine = engine();
            let ids: Vec<TreeId> = engine
                .execute_lookup(&trees, &sets, &size_index, &index, TreeId(2), threshold)
                .unwrap()
                .iter()
                .map(|m| m.tree_id)
                .collect();
            if let Some(smaller) = previous {
                assert!(
                    smaller.iter().all(|id| ids.contains(id)),
                    "result set shrank when threshold grew to {threshold}"
                );
            }
            previous = Some(ids);
        }
    }

    #[test]
    fn counter_ordering_holds() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        let matches = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(2), 1.0)
            .unwrap();

        assert!(engine.pre_candidate_count() >= engine.candidate_count());
        assert!(engine.candidate_count() >= matches.len() as u64);
        assert!(engine.verification_count() <= engine.candidate_count());
        assert!(engine.subproblem_count() > 0);
    }

    #[test]
    fn counters_accumulate_across_calls() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(2), 1.0)
            .unwrap();
        let after_one = engine.stats();
        engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(2), 1.0)
            .unwrap();
        let after_two = engine.stats();

        assert_eq!(after_two.pre_candidates, 2 * after_one.pre_candidates);
        assert_eq!(after_two.verifications, 2 * after_one.verifications);

        engine.reset_stats();
        assert_eq!(engine.stats(), LookupStats::default());
    }

    #[test]
    fn identical_calls_yield_identical_results() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);

        let mut first = engine();
        let mut second = engine();
        let a = first
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(3), 2.0)
            .unwrap();
        let b = second
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(3), 2.0)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_query_is_rejected() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        let err = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(99), 1.0)
            .unwrap_err();
        assert!(matches!(err, TedixError::InvalidQuery(TreeId(99))));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = engine();

        for bad in [-1.0, -0.5, f64::NAN] {
            let err = engine
                .execute_lookup(&trees, &sets, &size_index, &index, TreeId(0), bad)
                .unwrap_err();
            assert!(matches!(err, TedixError::InvalidThreshold(_)));
        }
        assert_eq!(engine.pre_candidate_count(), 0);
    }

    #[test]
    fn verifier_failure_aborts_the_lookup() {
        use crate::ted::{Verified, Verifier};
        use crate::tree::TreeNode;

        struct FailingVerifier;
        impl Verifier for FailingVerifier {
            fn compute(&self, _l: &TreeNode, _r: &TreeNode) -> crate::Result<Verified> {
                Err(TedixError::MalformedTree("unsupported node".into()))
            }
        }

        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);
        let mut engine = VerificationIndex::new(FailingVerifier);

        let err = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(2), 1.0)
            .unwrap_err();
        assert!(matches!(err, TedixError::MalformedTree(_)));
        // The failing call performed no verification.
        assert_eq!(engine.verification_count(), 0);
    }

    #[test]
    fn collection_mismatch_is_rejected() {
        let trees = scenario();
        let (sets, size_index, index) = prepared(&trees);

        let mut short_trees = TreeCollection::new();
        short_trees.push(star("a", &["b", "c"]));

        let mut engine = engine();
        let err = engine
            .execute_lookup(&short_trees, &sets, &size_index, &index, TreeId(0), 1.0)
            .unwrap_err();
        assert!(matches!(err, TedixError::CollectionMismatch { .. }));
    }
}
