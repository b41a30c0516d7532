//! Upper-bound-accelerated lookup engine.

use super::{collect_candidates, LookupMatch, LookupStats};
use crate::error::{Result, TedixError};
use crate::index::TwoStageInvertedList;
use crate::labels::{LabelSetCollection, SizeEntry};
use crate::ted::{UpperBound, Verifier};
use crate::tree::{TreeCollection, TreeId};

/// Lookup engine that tries a cheap upper bound before exact
/// verification.
///
/// Filtering is identical to [`VerificationIndex`]; per candidate, the
/// upper-bound algorithm runs first. A bound within the threshold proves
/// the match (the bound never undershoots the true distance) and the
/// candidate is accepted with the bound as its reported distance, without
/// touching the verification counter. A bound above the threshold proves
/// nothing, so the candidate falls through to exact verification.
///
/// For identical inputs the accepted tree ids equal the baseline
/// engine's, while `verification_count()` never exceeds the baseline's.
///
/// [`VerificationIndex`]: super::VerificationIndex
#[derive(Debug)]
pub struct VerificationUBkIndex<V, U> {
    verifier: V,
    upper_bound: U,
    stats: LookupStats,
}

impl<V: Verifier, U: UpperBound> VerificationUBkIndex<V, U> {
    /// Create an engine around a verification algorithm and an
    /// upper-bound algorithm.
    pub fn new(verifier: V, upper_bound: U) -> Self {
        Self {
            verifier,
            upper_bound,
            stats: LookupStats::default(),
        }
    }

    /// Execute a threshold lookup with the upper-bound shortcut.
    ///
    /// Same contract and errors as
    /// [`VerificationIndex::execute_lookup`](super::VerificationIndex::execute_lookup).
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

            let bound = self.upper_bound.compute(query_tree, candidate_tree)?;
            if bound <= threshold {
                matches.push(LookupMatch {
                    tree_id: candidate.tree_id,
                    distance: bound,
                });
                continue;
            }

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

    /// Number of exact verifications performed. Upper-bound invocations
    /// are not counted.
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
    use crate::lookup::VerificationIndex;
    use crate::ted::{AlignedMappingBound, Verified, ZhangShashaVerifier};
    use crate::tree::TreeNode;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// An exact algorithm doubling as a (tight) upper bound.
    struct ExactBound(ZhangShashaVerifier);

    impl UpperBound for ExactBound {
        fn compute(&self, left: &TreeNode, right: &TreeNode) -> Result<f64> {
            Ok(self.0.compute(left, right)?.distance)
        }
    }

    /// A verifier that panics when invoked; proves the shortcut path.
    struct UnreachableVerifier;

    impl Verifier for UnreachableVerifier {
        fn compute(&self, _left: &TreeNode, _right: &TreeNode) -> Result<Verified> {
            panic!("verification must not run when the upper bound accepts");
        }
    }

    fn random_tree(rng: &mut StdRng, nodes: usize, labels: &[&str]) -> TreeNode {
        let mut node = TreeNode::new(labels[rng.gen_range(0..labels.len())]);
        let mut remaining = nodes - 1;
        while remaining > 0 {
            let take = rng.gen_range(1..=remaining);
            node.add_child(random_tree(rng, take, labels));
            remaining -= take;
        }
        node
    }

    fn random_collection(seed: u64, count: usize) -> TreeCollection {
        let labels = ["a", "b", "c"];
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = TreeCollection::new();
        for _ in 0..count {
            let nodes = rng.gen_range(1..=8);
            trees.push(random_tree(&mut rng, nodes, &labels));
        }
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

    #[test]
    fn exact_upper_bound_reproduces_baseline_pairs() {
        let trees = random_collection(0x5eed, 20);
        let (sets, size_index, index) = prepared(&trees);

        for threshold in [0.0, 1.0, 2.0, 4.0] {
            for query in 0..trees.len() as u32 {
                let mut baseline = VerificationIndex::new(ZhangShashaVerifier::new());
                let mut shortcut = VerificationUBkIndex::new(
                    ZhangShashaVerifier::new(),
                    ExactBound(ZhangShashaVerifier::new()),
                );

                let expected = baseline
                    .execute_lookup(&trees, &sets, &size_index, &index, TreeId(query), threshold)
                    .unwrap();
                let actual = shortcut
                    .execute_lookup(&trees, &sets, &size_index, &index, TreeId(query), threshold)
                    .unwrap();
                assert_eq!(expected, actual, "query {query} threshold {threshold}");
            }
        }
    }

    #[test]
    fn aligned_bound_reproduces_baseline_id_sets() {
        let trees = random_collection(0xcafe, 20);
        let (sets, size_index, index) = prepared(&trees);

        for threshold in [1.0, 2.0, 3.0] {
            for query in 0..trees.len() as u32 {
                let mut baseline = VerificationIndex::new(ZhangShashaVerifier::new());
                let mut shortcut = VerificationUBkIndex::new(
                    ZhangShashaVerifier::new(),
                    AlignedMappingBound::new(),
                );

                let expected: Vec<TreeId> = baseline
                    .execute_lookup(&trees, &sets, &size_index, &index, TreeId(query), threshold)
                    .unwrap()
                    .iter()
                    .map(|m| m.tree_id)
                    .collect();
                let result = shortcut
                    .execute_lookup(&trees, &sets, &size_index, &index, TreeId(query), threshold)
                    .unwrap();
                let actual: Vec<TreeId> = result.iter().map(|m| m.tree_id).collect();

                assert_eq!(expected, actual, "query {query} threshold {threshold}");
                assert!(result.iter().all(|m| m.distance <= threshold));
                assert!(shortcut.verification_count() <= baseline.verification_count());
            }
        }
    }

    #[test]
    fn shortcut_skips_verification_on_accept() {
        let mut trees = TreeCollection::new();
        let mut left = TreeNode::new("a");
        left.add_child(TreeNode::new("b"));
        trees.push(left.clone());
        trees.push(left);
        let (sets, size_index, index) = prepared(&trees);

        let mut engine =
            VerificationUBkIndex::new(UnreachableVerifier, AlignedMappingBound::new());
        let matches = engine
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(0), 0.0)
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(engine.verification_count(), 0);
        assert_eq!(engine.candidate_count(), 2);
        assert_eq!(engine.subproblem_count(), 0);
    }

    #[test]
    fn high_bound_falls_through_to_verification() {
        /// A deliberately useless (but sound) bound.
        struct InfiniteBound;
        impl UpperBound for InfiniteBound {
            fn compute(&self, _l: &TreeNode, _r: &TreeNode) -> Result<f64> {
                Ok(f64::INFINITY)
            }
        }

        let trees = random_collection(0xfeed, 10);
        let (sets, size_index, index) = prepared(&trees);

        let mut baseline = VerificationIndex::new(ZhangShashaVerifier::new());
        let mut shortcut =
            VerificationUBkIndex::new(ZhangShashaVerifier::new(), InfiniteBound);

        let expected = baseline
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(0), 2.0)
            .unwrap();
        let actual = shortcut
            .execute_lookup(&trees, &sets, &size_index, &index, TreeId(0), 2.0)
            .unwrap();

        assert_eq!(expected, actual);
        assert_eq!(
            shortcut.verification_count(),
            baseline.verification_count()
        );
        assert_eq!(shortcut.subproblem_count(), baseline.subproblem_count());
    }
}
