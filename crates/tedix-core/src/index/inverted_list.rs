//! Two-stage inverted list.

use crate::labels::{LabelId, LabelSet, LabelSetCollection, SetId, SizeEntry};
use std::collections::HashMap;

/// Closed integer window of tree sizes.
///
/// For a query of size `s` and threshold `t`, the window `[s - t, s + t]`
/// is a necessary condition for edit distance `<= t`: a single insertion
/// or deletion changes the size by exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeWindow {
    /// Smallest admitted size.
    pub lo: usize,
    /// Largest admitted size.
    pub hi: usize,
}

impl SizeWindow {
    /// Window of all sizes within `threshold` of `size`, clamped at zero.
    pub fn around(size: usize, threshold: f64) -> Self {
        let lo = (size as f64 - threshold).ceil().max(0.0) as usize;
        let hi = (size as f64 + threshold).floor() as usize;
        Self { lo, hi }
    }
}

/// One posting of the per-label inverted lists.
#[derive(Debug, Clone, Copy)]
struct Posting {
    set_id: SetId,
    weight: u32,
}

/// Two-stage inverted list over a label-set collection.
///
/// Stage 1 sorts all `(size, set id)` entries ascending by size, backing
/// binary-search retrieval of a size window. Stage 2 keeps one postings
/// list per label, sorted by set id, backing the incremental overlap scan
/// between a query's label set and any indexed set.
///
/// Built once from the full collection; read-only thereafter. Multiple
/// concurrent lookups may share one index.
#[derive(Debug, Default)]
pub struct TwoStageInvertedList {
    /// Stage 1: entries sorted ascending by `(size, set id)`.
    size_index: Vec<SizeEntry>,
    /// Stage 2: per-label postings, each sorted ascending by set id.
    postings: HashMap<LabelId, Vec<Posting>>,
    /// Total label count (= tree size) per set, indexed by set id.
    totals: Vec<usize>,
}

impl TwoStageInvertedList {
    /// Build the index from a label-set collection.
    pub fn new(sets: &LabelSetCollection) -> Self {
        let mut size_index = Vec::with_capacity(sets.len());
        let mut postings: HashMap<LabelId, Vec<Posting>> = HashMap::new();
        let mut totals = Vec::with_capacity(sets.len());

        // Iterating in ascending set id keeps every postings list sorted.
        for (set_id, set) in sets.iter() {
            size_index.push(SizeEntry {
                size: set.total,
                set_id,
            });
            totals.push(set.total);
            for element in &set.elements {
                postings.entry(element.label).or_default().push(Posting {
                    set_id,
                    weight: element.weight,
                });
            }
        }
        size_index.sort_unstable_by_key(|e| (e.size, e.set_id));

        Self {
            size_index,
            postings,
            totals,
        }
    }

    /// Number of indexed sets.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Number of distinct labels with a postings list.
    pub fn distinct_labels(&self) -> usize {
        self.postings.len()
    }

    /// All set ids whose tree size lies in the window, ascending by size.
    ///
    /// O(log n) to locate the boundaries; the result is a contiguous slice
    /// of the stage-1 structure.
    pub fn trees_with_size_in(&self, window: SizeWindow) -> &[SizeEntry] {
        let start = self.size_index.partition_point(|e| e.size < window.lo);
        let end = self.size_index.partition_point(|e| e.size <= window.hi);
        &self.size_index[start..end]
    }

    /// Incremental overlap scan between a query label set and one indexed
    /// candidate.
    ///
    /// Steps through the query's elements in global label order, probing
    /// the candidate's posting per label. The caller may stop consuming
    /// the iterator as soon as the lower-bound estimator proves rejection.
    pub fn overlap_scan<'a>(&'a self, query: &'a LabelSet, candidate: SetId) -> OverlapScan<'a> {
        OverlapScan {
            index: self,
            query,
            candidate,
            position: 0,
            overlap: 0,
            query_consumed: 0,
            candidate_consumed: 0,
        }
    }

    /// Posting weight of `label` for `candidate`, if present.
    fn weight_of(&self, label: LabelId, candidate: SetId) -> Option<u32> {
        let list = self.postings.get(&label)?;
        let at = list.binary_search_by_key(&candidate, |p| p.set_id).ok()?;
        Some(list[at].weight)
    }
}

/// State of one overlap scan after a step.
///
/// `overlap` is the accumulated label overlap; the two `remaining` fields
/// count label occurrences not yet consumed on either side. Candidate
/// occurrences whose labels the query lacks entirely are only charged at
/// scan end, which weakens intermediate bounds without ever making them
/// unsound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    /// Running overlap between the two label sets.
    pub overlap: u32,
    /// Query-side label occurrences not yet scanned.
    pub query_remaining: u32,
    /// Candidate-side label occurrences not yet scanned.
    pub candidate_remaining: u32,
}

/// Iterator over the steps of one overlap scan. See
/// [`TwoStageInvertedList::overlap_scan`].
#[derive(Debug)]
pub struct OverlapScan<'a> {
    index: &'a TwoStageInvertedList,
    query: &'a LabelSet,
    candidate: SetId,
    position: usize,
    overlap: u32,
    query_consumed: u32,
    candidate_consumed: u32,
}

impl Iterator for OverlapScan<'_> {
    type Item = ScanStep;

    fn next(&mut self) -> Option<ScanStep> {
        let element = self.query.elements.get(self.position)?;
        self.position += 1;
        self.query_consumed += element.weight;

        if let Some(weight) = self.index.weight_of(element.label, self.candidate) {
            self.overlap += element.weight.min(weight);
            self.candidate_consumed += weight;
        }

        let query_total = self.query.total as u32;
        let candidate_total = self.index.totals[self.candidate.index()] as u32;
        Some(ScanStep {
            overlap: self.overlap,
            query_remaining: query_total - self.query_consumed,
            candidate_remaining: candidate_total.saturating_sub(self.candidate_consumed),
        })
    }
}
