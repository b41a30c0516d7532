//! Overlap-based lower bound on tree edit distance.

/// Lower bound on the edit distance between two trees, from a partially
/// scanned label overlap.
///
/// `overlap` is the overlap accumulated so far; `query_remaining` and
/// `candidate_remaining` count the label occurrences not yet scanned on
/// either side. The unscanned suffixes can contribute at most
/// `min(query_remaining, candidate_remaining)` further overlap, so
///
/// ```text
/// lb = max(query_total, candidate_total) - (overlap + min(pr, ps))
/// ```
///
/// never exceeds the true edit distance under unit costs: every edit
/// operation fixes at most one label, and at least `max - overlap` labels
/// need fixing. The bound tightens monotonically as a scan progresses,
/// so a candidate can be rejected at the first scan position where the
/// bound exceeds the threshold.
pub fn node_lower_bound(
    query_total: usize,
    candidate_total: usize,
    overlap: u32,
    query_remaining: u32,
    candidate_remaining: u32,
) -> f64 {
    let achievable = overlap + query_remaining.min(candidate_remaining);
    query_total.max(candidate_total) as f64 - achievable as f64
}
