//! High-level lookup engine.

use anyhow::{ensure, Result};
use parking_lot::Mutex;
use tedix_core::index::TwoStageInvertedList;
use tedix_core::labels::{LabelSetCollection, LabelSetConverter, SizeEntry};
use tedix_core::lookup::{LookupMatch, LookupStats, VerificationIndex, VerificationUBkIndex};
use tedix_core::ted::{AlignedMappingBound, ZhangShashaVerifier};
use tedix_core::tree::{TreeCollection, TreeId, TreeNode};
use tracing::{debug, info};

/// Builder for creating a [`LookupEngine`].
///
/// Collects the tree collection, then performs the offline preprocessing
/// (label-set conversion, size-set index, inverted-list build) in
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct LookupEngineBuilder {
    trees: TreeCollection,
}

impl LookupEngineBuilder {
    /// Create a new engine builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tree to the collection, returning the builder.
    pub fn add_tree(mut self, tree: TreeNode) -> Self {
        self.trees.push(tree);
        self
    }

    /// Add every tree of an iterator to the collection.
    pub fn add_trees(mut self, trees: impl IntoIterator<Item = TreeNode>) -> Self {
        for tree in trees {
            self.trees.push(tree);
        }
        self
    }

    /// Build the engine: convert trees to label sets, build the size-set
    /// index and the two-stage inverted list.
    pub fn build(self) -> Result<LookupEngine> {
        ensure!(
            !self.trees.is_empty(),
            "cannot build a lookup engine over an empty collection"
        );

        let mut converter = LabelSetConverter::new();
        let (sets, size_index) = converter.convert(&self.trees);
        let index = TwoStageInvertedList::new(&sets);

        info!(
            trees = self.trees.len(),
            distinct_labels = converter.distinct_labels(),
            "lookup index built"
        );

        Ok(LookupEngine {
            trees: self.trees,
            sets,
            size_index,
            index,
            baseline: Mutex::new(VerificationIndex::new(ZhangShashaVerifier::new())),
            shortcut: Mutex::new(VerificationUBkIndex::new(
                ZhangShashaVerifier::new(),
                AlignedMappingBound::new(),
            )),
        })
    }
}

/// High-level threshold lookup engine.
///
/// Owns the tree collection and all prebuilt lookup structures, and keeps
/// one engine instance per verification strategy behind a lock so the
/// surface can be shared across threads. The prebuilt structures
/// themselves are read-only.
///
/// # Example
///
/// ```rust
/// use tedix::engine::LookupEngine;
/// use tedix::tree::TreeNode;
///
/// # fn main() -> anyhow::Result<()> {
/// let mut root = TreeNode::new("a");
/// root.add_child(TreeNode::new("b"));
///
/// let engine = LookupEngine::builder()
///     .add_tree(root)
///     .add_tree(TreeNode::new("a"))
///     .build()?;
///
/// let query = tedix::tree::TreeId(0);
/// let matches = engine.lookup(query, 1.0)?;
/// assert_eq!(matches.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LookupEngine {
    trees: TreeCollection,
    sets: LabelSetCollection,
    size_index: Vec<SizeEntry>,
    index: TwoStageInvertedList,
    baseline: Mutex<VerificationIndex<ZhangShashaVerifier>>,
    shortcut: Mutex<VerificationUBkIndex<ZhangShashaVerifier, AlignedMappingBound>>,
}

impl LookupEngine {
    /// Create an engine builder.
    pub fn builder() -> LookupEngineBuilder {
        LookupEngineBuilder::new()
    }

    /// Number of indexed trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the engine indexes no trees. Always false for a built
    /// engine.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Get an indexed tree by id.
    pub fn tree(&self, id: TreeId) -> Option<&TreeNode> {
        self.trees.get(id)
    }

    /// All trees within `threshold` of the query tree, verified exactly.
    pub fn lookup(&self, query: TreeId, threshold: f64) -> tedix_core::Result<Vec<LookupMatch>> {
        let mut engine = self.baseline.lock();
        let matches = engine.execute_lookup(
            &self.trees,
            &self.sets,
            &self.size_index,
            &self.index,
            query,
            threshold,
        )?;
        debug!(
            query = query.0,
            threshold,
            matches = matches.len(),
            pre_candidates = engine.pre_candidate_count(),
            candidates = engine.candidate_count(),
            verifications = engine.verification_count(),
            "lookup complete"
        );
        Ok(matches)
    }

    /// Same result id-set as [`lookup`](Self::lookup), using the
    /// aligned-mapping upper bound to skip verifications it can.
    pub fn lookup_with_shortcut(
        &self,
        query: TreeId,
        threshold: f64,
    ) -> tedix_core::Result<Vec<LookupMatch>> {
        let mut engine = self.shortcut.lock();
        let matches = engine.execute_lookup(
            &self.trees,
            &self.sets,
            &self.size_index,
            &self.index,
            query,
            threshold,
        )?;
        debug!(
            query = query.0,
            threshold,
            matches = matches.len(),
            pre_candidates = engine.pre_candidate_count(),
            candidates = engine.candidate_count(),
            verifications = engine.verification_count(),
            "shortcut lookup complete"
        );
        Ok(matches)
    }

    /// Accumulated counters of the exact-verification engine.
    pub fn stats(&self) -> LookupStats {
        self.baseline.lock().stats()
    }

    /// Accumulated counters of the upper-bound-shortcut engine.
    pub fn shortcut_stats(&self) -> LookupStats {
        self.shortcut.lock().stats()
    }
}
