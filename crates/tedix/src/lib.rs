//! # Tedix
//!
//! Threshold-based tree edit distance lookup with a two-stage inverted
//! list index.
//!
//! Tedix answers range queries over a collection of labeled trees: given
//! a query tree and a distance threshold τ, it returns every tree whose
//! exact tree edit distance to the query is at most τ. The index filters
//! with cheap label statistics first (a size window, then a sound overlap
//! lower bound with early termination) and verifies only the survivors,
//! optionally short-circuiting verification with a cheap upper bound.
//!
//! ## Quick Start
//!
//! ```rust
//! use tedix::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut article = TreeNode::new("article");
//!     article.add_child(TreeNode::new("title"));
//!     article.add_child(TreeNode::new("body"));
//!
//!     let mut note = TreeNode::new("article");
//!     note.add_child(TreeNode::new("title"));
//!
//!     let engine = LookupEngine::builder()
//!         .add_tree(article)
//!         .add_tree(note)
//!         .build()?;
//!
//!     // Every tree within distance 1 of tree 0.
//!     let matches = engine.lookup(TreeId(0), 1.0)?;
//!     assert_eq!(matches.len(), 2);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Re-export core crate
pub use tedix_core::*;

pub mod engine;

pub use engine::{LookupEngine, LookupEngineBuilder};

/// Commonly used types.
pub mod prelude {
    pub use crate::engine::{LookupEngine, LookupEngineBuilder};
    pub use crate::{
        error::{Result, TedixError},
        index::TwoStageInvertedList,
        labels::LabelSetConverter,
        lookup::{LookupMatch, LookupStats, VerificationIndex, VerificationUBkIndex},
        ted::{AlignedMappingBound, UnitCostModel, UpperBound, Verifier, ZhangShashaVerifier},
        tree::{TreeCollection, TreeId, TreeNode},
    };

    // Re-export useful external types
    pub use anyhow;
    pub use tracing;
}
