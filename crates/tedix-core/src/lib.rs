//! # Tedix Core
//!
//! Core engine for threshold-based tree edit distance lookup.
//!
//! This crate provides:
//! - **Labeled-tree model** with exclusively owned children
//! - **Weighted label sets** as a cheap structural proxy per tree
//! - **Two-stage inverted list** over label statistics: a size-sorted
//!   stage for window retrieval and per-label postings for incremental
//!   overlap scanning
//! - **Lookup engines** combining size filtering, a sound overlap lower
//!   bound with early termination, an optional upper-bound shortcut, and
//!   exact verification, with cost counters throughout
//! - **Pluggable distance strategies**: Zhang-Shasha exact TED and an
//!   aligned-mapping upper bound, both over injectable cost models

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod index;
pub mod labels;
pub mod lookup;
pub mod ted;
pub mod tree;

pub use error::{Result, TedixError};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::error::{Result, TedixError};
    pub use crate::index::{SizeWindow, TwoStageInvertedList};
    pub use crate::labels::{LabelSet, LabelSetCollection, LabelSetConverter, SizeEntry};
    pub use crate::lookup::{
        node_lower_bound, LookupMatch, LookupStats, VerificationIndex, VerificationUBkIndex,
    };
    pub use crate::ted::{
        AlignedMappingBound, CostModel, UnitCostModel, UpperBound, Verified, Verifier,
        ZhangShashaVerifier,
    };
    pub use crate::tree::{TreeCollection, TreeId, TreeNode};
}
