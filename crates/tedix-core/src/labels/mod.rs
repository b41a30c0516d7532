//! Weighted label-set model.
//!
//! A tree is summarized as a weighted multiset of its labels: one
//! [`LabelSetElement`] per distinct label, with the occurrence count as
//! weight. Label sets are the cheap proxy the inverted-list index filters
//! on before any exact distance computation runs.
//!
//! This module provides:
//! - [`LabelId`] / [`SetId`] - Interned label and label-set identifiers
//! - [`LabelSet`] / [`LabelSetCollection`] - Per-tree sets and their
//!   collection
//! - [`SizeEntry`] - One entry of the size-sorted `(size, set id)` index
//! - [`LabelSetConverter`] - Offline conversion of a tree collection into
//!   sets plus the size-set index

mod converter;
mod set;

pub use converter::LabelSetConverter;
pub use set::{LabelId, LabelSet, LabelSetCollection, LabelSetElement, SetId, SizeEntry};
