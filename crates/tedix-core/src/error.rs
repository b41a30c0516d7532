//! Error types for Tedix Core.

use crate::tree::TreeId;
use thiserror::Error;

/// Result type alias for Tedix operations.
pub type Result<T> = std::result::Result<T, TedixError>;

/// Errors that can occur in Tedix operations.
#[derive(Error, Debug)]
pub enum TedixError {
    /// The query tree id has no label set in the indexed collection.
    #[error("invalid query: tree {0:?} is not in the indexed collection")]
    InvalidQuery(TreeId),

    /// The distance threshold is negative (or NaN).
    #[error("invalid threshold: {0}")]
    InvalidThreshold(f64),

    /// Tree collection, label-set collection, and size-set index disagree
    /// in population.
    ///
    /// Signals a build-time contract violation upstream; no lookup result
    /// is produced.
    #[error("collection mismatch: {trees} trees, {sets} label sets, {size_entries} size entries")]
    CollectionMismatch {
        /// Number of trees in the tree collection.
        trees: usize,
        /// Number of entries in the label-set collection.
        sets: usize,
        /// Number of entries in the size-set index.
        size_entries: usize,
    },

    /// A verification or upper-bound algorithm rejected its input.
    #[error("malformed tree: {0}")]
    MalformedTree(String),
}
