//! Inverted-list index over label sets.
//!
//! This module provides:
//! - [`TwoStageInvertedList`] - Offline-built, read-only index backing the
//!   lookup engines
//! - [`SizeWindow`] - Closed integer size window around a query size
//! - [`OverlapScan`] / [`ScanStep`] - Incremental label-overlap scanning
//!   against one candidate

mod inverted_list;

pub use inverted_list::{OverlapScan, ScanStep, SizeWindow, TwoStageInvertedList};
