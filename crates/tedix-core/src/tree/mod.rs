//! Labeled-tree data model.
//!
//! This module provides:
//! - [`TreeNode`] - An ordered, labeled, rooted tree with exclusively owned
//!   children
//! - [`TreeCollection`] - The owning container that assigns stable
//!   [`TreeId`]s
//!
//! # Ownership
//!
//! A child is inserted by value: [`TreeNode::add_child`] consumes the child
//! subtree and transfers it into the parent's child list. There is no way to
//! observe a moved-from subtree, and no shared or back references exist
//! within a tree.
//!
//! # Example
//!
//! ```rust
//! use tedix_core::tree::{TreeNode, TreeCollection};
//!
//! let mut root = TreeNode::new("article");
//! let mut body = TreeNode::new("body");
//! body.add_child(TreeNode::new("para"));
//! root.add_child(TreeNode::new("title"));
//! root.add_child(body);
//! assert_eq!(root.size(), 4);
//!
//! let mut collection = TreeCollection::new();
//! let id = collection.push(root);
//! assert_eq!(collection.get(id).unwrap().children_count(), 2);
//! ```

mod collection;
mod node;

pub use collection::TreeCollection;
pub use node::{TreeId, TreeNode};
