//! Threshold lookup example.
//!
//! Builds a small collection of labeled trees and runs both lookup
//! strategies against it, printing the matches and the cost counters.

use anyhow::Result;
use tedix::prelude::*;

/// A flat record tree: one root label with a row of leaf fields.
fn record(root: &str, fields: &[&str]) -> TreeNode {
    let mut node = TreeNode::new(root);
    for field in fields {
        node.add_child(TreeNode::new(*field));
    }
    node
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let engine = LookupEngine::builder()
        .add_tree(record("person", &["name", "age"]))
        .add_tree(record("person", &["name", "age", "email"]))
        .add_tree(record("person", &["name", "age", "phone"]))
        .add_tree(record("order", &["item", "price", "qty"]))
        .add_tree(record("person", &["name", "age", "email", "phone"]))
        .build()?;

    println!("Indexed {} trees", engine.len());

    let query = TreeId(1);
    for threshold in [0.0, 1.0, 2.0] {
        let matches = engine.lookup(query, threshold)?;
        println!("τ = {threshold}: {} matches", matches.len());
        for m in &matches {
            println!("  tree {} at distance {}", m.tree_id.0, m.distance);
        }
    }

    let stats = engine.stats();
    println!(
        "Exact strategy: {} pre-candidates, {} candidates, {} verifications, {} subproblems",
        stats.pre_candidates, stats.candidates, stats.verifications, stats.subproblems
    );

    // The shortcut strategy returns the same trees with fewer
    // verifications.
    let matches = engine.lookup_with_shortcut(query, 1.0)?;
    let shortcut = engine.shortcut_stats();
    println!(
        "Shortcut strategy: {} matches, {} verifications",
        matches.len(),
        shortcut.verifications
    );

    Ok(())
}
