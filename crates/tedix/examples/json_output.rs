//! JSON output example.
//!
//! Runs a threshold lookup and emits the matches and cost counters as
//! JSON, the shape a service endpoint would return.

use anyhow::Result;
use serde::Serialize;
use tedix::prelude::*;

#[derive(Serialize)]
struct LookupReport {
    query: TreeId,
    threshold: f64,
    matches: Vec<LookupMatch>,
    stats: LookupStats,
}

fn chain(labels: &[&str]) -> TreeNode {
    let mut iter = labels.iter().rev();
    let mut node = TreeNode::new(*iter.next().expect("at least one label"));
    for label in iter {
        let mut parent = TreeNode::new(*label);
        parent.add_child(node);
        node = parent;
    }
    node
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let engine = LookupEngine::builder()
        .add_tree(chain(&["html", "body", "div", "p"]))
        .add_tree(chain(&["html", "body", "div", "span"]))
        .add_tree(chain(&["html", "body", "p"]))
        .add_tree(chain(&["svg", "g", "rect"]))
        .build()?;

    let query = TreeId(0);
    let threshold = 1.0;
    let matches = engine.lookup(query, threshold)?;

    let report = LookupReport {
        query,
        threshold,
        matches,
        stats: engine.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
