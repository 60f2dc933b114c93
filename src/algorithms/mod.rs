//! Graph algorithm implementations.
//!
//! Every algorithm borrows the graph read-only for one call and returns an
//! independent result value.

pub mod bellman_ford;
pub mod bridges;
pub mod centrality;
pub mod dijkstra;
pub mod scc;
pub mod traversal;

use crate::model::Vertex;
use serde::Serialize;

/// A path from start to end (inclusive) with its total weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: Vec<Vertex>,
    pub distance: f64,
}

/// Walk predecessor links back from `target` to `source`.
///
/// Returns `None` if the walk dead-ends before reaching the source.
pub(crate) fn walk_back(
    predecessor: &[Option<usize>],
    source: usize,
    target: usize,
) -> Option<Vec<usize>> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        current = predecessor[current]?;
        path.push(current);
        // a predecessor cycle can never reach the source
        if path.len() > predecessor.len() {
            return None;
        }
    }
    path.reverse();
    Some(path)
}
