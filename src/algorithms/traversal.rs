//! Breadth-first traversal.

use crate::graph::Graph;
use crate::model::Vertex;
use std::collections::{HashMap, VecDeque};

/// Hop counts from `source` along outgoing edges, indexed by position.
/// `None` marks vertices that cannot be reached.
pub(crate) fn hops_from(graph: &Graph, source: usize) -> Vec<Option<usize>> {
    let n = graph.len();
    let mut hops = vec![None; n];
    if source >= n {
        return hops;
    }

    let mut queue = VecDeque::new();
    hops[source] = Some(0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let next = hops[v].map_or(0, |h| h + 1);
        for arc in graph.arcs(v) {
            if hops[arc.to].is_none() {
                hops[arc.to] = Some(next);
                queue.push_back(arc.to);
            }
        }
    }

    hops
}

/// Hop count from `source` to every reachable vertex, `source` included at 0.
///
/// Weights are ignored. Empty if `source` is not in the graph.
pub fn hop_distances(graph: &Graph, source: &Vertex) -> HashMap<Vertex, usize> {
    let Some(s) = graph.index_of(source) else {
        return HashMap::new();
    };
    hops_from(graph, s)
        .into_iter()
        .enumerate()
        .filter_map(|(i, h)| h.map(|h| (graph.vertex_at(i).clone(), h)))
        .collect()
}
