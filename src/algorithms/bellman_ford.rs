//! Bellman-Ford shortest paths for signed weights, with negative-cycle detection.
//!
//! O(V*E) per call. Callers running it from many sources (harmonic
//! centrality does) pay that cost once per source.

use crate::algorithms::{walk_back, PathResult};
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::Vertex;
use std::collections::HashMap;
use tracing::{trace, warn};

/// Distances and predecessors indexed by vertex position.
pub(crate) struct Relaxed {
    pub(crate) dist: Vec<f64>,
    pub(crate) predecessor: Vec<Option<usize>>,
}

/// Relax every edge |V|-1 times from `source`, then check once more.
///
/// Missing weights count as 0. Unreachable vertices keep +inf.
pub(crate) fn relax_from(graph: &Graph, source: usize) -> Result<Relaxed> {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    dist[source] = 0.0;

    for _ in 1..n {
        let mut changed = false;
        for (u, arc) in graph.all_arcs() {
            if dist[u].is_infinite() {
                continue;
            }
            let candidate = dist[u] + arc.weight.unwrap_or(0.0);
            if candidate < dist[arc.to] {
                dist[arc.to] = candidate;
                predecessor[arc.to] = Some(u);
                changed = true;
            }
        }
        // A full pass without improvement means the check pass cannot improve either
        if !changed {
            return Ok(Relaxed { dist, predecessor });
        }
    }

    for (u, arc) in graph.all_arcs() {
        if dist[u].is_finite() && dist[u] + arc.weight.unwrap_or(0.0) < dist[arc.to] {
            let err = GraphError::NegativeCycle {
                origin: graph.vertex_at(source).name().to_string(),
            };
            warn!(%err, "bellman-ford aborted");
            return Err(err);
        }
    }

    Ok(Relaxed { dist, predecessor })
}

/// Shortest path from `source` to `target` allowing negative weights.
///
/// Returns `Ok(None)` when either vertex is absent, `target` is
/// unreachable, or the predecessor walk does not reach `source`.
///
/// # Errors
/// [`GraphError::NegativeCycle`] if a negative cycle is reachable from `source`.
pub fn shortest_path(graph: &Graph, source: &Vertex, target: &Vertex) -> Result<Option<PathResult>> {
    let (Some(s), Some(t)) = (graph.index_of(source), graph.index_of(target)) else {
        return Ok(None);
    };
    trace!(vertices = graph.len(), from = %source, to = %target, "bellman-ford");

    let Relaxed { dist, predecessor } = relax_from(graph, s)?;
    if dist[t].is_infinite() {
        return Ok(None);
    }

    Ok(walk_back(&predecessor, s, t).map(|path| PathResult {
        path: path.into_iter().map(|i| graph.vertex_at(i).clone()).collect(),
        distance: dist[t],
    }))
}

/// Distance from `source` to every vertex; unreachable ones map to +inf.
///
/// Empty if `source` is not in the graph.
///
/// # Errors
/// [`GraphError::NegativeCycle`] if a negative cycle is reachable from `source`.
pub fn distances(graph: &Graph, source: &Vertex) -> Result<HashMap<Vertex, f64>> {
    let Some(s) = graph.index_of(source) else {
        return Ok(HashMap::new());
    };
    trace!(vertices = graph.len(), from = %source, "bellman-ford distances");

    let Relaxed { dist, .. } = relax_from(graph, s)?;
    Ok(dist
        .into_iter()
        .enumerate()
        .map(|(i, d)| (graph.vertex_at(i).clone(), d))
        .collect())
}
