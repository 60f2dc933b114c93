//! Dijkstra single-source shortest path for non-negative weights.

use crate::algorithms::{walk_back, PathResult};
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::Vertex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{trace, warn};

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    idx: usize,
    distance: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

/// Shortest path from `start` to `end`.
///
/// Returns `Ok(None)` if either vertex is not in the graph or `end` is
/// unreachable. If `start == end` the result is a one-vertex path of
/// length 0 and nothing else is examined.
///
/// # Errors
/// [`GraphError::NegativeWeight`] as soon as any relaxed edge carries a
/// negative weight. Every edge reachable from `start` is examined, so the
/// outcome does not depend on where `end` sits in the graph.
pub fn shortest_path(graph: &Graph, start: &Vertex, end: &Vertex) -> Result<Option<PathResult>> {
    let (Some(s), Some(t)) = (graph.index_of(start), graph.index_of(end)) else {
        return Ok(None);
    };
    if s == t {
        return Ok(Some(PathResult {
            path: vec![start.clone()],
            distance: 0.0,
        }));
    }

    let n = graph.len();
    trace!(vertices = n, from = %start, to = %end, "dijkstra");

    let mut dist = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[s] = 0.0;
    heap.push(Candidate {
        idx: s,
        distance: 0.0,
    });

    while let Some(Candidate { idx: u, distance }) = heap.pop() {
        // Stale entry: a shorter distance was settled after this push
        if distance > dist[u] {
            continue;
        }

        for arc in graph.arcs(u) {
            // Unweighted entries only appear if called on an unweighted graph
            let weight = match arc.weight {
                Some(w) => w,
                None => 0.0,
            };
            if weight < 0.0 {
                let err = GraphError::NegativeWeight {
                    from: graph.vertex_at(u).name().to_string(),
                    to: graph.vertex_at(arc.to).name().to_string(),
                    weight,
                };
                warn!(%err, "dijkstra aborted");
                return Err(err);
            }

            let candidate = distance + weight;
            if candidate < dist[arc.to] {
                dist[arc.to] = candidate;
                predecessor[arc.to] = Some(u);
                heap.push(Candidate {
                    idx: arc.to,
                    distance: candidate,
                });
            }
        }
    }

    if dist[t].is_infinite() {
        return Ok(None);
    }

    Ok(walk_back(&predecessor, s, t).map(|path| PathResult {
        path: path.into_iter().map(|i| graph.vertex_at(i).clone()).collect(),
        distance: dist[t],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(directed: bool, edges: &[(&str, &str, f64)]) -> Graph {
        let mut g = Graph::new(directed, true);
        for (a, b, w) in edges {
            g.add_vertex(a);
            g.add_vertex(b);
            g.add_edge(a, b, Some(*w));
        }
        g
    }

    fn v(g: &Graph, name: &str) -> Vertex {
        g.vertex_by_name(name).cloned().unwrap()
    }

    fn names(result: &PathResult) -> Vec<&str> {
        result.path.iter().map(|v| v.name()).collect()
    }

    #[test]
    fn test_chain() {
        let g = make_graph(true, &[("a", "b", 1.0), ("b", "c", 2.0)]);
        let result = shortest_path(&g, &v(&g, "a"), &v(&g, "c")).unwrap().unwrap();
        assert_eq!(names(&result), vec!["a", "b", "c"]);
        assert_eq!(result.distance, 3.0);
    }

    #[test]
    fn test_prefers_cheaper_detour() {
        let g = make_graph(
            true,
            &[("a", "c", 10.0), ("a", "b", 2.0), ("b", "c", 3.0)],
        );
        let result = shortest_path(&g, &v(&g, "a"), &v(&g, "c")).unwrap().unwrap();
        assert_eq!(names(&result), vec!["a", "b", "c"]);
        assert_eq!(result.distance, 5.0);
    }

    #[test]
    fn test_same_vertex() {
        let g = make_graph(true, &[("a", "b", -1.0)]);
        let a = v(&g, "a");
        let result = shortest_path(&g, &a, &a).unwrap().unwrap();
        assert_eq!(result.path, vec![a]);
        assert_eq!(result.distance, 0.0);
    }

    #[test]
    fn test_unreachable() {
        let g = make_graph(true, &[("a", "b", 1.0), ("c", "d", 1.0)]);
        assert!(shortest_path(&g, &v(&g, "a"), &v(&g, "d")).unwrap().is_none());
        assert!(shortest_path(&g, &v(&g, "b"), &v(&g, "a")).unwrap().is_none());
    }

    #[test]
    fn test_missing_vertex() {
        let g = make_graph(true, &[("a", "b", 1.0)]);
        let ghost = Vertex::new(99, "ghost");
        assert!(shortest_path(&g, &v(&g, "a"), &ghost).unwrap().is_none());
    }

    #[test]
    fn test_undirected() {
        let g = make_graph(false, &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let result = shortest_path(&g, &v(&g, "c"), &v(&g, "a")).unwrap().unwrap();
        assert_eq!(names(&result), vec!["c", "b", "a"]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn test_negative_weight_fails() {
        let g = make_graph(true, &[("a", "b", 1.0), ("b", "c", -2.0)]);
        let err = shortest_path(&g, &v(&g, "a"), &v(&g, "c")).unwrap_err();
        assert_eq!(
            err,
            GraphError::NegativeWeight {
                from: "b".into(),
                to: "c".into(),
                weight: -2.0,
            }
        );
    }

    #[test]
    fn test_negative_weight_past_target_still_fails() {
        // the target settles first but the traversal keeps going
        let g = make_graph(
            true,
            &[("a", "b", 1.0), ("a", "c", 5.0), ("c", "d", -1.0)],
        );
        assert!(shortest_path(&g, &v(&g, "a"), &v(&g, "b")).is_err());
    }

    #[test]
    fn test_unreachable_negative_weight_is_ignored() {
        let g = make_graph(true, &[("a", "b", 1.0), ("c", "d", -1.0)]);
        let result = shortest_path(&g, &v(&g, "a"), &v(&g, "b")).unwrap().unwrap();
        assert_eq!(result.distance, 1.0);
    }

    #[test]
    fn test_unweighted_graph_counts_edges_as_zero() {
        let mut g = Graph::new(true, false);
        for name in ["a", "b", "c"] {
            g.add_vertex(name);
        }
        g.add_edge("a", "b", Some(4.0));
        g.add_edge("b", "c", Some(-4.0));
        let result = shortest_path(&g, &v(&g, "a"), &v(&g, "c")).unwrap().unwrap();
        assert_eq!(names(&result), vec!["a", "b", "c"]);
        assert_eq!(result.distance, 0.0);
    }

    #[test]
    fn test_zero_weight_edges() {
        let g = make_graph(true, &[("a", "b", 0.0), ("b", "c", 0.0)]);
        let result = shortest_path(&g, &v(&g, "a"), &v(&g, "c")).unwrap().unwrap();
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.path.len(), 3);
    }
}
