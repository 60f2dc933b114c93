//! Harmonic centrality.
//!
//! Runs one shortest-path computation per vertex: BFS hop counts on
//! unweighted graphs, Bellman-Ford on weighted ones. That is O(V*(V+E))
//! or O(V*V*E) overall.

use crate::algorithms::bellman_ford::relax_from;
use crate::algorithms::traversal::hops_from;
use crate::error::Result;
use crate::graph::Graph;
use crate::model::Vertex;
use std::collections::HashMap;
use tracing::debug;

/// Harmonic centrality of every vertex.
///
/// The score of `v` is the sum of `1 / d(v, w)` over every other vertex `w`
/// with a finite, positive distance. Unreachable vertices contribute 0.
///
/// # Errors
/// Propagates [`GraphError::NegativeCycle`](crate::GraphError::NegativeCycle)
/// from the first source that reaches a negative cycle (weighted graphs only).
pub fn harmonic_centrality(graph: &Graph) -> Result<HashMap<Vertex, f64>> {
    let n = graph.len();
    debug!(vertices = n, weighted = graph.is_weighted(), "harmonic centrality");

    let mut scores = HashMap::with_capacity(n);
    for source in 0..n {
        let score = if graph.is_weighted() {
            let relaxed = relax_from(graph, source)?;
            reciprocal_sum(source, relaxed.dist.into_iter())
        } else {
            let hops = hops_from(graph, source);
            reciprocal_sum(
                source,
                hops.into_iter()
                    .map(|h| h.map_or(f64::INFINITY, |h| h as f64)),
            )
        };
        scores.insert(graph.vertex_at(source).clone(), score);
    }

    Ok(scores)
}

fn reciprocal_sum(source: usize, distances: impl Iterator<Item = f64>) -> f64 {
    distances
        .enumerate()
        .filter(|&(i, d)| i != source && d.is_finite() && d > 0.0)
        .map(|(_, d)| 1.0 / d)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    const EPS: f64 = 1e-9;

    fn make_graph(directed: bool, weighted: bool, edges: &[(&str, &str, f64)]) -> Graph {
        let mut g = Graph::new(directed, weighted);
        for (a, b, w) in edges {
            g.add_vertex(a);
            g.add_vertex(b);
            g.add_edge(a, b, Some(*w));
        }
        g
    }

    fn score(scores: &HashMap<Vertex, f64>, g: &Graph, name: &str) -> f64 {
        scores[g.vertex_by_name(name).unwrap()]
    }

    #[test]
    fn test_harmonic_empty() {
        let g = Graph::new(true, true);
        assert!(harmonic_centrality(&g).unwrap().is_empty());
    }

    #[test]
    fn test_harmonic_weighted_uses_shortest_distance() {
        let g = make_graph(
            true,
            true,
            &[("a", "b", 2.0), ("b", "c", 3.0), ("a", "c", 10.0)],
        );
        let scores = harmonic_centrality(&g).unwrap();
        assert!((score(&scores, &g, "a") - 0.7).abs() < EPS);
        assert!((score(&scores, &g, "b") - 1.0 / 3.0).abs() < EPS);
        assert_eq!(score(&scores, &g, "c"), 0.0);
    }

    #[test]
    fn test_harmonic_unweighted_uses_hops() {
        // weights are discarded by the unweighted graph
        let g = make_graph(
            true,
            false,
            &[("a", "b", 2.0), ("b", "c", 3.0), ("a", "c", 10.0)],
        );
        let scores = harmonic_centrality(&g).unwrap();
        assert!((score(&scores, &g, "a") - 2.0).abs() < EPS);
        assert!((score(&scores, &g, "b") - 1.0).abs() < EPS);
        assert_eq!(score(&scores, &g, "c"), 0.0);
    }

    #[test]
    fn test_harmonic_undirected_path() {
        let g = make_graph(false, false, &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let scores = harmonic_centrality(&g).unwrap();
        assert!((score(&scores, &g, "b") - 2.0).abs() < EPS);
        assert!((score(&scores, &g, "a") - 1.5).abs() < EPS);
        assert!((score(&scores, &g, "c") - 1.5).abs() < EPS);
    }

    #[test]
    fn test_harmonic_skips_non_positive_distances() {
        // a reaches b at distance 0 and c at distance -1
        let g = make_graph(true, true, &[("a", "b", 0.0), ("b", "c", -1.0)]);
        let scores = harmonic_centrality(&g).unwrap();
        assert_eq!(score(&scores, &g, "a"), 0.0);
        assert_eq!(score(&scores, &g, "b"), 0.0);
    }

    #[test]
    fn test_harmonic_isolated_vertex_scores_zero() {
        let mut g = make_graph(true, true, &[("a", "b", 1.0)]);
        g.add_vertex("alone");
        let scores = harmonic_centrality(&g).unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(score(&scores, &g, "alone"), 0.0);
    }

    #[test]
    fn test_harmonic_negative_cycle_fails() {
        let g = make_graph(
            true,
            true,
            &[("a", "b", -1.0), ("b", "c", -1.0), ("c", "a", -1.0)],
        );
        assert!(matches!(
            harmonic_centrality(&g),
            Err(GraphError::NegativeCycle { .. })
        ));
    }
}
