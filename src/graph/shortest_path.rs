//! Single-source, single-destination shortest paths.
//!
//! [`Dijkstra`] runs in three phases: initialize, relax until the
//! destination is settled (or nothing reachable remains), then walk the
//! predecessor chain back to the source. The minimum unvisited distance is
//! found by a linear scan, giving \(O(n^2)\) per query. All working state
//! lives in a per-call `SearchState` and is dropped on return; the graph
//! is only read.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use super::access::visited::VisitedSet;
use super::id::VertexId;
use super::vertex::Weight;
use super::weighted_graph::Graph;

/// A shortest-path search strategy.
pub trait PathFinder {
    /// Finds a minimum-weight path from `source` to `dest`.
    ///
    /// Absence of a path (including an endpoint missing from the graph) is
    /// reported as an empty [`ShortestPath`], not as an error.
    fn shortest_path(&self, graph: &Graph, source: VertexId, dest: VertexId) -> ShortestPath;
}

/// The result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ShortestPath {
    /// Vertices from source to destination, both included. Empty when there is no path.
    pub vertices: Vec<VertexId>,
    /// Total weight of the path, `None` when there is no path.
    ///
    /// Always exact: a route whose total would exceed `Weight::MAX` is not
    /// considered.
    pub distance: Option<Weight>,
}

impl ShortestPath {
    /// The "no path" result.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` when no path was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Consecutive vertex pairs, i.e. the edges a renderer should highlight.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Returns `true` if the path passes through `vertex`.
    pub fn contains(&self, vertex: impl Into<VertexId>) -> bool {
        let vertex = vertex.into();
        self.vertices.contains(&vertex)
    }
}

/// Dijkstra's algorithm with a linear minimum scan.
///
/// Ties between equally distant unvisited vertices go to the one inserted
/// into the graph first. Edge weights are unsigned, so the non-negativity
/// precondition always holds. Routes whose total overflows `Weight` are
/// skipped, so a destination reachable only that way has no path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates the search engine. It holds no state between calls.
    pub fn new() -> Self {
        Self
    }
}

impl PathFinder for Dijkstra {
    fn shortest_path(&self, graph: &Graph, source: VertexId, dest: VertexId) -> ShortestPath {
        let (Some(src), Some(dst)) = (graph.position(source), graph.position(dest)) else {
            debug!(%source, %dest, "shortest_path: endpoint not in graph");
            return ShortestPath::none();
        };

        let mut state = SearchState::new(graph, src);
        while state.visited.remaining() > 0 {
            // Everything left is at infinity: unreachable from the source.
            let Some(current) = state.closest_unvisited() else {
                break;
            };
            state.visited.try_visit(current);
            trace!(
                vertex = %graph.vertex_at(current).id(),
                distance = ?state.distances[current],
                "settled"
            );

            if current == dst {
                break;
            }
            state.relax(graph, current);
        }

        let path = state.reconstruct(graph, src, dst);
        debug!(%source, %dest, hops = path.len(), distance = ?path.distance, "shortest_path");
        path
    }
}

/// Per-call working state, indexed by vertex position in the graph.
struct SearchState {
    index: HashMap<VertexId, usize>,
    visited: VisitedSet,
    /// `None` is +infinity.
    distances: Vec<Option<Weight>>,
    predecessors: Vec<Option<usize>>,
}

impl SearchState {
    fn new(graph: &Graph, source: usize) -> Self {
        let len = graph.vertex_count();
        let index = graph
            .vertices()
            .enumerate()
            .map(|(pos, v)| (v.id(), pos))
            .collect();
        let mut distances = vec![None; len];
        distances[source] = Some(0);

        Self {
            index,
            visited: VisitedSet::new(len),
            distances,
            predecessors: vec![None; len],
        }
    }

    /// The unvisited position with the smallest finite distance.
    fn closest_unvisited(&self) -> Option<usize> {
        let mut closest: Option<(usize, Weight)> = None;
        for pos in self.visited.unvisited() {
            if let Some(d) = self.distances[pos] {
                if closest.map_or(true, |(_, best)| d < best) {
                    closest = Some((pos, d));
                }
            }
        }
        closest.map(|(pos, _)| pos)
    }

    fn relax(&mut self, graph: &Graph, current: usize) {
        let Some(base) = self.distances[current] else {
            return;
        };
        for (neighbor, weight) in graph.vertex_at(current).neighbors() {
            let Some(&pos) = self.index.get(&neighbor) else {
                continue;
            };
            if self.visited.is_visited(pos) {
                continue;
            }
            let Some(candidate) = base.checked_add(weight) else {
                trace!(%neighbor, "relax: distance overflows, skipped");
                continue;
            };
            if self.distances[pos].map_or(true, |known| candidate < known) {
                self.distances[pos] = Some(candidate);
                self.predecessors[pos] = Some(current);
            }
        }
    }

    fn reconstruct(&self, graph: &Graph, source: usize, dest: usize) -> ShortestPath {
        if self.predecessors[dest].is_none() && dest != source {
            return ShortestPath::none();
        }

        let mut vertices = Vec::new();
        let mut current = Some(dest);
        while let Some(pos) = current {
            vertices.push(graph.vertex_at(pos).id());
            current = self.predecessors[pos];
        }
        vertices.reverse();

        ShortestPath {
            vertices,
            distance: self.distances[dest],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;

    fn ids(raw: &[u64]) -> Vec<VertexId> {
        raw.iter().copied().map(VertexId::new).collect()
    }

    fn graph_with(n: u64, edges: &[(u64, u64, Weight)]) -> Graph {
        let mut graph = Graph::new();
        graph
            .add_vertices((1..=n).map(|i| Vertex::new(i, 0, i as i64, i as i64)))
            .unwrap();
        for &(a, b, w) in edges {
            assert!(graph.create_edge(a, b, w));
        }
        graph
    }

    #[test]
    fn five_vertex_scenario() {
        let graph = graph_with(
            5,
            &[(1, 2, 6), (1, 3, 300), (1, 4, 150), (2, 3, 30), (3, 5, 40), (4, 5, 10)],
        );
        let path = Dijkstra::new().shortest_path(&graph, VertexId::new(1), VertexId::new(5));
        assert_eq!(path.vertices, ids(&[1, 2, 3, 5]));
        assert_eq!(path.distance, Some(76));
        assert_eq!(
            path.edges().collect::<Vec<_>>(),
            vec![
                (VertexId::new(1), VertexId::new(2)),
                (VertexId::new(2), VertexId::new(3)),
                (VertexId::new(3), VertexId::new(5)),
            ]
        );
    }

    #[test]
    fn source_equals_destination() {
        let graph = graph_with(2, &[(1, 2, 3)]);
        let path = graph.shortest_path(2u64, 2u64);
        assert_eq!(path.vertices, ids(&[2]));
        assert_eq!(path.distance, Some(0));
    }

    #[test]
    fn disconnected_pair_has_no_path() {
        let graph = graph_with(4, &[(1, 2, 3), (3, 4, 1)]);
        let path = graph.shortest_path(1u64, 4u64);
        assert!(path.is_empty());
        assert_eq!(path.distance, None);
    }

    #[test]
    fn missing_endpoint_has_no_path() {
        let graph = graph_with(2, &[(1, 2, 3)]);
        assert!(graph.shortest_path(1u64, 9u64).is_empty());
        assert!(graph.shortest_path(9u64, 1u64).is_empty());
        assert!(Graph::new().shortest_path(1u64, 1u64).is_empty());
    }

    #[test]
    fn ties_prefer_earlier_vertices() {
        // Two equal-cost routes 1-2-4 and 1-3-4.
        let graph = graph_with(4, &[(1, 2, 1), (1, 3, 1), (2, 4, 1), (3, 4, 1)]);
        let path = graph.shortest_path(1u64, 4u64);
        assert_eq!(path.vertices, ids(&[1, 2, 4]));
        assert_eq!(path.distance, Some(2));
    }

    #[test]
    fn zero_weight_edges() {
        let graph = graph_with(3, &[(1, 2, 0), (2, 3, 0), (1, 3, 1)]);
        let path = graph.shortest_path(1u64, 3u64);
        assert_eq!(path.distance, Some(0));
        assert_eq!(path.vertices, ids(&[1, 2, 3]));
    }

    #[test]
    fn overflowing_routes_are_skipped() {
        let graph = graph_with(3, &[(1, 2, Weight::MAX), (2, 3, Weight::MAX)]);
        assert!(graph.shortest_path(1u64, 3u64).is_empty());

        let path = graph.shortest_path(1u64, 2u64);
        assert_eq!(path.vertices, ids(&[1, 2]));
        assert_eq!(path.distance, Some(Weight::MAX));
    }

    #[test]
    fn overflow_falls_back_to_exact_route() {
        // 1-2-4 would overflow; 1-3-4 sums exactly to Weight::MAX.
        let graph = graph_with(
            4,
            &[(1, 2, 1), (2, 4, Weight::MAX), (1, 3, 2), (3, 4, Weight::MAX - 2)],
        );
        let path = graph.shortest_path(1u64, 4u64);
        assert_eq!(path.vertices, ids(&[1, 3, 4]));
        assert_eq!(path.distance, Some(Weight::MAX));
    }

    #[test]
    fn search_does_not_mutate_graph() {
        let graph = graph_with(3, &[(1, 2, 5), (2, 3, 5)]);
        let before = graph.to_string();
        let _ = graph.shortest_path(1u64, 3u64);
        assert_eq!(graph.to_string(), before);
        assert!(graph.is_consistent());
    }
}
