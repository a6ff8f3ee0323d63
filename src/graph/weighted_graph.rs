//! An undirected, weighted graph of [`Vertex`] values.
//!
//! Vertices live in a single insertion-ordered list owned by the graph and
//! refer to each other by [`VertexId`]. The per-vertex adjacency is the
//! source of truth for edges; the graph additionally keeps an edge index
//! keyed by the canonical (sorted) id pair so that edge enumeration and
//! weight lookups do not depend on which endpoint the caller names first.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_vertices` | \(O(n + b \cdot d)\) | Id collision scan plus link validation |
//! | `remove_vertex` | \(O(n \cdot d + m)\) | Scrubs every remaining vertex |
//! | `create_edge` | \(O(n)\) | Linear id lookup |
//! | `find_vertex` | \(O(n)\) | Linear scan |
//! | `find_min_degree` / `find_max_degree` | \(O(n)\) | |

use core::fmt;
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::error::GraphError;
use super::id::{EdgeKey, VertexId};
use super::shortest_path::{Dijkstra, PathFinder, ShortestPath};
use super::vertex::{Vertex, Weight};

/// An undirected graph with non-negative integer edge weights.
///
/// Invariants upheld by every public operation:
/// - no two vertices share an id;
/// - if `a` lists `b` with weight `w`, then `b` lists `a` with weight `w`;
/// - the edge index holds exactly one entry per edge, with the same weight.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    weights: BTreeMap<EdgeKey, Weight>,
    /// Next id handed out by `add_vertex`. Always greater than every id in
    /// the graph; `None` once `u64::MAX` is taken.
    next_id: Option<u64>,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            weights: BTreeMap::new(),
            next_id: Some(0),
        }
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of (undirected) edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    /// Every edge once, as `(canonical key, weight)`, ordered by key.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, Weight)> + '_ {
        self.weights.iter().map(|(key, weight)| (*key, *weight))
    }

    /// Adds a vertex with a graph-assigned id and returns that id.
    ///
    /// Ids come from a monotonic counter that stays above every id already
    /// in the graph, including ids chosen by callers of [`add_vertices`](Self::add_vertices).
    ///
    /// # Errors
    /// [`GraphError::IdSpaceExhausted`] once the counter has passed `u64::MAX`,
    /// for instance after a batch inserted a vertex with that id.
    pub fn add_vertex(&mut self, value: i64, x: i64, y: i64) -> Result<VertexId, GraphError> {
        let Some(raw) = self.next_id else {
            debug!("add_vertex: id space exhausted");
            return Err(GraphError::IdSpaceExhausted);
        };
        self.next_id = raw.checked_add(1);
        self.vertices.push(Vertex::new(raw, value, x, y));
        Ok(VertexId::new(raw))
    }

    /// Adds a batch of caller-built vertices, all or nothing.
    ///
    /// Vertices may already be linked to each other with
    /// [`Vertex::add_adjacent`]; those edges are indexed on insertion.
    ///
    /// # Errors
    /// Nothing is inserted if
    /// - an id is already in the graph or appears twice in the batch
    ///   ([`GraphError::DuplicateId`]);
    /// - a vertex is linked to a vertex outside the batch, or its link is not
    ///   mirrored with the same weight ([`GraphError::InvalidVertex`]).
    ///
    /// Id collisions are checked first, so a batch with both faults reports
    /// `DuplicateId`.
    pub fn add_vertices(&mut self, batch: impl IntoIterator<Item = Vertex>) -> Result<(), GraphError> {
        let batch: Vec<Vertex> = batch.into_iter().collect();

        let mut seen = HashSet::with_capacity(batch.len());
        for vertex in &batch {
            let id = vertex.id();
            if self.contains_vertex(id) || !seen.insert(id) {
                debug!(%id, "rejecting vertex batch: duplicate id");
                return Err(GraphError::DuplicateId(id));
            }
        }

        for vertex in &batch {
            if let Err(err) = Self::validate_links(vertex, &batch) {
                debug!(%err, "rejecting vertex batch");
                return Err(err);
            }
        }

        for vertex in &batch {
            for (neighbor, weight) in vertex.neighbors() {
                self.weights.insert(EdgeKey::new(vertex.id(), neighbor), weight);
            }
        }
        if let Some(max) = batch.iter().map(|v| v.id().as_u64()).max() {
            self.next_id = match max.checked_add(1) {
                Some(above) => self.next_id.map(|next| next.max(above)),
                None => None,
            };
        }

        debug!(count = batch.len(), "added vertices");
        self.vertices.extend(batch);
        Ok(())
    }

    fn validate_links(vertex: &Vertex, batch: &[Vertex]) -> Result<(), GraphError> {
        let id = vertex.id();
        if !vertex.is_in_sync() {
            return Err(GraphError::InvalidVertex {
                id,
                reason: "adjacency and weights are out of sync",
            });
        }
        for (neighbor, weight) in vertex.neighbors() {
            let Some(other) = batch.iter().find(|v| v.id() == neighbor) else {
                return Err(GraphError::InvalidVertex {
                    id,
                    reason: "linked to a vertex outside the batch",
                });
            };
            if other.weight(id) != Some(weight) {
                return Err(GraphError::InvalidVertex {
                    id,
                    reason: "edge is not mirrored by its neighbor",
                });
            }
        }
        Ok(())
    }

    /// Removes a vertex and every edge incident to it.
    ///
    /// Returns `false` if the vertex is not in the graph.
    pub fn remove_vertex(&mut self, vertex: impl Into<VertexId>) -> bool {
        let id = vertex.into();
        let Some(pos) = self.position(id) else {
            debug!(%id, "remove_vertex: not in graph");
            return false;
        };

        // Scrub back-references before the vertex itself is dropped.
        for other in &mut self.vertices {
            other.detach(id);
        }
        self.weights.retain(|key, _| !key.touches(id));
        self.vertices.remove(pos);
        true
    }

    /// Connects two vertices with an edge of the given weight.
    ///
    /// Returns `false` if either vertex is absent, both name the same
    /// vertex, or the edge already exists.
    pub fn create_edge(&mut self, v1: impl Into<VertexId>, v2: impl Into<VertexId>, weight: Weight) -> bool {
        let (a, b) = (v1.into(), v2.into());
        let (Some(i), Some(j)) = (self.position(a), self.position(b)) else {
            debug!(%a, %b, "create_edge: vertex not in graph");
            return false;
        };
        if i == j {
            return false;
        }

        let (first, second) = self.pair_mut(i, j);
        if !first.add_adjacent(second, weight) {
            debug!(%a, %b, "create_edge: already adjacent");
            return false;
        }
        self.weights.insert(EdgeKey::new(a, b), weight);
        true
    }

    /// Removes the edge between two vertices.
    ///
    /// Returns `false` if either vertex is absent or they are not adjacent.
    pub fn remove_edge(&mut self, v1: impl Into<VertexId>, v2: impl Into<VertexId>) -> bool {
        let (a, b) = (v1.into(), v2.into());
        let (Some(i), Some(j)) = (self.position(a), self.position(b)) else {
            return false;
        };
        if i == j {
            return false;
        }

        let (first, second) = self.pair_mut(i, j);
        if !first.delete_adjacent(second) {
            return false;
        }
        self.weights.remove(&EdgeKey::new(a, b));
        true
    }

    /// Returns the weight of the edge between two vertices.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if either vertex is absent,
    /// [`GraphError::NotAdjacent`] if no edge connects them.
    pub fn get_weight(&self, v1: impl Into<VertexId>, v2: impl Into<VertexId>) -> Result<Weight, GraphError> {
        let (a, b) = (v1.into(), v2.into());
        let first = self.find_vertex(a).ok_or(GraphError::VertexNotFound(a))?;
        if !self.contains_vertex(b) {
            return Err(GraphError::VertexNotFound(b));
        }
        first.weight(b).ok_or(GraphError::NotAdjacent(a, b))
    }

    /// Returns `true` if both vertices are in the graph and share an edge.
    pub fn are_adjacent(&self, v1: impl Into<VertexId>, v2: impl Into<VertexId>) -> bool {
        let (a, b) = (v1.into(), v2.into());
        if !self.contains_vertex(b) {
            return false;
        }
        self.find_vertex(a).is_some_and(|v| v.is_adjacent(b))
    }

    /// Looks a vertex up by id (linear scan).
    pub fn find_vertex(&self, id: impl Into<VertexId>) -> Option<&Vertex> {
        let id = id.into();
        self.vertices.iter().find(|v| v.id() == id)
    }

    /// Returns `true` if a vertex with this id is in the graph.
    pub fn contains_vertex(&self, vertex: impl Into<VertexId>) -> bool {
        self.position(vertex.into()).is_some()
    }

    /// Returns the `(x, y)` coordinates of a vertex.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the vertex is absent.
    pub fn get_coordinates(&self, vertex: impl Into<VertexId>) -> Result<(i64, i64), GraphError> {
        let id = vertex.into();
        self.find_vertex(id)
            .map(Vertex::coordinates)
            .ok_or(GraphError::VertexNotFound(id))
    }

    /// Overwrites the value of a vertex.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the vertex is absent.
    pub fn set_value(&mut self, vertex: impl Into<VertexId>, value: i64) -> Result<(), GraphError> {
        let id = vertex.into();
        let pos = self.position(id).ok_or(GraphError::VertexNotFound(id))?;
        self.vertices[pos].set_value(value);
        Ok(())
    }

    /// Moves one unit of value from the vertex to each of its neighbors.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the vertex is absent.
    pub fn give(&mut self, vertex: impl Into<VertexId>) -> Result<(), GraphError> {
        self.transfer(vertex.into(), -1)
    }

    /// Moves one unit of value from each neighbor to the vertex.
    ///
    /// Exactly undoes [`give`](Self::give) on the same vertex.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the vertex is absent.
    pub fn take(&mut self, vertex: impl Into<VertexId>) -> Result<(), GraphError> {
        self.transfer(vertex.into(), 1)
    }

    fn transfer(&mut self, id: VertexId, delta: i64) -> Result<(), GraphError> {
        let pos = self.position(id).ok_or(GraphError::VertexNotFound(id))?;
        let neighbors: Vec<VertexId> = self.vertices[pos].adjacent_ids().collect();
        for neighbor in neighbors {
            if let Some(idx) = self.position(neighbor) {
                self.vertices[pos].shift_value(delta);
                self.vertices[idx].shift_value(-delta);
            }
        }
        Ok(())
    }

    /// Smallest vertex degree, or `None` for an empty graph.
    pub fn find_min_degree(&self) -> Option<usize> {
        self.vertices.iter().map(Vertex::degree).min()
    }

    /// Largest vertex degree; `0` for an empty graph.
    pub fn find_max_degree(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).max().unwrap_or(0)
    }

    /// Computes basic graph statistics.
    pub fn statistics(&self) -> GraphStatistics {
        let vertex_count = self.vertex_count();
        let edge_count = self.edge_count();
        GraphStatistics {
            vertex_count,
            edge_count,
            min_degree: self.find_min_degree(),
            max_degree: self.find_max_degree(),
            average_degree: if vertex_count == 0 {
                0.0
            } else {
                (2 * edge_count) as f64 / vertex_count as f64
            },
        }
    }

    /// Shortest path between two vertices using [`Dijkstra`].
    pub fn shortest_path(&self, source: impl Into<VertexId>, dest: impl Into<VertexId>) -> ShortestPath {
        Dijkstra::new().shortest_path(self, source.into(), dest.into())
    }

    /// Re-derives the edge index from per-vertex adjacency and checks every invariant.
    pub fn is_consistent(&self) -> bool {
        let mut ids = HashSet::with_capacity(self.vertices.len());
        if !self.vertices.iter().all(|v| ids.insert(v.id()) && v.is_in_sync()) {
            return false;
        }

        let mut derived = BTreeMap::new();
        for vertex in &self.vertices {
            for (neighbor, weight) in vertex.neighbors() {
                let mirrored = self
                    .find_vertex(neighbor)
                    .and_then(|other| other.weight(vertex.id()));
                if neighbor == vertex.id() || mirrored != Some(weight) {
                    return false;
                }
                derived.insert(EdgeKey::new(vertex.id(), neighbor), weight);
            }
        }
        derived == self.weights
    }

    /// Position of `id` in the vertex list.
    #[inline]
    pub(crate) fn position(&self, id: VertexId) -> Option<usize> {
        self.vertices.iter().position(|v| v.id() == id)
    }

    #[inline]
    pub(crate) fn vertex_at(&self, pos: usize) -> &Vertex {
        &self.vertices[pos]
    }

    /// Two distinct vertices borrowed mutably at once.
    fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Vertex, &mut Vertex) {
        debug_assert_ne!(i, j, "pair_mut needs two distinct positions");
        if i < j {
            let (left, right) = self.vertices.split_at_mut(j);
            (&mut left[i], &mut right[0])
        } else {
            let (left, right) = self.vertices.split_at_mut(i);
            (&mut right[0], &mut left[j])
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.vertices {
            writeln!(f, "Vertex {}: ({}, {})", vertex.id(), vertex.x(), vertex.y())?;
        }
        for (key, weight) in &self.weights {
            writeln!(f, "Edge ({key}) weight = {weight}")?;
        }
        Ok(())
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Minimum degree, `None` when the graph is empty.
    pub min_degree: Option<usize>,
    /// Maximum degree, `0` when the graph is empty.
    pub max_degree: usize,
    /// Average degree \(= 2m/n\).
    pub average_degree: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> VertexId {
        VertexId::new(n)
    }

    fn path_graph(n: u64) -> Graph {
        let mut graph = Graph::new();
        graph
            .add_vertices((1..=n).map(|i| Vertex::new(i, 0, i as i64, 0)))
            .unwrap();
        for i in 1..n {
            assert!(graph.create_edge(id(i), id(i + 1), i));
        }
        graph
    }

    #[test]
    fn add_vertices_preserves_order() {
        let graph = path_graph(4);
        let ids: Vec<u64> = graph.vertices().map(|v| v.id().as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.is_consistent());
    }

    #[test]
    fn add_vertices_rejects_duplicate_atomically() {
        let mut graph = path_graph(2);
        let err = graph
            .add_vertices([Vertex::new(10, 0, 0, 0), Vertex::new(2, 0, 0, 0)])
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(id(2)));
        assert!(!graph.contains_vertex(id(10)));
        assert_eq!(graph.vertex_count(), 2);

        let err = graph
            .add_vertices([Vertex::new(11, 0, 0, 0), Vertex::new(11, 0, 0, 0)])
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(id(11)));
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn add_vertices_rejects_dangling_links() {
        let mut graph = Graph::new();
        let mut a = Vertex::new(1, 0, 0, 0);
        let mut outside = Vertex::new(2, 0, 0, 0);
        a.add_adjacent(&mut outside, 3);

        let err = graph.add_vertices([a]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidVertex { id: v, .. } if v == id(1)));
        assert!(graph.is_empty());
    }

    #[test]
    fn add_vertices_indexes_prelinked_edges() {
        let mut graph = Graph::new();
        let mut a = Vertex::new(1, 0, 0, 0);
        let mut b = Vertex::new(2, 0, 0, 0);
        a.add_adjacent(&mut b, 9);

        graph.add_vertices([a, b]).unwrap();
        assert_eq!(graph.get_weight(id(2), id(1)), Ok(9));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.is_consistent());
    }

    #[test]
    fn add_vertex_assigns_fresh_ids() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(0, 0, 0).unwrap();
        let b = graph.add_vertex(0, 0, 0).unwrap();
        assert_ne!(a, b);

        graph.add_vertices([Vertex::new(100, 0, 0, 0)]).unwrap();
        let c = graph.add_vertex(0, 0, 0).unwrap();
        assert!(c.as_u64() > 100);
        assert_eq!(graph.vertex_count(), 4);
    }

    #[test]
    fn add_vertex_refuses_once_max_id_is_taken() {
        let mut graph = Graph::new();
        graph.add_vertices([Vertex::new(u64::MAX, 0, 0, 0)]).unwrap();

        assert_eq!(graph.add_vertex(0, 0, 0), Err(GraphError::IdSpaceExhausted));
        assert_eq!(graph.vertex_count(), 1);
        assert!(graph.is_consistent());

        // Removing the vertex does not make the counter reuse its id.
        assert!(graph.remove_vertex(id(u64::MAX)));
        assert_eq!(graph.add_vertex(0, 0, 0), Err(GraphError::IdSpaceExhausted));
        graph.add_vertices([Vertex::new(3, 0, 0, 0)]).unwrap();
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn add_vertex_hands_out_last_id_once() {
        let mut graph = Graph::new();
        graph.add_vertices([Vertex::new(u64::MAX - 1, 0, 0, 0)]).unwrap();

        assert_eq!(graph.add_vertex(0, 0, 0), Ok(id(u64::MAX)));
        assert_eq!(graph.add_vertex(0, 0, 0), Err(GraphError::IdSpaceExhausted));
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn add_vertices_reports_duplicate_before_bad_link() {
        let mut graph = path_graph(1);
        let mut clash = Vertex::new(1, 0, 0, 0);
        let mut outside = Vertex::new(9, 0, 0, 0);
        clash.add_adjacent(&mut outside, 4);

        let err = graph.add_vertices([clash]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(id(1)));
        assert_eq!(graph.vertex_count(), 1);
        assert!(graph.is_consistent());
    }

    #[test]
    fn remove_vertex_scrubs_neighbors() {
        let mut graph = path_graph(3);
        assert!(graph.remove_vertex(id(2)));
        assert!(!graph.contains_vertex(id(2)));
        for vertex in graph.vertices() {
            assert!(!vertex.is_adjacent(id(2)));
        }
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_consistent());

        assert!(!graph.remove_vertex(id(2)));
    }

    #[test]
    fn remove_vertex_by_handle() {
        let mut graph = path_graph(3);
        let handle = graph.find_vertex(id(3)).unwrap().clone();
        assert!(graph.remove_vertex(&handle));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn create_edge_requires_members() {
        let mut graph = path_graph(2);
        assert!(!graph.create_edge(id(1), id(99), 1));
        assert!(!graph.create_edge(id(1), id(1), 1));
        assert!(!graph.create_edge(id(2), id(1), 50));
        assert_eq!(graph.get_weight(id(1), id(2)), Ok(1));
    }

    #[test]
    fn edge_round_trip() {
        let mut graph = path_graph(2);
        graph.add_vertices([Vertex::new(3, 0, 0, 0)]).unwrap();

        assert!(graph.create_edge(id(3), id(1), 4));
        assert!(graph.are_adjacent(id(1), id(3)));
        assert!(graph.remove_edge(id(1), id(3)));
        assert!(!graph.are_adjacent(id(1), id(3)));
        assert!(!graph.edges().any(|(key, _)| key == EdgeKey::new(id(1), id(3))));
        assert!(!graph.remove_edge(id(1), id(3)));
        assert!(graph.is_consistent());
    }

    #[test]
    fn get_weight_errors() {
        let mut graph = path_graph(2);
        graph.add_vertices([Vertex::new(3, 0, 0, 0)]).unwrap();

        assert_eq!(graph.get_weight(id(1), id(7)), Err(GraphError::VertexNotFound(id(7))));
        assert_eq!(graph.get_weight(id(7), id(1)), Err(GraphError::VertexNotFound(id(7))));
        assert_eq!(graph.get_weight(id(1), id(3)), Err(GraphError::NotAdjacent(id(1), id(3))));
        assert!(!graph.are_adjacent(id(1), id(7)));
    }

    #[test]
    fn coordinates_lookup() {
        let graph = path_graph(3);
        assert_eq!(graph.get_coordinates(id(3)), Ok((3, 0)));
        assert_eq!(graph.get_coordinates(id(4)), Err(GraphError::VertexNotFound(id(4))));
    }

    #[test]
    fn degree_extremes() {
        let mut graph = Graph::new();
        assert_eq!(graph.find_min_degree(), None);
        assert_eq!(graph.find_max_degree(), 0);

        graph
            .add_vertices((1..=5).map(|i| Vertex::new(i, 0, 0, 0)))
            .unwrap();
        // degrees: 1 -> 3, 2 -> 2, 3 -> 2, 4 -> 1, 5 -> 0
        graph.create_edge(id(1), id(2), 1);
        graph.create_edge(id(1), id(3), 1);
        graph.create_edge(id(1), id(4), 1);
        graph.create_edge(id(2), id(3), 1);

        assert_eq!(graph.find_min_degree(), Some(0));
        assert_eq!(graph.find_max_degree(), 3);

        let stats = graph.statistics();
        assert_eq!(stats.vertex_count, 5);
        assert_eq!(stats.edge_count, 4);
        assert!((stats.average_degree - 1.6).abs() < 0.001);
    }

    #[test]
    fn give_then_take_restores_values() {
        let mut graph = path_graph(3);
        graph.set_value(id(2), 10).unwrap();

        graph.give(id(2)).unwrap();
        let values: Vec<i64> = graph.vertices().map(Vertex::value).collect();
        assert_eq!(values, vec![1, 8, 1]);

        graph.take(id(2)).unwrap();
        let values: Vec<i64> = graph.vertices().map(Vertex::value).collect();
        assert_eq!(values, vec![0, 10, 0]);

        assert_eq!(graph.give(id(9)), Err(GraphError::VertexNotFound(id(9))));
    }

    #[test]
    fn display_lists_vertices_and_edges() {
        let graph = path_graph(2);
        assert_eq!(graph.to_string(), "Vertex 1: (1, 0)\nVertex 2: (2, 0)\nEdge (1 - 2) weight = 1\n");
    }
}
