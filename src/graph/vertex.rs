//! Graph vertices.
//!
//! A [`Vertex`] carries an id, a mutable integer value, display coordinates
//! and its side of every incident edge. Neighbors are referenced by
//! [`VertexId`] rather than by pointer, so two adjacent vertices never own
//! each other; the owning [`Graph`](super::Graph) resolves ids when it needs
//! the neighbor itself.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::HashMap;

use super::id::VertexId;

/// Edge weight. Unsigned, so every weight satisfies Dijkstra's precondition.
pub type Weight = u64;

/// A vertex of an undirected weighted graph.
///
/// `adjacent` and `weights` are kept in sync: a neighbor id is a key of
/// `weights` iff it appears in `adjacent`. Edges are stored on both
/// endpoints with the same weight.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    value: i64,
    x: i64,
    y: i64,
    /// Neighbor ids in edge-creation order.
    adjacent: Vec<VertexId>,
    weights: HashMap<VertexId, Weight>,
}

impl Vertex {
    /// Creates an isolated vertex.
    pub fn new(id: u64, value: i64, x: i64, y: i64) -> Self {
        Self {
            id: VertexId::new(id),
            value,
            x,
            y,
            adjacent: Vec::new(),
            weights: HashMap::new(),
        }
    }

    /// Returns the id of this vertex.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns the current value.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Overwrites the current value.
    #[inline]
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// Horizontal display coordinate.
    #[inline]
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Vertical display coordinate.
    #[inline]
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Returns `(x, y)`.
    #[inline]
    pub fn coordinates(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Number of incident edges.
    #[inline]
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }

    /// Ids of the adjacent vertices, in the order the edges were created.
    pub fn adjacent_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacent.iter().copied()
    }

    /// `(neighbor, weight)` pairs, in the order the edges were created.
    pub fn neighbors(&self) -> impl Iterator<Item = (VertexId, Weight)> + '_ {
        self.adjacent
            .iter()
            .filter_map(move |id| self.weights.get(id).map(|weight| (*id, *weight)))
    }

    /// Creates an undirected edge between `self` and `other`.
    ///
    /// Returns `false` without touching either vertex if `other` has the
    /// same id as `self` or is already adjacent.
    pub fn add_adjacent(&mut self, other: &mut Vertex, weight: Weight) -> bool {
        if self.id == other.id || self.weights.contains_key(&other.id) {
            return false;
        }
        self.attach(other.id, weight);
        other.attach(self.id, weight);
        true
    }

    /// Removes the edge between `self` and `other` from both endpoints.
    ///
    /// Returns `false` if they are not adjacent.
    pub fn delete_adjacent(&mut self, other: &mut Vertex) -> bool {
        if !self.is_adjacent(&*other) {
            return false;
        }
        self.detach(other.id);
        other.detach(self.id);
        true
    }

    /// Returns `true` if an edge connects `self` to `other`.
    #[inline]
    pub fn is_adjacent(&self, other: impl Into<VertexId>) -> bool {
        self.weights.contains_key(&other.into())
    }

    /// Weight of the edge to `other`, or `None` if there is no such edge.
    #[inline]
    pub fn weight(&self, other: impl Into<VertexId>) -> Option<Weight> {
        self.weights.get(&other.into()).copied()
    }

    /// Records one side of an edge. The caller upholds symmetry.
    pub(crate) fn attach(&mut self, neighbor: VertexId, weight: Weight) {
        self.adjacent.push(neighbor);
        self.weights.insert(neighbor, weight);
    }

    /// Drops one side of an edge, returning its weight if it existed.
    pub(crate) fn detach(&mut self, neighbor: VertexId) -> Option<Weight> {
        let weight = self.weights.remove(&neighbor)?;
        self.adjacent.retain(|id| *id != neighbor);
        Some(weight)
    }

    /// Adds `amount` (possibly negative) to the value.
    #[inline]
    pub(crate) fn shift_value(&mut self, amount: i64) {
        self.value = self.value.wrapping_add(amount);
    }

    /// `adjacent` and `weights` describe the same neighbor set.
    pub(crate) fn is_in_sync(&self) -> bool {
        self.adjacent.len() == self.weights.len()
            && self.adjacent.iter().all(|id| self.weights.contains_key(id))
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coordinates: ({}, {})", self.x, self.y)?;
        writeln!(f, "Value: {}", self.value)?;
        for (id, weight) in self.neighbors() {
            writeln!(f, "Adjacent: {id} - {weight}")?;
        }
        Ok(())
    }
}
