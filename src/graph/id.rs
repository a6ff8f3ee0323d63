//! Identifier types for vertices and edges.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::vertex::Vertex;

/// Unique identifier of a vertex.
///
/// Ids are the only identity key of a vertex: value and coordinates never
/// take part in equality. Every graph operation that addresses a vertex
/// takes `impl Into<VertexId>`, so callers may pass either a raw `u64`,
/// a `VertexId`, or a `&Vertex`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VertexId(pub u64);

impl VertexId {
    /// Creates a new id from a raw value.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<VertexId> for u64 {
    fn from(id: VertexId) -> Self {
        id.0
    }
}

impl From<&Vertex> for VertexId {
    fn from(vertex: &Vertex) -> Self {
        vertex.id()
    }
}

impl From<&VertexId> for VertexId {
    fn from(id: &VertexId) -> Self {
        *id
    }
}

/// Canonical key of an undirected edge.
///
/// The two endpoints are stored sorted, so `(a, b)` and `(b, a)` map to the
/// same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: VertexId,
    high: VertexId,
}

impl EdgeKey {
    /// Builds the canonical key for the edge between `a` and `b`.
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns both endpoints, smaller id first.
    #[inline]
    pub fn endpoints(self) -> (VertexId, VertexId) {
        (self.low, self.high)
    }

    /// Returns `true` if `id` is one of the endpoints.
    #[inline]
    pub fn touches(self, id: VertexId) -> bool {
        self.low == id || self.high == id
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.low, self.high)
    }
}
