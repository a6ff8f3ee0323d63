//! Error type for graph operations.

use core::fmt;

use super::id::VertexId;

/// The error type for graph lookups and batch insertion.
///
/// Mutations that the caller is expected to retry (edge creation, vertex
/// removal) report failure as `false` instead; this type covers the cases
/// where the caller needs to know *why* an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex offered for insertion is not well formed.
    InvalidVertex {
        /// Id of the offending vertex.
        id: VertexId,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A vertex with this id already exists (in the graph or earlier in the batch).
    DuplicateId(VertexId),
    /// No vertex with this id is present in the graph.
    VertexNotFound(VertexId),
    /// Both vertices exist but no edge connects them.
    NotAdjacent(VertexId, VertexId),
    /// Every id up to `u64::MAX` has been handed out; no fresh id remains.
    IdSpaceExhausted,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVertex { id, reason } => write!(f, "vertex {id} is invalid: {reason}"),
            Self::DuplicateId(id) => write!(f, "a vertex already exists with the id {id}"),
            Self::VertexNotFound(id) => write!(f, "vertex {id} is not in the graph"),
            Self::NotAdjacent(a, b) => write!(f, "vertices {a} and {b} are not adjacent"),
            Self::IdSpaceExhausted => write!(f, "no unused vertex id is left"),
        }
    }
}

impl std::error::Error for GraphError {}
