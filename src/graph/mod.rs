//! Weighted undirected graphs and shortest-path search.
//!
//! - `id`: vertex identifiers and canonical edge keys
//! - `vertex`: vertices with a value, coordinates and weighted adjacency
//! - `weighted_graph`: the vertex arena and its mutation/query operations
//! - `shortest_path`: Dijkstra's algorithm over a [`Graph`]

pub mod error;
pub mod id;
pub mod shortest_path;
pub mod vertex;
pub mod weighted_graph;
pub(crate) mod access;

pub use error::GraphError;
pub use id::{EdgeKey, VertexId};
pub use shortest_path::{Dijkstra, PathFinder, ShortestPath};
pub use vertex::{Vertex, Weight};
pub use weighted_graph::{Graph, GraphStatistics};
