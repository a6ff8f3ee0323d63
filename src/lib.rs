//! # `pathgraph` - Weighted Graphs and Shortest Paths
//!
//! A small core for interactively drawn graphs: vertices carrying an integer
//! value and display coordinates, undirected edges with non-negative integer
//! weights, and Dijkstra's shortest-path search between two vertices.
//!
//! ## Design
//!
//! - **Arena ownership**: the [`Graph`] owns every [`Vertex`]; vertices refer
//!   to their neighbors by [`VertexId`], so there are no reference cycles.
//! - **Symmetric adjacency**: each edge is stored on both endpoints with the
//!   same weight, and the graph keeps an edge index keyed by the sorted id
//!   pair. [`Graph::is_consistent`] checks both.
//! - **Static id resolution**: operations take `impl Into<VertexId>`, so a
//!   caller can pass a raw `u64`, a `VertexId` or a `&Vertex`.
//! - **Recoverable failures**: lookups return [`GraphError`], mutations
//!   return `bool`, and "no path" is an empty [`ShortestPath`].
//!
//! The graph is plain data and is not internally synchronized. A caller that
//! shares it between threads must hold one exclusive lock across any
//! mutation and across any search.
//!
//! ## Example
//!
//! ```rust
//! use pathgraph::{Graph, Vertex, VertexId};
//!
//! let mut graph = Graph::new();
//! graph
//!     .add_vertices((1..=5u64).map(|id| Vertex::new(id, 0, 0, 0)))
//!     .unwrap();
//! for (a, b, w) in [(1u64, 2u64, 6), (1, 3, 300), (1, 4, 150), (2, 3, 30), (3, 5, 40), (4, 5, 10)] {
//!     graph.create_edge(a, b, w);
//! }
//!
//! let path = graph.shortest_path(1u64, 5u64);
//! assert_eq!(path.vertices, [1, 2, 3, 5].map(VertexId::new));
//! assert_eq!(path.distance, Some(76));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod graph;

pub use graph::{
    Dijkstra,
    EdgeKey,
    Graph,
    GraphError,
    GraphStatistics,
    PathFinder,
    ShortestPath,
    Vertex,
    VertexId,
    Weight,
};

// Compile-time assertions for memory layout.
const _: () = {
    use core::mem;

    // `VertexId` is `repr(transparent)` over `u64`.
    assert!(mem::size_of::<VertexId>() == mem::size_of::<u64>());
    assert!(mem::align_of::<VertexId>() == mem::align_of::<u64>());
};
