#![no_std]
//! # vertexgame-core
//!
//! vertexgame-core is the core part of the vertex elimination game.
//! It contains the graph state of a computational graph with tensor valued,
//! sparsity tagged edges, the single vertex elimination operator, the
//! Markowitz degree calculator and the order builders (forward, reverse,
//! cross-country and minimal Markowitz) used to accumulate Jacobians
//! with as few multiplications as possible.
//!
//! ```rust
//! use vertexgame_core::{Edge, GraphState, Node, forward, minimal_markowitz};
//!
//! // x -> v1 -> v2 -> y
//! let mut graph = GraphState::new(1, 2, 1);
//! graph.add_edge(Node::Input(1), 1, Edge::scalar())?;
//! graph.add_edge(Node::Vertex(1), 2, Edge::scalar())?;
//! graph.add_edge(Node::Vertex(2), 3, Edge::scalar())?;
//!
//! let fwd = forward(graph.clone())?;
//! let mm = minimal_markowitz(graph, true)?;
//! assert_eq!(fwd.cost, mm.cost);
//! # Ok::<(), vertexgame_core::VertexGameError>(())
//! ```
#![forbid(unsafe_code)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![forbid(rustdoc::private_intra_doc_links)]
#![forbid(missing_docs)]
#![forbid(rustdoc::missing_crate_level_docs)]
#![forbid(rustdoc::private_doc_tests)]
#![forbid(rustdoc::invalid_codeblock_attributes)]
#![forbid(rustdoc::invalid_html_tags)]
#![forbid(rustdoc::invalid_rust_codeblocks)]
#![forbid(rustdoc::bare_urls)]
#![forbid(rustdoc::unescaped_backticks)]
#![forbid(rustdoc::redundant_explicit_links)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod dot;
mod eliminate;
/// See [VertexGameError](error::VertexGameError)
pub mod error;
/// See [GraphState](graph::GraphState)
pub mod graph;
/// Markowitz degrees and the minimal Markowitz order builder
pub mod markowitz;
/// See [EliminationOrder](order::EliminationOrder)
pub mod order;
/// Random computational graphs for tests and benchmarks
pub mod random;
/// See [RawGraph](raw::RawGraph)
pub mod raw;
/// See [Sparsity](sparsity::Sparsity)
pub mod sparsity;
/// Forward, reverse and cross-country elimination
pub mod strategies;

pub use error::{InvalidVertexReason, VertexGameError};
pub use graph::{GraphState, Node};
pub use markowitz::{
    markowitz_degree, markowitz_degrees, minimal_markowitz, minimal_markowitz_vertex,
    safe_preeliminations, ELIMINATED,
};
pub use order::{EliminationOrder, EliminationRun};
pub use random::RandomGraphBuilder;
pub use raw::RawGraph;
pub use sparsity::{AxisPair, Edge, EdgeShape, MatrixPairing, Sparsity};
pub use strategies::{cross_country, forward, reverse, step, Step};
