use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::{Display, Formatter};

/// Enumeration representing the errors that can occur while building,
/// decoding or eliminating a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VertexGameError {
    /// Elimination was requested on a vertex that can not be eliminated
    #[error("vertex {vertex} can not be eliminated, {reason}")]
    InvalidVertex {
        /// Requested vertex
        vertex: usize,
        /// Why the vertex was rejected
        reason: InvalidVertexReason,
    },
    /// Edge descriptor carries a sparsity tag outside of the known kinds
    #[error("unknown sparsity tag {tag} on edge at row {row}, column {col}")]
    InconsistentSparsity {
        /// The offending tag
        tag: i32,
        /// Row of the edge in the raw layout
        row: usize,
        /// Column of the edge in the raw layout
        col: usize,
    },
    /// Layout or shapes of the graph do not match its vertex counts
    #[error("malformed graph: {0}")]
    MalformedGraph(Box<str>),
}

/// Reason attached to [`VertexGameError::InvalidVertex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidVertexReason {
    /// Vertex id is zero or larger than the number of vertices
    OutOfRange {
        /// Number of non input vertices in the graph
        num_vertices: usize,
    },
    /// Vertex was eliminated before
    AlreadyEliminated,
    /// Output vertices are never eliminated
    Output,
}

impl Display for InvalidVertexReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidVertexReason::OutOfRange { num_vertices } => f.write_fmt(format_args!(
                "vertex ids are in range 1..={num_vertices}"
            )),
            InvalidVertexReason::AlreadyEliminated => f.write_str("it was already eliminated"),
            InvalidVertexReason::Output => f.write_str("it is an output vertex"),
        }
    }
}

impl VertexGameError {
    /// Malformed graph error, tagged with the location of the caller
    #[track_caller]
    pub fn malformed(e: impl Into<String>) -> Self {
        let location = core::panic::Location::caller();
        let mut e: String = e.into();
        e.push_str(&alloc::format!(
            ", {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
        Self::MalformedGraph(e.into())
    }

    pub(crate) const fn invalid_vertex(vertex: usize, reason: InvalidVertexReason) -> Self {
        Self::InvalidVertex { vertex, reason }
    }
}
