use crate::error::VertexGameError;
use crate::graph::GraphState;
use crate::order::{EliminationOrder, EliminationRun};
use alloc::vec::Vec;

/// Eliminates intermediate vertices in ascending order
pub fn forward(graph: GraphState) -> Result<EliminationRun, VertexGameError> {
    let order: Vec<usize> = graph.active_vertices().collect();
    let run = apply(order.iter().copied(), graph)?;
    tracing::debug!(cost = run.cost, "forward");
    Ok(run)
}

/// Eliminates intermediate vertices in descending order
pub fn reverse(graph: GraphState) -> Result<EliminationRun, VertexGameError> {
    let order: Vec<usize> = graph.active_vertices().collect();
    let run = apply(order.iter().rev().copied(), graph)?;
    tracing::debug!(cost = run.cost, "reverse");
    Ok(run)
}

/// Eliminates vertices in the given order. The order does not need to be
/// complete, the returned graph then still contains intermediate vertices.
/// Fails on the first vertex that can not be eliminated, for example
/// when the order repeats a vertex.
pub fn cross_country(
    order: &EliminationOrder,
    graph: GraphState,
) -> Result<EliminationRun, VertexGameError> {
    let run = apply(order.iter().copied(), graph)?;
    tracing::debug!(%order, cost = run.cost, "cross-country");
    Ok(run)
}

fn apply(
    order: impl IntoIterator<Item = usize>,
    graph: GraphState,
) -> Result<EliminationRun, VertexGameError> {
    graph.check_layout()?;
    let mut run = EliminationRun::new(graph);
    for vertex in order {
        run.eliminate(vertex)?;
    }
    Ok(run)
}

/// Result of a single elimination step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Graph after the step
    pub graph: GraphState,
    /// Multiplications of the step
    pub cost: u64,
    /// No intermediate vertex is left
    pub done: bool,
}

/// Eliminates one vertex and reports its cost, `graph` is not modified.
pub fn step(graph: &GraphState, vertex: usize) -> Result<Step, VertexGameError> {
    let (graph, cost) = graph.eliminate(vertex)?;
    let done = graph.is_fully_eliminated();
    Ok(Step { graph, cost, done })
}
