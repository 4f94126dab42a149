use crate::error::{InvalidVertexReason, VertexGameError};
use crate::graph::GraphState;
use crate::order::EliminationRun;
use alloc::vec::Vec;

/// Degree reported for eliminated and output vertices, never selected.
pub const ELIMINATED: i64 = -1;

/// Markowitz degree of a single component of a tensor vertex,
/// the product of effective incoming and outgoing edge counts.
/// Returns [`ELIMINATED`] for eliminated and output vertices,
/// degrees beyond `i64::MAX` are clamped to it.
pub fn markowitz_degree(graph: &GraphState, vertex: usize) -> Result<i64, VertexGameError> {
    let num_vertices = graph.num_vertices();
    if !(1..=num_vertices).contains(&vertex) {
        return Err(VertexGameError::invalid_vertex(
            vertex,
            InvalidVertexReason::OutOfRange { num_vertices },
        ));
    }
    if !graph.is_active(vertex) {
        return Ok(ELIMINATED);
    }
    Ok(i64::try_from(degree(graph, vertex)).unwrap_or(i64::MAX))
}

/// Markowitz degrees of all vertices, index `i` belongs to vertex `i + 1`.
#[must_use]
pub fn markowitz_degrees(graph: &GraphState) -> Vec<i64> {
    (1..=graph.num_vertices())
        .map(|v| {
            if graph.is_active(v) {
                i64::try_from(degree(graph, v)).unwrap_or(i64::MAX)
            } else {
                ELIMINATED
            }
        })
        .collect()
}

// Saturates at u64::MAX, such vertices still rank last.
fn degree(graph: &GraphState, vertex: usize) -> u64 {
    let incoming = graph
        .predecessors(vertex)
        .fold(0u64, |acc, (_, e)| acc.saturating_add(e.in_multiplicity()));
    let outgoing = graph
        .successors(vertex)
        .fold(0u64, |acc, (_, e)| acc.saturating_add(e.out_multiplicity()));
    incoming.saturating_mul(outgoing)
}

/// Active vertex with the smallest Markowitz degree as `(degree, vertex)`,
/// ties go to the lower vertex id. `None` if nothing is left to eliminate.
#[must_use]
pub fn minimal_markowitz_vertex(graph: &GraphState) -> Option<(u64, usize)> {
    graph
        .active_vertices()
        .map(|v| (degree(graph, v), v))
        .min()
}

/// Eliminates vertices while the minimal Markowitz degree is 0 or 1.
pub fn safe_preeliminations(graph: GraphState) -> Result<EliminationRun, VertexGameError> {
    graph.check_layout()?;
    let mut run = EliminationRun::new(graph);
    eliminate_cheap(&mut run)?;
    Ok(run)
}

fn eliminate_cheap(run: &mut EliminationRun) -> Result<(), VertexGameError> {
    while let Some((degree, vertex)) = minimal_markowitz_vertex(&run.graph) {
        if degree > 1 {
            break;
        }
        run.eliminate(vertex)?;
    }
    tracing::debug!(preeliminated = run.order.len(), cost = run.cost, "safe preeliminations");
    Ok(())
}

/// Greedy minimal Markowitz order. With `preeliminate`, vertices of degree 0 and 1
/// are eliminated first, then the vertex of minimal degree is eliminated
/// until no intermediate vertex remains.
pub fn minimal_markowitz(
    graph: GraphState,
    preeliminate: bool,
) -> Result<EliminationRun, VertexGameError> {
    graph.check_layout()?;
    let mut run = EliminationRun::new(graph);
    if preeliminate {
        eliminate_cheap(&mut run)?;
    }
    while let Some((_, vertex)) = minimal_markowitz_vertex(&run.graph) {
        run.eliminate(vertex)?;
    }
    tracing::debug!(order = %run.order, cost = run.cost, "minimal markowitz");
    Ok(run)
}
