//! Vertex elimination operator.

use crate::error::VertexGameError;
use crate::graph::{GraphState, Node};
use crate::sparsity::Edge;
use alloc::vec::Vec;

impl GraphState {
    /// Eliminates vertex, returning the new graph and the number of
    /// multiplications. `self` is not modified, also when the elimination fails.
    pub fn eliminate(&self, vertex: usize) -> Result<(GraphState, u64), VertexGameError> {
        let mut graph = self.clone();
        let cost = graph.eliminate_in_place(vertex)?;
        Ok((graph, cost))
    }

    /// Eliminates vertex in place, returns number of multiplications.
    ///
    /// Every predecessor `p` of the vertex gets connected to every successor `s`
    /// with the composition of `p -> vertex` and `vertex -> s`, summed
    /// into already existing `p -> s` edges. All edges of the vertex are removed.
    /// All fill-in edges are computed before anything is written, on error
    /// the graph stays as it was. Fails with [`VertexGameError::MalformedGraph`]
    /// if the number of multiplications does not fit into `u64`.
    pub fn eliminate_in_place(&mut self, vertex: usize) -> Result<u64, VertexGameError> {
        self.eliminate_within(vertex, u64::MAX)
    }

    /// Like [`GraphState::eliminate_in_place`], but also fails without
    /// touching the graph when the cost exceeds `budget`.
    pub(crate) fn eliminate_within(
        &mut self,
        vertex: usize,
        budget: u64,
    ) -> Result<u64, VertexGameError> {
        self.check_layout()?;
        self.check_eliminable(vertex)?;

        let preds: Vec<(Node, Edge)> = self.predecessors(vertex).map(|(n, e)| (n, *e)).collect();
        let succs: Vec<(usize, Edge)> = self.successors(vertex).map(|(s, e)| (s, *e)).collect();

        let mut cost: u64 = 0;
        let mut fill_in = Vec::with_capacity(preds.len() * succs.len());
        for &(pred, incoming) in &preds {
            for &(succ, outgoing) in &succs {
                cost = incoming
                    .in_multiplicity()
                    .checked_mul(outgoing.out_multiplicity())
                    .and_then(|c| cost.checked_add(c))
                    .ok_or_else(|| {
                        VertexGameError::malformed(alloc::format!(
                            "cost of eliminating v{vertex} overflows u64"
                        ))
                    })?;
                let composed = incoming.compose(&outgoing);
                let edge = match self.edge(pred, succ) {
                    Some(existing) => existing.accumulate(&composed)?,
                    None => composed,
                };
                tracing::trace!(%pred, succ, sparsity = %edge.sparsity(), "fill-in edge");
                fill_in.push((pred, succ, edge));
            }
        }

        if cost > budget {
            return Err(VertexGameError::malformed(alloc::format!(
                "cost {cost} of eliminating v{vertex} overflows the accumulated cost"
            )));
        }

        for (pred, succ, edge) in fill_in {
            self.set_edge(pred, succ, Some(edge));
        }
        for (pred, _) in preds {
            self.set_edge(pred, vertex, None);
        }
        for (succ, _) in succs {
            self.set_edge(Node::Vertex(vertex), succ, None);
        }
        self.set_eliminated(vertex);
        tracing::debug!(vertex, cost, "eliminated vertex");
        Ok(cost)
    }
}
