use crate::Cpu;
use rayon::prelude::*;
use vertexgame_core::{
    cross_country, forward, markowitz_degrees, minimal_markowitz, reverse, step, EliminationOrder,
    EliminationRun, GraphState, Step, VertexGameError,
};

/// Costs of the three baseline strategies on one graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baselines {
    /// Cost of forward mode
    pub forward: u64,
    /// Cost of reverse mode
    pub reverse: u64,
    /// Cost of the minimal Markowitz order
    pub minimal_markowitz: u64,
    /// The minimal Markowitz order
    pub order: EliminationOrder,
}

impl Baselines {
    fn compute(graph: GraphState, preeliminate: bool) -> Result<Baselines, VertexGameError> {
        let fwd = forward(graph.clone())?;
        let rev = reverse(graph.clone())?;
        let mm = minimal_markowitz(graph, preeliminate)?;
        Ok(Baselines {
            forward: fwd.cost,
            reverse: rev.cost,
            minimal_markowitz: mm.cost,
            order: mm.order,
        })
    }
}

impl Cpu {
    /// Cost of each order applied to the same graph. Orders may be partial,
    /// an invalid order yields its error without affecting the others.
    pub fn evaluate_orders(
        &self,
        graph: &GraphState,
        orders: &[EliminationOrder],
    ) -> Vec<Result<u64, VertexGameError>> {
        self.pool.install(|| {
            orders
                .par_iter()
                .map(|order| cross_country(order, graph.clone()).map(|run| run.cost))
                .collect()
        })
    }

    /// One elimination step per (graph, vertex) pair
    pub fn step(&self, batch: Vec<(GraphState, usize)>) -> Vec<Result<Step, VertexGameError>> {
        self.pool.install(|| {
            batch
                .into_par_iter()
                .map(|(graph, vertex)| step(&graph, vertex))
                .collect()
        })
    }

    /// Minimal Markowitz run for each graph
    pub fn minimal_markowitz(
        &self,
        graphs: Vec<GraphState>,
        preeliminate: bool,
    ) -> Result<Vec<EliminationRun>, VertexGameError> {
        self.pool.install(|| {
            graphs
                .into_par_iter()
                .map(|graph| minimal_markowitz(graph, preeliminate))
                .collect()
        })
    }

    /// Markowitz degrees of each graph
    #[must_use]
    pub fn markowitz_degrees(&self, graphs: &[GraphState]) -> Vec<Vec<i64>> {
        self.pool.install(|| graphs.par_iter().map(markowitz_degrees).collect())
    }

    /// Forward, reverse and minimal Markowitz costs of each graph
    pub fn baselines(
        &self,
        graphs: Vec<GraphState>,
        preeliminate: bool,
    ) -> Result<Vec<Baselines>, VertexGameError> {
        let n = graphs.len();
        let res: Result<Vec<Baselines>, VertexGameError> = self.pool.install(|| {
            graphs
                .into_par_iter()
                .map(|graph| Baselines::compute(graph, preeliminate))
                .collect()
        });
        tracing::debug!(graphs = n, "evaluated baselines");
        res
    }
}
