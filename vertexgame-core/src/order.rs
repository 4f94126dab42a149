use crate::error::VertexGameError;
use crate::graph::GraphState;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

/// Sequence of vertices in the order in which they are eliminated
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EliminationOrder(Vec<usize>);

impl EliminationOrder {
    /// Empty order
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append vertex
    pub fn push(&mut self, vertex: usize) {
        self.0.push(vertex);
    }

    /// Number of vertices in the order
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Order without any vertex
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Vertices as slice
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Iterate over vertices
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    /// Order eliminates every intermediate vertex of a graph exactly once
    #[must_use]
    pub fn is_complete_for(&self, graph: &GraphState) -> bool {
        let mut seen = alloc::vec![false; graph.num_vertices()];
        for &v in &self.0 {
            if !graph.is_active(v) || seen[v - 1] {
                return false;
            }
            seen[v - 1] = true;
        }
        self.0.len() == graph.active_vertices().count()
    }
}

impl From<Vec<usize>> for EliminationOrder {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<[usize; N]> for EliminationOrder {
    fn from(value: [usize; N]) -> Self {
        Self(value.into())
    }
}

impl From<EliminationOrder> for Vec<usize> {
    fn from(value: EliminationOrder) -> Self {
        value.0
    }
}

impl FromIterator<usize> for EliminationOrder {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EliminationOrder {
    type Item = &'a usize;
    type IntoIter = core::slice::Iter<'a, usize>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[usize]> for EliminationOrder {
    fn eq(&self, other: &[usize]) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<[usize; N]> for EliminationOrder {
    fn eq(&self, other: &[usize; N]) -> bool {
        self.0 == other
    }
}

impl Display for EliminationOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{:?}", self.0))
    }
}

/// Graph after a sequence of eliminations together with the order
/// and the cost of each step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliminationRun {
    /// Graph after the last elimination
    pub graph: GraphState,
    /// Eliminated vertices
    pub order: EliminationOrder,
    /// Multiplications of each elimination, in order
    pub step_costs: Vec<u64>,
    /// Total number of multiplications
    pub cost: u64,
}

impl EliminationRun {
    /// Run that did not eliminate anything yet
    #[must_use]
    pub const fn new(graph: GraphState) -> Self {
        Self {
            graph,
            order: EliminationOrder::new(),
            step_costs: Vec::new(),
            cost: 0,
        }
    }

    /// Eliminates vertex, returns the cost of this step.
    /// On error, including a total cost that would overflow `u64`,
    /// the run stays unchanged.
    pub fn eliminate(&mut self, vertex: usize) -> Result<u64, VertexGameError> {
        let cost = self.graph.eliminate_within(vertex, u64::MAX - self.cost)?;
        self.order.push(vertex);
        self.step_costs.push(cost);
        self.cost += cost;
        Ok(cost)
    }

    /// Running total after each step
    pub fn cumulative_costs(&self) -> impl Iterator<Item = u64> + '_ {
        self.step_costs.iter().scan(0, |acc, &c| {
            *acc += c;
            Some(*acc)
        })
    }

    /// All intermediate vertices of the graph were eliminated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.graph.is_fully_eliminated()
    }
}
