//! Graph state of a computational graph.

use crate::error::{InvalidVertexReason, VertexGameError};
use crate::sparsity::Edge;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

/// Source of an edge. Inputs and vertices are numbered from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// Independent input of the function
    Input(usize),
    /// Intermediate or output vertex
    Vertex(usize),
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Node::Input(i) => f.write_fmt(format_args!("x{i}")),
            Node::Vertex(v) => f.write_fmt(format_args!("v{v}")),
        }
    }
}

/// Computational graph with tensor valued edges and per vertex flags.
///
/// Vertices `1..=num_vertices()` are topologically numbered, every edge
/// between two vertices goes from the lower id to the higher one.
/// Edges of eliminated vertices are removed, so they never contribute
/// to degrees or fill-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphState {
    num_inputs: usize,
    num_intermediates: usize,
    num_outputs: usize,
    eliminated: Vec<bool>,
    outputs: Vec<bool>,
    // Row per source (inputs first, then vertices), column per target vertex
    edges: Vec<Option<Edge>>,
}

impl GraphState {
    /// Creates graph without edges. The last `num_outputs` vertices are outputs.
    #[must_use]
    pub fn new(num_inputs: usize, num_intermediates: usize, num_outputs: usize) -> GraphState {
        let num_vertices = num_intermediates + num_outputs;
        let mut outputs = vec![false; num_vertices];
        outputs[num_intermediates..].fill(true);
        GraphState {
            num_inputs,
            num_intermediates,
            num_outputs,
            eliminated: vec![false; num_vertices],
            outputs,
            edges: vec![None; (num_inputs + num_vertices) * num_vertices],
        }
    }

    /// Creates graph without edges and with explicit output flags
    #[must_use]
    pub fn with_outputs(num_inputs: usize, outputs: Vec<bool>) -> GraphState {
        let num_vertices = outputs.len();
        let num_outputs = outputs.iter().filter(|&&o| o).count();
        GraphState {
            num_inputs,
            num_intermediates: num_vertices - num_outputs,
            num_outputs,
            eliminated: vec![false; num_vertices],
            outputs,
            edges: vec![None; (num_inputs + num_vertices) * num_vertices],
        }
    }

    /// Number of inputs
    #[must_use]
    pub const fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of intermediate vertices
    #[must_use]
    pub const fn num_intermediates(&self) -> usize {
        self.num_intermediates
    }

    /// Number of output vertices
    #[must_use]
    pub const fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Number of intermediate and output vertices
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.num_intermediates + self.num_outputs
    }

    /// Was vertex eliminated? Returns false for ids out of range.
    #[must_use]
    pub fn is_eliminated(&self, vertex: usize) -> bool {
        self.flag(&self.eliminated, vertex)
    }

    /// Is vertex an output? Returns false for ids out of range.
    #[must_use]
    pub fn is_output(&self, vertex: usize) -> bool {
        self.flag(&self.outputs, vertex)
    }

    fn flag(&self, flags: &[bool], vertex: usize) -> bool {
        vertex
            .checked_sub(1)
            .and_then(|i| flags.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Vertex is neither eliminated nor an output
    #[must_use]
    pub fn is_active(&self, vertex: usize) -> bool {
        (1..=self.num_vertices()).contains(&vertex)
            && !self.is_eliminated(vertex)
            && !self.is_output(vertex)
    }

    /// Ids of all intermediate (non output) vertices in ascending order
    pub fn intermediates(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.num_vertices()).filter(|&v| !self.is_output(v))
    }

    /// Ids of intermediate vertices that can still be eliminated
    pub fn active_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.num_vertices()).filter(|&v| self.is_active(v))
    }

    /// Number of eliminated vertices
    #[must_use]
    pub fn num_eliminated(&self) -> usize {
        self.eliminated.iter().filter(|&&e| e).count()
    }

    /// All intermediate vertices were eliminated, remaining edges
    /// form the Jacobian between inputs and outputs.
    #[must_use]
    pub fn is_fully_eliminated(&self) -> bool {
        self.num_eliminated() == self.num_intermediates
    }

    /// Mask of actions that can not be taken, one entry per vertex.
    /// Eliminated and output vertices are masked.
    #[must_use]
    pub fn action_mask(&self) -> Vec<bool> {
        (1..=self.num_vertices()).map(|v| !self.is_active(v)).collect()
    }

    /// Edge from `from` to vertex `to`, if there is one
    #[must_use]
    pub fn edge(&self, from: Node, to: usize) -> Option<&Edge> {
        self.slot(from, to).and_then(|i| self.edges[i].as_ref())
    }

    /// All edges entering vertex, sources in ascending order (inputs first)
    pub fn predecessors(&self, vertex: usize) -> impl Iterator<Item = (Node, &Edge)> + '_ {
        let sources = (1..=self.num_inputs)
            .map(Node::Input)
            .chain((1..=self.num_vertices()).map(Node::Vertex));
        sources.filter_map(move |from| self.edge(from, vertex).map(|edge| (from, edge)))
    }

    /// All edges leaving vertex, targets in ascending order
    pub fn successors(&self, vertex: usize) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        (1..=self.num_vertices())
            .filter_map(move |to| self.edge(Node::Vertex(vertex), to).map(|edge| (to, edge)))
    }

    /// All edges of the graph as (source, target, edge)
    pub fn edges(&self) -> impl Iterator<Item = (Node, usize, &Edge)> + '_ {
        let n = self.num_vertices();
        self.edges.iter().enumerate().filter_map(move |(i, edge)| {
            let edge = edge.as_ref()?;
            let (row, col) = (i / n, i % n);
            Some((self.source(row), col + 1, edge))
        })
    }

    /// Adds an edge. Fails if either end does not exist, if the edge would
    /// go backwards in the vertex order, if an endpoint was eliminated
    /// or if the edge disagrees with the shapes of other edges
    /// touching the same nodes.
    pub fn add_edge(&mut self, from: Node, to: usize, edge: Edge) -> Result<(), VertexGameError> {
        let Some(slot) = self.slot(from, to) else {
            return Err(VertexGameError::malformed(format!(
                "edge {from} -> v{to} references missing node"
            )));
        };
        if let Node::Vertex(u) = from {
            if u >= to {
                return Err(VertexGameError::malformed(format!(
                    "edge {from} -> v{to} breaks topological order"
                )));
            }
            if self.is_eliminated(u) {
                return Err(VertexGameError::malformed(format!(
                    "edge {from} -> v{to} leaves eliminated vertex"
                )));
            }
        }
        if self.is_eliminated(to) {
            return Err(VertexGameError::malformed(format!(
                "edge {from} -> v{to} enters eliminated vertex"
            )));
        }
        if let Some(shape) = self.node_shape(from, Some(slot)) {
            if shape != edge.shape().in_dims() {
                return Err(VertexGameError::malformed(format!(
                    "edge {from} -> v{to} expects {from} of shape {:?}, but it has shape {shape:?}",
                    edge.shape().in_dims()
                )));
            }
        }
        if let Some(shape) = self.node_shape(Node::Vertex(to), Some(slot)) {
            if shape != edge.shape().out_dims() {
                return Err(VertexGameError::malformed(format!(
                    "edge {from} -> v{to} expects v{to} of shape {:?}, but it has shape {shape:?}",
                    edge.shape().out_dims()
                )));
            }
        }
        self.edges[slot] = Some(edge);
        Ok(())
    }

    /// Shape of node as seen by its edges, skipping one slot
    fn node_shape(&self, node: Node, skip: Option<usize>) -> Option<[u32; 2]> {
        let n = self.num_vertices();
        let row = self.row(node)?;
        let outgoing = (0..n)
            .map(|col| row * n + col)
            .filter(|&i| Some(i) != skip)
            .find_map(|i| self.edges[i].map(|e| e.shape().in_dims()));
        if outgoing.is_some() {
            return outgoing;
        }
        let Node::Vertex(v) = node else {
            return None;
        };
        (0..self.num_inputs + n)
            .map(|row| row * n + v - 1)
            .filter(|&i| Some(i) != skip)
            .find_map(|i| self.edges[i].map(|e| e.shape().out_dims()))
    }

    /// Checks that flag and edge storage matches the vertex counts.
    pub(crate) fn check_layout(&self) -> Result<(), VertexGameError> {
        let n = self.num_vertices();
        if self.eliminated.len() != n || self.outputs.len() != n {
            return Err(VertexGameError::malformed(format!(
                "expected {n} vertex flags, found {} eliminated and {} output flags",
                self.eliminated.len(),
                self.outputs.len()
            )));
        }
        if self.edges.len() != (self.num_inputs + n) * n {
            return Err(VertexGameError::malformed(format!(
                "expected {} edge slots, found {}",
                (self.num_inputs + n) * n,
                self.edges.len()
            )));
        }
        Ok(())
    }

    /// Validates every invariant of the graph
    pub fn validate(&self) -> Result<(), VertexGameError> {
        self.check_layout()?;
        let n = self.num_vertices();
        let num_outputs = self.outputs.iter().filter(|&&o| o).count();
        if num_outputs != self.num_outputs {
            return Err(VertexGameError::malformed(format!(
                "expected {} outputs, found {num_outputs} output flags",
                self.num_outputs
            )));
        }
        for v in 1..=n {
            if self.is_output(v) && self.is_eliminated(v) {
                return Err(VertexGameError::malformed(format!("output v{v} is eliminated")));
            }
            if self.is_eliminated(v)
                && (self.predecessors(v).next().is_some() || self.successors(v).next().is_some())
            {
                return Err(VertexGameError::malformed(format!(
                    "eliminated v{v} still has edges"
                )));
            }
        }
        for (from, to, edge) in self.edges() {
            if let Node::Vertex(u) = from {
                if u >= to {
                    return Err(VertexGameError::malformed(format!(
                        "edge {from} -> v{to} breaks topological order"
                    )));
                }
            }
            let slot = self.slot(from, to);
            if self.node_shape(from, slot).is_some_and(|s| s != edge.shape().in_dims())
                || self
                    .node_shape(Node::Vertex(to), slot)
                    .is_some_and(|s| s != edge.shape().out_dims())
            {
                return Err(VertexGameError::malformed(format!(
                    "edge {from} -> v{to} of shape {} disagrees with neighbouring edges",
                    edge.shape()
                )));
            }
        }
        Ok(())
    }

    /// Checks that vertex can be eliminated
    pub(crate) fn check_eliminable(&self, vertex: usize) -> Result<(), VertexGameError> {
        let num_vertices = self.num_vertices();
        if !(1..=num_vertices).contains(&vertex) {
            return Err(VertexGameError::invalid_vertex(
                vertex,
                InvalidVertexReason::OutOfRange { num_vertices },
            ));
        }
        if self.is_output(vertex) {
            return Err(VertexGameError::invalid_vertex(vertex, InvalidVertexReason::Output));
        }
        if self.is_eliminated(vertex) {
            return Err(VertexGameError::invalid_vertex(
                vertex,
                InvalidVertexReason::AlreadyEliminated,
            ));
        }
        Ok(())
    }

    pub(crate) fn set_edge(&mut self, from: Node, to: usize, edge: Option<Edge>) {
        if let Some(i) = self.slot(from, to) {
            self.edges[i] = edge;
        }
    }

    pub(crate) fn set_eliminated(&mut self, vertex: usize) {
        self.eliminated[vertex - 1] = true;
    }

    pub(crate) fn set_flags(&mut self, eliminated: Vec<bool>) {
        self.eliminated = eliminated;
    }

    fn row(&self, node: Node) -> Option<usize> {
        match node {
            Node::Input(i) if (1..=self.num_inputs).contains(&i) => Some(i - 1),
            Node::Vertex(v) if (1..=self.num_vertices()).contains(&v) => {
                Some(self.num_inputs + v - 1)
            }
            _ => None,
        }
    }

    fn source(&self, row: usize) -> Node {
        if row < self.num_inputs {
            Node::Input(row + 1)
        } else {
            Node::Vertex(row - self.num_inputs + 1)
        }
    }

    fn slot(&self, from: Node, to: usize) -> Option<usize> {
        let n = self.num_vertices();
        if !(1..=n).contains(&to) {
            return None;
        }
        self.row(from).map(|row| row * n + to - 1)
    }
}
