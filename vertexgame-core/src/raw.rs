//! Raw `i32` tensor layout of a graph state.
//!
//! The tensor has shape `[CHANNELS, num_inputs + num_vertices + 1, num_vertices]`
//! and is stored channel major. Row 0 holds the header and the vertex flags:
//! - channel 0, columns 0, 1 and 2: number of inputs, intermediates and outputs
//! - channel 1: eliminated flag of each vertex
//! - channel 2: output flag of each vertex
//!
//! Row `r` in `1..=num_inputs` holds the edges leaving input `r`, row
//! `num_inputs + u` the edges leaving vertex `u`. Column `c` is vertex `c + 1`.
//! Channel 0 of an edge is the sparsity tag (0 for no edge), channels 1 to 4
//! its shape `[o0, o1, i0, i1]`.

use crate::error::VertexGameError;
use crate::graph::{GraphState, Node};
use crate::sparsity::{Edge, EdgeShape, Sparsity};
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

/// Number of channels of the raw layout
pub const CHANNELS: usize = 5;

/// Graph state as a dense `i32` tensor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawGraph {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl RawGraph {
    /// Wraps data of shape `[CHANNELS, rows, cols]`
    pub fn new(rows: usize, cols: usize, data: Vec<i32>) -> Result<RawGraph, VertexGameError> {
        let numel = numel(rows, cols)?;
        if data.len() != numel {
            return Err(VertexGameError::malformed(format!(
                "raw graph of shape [{CHANNELS}, {rows}, {cols}] needs {numel} values, got {}",
                data.len()
            )));
        }
        Ok(RawGraph { rows, cols, data })
    }

    /// Tensor of zeros
    pub fn zeros(rows: usize, cols: usize) -> Result<RawGraph, VertexGameError> {
        Ok(RawGraph {
            rows,
            cols,
            data: vec![0; numel(rows, cols)?],
        })
    }

    /// Shape `[channels, rows, cols]`
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        [CHANNELS, self.rows, self.cols]
    }

    /// Flat channel major data
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Value at channel, row and column
    #[must_use]
    pub fn get(&self, channel: usize, row: usize, col: usize) -> i32 {
        self.data[self.index(channel, row, col)]
    }

    /// Sets value at channel, row and column
    pub fn set(&mut self, channel: usize, row: usize, col: usize, value: i32) {
        let i = self.index(channel, row, col);
        self.data[i] = value;
    }

    fn index(&self, channel: usize, row: usize, col: usize) -> usize {
        assert!(
            channel < CHANNELS && row < self.rows && col < self.cols,
            "index [{channel}, {row}, {col}] out of bounds for shape {:?}",
            self.shape()
        );
        (channel * self.rows + row) * self.cols + col
    }

    fn count(&self, col: usize) -> Result<usize, VertexGameError> {
        let value = self.get(0, 0, col);
        usize::try_from(value)
            .map_err(|_| VertexGameError::malformed(format!("negative vertex count {value}")))
    }

    fn flag(&self, channel: usize, col: usize) -> Result<bool, VertexGameError> {
        match self.get(channel, 0, col) {
            0 => Ok(false),
            1 => Ok(true),
            x => Err(VertexGameError::malformed(format!(
                "flag of vertex {} in channel {channel} is {x}",
                col + 1
            ))),
        }
    }
}

fn numel(rows: usize, cols: usize) -> Result<usize, VertexGameError> {
    CHANNELS
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| {
            VertexGameError::malformed(format!(
                "raw graph of shape [{CHANNELS}, {rows}, {cols}] is too large"
            ))
        })
}

fn to_i32(x: usize) -> Result<i32, VertexGameError> {
    i32::try_from(x).map_err(|_| VertexGameError::malformed(format!("{x} does not fit into i32")))
}

impl TryFrom<&GraphState> for RawGraph {
    type Error = VertexGameError;

    fn try_from(graph: &GraphState) -> Result<RawGraph, VertexGameError> {
        let n = graph.num_vertices();
        if n < 3 {
            return Err(VertexGameError::malformed(format!(
                "raw layout needs at least 3 vertices for its header, graph has {n}"
            )));
        }
        let num_inputs = graph.num_inputs();
        let mut raw = RawGraph::zeros(num_inputs + n + 1, n)?;
        raw.set(0, 0, 0, to_i32(num_inputs)?);
        raw.set(0, 0, 1, to_i32(graph.num_intermediates())?);
        raw.set(0, 0, 2, to_i32(graph.num_outputs())?);
        for v in 1..=n {
            raw.set(1, 0, v - 1, i32::from(graph.is_eliminated(v)));
            raw.set(2, 0, v - 1, i32::from(graph.is_output(v)));
        }
        for (from, to, edge) in graph.edges() {
            let row = match from {
                Node::Input(i) => i,
                Node::Vertex(u) => num_inputs + u,
            };
            raw.set(0, row, to - 1, edge.sparsity().tag());
            for (c, &d) in edge.shape().0.iter().enumerate() {
                raw.set(c + 1, row, to - 1, i32::try_from(d).map_err(|_| {
                    VertexGameError::malformed(format!("dimension {d} does not fit into i32"))
                })?);
            }
        }
        Ok(raw)
    }
}

impl TryFrom<&RawGraph> for GraphState {
    type Error = VertexGameError;

    /// Decodes and validates the raw layout.
    fn try_from(raw: &RawGraph) -> Result<GraphState, VertexGameError> {
        let [_, rows, cols] = raw.shape();
        if cols < 3 || rows == 0 {
            return Err(VertexGameError::malformed(format!(
                "raw graph of shape {:?} has no room for the header",
                raw.shape()
            )));
        }
        let num_inputs = raw.count(0)?;
        let num_intermediates = raw.count(1)?;
        let num_outputs = raw.count(2)?;
        let n = num_intermediates + num_outputs;
        if cols != n || rows != num_inputs + n + 1 {
            return Err(VertexGameError::malformed(format!(
                "raw graph of shape {:?} does not match {num_inputs} inputs, \
                 {num_intermediates} intermediates and {num_outputs} outputs",
                raw.shape()
            )));
        }

        let outputs = (0..n).map(|c| raw.flag(2, c)).collect::<Result<Vec<bool>, _>>()?;
        let eliminated = (0..n).map(|c| raw.flag(1, c)).collect::<Result<Vec<bool>, _>>()?;
        let mut graph = GraphState::with_outputs(num_inputs, outputs);
        if graph.num_outputs() != num_outputs {
            return Err(VertexGameError::malformed(format!(
                "header declares {num_outputs} outputs, but {} vertices are flagged",
                graph.num_outputs()
            )));
        }
        graph.set_flags(eliminated);

        for row in 1..rows {
            let from = if row <= num_inputs {
                Node::Input(row)
            } else {
                Node::Vertex(row - num_inputs)
            };
            for col in 0..cols {
                let tag = raw.get(0, row, col);
                if tag == 0 {
                    continue;
                }
                let sparsity = Sparsity::from_tag(tag)
                    .ok_or(VertexGameError::InconsistentSparsity { tag, row, col })?;
                let mut shape = [0u32; 4];
                for (c, d) in shape.iter_mut().enumerate() {
                    let value = raw.get(c + 1, row, col);
                    *d = u32::try_from(value).map_err(|_| {
                        VertexGameError::malformed(format!(
                            "edge at row {row}, column {col} has negative dimension {value}"
                        ))
                    })?;
                }
                let edge = Edge::new(sparsity, EdgeShape(shape))?;
                graph.set_edge(from, col + 1, Some(edge));
            }
        }
        graph.validate()?;
        Ok(graph)
    }
}
