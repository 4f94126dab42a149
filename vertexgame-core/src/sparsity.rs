//! Sparsity kinds of tensor valued edges.
//!
//! Every edge of a [`GraphState`](crate::GraphState) is a Jacobian tensor of
//! shape `[o0, o1, i0, i1]`, where `[o0, o1]` is the shape of the target
//! vertex and `[i0, i1]` the shape of the source. The sparsity kind says which
//! output axes are tied diagonally to which input axes. That is enough to count
//! the scalar multiplications of an elimination without materializing the tensor.

use crate::error::VertexGameError;
use core::fmt::{Display, Formatter};

/// Pairing of one output axis with one input axis (out axis first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisPair {
    /// Output axis 0 is diagonal with input axis 0
    RowRow,
    /// Output axis 1 is diagonal with input axis 1
    ColCol,
    /// Output axis 1 is diagonal with input axis 0
    ColRow,
    /// Output axis 0 is diagonal with input axis 1
    RowCol,
}

/// Pairing of both axes of a matrix parallel edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatrixPairing {
    /// Axes paired as (0, 0) and (1, 1)
    Straight,
    /// Axes paired as (0, 1) and (1, 0)
    Transposed,
}

/// Closed set of edge sparsity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sparsity {
    /// Dense edge between two scalar vertices
    DenseScalar,
    /// Dense Jacobian between two tensor vertices
    DenseMatrix,
    /// Diagonal along one pair of axes, dense along the rest
    VectorParallel(AxisPair),
    /// Diagonal along both pairs of axes
    MatrixParallel(MatrixPairing),
    /// Elementwise edge, neutral under composition
    FullyParallel,
}

/// Shape of an edge, `[o0, o1, i0, i1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeShape(pub [u32; 4]);

/// Tensor valued edge of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    sparsity: Sparsity,
    shape: EdgeShape,
}

const fn bit(out_axis: usize, in_axis: usize) -> u8 {
    1 << (out_axis * 2 + in_axis)
}

const STRAIGHT: u8 = bit(0, 0) | bit(1, 1);
const TRANSPOSED: u8 = bit(0, 1) | bit(1, 0);

impl AxisPair {
    /// All pairs in tag order
    pub const ALL: [AxisPair; 4] = [
        AxisPair::RowRow,
        AxisPair::ColCol,
        AxisPair::ColRow,
        AxisPair::RowCol,
    ];

    /// (output axis, input axis)
    #[must_use]
    pub const fn axes(self) -> (usize, usize) {
        match self {
            AxisPair::RowRow => (0, 0),
            AxisPair::ColCol => (1, 1),
            AxisPair::ColRow => (1, 0),
            AxisPair::RowCol => (0, 1),
        }
    }

    /// Index into the edge shape of the dimension that determines
    /// the multiplicity of the edge. This is the free output axis.
    #[must_use]
    pub const fn multiplicity_dim(self) -> usize {
        match self {
            AxisPair::RowRow | AxisPair::RowCol => 1,
            AxisPair::ColCol | AxisPair::ColRow => 0,
        }
    }

    const fn bits(self) -> u8 {
        let (o, i) = self.axes();
        bit(o, i)
    }
}

impl MatrixPairing {
    const fn bits(self) -> u8 {
        match self {
            MatrixPairing::Straight => STRAIGHT,
            MatrixPairing::Transposed => TRANSPOSED,
        }
    }
}

impl Sparsity {
    /// Tag of this kind in the raw layout. Both dense kinds share tag 1.
    #[must_use]
    pub const fn tag(self) -> i32 {
        match self {
            Sparsity::DenseScalar | Sparsity::DenseMatrix => 1,
            Sparsity::VectorParallel(AxisPair::RowRow) => 2,
            Sparsity::VectorParallel(AxisPair::ColCol) => 3,
            Sparsity::VectorParallel(AxisPair::ColRow) => 4,
            Sparsity::VectorParallel(AxisPair::RowCol) => 5,
            Sparsity::MatrixParallel(MatrixPairing::Straight) => 6,
            Sparsity::MatrixParallel(MatrixPairing::Transposed) => 7,
            Sparsity::FullyParallel => 8,
        }
    }

    /// Decodes a nonzero raw tag. Dense tags decode to [`Sparsity::DenseMatrix`],
    /// [`Edge::new`] narrows them to [`Sparsity::DenseScalar`] for unit shapes.
    #[must_use]
    pub const fn from_tag(tag: i32) -> Option<Sparsity> {
        Some(match tag {
            1 => Sparsity::DenseMatrix,
            2 => Sparsity::VectorParallel(AxisPair::RowRow),
            3 => Sparsity::VectorParallel(AxisPair::ColCol),
            4 => Sparsity::VectorParallel(AxisPair::ColRow),
            5 => Sparsity::VectorParallel(AxisPair::RowCol),
            6 => Sparsity::MatrixParallel(MatrixPairing::Straight),
            7 => Sparsity::MatrixParallel(MatrixPairing::Transposed),
            8 => Sparsity::FullyParallel,
            _ => return None,
        })
    }

    /// Is this one of the dense kinds?
    #[must_use]
    pub const fn is_dense(self) -> bool {
        matches!(self, Sparsity::DenseScalar | Sparsity::DenseMatrix)
    }

    // Diagonal axis pairs as a bitmask, FullyParallel counts as straight.
    const fn pairs(self) -> u8 {
        match self {
            Sparsity::DenseScalar | Sparsity::DenseMatrix => 0,
            Sparsity::VectorParallel(pair) => pair.bits(),
            Sparsity::MatrixParallel(pairing) => pairing.bits(),
            Sparsity::FullyParallel => STRAIGHT,
        }
    }

    fn from_pairs(pairs: u8) -> Sparsity {
        match pairs {
            STRAIGHT => Sparsity::MatrixParallel(MatrixPairing::Straight),
            TRANSPOSED => Sparsity::MatrixParallel(MatrixPairing::Transposed),
            _ => AxisPair::ALL
                .into_iter()
                .find(|pair| pair.bits() == pairs)
                .map_or(Sparsity::DenseMatrix, Sparsity::VectorParallel),
        }
    }
}

// (k, j) is in the result iff (k, l) is in second and (l, j) is in first.
fn compose_pairs(first: u8, second: u8) -> u8 {
    let mut res = 0;
    for k in 0..2 {
        for l in 0..2 {
            if second & bit(k, l) == 0 {
                continue;
            }
            for j in 0..2 {
                if first & bit(l, j) != 0 {
                    res |= bit(k, j);
                }
            }
        }
    }
    res
}

impl EdgeShape {
    /// Shape `[out, inp]` of an edge between a vertex of shape `inp`
    /// and a vertex of shape `out`
    #[must_use]
    pub const fn new(out: [u32; 2], inp: [u32; 2]) -> Self {
        Self([out[0], out[1], inp[0], inp[1]])
    }

    /// Shape of an edge between two scalar vertices
    pub const UNIT: EdgeShape = EdgeShape([1, 1, 1, 1]);

    /// Shape of the target vertex
    #[must_use]
    pub const fn out_dims(&self) -> [u32; 2] {
        [self.0[0], self.0[1]]
    }

    /// Shape of the source vertex
    #[must_use]
    pub const fn in_dims(&self) -> [u32; 2] {
        [self.0[2], self.0[3]]
    }

    /// Are all dimensions one?
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.0 == [1; 4]
    }

    fn out_numel(&self) -> u64 {
        u64::from(self.0[0]) * u64::from(self.0[1])
    }

    fn in_numel(&self) -> u64 {
        u64::from(self.0[2]) * u64::from(self.0[3])
    }
}

impl Display for EdgeShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let [o0, o1, i0, i1] = self.0;
        f.write_fmt(format_args!("({o0}, {o1}) x ({i0}, {i1})"))
    }
}

impl Edge {
    /// Creates new edge. Dense edges with unit shape become [`Sparsity::DenseScalar`].
    /// Fails if a dimension is zero or if the paired axes of the sparsity
    /// kind have different extents.
    pub fn new(sparsity: Sparsity, shape: EdgeShape) -> Result<Edge, VertexGameError> {
        if shape.0.contains(&0) {
            return Err(VertexGameError::malformed(alloc::format!(
                "edge shape {shape} has zero dimension"
            )));
        }
        let [o0, o1, i0, i1] = shape.0;
        let out = [o0, o1];
        let inp = [i0, i1];
        let sparsity = match sparsity {
            Sparsity::DenseScalar if !shape.is_unit() => {
                return Err(VertexGameError::malformed(alloc::format!(
                    "dense scalar edge must have unit shape, found {shape}"
                )))
            }
            Sparsity::DenseMatrix if shape.is_unit() => Sparsity::DenseScalar,
            Sparsity::VectorParallel(pair) => {
                let (o, i) = pair.axes();
                if out[o] != inp[i] {
                    return Err(VertexGameError::malformed(alloc::format!(
                        "{pair:?} vector parallel edge pairs axes of different size in {shape}"
                    )));
                }
                sparsity
            }
            Sparsity::MatrixParallel(MatrixPairing::Transposed) => {
                if out != [i1, i0] {
                    return Err(VertexGameError::malformed(alloc::format!(
                        "transposed matrix parallel edge has non transposed shape {shape}"
                    )));
                }
                sparsity
            }
            Sparsity::MatrixParallel(MatrixPairing::Straight) | Sparsity::FullyParallel => {
                if out != inp {
                    return Err(VertexGameError::malformed(alloc::format!(
                        "{sparsity:?} edge must keep the shape, found {shape}"
                    )));
                }
                sparsity
            }
            _ => sparsity,
        };
        Ok(Edge { sparsity, shape })
    }

    /// Dense edge between two scalar vertices
    #[must_use]
    pub const fn scalar() -> Edge {
        Edge {
            sparsity: Sparsity::DenseScalar,
            shape: EdgeShape::UNIT,
        }
    }

    /// Sparsity kind of this edge
    #[must_use]
    pub const fn sparsity(&self) -> Sparsity {
        self.sparsity
    }

    /// Shape of this edge
    #[must_use]
    pub const fn shape(&self) -> EdgeShape {
        self.shape
    }

    /// Effective number of scalar edges when this edge enters the measured vertex
    #[must_use]
    pub fn in_multiplicity(&self) -> u64 {
        self.multiplicity(self.shape.in_numel())
    }

    /// Effective number of scalar edges when this edge leaves the measured vertex
    #[must_use]
    pub fn out_multiplicity(&self) -> u64 {
        self.multiplicity(self.shape.out_numel())
    }

    fn multiplicity(&self, dense: u64) -> u64 {
        match self.sparsity {
            Sparsity::DenseMatrix => dense,
            Sparsity::VectorParallel(pair) => u64::from(self.shape.0[pair.multiplicity_dim()]),
            Sparsity::DenseScalar | Sparsity::MatrixParallel(_) | Sparsity::FullyParallel => 1,
        }
    }

    /// Fill-in edge `u -> w` for `self = u -> v` followed by `next = v -> w`.
    #[must_use]
    pub fn compose(&self, next: &Edge) -> Edge {
        let shape = EdgeShape::new(next.shape.out_dims(), self.shape.in_dims());
        let sparsity = match (self.sparsity, next.sparsity) {
            (Sparsity::FullyParallel, sparsity) | (sparsity, Sparsity::FullyParallel) => sparsity,
            (first, second) => Sparsity::from_pairs(compose_pairs(first.pairs(), second.pairs())),
        };
        Edge::normalized(sparsity, shape)
    }

    /// Sum of two edges between the same pair of vertices.
    pub fn accumulate(&self, other: &Edge) -> Result<Edge, VertexGameError> {
        if self.shape != other.shape {
            return Err(VertexGameError::malformed(alloc::format!(
                "can not accumulate edges of shapes {} and {}",
                self.shape,
                other.shape
            )));
        }
        if self.sparsity == other.sparsity {
            return Ok(*self);
        }
        let pairs = self.sparsity.pairs() & other.sparsity.pairs();
        Ok(Edge::normalized(Sparsity::from_pairs(pairs), self.shape))
    }

    // Composition and accumulation keep axis extents consistent,
    // only the dense kinds need narrowing.
    fn normalized(sparsity: Sparsity, shape: EdgeShape) -> Edge {
        let sparsity = match sparsity {
            Sparsity::DenseScalar | Sparsity::DenseMatrix if shape.is_unit() => Sparsity::DenseScalar,
            Sparsity::DenseScalar => Sparsity::DenseMatrix,
            _ => sparsity,
        };
        Edge { sparsity, shape }
    }
}

impl Display for Sparsity {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Sparsity::DenseScalar => f.write_str("dense"),
            Sparsity::DenseMatrix => f.write_str("dense matrix"),
            Sparsity::VectorParallel(pair) => f.write_fmt(format_args!("vector parallel {pair:?}")),
            Sparsity::MatrixParallel(pairing) => {
                f.write_fmt(format_args!("matrix parallel {pairing:?}"))
            }
            Sparsity::FullyParallel => f.write_str("fully parallel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_relational() {
        assert_eq!(compose_pairs(STRAIGHT, STRAIGHT), STRAIGHT);
        assert_eq!(compose_pairs(TRANSPOSED, TRANSPOSED), STRAIGHT);
        assert_eq!(compose_pairs(bit(0, 1), TRANSPOSED), bit(1, 1));
        assert_eq!(compose_pairs(bit(0, 0), bit(1, 1)), 0);
        assert_eq!(compose_pairs(0, STRAIGHT), 0);
    }

    #[test]
    fn pairs_round_trip() {
        for pair in AxisPair::ALL {
            assert_eq!(Sparsity::from_pairs(pair.bits()), Sparsity::VectorParallel(pair));
        }
        assert_eq!(Sparsity::from_pairs(0), Sparsity::DenseMatrix);
    }
}
