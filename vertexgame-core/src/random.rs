use crate::error::VertexGameError;
use crate::graph::{GraphState, Node};
use crate::sparsity::{AxisPair, Edge, EdgeShape, MatrixPairing, Sparsity};
use alloc::format;
use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generator of random computational graphs.
///
/// Every node gets a random 2D shape, every vertex at least one predecessor
/// among the inputs and lower intermediate vertices and each edge a sparsity
/// kind drawn from the kinds that fit the shapes of its ends.
///
/// ```rust
/// use rand::SeedableRng;
/// use vertexgame_core::RandomGraphBuilder;
///
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(42);
/// let graph = RandomGraphBuilder::new(2, 6, 2).max_dim(3).build(&mut rng)?;
/// assert_eq!(graph.num_intermediates(), 6);
/// # Ok::<(), vertexgame_core::VertexGameError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomGraphBuilder {
    num_inputs: usize,
    num_intermediates: usize,
    num_outputs: usize,
    edge_probability: f64,
    max_dim: u32,
}

impl RandomGraphBuilder {
    /// Builder of scalar graphs with edge probability 0.3
    #[must_use]
    pub const fn new(num_inputs: usize, num_intermediates: usize, num_outputs: usize) -> Self {
        Self {
            num_inputs,
            num_intermediates,
            num_outputs,
            edge_probability: 0.3,
            max_dim: 1,
        }
    }

    /// Probability of each additional edge
    #[must_use]
    pub fn edge_probability(mut self, edge_probability: f64) -> Self {
        self.edge_probability = edge_probability;
        self
    }

    /// Largest dimension of vertex shapes, 1 gives scalar graphs
    #[must_use]
    pub const fn max_dim(mut self, max_dim: u32) -> Self {
        self.max_dim = max_dim;
        self
    }

    /// Builds graph
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<GraphState, VertexGameError> {
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(VertexGameError::malformed(format!(
                "edge probability {} is not in 0..=1",
                self.edge_probability
            )));
        }
        if self.max_dim == 0 {
            return Err(VertexGameError::malformed("max_dim must be at least 1"));
        }
        if self.num_inputs == 0 && self.num_intermediates + self.num_outputs > 0 {
            return Err(VertexGameError::malformed("random graph needs at least one input"));
        }
        let mut graph = GraphState::new(self.num_inputs, self.num_intermediates, self.num_outputs);
        let mut shape = || [rng.gen_range(1..=self.max_dim), rng.gen_range(1..=self.max_dim)];
        let input_shapes: Vec<[u32; 2]> = (0..self.num_inputs).map(|_| shape()).collect();
        let vertex_shapes: Vec<[u32; 2]> = (0..graph.num_vertices()).map(|_| shape()).collect();

        for to in 1..=graph.num_vertices() {
            let mut sources: Vec<(Node, [u32; 2])> = (1..=self.num_inputs)
                .map(|i| (Node::Input(i), input_shapes[i - 1]))
                .chain(
                    (1..to)
                        .filter(|&u| !graph.is_output(u))
                        .map(|u| (Node::Vertex(u), vertex_shapes[u - 1])),
                )
                .collect();
            sources.shuffle(rng);
            for (k, (from, inp)) in sources.into_iter().enumerate() {
                if k > 0 && !rng.gen_bool(self.edge_probability) {
                    continue;
                }
                let out = vertex_shapes[to - 1];
                let kinds = fitting_kinds(out, inp);
                let sparsity = kinds.choose(rng).copied().unwrap_or(Sparsity::DenseMatrix);
                graph.add_edge(from, to, Edge::new(sparsity, EdgeShape::new(out, inp))?)?;
            }
        }
        Ok(graph)
    }
}

// Sparsity kinds whose paired axes fit an edge from `inp` to `out`
fn fitting_kinds(out: [u32; 2], inp: [u32; 2]) -> Vec<Sparsity> {
    let mut kinds = alloc::vec![Sparsity::DenseMatrix];
    for pair in AxisPair::ALL {
        let (o, i) = pair.axes();
        if out[o] == inp[i] {
            kinds.push(Sparsity::VectorParallel(pair));
        }
    }
    if out == inp {
        kinds.push(Sparsity::MatrixParallel(MatrixPairing::Straight));
        kinds.push(Sparsity::FullyParallel);
    }
    if out == [inp[1], inp[0]] {
        kinds.push(Sparsity::MatrixParallel(MatrixPairing::Transposed));
    }
    kinds
}
