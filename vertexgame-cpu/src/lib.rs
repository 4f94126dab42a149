//! Multi-threaded evaluator for the vertex elimination game.
//!
//! Graphs are independent of each other, so batches of them are spread
//! over a rayon thread pool. Results are returned in the order of the inputs.
//! ```rust
//! use vertexgame_core::{Edge, GraphState, Node};
//!
//! let dev = vertexgame_cpu::device(Some(2))?;
//! let mut graph = GraphState::new(1, 1, 1);
//! graph.add_edge(Node::Input(1), 1, Edge::scalar())?;
//! graph.add_edge(Node::Vertex(1), 2, Edge::scalar())?;
//! let baselines = dev.baselines(vec![graph], true)?;
//! assert_eq!(baselines[0].minimal_markowitz, 1);
//! # Ok::<(), vertexgame_cpu::CpuError>(())
//! ```

#![forbid(unsafe_code)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![forbid(rustdoc::private_intra_doc_links)]
#![forbid(missing_docs)]
#![forbid(rustdoc::missing_crate_level_docs)]
#![forbid(rustdoc::private_doc_tests)]
#![forbid(rustdoc::invalid_codeblock_attributes)]
#![forbid(rustdoc::invalid_html_tags)]
#![forbid(rustdoc::invalid_rust_codeblocks)]
#![forbid(rustdoc::bare_urls)]
#![forbid(rustdoc::unescaped_backticks)]
#![forbid(rustdoc::redundant_explicit_links)]

mod evaluator;

pub use evaluator::Baselines;
pub use vertexgame_core::{EliminationOrder, EliminationRun, GraphState, Step, VertexGameError};

/// Errors of the cpu evaluator
#[derive(Debug, thiserror::Error)]
pub enum CpuError {
    /// Thread pool could not be created
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// Evaluation of a graph failed
    #[error(transparent)]
    Graph(#[from] VertexGameError),
}

/// CPU evaluator owning its thread pool
#[derive(Debug)]
pub struct Cpu {
    pool: rayon::ThreadPool,
}

/// Create new CPU evaluator. `None` uses one thread per logical core.
pub fn device(threads: Option<usize>) -> Result<Cpu, CpuError> {
    let mut builder = rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("vertexgame-cpu-{i}"));
    if let Some(threads) = threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    tracing::debug!(threads = pool.current_num_threads(), "created cpu evaluator");
    Ok(Cpu { pool })
}

impl Cpu {
    /// Number of worker threads
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}
