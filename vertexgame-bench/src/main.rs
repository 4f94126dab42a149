mod config;

use anyhow::Context;
use clap::Parser;
use config::Config;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vertexgame_core::{GraphState, RandomGraphBuilder};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of random graphs to evaluate
    #[arg(long, short = 'n')]
    graphs: Option<usize>,

    /// The seed to use when generating random graphs.
    #[arg(long, default_value_t = 299792458)]
    seed: u64,

    #[arg(long, default_value_t = 2)]
    inputs: usize,

    #[arg(long, default_value_t = 12)]
    intermediates: usize,

    #[arg(long, default_value_t = 2)]
    outputs: usize,

    /// Probability of each additional edge, in 0..=1
    #[arg(long)]
    edge_probability: Option<f64>,

    /// Largest dimension of vertex shapes, 1 gives scalar graphs
    #[arg(long)]
    max_dim: Option<u32>,

    /// Worker threads, defaults to one per logical core
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Skip the safe preeliminations before minimal Markowitz
    #[arg(long)]
    no_preelimination: bool,

    /// Write the first graph in dot language to this file
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Config file to use instead of searching XDG config directories
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref());
    let num_graphs = args.graphs.or(config.graphs).unwrap_or(64);
    let threads = args.threads.or(config.threads);
    let preeliminate = !args.no_preelimination && config.preeliminate.unwrap_or(true);
    let builder = RandomGraphBuilder::new(args.inputs, args.intermediates, args.outputs)
        .edge_probability(args.edge_probability.or(config.edge_probability).unwrap_or(0.3))
        .max_dim(args.max_dim.or(config.max_dim).unwrap_or(4));

    let mut rng = rand::rngs::SmallRng::seed_from_u64(args.seed);
    let graphs = (0..num_graphs)
        .map(|_| builder.build(&mut rng))
        .collect::<Result<Vec<GraphState>, _>>()
        .context("failed to generate graphs")?;

    if let (Some(path), Some(graph)) = (&args.dot, graphs.first()) {
        std::fs::write(path, graph.plot_dot())
            .with_context(|| format!("failed to write dot file {path:?}"))?;
        tracing::info!("wrote first graph to {path:?}");
    }

    let dev = vertexgame_cpu::device(threads)?;
    tracing::info!(
        graphs = num_graphs,
        threads = dev.num_threads(),
        preeliminate,
        "running baselines"
    );
    let begin = std::time::Instant::now();
    let baselines = dev.baselines(graphs, preeliminate)?;
    let elapsed = begin.elapsed().as_nanos();

    println!("{:>6} {:>10} {:>10} {:>10}  order", "graph", "forward", "reverse", "markowitz");
    let (mut fwd, mut rev, mut mm) = (0u64, 0u64, 0u64);
    let mut wins = 0;
    for (i, b) in baselines.iter().enumerate() {
        println!(
            "{i:>6} {:>10} {:>10} {:>10}  {}",
            b.forward, b.reverse, b.minimal_markowitz, b.order
        );
        fwd = fwd.saturating_add(b.forward);
        rev = rev.saturating_add(b.reverse);
        mm = mm.saturating_add(b.minimal_markowitz);
        if b.minimal_markowitz <= b.forward.min(b.reverse) {
            wins += 1;
        }
    }
    println!("{:>6} {fwd:>10} {rev:>10} {mm:>10}", "total");
    println!(
        "\nMinimal Markowitz was at least as cheap as forward and reverse on {wins} of {} graphs",
        baselines.len()
    );
    println!("OK, time taken: {:.3} ms", elapsed as f64 / 1000000.);
    Ok(())
}
