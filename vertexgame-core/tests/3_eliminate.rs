use vertexgame_core::{
    forward, AxisPair, Edge, EdgeShape, EliminationRun, GraphState, InvalidVertexReason,
    MatrixPairing, Node, Sparsity, VertexGameError,
};

fn diamond() -> Result<GraphState, VertexGameError> {
    let mut graph = GraphState::new(1, 3, 1);
    graph.add_edge(Node::Input(1), 1, Edge::scalar())?;
    graph.add_edge(Node::Vertex(1), 2, Edge::scalar())?;
    graph.add_edge(Node::Vertex(1), 3, Edge::scalar())?;
    graph.add_edge(Node::Vertex(2), 4, Edge::scalar())?;
    graph.add_edge(Node::Vertex(3), 4, Edge::scalar())?;
    Ok(graph)
}

#[test]
fn eliminate_connects_neighbours() -> Result<(), VertexGameError> {
    let graph = diamond()?;
    let (graph, cost) = graph.eliminate(1)?;
    assert_eq!(cost, 2);
    assert!(graph.is_eliminated(1));
    assert_eq!(graph.predecessors(1).count(), 0);
    assert_eq!(graph.successors(1).count(), 0);
    assert_eq!(graph.edge(Node::Input(1), 2), Some(&Edge::scalar()));
    assert_eq!(graph.edge(Node::Input(1), 3), Some(&Edge::scalar()));
    graph.validate()?;
    Ok(())
}

#[test]
fn fill_in_is_accumulated() -> Result<(), VertexGameError> {
    let (graph, first) = diamond()?.eliminate(2)?;
    assert_eq!(graph.edges().count(), 4);
    let (graph, second) = graph.eliminate(3)?;
    assert_eq!((first, second), (1, 1));
    // both paths end up in a single v1 -> v4 edge
    let edges: Vec<(Node, usize)> = graph.edges().map(|(from, to, _)| (from, to)).collect();
    assert_eq!(edges, [(Node::Input(1), 1), (Node::Vertex(1), 4)]);
    let (graph, last) = graph.eliminate(1)?;
    assert_eq!(last, 1);
    assert!(graph.is_fully_eliminated());
    assert_eq!(graph.edge(Node::Input(1), 4), Some(&Edge::scalar()));
    Ok(())
}

#[test]
fn tensor_costs() -> Result<(), VertexGameError> {
    let mut graph = GraphState::new(1, 2, 1);
    graph.add_edge(Node::Input(1), 1, Edge::new(Sparsity::DenseMatrix, EdgeShape([4, 1, 3, 1]))?)?;
    graph.add_edge(Node::Vertex(1), 2, Edge::new(Sparsity::FullyParallel, EdgeShape([4, 1, 4, 1]))?)?;
    graph.add_edge(Node::Vertex(2), 3, Edge::new(Sparsity::DenseMatrix, EdgeShape([2, 1, 4, 1]))?)?;

    let (after_first, cost) = graph.eliminate(1)?;
    assert_eq!(cost, 3);
    let fill_in = after_first.edge(Node::Input(1), 2).copied();
    assert_eq!(fill_in, Some(Edge::new(Sparsity::DenseMatrix, EdgeShape([4, 1, 3, 1]))?));
    assert_eq!(after_first.eliminate(2)?.1, 6);

    let (after_second, cost) = graph.eliminate(2)?;
    assert_eq!(cost, 2);
    let fill_in = after_second.edge(Node::Vertex(1), 3).copied();
    assert_eq!(fill_in, Some(Edge::new(Sparsity::DenseMatrix, EdgeShape([2, 1, 4, 1]))?));
    assert_eq!(after_second.eliminate(1)?.1, 6);
    Ok(())
}

#[test]
fn fill_in_keeps_sparsity() -> Result<(), VertexGameError> {
    let shape = EdgeShape([3, 3, 3, 3]);
    let mut graph = GraphState::new(1, 2, 1);
    graph.add_edge(Node::Input(1), 1, Edge::new(Sparsity::FullyParallel, shape)?)?;
    graph.add_edge(
        Node::Input(1),
        2,
        Edge::new(Sparsity::MatrixParallel(MatrixPairing::Straight), shape)?,
    )?;
    graph.add_edge(Node::Vertex(1), 3, Edge::new(Sparsity::VectorParallel(AxisPair::RowRow), shape)?)?;
    graph.add_edge(Node::Vertex(2), 3, Edge::new(Sparsity::FullyParallel, shape)?)?;

    let (graph, cost) = graph.eliminate(1)?;
    assert_eq!(cost, 3);
    let edge = graph.edge(Node::Input(1), 3).map(Edge::sparsity);
    assert_eq!(edge, Some(Sparsity::VectorParallel(AxisPair::RowRow)));

    let (graph, cost) = graph.eliminate(2)?;
    assert_eq!(cost, 1);
    let edge = graph.edge(Node::Input(1), 3).map(Edge::sparsity);
    assert_eq!(edge, Some(Sparsity::VectorParallel(AxisPair::RowRow)));
    Ok(())
}

#[test]
fn isolated_vertex_costs_nothing() -> Result<(), VertexGameError> {
    let mut graph = GraphState::new(1, 2, 1);
    graph.add_edge(Node::Input(1), 1, Edge::scalar())?;
    graph.add_edge(Node::Vertex(1), 3, Edge::scalar())?;
    let (graph, cost) = graph.eliminate(2)?;
    assert_eq!(cost, 0);
    assert!(graph.is_eliminated(2));
    Ok(())
}

#[test]
fn invalid_vertices() -> Result<(), VertexGameError> {
    let graph = diamond()?;
    let reason = |res: Result<(GraphState, u64), VertexGameError>| match res {
        Err(VertexGameError::InvalidVertex { reason, .. }) => Some(reason),
        _ => None,
    };
    assert_eq!(
        reason(graph.eliminate(0)),
        Some(InvalidVertexReason::OutOfRange { num_vertices: 4 })
    );
    assert_eq!(
        reason(graph.eliminate(5)),
        Some(InvalidVertexReason::OutOfRange { num_vertices: 4 })
    );
    assert_eq!(reason(graph.eliminate(4)), Some(InvalidVertexReason::Output));
    let (eliminated, _) = graph.eliminate(2)?;
    assert_eq!(
        reason(eliminated.eliminate(2)),
        Some(InvalidVertexReason::AlreadyEliminated)
    );
    Ok(())
}

#[test]
fn failed_elimination_keeps_graph() -> Result<(), VertexGameError> {
    let mut graph = diamond()?;
    let before = graph.clone();
    assert!(graph.eliminate_in_place(4).is_err());
    assert!(graph.eliminate_in_place(9).is_err());
    assert_eq!(graph, before);
    Ok(())
}

// x (65536, 65536) -> v1 (1, 1) -> v2 (65536, 65536)
fn wide_bottleneck() -> Result<GraphState, VertexGameError> {
    let mut graph = GraphState::new(1, 1, 1);
    graph.add_edge(
        Node::Input(1),
        1,
        Edge::new(Sparsity::DenseMatrix, EdgeShape([1, 1, 65536, 65536]))?,
    )?;
    graph.add_edge(
        Node::Vertex(1),
        2,
        Edge::new(Sparsity::DenseMatrix, EdgeShape([65536, 65536, 1, 1]))?,
    )?;
    Ok(graph)
}

#[test]
fn step_cost_overflow_is_an_error() -> Result<(), VertexGameError> {
    let mut graph = wide_bottleneck()?;
    graph.validate()?;
    let before = graph.clone();
    assert!(matches!(
        graph.eliminate(1),
        Err(VertexGameError::MalformedGraph(_))
    ));
    assert!(matches!(
        graph.eliminate_in_place(1),
        Err(VertexGameError::MalformedGraph(_))
    ));
    assert_eq!(graph, before);
    Ok(())
}

#[test]
fn total_cost_overflow_keeps_run() -> Result<(), VertexGameError> {
    // two parallel paths through scalar vertices, each costing 2^63
    let mut graph = GraphState::new(1, 2, 1);
    let into = Edge::new(Sparsity::DenseMatrix, EdgeShape([1, 1, 1 << 31, 65536]))?;
    let out_of = Edge::new(Sparsity::DenseMatrix, EdgeShape([65536, 1, 1, 1]))?;
    graph.add_edge(Node::Input(1), 1, into)?;
    graph.add_edge(Node::Input(1), 2, into)?;
    graph.add_edge(Node::Vertex(1), 3, out_of)?;
    graph.add_edge(Node::Vertex(2), 3, out_of)?;

    let mut run = EliminationRun::new(graph.clone());
    assert_eq!(run.eliminate(1)?, 1 << 63);
    let snapshot = run.clone();
    assert!(matches!(
        run.eliminate(2),
        Err(VertexGameError::MalformedGraph(_))
    ));
    assert_eq!(run, snapshot);
    assert!(!run.graph.is_eliminated(2));

    assert!(matches!(
        forward(graph),
        Err(VertexGameError::MalformedGraph(_))
    ));
    Ok(())
}
