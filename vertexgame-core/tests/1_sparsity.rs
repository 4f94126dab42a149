use vertexgame_core::{AxisPair, Edge, EdgeShape, MatrixPairing, Sparsity, VertexGameError};

#[test]
fn dense_multiplicity_is_directional() -> Result<(), VertexGameError> {
    // v of shape (4, 5) fed from u of shape (3, 2)
    let edge = Edge::new(Sparsity::DenseMatrix, EdgeShape([4, 5, 3, 2]))?;
    assert_eq!(edge.in_multiplicity(), 6);
    assert_eq!(edge.out_multiplicity(), 20);
    Ok(())
}

#[test]
fn parallel_multiplicity() -> Result<(), VertexGameError> {
    let fully = Edge::new(Sparsity::FullyParallel, EdgeShape([4, 5, 4, 5]))?;
    assert_eq!((fully.in_multiplicity(), fully.out_multiplicity()), (1, 1));
    let straight = Edge::new(
        Sparsity::MatrixParallel(MatrixPairing::Straight),
        EdgeShape([4, 5, 4, 5]),
    )?;
    assert_eq!(straight.in_multiplicity(), 1);
    let transposed = Edge::new(
        Sparsity::MatrixParallel(MatrixPairing::Transposed),
        EdgeShape([5, 4, 4, 5]),
    )?;
    assert_eq!(transposed.out_multiplicity(), 1);
    Ok(())
}

#[test]
fn vector_parallel_multiplicity_uses_free_axis() -> Result<(), VertexGameError> {
    let cases = [
        (AxisPair::RowRow, EdgeShape([4, 5, 4, 3]), 5),
        (AxisPair::ColCol, EdgeShape([4, 5, 3, 5]), 4),
        (AxisPair::ColRow, EdgeShape([4, 5, 5, 3]), 4),
        (AxisPair::RowCol, EdgeShape([4, 5, 3, 4]), 5),
    ];
    for (pair, shape, expected) in cases {
        let edge = Edge::new(Sparsity::VectorParallel(pair), shape)?;
        assert_eq!(edge.in_multiplicity(), expected, "{pair:?}");
        assert_eq!(edge.out_multiplicity(), expected, "{pair:?}");
    }
    Ok(())
}

#[test]
fn unit_dense_becomes_scalar() -> Result<(), VertexGameError> {
    let edge = Edge::new(Sparsity::DenseMatrix, EdgeShape::UNIT)?;
    assert_eq!(edge, Edge::scalar());
    assert!(Edge::new(Sparsity::DenseScalar, EdgeShape([2, 1, 1, 1])).is_err());
    Ok(())
}

#[test]
fn edge_shape_must_fit_kind() {
    assert!(Edge::new(Sparsity::DenseMatrix, EdgeShape([0, 1, 1, 1])).is_err());
    assert!(Edge::new(Sparsity::FullyParallel, EdgeShape([2, 3, 3, 2])).is_err());
    assert!(Edge::new(
        Sparsity::MatrixParallel(MatrixPairing::Transposed),
        EdgeShape([2, 3, 2, 3])
    )
    .is_err());
    assert!(Edge::new(Sparsity::VectorParallel(AxisPair::RowRow), EdgeShape([2, 3, 4, 3])).is_err());
}

#[test]
fn compose_with_fully_parallel_keeps_kind() -> Result<(), VertexGameError> {
    let dense = Edge::new(Sparsity::DenseMatrix, EdgeShape([4, 1, 3, 1]))?;
    let fully = Edge::new(Sparsity::FullyParallel, EdgeShape([4, 1, 4, 1]))?;
    let composed = dense.compose(&fully);
    assert_eq!(composed.sparsity(), Sparsity::DenseMatrix);
    assert_eq!(composed.shape(), EdgeShape([4, 1, 3, 1]));

    let vp = Edge::new(Sparsity::VectorParallel(AxisPair::RowRow), EdgeShape([4, 2, 4, 3]))?;
    let fully = Edge::new(Sparsity::FullyParallel, EdgeShape([4, 3, 4, 3]))?;
    let composed = fully.compose(&vp);
    assert_eq!(composed.sparsity(), Sparsity::VectorParallel(AxisPair::RowRow));
    assert_eq!(composed.shape(), EdgeShape([4, 2, 4, 3]));
    Ok(())
}

#[test]
fn compose_pairs_axes() -> Result<(), VertexGameError> {
    // u (3, 2) -> v (2, 5) pairs v axis 0 with u axis 1
    let first = Edge::new(Sparsity::VectorParallel(AxisPair::RowCol), EdgeShape([2, 5, 3, 2]))?;
    // v (2, 5) -> w (5, 2) transposes
    let second = Edge::new(
        Sparsity::MatrixParallel(MatrixPairing::Transposed),
        EdgeShape([5, 2, 2, 5]),
    )?;
    let composed = first.compose(&second);
    assert_eq!(composed.sparsity(), Sparsity::VectorParallel(AxisPair::ColCol));
    assert_eq!(composed.shape(), EdgeShape([5, 2, 3, 2]));

    let t1 = Edge::new(
        Sparsity::MatrixParallel(MatrixPairing::Transposed),
        EdgeShape([3, 2, 2, 3]),
    )?;
    let t2 = Edge::new(
        Sparsity::MatrixParallel(MatrixPairing::Transposed),
        EdgeShape([2, 3, 3, 2]),
    )?;
    assert_eq!(
        t1.compose(&t2).sparsity(),
        Sparsity::MatrixParallel(MatrixPairing::Straight)
    );
    Ok(())
}

#[test]
fn compose_unpaired_axes_is_dense() -> Result<(), VertexGameError> {
    let first = Edge::new(Sparsity::VectorParallel(AxisPair::RowRow), EdgeShape([2, 2, 2, 3]))?;
    let second = Edge::new(Sparsity::VectorParallel(AxisPair::ColCol), EdgeShape([4, 2, 2, 2]))?;
    let composed = first.compose(&second);
    assert_eq!(composed.sparsity(), Sparsity::DenseMatrix);
    assert_eq!(composed.shape(), EdgeShape([4, 2, 2, 3]));

    let scalar = Edge::scalar();
    assert_eq!(scalar.compose(&scalar), Edge::scalar());
    Ok(())
}

#[test]
fn accumulate_keeps_common_structure() -> Result<(), VertexGameError> {
    let shape = EdgeShape([3, 3, 3, 3]);
    let straight = Edge::new(Sparsity::MatrixParallel(MatrixPairing::Straight), shape)?;
    let fully = Edge::new(Sparsity::FullyParallel, shape)?;
    let rows = Edge::new(Sparsity::VectorParallel(AxisPair::RowRow), shape)?;
    let cols = Edge::new(Sparsity::VectorParallel(AxisPair::ColCol), shape)?;

    assert_eq!(fully.accumulate(&fully)?, fully);
    assert_eq!(fully.accumulate(&straight)?, straight);
    assert_eq!(straight.accumulate(&rows)?, rows);
    assert_eq!(rows.accumulate(&cols)?.sparsity(), Sparsity::DenseMatrix);

    let other = Edge::new(Sparsity::DenseMatrix, EdgeShape([3, 3, 3, 1]))?;
    assert!(matches!(
        rows.accumulate(&other),
        Err(VertexGameError::MalformedGraph(_))
    ));
    Ok(())
}

#[test]
fn tags() {
    assert_eq!(Sparsity::from_tag(0), None);
    assert_eq!(Sparsity::from_tag(9), None);
    assert_eq!(Sparsity::from_tag(-1), None);
    for tag in 2..=8 {
        let sparsity = Sparsity::from_tag(tag).unwrap();
        assert_eq!(sparsity.tag(), tag);
    }
    assert_eq!(Sparsity::DenseScalar.tag(), Sparsity::DenseMatrix.tag());
}
