use spmat::{
    BuilderRegistry, CompleteMatrixBuilder, MatrixError, MatrixFactory, MatrixKind,
    SparseMatrixBuilder, SparseVectorBuilder,
};

#[test]
fn test_banded_square_becomes_tridiagonal() {
    let mut builder = SparseMatrixBuilder::<f64>::new(3, 3);
    let mut value = 1.0;
    for i in 0..3usize {
        for j in 0..3usize {
            if i.abs_diff(j) <= 1 {
                builder.set(i, j, value);
                value += 1.0;
            }
        }
    }
    let matrix = builder.into_matrix();
    assert_eq!(matrix.kind(), MatrixKind::Tridiagonal);
    // diagonal entries were written as 1, 4 and 7
    assert_eq!(matrix.trace().unwrap(), 1.0 + 4.0 + 7.0);
}

#[test]
fn test_band_violation_stays_sparse() {
    let mut builder = SparseMatrixBuilder::<f64>::new(3, 3);
    builder.set(0, 0, 1.0);
    builder.set(0, 2, 5.0);
    assert_eq!(builder.into_matrix().kind(), MatrixKind::Sparse);

    let mut rectangular = SparseMatrixBuilder::<f64>::new(2, 3);
    rectangular.set(0, 0, 1.0);
    assert_eq!(rectangular.into_matrix().kind(), MatrixKind::Sparse);
}

#[test]
fn test_complete_builder_is_dense() {
    let mut builder = CompleteMatrixBuilder::<f64>::new(2, 2);
    builder.set(0, 0, 1.0);
    builder.set(1, 1, 1.0);
    let matrix = builder.into_matrix();
    assert_eq!(matrix.kind(), MatrixKind::Dense);
    assert_eq!(matrix, MatrixFactory::sparse().identity(2));
}

#[test]
fn test_zero_and_out_of_range_writes_are_ignored() {
    let mut builder = SparseVectorBuilder::<f64>::new(3);
    builder.set(1, 4.0);
    builder.set(1, 0.0);
    builder.set(7, 9.0);
    assert_eq!(builder.get(1), 4.0);
    assert_eq!(builder.nnz(), 1);

    let vector = builder.into_vector();
    assert_eq!(vector.indices(), &[1]);
    assert_eq!(vector.values(), &[4.0]);
}

#[test]
fn test_unwritten_rows_read_as_zero() {
    let mut builder = SparseMatrixBuilder::<f64>::new(4, 4);
    builder.set(3, 3, 2.0);
    assert_eq!(builder.row(0).nnz(), 0);
    assert_eq!(builder.row(1).get(2), 0.0);
    assert_eq!(builder.get(3, 3), 2.0);
}

#[test]
fn test_matrix_builders_iterate_all_and_non_zero() {
    let mut sparse = SparseMatrixBuilder::<f64>::new(2, 2);
    sparse.set(0, 1, 3.0);
    sparse.set(1, 1, -1.0);
    assert_eq!(
        sparse.iter().collect::<Vec<_>>(),
        vec![(0, 0, 0.0), (0, 1, 3.0), (1, 0, 0.0), (1, 1, -1.0)]
    );
    let mut staged: Vec<_> = sparse.non_zero().collect();
    staged.sort_by_key(|&(i, j, _)| (i, j));
    assert_eq!(staged, vec![(0, 1, 3.0), (1, 1, -1.0)]);

    let mut complete = CompleteMatrixBuilder::<f64>::new(1, 3);
    complete.set(0, 2, 8.0);
    let values: Vec<f64> = complete.iter().map(|(_, _, x)| x).collect();
    assert_eq!(values, vec![0.0, 0.0, 8.0]);
    assert_eq!(complete.non_zero().collect::<Vec<_>>(), vec![(0, 2, 8.0)]);
}

#[test]
fn test_registry_lookup() {
    let registry = BuilderRegistry::<f64>::default();
    assert_eq!(registry.matrix_kinds(), vec!["complete", "sparse"]);

    let mut builder = registry.matrix_builder("sparse", 2, 2).unwrap();
    builder.set(0, 1, 3.0);
    assert_eq!(builder.get(0, 1), 3.0);
    let matrix = builder.build();
    assert_eq!(matrix.kind(), MatrixKind::Tridiagonal);

    let mut vector = registry.vector_builder("complete", 2).unwrap();
    vector.set(0, 1.5);
    assert_eq!(vector.build().to_vec(), vec![1.5, 0.0]);

    assert!(matches!(
        registry.matrix_builder("banded", 2, 2),
        Err(MatrixError::Configuration(_))
    ));
}
