use approx::assert_relative_eq;
use spmat::{Matrix, MatrixError, MatrixFactory, MatrixKind, NumericConfig, VectorFactory};

fn sample() -> Matrix<f64> {
    MatrixFactory::sparse().from_rows(&[[1.0, 2.0, 0.0], [3.0, 4.0, 4.0], [5.0, 6.0, 3.0]])
}

#[test]
fn test_lup_reconstructs_permuted_matrix() {
    let m = sample();
    let lup = m.lup();
    let lu = lup.l().multiply_matrix(lup.u()).unwrap();
    let pm = lup.p().multiply_matrix(&m).unwrap();
    assert!(lu.approx_eq(&pm, 1e-12));
    assert!(lup.l().is_lower_triangular());
    assert!(lup.u().is_upper_triangular());
    assert!(lup.p().is_permutation());
}

#[test]
fn test_lup_solve() {
    let m = sample();
    let b = VectorFactory::sparse().from_values(&[5.0, 23.0, 26.0]);
    let x = m.lup().solve(&b).unwrap();
    let expected = [1.0, 2.0, 3.0];
    for (component, want) in x.to_vec().into_iter().zip(expected) {
        assert_relative_eq!(component, want, epsilon = 1e-10);
    }
}

#[test]
fn test_determinant_across_representations() {
    let sparse = sample();
    let dense = MatrixFactory::complete().from_rows(&sparse.to_rows());
    assert_relative_eq!(
        sparse.determinant().unwrap(),
        dense.determinant().unwrap(),
        epsilon = 1e-10
    );
    assert_relative_eq!(
        sparse.lup().determinant().unwrap(),
        sparse.determinant().unwrap(),
        epsilon = 1e-10
    );

    let tri = MatrixFactory::sparse().from_rows(&[
        [2.0, -1.0, 0.0],
        [-1.0, 2.0, -1.0],
        [0.0, -1.0, 2.0],
    ]);
    assert_eq!(tri.kind(), MatrixKind::Tridiagonal);
    assert_relative_eq!(tri.determinant().unwrap(), 4.0, epsilon = 1e-12);
}

#[test]
fn test_rank_and_regularity() {
    let singular = MatrixFactory::sparse().from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
    assert_eq!(singular.rank(), 1);
    assert!(singular.is_singular().unwrap());
    assert!(sample().is_regular().unwrap());
    assert_eq!(MatrixFactory::sparse().zero::<f64>(3, 3).rank(), 0);
    assert!(matches!(
        MatrixFactory::sparse().zero::<f64>(2, 3).is_regular(),
        Err(MatrixError::NotSquare { .. })
    ));
}

#[test]
fn test_symmetric_eigensystem_recomposes() {
    let m = MatrixFactory::sparse().from_rows(&[[2.0, 1.0], [1.0, 2.0]]);
    let system = m.eigensystem().unwrap();
    let mut values = system.eigenvalues().to_vec();
    values.sort_by(f64::total_cmp);
    assert_relative_eq!(values[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(values[1], 3.0, epsilon = 1e-10);
    assert!(system.recompose().unwrap().approx_eq(&m, 1e-10));
    assert_eq!(system.d().kind(), MatrixKind::Dense);
}

#[test]
fn test_general_eigensystem_recomposes() {
    let m = MatrixFactory::sparse().from_rows(&[[4.0, 1.0], [2.0, 3.0]]);
    let system = m.eigensystem_with(&NumericConfig::with_epsilon(1e-12)).unwrap();
    let mut values = system.eigenvalues().to_vec();
    values.sort_by(f64::total_cmp);
    assert_relative_eq!(values[0], 2.0, epsilon = 1e-8);
    assert_relative_eq!(values[1], 5.0, epsilon = 1e-8);
    assert!(system.recompose().unwrap().approx_eq(&m, 1e-8));
}

#[test]
fn test_fractional_power() {
    let m = MatrixFactory::sparse().from_rows(&[[2.0, 1.0], [1.0, 2.0]]);
    let root = m.try_pow(spmat::Exponent::Real(0.5)).unwrap();
    let square = root.multiply_matrix(&root).unwrap();
    assert!(square.approx_eq(&m, 1e-10));
}

#[test]
fn test_minor_and_transpose() {
    let m = sample();
    let minor = m.minor(1..3, 0..2).unwrap();
    assert_eq!(minor.to_rows(), vec![vec![3.0, 4.0], vec![5.0, 6.0]]);
    assert!(matches!(m.minor(2..4, 0..1), Err(MatrixError::DimensionMismatch { .. })));
    assert_eq!(m.transpose().transpose(), m);
    assert_eq!(m.transpose().get(0, 2), Some(5.0));
}
