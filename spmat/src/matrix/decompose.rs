//! LUP and eigen decompositions on top of the dense backend

use core::cmp::Ordering;

use nalgebra::{DMatrix, DVector, Dyn, Schur, SymmetricEigen, LU};
use spmat_core::{MatrixElement, MatrixError, Result, VectorAccess};
use tracing::{debug, warn};

use super::{DenseMatrix, Matrix};
use crate::config::NumericConfig;
use crate::vector::{DenseVector, Vector};

/// LUP decomposition `P * A = L * U`
#[derive(Debug, Clone)]
pub struct Lup<T: MatrixElement> {
    l: Matrix<T>,
    u: Matrix<T>,
    p: Matrix<T>,
    shape: (usize, usize),
    lu: LU<T, Dyn, Dyn>,
}

impl<T: MatrixElement> Lup<T> {
    pub(crate) fn new(data: DMatrix<T>) -> Self {
        let shape = data.shape();
        let rows = shape.0;
        let lu = data.lu();
        let mut p = DMatrix::identity(rows, rows);
        lu.p().permute_rows(&mut p);
        Self {
            l: Matrix::Dense(DenseMatrix::new(lu.l())),
            u: Matrix::Dense(DenseMatrix::new(lu.u())),
            p: Matrix::Dense(DenseMatrix::new(p)),
            shape,
            lu,
        }
    }

    /// Unit lower-triangular factor
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper-triangular factor
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Row permutation
    pub fn p(&self) -> &Matrix<T> {
        &self.p
    }

    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.l, self.u, self.p)
    }

    fn ensure_square(&self, op: &'static str) -> Result<usize> {
        let (rows, columns) = self.shape;
        if rows != columns {
            return Err(MatrixError::NotSquare { op, rows, columns });
        }
        Ok(rows)
    }

    /// Determinant of the decomposed matrix
    pub fn determinant(&self) -> Result<T> {
        let size = self.ensure_square("determinant")?;
        if size == 0 {
            return Ok(T::one());
        }
        Ok(self.lu.determinant())
    }

    /// Solve `A x = b`
    pub fn solve(&self, b: &dyn VectorAccess<T>) -> Result<Vector<T>> {
        let size = self.ensure_square("solve")?;
        if b.size() != size {
            return Err(MatrixError::DimensionMismatch {
                op: "solve",
                left: (size, size),
                right: (b.size(), 1),
            });
        }
        let rhs = DVector::from_fn(size, |i, _| b.component(i));
        self.lu
            .solve(&rhs)
            .map(|x| Vector::Dense(DenseVector::new(x)))
            .ok_or(MatrixError::SingularMatrix {
                rows: size,
                columns: size,
            })
    }
}

/// Eigen decomposition `A = V * D * V^-1` with `D` diagonal
#[derive(Debug, Clone)]
pub struct Eigensystem<T: MatrixElement> {
    v: Matrix<T>,
    d: Matrix<T>,
    v_inv: Matrix<T>,
    eigenvalues: Vec<T>,
}

impl<T: MatrixElement> Eigensystem<T> {
    fn from_dense(dense: DenseEigen<T>) -> Self {
        let d = DMatrix::from_diagonal(&DVector::from_column_slice(&dense.eigenvalues));
        Self {
            v: Matrix::Dense(DenseMatrix::new(dense.v)),
            d: Matrix::Dense(DenseMatrix::new(d)),
            v_inv: Matrix::Dense(DenseMatrix::new(dense.v_inv)),
            eigenvalues: dense.eigenvalues,
        }
    }

    /// Eigenvectors as columns
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Eigenvalues on the diagonal
    pub fn d(&self) -> &Matrix<T> {
        &self.d
    }

    /// Inverse of [`Eigensystem::v`]
    pub fn v_inv(&self) -> &Matrix<T> {
        &self.v_inv
    }

    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// Columns of [`Eigensystem::v`]
    pub fn eigenvectors(&self) -> Vec<Vector<T>> {
        self.v.column_vectors()
    }

    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.v, self.d, self.v_inv)
    }

    /// `V * D * V^-1`
    pub fn recompose(&self) -> Result<Matrix<T>> {
        self.v.multiply_matrix(&self.d)?.multiply_matrix(&self.v_inv)
    }
}

/// Eigen decomposition kept in backend types
pub(crate) struct DenseEigen<T: MatrixElement> {
    v: DMatrix<T>,
    eigenvalues: Vec<T>,
    v_inv: DMatrix<T>,
}

impl<T: MatrixElement> DenseEigen<T> {
    pub(crate) fn into_eigensystem(self) -> Eigensystem<T> {
        Eigensystem::from_dense(self)
    }

    /// `V * D^exponent * V^-1`
    pub(crate) fn power(&self, exponent: T) -> Result<DMatrix<T>> {
        let fractional = !exponent.fract().is_zero();
        let mut powers = Vec::with_capacity(self.eigenvalues.len());
        for &value in &self.eigenvalues {
            if value.is_zero() && exponent < T::zero() {
                let size = self.v.nrows();
                return Err(MatrixError::SingularMatrix {
                    rows: size,
                    columns: size,
                });
            }
            if value < T::zero() && fractional {
                return Err(MatrixError::Decomposition(format!(
                    "negative eigenvalue {} has no real power {}",
                    value, exponent
                )));
            }
            powers.push(value.powf(exponent));
        }
        let d = DMatrix::from_diagonal(&DVector::from_vec(powers));
        Ok(&self.v * d * &self.v_inv)
    }
}

fn is_symmetric_within<T: MatrixElement>(data: &DMatrix<T>, epsilon: T) -> bool {
    let n = data.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| data[(i, j)].approx_eq(data[(j, i)], epsilon)))
}

/// Eigen decomposition of a square dense matrix
///
/// Symmetric input uses the symmetric solver and an orthogonal `V`. Other
/// input takes real eigenvalues from the Schur form and eigenvectors from
/// the null space of `A - lambda I`, which fails for complex spectra and
/// for defective matrices.
pub(crate) fn eigen<T: MatrixElement>(
    data: &DMatrix<T>,
    config: &NumericConfig,
) -> Result<DenseEigen<T>> {
    let n = data.nrows();
    let epsilon = config.epsilon::<T>();
    if n == 0 {
        return Ok(DenseEigen {
            v: DMatrix::zeros(0, 0),
            eigenvalues: Vec::new(),
            v_inv: DMatrix::zeros(0, 0),
        });
    }

    if is_symmetric_within(data, epsilon) {
        debug!(rows = n, "symmetric eigen decomposition");
        let eigen = SymmetricEigen::try_new(data.clone(), epsilon, config.eigen_max_iterations)
            .ok_or_else(|| {
                MatrixError::Decomposition("symmetric eigen solver did not converge".to_string())
            })?;
        let v_inv = eigen.eigenvectors.transpose();
        return Ok(DenseEigen {
            eigenvalues: eigen.eigenvalues.iter().copied().collect(),
            v: eigen.eigenvectors,
            v_inv,
        });
    }

    warn!(rows = n, "matrix is not symmetric, using Schur eigenvalues and null space eigenvectors");
    let schur = Schur::try_new(data.clone(), epsilon, config.eigen_max_iterations)
        .ok_or_else(|| MatrixError::Decomposition("Schur iteration did not converge".to_string()))?;
    let values = schur
        .eigenvalues()
        .ok_or_else(|| MatrixError::Decomposition("matrix has complex eigenvalues".to_string()))?;

    // Repeated eigenvalues share one null space; group them so each group
    // contributes as many independent vectors as its multiplicity.
    let tolerance = T::from_float(config.epsilon.sqrt());
    let mut groups: Vec<(T, usize)> = Vec::new();
    for &value in values.iter() {
        match groups
            .iter_mut()
            .find(|(existing, _)| existing.approx_eq(value, tolerance))
        {
            Some(group) => group.1 += 1,
            None => groups.push((value, 1)),
        }
    }

    let mut eigenvalues = Vec::with_capacity(n);
    let mut columns: Vec<DVector<T>> = Vec::with_capacity(n);
    for (value, multiplicity) in groups {
        let shifted = data - DMatrix::from_diagonal_element(n, n, value);
        let svd = shifted.svd(false, true);
        let v_t = svd.v_t.ok_or_else(|| {
            MatrixError::Decomposition("SVD produced no right singular vectors".to_string())
        })?;
        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| {
            svd.singular_values[a]
                .partial_cmp(&svd.singular_values[b])
                .unwrap_or(Ordering::Equal)
        });
        for &k in order.iter().take(multiplicity) {
            columns.push(v_t.row(k).transpose());
            eigenvalues.push(value);
        }
    }

    let v = DMatrix::from_columns(&columns);
    let v_inv = v.clone().try_inverse().ok_or_else(|| {
        MatrixError::Decomposition(
            "eigenvectors are linearly dependent, matrix is not diagonalizable".to_string(),
        )
    })?;
    Ok(DenseEigen {
        v,
        eigenvalues,
        v_inv,
    })
}
