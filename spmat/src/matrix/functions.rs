//! Scalar functions, transforms and decompositions of a matrix

use core::ops::Range;

use spmat_core::{ensure_square, BuilderKind, MatrixAccess, MatrixElement, MatrixError, Result};

use super::decompose::{eigen, Eigensystem, Lup};
use super::Matrix;
use crate::builder::build_matrix;
use crate::config::NumericConfig;

impl<T: MatrixElement> Matrix<T> {
    /// Sum of the diagonal
    pub fn trace(&self) -> Result<T> {
        ensure_square("trace", self.dimensions())?;
        Ok(match self {
            Matrix::Tridiagonal(m) => m.trace(),
            Matrix::Dense(m) => m.trace(),
            Matrix::Sparse(m) => m
                .non_zero()
                .filter(|&(i, j, _)| i == j)
                .fold(T::zero(), |acc, (_, _, x)| acc + x),
        })
    }

    /// Determinant; tridiagonal matrices use the linear-time recurrence
    pub fn determinant(&self) -> Result<T> {
        ensure_square("determinant", self.dimensions())?;
        Ok(match self {
            Matrix::Tridiagonal(m) => m.determinant(),
            Matrix::Dense(m) => m.determinant(),
            Matrix::Sparse(_) => self.to_dense().determinant(),
        })
    }

    /// Number of linearly independent rows
    pub fn rank(&self) -> usize {
        self.rank_with(&NumericConfig::default())
    }

    pub fn rank_with(&self, config: &NumericConfig) -> usize {
        self.to_dense().rank(config.epsilon())
    }

    /// Transpose, staying in the same family
    pub fn transpose(&self) -> Self {
        match self {
            Matrix::Tridiagonal(m) => Matrix::Tridiagonal(m.transpose()),
            Matrix::Dense(m) => Matrix::Dense(m.transpose()),
            Matrix::Sparse(m) => {
                let (rows, cols) = m.dimensions();
                build_matrix(BuilderKind::Sparse, cols, rows, |staging| {
                    for (i, j, x) in m.non_zero() {
                        staging.set(j, i, x);
                    }
                })
            }
        }
    }

    /// Inverse in dense storage
    ///
    /// Fails with `SingularMatrix` unless the matrix has full rank.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&NumericConfig::default())
    }

    pub fn inverse_with(&self, config: &NumericConfig) -> Result<Self> {
        let (rows, columns) = self.dimensions();
        ensure_square("inverse", (rows, columns))?;
        if self.rank_with(config) < rows {
            return Err(MatrixError::SingularMatrix { rows, columns });
        }
        self.to_dense().inverse().map(Matrix::Dense)
    }

    /// Round every entry to `digits` decimal places
    pub fn round(&self, digits: i32) -> Self {
        let factor = T::from_float(10f64.powi(digits));
        self.map_non_zero(|x| (x * factor).round() / factor)
    }

    /// Sub-matrix over the given row and column ranges
    pub fn minor(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        let (row_size, column_size) = self.dimensions();
        if rows.start > rows.end
            || rows.end > row_size
            || cols.start > cols.end
            || cols.end > column_size
        {
            return Err(MatrixError::DimensionMismatch {
                op: "minor",
                left: (row_size, column_size),
                right: (rows.end, cols.end),
            });
        }
        Ok(build_matrix(self.builder_kind(), rows.len(), cols.len(), |staging| {
            for i in rows.clone() {
                for (j, x) in self.row_entries(i) {
                    if cols.contains(&j) {
                        staging.set(i - rows.start, j - cols.start, x);
                    }
                }
            }
        }))
    }

    /// Sub-matrix of `row_count x col_count` starting at `(row, col)`
    pub fn minor_at(
        &self,
        row: usize,
        row_count: usize,
        col: usize,
        col_count: usize,
    ) -> Result<Self> {
        self.minor(row..row + row_count, col..col + col_count)
    }

    /// LUP decomposition `P * A = L * U`
    pub fn lup(&self) -> Lup<T> {
        Lup::new(self.to_dense().into_inner())
    }

    /// Eigen decomposition `A = V * D * V^-1`
    pub fn eigensystem(&self) -> Result<Eigensystem<T>> {
        self.eigensystem_with(&NumericConfig::default())
    }

    pub fn eigensystem_with(&self, config: &NumericConfig) -> Result<Eigensystem<T>> {
        ensure_square("eigensystem", self.dimensions())?;
        eigen(self.to_dense().as_inner(), config).map(|dense| dense.into_eigensystem())
    }
}
