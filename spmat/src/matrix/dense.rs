//! Dense matrix backed by nalgebra
//!
//! Decompositions, inverses and ranks of every representation end up here:
//! sparse and tridiagonal matrices convert to dense storage first.

use core::any::Any;

use nalgebra::DMatrix;
use spmat_core::{resolve_index, MatrixAccess, MatrixElement, MatrixError, Result};

use crate::vector::DenseVector;

#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: MatrixElement> {
    data: DMatrix<T>,
}

impl<T: MatrixElement> DenseMatrix<T> {
    pub fn new(data: DMatrix<T>) -> Self {
        Self { data }
    }

    pub fn from_fn(rows: usize, cols: usize, f: impl FnMut(usize, usize) -> T) -> Self {
        Self::new(DMatrix::from_fn(rows, cols, f))
    }

    pub fn identity(size: usize) -> Self {
        Self::new(DMatrix::identity(size, size))
    }

    /// Dense copy of any matrix-like value
    pub fn from_access(matrix: &dyn MatrixAccess<T>) -> Self {
        if let Some(dense) = matrix.as_any().and_then(|any| any.downcast_ref::<Self>()) {
            return dense.clone();
        }
        let (rows, cols) = matrix.dimensions();
        let mut data = DMatrix::zeros(rows, cols);
        for (i, j, x) in matrix.non_zero_entries() {
            data[(i, j)] = x;
        }
        Self::new(data)
    }

    pub fn row_size(&self) -> usize {
        self.data.nrows()
    }

    pub fn column_size(&self) -> usize {
        self.data.ncols()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|x| !x.is_zero()).count()
    }

    /// Element at `(row, col)`, counting from the end when negative
    pub fn get(&self, row: isize, col: isize) -> Option<T> {
        let row = resolve_index(row, self.row_size())?;
        let col = resolve_index(col, self.column_size())?;
        Some(self.data[(row, col)])
    }

    pub fn element(&self, row: usize, col: usize) -> T {
        self.data[(row, col)]
    }

    pub fn row(&self, row: usize) -> Option<DenseVector<T>> {
        (row < self.row_size()).then(|| DenseVector::new(self.data.row(row).transpose()))
    }

    pub fn column(&self, col: usize) -> Option<DenseVector<T>> {
        (col < self.column_size()).then(|| DenseVector::new(self.data.column(col).into_owned()))
    }

    /// Non-zero entries in row-major order
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let (rows, cols) = self.dimensions();
        (0..rows).flat_map(move |i| {
            (0..cols).filter_map(move |j| {
                let x = self.data[(i, j)];
                (!x.is_zero()).then_some((i, j, x))
            })
        })
    }

    pub fn is_lower_triangular(&self) -> bool {
        self.non_zero().all(|(i, j, _)| j <= i)
    }

    pub fn is_upper_triangular(&self) -> bool {
        self.non_zero().all(|(i, j, _)| i <= j)
    }

    pub fn is_diagonal(&self) -> bool {
        self.non_zero().all(|(i, j, _)| i == j)
    }

    pub fn is_symmetric(&self) -> bool {
        self.data.is_square() && self.data == self.data.transpose()
    }

    pub fn is_permutation(&self) -> bool {
        let (rows, cols) = self.dimensions();
        if rows != cols {
            return false;
        }
        let mut seen = vec![false; cols];
        for i in 0..rows {
            let mut entries = (0..cols)
                .map(|j| (j, self.data[(i, j)]))
                .filter(|(_, x)| !x.is_zero());
            match (entries.next(), entries.next()) {
                (Some((j, x)), None) if x.is_one() && !seen[j] => seen[j] = true,
                _ => return false,
            }
        }
        true
    }

    pub fn transpose(&self) -> Self {
        Self::new(self.data.transpose())
    }

    /// Sum of the diagonal, caller guarantees a square matrix
    pub fn trace(&self) -> T {
        self.data.trace()
    }

    /// Determinant through LU, caller guarantees a square matrix
    pub fn determinant(&self) -> T {
        if self.data.is_empty() {
            return T::one();
        }
        self.data.clone().lu().determinant()
    }

    pub fn inverse(&self) -> Result<Self> {
        let (rows, columns) = self.dimensions();
        if rows != columns {
            return Err(MatrixError::NotSquare {
                op: "inverse",
                rows,
                columns,
            });
        }
        if rows == 0 {
            return Ok(self.clone());
        }
        self.data
            .clone()
            .try_inverse()
            .map(Self::new)
            .ok_or(MatrixError::SingularMatrix { rows, columns })
    }

    /// Number of singular values above `epsilon`
    pub fn rank(&self, epsilon: T) -> usize {
        if self.data.is_empty() {
            return 0;
        }
        self.data.rank(epsilon)
    }

    /// Apply `f` to every non-zero entry
    pub fn map_non_zero(&self, mut f: impl FnMut(T) -> T) -> Self {
        Self::new(self.data.map(|x| if x.is_zero() { x } else { f(x) }))
    }

    pub fn as_inner(&self) -> &DMatrix<T> {
        &self.data
    }

    pub fn into_inner(self) -> DMatrix<T> {
        self.data
    }
}

impl<T: MatrixElement> MatrixAccess<T> for DenseMatrix<T> {
    fn dimensions(&self) -> (usize, usize) {
        self.data.shape()
    }

    fn element(&self, row: usize, col: usize) -> T {
        self.data[(row, col)]
    }

    fn non_zero_entries(&self) -> Vec<(usize, usize, T)> {
        self.non_zero().collect()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_determinant_and_inverse() {
        let m = DenseMatrix::new(DMatrix::from_row_slice(2, 2, &[7.0, 6.0, 3.0, 9.0]));
        assert_relative_eq!(m.determinant(), 45.0, epsilon = 1e-10);

        let inverse = m.inverse().unwrap();
        let product = m.as_inner() * inverse.as_inner();
        assert_relative_eq!(product, DMatrix::identity(2, 2), epsilon = 1e-12);
    }

    #[test]
    fn test_singular_inverse() {
        let m = DenseMatrix::new(DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]));
        assert_eq!(
            m.inverse(),
            Err(MatrixError::SingularMatrix {
                rows: 2,
                columns: 2,
            })
        );
        assert_eq!(m.rank(1e-10), 1);
    }

    #[test]
    fn test_structure_and_views() {
        let m = DenseMatrix::new(DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, 0.0, 3.0, 0.0]));
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(-1, 1), Some(3.0));
        assert_eq!(m.row(0).map(|r| r.to_vec()), Some(vec![1.0, 0.0, 2.0]));
        assert_eq!(m.column(2).map(|c| c.to_vec()), Some(vec![2.0, 0.0]));
        assert!(!m.is_symmetric());
        assert!(!m.is_permutation());
        assert!(m.is_upper_triangular());
        assert_eq!(m.transpose().dimensions(), (3, 2));
    }
}
