//! Immutable matrices
//!
//! [`Matrix`] wraps the three representations a builder can produce and
//! delegates to them. Results of operations on sparse and tridiagonal
//! matrices go back through the sparse builder, so they are stored in the
//! cheapest representation that fits; dense matrices stay dense.

pub mod decompose;
pub mod dense;
mod functions;
pub mod iter;
mod ops;
mod properties;
pub mod sparse;
pub mod tridiagonal;

use core::any::Any;
use core::fmt;

use spmat_core::{BuilderKind, MatrixAccess, MatrixElement, MatrixKind};

use crate::builder::build_matrix;
use crate::operand::Value;
use crate::vector::{SparseVector, Vector};

pub use decompose::{Eigensystem, Lup};
pub use dense::DenseMatrix;
pub use iter::Selector;
pub use sparse::SparseMatrix;
pub use tridiagonal::TridiagonalMatrix;

/// Immutable matrix in one of its representations
#[derive(Debug, Clone)]
pub enum Matrix<T: MatrixElement> {
    Sparse(SparseMatrix<T>),
    Tridiagonal(TridiagonalMatrix<T>),
    Dense(DenseMatrix<T>),
}

impl<T: MatrixElement> Matrix<T> {
    /// Copy any matrix-like value into a `Matrix`
    ///
    /// Known representations are cloned as they are; anything else is
    /// rebuilt through the sparse builder.
    pub fn from_access(matrix: &dyn MatrixAccess<T>) -> Self {
        if let Some(any) = matrix.as_any() {
            if let Some(m) = any.downcast_ref::<Matrix<T>>() {
                return m.clone();
            }
            if let Some(m) = any.downcast_ref::<SparseMatrix<T>>() {
                return Matrix::Sparse(m.clone());
            }
            if let Some(m) = any.downcast_ref::<TridiagonalMatrix<T>>() {
                return Matrix::Tridiagonal(m.clone());
            }
            if let Some(m) = any.downcast_ref::<DenseMatrix<T>>() {
                return Matrix::Dense(m.clone());
            }
        }
        let (rows, cols) = matrix.dimensions();
        build_matrix(BuilderKind::Sparse, rows, cols, |staging| {
            for (i, j, x) in matrix.non_zero_entries() {
                staging.set(i, j, x);
            }
        })
    }

    pub fn kind(&self) -> MatrixKind {
        match self {
            Matrix::Sparse(_) => MatrixKind::Sparse,
            Matrix::Tridiagonal(_) => MatrixKind::Tridiagonal,
            Matrix::Dense(_) => MatrixKind::Dense,
        }
    }

    /// Builder kind used for results derived from this matrix
    pub fn builder_kind(&self) -> BuilderKind {
        match self {
            Matrix::Sparse(_) | Matrix::Tridiagonal(_) => BuilderKind::Sparse,
            Matrix::Dense(_) => BuilderKind::Complete,
        }
    }

    pub fn row_size(&self) -> usize {
        self.dimensions().0
    }

    pub fn column_size(&self) -> usize {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Matrix::Sparse(m) => m.dimensions(),
            Matrix::Tridiagonal(m) => m.dimensions(),
            Matrix::Dense(m) => m.dimensions(),
        }
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        match self {
            Matrix::Sparse(m) => m.nnz(),
            Matrix::Tridiagonal(m) => m.nnz(),
            Matrix::Dense(m) => m.nnz(),
        }
    }

    /// Element at `(row, col)`, counting from the end when negative
    ///
    /// Returns zero for unset in-range positions and `None` outside
    /// `[-rows, rows) x [-cols, cols)`.
    pub fn get(&self, row: isize, col: isize) -> Option<T> {
        match self {
            Matrix::Sparse(m) => m.get(row, col),
            Matrix::Tridiagonal(m) => m.get(row, col),
            Matrix::Dense(m) => m.get(row, col),
        }
    }

    /// Element at an in-range position
    pub fn element(&self, row: usize, col: usize) -> T {
        match self {
            Matrix::Sparse(m) => m.element(row, col),
            Matrix::Tridiagonal(m) => m.element(row, col),
            Matrix::Dense(m) => m.element(row, col),
        }
    }

    pub fn row(&self, row: usize) -> Option<Vector<T>> {
        match self {
            Matrix::Sparse(m) => m.row(row).cloned().map(Vector::Sparse),
            Matrix::Tridiagonal(m) => m.row(row).map(Vector::Sparse),
            Matrix::Dense(m) => m.row(row).map(Vector::Dense),
        }
    }

    pub fn column(&self, col: usize) -> Option<Vector<T>> {
        match self {
            Matrix::Sparse(m) => m.column(col).map(Vector::Sparse),
            Matrix::Tridiagonal(m) => m.column(col).map(Vector::Sparse),
            Matrix::Dense(m) => m.column(col).map(Vector::Dense),
        }
    }

    pub fn row_vectors(&self) -> Vec<Vector<T>> {
        (0..self.row_size()).filter_map(|i| self.row(i)).collect()
    }

    pub fn column_vectors(&self) -> Vec<Vector<T>> {
        (0..self.column_size()).filter_map(|j| self.column(j)).collect()
    }

    /// Non-zero entries in row-major order
    pub fn non_zero(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        match self {
            Matrix::Sparse(m) => Box::new(m.non_zero()),
            Matrix::Tridiagonal(m) => Box::new(m.non_zero()),
            Matrix::Dense(m) => Box::new(m.non_zero()),
        }
    }

    /// Entries at the positions `selector` visits, row-major
    pub fn entries(&self, selector: Selector) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        let (rows, cols) = self.dimensions();
        match selector {
            Selector::NonZero => self.non_zero(),
            Selector::Diagonal => {
                Box::new((0..rows.min(cols)).map(move |i| (i, i, self.element(i, i))))
            }
            _ => Box::new((0..rows).flat_map(move |i| {
                (0..cols)
                    .filter(move |&j| selector.accepts(i, j))
                    .map(move |j| (i, j, self.element(i, j)))
            })),
        }
    }

    /// Dense matrix holding `f(x)` at every position `selector` visits
    ///
    /// Positions the selector skips are zero in the result.
    pub fn map(&self, selector: Selector, mut f: impl FnMut(T) -> T) -> Self {
        let (rows, cols) = self.dimensions();
        build_matrix(BuilderKind::Complete, rows, cols, |staging| {
            for (i, j, x) in self.entries(selector) {
                staging.set(i, j, f(x));
            }
        })
    }

    /// Apply `f` to every non-zero entry, keeping the representation
    ///
    /// Entries mapped to zero are dropped.
    pub fn map_non_zero(&self, f: impl FnMut(T) -> T) -> Self {
        match self {
            Matrix::Sparse(m) => Matrix::Sparse(m.map_non_zero(f)),
            Matrix::Tridiagonal(m) => Matrix::Tridiagonal(m.map_non_zero(f)),
            Matrix::Dense(m) => Matrix::Dense(m.map_non_zero(f)),
        }
    }

    /// First position, in `selector` order, whose value satisfies `predicate`
    pub fn index_of(
        &self,
        selector: Selector,
        mut predicate: impl FnMut(T) -> bool,
    ) -> Option<(usize, usize)> {
        self.entries(selector)
            .find(|&(_, _, x)| predicate(x))
            .map(|(i, j, _)| (i, j))
    }

    /// Dense copy
    pub fn to_dense(&self) -> DenseMatrix<T> {
        match self {
            Matrix::Dense(m) => m.clone(),
            other => DenseMatrix::from_access(other),
        }
    }

    /// Every element, row by row
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        let (rows, cols) = self.dimensions();
        (0..rows)
            .map(|i| (0..cols).map(|j| self.element(i, j)).collect())
            .collect()
    }

    /// Operands for retrying `number op self` with the number on the left
    pub fn coerce(&self, number: T) -> (Value<T>, Value<T>) {
        (Value::Number(number), Value::Matrix(self.clone()))
    }

    /// Same shape as `other` with every element within `epsilon`
    pub fn approx_eq(&self, other: &dyn MatrixAccess<T>, epsilon: T) -> bool {
        let (rows, cols) = self.dimensions();
        self.dimensions() == other.dimensions()
            && (0..rows).all(|i| {
                (0..cols).all(|j| self.element(i, j).approx_eq(other.element(i, j), epsilon))
            })
    }

    /// Equality with any matrix-like value, implicit zeros included
    pub fn equals(&self, other: &dyn MatrixAccess<T>) -> bool {
        self.dimensions() == other.dimensions()
            && self.non_zero().all(|(i, j, x)| other.element(i, j) == x)
            && other
                .non_zero_entries()
                .into_iter()
                .all(|(i, j, x)| self.element(i, j) == x)
    }

    /// Sparse rows of any representation
    pub(crate) fn sparse_row(&self, row: usize) -> SparseVector<T> {
        match self {
            Matrix::Sparse(m) => m.rows()[row].clone(),
            _ => SparseVector::from_ascending(self.column_size(), self.row_entries(row)),
        }
    }
}

impl<T: MatrixElement> MatrixAccess<T> for Matrix<T> {
    fn dimensions(&self) -> (usize, usize) {
        Matrix::dimensions(self)
    }

    fn element(&self, row: usize, col: usize) -> T {
        Matrix::element(self, row, col)
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        match self {
            Matrix::Sparse(m) => m.row_entries(row),
            Matrix::Tridiagonal(m) => m.row_entries(row),
            Matrix::Dense(m) => m.row_entries(row),
        }
    }

    fn non_zero_entries(&self) -> Vec<(usize, usize, T)> {
        self.non_zero().collect()
    }

    fn nnz(&self) -> usize {
        Matrix::nnz(self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl<T: MatrixElement> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: MatrixElement> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind())?;
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl<T: MatrixElement> From<SparseMatrix<T>> for Matrix<T> {
    fn from(m: SparseMatrix<T>) -> Self {
        Matrix::Sparse(m)
    }
}

impl<T: MatrixElement> From<TridiagonalMatrix<T>> for Matrix<T> {
    fn from(m: TridiagonalMatrix<T>) -> Self {
        Matrix::Tridiagonal(m)
    }
}

impl<T: MatrixElement> From<DenseMatrix<T>> for Matrix<T> {
    fn from(m: DenseMatrix<T>) -> Self {
        Matrix::Dense(m)
    }
}
