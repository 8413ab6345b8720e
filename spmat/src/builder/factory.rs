//! Convenience constructors on top of the builders

use spmat_core::{BuilderKind, MatrixElement};

use super::{build_matrix, build_vector};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Matrix constructors for one builder kind
///
/// ```
/// use spmat::MatrixFactory;
///
/// let m = MatrixFactory::sparse().from_rows(&[[7.0, 6.0], [3.0, 9.0]]);
/// assert_eq!(m.get(1, 0), Some(3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixFactory {
    kind: BuilderKind,
}

impl MatrixFactory {
    pub const fn new(kind: BuilderKind) -> Self {
        Self { kind }
    }

    pub const fn sparse() -> Self {
        Self::new(BuilderKind::Sparse)
    }

    pub const fn complete() -> Self {
        Self::new(BuilderKind::Complete)
    }

    pub const fn kind(&self) -> BuilderKind {
        self.kind
    }

    /// Matrix whose entry `(i, j)` is `f(i, j)`
    pub fn build<T: MatrixElement>(
        &self,
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Matrix<T> {
        build_matrix(self.kind, rows, cols, |staging| {
            for i in 0..rows {
                for j in 0..cols {
                    staging.set(i, j, f(i, j));
                }
            }
        })
    }

    /// Matrix from row slices; the column count comes from the first row
    pub fn from_rows<T: MatrixElement, R: AsRef<[T]>>(&self, rows: &[R]) -> Matrix<T> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        build_matrix(self.kind, rows.len(), cols, |staging| {
            for (i, row) in rows.iter().enumerate() {
                for (j, &value) in row.as_ref().iter().enumerate() {
                    staging.set(i, j, value);
                }
            }
        })
    }

    /// Matrix from column slices; the row count comes from the first column
    pub fn from_columns<T: MatrixElement, C: AsRef<[T]>>(&self, columns: &[C]) -> Matrix<T> {
        let rows = columns.first().map_or(0, |column| column.as_ref().len());
        build_matrix(self.kind, rows, columns.len(), |staging| {
            for (j, column) in columns.iter().enumerate() {
                for (i, &value) in column.as_ref().iter().enumerate() {
                    staging.set(i, j, value);
                }
            }
        })
    }

    /// Square matrix with `values` on the diagonal
    pub fn diagonal<T: MatrixElement>(&self, values: &[T]) -> Matrix<T> {
        build_matrix(self.kind, values.len(), values.len(), |staging| {
            for (i, &value) in values.iter().enumerate() {
                staging.set(i, i, value);
            }
        })
    }

    /// Square matrix with `value` repeated on the diagonal
    pub fn scalar<T: MatrixElement>(&self, size: usize, value: T) -> Matrix<T> {
        build_matrix(self.kind, size, size, |staging| {
            for i in 0..size {
                staging.set(i, i, value);
            }
        })
    }

    pub fn identity<T: MatrixElement>(&self, size: usize) -> Matrix<T> {
        self.scalar(size, T::one())
    }

    pub fn zero<T: MatrixElement>(&self, rows: usize, cols: usize) -> Matrix<T> {
        build_matrix(self.kind, rows, cols, |_| {})
    }

    /// `1 x n` matrix
    pub fn row_vector<T: MatrixElement>(&self, values: &[T]) -> Matrix<T> {
        self.from_rows(&[values])
    }

    /// `n x 1` matrix
    pub fn column_vector<T: MatrixElement>(&self, values: &[T]) -> Matrix<T> {
        self.from_columns(&[values])
    }
}

impl Default for MatrixFactory {
    fn default() -> Self {
        Self::sparse()
    }
}

/// Vector constructors for one builder kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorFactory {
    kind: BuilderKind,
}

impl VectorFactory {
    pub const fn new(kind: BuilderKind) -> Self {
        Self { kind }
    }

    pub const fn sparse() -> Self {
        Self::new(BuilderKind::Sparse)
    }

    pub const fn complete() -> Self {
        Self::new(BuilderKind::Complete)
    }

    pub fn from_values<T: MatrixElement>(&self, values: &[T]) -> Vector<T> {
        build_vector(self.kind, values.len(), |staging| {
            for (i, &value) in values.iter().enumerate() {
                staging.set(i, value);
            }
        })
    }

    pub fn zero<T: MatrixElement>(&self, size: usize) -> Vector<T> {
        build_vector(self.kind, size, |_| {})
    }

    /// Unit vector along `index`
    pub fn basis<T: MatrixElement>(&self, size: usize, index: usize) -> Vector<T> {
        build_vector(self.kind, size, |staging| staging.set(index, T::one()))
    }
}

impl Default for VectorFactory {
    fn default() -> Self {
        Self::sparse()
    }
}
