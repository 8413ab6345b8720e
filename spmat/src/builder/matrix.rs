//! Matrix builders
//!
//! Staging is row-wise: each touched row owns a [`SparseVectorBuilder`],
//! created lazily on the first non-zero write. Reads from untouched rows go
//! to a shared zero-length row so no allocation happens on lookup.

use hashbrown::HashMap;
use nalgebra::DMatrix;
use spmat_core::{BuilderKind, MatrixElement, MatrixKind};
use tracing::debug;

use super::registry::BuilderRegistry;
use super::vector::SparseVectorBuilder;
use crate::matrix::{DenseMatrix, Matrix, SparseMatrix, TridiagonalMatrix};
use crate::vector::SparseVector;

/// Mutable staging area that materializes an immutable matrix
pub trait MatrixBuilder<T: MatrixElement> {
    fn row_size(&self) -> usize;

    fn column_size(&self) -> usize;

    /// Staged value at `(row, col)`, zero when unset
    fn get(&self, row: usize, col: usize) -> T;

    /// Stage `value` at `(row, col)`, ignoring zeros and out-of-range positions
    fn set(&mut self, row: usize, col: usize, value: T);

    /// Consume the builder and produce the matrix
    fn build(self: Box<Self>) -> Matrix<T>;
}

/// Row-wise staging shared by the matrix builders
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStaging<T: MatrixElement> {
    row_size: usize,
    column_size: usize,
    rows: HashMap<usize, SparseVectorBuilder<T>>,
    empty_row: SparseVectorBuilder<T>,
}

impl<T: MatrixElement> MatrixStaging<T> {
    pub fn new(row_size: usize, column_size: usize) -> Self {
        Self {
            row_size,
            column_size,
            rows: HashMap::new(),
            empty_row: SparseVectorBuilder::new(0),
        }
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn column_size(&self) -> usize {
        self.column_size
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.row(row).get(col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if value.is_zero() || row >= self.row_size || col >= self.column_size {
            return;
        }
        let column_size = self.column_size;
        self.rows
            .entry(row)
            .or_insert_with(|| SparseVectorBuilder::new(column_size))
            .set(col, value);
    }

    /// Staged row, or the shared empty row when nothing was written to it
    pub fn row(&self, row: usize) -> &SparseVectorBuilder<T> {
        self.rows.get(&row).unwrap_or(&self.empty_row)
    }

    /// Every position as `(row, col, value)` in row-major order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.row_size).flat_map(move |row| {
            let staged = self.row(row);
            (0..self.column_size).map(move |col| (row, col, staged.get(col)))
        })
    }

    /// Staged entries as `(row, col, value)`, in no particular order
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows.iter().flat_map(|(&row, staged)| {
            staged
                .non_zero()
                .map(move |(col, value)| (row, col, value))
        })
    }

    pub fn nnz(&self) -> usize {
        self.rows.values().map(SparseVectorBuilder::nnz).sum()
    }

    /// Whether every staged entry lies on the three central diagonals of a
    /// square matrix
    pub fn fits_tridiagonal(&self) -> bool {
        self.row_size == self.column_size
            && self.non_zero().all(|(row, col, _)| row.abs_diff(col) <= 1)
    }

    /// Materialize as one sparse vector per row
    fn into_sparse(mut self) -> SparseMatrix<T> {
        let column_size = self.column_size;
        let rows = (0..self.row_size)
            .map(|row| {
                self.rows.remove(&row).map_or_else(
                    || SparseVector::zeros(column_size),
                    SparseVectorBuilder::into_vector,
                )
            })
            .collect();
        SparseMatrix::from_rows(self.row_size, column_size, rows)
    }

    /// Materialize as band vectors; only valid when [`Self::fits_tridiagonal`]
    fn into_tridiagonal(self) -> TridiagonalMatrix<T> {
        TridiagonalMatrix::from_entries(self.row_size, self.non_zero())
    }

    fn into_dense(self) -> DenseMatrix<T> {
        let mut data = DMatrix::zeros(self.row_size, self.column_size);
        for (row, col, value) in self.non_zero() {
            data[(row, col)] = value;
        }
        DenseMatrix::new(data)
    }
}

/// Builder producing the cheapest sparse representation
///
/// Square matrices whose entries all satisfy `|i - j| <= 1` become
/// [`TridiagonalMatrix`]; everything else becomes [`SparseMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrixBuilder<T: MatrixElement> {
    staging: MatrixStaging<T>,
}

impl<T: MatrixElement> SparseMatrixBuilder<T> {
    pub fn new(row_size: usize, column_size: usize) -> Self {
        Self::from_staging(MatrixStaging::new(row_size, column_size))
    }

    pub(crate) fn from_staging(staging: MatrixStaging<T>) -> Self {
        Self { staging }
    }

    pub fn row_size(&self) -> usize {
        self.staging.row_size()
    }

    pub fn column_size(&self) -> usize {
        self.staging.column_size()
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.staging.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.staging.set(row, col, value)
    }

    /// Every position in row-major order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.staging.iter()
    }

    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.staging.non_zero()
    }

    pub fn row(&self, row: usize) -> &SparseVectorBuilder<T> {
        self.staging.row(row)
    }

    pub fn staging(&self) -> &MatrixStaging<T> {
        &self.staging
    }

    /// Materialize, choosing between tridiagonal and general sparse storage
    pub fn into_matrix(self) -> Matrix<T> {
        let (rows, columns, nnz) = (
            self.staging.row_size(),
            self.staging.column_size(),
            self.staging.nnz(),
        );
        let matrix = if self.staging.fits_tridiagonal() {
            Matrix::Tridiagonal(self.staging.into_tridiagonal())
        } else {
            Matrix::Sparse(self.staging.into_sparse())
        };
        debug!(rows, columns, nnz, kind = %matrix.kind(), "materialized sparse builder");
        matrix
    }

    /// Register under [`BuilderKind::Sparse`]
    pub fn register(registry: &mut BuilderRegistry<T>) {
        registry.register_matrix(BuilderKind::Sparse.name(), |rows, cols| {
            Box::new(SparseMatrixBuilder::new(rows, cols)) as Box<dyn MatrixBuilder<T>>
        });
    }
}

impl<T: MatrixElement> MatrixBuilder<T> for SparseMatrixBuilder<T> {
    fn row_size(&self) -> usize {
        self.staging.row_size()
    }

    fn column_size(&self) -> usize {
        self.staging.column_size()
    }

    fn get(&self, row: usize, col: usize) -> T {
        self.staging.get(row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: T) {
        self.staging.set(row, col, value)
    }

    fn build(self: Box<Self>) -> Matrix<T> {
        self.into_matrix()
    }
}

/// Builder producing a [`DenseMatrix`]
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteMatrixBuilder<T: MatrixElement> {
    staging: MatrixStaging<T>,
}

impl<T: MatrixElement> CompleteMatrixBuilder<T> {
    pub fn new(row_size: usize, column_size: usize) -> Self {
        Self::from_staging(MatrixStaging::new(row_size, column_size))
    }

    pub(crate) fn from_staging(staging: MatrixStaging<T>) -> Self {
        Self { staging }
    }

    pub fn row_size(&self) -> usize {
        self.staging.row_size()
    }

    pub fn column_size(&self) -> usize {
        self.staging.column_size()
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.staging.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.staging.set(row, col, value)
    }

    /// Every position in row-major order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.staging.iter()
    }

    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.staging.non_zero()
    }

    pub fn into_matrix(self) -> Matrix<T> {
        debug!(
            rows = self.staging.row_size(),
            columns = self.staging.column_size(),
            kind = %MatrixKind::Dense,
            "materialized complete builder"
        );
        Matrix::Dense(self.staging.into_dense())
    }

    /// Register under [`BuilderKind::Complete`]
    pub fn register(registry: &mut BuilderRegistry<T>) {
        registry.register_matrix(BuilderKind::Complete.name(), |rows, cols| {
            Box::new(CompleteMatrixBuilder::new(rows, cols)) as Box<dyn MatrixBuilder<T>>
        });
    }
}

impl<T: MatrixElement> MatrixBuilder<T> for CompleteMatrixBuilder<T> {
    fn row_size(&self) -> usize {
        self.staging.row_size()
    }

    fn column_size(&self) -> usize {
        self.staging.column_size()
    }

    fn get(&self, row: usize, col: usize) -> T {
        self.staging.get(row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: T) {
        self.staging.set(row, col, value)
    }

    fn build(self: Box<Self>) -> Matrix<T> {
        self.into_matrix()
    }
}
