//! Row-wise sparse matrix

use core::any::Any;

use spmat_core::{resolve_index, MatrixAccess, MatrixElement};

use crate::vector::{IterMode, SparseVector};

/// Immutable matrix stored as one sparse vector per row
///
/// Columns are derived on demand; row access is the cheap direction.
#[derive(Debug, Clone)]
pub struct SparseMatrix<T> {
    row_size: usize,
    column_size: usize,
    rows: Vec<SparseVector<T>>,
}

impl<T: MatrixElement> SparseMatrix<T> {
    pub(crate) fn from_rows(
        row_size: usize,
        column_size: usize,
        rows: Vec<SparseVector<T>>,
    ) -> Self {
        debug_assert_eq!(rows.len(), row_size);
        debug_assert!(rows.iter().all(|row| row.size() == column_size));
        Self {
            row_size,
            column_size,
            rows,
        }
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn column_size(&self) -> usize {
        self.column_size
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.row_size, self.column_size)
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVector::nnz).sum()
    }

    /// Element at `(row, col)`, counting from the end when negative
    pub fn get(&self, row: isize, col: isize) -> Option<T> {
        let row = resolve_index(row, self.row_size)?;
        let col = resolve_index(col, self.column_size)?;
        Some(self.rows[row].component(col))
    }

    pub fn element(&self, row: usize, col: usize) -> T {
        self.rows[row].component(col)
    }

    pub fn row(&self, row: usize) -> Option<&SparseVector<T>> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[SparseVector<T>] {
        &self.rows
    }

    /// Column `col`, assembled from every row
    pub fn column(&self, col: usize) -> Option<SparseVector<T>> {
        if col >= self.column_size {
            return None;
        }
        Some(SparseVector::from_ascending(
            self.row_size,
            self.rows
                .iter()
                .enumerate()
                .map(|(i, row)| (i, row.component(col))),
        ))
    }

    /// Non-zero entries in row-major order
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.non_zero().map(move |(j, x)| (i, j, x)))
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
        self.row_size == self.column_size
            && self.non_zero().all(|(i, j, x)| self.element(j, i) == x)
    }

    /// Exactly one stored entry per row and per column, each equal to one
    pub fn is_permutation(&self) -> bool {
        if self.row_size != self.column_size {
            return false;
        }
        let mut seen = vec![false; self.column_size];
        for row in &self.rows {
            let mut entries = row.non_zero();
            match (entries.next(), entries.next()) {
                (Some((j, x)), None) if x.is_one() && !seen[j] => seen[j] = true,
                _ => return false,
            }
        }
        true
    }

    /// Apply `f` to every stored entry, keeping the row layout
    pub fn map_non_zero(&self, mut f: impl FnMut(T) -> T) -> Self {
        Self::from_rows(
            self.row_size,
            self.column_size,
            self.rows
                .iter()
                .map(|row| row.map(IterMode::NonZero, &mut f))
                .collect(),
        )
    }
}

impl<T: MatrixElement> MatrixAccess<T> for SparseMatrix<T> {
    fn dimensions(&self) -> (usize, usize) {
        (self.row_size, self.column_size)
    }

    fn element(&self, row: usize, col: usize) -> T {
        self.rows[row].component(col)
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        self.rows[row].non_zero().collect()
    }

    fn non_zero_entries(&self) -> Vec<(usize, usize, T)> {
        self.non_zero().collect()
    }

    fn nnz(&self) -> usize {
        SparseMatrix::nnz(self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}
