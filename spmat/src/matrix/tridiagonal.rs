//! Tridiagonal matrix stored as three bands
//!
//! For an `n x n` matrix the diagonal holds `n` values and the upper and
//! lower bands hold `n - 1` each. Entry `(i, j)` lives in the band selected
//! by `i - j`, at position `min(i, j)`:
//!
//! | `i - j` | band     |
//! |---------|----------|
//! | -1      | upper    |
//! | 0       | diagonal |
//! | 1       | lower    |
//!
//! Any other offset reads from a zero-length band and yields zero.

use core::any::Any;

use spmat_core::{resolve_index, MatrixAccess, MatrixElement};

use crate::builder::SparseVectorBuilder;
use crate::vector::{IterMode, SparseVector};

#[derive(Debug, Clone)]
pub struct TridiagonalMatrix<T> {
    size: usize,
    upper: SparseVector<T>,
    diagonal: SparseVector<T>,
    lower: SparseVector<T>,
    empty: SparseVector<T>,
}

impl<T: MatrixElement> TridiagonalMatrix<T> {
    /// Assemble from `(row, col, value)` entries with `|row - col| <= 1`
    pub(crate) fn from_entries(
        size: usize,
        entries: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Self {
        let band_size = size.saturating_sub(1);
        let mut upper = SparseVectorBuilder::new(band_size);
        let mut diagonal = SparseVectorBuilder::new(size);
        let mut lower = SparseVectorBuilder::new(band_size);
        for (i, j, x) in entries {
            if j == i + 1 {
                upper.set(i, x);
            } else if i == j {
                diagonal.set(i, x);
            } else if i == j + 1 {
                lower.set(j, x);
            } else {
                debug_assert!(false, "entry ({}, {}) outside the tridiagonal bands", i, j);
            }
        }
        Self::from_bands(upper.into_vector(), diagonal.into_vector(), lower.into_vector())
    }

    pub(crate) fn from_bands(
        upper: SparseVector<T>,
        diagonal: SparseVector<T>,
        lower: SparseVector<T>,
    ) -> Self {
        let size = diagonal.size();
        debug_assert_eq!(upper.size(), size.saturating_sub(1));
        debug_assert_eq!(lower.size(), size.saturating_sub(1));
        Self {
            size,
            upper,
            diagonal,
            lower,
            empty: SparseVector::zeros(0),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    pub fn upper(&self) -> &SparseVector<T> {
        &self.upper
    }

    pub fn diagonal(&self) -> &SparseVector<T> {
        &self.diagonal
    }

    pub fn lower(&self) -> &SparseVector<T> {
        &self.lower
    }

    /// Band holding entries with `row - col == offset`
    pub fn band(&self, offset: isize) -> &SparseVector<T> {
        match offset {
            -1 => &self.upper,
            0 => &self.diagonal,
            1 => &self.lower,
            _ => &self.empty,
        }
    }

    pub fn nnz(&self) -> usize {
        self.upper.nnz() + self.diagonal.nnz() + self.lower.nnz()
    }

    /// Element at `(row, col)`, counting from the end when negative
    pub fn get(&self, row: isize, col: isize) -> Option<T> {
        let row = resolve_index(row, self.size)?;
        let col = resolve_index(col, self.size)?;
        Some(self.element(row, col))
    }

    pub fn element(&self, row: usize, col: usize) -> T {
        let offset = row as isize - col as isize;
        self.band(offset).component(row.min(col))
    }

    /// Row `i`, with at most three non-zero entries
    pub fn row(&self, i: usize) -> Option<SparseVector<T>> {
        (i < self.size).then(|| SparseVector::from_ascending(self.size, self.row_triplet(i)))
    }

    /// Column `j`, with at most three non-zero entries
    pub fn column(&self, j: usize) -> Option<SparseVector<T>> {
        if j >= self.size {
            return None;
        }
        let above = (j > 0).then(|| (j - 1, self.upper.component(j - 1)));
        let centre = Some((j, self.diagonal.component(j)));
        let below = (j + 1 < self.size).then(|| (j + 1, self.lower.component(j)));
        Some(SparseVector::from_ascending(
            self.size,
            [above, centre, below].into_iter().flatten(),
        ))
    }

    fn row_triplet(&self, i: usize) -> impl Iterator<Item = (usize, T)> {
        let left = (i > 0).then(|| (i - 1, self.lower.component(i - 1)));
        let centre = Some((i, self.diagonal.component(i)));
        let right = (i + 1 < self.size).then(|| (i + 1, self.upper.component(i)));
        [left, centre, right]
            .into_iter()
            .flatten()
            .filter(|(_, x)| !x.is_zero())
    }

    /// Non-zero entries in row-major order
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.size).flat_map(move |i| self.row_triplet(i).map(move |(j, x)| (i, j, x)))
    }

    pub fn is_symmetric(&self) -> bool {
        self.upper == self.lower
    }

    pub fn is_lower_triangular(&self) -> bool {
        self.upper.nnz() == 0
    }

    pub fn is_upper_triangular(&self) -> bool {
        self.lower.nnz() == 0
    }

    pub fn is_diagonal(&self) -> bool {
        self.is_lower_triangular() && self.is_upper_triangular()
    }

    /// Exactly one entry per row and per column, each equal to one
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.size];
        for i in 0..self.size {
            let mut entries = self.row_triplet(i);
            match (entries.next(), entries.next()) {
                (Some((j, x)), None) if x.is_one() && !seen[j] => seen[j] = true,
                _ => return false,
            }
        }
        true
    }

    /// Sum of the non-zero diagonal entries
    pub fn trace(&self) -> T {
        self.diagonal.non_zero().fold(T::zero(), |acc, (_, x)| acc + x)
    }

    /// Determinant through the three-term continuant recurrence
    ///
    /// `f(k) = a(k) f(k-1) - lower(k-1) upper(k-1) f(k-2)` with `f(-1) = 1`.
    pub fn determinant(&self) -> T {
        if self.size == 0 {
            return T::one();
        }
        let mut before = T::one();
        let mut current = self.diagonal.component(0);
        for k in 1..self.size {
            let next = self.diagonal.component(k) * current
                - self.lower.component(k - 1) * self.upper.component(k - 1) * before;
            before = current;
            current = next;
        }
        current
    }

    /// Transpose by swapping the off-diagonal bands
    pub fn transpose(&self) -> Self {
        Self::from_bands(self.lower.clone(), self.diagonal.clone(), self.upper.clone())
    }

    /// Apply `f` to every stored entry, keeping the band layout
    pub fn map_non_zero(&self, mut f: impl FnMut(T) -> T) -> Self {
        Self::from_bands(
            self.upper.map(IterMode::NonZero, &mut f),
            self.diagonal.map(IterMode::NonZero, &mut f),
            self.lower.map(IterMode::NonZero, &mut f),
        )
    }
}

impl<T: MatrixElement> MatrixAccess<T> for TridiagonalMatrix<T> {
    fn dimensions(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    fn element(&self, row: usize, col: usize) -> T {
        TridiagonalMatrix::element(self, row, col)
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        self.row_triplet(row).collect()
    }

    fn non_zero_entries(&self) -> Vec<(usize, usize, T)> {
        self.non_zero().collect()
    }

    fn nnz(&self) -> usize {
        TridiagonalMatrix::nnz(self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// [[2, -1, 0], [-1, 2, -1], [0, -1, 2]]
    fn laplacian() -> TridiagonalMatrix<f64> {
        TridiagonalMatrix::from_entries(
            3,
            [
                (0, 0, 2.0),
                (0, 1, -1.0),
                (1, 0, -1.0),
                (1, 1, 2.0),
                (1, 2, -1.0),
                (2, 1, -1.0),
                (2, 2, 2.0),
            ],
        )
    }

    #[test]
    fn test_band_lookup() {
        let m = laplacian();
        assert_eq!(m.get(0, 1), Some(-1.0));
        assert_eq!(m.get(2, 2), Some(2.0));
        assert_eq!(m.get(0, 2), Some(0.0));
        assert_eq!(m.get(-1, 0), Some(0.0));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.band(2).size(), 0);
        assert_eq!(m.nnz(), 7);
    }

    #[test]
    fn test_rows_columns_and_order() {
        let m = laplacian();
        assert_eq!(m.row(1).map(|r| r.to_vec()), Some(vec![-1.0, 2.0, -1.0]));
        assert_eq!(m.column(0).map(|c| c.to_vec()), Some(vec![2.0, -1.0, 0.0]));
        let positions: Vec<_> = m.non_zero().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (1, 2), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_properties() {
        let m = laplacian();
        assert!(m.is_symmetric());
        assert!(!m.is_lower_triangular());
        assert!(!m.is_permutation());
        assert_eq!(m.trace(), 6.0);
        assert_eq!(m.determinant(), 4.0);

        let lower = TridiagonalMatrix::from_entries(2, [(0, 0, 1.0), (1, 0, 3.0), (1, 1, 1.0)]);
        assert!(lower.is_lower_triangular());
        assert!(!lower.is_symmetric());
        assert_eq!(lower.transpose().get(0, 1), Some(3.0));
        assert!(lower.transpose().is_upper_triangular());

        let swap = TridiagonalMatrix::from_entries(2, [(0, 1, 1.0), (1, 0, 1.0)]);
        assert!(swap.is_permutation());
        assert_eq!(swap.determinant(), -1.0);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = TridiagonalMatrix::<f64>::from_entries(0, std::iter::empty());
        assert_eq!(empty.determinant(), 1.0);
        assert_eq!(empty.trace(), 0.0);

        let single = TridiagonalMatrix::from_entries(1, [(0, 0, 4.0)]);
        assert_eq!(single.determinant(), 4.0);
        assert_eq!(single.upper().size(), 0);
    }
}
