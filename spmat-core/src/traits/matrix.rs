//! Capability traits for matrix-like and vector-like values
//!
//! Anything that can answer "what are your dimensions" and "what is stored
//! at this position" can take part in arithmetic. Representations override
//! the provided methods when they can enumerate their non-zero entries
//! without scanning every position.

use core::any::Any;

use super::element::MatrixElement;

/// Read access shared by every matrix-like value
pub trait MatrixAccess<T: MatrixElement> {
    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Value at an in-range position, zero where nothing is stored
    ///
    /// Callers guarantee `row < rows` and `col < cols`.
    fn element(&self, row: usize, col: usize) -> T;

    /// Non-zero entries of a row in column order
    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        let (_, cols) = self.dimensions();
        (0..cols)
            .map(|col| (col, self.element(row, col)))
            .filter(|(_, value)| !value.is_zero())
            .collect()
    }

    /// Non-zero entries as `(row, col, value)` triples in row-major order
    fn non_zero_entries(&self) -> Vec<(usize, usize, T)> {
        let (rows, _) = self.dimensions();
        (0..rows)
            .flat_map(|row| {
                self.row_entries(row)
                    .into_iter()
                    .map(move |(col, value)| (row, col, value))
            })
            .collect()
    }

    /// Get number of non-zero elements stored
    fn nnz(&self) -> usize {
        self.non_zero_entries().len()
    }

    /// Concrete value for downcasting, when the implementor is `'static`
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Read access shared by every vector-like value
pub trait VectorAccess<T: MatrixElement> {
    /// Number of components
    fn size(&self) -> usize;

    /// Value at an in-range index, zero where nothing is stored
    fn component(&self, index: usize) -> T;

    /// Non-zero components in ascending index order
    fn non_zero_entries(&self) -> Vec<(usize, T)> {
        (0..self.size())
            .map(|index| (index, self.component(index)))
            .filter(|(_, value)| !value.is_zero())
            .collect()
    }

    /// Concrete value for downcasting, when the implementor is `'static`
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Grid(Vec<Vec<f64>>);

    impl MatrixAccess<f64> for Grid {
        fn dimensions(&self) -> (usize, usize) {
            (self.0.len(), self.0.first().map_or(0, Vec::len))
        }

        fn element(&self, row: usize, col: usize) -> f64 {
            self.0[row][col]
        }
    }

    #[test]
    fn test_provided_methods_scan_positions() {
        let grid = Grid(vec![vec![0.0, 2.0], vec![3.0, 0.0]]);
        assert_eq!(grid.row_entries(0), vec![(1, 2.0)]);
        assert_eq!(grid.non_zero_entries(), vec![(0, 1, 2.0), (1, 0, 3.0)]);
        assert_eq!(grid.nnz(), 2);
        assert!(grid.as_any().is_none());
    }
}
