//! Structural and numeric predicates

use spmat_core::{ensure_square, structure_flags, MatrixElement, Result};

use super::Matrix;
use crate::config::NumericConfig;

impl<T: MatrixElement> Matrix<T> {
    pub fn is_square(&self) -> bool {
        let (rows, cols) = self.dimensions();
        rows == cols
    }

    /// No rows or no columns
    pub fn is_empty(&self) -> bool {
        let (rows, cols) = self.dimensions();
        rows == 0 || cols == 0
    }

    /// Every entry is zero
    pub fn is_zero(&self) -> bool {
        self.non_zero().next().is_none()
    }

    pub fn is_diagonal(&self) -> bool {
        match self {
            Matrix::Sparse(m) => m.is_diagonal(),
            Matrix::Tridiagonal(m) => m.is_diagonal(),
            Matrix::Dense(m) => m.is_diagonal(),
        }
    }

    pub fn is_lower_triangular(&self) -> bool {
        match self {
            Matrix::Sparse(m) => m.is_lower_triangular(),
            Matrix::Tridiagonal(m) => m.is_lower_triangular(),
            Matrix::Dense(m) => m.is_lower_triangular(),
        }
    }

    pub fn is_upper_triangular(&self) -> bool {
        match self {
            Matrix::Sparse(m) => m.is_upper_triangular(),
            Matrix::Tridiagonal(m) => m.is_upper_triangular(),
            Matrix::Dense(m) => m.is_upper_triangular(),
        }
    }

    /// Square and equal to its transpose; false for rectangular matrices
    pub fn is_symmetric(&self) -> bool {
        match self {
            Matrix::Sparse(m) => m.is_symmetric(),
            Matrix::Tridiagonal(m) => m.is_symmetric(),
            Matrix::Dense(m) => m.is_symmetric(),
        }
    }

    /// Same as [`Matrix::is_symmetric`] for real elements
    pub fn is_hermitian(&self) -> bool {
        self.is_symmetric()
    }

    pub fn is_permutation(&self) -> bool {
        match self {
            Matrix::Sparse(m) => m.is_permutation(),
            Matrix::Tridiagonal(m) => m.is_permutation(),
            Matrix::Dense(m) => m.is_permutation(),
        }
    }

    /// Rows form an orthonormal set, within the default tolerance
    pub fn is_orthogonal(&self) -> bool {
        self.is_orthogonal_with(&NumericConfig::default())
    }

    pub fn is_orthogonal_with(&self, config: &NumericConfig) -> bool {
        if !self.is_square() {
            return false;
        }
        let epsilon = config.epsilon::<T>();
        let rows: Vec<_> = (0..self.row_size()).map(|i| self.sparse_row(i)).collect();
        (0..rows.len()).all(|i| {
            (i..rows.len()).all(|j| {
                let expected = if i == j { T::one() } else { T::zero() };
                rows[i]
                    .inner_product(&rows[j])
                    .map_or(false, |dot| dot.approx_eq(expected, epsilon))
            })
        })
    }

    /// Same as [`Matrix::is_orthogonal`] for real elements
    pub fn is_unitary(&self) -> bool {
        self.is_orthogonal()
    }

    /// Commutes with its transpose, within the default tolerance
    pub fn is_normal(&self) -> bool {
        self.is_normal_with(&NumericConfig::default())
    }

    pub fn is_normal_with(&self, config: &NumericConfig) -> bool {
        if !self.is_square() {
            return false;
        }
        let epsilon = config.epsilon::<T>();
        let rows = self.row_vectors();
        let columns = self.column_vectors();
        (0..rows.len()).all(|i| {
            (i..rows.len()).all(|j| {
                match (rows[i].inner_product(&rows[j]), columns[i].inner_product(&columns[j])) {
                    (Ok(by_rows), Ok(by_columns)) => by_rows.approx_eq(by_columns, epsilon),
                    _ => false,
                }
            })
        })
    }

    /// Square with full rank
    pub fn is_regular(&self) -> Result<bool> {
        self.is_singular().map(|singular| !singular)
    }

    /// Square with rank below its size; agrees with [`Matrix::inverse`]
    pub fn is_singular(&self) -> Result<bool> {
        self.is_singular_with(&NumericConfig::default())
    }

    pub fn is_singular_with(&self, config: &NumericConfig) -> Result<bool> {
        let (rows, columns) = self.dimensions();
        ensure_square("singular", (rows, columns))?;
        Ok(self.rank_with(config) < rows)
    }

    /// Summary of structural properties as [`structure_flags`] bits
    pub fn structure(&self) -> u8 {
        let mut flags = 0;
        if self.is_symmetric() {
            flags |= structure_flags::SYMMETRIC;
        }
        if self.is_upper_triangular() {
            flags |= structure_flags::UPPER_TRIANGULAR;
        }
        if self.is_lower_triangular() {
            flags |= structure_flags::LOWER_TRIANGULAR;
        }
        if self.is_permutation() {
            flags |= structure_flags::PERMUTATION;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::MatrixFactory;
    use spmat_core::structure_flags;

    #[test]
    fn test_orthogonal_and_normal() {
        let rotation = MatrixFactory::sparse().from_rows(&[[0.6, -0.8], [0.8, 0.6]]);
        assert!(rotation.is_orthogonal());
        assert!(rotation.is_unitary());
        assert!(rotation.is_normal());

        let shear = MatrixFactory::complete().from_rows(&[[1.0, 1.0], [0.0, 1.0]]);
        assert!(!shear.is_orthogonal());
        assert!(!shear.is_normal());
        assert!(!MatrixFactory::sparse().zero::<f64>(2, 3).is_normal());
    }

    #[test]
    fn test_structure_flags() {
        let identity = MatrixFactory::sparse().identity::<f64>(3);
        assert_eq!(
            identity.structure(),
            structure_flags::SYMMETRIC | structure_flags::DIAGONAL | structure_flags::PERMUTATION
        );
        assert!(identity.is_diagonal());

        let lower = MatrixFactory::sparse().from_rows(&[
            [1.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [3.0, 0.0, 1.0],
        ]);
        assert_eq!(lower.structure(), structure_flags::LOWER_TRIANGULAR);
    }

    #[test]
    fn test_emptiness_and_regularity() {
        assert!(MatrixFactory::sparse().zero::<f64>(0, 3).is_empty());
        assert!(MatrixFactory::sparse().zero::<f64>(2, 2).is_zero());
        let singular = MatrixFactory::sparse().from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(singular.is_singular(), Ok(true));
        assert_eq!(singular.is_regular(), Ok(false));
        assert!(MatrixFactory::sparse().zero::<f64>(2, 3).is_regular().is_err());

        // determinant is a tiny non-zero float here, the rank is still 2
        let near = MatrixFactory::sparse().from_rows(&[
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        assert_eq!(near.is_singular(), Ok(true));
        assert_eq!(near.is_regular(), Ok(false));
        assert_eq!(MatrixFactory::sparse().identity::<f64>(3).is_regular(), Ok(true));
    }
}
