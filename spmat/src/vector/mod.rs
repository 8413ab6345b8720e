//! Immutable vectors
//!
//! [`Vector`] wraps the two representations a vector builder can produce.
//! Operations delegate to the representation and keep the result in the
//! same family: sparse inputs produce sparse outputs.

pub mod dense;
mod ops;
pub mod sparse;

use core::fmt;

use spmat_core::{BuilderKind, MatrixElement, MatrixError, Result, VectorAccess};

use crate::builder::build_matrix;
use crate::matrix::Matrix;
use crate::operand::Value;

pub use dense::DenseVector;
pub use sparse::SparseVector;

/// Which positions an iteration visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterMode {
    /// Every position, zeros included
    #[default]
    All,
    /// Only positions holding a non-zero value
    NonZero,
}

/// Immutable vector in one of its representations
#[derive(Debug, Clone)]
pub enum Vector<T: MatrixElement> {
    Sparse(SparseVector<T>),
    Dense(DenseVector<T>),
}

impl<T: MatrixElement> Vector<T> {
    /// Copy any vector-like value into a `Vector`
    ///
    /// Known representations are cloned as they are; anything else is
    /// rebuilt through the sparse builder.
    pub fn from_access(vector: &dyn VectorAccess<T>) -> Self {
        if let Some(any) = vector.as_any() {
            if let Some(v) = any.downcast_ref::<Vector<T>>() {
                return v.clone();
            }
            if let Some(v) = any.downcast_ref::<SparseVector<T>>() {
                return Vector::Sparse(v.clone());
            }
            if let Some(v) = any.downcast_ref::<DenseVector<T>>() {
                return Vector::Dense(v.clone());
            }
        }
        Vector::Sparse(SparseVector::from_ascending(
            vector.size(),
            vector.non_zero_entries(),
        ))
    }

    /// Builder kind that produced this representation
    pub fn builder_kind(&self) -> BuilderKind {
        match self {
            Vector::Sparse(_) => BuilderKind::Sparse,
            Vector::Dense(_) => BuilderKind::Complete,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Vector::Sparse(v) => v.size(),
            Vector::Dense(v) => v.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn nnz(&self) -> usize {
        match self {
            Vector::Sparse(v) => v.nnz(),
            Vector::Dense(v) => v.nnz(),
        }
    }

    /// Component at `index`, counting from the end when negative
    pub fn get(&self, index: isize) -> Option<T> {
        match self {
            Vector::Sparse(v) => v.get(index),
            Vector::Dense(v) => v.get(index),
        }
    }

    /// Iterate `(index, value)` pairs in ascending index order
    pub fn entries(&self, mode: IterMode) -> Box<dyn Iterator<Item = (usize, T)> + '_> {
        match (self, mode) {
            (Vector::Sparse(v), mode) => Box::new(v.entries(mode)),
            (Vector::Dense(v), IterMode::All) => Box::new(v.iter()),
            (Vector::Dense(v), IterMode::NonZero) => Box::new(v.non_zero()),
        }
    }

    /// Every position, zeros included
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, T)> + '_> {
        self.entries(IterMode::All)
    }

    /// Apply `f` to the components visited by `mode`
    pub fn map(&self, mode: IterMode, f: impl FnMut(T) -> T) -> Self {
        match self {
            Vector::Sparse(v) => Vector::Sparse(v.map(mode, f)),
            Vector::Dense(v) => Vector::Dense(v.map(mode, f)),
        }
    }

    /// Combine with another vector of the same size position by position
    pub fn map2(
        &self,
        other: &dyn VectorAccess<T>,
        mut f: impl FnMut(T, T) -> T,
    ) -> Result<Self> {
        match self {
            Vector::Sparse(v) => v.map2(other, f).map(Vector::Sparse),
            Vector::Dense(v) => {
                if v.size() != other.size() {
                    return Err(MatrixError::DimensionMismatch {
                        op: "map2",
                        left: (v.size(), 1),
                        right: (other.size(), 1),
                    });
                }
                let data = v
                    .as_inner()
                    .map_with_location(|i, _, x| f(x, other.component(i)));
                Ok(Vector::Dense(DenseVector::new(data)))
            }
        }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> T {
        match self {
            Vector::Sparse(v) => v.magnitude(),
            Vector::Dense(v) => v.magnitude(),
        }
    }

    /// Alias of [`Vector::magnitude`]
    pub fn norm(&self) -> T {
        self.magnitude()
    }

    /// Unit vector in the same direction
    pub fn normalize(&self) -> Result<Self> {
        let magnitude = self.magnitude();
        if magnitude.is_zero() {
            return Err(MatrixError::DivideByZero { op: "normalize" });
        }
        Ok(self.scale(T::one() / magnitude))
    }

    /// Multiply every component by `factor`
    pub fn scale(&self, factor: T) -> Self {
        self.map(IterMode::NonZero, |x| x * factor)
    }

    /// Sum of component products
    pub fn inner_product(&self, other: &dyn VectorAccess<T>) -> Result<T> {
        match self {
            Vector::Sparse(v) => v.inner_product(other),
            Vector::Dense(v) => {
                if v.size() != other.size() {
                    return Err(MatrixError::DimensionMismatch {
                        op: "inner_product",
                        left: (v.size(), 1),
                        right: (other.size(), 1),
                    });
                }
                Ok(v
                    .non_zero()
                    .fold(T::zero(), |acc, (i, x)| acc + x * other.component(i)))
            }
        }
    }

    /// The vector as a `1 x size` matrix
    pub fn covector(&self) -> Matrix<T> {
        build_matrix(self.builder_kind(), 1, self.size(), |staging| {
            for (j, x) in self.entries(IterMode::NonZero) {
                staging.set(0, j, x);
            }
        })
    }

    /// The vector as a `size x 1` matrix
    pub fn to_column_matrix(&self) -> Matrix<T> {
        build_matrix(self.builder_kind(), self.size(), 1, |staging| {
            for (i, x) in self.entries(IterMode::NonZero) {
                staging.set(i, 0, x);
            }
        })
    }

    /// Matrix form matching a matrix operand of shape `like`
    ///
    /// A single-row operand gets a row; everything else gets a column.
    pub(crate) fn promote(&self, like: (usize, usize)) -> Matrix<T> {
        promote_access(self, self.builder_kind(), like)
    }

    /// Every component in order
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Vector::Sparse(v) => v.to_vec(),
            Vector::Dense(v) => v.to_vec(),
        }
    }

    /// Operands for retrying `number op self` with the number on the left
    pub fn coerce(&self, number: T) -> (Value<T>, Value<T>) {
        (Value::Number(number), Value::Vector(self.clone()))
    }

    /// Unary plus
    pub fn pos(&self) -> Self {
        self.clone()
    }
}

/// Row or column matrix from any vector-like value, following [`Vector::promote`]
pub(crate) fn promote_access<T: MatrixElement>(
    vector: &dyn VectorAccess<T>,
    kind: BuilderKind,
    like: (usize, usize),
) -> Matrix<T> {
    let size = vector.size();
    let as_row = like.0 == 1 && like.1 != 1;
    let (rows, cols) = if as_row { (1, size) } else { (size, 1) };
    build_matrix(kind, rows, cols, |staging| {
        for (k, x) in vector.non_zero_entries() {
            if as_row {
                staging.set(0, k, x);
            } else {
                staging.set(k, 0, x);
            }
        }
    })
}

impl<T: MatrixElement> VectorAccess<T> for Vector<T> {
    fn size(&self) -> usize {
        Vector::size(self)
    }

    fn component(&self, index: usize) -> T {
        match self {
            Vector::Sparse(v) => v.component(index),
            Vector::Dense(v) => v.component(index),
        }
    }

    fn non_zero_entries(&self) -> Vec<(usize, T)> {
        self.entries(IterMode::NonZero).collect()
    }

    fn as_any(&self) -> Option<&dyn core::any::Any> {
        Some(self)
    }
}

impl<T: MatrixElement> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: MatrixElement> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vector::Sparse(v) => fmt::Display::fmt(v, f),
            Vector::Dense(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl<T: MatrixElement> From<SparseVector<T>> for Vector<T> {
    fn from(v: SparseVector<T>) -> Self {
        Vector::Sparse(v)
    }
}

impl<T: MatrixElement> From<DenseVector<T>> for Vector<T> {
    fn from(v: DenseVector<T>) -> Self {
        Vector::Dense(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::VectorFactory;
    use approx::assert_relative_eq;
    use spmat_core::MatrixKind;

    #[test]
    fn test_promote_access_picks_row_or_column() {
        let v = VectorFactory::sparse().from_values(&[1.0, 0.0, 3.0]);

        let row = promote_access(&v, BuilderKind::Sparse, (1, 3));
        assert_eq!(row.dimensions(), (1, 3));
        assert_eq!(row.to_rows(), vec![vec![1.0, 0.0, 3.0]]);

        let column = promote_access(&v, BuilderKind::Sparse, (3, 1));
        assert_eq!(column.dimensions(), (3, 1));
        assert_eq!(column.get(2, 0), Some(3.0));

        // square and single-element shapes fall back to a column
        assert_eq!(promote_access(&v, BuilderKind::Sparse, (3, 3)).dimensions(), (3, 1));
        assert_eq!(promote_access(&v, BuilderKind::Sparse, (1, 1)).dimensions(), (3, 1));

        let dense = promote_access(&v, BuilderKind::Complete, (1, 3));
        assert_eq!(dense.kind(), MatrixKind::Dense);
    }

    #[test]
    fn test_normalize() {
        let v = VectorFactory::complete().from_values(&[3.0, 4.0]);
        let unit = v.normalize().unwrap();
        assert_relative_eq!(unit.get(0).unwrap(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(unit.get(1).unwrap(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(unit.magnitude(), 1.0, epsilon = 1e-12);

        let zero = VectorFactory::sparse().zero::<f64>(3);
        assert_eq!(zero.normalize(), Err(MatrixError::DivideByZero { op: "normalize" }));
    }

    #[test]
    fn test_covector_and_column_shapes() {
        let v = VectorFactory::sparse().from_values(&[2.0, 5.0]);
        assert_eq!(v.covector().to_rows(), vec![vec![2.0, 5.0]]);
        assert_eq!(v.to_column_matrix().to_rows(), vec![vec![2.0], vec![5.0]]);
        assert_eq!(v.pos(), v);
    }
}
