//! Dense vector backed by nalgebra

use core::fmt;

use nalgebra::DVector;
use spmat_core::{resolve_index, MatrixElement, VectorAccess};

use super::IterMode;

/// Vector storing every component
#[derive(Debug, Clone, PartialEq)]
pub struct DenseVector<T: MatrixElement> {
    data: DVector<T>,
}

impl<T: MatrixElement> DenseVector<T> {
    pub fn new(data: DVector<T>) -> Self {
        Self { data }
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self::new(DVector::from_column_slice(values))
    }

    pub fn zeros(size: usize) -> Self {
        Self::new(DVector::zeros(size))
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|x| !x.is_zero()).count()
    }

    /// Component at `index`, counting from the end when negative
    pub fn get(&self, index: isize) -> Option<T> {
        resolve_index(index, self.size()).map(|i| self.data[i])
    }

    pub fn component(&self, index: usize) -> T {
        self.data[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.data.iter().copied().enumerate()
    }

    pub fn non_zero(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.iter().filter(|(_, x)| !x.is_zero())
    }

    /// Apply `f` to the components visited by `mode`, others stay zero
    pub fn map(&self, mode: IterMode, mut f: impl FnMut(T) -> T) -> Self {
        match mode {
            IterMode::All => Self::new(self.data.map(f)),
            IterMode::NonZero => Self::new(self.data.map(|x| if x.is_zero() { x } else { f(x) })),
        }
    }

    pub fn magnitude(&self) -> T {
        self.data.norm()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }

    pub fn as_inner(&self) -> &DVector<T> {
        &self.data
    }

    pub fn into_inner(self) -> DVector<T> {
        self.data
    }
}

impl<T: MatrixElement> VectorAccess<T> for DenseVector<T> {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn component(&self, index: usize) -> T {
        self.data[index]
    }

    fn as_any(&self) -> Option<&dyn core::any::Any> {
        Some(self)
    }
}

impl<T: MatrixElement> fmt::Display for DenseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DenseVector[")?;
        for (i, x) in self.iter() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_vector_access() {
        let v = DenseVector::from_slice(&[1.0, 0.0, 3.0]);
        assert_eq!(v.get(-1), Some(3.0));
        assert_eq!(v.get(3), None);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.non_zero().collect::<Vec<_>>(), vec![(0, 1.0), (2, 3.0)]);
        assert_eq!(v.to_string(), "DenseVector[1, 0, 3]");
    }

    #[test]
    fn test_dense_map_modes() {
        let v = DenseVector::from_slice(&[1.0, 0.0]);
        assert_eq!(v.map(IterMode::All, |x| x + 1.0).to_vec(), vec![2.0, 1.0]);
        assert_eq!(v.map(IterMode::NonZero, |x| x + 1.0).to_vec(), vec![2.0, 0.0]);
    }
}
