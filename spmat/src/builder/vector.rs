//! Vector builders
//!
//! Both builders stage components in a hash map keyed by index. Writing
//! zero is a no-op, as is writing outside `[0, size)`; reading an unset
//! position yields zero.

use hashbrown::HashMap;
use nalgebra::DVector;
use spmat_core::{BuilderKind, MatrixElement};

use super::registry::BuilderRegistry;
use crate::vector::{DenseVector, SparseVector, Vector};

/// Mutable staging area that materializes an immutable vector
pub trait VectorBuilder<T: MatrixElement> {
    /// Number of components of the vector being built
    fn size(&self) -> usize;

    /// Staged value at `index`, zero when unset
    fn get(&self, index: usize) -> T;

    /// Stage `value` at `index`
    fn set(&mut self, index: usize, value: T);

    /// Consume the builder and produce the vector
    fn build(self: Box<Self>) -> Vector<T>;
}

/// Builder producing a [`SparseVector`]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVectorBuilder<T: MatrixElement> {
    size: usize,
    values: HashMap<usize, T>,
}

impl<T: MatrixElement> SparseVectorBuilder<T> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: HashMap::new(),
        }
    }

    /// Builder staged with `values`, zeros skipped
    pub fn from_values(values: &[T]) -> Self {
        let mut builder = Self::new(values.len());
        for (index, &value) in values.iter().enumerate() {
            builder.set(index, value);
        }
        builder
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of staged non-zero components
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, index: usize) -> T {
        self.values.get(&index).copied().unwrap_or_else(T::zero)
    }

    /// Stage `value` at `index`
    ///
    /// Zero values and indices outside `[0, size)` are ignored, so writing
    /// zero over a staged value leaves it in place.
    pub fn set(&mut self, index: usize, value: T) {
        if value.is_zero() || index >= self.size {
            return;
        }
        self.values.insert(index, value);
    }

    /// Every position in ascending order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        (0..self.size).map(move |index| (index, self.get(index)))
    }

    /// Staged positions, in no particular order
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.values.iter().map(|(&index, &value)| (index, value))
    }

    /// Materialize the staged components
    pub fn into_vector(self) -> SparseVector<T> {
        let mut entries: Vec<(usize, T)> = self.values.into_iter().collect();
        entries.sort_unstable_by_key(|&(index, _)| index);
        let (indices, values) = entries.into_iter().unzip();
        SparseVector::from_sorted_parts(self.size, indices, values)
    }

    /// Register under [`BuilderKind::Sparse`]
    pub fn register(registry: &mut BuilderRegistry<T>) {
        registry.register_vector(BuilderKind::Sparse.name(), |size| {
            Box::new(SparseVectorBuilder::new(size)) as Box<dyn VectorBuilder<T>>
        });
    }
}

impl<T: MatrixElement> VectorBuilder<T> for SparseVectorBuilder<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn get(&self, index: usize) -> T {
        SparseVectorBuilder::get(self, index)
    }

    fn set(&mut self, index: usize, value: T) {
        SparseVectorBuilder::set(self, index, value)
    }

    fn build(self: Box<Self>) -> Vector<T> {
        Vector::Sparse(self.into_vector())
    }
}

/// Builder producing a [`DenseVector`]
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteVectorBuilder<T: MatrixElement> {
    staging: SparseVectorBuilder<T>,
}

impl<T: MatrixElement> CompleteVectorBuilder<T> {
    pub fn new(size: usize) -> Self {
        Self {
            staging: SparseVectorBuilder::new(size),
        }
    }

    pub(crate) fn from_staging(staging: SparseVectorBuilder<T>) -> Self {
        Self { staging }
    }

    pub fn size(&self) -> usize {
        self.staging.size()
    }

    pub fn get(&self, index: usize) -> T {
        self.staging.get(index)
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.staging.set(index, value)
    }

    /// Materialize every component
    pub fn into_vector(self) -> DenseVector<T> {
        let mut data = DVector::zeros(self.staging.size());
        for (index, value) in self.staging.non_zero() {
            data[index] = value;
        }
        DenseVector::new(data)
    }

    /// Register under [`BuilderKind::Complete`]
    pub fn register(registry: &mut BuilderRegistry<T>) {
        registry.register_vector(BuilderKind::Complete.name(), |size| {
            Box::new(CompleteVectorBuilder::new(size)) as Box<dyn VectorBuilder<T>>
        });
    }
}

impl<T: MatrixElement> VectorBuilder<T> for CompleteVectorBuilder<T> {
    fn size(&self) -> usize {
        self.staging.size()
    }

    fn get(&self, index: usize) -> T {
        self.staging.get(index)
    }

    fn set(&mut self, index: usize, value: T) {
        self.staging.set(index, value)
    }

    fn build(self: Box<Self>) -> Vector<T> {
        Vector::Dense(self.into_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_builder_staging() {
        let mut builder = SparseVectorBuilder::new(4);
        builder.set(1, 2.0);
        builder.set(3, 5.0);
        assert_eq!(builder.get(1), 2.0);
        assert_eq!(builder.get(0), 0.0);
        assert_eq!(builder.nnz(), 2);

        let v = builder.into_vector();
        assert_eq!(v.to_vec(), vec![0.0, 2.0, 0.0, 5.0]);
        assert_eq!(v.indices(), &[1, 3]);
    }

    #[test]
    fn test_zero_and_out_of_range_writes_are_ignored() {
        let mut builder = SparseVectorBuilder::new(3);
        builder.set(0, 7.0);
        builder.set(0, 0.0);
        builder.set(3, 1.0);
        builder.set(100, 1.0);

        // Zero does not clear a staged value
        assert_eq!(builder.get(0), 7.0);
        assert_eq!(builder.nnz(), 1);
        assert_eq!(builder.into_vector().to_vec(), vec![7.0, 0.0, 0.0]);
    }

    #[test]
    fn test_complete_builder_is_dense() {
        let mut builder = CompleteVectorBuilder::new(3);
        builder.set(2, 1.5);
        let v = builder.into_vector();
        assert_eq!(v.to_vec(), vec![0.0, 0.0, 1.5]);

        let boxed: Box<dyn VectorBuilder<f64>> = Box::new(CompleteVectorBuilder::new(2));
        assert!(matches!(boxed.build(), Vector::Dense(_)));
    }
}
