//! Builder registry keyed by kind name

use core::fmt;

use hashbrown::HashMap;
use spmat_core::{MatrixElement, MatrixError, Result};

use super::matrix::{CompleteMatrixBuilder, MatrixBuilder, SparseMatrixBuilder};
use super::vector::{CompleteVectorBuilder, SparseVectorBuilder, VectorBuilder};

/// Constructor for a matrix builder of the given shape
pub type MatrixConstructor<T> = fn(usize, usize) -> Box<dyn MatrixBuilder<T>>;

/// Constructor for a vector builder of the given size
pub type VectorConstructor<T> = fn(usize) -> Box<dyn VectorBuilder<T>>;

/// Maps kind names to builder constructors
///
/// The default registry knows `"sparse"` and `"complete"`. Registering an
/// existing name replaces its constructor.
#[derive(Clone)]
pub struct BuilderRegistry<T: MatrixElement> {
    matrices: HashMap<String, MatrixConstructor<T>>,
    vectors: HashMap<String, VectorConstructor<T>>,
}

impl<T: MatrixElement> BuilderRegistry<T> {
    /// Registry with nothing registered
    pub fn empty() -> Self {
        Self {
            matrices: HashMap::new(),
            vectors: HashMap::new(),
        }
    }

    pub fn register_matrix(&mut self, kind: impl Into<String>, constructor: MatrixConstructor<T>) {
        self.matrices.insert(kind.into(), constructor);
    }

    pub fn register_vector(&mut self, kind: impl Into<String>, constructor: VectorConstructor<T>) {
        self.vectors.insert(kind.into(), constructor);
    }

    /// New matrix builder of the registered kind
    pub fn matrix_builder(
        &self,
        kind: &str,
        rows: usize,
        cols: usize,
    ) -> Result<Box<dyn MatrixBuilder<T>>> {
        self.matrices
            .get(kind)
            .map(|constructor| constructor(rows, cols))
            .ok_or_else(|| MatrixError::Configuration(kind.to_string()))
    }

    /// New vector builder of the registered kind
    pub fn vector_builder(&self, kind: &str, size: usize) -> Result<Box<dyn VectorBuilder<T>>> {
        self.vectors
            .get(kind)
            .map(|constructor| constructor(size))
            .ok_or_else(|| MatrixError::Configuration(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.matrices.contains_key(kind) || self.vectors.contains_key(kind)
    }

    /// Registered matrix kinds, sorted
    pub fn matrix_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.matrices.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl<T: MatrixElement> Default for BuilderRegistry<T> {
    fn default() -> Self {
        let mut registry = Self::empty();
        SparseVectorBuilder::register(&mut registry);
        CompleteVectorBuilder::register(&mut registry);
        SparseMatrixBuilder::register(&mut registry);
        CompleteMatrixBuilder::register(&mut registry);
        registry
    }
}

impl<T: MatrixElement> fmt::Debug for BuilderRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vector_kinds: Vec<&str> = self.vectors.keys().map(String::as_str).collect();
        vector_kinds.sort_unstable();
        f.debug_struct("BuilderRegistry")
            .field("matrices", &self.matrix_kinds())
            .field("vectors", &vector_kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spmat_core::MatrixKind;

    #[test]
    fn test_default_kinds() {
        let registry = BuilderRegistry::<f64>::default();
        assert_eq!(registry.matrix_kinds(), vec!["complete", "sparse"]);
        assert!(registry.contains("sparse"));

        let mut builder = registry.matrix_builder("complete", 2, 2).unwrap();
        builder.set(0, 0, 1.0);
        assert_eq!(builder.build().kind(), MatrixKind::Dense);
    }

    #[test]
    fn test_unknown_kind() {
        let registry = BuilderRegistry::<f64>::default();
        assert_eq!(
            registry.matrix_builder("dumb", 2, 2).err(),
            Some(MatrixError::Configuration("dumb".to_string()))
        );
        assert!(registry.vector_builder("dumb", 2).is_err());
        assert!(BuilderRegistry::<f64>::empty().matrix_kinds().is_empty());
    }

    #[test]
    fn test_registering_replaces() {
        let mut registry = BuilderRegistry::<f64>::default();
        registry.register_matrix("sparse", |rows, cols| {
            Box::new(CompleteMatrixBuilder::new(rows, cols)) as Box<dyn MatrixBuilder<f64>>
        });
        let builder = registry.matrix_builder("sparse", 1, 1).unwrap();
        assert_eq!(builder.build().kind(), MatrixKind::Dense);
    }
}
