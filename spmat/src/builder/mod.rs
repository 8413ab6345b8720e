//! Mutable builders that materialize immutable vectors and matrices
//!
//! Every vector and matrix is produced by a builder. The sparse builders
//! pick the cheapest representation for what was staged; the complete
//! builders always produce dense storage.

mod factory;
mod matrix;
mod registry;
mod vector;

use spmat_core::{BuilderKind, MatrixElement};

use crate::matrix::Matrix;
use crate::vector::Vector;

pub use factory::{MatrixFactory, VectorFactory};
pub use matrix::{CompleteMatrixBuilder, MatrixBuilder, MatrixStaging, SparseMatrixBuilder};
pub use registry::{BuilderRegistry, MatrixConstructor, VectorConstructor};
pub use vector::{CompleteVectorBuilder, SparseVectorBuilder, VectorBuilder};

/// Stage through `fill`, then materialize with the builder of `kind`
pub(crate) fn build_matrix<T: MatrixElement>(
    kind: BuilderKind,
    rows: usize,
    cols: usize,
    fill: impl FnOnce(&mut MatrixStaging<T>),
) -> Matrix<T> {
    let mut staging = MatrixStaging::new(rows, cols);
    fill(&mut staging);
    match kind {
        BuilderKind::Sparse => SparseMatrixBuilder::from_staging(staging).into_matrix(),
        BuilderKind::Complete => CompleteMatrixBuilder::from_staging(staging).into_matrix(),
    }
}

/// Vector counterpart of [`build_matrix`]
pub(crate) fn build_vector<T: MatrixElement>(
    kind: BuilderKind,
    size: usize,
    fill: impl FnOnce(&mut SparseVectorBuilder<T>),
) -> Vector<T> {
    let mut staging = SparseVectorBuilder::new(size);
    fill(&mut staging);
    match kind {
        BuilderKind::Sparse => Vector::Sparse(staging.into_vector()),
        BuilderKind::Complete => {
            Vector::Dense(CompleteVectorBuilder::from_staging(staging).into_vector())
        }
    }
}
