//! spmat - sparse-aware matrices and vectors with operator dispatch
//!
//! This library provides immutable sparse, tridiagonal and dense matrices,
//! sparse and dense vectors, mutable builders that pick the representation,
//! and a dispatch layer that resolves arithmetic by asking the right-hand
//! operand which capabilities it has.
//!
//! ## Architecture
//!
//! spmat keeps definitions and implementations apart:
//!
//! - **spmat-core**: element trait, capability traits, representation tags and errors
//! - **spmat**: builders, vectors, matrices, operand tables and numerical routines
//!
//! ## Quick Start
//!
//! ```rust
//! use spmat::{MatrixFactory, Value};
//!
//! fn example() -> spmat::Result<()> {
//!     let m = MatrixFactory::sparse().from_rows(&[[7.0, 6.0], [3.0, 9.0]]);
//!
//!     // Integer powers use repeated squaring
//!     let squared = m.try_pow(2)?;
//!     assert_eq!(squared.to_rows(), vec![vec![67.0, 96.0], vec![48.0, 99.0]]);
//!
//!     // Operators resolve through the right-hand operand
//!     let halved = m.try_div(2.0)?;
//!     assert!(matches!(halved, Value::Matrix(_)));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Representation choice**: the sparse builder emits a tridiagonal matrix
//!   when the entries allow it
//! - **Cross-representation equality**: matrices compare by value, implicit zeros included
//! - **Coercion**: foreign operands can take part in arithmetic through [`Coerce`]
//! - **Decompositions**: LUP factorisation and eigensystems backed by nalgebra

pub use spmat_core::{
    // Core traits
    MatrixAccess, MatrixElement, VectorAccess,
    // Representation tags
    BuilderKind, DataType, MatrixKind, structure_flags,
    // Error handling
    MatrixError, Result,
    // Validation utilities
    resolve_index,
};

// Implementation modules
pub mod builder;
pub mod config;
pub mod matrix;
pub mod operand;
pub mod overload;
pub mod scalar;
pub mod vector;

// Public exports
pub use builder::{
    BuilderRegistry, CompleteMatrixBuilder, CompleteVectorBuilder, MatrixBuilder, MatrixFactory,
    SparseMatrixBuilder, SparseVectorBuilder, VectorBuilder, VectorFactory,
};
pub use config::NumericConfig;
pub use matrix::{DenseMatrix, Eigensystem, Lup, Matrix, Selector, SparseMatrix, TridiagonalMatrix};
pub use operand::{BinaryOp, Coerce, Exponent, Operand, Value};
pub use overload::{OverloadTable, Predicate};
pub use scalar::Scalar;
pub use vector::{DenseVector, IterMode, SparseVector, Vector};
