//! Abstract interfaces shared by every representation
//!
//! Traits here are pure capability interfaces; operator dispatch in the
//! `spmat` crate asks an operand which of them it satisfies instead of
//! asking for its concrete type.

pub mod element;
pub mod matrix;

pub use element::MatrixElement;
pub use matrix::{MatrixAccess, VectorAccess};
