//! spmat core - element, capability and error definitions
//!
//! This crate provides the definitions every matrix representation agrees on:
//! the element trait, the capability traits operator dispatch checks for,
//! representation tags, structure flags and the error taxonomy. It holds no
//! storage; concrete vectors and matrices live in the `spmat` crate.

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::*;
