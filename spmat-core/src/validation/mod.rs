//! Index resolution and shape validation
//!
//! Pure functions with no storage dependencies, used by every
//! representation before touching its data.

pub mod bounds;

pub use bounds::{ensure_multipliable, ensure_same_shape, ensure_square, resolve_index};
