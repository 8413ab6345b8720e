//! Matrix element type constraints
//!
//! Elements are real scalars the dense backend can factorize, so the trait
//! builds on [`nalgebra::RealField`] and only adds what the representations
//! need on top of it.

use nalgebra::{ComplexField, RealField};

use crate::format::DataType;

/// Trait for types that can be stored as matrix and vector elements
///
/// The `RealField` bound supplies field arithmetic, ordering, `Display` and
/// the `Zero`/`One` constants, which is everything the builders and the
/// dense decompositions use.
pub trait MatrixElement: RealField + Copy {
    /// Get the DataType tag for this element type
    fn data_type() -> DataType;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert from f64 for generic construction
    ///
    /// Used for tolerances and rounding factors that are configured as `f64`.
    fn from_float(value: f64) -> Self;

    /// Convert to f64 for generic operations
    fn to_float(self) -> f64;

    /// Absolute value
    fn magnitude_of(self) -> Self {
        <Self as ComplexField>::abs(self)
    }

    /// Whether `self` and `other` differ by at most `epsilon`
    fn approx_eq(self, other: Self, epsilon: Self) -> bool {
        (self - other).magnitude_of() <= epsilon
    }
}

impl MatrixElement for f32 {
    fn data_type() -> DataType {
        DataType::F32
    }

    fn from_float(value: f64) -> Self {
        value as f32
    }

    fn to_float(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for f64 {
    fn data_type() -> DataType {
        DataType::F64
    }

    fn from_float(value: f64) -> Self {
        value
    }

    fn to_float(self) -> f64 {
        self
    }
}
