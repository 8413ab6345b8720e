//! Representation tags and structure flags
//!
//! This module defines the tags that name how an immutable matrix is stored,
//! which builder kinds exist by default, and the bit flags used to summarise
//! the structural properties of a matrix.

use core::fmt;
use core::str::FromStr;

use crate::MatrixError;

/// Storage representation of an immutable matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MatrixKind {
    /// One sparse vector per row
    Sparse = 0,
    /// Three band vectors for a square matrix with `|i - j| <= 1`
    Tridiagonal = 1,
    /// Dense storage in the backend
    Dense = 2,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Sparse => write!(f, "SparseMatrix"),
            MatrixKind::Tridiagonal => write!(f, "TridiagonalMatrix"),
            MatrixKind::Dense => write!(f, "DenseMatrix"),
        }
    }
}

/// Builder kinds registered by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderKind {
    /// Produces sparse vectors, and sparse or tridiagonal matrices
    Sparse,
    /// Produces dense vectors and matrices
    Complete,
}

impl BuilderKind {
    /// Registry name of this kind
    pub const fn name(&self) -> &'static str {
        match self {
            BuilderKind::Sparse => "sparse",
            BuilderKind::Complete => "complete",
        }
    }
}

impl fmt::Display for BuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuilderKind {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sparse" => Ok(BuilderKind::Sparse),
            "complete" => Ok(BuilderKind::Complete),
            other => Err(MatrixError::Configuration(other.to_string())),
        }
    }
}

/// Element data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    F32 = 0,
    F64 = 1,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
        }
    }
}

impl DataType {
    /// Get the size in bytes for this data type
    pub const fn size_bytes(&self) -> usize {
        match self {
            DataType::F32 => 4,
            DataType::F64 => 8,
        }
    }
}

/// Structure flags for matrix properties
pub mod structure_flags {
    /// Matrix equals its transpose
    pub const SYMMETRIC: u8 = 1 << 0;
    /// No non-zero entry below the diagonal
    pub const UPPER_TRIANGULAR: u8 = 1 << 1;
    /// No non-zero entry above the diagonal
    pub const LOWER_TRIANGULAR: u8 = 1 << 2;
    /// Exactly one entry equal to one in every row and column
    pub const PERMUTATION: u8 = 1 << 3;
    /// Both triangular flags
    pub const DIAGONAL: u8 = UPPER_TRIANGULAR | LOWER_TRIANGULAR;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_kind_parsing() {
        assert_eq!("sparse".parse::<BuilderKind>(), Ok(BuilderKind::Sparse));
        assert_eq!("complete".parse::<BuilderKind>(), Ok(BuilderKind::Complete));
        assert_eq!(
            "banded".parse::<BuilderKind>(),
            Err(MatrixError::Configuration("banded".to_string()))
        );
        assert_eq!(BuilderKind::Complete.to_string(), "complete");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MatrixKind::Tridiagonal.to_string(), "TridiagonalMatrix");
        assert_eq!(DataType::F32.size_bytes(), 4);
    }
}
