//! Error types for matrix and vector operations

/// Errors that can occur during matrix and vector operations
///
/// Every variant carries the operation name and the shapes involved so a
/// failure can be diagnosed without re-running the computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the operation
    #[error(
        "dimension mismatch in {op}: {}x{} vs {}x{}",
        .left.0,
        .left.1,
        .right.0,
        .right.1
    )]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Inverse or division requested on a matrix that is not regular
    #[error("matrix {rows}x{columns} is singular")]
    SingularMatrix { rows: usize, columns: usize },
    /// Division by a zero-valued number
    #[error("division by zero in {op}")]
    DivideByZero { op: &'static str },
    /// No overload matches the operand and coercion is unavailable
    #[error("unsupported operands for {op}: {left} and {right}")]
    UnsupportedOperand {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    /// The operation is only defined for square matrices
    #[error("{op} requires a square matrix, got {rows}x{columns}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        columns: usize,
    },
    /// A builder kind was requested that nothing registered
    #[error("unregistered builder kind: {0}")]
    Configuration(String),
    /// The dense backend could not produce the requested decomposition
    #[error("decomposition failed: {0}")]
    Decomposition(String),
}

impl MatrixError {
    /// Whether the error is caused by operand shapes rather than values
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            MatrixError::DimensionMismatch { .. } | MatrixError::NotSquare { .. }
        )
    }
}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_shapes() {
        let err = MatrixError::DimensionMismatch {
            op: "add",
            left: (3, 1),
            right: (4, 1),
        };
        assert_eq!(err.to_string(), "dimension mismatch in add: 3x1 vs 4x1");
        assert!(err.is_shape_error());

        let err = MatrixError::SingularMatrix {
            rows: 2,
            columns: 2,
        };
        assert_eq!(err.to_string(), "matrix 2x2 is singular");
        assert!(!err.is_shape_error());
    }
}
