//! Index and shape checks

use crate::{MatrixError, Result};

/// Resolve an index in `[-size, size)` to a position in `[0, size)`
///
/// Negative indices count from the end. Anything outside the doubled range
/// yields `None`.
pub const fn resolve_index(index: isize, size: usize) -> Option<usize> {
    if index < 0 {
        let back = index.unsigned_abs();
        if back <= size {
            Some(size - back)
        } else {
            None
        }
    } else if (index as usize) < size {
        Some(index as usize)
    } else {
        None
    }
}

/// Check that two operands have identical shapes
pub fn ensure_same_shape(
    op: &'static str,
    left: (usize, usize),
    right: (usize, usize),
) -> Result<()> {
    if left != right {
        return Err(MatrixError::DimensionMismatch { op, left, right });
    }
    Ok(())
}

/// Check that `left * right` is defined
pub fn ensure_multipliable(
    op: &'static str,
    left: (usize, usize),
    right: (usize, usize),
) -> Result<()> {
    if left.1 != right.0 {
        return Err(MatrixError::DimensionMismatch { op, left, right });
    }
    Ok(())
}

/// Check that a matrix is square
pub fn ensure_square(op: &'static str, dimensions: (usize, usize)) -> Result<()> {
    let (rows, columns) = dimensions;
    if rows != columns {
        return Err(MatrixError::NotSquare { op, rows, columns });
    }
    Ok(())
}
