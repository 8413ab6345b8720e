//! Numbers on the left of a matrix or vector operation
//!
//! When a number appears on the left, it is wrapped in a [`Scalar`] whose
//! operators know how to combine with matrices and vectors. Multiplication
//! and division by a matrix are supported; addition and subtraction with a
//! matrix or vector are not.

use spmat_core::{MatrixElement, MatrixError, Result};

use crate::matrix::Matrix;
use crate::operand::{coerce_and_apply, BinaryOp, Exponent, Operand, Value};
use crate::vector::Vector;

/// A number acting as the left operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar<T> {
    value: T,
}

impl<T: MatrixElement> Scalar<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Apply `op` with this number on the left
    pub fn apply(&self, op: BinaryOp, rhs: Operand<'_, T>) -> Result<Value<T>> {
        match op {
            BinaryOp::Add => self.additive(op, rhs, |a, b| a + b),
            BinaryOp::Sub => self.additive(op, rhs, |a, b| a - b),
            BinaryOp::Mul => self.multiply(rhs),
            BinaryOp::Div => self.divide(rhs),
            BinaryOp::Pow => self.power(rhs),
        }
    }

    pub fn try_add<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Value<T>> {
        self.apply(BinaryOp::Add, rhs.into())
    }

    pub fn try_sub<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Value<T>> {
        self.apply(BinaryOp::Sub, rhs.into())
    }

    pub fn try_mul<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Value<T>> {
        self.apply(BinaryOp::Mul, rhs.into())
    }

    pub fn try_div<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Value<T>> {
        self.apply(BinaryOp::Div, rhs.into())
    }

    pub fn try_pow<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Value<T>> {
        self.apply(BinaryOp::Pow, rhs.into())
    }

    fn unsupported(&self, op: BinaryOp, rhs: &Operand<'_, T>) -> MatrixError {
        MatrixError::UnsupportedOperand {
            op: op.name(),
            left: "numeric",
            right: rhs.kind_name(),
        }
    }

    fn additive(&self, op: BinaryOp, rhs: Operand<'_, T>, f: fn(T, T) -> T) -> Result<Value<T>> {
        match rhs {
            Operand::Numeric(x) => Ok(Value::Number(f(self.value, x))),
            Operand::Matrix(_) | Operand::Vector(_) => Err(self.unsupported(op, &rhs)),
            Operand::Foreign(_) => coerce_and_apply(op, Value::Number(self.value), rhs),
        }
    }

    fn multiply(&self, rhs: Operand<'_, T>) -> Result<Value<T>> {
        match rhs {
            Operand::Numeric(x) => Ok(Value::Number(self.value * x)),
            Operand::Matrix(m) => {
                let m = Matrix::from_access(m);
                if self.value.is_one() {
                    Ok(Value::Matrix(m))
                } else {
                    Ok(Value::Matrix(m.scale(self.value)))
                }
            }
            Operand::Vector(v) => {
                let v = Vector::from_access(v);
                if self.value.is_one() {
                    Ok(Value::Vector(v))
                } else {
                    Ok(Value::Vector(v.scale(self.value)))
                }
            }
            Operand::Foreign(_) => coerce_and_apply(BinaryOp::Mul, Value::Number(self.value), rhs),
        }
    }

    fn divide(&self, rhs: Operand<'_, T>) -> Result<Value<T>> {
        match rhs {
            Operand::Numeric(x) => {
                if x.is_zero() {
                    return Err(MatrixError::DivideByZero { op: "divide" });
                }
                Ok(Value::Number(self.value / x))
            }
            Operand::Matrix(m) => {
                let inverse = Matrix::from_access(m).inverse()?;
                if self.value.is_one() {
                    Ok(Value::Matrix(inverse))
                } else {
                    Ok(Value::Matrix(inverse.scale(self.value)))
                }
            }
            Operand::Vector(_) => Err(self.unsupported(BinaryOp::Div, &rhs)),
            Operand::Foreign(_) => coerce_and_apply(BinaryOp::Div, Value::Number(self.value), rhs),
        }
    }

    fn power(&self, rhs: Operand<'_, T>) -> Result<Value<T>> {
        match rhs {
            Operand::Numeric(x) => Ok(Value::Number(match Exponent::from_number(x) {
                Exponent::Integer(n) if n.unsigned_abs() <= i32::MAX as u64 => {
                    self.value.powi(n as i32)
                }
                _ => self.value.powf(x),
            })),
            Operand::Matrix(_) | Operand::Vector(_) => Err(self.unsupported(BinaryOp::Pow, &rhs)),
            Operand::Foreign(_) => coerce_and_apply(BinaryOp::Pow, Value::Number(self.value), rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MatrixFactory;

    #[test]
    fn test_numeric_arithmetic() {
        let two = Scalar::new(2.0f64);
        assert_eq!(two.try_add(3.0), Ok(Value::Number(5.0)));
        assert_eq!(two.try_sub(3.0), Ok(Value::Number(-1.0)));
        assert_eq!(two.try_pow(3.0), Ok(Value::Number(8.0)));
        assert_eq!(
            two.try_div(0.0),
            Err(MatrixError::DivideByZero { op: "divide" })
        );
    }

    #[test]
    fn test_identity_multiply_copies() {
        let m = MatrixFactory::sparse().from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let product = Scalar::new(1.0).try_mul(&m).unwrap();
        assert_eq!(product, Value::Matrix(m.clone()));

        let product = Scalar::new(3.0).try_mul(&m).unwrap();
        let expected = MatrixFactory::sparse().from_rows(&[[3.0, 6.0], [9.0, 12.0]]);
        assert_eq!(product, Value::Matrix(expected));
    }

    #[test]
    fn test_additive_with_matrix_unsupported() {
        let m = MatrixFactory::sparse().identity::<f64>(2);
        assert_eq!(
            Scalar::new(1.0).try_add(&m),
            Err(MatrixError::UnsupportedOperand {
                op: "add",
                left: "numeric",
                right: "matrix",
            })
        );
    }

    #[test]
    fn test_divide_matrix_is_scaled_inverse() {
        let m = MatrixFactory::sparse().from_rows(&[[2.0, 0.0], [0.0, 4.0]]);
        let result = Scalar::new(2.0).try_div(&m).unwrap();
        let expected = MatrixFactory::sparse().from_rows(&[[1.0, 0.0], [0.0, 0.5]]);
        assert_eq!(result, Value::Matrix(expected));

        let v = crate::builder::VectorFactory::sparse().from_values(&[1.0, 2.0]);
        assert!(matches!(
            Scalar::new(2.0).try_div(&v),
            Err(MatrixError::UnsupportedOperand { .. })
        ));
    }
}
