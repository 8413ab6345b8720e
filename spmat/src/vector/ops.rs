//! Vector arithmetic through operand tables
//!
//! Registration order per operator:
//! - multiply: numeric, vector (inner product), matrix (vector as a column)
//! - divide: numeric
//! - add and subtract: vector, matrix (vector promoted to the matrix shape)
//!
//! Anything else is retried through coercion.

use core::ops::Neg;

use spmat_core::{MatrixElement, MatrixError, Result, VectorAccess};

use super::{DenseVector, IterMode, Vector};
use crate::operand::{dispatch, BinaryOp, Handler, Operand, Value};
use crate::overload::{OverloadTable, Predicate};

type VectorHandler<'a, T> = Handler<'a, Vector<T>, T>;

impl<T: MatrixElement> Vector<T> {
    /// Apply `op` with `self` on the left
    pub fn apply<'a>(&self, op: BinaryOp, rhs: Operand<'a, T>) -> Result<Value<T>> {
        let table = match op {
            BinaryOp::Add => Self::adders(),
            BinaryOp::Sub => Self::subtractors(),
            BinaryOp::Mul => Self::multipliers(),
            BinaryOp::Div => Self::dividers(),
            BinaryOp::Pow => OverloadTable::new([]),
        };
        dispatch(self, op, &table, rhs, || Value::Vector(self.clone()))
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

    /// No power overloads are registered; only a foreign operand can succeed
    pub fn try_pow<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Value<T>> {
        self.apply(BinaryOp::Pow, rhs.into())
    }

    fn multipliers<'a>() -> OverloadTable<Operand<'a, T>, VectorHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_numeric as Predicate<Operand<'a, T>>,
                Self::multiply_numeric as VectorHandler<'a, T>,
            ),
            (
                Operand::is_vector as Predicate<Operand<'a, T>>,
                Self::multiply_vector as VectorHandler<'a, T>,
            ),
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::multiply_matrix as VectorHandler<'a, T>,
            ),
        ])
    }

    fn dividers<'a>() -> OverloadTable<Operand<'a, T>, VectorHandler<'a, T>> {
        OverloadTable::new([(
            Operand::is_numeric as Predicate<Operand<'a, T>>,
            Self::divide_numeric as VectorHandler<'a, T>,
        )])
    }

    fn adders<'a>() -> OverloadTable<Operand<'a, T>, VectorHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_vector as Predicate<Operand<'a, T>>,
                Self::add_vector as VectorHandler<'a, T>,
            ),
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::add_matrix as VectorHandler<'a, T>,
            ),
        ])
    }

    fn subtractors<'a>() -> OverloadTable<Operand<'a, T>, VectorHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_vector as Predicate<Operand<'a, T>>,
                Self::sub_vector as VectorHandler<'a, T>,
            ),
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::sub_matrix as VectorHandler<'a, T>,
            ),
        ])
    }

    fn multiply_numeric(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let factor = numeric(rhs, BinaryOp::Mul)?;
        Ok(Value::Vector(self.scale(factor)))
    }

    fn multiply_vector(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = vector(rhs, BinaryOp::Mul)?;
        self.inner_product(other).map(Value::Number)
    }

    fn multiply_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = matrix(rhs, BinaryOp::Mul)?;
        self.to_column_matrix()
            .multiply_matrix(other)
            .map(Value::Matrix)
    }

    fn divide_numeric(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let divisor = numeric(rhs, BinaryOp::Div)?;
        if divisor.is_zero() {
            return Err(MatrixError::DivideByZero { op: "divide" });
        }
        Ok(Value::Vector(self.map(IterMode::NonZero, |x| x / divisor)))
    }

    fn add_vector(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = vector(rhs, BinaryOp::Add)?;
        self.combine("add", other, |a, b| a + b).map(Value::Vector)
    }

    fn sub_vector(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = vector(rhs, BinaryOp::Sub)?;
        self.combine("subtract", other, |a, b| a - b)
            .map(Value::Vector)
    }

    fn add_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = matrix(rhs, BinaryOp::Add)?;
        self.promote(other.dimensions())
            .add_matrix(other)
            .map(Value::Matrix)
    }

    fn sub_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = matrix(rhs, BinaryOp::Sub)?;
        self.promote(other.dimensions())
            .sub_matrix(other)
            .map(Value::Matrix)
    }

    /// Position-wise combination of two equally sized vectors
    ///
    /// `f(0, 0)` must be zero; sparse vectors only visit positions that are
    /// non-zero on either side.
    fn combine(
        &self,
        op: &'static str,
        other: &dyn VectorAccess<T>,
        f: fn(T, T) -> T,
    ) -> Result<Self> {
        if self.size() != other.size() {
            return Err(MatrixError::DimensionMismatch {
                op,
                left: (self.size(), 1),
                right: (other.size(), 1),
            });
        }
        if self.is_empty() {
            return Ok(self.clone());
        }
        Ok(match self {
            Vector::Sparse(v) => Vector::Sparse(v.merge(&other.non_zero_entries(), f)),
            Vector::Dense(v) => Vector::Dense(DenseVector::new(
                v.as_inner()
                    .map_with_location(|i, _, x| f(x, other.component(i))),
            )),
        })
    }
}

fn numeric<T: MatrixElement>(rhs: &Operand<'_, T>, op: BinaryOp) -> Result<T> {
    rhs.as_numeric().ok_or(MatrixError::UnsupportedOperand {
        op: op.name(),
        left: "vector",
        right: rhs.kind_name(),
    })
}

fn vector<'a, T: MatrixElement>(
    rhs: &Operand<'a, T>,
    op: BinaryOp,
) -> Result<&'a dyn VectorAccess<T>> {
    rhs.as_vector().ok_or(MatrixError::UnsupportedOperand {
        op: op.name(),
        left: "vector",
        right: rhs.kind_name(),
    })
}

fn matrix<'a, T: MatrixElement>(
    rhs: &Operand<'a, T>,
    op: BinaryOp,
) -> Result<&'a dyn spmat_core::MatrixAccess<T>> {
    rhs.as_matrix().ok_or(MatrixError::UnsupportedOperand {
        op: op.name(),
        left: "vector",
        right: rhs.kind_name(),
    })
}

impl<T: MatrixElement> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.map(IterMode::NonZero, |x| -x)
    }
}

impl<T: MatrixElement> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        -&self
    }
}
