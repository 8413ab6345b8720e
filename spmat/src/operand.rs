//! Operands and results of type-directed arithmetic
//!
//! The right-hand side of every binary operation is an [`Operand`]: a
//! borrowed matrix-like value, a borrowed vector-like value, a number, or a
//! foreign value that only knows how to [`Coerce`] itself. Results come back
//! as an owned [`Value`] because the result kind depends on the operands.

use core::fmt;

use spmat_core::{MatrixAccess, MatrixElement, MatrixError, Result, VectorAccess};
use tracing::{debug, trace};

use crate::matrix::{DenseMatrix, Matrix, SparseMatrix, TridiagonalMatrix};
use crate::overload::OverloadTable;
use crate::scalar::Scalar;
use crate::vector::{DenseVector, SparseVector, Vector};

/// Binary operators that go through dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Operation name used in errors and logs
    pub const fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::Pow => "power",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Right-hand side of a binary operation
#[derive(Clone, Copy)]
pub enum Operand<'a, T: MatrixElement> {
    Matrix(&'a dyn MatrixAccess<T>),
    Vector(&'a dyn VectorAccess<T>),
    Numeric(T),
    Foreign(&'a dyn Coerce<T>),
}

impl<'a, T: MatrixElement> Operand<'a, T> {
    pub fn matrix(matrix: &'a dyn MatrixAccess<T>) -> Self {
        Operand::Matrix(matrix)
    }

    pub fn vector(vector: &'a dyn VectorAccess<T>) -> Self {
        Operand::Vector(vector)
    }

    pub fn foreign(value: &'a dyn Coerce<T>) -> Self {
        Operand::Foreign(value)
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, Operand::Matrix(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Operand::Vector(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Operand::Numeric(_))
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self, Operand::Foreign(_))
    }

    pub fn as_matrix(&self) -> Option<&'a dyn MatrixAccess<T>> {
        match self {
            Operand::Matrix(m) => Some(*m),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&'a dyn VectorAccess<T>> {
        match self {
            Operand::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<T> {
        match self {
            Operand::Numeric(x) => Some(*x),
            _ => None,
        }
    }

    /// Short description used in errors and logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Matrix(_) => "matrix",
            Operand::Vector(_) => "vector",
            Operand::Numeric(_) => "numeric",
            Operand::Foreign(value) => value.type_name(),
        }
    }

    /// Shape for error reporting, vectors count as columns
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Operand::Matrix(m) => m.dimensions(),
            Operand::Vector(v) => (v.size(), 1),
            Operand::Numeric(_) => (1, 1),
            Operand::Foreign(_) => (0, 0),
        }
    }
}

impl<'a, T: MatrixElement> fmt::Debug for Operand<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Numeric(x) => write!(f, "Numeric({})", x),
            other => {
                let (rows, cols) = other.dimensions();
                write!(f, "{}({}x{})", other.kind_name(), rows, cols)
            }
        }
    }
}

impl<'a, T: MatrixElement> From<T> for Operand<'a, T> {
    fn from(value: T) -> Self {
        Operand::Numeric(value)
    }
}

macro_rules! matrix_operand {
    ($($ty:ident),*) => {
        $(
            impl<'a, T: MatrixElement> From<&'a $ty<T>> for Operand<'a, T> {
                fn from(value: &'a $ty<T>) -> Self {
                    Operand::Matrix(value)
                }
            }
        )*
    };
}

macro_rules! vector_operand {
    ($($ty:ident),*) => {
        $(
            impl<'a, T: MatrixElement> From<&'a $ty<T>> for Operand<'a, T> {
                fn from(value: &'a $ty<T>) -> Self {
                    Operand::Vector(value)
                }
            }
        )*
    };
}

matrix_operand!(Matrix, SparseMatrix, TridiagonalMatrix, DenseMatrix);
vector_operand!(Vector, SparseVector, DenseVector);

impl<'a, T: MatrixElement> From<&'a Value<T>> for Operand<'a, T> {
    fn from(value: &'a Value<T>) -> Self {
        value.operand()
    }
}

/// A value from outside the type hierarchy that can convert itself
///
/// When no overload accepts an operand, the left-hand side is handed to
/// [`Coerce::coerce`] and the operation is retried on the returned pair.
pub trait Coerce<T: MatrixElement> {
    /// Pair `(new_left, new_right)` to retry the operation with, or `None`
    fn coerce(&self, left: &Value<T>) -> Option<(Value<T>, Value<T>)>;

    /// Name used in errors
    fn type_name(&self) -> &'static str {
        "foreign"
    }
}

/// Owned result of a binary operation
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T: MatrixElement> {
    Matrix(Matrix<T>),
    Vector(Vector<T>),
    Number(T),
}

impl<T: MatrixElement> Value<T> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Matrix(_) => "matrix",
            Value::Vector(_) => "vector",
            Value::Number(_) => "numeric",
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix<T>> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector<T>> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<T> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix<T>> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector<T>> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow as the right-hand side of another operation
    pub fn operand(&self) -> Operand<'_, T> {
        match self {
            Value::Matrix(m) => Operand::Matrix(m),
            Value::Vector(v) => Operand::Vector(v),
            Value::Number(x) => Operand::Numeric(*x),
        }
    }

    /// Apply `op` with `self` on the left
    pub fn apply(&self, op: BinaryOp, rhs: Operand<'_, T>) -> Result<Value<T>> {
        match self {
            Value::Matrix(m) => m.apply(op, rhs),
            Value::Vector(v) => v.apply(op, rhs),
            Value::Number(x) => Scalar::new(*x).apply(op, rhs),
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
}

impl<T: MatrixElement> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Matrix(m) => fmt::Display::fmt(m, f),
            Value::Vector(v) => fmt::Display::fmt(v, f),
            Value::Number(x) => fmt::Display::fmt(x, f),
        }
    }
}

impl<T: MatrixElement> From<Matrix<T>> for Value<T> {
    fn from(m: Matrix<T>) -> Self {
        Value::Matrix(m)
    }
}

impl<T: MatrixElement> From<Vector<T>> for Value<T> {
    fn from(v: Vector<T>) -> Self {
        Value::Vector(v)
    }
}

/// Exponent of a matrix power
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exponent<T> {
    /// Repeated multiplication, through the inverse when negative
    Integer(i64),
    /// Fractional power through the eigensystem
    Real(T),
}

impl<T: MatrixElement> Exponent<T> {
    /// Integral numbers become `Integer`, everything else `Real`
    pub fn from_number(value: T) -> Self {
        let as_float = value.to_float();
        if as_float.fract() == 0.0 && as_float.abs() <= i64::MAX as f64 {
            Exponent::Integer(as_float as i64)
        } else {
            Exponent::Real(value)
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Exponent::Integer(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Exponent::Real(_))
    }
}

impl<T> From<i64> for Exponent<T> {
    fn from(value: i64) -> Self {
        Exponent::Integer(value)
    }
}

impl<T> From<i32> for Exponent<T> {
    fn from(value: i32) -> Self {
        Exponent::Integer(value as i64)
    }
}

/// Handler stored in an operand table for left-hand type `L`
pub(crate) type Handler<'a, L, T> = fn(&L, &Operand<'a, T>) -> Result<Value<T>>;

/// Run the first matching handler, or fall back to coercion
///
/// `fallback` produces the left-hand side as a [`Value`] and is only
/// called when no overload accepts `rhs`.
pub(crate) fn dispatch<'a, L, T: MatrixElement>(
    left: &L,
    op: BinaryOp,
    table: &OverloadTable<Operand<'a, T>, Handler<'a, L, T>>,
    rhs: Operand<'a, T>,
    fallback: impl FnOnce() -> Value<T>,
) -> Result<Value<T>> {
    match table.select(&rhs) {
        Some(handler) => {
            trace!(op = op.name(), operand = rhs.kind_name(), "overload selected");
            handler(left, &rhs)
        }
        None => coerce_and_apply(op, fallback(), rhs),
    }
}

/// Retry `left op rhs` through the foreign operand's coercion
pub(crate) fn coerce_and_apply<T: MatrixElement>(
    op: BinaryOp,
    left: Value<T>,
    rhs: Operand<'_, T>,
) -> Result<Value<T>> {
    let unsupported = MatrixError::UnsupportedOperand {
        op: op.name(),
        left: left.kind_name(),
        right: rhs.kind_name(),
    };
    match rhs {
        Operand::Foreign(foreign) => {
            debug!(
                op = op.name(),
                left = left.kind_name(),
                right = foreign.type_name(),
                "no overload registered, coercing operands"
            );
            let (new_left, new_right) = foreign.coerce(&left).ok_or(unsupported)?;
            new_left.apply(op, new_right.operand())
        }
        _ => Err(unsupported),
    }
}
