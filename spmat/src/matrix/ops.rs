//! Matrix arithmetic through operand tables
//!
//! Registration order per operator:
//! - multiply: matrix, vector, numeric
//! - divide: matrix (multiply by the inverse), numeric
//! - add and subtract: matrix, vector (promoted to a row or column)
//! - power: integer exponents by sign; real exponents through the eigensystem
//!
//! Anything else is retried through coercion.

use core::ops::Neg;

use hashbrown::HashMap;
use nalgebra::DVector;
use spmat_core::{
    ensure_multipliable, ensure_same_shape, ensure_square, BuilderKind, MatrixAccess, MatrixElement,
    MatrixError, Result, VectorAccess,
};

use super::decompose::eigen;
use super::{DenseMatrix, Matrix};
use crate::builder::{build_matrix, build_vector};
use crate::config::NumericConfig;
use crate::operand::{coerce_and_apply, dispatch, BinaryOp, Exponent, Handler, Operand, Value};
use crate::overload::{OverloadTable, Predicate};
use crate::vector::{promote_access, DenseVector, Vector};

type MatrixHandler<'a, T> = Handler<'a, Matrix<T>, T>;
type IntegerPowerHandler<T> = fn(&Matrix<T>, i64) -> Result<Matrix<T>>;

impl<T: MatrixElement> Matrix<T> {
    /// Apply `op` with `self` on the left
    pub fn apply<'a>(&self, op: BinaryOp, rhs: Operand<'a, T>) -> Result<Value<T>> {
        let table = match op {
            BinaryOp::Add => Self::adders(),
            BinaryOp::Sub => Self::subtractors(),
            BinaryOp::Mul => Self::multipliers(),
            BinaryOp::Div => Self::dividers(),
            BinaryOp::Pow => {
                return match rhs {
                    Operand::Numeric(x) => {
                        self.try_pow(Exponent::from_number(x)).map(Value::Matrix)
                    }
                    _ => coerce_and_apply(op, Value::Matrix(self.clone()), rhs),
                };
            }
        };
        dispatch(self, op, &table, rhs, || Value::Matrix(self.clone()))
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

    /// Matrix power
    ///
    /// Integer exponents use repeated squaring, through the inverse when
    /// negative; zero gives the identity. Real exponents go through the
    /// eigensystem.
    pub fn try_pow(&self, exponent: impl Into<Exponent<T>>) -> Result<Self> {
        self.try_pow_with(exponent, &NumericConfig::default())
    }

    pub fn try_pow_with(
        &self,
        exponent: impl Into<Exponent<T>>,
        config: &NumericConfig,
    ) -> Result<Self> {
        ensure_square("power", self.dimensions())?;
        match exponent.into() {
            Exponent::Integer(n) => {
                let handler = Self::integer_exponents()
                    .select(&n)
                    .ok_or(MatrixError::UnsupportedOperand {
                        op: "power",
                        left: "matrix",
                        right: "integer",
                    })?;
                handler(self, n)
            }
            Exponent::Real(x) => self.real_power(x, config),
        }
    }

    /// Unary plus
    pub fn pos(&self) -> Self {
        self.clone()
    }

    /// Multiply every entry by `factor`
    pub fn scale(&self, factor: T) -> Self {
        self.map_non_zero(|x| x * factor)
    }

    /// Element-wise sum with a matrix of the same shape
    pub fn add_matrix(&self, rhs: &dyn MatrixAccess<T>) -> Result<Self> {
        self.combine("add", rhs, |a, b| a + b)
    }

    /// Element-wise difference with a matrix of the same shape
    pub fn sub_matrix(&self, rhs: &dyn MatrixAccess<T>) -> Result<Self> {
        self.combine("subtract", rhs, |a, b| a - b)
    }

    /// Matrix product
    pub fn multiply_matrix(&self, rhs: &dyn MatrixAccess<T>) -> Result<Self> {
        ensure_multipliable("multiply", self.dimensions(), rhs.dimensions())?;
        match self {
            Matrix::Dense(left) => {
                let right = DenseMatrix::from_access(rhs);
                Ok(Matrix::Dense(DenseMatrix::new(left.as_inner() * right.as_inner())))
            }
            _ => Ok(self.row_product(rhs)),
        }
    }

    /// Product with a vector on the right
    ///
    /// A vector matching the column count is a column and yields a vector.
    /// A single-column matrix treats the vector as a row and yields their
    /// outer product.
    pub fn multiply_vector(&self, rhs: &dyn VectorAccess<T>) -> Result<Value<T>> {
        let (rows, cols) = self.dimensions();
        let size = rhs.size();
        if cols == size {
            return Ok(Value::Vector(match self {
                Matrix::Dense(left) => {
                    let right = DVector::from_fn(size, |k, _| rhs.component(k));
                    Vector::Dense(DenseVector::new(left.as_inner() * right))
                }
                _ => build_vector(BuilderKind::Sparse, rows, |staging| {
                    for i in 0..rows {
                        let dot = self
                            .row_entries(i)
                            .into_iter()
                            .fold(T::zero(), |acc, (k, x)| acc + x * rhs.component(k));
                        staging.set(i, dot);
                    }
                }),
            }));
        }
        if cols == 1 {
            let row = promote_access(rhs, self.builder_kind(), (1, size));
            return self.multiply_matrix(&row).map(Value::Matrix);
        }
        Err(MatrixError::DimensionMismatch {
            op: "multiply",
            left: (rows, cols),
            right: (size, 1),
        })
    }

    fn multipliers<'a>() -> OverloadTable<Operand<'a, T>, MatrixHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::multiply_by_matrix as MatrixHandler<'a, T>,
            ),
            (
                Operand::is_vector as Predicate<Operand<'a, T>>,
                Self::multiply_by_vector as MatrixHandler<'a, T>,
            ),
            (
                Operand::is_numeric as Predicate<Operand<'a, T>>,
                Self::multiply_by_numeric as MatrixHandler<'a, T>,
            ),
        ])
    }

    fn dividers<'a>() -> OverloadTable<Operand<'a, T>, MatrixHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::divide_by_matrix as MatrixHandler<'a, T>,
            ),
            (
                Operand::is_numeric as Predicate<Operand<'a, T>>,
                Self::divide_by_numeric as MatrixHandler<'a, T>,
            ),
        ])
    }

    fn adders<'a>() -> OverloadTable<Operand<'a, T>, MatrixHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::add_by_matrix as MatrixHandler<'a, T>,
            ),
            (
                Operand::is_vector as Predicate<Operand<'a, T>>,
                Self::add_by_vector as MatrixHandler<'a, T>,
            ),
        ])
    }

    fn subtractors<'a>() -> OverloadTable<Operand<'a, T>, MatrixHandler<'a, T>> {
        OverloadTable::new([
            (
                Operand::is_matrix as Predicate<Operand<'a, T>>,
                Self::sub_by_matrix as MatrixHandler<'a, T>,
            ),
            (
                Operand::is_vector as Predicate<Operand<'a, T>>,
                Self::sub_by_vector as MatrixHandler<'a, T>,
            ),
        ])
    }

    fn integer_exponents() -> OverloadTable<i64, IntegerPowerHandler<T>> {
        OverloadTable::new([
            (
                (|n: &i64| *n < 0) as Predicate<i64>,
                Self::negative_power as IntegerPowerHandler<T>,
            ),
            (
                (|n: &i64| *n == 0) as Predicate<i64>,
                Self::zero_power as IntegerPowerHandler<T>,
            ),
            (
                (|n: &i64| *n > 0) as Predicate<i64>,
                Self::positive_power as IntegerPowerHandler<T>,
            ),
        ])
    }

    fn multiply_by_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        self.multiply_matrix(matrix(rhs, BinaryOp::Mul)?)
            .map(Value::Matrix)
    }

    fn multiply_by_vector(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        self.multiply_vector(vector(rhs, BinaryOp::Mul)?)
    }

    fn multiply_by_numeric(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        Ok(Value::Matrix(self.scale(numeric(rhs, BinaryOp::Mul)?)))
    }

    fn divide_by_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let inverse = Matrix::from_access(matrix(rhs, BinaryOp::Div)?).inverse()?;
        self.multiply_matrix(&inverse).map(Value::Matrix)
    }

    fn divide_by_numeric(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let divisor = numeric(rhs, BinaryOp::Div)?;
        if divisor.is_zero() {
            return Err(MatrixError::DivideByZero { op: "divide" });
        }
        Ok(Value::Matrix(self.map_non_zero(|x| x / divisor)))
    }

    fn add_by_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        self.add_matrix(matrix(rhs, BinaryOp::Add)?)
            .map(Value::Matrix)
    }

    fn add_by_vector(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = vector(rhs, BinaryOp::Add)?;
        let promoted = promote_access(other, self.builder_kind(), self.dimensions());
        self.add_matrix(&promoted).map(Value::Matrix)
    }

    fn sub_by_matrix(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        self.sub_matrix(matrix(rhs, BinaryOp::Sub)?)
            .map(Value::Matrix)
    }

    fn sub_by_vector(&self, rhs: &Operand<'_, T>) -> Result<Value<T>> {
        let other = vector(rhs, BinaryOp::Sub)?;
        let promoted = promote_access(other, self.builder_kind(), self.dimensions());
        self.sub_matrix(&promoted).map(Value::Matrix)
    }

    fn negative_power(&self, n: i64) -> Result<Self> {
        self.inverse()?.repeated_squaring(n.unsigned_abs())
    }

    fn zero_power(&self, _: i64) -> Result<Self> {
        let size = self.row_size();
        Ok(build_matrix(self.builder_kind(), size, size, |staging| {
            for i in 0..size {
                staging.set(i, i, T::one());
            }
        }))
    }

    fn positive_power(&self, n: i64) -> Result<Self> {
        self.repeated_squaring(n.unsigned_abs())
    }

    /// `self^n` for `n >= 1` from the binary expansion of `n`
    fn repeated_squaring(&self, n: u64) -> Result<Self> {
        let mut remaining = n;
        let mut square = self.clone();
        let mut result: Option<Self> = None;
        loop {
            if remaining & 1 == 1 {
                result = Some(match result {
                    Some(acc) => acc.multiply_matrix(&square)?,
                    None => square.clone(),
                });
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            square = square.multiply_matrix(&square)?;
        }
        match result {
            Some(power) => Ok(power),
            None => self.zero_power(0),
        }
    }

    fn real_power(&self, exponent: T, config: &NumericConfig) -> Result<Self> {
        let dense = self.to_dense();
        let system = eigen(dense.as_inner(), config)?;
        system.power(exponent).map(|data| Matrix::Dense(DenseMatrix::new(data)))
    }

    /// Element-wise combination with a matrix of the same shape
    ///
    /// `f(0, 0)` must be zero; sparse results only visit positions that are
    /// non-zero on either side.
    fn combine(
        &self,
        op: &'static str,
        rhs: &dyn MatrixAccess<T>,
        f: fn(T, T) -> T,
    ) -> Result<Self> {
        ensure_same_shape(op, self.dimensions(), rhs.dimensions())?;
        if self.is_empty() {
            return Ok(self.clone());
        }
        let (rows, cols) = self.dimensions();
        match self {
            Matrix::Dense(left) => Ok(Matrix::Dense(DenseMatrix::new(
                left.as_inner()
                    .map_with_location(|i, j, x| f(x, rhs.element(i, j))),
            ))),
            _ => Ok(build_matrix(BuilderKind::Sparse, rows, cols, |staging| {
                for (i, j, x) in self.non_zero() {
                    staging.set(i, j, f(x, rhs.element(i, j)));
                }
                for (i, j, y) in rhs.non_zero_entries() {
                    if self.element(i, j).is_zero() {
                        staging.set(i, j, f(T::zero(), y));
                    }
                }
            })),
        }
    }

    /// Row-by-row sparse product, accumulating each result row in a map
    fn row_product(&self, rhs: &dyn MatrixAccess<T>) -> Self {
        let (rows, _) = self.dimensions();
        let (inner, cols) = rhs.dimensions();
        let right_rows: Vec<Vec<(usize, T)>> = (0..inner).map(|k| rhs.row_entries(k)).collect();
        build_matrix(BuilderKind::Sparse, rows, cols, |staging| {
            let mut accumulator: HashMap<usize, T> = HashMap::new();
            for i in 0..rows {
                accumulator.clear();
                for (k, a) in self.row_entries(i) {
                    for &(j, b) in &right_rows[k] {
                        let sum = accumulator.entry(j).or_insert_with(T::zero);
                        *sum = *sum + a * b;
                    }
                }
                for (&j, &x) in &accumulator {
                    staging.set(i, j, x);
                }
            }
        })
    }
}

fn numeric<T: MatrixElement>(rhs: &Operand<'_, T>, op: BinaryOp) -> Result<T> {
    rhs.as_numeric().ok_or(MatrixError::UnsupportedOperand {
        op: op.name(),
        left: "matrix",
        right: rhs.kind_name(),
    })
}

fn vector<'a, T: MatrixElement>(
    rhs: &Operand<'a, T>,
    op: BinaryOp,
) -> Result<&'a dyn VectorAccess<T>> {
    rhs.as_vector().ok_or(MatrixError::UnsupportedOperand {
        op: op.name(),
        left: "matrix",
        right: rhs.kind_name(),
    })
}

fn matrix<'a, T: MatrixElement>(
    rhs: &Operand<'a, T>,
    op: BinaryOp,
) -> Result<&'a dyn MatrixAccess<T>> {
    rhs.as_matrix().ok_or(MatrixError::UnsupportedOperand {
        op: op.name(),
        left: "matrix",
        right: rhs.kind_name(),
    })
}

impl<T: MatrixElement> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map_non_zero(|x| -x)
    }
}

impl<T: MatrixElement> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -&self
    }
}
