use spmat::{
    BinaryOp, Coerce, MatrixAccess, MatrixError, MatrixFactory, Operand, Scalar, Value,
    VectorAccess, VectorFactory,
};

/// Number-like wrapper that only takes part in arithmetic through coercion
struct Measure(f64);

impl Coerce<f64> for Measure {
    fn coerce(&self, left: &Value<f64>) -> Option<(Value<f64>, Value<f64>)> {
        Some((left.clone(), Value::Number(self.0)))
    }

    fn type_name(&self) -> &'static str {
        "measure"
    }
}

/// Foreign value that refuses every coercion
struct Opaque;

impl Coerce<f64> for Opaque {
    fn coerce(&self, _left: &Value<f64>) -> Option<(Value<f64>, Value<f64>)> {
        None
    }
}

/// Matrix-like value from outside the crate: an `n x n` matrix of ones
struct Ones(usize);

impl MatrixAccess<f64> for Ones {
    fn dimensions(&self) -> (usize, usize) {
        (self.0, self.0)
    }

    fn element(&self, _row: usize, _col: usize) -> f64 {
        1.0
    }
}

/// Vector-like value from outside the crate
struct Ramp(usize);

impl VectorAccess<f64> for Ramp {
    fn size(&self) -> usize {
        self.0
    }

    fn component(&self, index: usize) -> f64 {
        index as f64
    }
}

#[test]
fn test_foreign_operand_is_coerced() {
    let m = MatrixFactory::sparse().from_rows(&[[1.0, 2.0], [0.0, 3.0]]);
    let product = m.try_mul(Operand::foreign(&Measure(2.0))).unwrap();
    assert_eq!(
        product.into_matrix().map(|m| m.to_rows()),
        Some(vec![vec![2.0, 4.0], vec![0.0, 6.0]])
    );

    let v = VectorFactory::sparse().from_values(&[3.0, 6.0]);
    let quotient = v.try_div(Operand::foreign(&Measure(3.0))).unwrap();
    assert_eq!(quotient.into_vector().map(|v| v.to_vec()), Some(vec![1.0, 2.0]));

    let sum = Scalar::new(1.5).try_add(Operand::foreign(&Measure(2.5))).unwrap();
    assert_eq!(sum, Value::Number(4.0));
}

#[test]
fn test_coercion_that_still_has_no_overload() {
    let m = MatrixFactory::sparse().identity::<f64>(2);
    assert_eq!(
        m.try_add(Operand::foreign(&Measure(1.0))),
        Err(MatrixError::UnsupportedOperand {
            op: "add",
            left: "matrix",
            right: "numeric",
        })
    );
}

#[test]
fn test_refused_coercion() {
    let m = MatrixFactory::sparse().identity::<f64>(2);
    assert_eq!(
        m.try_mul(Operand::foreign(&Opaque)),
        Err(MatrixError::UnsupportedOperand {
            op: "multiply",
            left: "matrix",
            right: "foreign",
        })
    );
    let v = VectorFactory::sparse().from_values(&[1.0]);
    assert!(matches!(
        v.try_pow(2.0),
        Err(MatrixError::UnsupportedOperand { op: "power", .. })
    ));
}

#[test]
fn test_vector_power_has_no_overload() {
    let v = VectorFactory::sparse().from_values(&[1.0, 2.0]);
    let unsupported = |right: &'static str| -> spmat::Result<Value<f64>> {
        Err(MatrixError::UnsupportedOperand {
            op: "power",
            left: "vector",
            right,
        })
    };
    assert_eq!(v.try_pow(2.0), unsupported("numeric"));
    assert_eq!(v.try_pow(&v), unsupported("vector"));
    assert_eq!(v.try_pow(&MatrixFactory::sparse().identity::<f64>(2)), unsupported("matrix"));
    assert_eq!(v.try_pow(Operand::foreign(&Opaque)), unsupported("foreign"));
    // coercion succeeds but the vector still has no power overload for a number
    assert_eq!(v.try_pow(Operand::foreign(&Measure(2.0))), unsupported("numeric"));
}

#[test]
fn test_scalar_divided_by_vector_is_unsupported() {
    let v = VectorFactory::sparse().from_values(&[1.0, 2.0]);
    assert_eq!(
        Scalar::new(2.0).try_div(&v),
        Err(MatrixError::UnsupportedOperand {
            op: "divide",
            left: "numeric",
            right: "vector",
        })
    );
    assert_eq!(
        Scalar::new(2.0).try_div(Operand::foreign(&Opaque)),
        Err(MatrixError::UnsupportedOperand {
            op: "divide",
            left: "numeric",
            right: "foreign",
        })
    );
}

#[test]
fn test_capability_operands() {
    let m = MatrixFactory::sparse().from_rows(&[[1.0, 0.0], [0.0, 1.0]]);
    let sum = m.try_add(Operand::matrix(&Ones(2))).unwrap();
    assert_eq!(
        sum.into_matrix().map(|m| m.to_rows()),
        Some(vec![vec![2.0, 1.0], vec![1.0, 2.0]])
    );

    let image = m.try_mul(Operand::vector(&Ramp(2))).unwrap();
    assert_eq!(image.into_vector().map(|v| v.to_vec()), Some(vec![0.0, 1.0]));

    let v = VectorFactory::complete().from_values(&[1.0, 1.0, 1.0]);
    assert_eq!(v.try_mul(Operand::vector(&Ramp(3))).unwrap(), Value::Number(3.0));
}

#[test]
fn test_value_chains_operations() {
    let m = MatrixFactory::sparse().from_rows(&[[1.0, 1.0], [0.0, 1.0]]);
    let doubled = Value::Matrix(m.clone()).apply(BinaryOp::Mul, Operand::Numeric(2.0)).unwrap();
    let back = doubled.try_sub(&m).unwrap();
    assert_eq!(back, Value::Matrix(m));
    assert_eq!(format!("{}", Value::<f64>::Number(2.5)), "2.5");
}
