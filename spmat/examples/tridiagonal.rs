//! Build a banded matrix, inspect its representation and solve a system

use spmat::{MatrixFactory, VectorFactory};

fn main() -> spmat::Result<()> {
    let n = 6;
    let matrix = MatrixFactory::sparse().build(n, n, |i, j| match i.abs_diff(j) {
        0 => 2.0,
        1 => -1.0,
        _ => 0.0,
    });

    println!("Matrix Information:");
    println!("   Representation: {}", matrix.kind());
    println!("   Dimensions: {} x {}", matrix.row_size(), matrix.column_size());
    println!("   Non-zeros: {}", matrix.nnz());
    println!("   Symmetric: {}", matrix.is_symmetric());
    println!("   Determinant: {}", matrix.determinant()?);

    let rhs = VectorFactory::sparse().from_values(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    let solution = matrix.lup().solve(&rhs)?;
    println!("\nSolution of A x = b:");
    println!("   {solution}");

    let squared = matrix.try_pow(2)?;
    println!("\nA^2 is stored as {}", squared.kind());
    println!("   {squared}");
    Ok(())
}
