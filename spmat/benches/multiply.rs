use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spmat::{Matrix, MatrixFactory};

/// Random `n x n` matrix with roughly `density * n * n` non-zero entries
fn random_matrix(factory: MatrixFactory, n: usize, density: f64, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    factory.build(n, n, |_, _| {
        if rng.gen_bool(density) {
            rng.gen_range(-1.0..1.0)
        } else {
            0.0
        }
    })
}

/// Random tridiagonal `n x n` matrix
fn random_tridiagonal(n: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    MatrixFactory::sparse().build(n, n, |i, j| {
        if i.abs_diff(j) <= 1 {
            rng.gen_range(1.0..2.0)
        } else {
            0.0
        }
    })
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for &n in &[32usize, 128, 256] {
        let sparse_a = random_matrix(MatrixFactory::sparse(), n, 0.05, 1);
        let sparse_b = random_matrix(MatrixFactory::sparse(), n, 0.05, 2);
        let dense_a = random_matrix(MatrixFactory::complete(), n, 0.05, 1);

        group.bench_with_input(BenchmarkId::new("sparse", n), &n, |b, _| {
            b.iter(|| black_box(sparse_a.multiply_matrix(&sparse_b)))
        });
        group.bench_with_input(BenchmarkId::new("dense", n), &n, |b, _| {
            b.iter(|| black_box(dense_a.multiply_matrix(&sparse_b)))
        });
    }
    group.finish();
}

fn bench_tridiagonal(c: &mut Criterion) {
    let mut group = c.benchmark_group("tridiagonal");
    for &n in &[64usize, 512] {
        let m = random_tridiagonal(n, 7);
        group.bench_with_input(BenchmarkId::new("determinant", n), &n, |b, _| {
            b.iter(|| black_box(m.determinant()))
        });
        group.bench_with_input(BenchmarkId::new("square", n), &n, |b, _| {
            b.iter(|| black_box(m.try_pow(2)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_multiply, bench_tridiagonal);
criterion_main!(benches);
