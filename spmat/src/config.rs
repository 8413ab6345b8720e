//! Numeric tolerances for rank, decompositions and approximate comparisons

use spmat_core::MatrixElement;

/// Tolerances used by operations that cannot compare floats exactly
#[derive(Debug, Clone, PartialEq)]
pub struct NumericConfig {
    /// Singular values and differences at or below this are treated as zero
    pub epsilon: f64,
    /// Iteration cap for eigen solvers, 0 iterates until convergence
    pub eigen_max_iterations: usize,
}

impl NumericConfig {
    /// Create config with a zero tolerance
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon,
            eigen_max_iterations: 0,
        }
    }

    /// Set the eigen solver iteration cap
    pub fn with_eigen_max_iterations(mut self, eigen_max_iterations: usize) -> Self {
        self.eigen_max_iterations = eigen_max_iterations;
        self
    }

    /// Tolerance converted to the element type
    pub fn epsilon<T: MatrixElement>(&self) -> T {
        T::from_float(self.epsilon)
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self::with_epsilon(1e-10)
    }
}
