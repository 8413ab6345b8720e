//! Immutable sparse vector
//!
//! Components are stored as parallel index/value arrays sorted by index.
//! Zero is never stored, so the stored entries are exactly the non-zero
//! view of the vector.

use core::fmt;
use core::iter::{Copied, Zip};
use core::slice;

use spmat_core::{resolve_index, MatrixElement, MatrixError, Result, VectorAccess};

use super::IterMode;

/// Iterator over the stored (non-zero) components
pub type NonZeroEntries<'a, T> = Zip<Copied<slice::Iter<'a, usize>>, Copied<slice::Iter<'a, T>>>;

/// Immutable vector holding only its non-zero components
#[derive(Debug, Clone)]
pub struct SparseVector<T> {
    size: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: MatrixElement> SparseVector<T> {
    /// Assemble from index/value arrays
    ///
    /// `indices` must be strictly ascending and below `size`, and no value
    /// may be zero.
    pub(crate) fn from_sorted_parts(size: usize, indices: Vec<usize>, values: Vec<T>) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(indices.last().map_or(true, |&last| last < size));
        Self {
            size,
            indices,
            values,
        }
    }

    /// Assemble from ascending `(index, value)` pairs, dropping zeros
    pub(crate) fn from_ascending(
        size: usize,
        entries: impl IntoIterator<Item = (usize, T)>,
    ) -> Self {
        let (indices, values) = entries
            .into_iter()
            .filter(|(_, value)| !value.is_zero())
            .unzip();
        Self::from_sorted_parts(size, indices, values)
    }

    /// Vector of `size` zeros
    pub fn zeros(size: usize) -> Self {
        Self::from_sorted_parts(size, Vec::new(), Vec::new())
    }

    /// Number of components
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the vector has no components
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of stored non-zero components
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Component at `index`, counting from the end when negative
    ///
    /// Returns zero for unset positions in `[-size, size)` and `None`
    /// outside that range.
    pub fn get(&self, index: isize) -> Option<T> {
        resolve_index(index, self.size).map(|i| self.component(i))
    }

    /// Component at an in-range position
    pub fn component(&self, index: usize) -> T {
        match self.indices.binary_search(&index) {
            Ok(position) => self.values[position],
            Err(_) => T::zero(),
        }
    }

    /// Every position in ascending order, zeros included
    pub fn iter(&self) -> AllEntries<'_, T> {
        AllEntries {
            vector: self,
            position: 0,
            cursor: 0,
        }
    }

    /// Stored positions in ascending order
    pub fn non_zero(&self) -> NonZeroEntries<'_, T> {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Iterate in the given mode
    pub fn entries(&self, mode: IterMode) -> Entries<'_, T> {
        match mode {
            IterMode::All => Entries::All(self.iter()),
            IterMode::NonZero => Entries::NonZero(self.non_zero()),
        }
    }

    /// Indices of the stored components
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Values of the stored components
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Apply `f` to the components visited by `mode`
    ///
    /// Positions skipped by `mode` stay zero in the result.
    pub fn map(&self, mode: IterMode, mut f: impl FnMut(T) -> T) -> Self {
        Self::from_ascending(self.size, self.entries(mode).map(|(i, x)| (i, f(x))))
    }

    /// Combine with another vector position by position over every index
    pub fn map2(&self, other: &dyn VectorAccess<T>, mut f: impl FnMut(T, T) -> T) -> Result<Self> {
        if self.size != other.size() {
            return Err(MatrixError::DimensionMismatch {
                op: "map2",
                left: (self.size, 1),
                right: (other.size(), 1),
            });
        }
        Ok(Self::from_ascending(
            self.size,
            self.iter().map(|(i, x)| (i, f(x, other.component(i)))),
        ))
    }

    /// Merge two sorted non-zero lists through `f`
    ///
    /// Only positions non-zero in either side are visited, so `f(0, 0)` must
    /// be zero.
    pub(crate) fn merge(&self, other: &[(usize, T)], mut f: impl FnMut(T, T) -> T) -> Self {
        let mut merged = Vec::with_capacity(self.nnz() + other.len());
        let mut left = self.non_zero().peekable();
        let mut right = other.iter().copied().peekable();
        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(&(i, a)), Some(&(j, b))) => {
                    if i == j {
                        left.next();
                        right.next();
                        (i, f(a, b))
                    } else if i < j {
                        left.next();
                        (i, f(a, T::zero()))
                    } else {
                        right.next();
                        (j, f(T::zero(), b))
                    }
                }
                (Some(&(i, a)), None) => {
                    left.next();
                    (i, f(a, T::zero()))
                }
                (None, Some(&(j, b))) => {
                    right.next();
                    (j, f(T::zero(), b))
                }
                (None, None) => break,
            };
            merged.push(next);
        }
        Self::from_ascending(self.size, merged)
    }

    /// Multiply every component by `factor`
    pub fn scale(&self, factor: T) -> Self {
        self.map(IterMode::NonZero, |x| x * factor)
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> T {
        self.values
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x)
            .sqrt()
    }

    /// Sum of products over the non-zero components of `self`
    pub fn inner_product(&self, other: &dyn VectorAccess<T>) -> Result<T> {
        if self.size != other.size() {
            return Err(MatrixError::DimensionMismatch {
                op: "inner_product",
                left: (self.size, 1),
                right: (other.size(), 1),
            });
        }
        Ok(self
            .non_zero()
            .fold(T::zero(), |acc, (i, x)| acc + x * other.component(i)))
    }

    /// Every component in order, zeros included
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().map(|(_, x)| x).collect()
    }
}

impl<T: MatrixElement> PartialEq for SparseVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: MatrixElement> VectorAccess<T> for SparseVector<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn component(&self, index: usize) -> T {
        SparseVector::component(self, index)
    }

    fn non_zero_entries(&self) -> Vec<(usize, T)> {
        self.non_zero().collect()
    }

    fn as_any(&self) -> Option<&dyn core::any::Any> {
        Some(self)
    }
}

impl<T: MatrixElement> fmt::Display for SparseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SparseVector[")?;
        for (i, x) in self.iter() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

/// Iterator over every position of a sparse vector
#[derive(Debug, Clone)]
pub struct AllEntries<'a, T> {
    vector: &'a SparseVector<T>,
    position: usize,
    cursor: usize,
}

impl<'a, T: MatrixElement> Iterator for AllEntries<'a, T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.vector.size {
            return None;
        }
        let position = self.position;
        self.position += 1;
        match self.vector.indices.get(self.cursor) {
            Some(&index) if index == position => {
                let value = self.vector.values[self.cursor];
                self.cursor += 1;
                Some((position, value))
            }
            _ => Some((position, T::zero())),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.size - self.position;
        (remaining, Some(remaining))
    }
}

impl<'a, T: MatrixElement> ExactSizeIterator for AllEntries<'a, T> {}

/// Iterator over a sparse vector in either mode
#[derive(Debug, Clone)]
pub enum Entries<'a, T> {
    All(AllEntries<'a, T>),
    NonZero(NonZeroEntries<'a, T>),
}

impl<'a, T: MatrixElement> Iterator for Entries<'a, T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::All(iter) => iter.next(),
            Entries::NonZero(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseVector<f64> {
        SparseVector::from_ascending(5, [(1, 2.0), (3, -4.0)])
    }

    #[test]
    fn test_get_with_negative_indices() {
        let v = sample();
        assert_eq!(v.get(1), Some(2.0));
        assert_eq!(v.get(0), Some(0.0));
        assert_eq!(v.get(-2), Some(-4.0));
        assert_eq!(v.get(-5), Some(0.0));
        assert_eq!(v.get(5), None);
        assert_eq!(v.get(-6), None);
    }

    #[test]
    fn test_iteration_modes() {
        let v = sample();
        let all: Vec<_> = v.entries(IterMode::All).collect();
        assert_eq!(all, vec![(0, 0.0), (1, 2.0), (2, 0.0), (3, -4.0), (4, 0.0)]);
        let non_zero: Vec<_> = v.entries(IterMode::NonZero).collect();
        assert_eq!(non_zero, vec![(1, 2.0), (3, -4.0)]);
        assert_eq!(v.iter().len(), 5);
    }

    #[test]
    fn test_map_drops_zeros() {
        let v = sample();
        let shifted = v.map(IterMode::All, |x| x + 4.0);
        assert_eq!(shifted.to_vec(), vec![4.0, 6.0, 4.0, 0.0, 4.0]);
        assert_eq!(shifted.nnz(), 4);

        let doubled = v.map(IterMode::NonZero, |x| x * 2.0);
        assert_eq!(doubled.to_vec(), vec![0.0, 4.0, 0.0, -8.0, 0.0]);
    }

    #[test]
    fn test_merge_visits_union() {
        let v = sample();
        let sum = v.merge(&[(0, 1.0), (3, 4.0)], |a, b| a + b);
        assert_eq!(sum.to_vec(), vec![1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(sum.nnz(), 2);
    }

    #[test]
    fn test_magnitude_and_inner_product() {
        let v = SparseVector::from_ascending(3, [(0, 3.0), (2, 4.0)]);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(v.inner_product(&v), Ok(25.0));

        let short = SparseVector::<f64>::zeros(2);
        assert!(matches!(
            v.inner_product(&short),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_equality_and_display() {
        let a = SparseVector::from_ascending(3, [(0, 1.0), (2, 3.0)]);
        let b = SparseVector::from_ascending(3, [(0, 1.0), (1, 0.0), (2, 3.0)]);
        assert_eq!(a, b);
        assert_ne!(a, SparseVector::zeros(3));
        assert_eq!(a.to_string(), "SparseVector[1, 0, 3]");
    }
}
