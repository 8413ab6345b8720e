//! Position selectors for matrix iteration

/// Which positions a matrix iteration visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selector {
    /// Every position, row-major
    #[default]
    All,
    /// `i == j`
    Diagonal,
    /// `i != j`
    OffDiagonal,
    /// `i >= j`
    Lower,
    /// `i > j`
    StrictLower,
    /// `i <= j`
    Upper,
    /// `i < j`
    StrictUpper,
    /// Positions holding a non-zero value
    NonZero,
}

impl Selector {
    /// Whether the position passes the structural part of the selector
    ///
    /// `NonZero` accepts every position here; the value test is applied by
    /// the iteration itself.
    pub const fn accepts(&self, row: usize, col: usize) -> bool {
        match self {
            Selector::All | Selector::NonZero => true,
            Selector::Diagonal => row == col,
            Selector::OffDiagonal => row != col,
            Selector::Lower => row >= col,
            Selector::StrictLower => row > col,
            Selector::Upper => row <= col,
            Selector::StrictUpper => row < col,
        }
    }
}
