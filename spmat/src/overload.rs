//! Ordered predicate tables for operand-directed dispatch
//!
//! An [`OverloadTable`] pairs predicates with handlers. Lookup walks the
//! pairs in registration order and returns the handler of the first
//! predicate that accepts the value, so more specific predicates must be
//! registered before more general ones.

use core::fmt;

/// Predicate deciding whether a handler applies to a value
pub type Predicate<X> = fn(&X) -> bool;

/// Ordered list of `(predicate, handler)` pairs
pub struct OverloadTable<X: ?Sized, H> {
    overloads: Vec<(Predicate<X>, H)>,
}

impl<X: ?Sized, H: Copy> OverloadTable<X, H> {
    /// Create a table from pairs in priority order
    pub fn new(overloads: impl IntoIterator<Item = (Predicate<X>, H)>) -> Self {
        Self {
            overloads: overloads.into_iter().collect(),
        }
    }

    /// Append a pair with the lowest priority so far
    pub fn register(&mut self, predicate: Predicate<X>, handler: H) {
        self.overloads.push((predicate, handler));
    }

    /// Handler of the first predicate accepting `value`
    pub fn select(&self, value: &X) -> Option<H> {
        self.overloads
            .iter()
            .find(|(predicate, _)| predicate(value))
            .map(|(_, handler)| *handler)
    }

    /// Whether any predicate accepts `value`
    pub fn includes(&self, value: &X) -> bool {
        self.overloads.iter().any(|(predicate, _)| predicate(value))
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.overloads.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }
}

impl<X: ?Sized, H> fmt::Debug for OverloadTable<X, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverloadTable")
            .field("overloads", &self.overloads.len())
            .finish()
    }
}
