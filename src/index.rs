//! A single abstract tensor index: a name, a variance, and a position hint.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{CanonError, CanonResult};

/// Whether an index is written as a subscript (covariant) or superscript
/// (contravariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variance {
    /// Subscript, e.g. `T_a`.
    Covariant,
    /// Superscript, e.g. `T^a`.
    Contravariant,
}

/// A named abstract index carried by a [`crate::tensor::Tensor`].
///
/// Two indices are the "same abstract index" iff `name` and `variance`
/// match; `position` is a comparison tiebreaker only, never slot identity.
/// Slot identity is always an index's position within a tensor's index list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Index {
    name: String,
    variance: Variance,
    position: usize,
}

impl Index {
    /// Creates a new covariant index. Fails with [`CanonError::InvalidArgument`]
    /// if `name` is empty.
    pub fn new(name: impl Into<String>, position: usize) -> CanonResult<Self> {
        Self::with_variance(name, Variance::Covariant, position)
    }

    /// Creates a new contravariant index. Fails with
    /// [`CanonError::InvalidArgument`] if `name` is empty.
    pub fn contravariant(name: impl Into<String>, position: usize) -> CanonResult<Self> {
        Self::with_variance(name, Variance::Contravariant, position)
    }

    fn with_variance(name: impl Into<String>, variance: Variance, position: usize) -> CanonResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CanonError::InvalidArgument("index name must not be empty".to_string()));
        }
        Ok(Self {
            name,
            variance,
            position,
        })
    }

    /// The index's short name, e.g. `"mu"` or `"a"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index's variance.
    pub fn variance(&self) -> Variance {
        self.variance
    }

    /// The stored position hint. Not authoritative for slot identity; see
    /// the module docs.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether two indices name the same abstract index (same name, same
    /// variance). Ignores the position hint.
    pub fn same_abstract_index(&self, other: &Index) -> bool {
        self.name == other.name && self.variance == other.variance
    }

    /// Compares two indices under the canonicalization total order:
    /// `(variance, name, position)` lexicographically, covariant before
    /// contravariant.
    pub fn canonical_cmp(&self, other: &Index) -> Ordering {
        self.variance
            .cmp(&other.variance)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
