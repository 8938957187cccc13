//! The single error type threaded through every fallible operation in this crate.
//!
//! The FFI layer (see [`crate::ffi`]) maps each variant onto a `BPResult` code;
//! no FFI error code exists without a corresponding variant here.

use thiserror::Error;

/// Everything that can go wrong while building or canonicalizing a tensor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A required handle or reference was absent.
    #[error("null pointer where a value was required")]
    NullPointer,

    /// A symmetry referenced a slot outside `[0, rank)`, a name was empty, or
    /// an array length was inconsistent with its count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal invariant was violated during SGS construction or the
    /// Butler-Portugal search. Should be unreachable; reserved for defensive
    /// checks and for panics caught at the FFI boundary.
    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    /// Memory could not be allocated.
    #[error("allocation failure")]
    Allocation,
}

/// Convenience alias used throughout the core.
pub type CanonResult<T> = Result<T, CanonError>;
