//! Butler-Portugal tensor canonicalization: given a named tensor's ordered
//! indices and its declared slot symmetries, find the lexicographically
//! least representative of its permutation-group orbit together with the
//! accumulated sign, detecting identically-zero tensors along the way.
//!
//! The safe Rust API lives in [`tensor`], [`index`], and [`symmetry`]; the
//! `extern "C"` boundary for foreign callers lives in [`ffi`].

pub mod canonicalize;
pub mod error;
mod ffi;
pub mod group;
pub mod index;
pub mod permutation;
pub mod sgs;
pub mod symmetry;
pub mod tensor;

pub use error::{CanonError, CanonResult};
pub use index::{Index, Variance};
pub use symmetry::Symmetry;
pub use tensor::Tensor;

pub use ffi::BPResult;
