//! The opaque-handle C ABI: a thin `extern "C"` adapter over the safe Rust
//! API, grounded on `include/butler_portugal.h` (the original reference
//! header this crate's surface mirrors).
//!
//! Every handle is a nullable pointer to a heap-allocated core object
//! (`Box::into_raw`/`Box::from_raw`); NULL denotes absence and is accepted by
//! every `*_free` entry point as a no-op. Every entry point that can panic
//! internally catches the unwind and converts it to `BP_CANONICALIZATION_ERROR`
//! — no panic crosses the boundary.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use crate::error::CanonError;
use crate::index::Index;
use crate::symmetry::Symmetry;
use crate::tensor::Tensor;

/// The C-visible result code, mirroring [`CanonError`] one variant at a time.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BPResult {
    Success = 0,
    NullPointer = 1,
    InvalidArgument = 2,
    CanonicalizationError = 3,
    AllocationError = 4,
}

impl From<&CanonError> for BPResult {
    fn from(err: &CanonError) -> Self {
        match err {
            CanonError::NullPointer => BPResult::NullPointer,
            CanonError::InvalidArgument(_) => BPResult::InvalidArgument,
            CanonError::Canonicalization(_) => BPResult::CanonicalizationError,
            CanonError::Allocation => BPResult::AllocationError,
        }
    }
}

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Returns a static version string. The caller must not free it.
#[no_mangle]
pub extern "C" fn bp_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

unsafe fn str_from_c(name: *const c_char) -> Option<String> {
    if name.is_null() {
        return None;
    }
    CStr::from_ptr(name).to_str().ok().map(String::from)
}

fn guard<F, R>(error_slot: Option<&mut BPResult>, f: F) -> *mut R
where
    F: FnOnce() -> Result<Box<R>, CanonError> + std::panic::UnwindSafe,
{
    let outcome = catch_unwind(AssertUnwindSafe(f));
    match outcome {
        Ok(Ok(boxed)) => {
            if let Some(slot) = error_slot {
                *slot = BPResult::Success;
            }
            Box::into_raw(boxed)
        }
        Ok(Err(err)) => {
            log::error!("ffi call rejected: {}", err);
            if let Some(slot) = error_slot {
                *slot = BPResult::from(&err);
            }
            ptr::null_mut()
        }
        Err(_) => {
            log::error!("ffi call panicked");
            if let Some(slot) = error_slot {
                *slot = BPResult::CanonicalizationError;
            }
            ptr::null_mut()
        }
    }
}

// ---- Index -----------------------------------------------------------

/// Creates a covariant index. Returns NULL on a null or non-UTF-8 `name`.
#[no_mangle]
pub unsafe extern "C" fn bp_index_new(name: *const c_char, position: usize) -> *mut Index {
    guard(None, || {
        let name = str_from_c(name).ok_or(CanonError::NullPointer)?;
        Ok(Box::new(Index::new(name, position)?))
    })
}

/// Creates a contravariant index. Returns NULL on a null or non-UTF-8 `name`.
#[no_mangle]
pub unsafe extern "C" fn bp_index_contravariant(name: *const c_char, position: usize) -> *mut Index {
    guard(None, || {
        let name = str_from_c(name).ok_or(CanonError::NullPointer)?;
        Ok(Box::new(Index::contravariant(name, position)?))
    })
}

/// Deep-clones an index. Returns NULL if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_index_clone(handle: *const Index) -> *mut Index {
    if handle.is_null() {
        return ptr::null_mut();
    }
    Box::into_raw(Box::new((*handle).clone()))
}

/// Releases an index. A no-op if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_index_free(handle: *mut Index) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

// ---- Symmetry ----------------------------------------------------------

unsafe fn slots_from_c(slots: *const usize, len: usize) -> Vec<usize> {
    if slots.is_null() || len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(slots, len).to_vec()
}

/// Creates a `Symmetric` generator over `slots[0..len]`.
#[no_mangle]
pub unsafe extern "C" fn bp_symmetry_symmetric(slots: *const usize, len: usize) -> *mut Symmetry {
    Box::into_raw(Box::new(Symmetry::Symmetric(slots_from_c(slots, len))))
}

/// Creates an `Antisymmetric` generator over `slots[0..len]`.
#[no_mangle]
pub unsafe extern "C" fn bp_symmetry_antisymmetric(slots: *const usize, len: usize) -> *mut Symmetry {
    Box::into_raw(Box::new(Symmetry::Antisymmetric(slots_from_c(slots, len))))
}

/// Creates a `SymmetricPairs` generator. `pairs` must contain `2 * len_pairs`
/// entries, consecutive pairs `(pairs[2i], pairs[2i+1])`.
#[no_mangle]
pub unsafe extern "C" fn bp_symmetry_symmetric_pairs(pairs: *const usize, len_pairs: usize) -> *mut Symmetry {
    if pairs.is_null() || len_pairs == 0 {
        return Box::into_raw(Box::new(Symmetry::SymmetricPairs(Vec::new())));
    }
    let flat = std::slice::from_raw_parts(pairs, len_pairs * 2);
    let pairs: Vec<(usize, usize)> = flat.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    Box::into_raw(Box::new(Symmetry::SymmetricPairs(pairs)))
}

/// Creates a `Cyclic` generator over `slots[0..len]`.
#[no_mangle]
pub unsafe extern "C" fn bp_symmetry_cyclic(slots: *const usize, len: usize) -> *mut Symmetry {
    Box::into_raw(Box::new(Symmetry::Cyclic(slots_from_c(slots, len))))
}

/// Deep-clones a symmetry generator. Returns NULL if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_symmetry_clone(handle: *const Symmetry) -> *mut Symmetry {
    if handle.is_null() {
        return ptr::null_mut();
    }
    Box::into_raw(Box::new((*handle).clone()))
}

/// Releases a symmetry generator. A no-op if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_symmetry_free(handle: *mut Symmetry) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

// ---- Tensor --------------------------------------------------------------

unsafe fn indices_from_c(indices: *const *mut Index, count: usize) -> Result<Vec<Index>, CanonError> {
    if indices.is_null() && count > 0 {
        return Err(CanonError::NullPointer);
    }
    let mut out = Vec::with_capacity(count);
    for &ptr in std::slice::from_raw_parts(indices, count) {
        if ptr.is_null() {
            return Err(CanonError::NullPointer);
        }
        out.push((*ptr).clone());
    }
    Ok(out)
}

/// Creates a tensor with coefficient `1`, deep-copying `indices[0..count]`.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_new(
    name: *const c_char,
    indices: *const *mut Index,
    count: usize,
) -> *mut Tensor {
    guard(None, || {
        let name = str_from_c(name).ok_or(CanonError::NullPointer)?;
        let indices = indices_from_c(indices, count)?;
        Ok(Box::new(Tensor::new(name, indices)?))
    })
}

/// Creates a tensor with an explicit coefficient, deep-copying
/// `indices[0..count]`.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_with_coefficient(
    name: *const c_char,
    indices: *const *mut Index,
    count: usize,
    coefficient: i32,
) -> *mut Tensor {
    guard(None, || {
        let name = str_from_c(name).ok_or(CanonError::NullPointer)?;
        let indices = indices_from_c(indices, count)?;
        Ok(Box::new(Tensor::with_coefficient(name, indices, coefficient)?))
    })
}

/// Deep-clones a tensor. Returns NULL if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_clone(handle: *const Tensor) -> *mut Tensor {
    if handle.is_null() {
        return ptr::null_mut();
    }
    Box::into_raw(Box::new((*handle).clone()))
}

/// Attaches a copy of `symmetry` to `tensor`. The caller retains ownership
/// of `symmetry` and must still free it.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_add_symmetry(
    tensor: *mut Tensor,
    symmetry: *const Symmetry,
) -> BPResult {
    if tensor.is_null() || symmetry.is_null() {
        return BPResult::NullPointer;
    }
    let outcome = catch_unwind(AssertUnwindSafe(|| (*tensor).add_symmetry((*symmetry).clone())));
    match outcome {
        Ok(Ok(())) => BPResult::Success,
        Ok(Err(err)) => {
            log::error!("bp_tensor_add_symmetry rejected: {}", err);
            BPResult::from(&err)
        }
        Err(_) => {
            log::error!("bp_tensor_add_symmetry panicked");
            BPResult::CanonicalizationError
        }
    }
}

/// The tensor's rank, or `0` if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_rank(handle: *const Tensor) -> usize {
    if handle.is_null() {
        0
    } else {
        (*handle).rank()
    }
}

/// The tensor's coefficient, or `0` if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_coefficient(handle: *const Tensor) -> i32 {
    if handle.is_null() {
        0
    } else {
        (*handle).coefficient()
    }
}

/// Whether the tensor is identically zero. NULL is treated as zero.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_is_zero(handle: *const Tensor) -> bool {
    handle.is_null() || (*handle).is_zero()
}

/// Renders the tensor to an owned C string; free with [`bp_string_free`].
/// Returns NULL if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_to_string(handle: *const Tensor) -> *mut c_char {
    if handle.is_null() {
        return ptr::null_mut();
    }
    match CString::new((*handle).to_display_string()) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Releases a tensor. A no-op if `handle` is NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_tensor_free(handle: *mut Tensor) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

// ---- Canonicalize ----------------------------------------------------------

/// Canonicalizes `tensor`, returning a freshly owned tensor. On failure
/// returns NULL and writes the result code to `*error_out` (if non-NULL).
#[no_mangle]
pub unsafe extern "C" fn bp_canonicalize(tensor: *const Tensor, error_out: *mut BPResult) -> *mut Tensor {
    if tensor.is_null() {
        if !error_out.is_null() {
            *error_out = BPResult::NullPointer;
        }
        log::error!("bp_canonicalize rejected a null tensor handle");
        return ptr::null_mut();
    }
    let error_slot = if error_out.is_null() {
        None
    } else {
        Some(&mut *error_out)
    };
    guard(error_slot, || (*tensor).canonicalize().map(Box::new))
}

// ---- String ----------------------------------------------------------------

/// Releases a string returned by [`bp_tensor_to_string`]. A no-op if `s` is
/// NULL.
#[no_mangle]
pub unsafe extern "C" fn bp_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
