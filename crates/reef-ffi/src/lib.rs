//! C ABI over [`reef_ring::Registry`].
//!
//! A host (scripting runtime, C service) drives a registry through an opaque
//! handle:
//!
//! ```text
//! reef_registry_new(service, pattern, replicas) -> handle | NULL
//! reef_register_node(handle, name)              -> status
//! reef_query_node(handle, key)                  -> owned string | NULL
//! reef_string_free(string)
//! reef_registry_free(handle)
//! ```
//!
//! Strings returned by the query functions are allocated here and owned by
//! the caller, who must hand them back to [`reef_string_free`]. Releasing
//! them with the host's own `free` is undefined behaviour.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

use reef_ring::{Registry, RegistryConfig, RingError};
use tracing::warn;

mod status;

pub use status::{
    REEF_BROKEN_REFERENCE, REEF_DUPLICATE_NODE, REEF_INVALID_ARGUMENT, REEF_NAME_TOO_LONG,
    REEF_NOT_FOUND, REEF_OK, status_code,
};

/// Opaque registry handle handed to the host.
pub struct ReefRegistry {
    inner: Registry,
}

/// Borrow a NUL-terminated UTF-8 argument, or `None` if null or not UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string valid for `'a`.
unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Borrow a NUL-terminated argument as raw bytes, or `None` if null.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string valid for `'a`.
unsafe fn bytes_arg<'a>(ptr: *const c_char) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    Some(unsafe { CStr::from_ptr(ptr) }.to_bytes())
}

/// Copy a resolved node name into a caller-owned C string.
fn owned_c_string(name: &str) -> *mut c_char {
    match CString::new(name) {
        Ok(s) => s.into_raw(),
        Err(_) => {
            warn!(name, "node name contains a NUL byte, cannot return it");
            ptr::null_mut()
        }
    }
}

/// Create a registry.
///
/// Returns NULL if any string is null, empty, or not UTF-8, if the pattern
/// does not parse, or if `virtual_replicas <= 0`.
///
/// # Safety
/// `service_name` and `pattern` must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_registry_new(
    service_name: *const c_char,
    pattern: *const c_char,
    virtual_replicas: c_int,
) -> *mut ReefRegistry {
    // SAFETY: forwarded caller contract.
    let (Some(service_name), Some(pattern)) =
        (unsafe { str_arg(service_name) }, unsafe { str_arg(pattern) })
    else {
        warn!("reef_registry_new: null or non-UTF-8 argument");
        return ptr::null_mut();
    };
    let Ok(virtual_replicas) = u32::try_from(virtual_replicas) else {
        warn!(virtual_replicas, "reef_registry_new: negative replica count");
        return ptr::null_mut();
    };

    let config = RegistryConfig::new(service_name, pattern, virtual_replicas);
    match Registry::new(config) {
        Ok(inner) => Box::into_raw(Box::new(ReefRegistry { inner })),
        Err(e) => {
            warn!(error = %e, "reef_registry_new: rejected configuration");
            ptr::null_mut()
        }
    }
}

/// Tear down a registry and release its handle. NULL is ignored.
///
/// # Safety
/// `handle` must be null or a pointer from [`reef_registry_new`] that has not
/// been freed. It must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_registry_free(handle: *mut ReefRegistry) {
    if handle.is_null() {
        return;
    }
    // SAFETY: ownership returns to us exactly once per the caller's contract.
    let mut registry = unsafe { Box::from_raw(handle) };
    registry.inner.teardown();
}

/// Register a real node and its virtual replicas.
///
/// Returns [`REEF_OK`], [`REEF_INVALID_ARGUMENT`] (null handle, null / empty /
/// non-UTF-8 name), [`REEF_DUPLICATE_NODE`], or [`REEF_NAME_TOO_LONG`].
///
/// # Safety
/// `handle` must be null or a live handle; `name` must be null or a valid
/// NUL-terminated string. No other call may use `handle` concurrently.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_register_node(
    handle: *mut ReefRegistry,
    name: *const c_char,
) -> c_int {
    // SAFETY: live, exclusively accessed handle per the caller's contract.
    let Some(registry) = (unsafe { handle.as_mut() }) else {
        warn!("reef_register_node: null handle");
        return REEF_INVALID_ARGUMENT;
    };
    // SAFETY: forwarded caller contract.
    let Some(name) = (unsafe { str_arg(name) }) else {
        return REEF_INVALID_ARGUMENT;
    };

    match registry.inner.register(name) {
        Ok(_) => REEF_OK,
        Err(e) => status_code(&e),
    }
}

/// Name of the real node that owns `key` (hashed), as a caller-owned string.
///
/// `key` is hashed as raw bytes and need not be UTF-8. Returns NULL if the
/// handle or key is null, the registry is empty, or the key resolves to a
/// broken reference.
///
/// # Safety
/// `handle` must be null or a live handle; `key` must be null or a valid
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_query_node(
    handle: *const ReefRegistry,
    key: *const c_char,
) -> *mut c_char {
    // SAFETY: live handle per the caller's contract.
    let Some(registry) = (unsafe { handle.as_ref() }) else {
        warn!("reef_query_node: null handle");
        return ptr::null_mut();
    };
    // SAFETY: forwarded caller contract.
    let Some(key) = (unsafe { bytes_arg(key) }) else {
        return ptr::null_mut();
    };
    resolved(registry.inner.query_bytes(key))
}

/// Like [`reef_query_node`] for a key the host has already hashed.
///
/// # Safety
/// `handle` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_query_key(handle: *const ReefRegistry, key: u64) -> *mut c_char {
    // SAFETY: live handle per the caller's contract.
    let Some(registry) = (unsafe { handle.as_ref() }) else {
        warn!("reef_query_key: null handle");
        return ptr::null_mut();
    };
    resolved(registry.inner.query_key(key))
}

/// Number of ring entries (real plus virtual). Returns 0 for NULL.
///
/// # Safety
/// `handle` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_registry_len(handle: *const ReefRegistry) -> usize {
    // SAFETY: live handle per the caller's contract.
    unsafe { handle.as_ref() }.map_or(0, |r| r.inner.len())
}

/// Release a string returned by a query function. NULL is ignored.
///
/// # Safety
/// `s` must be null or a pointer returned by [`reef_query_node`] /
/// [`reef_query_key`] that has not been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reef_string_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    // SAFETY: produced by CString::into_raw and returned exactly once.
    drop(unsafe { CString::from_raw(s) });
}

fn resolved(result: Result<&str, RingError>) -> *mut c_char {
    match result {
        Ok(name) => owned_c_string(name),
        Err(RingError::NotFound) => ptr::null_mut(),
        Err(e) => {
            warn!(error = %e, "query failed");
            ptr::null_mut()
        }
    }
}
