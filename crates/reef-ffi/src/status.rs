//! Integer status codes returned across the C boundary.

use std::ffi::c_int;

use reef_ring::RingError;

/// Success.
pub const REEF_OK: c_int = 0;
/// Null, empty, or malformed argument.
pub const REEF_INVALID_ARGUMENT: c_int = -1;
/// The node name's key is already on the ring.
pub const REEF_DUPLICATE_NODE: c_int = -2;
/// A synthesized virtual-node name exceeded the naming limit.
pub const REEF_NAME_TOO_LONG: c_int = -3;
/// The registry has no nodes.
///
/// Reserved: no exported function returns it; queries report it as NULL.
pub const REEF_NOT_FOUND: c_int = -4;
/// A virtual node lost its owner.
///
/// Reserved: no exported function returns it; queries report it as NULL.
pub const REEF_BROKEN_REFERENCE: c_int = -5;

/// Map a registry error to its status code.
pub fn status_code(err: &RingError) -> c_int {
    match err {
        RingError::InvalidArgument(_) => REEF_INVALID_ARGUMENT,
        RingError::DuplicateNode { .. } => REEF_DUPLICATE_NODE,
        RingError::NameTooLong { .. } => REEF_NAME_TOO_LONG,
        RingError::NotFound => REEF_NOT_FOUND,
        RingError::BrokenReference(_) => REEF_BROKEN_REFERENCE,
    }
}
