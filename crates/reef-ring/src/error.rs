//! Error types for ring and registry operations.

/// Errors returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// An empty or malformed name, pattern, or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The node name hashes to a key already present on the ring.
    #[error("node {name:?} collides with an existing ring entry at key {key:#018x}")]
    DuplicateNode {
        /// Name that was being registered.
        name: String,
        /// The colliding ring key.
        key: u64,
    },

    /// The ring has no entries to route to.
    #[error("ring is empty")]
    NotFound,

    /// A virtual node whose owning real node no longer exists.
    #[error("virtual node {0:?} has no owning real node")]
    BrokenReference(String),

    /// A synthesized virtual-node name exceeds the naming limit.
    #[error("virtual node name for {name:?} is {len} bytes, limit is {max}")]
    NameTooLong {
        /// Real node being registered.
        name: String,
        /// Length of the offending synthesized name.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RingError>;
