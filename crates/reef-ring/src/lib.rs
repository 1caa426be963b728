//! Consistent hashing ring for routing request keys to worker nodes.
//!
//! This crate provides:
//! - [`Ring`] — an ordered `u64 -> T` map with clockwise successor lookup.
//! - [`Node`] — a ring entry, either a [`RealNode`] (an actual worker) or a
//!   [`VirtualNode`] (a replica point that resolves to its owner).
//! - [`Registry`] — owns the ring, registers real nodes plus their virtual
//!   replicas, and answers "which worker owns this key".
//!
//! Keys are derived with a [`KeyHasher`]; the default is [`Blake3Hasher`]
//! (`blake3(bytes)` truncated to the first 8 bytes, little-endian). Virtual
//! replica names come from a configurable [`VirtualNamePattern`].
//!
//! The registry is a plain single-threaded structure. Callers sharing one
//! across threads wrap it in their own lock.

mod config;
mod error;
mod hash;
mod naming;
mod node;
mod registry;
mod ring;


pub use config::{DEFAULT_VIRTUAL_NODE_PATTERN, DEFAULT_VIRTUAL_REPLICAS, RegistryConfig};
pub use error::{Result, RingError};
pub use hash::{Blake3Hasher, KeyHasher};
pub use naming::{MAX_VIRTUAL_NAME_LEN, VirtualNamePattern};
pub use node::{Node, RealNode, VirtualNode};
pub use registry::{Registration, Registry};
pub use ring::Ring;
