//! Key derivation: byte strings to 64-bit ring positions.

/// Deterministic mapping from bytes to a ring key.
///
/// Implementations must return the same key for the same input for the
/// lifetime of the process. Cryptographic strength is not required.
pub trait KeyHasher: Send + Sync {
    /// Hash `bytes` to a ring position.
    fn hash(&self, bytes: &[u8]) -> u64;
}

/// Default hasher: `blake3(bytes)` truncated to its first 8 bytes (little-endian).
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl KeyHasher for Blake3Hasher {
    fn hash(&self, bytes: &[u8]) -> u64 {
        let hash = blake3::hash(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}
