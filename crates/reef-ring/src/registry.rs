//! The registry: real-node registration and key-to-node queries.

use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::error::{Result, RingError};
use crate::hash::{Blake3Hasher, KeyHasher};
use crate::naming::VirtualNamePattern;
use crate::node::{Node, RealNode, VirtualNode};
use crate::ring::Ring;

/// Outcome of a successful [`Registry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Ring key of the real node.
    pub key: u64,
    /// Virtual replicas the configuration asked for.
    pub requested: u32,
    /// Virtual replicas actually placed. Lower than `requested` when some
    /// replica names collided with existing ring keys.
    pub placed: u32,
}

impl Registration {
    /// Number of replicas skipped because of key collisions.
    pub fn skipped(&self) -> u32 {
        self.requested.saturating_sub(self.placed)
    }
}

/// Owns the ring and every node on it.
///
/// Register real nodes with [`register`](Self::register), route keys with
/// [`query`](Self::query) / [`query_key`](Self::query_key), and release
/// everything with [`teardown`](Self::teardown).
#[derive(Debug)]
pub struct Registry<H = Blake3Hasher> {
    config: RegistryConfig,
    pattern: VirtualNamePattern,
    hasher: H,
    /// Sole owner of every node.
    ring: Ring<Node>,
    /// Ring keys of real nodes in registration order.
    real_nodes: Vec<u64>,
}

impl Registry<Blake3Hasher> {
    /// Create an empty registry using the default BLAKE3 key hasher.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_hasher(config, Blake3Hasher)
    }
}

impl<H: KeyHasher> Registry<H> {
    /// Create an empty registry with a custom key hasher.
    pub fn with_hasher(config: RegistryConfig, hasher: H) -> Result<Self> {
        let pattern = config.validate()?;
        Ok(Self {
            config,
            pattern,
            hasher,
            ring: Ring::new(),
            real_nodes: Vec::new(),
        })
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Name of the service this registry routes for.
    pub fn service_name(&self) -> &str {
        &self.config.service_name
    }

    /// Ring key for `name`.
    pub fn hash_key(&self, name: &str) -> u64 {
        self.hash_bytes(name.as_bytes())
    }

    /// Ring key for an arbitrary byte string.
    pub fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        self.hasher.hash(bytes)
    }

    /// Register a real node and its virtual replicas.
    ///
    /// Fails with [`RingError::InvalidArgument`] for an empty name,
    /// [`RingError::DuplicateNode`] if the name's key is already on the ring,
    /// and [`RingError::NameTooLong`] if any replica name would exceed the
    /// naming limit. On failure the registry is left unchanged.
    ///
    /// A replica whose key is already taken is skipped; the returned
    /// [`Registration`] reports how many were placed.
    pub fn register(&mut self, name: &str) -> Result<Registration> {
        if name.is_empty() {
            return Err(RingError::InvalidArgument("node name is empty".into()));
        }

        let key = self.hash_key(name);
        if self.ring.contains(key) {
            return Err(RingError::DuplicateNode {
                name: name.to_string(),
                key,
            });
        }

        // Names differ only in the index digits, so the last one is the longest.
        let requested = self.config.virtual_replicas;
        self.pattern.render_checked(name, requested.saturating_sub(1))?;

        self.ring.insert(key, Node::Real(RealNode::new(name)));
        self.real_nodes.push(key);

        let mut placed = Vec::new();
        for i in 0..requested {
            let replica = self.pattern.render(name, i);
            let vkey = self.hasher.hash(replica.as_bytes());
            if self.ring.contains(vkey) {
                debug!(node = name, replica = %replica, key = vkey, "replica key taken, skipping");
                continue;
            }
            self.ring.insert(vkey, Node::Virtual(VirtualNode::new(replica, key)));
            placed.push(vkey);
        }

        let registration = Registration {
            key,
            requested,
            placed: placed.len() as u32,
        };
        if let Some(Node::Real(real)) = self.ring.get_mut(key) {
            real.set_replicas(placed);
        }

        debug!(
            service = %self.config.service_name,
            node = name,
            key,
            requested,
            placed = registration.placed,
            "registered node"
        );
        Ok(registration)
    }

    /// Name of the real node that owns `key`.
    ///
    /// The owner is the first ring entry clockwise from `key`, resolved
    /// through its virtual-node link if needed.
    pub fn query_key(&self, key: u64) -> Result<&str> {
        let (_, node) = self.ring.find_successor(key).ok_or(RingError::NotFound)?;
        node.resolve(&self.ring)
    }

    /// Name of the real node that owns the key derived from `name`.
    pub fn query(&self, name: &str) -> Result<&str> {
        self.query_key(self.hash_key(name))
    }

    /// Like [`query`](Self::query) for a key that need not be UTF-8.
    pub fn query_bytes(&self, key: &[u8]) -> Result<&str> {
        self.query_key(self.hash_bytes(key))
    }

    /// Number of ring entries (real and virtual).
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Number of registered real nodes.
    pub fn real_node_count(&self) -> usize {
        self.real_nodes.len()
    }

    /// Names of real nodes in registration order.
    pub fn real_nodes(&self) -> impl Iterator<Item = &str> {
        self.real_nodes
            .iter()
            .filter_map(|key| self.ring.get(*key))
            .map(Node::name)
    }

    /// Names of the virtual replicas placed for real node `name`.
    ///
    /// Returns `None` if `name` is not a registered real node.
    pub fn virtual_nodes_of(&self, name: &str) -> Option<Vec<&str>> {
        match self.ring.get(self.hash_key(name)) {
            Some(Node::Real(real)) if real.name() == name => Some(
                real.replica_keys()
                    .iter()
                    .filter_map(|key| self.ring.get(*key))
                    .map(Node::name)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Read-only view of the ring.
    pub fn ring(&self) -> &Ring<Node> {
        &self.ring
    }

    /// Destroy every node and empty the registry.
    ///
    /// Each node is taken out of the ring, unlinked, and dropped exactly
    /// once. Returns how many nodes were destroyed; calling it again on an
    /// empty registry returns 0. The registry can be reused afterwards.
    pub fn teardown(&mut self) -> usize {
        let mut destroyed = 0;
        for (_, mut node) in self.ring.drain() {
            node.destroy();
            destroyed += 1;
        }
        self.real_nodes.clear();

        if destroyed > 0 {
            info!(service = %self.config.service_name, destroyed, "registry torn down");
        }
        destroyed
    }
}
