//! Shared test harness for reef integration tests.
//!
//! Provides [`TestCluster`] — a registry with `n` named workers — plus
//! helpers to sample reproducible request keys and snapshot who owns them.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reef_ring::{DEFAULT_VIRTUAL_NODE_PATTERN, Registry, RegistryConfig};

/// A registry populated with workers named `worker-0`, `worker-1`, ...
pub struct TestCluster {
    registry: Registry,
    next: usize,
}

impl TestCluster {
    /// Create a cluster of `nodes` workers with `replicas` virtual nodes each.
    pub fn new(nodes: usize, replicas: u32) -> Self {
        let config = RegistryConfig::new("integration", DEFAULT_VIRTUAL_NODE_PATTERN, replicas);
        let mut cluster = Self {
            registry: Registry::new(config).expect("valid test config"),
            next: 0,
        };
        for _ in 0..nodes {
            cluster.add_node();
        }
        cluster
    }

    /// Register one more worker and return its name.
    pub fn add_node(&mut self) -> String {
        let name = format!("worker-{}", self.next);
        self.next += 1;
        self.registry.register(&name).expect("fresh worker name");
        name
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the underlying registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Owner of every key in `keys`, in order.
    pub fn owners(&self, keys: &[String]) -> Vec<String> {
        keys.iter()
            .map(|k| self.registry.query(k).expect("non-empty ring").to_string())
            .collect()
    }

    /// Number of keys owned by each worker.
    pub fn load(&self, keys: &[String]) -> HashMap<String, usize> {
        let mut load = HashMap::new();
        for owner in self.owners(keys) {
            *load.entry(owner).or_default() += 1;
        }
        load
    }
}

/// `count` reproducible request keys derived from `seed`.
pub fn request_keys(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| format!("req-{:016x}", rng.random::<u64>()))
        .collect()
}
