//! Ring entries: real worker nodes and their virtual replicas.
//!
//! The ring owns every [`Node`] by value. The links between a real node and
//! its replicas are ring keys, never owning references: a [`RealNode`] lists
//! the keys of its replicas for enumeration, and a [`VirtualNode`] holds the
//! key of its owner for resolution. Only the registry's teardown drops nodes.

use crate::error::{Result, RingError};
use crate::ring::Ring;

/// An actual worker, the final answer to a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealNode {
    name: String,
    online: bool,
    /// Ring keys of this node's virtual replicas.
    replicas: Vec<u64>,
}

impl RealNode {
    /// Create a real node with no replicas.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            online: true,
            replicas: Vec::new(),
        }
    }

    /// This node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ring keys of the replicas placed for this node.
    pub fn replica_keys(&self) -> &[u64] {
        &self.replicas
    }

    pub(crate) fn set_replicas(&mut self, keys: Vec<u64>) {
        self.replicas = keys;
    }
}

/// A replica point on the ring that routes to a real node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNode {
    name: String,
    online: bool,
    /// Ring key of the owning real node; `None` once torn down.
    owner: Option<u64>,
}

impl VirtualNode {
    /// Create a replica owned by the real node stored at `owner`.
    pub fn new(name: impl Into<String>, owner: u64) -> Self {
        Self {
            name: name.into(),
            online: true,
            owner: Some(owner),
        }
    }

    /// This replica's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ring key of the owning real node, if still linked.
    pub fn owner_key(&self) -> Option<u64> {
        self.owner
    }
}

/// A ring entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An actual worker.
    Real(RealNode),
    /// A replica of a worker.
    Virtual(VirtualNode),
}

impl Node {
    /// The identity string this node was hashed from.
    pub fn name(&self) -> &str {
        match self {
            Node::Real(n) => &n.name,
            Node::Virtual(n) => &n.name,
        }
    }

    /// Liveness flag. Set at creation; lookups do not consult it yet.
    pub fn is_online(&self) -> bool {
        match self {
            Node::Real(n) => n.online,
            Node::Virtual(n) => n.online,
        }
    }

    /// Whether this entry is a real node.
    pub fn is_real(&self) -> bool {
        matches!(self, Node::Real(_))
    }

    /// Resolve this entry to the name of the real node that serves it.
    ///
    /// A real node resolves to itself. A virtual node resolves through its
    /// owner key; if the owner is unlinked or no longer a real node on
    /// `ring`, this is [`RingError::BrokenReference`].
    pub fn resolve<'a>(&'a self, ring: &'a Ring<Node>) -> Result<&'a str> {
        match self {
            Node::Real(n) => Ok(&n.name),
            Node::Virtual(n) => match n.owner.and_then(|key| ring.get(key)) {
                Some(Node::Real(owner)) => Ok(&owner.name),
                _ => Err(RingError::BrokenReference(n.name.clone())),
            },
        }
    }

    /// Drop this node's links to other nodes.
    ///
    /// A real node forgets its replica keys; a virtual node forgets its
    /// owner. Neither touches the other side, so nodes can be destroyed in
    /// any order.
    pub fn destroy(&mut self) {
        match self {
            Node::Real(n) => {
                n.replicas.clear();
                n.online = false;
            }
            Node::Virtual(n) => {
                n.owner = None;
                n.online = false;
            }
        }
    }
}
