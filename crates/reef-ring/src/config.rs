//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RingError};
use crate::naming::VirtualNamePattern;

/// Naming pattern used when none is configured.
pub const DEFAULT_VIRTUAL_NODE_PATTERN: &str = "{name}_virtual_node_extend{index}";

/// Virtual replicas per real node when none is configured.
pub const DEFAULT_VIRTUAL_REPLICAS: u32 = 128;

/// Construction-time settings for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name of the service this ring routes for.
    pub service_name: String,
    /// Pattern for virtual replica names (see [`VirtualNamePattern`]).
    pub virtual_node_pattern: String,
    /// Virtual replicas requested per real node.
    pub virtual_replicas: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            service_name: "reef".to_string(),
            virtual_node_pattern: DEFAULT_VIRTUAL_NODE_PATTERN.to_string(),
            virtual_replicas: DEFAULT_VIRTUAL_REPLICAS,
        }
    }
}

impl RegistryConfig {
    /// Build a config from its three parts.
    pub fn new(
        service_name: impl Into<String>,
        virtual_node_pattern: impl Into<String>,
        virtual_replicas: u32,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            virtual_node_pattern: virtual_node_pattern.into(),
            virtual_replicas,
        }
    }

    /// Check every field and return the parsed naming pattern.
    pub fn validate(&self) -> Result<VirtualNamePattern> {
        if self.service_name.is_empty() {
            return Err(RingError::InvalidArgument("service name is empty".into()));
        }
        if self.virtual_replicas == 0 {
            return Err(RingError::InvalidArgument(
                "virtual replica count must be greater than zero".into(),
            ));
        }
        VirtualNamePattern::parse(&self.virtual_node_pattern)
    }
}
