//! Opaque ID newtype for routing-graph nodes.

use serde::{Deserialize, Serialize};

/// Opaque, copyable ID for a node in the routing graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let id = NodeId::from_raw(5);
        assert_eq!(id.as_raw(), 5);
    }

    #[test]
    fn ordering() {
        assert!(NodeId::from_raw(1) < NodeId::from_raw(2));
    }
}
