//! Routing-graph node kinds and their per-node congestion state.

use qpar_common::{CouplerId, QubitId};
use qpar_design::PinId;
use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// What a routing-graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A source/sink terminal.
    Pin(PinId),
    /// A hardware qubit. `is_logic` is true if the qubit belongs to a
    /// placed element's cell and is assignable as a gadget qubit.
    Qubit {
        /// The underlying fabric qubit.
        qubit: QubitId,
        /// Whether this qubit sits in a placed cell (vs. pure transport).
        is_logic: bool,
    },
    /// A hardware coupler used for transport.
    Interaction(CouplerId),
}

impl NodeKind {
    /// The capacity of this node: 1 for qubits and interactions, unbounded
    /// for pins (endpoints, not transport resources).
    pub fn capacity(&self) -> u32 {
        match self {
            NodeKind::Pin(_) => u32::MAX,
            NodeKind::Qubit { .. } | NodeKind::Interaction(_) => 1,
        }
    }
}

/// A single routing-graph node and its congestion bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingNode {
    /// The unique ID of this node.
    pub id: NodeId,
    /// What this node represents.
    pub kind: NodeKind,
    /// Current signal count routed through this node.
    pub load: u32,
    /// The node's intrinsic (congestion-independent) cost.
    pub base_cost: f64,
    /// Accumulated history penalty from prior passes' overuse.
    pub history_cost: f64,
    /// Whether this node is claimed by the wire currently being routed.
    pub currently_used: bool,
    /// Set iff a chain merely traverses this logic qubit (relevant to gadget emission).
    pub pass: bool,
}

impl RoutingNode {
    /// Creates a fresh, unused node of the given kind.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            load: 0,
            base_cost: 1.0,
            history_cost: 0.0,
            currently_used: false,
            pass: false,
        }
    }

    /// This node's capacity.
    pub fn capacity(&self) -> u32 {
        self.kind.capacity()
    }

    /// How much this node is over capacity, optionally accounting for a
    /// pending claim by the wire being routed.
    pub fn overuse(&self, claiming: bool) -> u32 {
        let projected = self.load + u32::from(!claiming);
        projected.saturating_sub(self.capacity())
    }
}
