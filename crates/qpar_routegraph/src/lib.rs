//! The routing graph: a derived bipartite graph over pin, qubit, and
//! interaction (coupler) nodes, built once after placement.
//!
//! [`RoutingGraph`] owns its nodes and adjacency and holds non-owning
//! references back to the fabric and design only at construction time —
//! once built it stands alone. [`FastRoutingGraph`] is a dense,
//! index-addressed mirror of the congestion state used by the router's
//! Dijkstra inner loop, so the hot path never hashes.

#![warn(missing_docs)]

pub mod ids;
pub mod node;

use qpar_design::{Design, Pin, PinRole};
use qpar_fabric::Fabric;
use std::collections::HashMap;

pub use ids::NodeId;
pub use node::{NodeKind, RoutingNode};

use qpar_common::{CouplerId, QubitId};
use qpar_design::PinId;
use qpar_fabric::types::Column;

/// Which K4,4 column a pin's node should connect to.
///
/// Gate inputs connect to the left column, gate outputs and model pins to
/// the right column — an internal convention (the hardware is symmetric
/// under a global swap of the two), fixed once and used consistently.
fn pin_column(role: &PinRole) -> Column {
    match role {
        PinRole::GateInput { .. } => Column::Left,
        PinRole::GateOutput { .. } | PinRole::Model => Column::Right,
    }
}

/// The routing graph: pin/qubit/interaction nodes and their adjacency.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    nodes: Vec<RoutingNode>,
    adjacency: Vec<Vec<NodeId>>,
    node_by_pin: HashMap<PinId, NodeId>,
    node_by_qubit: HashMap<QubitId, NodeId>,
    node_by_coupler: HashMap<CouplerId, NodeId>,
}

impl RoutingGraph {
    /// Builds the routing graph from a placed design and its target fabric.
    ///
    /// Every fabric qubit gets a Qubit node (`is_logic` true iff its cell
    /// hosts at least one placed element). Every fabric coupler gets an
    /// Interaction node wired to its two qubit nodes. Every pin of every
    /// placed element gets a Pin node wired to the four qubits of the
    /// matching column in the element's cell.
    pub fn build(design: &Design, fabric: &Fabric) -> Self {
        let mut graph = Self::default();

        let mut logic_cells = std::collections::HashSet::new();
        for element in &design.elements {
            if let Some((x, y)) = *element.placement.current() {
                logic_cells.insert((x, y));
            }
        }

        for qubit in fabric.qubits() {
            let is_logic = logic_cells.contains(&(qubit.x as i64, qubit.y as i64));
            let id = graph.push_node(NodeKind::Qubit {
                qubit: qubit.id,
                is_logic,
            });
            graph.node_by_qubit.insert(qubit.id, id);
        }

        for coupler in fabric.couplers() {
            let id = graph.push_node(NodeKind::Interaction(coupler.id));
            graph.node_by_coupler.insert(coupler.id, id);
            let a = graph.node_by_qubit[&coupler.a];
            let b = graph.node_by_qubit[&coupler.b];
            graph.connect(id, a);
            graph.connect(id, b);
        }

        for element in &design.elements {
            let (x, y) = match *element.placement.current() {
                Some(pos) => pos,
                None => continue,
            };
            let cell = match fabric.cell(x as u32, y as u32) {
                Some(c) => c,
                None => continue,
            };
            for (&pin_id, _) in &element.pin_locals {
                let pin: &Pin = design.pin(pin_id);
                let id = graph.push_node(NodeKind::Pin(pin_id));
                graph.node_by_pin.insert(pin_id, id);
                let locals: Vec<u32> = match pin_column(&pin.role) {
                    Column::Left => (0..4).collect(),
                    Column::Right => (4..8).collect(),
                };
                for local in locals {
                    let qubit_id = cell.qubits[local as usize];
                    let qubit_node = graph.node_by_qubit[&qubit_id];
                    graph.connect(id, qubit_node);
                }
            }
        }

        graph
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(RoutingNode::new(id, kind));
        self.adjacency.push(Vec::new());
        id
    }

    fn connect(&mut self, a: NodeId, b: NodeId) {
        self.adjacency[a.as_raw() as usize].push(b);
        self.adjacency[b.as_raw() as usize].push(a);
    }

    /// All nodes, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[RoutingNode] {
        &self.nodes
    }

    /// The node with the given id.
    pub fn node(&self, id: NodeId) -> &RoutingNode {
        &self.nodes[id.as_raw() as usize]
    }

    /// A mutable reference to the node with the given id.
    pub fn node_mut(&mut self, id: NodeId) -> &mut RoutingNode {
        &mut self.nodes[id.as_raw() as usize]
    }

    /// The neighboring nodes of a node, for adjacency iteration.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.as_raw() as usize]
    }

    /// The node representing the given pin, if it was placed at build time.
    pub fn node_for_pin(&self, pin: PinId) -> Option<NodeId> {
        self.node_by_pin.get(&pin).copied()
    }

    /// The node representing the given qubit.
    pub fn node_for_qubit(&self, qubit: QubitId) -> Option<NodeId> {
        self.node_by_qubit.get(&qubit).copied()
    }

    /// The node representing the given coupler.
    pub fn node_for_coupler(&self, coupler: CouplerId) -> Option<NodeId> {
        self.node_by_coupler.get(&coupler).copied()
    }
}

/// A dense, index-addressed mirror of [`RoutingGraph`]'s congestion state,
/// used by the router's Dijkstra inner loop to avoid hashing.
#[derive(Debug, Clone, Default)]
pub struct FastRoutingGraph {
    adjacency: Vec<Vec<NodeId>>,
    load: Vec<u32>,
    capacity: Vec<u32>,
    base_cost: Vec<f64>,
    history_cost: Vec<f64>,
    currently_used: Vec<bool>,
}

impl FastRoutingGraph {
    /// Copies the current state of a [`RoutingGraph`] into a dense view.
    pub fn sync_from(graph: &RoutingGraph) -> Self {
        let n = graph.nodes.len();
        let mut fast = FastRoutingGraph {
            adjacency: graph.adjacency.clone(),
            load: Vec::with_capacity(n),
            capacity: Vec::with_capacity(n),
            base_cost: Vec::with_capacity(n),
            history_cost: Vec::with_capacity(n),
            currently_used: Vec::with_capacity(n),
        };
        for node in &graph.nodes {
            fast.load.push(node.load);
            fast.capacity.push(node.capacity());
            fast.base_cost.push(node.base_cost);
            fast.history_cost.push(node.history_cost);
            fast.currently_used.push(node.currently_used);
        }
        fast
    }

    /// Writes the dense view's congestion state back into a [`RoutingGraph`].
    pub fn write_back(&self, graph: &mut RoutingGraph) {
        for (i, node) in graph.nodes.iter_mut().enumerate() {
            node.load = self.load[i];
            node.base_cost = self.base_cost[i];
            node.history_cost = self.history_cost[i];
            node.currently_used = self.currently_used[i];
        }
    }

    /// The neighbors of a node.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.as_raw() as usize]
    }

    /// Marks a node as claimed (or released) by the wire currently being routed.
    pub fn set_currently_used(&mut self, id: NodeId, used: bool) {
        self.currently_used[id.as_raw() as usize] = used;
    }

    /// Commits a node's claim into its persistent load and resets its
    /// per-wire `currently_used` flag, called once a route is accepted.
    pub fn commit_load(&mut self, id: NodeId) {
        let i = id.as_raw() as usize;
        if self.currently_used[i] {
            self.load[i] += 1;
            self.currently_used[i] = false;
        }
    }

    /// Clears a previously committed claim, called when a wire is ripped up.
    pub fn release_load(&mut self, id: NodeId) {
        let i = id.as_raw() as usize;
        self.load[i] = self.load[i].saturating_sub(1);
    }

    /// Accumulates a node's current overuse into its history cost, called
    /// between negotiation passes.
    pub fn accumulate_history(&mut self, id: NodeId, h_fac: f64) {
        let i = id.as_raw() as usize;
        let overuse = self.load[i].saturating_sub(self.capacity[i]);
        if overuse > 0 {
            self.history_cost[i] += overuse as f64 * h_fac;
        }
    }

    /// Clears every node's committed load and claim flag to start a fresh
    /// negotiation pass. History cost (the negotiation's memory of past
    /// congestion) is left untouched.
    pub fn reset_load(&mut self) {
        for v in self.load.iter_mut() {
            *v = 0;
        }
        for v in self.currently_used.iter_mut() {
            *v = false;
        }
    }

    /// Nodes whose committed load exceeds their capacity, as of the most
    /// recently completed pass.
    pub fn overused_nodes(&self) -> Vec<NodeId> {
        self.load
            .iter()
            .zip(self.capacity.iter())
            .enumerate()
            .filter(|(_, (&l, &c))| l > c)
            .map(|(i, _)| NodeId::from_raw(i as u32))
            .collect()
    }

    /// The Pathfinder congestion cost of a node:
    /// `base·(1 + history·h_fac)·(1 + overuse·p_fac)`, where `claiming`
    /// marks whether this search is about to add its own claim to the node
    /// (so a wire can share its own prior claim at zero incremental cost).
    pub fn cost(&self, id: NodeId, claiming: bool, h_fac: f64, p_fac: f64) -> f64 {
        let i = id.as_raw() as usize;
        if claiming && self.currently_used[i] {
            return 0.0;
        }
        let projected = self.load[i] + u32::from(!claiming || !self.currently_used[i]);
        let overuse = projected.saturating_sub(self.capacity[i]);
        self.base_cost[i] * (1.0 + self.history_cost[i] * h_fac) * (1.0 + overuse as f64 * p_fac)
    }
}
