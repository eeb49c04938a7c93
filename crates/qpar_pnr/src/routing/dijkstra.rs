//! Best-first (Dijkstra) single-target search over the routing graph.

use qpar_routegraph::{FastRoutingGraph, NodeId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    node: NodeId,
    cost: f64,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; tie-break by node id for determinism.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.as_raw().cmp(&self.node.as_raw()))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the lowest-cost path from `source` to `sink` over the routing
/// graph's Qubit/Interaction nodes, terminating at the sink Pin node.
/// `claimed` marks nodes already used by this wire, which are crossed at
/// zero incremental congestion cost ("sharing within the same signal
/// chain"). Ties break on `(cost, node_id)` for determinism.
pub(crate) fn route(
    fast: &FastRoutingGraph,
    source: NodeId,
    sink: NodeId,
    claimed: &HashSet<NodeId>,
    h_fac: f64,
    p_fac: f64,
) -> Option<Vec<NodeId>> {
    let mut best_cost: HashMap<NodeId, f64> = HashMap::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    best_cost.insert(source, 0.0);
    heap.push(Frontier {
        node: source,
        cost: 0.0,
    });

    while let Some(Frontier { node, cost }) = heap.pop() {
        if node == sink {
            return Some(reconstruct(&came_from, source, sink));
        }
        if cost > *best_cost.get(&node).unwrap_or(&f64::INFINITY) {
            continue;
        }
        for &next in fast.neighbors(node) {
            let edge_cost = if claimed.contains(&next) {
                0.0
            } else {
                fast.cost(next, false, h_fac, p_fac)
            };
            let next_cost = cost + edge_cost;
            if next_cost < *best_cost.get(&next).unwrap_or(&f64::INFINITY) {
                best_cost.insert(next, next_cost);
                came_from.insert(next, node);
                heap.push(Frontier {
                    node: next,
                    cost: next_cost,
                });
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<NodeId, NodeId>, source: NodeId, sink: NodeId) -> Vec<NodeId> {
    let mut path = vec![sink];
    let mut current = sink;
    while current != source {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpar_design::{Design, GateInputSpec, GateSpec, NetSpec, NetlistSpec};
    use qpar_fabric::Fabric;
    use qpar_routegraph::RoutingGraph;

    fn two_gate_graph() -> (RoutingGraph, qpar_routegraph::NodeId, qpar_routegraph::NodeId) {
        let spec = NetlistSpec {
            gates: vec![
                GateSpec {
                    name: "g0".into(),
                    func: "BUF".into(),
                    inputs: vec![GateInputSpec {
                        name: "a".into(),
                        phase: "+".into(),
                    }],
                    output: "m".into(),
                },
                GateSpec {
                    name: "g1".into(),
                    func: "BUF".into(),
                    inputs: vec![GateInputSpec {
                        name: "m2".into(),
                        phase: "+".into(),
                    }],
                    output: "b".into(),
                },
            ],
            nets: vec![NetSpec {
                name: "n_mid".into(),
                source: "m".into(),
                sinks: vec!["m2".into()],
            }],
            model_pins: vec![],
        };
        let mut design = Design::from_spec(&spec).unwrap();
        design.derive_placement_model().unwrap();
        let g0 = design.elements.iter().find(|e| e.name == "g0").unwrap().id;
        let g1 = design.elements.iter().find(|e| e.name == "g1").unwrap().id;
        design.element_mut(g0).placement.set(Some((0, 0)));
        design.element_mut(g1).placement.set(Some((1, 0)));
        let fabric = Fabric::new(2, 2);
        let graph = RoutingGraph::build(&design, &fabric);

        let m_pin = design.gates.iter().find(|g| g.name == "g0").unwrap().output;
        let m2_pin = design.gates[1].inputs[0];
        let source = graph.node_for_pin(m_pin).unwrap();
        let sink = graph.node_for_pin(m2_pin).unwrap();
        (graph, source, sink)
    }

    #[test]
    fn finds_a_path_between_adjacent_cells() {
        let (graph, source, sink) = two_gate_graph();
        let fast = qpar_routegraph::FastRoutingGraph::sync_from(&graph);
        let path = route(&fast, source, sink, &HashSet::new(), 1.0, 0.5);
        assert!(path.is_some());
        let path = path.unwrap();
        assert_eq!(*path.first().unwrap(), source);
        assert_eq!(*path.last().unwrap(), sink);
    }

    #[test]
    fn claimed_nodes_are_zero_cost() {
        let (graph, source, sink) = two_gate_graph();
        let mut fast = qpar_routegraph::FastRoutingGraph::sync_from(&graph);
        let path = route(&fast, source, sink, &HashSet::new(), 1.0, 0.5).unwrap();
        let mut claimed = HashSet::new();
        for &n in &path {
            fast.set_currently_used(n, true);
            claimed.insert(n);
        }
        let cost_reusing = path
            .windows(2)
            .map(|w| fast.cost(w[1], claimed.contains(&w[1]), 1.0, 0.5))
            .sum::<f64>();
        assert_eq!(cost_reusing, 0.0);
    }
}
