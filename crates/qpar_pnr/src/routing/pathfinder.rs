//! Pathfinder-style negotiated-congestion routing (spec §4.5).

use crate::error::PnrError;
use crate::routing::{congestion_warning, dijkstra};
use qpar_design::{Design, ElementId, ElementKind, PinId, PinRole, RoutePath, RouteWaypoint, TargetId, WireId};
use qpar_diag::DiagnosticSink;
use qpar_fabric::Fabric;
use qpar_routegraph::{FastRoutingGraph, NodeId, NodeKind, RoutingGraph};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Upper bound on negotiation passes before giving up (mirrors the
/// teacher's `MAX_ITERATIONS`).
const MAX_PASSES: usize = 50;

const INITIAL_P_FAC: f64 = 0.5;
const H_FAC: f64 = 1.0;

fn waypoint_for_node(graph: &RoutingGraph, id: NodeId) -> RouteWaypoint {
    match graph.node(id).kind {
        NodeKind::Pin(pin) => RouteWaypoint::Pin(pin),
        NodeKind::Qubit { qubit, is_logic } => RouteWaypoint::Qubit(qubit, is_logic),
        NodeKind::Interaction(coupler) => RouteWaypoint::Interaction(coupler),
    }
}

/// The element hosting a gate pin, or `None` for a model pin.
fn owning_gate_element(design: &Design, pin: PinId) -> Option<ElementId> {
    let gate = match design.pin(pin).role {
        PinRole::GateInput { gate, .. } | PinRole::GateOutput { gate } => gate,
        PinRole::Model => return None,
    };
    design
        .elements
        .iter()
        .find(|e| matches!(e.kind, ElementKind::Gate(g) if g == gate))
        .map(|e| e.id)
}

/// Records the fabric local a pin actually entered its cell at, from the
/// qubit waypoint adjacent to its Pin node in a found path.
fn record_entry_local(
    design: &mut Design,
    graph: &RoutingGraph,
    fabric: &Fabric,
    pin: PinId,
    qubit_node: NodeId,
) {
    let element = match owning_gate_element(design, pin) {
        Some(e) => e,
        None => return,
    };
    if let NodeKind::Qubit { qubit, .. } = graph.node(qubit_node).kind {
        if let Some(q) = fabric.qubit_by_global_index(qubit.as_raw()) {
            design.element_mut(element).assign_pin_local(pin, q.local);
        }
    }
}

fn ordered_targets(design: &Design) -> Vec<TargetId> {
    let mut targets: Vec<TargetId> = design
        .targets
        .iter()
        .filter(|t| !t.dont_route)
        .map(|t| t.id)
        .collect();
    targets.sort_by(|&a, &b| {
        let ta = design.target(a);
        let tb = design.target(b);
        tb.criticality()
            .partial_cmp(&ta.criticality())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.as_raw().cmp(&b.as_raw()))
    });
    targets
}

/// Runs negotiated-congestion routing to a fixed point (or the pass cap).
///
/// Each pass fully resets committed load (but not history) and reroutes
/// every target from scratch in decreasing criticality order, so a target
/// that was ripped up by congestion is always retried rather than left
/// stuck on a stale path. Nodes already claimed earlier in the pass by the
/// same wire are crossed at zero incremental cost.
pub(crate) fn negotiate(
    design: &mut Design,
    graph: &RoutingGraph,
    fabric: &Fabric,
    fast: &mut FastRoutingGraph,
    sink: &DiagnosticSink,
) -> Result<(), PnrError> {
    let mut p_fac = INITIAL_P_FAC;

    for pass in 0..MAX_PASSES {
        fast.reset_load();
        let mut wire_claims: HashMap<WireId, HashSet<NodeId>> = HashMap::new();

        for tid in ordered_targets(design) {
            let (wire, source, sink) = {
                let t = design.target(tid);
                (t.wire, t.source, t.sink)
            };
            let source_node = graph
                .node_for_pin(source)
                .expect("routable target's source pin must have a node");
            let sink_node = graph
                .node_for_pin(sink)
                .expect("routable target's sink pin must have a node");

            let claimed = wire_claims.entry(wire).or_default().clone();
            let path = match dijkstra::route(fast, source_node, sink_node, &claimed, H_FAC, p_fac)
            {
                Some(p) => p,
                None => {
                    design.target_mut(tid).route = None;
                    continue;
                }
            };

            let claims = wire_claims.entry(wire).or_default();
            let mut waypoints = Vec::with_capacity(path.len());
            for &node_id in &path {
                let waypoint = waypoint_for_node(graph, node_id);
                waypoints.push(waypoint);
                if !matches!(waypoint, RouteWaypoint::Pin(_)) && claims.insert(node_id) {
                    fast.set_currently_used(node_id, true);
                    fast.commit_load(node_id);
                }
            }

            if path.len() >= 2 {
                record_entry_local(design, graph, fabric, source, path[1]);
                record_entry_local(design, graph, fabric, sink, path[path.len() - 2]);
            }

            design.target_mut(tid).route = Some(RoutePath::new(waypoints));
        }

        let offending = fast.overused_nodes();
        if offending.is_empty() {
            return Ok(());
        }
        if pass + 1 >= MAX_PASSES / 2 {
            sink.emit(congestion_warning(pass + 1, offending.len()));
        }
        for &id in &offending {
            fast.accumulate_history(id, H_FAC);
        }
        p_fac *= 2.0;
    }

    Err(PnrError::Unroutable {
        passes: MAX_PASSES,
        offending: fast.overused_nodes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpar_design::{GateInputSpec, GateSpec, NetSpec, NetlistSpec};
    use qpar_fabric::Fabric;

    fn chain_design() -> (Design, Fabric) {
        let spec = NetlistSpec {
            gates: vec![
                GateSpec {
                    name: "g0".into(),
                    func: "BUF".into(),
                    inputs: vec![GateInputSpec {
                        name: "a".into(),
                        phase: "+".into(),
                    }],
                    output: "m0".into(),
                },
                GateSpec {
                    name: "g1".into(),
                    func: "BUF".into(),
                    inputs: vec![GateInputSpec {
                        name: "m0b".into(),
                        phase: "+".into(),
                    }],
                    output: "c".into(),
                },
            ],
            nets: vec![NetSpec {
                name: "n0".into(),
                source: "m0".into(),
                sinks: vec!["m0b".into()],
            }],
            model_pins: vec!["a".into(), "c".into()],
        };
        let mut design = Design::from_spec(&spec).unwrap();
        design.derive_placement_model().unwrap();
        let g0 = design.elements.iter().find(|e| e.name == "g0").unwrap().id;
        let g1 = design.elements.iter().find(|e| e.name == "g1").unwrap().id;
        design.element_mut(g0).placement.set(Some((0, 0)));
        design.element_mut(g1).placement.set(Some((2, 2)));
        let fabric = Fabric::new(3, 3);
        (design, fabric)
    }

    #[test]
    fn routes_a_single_target_without_congestion() {
        let (mut design, fabric) = chain_design();
        let graph = RoutingGraph::build(&design, &fabric);
        let mut fast = FastRoutingGraph::sync_from(&graph);
        let sink = DiagnosticSink::new();
        negotiate(&mut design, &graph, &fabric, &mut fast, &sink).unwrap();

        let routed = design.targets.iter().filter(|t| !t.dont_route).count();
        assert_eq!(routed, 1);
        let target = design.targets.iter().find(|t| !t.dont_route).unwrap();
        let route = target.route.as_ref().expect("target should be routed");
        assert!(route.is_well_formed());

        let g1 = design.elements.iter().find(|e| e.name == "g1").unwrap();
        let m0b_pin = design.gates[1].inputs[0];
        assert!(g1.pin_local(m0b_pin).is_some());
    }
}
