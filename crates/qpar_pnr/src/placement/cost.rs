//! Incremental half-perimeter wirelength (HPWL) placement cost.

use qpar_design::bbox::{BBox, UpdateOutcome};
use qpar_design::{Design, ElementId, WireId};

/// Half-perimeter wirelength of a wire's current bounding box. Wires are
/// considered at whatever elements currently have a placement — an
/// anchor wire touching an unplaced model-pin element just degenerates to
/// the single real point.
fn wire_points(design: &Design, wire_id: WireId) -> Vec<(i64, i64)> {
    design
        .wire(wire_id)
        .elements
        .iter()
        .filter_map(|&e| *design.element(e).placement.current())
        .collect()
}

/// Recomputes a wire's bbox and edge count from scratch over its current
/// element placements.
pub fn recompute_wire(design: &Design, wire_id: WireId) -> BBox {
    let points = wire_points(design, wire_id);
    if points.is_empty() {
        return BBox {
            xl: 0,
            xr: 0,
            yt: 0,
            yb: 0,
        };
    }
    BBox::recompute(&points).0
}

/// Initializes every wire's bbox/edge-count checkpoint from scratch.
/// Called once after initial (random) placement.
pub fn init_all_bboxes(design: &mut Design) {
    let wire_ids: Vec<WireId> = design.wires.iter().map(|w| w.id).collect();
    for wire_id in wire_ids {
        let points = wire_points(design, wire_id);
        let (bbox, edges) = if points.is_empty() {
            (
                BBox {
                    xl: 0,
                    xr: 0,
                    yt: 0,
                    yb: 0,
                },
                qpar_design::bbox::EdgeCount {
                    xl_cnt: 0,
                    xr_cnt: 0,
                    yt_cnt: 0,
                    yb_cnt: 0,
                },
            )
        } else {
            BBox::recompute(&points)
        };
        let wire = design.wire_mut(wire_id);
        wire.bbox.set(bbox);
        wire.bbox.commit();
        wire.edge_count.set(edges);
        wire.edge_count.commit();
    }
}

/// Total placement cost: the sum of every wire's current HPWL.
pub fn total_cost(design: &Design) -> f64 {
    design.wires.iter().map(|w| w.hpwl() as f64).sum()
}

/// The wires an element's pins touch.
fn wires_touching(design: &Design, element: ElementId) -> Vec<WireId> {
    design
        .wires
        .iter()
        .filter(|w| w.elements.contains(&element))
        .map(|w| w.id)
        .collect()
}

/// Applies a speculative move of `element` from `from` to `to`, updating the
/// bbox/edge-count of every wire it touches via the incremental axis rule
/// (falling back to a full recompute when an axis leaves its sole extreme),
/// and returns the total HPWL delta (`new - old`) across those wires.
///
/// Does not place the element itself — callers update `element.placement`
/// separately so the caller controls save/restore/commit timing.
pub fn apply_move(
    design: &mut Design,
    element: ElementId,
    from: Option<(i64, i64)>,
    to: (i64, i64),
) -> f64 {
    let mut delta = 0.0;
    for wire_id in wires_touching(design, element) {
        let before = design.wire(wire_id).hpwl() as f64;

        let mut needs_recompute = false;
        {
            let wire = design.wire_mut(wire_id);
            wire.bbox.save();
            wire.edge_count.save();

            let bbox = wire.bbox.current_mut();
            let edges = wire.edge_count.current_mut();

            let (fx, fy) = from.unwrap_or(to);
            if qpar_design::bbox::update_axis(
                &mut bbox.xl,
                &mut bbox.xr,
                &mut edges.xl_cnt,
                &mut edges.xr_cnt,
                fx,
                to.0,
            ) == UpdateOutcome::RecomputeRequired
            {
                needs_recompute = true;
            }
            if qpar_design::bbox::update_axis(
                &mut bbox.yt,
                &mut bbox.yb,
                &mut edges.yt_cnt,
                &mut edges.yb_cnt,
                fy,
                to.1,
            ) == UpdateOutcome::RecomputeRequired
            {
                needs_recompute = true;
            }
        }

        if needs_recompute {
            let bbox = recompute_wire(design, wire_id);
            let edges = BBox::recompute(&wire_points(design, wire_id)).1;
            let wire = design.wire_mut(wire_id);
            wire.bbox.set(bbox);
            wire.edge_count.set(edges);
        }

        let after = design.wire(wire_id).hpwl() as f64;
        delta += after - before;
    }
    delta
}

/// Commits every wire touching `element`'s bbox/edge-count checkpoints
/// (accepted move).
pub fn commit_move(design: &mut Design, element: ElementId) {
    for wire_id in wires_touching(design, element) {
        let wire = design.wire_mut(wire_id);
        wire.bbox.commit();
        wire.edge_count.commit();
    }
}

/// Restores every wire touching `element`'s bbox/edge-count checkpoints
/// (rejected move).
pub fn restore_move(design: &mut Design, element: ElementId) {
    for wire_id in wires_touching(design, element) {
        let wire = design.wire_mut(wire_id);
        wire.bbox.restore();
        wire.edge_count.restore();
    }
}

/// Verifies the placer invariant (§8, property 3/4): every wire's
/// incrementally maintained bbox matches a from-scratch recompute.
pub fn verify_bboxes(design: &Design) -> bool {
    design
        .wires
        .iter()
        .all(|w| *w.bbox.current() == recompute_wire(design, w.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpar_design::{GateInputSpec, GateSpec, NetSpec, NetlistSpec};

    fn two_gate_design() -> Design {
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
        design
    }

    fn gate_element(design: &Design, name: &str) -> qpar_design::ElementId {
        design
            .elements
            .iter()
            .find(|e| e.name == name)
            .unwrap()
            .id
    }

    #[test]
    fn cost_zero_when_colocated() {
        let mut design = two_gate_design();
        let g0 = gate_element(&design, "g0");
        let g1 = gate_element(&design, "g1");
        design.element_mut(g0).placement.set(Some((0, 0)));
        design.element_mut(g0).placement.commit();
        design.element_mut(g1).placement.set(Some((0, 0)));
        design.element_mut(g1).placement.commit();
        init_all_bboxes(&mut design);
        assert_eq!(total_cost(&design), 0.0);
    }

    #[test]
    fn moving_apart_increases_cost() {
        let mut design = two_gate_design();
        let g0 = gate_element(&design, "g0");
        let g1 = gate_element(&design, "g1");
        design.element_mut(g0).placement.set(Some((0, 0)));
        design.element_mut(g0).placement.commit();
        design.element_mut(g1).placement.set(Some((0, 0)));
        design.element_mut(g1).placement.commit();
        init_all_bboxes(&mut design);

        let delta = apply_move(&mut design, g1, Some((0, 0)), (3, 0));
        design.element_mut(g1).placement.set(Some((3, 0)));
        commit_move(&mut design, g1);
        design.element_mut(g1).placement.commit();

        assert_eq!(delta, 3.0);
        assert!(verify_bboxes(&design));
    }

    #[test]
    fn rejected_move_restores_bbox() {
        let mut design = two_gate_design();
        let g0 = gate_element(&design, "g0");
        let g1 = gate_element(&design, "g1");
        design.element_mut(g0).placement.set(Some((0, 0)));
        design.element_mut(g0).placement.commit();
        design.element_mut(g1).placement.set(Some((1, 0)));
        design.element_mut(g1).placement.commit();
        init_all_bboxes(&mut design);
        let before = total_cost(&design);

        apply_move(&mut design, g1, Some((1, 0)), (5, 5));
        restore_move(&mut design, g1);

        assert_eq!(total_cost(&design), before);
        assert!(verify_bboxes(&design));
    }
}
