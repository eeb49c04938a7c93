//! Per-gate gadgets, the model-pin anchor gadget, and chain gadgets (spec
//! §4.6). Every gadget is expressed in terms of a cell `(x,y)` and the
//! local(s) ∈ `0..8` its pins occupy; inter-cell transport is handled
//! separately by [`emit_chain_gadgets`] once every target has a route.

use crate::error::GenError;
use crate::model::IsingModel;
use qpar_design::{
    Design, Element, ElementId, ElementKind, Gate, GateFunc, Phase, PinId, PinRole, RoutePath,
    RouteWaypoint,
};
use qpar_fabric::Fabric;
use std::collections::{BTreeSet, HashMap};

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

fn phase_of(design: &Design, pin: PinId) -> Phase {
    match design.pin(pin).role {
        PinRole::GateInput { phase, .. } => phase,
        _ => Phase::PosUnate,
    }
}

fn partner_local(local: u32) -> u32 {
    if local < 4 {
        local + 4
    } else {
        local - 4
    }
}

/// Writes `h/2` onto a pin's own qubit and its intra-cell partner, and ties
/// the pair together with the standard `J = -1.0` chain coupler.
fn emit_pin_bias(
    model: &mut IsingModel,
    fabric: &Fabric,
    x: u32,
    y: u32,
    local: u32,
    h: f64,
    origin: &str,
) -> Result<(), GenError> {
    let own = fabric.qubit_at(x, y, local).expect("local in range").id;
    let partner = fabric
        .qubit_at(x, y, partner_local(local))
        .expect("partner local in range")
        .id;
    model.write_bias(own, h / 2.0, format!("{origin} (own)"))?;
    model.write_bias(partner, h / 2.0, format!("{origin} (partner)"))?;
    model.write_coupler(own, partner, -1.0, format!("{origin} (chain)"))
}

fn emit_pin_ground(
    model: &mut IsingModel,
    fabric: &Fabric,
    x: u32,
    y: u32,
    local: u32,
    spin: i8,
    origin: &str,
) -> Result<(), GenError> {
    let own = fabric.qubit_at(x, y, local).expect("local in range").id;
    let partner = fabric
        .qubit_at(x, y, partner_local(local))
        .expect("partner local in range")
        .id;
    model.write_ground_spin(own, spin, format!("{origin} (own)"))?;
    model.write_ground_spin(partner, spin, format!("{origin} (partner)"))
}

fn same_column(a: u32, b: u32) -> bool {
    (a < 4) == (b < 4)
}

/// The intra-cell coupler realizing `J(pi,pj)`: gate inputs land on the left
/// column and the gate output on the right (`qpar_routegraph::pin_column`),
/// so an input-output pair already spans the K4,4 bipartition and couples
/// directly. A pair of pins sharing a column (the two inputs of a 2-input
/// gate) has no direct edge, so the second pin's partner (opposite column)
/// qubit stands in for it instead.
fn emit_cross_coupler(
    model: &mut IsingModel,
    fabric: &Fabric,
    x: u32,
    y: u32,
    first: u32,
    second: u32,
    j: f64,
    origin: &str,
) -> Result<(), GenError> {
    let a = fabric.qubit_at(x, y, first).expect("local in range").id;
    let b_local = if same_column(first, second) {
        partner_local(second)
    } else {
        second
    };
    let b = fabric.qubit_at(x, y, b_local).expect("local in range").id;
    model.write_coupler(a, b, j, origin.to_string())
}

struct Row {
    h: [f64; 3],
    j: [f64; 3],
    s: [i8; 3],
}

/// The §4.6 gadget table row for a 2-input gate, keyed by function and the
/// two input phases.
fn two_input_row(func: GateFunc, phi1: Phase, phi2: Phase) -> Row {
    use GateFunc::{And, Or};
    use Phase::{NegUnate, PosUnate};

    let (h1, h2, h3, j01, j02, j12, s1, s2, s3) = match (func, phi1, phi2) {
        (Or, PosUnate, PosUnate) => (0.5, 0.5, -1.0, 0.5, -1.0, -1.0, 1, 1, 1),
        (Or, PosUnate, NegUnate) => (0.5, -0.5, -1.0, -0.5, -1.0, 1.0, 1, -1, 1),
        (Or, NegUnate, PosUnate) => (-0.5, 0.5, -1.0, -0.5, 1.0, -1.0, -1, 1, 1),
        (Or, NegUnate, NegUnate) => (-0.5, -0.5, -1.0, 0.5, 1.0, 1.0, -1, -1, 1),
        (And, PosUnate, PosUnate) => (-0.5, -0.5, 1.0, 0.5, -1.0, -1.0, 1, 1, 1),
        (And, PosUnate, NegUnate) => (-0.5, 0.5, 1.0, -0.5, -1.0, 1.0, 1, -1, 1),
        (And, NegUnate, PosUnate) => (0.5, -0.5, 1.0, -0.5, 1.0, -1.0, -1, 1, 1),
        (And, NegUnate, NegUnate) => (0.5, 0.5, 1.0, 0.5, 1.0, 1.0, -1, -1, 1),
        (GateFunc::Buf, _, _) => unreachable!("BUF has its own single-input gadget"),
    };
    Row {
        h: [h1, h2, h3],
        j: [j01, j02, j12],
        s: [s1, s2, s3],
    }
}

fn cell_of(element: &Element) -> Result<(u32, u32), GenError> {
    (*element.placement.current())
        .map(|(x, y)| (x as u32, y as u32))
        .ok_or_else(|| GenError::MissingPlacement {
            gate_name: element.name.clone(),
        })
}

fn local_of(element: &Element, pin: PinId, gate_name: &str) -> Result<u32, GenError> {
    element
        .pin_local(pin)
        .ok_or_else(|| GenError::MissingPinLocal {
            gate_name: gate_name.to_string(),
        })
}

fn emit_two_input_gate(
    design: &Design,
    fabric: &Fabric,
    model: &mut IsingModel,
    gate: &Gate,
    element: &Element,
) -> Result<(), GenError> {
    let phi1 = phase_of(design, gate.inputs[0]);
    let phi2 = phase_of(design, gate.inputs[1]);
    let row = two_input_row(gate.func, phi1, phi2);

    let p1 = local_of(element, gate.inputs[0], &gate.name)?;
    let p2 = local_of(element, gate.inputs[1], &gate.name)?;
    let p3 = local_of(element, gate.output, &gate.name)?;
    let (x, y) = cell_of(element)?;
    let origin = format!("gate {} gadget", gate.name);

    emit_pin_bias(model, fabric, x, y, p1, row.h[0], &origin)?;
    emit_pin_bias(model, fabric, x, y, p2, row.h[1], &origin)?;
    emit_pin_bias(model, fabric, x, y, p3, row.h[2], &origin)?;

    emit_cross_coupler(model, fabric, x, y, p1, p2, row.j[0], &origin)?;
    emit_cross_coupler(model, fabric, x, y, p1, p3, row.j[1], &origin)?;
    emit_cross_coupler(model, fabric, x, y, p2, p3, row.j[2], &origin)?;

    emit_pin_ground(model, fabric, x, y, p1, row.s[0], &origin)?;
    emit_pin_ground(model, fabric, x, y, p2, row.s[1], &origin)?;
    emit_pin_ground(model, fabric, x, y, p3, row.s[2], &origin)
}

/// The gadget for a single-input buffer/inverter gate: not in the §4.6
/// table (which only covers 2-input OR/AND), so grounded on the same
/// half-split/partner-chain/cross-coupler machinery as the 2-input gadget,
/// reduced to a single pair. A positive-unate gate wants its input and
/// output to agree (`J = -1.0`, ferromagnetic); a negative-unate gate wants
/// them opposed (`J = +1.0`, antiferromagnetic).
fn emit_buf_gate(
    design: &Design,
    fabric: &Fabric,
    model: &mut IsingModel,
    gate: &Gate,
    element: &Element,
) -> Result<(), GenError> {
    let phase = phase_of(design, gate.inputs[0]);
    let p_in = local_of(element, gate.inputs[0], &gate.name)?;
    let p_out = local_of(element, gate.output, &gate.name)?;
    let (x, y) = cell_of(element)?;
    let origin = format!("gate {} gadget", gate.name);

    emit_pin_bias(model, fabric, x, y, p_in, 0.0, &origin)?;
    emit_pin_bias(model, fabric, x, y, p_out, 0.0, &origin)?;

    let (j, s_out) = match phase {
        Phase::PosUnate => (-1.0, 1),
        Phase::NegUnate => (1.0, -1),
    };
    emit_cross_coupler(model, fabric, x, y, p_in, p_out, j, &origin)?;

    emit_pin_ground(model, fabric, x, y, p_in, 1, &origin)?;
    emit_pin_ground(model, fabric, x, y, p_out, s_out, &origin)
}

/// Locates the gate pin a model pin's boundary value is physically anchored
/// to: the other endpoint of the `dont_route` target sharing the model
/// pin's wire. Returns `None` if the model pin has no gate anywhere on its
/// wire (it only ever touches other model pins directly) — there is then
/// no cell to attach a bias to, and nothing is emitted.
fn anchor_pin_for_model_element(
    design: &Design,
    model_element: &Element,
) -> Option<(ElementId, PinId)> {
    let model_pin = match model_element.kind {
        ElementKind::ModelPin(p) => p,
        ElementKind::Gate(_) => return None,
    };
    let wire = design
        .wires
        .iter()
        .find(|w| w.elements.contains(&model_element.id))?;
    for target in &design.targets {
        if target.wire != wire.id {
            continue;
        }
        for candidate in [target.source, target.sink] {
            if candidate == model_pin {
                continue;
            }
            if let Some(elem) = owning_gate_element(design, candidate) {
                return Some((elem, candidate));
            }
        }
    }
    None
}

fn emit_model_pin_anchor(
    design: &Design,
    fabric: &Fabric,
    model: &mut IsingModel,
    model_element: &Element,
) -> Result<(), GenError> {
    let (gate_element_id, anchor_pin) = match anchor_pin_for_model_element(design, model_element) {
        Some(v) => v,
        None => return Ok(()),
    };
    let gate_element = design.element(gate_element_id);
    let p = local_of(gate_element, anchor_pin, &gate_element.name)?;
    let (x, y) = cell_of(gate_element)?;
    let origin = format!("model pin {} anchor", model_element.name);

    let own = fabric.qubit_at(x, y, p).expect("local in range").id;
    let partner = fabric
        .qubit_at(x, y, partner_local(p))
        .expect("partner local in range")
        .id;
    model.write_bias(own, -2.0, origin.clone())?;
    model.write_coupler(own, partner, -1.0, origin.clone())?;
    model.write_ground_spin(own, 1, origin.clone())?;
    model.write_ground_spin(partner, 1, origin)
}

/// Emits the chain gadget for every routed target: `J = -1.0` on every
/// Interaction waypoint, and `h = 0` on every intermediate Qubit waypoint
/// (the two Qubit waypoints adjacent to the target's own pins are the
/// gate's own gadget locals, already emitted, and are skipped here).
fn emit_chain_gadgets(design: &Design, fabric: &Fabric, model: &mut IsingModel) -> Result<(), GenError> {
    for target in &design.targets {
        let route = match &target.route {
            Some(r) => r,
            None => continue,
        };
        let waypoints = &route.waypoints;
        if waypoints.len() < 2 {
            continue;
        }
        let last_qubit_index = waypoints.len() - 2;
        for (i, waypoint) in waypoints.iter().enumerate() {
            match *waypoint {
                RouteWaypoint::Interaction(coupler_id) => {
                    let coupler = &fabric.couplers()[coupler_id.as_raw() as usize];
                    model.write_coupler(
                        coupler.a,
                        coupler.b,
                        -1.0,
                        format!("target {} chain", target.id),
                    )?;
                }
                RouteWaypoint::Qubit(qubit_id, is_logic) => {
                    if i == 1 || i == last_qubit_index {
                        continue;
                    }
                    let origin = format!("target {} chain transport", target.id);
                    if is_logic {
                        let q = fabric.qubit_by_global_index(qubit_id.as_raw()).expect("qubit exists");
                        emit_pin_bias(model, fabric, q.x, q.y, q.local, 0.0, &origin)?;
                    } else {
                        model.write_bias(qubit_id, 0.0, origin)?;
                    }
                }
                RouteWaypoint::Pin(_) => {}
            }
        }
    }
    Ok(())
}

/// For every (element, pin) pair, every distinct fabric local a routed
/// chain actually entered that element's cell at. `pin_column` hands a
/// whole column to a pin rather than one fixed local, and
/// `Element::assign_pin_local` keeps only the most recently routed
/// target's choice, so a pin shared by several targets — an ordinary
/// fan-out net's source, or a model-pin net's gate anchor — can
/// legitimately enter the same cell at more than one local across passes.
fn entry_locals(design: &Design, fabric: &Fabric) -> HashMap<(ElementId, PinId), BTreeSet<u32>> {
    let mut locals: HashMap<(ElementId, PinId), BTreeSet<u32>> = HashMap::new();
    let mut record = |pin: PinId, waypoint: RouteWaypoint| {
        let element = match owning_gate_element(design, pin) {
            Some(e) => e,
            None => return,
        };
        if let RouteWaypoint::Qubit(qubit_id, true) = waypoint {
            if let Some(q) = fabric.qubit_by_global_index(qubit_id.as_raw()) {
                locals.entry((element, pin)).or_default().insert(q.local);
            }
        }
    };
    for target in &design.targets {
        let route = match &target.route {
            Some(r) => r,
            None => continue,
        };
        let waypoints = &route.waypoints;
        if waypoints.len() < 2 {
            continue;
        }
        record(target.source, waypoints[1]);
        record(target.sink, waypoints[waypoints.len() - 2]);
    }
    locals
}

/// The §4.6 "pin assignment within a cell" gadget: when two chains of the
/// same net enter one cell at distinct locals, ties them together with a
/// zero-cost (`J = -1.0`) in-cell chain instead of leaving the second
/// chain electrically disconnected from the pin's own gadget qubit.
/// Locals are visited in ascending order for a deterministic coupler set.
fn emit_in_cell_chain_gadgets(
    design: &Design,
    fabric: &Fabric,
    model: &mut IsingModel,
) -> Result<(), GenError> {
    let locals = entry_locals(design, fabric);
    let mut keys: Vec<(ElementId, PinId)> = locals.keys().copied().collect();
    keys.sort_by_key(|(element, pin)| (element.as_raw(), pin.as_raw()));

    for key @ (element_id, pin) in keys {
        let sorted: Vec<u32> = locals[&key].iter().copied().collect();
        if sorted.len() < 2 {
            continue;
        }
        let element = design.element(element_id);
        let (x, y) = cell_of(element)?;
        let primary = element.pin_local(pin);
        let origin = format!("pin {pin} in-cell chain at ({x},{y})");

        for &local in &sorted {
            if Some(local) != primary {
                emit_pin_bias(model, fabric, x, y, local, 0.0, &origin)?;
            }
        }
        for pair in sorted.windows(2) {
            emit_cross_coupler(model, fabric, x, y, pair[0], pair[1], -1.0, &origin)?;
        }
    }
    Ok(())
}

/// Walks every placed element and every routed target, emitting the
/// complete Ising model for the design.
pub fn generate(design: &Design, fabric: &Fabric) -> Result<IsingModel, GenError> {
    let mut model = IsingModel::new();

    for element in &design.elements {
        match element.kind {
            ElementKind::Gate(gate_id) => {
                let gate = design.gate(gate_id);
                match gate.func {
                    GateFunc::And | GateFunc::Or => {
                        emit_two_input_gate(design, fabric, &mut model, gate, element)?
                    }
                    GateFunc::Buf => emit_buf_gate(design, fabric, &mut model, gate, element)?,
                }
            }
            ElementKind::ModelPin(_) => {
                emit_model_pin_anchor(design, fabric, &mut model, element)?;
            }
        }
    }

    emit_chain_gadgets(design, fabric, &mut model)?;
    emit_in_cell_chain_gadgets(design, fabric, &mut model)?;

    Ok(model)
}
