//! Construction of a [`crate::Design`] from a front-end-neutral netlist
//! description.
//!
//! Parsing the synthesis front-end's own file format (BLIF) is explicitly
//! out of scope for this system; a front end is expected to hand over a
//! [`NetlistSpec`] (gates, nets, model pins) built from whatever concrete
//! syntax it reads.

use crate::element::{Element, ElementKind};
use crate::error::DesignError;
use crate::gate::{Gate, GateFunc, Phase, Pin, PinRole};
use crate::ids::{ElementId, GateId, NetId, PinId, TargetId, WireId};
use crate::net::Net;
use crate::target::Target;
use crate::wire::Wire;
use crate::Design;
use qpar_common::Checkpoint;
use std::collections::HashMap;

/// One input pin of a gate, in the front-end-neutral description.
#[derive(Debug, Clone)]
pub struct GateInputSpec {
    /// The pin's name, referenced by nets.
    pub name: String,
    /// The pin's phase: `"+"` (or `"pos"`) for POS_UNATE, `"-"` (or `"neg"`) for NEG_UNATE.
    pub phase: String,
}

/// A gate, in the front-end-neutral description.
#[derive(Debug, Clone)]
pub struct GateSpec {
    /// The gate's instance name.
    pub name: String,
    /// The gate's function name: `"AND"`, `"OR"`, or `"BUF"` (case-insensitive).
    pub func: String,
    /// The gate's input pins.
    pub inputs: Vec<GateInputSpec>,
    /// The gate's output pin name.
    pub output: String,
}

/// A net, in the front-end-neutral description.
#[derive(Debug, Clone)]
pub struct NetSpec {
    /// The net's name.
    pub name: String,
    /// The name of the driving pin (must resolve to a gate pin or model pin).
    pub source: String,
    /// The names of the driven pins.
    pub sinks: Vec<String>,
}

/// A complete front-end-neutral netlist description.
#[derive(Debug, Clone, Default)]
pub struct NetlistSpec {
    /// All gates in the design.
    pub gates: Vec<GateSpec>,
    /// All nets in the design.
    pub nets: Vec<NetSpec>,
    /// Names of all model (boundary) pins.
    pub model_pins: Vec<String>,
}

fn parse_func(s: &str) -> Option<GateFunc> {
    match s.to_ascii_uppercase().as_str() {
        "AND" => Some(GateFunc::And),
        "OR" => Some(GateFunc::Or),
        "BUF" => Some(GateFunc::Buf),
        _ => None,
    }
}

fn element_of_pin(
    pins: &[Pin],
    element_of_gate: &HashMap<GateId, ElementId>,
    element_of_model_pin: &HashMap<PinId, ElementId>,
    pin: PinId,
) -> Option<ElementId> {
    match pins[pin.as_raw() as usize].role {
        PinRole::GateInput { gate, .. } | PinRole::GateOutput { gate } => {
            element_of_gate.get(&gate).copied()
        }
        PinRole::Model => element_of_model_pin.get(&pin).copied(),
    }
}

fn parse_phase(s: &str) -> Phase {
    match s.trim() {
        "-" => Phase::NegUnate,
        s if s.eq_ignore_ascii_case("neg") || s.eq_ignore_ascii_case("neg_unate") => {
            Phase::NegUnate
        }
        _ => Phase::PosUnate,
    }
}

impl Design {
    /// Builds a [`Design`] from a front-end-neutral netlist description.
    ///
    /// Creates gates and their pins, registers model pins, and links nets
    /// by resolved pin name. Does not yet derive elements/wires/targets —
    /// call [`Design::derive_placement_model`] for that once construction
    /// succeeds.
    pub fn from_spec(spec: &NetlistSpec) -> Result<Design, DesignError> {
        let mut design = Design::new();
        let mut pin_by_name: HashMap<String, PinId> = HashMap::new();

        for gate_spec in &spec.gates {
            let func = parse_func(&gate_spec.func).ok_or_else(|| DesignError::UnknownGateType {
                gate_name: gate_spec.name.clone(),
                func_name: gate_spec.func.clone(),
            })?;
            let max = func.max_inputs();
            if gate_spec.inputs.len() > max {
                return Err(DesignError::TooManyInputs {
                    gate_name: gate_spec.name.clone(),
                    count: gate_spec.inputs.len(),
                    max,
                });
            }

            let gate_id = GateId::from_raw(design.gates.len() as u32);
            let output_id = design.add_pin(Pin {
                id: PinId::from_raw(0),
                name: gate_spec.output.clone(),
                role: PinRole::GateOutput { gate: gate_id },
            });
            pin_by_name.insert(gate_spec.output.clone(), output_id);

            let mut input_ids = Vec::with_capacity(gate_spec.inputs.len());
            for (index, input) in gate_spec.inputs.iter().enumerate() {
                let phase = parse_phase(&input.phase);
                let pin_id = design.add_pin(Pin {
                    id: PinId::from_raw(0),
                    name: input.name.clone(),
                    role: PinRole::GateInput {
                        gate: gate_id,
                        index: index as u8,
                        phase,
                    },
                });
                pin_by_name.insert(input.name.clone(), pin_id);
                input_ids.push(pin_id);
            }

            design.add_gate(Gate {
                id: gate_id,
                name: gate_spec.name.clone(),
                func,
                inputs: input_ids,
                output: output_id,
            });
        }

        for name in &spec.model_pins {
            if pin_by_name.contains_key(name) {
                continue;
            }
            let pin_id = design.add_pin(Pin {
                id: PinId::from_raw(0),
                name: name.clone(),
                role: PinRole::Model,
            });
            pin_by_name.insert(name.clone(), pin_id);
        }

        for net_spec in &spec.nets {
            let source = *pin_by_name
                .get(&net_spec.source)
                .ok_or_else(|| DesignError::DanglingNet {
                    net: None,
                    pin_name: net_spec.source.clone(),
                })?;
            let mut sinks = Vec::with_capacity(net_spec.sinks.len());
            for sink_name in &net_spec.sinks {
                let pin = *pin_by_name
                    .get(sink_name)
                    .ok_or_else(|| DesignError::DanglingNet {
                        net: None,
                        pin_name: sink_name.clone(),
                    })?;
                sinks.push(pin);
            }
            let net_id = NetId::from_raw(design.nets.len() as u32);
            design.add_net(Net {
                id: net_id,
                name: net_spec.name.clone(),
                source,
                sinks,
            });
        }

        Ok(design)
    }

    /// Derives elements, wires, and targets from the already-built gates,
    /// pins, and nets. Idempotent: safe to call once after construction.
    pub fn derive_placement_model(&mut self) -> Result<(), DesignError> {
        let mut element_of_gate: HashMap<GateId, ElementId> = HashMap::new();
        let mut element_of_model_pin: HashMap<PinId, ElementId> = HashMap::new();

        for gate in &self.gates {
            let element_id = ElementId::from_raw(self.elements.len() as u32);
            let mut element = Element::new(
                element_id,
                format!("{}", gate.name),
                ElementKind::Gate(gate.id),
                true,
            );
            // Every gate pin defaults to a distinct local, respecting the
            // input-left/output-right column convention, so the generator
            // always has a local to build its gadget from even for pins
            // whose wire never runs real inter-cell routing (a model wire,
            // or a wire anchored directly to an external model pin). Routing
            // overwrites this default with the real entry local wherever it
            // actually searches a chain through the pin.
            element.assign_pin_local(gate.output, 4);
            for (index, &input) in gate.inputs.iter().enumerate() {
                element.assign_pin_local(input, index as u32);
            }
            self.elements.push(element);
            element_of_gate.insert(gate.id, element_id);
        }

        for pin in &self.pins {
            if !pin.is_model() {
                continue;
            }
            let touched = self.nets.iter().any(|n| {
                n.source == pin.id || n.sinks.contains(&pin.id)
            });
            if !touched {
                continue;
            }
            let element_id = ElementId::from_raw(self.elements.len() as u32);
            self.elements.push(Element::new(
                element_id,
                pin.name.clone(),
                ElementKind::ModelPin(pin.id),
                false,
            ));
            element_of_model_pin.insert(pin.id, element_id);
        }

        let net_count = self.nets.len();
        for net_index in 0..net_count {
            let net = self.nets[net_index].clone();
            let source_pin = self.pin(net.source).clone();

            let mut touched_elements = Vec::new();
            if let Some(e) = element_of_pin(&self.pins, &element_of_gate, &element_of_model_pin, net.source)
            {
                touched_elements.push(e);
            }
            for &sink in &net.sinks {
                if let Some(e) =
                    element_of_pin(&self.pins, &element_of_gate, &element_of_model_pin, sink)
                {
                    if !touched_elements.contains(&e) {
                        touched_elements.push(e);
                    }
                }
            }

            let wire_id = WireId::from_raw(self.wires.len() as u32);
            let zero_bbox = crate::bbox::BBox {
                xl: 0,
                xr: 0,
                yt: 0,
                yb: 0,
            };
            let zero_edges = crate::bbox::EdgeCount {
                xl_cnt: touched_elements.len().max(1) as u32,
                xr_cnt: touched_elements.len().max(1) as u32,
                yt_cnt: touched_elements.len().max(1) as u32,
                yb_cnt: touched_elements.len().max(1) as u32,
            };
            self.wires.push(Wire {
                id: wire_id,
                net: net.id,
                elements: touched_elements.clone(),
                bbox: Checkpoint::new(zero_bbox),
                edge_count: Checkpoint::new(zero_edges),
            });

            if touched_elements.len() <= 1 {
                if let Some(&element_id) = touched_elements.first() {
                    // Gate elements already got a correct column-respecting
                    // default at construction time above; only model-pin
                    // elements (whose local is never read back for gadget
                    // emission) need one assigned here.
                    if matches!(self.element(element_id).kind, ElementKind::ModelPin(_)) {
                        self.element_mut(element_id).assign_pin_local(net.source, 0);
                    }
                }
                continue;
            }

            self.derive_targets_for_net(&net, &source_pin.role, wire_id);
        }

        Ok(())
    }

    fn derive_targets_for_net(&mut self, net: &Net, source_role: &PinRole, wire_id: WireId) {
        let sink_is_model: Vec<bool> = net.sinks.iter().map(|&s| self.pin(s).is_model()).collect();

        match source_role {
            PinRole::GateOutput { .. } => {
                for (i, &sink) in net.sinks.iter().enumerate() {
                    self.push_target(wire_id, net.source, sink, sink_is_model[i]);
                }
            }
            PinRole::Model => {
                let gate_sink_position = sink_is_model.iter().position(|&is_model| !is_model);
                match gate_sink_position {
                    Some(anchor_index) => {
                        let anchor = net.sinks[anchor_index];
                        self.push_target(wire_id, anchor, anchor, true);
                        for (i, &sink) in net.sinks.iter().enumerate() {
                            if i == anchor_index {
                                continue;
                            }
                            self.push_target(wire_id, anchor, sink, sink_is_model[i]);
                        }
                    }
                    None => {
                        for &sink in &net.sinks {
                            self.push_target(wire_id, net.source, sink, true);
                        }
                    }
                }
            }
            PinRole::GateInput { .. } => {
                // A net's source is always a gate output or a model pin
                // (gate inputs only sink); nothing to derive.
            }
        }
    }

    fn push_target(&mut self, wire_id: WireId, source: PinId, sink: PinId, dont_route: bool) {
        let id = TargetId::from_raw(self.targets.len() as u32);
        self.targets
            .push(Target::new(id, wire_id, source, sink, dont_route));
    }
}
