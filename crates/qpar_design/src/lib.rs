//! The design netlist: gates, nets, pins, and their derived placement and
//! routing model (elements, wires, targets).
//!
//! [`Design`] is an arena of vectors, addressed by the opaque ids in
//! [`ids`]. Construction happens in two steps: [`Design::from_spec`]
//! builds the logical netlist (gates/nets/pins) from a front-end-neutral
//! description, then [`Design::derive_placement_model`] derives the
//! physical placement/routing model (elements/wires/targets) from it.

#![warn(missing_docs)]

pub mod bbox;
pub mod builder;
pub mod element;
pub mod error;
pub mod gate;
pub mod ids;
pub mod net;
pub mod route;
pub mod target;
pub mod wire;

pub use builder::{GateInputSpec, GateSpec, NetSpec, NetlistSpec};
pub use element::{Element, ElementKind};
pub use error::DesignError;
pub use gate::{Gate, GateFunc, Phase, Pin, PinRole};
pub use ids::{ElementId, GateId, NetId, PinId, TargetId, WireId};
pub use net::Net;
pub use route::{RoutePath, RouteWaypoint};
pub use target::Target;
pub use wire::Wire;

/// The design netlist and its derived placement/routing model.
#[derive(Debug, Clone, Default)]
pub struct Design {
    /// All gates, indexed by [`GateId`].
    pub gates: Vec<Gate>,
    /// All nets, indexed by [`NetId`].
    pub nets: Vec<Net>,
    /// All pins (gate pins and model pins), indexed by [`PinId`].
    pub pins: Vec<Pin>,
    /// All placement/routing elements, indexed by [`ElementId`].
    pub elements: Vec<Element>,
    /// All wires, indexed by [`WireId`].
    pub wires: Vec<Wire>,
    /// All routing targets, indexed by [`TargetId`].
    pub targets: Vec<Target>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a gate, returning its id (the gate's own `id` field is trusted
    /// to already equal its intended index — see [`builder`]).
    pub(crate) fn add_gate(&mut self, gate: Gate) -> GateId {
        let id = gate.id;
        self.gates.push(gate);
        id
    }

    /// Adds a net, returning its id.
    pub(crate) fn add_net(&mut self, net: Net) -> NetId {
        let id = net.id;
        self.nets.push(net);
        id
    }

    /// Adds a pin, assigning it the next sequential [`PinId`].
    pub(crate) fn add_pin(&mut self, mut pin: Pin) -> PinId {
        let id = PinId::from_raw(self.pins.len() as u32);
        pin.id = id;
        self.pins.push(pin);
        id
    }

    /// Returns the gate with the given id.
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.as_raw() as usize]
    }

    /// Returns the net with the given id.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.as_raw() as usize]
    }

    /// Returns the pin with the given id.
    pub fn pin(&self, id: PinId) -> &Pin {
        &self.pins[id.as_raw() as usize]
    }

    /// Returns the element with the given id.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the element with the given id.
    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.as_raw() as usize]
    }

    /// Returns the wire with the given id.
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the wire with the given id.
    pub fn wire_mut(&mut self, id: WireId) -> &mut Wire {
        &mut self.wires[id.as_raw() as usize]
    }

    /// Returns the target with the given id.
    pub fn target(&self, id: TargetId) -> &Target {
        &self.targets[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the target with the given id.
    pub fn target_mut(&mut self, id: TargetId) -> &mut Target {
        &mut self.targets[id.as_raw() as usize]
    }

    /// Returns the wires that require routing (span more than one element
    /// and carry at least one non-`dont_route` target).
    pub fn routable_wires(&self) -> Vec<WireId> {
        self.wires
            .iter()
            .filter(|w| !w.is_model_wire())
            .filter(|w| {
                self.targets
                    .iter()
                    .any(|t| t.wire == w.id && !t.dont_route)
            })
            .map(|w| w.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GateInputSpec, GateSpec, NetSpec, NetlistSpec};

    #[test]
    fn empty_design() {
        let d = Design::new();
        assert_eq!(d.gates.len(), 0);
        assert_eq!(d.routable_wires().len(), 0);
    }

    #[test]
    fn routable_wires_excludes_model_only() {
        let spec = NetlistSpec {
            gates: vec![
                GateSpec {
                    name: "inv1".into(),
                    func: "BUF".into(),
                    inputs: vec![GateInputSpec {
                        name: "x".into(),
                        phase: "+".into(),
                    }],
                    output: "m".into(),
                },
                GateSpec {
                    name: "inv2".into(),
                    func: "BUF".into(),
                    inputs: vec![GateInputSpec {
                        name: "m2".into(),
                        phase: "+".into(),
                    }],
                    output: "z".into(),
                },
            ],
            nets: vec![
                NetSpec {
                    name: "n_mid".into(),
                    source: "m".into(),
                    sinks: vec!["m2".into()],
                },
                NetSpec {
                    name: "n_x".into(),
                    source: "x".into(),
                    sinks: vec![],
                },
                NetSpec {
                    name: "n_z".into(),
                    source: "z".into(),
                    sinks: vec![],
                },
            ],
            model_pins: vec!["x".into(), "z".into()],
        };
        let mut design = Design::from_spec(&spec).unwrap();
        design.derive_placement_model().unwrap();
        assert_eq!(design.routable_wires().len(), 1);
    }
}
