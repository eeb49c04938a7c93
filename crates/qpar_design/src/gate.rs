//! Gates and pins.

use crate::ids::{GateId, PinId};
use serde::{Deserialize, Serialize};

/// The Boolean function a gate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateFunc {
    /// Logical AND of its (at most 2) inputs.
    And,
    /// Logical OR of its (at most 2) inputs.
    Or,
    /// Buffer/inverter: a single input, passed through under its phase.
    Buf,
}

impl GateFunc {
    /// The maximum number of input pins this function accepts.
    pub fn max_inputs(self) -> usize {
        match self {
            GateFunc::And | GateFunc::Or => 2,
            GateFunc::Buf => 1,
        }
    }
}

/// The polarity of an input pin relative to the gate's logical function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Positive unate: the gate's output tracks the input directly.
    PosUnate,
    /// Negative unate: the gate's output tracks the input's complement.
    NegUnate,
}

/// What a pin is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinRole {
    /// An input pin of a gate, at the given input index, under the given phase.
    GateInput {
        /// The owning gate.
        gate: GateId,
        /// Index into the gate's input list (0 or 1).
        index: u8,
        /// The pin's phase relative to the gate function.
        phase: Phase,
    },
    /// The output pin of a gate.
    GateOutput {
        /// The owning gate.
        gate: GateId,
    },
    /// A model pin: an external boundary connection with no gate behind it.
    Model,
}

/// A single pin, either belonging to a gate or standing alone as a model pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// The unique ID of this pin.
    pub id: PinId,
    /// Human-readable pin name.
    pub name: String,
    /// What this pin is attached to.
    pub role: PinRole,
}

impl Pin {
    /// Whether this pin is a model (boundary) pin.
    pub fn is_model(&self) -> bool {
        matches!(self.role, PinRole::Model)
    }

    /// Whether this pin is a gate's output pin.
    pub fn is_gate_output(&self) -> bool {
        matches!(self.role, PinRole::GateOutput { .. })
    }
}

/// A logic gate: at most two input pins, one output pin, a Boolean function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    /// The unique ID of this gate.
    pub id: GateId,
    /// Human-readable gate name.
    pub name: String,
    /// The Boolean function this gate implements.
    pub func: GateFunc,
    /// Input pins, in index order (length ≤ `func.max_inputs()`).
    pub inputs: Vec<PinId>,
    /// The single output pin.
    pub output: PinId,
}
