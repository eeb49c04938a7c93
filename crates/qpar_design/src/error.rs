//! Design-construction error kinds (spec error category "Design error").

use crate::ids::{GateId, NetId};

/// A design-modeling error: malformed input that prevents a valid [`crate::Design`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum DesignError {
    /// A net refers to a pin name that does not exist anywhere in the design.
    #[error("net {net:?} references unknown pin {pin_name:?}")]
    DanglingNet {
        /// The net with the dangling reference, if already constructed.
        net: Option<NetId>,
        /// The pin name that could not be resolved.
        pin_name: String,
    },
    /// A gate was given more input pins than its function accepts.
    #[error("gate {gate_name:?} has {count} inputs, but its function accepts at most {max}")]
    TooManyInputs {
        /// The offending gate's name.
        gate_name: String,
        /// How many input pins were supplied.
        count: usize,
        /// The function's maximum accepted input count.
        max: usize,
    },
    /// A gate's function name did not match any known {AND, OR, BUF} function.
    #[error("gate {gate_name:?} has unknown function {func_name:?}")]
    UnknownGateType {
        /// The offending gate's name.
        gate_name: String,
        /// The unrecognized function name.
        func_name: String,
    },
    /// A net has no source pin.
    #[error("net {net_name:?} has no source pin")]
    MissingSource {
        /// The offending net's name.
        net_name: String,
    },
}
