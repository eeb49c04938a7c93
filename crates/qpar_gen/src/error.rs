//! Generator error kinds (spec error category "Gadget conflict" plus the
//! precondition failures a malformed placed design can trigger).

/// A failure while assembling the Ising model from a placed+routed design.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenError {
    /// Two gadgets wrote different linear biases to the same qubit.
    #[error("conflicting bias for qubit {qubit}: {first} ({first_origin}) vs {second} ({second_origin})")]
    QubitBiasConflict {
        /// The qubit's global index.
        qubit: u32,
        /// The first value written.
        first: f64,
        /// Where the first value came from.
        first_origin: String,
        /// The second, disagreeing value.
        second: f64,
        /// Where the second value came from.
        second_origin: String,
    },
    /// Two gadgets wrote different coupler weights to the same pair.
    #[error("conflicting coupler weight for ({a},{b}): {first} ({first_origin}) vs {second} ({second_origin})")]
    CouplerConflict {
        /// The lower-indexed endpoint (canonical order).
        a: u32,
        /// The higher-indexed endpoint (canonical order).
        b: u32,
        /// The first value written.
        first: f64,
        /// Where the first value came from.
        first_origin: String,
        /// The second, disagreeing value.
        second: f64,
        /// Where the second value came from.
        second_origin: String,
    },
    /// Two gadgets disagreed on a qubit's expected ground-state spin.
    #[error("conflicting ground spin for qubit {qubit}: {first} ({first_origin}) vs {second} ({second_origin})")]
    GroundSpinConflict {
        /// The qubit's global index.
        qubit: u32,
        /// The first spin written.
        first: i8,
        /// Where the first value came from.
        first_origin: String,
        /// The second, disagreeing spin.
        second: i8,
        /// Where the second value came from.
        second_origin: String,
    },
    /// A gate pin has no fabric local assigned; the design was not routed
    /// (or `derive_placement_model` was skipped) before generation.
    #[error("gate {gate_name:?} has a pin with no fabric local assigned")]
    MissingPinLocal {
        /// The offending gate's name.
        gate_name: String,
    },
    /// A gate element has no placement; the design was not placed before
    /// generation.
    #[error("gate {gate_name:?} has not been placed")]
    MissingPlacement {
        /// The offending gate's name.
        gate_name: String,
    },
}
