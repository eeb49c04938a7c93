//! Opaque ID newtypes for design-netlist entities.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a gate in the design.
    GateId
);

define_id!(
    /// Opaque, copyable ID for a net in the design.
    NetId
);

define_id!(
    /// Opaque, copyable ID for a pin (gate pin or model pin) in the design.
    PinId
);

define_id!(
    /// Opaque, copyable ID for a placement/routing element.
    ElementId
);

define_id!(
    /// Opaque, copyable ID for a wire (the routable form of a multi-element net).
    WireId
);

define_id!(
    /// Opaque, copyable ID for a routing target (one source/sink pin pair).
    TargetId
);
