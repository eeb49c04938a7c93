//! Opaque ID newtypes shared across the place-and-route pipeline.
//!
//! Every entity that lives in an arena (fabric qubits/couplers, design
//! gates/nets/pins/elements/wires/targets, routing-graph nodes) is
//! addressed by one of these thin `u32` wrappers rather than by pointer.
//! They are `Copy`, `Hash`, and `Serialize`/`Deserialize` so they can sit
//! in `HashMap` keys and round-trip through the placement/route dumps.

use serde::{Deserialize, Serialize};

/// Defines an opaque, copyable `u32`-backed ID type.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize)]
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
    /// Opaque ID for a qubit in the Chimera fabric.
    QubitId
);

define_id!(
    /// Opaque ID for a coupler in the Chimera fabric.
    CouplerId
);
