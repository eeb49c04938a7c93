//! Shared types for the quantum-annealing place-and-route compiler.
//!
//! Holds the opaque ID newtype pattern used by every arena in the
//! pipeline (fabric, design, routing graph) and the internal result
//! type for precondition/invariant-class failures.

#![warn(missing_docs)]

pub mod checkpoint;
pub mod ids;
pub mod result;

pub use checkpoint::Checkpoint;
pub use ids::{CouplerId, QubitId};
pub use result::{InternalError, QparResult};
