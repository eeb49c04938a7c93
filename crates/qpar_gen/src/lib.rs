//! The Hamiltonian generator: converts a placed+routed design into an Ising
//! model realizing every gate as a gadget over the Chimera fabric (spec
//! §4.6).

#![warn(missing_docs)]

pub mod error;
pub mod gadget;
pub mod model;

pub use error::GenError;
pub use gadget::generate;
pub use model::IsingModel;
