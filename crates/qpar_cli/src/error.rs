//! The CLI-level error type: every fatal condition spec §7 names, wrapping
//! each crate's own error type or naming a precondition directly.

use crate::netlist::NetlistSyntaxError;
use qpar_design::DesignError;
use qpar_gen::GenError;
use qpar_pnr::PnrError;

/// A fatal error aborting the current command. Exit code is non-zero
/// whenever a command returns one of these (spec §6.1).
#[derive(Debug, thiserror::Error)]
pub enum QparError {
    /// A command ran before its required prior state existed.
    #[error("precondition violation: {0}")]
    Precondition(String),
    /// The netlist source text was malformed.
    #[error(transparent)]
    NetlistSyntax(#[from] NetlistSyntaxError),
    /// The netlist described an invalid design.
    #[error(transparent)]
    Design(#[from] DesignError),
    /// Placement or routing failed.
    #[error(transparent)]
    Pnr(#[from] PnrError),
    /// Hamiltonian generation failed.
    #[error(transparent)]
    Gen(#[from] GenError),
    /// An input or output file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QparError {
    /// A command invoked with no design loaded.
    pub fn no_design() -> Self {
        Self::Precondition("no design loaded; run build_qpar_nl first".into())
    }

    /// `init_system` invoked with no fabric built.
    pub fn no_fabric() -> Self {
        Self::Precondition("no fabric loaded".into())
    }

    /// A command invoked before `init_system`.
    pub fn not_initialized() -> Self {
        Self::Precondition("design not initialized; run init_system first".into())
    }

    /// `route` invoked before `place`.
    pub fn not_placed() -> Self {
        Self::Precondition("design not placed; run place first".into())
    }

    /// `generate` invoked before `route`.
    pub fn not_routed() -> Self {
        Self::Precondition("design not routed; run route first".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_messages_are_descriptive() {
        assert!(format!("{}", QparError::no_design()).contains("build_qpar_nl"));
        assert!(format!("{}", QparError::not_placed()).contains("place"));
    }
}
