//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; does not affect the outcome of the command.
    Info,
    /// A non-fatal issue (e.g. router non-convergence before the cap).
    Warning,
    /// A fatal issue that aborts the current command.
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality() {
        assert_eq!(Severity::Error, Severity::Error);
        assert_ne!(Severity::Error, Severity::Warning);
    }
}
