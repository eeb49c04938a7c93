//! A single structured diagnostic message.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic emitted by the placer, router, or generator.
///
/// Unlike a source-language compiler's diagnostics, there is no source
/// text to annotate here — the design arrives pre-parsed (spec.md §6.2
/// places BLIF parsing out of scope) — so a diagnostic is just a
/// severity, a stable code, and a message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The stable code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Creates a new informational diagnostic.
    pub fn info(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Route, 20);
        let diag = Diagnostic::error(code, "unroutable design");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "unroutable design");
    }

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Route, 21);
        let diag = Diagnostic::warning(code, "congestion resolved late");
        assert_eq!(diag.severity, Severity::Warning);
    }
}
