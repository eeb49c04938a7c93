//! Common result and error types for internal-bug-class failures.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a precondition violation or broken invariant — a bug
/// in the place-and-route pipeline, not a problem with the user's
/// design. User-facing design/routing/gadget failures are reported
/// through [`qpar_diag::DiagnosticSink`](../qpar_diag/struct.DiagnosticSink.html)
/// and the higher-level `QparError` in the CLI crate.
pub type QparResult<T> = Result<T, InternalError>;

/// An internal error indicating a broken invariant, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of what invariant was violated.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
