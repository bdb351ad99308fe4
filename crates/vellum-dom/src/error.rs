//! DOM structural errors
//!
//! Illegal structural operations are signalled synchronously to the caller
//! with a fixed DOM exception code. Recoverable parse/serialize conditions
//! go through the Load/Save error handler channel instead (see `vellum-ls`).

use thiserror::Error;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors, each carrying its DOM exception code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Insertion would violate tree structure (cycle, wrong container, ...)
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),

    /// Node belongs to a different document
    #[error("wrong document: {0}")]
    WrongDocument(String),

    /// Name contains characters illegal in this context
    #[error("invalid character: {0}")]
    InvalidCharacter(String),

    /// Mutation of a read-only object
    #[error("no modification allowed: {0}")]
    NoModificationAllowed(String),

    /// Referenced node is not where the operation expects it
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation outside the modeled subset
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Object is in the wrong state for the call (e.g. re-initializing a
    /// dispatched event)
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Malformed selector or media text
    #[error("syntax error: {0}")]
    Syntax(String),
}

impl DomError {
    /// The fixed DOM exception code for this error.
    pub fn code(&self) -> u16 {
        match self {
            Self::HierarchyRequest(_) => 3,
            Self::WrongDocument(_) => 4,
            Self::InvalidCharacter(_) => 5,
            Self::NoModificationAllowed(_) => 7,
            Self::NotFound(_) => 8,
            Self::NotSupported(_) => 9,
            Self::InvalidState(_) => 11,
            Self::Syntax(_) => 12,
        }
    }
}
