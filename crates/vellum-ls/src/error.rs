//! Severity-graded error channel for Load/Save
//!
//! Recoverable and advisory conditions during parse/serialize are delivered
//! to an optionally-registered [`ErrorHandler`] instead of being raised to
//! the caller. When no handler is registered the condition is swallowed;
//! the operation still reports failure through its return value (`None`
//! from a parse, `false` from a write). Fatal conditions never panic and
//! never propagate as `Err`.

use thiserror::Error;

/// How bad a reported condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LsSeverity {
    /// Advisory; processing continues
    Warning,
    /// The operation cannot produce a result but processing was orderly
    Error,
    /// The operation aborted
    FatalError,
}

impl std::fmt::Display for LsSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::FatalError => "fatal error",
        })
    }
}

/// A condition reported through the handler channel.
///
/// `kind` is a short machine-readable string (`"no-input-specified"`,
/// `"malformed-xml"`, `"unsupported-encoding"`, ...); `message` is for
/// humans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{severity}: {kind}: {message}")]
pub struct LsError {
    pub severity: LsSeverity,
    pub kind: String,
    pub message: String,
}

impl LsError {
    pub fn new(severity: LsSeverity, kind: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

/// Receiver for parse/serialize conditions.
///
/// The return value asks to continue processing where that is possible;
/// fatal conditions abort regardless.
pub trait ErrorHandler {
    fn handle(&mut self, error: &LsError) -> bool;
}

/// Handler that records everything it sees. Used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    pub errors: Vec<LsError>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds of all recorded conditions, in report order.
    pub fn kinds(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.kind.as_str()).collect()
    }

    pub fn has_fatal(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == LsSeverity::FatalError)
    }
}

impl ErrorHandler for CollectingHandler {
    fn handle(&mut self, error: &LsError) -> bool {
        self.errors.push(error.clone());
        true
    }
}

/// Lets a caller keep a handle on the handler it registered (the parser
/// and serializer take their handler boxed and owned).
impl<H: ErrorHandler> ErrorHandler for std::rc::Rc<std::cell::RefCell<H>> {
    fn handle(&mut self, error: &LsError) -> bool {
        self.borrow_mut().handle(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_kind_and_message() {
        let err = LsError::new(LsSeverity::FatalError, "no-input-specified", "nothing to read");
        assert_eq!(err.to_string(), "fatal error: no-input-specified: nothing to read");
    }

    #[test]
    fn test_collecting_handler_records_in_order() {
        let mut handler = CollectingHandler::new();
        assert!(handler.handle(&LsError::new(LsSeverity::Warning, "a", "")));
        assert!(handler.handle(&LsError::new(LsSeverity::FatalError, "b", "")));
        assert_eq!(handler.kinds(), vec!["a", "b"]);
        assert!(handler.has_fatal());
    }
}
