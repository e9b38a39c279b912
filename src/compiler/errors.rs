use crate::types::word::LiteralError;
use callc_derive::Error;
use std::io;

/// What went wrong while compiling one instruction line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Fewer than an address and a signature on the line.
    #[error("invalid syntax: {0}")]
    Syntax(String),
    /// Call target or `address` argument is not 40 hex digits.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// Signature is not `name(type,...)`.
    #[error("invalid function signature: {0}")]
    InvalidFunctionSignature(String),
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    /// Type tag outside `address`, `uint256`, `uint`, `bytes32`.
    #[error("unsupported type: {0:?}")]
    UnsupportedType(String),
    #[error("invalid numeric literal {token:?}: {reason}")]
    NumericLiteral { token: String, reason: LiteralError },
    #[error("invalid bytes32 literal {token:?}: {reason}")]
    InvalidBytes32 { token: String, reason: LiteralError },
}

/// Errors returned by a compile pass.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Error tied to a source position (1-based line and column).
    #[error("line {line}: {kind}")]
    Source {
        line: usize,
        column: usize,
        kind: ErrorKind,
    },
    /// Reading the source or writing the output failed.
    #[error("io error on {path}: {source}")]
    Io { path: String, source: io::Error },
}

impl CompileError {
    pub(crate) fn at(line: usize, column: usize, kind: ErrorKind) -> Self {
        CompileError::Source { line, column, kind }
    }

    /// The error category, if this error came from the source text.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            CompileError::Source { kind, .. } => Some(kind),
            CompileError::Io { .. } => None,
        }
    }

    /// The 1-based `(line, column)` of the error, if any.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            CompileError::Source { line, column, .. } => Some((*line, *column)),
            CompileError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ErrorKind::ArgumentCountMismatch {
                expected: 2,
                actual: 1
            }
            .to_string(),
            "argument count mismatch: expected 2, got 1"
        );
        assert_eq!(
            ErrorKind::UnsupportedType("bool".into()).to_string(),
            "unsupported type: \"bool\""
        );
        assert_eq!(
            ErrorKind::NumericLiteral {
                token: "-5".into(),
                reason: LiteralError::Negative
            }
            .to_string(),
            "invalid numeric literal \"-5\": negative values are not allowed"
        );
    }

    #[test]
    fn source_error_carries_line() {
        let err = CompileError::at(3, 7, ErrorKind::Syntax("foo".into()));
        assert_eq!(err.to_string(), "line 3: invalid syntax: foo");
        assert_eq!(err.location(), Some((3, 7)));
        assert_eq!(err.kind(), Some(&ErrorKind::Syntax("foo".into())));
    }

    #[test]
    fn io_error_has_no_location() {
        let err = CompileError::Io {
            path: "a.call".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "io error on a.call: not found");
        match &err {
            CompileError::Io { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
        assert_eq!(err.location(), None);
        assert_eq!(err.kind(), None);
    }
}
