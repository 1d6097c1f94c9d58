//! Parse error types.

use std::fmt;

use rill_ir::{Span, TokenKind};

/// Categorizes the different kinds of parse errors.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// Found a token other than the expected one.
    UnexpectedToken {
        /// What the parser was looking for, e.g. "`;`" or "expression".
        expected: &'static str,
        found: TokenKind,
    },
    /// Left side of `=` is not assignable (only plain names are).
    InvalidAssignmentTarget,
    /// More parameters than a function can declare.
    TooManyParameters { limit: usize },
    /// More arguments than a call can carry.
    TooManyArguments { limit: usize },
}

/// Parse error with location.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::InvalidAssignmentTarget => {
                write!(f, "invalid assignment target")
            }
            ParseErrorKind::TooManyParameters { limit } => {
                write!(f, "functions are limited to {limit} parameters")
            }
            ParseErrorKind::TooManyArguments { limit } => {
                write!(f, "calls are limited to {limit} arguments")
            }
        }
    }
}

impl std::error::Error for ParseError {}
