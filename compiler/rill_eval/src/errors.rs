//! Evaluation errors and control-flow signals.
//!
//! `EvalErrorKind` provides typed error categories; factory functions
//! (e.g. [`undefined_variable`]) are the public construction API and
//! populate both `kind` and `message`.
//!
//! `return` is not an error, but it unwinds the same way one does: the
//! evaluator's statement path carries a [`ControlAction`] in the `Err`
//! channel, and the function-call boundary converts `Return` back into
//! the call's result value.

use std::fmt;

use rill_ir::{BinaryOp, Span, UnaryOp};

use crate::value::Value;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Lookup of, or assignment to, a name with no binding in scope.
    UndefinedVariable { name: String },
    /// Call expression applied to a non-function value.
    NotCallable { type_name: &'static str },
    /// Call with the wrong number of arguments.
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Binary operator applied to operands of unsupported types.
    UnsupportedOperands { op: BinaryOp },
    /// Unary operator applied to an operand of unsupported type.
    UnsupportedUnaryOperand { op: UnaryOp },
    /// Call depth exceeded the configured limit.
    StackOverflow { limit: usize },
    /// `return` executed outside any function.
    ReturnOutsideFunction,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::UnsupportedOperands { op: BinaryOp::Add } => {
                write!(f, "operands to `+` must be two numbers or two strings")
            }
            Self::UnsupportedOperands { op } => {
                write!(f, "operands to `{}` must be numbers", op.as_symbol())
            }
            Self::UnsupportedUnaryOperand { op } => {
                write!(f, "operand to `{}` must be a number", op.as_symbol())
            }
            Self::StackOverflow { limit } => {
                write!(f, "maximum recursion depth exceeded (limit: {limit})")
            }
            Self::ReturnOutsideFunction => write!(f, "`return` outside of a function"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Source location, when one is known.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// Signal propagated through the `Err` channel of statement execution.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// A `return` statement unwinding to the nearest call boundary.
    Return(Value),
    /// An evaluation error unwinding to the top-level driver.
    Error(EvalError),
}

impl ControlAction {
    /// Attach `span` if this is an error that doesn't have one yet.
    ///
    /// Keeps the innermost (most precise) location when one was already
    /// recorded at the failure site.
    #[must_use]
    pub fn with_span_if_error(self, span: Span) -> Self {
        match self {
            ControlAction::Error(err) if err.span.is_none() => {
                ControlAction::Error(err.with_span(span))
            }
            other => other,
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

// Error constructors

/// Lookup of, or assignment to, an unbound name.
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// Call applied to a non-function value.
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

/// Call with the wrong number of arguments.
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Binary operator applied to unsupported operand types.
pub fn unsupported_operands(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperands { op })
}

/// Unary operator applied to an unsupported operand type.
pub fn unsupported_unary_operand(op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedUnaryOperand { op })
}

/// Call depth exceeded the configured limit.
pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { limit })
}

/// `return` executed outside any function.
pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}
