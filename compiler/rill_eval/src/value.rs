//! Runtime values for the Rill evaluator.

use std::fmt;
use std::rc::Rc;

use rill_ir::{FunId, Name, StringInterner};

use crate::environment::EnvRef;

/// Runtime value.
///
/// Matched exhaustively wherever a value is consumed.
#[derive(Clone)]
pub enum Value {
    /// Number value (all Rill numbers are f64).
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Immutable shared string.
    Str(Rc<str>),
    /// Function value with its captured environment.
    Closure(Rc<Closure>),
    /// The absence of a value; result of a call that never `return`s.
    Nil,
}

/// A function value.
///
/// Pairs the function declaration (by arena id) with the environment
/// that was active at the point of definition. The environment handle
/// is shared, not copied: mutations made through the closure are
/// visible to the defining scope and vice versa.
pub struct Closure {
    /// Declaration in the AST arena.
    pub fun: FunId,
    /// Declared name, for rendering and arity errors.
    pub name: Name,
    /// Environment captured at definition.
    pub env: EnvRef,
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Create a closure value.
    #[inline]
    pub fn closure(closure: Closure) -> Self {
        Value::Closure(Rc::new(closure))
    }

    /// Kind name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Closure(_) => "function",
            Value::Nil => "nil",
        }
    }

    /// Branch-condition truthiness: `false` and `nil` are falsey,
    /// everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Render for the `print` statement.
    ///
    /// Numbers use conventional decimal rendering with no trailing
    /// artifacts for integral values (`55`, not `55.0`). Closures render
    /// as `<fn name>`, which needs the interner for the name.
    pub fn display(&self, interner: &StringInterner) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Closure(c) => format!("<fn {}>", interner.resolve(c.name)),
            Value::Nil => "nil".to_string(),
        }
    }
}

/// Value equality for `==`/`!=`.
///
/// Values of different kinds are never equal; closures are equal only
/// when they are the same closure instance.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Nil, Value::Nil) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            // Deliberately omits the captured environment: it may
            // contain this closure and recurse.
            Value::Closure(c) => write!(f, "Closure({:?})", c.name),
            Value::Nil => write!(f, "Nil"),
        }
    }
}
