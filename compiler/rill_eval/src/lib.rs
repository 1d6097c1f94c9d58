//! Rill Eval - tree-walking evaluator.
//!
//! The evaluator walks the [`rill_ir::Ast`] arena against a chain of
//! shared-ownership environments:
//!
//! - [`Env`]/[`EnvRef`]: parent-linked scopes with shared mutable slots
//! - [`Value`]: the runtime value sum type, including closures that
//!   capture their defining environment by reference
//! - [`Interpreter`]: statement/expression evaluation, call frames,
//!   recursion limit, print sink
//!
//! # Example
//!
//! ```
//! use rill_ir::StringInterner;
//! use rill_parse::{parse, tokenize};
//! use rill_eval::{buffer_handler, InterpreterBuilder};
//!
//! let interner = StringInterner::new();
//! let tokens = tokenize("print(1 + 2);", &interner).unwrap();
//! let ast = parse(&tokens).unwrap();
//! let handler = buffer_handler();
//! let mut interpreter = InterpreterBuilder::new(&interner, &ast)
//!     .print_handler(handler.clone())
//!     .build();
//! interpreter.run().unwrap();
//! assert_eq!(handler.get_output(), "3\n");
//! ```

mod call_stack;
mod environment;
pub mod errors;
mod interpreter;
mod print_handler;
mod stack;
mod value;

pub use call_stack::{CallStack, DEFAULT_MAX_DEPTH};
pub use environment::{Env, EnvRef, LocalCell, UnboundAssign};
pub use errors::{ControlAction, EvalError, EvalErrorKind};

// Error constructors (canonical path is rill_eval::errors::*)
pub use errors::{
    arity_mismatch, not_callable, return_outside_function, stack_overflow, undefined_variable,
    unsupported_operands, unsupported_unary_operand,
};

pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{Closure, Value};
