//! `InterpreterBuilder` for creating `Interpreter` instances.

use rill_ir::{Ast, StringInterner};

use super::Interpreter;
use crate::call_stack::{CallStack, DEFAULT_MAX_DEPTH};
use crate::environment::{Env, EnvRef};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating `Interpreter` instances with various
/// configurations.
///
/// Defaults: stdout print handler, [`DEFAULT_MAX_DEPTH`] call depth.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    ast: &'a Ast,
    print_handler: Option<SharedPrintHandler>,
    max_depth: Option<usize>,
}

impl<'a> InterpreterBuilder<'a> {
    /// Create a new builder.
    pub fn new(interner: &'a StringInterner, ast: &'a Ast) -> Self {
        InterpreterBuilder {
            interner,
            ast,
            print_handler: None,
            max_depth: None,
        }
    }

    /// Set the print handler for the `print` statement.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the call depth limit.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Build the interpreter.
    ///
    /// Creates the root environment; it lives exactly as long as the
    /// interpreter (or any closure still holding a handle into it).
    pub fn build(self) -> Interpreter<'a> {
        let globals: EnvRef = EnvRef::new(Env::new());
        Interpreter {
            interner: self.interner,
            ast: self.ast,
            env: globals.clone(),
            globals,
            call_stack: CallStack::new(self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}
