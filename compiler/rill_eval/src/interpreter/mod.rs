//! Tree-walking interpreter for Rill.
//!
//! Evaluates the flat AST arena against the environment chain.
//! Statement execution returns `Result<(), ControlAction>`: the `Err`
//! channel carries both evaluation errors and the `return` signal, and
//! [`Interpreter::call_closure`] converts `Return` back into the call's
//! result. Errors keep unwinding to [`Interpreter::run`]'s caller.
//!
//! # Environments
//!
//! The interpreter owns one root environment for its whole lifetime
//! (`globals`) and tracks the innermost scope in `env`. Function calls
//! swap `env` to a fresh child of the *closure's captured* environment,
//! never of the caller's, which is what makes repeated calls to the
//! same closure share state while staying isolated from the call site.

mod builder;

pub use builder::InterpreterBuilder;

use smallvec::SmallVec;

use rill_ir::{
    Ast, BinaryOp, Expr, ExprId, LogicalOp, Span, Stmt, StmtId, StringInterner, UnaryOp,
};

use crate::call_stack::CallStack;
use crate::environment::{Env, EnvRef};
use crate::errors::{
    arity_mismatch, not_callable, return_outside_function, undefined_variable,
    unsupported_operands, unsupported_unary_operand, ControlAction, EvalError,
};
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::value::{Closure, Value};

/// The tree-walking interpreter.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    ast: &'a Ast,
    /// Root environment, created once with the interpreter.
    globals: EnvRef,
    /// Environment of the innermost scope being evaluated.
    env: EnvRef,
    call_stack: CallStack,
    print_handler: SharedPrintHandler,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with default configuration.
    pub fn new(interner: &'a StringInterner, ast: &'a Ast) -> Self {
        InterpreterBuilder::new(interner, ast).build()
    }

    /// Evaluate the program's top-level statements in order.
    ///
    /// The first error terminates the run; a failed statement
    /// contributes nothing and later statements do not execute.
    pub fn run(&mut self) -> Result<(), EvalError> {
        let ast = self.ast;
        for &stmt in ast.root() {
            match self.exec_stmt(stmt) {
                Ok(()) => {}
                Err(ControlAction::Return(_)) => {
                    return Err(return_outside_function().with_span(ast.stmt_span(stmt)));
                }
                Err(ControlAction::Error(err)) => return Err(err),
            }
        }
        Ok(())
    }

    /// Handle to the root environment.
    pub fn globals(&self) -> EnvRef {
        self.globals.clone()
    }

    fn exec_stmt(&mut self, id: StmtId) -> Result<(), ControlAction> {
        let ast = self.ast;
        match ast.stmt(id) {
            Stmt::Expr(expr) => {
                self.eval_expr(*expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(*expr)?;
                self.print_handler.println(&value.display(self.interner));
                Ok(())
            }
            Stmt::Var { name, init } => {
                let value = match init {
                    Some(expr) => self.eval_expr(*expr)?,
                    None => Value::Nil,
                };
                self.env.borrow_mut().define(*name, value);
                Ok(())
            }
            Stmt::Block(stmts) => self.exec_block(stmts, Env::child(&self.env)),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(*cond)?.is_truthy() {
                    self.exec_stmt(*then_branch)
                } else if let Some(alt) = else_branch {
                    self.exec_stmt(*alt)
                } else {
                    Ok(())
                }
            }
            Stmt::While { cond, body } => {
                while self.eval_expr(*cond)?.is_truthy() {
                    self.exec_stmt(*body)?;
                }
                Ok(())
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(*expr)?,
                    None => Value::Nil,
                };
                Err(ControlAction::Return(value))
            }
            Stmt::Function(fun) => {
                let decl = ast.fun(*fun);
                // The closure captures the environment active at the
                // point of definition; the function's name is then
                // defined into that same environment, so the body can
                // resolve it and recurse.
                let closure = Value::closure(Closure {
                    fun: *fun,
                    name: decl.name,
                    env: self.env.clone(),
                });
                self.env.borrow_mut().define(decl.name, closure);
                Ok(())
            }
        }
    }

    /// Execute statements with `env` as the innermost scope, restoring
    /// the previous scope afterwards regardless of outcome.
    fn exec_block(&mut self, stmts: &[StmtId], env: EnvRef) -> Result<(), ControlAction> {
        let prev = std::mem::replace(&mut self.env, env);
        let result = stmts.iter().try_for_each(|&stmt| self.exec_stmt(stmt));
        self.env = prev;
        result
    }

    fn eval_expr(&mut self, id: ExprId) -> Result<Value, ControlAction> {
        let ast = self.ast;
        match ast.expr(id) {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Nil => Ok(Value::Nil),
            Expr::Str(name) => Ok(Value::string(self.interner.resolve(*name))),
            Expr::Var(name) => match self.env.borrow().lookup(*name) {
                Some(value) => Ok(value),
                None => Err(undefined_variable(&self.interner.resolve(*name))
                    .with_span(ast.expr_span(id))
                    .into()),
            },
            Expr::Assign { name, value } => {
                let value = self.eval_expr(*value)?;
                if self.env.borrow_mut().assign(*name, value.clone()).is_err() {
                    return Err(undefined_variable(&self.interner.resolve(*name))
                        .with_span(ast.expr_span(id))
                        .into());
                }
                // Assignment is an expression; its value is the assigned value.
                Ok(value)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(*operand)?;
                self.eval_unary(*op, &operand, ast.expr_span(id))
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval_expr(*lhs)?;
                let rhs = self.eval_expr(*rhs)?;
                self.eval_binary(*op, &lhs, &rhs, ast.expr_span(id))
            }
            Expr::Logical { op, lhs, rhs } => {
                let lhs = self.eval_expr(*lhs)?;
                match op {
                    LogicalOp::And if !lhs.is_truthy() => Ok(lhs),
                    LogicalOp::Or if lhs.is_truthy() => Ok(lhs),
                    _ => self.eval_expr(*rhs),
                }
            }
            Expr::Call { callee, args } => {
                let callee_value = self.eval_expr(*callee)?;
                let mut arg_values: SmallVec<[Value; 4]> = SmallVec::with_capacity(args.len());
                for &arg in args {
                    arg_values.push(self.eval_expr(arg)?);
                }
                self.call_value(&callee_value, &arg_values, ast.expr_span(id))
            }
        }
    }

    fn eval_unary(&self, op: UnaryOp, operand: &Value, span: Span) -> Result<Value, ControlAction> {
        match (op, operand) {
            (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOp::Neg, _) => Err(unsupported_unary_operand(op).with_span(span).into()),
            (UnaryOp::Not, _) => Ok(Value::Bool(!operand.is_truthy())),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        lhs: &Value,
        rhs: &Value,
        span: Span,
    ) -> Result<Value, ControlAction> {
        let value = match (op, lhs, rhs) {
            (BinaryOp::Add, Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (BinaryOp::Add, Value::Str(a), Value::Str(b)) => {
                Value::string(format!("{a}{b}"))
            }
            (BinaryOp::Sub, Value::Number(a), Value::Number(b)) => Value::Number(a - b),
            (BinaryOp::Mul, Value::Number(a), Value::Number(b)) => Value::Number(a * b),
            // Division follows IEEE 754; dividing by zero yields an infinity.
            (BinaryOp::Div, Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            (BinaryOp::Lt, Value::Number(a), Value::Number(b)) => Value::Bool(a < b),
            (BinaryOp::LtEq, Value::Number(a), Value::Number(b)) => Value::Bool(a <= b),
            (BinaryOp::Gt, Value::Number(a), Value::Number(b)) => Value::Bool(a > b),
            (BinaryOp::GtEq, Value::Number(a), Value::Number(b)) => Value::Bool(a >= b),
            (BinaryOp::Eq, a, b) => Value::Bool(a == b),
            (BinaryOp::NotEq, a, b) => Value::Bool(a != b),
            _ => return Err(unsupported_operands(op).with_span(span).into()),
        };
        Ok(value)
    }

    fn call_value(
        &mut self,
        callee: &Value,
        args: &[Value],
        span: Span,
    ) -> Result<Value, ControlAction> {
        let Value::Closure(closure) = callee else {
            return Err(not_callable(callee.type_name()).with_span(span).into());
        };
        self.call_closure(closure, args, span)
    }

    /// Invoke a closure with already-evaluated arguments.
    ///
    /// The call frame is a child of the closure's captured environment.
    /// A `Return` signal from the body terminates this call only and
    /// becomes its result; falling off the end of the body yields `nil`.
    fn call_closure(
        &mut self,
        closure: &Closure,
        args: &[Value],
        span: Span,
    ) -> Result<Value, ControlAction> {
        let ast = self.ast;
        let decl = ast.fun(closure.fun);
        if args.len() != decl.params.len() {
            return Err(arity_mismatch(
                &self.interner.resolve(decl.name),
                decl.params.len(),
                args.len(),
            )
            .with_span(span)
            .into());
        }

        self.call_stack
            .push(decl.name)
            .map_err(|err| ControlAction::from(err.with_span(span)))?;
        tracing::trace!(depth = self.call_stack.depth(), "call");

        let frame = Env::child(&closure.env);
        {
            let mut frame_env = frame.borrow_mut();
            for (param, arg) in decl.params.iter().zip(args) {
                frame_env.define(*param, arg.clone());
            }
        }

        let prev = std::mem::replace(&mut self.env, frame);
        let result =
            ensure_sufficient_stack(|| decl.body.iter().try_for_each(|&stmt| self.exec_stmt(stmt)));
        self.env = prev;
        self.call_stack.pop();

        match result {
            Ok(()) => Ok(Value::Nil),
            Err(ControlAction::Return(value)) => Ok(value),
            // An escaping error keeps its precise location; fall back to
            // the call site if it never got one.
            Err(action) => Err(action.with_span_if_error(span)),
        }
    }
}

#[cfg(test)]
mod tests;
