//! Rill IR - names, spans, tokens, and the AST arena.
//!
//! This is the leaf crate of the Rill workspace: everything the lexer,
//! parser, and evaluator agree on lives here.

mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{Ast, BinaryOp, Expr, ExprId, FunDecl, FunId, LogicalOp, Stmt, StmtId, UnaryOp};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind};
