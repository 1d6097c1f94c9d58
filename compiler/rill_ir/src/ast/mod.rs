//! Flat AST arena.
//!
//! Expressions, statements, and function declarations live in per-kind
//! vectors inside [`Ast`]; nodes reference each other through `u32`
//! newtype ids. The arena owns every node for the lifetime of a run, so
//! closures can hold plain ids into it instead of owning subtrees.

use std::fmt;

use crate::{Name, Span};

/// Id of an expression in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExprId(u32);

/// Id of a statement in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct StmtId(u32);

/// Id of a function declaration in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FunId(u32);

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

impl fmt::Debug for FunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunId({})", self.0)
    }
}

/// Binary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
}

impl BinaryOp {
    /// Source symbol for this operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
        }
    }
}

/// Unary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric negation, `-x`.
    Neg,
    /// Logical not, `!x`.
    Not,
}

impl UnaryOp {
    /// Source symbol for this operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Short-circuiting logical operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Number literal.
    Number(f64),
    /// String literal (interned, quotes stripped).
    Str(Name),
    /// Boolean literal.
    Bool(bool),
    /// `nil` literal.
    Nil,
    /// Variable reference.
    Var(Name),
    /// Assignment to an existing binding, `name = value`.
    Assign { name: Name, value: ExprId },
    /// Unary operation.
    Unary { op: UnaryOp, operand: ExprId },
    /// Binary operation.
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// Short-circuiting `and`/`or`.
    Logical {
        op: LogicalOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// Function call.
    Call { callee: ExprId, args: Vec<ExprId> },
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Expression statement, value discarded.
    Expr(ExprId),
    /// `print(expr);`
    Print(ExprId),
    /// `var name = init;` — `init` of `None` binds `nil`.
    Var { name: Name, init: Option<ExprId> },
    /// `{ ... }` — introduces a child scope.
    Block(Vec<StmtId>),
    /// `if (cond) then else alt`.
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    /// `while (cond) body`.
    While { cond: ExprId, body: StmtId },
    /// `return expr;` — `expr` of `None` returns `nil`.
    Return(Option<ExprId>),
    /// Function declaration; binds the function's name in the current scope.
    Function(FunId),
}

/// A function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FunDecl {
    pub name: Name,
    pub params: Vec<Name>,
    /// Body block statements, in order.
    pub body: Vec<StmtId>,
    pub span: Span,
}

/// The AST arena for one program.
#[derive(Debug, Default)]
pub struct Ast {
    exprs: Vec<Expr>,
    expr_spans: Vec<Span>,
    stmts: Vec<Stmt>,
    stmt_spans: Vec<Span>,
    funs: Vec<FunDecl>,
    /// Top-level statements, in program order.
    root: Vec<StmtId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    /// Allocate an expression, returning its id.
    pub fn alloc_expr(&mut self, expr: Expr, span: Span) -> ExprId {
        let id = ExprId(u32::try_from(self.exprs.len()).expect("expression arena overflow"));
        self.exprs.push(expr);
        self.expr_spans.push(span);
        id
    }

    /// Allocate a statement, returning its id.
    pub fn alloc_stmt(&mut self, stmt: Stmt, span: Span) -> StmtId {
        let id = StmtId(u32::try_from(self.stmts.len()).expect("statement arena overflow"));
        self.stmts.push(stmt);
        self.stmt_spans.push(span);
        id
    }

    /// Allocate a function declaration, returning its id.
    pub fn alloc_fun(&mut self, fun: FunDecl) -> FunId {
        let id = FunId(u32::try_from(self.funs.len()).expect("function arena overflow"));
        self.funs.push(fun);
        id
    }

    /// Append a statement to the top-level program.
    pub fn push_root(&mut self, stmt: StmtId) {
        self.root.push(stmt);
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.0 as usize]
    }

    #[inline]
    pub fn expr_span(&self, id: ExprId) -> Span {
        self.expr_spans[id.0 as usize]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.0 as usize]
    }

    #[inline]
    pub fn stmt_span(&self, id: StmtId) -> Span {
        self.stmt_spans[id.0 as usize]
    }

    #[inline]
    pub fn fun(&self, id: FunId) -> &FunDecl {
        &self.funs[id.0 as usize]
    }

    /// Top-level statements in program order.
    #[inline]
    pub fn root(&self) -> &[StmtId] {
        &self.root
    }

    /// Number of expressions in the arena.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of statements in the arena.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}
