//! Recursive descent parser for Rill.
//!
//! Consumes the token stream from [`crate::lexer::tokenize`] and builds
//! the flat [`Ast`] arena. Precedence climbs through one method per
//! level, mirroring the grammar.

use rill_ir::{
    Ast, BinaryOp, Expr, ExprId, FunDecl, LogicalOp, Name, Span, Stmt, StmtId, Token, TokenKind,
    UnaryOp,
};

use crate::error::{ParseError, ParseErrorKind};

/// Upper bound on parameters and call arguments.
const MAX_PARAMS: usize = 255;

/// Parse a token stream into an AST.
///
/// The stream must be `Eof`-terminated, as produced by the lexer.
/// Stops at the first error.
pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(tokens);
    while !parser.at_eof() {
        let stmt = parser.declaration()?;
        parser.ast.push_root(stmt);
    }
    tracing::debug!(
        stmts = parser.ast.stmt_count(),
        exprs = parser.ast.expr_count(),
        "parsed program"
    );
    Ok(parser.ast)
}

/// Parser state.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    ast: Ast,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "token stream must be Eof-terminated"
        );
        Parser {
            tokens,
            pos: 0,
            ast: Ast::new(),
        }
    }

    // Token navigation

    #[inline]
    fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.at_eof() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    ///
    /// Only meaningful for payload-free kinds.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == kind {
            self.advance();
            return true;
        }
        false
    }

    /// Consume a token of `kind` or fail with `expected`.
    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.current_kind() == kind {
            return Ok(self.advance());
        }
        Err(self.unexpected(expected))
    }

    /// Consume an identifier or fail with `expected`.
    fn expect_ident(&mut self, expected: &'static str) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.current_span();
            self.advance();
            return Ok((name, span));
        }
        Err(self.unexpected(expected))
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: self.current_kind(),
            },
            self.current_span(),
        )
    }

    // Declarations and statements

    fn declaration(&mut self) -> Result<StmtId, ParseError> {
        match self.current_kind() {
            TokenKind::Function => self.fun_declaration(),
            TokenKind::Var => self.var_declaration(),
            _ => self.statement(),
        }
    }

    fn fun_declaration(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `function`
        let (name, _) = self.expect_ident("function name")?;

        self.expect(TokenKind::LParen, "`(` after function name")?;
        let mut params = Vec::new();
        if self.current_kind() != TokenKind::RParen {
            loop {
                if params.len() >= MAX_PARAMS {
                    return Err(ParseError::new(
                        ParseErrorKind::TooManyParameters { limit: MAX_PARAMS },
                        self.current_span(),
                    ));
                }
                let (param, _) = self.expect_ident("parameter name")?;
                params.push(param);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "`)` after parameters")?;

        self.expect(TokenKind::LBrace, "`{` before function body")?;
        let (body, end) = self.block_body()?;

        let span = start.to(end);
        let fun = self.ast.alloc_fun(FunDecl {
            name,
            params,
            body,
            span,
        });
        Ok(self.ast.alloc_stmt(Stmt::Function(fun), span))
    }

    fn var_declaration(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `var`
        let (name, _) = self.expect_ident("variable name")?;
        let init = if self.eat(TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        let semi = self.expect(TokenKind::Semicolon, "`;` after variable declaration")?;
        Ok(self
            .ast
            .alloc_stmt(Stmt::Var { name, init }, start.to(semi.span)))
    }

    fn statement(&mut self) -> Result<StmtId, ParseError> {
        match self.current_kind() {
            TokenKind::Print => self.print_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::LBrace => self.block_statement(),
            _ => self.expr_statement(),
        }
    }

    fn print_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `print`
        self.expect(TokenKind::LParen, "`(` after `print`")?;
        let value = self.expression()?;
        self.expect(TokenKind::RParen, "`)` after print value")?;
        let semi = self.expect(TokenKind::Semicolon, "`;` after print statement")?;
        Ok(self.ast.alloc_stmt(Stmt::Print(value), start.to(semi.span)))
    }

    fn if_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `if`
        self.expect(TokenKind::LParen, "`(` after `if`")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RParen, "`)` after condition")?;
        let then_branch = self.statement()?;
        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.statement()?)
        } else {
            None
        };
        let end = else_branch.map_or_else(
            || self.ast.stmt_span(then_branch),
            |e| self.ast.stmt_span(e),
        );
        Ok(self.ast.alloc_stmt(
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            },
            start.to(end),
        ))
    }

    fn while_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `while`
        self.expect(TokenKind::LParen, "`(` after `while`")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RParen, "`)` after condition")?;
        let body = self.statement()?;
        let span = start.to(self.ast.stmt_span(body));
        Ok(self.ast.alloc_stmt(Stmt::While { cond, body }, span))
    }

    fn return_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `return`
        let value = if self.current_kind() == TokenKind::Semicolon {
            None
        } else {
            Some(self.expression()?)
        };
        let semi = self.expect(TokenKind::Semicolon, "`;` after return value")?;
        Ok(self.ast.alloc_stmt(Stmt::Return(value), start.to(semi.span)))
    }

    fn block_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance(); // `{`
        let (stmts, end) = self.block_body()?;
        Ok(self.ast.alloc_stmt(Stmt::Block(stmts), start.to(end)))
    }

    /// Declarations up to and including the closing `}`.
    ///
    /// The opening `{` must already be consumed. Returns the statements
    /// and the span of the closing brace.
    fn block_body(&mut self) -> Result<(Vec<StmtId>, Span), ParseError> {
        let mut stmts = Vec::new();
        while self.current_kind() != TokenKind::RBrace && !self.at_eof() {
            stmts.push(self.declaration()?);
        }
        let brace = self.expect(TokenKind::RBrace, "`}` after block")?;
        Ok((stmts, brace.span))
    }

    fn expr_statement(&mut self) -> Result<StmtId, ParseError> {
        let expr = self.expression()?;
        let start = self.ast.expr_span(expr);
        let semi = self.expect(TokenKind::Semicolon, "`;` after expression")?;
        Ok(self.ast.alloc_stmt(Stmt::Expr(expr), start.to(semi.span)))
    }

    // Expressions, one method per precedence level

    fn expression(&mut self) -> Result<ExprId, ParseError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.logic_or()?;
        if self.eat(TokenKind::Eq) {
            let value = self.assignment()?;
            let span = self.ast.expr_span(expr).to(self.ast.expr_span(value));
            // Only a plain name is assignable.
            let target = match self.ast.expr(expr) {
                Expr::Var(name) => Some(*name),
                _ => None,
            };
            return match target {
                Some(name) => Ok(self.ast.alloc_expr(Expr::Assign { name, value }, span)),
                None => Err(ParseError::new(
                    ParseErrorKind::InvalidAssignmentTarget,
                    self.ast.expr_span(expr),
                )),
            };
        }
        Ok(expr)
    }

    fn logic_or(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.logic_and()?;
        while self.eat(TokenKind::Or) {
            let rhs = self.logic_and()?;
            let span = self.ast.expr_span(lhs).to(self.ast.expr_span(rhs));
            lhs = self.ast.alloc_expr(
                Expr::Logical {
                    op: LogicalOp::Or,
                    lhs,
                    rhs,
                },
                span,
            );
        }
        Ok(lhs)
    }

    fn logic_and(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.equality()?;
        while self.eat(TokenKind::And) {
            let rhs = self.equality()?;
            let span = self.ast.expr_span(lhs).to(self.ast.expr_span(rhs));
            lhs = self.ast.alloc_expr(
                Expr::Logical {
                    op: LogicalOp::And,
                    lhs,
                    rhs,
                },
                span,
            );
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.comparison()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::BangEq => BinaryOp::NotEq,
                _ => break,
            };
            self.advance();
            let rhs = self.comparison()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.unary()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self.ast.expr_span(lhs).to(self.ast.expr_span(rhs));
        self.ast.alloc_expr(Expr::Binary { op, lhs, rhs }, span)
    }

    fn unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.call(),
        };
        let start = self.current_span();
        self.advance();
        let operand = self.unary()?;
        let span = start.to(self.ast.expr_span(operand));
        Ok(self.ast.alloc_expr(Expr::Unary { op, operand }, span))
    }

    fn call(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.primary()?;
        while self.eat(TokenKind::LParen) {
            let mut args = Vec::new();
            if self.current_kind() != TokenKind::RParen {
                loop {
                    if args.len() >= MAX_PARAMS {
                        return Err(ParseError::new(
                            ParseErrorKind::TooManyArguments { limit: MAX_PARAMS },
                            self.current_span(),
                        ));
                    }
                    args.push(self.expression()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            let rparen = self.expect(TokenKind::RParen, "`)` after arguments")?;
            let span = self.ast.expr_span(expr).to(rparen.span);
            expr = self.ast.alloc_expr(Expr::Call { callee: expr, args }, span);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        let expr = match token.kind {
            TokenKind::Number(value) => Expr::Number(value),
            TokenKind::Str(name) => Expr::Str(name),
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Nil => Expr::Nil,
            TokenKind::Ident(name) => Expr::Var(name),
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "`)` after expression")?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(self.ast.alloc_expr(expr, token.span))
    }
}
