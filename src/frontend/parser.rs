//! Parser for the matrix DSL.
//!
//! Statements and declarations are parsed by recursive descent. Expressions
//! are parsed by precedence climbing over [`ExtToken`]s: the current token's
//! null denotation produces a left operand, and infix operators are folded
//! in while the next token binds more tightly than the caller's minimum.
//!
//! Parsing is fail-fast. The first syntax error ends the parse.

use crate::frontend::ast::*;
use crate::frontend::ext_token::{ExtToken, Led, Nud, NOT_OPERAND_BP};
use crate::frontend::token::{Token, TokenKind, TokenList};
use crate::utils::errors::ParseError;
use log::debug;

/// Deepest nesting of statements and expressions the parser accepts.
pub const MAX_NESTING: usize = 64;

/// Result of a parse: the program tree or the first error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    result: Result<Root, ParseError>,
}

impl ParseResult {
    /// Whether the parse succeeded.
    pub fn ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The program tree, if the parse succeeded.
    pub fn ast(&self) -> Option<&Root> {
        self.result.as_ref().ok()
    }

    /// The error, if the parse failed.
    pub fn error(&self) -> Option<&ParseError> {
        self.result.as_ref().err()
    }

    /// The error message, or an empty string on success.
    pub fn error_message(&self) -> String {
        self.error().map(ToString::to_string).unwrap_or_default()
    }

    /// Unwrap into a plain `Result`.
    pub fn into_result(self) -> Result<Root, ParseError> {
        self.result
    }
}

impl From<Result<Root, ParseError>> for ParseResult {
    fn from(result: Result<Root, ParseError>) -> Self {
        Self { result }
    }
}

/// A parser over one scanned token list.
pub struct Parser<'t> {
    tokens: &'t TokenList,
    current: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    /// Create a parser positioned at the first token.
    pub fn new(tokens: &'t TokenList) -> Self {
        Self { tokens, current: 0, depth: 0 }
    }

    /// Parse a complete program: `name () { stmts }` followed by end of file.
    pub fn parse_program(&mut self) -> Result<Root, ParseError> {
        self.check_terminated()?;

        let name = self.match_token(TokenKind::VariableName)?.lexeme.clone();
        self.match_token(TokenKind::LeftParen)?;
        self.match_token(TokenKind::RightParen)?;
        self.match_token(TokenKind::LeftCurly)?;
        let stmts = self.parse_stmts()?;
        self.match_token(TokenKind::RightCurly)?;
        self.match_token(TokenKind::EndOfFile)?;

        debug!("parsed program '{}' with {} top-level statement(s)", name, stmts.len());
        Ok(Root { name, stmts })
    }

    /// Parse a lone expression followed by end of file.
    pub fn parse_standalone_expr(&mut self) -> Result<Expr, ParseError> {
        self.check_terminated()?;
        let expr = self.parse_expr(0)?;
        self.match_token(TokenKind::EndOfFile)?;
        Ok(expr)
    }

    /// Run [`Parser::parse_program`] and wrap the outcome.
    pub fn parse(&mut self) -> ParseResult {
        let result = self.parse_program();
        if let Err(e) = &result {
            debug!("parse failed: {}", e);
        }
        ParseResult::from(result)
    }

    // ---- Statements ------------------------------------------------------

    /// Statements up to (not including) `}` or `in`.
    fn parse_stmts(&mut self) -> Result<Stmts, ParseError> {
        let mut stmts = Vec::new();
        while !self.next_is(TokenKind::RightCurly)? && !self.next_is(TokenKind::InKwd)? {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Stmts::from(stmts))
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.enter()?;
        let stmt = self.parse_stmt_inner();
        self.depth -= 1;
        stmt
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        let token = self.current_token()?;
        match token.kind {
            kind if kind.is_scalar_type() => self.parse_simple_decl(),
            TokenKind::MatrixKwd => self.parse_matrix_decl(),
            TokenKind::LeftCurly => {
                self.next_token()?;
                let stmts = self.parse_stmts()?;
                self.match_token(TokenKind::RightCurly)?;
                Ok(Stmt::Block(stmts))
            }
            TokenKind::IfKwd => self.parse_if_stmt(),
            TokenKind::VariableName => self.parse_assignment(),
            TokenKind::PrintKwd => {
                self.next_token()?;
                self.match_token(TokenKind::LeftParen)?;
                let expr = self.parse_expr(0)?;
                self.match_token(TokenKind::RightParen)?;
                self.match_token(TokenKind::SemiColon)?;
                Ok(Stmt::Print(expr))
            }
            TokenKind::RepeatKwd => self.parse_repeat(),
            TokenKind::WhileKwd => {
                self.next_token()?;
                self.match_token(TokenKind::LeftParen)?;
                let cond = self.parse_expr(0)?;
                self.match_token(TokenKind::RightParen)?;
                let body = self.parse_stmt()?;
                Ok(Stmt::While { cond, body: Box::new(body) })
            }
            TokenKind::SemiColon => {
                self.next_token()?;
                Ok(Stmt::Empty)
            }
            _ => Err(ParseError::unexpected(token.description(), "a statement", token.span)),
        }
    }

    /// `int x;`, `float x;`, `string x;`, `boolean x;`
    fn parse_simple_decl(&mut self) -> Result<Stmt, ParseError> {
        let token = self.next_token()?;
        let ty = ScalarType::from_token(token.kind).ok_or_else(|| {
            ParseError::internal(format!("{} does not start a scalar declaration", token.kind))
        })?;
        let var = self.match_token(TokenKind::VariableName)?.lexeme.clone();
        self.match_token(TokenKind::SemiColon)?;
        Ok(Stmt::Decl(Decl::Simple { ty, var }))
    }

    /// `matrix m = e;` or `matrix m [e : e] i : j = e;`
    fn parse_matrix_decl(&mut self) -> Result<Stmt, ParseError> {
        self.match_token(TokenKind::MatrixKwd)?;
        let var = self.match_token(TokenKind::VariableName)?.lexeme.clone();

        if self.attempt_match(TokenKind::LeftSquare)? {
            let rows = self.parse_expr(0)?;
            self.match_token(TokenKind::Colon)?;
            let cols = self.parse_expr(0)?;
            self.match_token(TokenKind::RightSquare)?;
            let row_var = self.match_token(TokenKind::VariableName)?.lexeme.clone();
            self.match_token(TokenKind::Colon)?;
            let col_var = self.match_token(TokenKind::VariableName)?.lexeme.clone();
            self.match_token(TokenKind::Assign)?;
            let init = self.parse_expr(0)?;
            self.match_token(TokenKind::SemiColon)?;
            Ok(Stmt::Decl(Decl::LongMatrix { var, rows, cols, row_var, col_var, init }))
        } else if self.attempt_match(TokenKind::Assign)? {
            let init = self.parse_expr(0)?;
            self.match_token(TokenKind::SemiColon)?;
            Ok(Stmt::Decl(Decl::ShortMatrix { var, init }))
        } else {
            let token = self.current_token()?;
            Err(ParseError::expected(
                "'[' or '=' in matrix declaration",
                token.description(),
                token.span,
            ))
        }
    }

    /// `if (e) stmt` with an optional `else stmt`. A trailing `else`
    /// belongs to the innermost `if`.
    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.match_token(TokenKind::IfKwd)?;
        self.match_token(TokenKind::LeftParen)?;
        let cond = self.parse_expr(0)?;
        self.match_token(TokenKind::RightParen)?;
        let then_stmt = Box::new(self.parse_stmt()?);

        if self.attempt_match(TokenKind::ElseKwd)? {
            let else_stmt = Box::new(self.parse_stmt()?);
            Ok(Stmt::IfElse { cond, then_stmt, else_stmt })
        } else {
            Ok(Stmt::If { cond, then_stmt })
        }
    }

    /// `x = e;` or `m[e : e] = e;`
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let var = self.match_token(TokenKind::VariableName)?.lexeme.clone();

        if self.attempt_match(TokenKind::LeftSquare)? {
            let row = self.parse_expr(0)?;
            self.match_token(TokenKind::Colon)?;
            let col = self.parse_expr(0)?;
            self.match_token(TokenKind::RightSquare)?;
            self.match_token(TokenKind::Assign)?;
            let expr = self.parse_expr(0)?;
            self.match_token(TokenKind::SemiColon)?;
            Ok(Stmt::AssignMatrix { var, row, col, expr })
        } else if self.attempt_match(TokenKind::Assign)? {
            let expr = self.parse_expr(0)?;
            self.match_token(TokenKind::SemiColon)?;
            Ok(Stmt::Assign { var, expr })
        } else {
            let token = self.current_token()?;
            Err(ParseError::expected(
                "'[' or '=' after variable name",
                token.description(),
                token.span,
            ))
        }
    }

    /// `repeat (v = e to e) stmt`
    fn parse_repeat(&mut self) -> Result<Stmt, ParseError> {
        self.match_token(TokenKind::RepeatKwd)?;
        self.match_token(TokenKind::LeftParen)?;
        let var = self.match_token(TokenKind::VariableName)?.lexeme.clone();
        self.match_token(TokenKind::Assign)?;
        let from = self.parse_expr(0)?;
        self.match_token(TokenKind::ToKwd)?;
        let to = self.parse_expr(0)?;
        self.match_token(TokenKind::RightParen)?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::Repeat { var, from, to, body })
    }

    // ---- Expressions -----------------------------------------------------

    /// Parse an expression whose infix operators all bind more tightly
    /// than `rbp`.
    pub fn parse_expr(&mut self, rbp: u8) -> Result<Expr, ParseError> {
        self.enter()?;
        let expr = self.parse_expr_inner(rbp);
        self.depth -= 1;
        expr
    }

    fn parse_expr_inner(&mut self, rbp: u8) -> Result<Expr, ParseError> {
        let token = self.current_token()?;
        let nud = ExtToken::extend(token).nud.ok_or_else(|| {
            ParseError::unexpected(token.description(), "an expression", token.span)
        })?;
        let mut left = self.null_denotation(nud)?;

        loop {
            let ext = ExtToken::extend(self.current_token()?);
            if !ext.continues(rbp) {
                break;
            }
            let led = ext.led.ok_or_else(|| {
                ParseError::internal(format!(
                    "{} has binding power {} but no infix handler",
                    ext.token.kind, ext.lbp
                ))
            })?;
            left = self.left_denotation(led, ext.lbp, left)?;
        }
        Ok(left)
    }

    /// Parse starting at the current token, which `nud` was looked up for.
    fn null_denotation(&mut self, nud: Nud) -> Result<Expr, ParseError> {
        let token = self.next_token()?;
        match nud {
            Nud::Constant => Ok(Expr::Const(token.lexeme.clone())),
            Nud::Variable => {
                let name = token.lexeme.clone();
                if self.attempt_match(TokenKind::LeftParen)? {
                    let arg = self.parse_expr(0)?;
                    self.match_token(TokenKind::RightParen)?;
                    Ok(Expr::Call { name, arg: Box::new(arg) })
                } else if self.attempt_match(TokenKind::LeftSquare)? {
                    let row = self.parse_expr(0)?;
                    self.match_token(TokenKind::Colon)?;
                    let col = self.parse_expr(0)?;
                    self.match_token(TokenKind::RightSquare)?;
                    Ok(Expr::MatrixElement { var: name, row: Box::new(row), col: Box::new(col) })
                } else {
                    Ok(Expr::Var(name))
                }
            }
            Nud::Nested => {
                let inner = self.parse_expr(0)?;
                self.match_token(TokenKind::RightParen)?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            Nud::IfExpr => {
                let cond = self.parse_expr(0)?;
                self.match_token(TokenKind::ThenKwd)?;
                let then_expr = self.parse_expr(0)?;
                self.match_token(TokenKind::ElseKwd)?;
                let else_expr = self.parse_expr(0)?;
                Ok(Expr::If {
                    cond: Box::new(cond),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                })
            }
            Nud::Let => {
                let stmts = self.parse_stmts()?;
                self.match_token(TokenKind::InKwd)?;
                let body = self.parse_expr(0)?;
                self.match_token(TokenKind::EndKwd)?;
                Ok(Expr::Let { stmts, body: Box::new(body) })
            }
            Nud::Not => Ok(Expr::Not(Box::new(self.parse_expr(NOT_OPERAND_BP)?))),
            Nud::True => Ok(Expr::True),
            Nud::False => Ok(Expr::False),
        }
    }

    /// Parse the operator at the current token with `left` already parsed.
    fn left_denotation(&mut self, led: Led, lbp: u8, left: Expr) -> Result<Expr, ParseError> {
        self.next_token()?;
        match led {
            Led::Infix(op) => {
                let right = self.parse_expr(lbp)?;
                Ok(Expr::binary(op, left, right))
            }
        }
    }

    /// Count one more level of nesting, failing past [`MAX_NESTING`].
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::too_deep(MAX_NESTING, self.current_token()?.span));
        }
        self.depth += 1;
        Ok(())
    }

    // ---- Token primitives ------------------------------------------------

    fn check_terminated(&self) -> Result<(), ParseError> {
        if self.tokens.is_terminated() {
            Ok(())
        } else {
            Err(ParseError::internal("token sequence is not terminated by a lone end-of-file token"))
        }
    }

    fn current_token(&self) -> Result<&'t Token, ParseError> {
        self.tokens
            .get(self.current)
            .ok_or_else(|| ParseError::internal("parser advanced past the end of the token sequence"))
    }

    /// Consume the current token and return it. The end-of-file token is
    /// never consumed past.
    fn next_token(&mut self) -> Result<&'t Token, ParseError> {
        let token = self.current_token()?;
        if !token.is_eof() {
            if self.tokens.next(self.current).is_none() {
                return Err(ParseError::internal(format!(
                    "{} is the last token but is not end of file",
                    token.kind
                )));
            }
            self.current += 1;
        }
        Ok(token)
    }

    /// Consume a token of `kind` or fail with an "expected" error.
    fn match_token(&mut self, kind: TokenKind) -> Result<&'t Token, ParseError> {
        let token = self.current_token()?;
        if token.kind == kind {
            self.next_token()
        } else {
            Err(ParseError::expected(kind.description(), token.description(), token.span))
        }
    }

    /// Consume a token of `kind` if it is next.
    fn attempt_match(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.next_is(kind)? {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn next_is(&self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.current_token()?.kind == kind)
    }
}
