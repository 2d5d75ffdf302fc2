//! Abstract Syntax Tree (AST) for the matrix DSL.
//!
//! The tree has one type per grammatical category: [`Root`], [`Stmts`],
//! [`Stmt`], [`Decl`] and [`Expr`]. Every node owns its children. The two
//! tree walks over it live in [`crate::codegen`].

use crate::frontend::token::TokenKind;
use serde::Serialize;
use std::fmt;

/// A complete program: `name () { stmts }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Root {
    /// Program name
    pub name: String,
    /// Program body
    pub stmts: Stmts,
}

/// A possibly empty statement sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Stmts {
    /// Statements in order
    pub stmts: Vec<Stmt>,
}

impl Stmts {
    /// Create an empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// Number of statements at this level.
    pub fn len(&self) -> usize {
        self.stmts.len()
    }
}

impl From<Vec<Stmt>> for Stmts {
    fn from(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Declaration statement
    Decl(Decl),

    /// Assignment: `x = expr;`
    Assign {
        /// Assigned variable
        var: String,
        /// New value
        expr: Expr,
    },

    /// Matrix cell assignment: `m[row : col] = expr;`
    AssignMatrix {
        /// Matrix variable
        var: String,
        /// Row index
        row: Expr,
        /// Column index
        col: Expr,
        /// New cell value
        expr: Expr,
    },

    /// `print(expr);`
    Print(Expr),

    /// `if (cond) stmt`
    If {
        /// Condition
        cond: Expr,
        /// Statement run when the condition holds
        then_stmt: Box<Stmt>,
    },

    /// `if (cond) stmt else stmt`
    IfElse {
        /// Condition
        cond: Expr,
        /// Statement run when the condition holds
        then_stmt: Box<Stmt>,
        /// Statement run otherwise
        else_stmt: Box<Stmt>,
    },

    /// Nested block: `{ stmts }`
    Block(Stmts),

    /// Counting loop: `repeat (var = from to to) stmt`
    Repeat {
        /// Loop variable
        var: String,
        /// First value, inclusive
        from: Expr,
        /// Last value, inclusive
        to: Expr,
        /// Loop body
        body: Box<Stmt>,
    },

    /// `while (cond) stmt`
    While {
        /// Loop condition
        cond: Expr,
        /// Loop body
        body: Box<Stmt>,
    },

    /// Empty statement (just a semicolon)
    Empty,
}

/// A declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decl {
    /// `int x;`, `float x;`, `string x;`, `boolean x;`
    Simple {
        /// Declared type
        ty: ScalarType,
        /// Declared variable
        var: String,
    },

    /// `matrix m = expr;`
    ShortMatrix {
        /// Declared matrix
        var: String,
        /// Initial value
        init: Expr,
    },

    /// `matrix m [rows : cols] i : j = expr;`
    ///
    /// `expr` is evaluated for every cell with `i` and `j` bound to the
    /// cell's row and column.
    LongMatrix {
        /// Declared matrix
        var: String,
        /// Row count
        rows: Expr,
        /// Column count
        cols: Expr,
        /// Name bound to the row index
        row_var: String,
        /// Name bound to the column index
        col_var: String,
        /// Per-cell initializer
        init: Expr,
    },
}

/// Scalar declaration types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarType {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
    /// `boolean`
    Boolean,
}

impl ScalarType {
    /// The type for a declaration keyword.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntKwd => Some(ScalarType::Int),
            TokenKind::FloatKwd => Some(ScalarType::Float),
            TokenKind::StringKwd => Some(ScalarType::String),
            TokenKind::BoolKwd => Some(ScalarType::Boolean),
            _ => None,
        }
    }

    /// The DSL keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// `let stmts in expr end`
    Let {
        /// Local statements
        stmts: Stmts,
        /// Result expression
        body: Box<Expr>,
    },

    /// Binary operation: `left op right`
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// Call-shaped expression: `name(arg)`
    Call {
        /// Callee name
        name: String,
        /// Single argument
        arg: Box<Expr>,
    },

    /// Matrix cell: `m[row : col]`
    MatrixElement {
        /// Matrix variable
        var: String,
        /// Row index
        row: Box<Expr>,
        /// Column index
        col: Box<Expr>,
    },

    /// `if cond then a else b`
    If {
        /// Condition
        cond: Box<Expr>,
        /// Value when the condition holds
        then_expr: Box<Expr>,
        /// Value otherwise
        else_expr: Box<Expr>,
    },

    /// Grouped expression (parenthesized)
    Paren(Box<Expr>),

    /// Variable reference
    Var(String),

    /// Integer, float or string literal, as written
    Const(String),

    /// Logical not: `!expr`
    Not(Box<Expr>),

    /// `True`
    True,

    /// `False`
    False,
}

impl Expr {
    /// Create a variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// Create a literal constant.
    pub fn constant(lexeme: impl Into<String>) -> Self {
        Expr::Const(lexeme.into())
    }

    /// Create a binary operation.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    // Arithmetic
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,

    // Relational
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // Logical
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// The operator for an infix token.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PlusSign => Some(BinaryOp::Add),
            TokenKind::Dash => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::ForwardSlash => Some(BinaryOp::Div),
            TokenKind::EqualsEquals => Some(BinaryOp::Eq),
            TokenKind::NotEquals => Some(BinaryOp::Ne),
            TokenKind::LessThan => Some(BinaryOp::Lt),
            TokenKind::LessThanEqual => Some(BinaryOp::Le),
            TokenKind::GreaterThan => Some(BinaryOp::Gt),
            TokenKind::GreaterThanEqual => Some(BinaryOp::Ge),
            TokenKind::AndOp => Some(BinaryOp::And),
            TokenKind::OrOp => Some(BinaryOp::Or),
            _ => None,
        }
    }

    /// The operator symbol, shared by the DSL and the C++ target.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
