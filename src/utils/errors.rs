//! Error types for the translator.
//!
//! This module defines all error types used throughout the crate,
//! organized by the phase that produces them. Lexical problems are not
//! errors: the scanner turns them into lexical-error tokens.

use thiserror::Error;
use crate::utils::location::Span;
use std::fmt;

/// A terminal pattern failed to compile.
#[derive(Error, Debug, Clone)]
#[error("invalid pattern `{pattern}`: {message}")]
pub struct PatternError {
    /// The pattern source text
    pub pattern: String,
    /// The regex engine's message
    pub message: String,
}

/// Error during parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of parse error
    pub kind: ParseErrorKind,
    /// Expected tokens (if applicable)
    pub expected: Vec<String>,
    /// What was found
    pub found: Option<String>,
}

impl ParseError {
    /// A token of a specific kind was required.
    pub fn expected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        let expected = expected.into();
        let found = found.into();
        Self {
            message: format!("Expected {} but found {}", expected, found),
            span,
            kind: ParseErrorKind::ExpectedToken,
            expected: vec![expected],
            found: Some(found),
        }
    }

    /// A token that cannot start the production being parsed.
    pub fn unexpected(found: impl Into<String>, context: &str, span: Span) -> Self {
        let found = found.into();
        Self {
            message: format!("Unexpected symbol {} while parsing {}", found, context),
            span,
            kind: ParseErrorKind::UnexpectedToken,
            expected: Vec::new(),
            found: Some(found),
        }
    }

    /// A parser invariant was violated. Not caused by the input program.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: Span::dummy(),
            kind: ParseErrorKind::Internal,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Statements or expressions nested past the parser's limit.
    pub fn too_deep(limit: usize, span: Span) -> Self {
        Self {
            message: format!("Nesting too deep (more than {} levels)", limit),
            span,
            kind: ParseErrorKind::TooDeep,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Whether this is a programmer error rather than a syntax error.
    pub fn is_internal(&self) -> bool {
        self.kind == ParseErrorKind::Internal
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_internal() {
            return write!(f, "Internal error: {}", self.message);
        }
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected a specific token
    ExpectedToken,
    /// A token that cannot start the current production
    UnexpectedToken,
    /// Nesting exceeded the parser's depth limit
    TooDeep,
    /// Parser invariant violation (programmer error)
    Internal,
}

/// Error raised by the matrix runtime.
#[derive(Error, Debug)]
pub enum MatrixError {
    /// A dimension was zero or negative
    #[error("attempt to create a matrix with invalid dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count
        rows: i64,
        /// Requested column count
        cols: i64,
    },

    /// The element buffer cannot be sized or allocated
    #[error("a {rows}x{cols} matrix is too large to allocate")]
    TooLarge {
        /// Requested row count
        rows: i64,
        /// Requested column count
        cols: i64,
    },

    /// Operand shapes are incompatible
    #[error("cannot {op} a {left_rows}x{left_cols} matrix and a {right_rows}x{right_cols} matrix")]
    DimensionMismatch {
        /// Operation name, `add` or `multiply`
        op: &'static str,
        /// Rows of the left operand
        left_rows: usize,
        /// Columns of the left operand
        left_cols: usize,
        /// Rows of the right operand
        right_rows: usize,
        /// Columns of the right operand
        right_cols: usize,
    },

    /// The "rows cols" header line could not be read
    #[error("malformed matrix header: {0:?}")]
    MalformedHeader(String),

    /// An element value is missing or not a number
    #[error("malformed matrix element {index}: {message}")]
    MalformedBody {
        /// Row-major position of the element
        index: usize,
        /// What was wrong with it
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
