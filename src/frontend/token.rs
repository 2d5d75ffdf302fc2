//! Token types for the matrix DSL.
//!
//! This module defines the closed set of terminal kinds, the pattern
//! table the scanner is built from, and the token sequence it produces.

use crate::utils::location::Span;
use serde::Serialize;
use std::fmt;

/// Lexeme of the end-of-file marker that terminates every token sequence.
pub const EOF_LEXEME: &str = "kEndOfFile";

/// A token in the source code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The lexeme (raw text)
    pub lexeme: String,
    /// The source span
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    /// Create the end-of-file marker.
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::EndOfFile, EOF_LEXEME, span)
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }

    /// Human-readable description used in diagnostics.
    pub fn description(&self) -> String {
        match self.kind {
            TokenKind::IntConst
            | TokenKind::FloatConst
            | TokenKind::StringConst
            | TokenKind::VariableName
            | TokenKind::LexicalError => format!("{} '{}'", self.kind.description(), self.lexeme),
            _ => self.kind.description().to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}

/// The kind of a token.
///
/// Declaration order matters: when two terminal patterns match the same
/// number of characters, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Keywords
    /// `int`
    IntKwd,
    /// `float`
    FloatKwd,
    /// `boolean`
    BoolKwd,
    /// `string`
    StringKwd,
    /// `matrix`
    MatrixKwd,
    /// `let`
    LetKwd,
    /// `in`
    InKwd,
    /// `end`
    EndKwd,
    /// `if`
    IfKwd,
    /// `then`
    ThenKwd,
    /// `else`
    ElseKwd,
    /// `repeat`
    RepeatKwd,
    /// `print`
    PrintKwd,
    /// `while`
    WhileKwd,
    /// `to`
    ToKwd,
    /// `True`
    TrueKwd,
    /// `False`
    FalseKwd,

    // Constants
    /// Integer literal
    IntConst,
    /// Floating-point literal
    FloatConst,
    /// Double-quoted string literal
    StringConst,

    // Names
    /// Identifier
    VariableName,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftCurly,
    /// `}`
    RightCurly,
    /// `[`
    LeftSquare,
    /// `]`
    RightSquare,
    /// `;`
    SemiColon,
    /// `:`
    Colon,

    // Operators
    /// `=`
    Assign,
    /// `+`
    PlusSign,
    /// `*`
    Star,
    /// `-`
    Dash,
    /// `/`
    ForwardSlash,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
    /// `==`
    EqualsEquals,
    /// `!=`
    NotEquals,
    /// `&&`
    AndOp,
    /// `||`
    OrOp,
    /// `!`
    NotOp,

    // Special
    /// Single unmatched character
    LexicalError,
    /// End of file
    EndOfFile,
}

/// Terminal patterns in declaration order. `LexicalError` and `EndOfFile`
/// have no pattern: the scanner produces them itself.
pub const TERMINAL_PATTERNS: &[(TokenKind, &str)] = &[
    (TokenKind::IntKwd, "int"),
    (TokenKind::FloatKwd, "float"),
    (TokenKind::BoolKwd, "boolean"),
    (TokenKind::StringKwd, "string"),
    (TokenKind::MatrixKwd, "matrix"),
    (TokenKind::LetKwd, "let"),
    (TokenKind::InKwd, "in"),
    (TokenKind::EndKwd, "end"),
    (TokenKind::IfKwd, "if"),
    (TokenKind::ThenKwd, "then"),
    (TokenKind::ElseKwd, "else"),
    (TokenKind::RepeatKwd, "repeat"),
    (TokenKind::PrintKwd, "print"),
    (TokenKind::WhileKwd, "while"),
    (TokenKind::ToKwd, "to"),
    (TokenKind::TrueKwd, "True"),
    (TokenKind::FalseKwd, "False"),
    (TokenKind::IntConst, r"[0-9]+"),
    (TokenKind::FloatConst, r"[0-9]*\.?[0-9]*"),
    (TokenKind::StringConst, r#""[^"]*""#),
    (TokenKind::VariableName, r"[a-zA-Z_][a-zA-Z_0-9]*"),
    (TokenKind::LeftParen, r"\("),
    (TokenKind::RightParen, r"\)"),
    (TokenKind::LeftCurly, r"\{"),
    (TokenKind::RightCurly, r"\}"),
    (TokenKind::LeftSquare, r"\["),
    (TokenKind::RightSquare, r"\]"),
    (TokenKind::SemiColon, ";"),
    (TokenKind::Colon, ":"),
    (TokenKind::Assign, "="),
    (TokenKind::PlusSign, r"\+"),
    (TokenKind::Star, r"\*"),
    (TokenKind::Dash, "-"),
    (TokenKind::ForwardSlash, "/"),
    (TokenKind::LessThan, "<"),
    (TokenKind::LessThanEqual, "<="),
    (TokenKind::GreaterThan, ">"),
    (TokenKind::GreaterThanEqual, ">="),
    (TokenKind::EqualsEquals, "=="),
    (TokenKind::NotEquals, "!="),
    (TokenKind::AndOp, "&&"),
    (TokenKind::OrOp, r"\|\|"),
    (TokenKind::NotOp, "!"),
];

/// Whitespace run.
pub const WHITESPACE_PATTERN: &str = r"[\n\t\r ]+";
/// `/* ... */`, shortest interior.
pub const BLOCK_COMMENT_PATTERN: &str = r"/\*([^*]|\*+[^*/])*\*+/";
/// `// ...` through the newline, or through end of input.
pub const LINE_COMMENT_PATTERN: &str = r"//[^\n]*(\n|$)";

impl TokenKind {
    /// Check if this kind starts a scalar declaration.
    pub fn is_scalar_type(&self) -> bool {
        use TokenKind::*;
        matches!(self, IntKwd | FloatKwd | StringKwd | BoolKwd)
    }

    /// The pattern source for this kind, if it has one.
    pub fn pattern(&self) -> Option<&'static str> {
        TERMINAL_PATTERNS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, pattern)| *pattern)
    }

    /// Get a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        use TokenKind::*;
        match self {
            IntKwd => "'int'",
            FloatKwd => "'float'",
            BoolKwd => "'boolean'",
            StringKwd => "'string'",
            MatrixKwd => "'matrix'",
            LetKwd => "'let'",
            InKwd => "'in'",
            EndKwd => "'end'",
            IfKwd => "'if'",
            ThenKwd => "'then'",
            ElseKwd => "'else'",
            RepeatKwd => "'repeat'",
            PrintKwd => "'print'",
            WhileKwd => "'while'",
            ToKwd => "'to'",
            TrueKwd => "'True'",
            FalseKwd => "'False'",
            IntConst => "integer constant",
            FloatConst => "float constant",
            StringConst => "string constant",
            VariableName => "variable name",
            LeftParen => "'('",
            RightParen => "')'",
            LeftCurly => "'{'",
            RightCurly => "'}'",
            LeftSquare => "'['",
            RightSquare => "']'",
            SemiColon => "';'",
            Colon => "':'",
            Assign => "'='",
            PlusSign => "'+'",
            Star => "'*'",
            Dash => "'-'",
            ForwardSlash => "'/'",
            LessThan => "'<'",
            LessThanEqual => "'<='",
            GreaterThan => "'>'",
            GreaterThanEqual => "'>='",
            EqualsEquals => "'=='",
            NotEquals => "'!='",
            AndOp => "'&&'",
            OrOp => "'||'",
            NotOp => "'!'",
            LexicalError => "lexical error",
            EndOfFile => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The forward-only token sequence produced by the scanner.
///
/// A well-formed list ends in exactly one end-of-file token. Lists built
/// by hand through [`TokenList::from_tokens`] are not checked here; the
/// parser reports a malformed list as an internal error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Wrap a token vector without validating it.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// The first token, if any.
    pub fn head(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// The token following position `index`.
    pub fn next(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index + 1)
    }

    /// Get a token by position.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens, end-of-file marker included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the list holds no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// The kinds of all tokens, in order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Number of lexical-error tokens.
    pub fn lexical_errors(&self) -> usize {
        self.tokens.iter().filter(|t| t.kind == TokenKind::LexicalError).count()
    }

    /// Check that the list ends in one end-of-file token and holds no other.
    pub fn is_terminated(&self) -> bool {
        match self.tokens.split_last() {
            Some((last, rest)) => last.is_eof() && !rest.iter().any(Token::is_eof),
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
