//! Operator-precedence view over scanned tokens.
//!
//! An [`ExtToken`] decorates a [`Token`] with what the expression parser
//! needs to know about it: how tightly it binds to a left operand, how to
//! parse it at the start of an expression (null denotation) and how to
//! parse it as an infix continuation (left denotation). The parser builds
//! one on demand for whichever token it is looking at.

use crate::frontend::ast::BinaryOp;
use crate::frontend::token::{Token, TokenKind};

/// Binding power of `||`.
pub const OR_BP: u8 = 10;
/// Binding power of `&&`.
pub const AND_BP: u8 = 20;
/// Binding power of `==`, `!=`, `<`, `<=`, `>` and `>=`.
pub const RELATIONAL_BP: u8 = 30;
/// Binding power of `+` and `-`.
pub const ADDITIVE_BP: u8 = 40;
/// Binding power of `*` and `/`.
pub const MULTIPLICATIVE_BP: u8 = 50;
/// Minimum binding power the operand of `!` is parsed with.
pub const NOT_OPERAND_BP: u8 = 60;

/// How a token is parsed when it starts an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nud {
    /// Integer, float or string literal
    Constant,
    /// Variable, call `name(e)` or matrix cell `name[e : e]`
    Variable,
    /// `( e )`
    Nested,
    /// `if e then e else e`
    IfExpr,
    /// `let stmts in e end`
    Let,
    /// `! e`
    Not,
    /// `True`
    True,
    /// `False`
    False,
}

/// How a token is parsed when it follows a complete left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    /// Left-associative binary operator
    Infix(BinaryOp),
}

/// A token together with its precedence-parsing behavior.
#[derive(Debug, Clone, Copy)]
pub struct ExtToken<'t> {
    /// The underlying token
    pub token: &'t Token,
    /// Left binding power; zero ends an expression
    pub lbp: u8,
    /// Prefix handler, if the token can start an expression
    pub nud: Option<Nud>,
    /// Infix handler, if the token can continue one
    pub led: Option<Led>,
}

impl<'t> ExtToken<'t> {
    /// Decorate `token` according to the dispatch table.
    pub fn extend(token: &'t Token) -> Self {
        let kind = token.kind;
        let led = BinaryOp::from_token(kind).map(Led::Infix);
        Self {
            token,
            lbp: binding_power(kind),
            nud: null_denotation(kind),
            led,
        }
    }

    /// Whether this token can continue an expression whose operators
    /// bind at least as tightly as `rbp`.
    pub fn continues(&self, rbp: u8) -> bool {
        self.lbp > rbp
    }
}

/// Left binding power of a terminal kind.
pub fn binding_power(kind: TokenKind) -> u8 {
    use TokenKind::*;
    match kind {
        OrOp => OR_BP,
        AndOp => AND_BP,
        EqualsEquals | NotEquals | LessThan | LessThanEqual | GreaterThan | GreaterThanEqual => {
            RELATIONAL_BP
        }
        PlusSign | Dash => ADDITIVE_BP,
        Star | ForwardSlash => MULTIPLICATIVE_BP,
        _ => 0,
    }
}

/// Prefix handler of a terminal kind.
pub fn null_denotation(kind: TokenKind) -> Option<Nud> {
    use TokenKind::*;
    match kind {
        IntConst | FloatConst | StringConst => Some(Nud::Constant),
        VariableName => Some(Nud::Variable),
        LeftParen => Some(Nud::Nested),
        IfKwd => Some(Nud::IfExpr),
        LetKwd => Some(Nud::Let),
        NotOp => Some(Nud::Not),
        TrueKwd => Some(Nud::True),
        FalseKwd => Some(Nud::False),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TERMINAL_PATTERNS;
    use crate::utils::location::Span;

    fn ext(kind: TokenKind, lexeme: &str) -> (Token, u8, Option<Nud>, Option<Led>) {
        let token = Token::new(kind, lexeme, Span::dummy());
        let e = ExtToken::extend(&token);
        let (lbp, nud, led) = (e.lbp, e.nud, e.led);
        (token, lbp, nud, led)
    }

    #[test]
    fn test_precedence_order() {
        assert!(binding_power(TokenKind::OrOp) < binding_power(TokenKind::AndOp));
        assert!(binding_power(TokenKind::AndOp) < binding_power(TokenKind::LessThan));
        assert!(binding_power(TokenKind::LessThan) < binding_power(TokenKind::PlusSign));
        assert!(binding_power(TokenKind::PlusSign) < binding_power(TokenKind::Star));
        assert!(binding_power(TokenKind::Star) < NOT_OPERAND_BP);
    }

    #[test]
    fn test_operand_tokens() {
        let (_, lbp, nud, led) = ext(TokenKind::VariableName, "x");
        assert_eq!((lbp, nud, led), (0, Some(Nud::Variable), None));

        let (_, lbp, nud, led) = ext(TokenKind::Dash, "-");
        assert_eq!(lbp, ADDITIVE_BP);
        assert_eq!(nud, None);
        assert_eq!(led, Some(Led::Infix(BinaryOp::Sub)));
    }

    #[test]
    fn test_not_is_prefix_only() {
        let (_, lbp, nud, led) = ext(TokenKind::NotOp, "!");
        assert_eq!((lbp, nud, led), (0, Some(Nud::Not), None));
    }

    #[test]
    fn test_punctuation_ends_expressions() {
        for kind in [TokenKind::SemiColon, TokenKind::RightParen, TokenKind::ThenKwd, TokenKind::EndOfFile] {
            let (_, lbp, nud, led) = ext(kind, "");
            assert_eq!((lbp, nud, led), (0, None, None), "{:?}", kind);
        }
    }

    #[test]
    fn test_every_binding_token_has_infix_handler() {
        for (kind, _) in TERMINAL_PATTERNS {
            let token = Token::new(*kind, "", Span::dummy());
            let e = ExtToken::extend(&token);
            assert_eq!(e.lbp > 0, e.led.is_some(), "{:?}", kind);
            assert!(!e.continues(e.lbp));
        }
    }
}
