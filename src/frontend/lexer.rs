//! Scanner for the matrix DSL.
//!
//! The scanner converts source text into a [`TokenList`]. At each position
//! it first skips whitespace and comments, then tries every terminal
//! pattern and keeps the longest match; ties go to the terminal declared
//! first. Input that no pattern matches becomes a one-character
//! lexical-error token, so scanning never fails.

use crate::frontend::pattern::Pattern;
use crate::frontend::token::{
    Token, TokenKind, TokenList, BLOCK_COMMENT_PATTERN, LINE_COMMENT_PATTERN,
    TERMINAL_PATTERNS, WHITESPACE_PATTERN,
};
use crate::utils::errors::PatternError;
use crate::utils::location::{SourceLocation, Span};
use log::{debug, trace, warn};

/// The compiled terminal patterns and skip patterns a scanner runs on.
///
/// Built once and never modified; cloning shares the compiled programs.
#[derive(Debug, Clone)]
pub struct LexerConfig {
    terminals: Vec<(TokenKind, Pattern)>,
    whitespace: Pattern,
    block_comment: Pattern,
    line_comment: Pattern,
}

impl LexerConfig {
    /// The standard DSL terminal table.
    pub fn standard() -> Result<Self, PatternError> {
        Self::from_patterns(TERMINAL_PATTERNS)
    }

    /// Build a table from `(kind, pattern)` pairs. Order decides ties.
    pub fn from_patterns(patterns: &[(TokenKind, &str)]) -> Result<Self, PatternError> {
        let terminals = patterns
            .iter()
            .map(|(kind, source)| Ok((*kind, Pattern::new(source)?)))
            .collect::<Result<Vec<_>, PatternError>>()?;

        Ok(Self {
            terminals,
            whitespace: Pattern::new(WHITESPACE_PATTERN)?,
            block_comment: Pattern::new(BLOCK_COMMENT_PATTERN)?,
            line_comment: Pattern::new(LINE_COMMENT_PATTERN)?,
        })
    }

    /// The compiled pattern for `kind`.
    pub fn pattern(&self, kind: TokenKind) -> Option<&Pattern> {
        self.terminals
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, pattern)| pattern)
    }

    /// Number of bytes of whitespace and comments at the start of `text`.
    ///
    /// The three skip patterns are retried until none of them matches, so
    /// comments and whitespace may be freely interleaved.
    pub fn skip_len(&self, text: &str) -> usize {
        let mut total = 0;
        loop {
            let mut consumed = false;
            for pattern in [&self.whitespace, &self.block_comment, &self.line_comment] {
                let n = pattern.match_len(&text[total..]);
                if n > 0 {
                    total += n;
                    consumed = true;
                }
            }
            if !consumed {
                return total;
            }
        }
    }

    /// The longest terminal match at the start of `text`.
    ///
    /// Returns `None` when no terminal matches a non-empty prefix.
    pub fn longest_match(&self, text: &str) -> Option<(TokenKind, usize)> {
        let mut best: Option<(TokenKind, usize)> = None;
        for (kind, pattern) in &self.terminals {
            let len = pattern.match_len(text);
            if len > best.map_or(0, |(_, l)| l) {
                best = Some((*kind, len));
            }
        }
        best
    }
}

/// A scanner for tokenizing source code.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: LexerConfig,
}

impl Scanner {
    /// Create a scanner over the standard terminal table.
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self::with_config(LexerConfig::standard()?))
    }

    /// Create a scanner over a custom terminal table.
    pub fn with_config(config: LexerConfig) -> Self {
        Self { config }
    }

    /// The terminal table this scanner uses.
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Scan the whole of `text`.
    pub fn scan(&self, text: &str) -> TokenList {
        let mut tokens = Vec::new();
        let mut location = SourceLocation::start();

        location = location.advance(&text[..self.config.skip_len(text)]);
        while location.offset < text.len() {
            let rest = &text[location.offset..];
            let token = self.next_token(rest, location);
            trace!("{} at {}", token, token.span);

            location = location.advance(&token.lexeme);
            let skipped = self.config.skip_len(&text[location.offset..]);
            location = location.advance(&text[location.offset..location.offset + skipped]);
            tokens.push(token);
        }
        tokens.push(Token::eof(Span::from_locations(location, location)));

        let list = TokenList::from_tokens(tokens);
        let errors = list.lexical_errors();
        if errors > 0 {
            warn!("scanner produced {} lexical error token(s)", errors);
        }
        debug!("scanned {} tokens", list.len());
        list
    }

    /// Match one token at the start of `rest`, which must be non-empty.
    fn next_token(&self, rest: &str, start: SourceLocation) -> Token {
        let (kind, len) = match self.config.longest_match(rest) {
            Some(found) => found,
            None => {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                (TokenKind::LexicalError, len)
            }
        };
        let lexeme = &rest[..len];
        Token::new(kind, lexeme, Span::from_locations(start, start.advance(lexeme)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> TokenList {
        Scanner::new().unwrap().scan(source)
    }

    fn token_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).kinds()
    }

    #[test]
    fn test_empty() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens.head().unwrap().is_eof());
    }

    #[test]
    fn test_whitespace() {
        let tokens = lex("   \t\n\r\n   ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.head().unwrap().kind, TokenKind::EndOfFile);
        assert!(tokens.next(0).is_none());
    }

    #[test]
    fn test_keywords() {
        let kinds = token_kinds("let in end if then else repeat to");
        assert_eq!(kinds, vec![
            TokenKind::LetKwd,
            TokenKind::InKwd,
            TokenKind::EndKwd,
            TokenKind::IfKwd,
            TokenKind::ThenKwd,
            TokenKind::ElseKwd,
            TokenKind::RepeatKwd,
            TokenKind::ToKwd,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = lex("integer in int intx");
        let kinds: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
        assert_eq!(kinds, vec![
            (TokenKind::VariableName, "integer"),
            (TokenKind::InKwd, "in"),
            (TokenKind::IntKwd, "int"),
            (TokenKind::VariableName, "intx"),
            (TokenKind::EndOfFile, "kEndOfFile"),
        ]);
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("123 45.67 .5 7.");
        let kinds: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
        assert_eq!(kinds[0], (TokenKind::IntConst, "123"));
        assert_eq!(kinds[1], (TokenKind::FloatConst, "45.67"));
        assert_eq!(kinds[2], (TokenKind::FloatConst, ".5"));
        assert_eq!(kinds[3], (TokenKind::FloatConst, "7."));
    }

    #[test]
    fn test_operators_longest_match() {
        let kinds = token_kinds("<= < >= > == = != ! && ||");
        assert_eq!(kinds, vec![
            TokenKind::LessThanEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThanEqual,
            TokenKind::GreaterThan,
            TokenKind::EqualsEquals,
            TokenKind::Assign,
            TokenKind::NotEquals,
            TokenKind::NotOp,
            TokenKind::AndOp,
            TokenKind::OrOp,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_punctuation() {
        let kinds = token_kinds("( ) [ ] { } ; :");
        assert_eq!(kinds, vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftSquare,
            TokenKind::RightSquare,
            TokenKind::LeftCurly,
            TokenKind::RightCurly,
            TokenKind::SemiColon,
            TokenKind::Colon,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_comments() {
        let tokens = lex("foo // comment\nbar /* block\n comment */ baz // trailing");
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["foo", "bar", "baz", "kEndOfFile"]);
    }

    #[test]
    fn test_interleaved_comments_and_whitespace() {
        let tokens = lex(" /* a */ // b\n /* c */\n\t// d\n");
        assert_eq!(tokens.kinds(), vec![TokenKind::EndOfFile]);
    }

    #[test]
    fn test_string_literal() {
        let tokens = lex(r#"print("hello world");"#);
        assert_eq!(tokens.get(2).unwrap().kind, TokenKind::StringConst);
        assert_eq!(tokens.get(2).unwrap().lexeme, "\"hello world\"");
    }

    #[test]
    fn test_lexical_errors_are_tokens() {
        let tokens = lex("x @ y");
        assert_eq!(tokens.kinds(), vec![
            TokenKind::VariableName,
            TokenKind::LexicalError,
            TokenKind::VariableName,
            TokenKind::EndOfFile,
        ]);
        assert_eq!(tokens.lexical_errors(), 1);
    }

    #[test]
    fn test_lexical_error_consumes_one_char() {
        let tokens = lex("é1");
        assert_eq!(tokens.get(0).unwrap().lexeme, "é");
        assert_eq!(tokens.get(1).unwrap().kind, TokenKind::IntConst);
    }

    #[test]
    fn test_location_tracking() {
        let tokens = lex("foo\n  bar");
        assert_eq!(tokens.get(0).unwrap().span.start_line, 1);
        let bar = tokens.get(1).unwrap();
        assert_eq!(bar.span.start_line, 2);
        assert_eq!(bar.span.start_column, 3);
        assert_eq!(bar.span.start_offset, 6);
    }

    #[test]
    fn test_custom_table_breaks_ties_by_order() {
        let config = LexerConfig::from_patterns(&[
            (TokenKind::VariableName, "[a-z]+"),
            (TokenKind::IfKwd, "if"),
        ])
        .unwrap();
        let tokens = Scanner::with_config(config).scan("if");
        assert_eq!(tokens.kinds(), vec![TokenKind::VariableName, TokenKind::EndOfFile]);
    }

    #[test]
    fn test_skip_len() {
        let config = LexerConfig::standard().unwrap();
        assert_eq!(config.skip_len("  /* x */ y"), 10);
        assert_eq!(config.skip_len("y"), 0);
    }
}
