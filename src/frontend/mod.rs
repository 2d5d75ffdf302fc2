//! Frontend: Scanner, Parser, and AST for the matrix DSL.
//!
//! This module turns source text into an AST.
//!
//! ## Language Overview
//!
//! A program is a name, an empty parameter list and a block of statements:
//!
//! ```text
//! main () {
//!     matrix m = matrix_read("data/m.txt");
//!     matrix id [n_rows(m) : n_cols(m)] i : j = if i == j then 1 else 0;
//!     repeat (k = 0 to 3) {
//!         print(m[k : k]);
//!     }
//! }
//! ```

pub mod token;
pub mod pattern;
pub mod lexer;
pub mod ext_token;
pub mod ast;
pub mod parser;

// Re-exports
pub use lexer::{LexerConfig, Scanner};
pub use parser::{ParseResult, Parser};
pub use ast::*;
pub use token::{Token, TokenKind, TokenList};
pub use crate::utils::errors::ParseError;

/// Scan and parse `source` with the standard terminal table.
pub fn parse(source: &str) -> ParseResult {
    match Scanner::new() {
        Ok(scanner) => parse_with(&scanner, source),
        Err(e) => ParseResult::from(Err(ParseError::internal(e.to_string()))),
    }
}

/// Scan and parse `source` with an existing scanner.
pub fn parse_with(scanner: &Scanner, source: &str) -> ParseResult {
    let tokens = scanner.scan(source);
    Parser::new(&tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_documented_example() {
        let source = r#"
            main () {
                matrix m = matrix_read("data/m.txt");
                matrix id [n_rows(m) : n_cols(m)] i : j = if i == j then 1 else 0;
                repeat (k = 0 to 3) {
                    print(m[k : k]);
                }
            }
        "#;
        let result = parse(source);
        assert!(result.ok(), "{}", result.error_message());
        assert_eq!(result.ast().unwrap().stmts.len(), 3);
    }

    #[test]
    fn test_parser_reuses_scanner() {
        let scanner = Scanner::new().unwrap();
        assert!(parse_with(&scanner, "a () { }").ok());
        assert!(!parse_with(&scanner, "a ( { }").ok());
        assert!(parse_with(&scanner, "b () { ; }").ok());
    }
}
