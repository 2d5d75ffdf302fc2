//! # mdsl - Matrix DSL to C++ Translator
//!
//! A front end for a small matrix-oriented language, including:
//! - A maximal-munch, regex-driven scanner
//! - A recursive-descent parser with Pratt-style expression parsing
//! - Reprinting of the AST as DSL source
//! - C++ code generation against a matrix runtime header
//! - A Rust matrix runtime with the same shape as that header
//!
//! ## Architecture
//!
//! ```text
//! Source → Scanner → Tokens → Parser → AST → { Reprint, C++ Emit }
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use mdsl::prelude::*;
//!
//! let source = r#"
//!     main () {
//!         matrix m [3 : 3] i : j = if i == j then 1 else 0;
//!         print(m);
//!     }
//! "#;
//!
//! let root = mdsl::parse(source)?;
//! let code = mdsl::translate(source, &TranslateConfig::default())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod frontend;
pub mod codegen;
pub mod runtime;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::frontend::{
        parse, parse_with, BinaryOp, Decl, Expr, LexerConfig, ParseResult, Parser, Root,
        ScalarType, Scanner, Stmt, Stmts, Token, TokenKind, TokenList,
    };
    pub use crate::codegen::{CppCodeGen, EmitCpp, Unparse, Unparser};
    pub use crate::runtime::Matrix;
    pub use crate::utils::errors::*;
    pub use crate::TranslateConfig;
}

use anyhow::{bail, Context, Result};
use codegen::{EmitCpp, Unparse};
use frontend::{Root, Scanner, TokenList};
use log::debug;
use runtime::Matrix;
use std::path::Path;

/// Configuration for C++ emission and reprinting.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Include path of the matrix runtime header in emitted code
    pub runtime_header: String,
    /// Indent unit for nested statements
    pub indent: String,
    /// Emit the `#include` and `using namespace std;` preamble
    pub prelude: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            runtime_header: "include/Matrix.h".to_string(),
            indent: utils::pretty::DEFAULT_INDENT.to_string(),
            prelude: true,
        }
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan source text into tokens with the standard terminal table.
pub fn scan(source: &str) -> Result<TokenList> {
    let scanner = Scanner::new().context("failed to build the standard scanner")?;
    Ok(scanner.scan(source))
}

/// Main entry point for parsing source code.
pub fn parse(source: &str) -> Result<Root> {
    frontend::parse(source)
        .into_result()
        .context("failed to parse program")
}

/// Reprint a tree as DSL source.
pub fn unparse(root: &Root) -> String {
    root.unparse()
}

/// Full pipeline: parse source and emit C++.
pub fn translate(source: &str, config: &TranslateConfig) -> Result<String> {
    let root = parse(source)?;
    Ok(root.emit_cpp(config))
}

/// Check that reprinting reaches a fixed point.
///
/// Parses and reprints three times and fails unless the second and third
/// reprints equal the first. Returns the stable reprint.
pub fn verify_round_trip(source: &str) -> Result<String> {
    let first = unparse(&parse(source)?);
    let second = unparse(&parse(&first).context("reprinted program does not parse")?);
    let third = unparse(&parse(&second).context("second reprint does not parse")?);

    if first != second || second != third {
        bail!(
            "reprint is not stable:\n--- first ---\n{}--- second ---\n{}--- third ---\n{}",
            first,
            second,
            third
        );
    }
    debug!("round trip stable ({} bytes)", first.len());
    Ok(first)
}

/// Load a matrix file, naming the path in any error.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<Matrix> {
    let path = path.as_ref();
    Matrix::matrix_read(path).with_context(|| format!("failed to read matrix from {}", path.display()))
}
