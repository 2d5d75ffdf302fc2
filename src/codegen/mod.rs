//! Tree-to-text passes over the AST.
//!
//! Two independent walks are provided:
//! - [`unparse`] reprints a tree in the DSL's own surface syntax;
//! - [`cpp`] emits C++ against the matrix runtime header.
//!
//! Both are pure functions of the subtree they are given.

pub mod unparse;
pub mod cpp;

pub use cpp::CppCodeGen;
pub use unparse::Unparser;

use crate::frontend::ast::{Decl, Expr, Root, Stmt, Stmts};
use crate::TranslateConfig;

/// Reprint as DSL source text.
pub trait Unparse {
    /// The DSL text for this node.
    fn unparse(&self) -> String;
}

/// Emit as C++ source text.
pub trait EmitCpp {
    /// The C++ text for this node under `config`.
    fn emit_cpp(&self, config: &TranslateConfig) -> String;

    /// The C++ text for this node under the default configuration.
    fn cpp_code(&self) -> String {
        self.emit_cpp(&TranslateConfig::default())
    }
}

impl Unparse for Root {
    fn unparse(&self) -> String {
        let mut u = Unparser::default();
        u.root(self);
        u.finish()
    }
}

impl Unparse for Stmts {
    fn unparse(&self) -> String {
        let mut u = Unparser::default();
        u.stmts(self);
        u.finish()
    }
}

impl Unparse for Stmt {
    fn unparse(&self) -> String {
        let mut u = Unparser::default();
        u.stmt(self);
        u.finish()
    }
}

impl Unparse for Decl {
    fn unparse(&self) -> String {
        let mut u = Unparser::default();
        u.decl(self);
        u.finish()
    }
}

impl Unparse for Expr {
    fn unparse(&self) -> String {
        Unparser::default().expr(self)
    }
}

impl EmitCpp for Root {
    fn emit_cpp(&self, config: &TranslateConfig) -> String {
        CppCodeGen::new(config.clone()).generate(self)
    }
}

impl EmitCpp for Stmts {
    fn emit_cpp(&self, config: &TranslateConfig) -> String {
        CppCodeGen::new(config.clone()).generate_stmts(self)
    }
}

impl EmitCpp for Stmt {
    fn emit_cpp(&self, config: &TranslateConfig) -> String {
        CppCodeGen::new(config.clone()).generate_stmt(self)
    }
}

impl EmitCpp for Decl {
    fn emit_cpp(&self, config: &TranslateConfig) -> String {
        CppCodeGen::new(config.clone()).generate_decl(self)
    }
}

impl EmitCpp for Expr {
    fn emit_cpp(&self, config: &TranslateConfig) -> String {
        CppCodeGen::new(config.clone()).expr(self)
    }
}
