//! C++ code generation.
//!
//! The emitted program targets the matrix runtime header: a `matrix`
//! class with a `(rows, cols)` constructor, `access(row, col)` returning
//! a pointer to the cell, a static `matrix_read(path)` factory, and
//! `+`/`*` operators.

use crate::frontend::ast::*;
use crate::utils::pretty::CodeFormatter;
use crate::TranslateConfig;
use log::debug;

/// Callee name that turns a call into the runtime's static file loader.
pub const MATRIX_READ: &str = "matrix_read";

/// Argument name that turns a call into a method call on that argument.
pub const METHOD_RECEIVER: &str = "data";

/// C++ code generator.
pub struct CppCodeGen {
    config: TranslateConfig,
}

impl CppCodeGen {
    /// Create a generator for `config`.
    pub fn new(config: TranslateConfig) -> Self {
        Self { config }
    }

    /// Generate a complete C++ translation unit.
    pub fn generate(&self, root: &Root) -> String {
        let mut f = self.formatter();

        if self.config.prelude {
            f.writeln("#include <iostream>");
            f.writeln("#include <stdio.h>");
            f.writeln("#include <string>");
            f.writeln("#include <math.h>");
            f.writeln(&format!("#include \"{}\"", self.config.runtime_header));
            f.newline();
            f.writeln("using namespace std;");
            f.newline();
        }

        f.write_verbatim(&format!("int {} () {{\n", root.name));
        f.indent();
        self.emit_stmts(&mut f, &root.stmts);
        f.dedent();
        f.writeln("}");

        let code = f.finish();
        debug!("emitted {} bytes of C++ for '{}'", code.len(), root.name);
        code
    }

    /// C++ for a statement sequence.
    pub fn generate_stmts(&self, stmts: &Stmts) -> String {
        let mut f = self.formatter();
        self.emit_stmts(&mut f, stmts);
        f.finish()
    }

    /// C++ for one statement.
    pub fn generate_stmt(&self, stmt: &Stmt) -> String {
        let mut f = self.formatter();
        self.emit_stmt(&mut f, stmt);
        f.finish()
    }

    /// C++ for one declaration.
    pub fn generate_decl(&self, decl: &Decl) -> String {
        let mut f = self.formatter();
        self.emit_decl(&mut f, decl);
        f.finish()
    }

    fn formatter(&self) -> CodeFormatter {
        CodeFormatter::new(&self.config.indent)
    }

    fn emit_stmts(&self, f: &mut CodeFormatter, stmts: &Stmts) {
        for stmt in &stmts.stmts {
            self.emit_stmt(f, stmt);
        }
    }

    fn emit_stmt(&self, f: &mut CodeFormatter, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.emit_decl(f, decl),
            Stmt::Assign { var, expr } => {
                f.write_verbatim(&format!("{} = {};\n", var, self.expr(expr)));
            }
            Stmt::AssignMatrix { var, row, col, expr } => {
                f.write_verbatim(&format!(
                    "{} = {};\n",
                    self.access(var, &self.expr(row), &self.expr(col)),
                    self.expr(expr)
                ));
            }
            Stmt::Print(expr) => {
                f.write_verbatim(&format!("cout << {};\n", self.expr(expr)));
            }
            Stmt::If { cond, then_stmt } => {
                f.write_verbatim(&format!("if ({})", self.expr(cond)));
                self.emit_body(f, then_stmt);
            }
            Stmt::IfElse { cond, then_stmt, else_stmt } => {
                f.write_verbatim(&format!("if ({})", self.expr(cond)));
                self.emit_body(f, then_stmt);
                f.write("else");
                self.emit_body(f, else_stmt);
            }
            Stmt::Block(stmts) => {
                f.writeln("{");
                f.indent();
                self.emit_stmts(f, stmts);
                f.dedent();
                f.writeln("}");
            }
            Stmt::Repeat { var, from, to, body } => {
                f.write_verbatim(&format!(
                    "for ({v} = {}; {v} <= {}; {v}++)",
                    self.expr(from),
                    self.expr(to),
                    v = var
                ));
                self.emit_body(f, body);
            }
            Stmt::While { cond, body } => {
                f.write_verbatim(&format!("while ({})", self.expr(cond)));
                self.emit_body(f, body);
            }
            Stmt::Empty => f.writeln(";"),
        }
    }

    fn emit_body(&self, f: &mut CodeFormatter, stmt: &Stmt) {
        if let Stmt::Block(_) = stmt {
            f.write(" ");
            self.emit_stmt(f, stmt);
        } else {
            f.newline();
            f.indent();
            self.emit_stmt(f, stmt);
            f.dedent();
        }
    }

    fn emit_decl(&self, f: &mut CodeFormatter, decl: &Decl) {
        match decl {
            Decl::Simple { ty, var } => {
                f.write_verbatim(&format!("{} {};\n", cpp_type(*ty), var));
            }
            Decl::ShortMatrix { var, init } => {
                f.write_verbatim(&format!("matrix {}({});\n", var, self.expr(init)));
            }
            Decl::LongMatrix { var, rows, cols, row_var, col_var, init } => {
                let rows = self.expr(rows);
                let cols = self.expr(cols);
                f.write_verbatim(&format!("matrix {}({}, {});\n", var, rows, cols));
                f.write_verbatim(&format!(
                    "for (int {i} = 0; {i} < {}; {i}++) {{\n",
                    rows,
                    i = row_var
                ));
                f.indent();
                f.write_verbatim(&format!(
                    "for (int {j} = 0; {j} < {}; {j}++) {{\n",
                    cols,
                    j = col_var
                ));
                f.indent();
                f.write_verbatim(&format!(
                    "{} = {};\n",
                    self.access(var, row_var, col_var),
                    self.expr(init)
                ));
                f.dedent();
                f.writeln("}");
                f.dedent();
                f.writeln("}");
            }
        }
    }

    /// C++ for an expression.
    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Let { stmts, body } => {
                let mut text = String::from("({ ");
                for stmt in &stmts.stmts {
                    let code = self.generate_stmt(stmt);
                    text.push_str(code.strip_suffix('\n').unwrap_or(&code));
                    text.push(' ');
                }
                text.push_str(&format!("({}); }})", self.expr(body)));
                text
            }
            Expr::Binary { op, left, right } => {
                format!("{} {} {}", self.expr(left), op, self.expr(right))
            }
            Expr::Call { name, arg } => self.call(name, arg),
            Expr::MatrixElement { var, row, col } => {
                self.access(var, &self.expr(row), &self.expr(col))
            }
            Expr::If { cond, then_expr, else_expr } => format!(
                "({} ? {} : {})",
                self.expr(cond),
                self.expr(then_expr),
                self.expr(else_expr)
            ),
            Expr::Paren(inner) => format!("({})", self.expr(inner)),
            Expr::Var(name) | Expr::Const(name) => name.clone(),
            Expr::Not(inner) => format!("!{}", self.expr(inner)),
            Expr::True => "true".to_string(),
            Expr::False => "false".to_string(),
        }
    }

    /// `name(arg)` has no syntax of its own for construction or method
    /// calls, so the callee and argument text decide which one it means.
    fn call(&self, name: &str, arg: &Expr) -> String {
        let arg = self.expr(arg);
        if arg == METHOD_RECEIVER {
            format!("{}.{}()", arg, name)
        } else if name == MATRIX_READ {
            format!("matrix::{}({})", MATRIX_READ, arg)
        } else {
            format!("{}({})", name, arg)
        }
    }

    fn access(&self, var: &str, row: &str, col: &str) -> String {
        format!("*({}.access({}, {}))", var, row, col)
    }
}

/// C++ spelling of a scalar declaration type.
pub fn cpp_type(ty: ScalarType) -> &'static str {
    match ty {
        ScalarType::Int => "int",
        ScalarType::Float => "float",
        ScalarType::String => "string",
        ScalarType::Boolean => "bool",
    }
}
