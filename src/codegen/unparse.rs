//! Reprinting an AST as DSL source.
//!
//! The output re-parses to the same tree, so reprinting is a fixed point
//! after the first pass. No parentheses are added: the tree keeps the
//! ones written in the source as [`Expr::Paren`] nodes.

use crate::frontend::ast::*;
use crate::utils::pretty::{CodeFormatter, DEFAULT_INDENT};

/// Writes DSL text for a tree.
#[derive(Debug)]
pub struct Unparser {
    f: CodeFormatter,
    indent: String,
}

impl Default for Unparser {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Unparser {
    /// Create an unparser that indents nested statements with `indent`.
    pub fn new(indent: &str) -> Self {
        Self {
            f: CodeFormatter::new(indent),
            indent: indent.to_string(),
        }
    }

    /// The text written so far.
    pub fn finish(self) -> String {
        self.f.finish()
    }

    /// `name () { ... }`
    pub fn root(&mut self, root: &Root) {
        self.f.write_verbatim(&root.name);
        self.f.writeln(" () {");
        self.f.indent();
        self.stmts(&root.stmts);
        self.f.dedent();
        self.f.writeln("}");
    }

    /// Every statement, one after the other.
    pub fn stmts(&mut self, stmts: &Stmts) {
        for stmt in &stmts.stmts {
            self.stmt(stmt);
        }
    }

    /// One statement, ending with a newline.
    pub fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.decl(decl),
            Stmt::Assign { var, expr } => {
                let line = format!("{} = {};\n", var, self.expr(expr));
                self.f.write_verbatim(&line);
            }
            Stmt::AssignMatrix { var, row, col, expr } => {
                let line = format!(
                    "{}[{} : {}] = {};\n",
                    var,
                    self.expr(row),
                    self.expr(col),
                    self.expr(expr)
                );
                self.f.write_verbatim(&line);
            }
            Stmt::Print(expr) => {
                let line = format!("print({});\n", self.expr(expr));
                self.f.write_verbatim(&line);
            }
            Stmt::If { cond, then_stmt } => {
                let header = format!("if ({})", self.expr(cond));
                self.f.write_verbatim(&header);
                self.body(then_stmt);
            }
            Stmt::IfElse { cond, then_stmt, else_stmt } => {
                let header = format!("if ({})", self.expr(cond));
                self.f.write_verbatim(&header);
                self.body(then_stmt);
                self.f.write("else");
                self.body(else_stmt);
            }
            Stmt::Block(stmts) => {
                self.f.writeln("{");
                self.f.indent();
                self.stmts(stmts);
                self.f.dedent();
                self.f.writeln("}");
            }
            Stmt::Repeat { var, from, to, body } => {
                let header = format!("repeat ({} = {} to {})", var, self.expr(from), self.expr(to));
                self.f.write_verbatim(&header);
                self.body(body);
            }
            Stmt::While { cond, body } => {
                let header = format!("while ({})", self.expr(cond));
                self.f.write_verbatim(&header);
                self.body(body);
            }
            Stmt::Empty => self.f.writeln(";"),
        }
    }

    /// One declaration, ending with a newline.
    pub fn decl(&mut self, decl: &Decl) {
        let line = match decl {
            Decl::Simple { ty, var } => format!("{} {};\n", ty, var),
            Decl::ShortMatrix { var, init } => format!("matrix {} = {};\n", var, self.expr(init)),
            Decl::LongMatrix { var, rows, cols, row_var, col_var, init } => format!(
                "matrix {} [{} : {}] {} : {} = {};\n",
                var,
                self.expr(rows),
                self.expr(cols),
                row_var,
                col_var,
                self.expr(init)
            ),
        };
        self.f.write_verbatim(&line);
    }

    /// The body of `if`, `else`, `repeat` or `while`. A block opens on the
    /// header line; any other statement goes on its own, indented line.
    fn body(&mut self, stmt: &Stmt) {
        if let Stmt::Block(_) = stmt {
            self.f.write(" ");
            self.stmt(stmt);
        } else {
            self.f.newline();
            self.f.indent();
            self.stmt(stmt);
            self.f.dedent();
        }
    }

    /// DSL text for an expression.
    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Let { stmts, body } => {
                let mut text = String::from("let ");
                for stmt in &stmts.stmts {
                    text.push_str(&self.inline_stmt(stmt));
                    text.push(' ');
                }
                text.push_str(&format!("in {} end", self.expr(body)));
                text
            }
            Expr::Binary { op, left, right } => {
                format!("{} {} {}", self.expr(left), op, self.expr(right))
            }
            Expr::Call { name, arg } => format!("{}({})", name, self.expr(arg)),
            Expr::MatrixElement { var, row, col } => {
                format!("{}[{} : {}]", var, self.expr(row), self.expr(col))
            }
            Expr::If { cond, then_expr, else_expr } => format!(
                "if {} then {} else {}",
                self.expr(cond),
                self.expr(then_expr),
                self.expr(else_expr)
            ),
            Expr::Paren(inner) => format!("({})", self.expr(inner)),
            Expr::Var(name) | Expr::Const(name) => name.clone(),
            Expr::Not(inner) => format!("!{}", self.expr(inner)),
            Expr::True => "True".to_string(),
            Expr::False => "False".to_string(),
        }
    }

    /// A statement written at indent zero, without its final newline.
    fn inline_stmt(&self, stmt: &Stmt) -> String {
        let mut u = Unparser::new(&self.indent);
        u.stmt(stmt);
        let text = u.finish();
        match text.strip_suffix('\n') {
            Some(trimmed) => trimmed.to_string(),
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Unparse;
    use crate::frontend::parse;

    fn reprint(source: &str) -> String {
        let result = parse(source);
        assert!(result.ok(), "{}", result.error_message());
        result.ast().unwrap().unparse()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(reprint("main(){}"), "main () {\n}\n");
    }

    #[test]
    fn test_simple_statements() {
        let out = reprint("p(){int x;x=1+2*3;print(x);;}");
        assert_eq!(out, "p () {\n    int x;\n    x = 1 + 2 * 3;\n    print(x);\n    ;\n}\n");
    }

    #[test]
    fn test_matrix_forms() {
        let out = reprint("p(){matrix m[2:3]i:j=i*j; m[0:1]=m[1:0]; matrix n = m;}");
        assert_eq!(
            out,
            "p () {\n    matrix m [2 : 3] i : j = i * j;\n    m[0 : 1] = m[1 : 0];\n    matrix n = m;\n}\n"
        );
    }

    #[test]
    fn test_control_flow_layout() {
        let out = reprint("p(){if(a){x=1;}else y=2; while(b) ; repeat(i=0 to 3){}}");
        assert_eq!(
            out,
            "p () {\n    if (a) {\n        x = 1;\n    }\n    else\n        y = 2;\n    \
             while (b)\n        ;\n    repeat (i = 0 to 3) {\n    }\n}\n"
        );
    }

    #[test]
    fn test_expressions() {
        let e = parse("p(){x = let int y; y = 2; in !(y < 3) && True end;}");
        let root = e.ast().unwrap();
        match &root.stmts.stmts[0] {
            Stmt::Assign { expr, .. } => {
                assert_eq!(expr.unparse(), "let int y; y = 2; in !(y < 3) && True end");
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_let_without_statements() {
        assert_eq!(reprint("p(){x = let in 1 end;}"), "p () {\n    x = let in 1 end;\n}\n");
    }

    #[test]
    fn test_string_with_newline_is_kept() {
        let out = reprint("p(){ { print(\"a\nb\"); } }");
        assert_eq!(out, "p () {\n    {\n        print(\"a\nb\");\n    }\n}\n");
    }

    #[test]
    fn test_custom_indent() {
        let root = parse("p(){{x=1;}}").into_result().unwrap();
        let mut u = Unparser::new("\t");
        u.root(&root);
        assert_eq!(u.finish(), "p () {\n\t{\n\t\tx = 1;\n\t}\n}\n");
    }
}
