//! Integration tests for the scan / parse / reprint / emit pipeline.

use mdsl::prelude::*;
use mdsl::utils::Span;
use mdsl::{load_matrix, parse, translate, verify_round_trip};
use rstest::rstest;
use std::fs;
use std::path::PathBuf;

fn sample_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples").join(file)
}

fn read_sample(file: &str) -> String {
    fs::read_to_string(sample_path(file)).expect("Failed to read sample")
}

fn kinds(source: &str) -> Vec<TokenKind> {
    mdsl::scan(source).expect("Failed to build scanner").kinds()
}

// ---- Round trips ---------------------------------------------------------

#[rstest]
#[case("sample_1.dsl")]
#[case("sample_2.dsl")]
#[case("sample_3.dsl")]
#[case("forest_loss.dsl")]
fn test_reprint_is_stable(#[case] file: &str) {
    let source = read_sample(file);

    let result = mdsl::frontend::parse(&source);
    assert!(result.ok(), "{} failed to parse: {}", file, result.error_message());
    let up1 = result.ast().expect("no AST").unparse();
    assert!(!up1.is_empty());

    let up2 = parse(&up1).expect("first reprint does not parse").unparse();
    let up3 = parse(&up2).expect("second reprint does not parse").unparse();
    assert_eq!(up1, up2, "{}: reprint 1 != reprint 2", file);
    assert_eq!(up2, up3, "{}: reprint 2 != reprint 3", file);

    assert_eq!(verify_round_trip(&source).unwrap(), up1);
}

#[rstest]
#[case("sample_1.dsl")]
#[case("sample_2.dsl")]
#[case("sample_3.dsl")]
#[case("forest_loss.dsl")]
fn test_reprint_preserves_tree(#[case] file: &str) {
    let first = parse(&read_sample(file)).unwrap();
    let second = parse(&first.unparse()).unwrap();
    assert_eq!(first, second);
}

// ---- Scanner -------------------------------------------------------------

#[rstest]
#[case(TokenKind::IntKwd, "int", 3)]
#[case(TokenKind::FloatKwd, "float", 5)]
#[case(TokenKind::BoolKwd, "boolean", 7)]
#[case(TokenKind::StringKwd, "string", 6)]
#[case(TokenKind::MatrixKwd, "matrix", 6)]
#[case(TokenKind::LetKwd, "let", 3)]
#[case(TokenKind::InKwd, "in", 2)]
#[case(TokenKind::EndKwd, "end", 3)]
#[case(TokenKind::IfKwd, "if", 2)]
#[case(TokenKind::ThenKwd, "then", 4)]
#[case(TokenKind::ElseKwd, "else", 4)]
#[case(TokenKind::RepeatKwd, "repeat", 6)]
#[case(TokenKind::PrintKwd, "print", 5)]
#[case(TokenKind::WhileKwd, "while", 5)]
#[case(TokenKind::ToKwd, "to", 2)]
#[case(TokenKind::TrueKwd, "True", 4)]
#[case(TokenKind::FalseKwd, "False", 5)]
#[case(TokenKind::IntConst, "1234 ", 4)]
#[case(TokenKind::FloatConst, "12.34;", 5)]
#[case(TokenKind::FloatConst, ".", 1)]
#[case(TokenKind::StringConst, "\"a string\" x", 10)]
#[case(TokenKind::VariableName, "_x1 = 2", 3)]
#[case(TokenKind::LeftParen, "(", 1)]
#[case(TokenKind::RightParen, ")", 1)]
#[case(TokenKind::LeftCurly, "{", 1)]
#[case(TokenKind::RightCurly, "}", 1)]
#[case(TokenKind::LeftSquare, "[", 1)]
#[case(TokenKind::RightSquare, "]", 1)]
#[case(TokenKind::SemiColon, ";", 1)]
#[case(TokenKind::Colon, ":", 1)]
#[case(TokenKind::Assign, "=", 1)]
#[case(TokenKind::PlusSign, "+", 1)]
#[case(TokenKind::Star, "*", 1)]
#[case(TokenKind::Dash, "-", 1)]
#[case(TokenKind::ForwardSlash, "/", 1)]
#[case(TokenKind::LessThan, "<", 1)]
#[case(TokenKind::LessThanEqual, "<=", 2)]
#[case(TokenKind::GreaterThan, ">", 1)]
#[case(TokenKind::GreaterThanEqual, ">=", 2)]
#[case(TokenKind::EqualsEquals, "==", 2)]
#[case(TokenKind::NotEquals, "!=", 2)]
#[case(TokenKind::AndOp, "&&", 2)]
#[case(TokenKind::OrOp, "||", 2)]
#[case(TokenKind::NotOp, "!", 1)]
fn test_terminal_pattern_length(#[case] kind: TokenKind, #[case] text: &str, #[case] len: usize) {
    let config = LexerConfig::standard().unwrap();
    let pattern = config.pattern(kind).expect("kind has no pattern");
    assert_eq!(pattern.match_len(text), len);
}

#[test]
fn test_scan_whitespace_only() {
    let tokens = mdsl::scan("  ").unwrap();
    assert_eq!(tokens.len(), 1);
    let eof = tokens.head().unwrap();
    assert_eq!(eof.kind, TokenKind::EndOfFile);
    assert_eq!(eof.lexeme, "kEndOfFile");
    assert!(tokens.next(0).is_none());
}

#[test]
fn test_scan_comment_only() {
    assert_eq!(kinds(" /* a comment */ "), vec![TokenKind::EndOfFile]);
}

#[test]
fn test_scan_lexical_errors() {
    let tokens = mdsl::scan("$&1  ").unwrap();
    let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::LexicalError, "$"),
            (TokenKind::LexicalError, "&"),
            (TokenKind::IntConst, "1"),
            (TokenKind::EndOfFile, "kEndOfFile"),
        ]
    );
}

#[test]
fn test_scan_nums_vars() {
    assert_eq!(
        kinds(" 123 x 12.34 "),
        vec![TokenKind::IntConst, TokenKind::VariableName, TokenKind::FloatConst, TokenKind::EndOfFile]
    );
}

#[test]
fn test_scan_bad_syntax_good_tokens() {
    use TokenKind::*;
    let tokens = mdsl::scan(&read_sample("bad_syntax_good_tokens.dsl")).unwrap();
    assert_eq!(
        tokens.kinds(),
        vec![
            IntConst, IntConst, IntConst, IntConst,
            StringConst, StringConst, StringConst,
            FloatConst, FloatConst, FloatConst,
            MatrixKwd,
            SemiColon, Colon, ToKwd,
            LeftCurly, LeftParen, RightCurly, RightParen,
            PlusSign, Star, Dash, ForwardSlash,
            EqualsEquals, LessThanEqual, GreaterThanEqual, NotEquals,
            Assign,
            VariableName, VariableName, VariableName, VariableName,
            VariableName, VariableName, VariableName,
            IntKwd, FloatKwd, StringKwd,
            EndOfFile,
        ]
    );
    assert!(tokens.is_terminated());
    assert!(!parse(&read_sample("bad_syntax_good_tokens.dsl")).is_ok());
}

#[test]
fn test_scan_sample_has_no_lexical_errors() {
    let tokens = mdsl::scan(&read_sample("forest_loss.dsl")).unwrap();
    assert_eq!(tokens.lexical_errors(), 0);
    assert!(tokens.is_terminated());
}

// ---- Parse errors --------------------------------------------------------

#[test]
fn test_parse_result_reports_first_error() {
    let result = mdsl::frontend::parse("main () {\n  x = 1;\n  print(x)\n}");
    assert!(!result.ok());
    assert!(result.ast().is_none());
    let err = result.error().unwrap();
    assert!(!err.is_internal());
    assert_eq!(err.message, "Expected ';' but found '}'");
    assert_eq!(err.span.start_line, 4);
}

#[test]
fn test_handbuilt_tokens_without_eof_are_internal() {
    let tokens = TokenList::from_tokens(vec![
        Token::new(TokenKind::VariableName, "main", Span::dummy()),
        Token::new(TokenKind::LeftParen, "(", Span::dummy()),
    ]);
    let result = Parser::new(&tokens).parse();
    assert!(result.error().unwrap().is_internal());
}

// ---- C++ emission --------------------------------------------------------

#[test]
fn test_emit_matrix_program() {
    let code = translate(&read_sample("sample_2.dsl"), &TranslateConfig::default()).unwrap();
    assert!(code.starts_with("#include <iostream>\n"));
    assert!(code.contains("#include \"include/Matrix.h\"\n"));
    assert!(code.contains("int matmul () {\n"));
    assert!(code.contains("matrix a(matrix::matrix_read(\"a.data\"));\n"));
    assert!(code.contains("matrix c(a * b);\n"));
    assert!(code.contains("matrix id(n_rows(a), n_cols(a));\n"));
    assert!(code.contains("for (int i = 0; i < n_rows(a); i++) {\n"));
    assert!(code.contains("*(id.access(i, j)) = (i == j ? 1 : 0);\n"));
    assert!(code.contains("for (k = 0; k <= n_rows(a) - 1; k++) {\n"));
    assert!(code.contains("*(c.access(k, k)) = *(c.access(k, k)) + *(id.access(k, k));\n"));
    assert!(code.contains("cout << c;\n"));
    assert!(code.ends_with("}\n"));
}

#[test]
fn test_emit_scalars_and_control_flow() {
    let config = TranslateConfig { prelude: false, ..TranslateConfig::default() };
    let code = translate(&read_sample("sample_3.dsl"), &config).unwrap();
    assert!(code.starts_with("int control () {\n"));
    assert!(code.contains("bool flag;\n"));
    assert!(code.contains("acc = ({ int t; t = n * n; (t - (n + 1) / 2); });\n"));
    assert!(code.contains("flag = !(acc >= 10) || n != 5 && true;\n"));
    assert!(code.contains("cout << \"large\";\n"));
    assert!(!code.contains("print"));
}

#[test]
fn test_emit_respects_indent() {
    let config = TranslateConfig { prelude: false, indent: "\t".to_string(), ..TranslateConfig::default() };
    let code = translate(&read_sample("sample_1.dsl"), &config).unwrap();
    assert_eq!(
        code,
        "int main () {\n\tint x;\n\tfloat y;\n\tx = 3;\n\ty = x * 2.5 + 1;\n\tcout << x;\n\tcout << y;\n}\n"
    );
}

// ---- Matrix runtime ------------------------------------------------------

#[test]
fn test_load_matrix_file() {
    let path = std::env::temp_dir().join(format!("mdsl_matrix_{}.data", std::process::id()));
    fs::write(&path, "2 3\n1 2 3\n4 5 6\n").unwrap();

    let m = load_matrix(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!((m.n_rows(), m.n_cols()), (2, 3));
    assert_eq!(m[(1, 2)], 6.0);
    assert_eq!(m.get(0, 0), Some(1.0));
}

#[test]
fn test_load_sample_matrix() {
    let m = Matrix::matrix_read(sample_path("forest.data")).unwrap();
    assert_eq!(m[(0, 1)], 12.5);
    let doubled = (&m + &m).unwrap();
    assert_eq!(doubled[(1, 2)], 14.5);
}

#[test]
fn test_load_matrix_malformed_header() {
    let path = std::env::temp_dir().join(format!("mdsl_bad_header_{}.data", std::process::id()));
    fs::write(&path, "rows cols\n1 2\n").unwrap();

    let err = load_matrix(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(err.to_string().contains("failed to read matrix from"));
    assert!(matches!(
        err.downcast_ref::<MatrixError>(),
        Some(MatrixError::MalformedHeader(_))
    ));
}

#[test]
fn test_matrix_arithmetic() {
    assert!(Matrix::new(0, 3).is_err());
    assert!(Matrix::new(3, 0).is_err());

    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    assert_eq!((&a + &b).unwrap().as_slice(), &[6.0, 8.0, 10.0, 12.0]);
    assert_eq!((&a * &b).unwrap().as_slice(), &[19.0, 22.0, 43.0, 50.0]);

    let c = Matrix::new(3, 2).unwrap();
    assert!((&a + &c).is_err());
}
