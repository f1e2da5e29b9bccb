//! Integration tests for end-to-end parsing.
//!
//! These tests drive the complete front end, from source text through
//! tokenization and parsing, and check the resulting program and diagnostics.

use vint::{
    ast::ast::{Expr, Stmt},
    lexer::lexer::{tokenize, Lexer},
    parse_source,
    parser::parser::{parse, Parser},
    render_diagnostic,
};

const PROGRAM: &str = r#"#!/usr/bin/env vint
// Inventory report
import time, json

enum Level { LOW = 1, HIGH = 2 }

error OutOfStock(item)

let stock = {"apples": 3, "pears": 0}
const names = ["apples", "pears"]

func check(name, minimum = 1) {
    let count = stock[name]
    if (count < minimum) {
        warn "low stock"
        throw OutOfStock(name)
    } else {
        return count
    }
}

for index, name in names {
    info name
}

let summary = match (names) {
    [first, ...rest] if first != "" => first,
    _ => null
}

switch (stock["apples"]) {
    case 0, 1 { todo "reorder" }
    default { success "ok" }
}

repeat (n) 3 {
    stock["apples"] += 1
}

let worker = async func(ch) {
    let item = await ch.receive()
    return item
}
go worker(chan(2))

let window = names[1:]
defer close("done")
"#;

#[test]
fn test_parse_complete_program() {
    let (program, errors) = parse_source(PROGRAM).unwrap();

    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert!(!program.has_absent_statements());
    assert_eq!(program.statements.len(), 14);
}

#[test]
fn test_program_shapes() {
    let (program, _) = parse_source(PROGRAM).unwrap();
    let statements: Vec<&Stmt> = program.parsed().collect();

    assert!(matches!(statements[0].as_expression(), Some(Expr::Import(_))));
    assert!(matches!(statements[1], Stmt::Enum(_)));
    assert!(matches!(statements[2], Stmt::ErrorDecl(_)));
    assert!(matches!(statements[5].as_expression(), Some(Expr::Function(_))));
    assert!(matches!(statements[6].as_expression(), Some(Expr::For(_))));
    assert!(matches!(statements[8].as_expression(), Some(Expr::Switch(_))));
    assert!(matches!(statements[9].as_expression(), Some(Expr::Repeat(_))));
    assert!(matches!(statements[11], Stmt::Go(_)));
    assert!(matches!(statements[13], Stmt::Declarative(_)));

    let Stmt::VarDecl(summary) = statements[7] else {
        panic!("expected let");
    };
    let Expr::Match(matched) = &summary.value else {
        panic!("expected match");
    };
    assert_eq!(matched.cases.len(), 2);
    assert!(matched.cases[0].guard.is_some());
}

#[test]
fn test_streaming_lexer_matches_batch() {
    let source = "let total = price * (1 + tax) - discount\nprint(total[0:2])";

    let (_, batch) = parse(tokenize(source.to_string()).unwrap());
    let mut parser = Parser::new(Lexer::new(source.to_string()));
    let streamed = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(batch, streamed);
    assert_eq!(
        streamed.to_string(),
        "let total = ((price * (1 + tax)) - discount)\nprint((total[0:2]))"
    );
}

#[test]
fn test_illegal_character_while_streaming() {
    let mut parser = Parser::new(Lexer::new("let a = $\nlet b = 2".to_string()));
    let program = parser.parse_program();

    assert_eq!(parser.errors(), vec!["Line 1: no prefix parse function for Illegal"]);
    assert_eq!(program.parsed().count(), 1);
}

#[test]
fn test_lexer_error_stops_batch_parse() {
    let error = parse_source("let a = 1\nlet s = 'open").unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_multiple_diagnostics_in_order() {
    let source = "let a = 1\nlet = 2\nfunc f(x = 1, y) { }\nswitch (a) { default { } default { } }\nlet ok = 3\n";
    let (program, errors) = parse_source(source).unwrap();

    let lines: Vec<usize> = errors.iter().map(|e| e.get_line()).collect();
    assert_eq!(lines, vec![2, 3, 4]);
    assert_eq!(program.parsed().count(), 2);
}

#[test]
fn test_rendered_diagnostic_shows_source_line() {
    let source = "let x = 1\nif (x > 1 {\n}\n";
    let (_, errors) = parse_source(source).unwrap();

    let rendered = render_diagnostic(source, "main.vint", &errors[0]);
    assert!(rendered.starts_with("Error: ExpectedToken"));
    assert!(rendered.contains("-> main.vint"));
    assert!(rendered.contains("2 | if (x > 1 {"));
    assert!(rendered.ends_with("Line 2: expected CloseParen, got OpenCurly"));
}
