//! Unit tests for AST nodes: token accessors and printing.

use crate::{
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    parser::parser::parse,
};

use super::{
    ast::{Expr, Program, Stmt},
    expressions::{ArrayPatternExpr, IdentifierExpr, IntegerExpr},
    statements::{BlockStmt, Declarative, ExpressionStmt},
};

fn token(kind: TokenKind, value: &str, line: usize) -> Token {
    Token {
        kind,
        value: value.to_string(),
        line,
    }
}

fn ident(name: &str) -> IdentifierExpr {
    IdentifierExpr {
        token: token(TokenKind::Identifier, name, 1),
        value: name.to_string(),
    }
}

fn program(source: &str) -> Program {
    let (_, program) = parse(tokenize(source.to_string()).unwrap());
    program
}

#[test]
fn test_nodes_carry_their_token() {
    let program = program("\nlet x = 1\nfoo(2)");

    let let_stmt = program.statements[0].as_ref().unwrap();
    assert_eq!(let_stmt.token().kind, TokenKind::Let);
    assert_eq!(let_stmt.token().line, 2);

    let call = program.statements[1].as_ref().unwrap();
    let expr = call.as_expression().unwrap();
    assert_eq!(expr.token().kind, TokenKind::OpenParen);
    assert_eq!(expr.token().line, 3);
}

#[test]
fn test_program_display_marks_absent_statements() {
    let program = Program {
        statements: vec![
            Some(Stmt::Expression(ExpressionStmt {
                token: token(TokenKind::Identifier, "a", 1),
                expression: Expr::Identifier(ident("a")),
            })),
            None,
        ],
    };

    assert_eq!(program.to_string(), "a\n<error>");
    assert!(program.has_absent_statements());
    assert_eq!(program.parsed().count(), 1);
}

#[test]
fn test_array_pattern_display() {
    let pattern = ArrayPatternExpr {
        token: token(TokenKind::OpenBracket, "[", 1),
        elements: vec![Expr::Identifier(ident("a"))],
        rest: Some(ident("rest")),
    };
    assert_eq!(pattern.to_string(), "[a, ...rest]");

    let only_rest = ArrayPatternExpr {
        elements: vec![],
        ..pattern
    };
    assert_eq!(only_rest.to_string(), "[...rest]");
}

#[test]
fn test_block_display() {
    let empty = BlockStmt {
        token: token(TokenKind::OpenCurly, "{", 1),
        body: vec![],
    };
    assert_eq!(empty.to_string(), "{ }");

    let block = BlockStmt {
        body: vec![
            Stmt::Expression(ExpressionStmt {
                token: token(TokenKind::Integer, "1", 1),
                expression: Expr::Integer(IntegerExpr {
                    token: token(TokenKind::Integer, "1", 1),
                    value: 1,
                }),
            }),
            Stmt::Expression(ExpressionStmt {
                token: token(TokenKind::Identifier, "b", 1),
                expression: Expr::Identifier(ident("b")),
            }),
        ],
        ..empty
    };
    assert_eq!(block.to_string(), "{ 1; b }");
}

#[test]
fn test_control_flow_display() {
    assert_eq!(
        program("if (a) { b } else { c }").to_string(),
        "if (a) { b } else { c }"
    );
    assert_eq!(
        program("for k, v in m { }").to_string(),
        "for k, v in m { }"
    );
    assert_eq!(
        program("switch (x) { case 1, 2 { a } default { b } }").to_string(),
        "switch (x) { case 1, 2 { a } default { b } }"
    );
    assert_eq!(
        program("match x { [h, ...t] => h }").to_string(),
        "match x { [h, ...t] => { h } }"
    );
}

#[test]
fn test_declaration_display() {
    assert_eq!(
        program("func add(a, b = 2) { return a + b }").to_string(),
        "func add(a, b = 2) { return (a + b) }"
    );
    assert_eq!(
        program("enum E { A = 1, B = 2 }").to_string(),
        "enum E { A = 1, B = 2 }"
    );
    assert_eq!(program("error Oops(a, b)").to_string(), "error Oops(a, b)");
    assert_eq!(program("import os, json").to_string(), "import os, json");
    assert_eq!(program("warn \"low\"").to_string(), "warn \"low\"");
}

#[test]
fn test_declarative_keywords() {
    assert_eq!(Declarative::from_kind(TokenKind::Trace), Some(Declarative::Trace));
    assert_eq!(Declarative::from_kind(TokenKind::Let), None);
    assert_eq!(Declarative::Critical.keyword(), "critical");
}
