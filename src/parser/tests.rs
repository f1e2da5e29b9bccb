//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Assignment, indexing and slicing
//! - Variable, function, enum and error declarations
//! - Control flow (`if`, loops, `switch`, `match`)
//! - Patterns inside `match`
//! - Diagnostics and recovery

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        statements::Declarative,
    },
    lexer::lexer::tokenize,
};

use super::parser::{parse, Parser};

fn parse_str(source: &str) -> (Parser, Program) {
    let tokens = tokenize(source.to_string()).unwrap();
    parse(tokens)
}

fn parse_clean(source: &str) -> Program {
    let (parser, program) = parse_str(source);
    assert!(
        parser.errors().is_empty(),
        "unexpected errors: {:?}",
        parser.errors()
    );
    program
}

fn expr_at(program: &Program, index: usize) -> &Expr {
    program.statements[index]
        .as_ref()
        .and_then(Stmt::as_expression)
        .expect("expression statement")
}

fn printed(source: &str) -> String {
    parse_clean(source).to_string()
}

#[test]
fn test_higher_precedence_binds_first() {
    assert_eq!(printed("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(printed("1 * 2 + 3"), "((1 * 2) + 3)");
    assert_eq!(printed("a == b && c"), "((a == b) && c)");
    assert_eq!(printed("a < b == c > d"), "((a < b) == (c > d))");
    assert_eq!(printed("a ?? b + c"), "(a ?? (b + c))");
    assert_eq!(printed("x in xs || y"), "((x in xs) || y)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(printed("a - b - c"), "((a - b) - c)");
    assert_eq!(printed("a / b / c"), "((a / b) / c)");
}

#[test]
fn test_assignment_is_right_associative() {
    let program = parse_clean("a = b = c");

    assert_eq!(program.to_string(), "(a = (b = c))");
    let Expr::Assign(outer) = expr_at(&program, 0) else {
        panic!("expected assignment");
    };
    assert_eq!(outer.name.value, "a");
    assert!(matches!(outer.value.as_ref(), Expr::Assign(_)));
}

#[test]
fn test_prefix_and_grouping() {
    assert_eq!(printed("-a * b"), "((-a) * b)");
    assert_eq!(printed("!(a && b)"), "(!(a && b))");
    assert_eq!(printed("(a + b) * c"), "((a + b) * c)");
}

#[test]
fn test_power_and_modulus() {
    assert_eq!(printed("a * b ** c"), "(a * (b ** c))");
    assert_eq!(printed("a ** b % c"), "(a ** (b % c))");
}

#[test]
fn test_range_binds_looser_than_arithmetic() {
    assert_eq!(printed("1..5"), "(1..5)");
    assert_eq!(printed("a..b + 1"), "(a..(b + 1))");
}

#[test]
fn test_call_and_member() {
    assert_eq!(printed("add(1, 2 * 3)"), "add(1, (2 * 3))");
    assert_eq!(printed("obj.name"), "obj.name");
    assert_eq!(printed("obj.say(1, 2)"), "obj.say(1, 2)");
    assert_eq!(printed("a.b.c()"), "a.b.c()");
    assert_eq!(printed("f()"), "f()");

    let program = parse_clean("obj.say(x)");
    let Expr::Method(method) = expr_at(&program, 0) else {
        panic!("expected method call");
    };
    assert_eq!(method.method.value, "say");
    assert_eq!(method.arguments.len(), 1);
}

#[test]
fn test_index() {
    let program = parse_clean("a[1]");

    let Expr::Index(index) = expr_at(&program, 0) else {
        panic!("expected index");
    };
    assert!(matches!(index.index.as_ref(), Expr::Integer(i) if i.value == 1));
}

#[test]
fn test_slices() {
    let cases = [
        ("a[1:3]", true, true),
        ("a[:3]", false, true),
        ("a[1:]", true, false),
        ("a[:]", false, false),
    ];

    for (source, has_start, has_end) in cases {
        let program = parse_clean(source);
        let Expr::Slice(slice) = expr_at(&program, 0) else {
            panic!("expected slice for {}", source);
        };
        assert_eq!(slice.start.is_some(), has_start, "{}", source);
        assert_eq!(slice.end.is_some(), has_end, "{}", source);
    }

    assert_eq!(printed("a[i + 1:]"), "(a[(i + 1):])");
}

#[test]
fn test_assignment_targets() {
    let program = parse_clean("x += 1; a[0] = 2; p.name = 3; p.count -= 1");

    assert!(matches!(expr_at(&program, 0), Expr::CompoundAssign(c) if c.operator == "+="));
    assert!(matches!(expr_at(&program, 1), Expr::IndexAssign(i) if i.operator == "="));
    assert!(matches!(expr_at(&program, 2), Expr::PropertyAssign(p) if p.target.property.value == "name"));
    assert!(matches!(expr_at(&program, 3), Expr::PropertyAssign(p) if p.operator == "-="));
}

#[test]
fn test_invalid_assignment_target() {
    let (parser, program) = parse_str("1 = 2");

    assert_eq!(program.statements, vec![None]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.diagnostics()[0].get_error_name(),
        "InvalidAssignmentTarget"
    );
    assert!(parser.errors()[0].contains("expected an identifier or indexable expression"));
}

#[test]
fn test_postfix_applies_to_previous_token() {
    let program = parse_clean("x++");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(expr_at(&program, 0).to_string(), "x");
    let Expr::Postfix(postfix) = expr_at(&program, 1) else {
        panic!("expected postfix");
    };
    assert_eq!(postfix.token.value, "x");
    assert_eq!(postfix.operator, "++");
}

#[test]
fn test_dangling_postfix_is_reported() {
    let (parser, program) = parse_str("let a = ++");

    assert_eq!(
        parser.errors(),
        vec!["Line 1: expected a name or index before `++`, got Assignment"]
    );
    assert_eq!(program.statements, vec![None]);

    let program = parse_clean("items[0]--");
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_let_and_const() {
    let program = parse_clean("let x = 5;\nconst PI = 3.14");

    let Some(Stmt::VarDecl(let_stmt)) = &program.statements[0] else {
        panic!("expected let");
    };
    assert!(!let_stmt.is_constant);
    assert_eq!(let_stmt.name.value, "x");

    let Some(Stmt::VarDecl(const_stmt)) = &program.statements[1] else {
        panic!("expected const");
    };
    assert!(const_stmt.is_constant);
    assert!(matches!(&const_stmt.value, Expr::Float(f) if f.value == 3.14));
}

#[test]
fn test_integer_radixes() {
    let program = parse_clean("0xff; 0b101; 0o17; 42");
    let values: Vec<i64> = program
        .parsed()
        .filter_map(Stmt::as_expression)
        .map(|expr| match expr {
            Expr::Integer(i) => i.value,
            _ => panic!("expected integer"),
        })
        .collect();

    assert_eq!(values, vec![255, 5, 15, 42]);
}

#[test]
fn test_return_break_continue() {
    let program = parse_clean("func() { return }; func() { return 1; }; break; continue");

    let Expr::Function(bare) = expr_at(&program, 0) else {
        panic!("expected function");
    };
    assert!(matches!(&bare.body.body[0], Stmt::Return(r) if r.value.is_none()));
    let Expr::Function(valued) = expr_at(&program, 1) else {
        panic!("expected function");
    };
    assert!(matches!(&valued.body.body[0], Stmt::Return(r) if r.value.is_some()));
    assert!(matches!(program.statements[2], Some(Stmt::Break(_))));
    assert!(matches!(program.statements[3], Some(Stmt::Continue(_))));
}

#[test]
fn test_include() {
    let program = parse_clean("include \"lib/util.vint\"");

    let Some(Stmt::Include(include)) = &program.statements[0] else {
        panic!("expected include");
    };
    assert_eq!(include.path.value, "lib/util.vint");
}

#[test]
fn test_array_and_dict_literals() {
    assert_eq!(printed("let xs = [1, 2, 3,]"), "let xs = [1, 2, 3]");
    assert_eq!(printed("let d = {\"a\": 1, b: 2}"), "let d = {\"a\": 1, b: 2}");
    assert_eq!(printed("let e = {}"), "let e = {}");
}

#[test]
fn test_if_else_chain() {
    let program = parse_clean("if (x > 1) { a } else if (x < 0) { b } else { c }");

    let Expr::If(outer) = expr_at(&program, 0) else {
        panic!("expected if");
    };
    let alternative = outer.alternative.as_ref().expect("else branch");
    let Some(Expr::If(inner)) = alternative.body[0].as_expression() else {
        panic!("expected nested if");
    };
    assert!(inner.alternative.is_some());
}

#[test]
fn test_loops() {
    let program = parse_clean(
        "while (i < 10) { i += 1 }\nfor k, v in items { print(k) }\nfor x in xs { }\nrepeat 3 { }\nrepeat (n) 5 { }",
    );

    assert!(matches!(expr_at(&program, 0), Expr::While(_)));
    let Expr::For(with_key) = expr_at(&program, 1) else {
        panic!("expected for");
    };
    assert_eq!(with_key.key.as_ref().map(|k| k.value.as_str()), Some("k"));
    assert_eq!(with_key.value.value, "v");
    let Expr::For(without_key) = expr_at(&program, 2) else {
        panic!("expected for");
    };
    assert!(without_key.key.is_none());
    assert!(matches!(expr_at(&program, 3), Expr::Repeat(r) if r.variable == "i"));
    assert!(matches!(expr_at(&program, 4), Expr::Repeat(r) if r.variable == "n"));
}

#[test]
fn test_switch() {
    let program = parse_clean("switch (x) { case 1, 2 { a } case default { b } }");

    let Expr::Switch(switch) = expr_at(&program, 0) else {
        panic!("expected switch");
    };
    assert_eq!(switch.cases.len(), 2);
    assert_eq!(switch.cases[0].values.len(), 2);
    assert!(switch.default_case().is_some());
}

#[test]
fn test_switch_duplicate_default() {
    for source in [
        "switch (x) { case 1 { a } default { b } default { c } }",
        "switch (x) { default { b } default { c } }",
        "switch (x) { default { b } case 2 { } case 3 { } default { c } }",
    ] {
        let (parser, program) = parse_str(source);

        assert_eq!(parser.errors().len(), 1, "{}", source);
        assert_eq!(parser.diagnostics()[0].get_error_name(), "DuplicateDefault");
        assert!(parser.errors()[0].contains('2'));
        assert_eq!(program.statements, vec![None]);
    }
}

#[test]
fn test_switch_unclosed() {
    let (parser, _) = parse_str("switch (x) { case 1 { }");

    assert!(parser.errors()[0].contains("unclosed switch"));
}

#[test]
fn test_match_array_pattern_with_rest() {
    let program = parse_clean("match (x) { [a, ...rest] -> a, _ -> 0 }");

    let Expr::Match(matched) = expr_at(&program, 0) else {
        panic!("expected match");
    };
    assert_eq!(matched.cases.len(), 2);

    let Expr::ArrayPattern(pattern) = &matched.cases[0].pattern else {
        panic!("expected array pattern");
    };
    assert_eq!(pattern.elements.len(), 1);
    assert!(matches!(&pattern.elements[0], Expr::Identifier(i) if i.value == "a"));
    assert_eq!(pattern.rest.as_ref().map(|r| r.value.as_str()), Some("rest"));

    assert!(matches!(&matched.cases[1].pattern, Expr::Identifier(i) if i.value == "_"));
    assert_eq!(matched.cases[1].body.body.len(), 1);
}

#[test]
fn test_match_guard_and_dict_pattern() {
    let program = parse_clean(
        "match p { {\"x\": 0} => { origin() } n if n > 0 => \"pos\", _ => \"neg\" }",
    );

    let Expr::Match(matched) = expr_at(&program, 0) else {
        panic!("expected match");
    };
    assert!(matches!(&matched.cases[0].pattern, Expr::Dict(_)));
    assert!(matched.cases[0].guard.is_none());
    assert_eq!(
        matched.cases[1].guard.as_ref().map(|g| g.to_string()),
        Some(String::from("(n > 0)"))
    );
}

#[test]
fn test_rest_pattern_errors() {
    let cases = [
        ("match x { [...a, b] => 1 }", "RestPatternNotLast"),
        ("match x { [...a, ...b] => 1 }", "DuplicateRestPattern"),
        ("match x { [...1] => 1 }", "ExpectedRestIdentifier"),
    ];

    for (source, name) in cases {
        let (parser, program) = parse_str(source);

        assert_eq!(parser.diagnostics()[0].get_error_name(), name, "{}", source);
        assert_eq!(program.statements[0], None);
    }
}

#[test]
fn test_function_defaults() {
    let program = parse_clean("function f(a, b = 1) {}");

    let Expr::Function(function) = expr_at(&program, 0) else {
        panic!("expected function");
    };
    assert_eq!(function.name.as_ref().map(|n| n.value.as_str()), Some("f"));
    assert_eq!(function.parameters.len(), 2);
    assert!(function.defaults.contains_key("b"));
    assert!(!function.defaults.contains_key("a"));
}

#[test]
fn test_default_before_required_parameter() {
    let (parser, program) = parse_str("function f(a = 1, b) {}");

    assert_eq!(program.statements, vec![None]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.diagnostics()[0].get_error_name(),
        "DefaultParameterOrder"
    );
}

#[test]
fn test_async_await_chan_go() {
    let program = parse_clean(
        "let f = async func() { await g() }\nlet ch = chan(10)\nlet open = chan\ngo worker(ch)",
    );

    let Some(Stmt::VarDecl(decl)) = &program.statements[0] else {
        panic!("expected let");
    };
    assert!(matches!(&decl.value, Expr::AsyncFunction(_)));
    assert_eq!(decl.value.to_string(), "async func() { (await g()) }");
    assert_eq!(program.statements[1].as_ref().map(|s| s.to_string()), Some(String::from("let ch = chan(10)")));
    assert_eq!(program.statements[2].as_ref().map(|s| s.to_string()), Some(String::from("let open = chan")));
    assert!(matches!(program.statements[3], Some(Stmt::Go(_))));
}

#[test]
fn test_import_deduplicates() {
    let program = parse_clean("import time, json, time");

    let Expr::Import(import) = expr_at(&program, 0) else {
        panic!("expected import");
    };
    let names: Vec<&str> = import.names.iter().map(|n| n.value.as_str()).collect();
    assert_eq!(names, vec!["time", "json"]);
}

#[test]
fn test_package() {
    let program = parse_clean("package util { let x = 1 }");

    let Expr::Package(package) = expr_at(&program, 0) else {
        panic!("expected package");
    };
    assert_eq!(package.name.value, "util");
    assert_eq!(package.body.body.len(), 1);
}

#[test]
fn test_enum_keeps_order() {
    let program = parse_clean("enum Color { RED = 1, GREEN = 2, BLUE = 3 }");

    let Some(Stmt::Enum(declaration)) = &program.statements[0] else {
        panic!("expected enum");
    };
    let names: Vec<&str> = declaration
        .members
        .iter()
        .map(|(name, _)| name.value.as_str())
        .collect();
    assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
    assert!(declaration.member("GREEN").is_some());
}

#[test]
fn test_error_declaration_and_declaratives() {
    let program = parse_clean("error NotFound(path)\nerror \"boom\"\ninfo \"ready\"; defer close(f); throw err");

    let Some(Stmt::ErrorDecl(declaration)) = &program.statements[0] else {
        panic!("expected error declaration");
    };
    assert_eq!(declaration.name.value, "NotFound");
    assert_eq!(declaration.parameters[0].value, "path");

    let kinds: Vec<Declarative> = program
        .parsed()
        .filter_map(|stmt| match stmt {
            Stmt::Declarative(d) => Some(d.declarative),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            Declarative::Error,
            Declarative::Info,
            Declarative::Defer,
            Declarative::Throw
        ]
    );
}

#[test]
fn test_at_and_spread() {
    assert_eq!(printed("@.name"), "@.name");
    assert_eq!(printed("f(...args)"), "f(...args)");
}

#[test]
fn test_unclosed_block() {
    let (parser, program) = parse_str("{ let x = 1");

    assert_eq!(program.statements, vec![None]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.diagnostics()[0].get_error_name(), "UnclosedBlock");
    assert!(parser.errors()[0].contains("unclosed block"));
}

#[test]
fn test_missing_prefix_handler() {
    let (parser, _) = parse_str("let x = ;");

    assert_eq!(parser.errors(), vec!["Line 1: no prefix parse function for Semicolon"]);
}

#[test]
fn test_expectation_mismatch() {
    let (parser, _) = parse_str("if x { }");

    assert_eq!(parser.diagnostics()[0].get_error_name(), "ExpectedToken");
    assert!(parser.errors()[0].starts_with("Line 1: expected OpenParen"));
}

#[test]
fn test_error_lines_follow_source() {
    let (parser, _) = parse_str("\n\n\nlet = 5;");

    assert_eq!(parser.errors().len(), 1);
    assert!(parser.errors()[0].starts_with("Line 4:"));
}

#[test]
fn test_recovery_continues_after_failed_statement() {
    let (parser, program) = parse_str("let = 1;\nlet y = 2;");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert!(program.statements[0].is_none());
    assert_eq!(
        program.statements[1].as_ref().map(|s| s.to_string()),
        Some(String::from("let y = 2"))
    );
}

#[test]
fn test_failed_statement_inside_block_aborts_block() {
    let (parser, program) = parse_str("{ let = 1; let y = 2 }\nlet z = 3");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert!(program.statements[0].is_none());
    assert!(program.statements[1].is_some());
}

#[test]
fn test_recovery_keeps_outer_block_after_nested_failure() {
    let source = "func main() {\n  if (x) {\n    let = 1\n  }\n  print(y)\n}\n";
    let (parser, program) = parse_str(source);

    assert_eq!(
        parser.errors(),
        vec!["Line 3: expected identifier during variable declaration, got Assignment"]
    );
    assert_eq!(program.statements, vec![None]);
}

#[test]
fn test_recovery_through_several_nested_blocks() {
    let source = "{ while (a) { if (b) { let = 1 } } print(c) }\nlet z = 3";
    let (parser, program) = parse_str(source);

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert!(program.statements[0].is_none());
    assert_eq!(
        program.statements[1].as_ref().map(|s| s.to_string()),
        Some(String::from("let z = 3"))
    );
}

#[test]
fn test_failed_switch_inside_block_keeps_block_brace() {
    let source = "func f() {\n  switch (a) { default { } default { } }\n  g()\n}\nlet ok = 1";
    let (parser, program) = parse_str(source);

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.diagnostics()[0].get_error_name(), "DuplicateDefault");
    assert_eq!(program.statements.len(), 2);
    assert!(program.statements[1].is_some());
}

#[test]
fn test_failing_keyword_is_not_parsed_twice() {
    let (parser, program) = parse_str("let f = func 1");

    assert_eq!(parser.errors(), vec!["Line 1: expected OpenParen, got Integer"]);
    assert_eq!(program.statements, vec![None]);
}

#[test]
fn test_keyword_on_failed_token_still_recovers() {
    let (parser, program) = parse_str("foo(\nlet y = 2");

    assert_eq!(parser.errors(), vec!["Line 2: no prefix parse function for Let"]);
    assert_eq!(program.parsed().count(), 1);
}

#[test]
fn test_import_call_is_an_expression() {
    let program = parse_clean("let m = import(\"x\")");

    assert_eq!(program.to_string(), "let m = import(\"x\")");
}

#[test]
fn test_each_bad_line_reports_once() {
    let (parser, program) = parse_str("let a = )\nlet b = 2\nlet c = ]\n");

    assert_eq!(parser.errors().len(), 2);
    assert!(parser.errors()[0].starts_with("Line 1:"));
    assert!(parser.errors()[1].starts_with("Line 3:"));
    assert_eq!(program.parsed().count(), 1);
}

#[test]
fn test_empty_program() {
    let program = parse_clean("");

    assert!(program.statements.is_empty());
}
