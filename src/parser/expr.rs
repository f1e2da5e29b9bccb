use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{
            ArrayExpr, ArrayPatternExpr, AssignExpr, AtExpr, AwaitExpr, BooleanExpr, CallExpr,
            CaseClause, ChannelExpr, CompoundAssignExpr, DictExpr, FloatExpr, ForExpr,
            FunctionExpr, IdentifierExpr, IfExpr, ImportExpr, IndexAssignExpr, IndexExpr,
            InfixExpr, IntegerExpr, MatchCase, MatchExpr, MethodExpr, NullExpr, PackageExpr,
            PostfixExpr, PrefixExpr, PropertyAssignExpr, PropertyExpr, RangeExpr, RepeatExpr,
            SliceExpr, SpreadExpr, StringExpr, SwitchExpr, WhileExpr,
        },
        statements::{BlockStmt, ExpressionStmt},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block};

/// The Pratt loop.
///
/// On entry `current` is the first token of the expression; on success it is
/// the last token the expression consumed.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    let kind = parser.current_kind();

    // Postfix operators apply to the token before them and never continue
    // into the infix loop.
    if let Some(postfix_fn) = parser.get_postfix_lookup().get(&kind).copied() {
        return postfix_fn(parser);
    }

    let Some(nud_fn) = parser.get_nud_lookup().get(&kind).copied() else {
        parser.add_error(ErrorImpl::UnexpectedToken { token: kind });
        return None;
    };
    let mut left = nud_fn(parser)?;

    while !parser.peek_is(TokenKind::Semicolon) && parser.peek_precedence() > bp {
        parser.advance();

        let kind = parser.current_kind();
        let Some(led_fn) = parser.get_led_lookup().get(&kind).copied() else {
            parser.add_error(ErrorImpl::UnexpectedContinuation { token: kind });
            return None;
        };
        let bp = parser.current_precedence();
        left = led_fn(parser, left, bp)?;
    }

    Some(left)
}

/// Parses `expr, expr, ...` up to `end`, starting with `current` on the
/// opening delimiter. A trailing comma is allowed.
pub fn parse_expression_list(parser: &mut Parser, end: TokenKind) -> Option<Vec<Expr>> {
    let mut list = vec![];

    if parser.peek_is(end) {
        parser.advance();
        return Some(list);
    }

    parser.advance();
    list.push(parse_expr(parser, BindingPower::Default)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        if parser.peek_is(end) {
            break;
        }
        parser.advance();
        list.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_peek(end)?;
    Some(list)
}

fn identifier(token: &Token) -> IdentifierExpr {
    IdentifierExpr {
        token: token.clone(),
        value: token.value.clone(),
    }
}

/// Expects an identifier in the lookahead and consumes it.
fn expect_identifier(parser: &mut Parser) -> Option<IdentifierExpr> {
    parser.expect_peek(TokenKind::Identifier)?;
    Some(identifier(parser.current()))
}

/// Wraps a lone expression into a one-statement block.
fn expression_block(expression: Expr) -> BlockStmt {
    let token = expression.token().clone();
    BlockStmt {
        token: token.clone(),
        body: vec![Stmt::Expression(ExpressionStmt { token, expression })],
    }
}

// LITERALS

pub fn parse_identifier_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(identifier(parser.current())))
}

/// Accepts decimal, `0x`, `0o` and `0b` literals.
fn parse_integer_literal(text: &str) -> Option<i64> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(digits) = lower.strip_prefix("0x") {
        (digits.to_string(), 16)
    } else if let Some(digits) = lower.strip_prefix("0o") {
        (digits.to_string(), 8)
    } else if let Some(digits) = lower.strip_prefix("0b") {
        (digits.to_string(), 2)
    } else {
        (lower, 10)
    };

    i64::from_str_radix(&digits, radix).ok()
}

pub fn parse_integer_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let Some(value) = parse_integer_literal(&token.value) else {
        parser.add_error(ErrorImpl::NumberParseError { token: token.value });
        return None;
    };

    Some(Expr::Integer(IntegerExpr { token, value }))
}

pub fn parse_float_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let Ok(value) = token.value.parse::<f64>() else {
        parser.add_error(ErrorImpl::NumberParseError { token: token.value });
        return None;
    };

    Some(Expr::Float(FloatExpr { token, value }))
}

pub fn parse_string_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let value = token.value.clone();
    Some(Expr::String(StringExpr { token, value }))
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let value = token.kind == TokenKind::True;
    Some(Expr::Boolean(BooleanExpr { token, value }))
}

pub fn parse_null_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Null(NullExpr {
        token: parser.current().clone(),
    }))
}

pub fn parse_at_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::At(AtExpr {
        token: parser.current().clone(),
    }))
}

// COMPOSITES

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;
    Some(expr)
}

pub fn parse_array_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let elements = parse_expression_list(parser, TokenKind::CloseBracket)?;
    Some(Expr::Array(ArrayExpr { token, elements }))
}

pub fn parse_dict_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let mut pairs = vec![];

    while !parser.peek_is(TokenKind::CloseCurly) {
        if parser.peek_is(TokenKind::EOF) {
            parser.add_error(ErrorImpl::UnclosedConstruct { construct: "dict" });
            return None;
        }

        parser.advance();
        let key = parse_expr(parser, BindingPower::Default)?;
        parser.expect_peek(TokenKind::Colon)?;
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        pairs.push((key, value));

        if !parser.peek_is(TokenKind::CloseCurly) {
            parser.expect_peek(TokenKind::Comma)?;
        }
    }
    parser.advance();

    Some(Expr::Dict(DictExpr { token, pairs }))
}

/// `...name` outside an array pattern.
pub fn parse_spread_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let name = expect_identifier(parser)?;
    Some(Expr::Spread(SpreadExpr { token, name }))
}

// OPERATORS

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let operator = token.value.clone();
    parser.advance();
    let right = parse_expr(parser, BindingPower::Prefix)?;

    Some(Expr::Prefix(PrefixExpr {
        token,
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Option<Expr> {
    let token = parser.current().clone();
    let operator = token.value.clone();
    parser.advance();
    let right = parse_expr(parser, bp)?;

    Some(Expr::Infix(InfixExpr {
        token,
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

/// `x++`: reached with the operator as the current token, so the operand is
/// the token before it. That token must end a name, index or member access.
pub fn parse_postfix_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.previous().clone();
    let operator = parser.current().value.clone();

    if !matches!(token.kind, TokenKind::Identifier | TokenKind::CloseBracket) {
        parser.add_error(ErrorImpl::UnexpectedTokenDetailed {
            token: token.kind,
            message: format!("expected a name or index before `{}`", operator),
        });
        return None;
    }
    Some(Expr::Postfix(PostfixExpr { token, operator }))
}

pub fn parse_range_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Option<Expr> {
    let token = parser.current().clone();
    parser.advance();
    let end = parse_expr(parser, bp)?;

    Some(Expr::Range(RangeExpr {
        token,
        start: Box::new(left),
        end: Box::new(end),
    }))
}

/// `=` and the compound forms. The value is parsed below assignment power so
/// chains nest to the right.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current().clone();
    let operator = token.value.clone();

    if !matches!(left, Expr::Identifier(_) | Expr::Index(_) | Expr::Property(_)) {
        parser.add_error(ErrorImpl::InvalidAssignmentTarget {
            operator,
            found: left.to_string(),
        });
        return None;
    }

    parser.advance();
    let value = Box::new(parse_expr(parser, BindingPower::Default)?);

    let expr = match left {
        Expr::Identifier(name) if token.kind == TokenKind::Assignment => {
            Expr::Assign(AssignExpr { token, name, value })
        }
        Expr::Identifier(name) => Expr::CompoundAssign(CompoundAssignExpr {
            token,
            name,
            operator,
            value,
        }),
        Expr::Property(target) => Expr::PropertyAssign(PropertyAssignExpr {
            token,
            target,
            operator,
            value,
        }),
        target => Expr::IndexAssign(IndexAssignExpr {
            token,
            target: Box::new(target),
            operator,
            value,
        }),
    };

    Some(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current().clone();
    let arguments = parse_expression_list(parser, TokenKind::CloseParen)?;

    Some(Expr::Call(CallExpr {
        token,
        function: Box::new(left),
        arguments,
    }))
}

/// `a[i]`, `a[i:j]`, `a[:j]`, `a[i:]` and `a[:]`, told apart with one token
/// of lookahead after the bracket and after the first expression.
pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current().clone();

    if parser.peek_is(TokenKind::Colon) {
        parser.advance();
        return parse_slice_end(parser, token, left, None);
    }

    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;

    if parser.peek_is(TokenKind::Colon) {
        parser.advance();
        return parse_slice_end(parser, token, left, Some(index));
    }

    parser.expect_peek(TokenKind::CloseBracket)?;
    Some(Expr::Index(IndexExpr {
        token,
        left: Box::new(left),
        index: Box::new(index),
    }))
}

/// Finishes a slice with `current` on the `:`.
fn parse_slice_end(
    parser: &mut Parser,
    token: Token,
    left: Expr,
    start: Option<Expr>,
) -> Option<Expr> {
    let end = if parser.peek_is(TokenKind::CloseBracket) {
        None
    } else {
        parser.advance();
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    };
    parser.expect_peek(TokenKind::CloseBracket)?;

    Some(Expr::Slice(SliceExpr {
        token,
        left: Box::new(left),
        start: start.map(Box::new),
        end,
    }))
}

/// `obj.name` or `obj.name(args)`.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current().clone();
    let name = expect_identifier(parser)?;

    if parser.peek_is(TokenKind::OpenParen) {
        parser.advance();
        let arguments = parse_expression_list(parser, TokenKind::CloseParen)?;
        return Some(Expr::Method(MethodExpr {
            token,
            object: Box::new(left),
            method: name,
            arguments,
        }));
    }

    Some(Expr::Property(PropertyExpr {
        token,
        object: Box::new(left),
        property: name,
    }))
}

// CONTROL FLOW

/// Parses `( expr )`, starting with the opening parenthesis in the lookahead.
fn parse_condition(parser: &mut Parser) -> Option<Expr> {
    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;
    Some(condition)
}

/// Parses a `{ ... }` body, starting with the brace in the lookahead.
fn parse_body(parser: &mut Parser) -> Option<BlockStmt> {
    parser.expect_peek(TokenKind::OpenCurly)?;
    parse_block(parser)
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let condition = parse_condition(parser)?;
    let consequence = parse_body(parser)?;

    let mut alternative = None;
    if parser.peek_is(TokenKind::Else) {
        parser.advance();
        if parser.peek_is(TokenKind::If) {
            parser.advance();
            let nested = parse_if_expr(parser)?;
            alternative = Some(expression_block(nested));
        } else {
            alternative = Some(parse_body(parser)?);
        }
    }

    Some(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_while_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let condition = parse_condition(parser)?;
    let body = parse_body(parser)?;

    Some(Expr::While(WhileExpr {
        token,
        condition: Box::new(condition),
        body,
    }))
}

/// `for value in iterable {}` or `for key, value in iterable {}`.
pub fn parse_for_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let first = expect_identifier(parser)?;

    let (key, value) = if parser.peek_is(TokenKind::Comma) {
        parser.advance();
        let second = expect_identifier(parser)?;
        (Some(first), second)
    } else {
        (None, first)
    };

    parser.expect_peek(TokenKind::In)?;
    parser.advance();
    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_body(parser)?;

    Some(Expr::For(ForExpr {
        token,
        key,
        value,
        iterable: Box::new(iterable),
        body,
    }))
}

/// `repeat count {}` or `repeat (name) count {}`. The loop variable is `i`
/// unless named.
pub fn parse_repeat_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let mut variable = String::from("i");

    if parser.peek_is(TokenKind::OpenParen) {
        parser.advance();
        variable = expect_identifier(parser)?.value;
        parser.expect_peek(TokenKind::CloseParen)?;
    }

    parser.advance();
    let count = parse_expr(parser, BindingPower::Default)?;
    let body = parse_body(parser)?;

    Some(Expr::Repeat(RepeatExpr {
        token,
        variable,
        count: Box::new(count),
        body,
    }))
}

pub fn parse_switch_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let subject = parse_condition(parser)?;
    parser.expect_peek(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    while !parser.peek_is(TokenKind::CloseCurly) {
        if parser.peek_is(TokenKind::EOF) {
            parser.add_error(ErrorImpl::UnclosedConstruct { construct: "switch" });
            return None;
        }

        parser.advance();
        let case_token = parser.current().clone();
        let (default, values) = match parser.current_kind() {
            TokenKind::Default => (true, vec![]),
            TokenKind::Case => {
                parser.advance();
                if parser.current_is(TokenKind::Default) {
                    (true, vec![])
                } else {
                    let mut values = vec![parse_expr(parser, BindingPower::Default)?];
                    while parser.peek_is(TokenKind::Comma) {
                        parser.advance();
                        parser.advance();
                        values.push(parse_expr(parser, BindingPower::Default)?);
                    }
                    (false, values)
                }
            }
            other => {
                parser.add_error(ErrorImpl::UnexpectedTokenDetailed {
                    token: other,
                    message: String::from("expected `case` or `default` inside switch"),
                });
                return None;
            }
        };

        let body = parse_body(parser)?;
        cases.push(CaseClause {
            token: case_token,
            default,
            values,
            body,
        });
    }
    parser.advance();

    let defaults = cases.iter().filter(|case| case.default).count();
    if defaults > 1 {
        parser.add_error(ErrorImpl::DuplicateDefault { count: defaults });
        return None;
    }

    Some(Expr::Switch(SwitchExpr {
        token,
        subject: Box::new(subject),
        cases,
    }))
}

pub fn parse_match_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    parser.advance();
    let subject = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    while !parser.peek_is(TokenKind::CloseCurly) {
        if parser.peek_is(TokenKind::EOF) {
            parser.add_error(ErrorImpl::UnclosedConstruct { construct: "match" });
            return None;
        }

        parser.advance();
        let case_token = parser.current().clone();
        let pattern = parse_pattern(parser)?;

        let guard = if parser.peek_is(TokenKind::If) {
            parser.advance();
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        parser.expect_peek(TokenKind::Arrow)?;
        let body = if parser.peek_is(TokenKind::OpenCurly) {
            parser.advance();
            parse_block(parser)?
        } else {
            parser.advance();
            expression_block(parse_expr(parser, BindingPower::Default)?)
        };

        if parser.peek_is(TokenKind::Comma) {
            parser.advance();
        }

        cases.push(MatchCase {
            token: case_token,
            pattern,
            guard,
            body,
        });
    }
    parser.advance();

    Some(Expr::Match(MatchExpr {
        token,
        subject: Box::new(subject),
        cases,
    }))
}

// PATTERNS

/// A `match` case pattern, chosen by the current token alone.
pub fn parse_pattern(parser: &mut Parser) -> Option<Expr> {
    match parser.current_kind() {
        TokenKind::OpenBracket => parse_array_pattern(parser),
        TokenKind::OpenCurly => parse_dict_expr(parser),
        _ => parse_expr(parser, BindingPower::Default),
    }
}

/// `[p1, p2, ...rest]`. The rest binding is optional, single and last.
pub fn parse_array_pattern(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let mut elements = vec![];
    let mut rest: Option<IdentifierExpr> = None;

    if parser.peek_is(TokenKind::CloseBracket) {
        parser.advance();
        return Some(Expr::ArrayPattern(ArrayPatternExpr {
            token,
            elements,
            rest,
        }));
    }

    loop {
        parser.advance();

        if parser.current_is(TokenKind::Ellipsis) {
            if rest.is_some() {
                parser.add_error(ErrorImpl::DuplicateRestPattern);
                return None;
            }
            if !parser.peek_is(TokenKind::Identifier) {
                parser.add_error(ErrorImpl::ExpectedRestIdentifier {
                    found: parser.peek_kind(),
                });
                return None;
            }
            parser.advance();
            rest = Some(identifier(parser.current()));
        } else {
            if rest.is_some() {
                parser.add_error(ErrorImpl::RestPatternNotLast);
                return None;
            }
            elements.push(parse_pattern(parser)?);
        }

        if !parser.peek_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseBracket)?;
    Some(Expr::ArrayPattern(ArrayPatternExpr {
        token,
        elements,
        rest,
    }))
}

// DECLARATIONS

/// Parses a parameter list with `current` on the `(`. Once a parameter has
/// a default every later one needs one too.
fn parse_parameters(parser: &mut Parser) -> Option<(Vec<IdentifierExpr>, HashMap<String, Expr>)> {
    let mut parameters = vec![];
    let mut defaults = HashMap::new();

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Some((parameters, defaults));
    }

    loop {
        let parameter = expect_identifier(parser)?;

        if parser.peek_is(TokenKind::Assignment) {
            parser.advance();
            parser.advance();
            let default = parse_expr(parser, BindingPower::Default)?;
            defaults.insert(parameter.value.clone(), default);
        } else if !defaults.is_empty() {
            parser.add_error(ErrorImpl::DefaultParameterOrder {
                parameter: parameter.value,
            });
            return None;
        }
        parameters.push(parameter);

        if !parser.peek_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;
    Some((parameters, defaults))
}

/// Everything after the `func` keyword: optional name, parameters, body.
fn parse_function(parser: &mut Parser, token: Token) -> Option<FunctionExpr> {
    let name = if parser.peek_is(TokenKind::Identifier) {
        parser.advance();
        Some(identifier(parser.current()))
    } else {
        None
    };

    parser.expect_peek(TokenKind::OpenParen)?;
    let (parameters, defaults) = parse_parameters(parser)?;
    let body = parse_body(parser)?;

    Some(FunctionExpr {
        token,
        name,
        parameters,
        defaults,
        body,
    })
}

pub fn parse_function_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    Some(Expr::Function(parse_function(parser, token)?))
}

/// `async func ...`
pub fn parse_async_function_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    parser.expect_peek(TokenKind::Func)?;
    Some(Expr::AsyncFunction(parse_function(parser, token)?))
}

pub fn parse_await_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    parser.advance();
    let value = parse_expr(parser, BindingPower::Prefix)?;

    Some(Expr::Await(AwaitExpr {
        token,
        value: Box::new(value),
    }))
}

/// `chan` or `chan(size)`.
pub fn parse_channel_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();

    let size = if parser.peek_is(TokenKind::OpenParen) {
        parser.advance();
        parser.advance();
        let size = parse_expr(parser, BindingPower::Default)?;
        parser.expect_peek(TokenKind::CloseParen)?;
        Some(Box::new(size))
    } else {
        None
    };

    Some(Expr::Channel(ChannelExpr { token, size }))
}

/// `import a, b`. Repeated names are kept once.
pub fn parse_import_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let mut names: Vec<IdentifierExpr> = vec![];

    loop {
        let name = expect_identifier(parser)?;
        if !names.iter().any(|existing| existing.value == name.value) {
            names.push(name);
        }

        if !parser.peek_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    Some(Expr::Import(ImportExpr { token, names }))
}

pub fn parse_package_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current().clone();
    let name = expect_identifier(parser)?;
    let body = parse_body(parser)?;

    Some(Expr::Package(PackageExpr { token, name, body }))
}
