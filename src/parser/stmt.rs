use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{IdentifierExpr, StringExpr},
        statements::{
            BlockStmt, BreakStmt, ContinueStmt, Declarative, DeclarativeStmt, EnumStmt,
            ErrorDeclStmt, ExpressionStmt, GoStmt, IncludeStmt, ReturnStmt, VarDeclStmt,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement starting at the current token. On success the
/// current token is the statement's last token.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_kind()).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.skip_semicolon();

    Some(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// Parses statements up to the matching `}`, with `current` on the `{`.
///
/// Keeps going after a failed statement so later ones still get checked, but
/// the block as a whole is then absent.
pub fn parse_block(parser: &mut Parser) -> Option<BlockStmt> {
    let token = parser.current().clone();
    parser.advance();

    let mut body = vec![];
    let mut failed = false;

    while !parser.current_is(TokenKind::CloseCurly) {
        if parser.current_is(TokenKind::EOF) {
            parser.add_error(ErrorImpl::UnclosedBlock);
            return None;
        }

        let start = parser.checkpoint();
        match parse_stmt(parser) {
            Some(stmt) => {
                body.push(stmt);
                parser.advance();
            }
            None => {
                failed = true;
                parser.synchronize(start, true);
            }
        }
    }

    if failed {
        return None;
    }

    Some(BlockStmt { token, body })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Option<Stmt> {
    Some(Stmt::Block(parse_block(parser)?))
}

/// `let name = value` and `const name = value`.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    let is_constant = token.kind == TokenKind::Const;

    if !parser.peek_is(TokenKind::Identifier) {
        parser.add_error(ErrorImpl::UnexpectedTokenDetailed {
            token: parser.peek_kind(),
            message: String::from("expected identifier during variable declaration"),
        });
        return None;
    }
    parser.advance();
    let name = IdentifierExpr {
        token: parser.current().clone(),
        value: parser.current().value.clone(),
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.skip_semicolon();

    Some(Stmt::VarDecl(VarDeclStmt {
        token,
        name,
        is_constant,
        value,
    }))
}

/// `return`, with a value unless the statement ends right away.
pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
        return Some(Stmt::Return(ReturnStmt { token, value: None }));
    }
    if parser.peek_is(TokenKind::CloseCurly) || parser.peek_is(TokenKind::EOF) {
        return Some(Stmt::Return(ReturnStmt { token, value: None }));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.skip_semicolon();

    Some(Stmt::Return(ReturnStmt {
        token,
        value: Some(value),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    parser.skip_semicolon();
    Some(Stmt::Break(BreakStmt { token }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    parser.skip_semicolon();
    Some(Stmt::Continue(ContinueStmt { token }))
}

/// `include "path"`
pub fn parse_include_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    parser.expect_peek(TokenKind::String)?;
    let path = StringExpr {
        token: parser.current().clone(),
        value: parser.current().value.clone(),
    };
    parser.skip_semicolon();

    Some(Stmt::Include(IncludeStmt { token, path }))
}

/// `enum Name { A = expr, B = expr }`
pub fn parse_enum_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr {
        token: parser.current().clone(),
        value: parser.current().value.clone(),
    };
    parser.expect_peek(TokenKind::OpenCurly)?;

    let mut members = vec![];
    while !parser.peek_is(TokenKind::CloseCurly) {
        if parser.peek_is(TokenKind::EOF) {
            parser.add_error(ErrorImpl::UnclosedConstruct { construct: "enum" });
            return None;
        }

        parser.expect_peek(TokenKind::Identifier)?;
        let member = IdentifierExpr {
            token: parser.current().clone(),
            value: parser.current().value.clone(),
        };
        parser.expect_peek(TokenKind::Assignment)?;
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        members.push((member, value));

        if !parser.peek_is(TokenKind::CloseCurly) {
            parser.expect_peek(TokenKind::Comma)?;
        }
    }
    parser.advance();

    Some(Stmt::Enum(EnumStmt {
        token,
        name,
        members,
    }))
}

/// `go expr`
pub fn parse_go_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    parser.advance();
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.skip_semicolon();

    Some(Stmt::Go(GoStmt { token, expression }))
}

/// `throw`, `defer` and the logging keywords, each followed by one
/// expression.
pub fn parse_declarative_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    let Some(declarative) = Declarative::from_kind(token.kind) else {
        parser.add_error(ErrorImpl::UnexpectedToken { token: token.kind });
        return None;
    };
    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.skip_semicolon();

    Some(Stmt::Declarative(DeclarativeStmt {
        token,
        declarative,
        value,
    }))
}

/// `error Name(a, b)` declares an error type; `error <expr>` reports one.
///
/// The two share a prefix, so the expression is parsed first: a call on a
/// bare name whose arguments are all bare names is a declaration.
pub fn parse_error_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current().clone();
    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.skip_semicolon();

    if let Expr::Call(call) = &value {
        if let Expr::Identifier(name) = call.function.as_ref() {
            let parameters: Option<Vec<IdentifierExpr>> = call
                .arguments
                .iter()
                .map(|argument| match argument {
                    Expr::Identifier(parameter) => Some(parameter.clone()),
                    _ => None,
                })
                .collect();

            if let Some(parameters) = parameters {
                return Some(Stmt::ErrorDecl(ErrorDeclStmt {
                    token,
                    name: name.clone(),
                    parameters,
                }));
            }
        }
    }

    Some(Stmt::Declarative(DeclarativeStmt {
        token,
        declarative: Declarative::Error,
        value,
    }))
}
