use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Logical,
    Equality,
    Relational,
    Range,
    Additive,
    Multiplicative,
    Power,
    Modulus,
    Prefix,
    Call,
    Index,
    Member,
}

/// Every handler returns `None` once it has recorded a diagnostic; callers
/// propagate that without reporting again.
pub type StmtHandler = fn(&mut Parser) -> Option<Stmt>;
pub type NUDHandler = fn(&mut Parser) -> Option<Expr>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Option<Expr>;
pub type PostfixHandler = fn(&mut Parser) -> Option<Expr>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment
    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::PlusEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::MinusEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::StarEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::SlashEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::PercentEquals, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);
    parser.led(TokenKind::In, BindingPower::Logical, parse_binary_expr);
    parser.led(TokenKind::NullCoalesce, BindingPower::Logical, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    parser.led(TokenKind::DotDot, BindingPower::Range, parse_range_expr);

    // Arithmetic
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::StarStar, BindingPower::Power, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Modulus, parse_binary_expr);

    // Call, index and member
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Index, parse_index_expr);
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);

    parser.postfix(TokenKind::PlusPlus, parse_postfix_expr);
    parser.postfix(TokenKind::MinusMinus, parse_postfix_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Integer, parse_integer_expr);
    parser.nud(TokenKind::Float, parse_float_expr);
    parser.nud(TokenKind::String, parse_string_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::Null, parse_null_expr);
    parser.nud(TokenKind::At, parse_at_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Ampersand, parse_prefix_expr);
    parser.nud(TokenKind::Star, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_array_expr);
    parser.nud(TokenKind::OpenCurly, parse_dict_expr);
    parser.nud(TokenKind::Ellipsis, parse_spread_expr);

    // Control flow and declarations in expression position
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::While, parse_while_expr);
    parser.nud(TokenKind::For, parse_for_expr);
    parser.nud(TokenKind::Repeat, parse_repeat_expr);
    parser.nud(TokenKind::Switch, parse_switch_expr);
    parser.nud(TokenKind::Match, parse_match_expr);
    parser.nud(TokenKind::Func, parse_function_expr);
    parser.nud(TokenKind::Async, parse_async_function_expr);
    parser.nud(TokenKind::Await, parse_await_expr);
    parser.nud(TokenKind::Chan, parse_channel_expr);
    parser.nud(TokenKind::Import, parse_import_expr);
    parser.nud(TokenKind::Package, parse_package_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_var_decl_stmt);
    parser.stmt(TokenKind::Const, parse_var_decl_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
    parser.stmt(TokenKind::Include, parse_include_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Enum, parse_enum_stmt);
    parser.stmt(TokenKind::Go, parse_go_stmt);
    parser.stmt(TokenKind::Error, parse_error_stmt);
    parser.stmt(TokenKind::Throw, parse_declarative_stmt);
    parser.stmt(TokenKind::Defer, parse_declarative_stmt);
    for kind in [
        TokenKind::Todo,
        TokenKind::Warn,
        TokenKind::Info,
        TokenKind::Debug,
        TokenKind::Note,
        TokenKind::Success,
        TokenKind::Trace,
        TokenKind::Fatal,
        TokenKind::Critical,
        TokenKind::Log,
    ] {
        parser.stmt(kind, parse_declarative_stmt);
    }
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type PostfixLookup = HashMap<TokenKind, PostfixHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
