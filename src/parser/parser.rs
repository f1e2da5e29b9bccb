//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser pulls tokens from
//! a [`TokenSource`] through a three-token window (previous, current, peek)
//! and never backtracks. Expressions go through the Pratt loop in
//! [`super::expr::parse_expr`], statements through [`super::stmt::parse_stmt`].
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Postfix handlers
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenSource, TokenStream},
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, PostfixHandler, PostfixLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Where a statement began, for recovery.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    position: usize,
    depth: usize,
}

/// The main parser structure that maintains parsing state.
///
/// One parser handles exactly one token stream, from construction until
/// [`Parser::parse_program`] returns.
pub struct Parser {
    source: Box<dyn TokenSource>,
    previous: Token,
    current: Token,
    peek: Token,
    /// Number of tokens consumed so far; lets recovery prove it made progress
    position: usize,
    /// Unclosed `{` among the consumed tokens
    depth: usize,
    /// Value of `position` when the last diagnostic was recorded
    error_position: usize,
    errors: Vec<Error>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    postfix_lookup: PostfixLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `source`, registers every handler and primes
    /// the window so that `current` holds the first token.
    pub fn new(source: impl TokenSource + 'static) -> Self {
        let mut parser = Parser {
            source: Box::new(source),
            previous: Token::eof(1),
            current: Token::eof(1),
            peek: Token::eof(1),
            position: 0,
            depth: 0,
            error_position: 0,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            postfix_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser.advance();
        parser.advance();
        parser.position = 0;
        parser.depth = 0;
        parser
    }

    pub fn previous(&self) -> &Token {
        &self.previous
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn peek(&self) -> &Token {
        &self.peek
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            depth: self.depth,
        }
    }

    /// Shifts the window one token forward.
    pub fn advance(&mut self) {
        match self.current.kind {
            TokenKind::OpenCurly => self.depth += 1,
            TokenKind::CloseCurly => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }

        let next = self.source.next_token();
        self.previous = std::mem::replace(&mut self.current, std::mem::replace(&mut self.peek, next));
        self.position += 1;
    }

    /// Advances if the lookahead is `kind`, otherwise records an
    /// expectation mismatch and returns `None`.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.advance();
            Some(())
        } else {
            self.add_error(ErrorImpl::ExpectedToken {
                expected: kind,
                found: self.peek.kind,
            });
            None
        }
    }

    /// Consumes a `;` if one follows.
    pub fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    pub fn current_precedence(&self) -> BindingPower {
        self.binding_power(self.current.kind)
    }

    pub fn peek_precedence(&self) -> BindingPower {
        self.binding_power(self.peek.kind)
    }

    fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Records a diagnostic on the current token's line.
    pub fn add_error(&mut self, error: ErrorImpl) {
        let line = self.current.line;
        self.add_error_at(error, line);
    }

    pub fn add_error_at(&mut self, error: ErrorImpl, line: usize) {
        let error = Error::new(error, line);
        self.error_position = self.position;
        debug!(%error, "parse error");
        self.errors.push(error);
    }

    /// Diagnostics rendered as `Line <n>: <message>`, in the order found.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_postfix_lookup(&self) -> &PostfixLookup {
        &self.postfix_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler and its binding power.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn postfix(&mut self, kind: TokenKind, postfix_fn: PostfixHandler) {
        self.postfix_lookup.insert(kind, postfix_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Skips tokens after a failed statement that began at `start`.
    ///
    /// Stops on the first token that can begin a fresh statement: one right
    /// after a `;`, a statement keyword, a token on a later line than the
    /// failure, a `}` when `in_block`, or end of input. At least one token is
    /// consumed if the failed statement consumed none.
    ///
    /// A `}` closing a brace the failed statement opened is never a boundary,
    /// so the enclosing block keeps its own closing brace. The token a
    /// diagnostic was just recorded on is not a keyword boundary when it has a
    /// prefix handler, since parsing it again would repeat the diagnostic.
    pub fn synchronize(&mut self, start: Checkpoint, in_block: bool) {
        let failed_line = self.current.line;
        let failed_at = self.error_position;
        let mut skipped = 0;

        while !self.current_is(TokenKind::EOF) {
            if self.position > start.position {
                let kind = self.current.kind;
                let nested_close = kind == TokenKind::CloseCurly && self.depth > start.depth;
                let keyword = kind.starts_statement()
                    && !(self.position == failed_at && self.nud_lookup.contains_key(&kind));
                let boundary = self.previous.kind == TokenKind::Semicolon
                    || keyword
                    || self.current.line > failed_line
                    || (in_block && kind == TokenKind::CloseCurly);
                if boundary && !nested_close {
                    break;
                }
            }
            self.advance();
            skipped += 1;
        }

        debug!(skipped, line = self.current.line, "synchronized");
    }

    /// Parses statements until end of input.
    ///
    /// Never stops early: a failed statement leaves an absent slot, recovery
    /// moves to the next statement boundary and parsing continues.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current_is(TokenKind::EOF) {
            let start = self.checkpoint();
            match parse_stmt(self) {
                Some(stmt) => {
                    statements.push(Some(stmt));
                    self.advance();
                }
                None => {
                    statements.push(None);
                    self.synchronize(start, false);
                }
            }
        }

        Program { statements }
    }
}

/// Parses a stream of tokens into a [`Program`].
///
/// This is the main entry point for parsing. The returned parser holds the
/// diagnostics; an empty [`Parser::errors`] means a clean parse.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>) -> (Parser, Program) {
    let mut parser = Parser::new(TokenStream::new(tokens));
    let program = parser.parse_program();

    debug!(
        statements = program.statements.len(),
        errors = parser.errors.len(),
        "parsed program"
    );

    (parser, program)
}
