use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("func", TokenKind::Func);
        map.insert("function", TokenKind::Func);
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("null", TokenKind::Null);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("in", TokenKind::In);
        map.insert("for", TokenKind::For);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("match", TokenKind::Match);
        map.insert("import", TokenKind::Import);
        map.insert("package", TokenKind::Package);
        map.insert("include", TokenKind::Include);
        map.insert("enum", TokenKind::Enum);
        map.insert("async", TokenKind::Async);
        map.insert("await", TokenKind::Await);
        map.insert("go", TokenKind::Go);
        map.insert("chan", TokenKind::Chan);
        map.insert("throw", TokenKind::Throw);
        map.insert("error", TokenKind::Error);
        map.insert("defer", TokenKind::Defer);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("todo", TokenKind::Todo);
        map.insert("warn", TokenKind::Warn);
        map.insert("info", TokenKind::Info);
        map.insert("debug", TokenKind::Debug);
        map.insert("note", TokenKind::Note);
        map.insert("success", TokenKind::Success);
        map.insert("trace", TokenKind::Trace);
        map.insert("fatal", TokenKind::Fatal);
        map.insert("critical", TokenKind::Critical);
        map.insert("log", TokenKind::Log);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Illegal,

    Identifier,
    Integer,
    Float,
    String,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    NullCoalesce, // ??

    Dot,
    DotDot,   // ..
    Ellipsis, // ...
    Semicolon,
    Colon,
    Comma,
    Arrow, // => or ->
    At,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,

    Plus,
    Dash,
    Slash,
    Star,
    StarStar,
    Percent,
    Ampersand,

    // Reserved
    Func,
    Let,
    Const,
    True,
    False,
    If,
    Else,
    While,
    Return,
    Null,
    Break,
    Continue,
    In,
    For,
    Switch,
    Case,
    Default,
    Match,
    Import,
    Package,
    Include,
    Enum,
    Async,
    Await,
    Go,
    Chan,
    Throw,
    Error,
    Defer,
    Repeat,

    // Declaratives
    Todo,
    Warn,
    Info,
    Debug,
    Note,
    Success,
    Trace,
    Fatal,
    Critical,
    Log,
}

impl TokenKind {
    /// Keywords that may only begin a statement; recovery stops on them.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Const
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Include
                | TokenKind::Enum
                | TokenKind::Go
                | TokenKind::Func
                | TokenKind::Async
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Repeat
                | TokenKind::Switch
                | TokenKind::Match
                | TokenKind::Import
                | TokenKind::Package
                | TokenKind::Throw
                | TokenKind::Error
                | TokenKind::Defer
        ) || self.is_declarative()
    }

    pub fn is_declarative(&self) -> bool {
        matches!(
            self,
            TokenKind::Todo
                | TokenKind::Warn
                | TokenKind::Info
                | TokenKind::Debug
                | TokenKind::Note
                | TokenKind::Success
                | TokenKind::Trace
                | TokenKind::Fatal
                | TokenKind::Critical
                | TokenKind::Log
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}` (line {})", self.kind, self.value, self.line)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn eof(line: usize) -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::new(),
            line,
        }
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Illegal,
        ]) {
            format!("{:>4} {} ({})", self.line, self.kind, self.value)
        } else {
            format!("{:>4} {}", self.line, self.kind)
        }
    }
}

/// A one-token-at-a-time producer of tokens.
///
/// Once the underlying input is exhausted every further call must return an
/// `EOF` token.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A [`TokenSource`] over an already lexed token vector.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    last_line: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens: tokens.into_iter(),
            last_line: 1,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.last_line = token.line;
                token
            }
            None => Token::eof(self.last_line),
        }
    }
}
