use std::collections::VecDeque;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Patterns are compile-time constants; a bad one is a programming error.
        regex: Regex::new(regex).expect("invalid lexer pattern"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so longer
    // operators must come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^//[^\n]*", skip_handler),
        pattern(r"^(?s)/\*.*?\*/", skip_handler),
        pattern(r"^(?s)/\*.*", skip_handler),
        pattern(r"^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern(r"^0[xX][0-9a-fA-F]+", integer_handler),
        pattern(r"^0[oO][0-7]+", integer_handler),
        pattern(r"^0[bB][01]+", integer_handler),
        pattern(r"^[0-9]+\.[0-9]+", float_handler),
        pattern(r"^[0-9]+", integer_handler),
        pattern(r#"^(?s)"(?:[^"\\]|\\.)*""#, string_handler),
        pattern(r"^(?s)'(?:[^'\\]|\\.)*'", string_handler),
        pattern(r#"^["']"#, unterminated_string_handler),
        pattern(r"^\.\.\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        pattern(r"^\.\.", MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern(r"^=>", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "=>")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(r"^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern(r"^\?\?", MK_DEFAULT_HANDLER!(TokenKind::NullCoalesce, "??")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^@", MK_DEFAULT_HANDLER!(TokenKind::At, "@")),
        pattern(r"^\+\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern(r"^\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern(r"^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern(r"^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"^\*\*", MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**")),
        pattern(r"^\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

/// Regex-driven scanner producing line-tagged tokens.
///
/// The lexer can be drained in one go with [`tokenize`] or pulled one token at
/// a time through its [`TokenSource`] implementation. In the streaming form a
/// bad character becomes an `Illegal` token and the problem is recorded in
/// [`Lexer::errors`].
pub struct Lexer {
    tokens: VecDeque<Token>,
    source: String,
    pos: usize,
    line: usize,
    errors: Vec<Error>,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        let mut lexer = Lexer {
            tokens: VecDeque::new(),
            source,
            pos: 0,
            line: 1,
            errors: vec![],
        };

        // A leading `#!` line is an interpreter directive, not code.
        if lexer.source.starts_with("#!") {
            lexer.pos = lexer.source.find('\n').unwrap_or(lexer.source.len());
        }

        lexer
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn count_lines(&mut self, text: &str) {
        self.line += text.matches('\n').count();
    }

    /// Runs the pattern table once at the cursor.
    fn scan(&mut self) {
        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                (pattern.handler)(self, &pattern.regex);
                return;
            }
        }

        let Some(ch) = self.remainder().chars().next() else {
            return;
        };
        self.errors.push(Error::new(
            ErrorImpl::UnrecognisedToken {
                token: ch.to_string(),
            },
            self.line,
        ));
        let line = self.line;
        self.push(MK_TOKEN!(TokenKind::Illegal, ch.to_string(), line));
        self.advance_n(ch.len_utf8());
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return token;
            }
            if self.at_eof() {
                return Token::eof(self.line);
            }
            self.scan();
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.count_lines(&matched);
    lexer.advance_n(matched.len());
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let line = lexer.line;
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Integer, matched, line));
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let line = lexer.line;
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Float, matched, line));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let line = lexer.line;
    lexer.advance_n(value.len());

    // `import(...)` is a call to the builtin, not the import statement.
    let kind = if value == "import" && lexer.remainder().trim_start().starts_with('(') {
        TokenKind::Identifier
    } else {
        RESERVED_LOOKUP
            .get(value.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier)
    };

    lexer.push(MK_TOKEN!(kind, value, line));
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let line = lexer.line;
    let inner = &matched[1..matched.len() - 1];
    let value = unescape(inner);

    lexer.count_lines(&matched);
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, value, line));
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let rest = lexer.remainder().to_string();
    let line = lexer.line;

    lexer
        .errors
        .push(Error::new(ErrorImpl::UnterminatedString, line));
    lexer.count_lines(&rest);
    lexer.advance_n(rest.len());
    lexer.push(MK_TOKEN!(TokenKind::Illegal, rest, line));
}

fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('0') => result.push('\0'),
            Some('x') => {
                chars.next();
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) if hex.len() == 2 => result.push(byte as char),
                    _ => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
                continue;
            }
            Some('u') => {
                chars.next();
                let mut hex = String::new();
                while hex.len() < 4 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => result.push(ch),
                    None => {
                        result.push_str("\\u");
                        result.push_str(&hex);
                    }
                }
                continue;
            }
            // Unknown escapes keep their backslash.
            Some(_) => {
                result.push('\\');
                continue;
            }
            None => {
                result.push('\\');
                continue;
            }
        }
        chars.next();
    }

    result
}

/// Lexes a whole source string, stopping at the first bad character.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: String) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        if let Some(error) = lex.errors.first() {
            return Err(error.clone());
        }

        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            break;
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
