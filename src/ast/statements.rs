use std::fmt::{Display, Formatter, Result};

use crate::lexer::tokens::{Token, TokenKind};

use super::{
    ast::{write_list, Expr, Stmt},
    expressions::{IdentifierExpr, StringExpr},
};

/// Block Statement
/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<Stmt>,
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.body.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", stmt)?;
        }
        write!(f, " }}")
    }
}

/// Expression Statement
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Expr,
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.expression)
    }
}

/// Variable Declaration Statement
/// `let name = value` or, with `is_constant`, `const name = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub is_constant: bool,
    pub value: Expr,
}

impl Display for VarDeclStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let keyword = if self.is_constant { "const" } else { "let" };
        write!(f, "{} {} = {}", keyword, self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Option<Expr>,
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.value {
            Some(value) => write!(f, "return {}", value),
            None => write!(f, "return"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub token: Token,
}

impl Display for BreakStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "break")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub token: Token,
}

impl Display for ContinueStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "continue")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncludeStmt {
    pub token: Token,
    pub path: StringExpr,
}

impl Display for IncludeStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "include {}", self.path)
    }
}

/// Enum Declaration
/// Members keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub members: Vec<(IdentifierExpr, Expr)>,
}

impl EnumStmt {
    pub fn member(&self, name: &str) -> Option<&Expr> {
        self.members
            .iter()
            .find(|(member, _)| member.value == name)
            .map(|(_, value)| value)
    }
}

impl Display for EnumStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "enum {} {{ ", self.name)?;
        for (i, (member, value)) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", member, value)?;
        }
        write!(f, " }}")
    }
}

/// Error-type declaration: `error NotFound(path)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDeclStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub parameters: Vec<IdentifierExpr>,
}

impl Display for ErrorDeclStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "error {}(", self.name)?;
        write_list(f, &self.parameters)?;
        write!(f, ")")
    }
}

/// Keywords that introduce a single-expression statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declarative {
    Defer,
    Throw,
    Error,
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

impl Declarative {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        let declarative = match kind {
            TokenKind::Defer => Declarative::Defer,
            TokenKind::Throw => Declarative::Throw,
            TokenKind::Error => Declarative::Error,
            TokenKind::Todo => Declarative::Todo,
            TokenKind::Warn => Declarative::Warn,
            TokenKind::Info => Declarative::Info,
            TokenKind::Debug => Declarative::Debug,
            TokenKind::Note => Declarative::Note,
            TokenKind::Success => Declarative::Success,
            TokenKind::Trace => Declarative::Trace,
            TokenKind::Fatal => Declarative::Fatal,
            TokenKind::Critical => Declarative::Critical,
            TokenKind::Log => Declarative::Log,
            _ => return None,
        };
        Some(declarative)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Declarative::Defer => "defer",
            Declarative::Throw => "throw",
            Declarative::Error => "error",
            Declarative::Todo => "todo",
            Declarative::Warn => "warn",
            Declarative::Info => "info",
            Declarative::Debug => "debug",
            Declarative::Note => "note",
            Declarative::Success => "success",
            Declarative::Trace => "trace",
            Declarative::Fatal => "fatal",
            Declarative::Critical => "critical",
            Declarative::Log => "log",
        }
    }
}

/// `info "starting"`, `defer close()`, `throw err`...
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarativeStmt {
    pub token: Token,
    pub declarative: Declarative,
    pub value: Expr,
}

impl Display for DeclarativeStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} {}", self.declarative.keyword(), self.value)
    }
}

/// `go expr`
#[derive(Debug, Clone, PartialEq)]
pub struct GoStmt {
    pub token: Token,
    pub expression: Expr,
}

impl Display for GoStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "go {}", self.expression)
    }
}
