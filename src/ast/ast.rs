use std::fmt::{Display, Formatter, Result};

use crate::lexer::tokens::Token;

use super::{
    expressions::{
        ArrayExpr, ArrayPatternExpr, AssignExpr, AtExpr, AwaitExpr, BooleanExpr, CallExpr,
        ChannelExpr, CompoundAssignExpr, DictExpr, FloatExpr, ForExpr, FunctionExpr,
        IdentifierExpr, IfExpr, ImportExpr, IndexAssignExpr, IndexExpr, InfixExpr, IntegerExpr,
        MatchExpr, MethodExpr, NullExpr, PackageExpr, PostfixExpr, PrefixExpr,
        PropertyAssignExpr, PropertyExpr, RangeExpr, RepeatExpr, SliceExpr, SpreadExpr,
        StringExpr, SwitchExpr, WhileExpr,
    },
    statements::{
        BlockStmt, BreakStmt, ContinueStmt, DeclarativeStmt, EnumStmt, ErrorDeclStmt,
        ExpressionStmt, GoStmt, IncludeStmt, ReturnStmt, VarDeclStmt,
    },
};

/// The root of every parse.
///
/// A slot is `None` when the statement starting there failed to parse; its
/// diagnostic has already been recorded by the parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Option<Stmt>>,
}

impl Program {
    /// Statements that parsed successfully, in source order.
    pub fn parsed(&self) -> impl Iterator<Item = &Stmt> {
        self.statements.iter().flatten()
    }

    pub fn has_absent_statements(&self) -> bool {
        self.statements.iter().any(Option::is_none)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match stmt {
                Some(stmt) => write!(f, "{}", stmt)?,
                None => write!(f, "<error>")?,
            }
        }
        Ok(())
    }
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Include(IncludeStmt),
    Block(BlockStmt),
    Enum(EnumStmt),
    ErrorDecl(ErrorDeclStmt),
    Declarative(DeclarativeStmt),
    Go(GoStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    /// The token the statement was parsed from.
    pub fn token(&self) -> &Token {
        match self {
            Stmt::VarDecl(s) => &s.token,
            Stmt::Return(s) => &s.token,
            Stmt::Break(s) => &s.token,
            Stmt::Continue(s) => &s.token,
            Stmt::Include(s) => &s.token,
            Stmt::Block(s) => &s.token,
            Stmt::Enum(s) => &s.token,
            Stmt::ErrorDecl(s) => &s.token,
            Stmt::Declarative(s) => &s.token,
            Stmt::Go(s) => &s.token,
            Stmt::Expression(s) => &s.token,
        }
    }

    /// The wrapped expression, if this is an expression statement.
    pub fn as_expression(&self) -> Option<&Expr> {
        match self {
            Stmt::Expression(s) => Some(&s.expression),
            _ => None,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::VarDecl(s) => s.fmt(f),
            Stmt::Return(s) => s.fmt(f),
            Stmt::Break(s) => s.fmt(f),
            Stmt::Continue(s) => s.fmt(f),
            Stmt::Include(s) => s.fmt(f),
            Stmt::Block(s) => s.fmt(f),
            Stmt::Enum(s) => s.fmt(f),
            Stmt::ErrorDecl(s) => s.fmt(f),
            Stmt::Declarative(s) => s.fmt(f),
            Stmt::Go(s) => s.fmt(f),
            Stmt::Expression(s) => s.fmt(f),
        }
    }
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    Float(FloatExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Null(NullExpr),
    At(AtExpr),

    // Composites
    Array(ArrayExpr),
    Dict(DictExpr),
    ArrayPattern(ArrayPatternExpr),
    Spread(SpreadExpr),

    // Operators
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Postfix(PostfixExpr),
    Range(RangeExpr),
    Assign(AssignExpr),
    CompoundAssign(CompoundAssignExpr),
    IndexAssign(IndexAssignExpr),
    PropertyAssign(PropertyAssignExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Slice(SliceExpr),
    Property(PropertyExpr),
    Method(MethodExpr),

    // Control flow
    If(IfExpr),
    While(WhileExpr),
    For(ForExpr),
    Repeat(RepeatExpr),
    Switch(SwitchExpr),
    Match(MatchExpr),

    // Declarations
    Function(FunctionExpr),
    AsyncFunction(FunctionExpr),
    Await(AwaitExpr),
    Channel(ChannelExpr),
    Import(ImportExpr),
    Package(PackageExpr),
}

impl Expr {
    /// The token the expression was parsed from.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(e) => &e.token,
            Expr::Integer(e) => &e.token,
            Expr::Float(e) => &e.token,
            Expr::String(e) => &e.token,
            Expr::Boolean(e) => &e.token,
            Expr::Null(e) => &e.token,
            Expr::At(e) => &e.token,
            Expr::Array(e) => &e.token,
            Expr::Dict(e) => &e.token,
            Expr::ArrayPattern(e) => &e.token,
            Expr::Spread(e) => &e.token,
            Expr::Prefix(e) => &e.token,
            Expr::Infix(e) => &e.token,
            Expr::Postfix(e) => &e.token,
            Expr::Range(e) => &e.token,
            Expr::Assign(e) => &e.token,
            Expr::CompoundAssign(e) => &e.token,
            Expr::IndexAssign(e) => &e.token,
            Expr::PropertyAssign(e) => &e.token,
            Expr::Call(e) => &e.token,
            Expr::Index(e) => &e.token,
            Expr::Slice(e) => &e.token,
            Expr::Property(e) => &e.token,
            Expr::Method(e) => &e.token,
            Expr::If(e) => &e.token,
            Expr::While(e) => &e.token,
            Expr::For(e) => &e.token,
            Expr::Repeat(e) => &e.token,
            Expr::Switch(e) => &e.token,
            Expr::Match(e) => &e.token,
            Expr::Function(e) | Expr::AsyncFunction(e) => &e.token,
            Expr::Await(e) => &e.token,
            Expr::Channel(e) => &e.token,
            Expr::Import(e) => &e.token,
            Expr::Package(e) => &e.token,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Identifier(e) => e.fmt(f),
            Expr::Integer(e) => e.fmt(f),
            Expr::Float(e) => e.fmt(f),
            Expr::String(e) => e.fmt(f),
            Expr::Boolean(e) => e.fmt(f),
            Expr::Null(e) => e.fmt(f),
            Expr::At(e) => e.fmt(f),
            Expr::Array(e) => e.fmt(f),
            Expr::Dict(e) => e.fmt(f),
            Expr::ArrayPattern(e) => e.fmt(f),
            Expr::Spread(e) => e.fmt(f),
            Expr::Prefix(e) => e.fmt(f),
            Expr::Infix(e) => e.fmt(f),
            Expr::Postfix(e) => e.fmt(f),
            Expr::Range(e) => e.fmt(f),
            Expr::Assign(e) => e.fmt(f),
            Expr::CompoundAssign(e) => e.fmt(f),
            Expr::IndexAssign(e) => e.fmt(f),
            Expr::PropertyAssign(e) => e.fmt(f),
            Expr::Call(e) => e.fmt(f),
            Expr::Index(e) => e.fmt(f),
            Expr::Slice(e) => e.fmt(f),
            Expr::Property(e) => e.fmt(f),
            Expr::Method(e) => e.fmt(f),
            Expr::If(e) => e.fmt(f),
            Expr::While(e) => e.fmt(f),
            Expr::For(e) => e.fmt(f),
            Expr::Repeat(e) => e.fmt(f),
            Expr::Switch(e) => e.fmt(f),
            Expr::Match(e) => e.fmt(f),
            Expr::Function(e) => e.fmt(f),
            Expr::AsyncFunction(e) => write!(f, "async {}", e),
            Expr::Await(e) => e.fmt(f),
            Expr::Channel(e) => e.fmt(f),
            Expr::Import(e) => e.fmt(f),
            Expr::Package(e) => e.fmt(f),
        }
    }
}

/// Writes `items` separated by `, `.
pub(crate) fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
