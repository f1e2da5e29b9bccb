use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result},
};

use crate::lexer::tokens::Token;

use super::{
    ast::{write_list, Expr},
    statements::BlockStmt,
};

// LITERALS

/// A bare name, also used for the `_` wildcard inside patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub token: Token,
    pub value: String,
}

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub token: Token,
    pub value: i64,
}

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub token: Token,
    pub value: f64,
}

impl Display for FloatExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.value)
    }
}

/// String literal; `value` holds the unescaped contents.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub token: Token,
    pub value: String,
}

impl Display for StringExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub token: Token,
    pub value: bool,
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullExpr {
    pub token: Token,
}

impl Display for NullExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "null")
    }
}

/// The `@` receiver literal.
#[derive(Debug, Clone, PartialEq)]
pub struct AtExpr {
    pub token: Token,
}

impl Display for AtExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "@")
    }
}

// COMPOSITES

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub token: Token,
    pub elements: Vec<Expr>,
}

impl Display for ArrayExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[")?;
        write_list(f, &self.elements)?;
        write!(f, "]")
    }
}

/// Dict literal. Pairs keep their source order; the same node doubles as a
/// dict pattern inside `match`.
#[derive(Debug, Clone, PartialEq)]
pub struct DictExpr {
    pub token: Token,
    pub pairs: Vec<(Expr, Expr)>,
}

impl Display for DictExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// `[a, b, ...rest]` inside a `match` case.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPatternExpr {
    pub token: Token,
    pub elements: Vec<Expr>,
    pub rest: Option<IdentifierExpr>,
}

impl Display for ArrayPatternExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[")?;
        write_list(f, &self.elements)?;
        if let Some(rest) = &self.rest {
            if !self.elements.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...{}", rest)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadExpr {
    pub token: Token,
    pub name: IdentifierExpr,
}

impl Display for SpreadExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "...{}", self.name)
    }
}

// OPERATORS

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// `x++` / `x--`. The token is the operand the operator was applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub token: Token,
    pub operator: String,
}

impl Display for PostfixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}{})", self.token.value, self.operator)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr {
    pub token: Token,
    pub start: Box<Expr>,
    pub end: Box<Expr>,
}

impl Display for RangeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}..{})", self.start, self.end)
    }
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub token: Token,
    pub name: IdentifierExpr,
    pub value: Box<Expr>,
}

impl Display for AssignExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} = {})", self.name, self.value)
    }
}

/// `name += value` and the other arithmetic-assign operators.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundAssignExpr {
    pub token: Token,
    pub name: IdentifierExpr,
    pub operator: String,
    pub value: Box<Expr>,
}

impl Display for CompoundAssignExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.name, self.operator, self.value)
    }
}

/// Assignment through an index, `target` being the whole `a[i]` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAssignExpr {
    pub token: Token,
    pub target: Box<Expr>,
    pub operator: String,
    pub value: Box<Expr>,
}

impl Display for IndexAssignExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.target, self.operator, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAssignExpr {
    pub token: Token,
    pub target: PropertyExpr,
    pub operator: String,
    pub value: Box<Expr>,
}

impl Display for PropertyAssignExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.target, self.operator, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub token: Token,
    pub function: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}(", self.function)?;
        write_list(f, &self.arguments)?;
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub index: Box<Expr>,
}

impl Display for IndexExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// `a[start:end]`, either bound may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub start: Option<Box<Expr>>,
    pub end: Option<Box<Expr>>,
}

impl Display for SliceExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}[", self.left)?;
        if let Some(start) = &self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(end) = &self.end {
            write!(f, "{}", end)?;
        }
        write!(f, "])")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyExpr {
    pub token: Token,
    pub object: Box<Expr>,
    pub property: IdentifierExpr,
}

impl Display for PropertyExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodExpr {
    pub token: Token,
    pub object: Box<Expr>,
    pub method: IdentifierExpr,
    pub arguments: Vec<Expr>,
}

impl Display for MethodExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}.{}(", self.object, self.method)?;
        write_list(f, &self.arguments)?;
        write!(f, ")")
    }
}

// CONTROL FLOW

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Box<Expr>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileExpr {
    pub token: Token,
    pub condition: Box<Expr>,
    pub body: BlockStmt,
}

impl Display for WhileExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

/// `for value in iterable {}` or `for key, value in iterable {}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForExpr {
    pub token: Token,
    pub key: Option<IdentifierExpr>,
    pub value: IdentifierExpr,
    pub iterable: Box<Expr>,
    pub body: BlockStmt,
}

impl Display for ForExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "for ")?;
        if let Some(key) = &self.key {
            write!(f, "{}, ", key)?;
        }
        write!(f, "{} in {} {}", self.value, self.iterable, self.body)
    }
}

/// `repeat count {}`; the body sees the iteration number as `variable`.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatExpr {
    pub token: Token,
    pub variable: String,
    pub count: Box<Expr>,
    pub body: BlockStmt,
}

impl Display for RepeatExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "repeat ({}) {} {}", self.variable, self.count, self.body)
    }
}

/// One `case` arm. A default arm has `default` set and no values.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub token: Token,
    pub default: bool,
    pub values: Vec<Expr>,
    pub body: BlockStmt,
}

impl Display for CaseClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.default {
            write!(f, "default {}", self.body)
        } else {
            write!(f, "case ")?;
            write_list(f, &self.values)?;
            write!(f, " {}", self.body)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpr {
    pub token: Token,
    pub subject: Box<Expr>,
    pub cases: Vec<CaseClause>,
}

impl SwitchExpr {
    pub fn default_case(&self) -> Option<&CaseClause> {
        self.cases.iter().find(|case| case.default)
    }
}

impl Display for SwitchExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "switch ({}) {{ ", self.subject)?;
        for case in &self.cases {
            write!(f, "{} ", case)?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub token: Token,
    pub pattern: Expr,
    pub guard: Option<Expr>,
    pub body: BlockStmt,
}

impl Display for MatchCase {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.pattern)?;
        if let Some(guard) = &self.guard {
            write!(f, " if {}", guard)?;
        }
        write!(f, " => {}", self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpr {
    pub token: Token,
    pub subject: Box<Expr>,
    pub cases: Vec<MatchCase>,
}

impl Display for MatchExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "match {} {{ ", self.subject)?;
        write_list(f, &self.cases)?;
        write!(f, " }}")
    }
}

// DECLARATIONS

/// Function literal, named or anonymous. Parameters keep their declared
/// order; `defaults` maps a parameter name to its default value expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub token: Token,
    pub name: Option<IdentifierExpr>,
    pub parameters: Vec<IdentifierExpr>,
    pub defaults: HashMap<String, Expr>,
    pub body: BlockStmt,
}

impl Display for FunctionExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "func")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        write!(f, "(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
            if let Some(default) = self.defaults.get(&parameter.value) {
                write!(f, " = {}", default)?;
            }
        }
        write!(f, ") {}", self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpr {
    pub token: Token,
    pub value: Box<Expr>,
}

impl Display for AwaitExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(await {})", self.value)
    }
}

/// `chan` or `chan(size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelExpr {
    pub token: Token,
    pub size: Option<Box<Expr>>,
}

impl Display for ChannelExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.size {
            Some(size) => write!(f, "chan({})", size),
            None => write!(f, "chan"),
        }
    }
}

/// `import a, b`. Names are unique and keep first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportExpr {
    pub token: Token,
    pub names: Vec<IdentifierExpr>,
}

impl Display for ImportExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "import ")?;
        write_list(f, &self.names)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageExpr {
    pub token: Token,
    pub name: IdentifierExpr,
    pub body: BlockStmt,
}

impl Display for PackageExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "package {} {}", self.name, self.body)
    }
}
